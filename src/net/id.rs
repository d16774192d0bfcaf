//! 链路标识符
//!
//! 节点直接使用路由引擎的 `RouterId`，主机和路由器共用同一命名空间。

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LinkId(pub usize);
