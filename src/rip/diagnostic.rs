//! 引擎诊断
//!
//! 引擎从不向调用方返回错误；这些情况只记录下来，然后继续处理事件流。

use super::id::{PortId, RouterId};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Diagnostic {
    #[error("advertisement from unknown neighbor {neighbor} on {port} discarded")]
    UnknownNeighbor { neighbor: RouterId, port: PortId },

    #[error("no route to {dst}, packet {pkt_id} dropped")]
    NoRoute { dst: RouterId, pkt_id: u64 },

    #[error("link-down for absent neighbor {neighbor} ignored")]
    RedundantLinkDown { neighbor: RouterId },
}

impl Diagnostic {
    /// 是否值得告警。重复的断链通知只是空操作，按调试级别记录。
    pub fn is_warning(&self) -> bool {
        !matches!(self, Diagnostic::RedundantLinkDown { .. })
    }
}
