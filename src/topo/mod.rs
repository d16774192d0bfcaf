//! 拓扑构建
//!
//! 常用测试拓扑。所有链路创建后处于断开状态，由调用方决定何时上线。

mod line;
mod ring;

pub use line::build_line;
pub use ring::build_ring;

use crate::net::LinkId;
use crate::rip::{Distance, RouterId};
use crate::sim::SimTime;

/// 拓扑公共参数
#[derive(Debug, Clone, Copy)]
pub struct TopoOpts {
    /// 每条链路的路由距离
    pub distance: Distance,
    /// 每条链路的单向传播时延
    pub link_latency: SimTime,
}

impl Default for TopoOpts {
    fn default() -> Self {
        Self {
            distance: Distance(1),
            link_latency: SimTime::from_micros(10),
        }
    }
}

/// 构建结果
#[derive(Debug, Clone)]
pub struct Topology {
    /// 两台端点主机：(h0, h1)
    pub hosts: (RouterId, RouterId),
    pub routers: Vec<RouterId>,
    /// 按创建顺序
    pub links: Vec<LinkId>,
}
