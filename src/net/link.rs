//! 链路类型
//!
//! 双向链路连接两个 (节点, 端口)。距离是路由度量，时延决定报文在链路上的传播时间。

use crate::rip::{Distance, PortId, RouterId};
use crate::sim::SimTime;

/// 链路的一端
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    pub node: RouterId,
    pub port: PortId,
}

#[derive(Debug, Clone)]
pub struct Link {
    pub a: Endpoint,
    pub b: Endpoint,
    pub distance: Distance,
    pub latency: SimTime,
    /// 新建链路处于断开状态，需要显式 `link_up`
    pub up: bool,
}

impl Link {
    pub fn new(a: Endpoint, b: Endpoint, distance: Distance, latency: SimTime) -> Self {
        Self {
            a,
            b,
            distance,
            latency,
            up: false,
        }
    }

    /// 从 `(node, port)` 这一端看过去的对端
    pub fn peer_of(&self, node: RouterId, port: PortId) -> Option<Endpoint> {
        let here = Endpoint { node, port };
        if self.a == here {
            Some(self.b)
        } else if self.b == here {
            Some(self.a)
        } else {
            None
        }
    }

    pub fn connects(&self, x: RouterId, y: RouterId) -> bool {
        (self.a.node == x && self.b.node == y) || (self.a.node == y && self.b.node == x)
    }
}
