//! 网络仿真模块
//!
//! 路由引擎之外的一切：节点、端口连线、链路时延、数据包投递与统计。

mod actions;
mod deliver_packet;
mod error;
mod id;
mod link;
mod net_world;
mod network;
mod network_trace;
mod node;
mod stats;

pub use actions::{SendData, SetLinkState};
pub use deliver_packet::DeliverPacket;
pub use error::NetError;
pub use id::LinkId;
pub use link::{Endpoint, Link};
pub use net_world::NetWorld;
pub use network::Network;
pub use node::{Host, Node, NodeKind, Outbox, Router};
pub use stats::Stats;
