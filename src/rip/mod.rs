//! RIP 风格的距离向量路由引擎
//!
//! 引擎本身不关心拓扑、时间与报文编码，只通过 `handle_rx` 接收事件、
//! 通过 `PacketSink` 发出事件。

mod diagnostic;
mod id;
mod packet;
mod router;
mod table;

pub use diagnostic::Diagnostic;
pub use id::{Distance, PortId, RouterId};
pub use packet::{DataPacket, LinkStatus, RipPacket, RoutingUpdate};
pub use router::{PacketSink, RipRouter};
pub use table::{MergeOutcome, NeighborRoutes, Route, RoutingTable};
