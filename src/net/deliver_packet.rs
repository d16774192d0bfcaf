//! 报文到达事件

use crate::rip::{PortId, RipPacket, RouterId};
use crate::sim::{Event, Simulator, World};
use tracing::{debug, error};

use super::net_world::NetWorld;

/// 事件：报文从 `port` 到达节点 `to`。
#[derive(Debug)]
pub struct DeliverPacket {
    pub to: RouterId,
    pub port: PortId,
    pub pkt: RipPacket,
}

impl Event for DeliverPacket {
    #[tracing::instrument(skip(self, sim, world), fields(to = %self.to, port = %self.port, kind = self.pkt.kind_name()))]
    fn execute(self: Box<Self>, sim: &mut Simulator, world: &mut dyn World) {
        let DeliverPacket { to, port, pkt } = *self;
        debug!(now = %sim.now(), "📨 报文到达节点");

        let Some(w) = NetWorld::from_world(world) else {
            error!("world is not a NetWorld, packet lost");
            return;
        };
        w.net.deliver(to, port, pkt, sim);
    }
}
