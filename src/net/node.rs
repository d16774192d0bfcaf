//! 节点类型
//!
//! 节点 trait 及两种实现：运行 RIP 引擎的路由器，以及只收发数据的主机。

use crate::rip::{DataPacket, Diagnostic, PacketSink, PortId, RipPacket, RipRouter, RouterId, RoutingTable};
use tracing::{debug, info, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Router,
    Host,
}

/// 节点处理一个报文后的全部输出，由 `Network` 统一落地。
#[derive(Debug, Default)]
pub struct Outbox {
    pub sent: Vec<(PortId, RipPacket)>,
    pub delivered: Vec<DataPacket>,
    pub misdelivered: Vec<DataPacket>,
    pub diagnostics: Vec<Diagnostic>,
}

impl PacketSink for Outbox {
    fn send(&mut self, pkt: RipPacket, port: PortId) {
        self.sent.push((port, pkt));
    }
}

/// 节点接口
pub trait Node: Send {
    fn id(&self) -> RouterId;

    fn name(&self) -> &str;

    fn kind(&self) -> NodeKind;

    /// 处理从 `port` 到达的报文
    fn on_packet(&mut self, pkt: RipPacket, port: PortId, out: &mut Outbox);

    /// 本节点作为源发出一个数据包
    fn originate(&mut self, data: DataPacket, out: &mut Outbox);

    /// 路由器的路由表；主机没有
    fn routing_table(&self) -> Option<&RoutingTable> {
        None
    }
}

/// 路由器节点：把报文交给 `RipRouter`。
#[derive(Debug)]
pub struct Router {
    name: String,
    engine: RipRouter,
}

impl Router {
    pub fn new(id: RouterId, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            engine: RipRouter::new(id),
        }
    }

    pub fn engine(&self) -> &RipRouter {
        &self.engine
    }
}

impl Node for Router {
    fn id(&self) -> RouterId {
        self.engine.id()
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Router
    }

    #[tracing::instrument(skip(self, pkt, out), fields(node_name = %self.name, kind = pkt.kind_name()))]
    fn on_packet(&mut self, pkt: RipPacket, port: PortId, out: &mut Outbox) {
        match pkt {
            // 以路由器自身为目的地的数据包在这里终结，不进入引擎
            RipPacket::Data(data) if data.dst == self.id() => {
                info!(pkt_id = data.id, "已到达目的路由器，标记为已送达");
                out.delivered.push(data);
            }
            pkt => self.engine.handle_rx(pkt, port, out),
        }
        out.diagnostics.extend(self.engine.take_diagnostics());
    }

    fn originate(&mut self, data: DataPacket, out: &mut Outbox) {
        debug!(node_name = %self.name, pkt_id = data.id, "路由器本地发出数据包");
        self.engine.forward(data, out);
        out.diagnostics.extend(self.engine.take_diagnostics());
    }

    fn routing_table(&self) -> Option<&RoutingTable> {
        Some(self.engine.table())
    }
}

/// 主机节点：只有一个端口，忽略路由协议报文。
#[derive(Debug)]
pub struct Host {
    id: RouterId,
    name: String,
}

impl Host {
    /// 主机唯一的端口
    pub const PORT: PortId = PortId(0);

    pub fn new(id: RouterId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl Node for Host {
    fn id(&self) -> RouterId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Host
    }

    #[tracing::instrument(skip(self, pkt, out), fields(node_name = %self.name, kind = pkt.kind_name()))]
    fn on_packet(&mut self, pkt: RipPacket, port: PortId, out: &mut Outbox) {
        match pkt {
            RipPacket::Data(data) if data.dst == self.id => {
                info!(pkt_id = data.id, "🖥️  已到达目的主机，标记为已送达");
                out.delivered.push(data);
            }
            RipPacket::Data(data) => {
                debug!(pkt_id = data.id, dst = %data.dst, "主机收到非本机数据包，丢弃");
                out.misdelivered.push(data);
            }
            RipPacket::LinkStatus(_) | RipPacket::Advertisement(_) => {
                trace!(%port, "主机忽略路由协议报文");
            }
        }
    }

    fn originate(&mut self, data: DataPacket, out: &mut Outbox) {
        debug!(node_name = %self.name, pkt_id = data.id, "主机发出数据包");
        out.send(RipPacket::Data(data), Self::PORT);
    }
}
