//! 网络拓扑管理
//!
//! 持有全部节点与链路，负责端口分配、链路状态通知、报文传播与统计。

use std::collections::HashMap;

use super::deliver_packet::DeliverPacket;
use super::error::NetError;
use super::id::LinkId;
use super::link::{Endpoint, Link};
use super::node::{Host, Node, NodeKind, Outbox, Router};
use super::stats::Stats;
use crate::rip::{DataPacket, Diagnostic, Distance, LinkStatus, PortId, RipPacket, RouterId, RoutingTable};
use crate::sim::{SimTime, Simulator};
use crate::trace::{TraceDropReason, TraceLogger};
use tracing::{debug, info, trace, warn};

#[derive(Default)]
pub struct Network {
    nodes: Vec<Option<Box<dyn Node>>>,
    pub(crate) node_names: Vec<String>,
    pub(crate) node_kinds: Vec<NodeKind>,
    by_name: HashMap<String, RouterId>,
    pub(crate) links: Vec<Link>,
    ports: HashMap<(RouterId, PortId), LinkId>,
    next_port: Vec<usize>,
    next_pkt_id: u64,
    pub stats: Stats,
    pub trace: Option<TraceLogger>,
}

impl Network {
    /// 添加路由器节点
    pub fn add_router(&mut self, name: impl Into<String>) -> Result<RouterId, NetError> {
        self.add_node(name.into(), NodeKind::Router)
    }

    /// 添加主机节点
    pub fn add_host(&mut self, name: impl Into<String>) -> Result<RouterId, NetError> {
        self.add_node(name.into(), NodeKind::Host)
    }

    fn add_node(&mut self, name: String, kind: NodeKind) -> Result<RouterId, NetError> {
        if self.by_name.contains_key(&name) {
            return Err(NetError::DuplicateName(name));
        }
        let id = RouterId(self.nodes.len());
        let node: Box<dyn Node> = match kind {
            NodeKind::Router => Box::new(Router::new(id, name.clone())),
            NodeKind::Host => Box::new(Host::new(id, name.clone())),
        };
        debug!(%id, name = %name, ?kind, "添加节点");
        self.nodes.push(Some(node));
        self.node_names.push(name.clone());
        self.node_kinds.push(kind);
        self.next_port.push(0);
        self.by_name.insert(name, id);
        Ok(id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn node_id(&self, name: &str) -> Option<RouterId> {
        self.by_name.get(name).copied()
    }

    pub fn node_name(&self, id: RouterId) -> Option<&str> {
        self.node_names.get(id.0).map(String::as_str)
    }

    pub fn node_kind(&self, id: RouterId) -> Option<NodeKind> {
        self.node_kinds.get(id.0).copied()
    }

    /// 所有路由器，按 id 升序
    pub fn routers(&self) -> impl Iterator<Item = RouterId> + '_ {
        self.node_kinds
            .iter()
            .enumerate()
            .filter(|(_, k)| **k == NodeKind::Router)
            .map(|(i, _)| RouterId(i))
    }

    fn check_node(&self, id: RouterId) -> Result<(), NetError> {
        if id.0 < self.nodes.len() {
            Ok(())
        } else {
            Err(NetError::UnknownNode(id))
        }
    }

    /// 连接两个节点（双向链路，初始为断开状态）。
    ///
    /// 两端各分配一个新的本地端口，端口号从 0 递增。主机只能接一条链路。
    pub fn connect(
        &mut self,
        a: RouterId,
        b: RouterId,
        distance: Distance,
        latency: SimTime,
    ) -> Result<LinkId, NetError> {
        self.check_node(a)?;
        self.check_node(b)?;
        if a == b {
            return Err(NetError::SelfLink(a));
        }
        if self.link_between(a, b).is_some() {
            return Err(NetError::DuplicateLink(a, b));
        }
        for n in [a, b] {
            if self.node_kinds[n.0] == NodeKind::Host && self.next_port[n.0] > 0 {
                return Err(NetError::HostAlreadyConnected(n));
            }
        }

        let ep_a = self.alloc_port(a);
        let ep_b = self.alloc_port(b);
        let id = LinkId(self.links.len());
        self.links.push(Link::new(ep_a, ep_b, distance, latency));
        self.ports.insert((ep_a.node, ep_a.port), id);
        self.ports.insert((ep_b.node, ep_b.port), id);
        debug!(?id, %a, a_port = %ep_a.port, %b, b_port = %ep_b.port, distance = distance.0, "创建链路");
        Ok(id)
    }

    fn alloc_port(&mut self, node: RouterId) -> Endpoint {
        let port = PortId(self.next_port[node.0]);
        self.next_port[node.0] += 1;
        Endpoint { node, port }
    }

    pub fn link(&self, id: LinkId) -> Option<&Link> {
        self.links.get(id.0)
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn link_between(&self, a: RouterId, b: RouterId) -> Option<LinkId> {
        self.links
            .iter()
            .position(|l| l.connects(a, b))
            .map(LinkId)
    }

    /// 节点某端口所连的链路
    pub fn link_on_port(&self, node: RouterId, port: PortId) -> Option<LinkId> {
        self.ports.get(&(node, port)).copied()
    }

    /// 改变链路状态，并立即向两端各投递一条链路状态通知。
    ///
    /// 状态未变化时同样投递（由引擎自行处理重复通知）。
    #[tracing::instrument(skip(self, sim))]
    pub fn set_link_state(&mut self, link: LinkId, up: bool, sim: &mut Simulator) -> Result<(), NetError> {
        let l = self.links.get_mut(link.0).ok_or(NetError::UnknownLink(link))?;
        if l.up == up {
            debug!("链路状态未变化，仍然通知两端");
        }
        l.up = up;
        let (a, b, distance) = (l.a, l.b, l.distance);
        info!(a = %a.node, b = %b.node, up, "🔗 链路状态变化");

        for (here, there) in [(a, b), (b, a)] {
            let status = if up {
                LinkStatus::up(there.node, distance)
            } else {
                LinkStatus::down(there.node, distance)
            };
            sim.schedule(
                sim.now(),
                DeliverPacket {
                    to: here.node,
                    port: here.port,
                    pkt: RipPacket::LinkStatus(status),
                },
            );
        }
        Ok(())
    }

    pub fn link_up(&mut self, link: LinkId, sim: &mut Simulator) -> Result<(), NetError> {
        self.set_link_state(link, true, sim)
    }

    pub fn link_down(&mut self, link: LinkId, sim: &mut Simulator) -> Result<(), NetError> {
        self.set_link_state(link, false, sim)
    }

    /// 创建数据包，分配全网唯一的 id
    pub fn make_data(&mut self, src: RouterId, dst: RouterId, payload: Vec<u8>) -> DataPacket {
        let id = self.next_pkt_id;
        self.next_pkt_id = self.next_pkt_id.wrapping_add(1);
        DataPacket {
            id,
            src,
            dst,
            payload,
        }
    }

    /// 让 `from` 立即发出一个去往 `to` 的数据包，返回包 id。
    #[tracing::instrument(skip(self, payload, sim))]
    pub fn send_data(
        &mut self,
        from: RouterId,
        to: RouterId,
        payload: Vec<u8>,
        sim: &mut Simulator,
    ) -> Result<u64, NetError> {
        self.check_node(from)?;
        self.check_node(to)?;
        let data = self.make_data(from, to, payload);
        let pkt_id = data.id;
        info!(pkt_id, "📤 注入数据包");

        let mut out = Outbox::default();
        let Some(mut node) = self.nodes[from.0].take() else {
            return Err(NetError::UnknownNode(from));
        };
        node.originate(data, &mut out);
        self.nodes[from.0] = Some(node);
        self.flush(from, out, sim);
        Ok(pkt_id)
    }

    /// 把报文交给节点处理，然后落地节点产生的输出
    #[tracing::instrument(skip(self, pkt, sim), fields(kind = pkt.kind_name()))]
    pub fn deliver(&mut self, to: RouterId, port: PortId, pkt: RipPacket, sim: &mut Simulator) {
        // 暂时把节点取出来，避免 &mut self 与 &mut node 的重叠借用。
        let Some(mut node) = self.nodes.get_mut(to.0).and_then(Option::take) else {
            warn!("目标节点不存在，报文丢弃");
            return;
        };
        trace!(node_name = %node.name(), "取出节点");

        self.trace_rx(sim.now(), to, port, &pkt);
        if matches!(pkt, RipPacket::LinkStatus(_)) {
            self.stats.link_events += 1;
        }

        let mut out = Outbox::default();
        node.on_packet(pkt, port, &mut out);
        self.nodes[to.0] = Some(node);

        self.flush(to, out, sim);
    }

    fn flush(&mut self, from: RouterId, out: Outbox, sim: &mut Simulator) {
        let now = sim.now();
        let Outbox {
            sent,
            delivered,
            misdelivered,
            diagnostics,
        } = out;

        for data in delivered {
            self.on_delivered(now, from, data);
        }
        for data in misdelivered {
            self.stats.dropped_wrong_host += 1;
            self.trace_drop(now, from, Some(data.id), TraceDropReason::WrongHost);
        }
        for diag in diagnostics {
            self.trace_diagnostic(now, from, &diag);
            if let Diagnostic::NoRoute { pkt_id, .. } = diag {
                self.stats.dropped_no_route += 1;
                self.trace_drop(now, from, Some(pkt_id), TraceDropReason::NoRoute);
            }
        }
        for (port, pkt) in sent {
            self.transmit(from, port, pkt, sim);
        }
    }

    /// 从 `from` 的 `port` 发出报文，经链路时延后在对端投递。
    fn transmit(&mut self, from: RouterId, port: PortId, pkt: RipPacket, sim: &mut Simulator) {
        let now = sim.now();
        let peer = self
            .link_on_port(from, port)
            .and_then(|id| self.links.get(id.0))
            .filter(|l| l.up)
            .and_then(|l| l.peer_of(from, port).map(|p| (p, l.latency)));

        let Some((peer, latency)) = peer else {
            debug!(%from, %port, kind = pkt.kind_name(), "端口无可用链路，报文丢弃");
            let pkt_id = match &pkt {
                RipPacket::Data(d) => {
                    self.stats.dropped_link_down += 1;
                    Some(d.id)
                }
                _ => {
                    self.stats.lost_control += 1;
                    None
                }
            };
            self.trace_drop(now, from, pkt_id, TraceDropReason::LinkDown);
            return;
        };

        match &pkt {
            RipPacket::Advertisement(update) => {
                self.stats.advertisements_sent += 1;
                self.trace_tx_advertisement(now, from, port, update);
            }
            RipPacket::Data(data) => {
                self.trace_forward(now, from, port, data);
            }
            RipPacket::LinkStatus(_) => {}
        }

        trace!(%from, %port, to = %peer.node, to_port = %peer.port, "调度报文到达事件");
        sim.schedule_in(
            latency,
            DeliverPacket {
                to: peer.node,
                port: peer.port,
                pkt,
            },
        );
    }

    fn on_delivered(&mut self, now: SimTime, at: RouterId, data: DataPacket) {
        info!(pkt_id = data.id, %at, "✅ 数据包送达目的地");
        self.stats.delivered_pkts += 1;
        self.stats.delivered_bytes += data.payload.len() as u64;
        self.trace_delivered(now, at, data.id);
    }

    /// 某路由器当前的路由表；主机或不存在的节点返回 `None`
    pub fn routing_table(&self, node: RouterId) -> Option<&RoutingTable> {
        self.nodes.get(node.0)?.as_ref()?.routing_table()
    }
}
