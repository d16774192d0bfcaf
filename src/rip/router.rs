//! 距离向量路由引擎
//!
//! 每个模拟路由器持有一个 `RipRouter`。外部环境每收到一个事件就同步调用一次
//! `handle_rx`，引擎通过 `PacketSink` 发出零个或多个报文后返回。

use tracing::{debug, info, trace, warn};

use super::diagnostic::Diagnostic;
use super::id::{PortId, RouterId};
use super::packet::{DataPacket, LinkStatus, RipPacket, RoutingUpdate};
use super::table::{MergeOutcome, RoutingTable};

/// 外部提供的发送原语
pub trait PacketSink {
    fn send(&mut self, pkt: RipPacket, port: PortId);
}

/// 最简单的发件箱：按发送顺序收集。
impl PacketSink for Vec<(PortId, RipPacket)> {
    fn send(&mut self, pkt: RipPacket, port: PortId) {
        self.push((port, pkt));
    }
}

#[derive(Debug)]
pub struct RipRouter {
    id: RouterId,
    table: RoutingTable,
    diagnostics: Vec<Diagnostic>,
}

impl RipRouter {
    /// 创建路由器，路由表为空
    pub fn new(id: RouterId) -> Self {
        info!(router = %id, "路由器初始化，路由表为空");
        Self {
            id,
            table: RoutingTable::new(),
            diagnostics: Vec::new(),
        }
    }

    pub fn id(&self) -> RouterId {
        self.id
    }

    pub fn table(&self) -> &RoutingTable {
        &self.table
    }

    /// 目前累积的诊断
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    /// 入站事件分发：每个事件恰好交给一个处理函数。
    #[tracing::instrument(skip(self, pkt, port, out), fields(router = %self.id, port = %port, kind = pkt.kind_name()))]
    pub fn handle_rx(&mut self, pkt: RipPacket, port: PortId, out: &mut dyn PacketSink) {
        debug!("收到报文");
        match pkt {
            RipPacket::LinkStatus(status) => self.handle_link_status(status, port, out),
            RipPacket::Advertisement(update) => self.handle_update(update, port, out),
            RipPacket::Data(data) => self.forward(data, out),
        }
    }

    fn handle_link_status(&mut self, status: LinkStatus, port: PortId, out: &mut dyn PacketSink) {
        let neighbor = status.neighbor;
        if status.is_link_up {
            info!(%neighbor, %port, distance = status.distance.0, "⬆️  邻居链路上线");
            if self
                .table
                .link_up(neighbor, status.distance, port)
                .is_some()
            {
                debug!(%neighbor, "重置经由该邻居学到的路由");
            }
            self.announce(out);
        } else if self.table.link_down(neighbor).is_some() {
            info!(%neighbor, "⬇️  邻居链路断开，移除其路由集合");
            self.announce(out);
        } else {
            self.record(Diagnostic::RedundantLinkDown { neighbor });
        }
    }

    fn handle_update(&mut self, update: RoutingUpdate, port: PortId, out: &mut dyn PacketSink) {
        trace!(src = %update.src, entries = update.len(), "合并路由通告");
        match self.table.merge(&update, port) {
            MergeOutcome::UnknownNeighbor => {
                self.record(Diagnostic::UnknownNeighbor {
                    neighbor: update.src,
                    port,
                });
            }
            MergeOutcome::Unchanged => {
                debug!(src = %update.src, "通告未带来更优路由，不再通告");
            }
            MergeOutcome::Changed(n) => {
                info!(src = %update.src, changed = n, "路由表已更新");
                self.announce(out);
            }
        }
    }

    /// 沿已知最短路由转发数据包；无路由时丢弃并记录诊断。
    pub fn forward(&mut self, data: DataPacket, out: &mut dyn PacketSink) {
        match self.table.best_route(data.dst) {
            Some(route) => {
                debug!(
                    pkt_id = data.id,
                    dst = %data.dst,
                    port = %route.port,
                    distance = route.distance.0,
                    "转发数据包"
                );
                out.send(RipPacket::Data(data), route.port);
            }
            None => {
                self.record(Diagnostic::NoRoute {
                    dst: data.dst,
                    pkt_id: data.id,
                });
            }
        }
    }

    /// 向每个邻居发送一条通告（水平分割：不把经由其端口的最优路由回传给它）。
    ///
    /// 过滤后为空的通告也照常发送。
    fn announce(&mut self, out: &mut dyn PacketSink) {
        let best = self.table.best_routes();
        debug!(neighbors = self.table.len(), dests = best.len(), "向邻居通告路由");

        for set in self.table.iter() {
            let port = set.direct().port;
            let mut update = RoutingUpdate::new(self.id);
            for (dest, route) in &best {
                if route.port == port {
                    continue;
                }
                update.add_destination(*dest, route.distance);
            }
            trace!(neighbor = %set.neighbor(), %port, entries = update.len(), "发送路由通告");
            out.send(RipPacket::Advertisement(update), port);
        }
    }

    fn record(&mut self, diag: Diagnostic) {
        if diag.is_warning() {
            warn!(router = %self.id, "{diag}");
        } else {
            debug!(router = %self.id, "{diag}");
        }
        self.diagnostics.push(diag);
    }
}
