//! Trace hooks for the network.

use crate::rip::{DataPacket, Diagnostic, PortId, RipPacket, RouterId, RoutingUpdate};
use crate::sim::SimTime;
use crate::trace::{
    TraceDropReason, TraceEvent, TraceEventKind, TraceLinkInfo, TraceLogger, TraceNodeInfo,
    TraceNodeKind, TraceRoute,
};

use super::node::NodeKind;
use super::Network;

fn trace_entries(update: &RoutingUpdate) -> Vec<TraceRoute> {
    update
        .iter()
        .map(|(dest, distance)| TraceRoute {
            dest: dest.0,
            distance: distance.0,
        })
        .collect()
}

impl Network {
    /// 开启事件记录，并写入拓扑元信息作为第一条事件。应在拓扑构建完成后调用。
    pub fn enable_trace(&mut self) {
        self.trace = Some(TraceLogger::default());
        self.emit_trace_meta();
    }

    fn trace_push(&mut self, t: SimTime, node: RouterId, kind: TraceEventKind) {
        if let Some(log) = &mut self.trace {
            log.push(TraceEvent {
                t_ns: t.0,
                node: node.0,
                kind,
            });
        }
    }

    pub fn emit_trace_meta(&mut self) {
        if self.trace.is_none() {
            return;
        }
        let nodes = self
            .node_names
            .iter()
            .zip(&self.node_kinds)
            .enumerate()
            .map(|(id, (name, kind))| TraceNodeInfo {
                id,
                name: name.clone(),
                kind: match kind {
                    NodeKind::Router => TraceNodeKind::Router,
                    NodeKind::Host => TraceNodeKind::Host,
                },
            })
            .collect();
        let links = self
            .links
            .iter()
            .map(|l| TraceLinkInfo {
                a: l.a.node.0,
                a_port: l.a.port.0,
                b: l.b.node.0,
                b_port: l.b.port.0,
                distance: l.distance.0,
                latency_ns: l.latency.0,
            })
            .collect();
        self.trace_push(SimTime::ZERO, RouterId(0), TraceEventKind::Meta { nodes, links });
    }

    pub(crate) fn trace_rx(&mut self, t: SimTime, node: RouterId, port: PortId, pkt: &RipPacket) {
        if self.trace.is_none() {
            return;
        }
        let kind = match pkt {
            RipPacket::LinkStatus(status) => TraceEventKind::LinkStatus {
                neighbor: status.neighbor.0,
                port: port.0,
                distance: status.distance.0,
                up: status.is_link_up,
            },
            RipPacket::Advertisement(update) => TraceEventKind::AdvertisementRx {
                from: update.src.0,
                port: port.0,
                entries: trace_entries(update),
            },
            // 数据包的到达由 forward/delivered/drop 覆盖
            RipPacket::Data(_) => return,
        };
        self.trace_push(t, node, kind);
    }

    pub(crate) fn trace_tx_advertisement(
        &mut self,
        t: SimTime,
        node: RouterId,
        port: PortId,
        update: &RoutingUpdate,
    ) {
        if self.trace.is_none() {
            return;
        }
        let entries = trace_entries(update);
        self.trace_push(
            t,
            node,
            TraceEventKind::AdvertisementTx {
                port: port.0,
                entries,
            },
        );
    }

    pub(crate) fn trace_forward(&mut self, t: SimTime, node: RouterId, port: PortId, data: &DataPacket) {
        self.trace_push(
            t,
            node,
            TraceEventKind::Forward {
                pkt_id: data.id,
                dst: data.dst.0,
                port: port.0,
            },
        );
    }

    pub(crate) fn trace_delivered(&mut self, t: SimTime, node: RouterId, pkt_id: u64) {
        self.trace_push(t, node, TraceEventKind::Delivered { pkt_id });
    }

    pub(crate) fn trace_drop(
        &mut self,
        t: SimTime,
        node: RouterId,
        pkt_id: Option<u64>,
        reason: TraceDropReason,
    ) {
        self.trace_push(t, node, TraceEventKind::Drop { pkt_id, reason });
    }

    pub(crate) fn trace_diagnostic(&mut self, t: SimTime, node: RouterId, diag: &Diagnostic) {
        if self.trace.is_none() {
            return;
        }
        let message = diag.to_string();
        self.trace_push(t, node, TraceEventKind::Diagnostic { message });
    }
}
