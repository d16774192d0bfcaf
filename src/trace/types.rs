use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TraceEventKind {
    /// 拓扑元信息（t=0 的第一条事件）
    Meta {
        nodes: Vec<TraceNodeInfo>,
        links: Vec<TraceLinkInfo>,
    },
    /// 节点收到链路状态通知
    LinkStatus {
        neighbor: usize,
        port: usize,
        distance: u64,
        up: bool,
    },
    /// 节点收到路由通告
    AdvertisementRx {
        from: usize,
        port: usize,
        entries: Vec<TraceRoute>,
    },
    /// 节点从某端口发出路由通告
    AdvertisementTx { port: usize, entries: Vec<TraceRoute> },
    /// 数据包从某端口发出
    Forward { pkt_id: u64, dst: usize, port: usize },
    /// 数据包在目的主机交付
    Delivered { pkt_id: u64 },
    Drop {
        pkt_id: Option<u64>,
        reason: TraceDropReason,
    },
    /// 引擎诊断的可读文本
    Diagnostic { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceDropReason {
    NoRoute,
    WrongHost,
    LinkDown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceNodeKind {
    Router,
    Host,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceNodeInfo {
    pub id: usize,
    pub name: String,
    pub kind: TraceNodeKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceLinkInfo {
    pub a: usize,
    pub a_port: usize,
    pub b: usize,
    pub b_port: usize,
    pub distance: u64,
    /// 单向传播时延（ns）
    pub latency_ns: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceRoute {
    pub dest: usize,
    pub distance: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceEvent {
    /// 仿真时间（纳秒，与 `SimTime.0` 同口径）
    pub t_ns: u64,
    pub node: usize,
    #[serde(flatten)]
    pub kind: TraceEventKind,
}

/// 内存中的事件收集器
#[derive(Debug, Default)]
pub struct TraceLogger {
    pub events: Vec<TraceEvent>,
}

impl TraceLogger {
    pub fn push(&mut self, ev: TraceEvent) {
        self.events.push(ev);
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.events)
    }

    /// 以 JSON 数组写入文件
    pub fn write_json(&self, path: &Path) -> io::Result<()> {
        let json = self.to_json().map_err(io::Error::other)?;
        fs::write(path, json)
    }
}
