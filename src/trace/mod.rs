//! 结构化路由事件记录
//!
//! 仿真过程中按时间顺序收集 JSON 事件，结束后整体写出，
//! 用于离线检查收敛过程而不必解析文本日志。

mod types;

pub use types::{
    TraceDropReason, TraceEvent, TraceEventKind, TraceLinkInfo, TraceLogger, TraceNodeInfo,
    TraceNodeKind, TraceRoute,
};
