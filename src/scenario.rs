//! 场景文件
//!
//! JSON 描述的节点、链路与定时动作。示例：
//!
//! ```json
//! {
//!     "schema_version": 1,
//!     "nodes": [
//!         { "name": "h0", "kind": "host" },
//!         { "name": "r0", "kind": "router" },
//!         { "name": "h1", "kind": "host" }
//!     ],
//!     "links": [
//!         { "a": "h0", "b": "r0" },
//!         { "a": "r0", "b": "h1", "distance": 3, "latency_us": 5 }
//!     ],
//!     "actions": [
//!         { "at_us": 0, "kind": "link_up", "a": "h0", "b": "r0" },
//!         { "at_us": 0, "kind": "link_up", "a": "r0", "b": "h1" },
//!         { "at_us": 500, "kind": "send_data", "from": "h0", "to": "h1", "payload": "hi" }
//!     ]
//! }
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::net::{LinkId, NetError, NetWorld, SendData, SetLinkState};
use crate::rip::{Distance, RouterId};
use crate::sim::{SimTime, Simulator};

pub const SCHEMA_VERSION: u32 = 1;

const DEFAULT_DISTANCE: u64 = 1;
const DEFAULT_LATENCY_US: u64 = 10;

#[derive(Debug, thiserror::Error)]
pub enum ScenarioError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid scenario json: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unsupported schema_version {0} (expected 1)")]
    UnsupportedSchema(u32),

    #[error("scenario has no nodes")]
    Empty,

    #[error("unknown node name {0:?}")]
    UnknownNode(String),

    #[error("no link between {0:?} and {1:?}")]
    UnknownLink(String, String),

    #[error(transparent)]
    Net(#[from] NetError),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioSpec {
    pub schema_version: u32,
    #[serde(default)]
    pub name: Option<String>,
    pub nodes: Vec<NodeSpec>,
    #[serde(default)]
    pub links: Vec<LinkSpec>,
    #[serde(default)]
    pub actions: Vec<ActionSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeSpec {
    pub name: String,
    pub kind: NodeKindSpec,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKindSpec {
    Router,
    Host,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkSpec {
    pub a: String,
    pub b: String,
    #[serde(default)]
    pub distance: Option<u64>,
    #[serde(default)]
    pub latency_us: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionSpec {
    pub at_us: u64,
    #[serde(flatten)]
    pub action: Action,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Action {
    LinkUp {
        a: String,
        b: String,
    },
    LinkDown {
        a: String,
        b: String,
    },
    SendData {
        from: String,
        to: String,
        #[serde(default)]
        payload: String,
    },
}

impl ScenarioSpec {
    pub fn from_json(raw: &str) -> Result<Self, ScenarioError> {
        let spec: ScenarioSpec = serde_json::from_str(raw)?;
        if spec.schema_version != SCHEMA_VERSION {
            return Err(ScenarioError::UnsupportedSchema(spec.schema_version));
        }
        Ok(spec)
    }

    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        let raw = fs::read_to_string(path).map_err(|source| ScenarioError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    /// 动作的最晚时刻，用于决定仿真至少要跑多久
    pub fn last_action_at(&self) -> SimTime {
        self.actions
            .iter()
            .map(|a| SimTime::from_micros(a.at_us))
            .max()
            .unwrap_or(SimTime::ZERO)
    }
}

/// 构建后的场景：名字到 id 的映射
#[derive(Debug, Clone, Default)]
pub struct Scenario {
    pub nodes: HashMap<String, RouterId>,
    pub links: Vec<LinkId>,
}

impl Scenario {
    /// 把场景中的节点与链路加入网络，并把动作调度进仿真器。
    ///
    /// 任何引用错误都会在调度前返回，网络可能已部分构建。
    #[tracing::instrument(skip_all, fields(name = spec.name.as_deref().unwrap_or("-")))]
    pub fn build(spec: &ScenarioSpec, world: &mut NetWorld, sim: &mut Simulator) -> Result<Scenario, ScenarioError> {
        if spec.nodes.is_empty() {
            return Err(ScenarioError::Empty);
        }

        let mut built = Scenario::default();
        for node in &spec.nodes {
            let id = match node.kind {
                NodeKindSpec::Router => world.net.add_router(node.name.clone())?,
                NodeKindSpec::Host => world.net.add_host(node.name.clone())?,
            };
            built.nodes.insert(node.name.clone(), id);
        }

        for link in &spec.links {
            let a = built.resolve(&link.a)?;
            let b = built.resolve(&link.b)?;
            let distance = Distance(link.distance.unwrap_or(DEFAULT_DISTANCE));
            let latency = SimTime::from_micros(link.latency_us.unwrap_or(DEFAULT_LATENCY_US));
            built.links.push(world.net.connect(a, b, distance, latency)?);
        }
        debug!(nodes = built.nodes.len(), links = built.links.len(), "拓扑已构建");

        // 先全部解析再调度，避免部分动作已入队
        let mut scheduled = Vec::with_capacity(spec.actions.len());
        for action in &spec.actions {
            let at = SimTime::from_micros(action.at_us);
            let planned = match &action.action {
                Action::LinkUp { a, b } => Planned::Link(built.resolve_link(world, a, b)?, true),
                Action::LinkDown { a, b } => Planned::Link(built.resolve_link(world, a, b)?, false),
                Action::SendData { from, to, payload } => Planned::Send(SendData {
                    from: built.resolve(from)?,
                    to: built.resolve(to)?,
                    payload: payload.as_bytes().to_vec(),
                }),
            };
            scheduled.push((at, planned));
        }

        for (at, planned) in scheduled {
            match planned {
                Planned::Link(link, up) => sim.schedule(at, SetLinkState { link, up }),
                Planned::Send(ev) => sim.schedule(at, ev),
            }
        }
        info!(actions = spec.actions.len(), "场景动作已调度");
        Ok(built)
    }

    fn resolve(&self, name: &str) -> Result<RouterId, ScenarioError> {
        self.nodes
            .get(name)
            .copied()
            .ok_or_else(|| ScenarioError::UnknownNode(name.to_string()))
    }

    fn resolve_link(&self, world: &NetWorld, a: &str, b: &str) -> Result<LinkId, ScenarioError> {
        let (ia, ib) = (self.resolve(a)?, self.resolve(b)?);
        world
            .net
            .link_between(ia, ib)
            .ok_or_else(|| ScenarioError::UnknownLink(a.to_string(), b.to_string()))
    }
}

enum Planned {
    Link(LinkId, bool),
    Send(SendData),
}
