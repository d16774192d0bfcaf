//! 距离向量路由表
//!
//! 路由表按邻居分视角存储：外层为 邻居 -> 该邻居的路由集合，
//! 内层为 目的地 -> (距离, 端口)。全局最优路由不落表，
//! 由转发与通告时按需计算。
//!
//! 只有 `link_up` / `link_down` / `merge` 三个入口会修改表内容。

use std::collections::BTreeMap;

use super::id::{Distance, PortId, RouterId};
use super::packet::RoutingUpdate;

/// 经由某个邻居到达某目的地的路由
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub distance: Distance,
    pub port: PortId,
}

impl Route {
    pub fn new(distance: Distance, port: PortId) -> Self {
        Self { distance, port }
    }
}

/// 一个邻居视角下的可达目的地集合。
///
/// 始终包含邻居自身的条目：`neighbor -> (直连距离, 直连端口)`。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NeighborRoutes {
    neighbor: RouterId,
    direct: Route,
    routes: BTreeMap<RouterId, Route>,
}

impl NeighborRoutes {
    fn new(neighbor: RouterId, distance: Distance, port: PortId) -> Self {
        let direct = Route::new(distance, port);
        let mut routes = BTreeMap::new();
        routes.insert(neighbor, direct);
        Self {
            neighbor,
            direct,
            routes,
        }
    }

    pub fn neighbor(&self) -> RouterId {
        self.neighbor
    }

    /// 直连链路的 (距离, 端口)
    pub fn direct(&self) -> Route {
        self.direct
    }

    pub fn get(&self, dest: RouterId) -> Option<Route> {
        self.routes.get(&dest).copied()
    }

    pub fn contains(&self, dest: RouterId) -> bool {
        self.routes.contains_key(&dest)
    }

    pub fn iter(&self) -> impl Iterator<Item = (RouterId, Route)> + '_ {
        self.routes.iter().map(|(d, r)| (*d, *r))
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// 合并一条通告的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// 通告来源不是当前邻居，整条丢弃
    UnknownNeighbor,
    /// 没有任何条目变得更优
    Unchanged,
    /// 有 `n` 个条目被新增或缩短
    Changed(usize),
}

impl MergeOutcome {
    pub fn changed(&self) -> bool {
        matches!(self, MergeOutcome::Changed(_))
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RoutingTable {
    /// 按邻居首次上线的顺序排列；距离相同时靠前者胜出
    neighbors: Vec<NeighborRoutes>,
}

impl RoutingTable {
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, neighbor: RouterId) -> Option<usize> {
        self.neighbors.iter().position(|set| set.neighbor == neighbor)
    }

    /// 链路建立：为该邻居重建路由集合，之前经由它学到的目的地全部作废。
    ///
    /// 已存在的邻居保留原来的位置，新邻居排在最后。返回被替换掉的旧集合（如果有）。
    pub fn link_up(
        &mut self,
        neighbor: RouterId,
        distance: Distance,
        port: PortId,
    ) -> Option<NeighborRoutes> {
        let fresh = NeighborRoutes::new(neighbor, distance, port);
        match self.position(neighbor) {
            Some(i) => Some(std::mem::replace(&mut self.neighbors[i], fresh)),
            None => {
                self.neighbors.push(fresh);
                None
            }
        }
    }

    /// 链路断开：删除该邻居的整个集合，之后再上线时排到最后。
    /// 邻居不存在时返回 `None`。
    pub fn link_down(&mut self, neighbor: RouterId) -> Option<NeighborRoutes> {
        self.position(neighbor).map(|i| self.neighbors.remove(i))
    }

    /// 把邻居的通告合并进该邻居的集合。
    ///
    /// 候选距离 = 通告距离 + 直连距离；仅当目的地不存在或候选严格更短时覆盖，
    /// 距离相等时保留原端口。通告中缺席的目的地不会被删除。
    pub fn merge(&mut self, update: &RoutingUpdate, port: PortId) -> MergeOutcome {
        let Some(set) = self.neighbors.iter_mut().find(|set| set.neighbor == update.src) else {
            return MergeOutcome::UnknownNeighbor;
        };
        let link = set.direct.distance;

        let mut changed = 0;
        for (dest, advertised) in update.iter() {
            let candidate = advertised + link;
            let better = match set.routes.get(&dest) {
                None => true,
                Some(existing) => existing.distance > candidate,
            };
            if better {
                set.routes.insert(dest, Route::new(candidate, port));
                changed += 1;
            }
        }

        if changed > 0 {
            MergeOutcome::Changed(changed)
        } else {
            MergeOutcome::Unchanged
        }
    }

    pub fn get(&self, neighbor: RouterId) -> Option<&NeighborRoutes> {
        self.neighbors.iter().find(|set| set.neighbor == neighbor)
    }

    pub fn contains(&self, neighbor: RouterId) -> bool {
        self.position(neighbor).is_some()
    }

    /// 按邻居上线顺序遍历
    pub fn iter(&self) -> impl Iterator<Item = &NeighborRoutes> + '_ {
        self.neighbors.iter()
    }

    pub fn neighbors(&self) -> impl Iterator<Item = RouterId> + '_ {
        self.neighbors.iter().map(|set| set.neighbor)
    }

    pub fn len(&self) -> usize {
        self.neighbors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.neighbors.is_empty()
    }

    /// 某目的地在所有邻居集合中的最短路由。
    ///
    /// 比较为严格小于，距离相同时较早上线的邻居胜出。
    pub fn best_route(&self, dest: RouterId) -> Option<Route> {
        let mut best: Option<Route> = None;
        for set in &self.neighbors {
            if let Some(r) = set.get(dest) {
                if best.is_none_or(|b| r.distance < b.distance) {
                    best = Some(r);
                }
            }
        }
        best
    }

    /// 所有目的地的全局最短路由，聚合规则与 `best_route` 相同。
    pub fn best_routes(&self) -> BTreeMap<RouterId, Route> {
        let mut best: BTreeMap<RouterId, Route> = BTreeMap::new();
        for set in &self.neighbors {
            for (dest, r) in set.iter() {
                match best.get(&dest) {
                    Some(b) if b.distance <= r.distance => {}
                    _ => {
                        best.insert(dest, r);
                    }
                }
            }
        }
        best
    }
}
