//! RIP 报文类型
//!
//! 引擎只认识三种入站事件：链路状态通知、路由通告、数据包。

use std::collections::BTreeMap;

use super::id::{Distance, RouterId};

/// 链路状态通知（由外部仿真环境在链路两端各投递一份）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkStatus {
    /// 链路另一端的节点
    pub neighbor: RouterId,
    /// 该链路的距离
    pub distance: Distance,
    pub is_link_up: bool,
}

impl LinkStatus {
    pub fn up(neighbor: RouterId, distance: Distance) -> Self {
        Self {
            neighbor,
            distance,
            is_link_up: true,
        }
    }

    pub fn down(neighbor: RouterId, distance: Distance) -> Self {
        Self {
            neighbor,
            distance,
            is_link_up: false,
        }
    }
}

/// 路由通告：一组 (目的地, 距离)。
///
/// 同一目的地只保留最后一次 `add_destination` 的距离；
/// 合并方不依赖条目顺序。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingUpdate {
    pub src: RouterId,
    entries: BTreeMap<RouterId, Distance>,
}

impl RoutingUpdate {
    /// 构造一个空通告
    pub fn new(src: RouterId) -> Self {
        Self {
            src,
            entries: BTreeMap::new(),
        }
    }

    /// 追加一个 (目的地, 距离) 条目
    pub fn add_destination(&mut self, dest: RouterId, distance: Distance) {
        self.entries.insert(dest, distance);
    }

    pub fn get_distance(&self, dest: RouterId) -> Option<Distance> {
        self.entries.get(&dest).copied()
    }

    /// 所有通告的目的地
    pub fn all_dests(&self) -> impl Iterator<Item = RouterId> + '_ {
        self.entries.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (RouterId, Distance)> + '_ {
        self.entries.iter().map(|(d, dist)| (*d, *dist))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// 数据包。引擎原样转发，不修改任何字段。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPacket {
    pub id: u64,
    pub src: RouterId,
    pub dst: RouterId,
    pub payload: Vec<u8>,
}

/// 入站/出站事件的闭合集合
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RipPacket {
    LinkStatus(LinkStatus),
    Advertisement(RoutingUpdate),
    Data(DataPacket),
}

impl RipPacket {
    /// 日志里使用的简短类别名
    pub fn kind_name(&self) -> &'static str {
        match self {
            RipPacket::LinkStatus(_) => "link_status",
            RipPacket::Advertisement(_) => "advertisement",
            RipPacket::Data(_) => "data",
        }
    }
}

impl From<LinkStatus> for RipPacket {
    fn from(v: LinkStatus) -> Self {
        RipPacket::LinkStatus(v)
    }
}

impl From<RoutingUpdate> for RipPacket {
    fn from(v: RoutingUpdate) -> Self {
        RipPacket::Advertisement(v)
    }
}

impl From<DataPacket> for RipPacket {
    fn from(v: DataPacket) -> Self {
        RipPacket::Data(v)
    }
}
