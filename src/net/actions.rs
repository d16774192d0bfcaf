//! 定时动作事件
//!
//! 场景脚本与演示程序通过这些事件在指定时刻改变链路状态或注入数据包。

use crate::rip::RouterId;
use crate::sim::{Event, Simulator, World};
use tracing::{error, warn};

use super::id::LinkId;
use super::net_world::NetWorld;

/// 事件：把链路置为上线/断开
#[derive(Debug)]
pub struct SetLinkState {
    pub link: LinkId,
    pub up: bool,
}

impl Event for SetLinkState {
    fn execute(self: Box<Self>, sim: &mut Simulator, world: &mut dyn World) {
        let Some(w) = NetWorld::from_world(world) else {
            error!("world is not a NetWorld, link change lost");
            return;
        };
        if let Err(e) = w.net.set_link_state(self.link, self.up, sim) {
            warn!(error = %e, "链路状态变更失败");
        }
    }
}

/// 事件：由 `from` 注入一个去往 `to` 的数据包
#[derive(Debug)]
pub struct SendData {
    pub from: RouterId,
    pub to: RouterId,
    pub payload: Vec<u8>,
}

impl Event for SendData {
    fn execute(self: Box<Self>, sim: &mut Simulator, world: &mut dyn World) {
        let SendData { from, to, payload } = *self;
        let Some(w) = NetWorld::from_world(world) else {
            error!("world is not a NetWorld, data packet lost");
            return;
        };
        if let Err(e) = w.net.send_data(from, to, payload, sim) {
            warn!(error = %e, "数据包注入失败");
        }
    }
}
