//! 网络世界实现

use super::network::Network;
use crate::sim::World;
use std::any::Any;

/// 持有 `Network` 的默认世界
#[derive(Default)]
pub struct NetWorld {
    pub net: Network,
}

impl NetWorld {
    /// 从事件的 `&mut dyn World` 取回 `NetWorld`
    pub fn from_world(world: &mut dyn World) -> Option<&mut NetWorld> {
        world.as_any_mut().downcast_mut::<NetWorld>()
    }
}

impl World for NetWorld {
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
