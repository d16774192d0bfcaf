//! 世界 trait

use super::simulator::Simulator;
use std::any::Any;

/// 事件执行时可访问的业务状态（例如 `NetWorld`）。
pub trait World: Any {
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// 每个事件执行完后回调一次
    fn on_tick(&mut self, _sim: &mut Simulator) {}
}
