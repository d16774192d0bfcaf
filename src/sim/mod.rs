//! 离散事件仿真核心
//!
//! 时间、事件、世界与仿真器。路由引擎不依赖这里，只有外围的网络仿真使用。

mod event;
mod scheduled_event;
mod simulator;
mod time;
mod world;

pub use event::Event;
pub use scheduled_event::ScheduledEvent;
pub use simulator::Simulator;
pub use time::SimTime;
pub use world::World;
