//! 仿真器
//!
//! 维护当前时间与事件队列，逐个执行事件直到队列耗尽或到达截止时间。

use super::event::Event;
use super::scheduled_event::ScheduledEvent;
use super::time::SimTime;
use super::world::World;
use std::collections::BinaryHeap;
use tracing::{debug, info, trace};

#[derive(Default)]
pub struct Simulator {
    now: SimTime,
    next_seq: u64,
    executed: u64,
    q: BinaryHeap<ScheduledEvent>,
}

impl Simulator {
    pub fn now(&self) -> SimTime {
        self.now
    }

    /// 队列中尚未执行的事件数
    pub fn pending(&self) -> usize {
        self.q.len()
    }

    /// 已执行的事件总数
    pub fn executed(&self) -> u64 {
        self.executed
    }

    /// 调度事件在 `at` 执行。早于当前时间的请求按当前时间处理。
    #[tracing::instrument(skip(self, ev), fields(event_type = std::any::type_name::<E>(), at = %at))]
    pub fn schedule<E: Event>(&mut self, at: SimTime, ev: E) {
        let at = at.max(self.now);
        let seq = self.next_seq;
        self.next_seq = self.next_seq.wrapping_add(1);
        self.q.push(ScheduledEvent {
            at,
            seq,
            ev: Box::new(ev),
        });
        trace!(seq, queue_size = self.q.len(), "事件已加入队列");
    }

    /// 调度事件在 `delay` 之后执行
    pub fn schedule_in<E: Event>(&mut self, delay: SimTime, ev: E) {
        let at = self.now.after(delay);
        self.schedule(at, ev);
    }

    fn step(&mut self, world: &mut dyn World) -> bool {
        let Some(item) = self.q.pop() else {
            return false;
        };
        self.now = item.at;
        self.executed += 1;
        trace!(now = %self.now, seq = item.seq, remaining = self.q.len(), "执行事件");
        item.ev.execute(self, world);
        world.on_tick(self);
        true
    }

    /// 运行直到队列为空或下一个事件晚于 `until`，结束时时间推进到 `until`。
    #[tracing::instrument(skip(self, world), fields(until = %until))]
    pub fn run_until(&mut self, until: SimTime, world: &mut dyn World) {
        debug!(now = %self.now, queue_size = self.q.len(), "开始运行");
        while self.q.peek().is_some_and(|top| top.at <= until) {
            self.step(world);
        }
        self.now = self.now.max(until);
        info!(executed = self.executed, pending = self.q.len(), now = %self.now, "⏹️  到达截止时间");
    }

    /// 运行所有事件直到队列为空
    #[tracing::instrument(skip(self, world))]
    pub fn run(&mut self, world: &mut dyn World) {
        info!("▶️  开始运行仿真");
        while self.step(world) {}
        info!(executed = self.executed, final_time = %self.now, "✅ 仿真完成");
    }
}
