//! 演示流程
//!
//! 构建拓扑，t=0 时所有链路上线，收敛后在两台主机间发一个数据包；
//! 可选地再断开一条链路并重发一次，观察路由撤销后的丢包。

use crate::net::{NetError, NetWorld, SendData, SetLinkState};
use crate::sim::{SimTime, Simulator};
use crate::topo::{build_line, build_ring, TopoOpts, Topology};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoTopo {
    Line,
    Ring,
}

#[derive(Debug, Clone)]
pub struct DemoOpts {
    pub topo: DemoTopo,
    pub routers: usize,
    pub topo_opts: TopoOpts,
    /// 从链路上线到第一次发包的等待时间
    pub settle: SimTime,
    /// 发完第一个包后断开一条路由器间链路，再发一次
    pub flap: bool,
}

impl Default for DemoOpts {
    fn default() -> Self {
        Self {
            topo: DemoTopo::Line,
            routers: 2,
            topo_opts: TopoOpts::default(),
            settle: SimTime::from_millis(1),
            flap: false,
        }
    }
}

/// 已调度的演示计划
#[derive(Debug, Clone)]
pub struct DemoPlan {
    pub topology: Topology,
    /// 第一个数据包的发送时刻
    pub first_send: SimTime,
    /// 断链时刻与重发时刻（仅 `flap`）
    pub flap_at: Option<(SimTime, SimTime)>,
}

/// 构建拓扑并把全部动作调度进仿真器
pub fn schedule_demo(world: &mut NetWorld, sim: &mut Simulator, opts: &DemoOpts) -> Result<DemoPlan, NetError> {
    let topology = match opts.topo {
        DemoTopo::Line => build_line(world, opts.routers, &opts.topo_opts)?,
        DemoTopo::Ring => build_ring(world, opts.routers, &opts.topo_opts)?,
    };

    for &link in &topology.links {
        sim.schedule(SimTime::ZERO, SetLinkState { link, up: true });
    }

    let (h0, h1) = topology.hosts;
    let first_send = SimTime::ZERO.after(opts.settle);
    sim.schedule(
        first_send,
        SendData {
            from: h0,
            to: h1,
            payload: b"hello".to_vec(),
        },
    );

    let mut flap_at = None;
    // 第一条路由器间链路；只有一台路由器时没有可断的
    let flap_link = world
        .net
        .routers()
        .zip(world.net.routers().skip(1))
        .find_map(|(a, b)| world.net.link_between(a, b));
    if let (true, Some(link)) = (opts.flap, flap_link) {
        let down = first_send.after(opts.settle);
        let resend = down.after(opts.settle);
        sim.schedule(down, SetLinkState { link, up: false });
        sim.schedule(
            resend,
            SendData {
                from: h0,
                to: h1,
                payload: b"hello again".to_vec(),
            },
        );
        flap_at = Some((down, resend));
    }

    Ok(DemoPlan {
        topology,
        first_send,
        flap_at,
    })
}
