//! RIP 路由仿真
//!
//! 从场景文件或内置拓扑运行距离向量路由，输出投递统计与每台路由器的最优路由。

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use rip_sim_rs::demo::{schedule_demo, DemoOpts, DemoTopo};
use rip_sim_rs::net::{NetError, NetWorld};
use rip_sim_rs::rip::Distance;
use rip_sim_rs::scenario::{Scenario, ScenarioError, ScenarioSpec};
use rip_sim_rs::sim::{SimTime, Simulator};
use rip_sim_rs::topo::TopoOpts;

#[derive(Debug, Parser)]
#[command(name = "rip_sim", about = "距离向量（RIP）路由仿真")]
struct Args {
    /// 场景 JSON；给出时忽略内置拓扑参数
    #[arg(long)]
    scenario: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = TopoArg::Line)]
    topo: TopoArg,
    /// 内置拓扑中的路由器数量（环至少 2 台）
    #[arg(long, default_value_t = 2)]
    routers: usize,
    /// 每条链路的距离
    #[arg(long, default_value_t = 1)]
    distance: u64,
    /// 单向链路传播时延（微秒）
    #[arg(long, default_value_t = 10)]
    link_latency_us: u64,
    /// 链路上线到发包之间的等待（毫秒）
    #[arg(long, default_value_t = 1)]
    settle_ms: u64,
    /// 发包后断开一条路由器间链路并重发
    #[arg(long)]
    flap: bool,
    /// 仿真运行到多少毫秒
    #[arg(long, default_value_t = 100)]
    until_ms: u64,
    /// 把路由事件写成 JSON 数组
    #[arg(long)]
    trace_json: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum TopoArg {
    Line,
    Ring,
}

#[derive(Debug, thiserror::Error)]
enum RunError {
    #[error(transparent)]
    Scenario(#[from] ScenarioError),
    #[error(transparent)]
    Net(#[from] NetError),
    #[error("failed to write trace: {0}")]
    Trace(#[from] std::io::Error),
}

fn run(args: Args) -> Result<(), RunError> {
    let mut sim = Simulator::default();
    let mut world = NetWorld::default();

    let mut until = SimTime::from_millis(args.until_ms);
    match &args.scenario {
        Some(path) => {
            let spec = ScenarioSpec::load(path)?;
            Scenario::build(&spec, &mut world, &mut sim)?;
            until = until.max(spec.last_action_at());
        }
        None => {
            let opts = DemoOpts {
                topo: match args.topo {
                    TopoArg::Line => DemoTopo::Line,
                    TopoArg::Ring => DemoTopo::Ring,
                },
                routers: args.routers,
                topo_opts: TopoOpts {
                    distance: Distance(args.distance),
                    link_latency: SimTime::from_micros(args.link_latency_us),
                },
                settle: SimTime::from_millis(args.settle_ms),
                flap: args.flap,
            };
            schedule_demo(&mut world, &mut sim, &opts)?;
        }
    }

    if args.trace_json.is_some() {
        world.net.enable_trace();
    }

    sim.run_until(until, &mut world);

    let net = &world.net;
    println!(
        "done @ {}, delivered={}, dropped={}, advertisements={}",
        sim.now(),
        net.stats.delivered_pkts,
        net.stats.dropped_data(),
        net.stats.advertisements_sent
    );
    for router in net.routers() {
        let Some(table) = net.routing_table(router) else {
            continue;
        };
        let name = net.node_name(router).unwrap_or("?");
        for (dest, route) in table.best_routes() {
            println!(
                "route {} {} {} {}",
                name,
                net.node_name(dest).unwrap_or("?"),
                route.distance,
                route.port.0
            );
        }
    }

    if let (Some(path), Some(log)) = (&args.trace_json, &net.trace) {
        log.write_json(path)?;
        eprintln!("wrote trace events to {}", path.display());
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .init();

    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
