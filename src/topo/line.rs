//! 链状拓扑

use super::{TopoOpts, Topology};
use crate::net::{NetError, NetWorld};

/// 构建链状拓扑：h0 - r0 - r1 - ... - r{n-1} - h1
///
/// `routers` 为 0 时两台主机直连。
pub fn build_line(world: &mut NetWorld, routers: usize, opts: &TopoOpts) -> Result<Topology, NetError> {
    let net = &mut world.net;
    let h0 = net.add_host("h0")?;
    let h1 = net.add_host("h1")?;
    let routers = (0..routers)
        .map(|i| net.add_router(format!("r{i}")))
        .collect::<Result<Vec<_>, _>>()?;

    let chain: Vec<_> = std::iter::once(h0)
        .chain(routers.iter().copied())
        .chain(std::iter::once(h1))
        .collect();

    let links = chain
        .windows(2)
        .map(|w| net.connect(w[0], w[1], opts.distance, opts.link_latency))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Topology {
        hosts: (h0, h1),
        routers,
        links,
    })
}
