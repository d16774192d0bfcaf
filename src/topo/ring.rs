//! 环状拓扑

use super::{TopoOpts, Topology};
use crate::net::{NetError, NetWorld};

/// 构建环状拓扑：r0 .. r{n-1} 首尾相连，h0 挂在 r0，h1 挂在 r{n/2}。
///
/// 环的链路先创建（`links[i]` 连接 r{i} 与 r{(i+1)%n}），主机链路最后两条。
/// 两台路由器时退化为单条链路；少于两台时返回 `RingTooSmall`，网络不做任何修改。
pub fn build_ring(world: &mut NetWorld, n: usize, opts: &TopoOpts) -> Result<Topology, NetError> {
    if n < 2 {
        return Err(NetError::RingTooSmall(n));
    }
    let net = &mut world.net;
    let h0 = net.add_host("h0")?;
    let h1 = net.add_host("h1")?;
    let routers = (0..n)
        .map(|i| net.add_router(format!("r{i}")))
        .collect::<Result<Vec<_>, _>>()?;

    let mut links = Vec::new();
    for i in 0..n {
        let (a, b) = (routers[i], routers[(i + 1) % n]);
        if net.link_between(a, b).is_some() {
            continue;
        }
        links.push(net.connect(a, b, opts.distance, opts.link_latency)?);
    }
    links.push(net.connect(h0, routers[0], opts.distance, opts.link_latency)?);
    links.push(net.connect(h1, routers[n / 2], opts.distance, opts.link_latency)?);

    Ok(Topology {
        hosts: (h0, h1),
        routers,
        links,
    })
}
