use crate::net::{NetWorld, SendData, SetLinkState};
use crate::rip::{Distance, PortId, Route, RouterId};
use crate::sim::{SimTime, Simulator};
use crate::topo::{build_line, build_ring, TopoOpts, Topology};

fn converged_line(routers: usize) -> (Simulator, NetWorld, Topology) {
    let mut sim = Simulator::default();
    let mut world = NetWorld::default();
    let topo = build_line(&mut world, routers, &TopoOpts::default()).expect("build line");
    for &link in &topo.links {
        world.net.link_up(link, &mut sim).expect("link up");
    }
    sim.run(&mut world);
    (sim, world, topo)
}

fn best(world: &NetWorld, router: RouterId, dest: RouterId) -> Option<Route> {
    world.net.routing_table(router)?.best_route(dest)
}

#[test]
fn line_converges_to_hop_counts() {
    let (_sim, world, topo) = converged_line(3);
    let (h0, h1) = topo.hosts;
    let r = &topo.routers;

    assert_eq!(best(&world, r[0], h1), Some(Route::new(Distance(3), PortId(1))));
    assert_eq!(best(&world, r[1], h0), Some(Route::new(Distance(2), PortId(0))));
    assert_eq!(best(&world, r[1], h1), Some(Route::new(Distance(2), PortId(1))));
    assert_eq!(best(&world, r[2], h0), Some(Route::new(Distance(3), PortId(0))));
    // 路由器不会学到到自己的路由
    assert_eq!(best(&world, r[1], r[1]), None);
    assert!(world.net.routing_table(h0).is_none());
    assert!(world.net.stats.advertisements_sent > 0);
    assert_eq!(world.net.stats.link_events, 8);
}

#[test]
fn data_follows_routes_to_destination_host() {
    let (mut sim, mut world, topo) = converged_line(2);
    let (h0, h1) = topo.hosts;

    world.net.send_data(h0, h1, b"ping".to_vec(), &mut sim).expect("send");
    world.net.send_data(h1, h0, b"pong!".to_vec(), &mut sim).expect("send");
    sim.run(&mut world);

    let stats = &world.net.stats;
    assert_eq!(stats.delivered_pkts, 2);
    assert_eq!(stats.delivered_bytes, 9);
    assert_eq!(stats.dropped_data(), 0);
}

#[test]
fn link_down_withdraws_routes_and_drops_data() {
    let (mut sim, mut world, topo) = converged_line(2);
    let (h0, h1) = topo.hosts;
    let (r0, r1) = (topo.routers[0], topo.routers[1]);
    let middle = world.net.link_between(r0, r1).expect("r0-r1 link");

    world.net.link_down(middle, &mut sim).expect("link down");
    sim.run(&mut world);

    let table = world.net.routing_table(r0).expect("r0 table");
    assert!(!table.contains(r1));
    assert_eq!(table.best_route(h1), None);

    world.net.send_data(h0, h1, vec![0], &mut sim).expect("send");
    sim.run(&mut world);
    assert_eq!(world.net.stats.delivered_pkts, 0);
    assert_eq!(world.net.stats.dropped_no_route, 1);
}

#[test]
fn repeated_link_down_is_harmless() {
    let (mut sim, mut world, topo) = converged_line(2);
    let middle = world
        .net
        .link_between(topo.routers[0], topo.routers[1])
        .expect("r0-r1 link");

    world.net.link_down(middle, &mut sim).unwrap();
    world.net.link_down(middle, &mut sim).unwrap();
    sim.run(&mut world);

    assert!(!world.net.link(middle).unwrap().up);
    assert_eq!(world.net.routing_table(topo.routers[0]).unwrap().len(), 1);
}

#[test]
fn link_coming_back_restores_reachability() {
    let (mut sim, mut world, topo) = converged_line(2);
    let (h0, h1) = topo.hosts;
    let middle = world
        .net
        .link_between(topo.routers[0], topo.routers[1])
        .expect("r0-r1 link");

    world.net.link_down(middle, &mut sim).unwrap();
    sim.run(&mut world);
    world.net.link_up(middle, &mut sim).unwrap();
    sim.run(&mut world);

    assert_eq!(
        best(&world, topo.routers[0], h1),
        Some(Route::new(Distance(2), PortId(1)))
    );
    world.net.send_data(h0, h1, vec![1], &mut sim).unwrap();
    sim.run(&mut world);
    assert_eq!(world.net.stats.delivered_pkts, 1);
}

#[test]
fn ring_prefers_shorter_side() {
    let mut sim = Simulator::default();
    let mut world = NetWorld::default();
    let topo = build_ring(&mut world, 5, &TopoOpts::default()).expect("build ring");
    for &link in &topo.links {
        sim.schedule(SimTime::ZERO, SetLinkState { link, up: true });
    }
    sim.run(&mut world);

    // h1 挂在 r2：r0 -> r1 -> r2 比 r0 -> r4 -> r3 -> r2 短
    let (h0, h1) = topo.hosts;
    let r = &topo.routers;
    let via = world.net.link_on_port(r[0], best(&world, r[0], h1).unwrap().port);
    assert_eq!(via, world.net.link_between(r[0], r[1]));
    assert_eq!(best(&world, r[0], h1).unwrap().distance, Distance(3));

    sim.schedule(sim.now(), SendData { from: h0, to: h1, payload: vec![9] });
    sim.run(&mut world);
    assert_eq!(world.net.stats.delivered_pkts, 1);
}

#[test]
fn data_to_a_router_terminates_there() {
    let (mut sim, mut world, topo) = converged_line(2);
    world
        .net
        .send_data(topo.hosts.0, topo.routers[1], vec![], &mut sim)
        .unwrap();
    sim.run(&mut world);
    assert_eq!(world.net.stats.delivered_pkts, 1);
}

#[test]
fn host_drops_data_addressed_elsewhere() {
    let mut sim = Simulator::default();
    let mut world = NetWorld::default();
    let net = &mut world.net;
    let h0 = net.add_host("h0").unwrap();
    let h1 = net.add_host("h1").unwrap();
    let h2 = net.add_host("h2").unwrap();
    let link = net.connect(h0, h1, Distance(1), SimTime::from_micros(1)).unwrap();
    net.link_up(link, &mut sim).unwrap();
    sim.run(&mut world);

    world.net.send_data(h0, h2, vec![1], &mut sim).unwrap();
    sim.run(&mut world);
    assert_eq!(world.net.stats.dropped_wrong_host, 1);
    assert_eq!(world.net.stats.delivered_pkts, 0);
}

#[test]
fn sending_on_a_down_link_drops() {
    let mut sim = Simulator::default();
    let mut world = NetWorld::default();
    let topo = build_line(&mut world, 1, &TopoOpts::default()).unwrap();

    world
        .net
        .send_data(topo.hosts.0, topo.hosts.1, vec![1], &mut sim)
        .unwrap();
    sim.run(&mut world);
    assert_eq!(world.net.stats.dropped_link_down, 1);
    assert_eq!(world.net.stats.dropped_data(), 1);
}

#[test]
fn stale_advertisement_after_link_down_is_ignored() {
    // 链路时延大于断链时刻：上线时发出的通告仍在路上
    let mut sim = Simulator::default();
    let mut world = NetWorld::default();
    let net = &mut world.net;
    let r0 = net.add_router("r0").unwrap();
    let r1 = net.add_router("r1").unwrap();
    let link = net.connect(r0, r1, Distance(1), SimTime::from_micros(100)).unwrap();

    sim.schedule(SimTime::ZERO, SetLinkState { link, up: true });
    sim.schedule(SimTime::from_micros(10), SetLinkState { link, up: false });
    sim.run(&mut world);

    assert!(world.net.routing_table(r0).unwrap().is_empty());
    assert!(world.net.routing_table(r1).unwrap().is_empty());
}
