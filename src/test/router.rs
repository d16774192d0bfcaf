use crate::rip::{
    DataPacket, Diagnostic, Distance, LinkStatus, PortId, RipPacket, RipRouter, Route, RouterId,
    RoutingUpdate,
};

const E: RouterId = RouterId(0);
const A: RouterId = RouterId(1);
const B: RouterId = RouterId(2);
const C: RouterId = RouterId(3);
const X: RouterId = RouterId(9);

type Outbox = Vec<(PortId, RipPacket)>;

fn adverts(out: &Outbox) -> Vec<(PortId, RoutingUpdate)> {
    out.iter()
        .filter_map(|(port, pkt)| match pkt {
            RipPacket::Advertisement(u) => Some((*port, u.clone())),
            _ => None,
        })
        .collect()
}

fn entries(u: &RoutingUpdate) -> Vec<(RouterId, Distance)> {
    u.iter().collect()
}

fn link_up(r: &mut RipRouter, n: RouterId, d: u64, port: usize) -> Outbox {
    let mut out = Outbox::new();
    r.handle_rx(LinkStatus::up(n, Distance(d)).into(), PortId(port), &mut out);
    out
}

fn link_down(r: &mut RipRouter, n: RouterId, port: usize) -> Outbox {
    let mut out = Outbox::new();
    r.handle_rx(LinkStatus::down(n, Distance(1)).into(), PortId(port), &mut out);
    out
}

fn advertise(r: &mut RipRouter, src: RouterId, port: usize, pairs: &[(RouterId, u64)]) -> Outbox {
    let mut u = RoutingUpdate::new(src);
    for &(dest, d) in pairs {
        u.add_destination(dest, Distance(d));
    }
    let mut out = Outbox::new();
    r.handle_rx(u.into(), PortId(port), &mut out);
    out
}

fn data(id: u64, dst: RouterId) -> DataPacket {
    DataPacket {
        id,
        src: RouterId(100),
        dst,
        payload: vec![1, 2, 3],
    }
}

fn send_data(r: &mut RipRouter, pkt: DataPacket, port: usize) -> Outbox {
    let mut out = Outbox::new();
    r.handle_rx(pkt.into(), PortId(port), &mut out);
    out
}

#[test]
fn new_router_has_empty_table() {
    let r = RipRouter::new(E);
    assert_eq!(r.id(), E);
    assert!(r.table().is_empty());
    assert!(r.diagnostics().is_empty());
}

#[test]
fn link_up_then_neighbor_advertisement_end_to_end() {
    let mut r = RipRouter::new(E);

    let out = link_up(&mut r, A, 1, 1);
    let set = r.table().get(A).expect("A in table");
    assert_eq!(set.iter().collect::<Vec<_>>(), vec![(A, Route::new(Distance(1), PortId(1)))]);
    assert_eq!(r.table().len(), 1);

    // A 自身的最优路由经由 A 的端口，被水平分割排除
    let ads = adverts(&out);
    assert_eq!(out.len(), 1);
    assert_eq!(ads[0].0, PortId(1));
    assert_eq!(ads[0].1.src, E);
    assert!(ads[0].1.is_empty());

    let out = advertise(&mut r, A, 1, &[(B, 2)]);
    assert_eq!(
        r.table().get(A).unwrap().get(B),
        Some(Route::new(Distance(3), PortId(1)))
    );
    let ads = adverts(&out);
    assert_eq!(ads.len(), 1);
    assert_eq!(ads[0].0, PortId(1));
    assert!(ads[0].1.is_empty());
}

#[test]
fn split_horizon_excludes_routes_won_through_the_neighbors_port() {
    let mut r = RipRouter::new(E);
    link_up(&mut r, A, 1, 1);
    link_up(&mut r, C, 1, 2);

    let out = advertise(&mut r, A, 1, &[(B, 2)]);
    let ads = adverts(&out);
    assert_eq!(ads.len(), 2);

    let to_a = ads.iter().find(|(p, _)| *p == PortId(1)).expect("advert to A");
    assert_eq!(entries(&to_a.1), vec![(C, Distance(1))]);

    let to_c = ads.iter().find(|(p, _)| *p == PortId(2)).expect("advert to C");
    assert_eq!(entries(&to_c.1), vec![(A, Distance(1)), (B, Distance(3))]);
}

#[test]
fn announcement_carries_global_minimum_distance() {
    let mut r = RipRouter::new(E);
    link_up(&mut r, A, 1, 1);
    link_up(&mut r, C, 2, 2);
    link_up(&mut r, B, 1, 3);
    advertise(&mut r, A, 1, &[(X, 6)]);

    let out = advertise(&mut r, C, 2, &[(X, 1)]);
    let to_b = adverts(&out)
        .into_iter()
        .find(|(p, _)| *p == PortId(3))
        .expect("advert to B");
    assert_eq!(to_b.1.get_distance(X), Some(Distance(3)));
}

#[test]
fn shorter_advertisement_updates_route_and_announces() {
    let mut r = RipRouter::new(E);
    link_up(&mut r, A, 1, 1);
    advertise(&mut r, A, 1, &[(X, 5)]);
    assert_eq!(r.table().get(A).unwrap().get(X).unwrap().distance, Distance(6));

    let out = advertise(&mut r, A, 1, &[(X, 1)]);
    assert_eq!(r.table().get(A).unwrap().get(X).unwrap().distance, Distance(2));
    assert_eq!(adverts(&out).len(), 1);
}

#[test]
fn equal_or_longer_advertisement_is_silent() {
    let mut r = RipRouter::new(E);
    link_up(&mut r, A, 1, 1);
    advertise(&mut r, A, 1, &[(X, 2)]);

    let out = advertise(&mut r, A, 1, &[(X, 2)]);
    assert!(out.is_empty());
    let out = advertise(&mut r, A, 1, &[(X, 10)]);
    assert!(out.is_empty());
    assert_eq!(
        r.table().get(A).unwrap().get(X),
        Some(Route::new(Distance(3), PortId(1)))
    );
}

#[test]
fn advertisement_from_unknown_neighbor_is_discarded_with_diagnostic() {
    let mut r = RipRouter::new(E);
    link_up(&mut r, A, 1, 1);
    let before = r.table().clone();

    let out = advertise(&mut r, C, 4, &[(X, 1)]);

    assert!(out.is_empty());
    assert_eq!(r.table(), &before);
    assert_eq!(
        r.diagnostics(),
        &[Diagnostic::UnknownNeighbor {
            neighbor: C,
            port: PortId(4)
        }]
    );
}

#[test]
fn forwarder_counts_link_distance_when_choosing() {
    let mut r = RipRouter::new(E);
    link_up(&mut r, A, 3, 1);
    link_up(&mut r, C, 1, 2);
    // A 通告更短，但加上链路距离后 C 更优：1+3=4 > 2+1=3
    advertise(&mut r, A, 1, &[(X, 1)]);
    advertise(&mut r, C, 2, &[(X, 2)]);

    let pkt = data(42, X);
    let out = send_data(&mut r, pkt.clone(), 1);
    assert_eq!(out, vec![(PortId(2), RipPacket::Data(pkt))]);
}

#[test]
fn forwarder_picks_distance_three_over_five() {
    let mut r = RipRouter::new(E);
    link_up(&mut r, A, 1, 1);
    link_up(&mut r, C, 1, 2);
    advertise(&mut r, A, 1, &[(X, 4)]);
    advertise(&mut r, C, 2, &[(X, 2)]);

    // 直连邻居本身也是目的地
    let out = send_data(&mut r, data(1, C), 1);
    assert_eq!(out[0].0, PortId(2));
    let out = send_data(&mut r, data(2, X), 1);
    assert_eq!(out[0].0, PortId(2));
}

#[test]
fn forwarder_tie_uses_neighbor_linked_up_first() {
    let mut r = RipRouter::new(E);
    link_up(&mut r, C, 1, 5);
    link_up(&mut r, A, 1, 6);
    advertise(&mut r, C, 5, &[(X, 2)]);
    advertise(&mut r, A, 6, &[(X, 2)]);

    let out = send_data(&mut r, data(4, X), 1);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].0, PortId(5));

    // 通告也按上线顺序发出
    let out = link_up(&mut r, B, 1, 7);
    let ports: Vec<_> = adverts(&out).into_iter().map(|(p, _)| p).collect();
    assert_eq!(ports, vec![PortId(5), PortId(6), PortId(7)]);
}

#[test]
fn forward_without_route_drops_and_records() {
    let mut r = RipRouter::new(E);
    link_up(&mut r, A, 1, 1);

    let out = send_data(&mut r, data(7, X), 1);
    assert!(out.is_empty());
    assert_eq!(r.diagnostics(), &[Diagnostic::NoRoute { dst: X, pkt_id: 7 }]);
}

#[test]
fn link_down_forgets_neighbor_and_its_destinations() {
    let mut r = RipRouter::new(E);
    link_up(&mut r, A, 1, 1);
    link_up(&mut r, C, 1, 2);
    advertise(&mut r, A, 1, &[(B, 2)]);

    let out = link_down(&mut r, A, 1);
    assert!(!r.table().contains(A));
    // 只剩 C 一个邻居，通告里没有任何经由 A 的目的地
    let ads = adverts(&out);
    assert_eq!(ads.len(), 1);
    assert_eq!(ads[0].0, PortId(2));
    assert!(ads[0].1.is_empty());

    let out = send_data(&mut r, data(3, B), 2);
    assert!(out.is_empty());
    assert_eq!(r.take_diagnostics(), vec![Diagnostic::NoRoute { dst: B, pkt_id: 3 }]);
    assert!(r.diagnostics().is_empty());
}

#[test]
fn redundant_link_down_is_a_noop() {
    let mut r = RipRouter::new(E);
    link_up(&mut r, A, 1, 1);
    let before = r.table().clone();

    let out = link_down(&mut r, C, 3);
    assert!(out.is_empty());
    assert_eq!(r.table(), &before);
    assert_eq!(r.diagnostics(), &[Diagnostic::RedundantLinkDown { neighbor: C }]);
    assert!(!r.diagnostics()[0].is_warning());
}

#[test]
fn unknown_neighbor_and_no_route_are_warnings() {
    let mut r = RipRouter::new(E);
    link_up(&mut r, A, 1, 1);
    advertise(&mut r, C, 2, &[(X, 1)]);
    send_data(&mut r, data(5, X), 1);

    let diags = r.take_diagnostics();
    assert_eq!(
        diags,
        vec![
            Diagnostic::UnknownNeighbor { neighbor: C, port: PortId(2) },
            Diagnostic::NoRoute { dst: X, pkt_id: 5 },
        ]
    );
    assert!(diags.iter().all(Diagnostic::is_warning));
}

#[test]
fn last_link_down_sends_nothing() {
    let mut r = RipRouter::new(E);
    link_up(&mut r, A, 1, 1);
    let out = link_down(&mut r, A, 1);
    assert!(out.is_empty());
    assert!(r.table().is_empty());
}

#[test]
fn link_up_replaces_previous_knowledge() {
    let mut r = RipRouter::new(E);
    link_up(&mut r, A, 1, 1);
    advertise(&mut r, A, 1, &[(B, 2)]);

    let out = link_up(&mut r, A, 5, 3);
    assert_eq!(
        r.table().get(A).unwrap().iter().collect::<Vec<_>>(),
        vec![(A, Route::new(Distance(5), PortId(3)))]
    );
    assert_eq!(adverts(&out).len(), 1);
    assert_eq!(adverts(&out)[0].0, PortId(3));
}

#[test]
fn diagnostics_render_readable_messages() {
    let d = Diagnostic::NoRoute { dst: X, pkt_id: 4 };
    assert_eq!(d.to_string(), "no route to node#9, packet 4 dropped");
}
