use crate::rip::{DataPacket, Distance, LinkStatus, RipPacket, RouterId, RoutingUpdate};

#[test]
fn routing_update_starts_empty_and_collects_destinations() {
    let mut u = RoutingUpdate::new(RouterId(1));
    assert!(u.is_empty());
    assert_eq!(u.src, RouterId(1));

    u.add_destination(RouterId(7), Distance(3));
    u.add_destination(RouterId(4), Distance(1));

    assert_eq!(u.len(), 2);
    assert_eq!(u.get_distance(RouterId(7)), Some(Distance(3)));
    assert_eq!(u.get_distance(RouterId(9)), None);
    let mut dests: Vec<_> = u.all_dests().collect();
    dests.sort();
    assert_eq!(dests, vec![RouterId(4), RouterId(7)]);
}

#[test]
fn routing_update_keeps_last_distance_for_repeated_destination() {
    let mut u = RoutingUpdate::new(RouterId(1));
    u.add_destination(RouterId(2), Distance(5));
    u.add_destination(RouterId(2), Distance(8));
    assert_eq!(u.len(), 1);
    assert_eq!(u.get_distance(RouterId(2)), Some(Distance(8)));
}

#[test]
fn distance_addition_saturates() {
    assert_eq!(Distance(2) + Distance(3), Distance(5));
    assert_eq!(Distance(u64::MAX) + Distance(1), Distance(u64::MAX));
}

#[test]
fn packets_convert_into_the_matching_variant() {
    let status: RipPacket = LinkStatus::down(RouterId(3), Distance(1)).into();
    assert!(matches!(status, RipPacket::LinkStatus(ref s) if !s.is_link_up));
    assert_eq!(status.kind_name(), "link_status");

    let adv: RipPacket = RoutingUpdate::new(RouterId(0)).into();
    assert_eq!(adv.kind_name(), "advertisement");

    let data: RipPacket = DataPacket {
        id: 1,
        src: RouterId(0),
        dst: RouterId(5),
        payload: b"abc".to_vec(),
    }
    .into();
    assert_eq!(data.kind_name(), "data");
}
