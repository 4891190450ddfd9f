use crate::network::route_graph::RouteGraph;
use crate::network::tests::utils::{add_flight, id};
use crate::time::Time;

#[test]
fn test_direct_flights_in_load_order() {
    let mut flights = Vec::new();
    add_flight(&mut flights, "SPIM", "SKBO", "14:00", "17:30", 300);
    add_flight(&mut flights, "SPIM", "SEQM", "08:00", "10:00", 250);
    add_flight(&mut flights, "SPIM", "SKBO", "06:00", "09:30", 200);

    let graph = RouteGraph::new(&flights);
    let direct = graph.direct_flights("SPIM", "SKBO");

    assert_eq!(2, direct.len());
    assert_eq!(Time(840), direct[0].departure_time);
    assert_eq!(Time(360), direct[1].departure_time);
    assert_eq!(2, graph.route_count());
    assert_eq!(3, graph.flight_count());
}

#[test]
fn test_direction_is_independent() {
    let mut flights = Vec::new();
    add_flight(&mut flights, "SPIM", "SKBO", "06:00", "09:30", 200);
    add_flight(&mut flights, "SPIM", "SKBO", "18:00", "21:30", 200);
    add_flight(&mut flights, "SKBO", "SEQM", "10:00", "11:30", 150);

    let graph = RouteGraph::new(&flights);

    assert_eq!(2, graph.direct_flights("SPIM", "SKBO").len());
    assert!(graph.direct_flights("SKBO", "SPIM").is_empty());
    assert_eq!(1, graph.direct_flights("SKBO", "SEQM").len());
    assert!(graph.direct_flights("SEQM", "SKBO").is_empty());
}

#[test]
fn test_unknown_airports_yield_empty_results() {
    let mut flights = Vec::new();
    add_flight(&mut flights, "SPIM", "SKBO", "06:00", "09:30", 200);
    let graph = RouteGraph::new(&flights);

    assert!(graph.direct_flights("XXXX", "SKBO").is_empty());
    assert!(graph.reachable_destinations("XXXX").is_empty());
    assert!(graph.one_transfer_paths("XXXX", "SKBO").is_empty());
    assert!(graph.reachable_destinations("SKBO").is_empty());
}

#[test]
fn test_reachable_destinations_keep_first_seen_order() {
    let mut flights = Vec::new();
    add_flight(&mut flights, "EBCI", "LOWW", "06:00", "07:30", 200);
    add_flight(&mut flights, "EBCI", "EDDI", "07:00", "08:10", 200);
    add_flight(&mut flights, "EBCI", "LOWW", "12:00", "13:30", 200);
    add_flight(&mut flights, "EBCI", "LATI", "13:00", "15:30", 200);

    let graph = RouteGraph::new(&flights);
    let reachable = graph.reachable_destinations("EBCI");

    assert_eq!(vec![id("LOWW"), id("EDDI"), id("LATI")], reachable.to_vec());
}

#[test]
fn test_single_transfer_through_intermediate() {
    let mut flights = Vec::new();
    add_flight(&mut flights, "A", "M", "06:00", "08:00", 100);
    add_flight(&mut flights, "A", "M", "12:00", "14:00", 100);
    add_flight(&mut flights, "M", "B", "15:00", "17:00", 100);

    let graph = RouteGraph::new(&flights);
    let paths = graph.one_transfer_paths("A", "B");

    assert!(graph.direct_flights("A", "B").is_empty());
    assert_eq!(1, paths.len());
    assert_eq!(id("M"), paths[0].intermediate);
    assert_eq!(2, paths[0].first_leg_flights);
    assert_eq!(1, paths[0].second_leg_flights);
    assert_eq!(2, paths[0].combinations());
}

#[test]
fn test_no_transfer_chain() {
    let mut flights = Vec::new();
    add_flight(&mut flights, "A", "M", "06:00", "08:00", 100);
    add_flight(&mut flights, "B", "M", "15:00", "17:00", 100);
    add_flight(&mut flights, "M", "C", "15:00", "17:00", 100);

    let graph = RouteGraph::new(&flights);

    assert!(graph.one_transfer_paths("A", "B").is_empty());
}

#[test]
fn test_transfer_paths_follow_adjacency_order() {
    let mut flights = Vec::new();
    add_flight(&mut flights, "A", "M2", "06:00", "08:00", 100);
    add_flight(&mut flights, "A", "M1", "06:30", "08:00", 100);
    add_flight(&mut flights, "A", "M3", "07:00", "08:00", 100);
    add_flight(&mut flights, "M1", "B", "09:00", "10:00", 100);
    add_flight(&mut flights, "M2", "B", "09:00", "10:00", 100);
    add_flight(&mut flights, "M2", "B", "19:00", "20:00", 100);

    let graph = RouteGraph::new(&flights);
    let paths = graph.one_transfer_paths("A", "B");

    let intermediates = paths.iter().map(|p| p.intermediate.clone()).collect::<Vec<_>>();
    assert_eq!(vec![id("M2"), id("M1")], intermediates);
    assert_eq!(2, paths[0].second_leg_flights);

    // repeated builds answer identically
    let again = RouteGraph::new(&flights).one_transfer_paths("A", "B");
    assert_eq!(paths, again);
}
