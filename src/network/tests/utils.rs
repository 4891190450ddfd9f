use crate::airport::Airport;
use crate::flight::Flight;
use crate::order::Order;
use crate::time::Time;
use proptest::prelude::Strategy;
use proptest::prop_oneof;
use proptest::strategy::Just;
use std::sync::Arc;

pub fn id(s: &str) -> Arc<str> {
    Arc::from(s)
}

pub fn add_flight(
    flights: &mut Vec<Flight>,
    origin_id: &str,
    destination_id: &str,
    departure: &str,
    arrival: &str,
    capacity: u64,
) {
    flights.push(Flight {
        origin_id: id(origin_id),
        destination_id: id(destination_id),
        departure_time: departure.parse().unwrap(),
        arrival_time: arrival.parse().unwrap(),
        capacity,
    });
}

pub fn add_airport(airports: &mut Vec<Airport>, code: &str, daily_capacity: u64) {
    airports.push(Airport {
        code: id(code),
        name: code.to_lowercase(),
        utc_offset: 0,
        daily_capacity,
    });
}

pub fn add_order(orders: &mut Vec<Order>, timestamp: &str, destination_id: &str, quantity: u64) {
    orders.push(Order {
        timestamp: timestamp.parse().unwrap(),
        destination_id: id(destination_id),
        quantity,
        client_id: None,
    });
}

pub fn arb_id(prefix: &'static str) -> impl Strategy<Value = Arc<str>> {
    prop_oneof![
        Just(Arc::from(format!("{}_1", prefix))),
        Just(Arc::from(format!("{}_2", prefix))),
        Just(Arc::from(format!("{}_3", prefix))),
        Just(Arc::from(format!("{}_4", prefix))),
    ]
}

pub fn arb_flight() -> impl Strategy<Value = Flight> {
    (arb_id("AP"), arb_id("AP"), 0..1440u64, 10..900u64, 1..500u64).prop_map(
        |(org, dst, dep, dur, capacity)| Flight {
            origin_id: org,
            destination_id: dst,
            departure_time: Time(dep),
            arrival_time: Time((dep + dur) % Time::MINUTES_PER_DAY),
            capacity,
        },
    )
}
