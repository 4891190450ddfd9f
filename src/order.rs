use crate::airport::AirportId;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub timestamp: NaiveDateTime,
    pub destination_id: AirportId,
    pub quantity: u64,
    pub client_id: Option<String>,
}

/// Half-open simulation range `[start, end)`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DateRange {
    pub fn contains(&self, ts: &NaiveDateTime) -> bool {
        self.start <= *ts && *ts < self.end
    }
}

/// Aggregated demand over the orders of one simulation range.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Demand {
    pub order_count: usize,
    pub total_quantity: u64,
    /// Per destination, sorted by quantity descending then code.
    pub by_destination: Vec<(AirportId, u64)>,
}

impl Demand {
    pub fn from_orders(orders: &[Order]) -> Demand {
        let mut totals: HashMap<AirportId, u64> = HashMap::new();
        orders.iter().for_each(|o| {
            *totals.entry(o.destination_id.clone()).or_default() += o.quantity
        });

        let mut by_destination = totals.into_iter().collect::<Vec<(AirportId, u64)>>();
        by_destination.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        Demand {
            order_count: orders.len(),
            total_quantity: orders.iter().map(|o| o.quantity).sum(),
            by_destination,
        }
    }

    /// Mean units per order, `None` when there are no orders.
    pub fn average_order_size(&self) -> Option<f64> {
        (self.order_count > 0).then(|| self.total_quantity as f64 / self.order_count as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn order(ts: &str, dest: &str, quantity: u64) -> Order {
        Order {
            timestamp: ts.parse().unwrap(),
            destination_id: Arc::from(dest),
            quantity,
            client_id: None,
        }
    }

    #[test]
    fn test_demand_ordering_is_deterministic() {
        let orders = vec![
            order("2025-12-01T08:00:00", "SKBO", 10),
            order("2025-12-01T09:00:00", "LATI", 30),
            order("2025-12-02T10:00:00", "SKBO", 20),
            order("2025-12-03T10:00:00", "EDDI", 30),
        ];
        let demand = Demand::from_orders(&orders);

        assert_eq!(4, demand.order_count);
        assert_eq!(90, demand.total_quantity);
        let codes = demand
            .by_destination
            .iter()
            .map(|(c, q)| (c.as_ref(), *q))
            .collect::<Vec<_>>();
        assert_eq!(vec![("EDDI", 30), ("LATI", 30), ("SKBO", 30)], codes);
        assert_eq!(Some(22.5), demand.average_order_size());
    }

    #[test]
    fn test_empty_demand() {
        let demand = Demand::from_orders(&[]);
        assert_eq!(0, demand.total_quantity);
        assert!(demand.by_destination.is_empty());
        assert_eq!(None, demand.average_order_size());
    }

    #[test]
    fn test_range_is_half_open() {
        let range = DateRange {
            start: "2025-12-01T00:00:00".parse().unwrap(),
            end: "2025-12-08T00:00:00".parse().unwrap(),
        };
        assert!(range.contains(&"2025-12-01T00:00:00".parse().unwrap()));
        assert!(range.contains(&"2025-12-07T23:59:59".parse().unwrap()));
        assert!(!range.contains(&"2025-12-08T00:00:00".parse().unwrap()));
        assert!(!range.contains(&"2025-11-30T23:59:59".parse().unwrap()));
    }
}
