use crate::airport::AirportId;
use crate::time::Time;
use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// A daily repeating flight leg. Times carry no date component.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Tabled)]
pub struct Flight {
    #[tabled(rename = "origin")]
    pub origin_id: AirportId,
    #[tabled(rename = "destination")]
    pub destination_id: AirportId,
    #[tabled(rename = "departure")]
    pub departure_time: Time,
    #[tabled(rename = "arrival")]
    pub arrival_time: Time,
    pub capacity: u64,
}

