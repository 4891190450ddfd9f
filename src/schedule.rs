use crate::airport::{Airport, AirportId};
use crate::error::{DiagError, DiagResult};
use crate::flight::Flight;
use crate::order::{DateRange, Order};
use crate::time::Time;
use chrono::{DateTime, NaiveDateTime};
use serde::Serialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Lines of the airport table carrying one of these are region/timezone headings.
const AIRPORT_MARKERS: [&str; 5] = ["America", "Europe", "Asia", "Africa", "GMT"];
const AIRPORT_MIN_FIELDS: usize = 7;

/// Outcome of reading one source: how many rows made it and which were skipped.
#[derive(Debug, Serialize)]
pub struct LoadReport {
    pub source_name: &'static str,
    pub loaded: usize,
    /// Rows that parsed but fell outside the simulation range.
    pub filtered: usize,
    #[serde(serialize_with = "serialize_skipped")]
    pub skipped: Vec<DiagError>,
}

fn serialize_skipped<S: serde::Serializer>(skipped: &[DiagError], s: S) -> Result<S::Ok, S::Error> {
    s.collect_seq(skipped.iter().map(|e| e.to_string()))
}

impl LoadReport {
    fn new(source_name: &'static str) -> LoadReport {
        LoadReport {
            source_name,
            loaded: 0,
            filtered: 0,
            skipped: vec![],
        }
    }

    fn skip(&mut self, line: usize, reason: impl Into<String>) {
        let error = DiagError::MalformedRecord {
            source_name: self.source_name,
            line,
            reason: reason.into(),
        };
        warn!("{}", error);
        self.skipped.push(error);
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }
}

#[derive(Debug, Serialize)]
pub struct ScheduleReport {
    pub flights: LoadReport,
    pub airports: LoadReport,
}

/// Airport and flight tables of one dataset snapshot.
pub struct Schedule {
    pub airports: Vec<Airport>,
    airports_index: HashMap<AirportId, usize>,
    /// In source order.
    pub flights: Vec<Flight>,
}

impl Schedule {
    pub fn new(airports: Vec<Airport>, flights: Vec<Flight>) -> Schedule {
        let airports_index = airports
            .iter()
            .enumerate()
            .map(|(i, a)| (a.code.clone(), i))
            .collect::<HashMap<AirportId, usize>>();
        Schedule {
            airports,
            airports_index,
            flights,
        }
    }

    pub fn airport(&self, code: &str) -> Option<&Airport> {
        self.airports_index.get(code).map(|i| &self.airports[*i])
    }

    pub fn load<F: Read, A: BufRead>(
        flights: F,
        airports: A,
    ) -> DiagResult<(Schedule, ScheduleReport)> {
        let (airports, airport_report) = read_airports(airports)?;
        let (flights, flight_report) = read_flights(flights)?;
        info!(
            "loaded {} flights ({} skipped) and {} airports ({} skipped)",
            flights.len(),
            flight_report.skipped_count(),
            airports.len(),
            airport_report.skipped_count()
        );
        Ok((
            Schedule::new(airports, flights),
            ScheduleReport {
                flights: flight_report,
                airports: airport_report,
            },
        ))
    }

    pub fn load_from_files(
        flights: &Path,
        airports: &Path,
    ) -> DiagResult<(Schedule, ScheduleReport)> {
        debug!("reading flights from {}", flights.display());
        debug!("reading airports from {}", airports.display());
        Schedule::load(File::open(flights)?, BufReader::new(File::open(airports)?))
    }
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader)
}

/// Walks data rows, turning per-row decode errors into skips. I/O errors are fatal.
fn for_each_record<R: Read>(
    reader: R,
    report: &mut LoadReport,
    mut on_record: impl FnMut(&csv::StringRecord, usize, &mut LoadReport),
) -> DiagResult<()> {
    let mut reader = csv_reader(reader);
    for (idx, result) in reader.records().enumerate() {
        // header is line 1
        let fallback_line = idx + 2;
        match result {
            Ok(record) => {
                let line = record
                    .position()
                    .map(|p| p.line() as usize)
                    .unwrap_or(fallback_line);
                on_record(&record, line, report);
            }
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => report.skip(fallback_line, e.to_string()),
        }
    }
    Ok(())
}

fn field<'r>(record: &'r csv::StringRecord, index: usize, name: &str) -> Result<&'r str, String> {
    record
        .get(index)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| format!("missing {}", name))
}

fn integer(raw: &str, name: &str) -> Result<i64, String> {
    raw.parse::<i64>()
        .map_err(|_| format!("{} is not an integer: '{}'", name, raw))
}

fn positive(raw: &str, name: &str) -> Result<u64, String> {
    let value = integer(raw, name)?;
    if value <= 0 {
        return Err(format!("{} must be positive, got {}", name, value));
    }
    Ok(value as u64)
}

fn non_negative(raw: &str, name: &str) -> Result<u64, String> {
    let value = integer(raw, name)?;
    if value < 0 {
        return Err(format!("{} must not be negative, got {}", name, value));
    }
    Ok(value as u64)
}

fn parse_flight(record: &csv::StringRecord) -> Result<Flight, String> {
    let origin = field(record, 0, "origin")?;
    let destination = field(record, 1, "destination")?;
    let departure = field(record, 2, "departure time")?;
    let arrival = field(record, 3, "arrival time")?;
    let capacity = field(record, 4, "capacity")?;
    Ok(Flight {
        origin_id: Arc::from(origin),
        destination_id: Arc::from(destination),
        departure_time: departure.parse::<Time>()?,
        arrival_time: arrival.parse::<Time>()?,
        capacity: positive(capacity, "capacity")?,
    })
}

/// Reads `origin,destination,HH:MM,HH:MM,capacity` rows after a header line.
pub fn read_flights<R: Read>(reader: R) -> DiagResult<(Vec<Flight>, LoadReport)> {
    let mut report = LoadReport::new("flight");
    let mut flights = vec![];
    for_each_record(reader, &mut report, |record, line, report| {
        match parse_flight(record) {
            Ok(flight) => flights.push(flight),
            Err(reason) => report.skip(line, reason),
        }
    })?;
    report.loaded = flights.len();
    Ok((flights, report))
}

fn parse_airport(tokens: &[&str]) -> Result<Airport, String> {
    if tokens.len() < AIRPORT_MIN_FIELDS {
        return Err(format!(
            "expected at least {} fields, got {}",
            AIRPORT_MIN_FIELDS,
            tokens.len()
        ));
    }
    let n = tokens.len();
    let capacity = tokens[n - 1]
        .parse::<i64>()
        .map_err(|_| format!("capacity is not an integer: '{}'", tokens[n - 1]))?;
    if capacity < 0 {
        return Err(format!("capacity must not be negative, got {}", capacity));
    }
    let utc_offset = tokens[n - 2]
        .trim_start_matches('+')
        .parse::<i32>()
        .map_err(|_| format!("utc offset is not an integer: '{}'", tokens[n - 2]))?;
    Ok(Airport {
        code: Arc::from(tokens[1]),
        name: tokens[2..n - 2].join(" "),
        utc_offset,
        daily_capacity: capacity as u64,
    })
}

/// Reads the whitespace-delimited airport table. Blank lines and region headings are ignored.
/// Rows that are not valid UTF-8 are skipped; only I/O failures abort.
pub fn read_airports<R: BufRead>(mut reader: R) -> DiagResult<(Vec<Airport>, LoadReport)> {
    let mut report = LoadReport::new("airport");
    let mut airports: Vec<Airport> = vec![];
    let mut seen: HashMap<AirportId, usize> = HashMap::new();
    let mut buf = Vec::new();
    let mut line_no = 0;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_no += 1;
        let line = match std::str::from_utf8(&buf) {
            Ok(line) => line,
            Err(e) => {
                report.skip(line_no, format!("row is not valid UTF-8: {}", e));
                continue;
            }
        };
        // tolerate a UTF-8 BOM on the first line
        let trimmed = line.trim().trim_start_matches('\u{feff}');
        if trimmed.is_empty() || AIRPORT_MARKERS.iter().any(|m| trimmed.contains(m)) {
            continue;
        }
        let tokens = trimmed.split_whitespace().collect::<Vec<&str>>();
        match parse_airport(&tokens) {
            Ok(airport) => {
                if let Some(first) = seen.get(&airport.code) {
                    report.skip(
                        line_no,
                        format!(
                            "duplicate airport code {} (first seen at line {})",
                            airport.code, first
                        ),
                    );
                } else {
                    seen.insert(airport.code.clone(), line_no);
                    airports.push(airport);
                }
            }
            Err(reason) => report.skip(line_no, reason),
        }
    }
    report.loaded = airports.len();
    Ok((airports, report))
}

fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, String> {
    raw.parse::<NaiveDateTime>()
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S"))
        .or_else(|_| DateTime::parse_from_rfc3339(raw).map(|dt| dt.naive_utc()))
        .map_err(|_| format!("invalid timestamp '{}'", raw))
}

fn parse_order(record: &csv::StringRecord) -> Result<Order, String> {
    let timestamp = parse_timestamp(field(record, 0, "timestamp")?)?;
    let destination = field(record, 1, "destination")?;
    // An empty order still counts toward the order total.
    let quantity = non_negative(field(record, 2, "quantity")?, "quantity")?;
    Ok(Order {
        timestamp,
        destination_id: Arc::from(destination),
        quantity,
        client_id: record.get(3).filter(|s| !s.is_empty()).map(String::from),
    })
}

/// Reads `timestamp,destination,quantity,client` rows and keeps those inside `range`.
pub fn load_orders<R: Read>(reader: R, range: &DateRange) -> DiagResult<(Vec<Order>, LoadReport)> {
    let mut report = LoadReport::new("order");
    let mut orders = vec![];
    for_each_record(reader, &mut report, |record, line, report| {
        match parse_order(record) {
            Ok(order) if range.contains(&order.timestamp) => orders.push(order),
            Ok(_) => report.filtered += 1,
            Err(reason) => report.skip(line, reason),
        }
    })?;
    report.loaded = orders.len();
    info!(
        "loaded {} orders in range {} .. {} ({} outside, {} skipped)",
        orders.len(),
        range.start,
        range.end,
        report.filtered,
        report.skipped_count()
    );
    Ok((orders, report))
}

pub fn load_orders_from_file(
    path: &Path,
    range: &DateRange,
) -> DiagResult<(Vec<Order>, LoadReport)> {
    debug!("reading orders from {}", path.display());
    load_orders(File::open(path)?, range)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging;
    use crate::order::Demand;

    const FLIGHTS: &str = "\
Origen,Destino,HoraOrigen,HoraDestino,Capacidad
SPIM,SKBO,06:10,09:40,300
SKBO,SPIM,07:00,10:30,280
SPIM,EBCI,22:15,05:20,360
";

    const AIRPORTS: &str = "\
America del Sur. GMT
01   SKBO   Bogota          Colombia    bogo    -5     430
02   SPIM   Lima            Peru        lima    -5     440

Europa       GMT
31   EBCI   Bruselas        Belgica     brus    +2     440
";

    #[test]
    fn test_load_schedule() {
        logging::init_test();
        let (schedule, report) = Schedule::load(FLIGHTS.as_bytes(), AIRPORTS.as_bytes()).unwrap();

        assert_eq!(3, schedule.flights.len());
        assert_eq!(0, report.flights.skipped_count());
        assert_eq!(Time(370), schedule.flights[0].departure_time);
        assert_eq!(300, schedule.flights[0].capacity);
        assert_eq!("SKBO", &*schedule.flights[1].origin_id);

        assert_eq!(3, schedule.airports.len());
        assert_eq!(0, report.airports.skipped_count());
        let lima = schedule.airport("SPIM").unwrap();
        assert_eq!("Lima Peru lima", lima.name);
        assert_eq!(-5, lima.utc_offset);
        assert_eq!(440, lima.daily_capacity);
        assert_eq!(2, schedule.airport("EBCI").unwrap().utc_offset);
        assert!(schedule.airport("UBBB").is_none());
    }

    #[test]
    fn test_flight_missing_capacity_is_skipped() {
        let source = "\
Origen,Destino,HoraOrigen,HoraDestino,Capacidad
SPIM,SKBO,06:10,09:40,300
SKBO,SPIM,07:00,10:30
SPIM,EBCI,22:15,05:20,360
";
        let (flights, report) = read_flights(source.as_bytes()).unwrap();

        assert_eq!(2, flights.len());
        assert_eq!(2, report.loaded);
        assert_eq!(1, report.skipped_count());
        match &report.skipped[0] {
            DiagError::MalformedRecord { line, reason, .. } => {
                assert_eq!(3, *line);
                assert!(reason.contains("capacity"));
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_flight_bad_fields_are_skipped() {
        let source = "\
Origen,Destino,HoraOrigen,HoraDestino,Capacidad
SPIM,SKBO,6h10,09:40,300
SPIM,SKBO,06:10,09:40,0
SPIM,SKBO,06:10,09:40,-20
,SKBO,06:10,09:40,20
SPIM,SKBO,06:10,25:00,20
SPIM,SKBO,06:10,09:40,abc
";
        let (flights, report) = read_flights(source.as_bytes()).unwrap();
        assert!(flights.is_empty());
        assert_eq!(6, report.skipped_count());
    }

    #[test]
    fn test_negative_airport_capacity_is_rejected() {
        let source = "\
01   SKBO   Bogota   Colombia   bogo   -5   -430
02   SPIM   Lima     Peru       lima   -5    440
03   SEQM   Quito    Ecuador    quit   -5
";
        let (airports, report) = read_airports(source.as_bytes()).unwrap();
        assert_eq!(1, airports.len());
        assert_eq!("SPIM", &*airports[0].code);
        assert_eq!(2, report.skipped_count());
    }

    #[test]
    fn test_duplicate_airport_keeps_first() {
        let source = "\
01   SKBO   Bogota   Colombia   bogo   -5   430
02   SKBO   Other    Colombia   bogo   -5   999
";
        let (airports, report) = read_airports(source.as_bytes()).unwrap();
        assert_eq!(1, airports.len());
        assert_eq!(430, airports[0].daily_capacity);
        assert_eq!(1, report.skipped_count());
    }

    #[test]
    fn test_load_orders_filters_range() {
        let source = "\
timestamp,destination,quantity,client
2025-11-30T23:59:00,SKBO,5,0001
2025-12-01T00:00:00,SKBO,10,0002
2025-12-03 12:30:00,EBCI,7,0003
2025-12-07T23:59:59,UBBB,3,
2025-12-08T00:00:00,SKBO,9,0004
not-a-date,SKBO,1,0005
2025-12-02T00:00:00,SKBO,zero,0006
";
        let range = DateRange {
            start: "2025-12-01T00:00:00".parse().unwrap(),
            end: "2025-12-08T00:00:00".parse().unwrap(),
        };
        let (orders, report) = load_orders(source.as_bytes(), &range).unwrap();

        assert_eq!(3, orders.len());
        assert_eq!(2, report.filtered);
        assert_eq!(2, report.skipped_count());
        assert_eq!(Some("0002".to_string()), orders[0].client_id);
        assert_eq!(None, orders[2].client_id);
        assert_eq!(20, orders.iter().map(|o| o.quantity).sum::<u64>());
    }

    #[test]
    fn test_zero_quantity_order_is_kept() {
        let source = "\
timestamp,destination,quantity,client
2025-12-02T08:00:00,SKBO,0,0001
2025-12-02T09:00:00,SKBO,4,0002
2025-12-02T10:00:00,SKBO,-1,0003
";
        let range = DateRange {
            start: "2025-12-01T00:00:00".parse().unwrap(),
            end: "2025-12-08T00:00:00".parse().unwrap(),
        };
        let (orders, report) = load_orders(source.as_bytes(), &range).unwrap();

        assert_eq!(2, orders.len());
        assert_eq!(0, orders[0].quantity);
        assert_eq!(1, report.skipped_count());
        match &report.skipped[0] {
            DiagError::MalformedRecord { line, reason, .. } => {
                assert_eq!(4, *line);
                assert!(reason.contains("negative"));
            }
            other => panic!("unexpected error {:?}", other),
        }

        let demand = Demand::from_orders(&orders);
        assert_eq!(2, demand.order_count);
        assert_eq!(4, demand.total_quantity);
        assert_eq!(Some(2.0), demand.average_order_size());
    }

    #[test]
    fn test_non_utf8_airport_row_is_skipped() {
        let source: &[u8] = b"01   SKBO   Bogot\xE1   Colombia   bogo   -5   430
02   SPIM   Lima   Peru   lima   -5   440
";
        let (airports, report) = read_airports(source).unwrap();

        assert_eq!(1, airports.len());
        assert_eq!("SPIM", &*airports[0].code);
        assert_eq!(1, report.loaded);
        assert_eq!(1, report.skipped_count());
        match &report.skipped[0] {
            DiagError::MalformedRecord { line, reason, .. } => {
                assert_eq!(1, *line);
                assert!(reason.contains("UTF-8"));
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let missing = Path::new("/nonexistent/flights.csv");
        let result = Schedule::load_from_files(missing, missing);
        assert!(matches!(result, Err(DiagError::Io(_))));
    }
}
