//! Rule-based field extractors for travel tickets.
//!
//! Every extractor is stateless, scans the full text independently, and
//! returns its first match or `None` — extractors never interact and a
//! miss never propagates as an error.

pub mod identifiers;
pub mod location;
pub mod mode;
pub mod passenger;
pub mod patterns;
pub mod times;

pub use identifiers::{extract_carriage_number, extract_seat_number, extract_train_number};
pub use location::{extract_arrival_location, extract_departure_location};
pub use mode::extract_travel_mode;
pub use passenger::extract_passenger_name;
pub use times::{extract_arrival_time, extract_departure_time};
