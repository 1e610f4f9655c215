pub mod car;

pub use car::{Car, CarList, CarPayloadError, CarSummary, NewCar, REQUIRED_FIELDS};
