/// Prefix for every log line emitted by the service.
pub const API_NAME: &str = "[car-registry-api]";

/// Returned with a 200 when a POST body is not declared as JSON.
pub const NOT_JSON_MESSAGE: &str = "The request payload is not in JSON format";

/// Table holding one row per car.
pub const CARS_TABLE: &str = "cars";

pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;
