use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use thiserror::Error;

/// Keys a create request must carry, in the order they are reported when missing.
pub const REQUIRED_FIELDS: [&str; 4] = ["name", "model", "doors", "engine"];

/// A stored car row.
///
/// The table carries no NOT NULL constraints, so rows written outside this
/// service may hold nulls in any column but `id`.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Car {
    pub id: i32,
    pub name: Option<String>,
    pub model: Option<String>,
    pub doors: Option<i32>,
    pub engine: Option<String>,
}

impl Car {
    /// The row a store holds after inserting `car` under `id`.
    pub fn stored(id: i32, car: &NewCar) -> Self {
        Self {
            id,
            name: Some(car.name.clone()),
            model: Some(car.model.clone()),
            doors: Some(car.doors),
            engine: Some(car.engine.clone()),
        }
    }

    pub fn summary(&self) -> CarSummary {
        CarSummary {
            name: self.name.clone(),
            model: self.model.clone(),
            doors: self.doors,
        }
    }
}

const DOORS_NOT_INTEGER: &str = "doors must be an integer";

// Accepts `4`, `4.0` and `"4"`; the column is an integer either way.
fn deserialize_doors<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let doors = match Value::deserialize(deserializer)? {
        Value::Number(n) => match n.as_i64() {
            Some(n) => Some(n),
            None => n
                .as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64)
                .map(|f| f as i64),
        },
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };

    let doors = doors.ok_or_else(|| D::Error::custom(DOORS_NOT_INTEGER))?;
    i32::try_from(doors).map_err(|_| D::Error::custom(format!("doors out of range: {}", doors)))
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CarPayloadError {
    #[error("Request payload must be a JSON object")]
    NotAnObject,

    #[error("Missing required field(s): {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("Invalid field value: {0}")]
    InvalidField(String),
}

/// A car as submitted for creation, before the store assigns an id.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewCar {
    pub name: String,
    pub model: String,
    #[serde(deserialize_with = "deserialize_doors")]
    pub doors: i32,
    pub engine: String,
}

impl NewCar {
    /// Maps a decoded request body onto a new car.
    ///
    /// Every key in [`REQUIRED_FIELDS`] must be present and non-null; unknown
    /// keys are ignored.
    pub fn from_json(payload: Value) -> Result<Self, CarPayloadError> {
        let object = payload.as_object().ok_or(CarPayloadError::NotAnObject)?;

        let missing: Vec<&'static str> = REQUIRED_FIELDS
            .iter()
            .copied()
            .filter(|field| object.get(*field).map_or(true, Value::is_null))
            .collect();
        if !missing.is_empty() {
            return Err(CarPayloadError::MissingFields(missing));
        }

        serde_json::from_value(payload).map_err(|e| CarPayloadError::InvalidField(e.to_string()))
    }
}

/// The public projection of a car; `id` and `engine` stay private.
/// Null columns are listed as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarSummary {
    pub name: Option<String>,
    pub model: Option<String>,
    pub doors: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarList {
    pub count: usize,
    pub cars: Vec<CarSummary>,
}

impl From<Vec<Car>> for CarList {
    fn from(cars: Vec<Car>) -> Self {
        let cars: Vec<CarSummary> = cars.iter().map(Car::summary).collect();
        Self {
            count: cars.len(),
            cars,
        }
    }
}
