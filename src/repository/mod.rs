//! Car persistence.
//!
//! [`CarRepository`] is the seam between the service and the store. The
//! PostgreSQL implementation backs the running service; the local one keeps
//! everything in memory for tests and database-less runs.

pub mod errors;
pub mod local_car_repo;
pub mod pg_car_repo;

use async_trait::async_trait;

use crate::models::{Car, NewCar};

pub use errors::{RepositoryError, RepositoryResult};
pub use local_car_repo::LocalCarRepository;
pub use pg_car_repo::PgCarRepository;

#[async_trait]
pub trait CarRepository: Send + Sync {
    /// Stores one car and commits it before returning the stored row.
    async fn insert(&self, car: &NewCar) -> RepositoryResult<Car>;

    /// Every stored car, in whatever order the store yields them.
    async fn query_all(&self) -> RepositoryResult<Vec<Car>>;
}
