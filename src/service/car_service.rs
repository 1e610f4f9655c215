use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::constants::API_NAME;
use crate::models::{Car, CarList, NewCar};
use crate::repository::{CarRepository, RepositoryResult};

#[derive(Clone)]
pub struct CarService {
    repository: Arc<dyn CarRepository>,
    persisted_car_count: Arc<AtomicU64>,
}

impl CarService {
    pub fn new<R>(repository: R) -> Self
    where
        R: CarRepository + 'static,
    {
        Self {
            repository: Arc::new(repository),
            persisted_car_count: Arc::new(AtomicU64::new(0)),
        }
    }

    fn log_persisted_car_count(&self) {
        let count = self.persisted_car_count.fetch_add(1, Ordering::Relaxed) + 1;
        if count % 10 == 0 {
            tracing::info!("{} *** Persisted cars count: {} ***", API_NAME, count);
        }
    }

    pub async fn create_car(&self, car: NewCar) -> RepositoryResult<Car> {
        let stored = self.repository.insert(&car).await.map_err(|e| {
            tracing::error!("{} Failed to persist car {}: {}", API_NAME, car.name, e);
            e
        })?;

        self.log_persisted_car_count();
        tracing::info!("{} Created car {} with id {}", API_NAME, car.name, stored.id);
        Ok(stored)
    }

    pub async fn list_cars(&self) -> RepositoryResult<CarList> {
        let cars = self.repository.query_all().await?;
        tracing::info!("{} Listing {} cars", API_NAME, cars.len());
        Ok(CarList::from(cars))
    }
}
