//! In-memory car store.
//!
//! Ids are assigned from a counter starting at 1 and cars are returned in
//! insertion order.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use super::{CarRepository, RepositoryError, RepositoryResult};
use crate::models::{Car, NewCar};

#[derive(Clone, Default)]
pub struct LocalCarRepository {
    data: Arc<RwLock<LocalData>>,
}

struct LocalData {
    cars: Vec<Car>,
    next_id: i32,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            cars: Vec::new(),
            next_id: 1,
        }
    }
}

impl LocalCarRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> RepositoryError {
    RepositoryError::Storage("local car store lock poisoned".to_string())
}

#[async_trait]
impl CarRepository for LocalCarRepository {
    async fn insert(&self, car: &NewCar) -> RepositoryResult<Car> {
        let mut data = self.data.write().map_err(poisoned)?;

        let car = Car::stored(data.next_id, car);
        data.next_id += 1;
        data.cars.push(car.clone());

        Ok(car)
    }

    async fn query_all(&self) -> RepositoryResult<Vec<Car>> {
        let data = self.data.read().map_err(poisoned)?;
        Ok(data.cars.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_car(name: &str, model: &str, doors: i32, engine: &str) -> NewCar {
        NewCar {
            name: name.to_string(),
            model: model.to_string(),
            doors,
            engine: engine.to_string(),
        }
    }

    #[tokio::test]
    async fn starts_empty() {
        let repo = LocalCarRepository::new();
        assert!(repo.query_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn assigns_increasing_ids_in_insertion_order() {
        let repo = LocalCarRepository::new();
        let toyota = repo
            .insert(&new_car("Toyota", "Corolla", 4, "V4"))
            .await
            .unwrap();
        let ford = repo
            .insert(&new_car("Ford", "Mustang", 2, "V8"))
            .await
            .unwrap();

        assert_eq!(toyota.id, 1);
        assert_eq!(ford.id, 2);
        assert_eq!(repo.query_all().await.unwrap(), vec![toyota, ford]);
    }

    #[tokio::test]
    async fn duplicates_are_kept() {
        let repo = LocalCarRepository::new();
        let car = new_car("Honda", "Civic", 4, "V4");
        repo.insert(&car).await.unwrap();
        repo.insert(&car).await.unwrap();

        let cars = repo.query_all().await.unwrap();
        assert_eq!(cars.len(), 2);
        assert_ne!(cars[0].id, cars[1].id);
    }

    #[tokio::test]
    async fn clones_share_the_same_store() {
        let repo = LocalCarRepository::new();
        let handle = repo.clone();
        handle
            .insert(&new_car("BMW", "M3", 4, "V6"))
            .await
            .unwrap();
        assert_eq!(repo.query_all().await.unwrap().len(), 1);
    }
}
