use async_trait::async_trait;
use sqlx::PgPool;

use super::{CarRepository, RepositoryResult};
use crate::constants::{API_NAME, CARS_TABLE};
use crate::models::{Car, NewCar};

#[derive(Clone)]
pub struct PgCarRepository {
    pool: PgPool,
}

impl PgCarRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Creates the schema and the cars table when they do not exist yet.
    pub async fn ensure_schema(&self, schema: &str) -> RepositoryResult<()> {
        let schema = quote_ident(schema);

        sqlx::query(&format!("CREATE SCHEMA IF NOT EXISTS {}", schema))
            .execute(&self.pool)
            .await?;

        // No NOT NULL constraints; presence is checked before insert.
        let create_table = format!(
            "CREATE TABLE IF NOT EXISTS {}.{} (
                id SERIAL PRIMARY KEY,
                name VARCHAR,
                model VARCHAR,
                doors INTEGER,
                engine VARCHAR
            )",
            schema, CARS_TABLE
        );
        sqlx::query(&create_table).execute(&self.pool).await?;

        tracing::info!("{} Table {}.{} is ready", API_NAME, schema, CARS_TABLE);
        Ok(())
    }
}

#[async_trait]
impl CarRepository for PgCarRepository {
    async fn insert(&self, car: &NewCar) -> RepositoryResult<Car> {
        let mut tx = self.pool.begin().await?;

        let id: i32 = sqlx::query_scalar(
            "INSERT INTO cars (name, model, doors, engine) VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(&car.name)
        .bind(&car.model)
        .bind(car.doors)
        .bind(&car.engine)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Car::stored(id, car))
    }

    async fn query_all(&self) -> RepositoryResult<Vec<Car>> {
        let cars = sqlx::query_as::<_, Car>("SELECT id, name, model, doors, engine FROM cars")
            .fetch_all(&self.pool)
            .await?;
        Ok(cars)
    }
}

fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}
