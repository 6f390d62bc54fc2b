//! Garage: cars scoped to their owner.

use crate::error::AppError;
use crate::models::{Car, CarUpdate, NewCar};
use crate::service::exec::fetch_optional_as;
use crate::service::users::UserRepo;
use crate::sql::{sql_for_partial_update, BindValue};
use sqlx::PgPool;

const CAR_COLUMNS: &str = "id, owner_id, make, model, model_year";

pub struct CarRepo;

impl CarRepo {
    /// All cars owned by `username`, `make` descending. An empty garage is an empty vec.
    pub async fn list(pool: &PgPool, username: &str) -> Result<Vec<Car>, AppError> {
        let owner_id = UserRepo::id_by_username(pool, username).await?;
        let cars = sqlx::query_as::<_, Car>(
            "SELECT id, owner_id, make, model, model_year FROM cars WHERE owner_id = $1 ORDER BY make DESC, id",
        )
        .bind(owner_id)
        .fetch_all(pool)
        .await?;
        Ok(cars)
    }

    pub async fn get(pool: &PgPool, username: &str, car_id: i32) -> Result<Car, AppError> {
        let owner_id = UserRepo::id_by_username(pool, username).await?;
        sqlx::query_as::<_, Car>(
            "SELECT id, owner_id, make, model, model_year FROM cars WHERE owner_id = $1 AND id = $2",
        )
        .bind(owner_id)
        .bind(car_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::not_found("Car not found"))
    }

    pub async fn create(pool: &PgPool, username: &str, data: &NewCar) -> Result<Car, AppError> {
        let owner_id = UserRepo::id_by_username(pool, username).await?;
        let car = sqlx::query_as::<_, Car>(
            "INSERT INTO cars (owner_id, make, model, model_year) VALUES ($1, $2, $3, $4) \
             RETURNING id, owner_id, make, model, model_year",
        )
        .bind(owner_id)
        .bind(&data.make)
        .bind(&data.model)
        .bind(data.model_year)
        .fetch_one(pool)
        .await?;
        tracing::info!(car_id = car.id, owner_id, "car added");
        Ok(car)
    }

    /// Apply whitelisted fields to a car the caller owns.
    pub async fn update(pool: &PgPool, username: &str, car_id: i32, data: &CarUpdate) -> Result<Car, AppError> {
        let upd = sql_for_partial_update(&data.fields(), CarUpdate::COLUMNS)?;
        let owner_id = UserRepo::id_by_username(pool, username).await?;
        let id_idx = upd.next_placeholder();
        let sql = format!(
            "UPDATE cars SET {} WHERE id = ${} AND owner_id = ${} RETURNING {}",
            upd.set_cols,
            id_idx,
            id_idx + 1,
            CAR_COLUMNS
        );
        let params = upd.into_params([BindValue::from(car_id), BindValue::from(owner_id)]);
        fetch_optional_as::<Car>(pool, &sql, params)
            .await?
            .ok_or_else(|| AppError::not_found("Car does not exist"))
    }

    /// Delete a car in the caller's garage. Cars of other owners are indistinguishable from
    /// missing ones.
    pub async fn remove(pool: &PgPool, username: &str, car_id: i32) -> Result<Car, AppError> {
        let owner_id = UserRepo::id_by_username(pool, username).await?;
        let deleted = sqlx::query_as::<_, Car>(
            "DELETE FROM cars WHERE owner_id = $1 AND id = $2 RETURNING id, owner_id, make, model, model_year",
        )
        .bind(owner_id)
        .bind(car_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::not_found("Car not found"))?;
        tracing::info!(car_id, owner_id, "car removed");
        Ok(deleted)
    }
}
