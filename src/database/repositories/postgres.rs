//! PostgreSQL record store
//!
//! Rows are written through `jsonb_populate_record`, so a single set of
//! statements serves every resource: the draft or patch is serialized to JSON
//! and Postgres maps its keys onto the table's columns. For updates the
//! current row is the base record, which keeps columns absent from the patch.

use std::marker::PhantomData;
use std::time::Instant;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use super::store::RecordStore;
use crate::models::{Category, Resource};
use crate::utils::errors::{Result, TechClubError};
use crate::utils::logging::log_database_operation;

pub struct PgRecordStore<R> {
    pool: PgPool,
    _resource: PhantomData<fn() -> R>,
}

impl<R> Clone for PgRecordStore<R> {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            _resource: PhantomData,
        }
    }
}

impl<R: Resource> PgRecordStore<R> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _resource: PhantomData,
        }
    }

    fn table() -> &'static str {
        R::KIND.table()
    }

    fn column_list() -> String {
        R::COLUMNS
            .iter()
            .map(|c| format!("\"{}\"", c))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn select_sql() -> String {
        format!(
            "SELECT * FROM {} WHERE ($1::text IS NULL OR category = $1) ORDER BY {}",
            Self::table(),
            R::ORDER_BY
        )
    }

    fn insert_sql() -> String {
        let columns = Self::column_list();
        format!(
            "INSERT INTO {table} ({columns}) SELECT {columns} FROM jsonb_populate_record(NULL::{table}, $1) RETURNING *",
            table = Self::table(),
            columns = columns
        )
    }

    fn update_sql() -> String {
        let columns = Self::column_list();
        format!(
            "UPDATE {table} AS t SET ({columns}) = (SELECT {columns} FROM jsonb_populate_record(t, $2)) WHERE t.id = $1 RETURNING *",
            table = Self::table(),
            columns = columns
        )
    }

    fn to_json(value: &impl Serialize) -> Result<Value> {
        Ok(serde_json::to_value(value)?)
    }

    fn finish<T>(operation: &str, started: Instant, result: std::result::Result<T, sqlx::Error>) -> Result<T> {
        let elapsed = started.elapsed().as_millis() as u64;
        log_database_operation(operation, Self::table(), elapsed, result.is_ok());
        result.map_err(|e| match e {
            sqlx::Error::Database(db) => TechClubError::Persistence(format!(
                "{} on {} rejected: {}",
                operation,
                Self::table(),
                db.message()
            )),
            other => TechClubError::Database(other),
        })
    }
}

#[async_trait]
impl<R: Resource> RecordStore<R> for PgRecordStore<R> {
    async fn select(&self, category: Option<R::Category>) -> Result<Vec<R>> {
        let started = Instant::now();
        let sql = Self::select_sql();
        let result = sqlx::query_as::<_, R>(&sql)
            .bind(category.map(|c| c.as_str()))
            .fetch_all(&self.pool)
            .await;
        Self::finish("select", started, result)
    }

    async fn select_one(&self, id: Uuid) -> Result<Option<R>> {
        let started = Instant::now();
        let sql = format!("SELECT * FROM {} WHERE id = $1", Self::table());
        let result = sqlx::query_as::<_, R>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await;
        Self::finish("select_one", started, result)
    }

    async fn insert(&self, draft: &R::Draft, image_url: &str) -> Result<R> {
        let mut row = Self::to_json(draft)?;
        if let Value::Object(ref mut fields) = row {
            fields.insert("image_url".to_string(), Value::String(image_url.to_string()));
        }

        let started = Instant::now();
        let sql = Self::insert_sql();
        let result = sqlx::query_as::<_, R>(&sql)
            .bind(Json(row))
            .fetch_one(&self.pool)
            .await;
        Self::finish("insert", started, result)
    }

    async fn update(&self, id: Uuid, patch: &R::Patch) -> Result<Option<R>> {
        let started = Instant::now();
        let sql = Self::update_sql();
        let result = sqlx::query_as::<_, R>(&sql)
            .bind(id)
            .bind(Json(Self::to_json(patch)?))
            .fetch_optional(&self.pool)
            .await;
        Self::finish("update", started, result)
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let started = Instant::now();
        let sql = format!("DELETE FROM {} WHERE id = $1", Self::table());
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await;
        Self::finish("delete", started, result).map(|done| done.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<()> {
        crate::database::connection::health_check(&self.pool).await
    }
}
