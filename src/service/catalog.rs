//! Generic CRUD over the lookup entities (materials, brands, types, colors).
//! One implementation keyed by [`LookupKind`]; table names come from the
//! closed enum, never from client input.

use crate::error::AppError;
use crate::model::{LookupKind, LookupPayload, LookupRead};
use sqlx::PgPool;

pub struct CatalogService;

impl CatalogService {
    pub async fn list(pool: &PgPool, kind: LookupKind) -> Result<Vec<LookupRead>, AppError> {
        let sql = format!("SELECT id, name FROM {} ORDER BY id", kind.table());
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query_as::<_, LookupRead>(&sql).fetch_all(pool).await?;
        Ok(rows)
    }

    pub async fn read(
        pool: &PgPool,
        kind: LookupKind,
        id: i64,
    ) -> Result<Option<LookupRead>, AppError> {
        let sql = format!("SELECT id, name FROM {} WHERE id = $1", kind.table());
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, LookupRead>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row)
    }

    pub async fn create(
        pool: &PgPool,
        kind: LookupKind,
        payload: &LookupPayload,
    ) -> Result<LookupRead, AppError> {
        payload.validate()?;
        let sql = format!(
            "INSERT INTO {} (name) VALUES ($1) RETURNING id, name",
            kind.table()
        );
        tracing::debug!(sql = %sql, "query");
        let row = sqlx::query_as::<_, LookupRead>(&sql)
            .bind(&payload.name)
            .fetch_one(pool)
            .await?;
        Ok(row)
    }

    pub async fn update(
        pool: &PgPool,
        kind: LookupKind,
        id: i64,
        payload: &LookupPayload,
    ) -> Result<Option<LookupRead>, AppError> {
        payload.validate()?;
        let sql = format!(
            "UPDATE {} SET name = $1 WHERE id = $2 RETURNING id, name",
            kind.table()
        );
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, LookupRead>(&sql)
            .bind(&payload.name)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row)
    }

    /// Hard delete. A 23503 violation (still referenced by a pen) surfaces as
    /// [`AppError::Conflict`] through the sqlx error conversion.
    pub async fn delete(pool: &PgPool, kind: LookupKind, id: i64) -> Result<bool, AppError> {
        let sql = format!("DELETE FROM {} WHERE id = $1 RETURNING id", kind.table());
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, (i64,)>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.is_some())
    }
}
