//! Startup DDL for the catalog tables. Idempotent: every statement is
//! CREATE TABLE IF NOT EXISTS, ordered so foreign keys resolve.
//!
//! Lookup tables are referenced with ON DELETE RESTRICT: deleting a material,
//! brand, type, or color still attached to a pen is refused (surfaced as 409).
//! Only a pen's own join rows cascade away with it.

use crate::error::AppError;
use sqlx::PgPool;

const CATALOG_DDL: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS materials (
        id BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS brands (
        id BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS pen_types (
        id BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS colors (
        id BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS pens (
        id BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        price DOUBLE PRECISION NOT NULL,
        description TEXT NOT NULL,
        ref TEXT NOT NULL UNIQUE,
        type_id BIGINT REFERENCES pen_types(id) ON DELETE RESTRICT,
        material_id BIGINT REFERENCES materials(id) ON DELETE RESTRICT,
        brand_id BIGINT REFERENCES brands(id) ON DELETE RESTRICT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS pen_colors (
        pen_id BIGINT NOT NULL REFERENCES pens(id) ON DELETE CASCADE,
        color_id BIGINT NOT NULL REFERENCES colors(id) ON DELETE RESTRICT,
        PRIMARY KEY (pen_id, color_id)
    )
    "#,
];

/// Create the catalog tables if they do not exist. Call before serving.
pub async fn ensure_catalog_tables(pool: &PgPool) -> Result<(), AppError> {
    for ddl in CATALOG_DDL {
        sqlx::query(ddl).execute(pool).await?;
    }
    tracing::debug!(tables = CATALOG_DDL.len(), "catalog schema ensured");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_statement_is_idempotent() {
        for ddl in CATALOG_DDL {
            assert!(ddl.contains("IF NOT EXISTS"), "non-idempotent DDL: {}", ddl);
        }
    }

    #[test]
    fn lookup_references_are_restrict() {
        let pens = CATALOG_DDL.iter().find(|d| d.contains("TABLE IF NOT EXISTS pens")).unwrap();
        assert_eq!(pens.matches("ON DELETE RESTRICT").count(), 3);
        let join = CATALOG_DDL.iter().find(|d| d.contains("pen_colors")).unwrap();
        assert!(join.contains("ON DELETE CASCADE"));
        assert!(join.contains("ON DELETE RESTRICT"));
    }
}
