//! Pen write path: reference resolution, assembly, and transactional
//! persistence. Every create/update runs its lookups and its final write in
//! one transaction, so a bad reference leaves nothing behind.

use crate::error::AppError;
use crate::model::{LookupKind, LookupRead, PenPayload, PenRead, PenRow};
use crate::service::refcode;
use sqlx::{Acquire, PgConnection, PgPool, Postgres, Transaction};
use std::collections::HashMap;

const PEN_COLUMNS: &str = "id, name, price, description, ref, type_id, material_id, brand_id";

/// Savepoint retries for the generated `ref` unique constraint.
const REF_RETRY_LIMIT: u32 = 3;

pub struct PenService;

impl PenService {
    pub async fn list(pool: &PgPool) -> Result<Vec<PenRead>, AppError> {
        let mut conn = pool.acquire().await?;
        let sql = format!("SELECT {} FROM pens ORDER BY id", PEN_COLUMNS);
        let rows: Vec<PenRow> = sqlx::query_as(&sql).fetch_all(conn.as_mut()).await?;
        Self::load_read(conn.as_mut(), rows).await
    }

    pub async fn read(pool: &PgPool, id: i64) -> Result<Option<PenRead>, AppError> {
        let mut conn = pool.acquire().await?;
        let sql = format!("SELECT {} FROM pens WHERE id = $1", PEN_COLUMNS);
        let row: Option<PenRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(conn.as_mut())
            .await?;
        let Some(row) = row else { return Ok(None) };
        Ok(Self::load_read(conn.as_mut(), vec![row]).await?.pop())
    }

    pub async fn create(pool: &PgPool, payload: &PenPayload) -> Result<PenRead, AppError> {
        payload.validate()?;
        let mut tx = pool.begin().await?;

        let type_id = Self::resolve_optional(&mut tx, LookupKind::Type, payload.pen_type).await?;
        let material_id =
            Self::resolve_optional(&mut tx, LookupKind::Material, payload.material).await?;
        let brand_id = Self::resolve_optional(&mut tx, LookupKind::Brand, payload.brand).await?;
        let color_id = Self::resolve_optional(&mut tx, LookupKind::Color, payload.color).await?;

        let row = Self::insert_with_ref(&mut tx, payload, type_id, material_id, brand_id).await?;
        if let Some(color_id) = color_id {
            Self::attach_color(&mut tx, row.id, color_id).await?;
        }

        let read = Self::load_read(&mut tx, vec![row])
            .await?
            .pop()
            .ok_or_else(|| AppError::Db(sqlx::Error::RowNotFound))?;
        tx.commit().await?;
        tracing::info!(pen_id = read.id, reference = %read.reference, "pen created");
        Ok(read)
    }

    /// Update scalars, replace single-valued references that are present in
    /// the payload, append `color` to the existing set. Absent reference
    /// fields are left untouched. Returns None when the pen does not exist.
    pub async fn update(
        pool: &PgPool,
        id: i64,
        payload: &PenPayload,
    ) -> Result<Option<PenRead>, AppError> {
        payload.validate()?;
        let mut tx = pool.begin().await?;

        let sql = format!("SELECT {} FROM pens WHERE id = $1 FOR UPDATE", PEN_COLUMNS);
        let row: Option<PenRow> = sqlx::query_as(&sql).bind(id).fetch_optional(&mut *tx).await?;
        let Some(mut row) = row else { return Ok(None) };

        row.name = payload.name.clone();
        row.price = payload.price;
        row.description = payload.description.clone();
        if let Some(type_id) = payload.pen_type {
            Self::resolve_reference(&mut tx, LookupKind::Type, type_id).await?;
            row.type_id = Some(type_id);
        }
        if let Some(material_id) = payload.material {
            Self::resolve_reference(&mut tx, LookupKind::Material, material_id).await?;
            row.material_id = Some(material_id);
        }
        if let Some(brand_id) = payload.brand {
            Self::resolve_reference(&mut tx, LookupKind::Brand, brand_id).await?;
            row.brand_id = Some(brand_id);
        }

        sqlx::query(
            "UPDATE pens SET name = $1, price = $2, description = $3, \
             type_id = $4, material_id = $5, brand_id = $6 WHERE id = $7",
        )
        .bind(&row.name)
        .bind(row.price)
        .bind(&row.description)
        .bind(row.type_id)
        .bind(row.material_id)
        .bind(row.brand_id)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        if let Some(color_id) = payload.color {
            Self::resolve_reference(&mut tx, LookupKind::Color, color_id).await?;
            Self::attach_color(&mut tx, id, color_id).await?;
        }

        let read = Self::load_read(&mut tx, vec![row])
            .await?
            .pop()
            .ok_or_else(|| AppError::Db(sqlx::Error::RowNotFound))?;
        tx.commit().await?;
        Ok(Some(read))
    }

    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, AppError> {
        let row: Option<(i64,)> = sqlx::query_as("DELETE FROM pens WHERE id = $1 RETURNING id")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.is_some())
    }

    /// Resolve a referenced lookup id or fail with a client-visible error
    /// naming the missing reference.
    async fn resolve_reference(
        tx: &mut Transaction<'_, Postgres>,
        kind: LookupKind,
        id: i64,
    ) -> Result<i64, AppError> {
        let sql = format!("SELECT id FROM {} WHERE id = $1", kind.table());
        let found: Option<(i64,)> = sqlx::query_as(&sql).bind(id).fetch_optional(&mut **tx).await?;
        found
            .map(|r| r.0)
            .ok_or(AppError::MissingReference { kind: kind.label(), id })
    }

    async fn resolve_optional(
        tx: &mut Transaction<'_, Postgres>,
        kind: LookupKind,
        id: Option<i64>,
    ) -> Result<Option<i64>, AppError> {
        match id {
            Some(id) => Ok(Some(Self::resolve_reference(tx, kind, id).await?)),
            None => Ok(None),
        }
    }

    /// Insert with a generated reference. A collision on `pens_ref_key` rolls
    /// back to a savepoint and regenerates instead of aborting the whole
    /// transaction.
    async fn insert_with_ref(
        tx: &mut Transaction<'_, Postgres>,
        payload: &PenPayload,
        type_id: Option<i64>,
        material_id: Option<i64>,
        brand_id: Option<i64>,
    ) -> Result<PenRow, AppError> {
        let sql = format!(
            "INSERT INTO pens (name, price, description, ref, type_id, material_id, brand_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING {}",
            PEN_COLUMNS
        );
        for attempt in 1..=REF_RETRY_LIMIT {
            let reference = refcode::generate();
            let mut sp = tx.begin().await?;
            let res: Result<PenRow, sqlx::Error> = sqlx::query_as(&sql)
                .bind(&payload.name)
                .bind(payload.price)
                .bind(&payload.description)
                .bind(&reference)
                .bind(type_id)
                .bind(material_id)
                .bind(brand_id)
                .fetch_one(&mut *sp)
                .await;
            match res {
                Ok(row) => {
                    sp.commit().await?;
                    return Ok(row);
                }
                Err(e) if is_ref_collision(&e) => {
                    sp.rollback().await?;
                    tracing::warn!(attempt, reference = %reference, "pen reference collision, regenerating");
                }
                Err(e) => return Err(e.into()),
            }
        }
        Err(AppError::Conflict("could not allocate a unique pen reference".into()))
    }

    /// Append-only color association; re-adding an attached color is a no-op.
    async fn attach_color(
        tx: &mut Transaction<'_, Postgres>,
        pen_id: i64,
        color_id: i64,
    ) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO pen_colors (pen_id, color_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(pen_id)
        .bind(color_id)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }

    /// Assemble read DTOs: batch-load the referenced lookups and the color
    /// sets for all rows, then join in memory.
    async fn load_read(
        conn: &mut PgConnection,
        rows: Vec<PenRow>,
    ) -> Result<Vec<PenRead>, AppError> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }
        let ids = |f: fn(&PenRow) -> Option<i64>| -> Vec<i64> {
            let mut v: Vec<i64> = rows.iter().filter_map(f).collect();
            v.sort_unstable();
            v.dedup();
            v
        };
        let types = Self::lookup_map(conn, LookupKind::Type, ids(|r| r.type_id)).await?;
        let materials = Self::lookup_map(conn, LookupKind::Material, ids(|r| r.material_id)).await?;
        let brands = Self::lookup_map(conn, LookupKind::Brand, ids(|r| r.brand_id)).await?;

        let pen_ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        let color_rows: Vec<(i64, i64, String)> = sqlx::query_as(
            "SELECT pc.pen_id, c.id, c.name FROM pen_colors pc \
             JOIN colors c ON c.id = pc.color_id \
             WHERE pc.pen_id = ANY($1) ORDER BY pc.pen_id, c.id",
        )
        .bind(&pen_ids)
        .fetch_all(&mut *conn)
        .await?;
        let mut colors: HashMap<i64, Vec<LookupRead>> = HashMap::new();
        for (pen_id, id, name) in color_rows {
            colors.entry(pen_id).or_default().push(LookupRead { id, name });
        }

        Ok(rows
            .into_iter()
            .map(|r| PenRead {
                pen_type: r.type_id.and_then(|id| types.get(&id).cloned()),
                material: r.material_id.and_then(|id| materials.get(&id).cloned()),
                brand: r.brand_id.and_then(|id| brands.get(&id).cloned()),
                colors: colors.remove(&r.id).unwrap_or_default(),
                id: r.id,
                name: r.name,
                price: r.price,
                description: r.description,
                reference: r.reference,
            })
            .collect())
    }

    async fn lookup_map(
        conn: &mut PgConnection,
        kind: LookupKind,
        ids: Vec<i64>,
    ) -> Result<HashMap<i64, LookupRead>, AppError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let sql = format!("SELECT id, name FROM {} WHERE id = ANY($1)", kind.table());
        let rows: Vec<LookupRead> = sqlx::query_as(&sql).bind(&ids).fetch_all(&mut *conn).await?;
        Ok(rows.into_iter().map(|r| (r.id, r)).collect())
    }
}

fn is_ref_collision(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .map(|db| db.code().as_deref() == Some("23505") && db.constraint() == Some("pens_ref_key"))
        .unwrap_or(false)
}
