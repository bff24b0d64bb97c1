//! Repository for the `motifs` table.

use screenplay_core::types::ProjectId;
use sqlx::PgPool;

use crate::models::motif::{Motif, NewMotif};

const COLUMNS: &str = "id, project_id, name, meaning, created_at";

pub struct MotifRepo;

impl MotifRepo {
    /// Replace a project's motifs in one transaction. Returns rows inserted.
    pub async fn replace_for_project(
        pool: &PgPool,
        project_id: ProjectId,
        rows: &[NewMotif],
    ) -> Result<u64, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let count = Self::replace_inner(&mut tx, project_id, rows).await?;
        tx.commit().await?;
        Ok(count)
    }

    /// List a project's motifs in insertion order.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: ProjectId,
    ) -> Result<Vec<Motif>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM motifs WHERE project_id = $1 ORDER BY id ASC");
        sqlx::query_as::<_, Motif>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Replace motifs within a transaction owned by the caller.
    pub(crate) async fn replace_inner(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        project_id: ProjectId,
        rows: &[NewMotif],
    ) -> Result<u64, sqlx::Error> {
        sqlx::query("DELETE FROM motifs WHERE project_id = $1")
            .bind(project_id)
            .execute(&mut **tx)
            .await?;

        for row in rows {
            sqlx::query("INSERT INTO motifs (project_id, name, meaning) VALUES ($1, $2, $3)")
                .bind(project_id)
                .bind(&row.name)
                .bind(&row.meaning)
                .execute(&mut **tx)
                .await?;
        }

        Ok(rows.len() as u64)
    }
}
