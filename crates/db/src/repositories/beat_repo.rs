//! Repository for the `beats` table.

use screenplay_core::types::ProjectId;
use sqlx::PgPool;

use crate::models::beat::{BeatRow, NewBeat};

const COLUMNS: &str = "id, project_id, idx, label, summary, purpose, stakes, created_at";

pub struct BeatRepo;

impl BeatRepo {
    /// Replace a project's beats in one transaction. Returns rows inserted.
    ///
    /// Ordinals are stored as given; gaps and duplicates are allowed.
    pub async fn replace_for_project(
        pool: &PgPool,
        project_id: ProjectId,
        rows: &[NewBeat],
    ) -> Result<u64, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let deleted = sqlx::query("DELETE FROM beats WHERE project_id = $1")
            .bind(project_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        for row in rows {
            sqlx::query(
                "INSERT INTO beats (project_id, idx, label, summary, purpose, stakes)
                 VALUES ($1, $2, $3, $4, $5, $6)",
            )
            .bind(project_id)
            .bind(row.idx)
            .bind(&row.label)
            .bind(&row.summary)
            .bind(&row.purpose)
            .bind(&row.stakes)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        tracing::debug!(%project_id, deleted, inserted = rows.len(), "Replaced beats");
        Ok(rows.len() as u64)
    }

    /// List a project's beats by ordinal; unnumbered beats sort last.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: ProjectId,
    ) -> Result<Vec<BeatRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM beats WHERE project_id = $1 ORDER BY idx ASC NULLS LAST, id ASC"
        );
        sqlx::query_as::<_, BeatRow>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }
}
