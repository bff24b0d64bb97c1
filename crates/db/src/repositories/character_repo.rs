//! Repository for the `characters` table.

use screenplay_core::types::ProjectId;
use sqlx::PgPool;

use crate::models::character::{Character, NewCharacter};

const COLUMNS: &str = "id, project_id, name, role, want, need, wound, misbelief, fear, \
                       moral_line, vocal_rules, behavior_rules, created_at";

pub struct CharacterRepo;

impl CharacterRepo {
    /// Replace a project's cast: delete every character, then insert `rows`,
    /// all within one transaction. Returns the number of rows inserted.
    pub async fn replace_for_project(
        pool: &PgPool,
        project_id: ProjectId,
        rows: &[NewCharacter],
    ) -> Result<u64, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let deleted = sqlx::query("DELETE FROM characters WHERE project_id = $1")
            .bind(project_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        for row in rows {
            sqlx::query(
                "INSERT INTO characters
                    (project_id, name, role, want, need, wound, misbelief, fear,
                     moral_line, vocal_rules, behavior_rules)
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)",
            )
            .bind(project_id)
            .bind(&row.name)
            .bind(&row.role)
            .bind(&row.want)
            .bind(&row.need)
            .bind(&row.wound)
            .bind(&row.misbelief)
            .bind(&row.fear)
            .bind(&row.moral_line)
            .bind(&row.vocal_rules)
            .bind(&row.behavior_rules)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        tracing::debug!(%project_id, deleted, inserted = rows.len(), "Replaced characters");
        Ok(rows.len() as u64)
    }

    /// List a project's characters ordered by name.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: ProjectId,
    ) -> Result<Vec<Character>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM characters WHERE project_id = $1 ORDER BY name ASC, id ASC"
        );
        sqlx::query_as::<_, Character>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }
}
