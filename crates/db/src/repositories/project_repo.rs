//! Repository for the `projects` table.

use screenplay_core::types::ProjectId;
use sqlx::PgPool;

use crate::models::project::{IngredientFields, LoglineFields, Project, DEFAULT_TITLE};
use crate::repositories::MotifRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, title, logline, genre, tone, theme, world_brief, created_at, updated_at";

/// Provides the reads and stage-specific writes on projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project from the Logline stage, returning the created row.
    pub async fn create_with_logline(
        pool: &PgPool,
        input: &LoglineFields,
    ) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (title, logline, genre, tone)
             VALUES (COALESCE($1, $2), $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(&input.title)
            .bind(DEFAULT_TITLE)
            .bind(&input.logline)
            .bind(&input.genre)
            .bind(&input.tone)
            .fetch_one(pool)
            .await
    }

    /// Overwrite the Logline stage fields of an existing project.
    ///
    /// A missing title resets to [`DEFAULT_TITLE`]. Returns `None` if no row
    /// with the given `id` exists.
    pub async fn update_logline(
        pool: &PgPool,
        id: ProjectId,
        input: &LoglineFields,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                title = COALESCE($2, $3),
                logline = $4,
                genre = $5,
                tone = $6,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(DEFAULT_TITLE)
            .bind(&input.logline)
            .bind(&input.genre)
            .bind(&input.tone)
            .fetch_optional(pool)
            .await
    }

    /// Insert an untitled project from the Ingredients stage, with its
    /// motifs when given. Either everything is written or nothing is.
    pub async fn create_with_ingredients(
        pool: &PgPool,
        input: &IngredientFields,
    ) -> Result<Project, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO projects (title, theme, world_brief)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        let project = sqlx::query_as::<_, Project>(&query)
            .bind(DEFAULT_TITLE)
            .bind(&input.theme)
            .bind(&input.world_brief)
            .fetch_one(&mut *tx)
            .await?;

        if let Some(ref motifs) = input.motifs {
            MotifRepo::replace_inner(&mut tx, project.id, motifs).await?;
        }

        tx.commit().await?;
        Ok(project)
    }

    /// Overwrite theme and world brief, and the motifs when given, in one
    /// transaction. Returns `None` if the project is unknown.
    pub async fn update_ingredients(
        pool: &PgPool,
        id: ProjectId,
        input: &IngredientFields,
    ) -> Result<Option<Project>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE projects SET
                theme = $2,
                world_brief = $3,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let project = sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.theme)
            .bind(&input.world_brief)
            .fetch_optional(&mut *tx)
            .await?;

        if let (Some(project), Some(motifs)) = (&project, &input.motifs) {
            MotifRepo::replace_inner(&mut tx, project.id, motifs).await?;
        }

        tx.commit().await?;
        Ok(project)
    }

    /// Find a project by its ID.
    pub async fn find_by_id(pool: &PgPool, id: ProjectId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Whether a project with the given ID exists.
    pub async fn exists(pool: &PgPool, id: ProjectId) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM projects WHERE id = $1)")
                .bind(id)
                .fetch_one(pool)
                .await?;
        Ok(exists)
    }
}
