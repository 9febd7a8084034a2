//! ProjectRepository - Repository per la gestione dei progetti

use super::{Create, Read};
use crate::dtos::CreateProjectDTO;
use crate::entities::{Project, ProjectSettings};
use sqlx::types::Json;
use sqlx::{Error, SqlitePool};
use tracing::{debug, info, instrument};

pub struct ProjectRepository {
    connection_pool: SqlitePool,
}

impl ProjectRepository {
    pub fn new(connection_pool: SqlitePool) -> Self {
        Self { connection_pool }
    }
}

impl Create<Project, CreateProjectDTO> for ProjectRepository {
    #[instrument(skip(self, data))]
    async fn create(&self, data: &CreateProjectDTO) -> Result<Project, Error> {
        debug!("Creating new project");
        let settings = Json(data.settings.clone().unwrap_or_else(ProjectSettings::default));
        let project = sqlx::query_as::<_, Project>(
            r#"
            INSERT INTO projects (name, settings)
            VALUES (?, ?)
            RETURNING project_id, name, settings, created_at, deleted_at
            "#,
        )
        .bind(&data.name)
        .bind(settings)
        .fetch_one(&self.connection_pool)
        .await?;

        info!("Project created with id {}", project.project_id);
        Ok(project)
    }
}

impl Read<Project, i32> for ProjectRepository {
    #[instrument(skip(self), fields(project_id = %id))]
    async fn read(&self, id: &i32) -> Result<Option<Project>, Error> {
        sqlx::query_as::<_, Project>(
            r#"
            SELECT project_id, name, settings, created_at, deleted_at
            FROM projects
            WHERE project_id = ? AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .fetch_optional(&self.connection_pool)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::database::connect_in_memory;

    #[tokio::test]
    async fn test_create_project_uses_default_settings() -> Result<(), Error> {
        let repo = ProjectRepository::new(connect_in_memory().await?);
        let project = repo
            .create(&CreateProjectDTO {
                name: "Pilot study".to_string(),
                settings: None,
            })
            .await?;

        assert_eq!(project.name, "Pilot study");
        assert_eq!(project.settings.0, ProjectSettings::default());

        let read = repo.read(&project.project_id).await?.expect("project exists");
        assert_eq!(read.project_id, project.project_id);
        assert!(repo.read(&9999).await?.is_none());
        Ok(())
    }
}
