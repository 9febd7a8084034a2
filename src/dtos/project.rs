//! Project DTOs - Data Transfer Objects per progetti

use crate::entities::{Project, ProjectSettings};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ProjectDTO {
    pub project_id: i32,
    pub name: String,
    pub settings: ProjectSettings,
    pub created_at: DateTime<Utc>,
}

impl From<Project> for ProjectDTO {
    fn from(value: Project) -> Self {
        Self {
            project_id: value.project_id,
            name: value.name,
            settings: value.settings.0,
            created_at: value.created_at,
        }
    }
}

/// DTO per creare un nuovo progetto (senza project_id)
#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
pub struct CreateProjectDTO {
    #[validate(length(min = 1, max = 200, message = "Project name must be between 1 and 200 characters"))]
    pub name: String,

    #[serde(default)]
    pub settings: Option<ProjectSettings>,
}
