//! Task request types.
//!
//! Request DTOs for the task management operations. All request types
//! support JSON deserialization and validation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::service::tasks::TaskChanges;

/// `Path` param for `{taskId}` handlers.
#[must_use]
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPathParams {
    /// Unique identifier of the task.
    pub task_id: Uuid,
}

/// Request payload for creating a new task.
#[must_use]
#[derive(Debug, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    /// Title of the task (1-200 characters).
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    /// Optional description of the task (max 2000 characters).
    #[validate(length(max = 2000))]
    pub description: Option<String>,
}

/// Request payload for updating an existing task.
///
/// Absent fields are left unchanged.
#[must_use]
#[derive(Debug, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    /// New title of the task (1-200 characters).
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,

    /// New description of the task (max 2000 characters).
    #[validate(length(max = 2000))]
    pub description: Option<String>,

    /// New completion state of the task.
    pub completed: Option<bool>,
}

impl From<UpdateTaskRequest> for TaskChanges {
    fn from(request: UpdateTaskRequest) -> Self {
        Self {
            title: request.title,
            description: request.description,
            completed: request.completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_rejects_empty_title() {
        let request = CreateTaskRequest {
            title: String::new(),
            description: None,
        };
        assert!(request.validate().is_err());

        let request = CreateTaskRequest {
            title: "Ship the release".to_owned(),
            description: None,
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn update_request_maps_to_changes() {
        let request = UpdateTaskRequest {
            title: Some("Renamed".to_owned()),
            description: None,
            completed: Some(true),
        };

        let changes = TaskChanges::from(request);
        assert_eq!(changes.title.as_deref(), Some("Renamed"));
        assert_eq!(changes.description, None);
        assert_eq!(changes.completed, Some(true));
    }
}
