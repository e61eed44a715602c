//! In-memory, organization-scoped task storage.
//!
//! Tasks live for the lifetime of the process. Every accessor is keyed by
//! the caller's organization id; a task belonging to another organization
//! is indistinguishable from a missing one.

use std::collections::HashMap;
use std::sync::Arc;

use jiff::Timestamp;
use tokio::sync::RwLock;
use uuid::Uuid;

/// A single task-board entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: Uuid,
    pub organization_id: String,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub created_by: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Task {
    /// Creates a new task owned by `organization_id`.
    pub fn new(
        organization_id: impl Into<String>,
        created_by: impl Into<String>,
        title: impl Into<String>,
        description: Option<String>,
    ) -> Self {
        let now = Timestamp::now();
        Self {
            id: Uuid::now_v7(),
            organization_id: organization_id.into(),
            title: title.into(),
            description,
            completed: false,
            created_by: created_by.into(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Field updates applied to an existing task.
#[derive(Debug, Clone, Default)]
pub struct TaskChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
}

impl TaskChanges {
    /// Returns true when no field would change.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.completed.is_none()
    }
}

/// Shared task storage.
///
/// Cheap to clone; all clones observe the same map.
#[derive(Debug, Clone, Default)]
pub struct TaskStore {
    inner: Arc<RwLock<HashMap<Uuid, Task>>>,
}

impl TaskStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Lists the organization's tasks, oldest first.
    pub async fn list(&self, organization_id: &str) -> Vec<Task> {
        let tasks = self.inner.read().await;
        let mut tasks: Vec<Task> = tasks
            .values()
            .filter(|task| task.organization_id == organization_id)
            .cloned()
            .collect();
        tasks.sort_by_key(|task| task.created_at);
        tasks
    }

    /// Fetches one of the organization's tasks by id.
    pub async fn get(&self, organization_id: &str, id: Uuid) -> Option<Task> {
        let tasks = self.inner.read().await;
        tasks
            .get(&id)
            .filter(|task| task.organization_id == organization_id)
            .cloned()
    }

    /// Inserts a task, returning the stored value.
    pub async fn insert(&self, task: Task) -> Task {
        let mut tasks = self.inner.write().await;
        tasks.insert(task.id, task.clone());
        task
    }

    /// Applies `changes` to one of the organization's tasks.
    ///
    /// Returns the updated task, or `None` when the task does not exist in
    /// that organization.
    pub async fn update(
        &self,
        organization_id: &str,
        id: Uuid,
        changes: TaskChanges,
    ) -> Option<Task> {
        let mut tasks = self.inner.write().await;
        let task = tasks
            .get_mut(&id)
            .filter(|task| task.organization_id == organization_id)?;

        if let Some(title) = changes.title {
            task.title = title;
        }
        if let Some(description) = changes.description {
            task.description = Some(description);
        }
        if let Some(completed) = changes.completed {
            task.completed = completed;
        }
        task.updated_at = Timestamp::now();

        Some(task.clone())
    }

    /// Removes one of the organization's tasks, returning it.
    pub async fn remove(&self, organization_id: &str, id: Uuid) -> Option<Task> {
        let mut tasks = self.inner.write().await;
        match tasks.get(&id) {
            Some(task) if task.organization_id == organization_id => tasks.remove(&id),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn list_is_scoped_to_the_organization() {
        let store = TaskStore::new();
        store.insert(Task::new("org_a", "u1", "a-task", None)).await;
        store.insert(Task::new("org_b", "u2", "b-task", None)).await;

        let tasks = store.list("org_a").await;
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "a-task");
    }

    #[tokio::test]
    async fn get_hides_other_organizations_tasks() {
        let store = TaskStore::new();
        let task = store.insert(Task::new("org_a", "u1", "a-task", None)).await;

        assert!(store.get("org_a", task.id).await.is_some());
        assert!(store.get("org_b", task.id).await.is_none());
    }

    #[tokio::test]
    async fn update_applies_changes_and_bumps_updated_at() {
        let store = TaskStore::new();
        let task = store.insert(Task::new("org_a", "u1", "draft", None)).await;

        let changes = TaskChanges {
            title: Some("final".into()),
            completed: Some(true),
            ..TaskChanges::default()
        };
        let updated = store.update("org_a", task.id, changes).await.unwrap();
        assert_eq!(updated.title, "final");
        assert!(updated.completed);
        assert!(updated.updated_at >= task.updated_at);
    }

    #[tokio::test]
    async fn update_rejects_wrong_organization() {
        let store = TaskStore::new();
        let task = store.insert(Task::new("org_a", "u1", "draft", None)).await;

        let changes = TaskChanges {
            completed: Some(true),
            ..TaskChanges::default()
        };
        assert!(store.update("org_b", task.id, changes).await.is_none());
    }

    #[tokio::test]
    async fn remove_is_scoped_to_the_organization() {
        let store = TaskStore::new();
        let task = store.insert(Task::new("org_a", "u1", "a-task", None)).await;

        assert!(store.remove("org_b", task.id).await.is_none());
        assert!(store.remove("org_a", task.id).await.is_some());
        assert!(store.get("org_a", task.id).await.is_none());
    }
}
