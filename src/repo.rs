//! CRUD over the task collection.
//!
//! The repository owns the boundary between wire shapes and stored shapes:
//! due-date strings are normalized on the way in, identifiers and timestamps
//! become strings on the way out. A path id that is not a UUID collapses to
//! not-found, same as a well-formed id with no document behind it.

use chrono::Utc;
use uuid::Uuid;

use crate::dates;
use crate::error::ApiError;
use crate::model::{CreateTaskRequest, Task, TaskPriority, TaskResponse, TaskStatus, UpdateTaskRequest};
use crate::store::DocumentStore;

/// Filter for list queries. `search` is pre-trimmed and non-empty when set.
#[derive(Debug, Default)]
pub struct TaskFilter {
    pub skip: usize,
    pub limit: usize,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub search: Option<String>,
}

impl TaskFilter {
    fn matches(&self, task: &Task) -> bool {
        if let Some(status) = self.status {
            if task.status != status {
                return false;
            }
        }
        if let Some(priority) = self.priority {
            if task.priority != priority {
                return false;
            }
        }
        if let Some(needle) = &self.search {
            let needle = needle.to_lowercase();
            if !task.title.to_lowercase().contains(&needle)
                && !task.description.to_lowercase().contains(&needle)
            {
                return false;
            }
        }
        true
    }
}

#[derive(Clone)]
pub struct TaskRepository {
    store: DocumentStore,
}

impl TaskRepository {
    pub fn new(store: DocumentStore) -> Self {
        TaskRepository { store }
    }

    /// Insert a new task. The due date is parsed before anything touches the
    /// store, so an invalid one persists nothing.
    pub fn create(&self, req: CreateTaskRequest) -> Result<TaskResponse, ApiError> {
        let due_date = parse_optional_due_date(req.due_date.as_deref())?;

        let now = Utc::now().naive_utc();
        let task = Task {
            id: Uuid::new_v4(),
            title: req.title,
            description: req.description,
            status: req.status,
            priority: req.priority,
            due_date,
            created_at: now,
            updated_at: now,
        };

        self.store.insert(task.id, &task)?;
        Ok(TaskResponse::from(task))
    }

    /// List tasks matching the filter, windowed by skip/limit, in store
    /// default (key) order. A store failure is logged and reported as an
    /// empty list — callers cannot tell it apart from "no matches".
    pub fn list(&self, filter: &TaskFilter) -> Vec<TaskResponse> {
        match self.store.find(|t: &Task| filter.matches(t), filter.skip, filter.limit) {
            Ok(tasks) => tasks.into_iter().map(TaskResponse::from).collect(),
            Err(e) => {
                tracing::error!(error = %e, "task list query failed, returning empty result");
                Vec::new()
            }
        }
    }

    pub fn get(&self, id: &str) -> Result<Option<TaskResponse>, ApiError> {
        let Ok(id) = Uuid::parse_str(id) else {
            return Ok(None);
        };
        Ok(self.store.get::<Task>(id)?.map(TaskResponse::from))
    }

    /// Apply the present fields of a partial update and refresh `updated_at`.
    /// The due date (when present) is parsed before the lookup, mirroring
    /// create's fail-before-touching-the-store behavior.
    pub fn update(&self, id: &str, req: UpdateTaskRequest) -> Result<Option<TaskResponse>, ApiError> {
        let due_date = parse_optional_due_date(req.due_date.as_deref())?;

        let Ok(id) = Uuid::parse_str(id) else {
            return Ok(None);
        };
        let Some(mut task) = self.store.get::<Task>(id)? else {
            return Ok(None);
        };

        if let Some(title) = req.title {
            task.title = title;
        }
        if let Some(description) = req.description {
            task.description = description;
        }
        if let Some(status) = req.status {
            task.status = status;
        }
        if let Some(priority) = req.priority {
            task.priority = priority;
        }
        if let Some(due) = due_date {
            task.due_date = Some(due);
        }
        task.updated_at = Utc::now().naive_utc();

        self.store.insert(id, &task)?;
        Ok(Some(TaskResponse::from(task)))
    }

    /// Returns whether a document was removed.
    pub fn delete(&self, id: &str) -> Result<bool, ApiError> {
        let Ok(id) = Uuid::parse_str(id) else {
            return Ok(false);
        };
        Ok(self.store.remove(id)?)
    }
}

fn parse_optional_due_date(raw: Option<&str>) -> Result<Option<chrono::NaiveDateTime>, ApiError> {
    match raw {
        Some(s) if !s.is_empty() => Ok(Some(dates::parse_due_date(s)?)),
        _ => Ok(None),
    }
}

// ── Tests ──────────────────────────────────────────────────────
