//! Task entity and the user reference it carries.

use super::{
    NewTask, TaskDomainError, TaskId, TaskPatch, TaskPriority, TaskStatus, TeamId, UserId,
};
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Weak reference to the user a task is assigned to.
///
/// The task does not own the user; the display fields are a snapshot taken
/// by the server when the task was last written.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRef {
    /// User identifier.
    pub id: UserId,
    /// Name shown in lists and cards.
    pub display_name: String,
    /// Optional avatar image URL.
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl UserRef {
    /// Creates a user reference without an avatar.
    #[must_use]
    pub fn new(id: UserId, display_name: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            avatar_url: None,
        }
    }

    /// Sets the avatar URL.
    #[must_use]
    pub fn with_avatar_url(mut self, avatar_url: impl Into<String>) -> Self {
        self.avatar_url = Some(avatar_url.into());
        self
    }
}

/// Task entity as held by the store and returned by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    id: TaskId,
    title: String,
    #[serde(default)]
    description: Option<String>,
    priority: TaskPriority,
    status: TaskStatus,
    #[serde(default)]
    due_date: Option<NaiveDate>,
    #[serde(default)]
    assigned_to: Option<UserRef>,
    #[serde(default)]
    team_id: Option<TeamId>,
    #[serde(default)]
    tags: BTreeSet<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    #[serde(default)]
    is_public: bool,
    #[serde(default)]
    reminder_at: Option<DateTime<Utc>>,
}

/// Parameter object for reconstructing a task from server data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskData {
    /// Server-assigned identifier.
    pub id: TaskId,
    /// Task title.
    pub title: String,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Priority.
    pub priority: TaskPriority,
    /// Workflow status.
    pub status: TaskStatus,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
    /// Optional assignee reference.
    pub assigned_to: Option<UserRef>,
    /// Optional owning team.
    pub team_id: Option<TeamId>,
    /// Tags.
    pub tags: BTreeSet<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Latest modification timestamp.
    pub updated_at: DateTime<Utc>,
    /// Whether the task is visible outside its team.
    pub is_public: bool,
    /// Optional reminder instant.
    pub reminder_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Creates a server-side task from a validated create payload.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the title is blank.
    pub fn create(
        id: TaskId,
        new_task: NewTask,
        clock: &impl Clock,
    ) -> Result<Self, TaskDomainError> {
        new_task.validate()?;
        let timestamp = clock.utc();
        Ok(Self {
            id,
            title: new_task.title,
            description: new_task.description,
            priority: new_task.priority,
            status: new_task.status,
            due_date: new_task.due_date,
            assigned_to: new_task.assigned_to,
            team_id: new_task.team_id,
            tags: new_task.tags,
            created_at: timestamp,
            updated_at: timestamp,
            is_public: new_task.is_public,
            reminder_at: new_task.reminder_at,
        })
    }

    /// Reconstructs a task from server data.
    #[must_use]
    pub fn from_data(data: TaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            priority: data.priority,
            status: data.status,
            due_date: data.due_date,
            assigned_to: data.assigned_to,
            team_id: data.team_id,
            tags: data.tags,
            created_at: data.created_at,
            updated_at: data.updated_at,
            is_public: data.is_public,
            reminder_at: data.reminder_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the workflow status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    /// Returns the assignee reference, if any.
    #[must_use]
    pub const fn assigned_to(&self) -> Option<&UserRef> {
        self.assigned_to.as_ref()
    }

    /// Returns the owning team, if any.
    #[must_use]
    pub const fn team_id(&self) -> Option<&TeamId> {
        self.team_id.as_ref()
    }

    /// Returns the tag set.
    #[must_use]
    pub const fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns whether the task is public.
    #[must_use]
    pub const fn is_public(&self) -> bool {
        self.is_public
    }

    /// Returns the reminder instant, if any.
    #[must_use]
    pub const fn reminder_at(&self) -> Option<DateTime<Utc>> {
        self.reminder_at
    }

    /// Applies a partial update. Only fields present in the patch change.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the patch sets a blank
    /// title. The task is left untouched on error.
    pub fn apply_patch(
        &mut self,
        patch: TaskPatch,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        patch.validate()?;
        let TaskPatch {
            title,
            description,
            priority,
            status,
            due_date,
            assigned_to,
            team_id,
            tags,
            is_public,
            reminder_at,
        } = patch;

        if let Some(value) = title {
            self.title = value;
        }
        if let Some(value) = description {
            self.description = value;
        }
        if let Some(value) = priority {
            self.priority = value;
        }
        if let Some(value) = status {
            self.status = value;
        }
        if let Some(value) = due_date {
            self.due_date = value;
        }
        if let Some(value) = assigned_to {
            self.assigned_to = value;
        }
        if let Some(value) = team_id {
            self.team_id = value;
        }
        if let Some(value) = tags {
            self.tags = value;
        }
        if let Some(value) = is_public {
            self.is_public = value;
        }
        if let Some(value) = reminder_at {
            self.reminder_at = value;
        }
        self.updated_at = clock.utc();
        Ok(())
    }
}
