//! Create and patch payloads sent to the task collection resource.

use super::{TaskDomainError, TaskPriority, TaskStatus, TeamId, UserRef};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::collections::BTreeSet;

/// Payload for creating a task. Only the title is required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub(crate) title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) description: Option<String>,
    pub(crate) priority: TaskPriority,
    pub(crate) status: TaskStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) due_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) assigned_to: Option<UserRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) team_id: Option<TeamId>,
    pub(crate) tags: BTreeSet<String>,
    pub(crate) is_public: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) reminder_at: Option<DateTime<Utc>>,
}

impl NewTask {
    /// Creates a payload with the given title, medium priority and pending
    /// status.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            priority: TaskPriority::default(),
            status: TaskStatus::Pending,
            due_date: None,
            assigned_to: None,
            team_id: None,
            tags: BTreeSet::new(),
            is_public: false,
            reminder_at: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the initial status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets the assignee.
    #[must_use]
    pub fn with_assignee(mut self, assignee: UserRef) -> Self {
        self.assigned_to = Some(assignee);
        self
    }

    /// Sets the owning team.
    #[must_use]
    pub fn with_team(mut self, team_id: TeamId) -> Self {
        self.team_id = Some(team_id);
        self
    }

    /// Sets the tags.
    #[must_use]
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = String>) -> Self {
        self.tags = tags.into_iter().collect();
        self
    }

    /// Marks the task public.
    #[must_use]
    pub const fn public(mut self) -> Self {
        self.is_public = true;
        self
    }

    /// Sets the reminder instant.
    #[must_use]
    pub const fn with_reminder_at(mut self, reminder_at: DateTime<Utc>) -> Self {
        self.reminder_at = Some(reminder_at);
        self
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Checks required fields.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the title is blank.
    pub fn validate(&self) -> Result<(), TaskDomainError> {
        validate_title(&self.title)
    }
}

/// Partial update payload.
///
/// `None` leaves a field unchanged. For optional task fields the inner
/// `Option` distinguishes "set" from "clear".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) description: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) priority: Option<TaskPriority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) status: Option<TaskStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) due_date: Option<Option<NaiveDate>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) assigned_to: Option<Option<UserRef>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) team_id: Option<Option<TeamId>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) tags: Option<BTreeSet<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) is_public: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) reminder_at: Option<Option<DateTime<Utc>>>,
}

impl TaskPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a patch that only changes the status.
    #[must_use]
    pub fn status(status: TaskStatus) -> Self {
        Self::new().with_status(status)
    }

    /// Sets the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets or clears the description.
    #[must_use]
    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = Some(description);
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets the status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets or clears the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: Option<NaiveDate>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets or clears the assignee.
    #[must_use]
    pub fn with_assignee(mut self, assignee: Option<UserRef>) -> Self {
        self.assigned_to = Some(assignee);
        self
    }

    /// Sets or clears the owning team.
    #[must_use]
    pub fn with_team(mut self, team_id: Option<TeamId>) -> Self {
        self.team_id = Some(team_id);
        self
    }

    /// Replaces the tag set.
    #[must_use]
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = String>) -> Self {
        self.tags = Some(tags.into_iter().collect());
        self
    }

    /// Sets the public flag.
    #[must_use]
    pub const fn with_public(mut self, is_public: bool) -> Self {
        self.is_public = Some(is_public);
        self
    }

    /// Sets or clears the reminder instant.
    #[must_use]
    pub const fn with_reminder_at(mut self, reminder_at: Option<DateTime<Utc>>) -> Self {
        self.reminder_at = Some(reminder_at);
        self
    }

    /// Returns the status this patch sets, if any.
    #[must_use]
    pub const fn new_status(&self) -> Option<TaskStatus> {
        self.status
    }

    /// Returns `true` when the patch changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Checks the fields the patch sets.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the patch sets a blank
    /// title.
    pub fn validate(&self) -> Result<(), TaskDomainError> {
        self.title.as_deref().map_or(Ok(()), validate_title)
    }
}

fn validate_title(title: &str) -> Result<(), TaskDomainError> {
    if title.trim().is_empty() {
        return Err(TaskDomainError::EmptyTitle);
    }
    Ok(())
}
