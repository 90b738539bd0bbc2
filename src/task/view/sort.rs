//! Stable multi-key task sorting with locale-aware string collation.

use super::ViewError;
use crate::task::domain::Task;
use icu_collator::{Collator, CollatorOptions};
use icu_locid::Locale;
use std::cmp::Ordering;
use std::fmt;

/// Sortable task fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    /// Task title, collated.
    Title,
    /// Description, collated; a missing description compares as empty.
    Description,
    /// Priority, `low < medium < high`.
    Priority,
    /// Status, in board column order.
    Status,
    /// Due date; tasks without one always sort last.
    DueDate,
    /// Creation instant.
    CreatedAt,
    /// Latest modification instant.
    UpdatedAt,
    /// Assignee display name, collated; unassigned tasks always sort last.
    Assignee,
}

impl SortField {
    /// Returns the wire name of the field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Description => "description",
            Self::Priority => "priority",
            Self::Status => "status",
            Self::DueDate => "dueDate",
            Self::CreatedAt => "createdAt",
            Self::UpdatedAt => "updatedAt",
            Self::Assignee => "assignedTo",
        }
    }
}

impl TryFrom<&str> for SortField {
    type Error = ViewError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "title" => Ok(Self::Title),
            "description" => Ok(Self::Description),
            "priority" => Ok(Self::Priority),
            "status" => Ok(Self::Status),
            "dueDate" | "due_date" => Ok(Self::DueDate),
            "createdAt" | "created_at" => Ok(Self::CreatedAt),
            "updatedAt" | "updated_at" => Ok(Self::UpdatedAt),
            "assignedTo" | "assigned_to" | "assignee" => Ok(Self::Assignee),
            _ => Err(ViewError::UnknownSortField(value.to_owned())),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortDirection {
    /// Smallest first.
    #[default]
    Ascending,
    /// Largest first.
    Descending,
}

impl SortDirection {
    /// Orients an ascending comparison result.
    #[must_use]
    pub const fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

/// One sort key: a field and a direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SortKey {
    /// Field compared by this key.
    pub field: SortField,
    /// Direction of the comparison.
    pub direction: SortDirection,
}

impl SortKey {
    /// Creates a sort key.
    #[must_use]
    pub const fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }
}

/// Primary sort key with an optional secondary tie-break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SortSpec {
    primary: SortKey,
    secondary: Option<SortKey>,
}

impl SortSpec {
    /// Creates a single-key sort specification.
    #[must_use]
    pub const fn new(field: SortField, direction: SortDirection) -> Self {
        Self {
            primary: SortKey::new(field, direction),
            secondary: None,
        }
    }

    /// Adds a secondary key used only to break primary-key ties.
    #[must_use]
    pub const fn then_by(mut self, field: SortField, direction: SortDirection) -> Self {
        self.secondary = Some(SortKey::new(field, direction));
        self
    }

    /// Returns the primary key.
    #[must_use]
    pub const fn primary(&self) -> SortKey {
        self.primary
    }

    /// Returns the secondary key, if any.
    #[must_use]
    pub const fn secondary(&self) -> Option<SortKey> {
        self.secondary
    }
}

/// Task comparator bound to a collation locale.
pub struct TaskSorter {
    locale: String,
    collator: Collator,
}

impl fmt::Debug for TaskSorter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskSorter")
            .field("locale", &self.locale)
            .finish_non_exhaustive()
    }
}

impl TaskSorter {
    /// Creates a sorter that collates strings for the given BCP 47 tag.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::InvalidLocale`] when the tag does not parse or
    /// [`ViewError::Collation`] when no collation data is available.
    pub fn for_locale(tag: &str) -> Result<Self, ViewError> {
        let locale: Locale = tag
            .parse()
            .map_err(|_| ViewError::InvalidLocale(tag.to_owned()))?;
        let collator = Collator::try_new(&locale.into(), CollatorOptions::new()).map_err(
            |err| ViewError::Collation {
                locale: tag.to_owned(),
                message: err.to_string(),
            },
        )?;
        Ok(Self {
            locale: tag.to_owned(),
            collator,
        })
    }

    /// Returns the locale tag used for collation.
    #[must_use]
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Compares two strings with the configured collation.
    #[must_use]
    pub fn collate(&self, left: &str, right: &str) -> Ordering {
        self.collator.compare(left, right)
    }

    /// Compares two tasks under `spec`.
    #[must_use]
    pub fn compare(&self, left: &Task, right: &Task, spec: &SortSpec) -> Ordering {
        let primary = self.compare_key(left, right, spec.primary);
        match spec.secondary {
            Some(secondary) => primary.then_with(|| self.compare_key(left, right, secondary)),
            None => primary,
        }
    }

    /// Returns the tasks ordered by `spec`. Equal tasks keep input order.
    #[must_use]
    pub fn sort<'a>(
        &self,
        tasks: impl IntoIterator<Item = &'a Task>,
        spec: &SortSpec,
    ) -> Vec<&'a Task> {
        let mut sorted: Vec<&'a Task> = tasks.into_iter().collect();
        sorted.sort_by(|left, right| self.compare(left, right, spec));
        sorted
    }

    fn compare_key(&self, left: &Task, right: &Task, key: SortKey) -> Ordering {
        let direction = key.direction;
        match key.field {
            SortField::Title => direction.apply(self.collate(left.title(), right.title())),
            SortField::Description => direction.apply(self.collate(
                left.description().unwrap_or_default(),
                right.description().unwrap_or_default(),
            )),
            SortField::Priority => direction.apply(left.priority().cmp(&right.priority())),
            SortField::Status => direction.apply(left.status().cmp(&right.status())),
            SortField::DueDate => {
                missing_last(left.due_date(), right.due_date(), direction, |a, b| a.cmp(b))
            }
            SortField::CreatedAt => direction.apply(left.created_at().cmp(&right.created_at())),
            SortField::UpdatedAt => direction.apply(left.updated_at().cmp(&right.updated_at())),
            SortField::Assignee => missing_last(
                left.assigned_to().map(|user| user.display_name.as_str()),
                right.assigned_to().map(|user| user.display_name.as_str()),
                direction,
                |a, b| self.collate(a, b),
            ),
        }
    }
}

/// Compares optional values with `None` after every `Some` regardless of
/// direction.
fn missing_last<T>(
    left: Option<T>,
    right: Option<T>,
    direction: SortDirection,
    compare: impl FnOnce(&T, &T) -> Ordering,
) -> Ordering {
    match (left, right) {
        (Some(a), Some(b)) => direction.apply(compare(&a, &b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
