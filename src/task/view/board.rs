//! Status-grouped board projection.

use crate::task::domain::{Task, TaskStatus};

/// One board column: the tasks currently in a single status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardColumn<'a> {
    status: TaskStatus,
    tasks: Vec<&'a Task>,
}

impl<'a> BoardColumn<'a> {
    const fn empty(status: TaskStatus) -> Self {
        Self {
            status,
            tasks: Vec::new(),
        }
    }

    /// Returns the status this column holds.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the tasks in input order.
    #[must_use]
    pub fn tasks(&self) -> &[&'a Task] {
        &self.tasks
    }

    /// Returns the number of tasks in the column.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns `true` when the column holds no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

/// Board with exactly one column per status, in declared order.
///
/// Every input task lands in exactly one column: [`TaskStatus`] is closed,
/// and payloads carrying any other status are rejected when a task is
/// deserialized, so no fallback column exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board<'a> {
    pending: BoardColumn<'a>,
    in_progress: BoardColumn<'a>,
    completed: BoardColumn<'a>,
}

impl<'a> Board<'a> {
    /// Partitions `tasks` by status, keeping input order within each column.
    #[must_use]
    pub fn project(tasks: impl IntoIterator<Item = &'a Task>) -> Self {
        let mut board = Self {
            pending: BoardColumn::empty(TaskStatus::Pending),
            in_progress: BoardColumn::empty(TaskStatus::InProgress),
            completed: BoardColumn::empty(TaskStatus::Completed),
        };
        for task in tasks {
            board.column_mut(task.status()).tasks.push(task);
        }
        board
    }

    /// Returns the column for `status`.
    #[must_use]
    pub const fn column(&self, status: TaskStatus) -> &BoardColumn<'a> {
        match status {
            TaskStatus::Pending => &self.pending,
            TaskStatus::InProgress => &self.in_progress,
            TaskStatus::Completed => &self.completed,
        }
    }

    const fn column_mut(&mut self, status: TaskStatus) -> &mut BoardColumn<'a> {
        match status {
            TaskStatus::Pending => &mut self.pending,
            TaskStatus::InProgress => &mut self.in_progress,
            TaskStatus::Completed => &mut self.completed,
        }
    }

    /// Returns the columns in board order.
    #[must_use]
    pub const fn columns(&self) -> [&BoardColumn<'a>; 3] {
        [&self.pending, &self.in_progress, &self.completed]
    }

    /// Returns the total number of tasks across all columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns().iter().map(|column| column.len()).sum()
    }

    /// Returns `true` when no column holds a task.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
