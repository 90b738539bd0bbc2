//! Read-only projections over a task snapshot.
//!
//! Every projection borrows from the task slice it is given and never
//! mutates it:
//!
//! - [`filter`]: conjunctive filtering by status, priority, text and date
//!   window
//! - [`sort`]: stable multi-key ordering with locale-aware collation
//! - [`board`]: status columns
//! - [`calendar`]: month grid bucketed by due date

pub mod board;
pub mod calendar;
mod error;
pub mod filter;
pub mod sort;

pub use board::{Board, BoardColumn};
pub use calendar::{
    CalendarDay, CalendarGrid, CalendarMonth, CalendarOptions, weekday_headers,
};
pub use error::ViewError;
pub use filter::{FilterContext, FilterSpec, PriorityFilter, StatusFilter, filter_tasks};
pub use sort::{SortDirection, SortField, SortKey, SortSpec, TaskSorter};

use crate::task::domain::Task;

/// Returns the filtered tasks, ordered by `sort` when given and by input
/// order otherwise.
#[must_use]
pub fn list_view<'a>(
    tasks: impl IntoIterator<Item = &'a Task>,
    filter: &FilterSpec,
    sort: Option<&SortSpec>,
    sorter: &TaskSorter,
    context: &FilterContext,
) -> Vec<&'a Task> {
    let filtered = filter_tasks(tasks, filter, context);
    match sort {
        Some(spec) => sorter.sort(filtered, spec),
        None => filtered,
    }
}
