//! Monthly calendar grid projection.
//!
//! The grid starts on the configured first weekday and emits one blank cell
//! per weekday before day 1, then one cell per day of the month. Trailing
//! blanks are only added when [`CalendarOptions::pad_trailing`] is set.
//!
//! ```
//! use chrono::Weekday;
//! use taskdeck::task::view::{CalendarGrid, CalendarMonth, CalendarOptions};
//!
//! let month = CalendarMonth::new(2024, 3).expect("valid month");
//! let grid = CalendarGrid::build(month, [], CalendarOptions::new(Weekday::Sun));
//! assert_eq!(grid.leading_blanks(), 5);
//! assert_eq!(grid.len(), 36);
//! ```

use super::ViewError;
use crate::task::domain::Task;
use chrono::{Datelike, Months, NaiveDate, Weekday};
use std::collections::BTreeMap;

/// A `(year, month)` pair naming a displayable month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CalendarMonth {
    first: NaiveDate,
}

impl CalendarMonth {
    /// Creates a month.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::InvalidMonth`] when `month` is outside `1..=12`
    /// or the year is not representable.
    pub fn new(year: i32, month: u32) -> Result<Self, ViewError> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|first| Self { first })
            .ok_or(ViewError::InvalidMonth { year, month })
    }

    /// Returns the month containing `date`.
    #[must_use]
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            first: date.with_day(1).unwrap_or(date),
        }
    }

    /// Returns the year.
    #[must_use]
    pub fn year(self) -> i32 {
        self.first.year()
    }

    /// Returns the month number, `1..=12`.
    #[must_use]
    pub fn month(self) -> u32 {
        self.first.month()
    }

    /// Returns the first day of the month.
    #[must_use]
    pub const fn first_day(self) -> NaiveDate {
        self.first
    }

    /// Returns the following month, wrapping December into January.
    #[must_use]
    pub fn next(self) -> Self {
        self.first
            .checked_add_months(Months::new(1))
            .map_or(self, |first| Self { first })
    }

    /// Returns the preceding month, wrapping January into December.
    #[must_use]
    pub fn previous(self) -> Self {
        self.first
            .checked_sub_months(Months::new(1))
            .map_or(self, |first| Self { first })
    }

    /// Returns the number of days in the month: the day-of-month of the day
    /// before the first of the following month.
    #[must_use]
    pub fn days_in_month(self) -> u32 {
        // Only December of the last representable year has no successor.
        self.first
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .map_or(31, |last| last.day())
    }

    /// Returns the weekday index of day 1, where 0 is `week_start`.
    #[must_use]
    pub fn first_weekday_index(self, week_start: Weekday) -> u32 {
        self.first.weekday().days_since(week_start)
    }

    /// Returns `true` when `date` is in this month.
    #[must_use]
    pub fn contains(self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }
}

/// Grid layout options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarOptions {
    /// Weekday shown in the first grid column.
    pub week_start: Weekday,
    /// Appends blanks so the grid ends on a complete week.
    pub pad_trailing: bool,
}

impl CalendarOptions {
    /// Creates options with no trailing padding.
    #[must_use]
    pub const fn new(week_start: Weekday) -> Self {
        Self {
            week_start,
            pad_trailing: false,
        }
    }

    /// Enables or disables trailing padding.
    #[must_use]
    pub const fn with_pad_trailing(mut self, pad_trailing: bool) -> Self {
        self.pad_trailing = pad_trailing;
        self
    }
}

impl Default for CalendarOptions {
    fn default() -> Self {
        Self::new(Weekday::Sun)
    }
}

/// One grid cell: a blank or a day with the tasks due on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarDay<'a> {
    day: Option<u32>,
    date: Option<NaiveDate>,
    tasks: Vec<&'a Task>,
}

impl<'a> CalendarDay<'a> {
    const fn blank() -> Self {
        Self {
            day: None,
            date: None,
            tasks: Vec::new(),
        }
    }

    /// Returns the day of month, or `None` for a blank cell.
    #[must_use]
    pub const fn day(&self) -> Option<u32> {
        self.day
    }

    /// Returns the cell date, or `None` for a blank cell.
    #[must_use]
    pub const fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    /// Returns the tasks due on this day, in input order.
    #[must_use]
    pub fn tasks(&self) -> &[&'a Task] {
        &self.tasks
    }

    /// Returns `true` for lead-in or trailing blanks.
    #[must_use]
    pub const fn is_blank(&self) -> bool {
        self.day.is_none()
    }
}

/// Month grid with tasks bucketed by due date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarGrid<'a> {
    month: CalendarMonth,
    leading_blanks: usize,
    cells: Vec<CalendarDay<'a>>,
}

impl<'a> CalendarGrid<'a> {
    /// Builds the grid for `month`, placing each task on the cell whose date
    /// equals its due date.
    #[must_use]
    pub fn build(
        month: CalendarMonth,
        tasks: impl IntoIterator<Item = &'a Task>,
        options: CalendarOptions,
    ) -> Self {
        let mut buckets: BTreeMap<NaiveDate, Vec<&'a Task>> = BTreeMap::new();
        for task in tasks {
            if let Some(due) = task.due_date().filter(|due| month.contains(*due)) {
                buckets.entry(due).or_default().push(task);
            }
        }

        let leading_blanks = to_usize(month.first_weekday_index(options.week_start));
        let days = to_usize(month.days_in_month());
        let mut cells = Vec::with_capacity(leading_blanks + days + 6);
        cells.extend((0..leading_blanks).map(|_| CalendarDay::blank()));
        cells.extend(month.first_day().iter_days().take(days).map(|date| CalendarDay {
            day: Some(date.day()),
            date: Some(date),
            tasks: buckets.remove(&date).unwrap_or_default(),
        }));
        if options.pad_trailing {
            cells.resize_with(cells.len().next_multiple_of(7), CalendarDay::blank);
        }

        Self {
            month,
            leading_blanks,
            cells,
        }
    }

    /// Returns the month the grid shows.
    #[must_use]
    pub const fn month(&self) -> CalendarMonth {
        self.month
    }

    /// Returns the number of blank cells before day 1.
    #[must_use]
    pub const fn leading_blanks(&self) -> usize {
        self.leading_blanks
    }

    /// Returns every cell in display order.
    #[must_use]
    pub fn cells(&self) -> &[CalendarDay<'a>] {
        &self.cells
    }

    /// Returns the total cell count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns `true` when the grid has no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns the cell for a day of month.
    #[must_use]
    pub fn day(&self, day: u32) -> Option<&CalendarDay<'a>> {
        self.cells.iter().find(|cell| cell.day == Some(day))
    }

    /// Returns the grid split into rows of seven cells. The last row may be
    /// shorter when trailing padding is off.
    pub fn weeks(&self) -> impl Iterator<Item = &[CalendarDay<'a>]> {
        self.cells.chunks(7)
    }
}

/// Returns the seven weekdays in display order starting at `week_start`.
#[must_use]
pub fn weekday_headers(week_start: Weekday) -> [Weekday; 7] {
    let mut next = week_start;
    std::array::from_fn(|_| {
        let current = next;
        next = next.succ();
        current
    })
}

fn to_usize(value: u32) -> usize {
    usize::try_from(value).unwrap_or_default()
}
