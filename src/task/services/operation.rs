//! Per-operation lifecycle tracking for task store calls.
//!
//! Each store call gets its own record, so concurrent calls cannot
//! overwrite each other's pending or error state.

use crate::task::domain::TaskId;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

/// Identifier of a single store call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OperationId(Uuid);

impl OperationId {
    /// Creates a new random operation identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for OperationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for OperationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What a store call does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    /// Collection fetch.
    Fetch,
    /// Task creation.
    Create,
    /// Patch of one task.
    Update(TaskId),
    /// Deletion of one task.
    Remove(TaskId),
}

impl OperationKind {
    /// Returns the task targeted by the call, if any.
    #[must_use]
    pub const fn task_id(self) -> Option<TaskId> {
        match self {
            Self::Update(id) | Self::Remove(id) => Some(id),
            Self::Fetch | Self::Create => None,
        }
    }

    const fn scope(self) -> OperationScope {
        match self {
            Self::Fetch => OperationScope::Fetch,
            Self::Create => OperationScope::Create,
            Self::Update(id) | Self::Remove(id) => OperationScope::Task(id),
        }
    }
}

/// Calls that retry one another: a later call in the same scope supersedes
/// an earlier failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum OperationScope {
    Fetch,
    Create,
    Task(TaskId),
}

/// Lifecycle of a store call: `Pending`, then `Succeeded` or `Failed`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationStatus {
    /// The request is in flight.
    Pending,
    /// The request resolved and the store applied the response.
    Succeeded,
    /// The request failed; the message is suitable for display.
    Failed(String),
}

impl OperationStatus {
    /// Returns `true` while the request is in flight.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Returns the failure message, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            Self::Pending | Self::Succeeded => None,
        }
    }
}

/// State of one store call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationRecord {
    kind: OperationKind,
    status: OperationStatus,
    started_at: DateTime<Utc>,
    finished_at: Option<DateTime<Utc>>,
    started_seq: u64,
    finished_seq: Option<u64>,
}

impl OperationRecord {
    /// Returns what the call does.
    #[must_use]
    pub const fn kind(&self) -> OperationKind {
        self.kind
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> &OperationStatus {
        &self.status
    }

    /// Returns when the call started.
    #[must_use]
    pub const fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Returns when the call finished, if it has.
    #[must_use]
    pub const fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.finished_at
    }

    /// Sequence number of the record's latest lifecycle event.
    fn last_event_seq(&self) -> u64 {
        self.finished_seq.unwrap_or(self.started_seq)
    }
}

/// Bounded log of operation records.
#[derive(Debug)]
pub(crate) struct OperationLog {
    records: HashMap<OperationId, OperationRecord>,
    next_seq: u64,
    history_limit: usize,
}

impl OperationLog {
    pub(crate) fn new(history_limit: usize) -> Self {
        Self {
            records: HashMap::new(),
            next_seq: 0,
            history_limit,
        }
    }

    pub(crate) fn begin(&mut self, kind: OperationKind, now: DateTime<Utc>) -> OperationId {
        let id = OperationId::new();
        let started_seq = self.bump();
        self.records.insert(
            id,
            OperationRecord {
                kind,
                status: OperationStatus::Pending,
                started_at: now,
                finished_at: None,
                started_seq,
                finished_seq: None,
            },
        );
        id
    }

    pub(crate) fn finish(&mut self, id: OperationId, status: OperationStatus, now: DateTime<Utc>) {
        let finished_seq = self.bump();
        if let Some(record) = self.records.get_mut(&id) {
            record.status = status;
            record.finished_at = Some(now);
            record.finished_seq = Some(finished_seq);
        }
        self.prune();
    }

    pub(crate) fn get(&self, id: OperationId) -> Option<&OperationRecord> {
        self.records.get(&id)
    }

    pub(crate) fn latest_for_task(&self, task_id: TaskId) -> Option<&OperationRecord> {
        self.records
            .values()
            .filter(|record| record.kind.task_id() == Some(task_id))
            .max_by_key(|record| record.started_seq)
    }

    pub(crate) fn is_pending(&self) -> bool {
        self.records.values().any(|record| record.status.is_pending())
    }

    /// Returns the newest failure among scopes whose latest record failed.
    /// A call started or finished after a failure in the same scope clears
    /// it.
    pub(crate) fn last_error(&self) -> Option<&str> {
        let mut latest: HashMap<OperationScope, &OperationRecord> = HashMap::new();
        for record in self.records.values() {
            latest
                .entry(record.kind.scope())
                .and_modify(|held| {
                    if record.last_event_seq() > held.last_event_seq() {
                        *held = record;
                    }
                })
                .or_insert(record);
        }
        latest
            .into_values()
            .filter(|record| record.status.error().is_some())
            .max_by_key(|record| record.last_event_seq())
            .and_then(|record| record.status.error())
    }

    pub(crate) fn ordered(&self) -> Vec<(OperationId, OperationRecord)> {
        let mut records: Vec<(OperationId, OperationRecord)> = self
            .records
            .iter()
            .map(|(id, record)| (*id, record.clone()))
            .collect();
        records.sort_by_key(|(_, record)| record.started_seq);
        records
    }

    const fn bump(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq = self.next_seq.wrapping_add(1);
        seq
    }

    /// Drops the oldest finished records beyond the history limit. Pending
    /// records are never dropped.
    fn prune(&mut self) {
        let mut finished: Vec<(u64, OperationId)> = self
            .records
            .iter()
            .filter_map(|(id, record)| record.finished_seq.map(|seq| (seq, *id)))
            .collect();
        let excess = finished.len().saturating_sub(self.history_limit);
        if excess == 0 {
            return;
        }
        finished.sort_unstable_by_key(|(seq, _)| *seq);
        for (_, id) in finished.into_iter().take(excess) {
            self.records.remove(&id);
        }
    }
}
