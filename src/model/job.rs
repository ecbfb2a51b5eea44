//! Ingestion job records and their status state machine
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Represents the current status of an ingestion job
///
/// `Pending -> InProgress -> {Completed, Failed}`; the last two are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    /// Job was created but work has not started
    Pending,

    /// Page fetch, extraction, or backlink discovery is running
    InProgress,

    /// Job finished and produced links/backlinks
    Completed,

    /// Job failed; see the job's error message
    Failed,
}

impl JobStatus {
    /// Returns true if no further transitions are possible
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    /// Returns true if moving from `self` to `next` is a legal transition
    pub fn can_transition_to(&self, next: JobStatus) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::InProgress)
                | (Self::Pending, Self::Failed)
                | (Self::InProgress, Self::Completed)
                | (Self::InProgress, Self::Failed)
        )
    }

    /// Converts the status to its stable string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }

    /// Parses a status from its string representation
    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "in_progress" => Some(Self::InProgress),
            "completed" => Some(Self::Completed),
            "failed" => Some(Self::Failed),
            _ => None,
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One ingestion request and its outcome counters
///
/// Only the orchestrator mutates a job; the transition methods ignore calls
/// that would leave a terminal state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestionJob {
    pub id: Uuid,
    pub source_url: String,
    pub status: JobStatus,
    pub total_links_found: usize,
    pub total_backlinks_found: usize,
    pub error_message: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl IngestionJob {
    /// Creates a pending job for the given source URL
    pub fn new(source_url: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            source_url: source_url.into(),
            status: JobStatus::Pending,
            total_links_found: 0,
            total_backlinks_found: 0,
            error_message: None,
            started_at: None,
            completed_at: None,
            created_at: Utc::now(),
        }
    }

    /// Marks the job as running
    pub fn start(&mut self) {
        if self.transition(JobStatus::InProgress) {
            self.started_at = Some(Utc::now());
        }
    }

    /// Marks the job as completed with its final counts
    pub fn complete(&mut self, total_links: usize, total_backlinks: usize) {
        if self.transition(JobStatus::Completed) {
            self.total_links_found = total_links;
            self.total_backlinks_found = total_backlinks;
            self.completed_at = Some(Utc::now());
        }
    }

    /// Marks the job as failed, discarding any partial counts
    pub fn fail(&mut self, message: impl Into<String>) {
        if self.transition(JobStatus::Failed) {
            self.total_links_found = 0;
            self.total_backlinks_found = 0;
            self.error_message = Some(message.into());
            self.completed_at = Some(Utc::now());
        }
    }

    fn transition(&mut self, next: JobStatus) -> bool {
        if !self.status.can_transition_to(next) {
            tracing::warn!(
                "Ignoring job {} transition {} -> {}",
                self.id,
                self.status,
                next
            );
            return false;
        }
        self.status = next;
        true
    }
}
