//! Record of a job submitted to a remote backend.
//!
//! ```text
//!   submitted ──→ Queued ──→ Running ──→ Completed
//!                   │           │
//!                   │           ├──→ Failed
//!                   │           │
//!                   └───────────┴──→ Cancelled
//! ```
//!
//! The status only moves forward. Once terminal, [`Job::advance`] leaves
//! the record untouched.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Number the backend assigned to a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub u64);

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where a remote job is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobStatus {
    Queued,
    Running,
    Completed,
    Failed,
    Cancelled,
}

impl JobStatus {
    /// Completed, failed or cancelled.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            JobStatus::Completed | JobStatus::Failed | JobStatus::Cancelled
        )
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let word = match self {
            JobStatus::Queued => "queued",
            JobStatus::Running => "running",
            JobStatus::Completed => "completed",
            JobStatus::Failed => "failed",
            JobStatus::Cancelled => "cancelled",
        };
        f.write_str(word)
    }
}

/// A job as observed while polling the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    /// Backend type name the job was submitted to.
    pub backend: String,
    pub shots: u32,
    pub status: JobStatus,
    pub submitted_at: DateTime<Utc>,
    /// First time the job was seen running.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    /// First time the job was seen in a terminal state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,
}

impl Job {
    /// A freshly submitted job, queued as of now.
    pub fn submitted(id: JobId, backend: impl Into<String>, shots: u32) -> Self {
        Self {
            id,
            backend: backend.into(),
            shots,
            status: JobStatus::Queued,
            submitted_at: Utc::now(),
            started_at: None,
            finished_at: None,
        }
    }

    /// Record an observed status, stamping start and finish times.
    ///
    /// Returns `false` when the observation does not move the job forward:
    /// same status, `Running` back to `Queued`, or anything after a
    /// terminal state.
    pub fn advance(&mut self, status: JobStatus) -> bool {
        let moves = match (self.status, status) {
            (from, _) if from.is_terminal() => false,
            (from, to) if from == to => false,
            (JobStatus::Running, JobStatus::Queued) => false,
            _ => true,
        };
        if !moves {
            return false;
        }

        let now = Utc::now();
        if status == JobStatus::Running {
            self.started_at.get_or_insert(now);
        }
        if status.is_terminal() {
            self.finished_at = Some(now);
        }
        self.status = status;
        true
    }

    /// Time from submission to the terminal state, once reached.
    pub fn elapsed(&self) -> Option<Duration> {
        Some(self.finished_at? - self.submitted_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job() -> Job {
        Job::submitted(JobId(509), "QX single-node simulator", 1024)
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(!JobStatus::Queued.is_terminal());
        assert!(!JobStatus::Running.is_terminal());
        assert!(JobStatus::Completed.is_terminal());
        assert!(JobStatus::Failed.is_terminal());
        assert!(JobStatus::Cancelled.is_terminal());
    }

    #[test]
    fn test_lifecycle_stamps_times() {
        let mut job = job();
        assert_eq!(job.status, JobStatus::Queued);
        assert!(job.elapsed().is_none());

        assert!(job.advance(JobStatus::Running));
        let started = job.started_at;
        assert!(started.is_some());
        assert!(job.elapsed().is_none());

        assert!(!job.advance(JobStatus::Running));
        assert_eq!(job.started_at, started);

        assert!(job.advance(JobStatus::Completed));
        assert_eq!(job.status, JobStatus::Completed);
        let elapsed = job.elapsed().unwrap();
        assert!(elapsed >= Duration::zero());
    }

    #[test]
    fn test_terminal_status_is_final() {
        let mut job = job();
        assert!(job.advance(JobStatus::Failed));
        let finished = job.finished_at;

        assert!(!job.advance(JobStatus::Running));
        assert!(!job.advance(JobStatus::Completed));
        assert_eq!(job.status, JobStatus::Failed);
        assert_eq!(job.finished_at, finished);
        assert!(job.started_at.is_none());
    }

    #[test]
    fn test_running_does_not_go_back_to_queued() {
        let mut job = job();
        job.advance(JobStatus::Running);
        assert!(!job.advance(JobStatus::Queued));
        assert_eq!(job.status, JobStatus::Running);
    }

    #[test]
    fn test_queued_straight_to_cancelled() {
        let mut job = job();
        assert!(job.advance(JobStatus::Cancelled));
        assert!(job.started_at.is_none());
        assert!(job.elapsed().is_some());
    }

    #[test]
    fn test_display() {
        assert_eq!(JobId(509).to_string(), "509");
        assert_eq!(JobStatus::Cancelled.to_string(), "cancelled");
    }

    #[test]
    fn test_serialized_id_is_a_number() {
        let json = serde_json::to_value(job()).unwrap();
        assert_eq!(json["id"], 509);
        assert_eq!(json["status"], "Queued");
        assert!(json.get("finished_at").is_none());
    }
}
