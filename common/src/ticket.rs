use crate::snapshot::SystemSnapshot;
use serde::{Deserialize, Serialize};

/// Ticket priority as shown to the user
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Map a user-facing label to a priority. Anything unrecognized is Medium
    pub fn from_label(label: &str) -> Priority {
        match label.trim().to_lowercase().as_str() {
            "low" => Priority::Low,
            "high" => Priority::High,
            _ => Priority::Medium,
        }
    }

    /// Numeric scale used by the helpdesk backend
    pub fn as_backend(&self) -> u8 {
        match self {
            Priority::Low => 1,
            Priority::Medium => 2,
            Priority::High => 3,
        }
    }
}

/// One ticket submission. Built once per submit action, handed to the
/// submission client and not retained afterward
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TicketSubmission {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub description: String,
    pub priority: Priority,
    pub snapshot: SystemSnapshot,
    /// PNG screenshot bytes, if a capture succeeded and the user kept it
    pub screenshot: Option<Vec<u8>>,
}

/// Result of one submission attempt, surfaced to the user as-is
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SubmitOutcome {
    pub success: bool,
    pub message: String,
}
