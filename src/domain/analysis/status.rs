//! Analysis job lifecycle status.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// Status of an analysis job.
///
/// Legal transitions: Pending -> Processing -> Completed | Failed.
/// Completed and Failed are terminal; a retry is a fresh job cycle, not a
/// transition out of a terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisStatus {
    /// Created, not yet picked up by an executor.
    Pending,
    /// Claimed by exactly one executor.
    Processing,
    /// Terminal: analysis succeeded, result payload attached.
    Completed,
    /// Terminal: analysis failed, failure reason attached.
    Failed,
}

impl StateMachine for AnalysisStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use AnalysisStatus::*;
        matches!(
            (self, target),
            (Pending, Processing) | (Processing, Completed) | (Processing, Failed)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use AnalysisStatus::*;
        match self {
            Pending => vec![Processing],
            Processing => vec![Completed, Failed],
            Completed => vec![],
            Failed => vec![],
        }
    }
}

impl fmt::Display for AnalysisStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AnalysisStatus::Pending => "pending",
            AnalysisStatus::Processing => "processing",
            AnalysisStatus::Completed => "completed",
            AnalysisStatus::Failed => "failed",
        };
        write!(f, "{}", s)
    }
}
