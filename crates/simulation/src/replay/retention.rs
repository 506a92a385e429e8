//! Best-run retention: only one replay is kept, and a new run replaces it
//! only when it is faster.

use std::fmt;

use super::format::ReplayStore;

/// Outcome of comparing a finished run with the stored best.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RetentionDecision {
    /// Nothing stored yet.
    NoPriorRun,
    /// The new run beat the stored one.
    Faster { prior: f32 },
    /// The stored time is zero or negative and cannot be trusted.
    PriorInvalid { prior: f32 },
    /// The new run was not faster; the stored replay stays.
    NotFaster { prior: f32 },
}

impl RetentionDecision {
    pub fn should_persist(&self) -> bool {
        !matches!(self, Self::NotFaster { .. })
    }
}

impl fmt::Display for RetentionDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoPriorRun => write!(f, "no previous replay"),
            Self::Faster { prior } => write!(f, "faster than previous best {prior:.2}s"),
            Self::PriorInvalid { prior } => {
                write!(f, "previous replay has an invalid time ({prior:.2}s)")
            }
            Self::NotFaster { prior } => write!(f, "not faster than previous best {prior:.2}s"),
        }
    }
}

/// Decide whether a run that took `elapsed_time` seconds should replace
/// `prior`. Ties keep the stored replay.
pub fn decide(prior: Option<&ReplayStore>, elapsed_time: f32) -> RetentionDecision {
    let Some(prior) = prior else {
        return RetentionDecision::NoPriorRun;
    };
    let prior = prior.elapsed_time;
    if elapsed_time < prior {
        RetentionDecision::Faster { prior }
    } else if prior <= 0.0 {
        RetentionDecision::PriorInvalid { prior }
    } else {
        RetentionDecision::NotFaster { prior }
    }
}
