//! Live class sessions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use smartlearn_core::{DomainError, DomainResult, LiveClassId, UserId};

/// Live class lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LiveClassStatus {
    Scheduled,
    Live,
    Completed,
}

impl core::fmt::Display for LiveClassStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            LiveClassStatus::Scheduled => write!(f, "scheduled"),
            LiveClassStatus::Live => write!(f, "live"),
            LiveClassStatus::Completed => write!(f, "completed"),
        }
    }
}

/// A scheduled teaching session with one-time paid admission.
///
/// Admission is a per-user gate answered by the ledger, not a subscription;
/// the class itself only carries the price and who teaches it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveClass {
    pub id: LiveClassId,
    pub teacher_id: UserId,
    pub teacher_name: String,
    pub title: String,
    pub description: String,
    pub scheduled_at: DateTime<Utc>,
    pub duration_mins: u32,
    pub price: u64,
    pub status: LiveClassStatus,
}

impl LiveClass {
    /// Admission can still be bought while the class has not finished.
    pub fn admission_open(&self) -> bool {
        self.status != LiveClassStatus::Completed
    }

    /// Move a scheduled class on air.
    pub fn start(&mut self) -> DomainResult<()> {
        if self.status != LiveClassStatus::Scheduled {
            return Err(DomainError::invariant("class is not scheduled"));
        }
        self.status = LiveClassStatus::Live;
        Ok(())
    }

    /// Close out a class that is on air.
    pub fn finish(&mut self) -> DomainResult<()> {
        if self.status != LiveClassStatus::Live {
            return Err(DomainError::invariant("class is not live"));
        }
        self.status = LiveClassStatus::Completed;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class() -> LiveClass {
        LiveClass {
            id: LiveClassId::from("l9"),
            teacher_id: UserId::new(),
            teacher_name: "Mr. Banda".to_string(),
            title: "Algebra Clinic".to_string(),
            description: "Worked examples".to_string(),
            scheduled_at: Utc::now(),
            duration_mins: 60,
            price: 500,
            status: LiveClassStatus::Scheduled,
        }
    }

    #[test]
    fn lifecycle_runs_scheduled_live_completed() {
        let mut class = class();

        class.start().unwrap();
        assert_eq!(class.status, LiveClassStatus::Live);
        assert!(class.admission_open());

        class.finish().unwrap();
        assert_eq!(class.status, LiveClassStatus::Completed);
        assert!(!class.admission_open());
    }

    #[test]
    fn cannot_start_twice() {
        let mut class = class();
        class.start().unwrap();

        assert!(matches!(
            class.start(),
            Err(DomainError::InvariantViolation(_))
        ));
    }

    #[test]
    fn cannot_finish_before_start() {
        let mut class = class();

        assert!(class.finish().is_err());
        assert_eq!(class.status, LiveClassStatus::Scheduled);
    }
}
