//! Audit log entries.
//!
//! Entries are random colouring for the log screens; they do not mirror the
//! diary or goal rows generated in the same run.

use fake::{Fake, faker::lorem::en::Sentence};
use rand::Rng;
use rand::seq::SliceRandom;

use stayfit::models::{ActionType, LogStatus};

/// Status draw weights: successes dominate.
const STATUSES: [LogStatus; 5] = [
    LogStatus::Success,
    LogStatus::Success,
    LogStatus::Success,
    LogStatus::Failure,
    LogStatus::Warning,
];

#[derive(Debug, Clone)]
pub struct GeneratedLogEntry {
    /// `None` for anonymous events such as failed logins.
    pub user_id: Option<i32>,
    pub action_type: ActionType,
    pub description: String,
    pub status: LogStatus,
}

pub struct ActivityLogGenerator {
    entries: usize,
    anonymous_rate: f64,
}

impl ActivityLogGenerator {
    pub fn new(entries: usize, anonymous_rate: f64) -> Self {
        Self {
            entries,
            anonymous_rate,
        }
    }

    pub fn generate(&self, user_ids: &[i32], rng: &mut impl Rng) -> Vec<GeneratedLogEntry> {
        (0..self.entries)
            .map(|_| {
                let user_id = if rng.gen_bool(self.anonymous_rate) {
                    None
                } else {
                    user_ids.choose(rng).copied()
                };

                GeneratedLogEntry {
                    user_id,
                    action_type: ActionType::ALL[rng.gen_range(0..ActionType::ALL.len())],
                    description: Sentence(4..10).fake_with_rng(rng),
                    status: STATUSES[rng.gen_range(0..STATUSES.len())],
                }
            })
            .collect()
    }
}
