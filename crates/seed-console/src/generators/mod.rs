//! Row generators for test data.
//!
//! Generators are pure: they take the identifiers of already inserted parent
//! rows plus a random source and return rows ready for insertion.
//! - [`UserGenerator`]: users with demographics and body measurements
//! - [`CatalogGenerator`]: meal types, the global food catalogue and custom products
//! - [`ProfileGenerator`]: nutrition goals and app settings
//! - [`DiaryGenerator`]: food diary entries
//! - [`TrackingGenerator`]: weight history and daily summaries
//! - [`SessionGenerator`]: login sessions
//! - [`ActivityLogGenerator`]: audit log entries

pub mod activity_log;
pub mod catalog;
pub mod diary;
pub mod profile;
pub mod session;
pub mod tracking;
pub mod user;

pub use activity_log::{ActivityLogGenerator, GeneratedLogEntry};
pub use catalog::{CatalogGenerator, GeneratedProduct};
pub use diary::{DiaryGenerator, GeneratedDiaryEntry};
pub use profile::{GeneratedGoal, GeneratedSettings, ProfileGenerator};
pub use session::{GeneratedSession, SessionGenerator};
pub use tracking::{GeneratedDailySummary, GeneratedWeightEntry, TrackingGenerator};
pub use user::{GeneratedUser, UserGenConfig, UserGenerator};

use rand::Rng;
use time::{Duration, OffsetDateTime};

/// A user row after insertion, with what dependent generators need from it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeededUser {
    pub id: i32,
    /// Height in centimetres.
    pub height: f64,
}

/// Rounds to two decimal places, the scale of every measurement column.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Uniform value in `[min, max)` rounded to two decimals.
pub(crate) fn random_measure(rng: &mut impl Rng, min: f64, max: f64) -> f64 {
    round2(rng.gen_range(min..max))
}

/// Uniform count in an inclusive `(min, max)` range.
pub(crate) fn random_count(rng: &mut impl Rng, (min, max): (usize, usize)) -> usize {
    rng.gen_range(min..=max)
}

/// Uniform instant in `[start, end)`, at whole-second resolution.
pub(crate) fn random_instant(
    rng: &mut impl Rng,
    start: OffsetDateTime,
    end: OffsetDateTime,
) -> OffsetDateTime {
    let span = (end - start).whole_seconds();
    if span <= 0 {
        return start;
    }
    start + Duration::seconds(rng.gen_range(0..span))
}
