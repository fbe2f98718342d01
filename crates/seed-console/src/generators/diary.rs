//! Food diary entries.

use rand::Rng;
use rand::seq::SliceRandom;
use time::{Date, Duration, OffsetDateTime, Time};

use super::{random_count, random_measure};

/// Meals are logged between 06:00 and 22:00.
const FIRST_MEAL_SECS: i64 = 6 * 3600;
const LAST_MEAL_SECS: i64 = 22 * 3600;

#[derive(Debug, Clone)]
pub struct GeneratedDiaryEntry {
    pub user_id: i32,
    pub product_id: i32,
    pub meal_type_id: i32,
    pub date: Date,
    pub time: Time,
    pub weight_grams: f64,
    pub calories: f64,
    pub protein: f64,
}

/// Generates food diary entries referencing existing users, products and meal types.
pub struct DiaryGenerator {
    entries_per_user: (usize, usize),
    window_days: i64,
}

impl DiaryGenerator {
    pub fn new(entries_per_user: (usize, usize), window_days: i64) -> Self {
        Self {
            entries_per_user,
            window_days,
        }
    }

    /// Generates entries for every user. Nothing is generated when there is
    /// no product or meal type to reference.
    pub fn generate(
        &self,
        user_ids: &[i32],
        product_ids: &[i32],
        meal_type_ids: &[i32],
        now: OffsetDateTime,
        rng: &mut impl Rng,
    ) -> Vec<GeneratedDiaryEntry> {
        if product_ids.is_empty() || meal_type_ids.is_empty() {
            return Vec::new();
        }

        let mut entries = Vec::new();
        for &user_id in user_ids {
            let count = random_count(rng, self.entries_per_user);
            for _ in 0..count {
                let (Some(&product_id), Some(&meal_type_id)) =
                    (product_ids.choose(rng), meal_type_ids.choose(rng))
                else {
                    continue;
                };

                let date = now.date() - Duration::days(rng.gen_range(0..=self.window_days));
                let time =
                    Time::MIDNIGHT + Duration::seconds(rng.gen_range(FIRST_MEAL_SECS..LAST_MEAL_SECS));

                entries.push(GeneratedDiaryEntry {
                    user_id,
                    product_id,
                    meal_type_id,
                    date,
                    time,
                    weight_grams: random_measure(rng, 50.0, 500.0),
                    calories: random_measure(rng, 50.0, 800.0),
                    protein: random_measure(rng, 5.0, 50.0),
                });
            }
        }

        entries
    }
}
