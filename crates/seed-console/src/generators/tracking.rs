//! Weight history and daily nutrition summaries.
//!
//! Both are per-user series over consecutive days ending yesterday. Derived
//! columns (BMI, the per-meal calorie split) are computed from the generated
//! base values so the rows stay internally consistent.

use rand::Rng;
use rand_distr::StandardNormal;
use time::{Date, Duration};

use super::{SeededUser, random_count, random_measure, round2};

/// Day-to-day weight fluctuation: standard deviation and hard bound, in kg.
const WEIGHT_JITTER_STD: f64 = 0.8;
const WEIGHT_JITTER_MAX: f64 = 2.0;

/// Breakfast and lunch shares of the daily total; dinner takes the rest (40%).
const BREAKFAST_SHARE: f64 = 0.25;
const LUNCH_SHARE: f64 = 0.35;

#[derive(Debug, Clone)]
pub struct GeneratedWeightEntry {
    pub user_id: i32,
    pub date: Date,
    pub weight: f64,
    pub bmi: f64,
}

#[derive(Debug, Clone)]
pub struct GeneratedDailySummary {
    pub user_id: i32,
    pub date: Date,
    pub total_calories: f64,
    pub total_protein: f64,
    pub goal_achieved: bool,
    pub breakfast_calories: f64,
    pub lunch_calories: f64,
    pub dinner_calories: f64,
}

/// Body mass index from a weight in kg and a height in cm, to two decimals.
pub fn bmi(weight_kg: f64, height_cm: f64) -> f64 {
    let height_m = height_cm / 100.0;
    round2(weight_kg / (height_m * height_m))
}

/// Splits a daily calorie total into breakfast, lunch and dinner.
///
/// Dinner absorbs the rounding remainder, so the three parts always add up to
/// the total exactly at two decimals.
pub fn meal_split(total_calories: f64) -> (f64, f64, f64) {
    let breakfast = round2(total_calories * BREAKFAST_SHARE);
    let lunch = round2(total_calories * LUNCH_SHARE);
    let dinner = round2(total_calories - breakfast - lunch);
    (breakfast, lunch, dinner)
}

/// The `count` consecutive days before `today`, oldest first.
fn trailing_days(today: Date, count: usize) -> impl Iterator<Item = Date> {
    (0..count).map(move |i| today - Duration::days((count - i) as i64))
}

/// Generates weight history and daily summaries.
pub struct TrackingGenerator {
    weight_entries_per_user: (usize, usize),
    summaries_per_user: (usize, usize),
}

impl TrackingGenerator {
    pub fn new(weight_entries_per_user: (usize, usize), summaries_per_user: (usize, usize)) -> Self {
        Self {
            weight_entries_per_user,
            summaries_per_user,
        }
    }

    /// Weight series around a per-user base weight. BMI uses the user's own
    /// recorded height.
    pub fn weight_history(
        &self,
        users: &[SeededUser],
        today: Date,
        rng: &mut impl Rng,
    ) -> Vec<GeneratedWeightEntry> {
        let mut entries = Vec::new();

        for user in users {
            let count = random_count(rng, self.weight_entries_per_user);
            let base_weight: f64 = rng.gen_range(55.0..110.0);

            for date in trailing_days(today, count) {
                let z: f64 = rng.sample(StandardNormal);
                let jitter = (z * WEIGHT_JITTER_STD).clamp(-WEIGHT_JITTER_MAX, WEIGHT_JITTER_MAX);
                let weight = round2(base_weight + jitter);

                entries.push(GeneratedWeightEntry {
                    user_id: user.id,
                    date,
                    weight,
                    bmi: bmi(weight, user.height),
                });
            }
        }

        entries
    }

    /// Daily nutrition totals with the calorie split per meal.
    pub fn daily_summaries(
        &self,
        user_ids: &[i32],
        today: Date,
        rng: &mut impl Rng,
    ) -> Vec<GeneratedDailySummary> {
        let mut summaries = Vec::new();

        for &user_id in user_ids {
            let count = random_count(rng, self.summaries_per_user);

            for date in trailing_days(today, count) {
                let total_calories = random_measure(rng, 1200.0, 2800.0);
                let (breakfast_calories, lunch_calories, dinner_calories) =
                    meal_split(total_calories);

                summaries.push(GeneratedDailySummary {
                    user_id,
                    date,
                    total_calories,
                    total_protein: random_measure(rng, 60.0, 180.0),
                    goal_achieved: rng.gen_bool(0.6),
                    breakfast_calories,
                    lunch_calories,
                    dinner_calories,
                });
            }
        }

        summaries
    }
}
