//! Nutrition goals and app settings, one of each per user.

use rand::Rng;

use stayfit::models::{GoalType, Language, Theme};

use super::random_measure;

#[derive(Debug, Clone)]
pub struct GeneratedGoal {
    pub user_id: i32,
    pub daily_calories: f64,
    pub goal_type: GoalType,
    pub protein_grams: f64,
    pub fat_grams: f64,
    pub carbs_grams: f64,
    pub is_active: bool,
}

#[derive(Debug, Clone)]
pub struct GeneratedSettings {
    pub user_id: i32,
    pub language: Language,
    pub theme: Theme,
    pub reminder_food_enabled: bool,
    pub weekly_reports_enabled: bool,
}

/// Generates per-user goals and settings.
#[derive(Debug, Default)]
pub struct ProfileGenerator;

impl ProfileGenerator {
    pub fn new() -> Self {
        Self
    }

    /// One active goal per user.
    pub fn goals(&self, user_ids: &[i32], rng: &mut impl Rng) -> Vec<GeneratedGoal> {
        user_ids
            .iter()
            .map(|&user_id| GeneratedGoal {
                user_id,
                daily_calories: random_measure(rng, 1500.0, 3000.0),
                goal_type: GoalType::ALL[rng.gen_range(0..GoalType::ALL.len())],
                protein_grams: random_measure(rng, 80.0, 200.0),
                fat_grams: random_measure(rng, 40.0, 100.0),
                carbs_grams: random_measure(rng, 150.0, 400.0),
                is_active: true,
            })
            .collect()
    }

    /// One settings row per user.
    pub fn settings(&self, user_ids: &[i32], rng: &mut impl Rng) -> Vec<GeneratedSettings> {
        user_ids
            .iter()
            .map(|&user_id| GeneratedSettings {
                user_id,
                language: Language::ALL[rng.gen_range(0..Language::ALL.len())],
                theme: Theme::ALL[rng.gen_range(0..Theme::ALL.len())],
                reminder_food_enabled: rng.gen_bool(0.5),
                weekly_reports_enabled: rng.gen_bool(0.8),
            })
            .collect()
    }
}
