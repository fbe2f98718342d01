//! User generation with demographics.

use std::collections::HashSet;

use fake::{Fake, faker::internet::en::FreeEmailProvider};
use rand::Rng;
use rand::seq::SliceRandom;
use time::{Date, Duration, OffsetDateTime};

use stayfit::models::{ActivityLevel, Gender, Role};

use super::random_measure;

const MALE_FIRST_NAMES: &[&str] = &[
    "Andrii", "Serhii", "Maksym", "Volodymyr", "Yurii", "Ivan", "Roman", "Artem", "Bohdan",
    "Taras", "John", "Michael", "David", "Chris", "James", "Robert", "Daniel", "William", "Thomas",
    "Richard",
];

const FEMALE_FIRST_NAMES: &[&str] = &[
    "Olena", "Maria", "Nataliia", "Tetiana", "Anna", "Iryna", "Kateryna", "Yuliia", "Svitlana",
    "Viktoriia", "Jessica", "Emily", "Sarah", "Jennifer", "Elizabeth", "Linda", "Patricia",
    "Susan", "Ashley", "Mary",
];

const LAST_NAMES: &[&str] = &[
    "Kovalenko", "Shevchenko", "Boiko", "Tkachenko", "Kravchenko", "Melnyk", "Petrenko",
    "Ivanenko", "Kovalchuk", "Ponomarenko", "Smith", "Johnson", "Williams", "Brown", "Jones",
    "Garcia", "Miller", "Davis", "Rodriguez", "Martinez",
];

/// Generated user data ready for database insertion.
#[derive(Debug, Clone)]
pub struct GeneratedUser {
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Date,
    pub gender: Gender,
    pub height: f64,
    pub current_weight: f64,
    pub target_weight: Option<f64>,
    pub activity_level: ActivityLevel,
    pub role: Role,
}

/// Configuration for user generation.
#[derive(Debug, Clone)]
pub struct UserGenConfig {
    /// Probability that a target weight is set.
    pub target_weight_rate: f64,
    /// Height range in centimetres.
    pub height_cm: (f64, f64),
    /// Weight range in kilograms, used for current and target weight.
    pub weight_kg: (f64, f64),
    /// Age range in years.
    pub age_years: (i64, i64),
}

impl Default for UserGenConfig {
    fn default() -> Self {
        Self {
            target_weight_rate: 0.7,
            height_cm: (150.0, 200.0),
            weight_kg: (50.0, 120.0),
            age_years: (13, 60),
        }
    }
}

/// Generates realistic user data for testing.
///
/// Every user shares one password hash, computed by the caller, so a run
/// hashes the placeholder password once instead of once per user.
pub struct UserGenerator {
    config: UserGenConfig,
    password_hash: String,
}

impl UserGenerator {
    /// Plain-text password behind every generated account.
    pub const PLACEHOLDER_PASSWORD: &'static str = "password123";

    /// Creates a new user generator with default configuration.
    pub fn new(password_hash: impl Into<String>) -> Self {
        Self::with_config(UserGenConfig::default(), password_hash)
    }

    /// Creates a generator with custom configuration.
    pub fn with_config(config: UserGenConfig, password_hash: impl Into<String>) -> Self {
        Self {
            config,
            password_hash: password_hash.into(),
        }
    }

    /// Generates a single user. The first user of a run (`index == 0`) is the
    /// administrator.
    ///
    /// `taken` holds the emails already handed out in this run; the new email
    /// is added to it.
    pub fn generate(
        &self,
        index: usize,
        now: OffsetDateTime,
        taken: &mut HashSet<String>,
        rng: &mut impl Rng,
    ) -> GeneratedUser {
        let gender = Gender::ALL[rng.gen_range(0..Gender::ALL.len())];
        let first_names = match gender {
            Gender::Male => MALE_FIRST_NAMES,
            Gender::Female => FEMALE_FIRST_NAMES,
        };
        let first_name = pick_name(first_names, rng);
        let last_name = pick_name(LAST_NAMES, rng);
        let email = self.generate_email(&first_name, &last_name, taken, rng);

        let (min_weight, max_weight) = self.config.weight_kg;
        let current_weight = random_measure(rng, min_weight, max_weight);
        let target_weight = if rng.gen_bool(self.config.target_weight_rate) {
            let target = random_measure(rng, min_weight, max_weight);
            // A goal equal to the current weight is meaningless.
            if target == current_weight {
                Some(current_weight + 1.5)
            } else {
                Some(target)
            }
        } else {
            None
        };

        let (min_height, max_height) = self.config.height_cm;

        GeneratedUser {
            email,
            password_hash: self.password_hash.clone(),
            first_name,
            last_name,
            date_of_birth: self.generate_birth_date(now, rng),
            gender,
            height: random_measure(rng, min_height, max_height),
            current_weight,
            target_weight,
            activity_level: ActivityLevel::ALL[rng.gen_range(0..ActivityLevel::ALL.len())],
            role: if index == 0 { Role::Admin } else { Role::User },
        }
    }

    /// Generates multiple users with distinct emails.
    pub fn generate_batch(
        &self,
        count: usize,
        now: OffsetDateTime,
        rng: &mut impl Rng,
    ) -> Vec<GeneratedUser> {
        let mut taken = HashSet::with_capacity(count);
        (0..count)
            .map(|i| self.generate(i, now, &mut taken, rng))
            .collect()
    }

    /// Builds `first.last12345@provider`, drawing a new suffix until the
    /// address is unused.
    fn generate_email(
        &self,
        first_name: &str,
        last_name: &str,
        taken: &mut HashSet<String>,
        rng: &mut impl Rng,
    ) -> String {
        let local = format!("{first_name}.{last_name}").to_lowercase();
        let domain: String = FreeEmailProvider().fake_with_rng(rng);

        loop {
            let suffix: u32 = rng.gen_range(0..100_000);
            let email = format!("{local}{suffix:05}@{domain}");
            if taken.insert(email.clone()) {
                return email;
            }
        }
    }

    fn generate_birth_date(&self, now: OffsetDateTime, rng: &mut impl Rng) -> Date {
        let (min_age, max_age) = self.config.age_years;
        let today = now.date();
        let youngest = today - Duration::days(min_age * 365);
        let oldest = today - Duration::days(max_age * 365);
        let span = (youngest - oldest).whole_days();

        oldest + Duration::days(rng.gen_range(0..=span))
    }
}

fn pick_name(pool: &[&str], rng: &mut impl Rng) -> String {
    pool.choose(rng).copied().unwrap_or_default().to_string()
}
