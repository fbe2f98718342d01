//! Database seeding utilities.

use rand::Rng;
use sqlx::{PgConnection, PgPool};
use thiserror::Error;
use time::OffsetDateTime;
use tracing::{info, warn};

use stayfit::Table;
use stayfit::auth::hash_password;
use stayfit::errors::AuthError;
use stayfit::models::MealKind;

use crate::config::SeedConfig;
use crate::generators::{
    ActivityLogGenerator, CatalogGenerator, DiaryGenerator, GeneratedDailySummary,
    GeneratedDiaryEntry, GeneratedGoal, GeneratedLogEntry, GeneratedProduct, GeneratedSession,
    GeneratedSettings, GeneratedUser, GeneratedWeightEntry, ProfileGenerator, SeededUser,
    SessionGenerator, TrackingGenerator, UserGenerator,
};

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error(transparent)]
    Auth(#[from] AuthError),
}

/// Rows inserted per table by one seeding run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub users: usize,
    pub meal_types: usize,
    pub products: usize,
    pub user_goals: usize,
    pub user_settings: usize,
    pub food_diary: usize,
    pub weight_history: usize,
    pub daily_summary: usize,
    pub user_sessions: usize,
    pub activity_log: usize,
}

impl SeedReport {
    /// Counts in insertion order, labelled by table.
    pub fn rows(&self) -> [(Table, usize); 10] {
        [
            (Table::Users, self.users),
            (Table::MealTypes, self.meal_types),
            (Table::Products, self.products),
            (Table::UserGoals, self.user_goals),
            (Table::UserSettings, self.user_settings),
            (Table::FoodDiary, self.food_diary),
            (Table::WeightHistory, self.weight_history),
            (Table::DailySummary, self.daily_summary),
            (Table::UserSessions, self.user_sessions),
            (Table::ActivityLog, self.activity_log),
        ]
    }

    pub fn total(&self) -> usize {
        self.rows().iter().map(|(_, n)| n).sum()
    }
}

/// Database seeder for inserting generated test data.
pub struct Seeder {
    pool: PgPool,
    config: SeedConfig,
}

impl Seeder {
    /// Creates a new seeder with the given database pool.
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            config: SeedConfig::default(),
        }
    }

    /// Sets the seeding configuration.
    pub fn with_config(mut self, config: SeedConfig) -> Self {
        self.config = config;
        self
    }

    /// Generates and inserts a complete dataset in one transaction.
    pub async fn seed(&self, rng: &mut impl Rng) -> Result<SeedReport, SeedError> {
        self.seed_at(OffsetDateTime::now_utc(), rng).await
    }

    /// Like [`Seeder::seed`], with dates relative to `now`.
    ///
    /// Either every table is populated or, on the first failed statement, the
    /// transaction is rolled back and nothing is kept.
    pub async fn seed_at(
        &self,
        now: OffsetDateTime,
        rng: &mut impl Rng,
    ) -> Result<SeedReport, SeedError> {
        let password_hash = hash_password(UserGenerator::PLACEHOLDER_PASSWORD)?;

        let mut tx = self.pool.begin().await?;
        match self.seed_in(&mut tx, password_hash, now, rng).await {
            Ok(report) => {
                tx.commit().await?;
                info!("Seeded {} rows across {} tables", report.total(), report.rows().len());
                Ok(report)
            }
            Err(e) => {
                warn!("Seeding failed, rolling back: {e}");
                if let Err(rollback_err) = tx.rollback().await {
                    warn!("Rollback failed: {rollback_err}");
                }
                Err(e)
            }
        }
    }

    /// Runs every generator in foreign-key order, feeding the identifiers each
    /// insert returns into the generators that depend on them.
    async fn seed_in(
        &self,
        conn: &mut PgConnection,
        password_hash: String,
        now: OffsetDateTime,
        rng: &mut impl Rng,
    ) -> Result<SeedReport, SeedError> {
        let config = &self.config;
        let mut report = SeedReport::default();

        let user_count = config.resolve_user_count(rng);
        info!("Seeding {} users...", user_count);
        let users = UserGenerator::new(password_hash).generate_batch(user_count, now, rng);
        let seeded_users = insert_users(conn, &users).await?;
        let user_ids: Vec<i32> = seeded_users.iter().map(|u| u.id).collect();
        report.users = user_ids.len();

        info!("Seeding meal types...");
        let catalog = CatalogGenerator::new(config.custom_products);
        let meal_type_ids = upsert_meal_types(conn, catalog.meal_types()).await?;
        report.meal_types = meal_type_ids.len();

        info!("Seeding products...");
        let products = catalog.products(&user_ids, rng);
        let product_ids = insert_products(conn, &products).await?;
        report.products = product_ids.len();

        info!("Seeding user goals...");
        let profile_gen = ProfileGenerator::new();
        let goals = profile_gen.goals(&user_ids, rng);
        report.user_goals = insert_goals(conn, &goals).await?;

        info!("Seeding user settings...");
        let settings = profile_gen.settings(&user_ids, rng);
        report.user_settings = insert_settings(conn, &settings).await?;

        info!("Seeding food diary entries...");
        let diary = DiaryGenerator::new(config.diary_entries_per_user, config.diary_window_days)
            .generate(&user_ids, &product_ids, &meal_type_ids, now, rng);
        report.food_diary = insert_diary_entries(conn, &diary).await?;

        let tracking =
            TrackingGenerator::new(config.weight_entries_per_user, config.summaries_per_user);

        info!("Seeding weight history...");
        let weights = tracking.weight_history(&seeded_users, now.date(), rng);
        report.weight_history = insert_weight_history(conn, &weights).await?;

        info!("Seeding daily summaries...");
        let summaries = tracking.daily_summaries(&user_ids, now.date(), rng);
        report.daily_summary = insert_daily_summaries(conn, &summaries).await?;

        info!("Seeding user sessions...");
        let sessions = SessionGenerator::new(config.session_user_limit, config.sessions_per_user)
            .generate(&user_ids, now, rng);
        report.user_sessions = insert_sessions(conn, &sessions).await?;

        info!("Seeding activity log...");
        let log = ActivityLogGenerator::new(config.activity_log_entries, config.anonymous_log_rate)
            .generate(&user_ids, rng);
        report.activity_log = insert_log_entries(conn, &log).await?;

        Ok(report)
    }

    /// Clears all data and restarts every identity sequence.
    ///
    /// **WARNING**: This deletes all rows from every table. Confirmation is the
    /// caller's job.
    pub async fn clear_all(&self) -> Result<(), SeedError> {
        info!("Clearing all tables...");

        // One statement so foreign keys between the tables never block it.
        let statement = format!("TRUNCATE {} RESTART IDENTITY CASCADE", Table::all_names());
        let mut conn = self.pool.acquire().await?;
        sqlx::query(&statement).execute(&mut *conn).await?;

        info!("All data cleared");
        Ok(())
    }

    /// Current row count of every table.
    pub async fn row_counts(&self) -> Result<Vec<(Table, i64)>, SeedError> {
        let mut conn = self.pool.acquire().await?;
        let mut counts = Vec::with_capacity(Table::ALL.len());

        for table in Table::ALL {
            let statement = format!("SELECT COUNT(*) FROM {table}");
            let count: i64 = sqlx::query_scalar(&statement)
                .fetch_one(&mut *conn)
                .await?;
            counts.push((table, count));
        }

        Ok(counts)
    }

    /// Returns a reference to the pool for advanced usage.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

async fn insert_users(
    conn: &mut PgConnection,
    users: &[GeneratedUser],
) -> Result<Vec<SeededUser>, SeedError> {
    let mut seeded = Vec::with_capacity(users.len());

    for user in users {
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO users (
                email, password_hash, first_name, last_name, date_of_birth, gender,
                height, current_weight, target_weight, activity_level, role
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING user_id
            "#,
        )
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(user.date_of_birth)
        .bind(user.gender.as_str())
        .bind(user.height)
        .bind(user.current_weight)
        .bind(user.target_weight)
        .bind(user.activity_level.as_str())
        .bind(user.role.as_str())
        .fetch_one(&mut *conn)
        .await?;

        seeded.push(SeededUser {
            id,
            height: user.height,
        });
    }

    Ok(seeded)
}

/// Inserts each meal type unless it already exists and returns its id either
/// way, so repeated runs keep exactly one row per meal.
async fn upsert_meal_types(
    conn: &mut PgConnection,
    kinds: &[MealKind],
) -> Result<Vec<i32>, SeedError> {
    let mut ids = Vec::with_capacity(kinds.len());

    for kind in kinds {
        let id: i32 = sqlx::query_scalar(
            r#"
            WITH inserted AS (
                INSERT INTO meal_types (name, display_order)
                VALUES ($1, $2)
                ON CONFLICT (name) DO NOTHING
                RETURNING meal_type_id
            )
            SELECT meal_type_id FROM inserted
            UNION ALL
            SELECT meal_type_id FROM meal_types WHERE name = $1
            LIMIT 1
            "#,
        )
        .bind(kind.as_str())
        .bind(kind.display_order())
        .fetch_one(&mut *conn)
        .await?;

        ids.push(id);
    }

    Ok(ids)
}

async fn insert_products(
    conn: &mut PgConnection,
    products: &[GeneratedProduct],
) -> Result<Vec<i32>, SeedError> {
    let mut ids = Vec::with_capacity(products.len());

    for product in products {
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO products (
                name, category, calories_per_100g, protein_per_100g, fat_per_100g,
                carbs_per_100g, is_global, created_by_user_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING product_id
            "#,
        )
        .bind(&product.name)
        .bind(product.category.as_str())
        .bind(product.calories_per_100g)
        .bind(product.protein_per_100g)
        .bind(product.fat_per_100g)
        .bind(product.carbs_per_100g)
        .bind(product.is_global())
        .bind(product.created_by)
        .fetch_one(&mut *conn)
        .await?;

        ids.push(id);
    }

    Ok(ids)
}

async fn insert_goals(conn: &mut PgConnection, goals: &[GeneratedGoal]) -> Result<usize, SeedError> {
    for goal in goals {
        sqlx::query(
            r#"
            INSERT INTO user_goals (
                user_id, daily_calories, goal_type, protein_grams, fat_grams, carbs_grams, is_active
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(goal.user_id)
        .bind(goal.daily_calories)
        .bind(goal.goal_type.as_str())
        .bind(goal.protein_grams)
        .bind(goal.fat_grams)
        .bind(goal.carbs_grams)
        .bind(goal.is_active)
        .execute(&mut *conn)
        .await?;
    }

    Ok(goals.len())
}

async fn insert_settings(
    conn: &mut PgConnection,
    settings: &[GeneratedSettings],
) -> Result<usize, SeedError> {
    for s in settings {
        sqlx::query(
            r#"
            INSERT INTO user_settings (
                user_id, language, theme, reminder_food_enabled, weekly_reports_enabled
            )
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(s.user_id)
        .bind(s.language.as_str())
        .bind(s.theme.as_str())
        .bind(s.reminder_food_enabled)
        .bind(s.weekly_reports_enabled)
        .execute(&mut *conn)
        .await?;
    }

    Ok(settings.len())
}

async fn insert_diary_entries(
    conn: &mut PgConnection,
    entries: &[GeneratedDiaryEntry],
) -> Result<usize, SeedError> {
    for entry in entries {
        sqlx::query(
            r#"
            INSERT INTO food_diary (
                user_id, product_id, meal_type_id, date, time, weight_grams, calories, protein
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(entry.user_id)
        .bind(entry.product_id)
        .bind(entry.meal_type_id)
        .bind(entry.date)
        .bind(entry.time)
        .bind(entry.weight_grams)
        .bind(entry.calories)
        .bind(entry.protein)
        .execute(&mut *conn)
        .await?;
    }

    Ok(entries.len())
}

/// Returns the number of rows actually inserted; a day already recorded for a
/// user is skipped.
async fn insert_weight_history(
    conn: &mut PgConnection,
    entries: &[GeneratedWeightEntry],
) -> Result<usize, SeedError> {
    let mut inserted = 0;

    for entry in entries {
        let result = sqlx::query(
            r#"
            INSERT INTO weight_history (user_id, date, weight, bmi)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id, date) DO NOTHING
            "#,
        )
        .bind(entry.user_id)
        .bind(entry.date)
        .bind(entry.weight)
        .bind(entry.bmi)
        .execute(&mut *conn)
        .await?;

        inserted += result.rows_affected() as usize;
    }

    Ok(inserted)
}

async fn insert_daily_summaries(
    conn: &mut PgConnection,
    summaries: &[GeneratedDailySummary],
) -> Result<usize, SeedError> {
    let mut inserted = 0;

    for s in summaries {
        let result = sqlx::query(
            r#"
            INSERT INTO daily_summary (
                user_id, date, total_calories, total_protein, goal_achieved,
                breakfast_calories, lunch_calories, dinner_calories
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (user_id, date) DO NOTHING
            "#,
        )
        .bind(s.user_id)
        .bind(s.date)
        .bind(s.total_calories)
        .bind(s.total_protein)
        .bind(s.goal_achieved)
        .bind(s.breakfast_calories)
        .bind(s.lunch_calories)
        .bind(s.dinner_calories)
        .execute(&mut *conn)
        .await?;

        inserted += result.rows_affected() as usize;
    }

    Ok(inserted)
}

async fn insert_sessions(
    conn: &mut PgConnection,
    sessions: &[GeneratedSession],
) -> Result<usize, SeedError> {
    for session in sessions {
        sqlx::query(
            r#"
            INSERT INTO user_sessions (
                user_id, access_token_hash, refresh_token_hash, device_info, is_active,
                created_at, access_token_expires_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(session.user_id)
        .bind(&session.access_token_hash)
        .bind(&session.refresh_token_hash)
        .bind(&session.device_info)
        .bind(session.is_active)
        .bind(session.created_at)
        .bind(session.access_token_expires_at)
        .execute(&mut *conn)
        .await?;
    }

    Ok(sessions.len())
}

async fn insert_log_entries(
    conn: &mut PgConnection,
    entries: &[GeneratedLogEntry],
) -> Result<usize, SeedError> {
    for entry in entries {
        sqlx::query(
            r#"
            INSERT INTO activity_log (user_id, action_type, description, status)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(entry.user_id)
        .bind(entry.action_type.as_str())
        .bind(&entry.description)
        .bind(entry.status.as_str())
        .execute(&mut *conn)
        .await?;
    }

    Ok(entries.len())
}
