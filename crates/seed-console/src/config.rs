//! Configuration types for the console and the seeder.

use clap::Args;
use rand::Rng;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};

/// Database connection settings, resolved once at start-up.
#[derive(Debug, Clone, Args, Serialize, Deserialize)]
pub struct DbConfig {
    /// Database server host.
    #[arg(long = "db-host", env = "STAYFIT_DB_HOST", default_value = "localhost")]
    pub host: String,

    /// Database server port.
    #[arg(long = "db-port", env = "STAYFIT_DB_PORT", default_value_t = 5432)]
    pub port: u16,

    /// Database name.
    #[arg(long = "db-name", env = "STAYFIT_DB_NAME", default_value = "StayFit")]
    pub database: String,

    /// Login role.
    #[arg(long = "db-user", env = "STAYFIT_DB_USER", default_value = "postgres")]
    pub user: String,

    /// Login password.
    #[arg(
        long = "db-password",
        env = "STAYFIT_DB_PASSWORD",
        default_value = "",
        hide_env_values = true
    )]
    pub password: String,

    /// Maximum number of pooled connections.
    #[arg(long = "db-pool-size", env = "STAYFIT_DB_POOL_SIZE", default_value_t = 5)]
    pub pool_size: u32,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            database: "StayFit".to_string(),
            user: "postgres".to_string(),
            password: String::new(),
            pool_size: 5,
        }
    }
}

impl DbConfig {
    pub fn connect_options(&self) -> PgConnectOptions {
        let options = PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .database(&self.database)
            .username(&self.user);

        if self.password.is_empty() {
            options
        } else {
            options.password(&self.password)
        }
    }

    /// Builds a pool that connects on first use, so an unreachable server is
    /// reported by the operation that needs it rather than at start-up.
    pub fn pool(&self) -> PgPool {
        PgPoolOptions::new()
            .max_connections(self.pool_size)
            .connect_lazy_with(self.connect_options())
    }

    /// `user@host:port/database`, safe to log.
    pub fn display_target(&self) -> String {
        format!(
            "{}@{}:{}/{}",
            self.user, self.host, self.port, self.database
        )
    }
}

/// Configuration for a seeding run. Ranges are inclusive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedConfig {
    /// Fixed number of users; when unset a count is drawn from `user_count_range`.
    pub user_count: Option<usize>,

    pub user_count_range: (usize, usize),

    /// Number of non-global products attributed to random users.
    pub custom_products: usize,

    pub diary_entries_per_user: (usize, usize),

    /// Diary entries are dated within this many days before today.
    pub diary_window_days: i64,

    pub weight_entries_per_user: (usize, usize),

    pub summaries_per_user: (usize, usize),

    /// Only the first `session_user_limit` users get sessions.
    pub session_user_limit: usize,

    pub sessions_per_user: (usize, usize),

    pub activity_log_entries: usize,

    /// Probability that an activity log entry has no user.
    pub anonymous_log_rate: f64,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            user_count: None,
            user_count_range: (10, 19),
            custom_products: 20,
            diary_entries_per_user: (5, 15),
            diary_window_days: 30,
            weight_entries_per_user: (5, 10),
            summaries_per_user: (5, 10),
            session_user_limit: 20,
            sessions_per_user: (1, 3),
            activity_log_entries: 100,
            anonymous_log_rate: 0.1,
        }
    }
}

impl SeedConfig {
    /// Pins the number of generated users.
    pub fn with_user_count(mut self, count: usize) -> Self {
        self.user_count = Some(count);
        self
    }

    pub fn resolve_user_count(&self, rng: &mut impl Rng) -> usize {
        self.user_count.unwrap_or_else(|| {
            let (min, max) = self.user_count_range;
            rng.gen_range(min..=max)
        })
    }
}
