//! Integration tests for seeding, inspection and reset.
//!
//! These tests verify end-to-end behaviour against PostgreSQL:
//! - A full seeding run is referentially valid and internally consistent
//! - Meal type seeding is idempotent
//! - A failure part-way through seeding leaves no rows behind
//! - Reset honours its confirmation and restarts identities
//! - The inspector copes with empty and unknown tables
//!
//! To run these tests, you need a PostgreSQL database you are happy to wipe.
//! Every test truncates all StayFit tables, so a dedicated variable is used
//! instead of `DATABASE_URL`:
//!
//! Run with: `STAYFIT_TEST_DATABASE_URL=postgres://... cargo nextest run -p seed-console`

use std::collections::HashSet;
use std::env;
use std::sync::OnceLock;

use rand::SeedableRng;
use rand::rngs::StdRng;
use seed_console::config::SeedConfig;
use seed_console::console::Console;
use seed_console::db::{Inspector, Seeder};
use sqlx::{PgPool, postgres::PgPoolOptions};
use stayfit::Table;
use tokio::sync::{Mutex, MutexGuard};

/// Serializes tests: they all share, and truncate, one database.
async fn database_lock() -> MutexGuard<'static, ()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(())).lock().await
}

/// Get a migrated database pool, skipping tests if no test database is configured.
async fn get_test_pool() -> Option<PgPool> {
    let database_url = match env::var("STAYFIT_TEST_DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            eprintln!("Skipping test: STAYFIT_TEST_DATABASE_URL not set");
            return None;
        }
    };

    let pool = match PgPoolOptions::new()
        .max_connections(2)
        .connect(&database_url)
        .await
    {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("Skipping test: Failed to connect to database: {e}");
            return None;
        }
    };

    stayfit::MIGRATOR
        .run(&pool)
        .await
        .expect("Failed to apply migrations");

    Some(pool)
}

async fn count(pool: &PgPool, sql: &str) -> i64 {
    sqlx::query_scalar(sql)
        .fetch_one(pool)
        .await
        .unwrap_or_else(|e| panic!("query failed: {sql}: {e}"))
}

async fn all_counts(seeder: &Seeder) -> Vec<(Table, i64)> {
    seeder.row_counts().await.expect("Failed to count rows")
}

async fn seed_with_users(pool: &PgPool, users: usize, seed: u64) -> seed_console::db::SeedReport {
    Seeder::new(pool.clone())
        .with_config(SeedConfig::default().with_user_count(users))
        .seed(&mut StdRng::seed_from_u64(seed))
        .await
        .expect("Seeding failed")
}

#[tokio::test]
async fn test_seed_run_is_consistent() {
    let _guard = database_lock().await;
    let Some(pool) = get_test_pool().await else {
        return;
    };
    let seeder = Seeder::new(pool.clone());
    seeder.clear_all().await.expect("Failed to clear tables");

    let report = seed_with_users(&pool, 15, 2024).await;

    // Reported counts match what was committed.
    let counts = all_counts(&seeder).await;
    for (table, reported) in report.rows() {
        let stored = counts.iter().find(|(t, _)| *t == table).unwrap().1;
        assert_eq!(stored as usize, reported, "{table}");
    }
    assert_eq!(report.users, 15);
    assert_eq!(report.meal_types, 4);
    assert_eq!(report.products, 30);
    assert_eq!(report.user_goals, 15);
    assert_eq!(report.user_settings, 15);
    assert_eq!(report.activity_log, 100);
    assert_eq!(count(&pool, "SELECT COUNT(*) FROM password_reset_tokens").await, 0);

    // Users
    assert_eq!(
        count(&pool, "SELECT COUNT(DISTINCT email) FROM users").await,
        15
    );
    let first_role: String =
        sqlx::query_scalar("SELECT role FROM users ORDER BY user_id LIMIT 1")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(first_role, "ADMIN");
    assert_eq!(
        count(&pool, "SELECT COUNT(*) FROM users WHERE role = 'ADMIN'").await,
        1
    );
    assert_eq!(
        count(
            &pool,
            "SELECT COUNT(*) FROM users WHERE target_weight = current_weight"
        )
        .await,
        0
    );

    // Products
    assert_eq!(
        count(&pool, "SELECT COUNT(*) FROM products WHERE is_global").await,
        10
    );
    assert_eq!(
        count(
            &pool,
            "SELECT COUNT(*) FROM products WHERE is_global AND created_by_user_id IS NOT NULL"
        )
        .await,
        0
    );
    assert_eq!(
        count(
            &pool,
            r#"
            SELECT COUNT(*) FROM products p
            WHERE NOT p.is_global
              AND NOT EXISTS (SELECT 1 FROM users u WHERE u.user_id = p.created_by_user_id)
            "#
        )
        .await,
        0
    );

    // Per-user series
    let diary_counts: Vec<i64> =
        sqlx::query_scalar("SELECT COUNT(*) FROM food_diary GROUP BY user_id")
            .fetch_all(&pool)
            .await
            .unwrap();
    assert_eq!(diary_counts.len(), 15);
    assert!(diary_counts.iter().all(|n| (5..=15).contains(n)));

    let weight_counts: Vec<i64> =
        sqlx::query_scalar("SELECT COUNT(*) FROM weight_history GROUP BY user_id")
            .fetch_all(&pool)
            .await
            .unwrap();
    assert_eq!(weight_counts.len(), 15);
    assert!(weight_counts.iter().all(|n| (5..=10).contains(n)));

    // Derived columns
    assert_eq!(
        count(
            &pool,
            r#"
            SELECT COUNT(*) FROM weight_history w
            JOIN users u ON u.user_id = w.user_id
            WHERE ABS(w.bmi - ROUND(w.weight / ((u.height / 100) * (u.height / 100)), 2)) > 0.01
            "#
        )
        .await,
        0
    );
    assert_eq!(
        count(
            &pool,
            r#"
            SELECT COUNT(*) FROM daily_summary
            WHERE ABS(breakfast_calories + lunch_calories + dinner_calories - total_calories) > 0.01
            "#
        )
        .await,
        0
    );

    // Sessions
    let session_users = count(&pool, "SELECT COUNT(DISTINCT user_id) FROM user_sessions").await;
    assert!(session_users <= 20);
    assert_eq!(session_users, 15);
    assert_eq!(
        count(
            &pool,
            r#"
            SELECT COUNT(*) FROM user_sessions
            WHERE access_token_expires_at <> created_at + INTERVAL '24 hours'
            "#
        )
        .await,
        0
    );
}

#[tokio::test]
async fn test_sessions_capped_for_large_runs() {
    let _guard = database_lock().await;
    let Some(pool) = get_test_pool().await else {
        return;
    };
    Seeder::new(pool.clone()).clear_all().await.unwrap();

    seed_with_users(&pool, 25, 7).await;

    assert_eq!(count(&pool, "SELECT COUNT(*) FROM users").await, 25);
    assert_eq!(
        count(&pool, "SELECT COUNT(DISTINCT user_id) FROM user_sessions").await,
        20
    );
}

#[tokio::test]
async fn test_meal_types_are_idempotent() {
    let _guard = database_lock().await;
    let Some(pool) = get_test_pool().await else {
        return;
    };
    Seeder::new(pool.clone()).clear_all().await.unwrap();

    let first = seed_with_users(&pool, 10, 1).await;
    let second = seed_with_users(&pool, 10, 2).await;

    assert_eq!(first.meal_types, 4);
    assert_eq!(second.meal_types, 4);
    assert_eq!(count(&pool, "SELECT COUNT(*) FROM meal_types").await, 4);

    let names: HashSet<String> = sqlx::query_scalar("SELECT name FROM meal_types")
        .fetch_all(&pool)
        .await
        .unwrap()
        .into_iter()
        .collect();
    let expected: HashSet<String> = ["BREAKFAST", "LUNCH", "DINNER", "SNACK"]
        .into_iter()
        .map(String::from)
        .collect();
    assert_eq!(names, expected);

    // Diary entries of both runs reference the same four meal types.
    assert_eq!(
        count(&pool, "SELECT COUNT(DISTINCT meal_type_id) FROM food_diary").await,
        4
    );
    assert_eq!(count(&pool, "SELECT COUNT(*) FROM users").await, 20);
}

#[tokio::test]
async fn test_failed_seed_rolls_back_everything() {
    let _guard = database_lock().await;
    let Some(pool) = get_test_pool().await else {
        return;
    };
    let seeder = Seeder::new(pool.clone()).with_config(SeedConfig::default().with_user_count(12));
    seeder.clear_all().await.unwrap();

    // Make the eighth table in the sequence reject every insert.
    sqlx::query(
        r#"
        CREATE OR REPLACE FUNCTION reject_daily_summary() RETURNS trigger AS $$
        BEGIN
            RAISE EXCEPTION 'daily_summary rejected by test';
        END;
        $$ LANGUAGE plpgsql
        "#,
    )
    .execute(&pool)
    .await
    .unwrap();
    sqlx::query("DROP TRIGGER IF EXISTS reject_daily_summary ON daily_summary")
        .execute(&pool)
        .await
        .unwrap();
    sqlx::query(
        r#"
        CREATE TRIGGER reject_daily_summary BEFORE INSERT ON daily_summary
        FOR EACH ROW EXECUTE FUNCTION reject_daily_summary()
        "#,
    )
    .execute(&pool)
    .await
    .unwrap();

    let result = seeder.seed(&mut StdRng::seed_from_u64(99)).await;

    sqlx::query("DROP TRIGGER reject_daily_summary ON daily_summary")
        .execute(&pool)
        .await
        .unwrap();
    sqlx::query("DROP FUNCTION reject_daily_summary()")
        .execute(&pool)
        .await
        .unwrap();

    let err = result.expect_err("Seeding should fail");
    assert!(err.to_string().contains("daily_summary rejected by test"), "{err}");

    for (table, rows) in all_counts(&seeder).await {
        assert_eq!(rows, 0, "{table} kept rows after rollback");
    }
}

#[tokio::test]
async fn test_console_reset_requires_confirmation() {
    let _guard = database_lock().await;
    let Some(pool) = get_test_pool().await else {
        return;
    };
    let seeder = Seeder::new(pool.clone());
    seeder.clear_all().await.unwrap();
    seed_with_users(&pool, 10, 5).await;
    let before = all_counts(&seeder).await;

    let run_console = |input: &'static str| {
        let pool = pool.clone();
        async move {
            let mut console = Console::new(
                pool,
                SeedConfig::default(),
                StdRng::seed_from_u64(0),
                input.as_bytes(),
                Vec::new(),
            );
            console.run().await.expect("Console failed");
            String::from_utf8(console.into_output()).unwrap()
        }
    };

    let output = run_console("-1\nn\n3\n").await;
    assert!(output.contains("Operation canceled."));
    assert_eq!(all_counts(&seeder).await, before);

    let output = run_console("-1\nY\n3\n").await;
    assert!(output.contains("All tables have been successfully cleared."));
    for (table, rows) in all_counts(&seeder).await {
        assert_eq!(rows, 0, "{table} not cleared");
    }

    // Identities restart.
    seed_with_users(&pool, 10, 6).await;
    assert_eq!(count(&pool, "SELECT MIN(user_id)::int8 FROM users").await, 1);
    assert_eq!(
        count(&pool, "SELECT MIN(meal_type_id)::int8 FROM meal_types").await,
        1
    );
}

#[tokio::test]
async fn test_console_generates_data() {
    let _guard = database_lock().await;
    let Some(pool) = get_test_pool().await else {
        return;
    };
    Seeder::new(pool.clone()).clear_all().await.unwrap();

    let mut console = Console::new(
        pool.clone(),
        SeedConfig::default(),
        StdRng::seed_from_u64(3),
        "2\n3\n".as_bytes(),
        Vec::new(),
    );
    console.run().await.unwrap();
    let output = String::from_utf8(console.into_output()).unwrap();

    assert!(output.contains("Starting test data generation..."));
    assert!(output.contains("-> 4 meal_types rows inserted."));
    assert!(output.contains("Test data generation completed successfully!"));

    let users = count(&pool, "SELECT COUNT(*) FROM users").await;
    assert!((10..20).contains(&users));
}

#[tokio::test]
async fn test_inspector_empty_tables() {
    let _guard = database_lock().await;
    let Some(pool) = get_test_pool().await else {
        return;
    };
    Seeder::new(pool.clone()).clear_all().await.unwrap();

    let mut out = Vec::new();
    Inspector::new(pool.clone())
        .display_all(&mut out)
        .await
        .expect("Inspection failed");
    let output = String::from_utf8(out).unwrap();

    assert_eq!(output.matches("No data found.").count(), Table::ALL.len());
    for table in Table::ALL {
        let header = format!("=== Table: {} ===", table.as_str().to_uppercase());
        assert!(output.contains(&header), "missing {header}");
    }
}

#[tokio::test]
async fn test_inspector_isolates_table_errors() {
    let _guard = database_lock().await;
    let Some(pool) = get_test_pool().await else {
        return;
    };
    let seeder = Seeder::new(pool.clone());
    seeder.clear_all().await.unwrap();
    seed_with_users(&pool, 10, 8).await;

    let mut out = Vec::new();
    Inspector::new(pool.clone())
        .display_tables(&["users", "no_such_table", "meal_types"], &mut out)
        .await
        .expect("Inspection failed");
    let output = String::from_utf8(out).unwrap();

    assert!(output.contains("Error reading table no_such_table"));
    let meal_types = output
        .split("=== Table: MEAL_TYPES ===")
        .nth(1)
        .expect("meal_types section missing");
    assert!(meal_types.contains("BREAKFAST"));
    assert!(meal_types.contains("Displayed records: 4"));
    assert!(output.contains("Displayed records: 10"));
    assert!(output.lines().any(|l| l.starts_with("user_id         | email")));
}

#[tokio::test]
async fn test_inspector_limits_rows() {
    let _guard = database_lock().await;
    let Some(pool) = get_test_pool().await else {
        return;
    };
    Seeder::new(pool.clone()).clear_all().await.unwrap();
    seed_with_users(&pool, 10, 9).await;

    let mut out = Vec::new();
    Inspector::new(pool.clone())
        .display_tables(&["activity_log"], &mut out)
        .await
        .unwrap();
    let output = String::from_utf8(out).unwrap();

    assert!(output.contains("Displayed records: 50"));
    assert!(!output.contains("Displayed records: 100"));
}
