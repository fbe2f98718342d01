//! Login sessions.

use fake::{Fake, faker::internet::en::UserAgent};
use rand::Rng;
use time::{Duration, OffsetDateTime};
use uuid::{Builder, Uuid};

use stayfit::auth::hash_token;

use super::{random_count, random_instant};

/// Access tokens expire this long after the session starts.
pub const ACCESS_TOKEN_TTL: Duration = Duration::hours(24);

#[derive(Debug, Clone)]
pub struct GeneratedSession {
    pub user_id: i32,
    pub access_token_hash: String,
    pub refresh_token_hash: String,
    pub device_info: String,
    pub is_active: bool,
    pub created_at: OffsetDateTime,
    pub access_token_expires_at: OffsetDateTime,
}

/// Generates sessions for the leading users of a run.
pub struct SessionGenerator {
    user_limit: usize,
    sessions_per_user: (usize, usize),
}

impl SessionGenerator {
    pub fn new(user_limit: usize, sessions_per_user: (usize, usize)) -> Self {
        Self {
            user_limit,
            sessions_per_user,
        }
    }

    /// Sessions started within the week before `now`, for the first
    /// `user_limit` users only.
    pub fn generate(
        &self,
        user_ids: &[i32],
        now: OffsetDateTime,
        rng: &mut impl Rng,
    ) -> Vec<GeneratedSession> {
        let mut sessions = Vec::new();

        for &user_id in user_ids.iter().take(self.user_limit) {
            let count = random_count(rng, self.sessions_per_user);
            for _ in 0..count {
                let created_at = random_instant(rng, now - Duration::days(7), now);

                sessions.push(GeneratedSession {
                    user_id,
                    access_token_hash: hash_token(&random_token(rng).to_string()),
                    refresh_token_hash: hash_token(&random_token(rng).to_string()),
                    device_info: UserAgent().fake_with_rng(rng),
                    is_active: rng.gen_bool(0.7),
                    created_at,
                    access_token_expires_at: created_at + ACCESS_TOKEN_TTL,
                });
            }
        }

        sessions
    }
}

/// A v4 UUID drawn from `rng` so seeded runs are reproducible.
fn random_token(rng: &mut impl Rng) -> Uuid {
    Builder::from_random_bytes(rng.r#gen()).into_uuid()
}
