//! Test data seeding and inspection for the StayFit fitness-diary database.
//!
//! This crate fills the eleven StayFit tables with plausible, referentially
//! valid random data for manual testing, prints table contents as text, and
//! wipes everything on request. All three are reachable from an interactive
//! console (`stayfit-console`).
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use seed_console::prelude::*;
//! use rand::{SeedableRng, rngs::StdRng};
//!
//! let pool = DbConfig::default().pool();
//! let mut rng = StdRng::seed_from_u64(42);
//!
//! let report = Seeder::new(pool.clone())
//!     .with_config(SeedConfig::default().with_user_count(15))
//!     .seed(&mut rng)
//!     .await?;
//!
//! Inspector::new(pool).display_all(&mut std::io::stdout()).await?;
//! ```

pub mod config;
pub mod console;
pub mod db;
pub mod generators;

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::config::{DbConfig, SeedConfig};
    pub use crate::console::{Console, MenuChoice};
    pub use crate::db::{Inspector, SeedReport, Seeder};
    pub use crate::generators::{
        ActivityLogGenerator, CatalogGenerator, DiaryGenerator, ProfileGenerator,
        SessionGenerator, TrackingGenerator, UserGenerator,
    };
    pub use stayfit::Table;
}
