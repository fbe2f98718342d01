//! Interactive text menu over the inspector, the seeder and the reset.

use std::io::Write;

use rand::rngs::StdRng;
use sqlx::PgPool;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::error;

use crate::config::SeedConfig;
use crate::db::{InspectError, Inspector, SeedError, Seeder};

/// Failure of the console streams themselves; ends the session.
#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("Console I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure of one menu action; reported and the menu continues.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error(transparent)]
    Seed(#[from] SeedError),
    #[error(transparent)]
    Inspect(#[from] InspectError),
    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    DisplayAll,
    GenerateData,
    Exit,
    /// Not listed in the menu.
    ClearAll,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(MenuChoice::DisplayAll),
            "2" => Some(MenuChoice::GenerateData),
            "3" => Some(MenuChoice::Exit),
            "-1" => Some(MenuChoice::ClearAll),
            _ => None,
        }
    }
}

/// Whether a reset confirmation answer is an explicit yes.
pub fn is_confirmed(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("y")
}

const MENU: &str = "\
================================
          Main Menu
================================
1. Display data from all tables
2. Generate test data
3. Exit
";

/// The interactive session. Input and output are injected so the menu can be
/// driven from tests.
pub struct Console<R, W> {
    pool: PgPool,
    seed_config: SeedConfig,
    rng: StdRng,
    input: R,
    output: W,
}

impl<R, W> Console<R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub fn new(pool: PgPool, seed_config: SeedConfig, rng: StdRng, input: R, output: W) -> Self {
        Self {
            pool,
            seed_config,
            rng,
            input,
            output,
        }
    }

    /// Runs the menu until the user exits or the input ends.
    pub async fn run(&mut self) -> Result<(), ConsoleError> {
        writeln!(self.output, "=== Fitness Database Console App ===\n")?;

        loop {
            write!(self.output, "{MENU}\nYour choice: ")?;
            self.output.flush()?;

            let Some(line) = self.read_line().await? else {
                writeln!(self.output, "\nInput closed, exiting.")?;
                return Ok(());
            };

            let outcome = match MenuChoice::parse(&line) {
                Some(MenuChoice::Exit) => {
                    writeln!(self.output, "Exiting application...")?;
                    return Ok(());
                }
                Some(MenuChoice::DisplayAll) => self.display_all().await,
                Some(MenuChoice::GenerateData) => self.generate_data().await,
                Some(MenuChoice::ClearAll) => {
                    write!(
                        self.output,
                        "Are you sure you want to delete ALL data from the database? \
                         This cannot be undone. (y/n): "
                    )?;
                    self.output.flush()?;
                    let answer = self.read_line().await?.unwrap_or_default();

                    if is_confirmed(&answer) {
                        self.clear_all().await
                    } else {
                        writeln!(self.output, "Operation canceled.")?;
                        Ok(())
                    }
                }
                None => {
                    writeln!(self.output, "Invalid choice. Please try again.\n")?;
                    Ok(())
                }
            };

            if let Err(e) = outcome {
                error!("Menu action failed: {e}");
                writeln!(self.output, "\nAn error occurred: {e}\n")?;
            }
            writeln!(self.output)?;
        }
    }

    /// Consumes the console, returning the output sink.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Next input line without its terminator; `None` at end of input.
    async fn read_line(&mut self) -> Result<Option<String>, ConsoleError> {
        let mut line = String::new();
        if self.input.read_line(&mut line).await? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    async fn display_all(&mut self) -> Result<(), OperationError> {
        Inspector::new(self.pool.clone())
            .display_all(&mut self.output)
            .await?;
        Ok(())
    }

    async fn generate_data(&mut self) -> Result<(), OperationError> {
        writeln!(self.output, "\nStarting test data generation...\n")?;

        let seeder = Seeder::new(self.pool.clone()).with_config(self.seed_config.clone());
        let report = match seeder.seed(&mut self.rng).await {
            Ok(report) => report,
            Err(e) => {
                writeln!(self.output, "\nError during data generation: {e}")?;
                writeln!(self.output, "Transaction rolled back.")?;
                return Err(e.into());
            }
        };

        for (table, count) in report.rows() {
            writeln!(self.output, "-> {count} {} rows inserted.", table.as_str())?;
        }
        writeln!(self.output, "\nTest data generation completed successfully!")?;
        Ok(())
    }

    async fn clear_all(&mut self) -> Result<(), OperationError> {
        writeln!(self.output, "\nClearing all tables...")?;
        Seeder::new(self.pool.clone()).clear_all().await?;
        writeln!(self.output, "All tables have been successfully cleared.")?;
        Ok(())
    }
}
