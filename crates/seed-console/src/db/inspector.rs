//! Text rendering of table contents.

use std::io::Write;

use sqlx::{PgConnection, PgPool, Row};
use thiserror::Error;
use tracing::warn;

use stayfit::Table;

/// Maximum number of rows shown per table.
pub const ROW_LIMIT: i64 = 50;

/// Width every header and cell is padded or cut to.
pub const COLUMN_WIDTH: usize = 15;

/// Longer values keep this many characters followed by `...`.
const ELLIPSIS_KEEP: usize = 12;

#[derive(Debug, Error)]
pub enum InspectError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Table {0} does not exist")]
    TableNotFound(String),
    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),
}

/// Rows of one table with every value rendered as text by the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    pub table: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl TableView {
    /// Writes the columnar rendering: a header, a dash rule, one line per row
    /// and the record count. An empty table prints `No data found.`.
    pub fn render(&self, out: &mut impl Write) -> std::io::Result<()> {
        if self.rows.is_empty() {
            writeln!(out, "No data found.\n")?;
            return Ok(());
        }

        let header: Vec<String> = self.columns.iter().map(|c| fit(c, COLUMN_WIDTH)).collect();
        writeln!(out, "{}", header.join(" | "))?;
        writeln!(out, "{}", "-".repeat(self.columns.len() * (COLUMN_WIDTH + 3)))?;

        for row in &self.rows {
            let cells: Vec<String> = row.iter().map(|v| format_cell(v.as_deref())).collect();
            writeln!(out, "{}", cells.join(" | "))?;
        }

        writeln!(out, "\nDisplayed records: {}\n", self.rows.len())
    }
}

/// Formats one value for display: `NULL` for SQL null, long values shortened
/// to 12 characters plus `...`, then padded to the column width.
pub fn format_cell(value: Option<&str>) -> String {
    let value = value.unwrap_or("NULL");
    let shown = if value.chars().count() > COLUMN_WIDTH {
        let kept: String = value.chars().take(ELLIPSIS_KEEP).collect();
        format!("{kept}...")
    } else {
        value.to_string()
    };
    format!("{shown:<width$}", width = COLUMN_WIDTH)
}

/// Pads with spaces or truncates to exactly `width` characters.
fn fit(text: &str, width: usize) -> String {
    let truncated: String = text.chars().take(width).collect();
    format!("{truncated:<width$}")
}

/// Quotes an identifier for interpolation into SQL.
fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// Reads tables and prints them.
pub struct Inspector {
    pool: PgPool,
}

impl Inspector {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Prints every application table.
    pub async fn display_all(&self, out: &mut impl Write) -> Result<(), InspectError> {
        let tables: Vec<&str> = Table::ALL.iter().map(Table::as_str).collect();
        self.display_tables(&tables, out).await
    }

    /// Prints the given tables over one connection. A failure reading one
    /// table is reported in its place and the remaining tables still print.
    pub async fn display_tables(
        &self,
        tables: &[&str],
        out: &mut impl Write,
    ) -> Result<(), InspectError> {
        let mut conn = self.pool.acquire().await?;

        for &table in tables {
            writeln!(out, "\n=== Table: {} ===", table.to_uppercase())?;

            match fetch_table(&mut conn, table).await {
                Ok(view) => view.render(out)?,
                Err(e) => {
                    warn!("Failed to read table {table}: {e}");
                    writeln!(out, "Error reading table {table}: {e}\n")?;
                }
            }
        }

        Ok(())
    }
}

/// Loads up to [`ROW_LIMIT`] rows of `table`, every column cast to text.
async fn fetch_table(conn: &mut PgConnection, table: &str) -> Result<TableView, InspectError> {
    let columns: Vec<String> = sqlx::query_scalar(
        r#"
        SELECT column_name::text
        FROM information_schema.columns
        WHERE table_schema = current_schema() AND table_name = $1
        ORDER BY ordinal_position
        "#,
    )
    .bind(table)
    .fetch_all(&mut *conn)
    .await?;

    let Some(first_column) = columns.first() else {
        return Err(InspectError::TableNotFound(table.to_string()));
    };

    let select_list = columns
        .iter()
        .map(|c| format!("t.{}::text", quote_ident(c)))
        .collect::<Vec<_>>()
        .join(", ");
    let statement = format!(
        "SELECT {select_list} FROM {} AS t ORDER BY t.{} LIMIT {ROW_LIMIT}",
        quote_ident(table),
        quote_ident(first_column),
    );

    let rows = sqlx::query(&statement)
        .fetch_all(&mut *conn)
        .await?
        .iter()
        .map(|row| {
            (0..columns.len())
                .map(|i| row.try_get::<Option<String>, _>(i))
                .collect::<Result<Vec<_>, _>>()
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(TableView {
        table: table.to_string(),
        columns,
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_to_string(view: &TableView) -> String {
        let mut out = Vec::new();
        view.render(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_format_cell() {
        assert_eq!(format_cell(Some("42")), format!("42{}", " ".repeat(13)));
        assert_eq!(format_cell(None), "NULL           ");
        assert_eq!(format_cell(Some("exactly15chars!")), "exactly15chars!");
        assert_eq!(
            format_cell(Some("andrii.kovalenko04211@gmail.com")),
            "andrii.koval..."
        );
    }

    #[test]
    fn test_format_cell_counts_characters() {
        let cell = format_cell(Some("Шевченко Тетяна Іванівна"));
        assert_eq!(cell.chars().count(), COLUMN_WIDTH);
        assert_eq!(cell, "Шевченко Тет...");

        assert_eq!(format_cell(Some("Київ")).chars().count(), COLUMN_WIDTH);
    }

    #[test]
    fn test_fit_pads_and_truncates() {
        assert_eq!(fit("id", 5), "id   ");
        assert_eq!(fit("access_token_expires_at", 15), "access_token_ex");
    }

    #[test]
    fn test_quote_ident() {
        assert_eq!(quote_ident("users"), "\"users\"");
        assert_eq!(quote_ident("we\"ird"), "\"we\"\"ird\"");
    }

    #[test]
    fn test_render_empty_table() {
        let view = TableView {
            table: "meal_types".to_string(),
            columns: vec!["meal_type_id".to_string(), "name".to_string()],
            rows: Vec::new(),
        };
        assert_eq!(render_to_string(&view), "No data found.\n\n");
    }

    #[test]
    fn test_render_rows() {
        let view = TableView {
            table: "meal_types".to_string(),
            columns: vec![
                "meal_type_id".to_string(),
                "name".to_string(),
                "display_order".to_string(),
            ],
            rows: vec![
                vec![
                    Some("1".to_string()),
                    Some("BREAKFAST".to_string()),
                    Some("1".to_string()),
                ],
                vec![Some("2".to_string()), Some("LUNCH".to_string()), None],
            ],
        };

        let rendered = render_to_string(&view);
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(
            lines[0],
            "meal_type_id    | name            | display_order  "
        );
        assert_eq!(lines[1], "-".repeat(54));
        assert_eq!(
            lines[2],
            "1               | BREAKFAST       | 1              "
        );
        assert_eq!(
            lines[3],
            "2               | LUNCH           | NULL           "
        );
        assert!(rendered.contains("Displayed records: 2"));
    }
}
