use std::{fs, path::Path};

use crate::{MlError, Result};

/// A raw CSV table: a header and rows of string cells, in file order.
///
/// A `Table` only provides access to cells. It does not know which columns
/// are features, which is the target, or how values should be typed.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Creates a new table from owned buffers.
    ///
    /// # Errors
    /// Returns `MlError::RaggedRow` if a row's length differs from the header's.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self> {
        for (i, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(MlError::RaggedRow {
                    line: i + 2,
                    got: row.len(),
                    expected: columns.len(),
                });
            }
        }

        Ok(Self { columns, rows })
    }

    /// Reads a comma-separated file whose first non-blank line is the header.
    ///
    /// # Errors
    /// Returns `MlError::Io` if the file cannot be read, `MlError::EmptyInput`
    /// if it has no header and `MlError::RaggedRow` on a malformed line.
    pub fn read_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::parse_csv(&content)
    }

    /// Parses CSV text, see [`Table::read_csv`].
    pub fn parse_csv(content: &str) -> Result<Self> {
        let mut lines = content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty());

        let (_, header) = lines.next().ok_or(MlError::EmptyInput("csv header"))?;
        let columns: Vec<String> = split_fields(header).collect();

        let mut rows = Vec::new();
        for (i, line) in lines {
            let row: Vec<String> = split_fields(line).collect();
            if row.len() != columns.len() {
                return Err(MlError::RaggedRow {
                    line: i + 1,
                    got: row.len(),
                    expected: columns.len(),
                });
            }
            rows.push(row);
        }

        Ok(Self { columns, rows })
    }

    #[inline]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Returns the amount of data rows (the header excluded).
    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the position of the column named `name`.
    ///
    /// # Errors
    /// Returns `MlError::MissingColumn` if there's no such column.
    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| MlError::MissingColumn(name.to_string()))
    }

    /// Returns every cell of the column named `name`, in row order.
    ///
    /// # Errors
    /// Returns `MlError::MissingColumn` if there's no such column.
    pub fn column(&self, name: &str) -> Result<Vec<&str>> {
        let idx = self.column_index(name)?;
        Ok(self.rows.iter().map(|row| row[idx].as_str()).collect())
    }
}

/// Splits one CSV line on the commas outside double quotes.
///
/// Quotes are removed, `""` inside a quoted field is a literal quote and
/// every field is trimmed.
fn split_fields(line: &str) -> impl Iterator<Item = String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    fields.push(current);

    fields.into_iter().map(|field| field.trim().to_string())
}
