//! CSV rendering for the administrator reports.
//!
//! Fields containing commas, quotes or newlines are quoted with inner
//! quotes doubled (RFC 4180), so names like "Silva, Ana" survive the
//! round trip into a spreadsheet.

use std::borrow::Cow;

use chrono::NaiveDate;

/// A CSV document under construction: one header row plus data rows.
#[derive(Debug, Clone)]
pub struct CsvDocument {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl CsvDocument {
    /// Start a document with the given header row.
    #[must_use]
    pub fn new<S: Into<String>>(header: impl IntoIterator<Item = S>) -> Self {
        Self {
            header: header.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append one data row.
    pub fn push_row<S: Into<String>>(&mut self, row: impl IntoIterator<Item = S>) {
        self.rows.push(row.into_iter().map(Into::into).collect());
    }

    /// Number of data rows (header excluded).
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Render the document to CSV text with `\n` line endings.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        render_line(&mut out, &self.header);
        for row in &self.rows {
            render_line(&mut out, row);
        }
        out
    }
}

/// The download filename for a report generated on `date`.
#[must_use]
pub fn report_filename(report: &str, date: NaiveDate) -> String {
    format!("{report}_{date}.csv")
}

fn render_line(out: &mut String, fields: &[String]) {
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&escape_field(field));
    }
    out.push('\n');
}

/// Quote a field if it contains a comma, quote or newline.
fn escape_field(field: &str) -> Cow<'_, str> {
    if field.contains(['"', ',', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}
