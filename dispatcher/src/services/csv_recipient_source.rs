//! Fallback recipient source backed by a static CSV file
//!
//! Columns, in order: `id,name,phone,city,latitude,longitude,distance,blood_types_available`.
//! The first line is a header. Missing or unparsable fields fall back to the
//! documented defaults instead of failing the row.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use shared::{split_blood_types, Recipient, RecipientId, recipient_debug};
use crate::error::{DispatcherError, DispatcherResult};
use crate::traits::RecipientSource;

const COLUMN_COUNT: usize = 8;

/// Loads recipients from a CSV file on disk
#[derive(Debug, Clone)]
pub struct CsvRecipientSource {
    path: PathBuf,
}

impl CsvRecipientSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl RecipientSource for CsvRecipientSource {
    async fn fetch_recipients(&self) -> DispatcherResult<Vec<Recipient>> {
        let text = tokio::fs::read_to_string(&self.path).await?;
        parse_recipients(&text)
    }

    fn describe(&self) -> String {
        format!("CSV {}", self.path.display())
    }
}

/// Parse CSV text into recipients.
///
/// Blank lines are skipped and do not advance the positional index used for
/// synthesized identities and names.
pub fn parse_recipients(text: &str) -> DispatcherResult<Vec<Recipient>> {
    let mut lines = text.lines();

    match lines.next() {
        Some(header) if !header.trim().is_empty() => {}
        _ => {
            return Err(DispatcherError::Parse {
                line: 1,
                message: "missing header row".to_string(),
            });
        }
    }

    Ok(lines
        .filter(|line| !line.trim().is_empty())
        .enumerate()
        .map(|(index, line)| parse_row(index, line))
        .collect())
}

fn parse_row(index: usize, line: &str) -> Recipient {
    let fields = split_row(line);
    let field = |column: usize| fields.get(column).map(String::as_str).filter(|v| !v.is_empty());

    let id = field(0)
        .map(RecipientId::new)
        .unwrap_or_else(|| RecipientId::synthesized(index));
    let name = field(1)
        .map(str::to_string)
        .unwrap_or_else(|| format!("Blood Bank {}", index + 1));

    let mut recipient = Recipient::with_defaults(id, name);

    if let Some(phone) = field(2) {
        recipient.phone = phone.to_string();
    }
    if let Some(city) = field(3) {
        recipient.city = city.to_string();
    }
    // A zero coordinate counts as missing
    if let Some(lat) = parse_number(&recipient.id, "latitude", field(4)).filter(|v| *v != 0.0) {
        recipient.latitude = lat;
    }
    if let Some(lon) = parse_number(&recipient.id, "longitude", field(5)).filter(|v| *v != 0.0) {
        recipient.longitude = lon;
    }
    recipient.distance_km = parse_number(&recipient.id, "distance", field(6));
    if let Some(types) = field(7) {
        let types = split_blood_types(types);
        if !types.is_empty() {
            recipient.blood_types_available = types;
        }
    }

    recipient
}

fn parse_number(recipient: &RecipientId, column: &str, raw: Option<&str>) -> Option<f64> {
    let raw = raw?;
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        _ => {
            recipient_debug!(recipient, "Ignoring unparsable {} '{}'", column, raw);
            None
        }
    }
}

/// Split one CSV row, honouring double quotes.
///
/// Anything past the seventh unquoted comma belongs to the last column, so an
/// unquoted blood type list stays whole.
fn split_row(line: &str) -> Vec<String> {
    let mut fields = Vec::with_capacity(COLUMN_COUNT);
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.trim_end_matches('\r').chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes && fields.len() < COLUMN_COUNT - 1 => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(c),
        }
    }
    fields.push(current.trim().to_string());

    fields
}

#[cfg(test)]
mod split_tests {
    use super::split_row;

    #[test]
    fn test_split_plain_row() {
        assert_eq!(split_row("a,b,,d"), vec!["a", "b", "", "d"]);
    }

    #[test]
    fn test_split_quoted_and_trailing_list() {
        assert_eq!(
            split_row(r#"1,"Lions, North",p,c,1,2,3,A+,B+"#),
            vec!["1", "Lions, North", "p", "c", "1", "2", "3", "A+,B+"]
        );
        assert_eq!(split_row(r#"x,"say ""hi""""#), vec!["x", r#"say "hi""#]);
    }
}
