//! CSV readers for the reference corpora.
//!
//! Columns are located by header name, case-insensitively. Rows with a
//! missing or blank required field are skipped and counted; a missing
//! required column rejects the whole file.

use crate::emotion::Category;
use crate::error::{Result, SupportError};
use std::path::Path;
use tracing::debug;

/// Header names accepted for the label column, in preference order.
const LABEL_COLUMNS: &[&str] = &["emotion", "label", "category"];

/// One labeled example from the emotion corpus.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledEntry {
    pub text: String,
    pub category: Category,
}

/// Read `text` + label columns from a labeled CSV.
///
/// # Errors
///
/// Returns [`SupportError::Corpus`] if the file cannot be opened or lacks
/// the required columns.
pub fn load_labeled(path: &Path) -> Result<Vec<LabeledEntry>> {
    let mut reader = open(path)?;
    let headers = read_headers(&mut reader, path)?;
    let text_col = find_column(&headers, &["text"]).ok_or_else(|| missing(path, "text"))?;
    let label_col = find_column(&headers, LABEL_COLUMNS).ok_or_else(|| missing(path, "emotion"))?;

    let mut entries = Vec::new();
    let mut skipped = 0usize;
    for record in reader.records() {
        let Ok(record) = record else {
            skipped += 1;
            continue;
        };
        match (non_blank(&record, text_col), non_blank(&record, label_col)) {
            (Some(text), Some(label)) => entries.push(LabeledEntry {
                text: text.to_owned(),
                category: Category::from_label(label),
            }),
            _ => skipped += 1,
        }
    }

    debug!(path = %path.display(), rows = entries.len(), skipped, "labeled corpus read");
    Ok(entries)
}

/// Read up to `limit` values of the `text` column.
///
/// # Errors
///
/// Returns [`SupportError::Corpus`] if the file cannot be opened or has no
/// `text` column.
pub fn load_texts(path: &Path, limit: usize) -> Result<Vec<String>> {
    let mut reader = open(path)?;
    let headers = read_headers(&mut reader, path)?;
    let text_col = find_column(&headers, &["text"]).ok_or_else(|| missing(path, "text"))?;

    let mut texts = Vec::new();
    let mut skipped = 0usize;
    for record in reader.records().take(limit) {
        match record
            .ok()
            .as_ref()
            .and_then(|r| non_blank(r, text_col))
        {
            Some(text) => texts.push(text.to_owned()),
            None => skipped += 1,
        }
    }

    debug!(path = %path.display(), rows = texts.len(), skipped, "text corpus read");
    Ok(texts)
}

fn open(path: &Path) -> Result<csv::Reader<std::fs::File>> {
    csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| SupportError::Corpus(format!("cannot open {}: {e}", path.display())))
}

fn read_headers(reader: &mut csv::Reader<std::fs::File>, path: &Path) -> Result<csv::StringRecord> {
    reader
        .headers()
        .cloned()
        .map_err(|e| SupportError::Corpus(format!("bad header in {}: {e}", path.display())))
}

fn find_column(headers: &csv::StringRecord, names: &[&str]) -> Option<usize> {
    names
        .iter()
        .find_map(|name| headers.iter().position(|h| h.eq_ignore_ascii_case(name)))
}

fn non_blank(record: &csv::StringRecord, col: usize) -> Option<&str> {
    record.get(col).filter(|v| !v.is_empty())
}

fn missing(path: &Path, column: &str) -> SupportError {
    SupportError::Corpus(format!("{} has no `{column}` column", path.display()))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    fn write(dir: &tempfile::TempDir, name: &str, body: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn labeled_rows_are_mapped() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "emotions.csv",
            "id,Text,Emotion\n1,\"lost my keys, again\",annoyance\n2,got the job,joy\n",
        );
        let entries = load_labeled(&path).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].text, "lost my keys, again");
        assert_eq!(entries[0].category, Category::Anger);
        assert_eq!(entries[1].category, Category::Joy);
    }

    #[test]
    fn label_column_alias_is_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "e.csv", "text,label\nso tired of this,sadness\n");
        let entries = load_labeled(&path).unwrap();
        assert_eq!(entries[0].category, Category::Sadness);
    }

    #[test]
    fn malformed_rows_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "e.csv",
            "text,emotion\nfine row,joy\nmissing label\n,fear\nanother,neutral\n",
        );
        let entries = load_labeled(&path).unwrap();
        let texts: Vec<&str> = entries.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["fine row", "another"]);
    }

    #[test]
    fn missing_label_column_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "e.csv", "text,score\nhello,3\n");
        assert!(matches!(load_labeled(&path), Err(SupportError::Corpus(_))));
    }

    #[test]
    fn missing_file_is_an_error() {
        let result = load_texts(Path::new("/nonexistent/control.csv"), 10);
        assert!(matches!(result, Err(SupportError::Corpus(_))));
    }

    #[test]
    fn texts_respect_limit() {
        let dir = tempfile::tempdir().unwrap();
        let body: String = std::iter::once("text\n".to_owned())
            .chain((0..250).map(|i| format!("row number {i}\n")))
            .collect();
        let path = write(&dir, "control.csv", &body);
        let texts = load_texts(&path, 100).unwrap();
        assert_eq!(texts.len(), 100);
        assert_eq!(texts[99], "row number 99");
    }
}
