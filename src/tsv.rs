// Tab-separated file input and output.
//
// Thread files are headerless by default (one post per row, seven columns).
// Every file we write starts with a header row. Any row that does not have
// the expected shape aborts the whole read, so a malformed file never
// produces partial output.

use std::path::Path;

use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use serde::Serialize;

use crate::error::{require_file, InputError};
use crate::keywords::RankedKeyword;
use crate::thread::{Post, Thread};

/// Column count of a thread file row.
pub const THREAD_COLUMNS: usize = 7;

/// Read a thread file into an immutable `Thread`.
pub fn read_thread(path: &Path, has_header: bool) -> Result<Thread> {
    require_file(path)?;

    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(has_header)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Failed to open thread file {}", path.display()))?;

    let display = path.display().to_string();
    let first_row = if has_header { 2 } else { 1 };
    let mut posts = Vec::new();

    for (offset, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("Failed to read {display}"))?;
        posts.push(parse_post(&record, &display, first_row + offset)?);
    }

    Ok(Thread::new(posts))
}

fn parse_post(record: &StringRecord, path: &str, row: usize) -> Result<Post, InputError> {
    if record.len() != THREAD_COLUMNS {
        return Err(InputError::MalformedRow {
            path: path.to_string(),
            row,
            expected: THREAD_COLUMNS,
            found: record.len(),
        });
    }

    let raw_sentiment = record[5].trim();
    let sentiment = raw_sentiment
        .parse::<i32>()
        .ok()
        .filter(|s| *s > -3)
        .ok_or_else(|| InputError::InvalidField {
            path: path.to_string(),
            row,
            field: "sentiment",
            value: raw_sentiment.to_string(),
        })?;

    Ok(Post {
        thread_url: record[0].to_string(),
        author: record[1].to_string(),
        text: record[2].to_string(),
        has_image: parse_flag(&record[3]),
        has_video: parse_flag(&record[4]),
        sentiment,
        utility: record[6].to_string(),
    })
}

fn parse_flag(value: &str) -> bool {
    !matches!(
        value.trim().to_lowercase().as_str(),
        "" | "0" | "false" | "no"
    )
}

/// Read a ranked `(term, score)` table.
///
/// Files written by this crate carry a `keyword\tscore` header; older files
/// have none. A first row whose score column is not a number is taken as a
/// header and skipped.
pub fn read_ranking(path: &Path) -> Result<Vec<RankedKeyword>> {
    require_file(path)?;

    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Failed to open keyword file {}", path.display()))?;

    let display = path.display().to_string();
    let mut ranked = Vec::new();

    for (offset, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("Failed to read {display}"))?;
        let row = offset + 1;

        if record.len() < 2 {
            return Err(InputError::MalformedRow {
                path: display,
                row,
                expected: 2,
                found: record.len(),
            }
            .into());
        }

        match record[1].trim().parse::<f64>() {
            Ok(score) => ranked.push(RankedKeyword {
                term: record[0].to_string(),
                score,
            }),
            Err(_) if row == 1 => continue,
            Err(_) => {
                return Err(InputError::InvalidField {
                    path: display,
                    row,
                    field: "score",
                    value: record[1].to_string(),
                }
                .into())
            }
        }
    }

    Ok(ranked)
}

/// Write serializable rows; the header comes from the row's field names.
pub fn write_rows<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .delimiter(b'\t')
        .from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;

    for row in rows {
        writer
            .serialize(row)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    writer.flush()?;
    Ok(())
}

/// Write a pre-rendered table (first row is the header).
pub fn write_table(path: &Path, rows: &[Vec<String>]) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .delimiter(b'\t')
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;

    for row in rows {
        writer
            .write_record(row)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    writer.flush()?;
    Ok(())
}

/// Write a keyword ranking with a `keyword\tscore` header.
pub fn write_ranking(path: &Path, ranked: &[RankedKeyword]) -> Result<()> {
    if ranked.is_empty() {
        // The header is derived from the first row, so write it by hand.
        return write_table(path, &[vec!["keyword".to_string(), "score".to_string()]]);
    }
    write_rows(path, ranked)
}
