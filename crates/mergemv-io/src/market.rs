//! Matrix Market (`.mtx`) coordinate-format reader.
//!
//! Supports `real`, `integer`, and `pattern` fields with `general` or
//! `symmetric` symmetry. Symmetric storage keeps only one triangle; the
//! reader mirrors off-diagonal entries. Indices in the file are 1-based.

use crate::LoadError;
use log::debug;
use mergemv_core::{Coo, Scalar};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Real,
    Integer,
    Pattern,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Symmetry {
    General,
    Symmetric,
}

fn parse_err(source_name: &str, line: usize, message: impl Into<String>) -> LoadError {
    LoadError::Parse {
        source_name: source_name.to_string(),
        line,
        message: message.into(),
    }
}

fn parse_header(source_name: &str, header: &str) -> Result<(Field, Symmetry), LoadError> {
    let tokens: Vec<&str> = header.split_whitespace().collect();
    if tokens.len() != 5 || !tokens[0].eq_ignore_ascii_case("%%MatrixMarket") {
        return Err(parse_err(source_name, 1, "malformed banner"));
    }
    if !tokens[1].eq_ignore_ascii_case("matrix") || !tokens[2].eq_ignore_ascii_case("coordinate") {
        return Err(LoadError::UnsupportedFormat(header.trim().to_string()));
    }
    let field = match tokens[3].to_ascii_lowercase().as_str() {
        "real" => Field::Real,
        "integer" => Field::Integer,
        "pattern" => Field::Pattern,
        _ => return Err(LoadError::UnsupportedFormat(header.trim().to_string())),
    };
    let symmetry = match tokens[4].to_ascii_lowercase().as_str() {
        "general" => Symmetry::General,
        "symmetric" => Symmetry::Symmetric,
        _ => return Err(LoadError::UnsupportedFormat(header.trim().to_string())),
    };
    Ok((field, symmetry))
}

/// Parses coordinate-format Matrix Market text into COO.
///
/// `source_name` labels parse errors (a path or a synthetic name in
/// tests).
pub fn parse_matrix_market<T: Scalar, R: BufRead>(
    reader: R,
    source_name: &str,
) -> Result<Coo<T>, LoadError> {
    let mut lines = reader.lines().enumerate();

    let (_, header) = lines
        .next()
        .ok_or_else(|| parse_err(source_name, 1, "empty file"))?;
    let (field, symmetry) = parse_header(source_name, &header?)?;

    // Size line: first non-comment, non-blank line after the banner.
    let mut size: Option<(usize, usize, usize, usize)> = None;
    for (idx, line) in lines.by_ref() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('%') {
            continue;
        }
        let mut it = trimmed.split_whitespace();
        let num_rows = it
            .next()
            .and_then(|s| s.parse::<usize>().ok())
            .ok_or_else(|| parse_err(source_name, idx + 1, "malformed size line"))?;
        let num_cols = it
            .next()
            .and_then(|s| s.parse::<usize>().ok())
            .ok_or_else(|| parse_err(source_name, idx + 1, "malformed size line"))?;
        let entries = it
            .next()
            .and_then(|s| s.parse::<usize>().ok())
            .ok_or_else(|| parse_err(source_name, idx + 1, "malformed size line"))?;
        size = Some((num_rows, num_cols, entries, idx + 1));
        break;
    }
    let (num_rows, num_cols, entries, _) =
        size.ok_or_else(|| parse_err(source_name, 0, "missing size line"))?;

    let cap = match symmetry {
        Symmetry::General => entries,
        Symmetry::Symmetric => entries * 2,
    };
    let mut coo: Coo<T> = Coo::with_capacity(num_rows, num_cols, cap);

    let mut seen = 0usize;
    for (idx, line) in lines {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('%') {
            continue;
        }
        if seen == entries {
            return Err(parse_err(source_name, idx + 1, "more entries than declared"));
        }
        let mut it = trimmed.split_whitespace();
        let i = it
            .next()
            .and_then(|s| s.parse::<usize>().ok())
            .ok_or_else(|| parse_err(source_name, idx + 1, "malformed entry"))?;
        let j = it
            .next()
            .and_then(|s| s.parse::<usize>().ok())
            .ok_or_else(|| parse_err(source_name, idx + 1, "malformed entry"))?;
        if i < 1 || i > num_rows || j < 1 || j > num_cols {
            return Err(parse_err(source_name, idx + 1, "entry index out of bounds"));
        }
        let value = match field {
            Field::Pattern => T::ONE,
            Field::Real | Field::Integer => {
                let v = it
                    .next()
                    .and_then(|s| s.parse::<f64>().ok())
                    .ok_or_else(|| parse_err(source_name, idx + 1, "malformed entry value"))?;
                T::from_f64(v)
            }
        };
        let (row, col) = (i - 1, j - 1);
        coo.push(row, col, value);
        if symmetry == Symmetry::Symmetric && row != col {
            coo.push(col, row, value);
        }
        seen += 1;
    }
    if seen != entries {
        return Err(parse_err(
            source_name,
            0,
            format!("expected {entries} entries, found {seen}"),
        ));
    }

    debug!(
        "parsed {source_name}: {num_rows} x {num_cols}, {} stored nonzeros",
        coo.nnz()
    );
    Ok(coo)
}

/// Reads a Matrix Market file from disk.
pub fn read_matrix_market<T: Scalar>(path: &Path) -> Result<Coo<T>, LoadError> {
    let file = File::open(path)?;
    parse_matrix_market(BufReader::new(file), &path.display().to_string())
}
