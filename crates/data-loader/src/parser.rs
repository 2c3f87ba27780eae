//! Parsers for the catalog and similarity matrix files.
//!
//! - movies.json: either a list of `{"movie_id", "title"}` records or a
//!   column table `{"movie_id": {"0": ..}, "title": {"0": ..}}` as written by
//!   dataframe exporters
//! - similarity.json: array of rows, each an array of numbers

use crate::error::{DataLoadError, Result};
use crate::types::*;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::Path;

/// Both layouts a catalog file may use
#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogFile {
    Records(Vec<CatalogEntry>),
    Columns(ColumnTable),
}

/// Column-oriented table: column name -> (row key -> value)
#[derive(Deserialize)]
struct ColumnTable {
    movie_id: BTreeMap<String, MovieId>,
    title: BTreeMap<String, String>,
}

fn read_file(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => DataLoadError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => DataLoadError::IoError(e),
    })
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Parse the catalog file into entries in catalog order
pub fn parse_catalog(path: &Path) -> Result<Catalog> {
    let bytes = read_file(path)?;
    parse_catalog_bytes(&bytes, &file_name(path))
}

pub(crate) fn parse_catalog_bytes(bytes: &[u8], file: &str) -> Result<Catalog> {
    let parsed: CatalogFile =
        serde_json::from_slice(bytes).map_err(|source| DataLoadError::ParseError {
            file: file.to_string(),
            source,
        })?;

    let entries = match parsed {
        CatalogFile::Records(entries) => entries,
        CatalogFile::Columns(table) => columns_to_entries(table)?,
    };
    Catalog::new(entries)
}

/// Rebuild rows from a column table, ordered by numeric row key
fn columns_to_entries(table: ColumnTable) -> Result<Vec<CatalogEntry>> {
    let ColumnTable {
        movie_id,
        mut title,
    } = table;

    if movie_id.len() != title.len() {
        return Err(DataLoadError::InvalidValue {
            field: "columns".to_string(),
            value: format!(
                "movie_id has {} rows but title has {}",
                movie_id.len(),
                title.len()
            ),
        });
    }

    let mut rows = Vec::with_capacity(movie_id.len());
    for (key, id) in movie_id {
        let position: usize = key.parse().map_err(|_| DataLoadError::InvalidValue {
            field: "row key".to_string(),
            value: key.clone(),
        })?;
        let row_title = title.remove(&key).ok_or_else(|| DataLoadError::InvalidValue {
            field: "title".to_string(),
            value: format!("missing for row {}", key),
        })?;
        rows.push((position, CatalogEntry::new(id, row_title)));
    }

    // String keys sort lexically ("10" < "2"), so order by the parsed key
    rows.sort_by_key(|(position, _)| *position);
    Ok(rows.into_iter().map(|(_, entry)| entry).collect())
}

/// Parse the similarity matrix file
pub fn parse_similarity(path: &Path) -> Result<SimilarityMatrix> {
    let bytes = read_file(path)?;
    parse_similarity_bytes(&bytes, &file_name(path))
}

pub(crate) fn parse_similarity_bytes(bytes: &[u8], file: &str) -> Result<SimilarityMatrix> {
    let rows: Vec<Vec<Score>> =
        serde_json::from_slice(bytes).map_err(|source| DataLoadError::ParseError {
            file: file.to_string(),
            source,
        })?;
    SimilarityMatrix::from_rows(rows)
}
