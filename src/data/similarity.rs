use std::collections::HashMap;
use std::path::Path;

use crate::engine::SimilarityMatrix;
use crate::error::{AppError, AppResult};
use crate::models::MovieId;

/// Loads a precomputed similarity matrix from a wide CSV file.
///
/// Layout: the first column (`MovieID`) names the row movie, the remaining
/// column headers are movie ids, and each cell holds the pairwise
/// similarity. Blank cells are undefined similarities and are skipped, not
/// read as zero.
pub fn load_similarity_matrix(path: &Path) -> AppResult<SimilarityMatrix> {
    let mut reader = csv::Reader::from_path(path)?;

    let headers = reader.headers()?.clone();
    let mut column_ids: Vec<MovieId> = Vec::with_capacity(headers.len().saturating_sub(1));
    for header in headers.iter().skip(1) {
        let id: u32 = header.trim().parse().map_err(|_| {
            AppError::Configuration(format!(
                "{}: similarity column header {:?} is not a movie id",
                path.display(),
                header
            ))
        })?;
        column_ids.push(MovieId(id));
    }

    let mut rows: HashMap<MovieId, Vec<(MovieId, f64)>> = HashMap::new();
    for (row_no, record) in reader.records().enumerate() {
        let record = record?;
        let row_field = record.get(0).unwrap_or("");
        let row_id: u32 = row_field.trim().parse().map_err(|_| {
            AppError::Configuration(format!(
                "{}: row {} has invalid movie id {:?}",
                path.display(),
                row_no + 1,
                row_field
            ))
        })?;

        let mut neighbors = Vec::new();
        for (column, cell) in record.iter().skip(1).enumerate() {
            let cell = cell.trim();
            if cell.is_empty() {
                continue;
            }
            let similarity: f64 = cell.parse().map_err(|_| {
                AppError::Configuration(format!(
                    "{}: row {} column {} has invalid similarity {:?}",
                    path.display(),
                    row_no + 1,
                    column + 2,
                    cell
                ))
            })?;
            // "NaN"/"inf" spellings are NA cells, same as a blank
            if !similarity.is_finite() {
                continue;
            }
            neighbors.push((column_ids[column], similarity));
        }

        rows.insert(MovieId(row_id), neighbors);
    }

    let matrix = SimilarityMatrix::new(rows)?;
    tracing::info!(movies = matrix.len(), path = %path.display(), "Similarity matrix loaded");
    Ok(matrix)
}
