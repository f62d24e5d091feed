//! Loading raw provider records from disk and batch normalization.
//!
//! The catalog file is a JSON array of provider detail records, the same
//! shape the provider's details endpoint returns (see `RawMovie`).

use crate::error::Result;
use crate::normalize::normalize;
use crate::pool::CandidatePool;
use crate::types::RawMovie;
use rayon::prelude::*;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Read a JSON array of raw provider records
pub fn load_raw_records(path: &Path) -> Result<Vec<RawMovie>> {
    debug!("Reading raw records from {:?}", path);
    let content = fs::read_to_string(path)?;
    let records: Vec<RawMovie> = serde_json::from_str(&content)?;
    debug!("Read {} raw records", records.len());
    Ok(records)
}

/// Normalize a batch of raw records into a candidate pool.
///
/// Normalization runs in parallel, but the pool keeps input order.
/// Records without an id are logged and skipped; later duplicates of an
/// id are dropped.
pub fn normalize_batch(raws: &[RawMovie]) -> CandidatePool {
    let normalized: Vec<_> = raws.par_iter().map(normalize).collect();

    let mut pool = CandidatePool::new();
    let mut rejected = 0;
    for result in normalized {
        match result {
            Ok(record) => {
                pool.push(record);
            }
            Err(e) => {
                warn!("Rejecting raw record: {}", e);
                rejected += 1;
            }
        }
    }

    debug!(
        "Normalized {} raw records into a pool of {} ({} rejected)",
        raws.len(),
        pool.len(),
        rejected
    );
    pool
}

/// Load a catalog file straight into a candidate pool
pub fn load_pool(path: &Path) -> Result<CandidatePool> {
    let raws = load_raw_records(path)?;
    Ok(normalize_batch(&raws))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CatalogError;
    use std::io::Write;

    fn write_temp(name: &str, content: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("catalog-loader-{}-{}", std::process::id(), name));
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_normalize_batch_skips_missing_ids_and_duplicates() {
        let raws = vec![
            RawMovie { id: Some(1), title: Some("One".into()), ..Default::default() },
            RawMovie { id: None, title: Some("No id".into()), ..Default::default() },
            RawMovie { id: Some(2), title: Some("Two".into()), ..Default::default() },
            RawMovie { id: Some(1), title: Some("One again".into()), ..Default::default() },
        ];

        let pool = normalize_batch(&raws);
        let titles: Vec<_> = pool.records().iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["One", "Two"]);
    }

    #[test]
    fn test_load_pool_from_file() {
        let path = write_temp(
            "ok.json",
            r#"[{"id": 10, "title": "Ten", "genres": [{"id": 35, "name": "Comedy"}]}, {"id": 11}]"#,
        );
        let pool = load_pool(&path).unwrap();
        assert_eq!(pool.len(), 2);
        assert_eq!(pool.get(10).unwrap().genres_list, vec!["Comedy"]);
        fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_malformed_file() {
        let path = write_temp("bad.json", "{not json");
        let err = load_raw_records(&path).unwrap_err();
        assert!(matches!(err, CatalogError::JsonError(_)));
        fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_raw_records(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, CatalogError::IoError(_)));
    }
}
