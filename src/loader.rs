// CSV record loading plus the process-wide memoized source snapshot.
//
// Loading is split in two layers: `read_raw`/`load_raw` do one plain
// read with a header guard, and `load_cached` memoizes the result keyed
// on (path, modification time). The cached snapshot is immutable and
// shared by `Arc`; downstream stages only ever derive new tables from it.
use crate::types::RawRow;
use csv::ReaderBuilder;
use once_cell::sync::Lazy;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::SystemTime;

/// Columns the pipeline depends on. Extra columns in the extract are fine;
/// a missing one of these is a schema problem, reported before any row is
/// processed.
pub const REQUIRED_COLUMNS: [&str; 4] = [
    "Listing Number",
    "Selling Price",
    "Square Footage",
    "Style Code",
];

/// Structural load failures. Field-level dirt is not an error; it turns
/// into missing values during normalization.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The input file cannot be opened or read.
    #[error("source unavailable: {path}: {source}")]
    SourceUnavailable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The table structure itself is broken (e.g. a mangled quoted field).
    /// `record` is the 1-based data row position.
    #[error("malformed source at record {record}: {message}")]
    MalformedSource { record: u64, message: String },

    /// One or more required columns are absent from the header.
    #[error("schema mismatch: missing column(s): {}", .missing.join(", "))]
    SchemaMismatch { missing: Vec<String> },
}

/// Read raw rows from any CSV reader.
///
/// The header is validated against [`REQUIRED_COLUMNS`] before any row is
/// deserialized, so schema drift surfaces as one `SchemaMismatch` naming
/// every absent column instead of a per-row parse error.
pub fn read_raw<R: Read>(reader: R) -> Result<Vec<RawRow>, LoadError> {
    // Strict field counts: a row that does not line up with the header is
    // a structural failure, not a data-quality issue.
    let mut rdr = ReaderBuilder::new().flexible(false).from_reader(reader);
    let headers = rdr
        .headers()
        .map_err(|e| LoadError::MalformedSource {
            record: 0,
            message: e.to_string(),
        })?
        .clone();
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|col| !headers.iter().any(|h| h == *col))
        .map(|col| col.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(LoadError::SchemaMismatch { missing });
    }

    let mut rows: Vec<RawRow> = Vec::new();
    for (idx, result) in rdr.deserialize::<RawRow>().enumerate() {
        let row = result.map_err(|e| LoadError::MalformedSource {
            record: idx as u64 + 1,
            message: e.to_string(),
        })?;
        rows.push(row);
    }
    Ok(rows)
}

/// Read raw rows from a file path, without touching the cache.
pub fn load_raw(path: &str) -> Result<Vec<RawRow>, LoadError> {
    let file = File::open(path).map_err(|e| LoadError::SourceUnavailable {
        path: path.to_string(),
        source: e,
    })?;
    read_raw(file)
}

struct CachedSource {
    path: PathBuf,
    modified: Option<SystemTime>,
    rows: Arc<Vec<RawRow>>,
}

// Populated on first load, replaced when the source path or its
// modification time changes, cleared by `invalidate_cache`.
static SOURCE_CACHE: Lazy<Mutex<Option<CachedSource>>> = Lazy::new(|| Mutex::new(None));

fn modification_marker(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|m| m.modified()).ok()
}

/// Load raw rows through the memoized snapshot.
///
/// A hit requires the same path and an unchanged modification time; if the
/// marker cannot be read at all the cache is bypassed and the file is
/// loaded fresh. The returned `Arc` is the shared snapshot; callers must
/// derive, never mutate.
pub fn load_cached(path: &str) -> Result<Arc<Vec<RawRow>>, LoadError> {
    let marker = modification_marker(Path::new(path));
    let mut cache = SOURCE_CACHE.lock().unwrap();
    if let Some(cached) = cache.as_ref() {
        if marker.is_some() && cached.path.as_path() == Path::new(path) && cached.modified == marker
        {
            return Ok(Arc::clone(&cached.rows));
        }
    }
    let rows = Arc::new(load_raw(path)?);
    *cache = Some(CachedSource {
        path: PathBuf::from(path),
        modified: marker,
        rows: Arc::clone(&rows),
    });
    Ok(rows)
}

/// Explicit refresh: the next `load_cached` call re-reads the source.
pub fn invalidate_cache() {
    *SOURCE_CACHE.lock().unwrap() = None;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::time::Duration;

    const SAMPLE_CSV: &str = "\
Listing Number,Selling Price,Square Footage,Style Code,Sold Date
\"2,230,105\",\"612,500\",\"1,950\",10 - 1 Story,2024-03-14
2231442,585000,2100,12 - 2 Story,2024-05-02
2229871,,1875,10 - 1 Story,2024-01-20
";

    #[test]
    fn reads_rows_and_ignores_extra_columns() {
        let rows = read_raw(SAMPLE_CSV.as_bytes()).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].listing_number.as_deref(), Some("2,230,105"));
        assert_eq!(rows[1].selling_price.as_deref(), Some("585000"));
        // Empty cell comes through as an absent value.
        assert_eq!(rows[2].selling_price, None);
    }

    #[test]
    fn reports_every_missing_required_column() {
        let csv = "Listing Number,Style Code\n2230105,10 - 1 Story\n";
        match read_raw(csv.as_bytes()) {
            Err(LoadError::SchemaMismatch { missing }) => {
                assert_eq!(missing, vec!["Selling Price", "Square Footage"]);
            }
            other => panic!("expected SchemaMismatch, got {:?}", other),
        }
    }

    #[test]
    fn broken_row_structure_is_fatal_with_record_position() {
        // Second data row collapses to a single field (runaway quote),
        // which no longer lines up with the four-column header.
        let csv = "Listing Number,Selling Price,Square Footage,Style Code\n\
                   2230105,612500,1950,10 - 1 Story\n\
                   \"2231442,585000,2100,12 - 2 Story\n";
        match read_raw(csv.as_bytes()) {
            Err(LoadError::MalformedSource { record, .. }) => assert_eq!(record, 2),
            other => panic!("expected MalformedSource, got {:?}", other),
        }
    }

    #[test]
    fn missing_file_is_source_unavailable() {
        match load_raw("no_such_extract.csv") {
            Err(LoadError::SourceUnavailable { path, .. }) => {
                assert_eq!(path, "no_such_extract.csv");
            }
            other => panic!("expected SourceUnavailable, got {:?}", other),
        }
    }

    // Single test for the whole cache lifecycle: the cache is one global
    // slot, so exercising hit, source-change reload, and invalidation in
    // sequence keeps parallel test runs from racing on it.
    #[test]
    fn cache_hits_reloads_on_change_and_invalidates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sold.csv");
        std::fs::write(&path, SAMPLE_CSV).unwrap();
        let path_str = path.to_str().unwrap();

        invalidate_cache();
        let first = load_cached(path_str).unwrap();
        let second = load_cached(path_str).unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        // Rewrite the source and push its mtime clearly forward so the
        // modification marker is guaranteed to differ.
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(
            b"Listing Number,Selling Price,Square Footage,Style Code\n2231442,585000,2100,12 - 2 Story\n",
        )
        .unwrap();
        f.set_modified(SystemTime::now() + Duration::from_secs(30)).unwrap();
        drop(f);

        let third = load_cached(path_str).unwrap();
        assert!(!Arc::ptr_eq(&second, &third));
        assert_eq!(third.len(), 1);

        invalidate_cache();
        let fourth = load_cached(path_str).unwrap();
        assert!(!Arc::ptr_eq(&third, &fourth));
        assert_eq!(fourth.len(), third.len());
    }
}
