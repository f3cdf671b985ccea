use std::path::Path;

use crate::error::LoadError;
use crate::models::MovieRecord;

/// The ordered movie catalog, loaded once at startup and read-only after.
///
/// Record order is load-bearing: the similarity matrix is aligned to it
/// positionally, and it breaks ties when scores are equal.
#[derive(Debug, Clone)]
pub struct Catalog {
    records: Vec<MovieRecord>,
}

impl Catalog {
    /// Loads and validates the catalog artifact (a JSON array of records).
    ///
    /// Any failure here is fatal to startup: missing file, malformed JSON,
    /// or a record without a title.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let records: Vec<MovieRecord> =
            serde_json::from_str(&raw).map_err(|source| LoadError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_records(records)
    }

    /// Builds a catalog from in-memory records, enforcing the title schema.
    pub fn from_records(records: Vec<MovieRecord>) -> Result<Self, LoadError> {
        for (index, record) in records.iter().enumerate() {
            if record.title.is_empty() {
                return Err(LoadError::MissingTitle { index });
            }
        }
        Ok(Self { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&MovieRecord> {
        self.records.get(index)
    }

    /// All titles in catalog order; the selection list the UI renders.
    pub fn titles(&self) -> Vec<String> {
        self.records.iter().map(|r| r.title.clone()).collect()
    }

    /// How many records carry an id usable for IMDb lookups.
    pub fn imdb_id_count(&self) -> usize {
        self.records.iter().filter(|r| r.imdb_id().is_some()).count()
    }

    /// A preview of the first `limit` ids with their per-id IMDb verdicts,
    /// for the startup dataset check.
    pub fn id_sample(&self, limit: usize) -> Vec<(String, bool)> {
        self.records
            .iter()
            .take(limit)
            .map(|r| {
                let id = r.id.as_deref().unwrap_or("<none>");
                (id.to_string(), r.imdb_id().is_some())
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn record(id: Option<&str>, title: &str) -> MovieRecord {
        MovieRecord {
            id: id.map(str::to_string),
            title: title.to_string(),
        }
    }

    #[test]
    fn test_from_records_accepts_valid_catalog() {
        let catalog = Catalog::from_records(vec![
            record(Some("tt0001"), "A"),
            record(None, "B"),
        ])
        .unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.titles(), vec!["A", "B"]);
    }

    #[test]
    fn test_from_records_rejects_empty_title() {
        let result = Catalog::from_records(vec![
            record(Some("tt0001"), "A"),
            record(Some("tt0002"), ""),
        ]);
        assert!(matches!(result, Err(LoadError::MissingTitle { index: 1 })));
    }

    #[test]
    fn test_get_out_of_bounds_is_none() {
        let catalog = Catalog::from_records(vec![record(None, "Only")]).unwrap();
        assert!(catalog.get(0).is_some());
        assert!(catalog.get(1).is_none());
    }

    #[test]
    fn test_load_round_trip() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"movie_id": "tt0111161", "title": "The Shawshank Redemption"}},
               {{"movie_id": 19995, "title": "Avatar"}}]"#
        )
        .unwrap();

        let catalog = Catalog::load(file.path()).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(1).unwrap().id.as_deref(), Some("19995"));
        assert_eq!(catalog.imdb_id_count(), 1);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let result = Catalog::load("/nonexistent/movie_list.json");
        assert!(matches!(result, Err(LoadError::Io { .. })));
    }

    #[test]
    fn test_load_malformed_json_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let result = Catalog::load(file.path());
        assert!(matches!(result, Err(LoadError::Parse { .. })));
    }

    #[test]
    fn test_load_missing_title_field_is_schema_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"movie_id": "tt0001"}}]"#).unwrap();
        let result = Catalog::load(file.path());
        assert!(matches!(result, Err(LoadError::MissingTitle { index: 0 })));
    }

    #[test]
    fn test_id_sample_previews_verdicts() {
        let catalog = Catalog::from_records(vec![
            record(Some("tt0001"), "A"),
            record(Some("19995"), "B"),
            record(None, "C"),
        ])
        .unwrap();

        let sample = catalog.id_sample(10);
        assert_eq!(
            sample,
            vec![
                ("tt0001".to_string(), true),
                ("19995".to_string(), false),
                ("<none>".to_string(), false),
            ]
        );
        assert_eq!(catalog.id_sample(1).len(), 1);
    }
}
