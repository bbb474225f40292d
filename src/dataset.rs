// 📂 Sightings Dataset - load the `;`-delimited reports file into normalized records

use crate::category::{normalize_shape, CategorySet};
use anyhow::{bail, Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;

/// Column delimiter of the sightings file
pub const DELIMITER: u8 = b';';

/// Columns every sightings file must carry
pub const REQUIRED_COLUMNS: [&str; 2] = ["shape", "year"];

/// Row as it appears in the file. Columns other than shape/year are ignored.
#[derive(Debug, Deserialize)]
struct RawSighting {
    #[serde(default)]
    shape: Option<String>,
    year: i32,
}

/// One sighting with its shape already normalized
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SightingRecord {
    /// Lower-case shape key ("unknown" when the report had none)
    pub shape: String,
    pub year: i32,
}

impl SightingRecord {
    pub fn new(shape: Option<&str>, year: i32) -> Self {
        Self {
            shape: normalize_shape(shape),
            year,
        }
    }
}

impl From<RawSighting> for SightingRecord {
    fn from(raw: RawSighting) -> Self {
        SightingRecord::new(raw.shape.as_deref(), raw.year)
    }
}

/// Read-only table of sightings plus the category set derived from it.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<SightingRecord>,
    categories: CategorySet,
}

impl Dataset {
    pub fn from_records(records: Vec<SightingRecord>) -> Self {
        let categories = CategorySet::new(records.iter().map(|r| r.shape.as_str()));
        Self { records, categories }
    }

    /// Parse `;`-delimited sightings with a header row.
    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(DELIMITER)
            .has_headers(true)
            .from_reader(reader);

        let headers = rdr.headers().context("Failed to read CSV header row")?;
        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h.trim() == column) {
                bail!("Missing required column '{}' in sightings file", column);
            }
        }

        let mut records = Vec::new();

        for (line, result) in rdr.deserialize::<RawSighting>().enumerate() {
            let raw = result.with_context(|| format!("Failed to deserialize sighting #{}", line + 1))?;
            records.push(SightingRecord::from(raw));
        }

        debug!("parsed {} sighting rows", records.len());
        Ok(Self::from_records(records))
    }

    pub fn records(&self) -> &[SightingRecord] {
        &self.records
    }

    pub fn categories(&self) -> &CategorySet {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Load the sightings file once at startup.
pub fn load_csv(csv_path: &Path) -> Result<Dataset> {
    let file = std::fs::File::open(csv_path)
        .with_context(|| format!("Failed to open CSV file {}", csv_path.display()))?;

    let dataset = Dataset::from_reader(io::BufReader::new(file))?;
    info!(
        "loaded {} sightings across {} shapes from {}",
        dataset.len(),
        dataset.categories().len(),
        csv_path.display()
    );

    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_reader_normalizes_shapes() {
        let data = "shape;year;city\ncircle;2001;Oslo\n;2002;Bergen\nchanged;2003;Bodo\n";
        let dataset = Dataset::from_reader(data.as_bytes()).unwrap();

        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.records()[0], SightingRecord::new(Some("circle"), 2001));
        assert_eq!(dataset.records()[1].shape, "unknown");
        assert_eq!(dataset.records()[2].shape, "changing");
        assert_eq!(
            dataset.categories().iter().collect::<Vec<_>>(),
            vec!["changing", "circle", "unknown"]
        );
    }

    #[test]
    fn test_missing_year_column_fails() {
        let data = "shape;city\ncircle;Oslo\n";
        assert!(Dataset::from_reader(data.as_bytes()).is_err());
    }

    #[test]
    fn test_missing_shape_column_fails() {
        let data = "year;city\n2001;Oslo\n2002;Bergen\n";
        let err = Dataset::from_reader(data.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("'shape'"));
    }

    #[test]
    fn test_empty_shape_cells_still_load() {
        let data = "shape;year\n;2001\n;2002\n";
        let dataset = Dataset::from_reader(data.as_bytes()).unwrap();
        assert_eq!(dataset.categories().iter().collect::<Vec<_>>(), vec!["unknown"]);
    }

    #[test]
    fn test_non_numeric_year_fails() {
        let data = "shape;year\ncircle;soon\n";
        let err = Dataset::from_reader(data.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("sighting #1"));
    }

    #[test]
    fn test_load_sample_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/sample.csv");
        let dataset = load_csv(&path).unwrap();

        assert!(!dataset.is_empty());
        assert!(dataset.categories().contains("unknown"));
        assert!(dataset.categories().contains("changing"));
        assert!(!dataset.categories().contains("changed"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_csv(Path::new("does/not/exist.csv")).unwrap_err();
        assert!(err.to_string().contains("Failed to open CSV file"));
    }
}
