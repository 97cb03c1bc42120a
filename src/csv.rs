use serde::Serialize;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::model::{ComparisonRow, TariffCatalogEntry};

/// Errors that can occur when reading a catalog csv
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("cannot open catalog {}: {source}", .path.display())]
    Open { path: PathBuf, source: csv::Error },

    #[error("line {line}: failed to parse row: {source}")]
    Parse { line: usize, source: csv::Error },

    #[error("line {line}: {reason}")]
    InvalidEntry { line: usize, reason: String },
}

#[derive(Debug, Serialize)]
struct OutputRow<'a> {
    label: &'a str,
    tariff: f64,
    energy: String,
}

/// Read a tariff catalog (`label,tariff` rows) from a csv file, keeping file order
pub fn read_catalog(path: impl AsRef<Path>) -> Result<Vec<TariffCatalogEntry>, CatalogError> {
    let path = path.as_ref();
    let reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|source| CatalogError::Open {
            path: path.to_path_buf(),
            source,
        })?;

    reader
        .into_deserialize::<TariffCatalogEntry>()
        .enumerate()
        .map(|(idx, result)| {
            let line = idx + 2; // 1-indexed, skip header
            let entry = result.map_err(|source| CatalogError::Parse { line, source })?;
            if entry.label.is_empty() {
                return Err(CatalogError::InvalidEntry {
                    line,
                    reason: "empty label".to_string(),
                });
            }
            if !(entry.tariff_per_unit.is_finite() && entry.tariff_per_unit > 0.0) {
                return Err(CatalogError::InvalidEntry {
                    line,
                    reason: format!("tariff must be positive, got {}", entry.tariff_per_unit),
                });
            }
            Ok(entry)
        })
        .collect()
}

/// Write a comparison table as csv (`label,tariff,energy`)
///
/// Energy is written with three decimals and a plain `.` decimal point.
pub fn write_comparison<W: io::Write>(writer: W, rows: &[ComparisonRow]) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(writer);

    for row in rows {
        writer.serialize(OutputRow {
            label: &row.label,
            tariff: row.tariff_per_unit,
            energy: format!("{:.3}", row.energy_quantity),
        })?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn read_keeps_file_order() {
        let file = write_csv("label,tariff\n2200 VA,1699.53\n450 VA,1352\n");
        let catalog = read_catalog(file.path()).unwrap();
        assert_eq!(
            catalog,
            vec![
                TariffCatalogEntry::new("2200 VA", 1699.53),
                TariffCatalogEntry::new("450 VA", 1352.0),
            ]
        );
    }

    #[test]
    fn read_accepts_full_field_name() {
        let file = write_csv("label,tariff_per_unit\n900 VA,1467.28\n");
        let catalog = read_catalog(file.path()).unwrap();
        assert_eq!(catalog[0].tariff_per_unit, 1467.28);
    }

    #[test]
    fn read_with_whitespace() {
        let file = write_csv("label, tariff\n 1300 VA , 1467.28\n");
        let catalog = read_catalog(file.path()).unwrap();
        assert_eq!(catalog[0].label, "1300 VA");
    }

    #[test]
    fn read_header_only_is_empty_catalog() {
        let file = write_csv("label,tariff\n");
        assert!(read_catalog(file.path()).unwrap().is_empty());
    }

    #[test]
    fn read_returns_error_for_bad_number() {
        let file = write_csv("label,tariff\n450 VA,cheap\n");
        let err = read_catalog(file.path()).unwrap_err();
        assert!(matches!(err, CatalogError::Parse { line: 2, .. }));
    }

    #[test]
    fn read_returns_error_for_non_positive_tariff() {
        let file = write_csv("label,tariff\n450 VA,1352\n900 VA,0\n");
        let err = read_catalog(file.path()).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidEntry { line: 3, .. }));
    }

    #[test]
    fn read_returns_error_for_empty_label() {
        let file = write_csv("label,tariff\n,1352\n");
        let err = read_catalog(file.path()).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidEntry { line: 2, .. }));
    }

    #[test]
    fn read_missing_file_fails() {
        let err = read_catalog("does/not/exist.csv").unwrap_err();
        assert!(matches!(err, CatalogError::Open { .. }));
    }

    #[test]
    fn write_comparison_rows() {
        let rows = vec![
            ComparisonRow {
                label: "450 VA".to_string(),
                tariff_per_unit: 1352.0,
                energy_quantity: 94_000.0 / 1352.0,
            },
            ComparisonRow {
                label: "900 VA".to_string(),
                tariff_per_unit: 1467.28,
                energy_quantity: 94_000.0 / 1467.28,
            },
        ];
        let mut out = Vec::new();
        write_comparison(&mut out, &rows).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "label,tariff,energy");
        assert_eq!(lines[1], "450 VA,1352.0,69.527");
        assert_eq!(lines[2], "900 VA,1467.28,64.064");
    }
}
