//! Per-geometry check rows and their tabular output.

use anyhow::{Context, Result};
use geovalid::geom::Geometry;
use geovalid::valid::{IsSimple, IsValid, SimpleCfg, ValidCfg, ValidationError};
use polars::prelude::*;
use serde::Serialize;
use std::fs::File;
use std::path::Path;

/// Checker options shared by every geometry of a run.
#[derive(Clone, Copy, Debug, Default)]
pub struct CheckOpts {
    pub simple: SimpleCfg,
    pub valid: ValidCfg,
}

#[derive(Debug, Serialize)]
pub struct ErrorReport {
    pub code: String,
    pub message: String,
    pub x: f64,
    pub y: f64,
}

impl From<ValidationError> for ErrorReport {
    fn from(e: ValidationError) -> Self {
        Self {
            code: format!("{:?}", e.code),
            message: e.message(),
            x: e.coord.x,
            y: e.coord.y,
        }
    }
}

/// Verdicts for one input geometry.
#[derive(Debug, Serialize)]
pub struct CheckRow {
    pub index: usize,
    #[serde(rename = "type")]
    pub geometry_type: &'static str,
    pub valid: bool,
    pub error: Option<ErrorReport>,
    pub simple: bool,
    pub non_simple: Vec<[f64; 2]>,
}

pub fn check_geometry(index: usize, g: &Geometry, opts: &CheckOpts) -> CheckRow {
    let error = IsValid::with_cfg(g, opts.valid).validation_error();
    let mut op = IsSimple::with_cfg(g, opts.simple);
    let simple = op.is_simple();
    let non_simple = op.non_simple_locations().iter().map(|c| [c.x, c.y]).collect();
    CheckRow {
        index,
        geometry_type: g.geometry_type(),
        valid: error.is_none(),
        error: error.map(ErrorReport::from),
        simple,
        non_simple,
    }
}

pub fn check_all(geoms: &[Geometry], opts: &CheckOpts) -> Vec<CheckRow> {
    geoms
        .iter()
        .enumerate()
        .map(|(i, g)| check_geometry(i, g, opts))
        .collect()
}

/// One row per geometry; witnesses are flattened to `"x y;x y"`.
pub fn rows_to_frame(rows: &[CheckRow]) -> PolarsResult<DataFrame> {
    let err = |f: fn(&ErrorReport) -> f64| rows.iter().map(|r| r.error.as_ref().map(f)).collect::<Vec<_>>();
    df!(
        "index" => rows.iter().map(|r| r.index as u64).collect::<Vec<_>>(),
        "type" => rows.iter().map(|r| r.geometry_type).collect::<Vec<_>>(),
        "valid" => rows.iter().map(|r| r.valid).collect::<Vec<_>>(),
        "error_code" => rows.iter().map(|r| r.error.as_ref().map(|e| e.code.clone())).collect::<Vec<_>>(),
        "error_x" => err(|e| e.x),
        "error_y" => err(|e| e.y),
        "simple" => rows.iter().map(|r| r.simple).collect::<Vec<_>>(),
        "non_simple_count" => rows.iter().map(|r| r.non_simple.len() as u32).collect::<Vec<_>>(),
        "non_simple" => rows
            .iter()
            .map(|r| {
                r.non_simple
                    .iter()
                    .map(|[x, y]| format!("{x} {y}"))
                    .collect::<Vec<_>>()
                    .join(";")
            })
            .collect::<Vec<_>>()
    )
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TableFormat {
    Csv,
    Parquet,
}

impl TableFormat {
    /// Parquet for `.parquet` paths, CSV otherwise.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("parquet") => TableFormat::Parquet,
            _ => TableFormat::Csv,
        }
    }
}

pub fn write_table(path: &Path, rows: &[CheckRow]) -> Result<TableFormat> {
    let mut df = rows_to_frame(rows)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    let mut file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let format = TableFormat::from_path(path);
    match format {
        TableFormat::Csv => CsvWriter::new(&mut file).include_header(true).finish(&mut df)?,
        TableFormat::Parquet => {
            ParquetWriter::new(&mut file).finish(&mut df)?;
        }
    }
    Ok(format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::parse_str;
    use tempfile::tempdir;

    const INPUT: &str = r#"[
        {"type": "Polygon", "coordinates": [[[0, 0], [2, 2], [2, 0], [0, 2], [0, 0]]]},
        {"type": "LineString", "coordinates": [[0, 0], [1, 0], [1, 1]]},
        {"type": "Point", "coordinates": ["NaN", 0]}
    ]"#;

    #[test]
    fn rows_carry_verdicts() {
        let geoms = parse_str(INPUT).unwrap();
        let rows = check_all(&geoms, &CheckOpts::default());
        assert_eq!(rows.len(), 3);

        assert!(!rows[0].valid);
        let e = rows[0].error.as_ref().unwrap();
        assert_eq!(e.code, "SelfIntersection");
        assert_eq!((e.x, e.y), (1.0, 1.0));
        assert!(!rows[0].simple);
        assert_eq!(rows[0].non_simple, vec![[1.0, 1.0]]);

        assert!(rows[1].valid && rows[1].simple);
        assert_eq!(rows[2].error.as_ref().unwrap().code, "InvalidCoordinate");

        let line = serde_json::to_value(&rows[1]).unwrap();
        assert_eq!(line["type"], "LineString");
        assert!(line["error"].is_null());
    }

    #[test]
    fn csv_table_round_trips_through_polars() {
        let geoms = parse_str(INPUT).unwrap();
        let rows = check_all(&geoms, &CheckOpts::default());
        let dir = tempdir().unwrap();
        let out = dir.path().join("nested/results.csv");
        assert_eq!(write_table(&out, &rows).unwrap(), TableFormat::Csv);

        let df = LazyCsvReader::new(&out)
            .with_infer_schema_length(Some(100))
            .finish()
            .unwrap()
            .collect()
            .unwrap();
        assert_eq!(df.shape(), (3, 9));
        let valid = df.column("valid").unwrap().bool().unwrap();
        assert_eq!(valid.get(0), Some(false));
        assert_eq!(valid.get(1), Some(true));
    }

    #[test]
    fn parquet_chosen_by_extension() {
        assert_eq!(TableFormat::from_path(Path::new("a/b.parquet")), TableFormat::Parquet);
        assert_eq!(TableFormat::from_path(Path::new("a/b.csv")), TableFormat::Csv);
        assert_eq!(TableFormat::from_path(Path::new("out")), TableFormat::Csv);

        let geoms = parse_str(INPUT).unwrap();
        let rows = check_all(&geoms, &CheckOpts::default());
        let dir = tempdir().unwrap();
        let out = dir.path().join("results.parquet");
        write_table(&out, &rows).unwrap();
        assert!(std::fs::metadata(&out).unwrap().len() > 0);
    }
}
