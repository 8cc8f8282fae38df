use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::detect::Detection;
use crate::error::Result;

/// One CSV row per detection. Besides position and radius, the row carries
/// the derived disk measures downstream consumers expect, plus the
/// detector's response score.
#[derive(Debug, Serialize)]
struct DetectionRecord {
    longitude: f64,
    latitude: f64,
    radius: f64,
    diameter: f64,
    circumference: f64,
    area: f64,
    response: f32,
}

impl From<&Detection> for DetectionRecord {
    fn from(det: &Detection) -> Self {
        Self {
            longitude: det.longitude,
            latitude: det.latitude,
            radius: det.radius,
            diameter: det.diameter(),
            circumference: det.circumference(),
            area: det.area(),
            response: det.response,
        }
    }
}

/// Write detections to a CSV file, one row per detection, header included.
/// An empty detection set produces a header-only file.
pub fn write_detections(path: &Path, detections: &[Detection]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for det in detections {
        writer.serialize(DetectionRecord::from(det))?;
    }
    // serialize() only emits the header alongside the first record.
    if detections.is_empty() {
        writer.write_record([
            "longitude",
            "latitude",
            "radius",
            "diameter",
            "circumference",
            "area",
            "response",
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Concatenate every per-tile CSV in `results_dir` into a single file with
/// one header. Files are visited in lexicographic name order so the merged
/// output is reproducible. Returns the number of merged rows.
pub fn merge_results(results_dir: &Path, out_path: &Path) -> Result<usize> {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(results_dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.extension().and_then(|e| e.to_str()) == Some("csv"))
        .collect();
    paths.sort();

    let mut writer = csv::Writer::from_path(out_path)?;
    let mut wrote_header = false;
    let mut rows = 0usize;

    for path in paths {
        let mut reader = csv::Reader::from_path(&path)?;
        if !wrote_header {
            writer.write_record(reader.headers()?)?;
            wrote_header = true;
        }
        for record in reader.records() {
            writer.write_record(&record?)?;
            rows += 1;
        }
    }

    writer.flush()?;
    Ok(rows)
}

/// Record the names of tiles whose fetch or analysis failed, one per row,
/// so a later run can retry just those.
pub fn write_failed(path: &Path, names: &[String]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["filename"])?;
    for name in names {
        writer.write_record([name.as_str()])?;
    }
    writer.flush()?;
    Ok(())
}
