use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, BooleanArray, Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

use crate::error::Result;
use crate::mission::record::CaptureRecord;
use crate::track::align::TrackSample;

// ---------------------------------------------------------------------------
// Feature table writers
// ---------------------------------------------------------------------------
// Column layout shared by both writers: fixed columns first, then one
// average per band in table order. Missing positions and absent bands are
// NaN, which both CSV consumers and Parquet readers round-trip cleanly.

const FIXED_COLUMNS: &[&str] = &[
    "sod", "hhmmss", "file", "lat", "lon", "elev", "course", "ir_mean", "is_water", "fl683",
    "fl700",
];

fn band_average(record: &CaptureRecord, name: &str) -> f64 {
    record
        .band_stats
        .get(name)
        .map_or(f64::NAN, |stats| stats.average)
}

/// Write the feature table as CSV, one row per capture.
pub fn write_csv(records: &[CaptureRecord], band_names: &[String], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;

    let mut header: Vec<String> = FIXED_COLUMNS.iter().map(|c| c.to_string()).collect();
    header.extend(band_names.iter().cloned());
    writer.write_record(&header)?;

    for record in records {
        let pos = record.position.unwrap_or(TrackSample::UNKNOWN);
        let mut row = vec![
            record.sod.to_string(),
            record.hhmmss.clone(),
            record.path.display().to_string(),
            pos.lat.to_string(),
            pos.lon.to_string(),
            pos.elev.to_string(),
            pos.course.to_string(),
            record.ir_mean.to_string(),
            record.is_water.to_string(),
            record.fluorescence_683.to_string(),
            record.fluorescence_700.to_string(),
        ];
        for name in band_names {
            row.push(band_average(record, name).to_string());
        }
        writer.write_record(&row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the feature table as Parquet; loads straight into pandas or
/// polars for downstream analysis.
pub fn write_parquet(records: &[CaptureRecord], band_names: &[String], path: &Path) -> Result<()> {
    let mut fields = vec![
        Field::new("sod", DataType::Float64, false),
        Field::new("hhmmss", DataType::Utf8, false),
        Field::new("file", DataType::Utf8, false),
        Field::new("lat", DataType::Float64, false),
        Field::new("lon", DataType::Float64, false),
        Field::new("elev", DataType::Float64, false),
        Field::new("course", DataType::Float64, false),
        Field::new("ir_mean", DataType::Float64, false),
        Field::new("is_water", DataType::Boolean, false),
        Field::new("fl683", DataType::Float64, false),
        Field::new("fl700", DataType::Float64, false),
    ];
    for name in band_names {
        fields.push(Field::new(name.as_str(), DataType::Float64, false));
    }
    let schema = Arc::new(Schema::new(fields));

    let position = |get: fn(&TrackSample) -> f64| -> Float64Array {
        records
            .iter()
            .map(|r| get(&r.position.unwrap_or(TrackSample::UNKNOWN)))
            .collect::<Vec<f64>>()
            .into()
    };

    let mut columns: Vec<ArrayRef> = vec![
        Arc::new(Float64Array::from(
            records.iter().map(|r| r.sod).collect::<Vec<f64>>(),
        )),
        Arc::new(StringArray::from(
            records.iter().map(|r| r.hhmmss.as_str()).collect::<Vec<&str>>(),
        )),
        Arc::new(StringArray::from(
            records
                .iter()
                .map(|r| r.path.display().to_string())
                .collect::<Vec<String>>(),
        )),
        Arc::new(position(|p| p.lat)),
        Arc::new(position(|p| p.lon)),
        Arc::new(position(|p| p.elev)),
        Arc::new(position(|p| p.course)),
        Arc::new(Float64Array::from(
            records.iter().map(|r| r.ir_mean).collect::<Vec<f64>>(),
        )),
        Arc::new(BooleanArray::from(
            records.iter().map(|r| r.is_water).collect::<Vec<bool>>(),
        )),
        Arc::new(Float64Array::from(
            records.iter().map(|r| r.fluorescence_683).collect::<Vec<f64>>(),
        )),
        Arc::new(Float64Array::from(
            records.iter().map(|r| r.fluorescence_700).collect::<Vec<f64>>(),
        )),
    ];
    for name in band_names {
        let averages: Vec<f64> = records.iter().map(|r| band_average(r, name)).collect();
        columns.push(Arc::new(Float64Array::from(averages)));
    }

    let batch = RecordBatch::try_new(schema.clone(), columns)?;
    let file = std::fs::File::create(path)?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}
