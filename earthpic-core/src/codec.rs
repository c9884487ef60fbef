//! Text encodings for sample sets.
//!
//! The primary format is comma-delimited text with one record per sample and
//! the fields `lat,lon,r,g,b`. Whole numbers are written as integer literals
//! and every other value with three decimal places, so a round trip preserves
//! each field to three decimals. With the `serde` feature a JSON array of
//! sample objects is also supported.

use std::path::Path;

use thiserror::Error;

use crate::{Sample, SampleSet};

/// Number of fields in a CSV sample record.
pub const FIELD_COUNT: usize = 5;

/// Field names in record order, used in error messages.
const FIELD_NAMES: [&str; FIELD_COUNT] = ["lat", "lon", "r", "g", "b"];

/// Errors raised while decoding or encoding a sample set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// The delimited-text reader or writer failed.
    #[error("malformed sample data: {message}")]
    Csv {
        /// Message reported by the CSV layer.
        message: String,
    },
    /// A record did not contain exactly five fields.
    #[error("line {line}: expected {} fields, found {found}", FIELD_COUNT)]
    FieldCount {
        /// One-based line number of the offending record.
        line: u64,
        /// Number of fields present.
        found: usize,
    },
    /// A field was not a finite floating-point literal.
    #[error("line {line}: field {field} is not a valid number: {value:?}")]
    InvalidNumber {
        /// One-based line number of the offending record.
        line: u64,
        /// Name of the field that failed to parse.
        field: &'static str,
        /// Raw field contents.
        value: String,
    },
    /// JSON decoding or encoding failed.
    #[cfg(feature = "serde")]
    #[error("malformed sample JSON: {message}")]
    Json {
        /// Message reported by `serde_json`.
        message: String,
    },
}

/// On-disk representation of a sample set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SampleFormat {
    /// Comma-delimited `lat,lon,r,g,b` records.
    #[default]
    Csv,
    /// A JSON array of sample objects.
    #[cfg(feature = "serde")]
    Json,
}

impl SampleFormat {
    /// Choose a format from a file extension.
    ///
    /// `.json` selects JSON when the `serde` feature is enabled; every other
    /// extension, or none, selects CSV.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            #[cfg(feature = "serde")]
            Some("json") => Self::Json,
            _ => Self::Csv,
        }
    }
}

/// Format one numeric field.
///
/// # Examples
///
/// ```
/// use earthpic_core::codec::format_field;
///
/// assert_eq!(format_field(-90.0), "-90");
/// assert_eq!(format_field(0.123_456), "0.123");
/// assert_eq!(format_field(1.0 / 3.0), "0.333");
/// ```
#[must_use]
pub fn format_field(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.3}")
    }
}

/// Encode `samples` in the requested format.
///
/// # Errors
///
/// Returns a [`FormatError`] if the underlying writer fails.
pub fn encode(samples: &SampleSet, format: SampleFormat) -> Result<Vec<u8>, FormatError> {
    match format {
        SampleFormat::Csv => encode_csv(samples),
        #[cfg(feature = "serde")]
        SampleFormat::Json => serde_json::to_vec(samples).map_err(|err| FormatError::Json {
            message: err.to_string(),
        }),
    }
}

/// Decode a sample set from `data` in the requested format.
///
/// # Errors
///
/// Returns a [`FormatError`] when a record has the wrong number of fields, a
/// field is not a finite number, or the input is otherwise malformed.
pub fn decode(data: &[u8], format: SampleFormat) -> Result<SampleSet, FormatError> {
    match format {
        SampleFormat::Csv => decode_csv(data),
        #[cfg(feature = "serde")]
        SampleFormat::Json => serde_json::from_slice(data).map_err(|err| FormatError::Json {
            message: err.to_string(),
        }),
    }
}

fn csv_error(err: &csv::Error) -> FormatError {
    FormatError::Csv {
        message: err.to_string(),
    }
}

fn encode_csv(samples: &SampleSet) -> Result<Vec<u8>, FormatError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    for sample in samples {
        let record = [sample.lat, sample.lon, sample.r, sample.g, sample.b].map(format_field);
        writer.write_record(&record).map_err(|err| csv_error(&err))?;
    }
    writer.into_inner().map_err(|err| FormatError::Csv {
        message: err.to_string(),
    })
}

fn decode_csv(data: &[u8]) -> Result<SampleSet, FormatError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(data);

    let mut samples = SampleSet::new();
    for result in reader.records() {
        let record = result.map_err(|err| csv_error(&err))?;
        let line = record.position().map_or(0, csv::Position::line);
        samples.push(parse_record(&record, line)?);
    }
    Ok(samples)
}

fn parse_record(record: &csv::StringRecord, line: u64) -> Result<Sample, FormatError> {
    if record.len() != FIELD_COUNT {
        return Err(FormatError::FieldCount {
            line,
            found: record.len(),
        });
    }
    let mut values = [0.0_f64; FIELD_COUNT];
    for ((slot, raw), field) in values.iter_mut().zip(record.iter()).zip(FIELD_NAMES) {
        *slot = parse_field(raw, line, field)?;
    }
    let [lat, lon, r, g, b] = values;
    Ok(Sample { lat, lon, r, g, b })
}

fn parse_field(raw: &str, line: u64, field: &'static str) -> Result<f64, FormatError> {
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| FormatError::InvalidNumber {
            line,
            field,
            value: raw.to_owned(),
        })
}
