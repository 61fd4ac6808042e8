use crate::error::{IbtracsError, Result};
use crate::models::{split_atcf_id, TrackPoint, TrackPointBuilder, TrackTable};
use crate::utils::constants::*;
use chrono::{NaiveDate, NaiveDateTime};
use csv::StringRecord;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

/// Column positions resolved from the header row.
struct ColumnIndex {
    positions: HashMap<&'static str, usize>,
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let mut positions = HashMap::with_capacity(REQUIRED_COLUMNS.len());
        for column in REQUIRED_COLUMNS {
            let position = headers
                .iter()
                .position(|h| h.trim() == column)
                .ok_or_else(|| IbtracsError::MissingColumn(column.to_string()))?;
            positions.insert(column, position);
        }
        Ok(Self { positions })
    }

    fn get<'r>(&self, record: &'r StringRecord, column: &'static str) -> &'r str {
        self.positions
            .get(column)
            .and_then(|&i| record.get(i))
            .unwrap_or("")
            .trim()
    }
}

/// Reads the IBTrACS CSV list into a [`TrackTable`].
pub struct TrackReader {
    skip_metadata_row: bool,
    require_atcf_id: bool,
}

impl TrackReader {
    pub fn new() -> Self {
        Self {
            skip_metadata_row: true,
            require_atcf_id: true,
        }
    }

    pub fn with_skip_metadata_row(mut self, skip_metadata_row: bool) -> Self {
        self.skip_metadata_row = skip_metadata_row;
        self
    }

    /// When false, rows with a blank or short ATCF id are dropped instead of
    /// failing the load.
    pub fn with_require_atcf_id(mut self, require_atcf_id: bool) -> Self {
        self.require_atcf_id = require_atcf_id;
        self
    }

    /// Read the track file at `path`
    pub fn read_table(&self, path: &Path) -> Result<TrackTable> {
        info!(path = %path.display(), "reading track file");
        let file = File::open(path)?;
        self.read_from(file)
    }

    /// Read track rows from any CSV source
    pub fn read_from<R: Read>(&self, source: R) -> Result<TrackTable> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(source);

        let headers = reader.headers()?.clone();
        let columns = ColumnIndex::from_headers(&headers)?;

        let mut points = Vec::new();
        let mut skipped = 0usize;

        for (index, record) in reader.records().enumerate() {
            let record = record?;

            // Units row directly beneath the header
            if self.skip_metadata_row && index == 0 {
                continue;
            }

            let line = record.position().map_or(index as u64 + 2, |p| p.line());
            match self.parse_record(&record, &columns, line)? {
                Some(point) => points.push(point),
                None => skipped += 1,
            }
        }

        if skipped > 0 {
            warn!(skipped, "dropped rows without a usable ATCF id");
        }
        info!(rows = points.len(), "track table loaded");

        Ok(TrackTable::new(points))
    }

    /// Parse a single data row
    fn parse_record(
        &self,
        record: &StringRecord,
        columns: &ColumnIndex,
        line: u64,
    ) -> Result<Option<TrackPoint>> {
        let iso_time = parse_timestamp(columns.get(record, COL_ISO_TIME), line)?;

        let atcf_id = columns.get(record, COL_USA_ATCF_ID);
        if split_atcf_id(atcf_id).is_none() {
            if self.require_atcf_id {
                return Err(IbtracsError::InvalidAtcfId {
                    line,
                    value: atcf_id.to_string(),
                });
            }
            debug!(line, atcf_id, "skipping row without ATCF id");
            return Ok(None);
        }

        let field = |column: &'static str| columns.get(record, column);

        let wind_speed = parse_optional_f64(field(COL_USA_WIND), COL_USA_WIND, line)?;
        let pressure = parse_optional_f64(field(COL_USA_PRES), COL_USA_PRES, line)?;
        let sshs = parse_optional_i32(field(COL_USA_SSHS), COL_USA_SSHS, line)?;

        let season = parse_required::<i32>(field(COL_SEASON), COL_SEASON, line)?;
        let number = parse_required::<u32>(field(COL_NUMBER), COL_NUMBER, line)?;
        let latitude = parse_required::<f64>(field(COL_LAT), COL_LAT, line)?;
        let longitude = parse_required::<f64>(field(COL_LON), COL_LON, line)?;

        let point = TrackPointBuilder::new()
            .line(line)
            .sid(field(COL_SID))
            .season(season)
            .number(number)
            .agency_basin(field(COL_BASIN))
            .sub_basin(field(COL_SUBBASIN))
            .name(field(COL_NAME))
            .iso_time(iso_time)
            .nature(field(COL_NATURE))
            .position(latitude, longitude)
            .wind_speed(wind_speed)
            .pressure(pressure)
            .atcf_id(atcf_id)
            .sshs(sshs)
            .build()?;

        Ok(Some(point))
    }
}

impl Default for TrackReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse an ISO_TIME cell; a bare date means midnight.
pub fn parse_timestamp(value: &str, line: u64) -> Result<NaiveDateTime> {
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(|| IbtracsError::InvalidTimestamp {
            line,
            value: value.to_string(),
        })
}

/// Blank, whitespace-only and non-finite cells (`nan`, `inf`) are missing
/// values, never zero.
pub fn parse_optional_f64(value: &str, column: &'static str, line: u64) -> Result<Option<f64>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<f64>()
        .map(|v| Some(v).filter(|v| v.is_finite()))
        .map_err(|_| IbtracsError::InvalidNumber {
            line,
            column,
            value: value.to_string(),
        })
}

fn parse_optional_i32(value: &str, column: &'static str, line: u64) -> Result<Option<i32>> {
    if value.trim().is_empty() {
        return Ok(None);
    }
    parse_required(value, column, line).map(Some)
}

fn parse_required<T: std::str::FromStr>(value: &str, column: &'static str, line: u64) -> Result<T> {
    value
        .trim()
        .parse::<T>()
        .map_err(|_| IbtracsError::InvalidNumber {
            line,
            column,
            value: value.to_string(),
        })
}
