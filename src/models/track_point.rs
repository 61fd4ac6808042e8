use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{IbtracsError, Result};
use crate::models::Category;

/// One observation of a storm at one timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackPoint {
    pub sid: String,
    pub season: i32,
    pub number: u32,
    /// IBTrACS BASIN column (e.g. "NA"); queries use the ATCF-derived `basin`.
    pub agency_basin: String,
    pub sub_basin: String,
    pub name: String,
    pub iso_time: NaiveDateTime,
    pub nature: String,
    pub latitude: f64,
    pub longitude: f64,
    pub wind_speed: Option<f64>,
    pub pressure: Option<f64>,
    pub atcf_id: String,
    pub sshs: Option<i32>,

    // Derived from `atcf_id`
    pub basin: String,
    pub disturbance_id: String,
}

impl TrackPoint {
    pub fn category(&self) -> Category {
        Category::from_optional(self.sshs)
    }

    /// Identity of the storm this point belongs to.
    pub fn storm_key(&self) -> (&str, i32, &str) {
        (&self.basin, self.season, &self.disturbance_id)
    }
}

/// Split an ATCF id into `(basin, disturbance_id)`: characters 0..2 and 2..4.
///
/// Slices the id as given; callers trim the cell. Returns `None` when the
/// id has fewer than four characters.
pub fn split_atcf_id(atcf_id: &str) -> Option<(String, String)> {
    if atcf_id.chars().count() < 4 {
        return None;
    }
    let mut chars = atcf_id.chars();
    let basin: String = chars.by_ref().take(2).collect();
    let disturbance_id: String = chars.take(2).collect();
    Some((basin, disturbance_id))
}

pub struct TrackPointBuilder {
    line: u64,
    sid: Option<String>,
    season: Option<i32>,
    number: u32,
    agency_basin: String,
    sub_basin: String,
    name: String,
    iso_time: Option<NaiveDateTime>,
    nature: String,
    latitude: f64,
    longitude: f64,
    wind_speed: Option<f64>,
    pressure: Option<f64>,
    atcf_id: Option<String>,
    sshs: Option<i32>,
}

impl Default for TrackPointBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TrackPointBuilder {
    pub fn new() -> Self {
        Self {
            line: 0,
            sid: None,
            season: None,
            number: 0,
            agency_basin: String::new(),
            sub_basin: String::new(),
            name: String::new(),
            iso_time: None,
            nature: String::new(),
            latitude: 0.0,
            longitude: 0.0,
            wind_speed: None,
            pressure: None,
            atcf_id: None,
            sshs: None,
        }
    }

    /// Source line, used in error messages.
    pub fn line(mut self, line: u64) -> Self {
        self.line = line;
        self
    }

    pub fn sid(mut self, sid: impl Into<String>) -> Self {
        self.sid = Some(sid.into());
        self
    }

    pub fn season(mut self, season: i32) -> Self {
        self.season = Some(season);
        self
    }

    pub fn number(mut self, number: u32) -> Self {
        self.number = number;
        self
    }

    pub fn agency_basin(mut self, basin: impl Into<String>) -> Self {
        self.agency_basin = basin.into();
        self
    }

    pub fn sub_basin(mut self, sub_basin: impl Into<String>) -> Self {
        self.sub_basin = sub_basin.into();
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn iso_time(mut self, iso_time: NaiveDateTime) -> Self {
        self.iso_time = Some(iso_time);
        self
    }

    pub fn nature(mut self, nature: impl Into<String>) -> Self {
        self.nature = nature.into();
        self
    }

    pub fn position(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = latitude;
        self.longitude = longitude;
        self
    }

    pub fn wind_speed(mut self, wind_speed: Option<f64>) -> Self {
        self.wind_speed = wind_speed;
        self
    }

    pub fn pressure(mut self, pressure: Option<f64>) -> Self {
        self.pressure = pressure;
        self
    }

    pub fn atcf_id(mut self, atcf_id: impl Into<String>) -> Self {
        self.atcf_id = Some(atcf_id.into());
        self
    }

    pub fn sshs(mut self, sshs: Option<i32>) -> Self {
        self.sshs = sshs;
        self
    }

    pub fn build(self) -> Result<TrackPoint> {
        let iso_time = self.iso_time.ok_or_else(|| {
            IbtracsError::InvalidFormat(format!("Line {}: timestamp is required", self.line))
        })?;
        let season = self.season.ok_or_else(|| {
            IbtracsError::InvalidFormat(format!("Line {}: season is required", self.line))
        })?;
        let atcf_id = self.atcf_id.unwrap_or_default();
        let (basin, disturbance_id) =
            split_atcf_id(&atcf_id).ok_or_else(|| IbtracsError::InvalidAtcfId {
                line: self.line,
                value: atcf_id.clone(),
            })?;

        Ok(TrackPoint {
            sid: self.sid.unwrap_or_default(),
            season,
            number: self.number,
            agency_basin: self.agency_basin,
            sub_basin: self.sub_basin,
            name: self.name,
            iso_time,
            nature: self.nature,
            latitude: self.latitude,
            longitude: self.longitude,
            wind_speed: self.wind_speed,
            pressure: self.pressure,
            atcf_id,
            sshs: self.sshs,
            basin,
            disturbance_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn timestamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 8, 20)
            .unwrap()
            .and_hms_opt(6, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_split_atcf_id() {
        assert_eq!(
            split_atcf_id("AL092023"),
            Some(("AL".to_string(), "09".to_string()))
        );
        assert_eq!(
            split_atcf_id("WP01"),
            Some(("WP".to_string(), "01".to_string()))
        );
        assert_eq!(split_atcf_id("AL0"), None);
        assert_eq!(split_atcf_id(" "), None);
        assert_eq!(split_atcf_id(""), None);
        assert_eq!(
            split_atcf_id(" AL0"),
            Some((" A".to_string(), "L0".to_string()))
        );
    }

    #[test]
    fn test_build_derives_basin_and_disturbance() {
        let point = TrackPointBuilder::new()
            .sid("2023232N11326")
            .season(2023)
            .name("FRANKLIN")
            .iso_time(timestamp())
            .atcf_id("AL082023")
            .sshs(Some(4))
            .wind_speed(Some(130.0))
            .build()
            .unwrap();

        assert_eq!(point.basin, "AL");
        assert_eq!(point.disturbance_id, "08");
        assert_eq!(point.category(), Category::Category4);
        assert_eq!(point.storm_key(), ("AL", 2023, "08"));
    }

    #[test]
    fn test_build_rejects_short_atcf_id() {
        let err = TrackPointBuilder::new()
            .line(17)
            .season(2023)
            .iso_time(timestamp())
            .atcf_id("AL")
            .build()
            .unwrap_err();

        match err {
            IbtracsError::InvalidAtcfId { line, value } => {
                assert_eq!(line, 17);
                assert_eq!(value, "AL");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_build_requires_timestamp() {
        let result = TrackPointBuilder::new()
            .season(2023)
            .atcf_id("AL012023")
            .build();
        assert!(result.is_err());
    }
}
