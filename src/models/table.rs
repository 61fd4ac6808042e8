use std::collections::BTreeSet;

use crate::models::TrackPoint;

/// Immutable in-memory track table.
///
/// Built once from the loaded rows; queries borrow from it and never mutate.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackTable {
    points: Vec<TrackPoint>,
    seasons: Vec<i32>,
    basins: Vec<String>,
}

impl TrackTable {
    pub fn new(points: Vec<TrackPoint>) -> Self {
        let seasons: BTreeSet<i32> = points.iter().map(|p| p.season).collect();
        let basins: BTreeSet<&str> = points.iter().map(|p| p.basin.as_str()).collect();
        let basins = basins.into_iter().map(str::to_string).collect();

        Self {
            seasons: seasons.into_iter().collect(),
            basins,
            points,
        }
    }

    pub fn points(&self) -> &[TrackPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Distinct seasons, ascending.
    pub fn seasons(&self) -> &[i32] {
        &self.seasons
    }

    /// Distinct ATCF basin codes, ascending.
    pub fn basins(&self) -> &[String] {
        &self.basins
    }

    pub fn season_span(&self) -> Option<(i32, i32)> {
        Some((*self.seasons.first()?, *self.seasons.last()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TrackPointBuilder;
    use chrono::NaiveDate;

    fn point(season: i32, atcf_id: &str) -> TrackPoint {
        TrackPointBuilder::new()
            .season(season)
            .iso_time(
                NaiveDate::from_ymd_opt(season, 7, 1)
                    .unwrap()
                    .and_hms_opt(0, 0, 0)
                    .unwrap(),
            )
            .atcf_id(atcf_id)
            .build()
            .unwrap()
    }

    #[test]
    fn test_derived_lookups_are_sorted_and_distinct() {
        let table = TrackTable::new(vec![
            point(2021, "EP012021"),
            point(1999, "AL031999"),
            point(2021, "AL052021"),
            point(1999, "AL031999"),
        ]);

        assert_eq!(table.len(), 4);
        assert_eq!(table.seasons(), &[1999, 2021]);
        assert_eq!(table.basins(), &["AL".to_string(), "EP".to_string()]);
        assert_eq!(table.season_span(), Some((1999, 2021)));
    }

    #[test]
    fn test_empty_table() {
        let table = TrackTable::new(Vec::new());
        assert!(table.is_empty());
        assert!(table.seasons().is_empty());
        assert_eq!(table.season_span(), None);
    }
}
