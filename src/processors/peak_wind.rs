use crate::models::{Category, TrackPoint};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;

/// One storm's peak sustained wind and its category at that moment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeakWind {
    pub name: String,
    pub season: i32,
    pub disturbance_id: String,
    pub peak_wind: f64,
    pub category_code: Option<i32>,
    pub category: Category,
}

impl PeakWind {
    pub fn category_label(&self) -> &'static str {
        self.category.label()
    }

    fn from_point(point: &TrackPoint, peak_wind: f64) -> Self {
        Self {
            name: point.name.clone(),
            season: point.season,
            disturbance_id: point.disturbance_id.clone(),
            peak_wind,
            category_code: point.sshs,
            category: point.category(),
        }
    }
}

/// Descending by wind, then season, name and disturbance id ascending.
fn ranking_order(a: &PeakWind, b: &PeakWind) -> Ordering {
    b.peak_wind
        .total_cmp(&a.peak_wind)
        .then(a.season.cmp(&b.season))
        .then_with(|| a.name.cmp(&b.name))
        .then_with(|| a.disturbance_id.cmp(&b.disturbance_id))
}

/// Reduce points to one entry per (season, disturbance id, name) and keep
/// the `limit` strongest.
///
/// Missing wind readings never take part in the max; a group without any
/// reading is not ranked. The first point reaching the peak supplies the
/// category.
pub fn rank_by_peak_wind<'a, I>(points: I, limit: usize) -> Vec<PeakWind>
where
    I: IntoIterator<Item = &'a TrackPoint>,
{
    let mut peaks: HashMap<(i32, &str, &str), (&TrackPoint, f64)> = HashMap::new();

    for point in points {
        let Some(wind) = point.wind_speed.filter(|w| !w.is_nan()) else {
            continue;
        };
        let key = (
            point.season,
            point.disturbance_id.as_str(),
            point.name.as_str(),
        );
        peaks
            .entry(key)
            .and_modify(|best| {
                if wind > best.1 {
                    *best = (point, wind);
                }
            })
            .or_insert((point, wind));
    }

    let mut ranked: Vec<PeakWind> = peaks
        .into_values()
        .map(|(point, wind)| PeakWind::from_point(point, wind))
        .collect();
    ranked.sort_by(ranking_order);
    ranked.truncate(limit);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TrackPointBuilder;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn point(
        season: i32,
        atcf_id: &str,
        name: &str,
        hour: u32,
        wind: Option<f64>,
        sshs: i32,
    ) -> TrackPoint {
        TrackPointBuilder::new()
            .season(season)
            .name(name)
            .iso_time(
                NaiveDate::from_ymd_opt(season, 9, 1)
                    .unwrap()
                    .and_hms_opt(hour, 0, 0)
                    .unwrap(),
            )
            .atcf_id(atcf_id)
            .wind_speed(wind)
            .sshs(Some(sshs))
            .build()
            .unwrap()
    }

    #[test]
    fn test_peak_takes_category_of_peak_row() {
        let points = vec![
            point(2005, "AL122005", "KATRINA", 0, Some(150.0), 5),
            point(2005, "AL122005", "KATRINA", 6, Some(110.0), 3),
            point(2005, "AL122005", "KATRINA", 12, None, 1),
        ];

        let ranked = rank_by_peak_wind(&points, 10);

        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].peak_wind, 150.0);
        assert_eq!(ranked[0].category, Category::Category5);
        assert_eq!(ranked[0].category_label(), "Category 5");
    }

    #[test]
    fn test_first_row_wins_ties() {
        let points = vec![
            point(2010, "AL012010", "ALEX", 0, Some(95.0), 2),
            point(2010, "AL012010", "ALEX", 6, Some(95.0), 1),
        ];

        let ranked = rank_by_peak_wind(&points, 10);

        assert_eq!(ranked[0].category_code, Some(2));
    }

    #[test]
    fn test_missing_wind_never_ranks_as_zero() {
        let points = vec![
            point(2010, "AL012010", "ALEX", 0, None, 1),
            point(2010, "AL022010", "BONNIE", 0, Some(35.0), 0),
        ];

        let ranked = rank_by_peak_wind(&points, 10);

        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].name, "BONNIE");
    }

    #[test]
    fn test_order_and_tie_breaks() {
        let points = vec![
            point(2011, "AL022011", "BRET", 0, Some(80.0), 1),
            point(2010, "AL052010", "EARL", 0, Some(80.0), 1),
            point(2010, "AL042010", "DANIELLE", 0, Some(80.0), 1),
            point(2010, "AL072010", "IGOR", 0, Some(135.0), 4),
        ];

        let ranked = rank_by_peak_wind(&points, 10);

        let names: Vec<&str> = ranked.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["IGOR", "DANIELLE", "EARL", "BRET"]);
    }

    #[test]
    fn test_limit_bounds_result() {
        let points: Vec<TrackPoint> = (1..=15)
            .map(|n| {
                point(
                    2020,
                    &format!("WP{:02}2020", n),
                    &format!("STORM{}", n),
                    0,
                    Some(30.0 + n as f64),
                    0,
                )
            })
            .collect();

        let ranked = rank_by_peak_wind(&points, 10);

        assert_eq!(ranked.len(), 10);
        assert_eq!(ranked[0].peak_wind, 45.0);
        assert!(ranked.windows(2).all(|w| w[0].peak_wind >= w[1].peak_wind));
        assert!(rank_by_peak_wind(&points, 0).is_empty());
    }

    #[test]
    fn test_same_name_different_disturbance_kept_apart() {
        let points = vec![
            point(2020, "AL012020", "UNNAMED", 0, Some(30.0), -1),
            point(2020, "AL022020", "UNNAMED", 0, Some(40.0), 0),
        ];

        assert_eq!(rank_by_peak_wind(&points, 10).len(), 2);
    }
}
