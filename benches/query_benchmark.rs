use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ibtracs_explorer::models::{TrackPoint, TrackPointBuilder, TrackTable};
use ibtracs_explorer::processors::{DateRange, TrackQuery};
use ibtracs_explorer::readers::TrackReader;
use std::sync::Arc;

const BASINS: [&str; 3] = ["AL", "EP", "WP"];

// Six-hourly fixes for `storms` disturbances per basin and season
fn create_test_points(seasons: i32, storms: u32, fixes: u32) -> Vec<TrackPoint> {
    let mut points = Vec::new();

    for season in 2000..2000 + seasons {
        for basin in BASINS {
            for storm in 1..=storms {
                let genesis = NaiveDate::from_ymd_opt(season, 6, 1)
                    .unwrap()
                    .and_hms_opt(0, 0, 0)
                    .unwrap()
                    + Duration::days(storm as i64 * 3);

                for fix in 0..fixes {
                    let wind = 30.0 + ((fix * 7 + storm * 11) % 130) as f64;
                    let point = TrackPointBuilder::new()
                        .sid(format!("{}{:03}", season, storm))
                        .season(season)
                        .number(storm)
                        .name(format!("STORM{}", storm))
                        .iso_time(genesis + Duration::hours(fix as i64 * 6))
                        .nature("TS")
                        .position(10.0 + fix as f64 * 0.2, -40.0 - fix as f64 * 0.3)
                        .wind_speed(Some(wind))
                        .pressure(Some(1010.0 - wind / 2.0))
                        .atcf_id(format!("{}{:02}{}", basin, storm, season))
                        .sshs(Some(((wind as i32) / 25) - 1))
                        .build()
                        .unwrap();
                    points.push(point);
                }
            }
        }
    }

    points
}

fn create_test_csv(rows: usize) -> String {
    let mut text = String::from(
        "SID,SEASON,NUMBER,BASIN,SUBBASIN,NAME,ISO_TIME,NATURE,LAT,LON,USA_ATCF_ID,USA_WIND,USA_PRES,USA_SSHS\n",
    );
    text.push_str(" ,Year, , , , , , ,degrees_north,degrees_east, ,kts,mb,1\n");
    for i in 0..rows {
        let storm = i / 40 % 99 + 1;
        text.push_str(&format!(
            "2020{:03},2020,{},NA,MM,STORM{},2020-07-01 00:00:00,TS,15.0,-45.0,AL{:02}2020,{},990,1\n",
            storm,
            storm,
            storm,
            storm,
            40 + i % 100
        ));
    }
    text
}

fn benchmark_read(c: &mut Criterion) {
    let mut group = c.benchmark_group("track_reader");

    for rows in [1_000, 10_000] {
        let csv = create_test_csv(rows);
        group.bench_with_input(BenchmarkId::new("read_from", rows), &csv, |b, csv| {
            b.iter(|| {
                let table = TrackReader::new().read_from(black_box(csv.as_bytes())).unwrap();
                black_box(table);
            });
        });
    }

    group.finish();
}

fn benchmark_tracks_for(c: &mut Criterion) {
    let query = TrackQuery::new(Arc::new(TrackTable::new(create_test_points(20, 15, 40))));
    let range = DateRange::days(
        NaiveDate::from_ymd_opt(2010, 6, 1).unwrap(),
        NaiveDate::from_ymd_opt(2010, 8, 1).unwrap(),
    )
    .unwrap();
    let ids: Vec<String> = (1..=15).map(|i| format!("{:02}", i)).collect();

    c.bench_function("disturbances_in_range", |b| {
        b.iter(|| black_box(query.disturbances_in_range(black_box("AL"), 2010, range)));
    });

    c.bench_function("tracks_grouped", |b| {
        b.iter(|| black_box(query.tracks_grouped(black_box("AL"), 2010, &ids, range)));
    });
}

fn benchmark_top_by_peak_wind(c: &mut Criterion) {
    let mut group = c.benchmark_group("top_by_peak_wind");

    for seasons in [5, 20] {
        let query = TrackQuery::new(Arc::new(TrackTable::new(create_test_points(seasons, 15, 40))));
        group.bench_with_input(BenchmarkId::new("seasons", seasons), &query, |b, query| {
            b.iter(|| {
                black_box(
                    query
                        .top_by_peak_wind(black_box("EP"), 2000, 2000 + seasons, 10)
                        .unwrap(),
                )
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_read,
    benchmark_tracks_for,
    benchmark_top_by_peak_wind
);
criterion_main!(benches);
