use serde::Serialize;

/// Default map framing for a basin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapView {
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BasinInfo {
    pub code: &'static str,
    pub name: &'static str,
    pub view: Option<MapView>,
}

const fn view(latitude: f64, longitude: f64, zoom: f64) -> Option<MapView> {
    Some(MapView {
        latitude,
        longitude,
        zoom,
    })
}

/// Basins keyed by the two-letter ATCF prefix.
pub const BASINS: [BasinInfo; 11] = [
    BasinInfo {
        code: "AL",
        name: "North Atlantic",
        view: view(23.0, -52.0, 2.5),
    },
    BasinInfo {
        code: "EP",
        name: "East Pacific",
        view: view(18.0, -115.0, 3.0),
    },
    BasinInfo {
        code: "WP",
        name: "West Pacific",
        view: view(25.0, 127.0, 3.0),
    },
    BasinInfo {
        code: "IO",
        name: "North Indian",
        view: view(5.0, 80.0, 3.0),
    },
    BasinInfo {
        code: "SI",
        name: "South Indian",
        view: view(-18.0, 80.0, 3.0),
    },
    BasinInfo {
        code: "SP",
        name: "South Pacific",
        view: view(-23.0, 165.0, 3.0),
    },
    BasinInfo {
        code: "SL",
        name: "South Atlantic",
        view: None,
    },
    BasinInfo {
        code: "SH",
        name: "Southern Hemisphere",
        view: view(-10.0, 130.0, 4.0),
    },
    BasinInfo {
        code: "CP",
        name: "Central Pacific",
        view: view(0.0, 180.0, 2.0),
    },
    BasinInfo {
        code: "AS",
        name: "Arabian Sea",
        view: view(20.0, 60.0, 4.0),
    },
    BasinInfo {
        code: "BB",
        name: "Bay of Bengal",
        view: view(20.0, 85.0, 4.0),
    },
];

const SUB_BASINS: [(&str, &str); 7] = [
    ("CS", "Caribbean Sea"),
    ("GM", "Gulf of Mexico"),
    ("CP", "Central Pacific"),
    ("BB", "Bay of Bengal"),
    ("AS", "Arabian Sea"),
    ("WA", "Western Australia"),
    ("EA", "Eastern Australia"),
];

pub fn basin_info(code: &str) -> Option<&'static BasinInfo> {
    BASINS.iter().find(|b| b.code == code)
}

/// Display name for a basin code, falling back to the code itself.
pub fn basin_name(code: &str) -> &str {
    basin_info(code).map_or(code, |b| b.name)
}

pub fn sub_basin_name(code: &str) -> Option<&'static str> {
    SUB_BASINS
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
}

/// "2023-North Atlantic hurricane season"
pub fn season_title(season: i32, basin: &str) -> String {
    format!("{}-{} hurricane season", season, basin_name(basin))
}

/// "Top 10 Cyclones by Maximum Wind Speed - North Atlantic (1980-2023)"
pub fn top_title(basin: &str, season_start: i32, season_end: i32, limit: usize) -> String {
    let time_range = if season_start != season_end {
        format!("{}-{}", season_start, season_end)
    } else {
        season_start.to_string()
    };
    format!(
        "Top {} Cyclones by Maximum Wind Speed - {} ({})",
        limit,
        basin_name(basin),
        time_range
    )
}
