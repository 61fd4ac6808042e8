/// Remote IBTrACS "since 1980" track list
pub const IBTRACS_URL: &str = "https://www.ncei.noaa.gov/data/international-best-track-archive-for-climate-stewardship-ibtracs/v04r00/access/csv/ibtracs.since1980.list.v04r00.csv";

/// Local file location
pub const DEFAULT_DATA_PATH: &str = "data/ibtracs.since1980.list.v04r00.csv";

/// Column names
pub const COL_SID: &str = "SID";
pub const COL_SEASON: &str = "SEASON";
pub const COL_NUMBER: &str = "NUMBER";
pub const COL_BASIN: &str = "BASIN";
pub const COL_SUBBASIN: &str = "SUBBASIN";
pub const COL_NAME: &str = "NAME";
pub const COL_ISO_TIME: &str = "ISO_TIME";
pub const COL_NATURE: &str = "NATURE";
pub const COL_LAT: &str = "LAT";
pub const COL_LON: &str = "LON";
pub const COL_USA_WIND: &str = "USA_WIND";
pub const COL_USA_PRES: &str = "USA_PRES";
pub const COL_USA_ATCF_ID: &str = "USA_ATCF_ID";
pub const COL_USA_SSHS: &str = "USA_SSHS";

/// Columns read from the track file; anything else is ignored.
pub const REQUIRED_COLUMNS: [&str; 14] = [
    COL_SID,
    COL_SEASON,
    COL_NUMBER,
    COL_BASIN,
    COL_SUBBASIN,
    COL_NAME,
    COL_ISO_TIME,
    COL_NATURE,
    COL_LAT,
    COL_LON,
    COL_USA_WIND,
    COL_USA_PRES,
    COL_USA_ATCF_ID,
    COL_USA_SSHS,
];

/// Timestamp formats accepted for ISO_TIME, tried in order
pub const TIMESTAMP_FORMATS: [&str; 3] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Query defaults
pub const DEFAULT_TOP_LIMIT: usize = 10;

/// Config
pub const CONFIG_FILE: &str = "ibtracs";
pub const ENV_PREFIX: &str = "IBTRACS";
