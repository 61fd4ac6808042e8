pub mod basin;
pub mod category;
pub mod table;
pub mod track_point;

pub use basin::{
    basin_info, basin_name, season_title, sub_basin_name, top_title, BasinInfo, MapView,
};
pub use category::Category;
pub use table::TrackTable;
pub use track_point::{split_atcf_id, TrackPoint, TrackPointBuilder};
