use serde::{Deserialize, Serialize};

/// Color used for any code outside the Saffir-Simpson table.
pub const OTHER_COLOR: &str = "gray";

/// Marker size used for any code without a dedicated size.
pub const DEFAULT_MARKER_SIZE: f64 = 6.0;

/// Saffir-Simpson intensity bucket as reported in USA_SSHS.
///
/// Every integer resolves to a bucket: codes outside -5..=5 (and rows with
/// no code at all) land in [`Category::Unspecified`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Unknown,            // -5
    PostTropical,       // -4
    Disturbance,        // -3
    Subtropical,        // -2
    TropicalDepression, // -1
    TropicalStorm,      // 0
    Category1,
    Category2,
    Category3,
    Category4,
    Category5,
    Unspecified,
}

impl Category {
    /// The eleven defined buckets in code order, for colour bars and legends.
    pub const LEGEND: [Category; 11] = [
        Category::Unknown,
        Category::PostTropical,
        Category::Disturbance,
        Category::Subtropical,
        Category::TropicalDepression,
        Category::TropicalStorm,
        Category::Category1,
        Category::Category2,
        Category::Category3,
        Category::Category4,
        Category::Category5,
    ];

    pub fn from_code(code: i32) -> Self {
        match code {
            -5 => Category::Unknown,
            -4 => Category::PostTropical,
            -3 => Category::Disturbance,
            -2 => Category::Subtropical,
            -1 => Category::TropicalDepression,
            0 => Category::TropicalStorm,
            1 => Category::Category1,
            2 => Category::Category2,
            3 => Category::Category3,
            4 => Category::Category4,
            5 => Category::Category5,
            _ => Category::Unspecified,
        }
    }

    /// Resolve an optional USA_SSHS value; a blank cell is unspecified.
    pub fn from_optional(code: Option<i32>) -> Self {
        code.map_or(Category::Unspecified, Category::from_code)
    }

    pub fn code(&self) -> Option<i32> {
        match self {
            Category::Unknown => Some(-5),
            Category::PostTropical => Some(-4),
            Category::Disturbance => Some(-3),
            Category::Subtropical => Some(-2),
            Category::TropicalDepression => Some(-1),
            Category::TropicalStorm => Some(0),
            Category::Category1 => Some(1),
            Category::Category2 => Some(2),
            Category::Category3 => Some(3),
            Category::Category4 => Some(4),
            Category::Category5 => Some(5),
            Category::Unspecified => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Unknown => "Unknown",
            Category::PostTropical => "Post-tropical",
            Category::Disturbance => "Disturbance",
            Category::Subtropical => "Subtropical",
            Category::TropicalDepression => "Tropical depression",
            Category::TropicalStorm => "Tropical storm",
            Category::Category1 => "Category 1",
            Category::Category2 => "Category 2",
            Category::Category3 => "Category 3",
            Category::Category4 => "Category 4",
            Category::Category5 => "Category 5",
            Category::Unspecified => "Unspecified",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Category::Unknown => "black",
            Category::PostTropical | Category::Disturbance | Category::Subtropical => "gray",
            Category::TropicalDepression => "#3BDBE8",
            Category::TropicalStorm => "#3185D3",
            Category::Category1 => "#F2E205",
            Category::Category2 => "#F28705",
            Category::Category3 => "#D90404",
            Category::Category4 => "#D84DDB",
            Category::Category5 => "#8B0088",
            Category::Unspecified => OTHER_COLOR,
        }
    }

    pub fn marker_size(&self) -> f64 {
        match self {
            Category::TropicalDepression => 6.0,
            Category::TropicalStorm => 6.5,
            Category::Category1 => 7.0,
            Category::Category2 => 7.5,
            Category::Category3 => 8.0,
            Category::Category4 => 8.5,
            Category::Category5 => 9.0,
            Category::Unknown
            | Category::PostTropical
            | Category::Disturbance
            | Category::Subtropical
            | Category::Unspecified => DEFAULT_MARKER_SIZE,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
