use serde::Serialize;

/// Rows shorter than this predate the full field table and are skipped.
pub const MIN_ROW_LEN: usize = 11;

/// Column positions in a `complete` preset row (name first, then fields).
pub(super) mod column {
    pub const NAME: usize = 0;
    pub const PRICE: usize = 1;
    pub const AVAILABILITY: usize = 2;
    pub const CAPACITY: usize = 4;
    pub const C_RATE: usize = 6;
    pub const POWER_FACTOR: usize = 7;
    pub const SIZE: usize = 8;
    pub const WEIGHT: usize = 9;
    pub const WIRE_SIZE: usize = 10;
}

/// Product series, recognized from the product name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    #[serde(rename = "E")]
    Economy,
    #[serde(rename = "P")]
    HighPerformance,
    #[serde(rename = "V")]
    HighVoltage,
    #[serde(rename = "R")]
    Racing,
    #[serde(rename = "S")]
    Speedrun,
    #[serde(rename = "?")]
    Unknown,
}

/// Name fragments in match order; the first one contained in a name wins.
const SERIES: [(&str, Category); 5] = [
    ("HCL-EC", Category::Economy),
    ("HCL-HP", Category::HighPerformance),
    ("HCL-HV2", Category::HighVoltage),
    ("HCL-RS", Category::Racing),
    ("SRD-V4", Category::Speedrun),
];

impl Category {
    pub fn from_name(name: &str) -> Self {
        SERIES
            .iter()
            .find(|(fragment, _)| name.contains(fragment))
            .map(|(_, category)| *category)
            .unwrap_or(Category::Unknown)
    }

    pub fn code(self) -> char {
        match self {
            Category::Economy => 'E',
            Category::HighPerformance => 'P',
            Category::HighVoltage => 'V',
            Category::Racing => 'R',
            Category::Speedrun => 'S',
            Category::Unknown => '?',
        }
    }

    pub fn full_name(self) -> &'static str {
        match self {
            Category::Economy => "HCL-EC (Economy)",
            Category::HighPerformance => "HCL-HP (High Performance)",
            Category::HighVoltage => "HCL-HV2 (High Voltage)",
            Category::Racing => "HCL-RS (Racing Series)",
            Category::Speedrun => "SRD-V4 (Speedrun)",
            Category::Unknown => "Unknown",
        }
    }
}

/// Plot marker, chosen by wire gauge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Marker {
    Circle,
    Square,
    Triangle,
}

impl Marker {
    pub fn for_wire(awg: Option<u64>) -> Self {
        match awg {
            Some(10) => Marker::Square,
            Some(12) => Marker::Triangle,
            _ => Marker::Circle,
        }
    }
}

/// One battery placed by capacity density.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatteryPoint {
    pub name: String,
    pub category: Category,
    pub in_stock: bool,
    pub capacity_mah: f64,
    pub volume_mm3: f64,
    pub weight_g: f64,
    pub price: f64,
    pub c_rate: Option<u64>,
    pub power_factor: Option<u64>,
    pub wire_awg: Option<u64>,
    pub marker: Marker,
    /// Volumetric density, mAh / mm³.
    pub mah_per_mm3: f64,
    /// Gravimetric density, mAh / g.
    pub mah_per_g: f64,
    /// Both densities min-max scaled to `0..=1` across the whole analysis.
    pub normalized: [f64; 2],
    pub label: String,
}

/// Tree edge between two points, as indices into [`Analysis::points`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Edge {
    pub from: usize,
    pub to: usize,
    /// Euclidean distance in normalized space.
    pub length: f64,
}

/// Points of one category and the minimum spanning tree joining them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryCluster {
    pub category: Category,
    pub name: &'static str,
    pub members: Vec<usize>,
    pub edges: Vec<Edge>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Analysis {
    pub points: Vec<BatteryPoint>,
    pub clusters: Vec<CategoryCluster>,
    /// Rows that were too short or lacked a usable size, weight, or capacity.
    pub skipped: usize,
}
