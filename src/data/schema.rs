// ---------------------------------------------------------------------------
// Column names as they appear in the source headers (verbatim)
// ---------------------------------------------------------------------------

pub const YEAR: &str = "Year";

pub const HURRICANES_ADJUSTED: &str = "Total hurricanes (adjusted)";
pub const HURRICANES_UNADJUSTED: &str = "Total hurricanes (unadjusted)";

pub const ACE: &str = "ACE";

pub const REGION: &str = "Region";
pub const TEMP: &str = "Temp";

pub const COUNTRY: &str = "Country";
pub const DATE: &str = "Date";
pub const AVERAGE_TEMPERATURE: &str = "Average Temperature";

pub const ICE_YEAR: &str = "year";
pub const ICE_EXTENT: &str = " extent";
pub const ICE_AREA: &str = "   area";

pub const SEA_LEVEL_INCHES: &str = "CSIRO - Adjusted sea level (inches)";
pub const SEA_LEVEL_MM: &str = "Adjusted Sea Levels (mm)";

pub const MM_PER_INCH: f64 = 25.4;

// ---------------------------------------------------------------------------
// Input files
// ---------------------------------------------------------------------------

/// Where a dataset lives and which columns the charts read from it.
#[derive(Debug, Clone, Copy)]
pub struct DatasetFile {
    pub file_name: &'static str,
    pub delimiter: u8,
    pub required: &'static [&'static str],
}

pub const HURRICANE_COUNT: DatasetFile = DatasetFile {
    file_name: "hur_data.csv",
    delimiter: b',',
    required: &[YEAR, HURRICANES_ADJUSTED, HURRICANES_UNADJUSTED],
};

pub const CYCLONE_ENERGY: DatasetFile = DatasetFile {
    file_name: "cyclone_energy.csv",
    delimiter: b',',
    required: &[YEAR, ACE],
};

pub const CONTINENT_TEMPERATURE: DatasetFile = DatasetFile {
    file_name: "revised_cont.csv",
    delimiter: b',',
    required: &[REGION, YEAR, TEMP],
};

pub const GLOBAL_TEMPERATURE: DatasetFile = DatasetFile {
    file_name: "qtemp.csv",
    delimiter: b',',
    required: &[COUNTRY, DATE, AVERAGE_TEMPERATURE],
};

pub const ARCTIC_ICE: DatasetFile = DatasetFile {
    file_name: "arctic_sea_ice.csv",
    delimiter: b'\t',
    required: &[ICE_YEAR, ICE_EXTENT, ICE_AREA],
};

pub const SEA_LEVELS: DatasetFile = DatasetFile {
    file_name: "sea_levels.csv",
    delimiter: b',',
    required: &[YEAR, SEA_LEVEL_INCHES],
};
