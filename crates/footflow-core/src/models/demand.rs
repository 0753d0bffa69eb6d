use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{FootflowError, Result};

/// Demand category: the kind of footfall driver a dataset describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum DemandCategory {
    Bus,
    Education,
    Rail,
    Residential,
}

/// Geometry a demand dataset is expected to hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeometryKind {
    Points,
    Polygons,
    PointsOrPolygons,
}

impl DemandCategory {
    /// All categories in display order
    pub const ALL: [DemandCategory; 4] = [
        DemandCategory::Bus,
        DemandCategory::Education,
        DemandCategory::Rail,
        DemandCategory::Residential,
    ];

    /// Label shown in selection controls
    pub fn label(&self) -> &'static str {
        match self {
            DemandCategory::Bus => "Bus demand",
            DemandCategory::Education => "Education demand",
            DemandCategory::Rail => "Rail demand",
            DemandCategory::Residential => "Residential demand",
        }
    }

    /// Dataset file stem within an authority directory
    pub fn filename(&self) -> &'static str {
        match self {
            DemandCategory::Bus => "bus_demands",
            DemandCategory::Education => "education_demand",
            DemandCategory::Rail => "rail_demands",
            DemandCategory::Residential => "localmap_with_residential_demands",
        }
    }

    pub fn geometry_kind(&self) -> GeometryKind {
        match self {
            DemandCategory::Bus => GeometryKind::Points,
            DemandCategory::Residential => GeometryKind::Polygons,
            DemandCategory::Education | DemandCategory::Rail => GeometryKind::PointsOrPolygons,
        }
    }

    /// Methodology notes published alongside the category, one entry per bullet
    pub fn description(&self) -> &'static [&'static str] {
        match self {
            DemandCategory::Bus => BUS_NOTES,
            DemandCategory::Education => EDUCATION_NOTES,
            DemandCategory::Rail => RAIL_NOTES,
            DemandCategory::Residential => RESIDENTIAL_NOTES,
        }
    }

    /// Identifier used in URLs and on the command line
    pub fn short_name(&self) -> &'static str {
        match self {
            DemandCategory::Bus => "bus",
            DemandCategory::Education => "education",
            DemandCategory::Rail => "rail",
            DemandCategory::Residential => "residential",
        }
    }
}

const BUS_NOTES: &[&str] = &[
    "We are using frequency metrics as a proxy for relative demand at bus stops. The frequency \
     of buses at each bus stop is aggregated to weekly, daily, and hourly level.",
    "This data looks robust in urban areas but please tell us if you see accuracy issues in \
     more rural areas.",
];

const EDUCATION_NOTES: &[&str] = &[
    "This dataset represents the number of pupils at pre-school, primary, and secondary schools.",
    "Some of the data is derived directly from Ofsted records, and the estimate for the \
     remaining schools is derived from their estimated gross floor area.",
    "Potential issues that we are currently working to understand the impact of include: \
     (a) schools with more than one site in close proximity, (b) schools located in mixed-use \
     buildings.",
    "Please tell us if you see relevant examples. This data does not include further \
     education, which generates footfall at different times of the day and is thus grouped \
     with other employment categories in our data.",
];

const RAIL_NOTES: &[&str] = &[
    "This is based on published annual station entry/exit data. To reduce the effect of \
     volatile year-on-year results, we have applied a 5-year rolling average method with more \
     weight assigned to the most recent years (and pandemic years excluded).",
    "We would appreciate your feedback on whether the resulting metric provides a reasonable \
     estimate of relative rail demand.",
];

const RESIDENTIAL_NOTES: &[&str] = &[
    "This dataset represents our estimate of the sum of the population in each building \
     (buildings from OS Localmap).",
    "For ease of interpretation we have visualised the data normalised by the ground floor area \
     of the buildings so that higher density housing appears darker in the colour scale.",
    "The data is factored to 2022 mid year population estimates but uses 2024 address listings.",
    "If you know of areas of recent housing completions (or clearance) in your authority area, \
     please sense-check the estimates in these areas.",
    "The method may result in some cases in small numbers of residents being allocated to \
     non-residential buildings. Please tell us if you see examples that appear to be \
     mis-allocating large numbers of residents.",
    "We are also aware of issues with different classifications for multi-occupancy buildings \
     such as student residences. Please flag any examples that look incorrect.",
    "Due to the data size of this demand, it may take about 45 seconds to load.",
];

impl fmt::Display for DemandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DemandCategory {
    type Err = FootflowError;

    /// Accepts either the label ("Rail demand") or the short name ("rail")
    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        DemandCategory::ALL
            .into_iter()
            .find(|c| {
                c.label().eq_ignore_ascii_case(wanted)
                    || c.short_name().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| FootflowError::UnknownDemand {
                name: s.to_string(),
            })
    }
}

impl TryFrom<String> for DemandCategory {
    type Error = FootflowError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl GeometryKind {
    /// Whether a GeoJSON geometry type name is acceptable for this kind
    pub fn accepts(&self, geometry_type: &str) -> bool {
        let is_point = matches!(geometry_type, "Point" | "MultiPoint");
        let is_polygon = matches!(geometry_type, "Polygon" | "MultiPolygon");
        match self {
            GeometryKind::Points => is_point,
            GeometryKind::Polygons => is_polygon,
            GeometryKind::PointsOrPolygons => is_point || is_polygon,
        }
    }
}
