use serde::{Deserialize, Serialize};
use std::fmt;

/// User-facing waste category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WasteCategory {
    Wet,
    Dry,
    Hazardous,
}

impl WasteCategory {
    pub fn all() -> &'static [WasteCategory] {
        &[
            WasteCategory::Wet,
            WasteCategory::Dry,
            WasteCategory::Hazardous,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            WasteCategory::Wet => "Wet Waste",
            WasteCategory::Dry => "Dry Waste",
            WasteCategory::Hazardous => "Hazardous Waste",
        }
    }
}

impl fmt::Display for WasteCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            WasteCategory::Wet => "wet",
            WasteCategory::Dry => "dry",
            WasteCategory::Hazardous => "hazardous",
        };
        write!(f, "{}", label)
    }
}

/// Internal outcome of a classifier tier, mapped onto a [`WasteCategory`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    Organic,
    Recyclable,
    Electronic,
    General,
}

impl Bucket {
    pub fn category(&self) -> WasteCategory {
        match self {
            Bucket::Organic => WasteCategory::Wet,
            Bucket::Recyclable => WasteCategory::Dry,
            Bucket::Electronic => WasteCategory::Hazardous,
            Bucket::General => WasteCategory::Dry,
        }
    }
}
