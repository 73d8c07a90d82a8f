use serde::{Deserialize, Serialize};

/// Unit a catalog material is priced in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaterialUnit {
    /// m²
    Area,
    /// mb (running meters)
    LinearLength,
    /// t
    Mass,
}

impl MaterialUnit {
    pub fn symbol(&self) -> &'static str {
        match self {
            MaterialUnit::Area => "m²",
            MaterialUnit::LinearLength => "mb",
            MaterialUnit::Mass => "t",
        }
    }

    pub fn to_db_str(&self) -> &'static str {
        self.symbol()
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "m²" => Some(MaterialUnit::Area),
            "mb" => Some(MaterialUnit::LinearLength),
            "t" => Some(MaterialUnit::Mass),
            _ => None,
        }
    }

    /// Accepts CLI spellings as well (`m2`, `sqm`, `m`, `ton`, ...).
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "m²" | "m2" | "sqm" | "area" => Some(MaterialUnit::Area),
            "mb" | "m" | "lm" | "length" => Some(MaterialUnit::LinearLength),
            "t" | "ton" | "tons" | "mass" => Some(MaterialUnit::Mass),
            _ => None,
        }
    }
}
