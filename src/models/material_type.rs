use serde::Serialize;

/// Length-based work item (fissure sealing, tack coat strips, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum MaterialType {
    Fugenmasse,
    TackCoat,
    Primer,
    Other,
}

impl MaterialType {
    pub const ALL: [MaterialType; 4] = [
        MaterialType::Fugenmasse,
        MaterialType::TackCoat,
        MaterialType::Primer,
        MaterialType::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MaterialType::Fugenmasse => "Fugenmasse",
            MaterialType::TackCoat => "Tack Coat",
            MaterialType::Primer => "Primer",
            MaterialType::Other => "Other",
        }
    }

    pub fn to_db_str(&self) -> &'static str {
        self.label()
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.label() == s)
    }

    pub fn from_code(code: &str) -> Option<Self> {
        let wanted = code.replace([' ', '-', '_'], "").to_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.label().replace(' ', "").to_lowercase() == wanted)
    }
}
