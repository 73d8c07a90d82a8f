use serde::Serialize;

/// Paving-mix grade printed on the delivery note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum AsphaltClass {
    Ac11DS,
    Ac8DS,
    Sma8,
    Sma11,
    Binder,
    Trag,
    Other,
}

impl AsphaltClass {
    pub const ALL: [AsphaltClass; 7] = [
        AsphaltClass::Ac11DS,
        AsphaltClass::Ac8DS,
        AsphaltClass::Sma8,
        AsphaltClass::Sma11,
        AsphaltClass::Binder,
        AsphaltClass::Trag,
        AsphaltClass::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AsphaltClass::Ac11DS => "AC 11 D S",
            AsphaltClass::Ac8DS => "AC 8 D S",
            AsphaltClass::Sma8 => "SMA 8",
            AsphaltClass::Sma11 => "SMA 11",
            AsphaltClass::Binder => "Binder",
            AsphaltClass::Trag => "Trag",
            AsphaltClass::Other => "Other",
        }
    }

    pub fn to_db_str(&self) -> &'static str {
        self.label()
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label() == s)
    }

    /// Lenient CLI input: case and spaces are ignored (`ac11ds`, `SMA11`).
    pub fn from_code(code: &str) -> Option<Self> {
        let wanted: String = code
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_lowercase();
        Self::ALL.into_iter().find(|c| {
            c.label()
                .chars()
                .filter(|ch| !ch.is_whitespace())
                .collect::<String>()
                .to_lowercase()
                == wanted
        })
    }
}
