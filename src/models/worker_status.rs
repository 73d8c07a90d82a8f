use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkerStatus {
    Present,
    Vacation,
    Sick,
    Absent,
}

impl WorkerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkerStatus::Present => "present",
            WorkerStatus::Vacation => "vacation",
            WorkerStatus::Sick => "sick",
            WorkerStatus::Absent => "absent",
        }
    }

    pub fn to_db_str(&self) -> &'static str {
        self.as_str()
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "present" => Some(WorkerStatus::Present),
            "vacation" => Some(WorkerStatus::Vacation),
            "sick" => Some(WorkerStatus::Sick),
            "absent" => Some(WorkerStatus::Absent),
            _ => None,
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::from_db_str(&code.trim().to_lowercase())
    }

    pub fn is_present(&self) -> bool {
        matches!(self, WorkerStatus::Present)
    }
}
