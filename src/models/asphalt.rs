use super::asphalt_class::AsphaltClass;
use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

/// One truck load of asphalt, identified by its delivery note (Lieferschein).
#[derive(Debug, Clone, Serialize)]
pub struct AsphaltDelivery {
    pub id: String,
    pub project_id: String,
    pub delivery_note: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub asphalt_class: AsphaltClass,
    pub tons: f64,
    pub driver: Option<String>,
    pub truck_number: Option<String>,
    pub notes: Option<String>,
    pub photo_uri: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone)]
pub struct NewAsphaltDelivery {
    pub project_id: String,
    pub delivery_note: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub asphalt_class: AsphaltClass,
    pub tons: f64,
    pub driver: Option<String>,
    pub truck_number: Option<String>,
    pub notes: Option<String>,
    pub photo_uri: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct AsphaltDeliveryUpdate {
    pub delivery_note: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub asphalt_class: Option<AsphaltClass>,
    pub tons: Option<f64>,
    pub driver: Option<Option<String>>,
    pub truck_number: Option<Option<String>>,
    pub notes: Option<Option<String>>,
    pub photo_uri: Option<Option<String>>,
}
