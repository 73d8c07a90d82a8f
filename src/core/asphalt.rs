use crate::db::asphalt as store;
use crate::errors::AppResult;
use crate::models::{AsphaltDelivery, AsphaltDeliveryUpdate, NewAsphaltDelivery};
use crate::utils::validators::{require_delivery_note, require_tons, require_truck_number};
use rusqlite::Connection;

/// Validation and persistence of asphalt deliveries.
pub struct AsphaltLogic;

fn clean(value: &Option<String>) -> Option<String> {
    value
        .as_ref()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Same as [`clean`] for an update field; a blank value clears the column.
fn clean_update(value: &Option<Option<String>>) -> Option<Option<String>> {
    value.as_ref().map(clean)
}

impl AsphaltLogic {
    /// `strict` selects the digits-only delivery note rule.
    pub fn record(
        conn: &Connection,
        strict: bool,
        new: &NewAsphaltDelivery,
    ) -> AppResult<AsphaltDelivery> {
        let note = new.delivery_note.trim();
        require_delivery_note(note, strict)?;
        require_tons(new.tons)?;

        let truck = clean(&new.truck_number);
        if let Some(t) = &truck {
            require_truck_number(t)?;
        }

        let normalized = NewAsphaltDelivery {
            delivery_note: note.to_string(),
            driver: clean(&new.driver),
            truck_number: truck,
            notes: clean(&new.notes),
            ..new.clone()
        };
        store::create_delivery(conn, &normalized)
    }

    pub fn update(
        conn: &Connection,
        strict: bool,
        id: &str,
        upd: &AsphaltDeliveryUpdate,
    ) -> AppResult<()> {
        let note = upd.delivery_note.as_ref().map(|n| n.trim().to_string());
        if let Some(n) = &note {
            require_delivery_note(n, strict)?;
        }
        if let Some(tons) = upd.tons {
            require_tons(tons)?;
        }
        let truck = clean_update(&upd.truck_number);
        if let Some(Some(t)) = &truck {
            require_truck_number(t)?;
        }

        let normalized = AsphaltDeliveryUpdate {
            delivery_note: note,
            driver: clean_update(&upd.driver),
            truck_number: truck,
            notes: clean_update(&upd.notes),
            ..upd.clone()
        };
        store::update_delivery(conn, id, &normalized)
    }
}
