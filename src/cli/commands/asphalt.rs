use crate::cli::commands::{clearable, date_or_today, open, or_dash, time_or_now};
use crate::cli::parser::{AsphaltCmd, Commands};
use crate::config::Config;
use crate::core::asphalt::AsphaltLogic;
use crate::core::context::require_active_project;
use crate::db::asphalt as store;
use crate::errors::{AppError, AppResult};
use crate::models::{AsphaltClass, AsphaltDeliveryUpdate, NewAsphaltDelivery};
use crate::ui::messages::{info, success};
use crate::utils::date::parse_optional_date;
use crate::utils::formatting::{fmt_tons, format_date};
use crate::utils::table::{Column, Table};
use crate::utils::time::{format_time, parse_optional_time};

fn parse_class(code: &str) -> AppResult<AsphaltClass> {
    AsphaltClass::from_code(code).ok_or_else(|| {
        let known: Vec<&str> = AsphaltClass::ALL.iter().map(|c| c.label()).collect();
        AppError::validation(format!(
            "unknown asphalt class '{}' (expected one of: {})",
            code,
            known.join(", ")
        ))
    })
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Asphalt { action } = cmd else {
        return Ok(());
    };
    let pool = open(cfg)?;

    match action {
        AsphaltCmd::Add {
            note,
            class,
            tons,
            date,
            time,
            driver,
            truck,
            notes,
            photo,
        } => {
            let project = require_active_project(&pool.conn)?;
            let new = NewAsphaltDelivery {
                project_id: project.id.clone(),
                delivery_note: note.clone(),
                date: date_or_today(date.as_ref())?,
                time: time_or_now(time.as_ref())?,
                asphalt_class: parse_class(class)?,
                tons: *tons,
                driver: driver.clone(),
                truck_number: truck.clone(),
                notes: notes.clone(),
                photo_uri: photo.clone(),
            };
            let d = AsphaltLogic::record(&pool.conn, cfg.strict_delivery_note, &new)?;
            success(format!(
                "Lieferschein {} recorded: {} t {} on {} ({})",
                d.delivery_note,
                fmt_tons(d.tons),
                d.asphalt_class.label(),
                format_date(d.date),
                d.id
            ));
        }

        AsphaltCmd::List { date } => {
            let project = require_active_project(&pool.conn)?;
            let day = date_or_today(date.as_ref())?;
            let rows = store::list_deliveries(&pool.conn, &project.id, day)?;
            if rows.is_empty() {
                info(format!("No deliveries on {}.", format_date(day)));
                return Ok(());
            }

            let mut table = Table::new(vec![
                Column::left("ID"),
                Column::left("Time"),
                Column::left("Lieferschein"),
                Column::left("Class"),
                Column::right("t"),
                Column::left("Driver"),
                Column::left("Truck"),
            ]);
            for d in &rows {
                table.add_row(vec![
                    d.id.clone(),
                    format_time(d.time),
                    d.delivery_note.clone(),
                    d.asphalt_class.label().to_string(),
                    fmt_tons(d.tons),
                    or_dash(&d.driver),
                    or_dash(&d.truck_number),
                ]);
            }
            print!("{}", table.render());

            let total = store::total_tons(&pool.conn, &project.id, day)?;
            println!("\nTotal {}: {} t", format_date(day), fmt_tons(total));
        }

        AsphaltCmd::Update {
            id,
            note,
            class,
            tons,
            date,
            time,
            driver,
            truck,
            notes,
        } => {
            let upd = AsphaltDeliveryUpdate {
                delivery_note: note.clone(),
                date: parse_optional_date(date.as_ref())?,
                time: parse_optional_time(time.as_ref())?,
                asphalt_class: class.as_deref().map(parse_class).transpose()?,
                tons: *tons,
                driver: clearable(driver.as_ref()),
                truck_number: clearable(truck.as_ref()),
                notes: clearable(notes.as_ref()),
                photo_uri: None,
            };
            AsphaltLogic::update(&pool.conn, cfg.strict_delivery_note, id, &upd)?;
            success(format!("Delivery {} updated", id));
        }

        AsphaltCmd::Delete { id } => {
            store::delete_delivery(&pool.conn, id)?;
            success(format!("Delivery {} deleted", id));
        }
    }
    Ok(())
}
