use crate::cli::commands::{date_or_today, open, or_dash, time_or_now};
use crate::cli::parser::{Commands, TripCmd};
use crate::config::Config;
use crate::core::context::{require_active_project, resolve_vehicle};
use crate::core::trip::{TripEntry, TripLogic};
use crate::db::trips as store;
use crate::errors::AppResult;
use crate::models::TRIP_PURPOSES;
use crate::ui::messages::{info, success, warning};
use crate::utils::formatting::{fmt_whole, format_date};
use crate::utils::table::{Column, Table};
use crate::utils::time::{format_time, require_time};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Trip { action } = cmd else {
        return Ok(());
    };
    let mut pool = open(cfg)?;

    match action {
        TripCmd::Add {
            from,
            to,
            end_odometer,
            start_odometer,
            start,
            end,
            purpose,
            date,
            notes,
            vehicle,
        } => {
            let project = require_active_project(&pool.conn)?;
            let vehicle = resolve_vehicle(&pool.conn, vehicle.as_deref())?;

            if !TRIP_PURPOSES.contains(&purpose.as_str()) {
                warning(format!(
                    "'{}' is not a standard purpose ({})",
                    purpose,
                    TRIP_PURPOSES.join(", ")
                ));
            }

            let start_time = time_or_now(start.as_ref())?;
            let entry = TripEntry {
                vehicle_id: vehicle.id.clone(),
                project_id: project.id.clone(),
                date: date_or_today(date.as_ref())?,
                start_time,
                end_time: match end {
                    Some(e) => require_time(e)?,
                    None => start_time,
                },
                from_location: from.clone(),
                to_location: to.clone(),
                start_odometer: *start_odometer,
                end_odometer: *end_odometer,
                purpose: purpose.clone(),
                notes: notes.clone(),
            };
            let t = TripLogic::record(&mut pool.conn, &entry)?;
            success(format!(
                "{} → {}: {} km with {} ({})",
                t.from_location,
                t.to_location,
                fmt_whole(t.distance),
                vehicle.display_name(),
                t.id
            ));
        }

        TripCmd::List { date } => {
            let project = require_active_project(&pool.conn)?;
            let day = date_or_today(date.as_ref())?;
            let rows = store::list_trips(&pool.conn, &project.id, day)?;
            if rows.is_empty() {
                info(format!("No trips on {}.", format_date(day)));
                return Ok(());
            }

            let mut table = Table::new(vec![
                Column::left("ID"),
                Column::left("Start"),
                Column::left("End"),
                Column::left("From"),
                Column::left("To"),
                Column::right("km"),
                Column::left("Purpose"),
                Column::left("Notes"),
            ]);
            for t in &rows {
                table.add_row(vec![
                    t.id.clone(),
                    format_time(t.start_time),
                    format_time(t.end_time),
                    t.from_location.clone(),
                    t.to_location.clone(),
                    fmt_whole(t.distance),
                    t.purpose.clone(),
                    or_dash(&t.notes),
                ]);
            }
            print!("{}", table.render());

            let total = store::total_km(&pool.conn, &project.id, day)?;
            println!("\nTotal: {} km", fmt_whole(total));
        }

        TripCmd::Delete { id } => {
            store::delete_trip(&pool.conn, id)?;
            success(format!("Trip {} deleted", id));
        }
    }
    Ok(())
}
