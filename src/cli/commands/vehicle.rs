use crate::cli::commands::open;
use crate::cli::parser::{Commands, VehicleCmd};
use crate::config::Config;
use crate::db::vehicles as store;
use crate::errors::AppResult;
use crate::models::{NewVehicle, VehicleUpdate};
use crate::ui::messages::{info, success};
use crate::utils::colors::active_marker;
use crate::utils::formatting::fmt_whole;
use crate::utils::table::{Column, Table};
use crate::utils::validators::require_odometer;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Vehicle { action } = cmd else {
        return Ok(());
    };
    let mut pool = open(cfg)?;

    match action {
        VehicleCmd::Add {
            make,
            model,
            registration,
            odometer,
            activate,
        } => {
            let new = NewVehicle {
                make: make.clone(),
                model: model.clone(),
                registration_number: registration.clone(),
                current_odometer: *odometer,
                activate: *activate,
            };
            let v = store::create_vehicle(&mut pool.conn, &new)?;
            success(format!("Vehicle {} added ({})", v.display_name(), v.id));
        }

        VehicleCmd::List => {
            let list = store::list_vehicles(&pool.conn)?;
            if list.is_empty() {
                info("No vehicles yet.");
                return Ok(());
            }

            let mut table = Table::new(vec![
                Column::left(""),
                Column::left("ID"),
                Column::left("Vehicle"),
                Column::right("km"),
            ]);
            for v in list {
                table.add_row(vec![
                    active_marker(v.active),
                    v.id.clone(),
                    v.display_name(),
                    fmt_whole(v.current_odometer),
                ]);
            }
            print!("{}", table.render());
        }

        VehicleCmd::Activate { id } => {
            store::set_active_vehicle(&mut pool.conn, id)?;
            let v = store::get_vehicle(&pool.conn, id)?;
            success(format!("Active vehicle: {}", v.display_name()));
        }

        VehicleCmd::Update {
            id,
            make,
            model,
            registration,
        } => {
            let upd = VehicleUpdate {
                make: make.clone(),
                model: model.clone(),
                registration_number: registration.clone(),
            };
            store::update_vehicle(&pool.conn, id, &upd)?;
            success(format!("Vehicle {} updated", id));
        }

        VehicleCmd::Odometer { id, value } => {
            require_odometer(*value)?;
            store::update_vehicle_odometer(&pool.conn, id, *value)?;
            success(format!("Odometer of {} set to {} km", id, fmt_whole(*value)));
        }

        VehicleCmd::Delete { id } => {
            store::delete_vehicle(&pool.conn, id)?;
            success(format!("Vehicle {} deleted", id));
        }
    }
    Ok(())
}
