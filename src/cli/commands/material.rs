use crate::cli::commands::{clearable, date_or_today, open, or_dash, time_or_now};
use crate::cli::parser::{Commands, MaterialCmd};
use crate::config::Config;
use crate::core::context::require_active_project;
use crate::core::material::{MaterialEntry, MaterialLength, MaterialLogic};
use crate::db::materials as store;
use crate::errors::{AppError, AppResult};
use crate::models::{MaterialType, MaterialUpdate};
use crate::ui::messages::{info, success};
use crate::utils::formatting::{fmt_whole, format_date};
use crate::utils::table::{Column, Table};
use crate::utils::time::format_time;

fn parse_kind(code: &str) -> AppResult<MaterialType> {
    MaterialType::from_code(code).ok_or_else(|| {
        AppError::validation(format!(
            "unknown material type '{}' (expected Fugenmasse, TackCoat, Primer or Other)",
            code
        ))
    })
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Material { action } = cmd else {
        return Ok(());
    };
    let pool = open(cfg)?;

    match action {
        MaterialCmd::Add {
            kind,
            meters,
            from,
            to,
            date,
            time,
            notes,
        } => {
            let project = require_active_project(&pool.conn)?;
            let length = match (meters, from, to) {
                (Some(m), _, _) => MaterialLength::Meters(*m),
                (None, Some(f), Some(t)) => MaterialLength::Chainage {
                    from: f.clone(),
                    to: t.clone(),
                },
                _ => {
                    return Err(AppError::validation(
                        "give either --meters or both --from and --to",
                    ));
                }
            };

            let entry = MaterialEntry {
                project_id: project.id.clone(),
                material_type: parse_kind(kind)?,
                length,
                date: date_or_today(date.as_ref())?,
                time: time_or_now(time.as_ref())?,
                notes: notes.clone(),
                photo_uri: None,
            };
            let m = MaterialLogic::record(&pool.conn, &entry)?;
            success(format!(
                "{}: {} m recorded on {} ({})",
                m.material_type.label(),
                fmt_whole(m.meters),
                format_date(m.date),
                m.id
            ));
        }

        MaterialCmd::List { date } => {
            let project = require_active_project(&pool.conn)?;
            let day = date_or_today(date.as_ref())?;
            let rows = store::list_materials(&pool.conn, &project.id, day)?;
            if rows.is_empty() {
                info(format!("No materials on {}.", format_date(day)));
                return Ok(());
            }

            let mut table = Table::new(vec![
                Column::left("ID"),
                Column::left("Time"),
                Column::left("Type"),
                Column::left("From"),
                Column::left("To"),
                Column::right("m"),
            ]);
            for m in &rows {
                table.add_row(vec![
                    m.id.clone(),
                    format_time(m.time),
                    m.material_type.label().to_string(),
                    or_dash(&m.from_km),
                    or_dash(&m.to_km),
                    fmt_whole(m.meters),
                ]);
            }
            print!("{}", table.render());

            println!();
            for (kind, total) in store::totals_by_type(&pool.conn, &project.id, day)? {
                println!("{}: {} m", kind.label(), fmt_whole(total));
            }
        }

        MaterialCmd::Update {
            id,
            kind,
            meters,
            notes,
        } => {
            if let Some(m) = meters
                && (!m.is_finite() || *m <= 0.0)
            {
                return Err(AppError::validation("length must be greater than 0 m"));
            }
            let upd = MaterialUpdate {
                material_type: kind.as_deref().map(parse_kind).transpose()?,
                meters: *meters,
                // A direct length replaces a chainage pair.
                from_km: meters.map(|_| None),
                to_km: meters.map(|_| None),
                notes: clearable(notes.as_ref()),
                ..MaterialUpdate::default()
            };
            store::update_material(&pool.conn, id, &upd)?;
            success(format!("Material {} updated", id));
        }

        MaterialCmd::Delete { id } => {
            store::delete_material(&pool.conn, id)?;
            success(format!("Material {} deleted", id));
        }
    }
    Ok(())
}
