use crate::cli::commands::{clearable, clearable_date, open, or_dash};
use crate::cli::parser::{Commands, ProjectCmd};
use crate::config::Config;
use crate::db::projects;
use crate::errors::AppResult;
use crate::models::{NewProject, ProjectUpdate};
use crate::ui::messages::{info, success};
use crate::utils::colors::active_marker;
use crate::utils::date::parse_optional_date;
use crate::utils::formatting::format_date;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Project { action } = cmd else {
        return Ok(());
    };
    let mut pool = open(cfg)?;

    match action {
        ProjectCmd::Add {
            name,
            location,
            start,
            end,
            activate,
        } => {
            let new = NewProject {
                name: name.clone(),
                location: location.clone().filter(|l| !l.trim().is_empty()),
                start_date: parse_optional_date(start.as_ref())?,
                end_date: parse_optional_date(end.as_ref())?,
                activate: *activate,
            };
            let p = projects::create_project(&mut pool.conn, &new)?;
            success(format!("Project '{}' created ({})", p.name, p.id));
            if p.active {
                info("It is now the active project.");
            }
        }

        ProjectCmd::List => {
            let list = projects::list_projects(&pool.conn)?;
            if list.is_empty() {
                info("No projects yet. Create one with `polierlog project add <name> --activate`.");
                return Ok(());
            }

            let mut table = Table::new(vec![
                Column::left(""),
                Column::left("ID"),
                Column::left("Name"),
                Column::left("Location"),
                Column::left("Start"),
                Column::left("End"),
            ]);
            for p in list {
                table.add_row(vec![
                    active_marker(p.active),
                    p.id.clone(),
                    p.name.clone(),
                    or_dash(&p.location),
                    p.start_date.map(format_date).unwrap_or_else(|| "-".into()),
                    p.end_date.map(format_date).unwrap_or_else(|| "-".into()),
                ]);
            }
            print!("{}", table.render());
        }

        ProjectCmd::Activate { id } => {
            projects::set_active_project(&mut pool.conn, id)?;
            let p = projects::get_project(&pool.conn, id)?;
            success(format!("Active project: {}", p.name));
        }

        ProjectCmd::Update {
            id,
            name,
            location,
            start,
            end,
        } => {
            let upd = ProjectUpdate {
                name: name.clone(),
                location: clearable(location.as_ref()),
                start_date: clearable_date(start.as_ref())?,
                end_date: clearable_date(end.as_ref())?,
            };
            projects::update_project(&pool.conn, id, &upd)?;
            success(format!("Project {} updated", id));
        }

        ProjectCmd::Delete { id } => {
            projects::delete_project(&mut pool.conn, id)?;
            success(format!("Project {} deleted", id));
        }
    }
    Ok(())
}
