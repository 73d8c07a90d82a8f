use crate::cli::commands::open;
use crate::cli::parser::{Commands, WorkerCmd};
use crate::config::Config;
use crate::db::workers as store;
use crate::errors::AppResult;
use crate::models::WorkerUpdate;
use crate::ui::messages::{info, success};
use crate::utils::formatting::yes_no;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Worker { action } = cmd else {
        return Ok(());
    };
    let pool = open(cfg)?;

    match action {
        WorkerCmd::Add {
            first_name,
            last_name,
        } => {
            let w = store::create_worker(&pool.conn, first_name, last_name)?;
            success(format!("Worker {} added ({})", w.full_name(), w.id));
        }

        WorkerCmd::List { all } => {
            let list = if *all {
                store::list_workers(&pool.conn)?
            } else {
                store::list_active_workers(&pool.conn)?
            };
            if list.is_empty() {
                info("No workers on the roster.");
                return Ok(());
            }

            let mut table = Table::new(vec![
                Column::left("ID"),
                Column::left("Last name"),
                Column::left("First name"),
                Column::left("Active"),
            ]);
            for w in list {
                table.add_row(vec![
                    w.id.clone(),
                    w.last_name.clone(),
                    w.first_name.clone(),
                    yes_no(w.active).to_string(),
                ]);
            }
            print!("{}", table.render());
        }

        WorkerCmd::Update {
            id,
            first_name,
            last_name,
        } => {
            let upd = WorkerUpdate {
                first_name: first_name.clone(),
                last_name: last_name.clone(),
            };
            store::update_worker(&pool.conn, id, &upd)?;
            success(format!("Worker {} updated", id));
        }

        WorkerCmd::Activate { id } => {
            store::set_worker_active(&pool.conn, id, true)?;
            success(format!("Worker {} is back on the roster", id));
        }

        WorkerCmd::Deactivate { id } => {
            store::set_worker_active(&pool.conn, id, false)?;
            success(format!("Worker {} removed from the roster", id));
        }

        WorkerCmd::Delete { id } => {
            store::delete_worker(&pool.conn, id)?;
            success(format!("Worker {} deleted", id));
        }
    }
    Ok(())
}
