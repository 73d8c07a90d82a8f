use crate::cli::commands::open;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::export::range::parse_range;
use crate::export::share::ConsoleSharer;
use crate::export::{DateRange, ExportLogic, ExportRequest, SectionToggles};
use crate::utils::date::today;
use crate::utils::path::expand_tilde;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        range,
        sections,
        format,
        out,
        force,
    } = cmd
    {
        let kind = parse_range(range)?;
        let toggles = match sections {
            Some(list) => SectionToggles::from_list(list).ok_or_else(|| {
                AppError::validation(format!(
                    "invalid --sections '{}' (use asphalt,materials,usage,hours,vehicle)",
                    list
                ))
            })?,
            None => SectionToggles::all(),
        };

        let req = ExportRequest {
            range: DateRange::resolve(&kind, today()),
            toggles,
            polier_name: cfg.polier_name.clone(),
            out_dir: expand_tilde(out.as_deref().unwrap_or(&cfg.export_dir)),
            force: *force,
        };

        let pool = open(cfg)?;
        ExportLogic::export(&pool, format, &req, &ConsoleSharer)?;
    }
    Ok(())
}
