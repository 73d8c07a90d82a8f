use crate::cli::commands::open;
use crate::cli::commands::usage::resolve_material;
use crate::cli::parser::{CalcCmd, Commands};
use crate::config::Config;
use crate::core::calculator::chainage::{chainage_distance, normalize_chainage, require_chainage};
use crate::core::calculator::hours::shift_hours;
use crate::core::calculator::paving::estimate_paving;
use crate::core::usage::UsageLogic;
use crate::errors::AppResult;
use crate::ui::messages::{header, warning};
use crate::utils::formatting::{fmt_hours, fmt_money, fmt_tons, format_number};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Calc { action } = cmd else {
        return Ok(());
    };

    match action {
        CalcCmd::Paving {
            length,
            width,
            thickness,
            density,
        } => {
            let density = density.unwrap_or(cfg.default_density);
            let est = estimate_paving(*length, *width, *thickness, density)?;
            header("Paving estimate");
            println!("Area   : {} m²", format_number(est.area_m2, 2));
            println!("Volume : {} m³", format_number(est.volume_m3, 3));
            println!("Mass   : {} t (density {} t/m³)", fmt_tons(est.tons), format_number(density, 2));
        }

        CalcCmd::Chainage { from, to } => {
            let from = normalize_chainage(from.trim());
            let to = normalize_chainage(to.trim());
            require_chainage(&from)?;
            require_chainage(&to)?;
            let meters = chainage_distance(&from, &to);
            println!("{} → {}: {} m", from, to, meters);
            if meters <= 0 {
                warning("'to' lies before 'from'; a material record would be rejected.");
            }
        }

        CalcCmd::Hours {
            start,
            end,
            break_hours,
        } => {
            let shift = shift_hours(start, end, *break_hours)?;
            if shift.was_clamped() {
                warning("End before start or break longer than the shift; counted as 0 h.");
            }
            println!("{} - {} with {} h break: {} h", start, end, break_hours, fmt_hours(shift.hours));
        }

        CalcCmd::Usage {
            material,
            quantity,
            thickness,
        } => {
            let pool = open(cfg)?;
            let m = resolve_material(&pool.conn, material)?;
            let quote = UsageLogic::preview(&m, *quantity, *thickness)?;
            println!(
                "{}: {} {} × {} € = {} €",
                m.name,
                format_number(quote.final_quantity, 2),
                m.unit.symbol(),
                fmt_money(m.price_per_unit),
                fmt_money(quote.cost)
            );
        }
    }
    Ok(())
}
