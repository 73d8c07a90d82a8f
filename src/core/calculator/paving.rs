use crate::errors::{AppError, AppResult};
use crate::models::material_unit::MaterialUnit;
use serde::Serialize;

/// Area, volume and mass of a paving layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PavingEstimate {
    pub area_m2: f64,
    pub volume_m3: f64,
    pub tons: f64,
}

/// Tons of mix for a layer of `thickness_cm` over `area_m2` at `density` t/m³.
pub fn layer_tons(area_m2: f64, thickness_cm: f64, density: f64) -> f64 {
    area_m2 * (thickness_cm / 100.0) * density
}

/// Preview used by the standalone asphalt calculator; never persisted.
pub fn estimate_paving(
    length_m: f64,
    width_m: f64,
    thickness_cm: f64,
    density: f64,
) -> AppResult<PavingEstimate> {
    for (name, v) in [
        ("length", length_m),
        ("width", width_m),
        ("thickness", thickness_cm),
        ("density", density),
    ] {
        if !v.is_finite() || v <= 0.0 {
            return Err(AppError::validation(format!("{name} must be greater than 0")));
        }
    }

    let area_m2 = length_m * width_m;
    let volume_m3 = area_m2 * (thickness_cm / 100.0);

    Ok(PavingEstimate {
        area_m2,
        volume_m3,
        tons: volume_m3 * density,
    })
}

/// How an entered quantity turns into the billed quantity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Conversion {
    Area,
    LinearLength,
    /// Mass entered directly in tons.
    Mass,
    /// Mass derived from a surface (m²) and a layer thickness.
    MassWithDensity(f64),
}

impl Conversion {
    pub fn for_catalog(unit: MaterialUnit, density: Option<f64>) -> Self {
        match (unit, density) {
            (MaterialUnit::Mass, Some(d)) if d > 0.0 => Conversion::MassWithDensity(d),
            (MaterialUnit::Mass, _) => Conversion::Mass,
            (MaterialUnit::Area, _) => Conversion::Area,
            (MaterialUnit::LinearLength, _) => Conversion::LinearLength,
        }
    }

    pub fn needs_thickness(&self) -> bool {
        matches!(self, Conversion::MassWithDensity(_))
    }

    /// Unit the user types the quantity in.
    pub fn input_unit(&self) -> MaterialUnit {
        match self {
            Conversion::Area | Conversion::MassWithDensity(_) => MaterialUnit::Area,
            Conversion::LinearLength => MaterialUnit::LinearLength,
            Conversion::Mass => MaterialUnit::Mass,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UsageQuote {
    pub final_quantity: f64,
    pub cost: f64,
}

/// Billed quantity and cost for one usage entry.
pub fn quote_usage(
    conversion: Conversion,
    input_quantity: f64,
    thickness_cm: Option<f64>,
    price_per_unit: f64,
) -> AppResult<UsageQuote> {
    if !input_quantity.is_finite() || input_quantity <= 0.0 {
        return Err(AppError::validation("quantity must be greater than 0"));
    }
    if !price_per_unit.is_finite() || price_per_unit < 0.0 {
        return Err(AppError::validation("price per unit cannot be negative"));
    }

    let final_quantity = match conversion {
        Conversion::MassWithDensity(density) => {
            let thickness = thickness_cm
                .filter(|t| t.is_finite() && *t > 0.0)
                .ok_or_else(|| AppError::validation("thickness (cm) is required and must be > 0"))?;
            layer_tons(input_quantity, thickness, density)
        }
        Conversion::Area | Conversion::LinearLength | Conversion::Mass => input_quantity,
    };

    Ok(UsageQuote {
        final_quantity,
        cost: final_quantity * price_per_unit,
    })
}
