use crate::errors::AppResult;
use crate::utils::time::time_to_minutes;

/// Result of a shift computation before clamping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShiftHours {
    /// Worked minutes minus the break; negative when end < start or the
    /// break is longer than the shift.
    pub net_minutes: f64,
    /// `max(0, net_minutes / 60)`
    pub hours: f64,
}

impl ShiftHours {
    pub fn was_clamped(&self) -> bool {
        self.net_minutes < 0.0
    }
}

/// Net hours for a same-day shift. An end before the start or a break
/// longer than the shift yields zero, never an error.
pub fn calculate_hours(start: &str, end: &str, break_hours: f64) -> AppResult<f64> {
    Ok(shift_hours(start, end, break_hours)?.hours)
}

pub fn shift_hours(start: &str, end: &str, break_hours: f64) -> AppResult<ShiftHours> {
    let worked = (time_to_minutes(end)? - time_to_minutes(start)?) as f64;
    let net_minutes = worked - break_hours * 60.0;

    Ok(ShiftHours {
        net_minutes,
        hours: (net_minutes / 60.0).max(0.0),
    })
}
