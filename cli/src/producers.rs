//! Demo status producers
//!
//! Stand-ins for the host subsystems that own the status values. They only
//! write variables; the statusbar picks the changes up through its watches.

use chrono::Local;

use crate::CliContext;

pub const CLOCK_VARIABLE: &str = "clock";
pub const BATTERY_VARIABLE: &str = "battery";

/// Current local time as shown by the clock producer
pub fn clock_text() -> String {
    Local::now().format("%H:%M").to_string()
}

/// Write the current time; only a minute change reaches the overlay
pub fn update_clock(ctx: &mut CliContext) {
    ctx.set_variable(CLOCK_VARIABLE, &clock_text());
}

/// Seed the values a fresh session starts with
pub fn seed(ctx: &mut CliContext, clock: bool) {
    if clock {
        update_clock(ctx);
    }
    ctx.set_variable(BATTERY_VARIABLE, "100%");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_text_format() {
        let text = clock_text();
        assert_eq!(text.len(), 5);
        assert_eq!(text.as_bytes()[2], b':');
    }
}
