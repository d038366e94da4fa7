use std::env;

use chrono::NaiveDate;
use tracing::warn;

use crate::config::{Config, ConfigManager};
use crate::utils::clock::{Clock, FixedClock, SystemClock};

/// Pins "today" for the CLI, mainly for reproducible scripted runs.
pub const TODAY_ENV: &str = "SPONSOR_LEDGER_TODAY";

/// State shared by every command of one CLI invocation.
pub struct CliContext {
    pub config_manager: ConfigManager,
    pub config: Config,
    clock: Box<dyn Clock>,
}

impl CliContext {
    pub fn new(config_manager: ConfigManager, config: Config, clock: Box<dyn Clock>) -> Self {
        Self {
            config_manager,
            config,
            clock,
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }
}

/// System clock, unless `SPONSOR_LEDGER_TODAY` pins the date.
pub fn clock_from_env() -> Box<dyn Clock> {
    let Ok(raw) = env::var(TODAY_ENV) else {
        return Box::new(SystemClock);
    };
    match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
        Ok(today) => Box::new(FixedClock::new(today)),
        Err(err) => {
            warn!(value = %raw, %err, "ignoring unparsable {TODAY_ENV}");
            Box::new(SystemClock)
        }
    }
}
