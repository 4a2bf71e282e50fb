use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::slots::TimeSlotCatalog;
use crate::errors::AppResult;

/// Print one time slot label per line.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Slots { step } = cmd {
        let catalog = TimeSlotCatalog::new(step.unwrap_or(cfg.slot_step_minutes))?;
        for slot in catalog.iter() {
            println!("{}", slot);
        }
    }

    Ok(())
}
