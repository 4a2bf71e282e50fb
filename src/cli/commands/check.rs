use crate::cli::parser::Commands;
use crate::core::availability::DateAvailabilityPolicy;
use crate::errors::AppResult;
use crate::utils::date;

/// Report whether a date is open for editing.
pub fn handle(cmd: &Commands) -> AppResult<()> {
    if let Commands::Check {
        date: d,
        today,
        uploaded,
    } = cmd
    {
        let target = date::require_date(d)?;
        let today = match today {
            Some(t) => date::require_date(t)?,
            None => date::today(),
        };
        let uploaded = uploaded
            .iter()
            .filter(|s| !s.trim().is_empty())
            .map(|s| date::require_date(s))
            .collect::<AppResult<Vec<_>>>()?;

        let policy = DateAvailabilityPolicy::new(uploaded);

        let verdict = if !policy.is_disabled(target, today) {
            "enabled"
        } else if policy.is_uploaded(target) {
            "disabled (already submitted)"
        } else {
            "disabled (future date)"
        };

        println!("{}: {}", date::format_date(target), verdict);
    }

    Ok(())
}
