use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};

use crate::cli::parser::Commands;

/// Handle the `init` command: write the default configuration file.
pub fn handle(cmd: &Commands) -> AppResult<()> {
    if let Commands::Init { force } = cmd {
        let existed = Config::config_file().exists();
        let path = Config::init(*force)?;

        if existed && !*force {
            warning(format!(
                "Config file already present, use --force to overwrite: {}",
                path.display()
            ));
        } else {
            success(format!("Config file: {}", path.display()));
        }
    }

    Ok(())
}
