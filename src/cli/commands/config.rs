//! Config command - show configuration

use crate::cli::args::{ConfigAction, ConfigArgs};
use crate::config::ConfigManager;
use crate::error::DevBuildResult;

/// Execute the config command
pub fn execute(args: ConfigArgs, manager: &ConfigManager) -> DevBuildResult<()> {
    match args.action {
        None | Some(ConfigAction::Show) => show_config(manager),
        Some(ConfigAction::Path) => {
            println!("{}", manager.path().display());
            Ok(())
        }
    }
}

fn show_config(manager: &ConfigManager) -> DevBuildResult<()> {
    let config = manager.load()?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}
