//! Configuration command.

use numen_core::Config;

/// Open the config file in the editor, then echo its location.
pub async fn handle_config(config: &Config) -> anyhow::Result<()> {
    let path = Config::path()?;
    super::open_editor(config, &path)?;
    println!("Edited config file: {}", path.display());
    Ok(())
}
