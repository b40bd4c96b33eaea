use std::path::Path;

use anyhow::Result;

use scrollkeep_core::AppConfig;

pub fn run(config: &AppConfig, explicit_path: Option<&Path>, write: bool) -> Result<()> {
    if write {
        let path = match explicit_path {
            Some(path) => {
                config.save_to(path)?;
                path.to_path_buf()
            }
            None => {
                config.save()?;
                AppConfig::config_path()
            }
        };
        println!("Wrote {}", path.display());
        return Ok(());
    }

    let path = explicit_path
        .map(Path::to_path_buf)
        .unwrap_or_else(AppConfig::config_path);
    let source = if path.exists() { "" } else { " (not found, showing defaults)" };

    println!("# {}{}", path.display(), source);
    println!("{}", config.to_toml()?);

    Ok(())
}
