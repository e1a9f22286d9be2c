//! Project scaffolding for `grail init`.

use std::path::Path;

use crate::cli::output::Output;
use crate::types::{AppError, Result};
use crate::utils::config::GrailConfig;

/// Write a default `grail.toml` into `path`.
///
/// Refuses to overwrite an existing file unless `force` is set.
pub fn run(path: &Path, force: bool, output: &Output) -> Result<()> {
    let config_path = path.join("grail.toml");

    if config_path.exists() && !force {
        return Err(AppError::Config(format!(
            "{} already exists (use --force to overwrite)",
            config_path.display()
        )));
    }

    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }

    let config = GrailConfig::default();
    let rendered = toml::to_string_pretty(&config)
        .map_err(|e| AppError::Config(format!("cannot render default config: {}", e)))?;

    std::fs::write(&config_path, header().to_string() + &rendered)?;

    output.created("config", &config_path.display().to_string());
    output.success("Initialized GRAIL project");
    output.info("Edit grail.toml to point [source] at your documents, then run `grail`");
    Ok(())
}

fn header() -> &'static str {
    "# GRAIL configuration\n\
     #\n\
     # source.kind selects where documents come from:\n\
     #   \"samples\" - built-in demo corpus\n\
     #   \"url\"     - fetch one web page (set source.url)\n\
     #   \"dir\"     - walk a directory of text files (set source.dir)\n\n"
}
