use std::path::Path;

use crate::cli::commands::Cli;
use crate::cli::output::{document_to_json, format_outline};
use crate::io::config_io;
use crate::io::file_io::{read_and_parse, resolve_document};
use crate::model::AppConfig;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = config_io::load_config(cli.config.as_deref())?;
    if let Some(ms) = cli.debounce_ms {
        config.watch.debounce_ms = ms;
    }

    if cli.json {
        cmd_json(&cli.file)
    } else if cli.print {
        cmd_print(&cli.file)
    } else {
        cmd_view(&cli.file, &config)
    }
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn cmd_view(file: &Path, config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    crate::tui::run(file, config)
}

fn cmd_json(file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let path = resolve_document(file)?;
    let sections = read_and_parse(&path)?;
    let doc = document_to_json(&path.display().to_string(), &sections);
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}

fn cmd_print(file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let path = resolve_document(file)?;
    let sections = read_and_parse(&path)?;
    print!("{}", format_outline(&sections));
    Ok(())
}
