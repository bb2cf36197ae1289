//! List command - show files tracked in a directory

use crate::cache::{CacheEntry, ChecksumCache};
use crate::cli::args::{ListArgs, OutputFormat};
use crate::config::Config;
use crate::error::{ArtefactorError, ArtefactorResult};
use console::style;
use std::env;

/// Execute the list command
pub fn execute(args: ListArgs, config: &Config) -> ArtefactorResult<()> {
    let dir = match args.dir {
        Some(dir) => dir,
        None => env::current_dir().map_err(|e| ArtefactorError::io("getting current directory", e))?,
    };

    let cache = ChecksumCache::from_dir_named(&dir, &config.ledger.file_name, false)?;
    let entries: Vec<&CacheEntry> = cache.entries().collect();

    if entries.is_empty() {
        match args.format {
            OutputFormat::Json => println!("[]"),
            OutputFormat::Plain => {}
            OutputFormat::Table => println!("No tracked files in {}", cache.dir().display()),
        }
        return Ok(());
    }

    match args.format {
        OutputFormat::Table => print_table(&entries),
        OutputFormat::Json => print_json(&entries)?,
        OutputFormat::Plain => print_plain(&entries),
    }

    Ok(())
}

fn print_table(entries: &[&CacheEntry]) {
    println!(
        "{:<40} {:<64}",
        style("FILE").bold(),
        style("SHA256").bold()
    );
    println!("{}", "-".repeat(105));

    for entry in entries {
        println!("{:<40} {}", entry.file_name, style(&entry.checksum).dim());
    }

    println!();
    println!("Total: {} file(s)", entries.len());
}

fn print_json(entries: &[&CacheEntry]) -> ArtefactorResult<()> {
    println!("{}", serde_json::to_string_pretty(entries)?);
    Ok(())
}

fn print_plain(entries: &[&CacheEntry]) {
    for entry in entries {
        println!("{}", entry.path.display());
    }
}
