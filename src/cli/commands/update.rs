//! Update command - record checksums

use crate::cache::ChecksumCache;
use crate::cli::args::UpdateArgs;
use crate::config::Config;
use crate::error::ArtefactorResult;
use tracing::debug;

/// Execute the update command
pub fn execute(args: UpdateArgs, config: &Config) -> ArtefactorResult<()> {
    for file in &args.files {
        let mut cache =
            ChecksumCache::from_existing_file_named(file, &config.ledger.file_name, false)?;
        debug!("Using checksum file {}", cache.ledger_path().display());

        let checksum = cache.update(file)?;
        println!("{}  {}", checksum, file.display());
    }

    Ok(())
}
