//! Show command - print a recorded checksum

use crate::cache::ChecksumCache;
use crate::cli::args::ShowArgs;
use crate::config::Config;
use crate::error::{ArtefactorError, ArtefactorResult};

/// Execute the show command
pub fn execute(args: ShowArgs, config: &Config) -> ArtefactorResult<()> {
    let mut cache =
        ChecksumCache::from_existing_file_named(&args.file, &config.ledger.file_name, false)?;

    if cache.is_cached(&args.file)? {
        if let Some(entry) = cache.get(&args.file) {
            println!("{}", entry.checksum);
            return Ok(());
        }
    }

    Err(ArtefactorError::NotCached(args.file))
}
