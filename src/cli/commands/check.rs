//! Check command - test a file against its checksum file

use crate::cache::ChecksumCache;
use crate::cli::args::CheckArgs;
use crate::config::Config;
use crate::error::{ArtefactorError, ArtefactorResult};
use console::style;

/// Execute the check command
///
/// Succeeds on a cache hit; any miss is returned as an error so the
/// process exits non-zero.
pub fn execute(args: CheckArgs, config: &Config) -> ArtefactorResult<()> {
    let mut cache =
        ChecksumCache::from_existing_file_named(&args.file, &config.ledger.file_name, false)?;
    let status = cache.status(&args.file, args.sha256.as_deref())?;

    match status.miss_reason() {
        None => {
            println!("{} {}", style("cached").green(), args.file.display());
            Ok(())
        }
        Some(reason) => Err(ArtefactorError::CacheMiss {
            path: args.file,
            reason: reason.to_string(),
        }),
    }
}
