//! Path cleaning for cache keys

use crate::error::{ArtefactorError, ArtefactorResult};
use std::path::{Component, Path, PathBuf};

/// Lexically normalize a path: drop `.` segments, fold `..` into the
/// preceding segment and collapse repeated separators.
///
/// `..` directly below the root is dropped. Leading `..` on a relative path
/// is kept. An empty result becomes `.`.
pub fn clean_path(path: &Path) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }

    if out.is_empty() {
        return PathBuf::from(".");
    }
    out.iter().collect()
}

/// Make a path absolute against the current directory, then clean it.
///
/// Symlinks are not resolved, so a file need not exist to get a key.
pub fn cache_key(path: &Path) -> ArtefactorResult<PathBuf> {
    let absolute = std::path::absolute(path)
        .map_err(|e| ArtefactorError::io(format!("resolving {}", path.display()), e))?;
    Ok(clean_path(&absolute))
}
