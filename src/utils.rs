use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Checks if a file's extension, compared case-insensitively, is in `extensions`.
/// Extensions are given without the leading dot.
fn has_extension(entry: &DirEntry, extensions: &[String]) -> bool {
    entry
        .path()
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
}

/// Lists the regular files directly inside `dir` whose extension is accepted,
/// sorted by file name. Sub-directories are not descended into.
///
/// An error reading `dir` itself is returned; entries that cannot be
/// inspected are skipped.
pub fn list_image_files(dir: &Path, extensions: &[String]) -> Result<Vec<PathBuf>, walkdir::Error> {
    let mut walker = WalkDir::new(dir)
        .min_depth(0)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter();

    // The root entry comes first; surfacing its error tells the caller the
    // directory itself is unusable.
    match walker.next() {
        Some(Err(e)) => return Err(e),
        Some(Ok(_)) | None => {}
    }

    Ok(walker
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file() && has_extension(entry, extensions))
        .map(DirEntry::into_path)
        .collect())
}
