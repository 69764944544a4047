//! Filename search under a directory root.

use std::path::Path;

use walkdir::WalkDir;

/// Filename substring search.
///
/// Returns newline-delimited paths, each prefixed with `root` as given (the
/// way `find <root>` prints them), every line terminated by `\n`. A search
/// that cannot run yields empty output.
pub trait FileSearch {
    fn search(&self, root: &Path, term: &str) -> String;
}

/// Searches the file system with `walkdir`, skipping hidden entries.
#[derive(Debug, Clone, Copy, Default)]
pub struct WalkdirSearch;

impl FileSearch for WalkdirSearch {
    fn search(&self, root: &Path, term: &str) -> String {
        if term.is_empty() {
            return String::new();
        }
        if !root.is_dir() {
            tracing::warn!("search root does not exist: {}", root.display());
            return String::new();
        }

        let mut matches = Vec::new();
        for entry in WalkDir::new(root)
            .follow_links(true)
            .into_iter()
            .filter_entry(|e| !is_excluded(e))
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::debug!("skipping unreadable entry: {}", e);
                    continue;
                }
            };

            if entry.file_type().is_file()
                && entry.file_name().to_string_lossy().contains(term)
            {
                matches.push(entry.into_path());
            }
        }

        matches.sort();
        matches.iter().fold(String::new(), |mut out, path| {
            out.push_str(&path.to_string_lossy());
            out.push('\n');
            out
        })
    }
}

fn is_excluded(entry: &walkdir::DirEntry) -> bool {
    // Never filter the root itself
    if entry.depth() == 0 {
        return false;
    }
    entry.file_name().to_string_lossy().starts_with('.')
}
