//! Tag listing commands.

use std::path::Path;

use vaultnav_core::config::ResolvedConfig;
use vaultnav_core::index::IndexQueries;
use vaultnav_core::lines::records;
use vaultnav_core::vault::join_root;
use vaultnav_core::Launcher;

use crate::launch::SystemLauncher;
use crate::picker::select_picker;
use crate::TaggedArgs;

pub fn run_tags(config: Option<&Path>, profile: Option<&str>) -> i32 {
    let rc = super::load_config(config, profile);
    let index = IndexQueries::from_config(&rc);

    if !index.is_available() {
        return report_missing_index(&rc.index_path);
    }

    for tag in records(&index.all_tags()) {
        println!("{}", tag);
    }
    0
}

pub fn run_tagged(config: Option<&Path>, profile: Option<&str>, args: TaggedArgs) -> i32 {
    let rc = super::load_config(config, profile);
    let index = IndexQueries::from_config(&rc);

    if !index.is_available() {
        return report_missing_index(&rc.index_path);
    }

    let tag = args.tag.trim_start_matches('#');
    let files = records(&index.files_by_tag(tag));
    if files.is_empty() {
        eprintln!("No files tagged #{}", tag);
        return 0;
    }

    if args.open {
        return open_one(&rc, "Open tagged file", &files, args.no_interactive);
    }

    for file in &files {
        println!("{}", file);
    }
    0
}

pub(super) fn report_missing_index(path: &Path) -> i32 {
    eprintln!("Index not found at {}", path.display());
    eprintln!("Hint: build the index with your vault indexer first.");
    1
}

/// Let the user pick one vault-relative path and open it in the editor.
pub(super) fn open_one(
    rc: &ResolvedConfig,
    prompt: &str,
    paths: &[String],
    no_interactive: bool,
) -> i32 {
    let picker = select_picker(super::capabilities(no_interactive));
    let Some(chosen) = picker.choose(prompt, paths) else {
        return 1;
    };

    let mut launcher = SystemLauncher::from_config(rc);
    launcher.open_note(&join_root(&rc.vault_root.to_string_lossy(), &chosen));
    if launcher.failed() {
        1
    } else {
        0
    }
}
