//! Backlinks command implementation.

use std::path::Path;

use vaultnav_core::index::IndexQueries;
use vaultnav_core::lines::records;

use super::tags::{open_one, report_missing_index};
use crate::BacklinksArgs;

pub fn run(config: Option<&Path>, profile: Option<&str>, args: BacklinksArgs) -> i32 {
    let rc = super::load_config(config, profile);
    let index = IndexQueries::from_config(&rc);

    if !index.is_available() {
        return report_missing_index(&rc.index_path);
    }

    let sources = records(&index.backlinks_from(super::normalize_path(&args.file)));
    if sources.is_empty() {
        eprintln!("No backlinks to {}", args.file);
        return 0;
    }

    if args.open {
        return open_one(&rc, "Open backlink", &sources, args.no_interactive);
    }

    for source in &sources {
        println!("{}", source);
    }
    0
}
