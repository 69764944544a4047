//! Follow command implementation.

use std::fs;
use std::path::Path;

use tracing::error;
use vaultnav_core::{Resolution, Resolver, UnresolvedReason};

use crate::launch::SystemLauncher;
use crate::picker::select_picker;
use crate::FollowArgs;

pub fn run(config: Option<&Path>, profile: Option<&str>, args: FollowArgs) -> i32 {
    let rc = super::load_config(config, profile);

    let line = match cursor_line(&args) {
        Ok(line) => line,
        Err(e) => {
            error!("{}", e);
            return 1;
        }
    };

    let resolver = Resolver::from_config(&rc, select_picker(super::capabilities(args.no_interactive)));

    let resolution = if args.print || args.json {
        resolver.resolve(&line, args.col)
    } else {
        let mut launcher = SystemLauncher::from_config(&rc);
        let resolution = resolver.follow(&line, args.col, &mut launcher);
        if launcher.failed() {
            return 1;
        }
        resolution
    };

    if args.json {
        match serde_json::to_string(&resolution) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                error!("Failed to serialize resolution: {}", e);
                return 1;
            }
        }
    } else if args.print {
        if let Some(path) = resolution.path() {
            println!("{}\t{}", resolution.label(), path);
        }
    }

    exit_code(&resolution, !args.json)
}

/// The line under the cursor, from `--line` or `--file`/`--row`.
fn cursor_line(args: &FollowArgs) -> Result<String, String> {
    if let Some(ref line) = args.line {
        return Ok(line.clone());
    }

    let (Some(file), Some(row)) = (&args.file, args.row) else {
        return Err("either --line or --file with --row is required".to_string());
    };
    if row == 0 {
        return Err("--row is 1-based".to_string());
    }

    let text = fs::read_to_string(file)
        .map_err(|e| format!("Failed to read {}: {}", file.display(), e))?;

    text.lines()
        .nth(row - 1)
        .map(str::to_string)
        .ok_or_else(|| format!("{} has no line {}", file.display(), row))
}

/// Status for a finished follow. A cursor outside any link is not an error.
fn exit_code(resolution: &Resolution, report: bool) -> i32 {
    match resolution {
        Resolution::Unresolved { reason: UnresolvedReason::NoTokenUnderCursor } => 0,
        Resolution::Unresolved { reason } => {
            if report {
                eprintln!("{}", reason);
            }
            1
        }
        _ => 0,
    }
}
