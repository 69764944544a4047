use assert_cmd::prelude::*;
use predicates::prelude::*;
use rusqlite::Connection;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::{tempdir, TempDir};
use vaultnav_core::index::INDEX_SCHEMA;

fn setup_vault(with_index: bool) -> (TempDir, PathBuf) {
    let tmp = tempdir().unwrap();
    let vault = tmp.path().join("vault");
    fs::create_dir_all(vault.join(".vaultnav")).unwrap();

    if with_index {
        let conn = Connection::open(vault.join(".vaultnav/index.db")).unwrap();
        conn.execute_batch(INDEX_SCHEMA).unwrap();
        conn.execute_batch(
            "INSERT INTO files (id, path) VALUES
                (1, 'daily/2024-05-01.md'),
                (2, 'projects/Ideas.md'),
                (3, 'inbox.md');
             INSERT INTO backlinks (source_id, target_id, link) VALUES
                (1, 2, 'Ideas'),
                (3, 2, 'projects/Ideas'),
                (1, 3, 'inbox');
             INSERT INTO tags (id, name) VALUES (1, 'project'), (2, 'daily'), (3, 'todo');
             INSERT INTO file_tags (file_id, tag_id) VALUES (2, 1), (1, 2), (2, 3), (3, 3);",
        )
        .unwrap();
    }

    let cfg = tmp.path().join("config.toml");
    fs::write(
        &cfg,
        format!("version = 1\n[profiles.default]\nvault_root = \"{}\"\n", vault.display()),
    )
    .unwrap();

    (tmp, cfg)
}

fn vnav(cfg: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("vnav"));
    cmd.arg("--config").arg(cfg);
    cmd
}

#[test]
fn tags_lists_all_tags_sorted() {
    let (_tmp, cfg) = setup_vault(true);

    vnav(&cfg).arg("tags").assert().success().stdout("daily\nproject\ntodo\n");
}

#[test]
fn tagged_lists_files() {
    let (_tmp, cfg) = setup_vault(true);

    vnav(&cfg)
        .args(["tagged", "#todo"])
        .assert()
        .success()
        .stdout("inbox.md\nprojects/Ideas.md\n");
}

#[test]
fn tagged_unknown_tag_is_empty() {
    let (_tmp, cfg) = setup_vault(true);

    vnav(&cfg)
        .args(["tagged", "nothing"])
        .assert()
        .success()
        .stdout("")
        .stderr(predicate::str::contains("No files tagged #nothing"));
}

#[test]
fn backlinks_deduplicates_sources() {
    let (_tmp, cfg) = setup_vault(true);

    vnav(&cfg)
        .args(["backlinks", "./projects/Ideas.md"])
        .assert()
        .success()
        .stdout("daily/2024-05-01.md\ninbox.md\n");
}

#[test]
fn backlinks_by_fragment() {
    let (_tmp, cfg) = setup_vault(true);

    vnav(&cfg).args(["backlinks", "inbox"]).assert().success().stdout("daily/2024-05-01.md\n");
}

#[test]
fn backlinks_open_uses_configured_editor() {
    let (_tmp, cfg) = setup_vault(true);
    let mut config = fs::read_to_string(&cfg).unwrap();
    config.push_str("\n[launch]\neditor = \"true\"\n");
    fs::write(&cfg, config).unwrap();

    vnav(&cfg)
        .args(["backlinks", "inbox", "--open", "--no-interactive"])
        .assert()
        .success();
}

#[test]
fn missing_index_is_reported() {
    let (_tmp, cfg) = setup_vault(false);

    vnav(&cfg)
        .arg("tags")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Index not found"));
}
