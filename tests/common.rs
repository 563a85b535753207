#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn rdi() -> Command {
    cargo_bin_cmd!("rdispatch")
}

/// Unique test DB path inside the system temp dir; removes any leftover
/// database and session file.
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rdispatch.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    fs::remove_file(format!("{db_path}.session.json")).ok();
    db_path
}

/// Temporary output file path inside tempdir, removed if present
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// `init` in test mode followed by an administrator login
pub fn init_as_admin(db_path: &str) {
    rdi()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    rdi()
        .args(["--db", db_path, "login", "--admin"])
        .assert()
        .success();
}

pub fn add_driver(db_path: &str, name: &str, fleet: &str, company: &str) {
    rdi()
        .args([
            "--db",
            db_path,
            "driver",
            "add",
            "--name",
            name,
            "--fleet",
            fleet,
            "--registration",
            "ABC1D23",
            "--company",
            company,
        ])
        .assert()
        .success();
}

pub fn enqueue(db_path: &str, fleet: &str, period: &str) {
    rdi()
        .args(["--db", db_path, "queue", "add", fleet, "--period", period])
        .assert()
        .success();
}

pub fn exit_head(db_path: &str, period: &str, zone: &str, dt: &str, orders: &str) {
    rdi()
        .args([
            "--db", db_path, "exit", "--period", period, "--zone", zone, "--dt", dt, "--orders",
            orders,
        ])
        .assert()
        .success();
}

/// Small dataset: two drivers queued in the morning, the first one dispatched.
pub fn init_db_with_data(db_path: &str) {
    init_as_admin(db_path);
    add_driver(db_path, "Ana Souza", "101", "INNOVATIVE");
    add_driver(db_path, "Bruno Lima", "202", "NAVEGAM");
    enqueue(db_path, "101", "manha");
    enqueue(db_path, "202", "manha");
    exit_head(db_path, "manha", "sul", "DT-5001", "5");
}
