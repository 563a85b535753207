use predicates::str::contains;
use rdispatch::db::drivers::load_drivers;
use rdispatch::db::pool::DbPool;
use rdispatch::models::Scope;

mod common;
use common::{init_db_with_data, rdi, setup_test_db};

fn driver_count(db_path: &str) -> usize {
    let pool = DbPool::open(db_path).expect("open db");
    load_drivers(&pool.conn, &Scope::All).expect("drivers").len()
}

#[test]
fn test_wrong_code_keeps_everything() {
    let db_path = setup_test_db("purge_wrong_code");
    init_db_with_data(&db_path);

    rdi()
        .args(["--db", &db_path, "purge"])
        .write_stdin("000000\nn\n")
        .assert()
        .success()
        .stderr(contains("Código incorreto"))
        .stdout(contains("nada foi apagado"));

    assert_eq!(driver_count(&db_path), 2);
}

#[test]
fn test_closed_input_cancels_purge() {
    let db_path = setup_test_db("purge_eof");
    init_db_with_data(&db_path);

    rdi()
        .args(["--db", &db_path, "purge"])
        .write_stdin("")
        .assert()
        .success()
        .stdout(contains("Limpeza cancelada"));

    assert_eq!(driver_count(&db_path), 2);
}

#[test]
fn test_purge_requires_a_session() {
    let db_path = setup_test_db("purge_gate");

    rdi()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    rdi()
        .args(["--db", &db_path, "purge"])
        .write_stdin("123456\n")
        .assert()
        .failure();
}
