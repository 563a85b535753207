use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use rdispatch::db::exit_logs::recent_logs;
use rdispatch::db::pool::DbPool;
use rdispatch::models::Scope;

mod common;
use common::{init_db_with_data, rdi, setup_test_db};

fn only_log_id(db_path: &str) -> String {
    let pool = DbPool::open(db_path).expect("open db");
    let logs = recent_logs(&pool.conn, &Scope::All, 10).expect("logs");
    assert_eq!(logs.len(), 1);
    logs[0].id.clone()
}

#[test]
fn test_volume_adjustment_never_goes_negative() {
    let db_path = setup_test_db("history_adjust");
    init_db_with_data(&db_path);
    let id = only_log_id(&db_path);

    rdi()
        .args(["--db", &db_path, "history", "adjust", &id, "--delta", "-1"])
        .assert()
        .success()
        .stdout(contains("agora é 4"));

    rdi()
        .args(["--db", &db_path, "history", "adjust", &id[..8], "--delta", "-10"])
        .assert()
        .success()
        .stdout(contains("agora é 0"));
}

#[test]
fn test_history_filter_and_delete() {
    let db_path = setup_test_db("history_filter");
    init_db_with_data(&db_path);

    rdi()
        .args(["--db", &db_path, "history", "--filter", "dt-50"])
        .assert()
        .success()
        .stdout(contains("Ana Souza"));

    rdi()
        .args(["--db", &db_path, "history", "--filter", "norte"])
        .assert()
        .success()
        .stdout(contains("Nenhuma saída"));

    let id = only_log_id(&db_path);
    rdi()
        .args(["--db", &db_path, "history", "del", &id, "--yes"])
        .assert()
        .success();

    rdi()
        .args(["--db", &db_path, "history"])
        .assert()
        .success()
        .stdout(contains("Nenhuma saída"));
}

#[test]
fn test_reports() {
    let db_path = setup_test_db("history_reports");
    init_db_with_data(&db_path);

    rdi()
        .args(["--db", &db_path, "report", "productivity", "101"])
        .assert()
        .success()
        .stdout(contains("Ana Souza").and(contains("5.0")));

    rdi()
        .args(["--db", &db_path, "report", "daily"])
        .assert()
        .success()
        .stdout(contains("Total: 1"));

    // Ana left, Bruno is still waiting
    rdi()
        .args(["--db", &db_path, "report", "frequency"])
        .assert()
        .success()
        .stdout(contains("SAIU").and(contains("EM FILA")));
}
