use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use rdispatch::db::pool::DbPool;
use rdispatch::db::queues::load_queue;
use rdispatch::models::{Period, Scope};

mod common;
use common::{add_driver, enqueue, exit_head, init_as_admin, rdi, setup_test_db};

fn morning_names(db_path: &str) -> Vec<String> {
    let pool = DbPool::open(db_path).expect("open db");
    load_queue(&pool.conn, &Scope::All, Period::Morning)
        .expect("load queue")
        .into_iter()
        .map(|e| e.driver.name)
        .collect()
}

#[test]
fn test_move_second_to_head() {
    let db_path = setup_test_db("queue_move");
    init_as_admin(&db_path);
    add_driver(&db_path, "Ana", "1", "INNOVATIVE");
    add_driver(&db_path, "Bruno", "2", "NAVEGAM");
    enqueue(&db_path, "1", "m");
    enqueue(&db_path, "2", "m");

    assert_eq!(morning_names(&db_path), vec!["Ana", "Bruno"]);

    rdi()
        .args(["--db", &db_path, "queue", "move", "--period", "m", "--from", "2", "--to", "1"])
        .assert()
        .success();

    assert_eq!(morning_names(&db_path), vec!["Bruno", "Ana"]);
}

#[test]
fn test_same_driver_cannot_queue_twice_in_a_period() {
    let db_path = setup_test_db("queue_duplicate");
    init_as_admin(&db_path);
    add_driver(&db_path, "Carla", "3", "INNOVATIVE");
    enqueue(&db_path, "3", "tarde");

    rdi()
        .args(["--db", &db_path, "queue", "add", "3", "--period", "tarde"])
        .assert()
        .failure()
        .stderr(contains("já está na fila"));

    // the other period is still free
    enqueue(&db_path, "3", "manha");
}

#[test]
fn test_exit_moves_driver_from_queue_to_history() {
    let db_path = setup_test_db("queue_exit");
    init_as_admin(&db_path);
    add_driver(&db_path, "Davi", "4", "INNOVATIVE");
    add_driver(&db_path, "Eva", "5", "NAVEGAM");
    enqueue(&db_path, "4", "m");
    enqueue(&db_path, "5", "m");

    exit_head(&db_path, "m", "centro sul", "DT-77", "12");

    assert_eq!(morning_names(&db_path), vec!["Eva"]);

    rdi()
        .args(["--db", &db_path, "history"])
        .assert()
        .success()
        .stdout(contains("Davi").and(contains("CENTRO SUL")).and(contains("DT-77")));
}

#[test]
fn test_exit_rejects_unknown_zone_and_empty_queue() {
    let db_path = setup_test_db("queue_exit_errors");
    init_as_admin(&db_path);

    rdi()
        .args(["--db", &db_path, "exit", "--period", "t", "--zone", "MARTE", "--dt", "1"])
        .assert()
        .failure()
        .stderr(contains("Zona inválida"));

    rdi()
        .args(["--db", &db_path, "exit", "--period", "t", "--zone", "SUL", "--dt", "1"])
        .assert()
        .failure()
        .stderr(contains("vazia"));
}

#[test]
fn test_board_shows_both_periods() {
    let db_path = setup_test_db("queue_board");
    init_as_admin(&db_path);
    add_driver(&db_path, "Fabio", "6", "INNOVATIVE");
    enqueue(&db_path, "6", "t");

    rdi()
        .args(["--db", &db_path, "board"])
        .assert()
        .success()
        .stdout(contains("MANHÃ").and(contains("TARDE")).and(contains("Fabio")));
}
