use std::fs;

use plaindb::executor::QueryResult;
use plaindb::storage::{JsonStorage, Storage, TableLoader};
use plaindb::{Config, Error, Session};
use serde_json::{json, Value as Json};

fn read_json(path: &std::path::Path) -> Json {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_documents_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = Session::new(JsonStorage::in_dir(dir.path()), Config::new());

    session
        .execute_line("create_table users name:str age:int active:bool")
        .unwrap();
    session
        .execute_line(r#"insert into users values ("Alice", 30, true)"#)
        .unwrap();

    let meta = read_json(&dir.path().join("db_meta.json"));
    assert_eq!(
        meta,
        json!({"users": {"columns": {"ID": "int", "name": "str", "age": "int", "active": "bool"}}})
    );
    let raw = fs::read_to_string(dir.path().join("db_meta.json")).unwrap();
    let id_pos = raw.find("\"ID\"").unwrap();
    assert!(id_pos < raw.find("\"name\"").unwrap());
    assert!(raw.find("\"name\"").unwrap() < raw.find("\"age\"").unwrap());

    let records = read_json(&dir.path().join("data").join("users.json"));
    assert_eq!(
        records,
        json!([{"ID": 1, "name": "Alice", "age": 30, "active": true}])
    );
}

#[test]
fn test_reopen_sees_previous_session() {
    let dir = tempfile::tempdir().unwrap();

    {
        let mut session = Session::new(JsonStorage::in_dir(dir.path()), Config::new());
        session.execute_line("create_table notes body:str").unwrap();
        session
            .execute_line("insert into notes values ('first')")
            .unwrap();
        session
            .execute_line("insert into notes values ('second')")
            .unwrap();
        session
            .execute_line("delete from notes where ID = 2")
            .unwrap();
    }

    let mut session = Session::new(JsonStorage::in_dir(dir.path()), Config::new());
    match session.execute_line("info notes").unwrap() {
        QueryResult::TableInfo { record_count, .. } => assert_eq!(record_count, 1),
        other => panic!("Expected TableInfo, got {:?}", other),
    }

    let result = session
        .execute_line("insert into notes values ('third')")
        .unwrap();
    assert!(matches!(result, QueryResult::Inserted { id: 2, .. }));
}

#[test]
fn test_drop_table_removes_document() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = Session::new(JsonStorage::in_dir(dir.path()), Config::new());

    session.execute_line("create_table t a:int").unwrap();
    session.execute_line("insert into t values (1)").unwrap();
    let table_path = session.storage().table_path("t");
    assert!(table_path.is_file());

    session.execute_line("drop_table t").unwrap();
    assert!(!table_path.exists());
    assert!(session.storage().load_catalog().unwrap().is_empty());
}

#[test]
fn test_table_without_document_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = Session::new(JsonStorage::in_dir(dir.path()), Config::new());

    session.execute_line("create_table t a:int").unwrap();
    assert!(!session.storage().table_records_exist("t"));
    match session.execute_line("select from t").unwrap() {
        QueryResult::Rows { records, .. } => assert!(records.is_empty()),
        other => panic!("Expected rows, got {:?}", other),
    }
}

#[test]
fn test_catalog_without_leading_id_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("db_meta.json"),
        r#"{"users": {"columns": {"name": "str"}}}"#,
    )
    .unwrap();

    let storage = JsonStorage::in_dir(dir.path());
    assert!(matches!(storage.load_catalog(), Err(Error::Serialization(_))));

    let mut session = Session::new(storage, Config::new());
    assert!(session.execute_line("list_tables").is_err());
}

#[test]
fn test_corrupt_table_document_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = Session::new(JsonStorage::in_dir(dir.path()), Config::new());
    session.execute_line("create_table t a:int").unwrap();

    let table_path = session.storage().table_path("t");
    fs::create_dir_all(table_path.parent().unwrap()).unwrap();
    let corrupt = r#"[{"ID": 1, "a": "oops"}, {"ID": 1, "a": 2}, {"ID": -5, "a": 3}]"#;
    fs::write(&table_path, corrupt).unwrap();

    let err = session.execute_line("select from t").unwrap_err();
    assert!(matches!(err, Error::CorruptTable { .. }), "got {:?}", err);
    assert!(session.execute_line("insert into t values (4)").is_err());
    assert_eq!(fs::read_to_string(&table_path).unwrap(), corrupt);
}

#[test]
fn test_largest_stored_id_blocks_insert() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = Session::new(JsonStorage::in_dir(dir.path()), Config::new());
    session.execute_line("create_table t a:int").unwrap();

    let table_path = session.storage().table_path("t");
    fs::create_dir_all(table_path.parent().unwrap()).unwrap();
    fs::write(&table_path, r#"[{"ID": 9223372036854775807, "a": 1}]"#).unwrap();

    let err = session.execute_line("insert into t values (2)").unwrap_err();
    assert!(matches!(err, Error::Internal(_)), "got {:?}", err);
    let records = read_json(&table_path);
    assert_eq!(records.as_array().map(Vec::len), Some(1));
}
