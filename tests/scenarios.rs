use plaindb::catalog::ColumnType;
use plaindb::executor::QueryResult;
use plaindb::storage::{MemoryStorage, Record, Storage, TableLoader, Value};
use plaindb::{Config, Error, ErrorKind, Session};

fn new_session() -> Session<MemoryStorage> {
    Session::new(MemoryStorage::new(), Config::new())
}

fn rows(result: QueryResult) -> Vec<Record> {
    match result {
        QueryResult::Rows { records, .. } => records,
        other => panic!("Expected rows, got {:?}", other),
    }
}

#[test]
fn test_users_walkthrough() {
    let mut session = new_session();

    // create_table
    let result = session
        .execute_line("create_table users name:str age:int")
        .unwrap();
    let schema = match result {
        QueryResult::TableCreated { schema, .. } => schema,
        other => panic!("Expected TableCreated, got {:?}", other),
    };
    assert_eq!(
        schema.columns().collect::<Vec<_>>(),
        vec![
            ("ID", ColumnType::Integer),
            ("name", ColumnType::String),
            ("age", ColumnType::Integer),
        ]
    );

    // Two inserts get IDs 1 and 2
    let alice = session
        .execute_line(r#"insert into users values ("Alice", 30)"#)
        .unwrap();
    assert!(matches!(alice, QueryResult::Inserted { id: 1, .. }));
    let bob = session
        .execute_line(r#"insert into users values ("Bob", 25)"#)
        .unwrap();
    assert!(matches!(bob, QueryResult::Inserted { id: 2, .. }));

    let stored = session.storage().load_table_records("users").unwrap();
    assert_eq!(
        stored.records()[0],
        Record::from_pairs([
            ("ID", Value::from(1)),
            ("name", "Alice".into()),
            ("age", 30.into()),
        ])
    );

    // Delete Alice
    let result = session
        .execute_line(r#"delete from users where name = "Alice""#)
        .unwrap();
    assert_eq!(
        result,
        QueryResult::Deleted {
            table_name: "users".to_string(),
            ids: vec![1],
        }
    );
    let remaining = session.storage().load_table_records("users").unwrap();
    assert_eq!(remaining.iter().filter_map(Record::id).collect::<Vec<_>>(), vec![2]);

    // Next ID comes from the current max, not the record count
    let carol = session
        .execute_line(r#"insert into users values ("Carol", 40)"#)
        .unwrap();
    assert!(matches!(carol, QueryResult::Inserted { id: 3, .. }));

    // Filtered select
    let found = rows(session.execute_line("select from users where age = 25").unwrap());
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].get("name"), Some(&Value::from("Bob")));

    // Wrong arity leaves the store alone
    let before = session.storage().load_table_records("users").unwrap();
    let err = session
        .execute_line(r#"insert into users values ("Dana")"#)
        .unwrap_err();
    assert!(matches!(
        err,
        Error::ArityMismatch {
            expected: 2,
            found: 1
        }
    ));
    assert_eq!(session.storage().load_table_records("users").unwrap(), before);
}

#[test]
fn test_repeated_delete_is_not_an_error() {
    let mut session = new_session();
    session.execute_line("create_table t flag:bool").unwrap();
    session.execute_line("insert into t values (true)").unwrap();

    let first = session.execute_line("delete from t where flag = true").unwrap();
    let second = session.execute_line("delete from t where flag = true").unwrap();
    assert!(matches!(first, QueryResult::Deleted { ids, .. } if ids == vec![1]));
    assert!(matches!(second, QueryResult::Deleted { ids, .. } if ids.is_empty()));
}

#[test]
fn test_booleans_are_not_integers() {
    let mut session = new_session();
    session.execute_line("create_table t n:int b:bool").unwrap();

    let err = session.execute_line("insert into t values (true, 1)").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidType);

    session.execute_line("insert into t values (1, true)").unwrap();
    assert!(rows(session.execute_line("select from t where b = 1").unwrap()).is_empty());
    assert_eq!(
        rows(session.execute_line("select from t where b = true").unwrap()).len(),
        1
    );
}

#[test]
fn test_select_cache_sees_updates() {
    let mut session = new_session();
    session.execute_line("create_table users name:str age:int").unwrap();
    session
        .execute_line(r#"insert into users values ("Bob", 25)"#)
        .unwrap();

    let before = rows(session.execute_line("select from users where name = Bob").unwrap());
    assert_eq!(before[0].get("age"), Some(&Value::Integer(25)));

    session
        .execute_line("update users set age = 26 where name = Bob")
        .unwrap();
    let after = rows(session.execute_line("select from users where name = Bob").unwrap());
    assert_eq!(after[0].get("age"), Some(&Value::Integer(26)));
}

#[test]
fn test_drop_and_recreate_starts_empty() {
    let mut session = new_session();
    session.execute_line("create_table t a:int").unwrap();
    session.execute_line("insert into t values (1)").unwrap();
    assert_eq!(rows(session.execute_line("select from t").unwrap()).len(), 1);

    session.execute_line("drop_table t").unwrap();
    session.execute_line("create_table t a:int b:str").unwrap();

    assert!(rows(session.execute_line("select from t").unwrap()).is_empty());
    let result = session.execute_line("insert into t values (5, x)").unwrap();
    assert!(matches!(result, QueryResult::Inserted { id: 1, .. }));
}

#[test]
fn test_error_kinds_at_the_boundary() {
    let mut session = new_session();
    session.execute_line("create_table users name:str").unwrap();

    let cases = [
        ("create_table users x:int", ErrorKind::DuplicateName),
        ("create_table t a:float", ErrorKind::InvalidType),
        ("create_table t a:int a:str", ErrorKind::DuplicateName),
        ("info nowhere", ErrorKind::NotFound),
        ("select from users where age", ErrorKind::InvalidSyntax),
        ("update users set name = x", ErrorKind::InvalidSyntax),
        ("delete from users", ErrorKind::InvalidSyntax),
        ("teleport users", ErrorKind::InvalidSyntax),
        ("insert into users values (1, 2)", ErrorKind::ArityMismatch),
    ];
    for (line, kind) in cases {
        let err = session.execute_line(line).unwrap_err();
        assert_eq!(err.kind(), kind, "{} gave {:?}", line, err);
    }

    assert_eq!(
        session.storage().load_catalog().unwrap().list_tables(),
        vec!["users".to_string()]
    );
}
