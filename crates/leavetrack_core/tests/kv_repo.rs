use leavetrack_core::db::open_db_in_memory;
use leavetrack_core::{load_json, save_json, KvRepository, RepoError, SqliteKvRepository};

#[test]
fn put_get_and_overwrite_value() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteKvRepository::try_new(&conn).unwrap();

    assert!(repo.get_value("annees").unwrap().is_none());

    repo.put_value("annees", "[2025]").unwrap();
    repo.put_value("annees", "[2025,2026]").unwrap();

    assert_eq!(
        repo.get_value("annees").unwrap().as_deref(),
        Some("[2025,2026]")
    );
    assert_eq!(repo.list_keys().unwrap(), vec!["annees".to_string()]);
}

#[test]
fn delete_value_is_idempotent() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteKvRepository::try_new(&conn).unwrap();

    repo.put_value("jours", "{}").unwrap();
    repo.delete_value("jours").unwrap();
    repo.delete_value("jours").unwrap();

    assert!(repo.get_value("jours").unwrap().is_none());
    assert!(repo.list_keys().unwrap().is_empty());
}

#[test]
fn empty_key_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteKvRepository::try_new(&conn).unwrap();

    let err = repo.put_value("", "x").unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}

#[test]
fn json_helpers_roundtrip_and_surface_corruption() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteKvRepository::try_new(&conn).unwrap();

    save_json(&repo, "annees", &vec![2024, 2025]).unwrap();
    let years: Vec<i32> = load_json(&repo, "annees").unwrap().unwrap();
    assert_eq!(years, vec![2024, 2025]);

    repo.put_value("annees", "not json").unwrap();
    let err = load_json::<Vec<i32>, _>(&repo, "annees").unwrap_err();
    match err {
        RepoError::Serialization { key, .. } => assert_eq!(key, "annees"),
        other => panic!("unexpected error: {other}"),
    }
}
