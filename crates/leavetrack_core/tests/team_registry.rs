use leavetrack_core::db::open_db_in_memory;
use leavetrack_core::{
    load_json, AddMemberOutcome, DayAssignmentStore, KvRepository, Member, SqliteKvRepository,
    TeamRegistry, TEAM_KEY,
};

fn empty_team(repo: SqliteKvRepository<'_>) -> TeamRegistry<SqliteKvRepository<'_>> {
    repo.put_value(TEAM_KEY, "[]").unwrap();
    TeamRegistry::load(repo).unwrap()
}

fn active_ids<R: KvRepository>(team: &TeamRegistry<R>) -> Vec<i64> {
    team.active_members().iter().map(|member| member.id).collect()
}

#[test]
fn ids_are_sequential_from_one() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteKvRepository::try_new(&conn).unwrap();
    let mut team = empty_team(repo);

    assert_eq!(team.add_member("Bob").unwrap(), AddMemberOutcome::Created(1));
    assert_eq!(team.add_member("Carol").unwrap(), AddMemberOutcome::Created(2));
}

#[test]
fn bob_and_carol_scenario_preserves_identity_on_reactivation() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteKvRepository::try_new(&conn).unwrap();
    let mut team = empty_team(repo);

    let bob = team.add_member("Bob").unwrap().id();
    let carol = team.add_member("Carol").unwrap().id();
    assert_eq!((bob, carol), (1, 2));

    assert!(team.remove_member(bob).unwrap());
    assert_eq!(active_ids(&team), vec![2]);
    assert_eq!(team.active_members()[0].name, "Carol");

    assert_eq!(
        team.add_member("Bob").unwrap(),
        AddMemberOutcome::Reactivated(1)
    );
    assert_eq!(active_ids(&team), vec![1, 2]);
    assert_eq!(team.members().len(), 2);
}

#[test]
fn remove_then_add_same_trimmed_name_reuses_id() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteKvRepository::try_new(&conn).unwrap();
    let mut team = empty_team(repo);

    let id = team.add_member("Alice").unwrap().id();
    team.remove_member(id).unwrap();
    let again = team.add_member("  Alice ").unwrap();

    assert_eq!(again.id(), id);
    assert!(team.get(id).unwrap().active);
}

#[test]
fn removed_highest_id_is_not_reused() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteKvRepository::try_new(&conn).unwrap();
    let mut team = empty_team(repo);

    team.add_member("A").unwrap();
    let b = team.add_member("B").unwrap().id();
    team.remove_member(b).unwrap();

    assert_eq!(team.add_member("C").unwrap(), AddMemberOutcome::Created(3));
}

#[test]
fn remove_unknown_member_is_noop() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteKvRepository::try_new(&conn).unwrap();
    let mut team = empty_team(repo);
    team.add_member("A").unwrap();

    assert!(!team.remove_member(42).unwrap());
    assert_eq!(active_ids(&team), vec![1]);
}

#[test]
fn removing_already_removed_member_reports_no_change() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteKvRepository::try_new(&conn).unwrap();
    let mut team = empty_team(repo);
    let id = team.add_member("A").unwrap().id();

    assert!(team.remove_member(id).unwrap());
    assert!(!team.remove_member(id).unwrap());
    assert!(!team.get(id).unwrap().active);
}

#[test]
fn remove_member_keeps_day_assignments() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteKvRepository::try_new(&conn).unwrap();
    let mut team = empty_team(repo);
    let mut days = DayAssignmentStore::load(repo).unwrap();

    let id = team.add_member("Eve").unwrap().id();
    days.set_day_type(2025, id, 4, 12, "CP").unwrap();
    team.remove_member(id).unwrap();

    assert_eq!(days.get_day_type(2025, id, 4, 12), Some("CP"));
}

#[test]
fn legacy_records_are_migrated_and_written_back_on_load() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteKvRepository::try_new(&conn).unwrap();
    repo.put_value(
        TEAM_KEY,
        r#"[{"id":1,"nom":"Bob"},{"id":2,"nom":"Carol","actif":false},{"id":3,"nom":"Dan"}]"#,
    )
    .unwrap();

    let team = TeamRegistry::load(repo).unwrap();

    let stored: serde_json::Value = load_json(&repo, TEAM_KEY).unwrap().unwrap();
    assert_eq!(
        stored,
        serde_json::json!([
            {"id": 1, "nom": "Bob", "actif": true},
            {"id": 2, "nom": "Carol", "actif": false},
            {"id": 3, "nom": "Dan", "actif": true},
        ])
    );
    assert_eq!(active_ids(&team), vec![1, 3]);
}

#[test]
fn up_to_date_records_are_not_rewritten_on_load() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteKvRepository::try_new(&conn).unwrap();
    let raw = r#"[ {"id":1, "nom":"Bob", "actif":true} ]"#;
    repo.put_value(TEAM_KEY, raw).unwrap();

    TeamRegistry::load(repo).unwrap();

    assert_eq!(repo.get_value(TEAM_KEY).unwrap().as_deref(), Some(raw));
}

#[test]
fn replace_all_is_verbatim() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteKvRepository::try_new(&conn).unwrap();
    let mut team = TeamRegistry::load(repo).unwrap();

    let imported = vec![
        Member {
            id: 10,
            name: " Padded ".to_string(),
            active: false,
        },
        Member {
            id: 4,
            name: "Zoe".to_string(),
            active: true,
        },
    ];
    team.replace_all(imported.clone()).unwrap();

    assert_eq!(team.members(), imported.as_slice());
    let stored: Vec<Member> = load_json(&repo, TEAM_KEY).unwrap().unwrap();
    assert_eq!(stored, imported);
    assert_eq!(team.add_member("New").unwrap(), AddMemberOutcome::Created(11));
}

#[test]
fn imported_name_with_whitespace_is_reactivated_by_trimmed_match() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteKvRepository::try_new(&conn).unwrap();
    let mut team = TeamRegistry::load(repo).unwrap();
    team.replace_all(vec![Member {
        id: 10,
        name: " Padded ".to_string(),
        active: false,
    }])
    .unwrap();

    let outcome = team.add_member("Padded").unwrap();

    assert_eq!(outcome, AddMemberOutcome::Reactivated(10));
    assert_eq!(team.members().len(), 1);
    assert!(team.get(10).unwrap().active);
}

#[test]
fn legacy_name_with_whitespace_matches_after_load() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteKvRepository::try_new(&conn).unwrap();
    repo.put_value(TEAM_KEY, r#"[{"id":4,"nom":"Bob  ","actif":false}]"#)
        .unwrap();
    let mut team = TeamRegistry::load(repo).unwrap();

    assert_eq!(
        team.add_member(" Bob").unwrap(),
        AddMemberOutcome::Reactivated(4)
    );
}

#[test]
fn adding_active_member_again_changes_nothing() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteKvRepository::try_new(&conn).unwrap();
    let mut team = empty_team(repo);
    team.add_member("Bob").unwrap();
    let before = repo.get_value(TEAM_KEY).unwrap();

    let outcome = team.add_member("Bob ").unwrap();

    assert_eq!(outcome, AddMemberOutcome::AlreadyActive(1));
    assert!(!outcome.changed());
    assert_eq!(repo.get_value(TEAM_KEY).unwrap(), before);
}

#[test]
fn rename_member_trims_and_persists() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteKvRepository::try_new(&conn).unwrap();
    let mut team = empty_team(repo);
    let id = team.add_member("Bob").unwrap().id();

    assert!(team.rename_member(id, " Robert ").unwrap());
    assert!(!team.rename_member(99, "Nobody").unwrap());

    let reloaded = TeamRegistry::load(repo).unwrap();
    assert_eq!(reloaded.get(id).unwrap().name, "Robert");
}
