mod common;

use chorehaus_core::db::open_db_in_memory;
use chorehaus_core::{
    ChoreQuery, ChoreRepository, ChoreStatus, ChoreValidationError, EngineConfig,
    RenewalService, RepoError, ServiceError, SqliteHouseholdRepository, User, UserRepository,
};
use common::{chore, completed, date, MemoryHousehold};

#[test]
fn completed_repeating_chore_is_renewed_and_successor_assigned() {
    let today = date(2024, 3, 8);
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteHouseholdRepository::try_new(&conn).unwrap();
    repo.create_user(&User::with_id("u1", "Alex")).unwrap();
    repo.create_chore(&completed("trash", 6, date(2024, 3, 1), date(2024, 3, 1), "u1"))
        .unwrap();

    let report = RenewalService::new(&repo)
        .renew_repeating_chores(today)
        .unwrap();

    assert_eq!(report.renewals.len(), 1);
    assert_eq!(report.renewals[0].renewed_id, "trash");
    let successor = &report.renewals[0].successor;
    assert_eq!(successor.id, "trash(1)");
    assert_eq!(successor.deadline_date, Some(date(2024, 3, 8)));
    assert_eq!(successor.status, ChoreStatus::Unassigned);
    assert_eq!(successor.assignee_id, None);
    assert_eq!(successor.completion_date, None);

    let old = repo.get_chore("trash").unwrap().unwrap();
    assert_eq!(old.status, ChoreStatus::Renewed);
    assert_eq!(old.completion_date, Some(date(2024, 3, 1)));

    let stored = repo.get_chore("trash(1)").unwrap().unwrap();
    assert_eq!(stored.status, ChoreStatus::Assigned);
    assert_eq!(stored.assignee_id.as_deref(), Some("u1"));
    let assignment = report.assignment.unwrap();
    assert_eq!(assignment.assignments.len(), 1);
}

#[test]
fn renewing_twice_creates_no_duplicate_successors() {
    let today = date(2024, 3, 20);
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteHouseholdRepository::try_new(&conn).unwrap();
    repo.create_user(&User::with_id("u1", "Alex")).unwrap();
    repo.create_chore(&completed("dust(4)", 2, date(2024, 3, 5), date(2024, 3, 4), "u1"))
        .unwrap();

    let service = RenewalService::new(&repo);
    let first = service.renew_repeating_chores(today).unwrap();
    let second = service.renew_repeating_chores(today).unwrap();

    assert_eq!(first.renewals.len(), 1);
    assert_eq!(first.renewals[0].successor.id, "dust(5)");
    assert!(second.renewals.is_empty());
    assert_eq!(repo.list_chores(&ChoreQuery::default()).unwrap().len(), 2);
}

#[test]
fn ineligible_chores_are_left_alone() {
    let today = date(2024, 3, 10);
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteHouseholdRepository::try_new(&conn).unwrap();
    repo.create_user(&User::with_id("u1", "Alex")).unwrap();
    // one-off
    repo.create_chore(&completed("once", 0, date(2024, 3, 1), date(2024, 3, 1), "u1"))
        .unwrap();
    // deadline still ahead
    repo.create_chore(&completed("ahead", 7, date(2024, 3, 11), date(2024, 3, 9), "u1"))
        .unwrap();
    // repeating but not completed
    let mut open = chore("open", 15, Some(date(2024, 3, 1)));
    open.frequency = 7;
    open.assign_to("u1");
    repo.create_chore(&open).unwrap();

    let report = RenewalService::new(&repo)
        .renew_repeating_chores(today)
        .unwrap();

    assert!(report.renewals.is_empty());
    assert_eq!(repo.list_chores(&ChoreQuery::default()).unwrap().len(), 3);
    assert_eq!(
        repo.get_chore("once").unwrap().unwrap().status,
        ChoreStatus::Completed
    );
}

#[test]
fn deadline_equal_to_today_is_renewed() {
    let today = date(2024, 3, 10);
    let store = MemoryHousehold::with_users(&["u1"]);
    store.insert(completed("sweep", 3, today, date(2024, 3, 9), "u1"));

    let report = RenewalService::new(&store)
        .renew_repeating_chores(today)
        .unwrap();

    assert_eq!(report.renewals.len(), 1);
    assert_eq!(
        report.renewals[0].successor.deadline_date,
        Some(date(2024, 3, 13))
    );
}

#[test]
fn successor_id_collision_is_fatal() {
    let today = date(2024, 3, 10);
    let store = MemoryHousehold::with_users(&["u1"]);
    store.insert(completed("mop", 7, date(2024, 3, 1), date(2024, 3, 1), "u1"));
    let mut squatter = chore("mop(1)", 99, None);
    squatter.description = "already here".to_string();
    store.insert(squatter);

    let err = RenewalService::new(&store)
        .renew_repeating_chores(today)
        .unwrap_err();

    assert!(matches!(err, ServiceError::DuplicateChoreId(ref id) if id == "mop(1)"));
    assert_eq!(store.get("mop(1)").description, "already here");
    assert_eq!(store.get("mop(1)").expected_duration, 99);
}

#[test]
fn malformed_id_aborts_before_touching_the_chore() {
    let today = date(2024, 3, 10);
    let store = MemoryHousehold::with_users(&["u1"]);
    store.insert(completed("bad id!", 7, date(2024, 3, 1), date(2024, 3, 1), "u1"));

    let err = RenewalService::new(&store)
        .renew_repeating_chores(today)
        .unwrap_err();

    assert!(matches!(err, ServiceError::MalformedChoreId(ref id) if id == "bad id!"));
    assert_eq!(store.get("bad id!").status, ChoreStatus::Completed);
    assert_eq!(store.all().len(), 1);
}

#[test]
fn assignment_after_renewal_can_be_disabled() {
    let today = date(2024, 3, 10);
    let store = MemoryHousehold::with_users(&["u1"]);
    store.insert(completed("laundry", 7, date(2024, 3, 1), date(2024, 3, 1), "u1"));

    let config = EngineConfig {
        assign_after_renewal: false,
        ..EngineConfig::default()
    };
    let report = RenewalService::with_config(&store, config)
        .renew_repeating_chores(today)
        .unwrap();

    assert!(report.assignment.is_none());
    assert_eq!(store.get("laundry(1)").status, ChoreStatus::Unassigned);
}

#[test]
fn renewal_pass_also_assigns_other_pending_chores() {
    let today = date(2024, 3, 10);
    let store = MemoryHousehold::with_users(&["u1", "u2"]);
    store.insert(chore("fresh", 25, Some(today)));

    let report = RenewalService::new(&store)
        .renew_repeating_chores(today)
        .unwrap();

    assert!(report.renewals.is_empty());
    assert_eq!(report.assignment.unwrap().assignments.len(), 1);
    assert_eq!(store.get("fresh").assignee_id.as_deref(), Some("u1"));
}

#[test]
fn chore_due_after_year_9999_is_not_renewed() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteHouseholdRepository::try_new(&conn).unwrap();
    repo.create_user(&User::with_id("u1", "Alex")).unwrap();
    conn.execute(
        "INSERT INTO chores (
            id, name, expected_duration, status, assignee_id,
            deadline_date, frequency, completion_date
        ) VALUES ('later', 'Later', 20, 'completed', 'u1', '+12000-01-01', 7, '2024-03-01');",
        [],
    )
    .unwrap();

    let err = RenewalService::new(&repo)
        .renew_repeating_chores(date(2024, 3, 10))
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Repo(
            RepoError::Validation(ChoreValidationError::DateOutOfRange(_))
                | RepoError::InvalidData(_)
        )
    ));

    let (count, status): (i64, String) = conn
        .query_row(
            "SELECT COUNT(*), MAX(status) FROM chores;",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .unwrap();
    assert_eq!(count, 1);
    assert_eq!(status, "completed");
}

#[test]
fn far_future_deadlines_cannot_be_stored() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteHouseholdRepository::try_new(&conn).unwrap();
    repo.create_user(&User::with_id("u1", "Alex")).unwrap();

    let err = repo
        .create_chore(&completed("later", 7, date(12000, 1, 1), date(2024, 3, 1), "u1"))
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ChoreValidationError::DateOutOfRange(ref id)) if id == "later"
    ));
}

#[test]
fn successor_deadline_past_year_9999_aborts_before_any_write() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteHouseholdRepository::try_new(&conn).unwrap();
    repo.create_user(&User::with_id("u1", "Alex")).unwrap();
    repo.create_chore(&completed(
        "slow",
        3_000_000,
        date(2024, 3, 1),
        date(2024, 3, 1),
        "u1",
    ))
    .unwrap();

    let err = RenewalService::new(&repo)
        .renew_repeating_chores(date(2024, 3, 10))
        .unwrap_err();
    assert!(matches!(err, ServiceError::DeadlineOutOfRange(ref id) if id == "slow"));

    let stored = repo.get_chore("slow").unwrap().unwrap();
    assert_eq!(stored.status, ChoreStatus::Completed);
    assert_eq!(repo.get_chore("slow(1)").unwrap(), None);
}
