use chorehaus_core::db::open_db_in_memory;
use chorehaus_core::{
    HouseholdKind, HouseholdService, ServiceError, SqliteHouseholdRepository, UserService,
};

#[test]
fn summary_counts_registered_members_against_expected_size() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteHouseholdRepository::try_new(&conn).unwrap();
    let service = HouseholdService::new(&repo);
    assert_eq!(service.household_summary().unwrap(), None);

    let household = service
        .configure_household("  Maple St ", HouseholdKind::Condo, 3)
        .unwrap();
    assert_eq!(household.name, "Maple St");

    let users = UserService::new(&repo);
    users.register_user("Alex").unwrap();
    users.register_user("Sam").unwrap();

    let summary = service.household_summary().unwrap().unwrap();
    assert_eq!(summary.household, household);
    assert_eq!(summary.occupants, 2);
    assert_eq!(summary.open_places, 1);

    users.register_user("Kim").unwrap();
    users.register_user("Lee").unwrap();
    let crowded = service.household_summary().unwrap().unwrap();
    assert_eq!(crowded.occupants, 4);
    assert_eq!(crowded.open_places, 0);
}

#[test]
fn reconfiguring_replaces_the_profile() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteHouseholdRepository::try_new(&conn).unwrap();
    let service = HouseholdService::new(&repo);

    service
        .configure_household("Maple St", HouseholdKind::House, 4)
        .unwrap();
    service
        .configure_household("Harbor View", HouseholdKind::Apt, 2)
        .unwrap();

    let summary = service.household_summary().unwrap().unwrap();
    assert_eq!(summary.household.name, "Harbor View");
    assert_eq!(summary.household.kind, HouseholdKind::Apt);
    assert_eq!(summary.household.expected_occupants, 2);
}

#[test]
fn blank_name_and_empty_household_are_rejected() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteHouseholdRepository::try_new(&conn).unwrap();
    let service = HouseholdService::new(&repo);

    assert!(matches!(
        service
            .configure_household("   ", HouseholdKind::House, 2)
            .unwrap_err(),
        ServiceError::InvalidHouseholdName
    ));
    assert!(matches!(
        service
            .configure_household("Maple St", HouseholdKind::House, 0)
            .unwrap_err(),
        ServiceError::InvalidOccupantCount
    ));
    assert_eq!(service.household_summary().unwrap(), None);
}

#[test]
fn kind_uses_short_wire_names() {
    let kinds = [HouseholdKind::Condo, HouseholdKind::Apt, HouseholdKind::House];
    let json = serde_json::to_value(kinds).unwrap();
    assert_eq!(json, serde_json::json!(["condo", "apt", "house"]));
    for kind in kinds {
        assert_eq!(HouseholdKind::parse(kind.as_str()), Some(kind));
    }
}
