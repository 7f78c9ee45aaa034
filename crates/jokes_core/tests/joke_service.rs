use jokes_core::db::open_db_in_memory;
use jokes_core::{ServiceError, SqliteJokeService, Vote};

#[test]
fn get_joke_maps_absence_to_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = SqliteJokeService::for_connection(&conn);

    let err = service.get_joke(5).unwrap_err();
    assert!(matches!(err, ServiceError::JokeNotFound(5)));
}

#[test]
fn random_joke_on_empty_store_is_empty_collection() {
    let conn = open_db_in_memory().unwrap();
    let service = SqliteJokeService::for_connection(&conn);

    assert!(matches!(
        service.random_joke().unwrap_err(),
        ServiceError::EmptyCollection
    ));
}

#[test]
fn random_joke_for_unknown_category_is_category_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = SqliteJokeService::for_connection(&conn);

    let err = service.random_joke_for_category("nonexistent").unwrap_err();
    assert!(matches!(err, ServiceError::CategoryNotFound(name) if name == "nonexistent"));
}

#[test]
fn random_joke_for_empty_category_is_empty_category() {
    let conn = open_db_in_memory().unwrap();
    let service = SqliteJokeService::for_connection(&conn);
    service.create_category("quiet").unwrap();

    let err = service.random_joke_for_category("quiet").unwrap_err();
    assert!(matches!(err, ServiceError::EmptyCategory(name) if name == "quiet"));
}

#[test]
fn random_joke_for_category_with_only_dangling_reference_reports_it() {
    let conn = open_db_in_memory().unwrap();
    let service = SqliteJokeService::for_connection(&conn);
    service.create_category("ghosts").unwrap();
    service.attach_joke("ghosts", 404).unwrap();

    let err = service.random_joke_for_category("ghosts").unwrap_err();
    assert!(matches!(
        err,
        ServiceError::DanglingJoke { category, joke_id: 404 } if category == "ghosts"
    ));
}

#[test]
fn random_joke_for_category_returns_member() {
    let conn = open_db_in_memory().unwrap();
    let service = SqliteJokeService::for_connection(&conn);
    service.create_category("dad-jokes").unwrap();
    service.create_category("other").unwrap();
    let first = service.create_joke_into("dad-jokes", "first").unwrap();
    let second = service.create_joke_into("dad-jokes", "second").unwrap();
    service.create_joke_into("other", "elsewhere").unwrap();

    for _ in 0..30 {
        let picked = service.random_joke_for_category("dad-jokes").unwrap();
        assert!(picked == first || picked == second);
    }
}

#[test]
fn vote_parses_raw_value_and_updates_counters() {
    let conn = open_db_in_memory().unwrap();
    let service = SqliteJokeService::for_connection(&conn);
    service.create_category("votes").unwrap();
    let joke = service.create_joke_into("votes", "rate me").unwrap();

    assert_eq!(service.vote(joke.id, "1").unwrap(), Vote::Like);
    assert_eq!(service.vote(joke.id, "0").unwrap(), Vote::Dislike);
    assert_eq!(service.vote(joke.id, "-5").unwrap(), Vote::Dislike);

    let loaded = service.get_joke(joke.id).unwrap();
    assert_eq!(loaded.likes, 1);
    assert_eq!(loaded.dislikes, 2);
}

#[test]
fn malformed_vote_is_rejected_without_touching_counters() {
    let conn = open_db_in_memory().unwrap();
    let service = SqliteJokeService::for_connection(&conn);
    service.create_category("votes").unwrap();
    let joke = service.create_joke_into("votes", "rate me").unwrap();

    let err = service.vote(joke.id, "up").unwrap_err();
    assert!(matches!(err, ServiceError::InvalidVote(_)));

    let loaded = service.get_joke(joke.id).unwrap();
    assert_eq!((loaded.likes, loaded.dislikes), (0, 0));
}

#[test]
fn vote_on_never_created_joke_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = SqliteJokeService::for_connection(&conn);

    let err = service.vote(999_999, "1").unwrap_err();
    assert!(matches!(err, ServiceError::JokeNotFound(999_999)));
    assert!(service.list_jokes().unwrap().is_empty());
}

#[test]
fn duplicate_category_maps_to_conflict() {
    let conn = open_db_in_memory().unwrap();
    let service = SqliteJokeService::for_connection(&conn);
    service.create_category("puns").unwrap();

    assert!(matches!(
        service.create_category("puns").unwrap_err(),
        ServiceError::Conflict(_)
    ));
}

#[test]
fn jokes_for_category_and_attach_round_through_service() {
    let conn = open_db_in_memory().unwrap();
    let service = SqliteJokeService::for_connection(&conn);
    service.create_category("source").unwrap();
    service.create_category("target").unwrap();
    let joke = service.create_joke_into("source", "portable").unwrap();

    service.attach_joke("target", joke.id).unwrap();

    assert_eq!(service.jokes_for_category("target").unwrap(), vec![joke]);
    assert!(matches!(
        service.jokes_for_category("missing").unwrap_err(),
        ServiceError::CategoryNotFound(_)
    ));
}
