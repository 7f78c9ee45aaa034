use jokes_core::db::open_db_in_memory;
use jokes_core::{
    CategoryRepository, JokeRepository, RepoError, SqliteCategoryRepository,
    SqliteJokeRepository, ValidationError,
};

#[test]
fn created_category_starts_empty() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCategoryRepository::try_new(&conn).unwrap();

    let created = repo.create_category("dad-jokes").unwrap();
    assert_eq!(created.id, 1);

    let loaded = repo.get_category("dad-jokes").unwrap().unwrap();
    assert_eq!(loaded.id, created.id);
    assert_eq!(loaded.name, "dad-jokes");
    assert!(loaded.joke_ids.is_empty());
}

#[test]
fn duplicate_category_name_conflicts() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCategoryRepository::new(&conn);

    repo.create_category("puns").unwrap();
    let err = repo.create_category(" puns ").unwrap_err();
    assert!(matches!(err, RepoError::Conflict(_)));
    assert_eq!(repo.list_categories().unwrap().len(), 1);
}

#[test]
fn blank_category_name_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCategoryRepository::new(&conn);

    let err = repo.create_category("  ").unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::EmptyCategoryName)
    ));
}

#[test]
fn get_unknown_category_returns_none() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCategoryRepository::new(&conn);

    assert!(repo.get_category("nonexistent").unwrap().is_none());
}

#[test]
fn attach_then_list_jokes_includes_joke() {
    let conn = open_db_in_memory().unwrap();
    let jokes = SqliteJokeRepository::new(&conn);
    let categories = SqliteCategoryRepository::new(&conn);

    let joke = jokes.create_joke("knock knock").unwrap();
    categories.create_category("classics").unwrap();
    categories.attach_joke("classics", joke.id).unwrap();

    assert_eq!(categories.list_jokes_for("classics").unwrap(), vec![joke]);
}

#[test]
fn joke_can_belong_to_many_categories_and_reattach_is_noop() {
    let conn = open_db_in_memory().unwrap();
    let jokes = SqliteJokeRepository::new(&conn);
    let categories = SqliteCategoryRepository::new(&conn);

    let joke = jokes.create_joke("shared").unwrap();
    categories.create_category("a").unwrap();
    categories.create_category("b").unwrap();
    categories.attach_joke("a", joke.id).unwrap();
    categories.attach_joke("a", joke.id).unwrap();
    categories.attach_joke("b", joke.id).unwrap();

    let a = categories.get_category("a").unwrap().unwrap();
    let b = categories.get_category("b").unwrap().unwrap();
    assert_eq!(a.joke_ids, vec![joke.id]);
    assert_eq!(b.joke_ids, vec![joke.id]);
}

#[test]
fn attach_to_unknown_category_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let categories = SqliteCategoryRepository::new(&conn);

    let err = categories.attach_joke("missing", 1).unwrap_err();
    assert!(matches!(err, RepoError::CategoryNotFound(name) if name == "missing"));
}

#[test]
fn attach_accepts_unknown_joke_and_listing_omits_it() {
    let conn = open_db_in_memory().unwrap();
    let jokes = SqliteJokeRepository::new(&conn);
    let categories = SqliteCategoryRepository::new(&conn);

    let real = jokes.create_joke("real").unwrap();
    categories.create_category("mixed").unwrap();
    categories.attach_joke("mixed", 777).unwrap();
    categories.attach_joke("mixed", real.id).unwrap();

    let category = categories.get_category("mixed").unwrap().unwrap();
    assert_eq!(category.joke_ids, vec![777, real.id]);
    assert_eq!(categories.list_jokes_for("mixed").unwrap(), vec![real]);
}

#[test]
fn list_jokes_for_keeps_attach_order() {
    let conn = open_db_in_memory().unwrap();
    let jokes = SqliteJokeRepository::new(&conn);
    let categories = SqliteCategoryRepository::new(&conn);

    let first = jokes.create_joke("first").unwrap();
    let second = jokes.create_joke("second").unwrap();
    categories.create_category("ordered").unwrap();
    categories.attach_joke("ordered", second.id).unwrap();
    categories.attach_joke("ordered", first.id).unwrap();

    let listed: Vec<_> = categories
        .list_jokes_for("ordered")
        .unwrap()
        .into_iter()
        .map(|joke| joke.id)
        .collect();
    assert_eq!(listed, vec![second.id, first.id]);
}

#[test]
fn list_jokes_for_unknown_category_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let categories = SqliteCategoryRepository::new(&conn);

    let err = categories.list_jokes_for("missing").unwrap_err();
    assert!(matches!(err, RepoError::CategoryNotFound(_)));
}

#[test]
fn create_joke_into_category_scenario() {
    let conn = open_db_in_memory().unwrap();
    let categories = SqliteCategoryRepository::new(&conn);

    categories.create_category("dad-jokes").unwrap();
    let created = categories
        .create_joke_into("dad-jokes", "Why did the scarecrow win an award?")
        .unwrap();

    let listed = categories.list_jokes_for("dad-jokes").unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].content, "Why did the scarecrow win an award?");
    assert_eq!(listed[0], created);
}

#[test]
fn create_joke_into_unknown_category_creates_nothing() {
    let conn = open_db_in_memory().unwrap();
    let jokes = SqliteJokeRepository::new(&conn);
    let categories = SqliteCategoryRepository::new(&conn);

    let err = categories.create_joke_into("missing", "orphan?").unwrap_err();
    assert!(matches!(err, RepoError::CategoryNotFound(_)));
    assert!(jokes.list_jokes().unwrap().is_empty());

    // The rolled-back transaction must leave the connection usable.
    categories.create_category("present").unwrap();
    categories.create_joke_into("present", "kept").unwrap();
    assert_eq!(jokes.list_jokes().unwrap().len(), 1);
}

#[test]
fn create_joke_into_rejects_blank_content_before_writing() {
    let conn = open_db_in_memory().unwrap();
    let jokes = SqliteJokeRepository::new(&conn);
    let categories = SqliteCategoryRepository::new(&conn);
    categories.create_category("strict").unwrap();

    let err = categories.create_joke_into("strict", "\n").unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
    assert!(jokes.list_jokes().unwrap().is_empty());
}

#[test]
fn list_categories_carries_memberships() {
    let conn = open_db_in_memory().unwrap();
    let categories = SqliteCategoryRepository::new(&conn);

    categories.create_category("one").unwrap();
    categories.create_category("two").unwrap();
    let joke = categories.create_joke_into("two", "member").unwrap();

    let listed = categories.list_categories().unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].name, "one");
    assert!(listed[0].joke_ids.is_empty());
    assert_eq!(listed[1].name, "two");
    assert_eq!(listed[1].joke_ids, vec![joke.id]);
}

#[test]
fn category_serializes_with_external_field_names() {
    let conn = open_db_in_memory().unwrap();
    let categories = SqliteCategoryRepository::new(&conn);
    categories.create_category("json").unwrap();
    let joke = categories.create_joke_into("json", "serialized").unwrap();

    let category = categories.get_category("json").unwrap().unwrap();
    let value = serde_json::to_value(&category).unwrap();
    assert_eq!(
        value,
        serde_json::json!({ "id": 1, "category": "json", "jokes": [joke.id] })
    );
}
