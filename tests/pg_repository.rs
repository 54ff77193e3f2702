//! Runs the repository contract against a real Postgres.
//!
//! `TEST_DATABASE_URL=postgres://... cargo test -- --ignored`
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use user_service::config::Settings;
use user_service::db::{self, DbPool};
use user_service::schema::users;
use user_service::user::{PgUserRepository, UserMessage, UserRepository};

fn setup() -> (DbPool, PgUserRepository) {
    let database_url =
        std::env::var("TEST_DATABASE_URL").expect("TEST_DATABASE_URL must be set");
    let settings = Settings::from_vars(Default::default()).unwrap();

    let pool = db::init(&settings, &database_url).unwrap();
    let conn = pool.get().unwrap();
    conn.batch_execute("TRUNCATE users RESTART IDENTITY").unwrap();

    (pool.clone(), PgUserRepository::new(pool))
}

fn john() -> UserMessage {
    UserMessage {
        id: None,
        name: "John".into(),
        surname: "Doe".into(),
        email: "john.doe@email.com".into(),
        username: "johhny".into(),
        password: "strong-password".into(),
    }
}

fn crud_round_trip(repo: &PgUserRepository) {
    let saved = repo.save(john()).unwrap();
    assert_eq!(repo.find_by_id(saved.id).unwrap(), Some(saved.clone()));

    let explicit_id = saved.id + 1000;
    let explicit = repo
        .save(UserMessage {
            id: Some(explicit_id),
            username: "danie".into(),
            ..john()
        })
        .unwrap();
    assert_eq!(explicit.id, explicit_id);

    let generated = repo.save(john()).unwrap();
    assert!(generated.id > explicit_id);

    let overwritten = repo
        .save(UserMessage {
            id: Some(saved.id),
            name: "Daniel".into(),
            ..john()
        })
        .unwrap();
    assert_eq!(overwritten.id, saved.id);
    assert_eq!(overwritten.name, "Daniel");
    assert_eq!(repo.find_all().unwrap().len(), 3);

    assert_eq!(repo.delete(&saved).unwrap(), 1);
    assert_eq!(repo.find_by_id(saved.id).unwrap(), None);
    assert_eq!(repo.delete(&saved).unwrap(), 0);
    assert_eq!(repo.find_all().unwrap().len(), 2);
}

fn updates_never_rewind_the_id_sequence(pool: &DbPool, repo: &PgUserRepository) {
    let first = repo.save(john()).unwrap();

    // Another writer holds an id from the sequence but has not committed yet.
    let other = pool.get().unwrap();
    other
        .batch_execute("BEGIN; INSERT INTO users (name) VALUES ('concurrent');")
        .unwrap();

    repo.save(UserMessage {
        id: Some(first.id),
        name: "Daniel".into(),
        ..john()
    })
    .unwrap();

    other.batch_execute("COMMIT").unwrap();

    let later = repo.save(john()).unwrap();
    assert!(later.id > first.id);

    // Ids of deleted rows are not handed out again either.
    repo.delete(&later).unwrap();
    repo.save(UserMessage {
        id: Some(first.id),
        ..john()
    })
    .unwrap();

    let after_delete = repo.save(john()).unwrap();
    assert!(after_delete.id > later.id);
}

// One test so runs never race on the shared table.
#[test]
#[ignore]
fn pg_repository_contract() {
    let (pool, repo) = setup();
    crud_round_trip(&repo);

    let conn = pool.get().unwrap();
    diesel::delete(users::table).execute(&conn).unwrap();
    updates_never_rewind_the_id_sequence(&pool, &repo);
}
