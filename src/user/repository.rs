use crate::api_error::ApiError;
use crate::db::{DbConnection, DbPool};
use crate::schema::users;
use crate::user::{User, UserMessage};
use diesel::dsl::exists;
use diesel::prelude::*;
use diesel::sql_types::BigInt;
use std::collections::BTreeMap;
use std::sync::Mutex;

/// Storage for users, keyed by id.
pub trait UserRepository: Send + Sync + 'static {
    /// Inserts when `user.id` is `None`, otherwise writes the record with
    /// that id whether or not it already exists.
    fn save(&self, user: UserMessage) -> Result<User, ApiError>;

    fn find_all(&self) -> Result<Vec<User>, ApiError>;

    fn find_by_id(&self, id: i64) -> Result<Option<User>, ApiError>;

    /// Returns the number of records removed; `0` if `user` was already gone.
    fn delete(&self, user: &User) -> Result<usize, ApiError>;
}

// Explicit ids bypass the sequence. Only ever move it forward, and only past
// an id it could still hand out.
const ADVANCE_ID_SEQUENCE: &str =
    "SELECT setval('users_id_seq', $1) FROM users_id_seq WHERE $1 >= last_value";

pub struct PgUserRepository {
    pool: DbPool,
}

impl PgUserRepository {
    pub fn new(pool: DbPool) -> Self {
        PgUserRepository { pool }
    }

    fn connection(&self) -> Result<DbConnection, ApiError> {
        Ok(self.pool.get()?)
    }
}

impl UserRepository for PgUserRepository {
    fn save(&self, user: UserMessage) -> Result<User, ApiError> {
        let conn = self.connection()?;

        conn.transaction::<User, ApiError, _>(|| {
            let id = match user.id {
                Some(id) => id,
                None => {
                    let saved = diesel::insert_into(users::table)
                        .values(&user)
                        .get_result(&conn)?;
                    return Ok(saved);
                }
            };

            let found = diesel::select(exists(users::table.find(id))).get_result::<bool>(&conn)?;
            if found {
                let saved = diesel::update(users::table.find(id))
                    .set(&user)
                    .get_result(&conn)?;
                return Ok(saved);
            }

            let saved = diesel::insert_into(users::table)
                .values(&user)
                .on_conflict(users::id)
                .do_update()
                .set(&user)
                .get_result(&conn)?;
            diesel::sql_query(ADVANCE_ID_SEQUENCE)
                .bind::<BigInt, _>(id)
                .execute(&conn)?;

            Ok(saved)
        })
    }

    fn find_all(&self) -> Result<Vec<User>, ApiError> {
        let conn = self.connection()?;

        let users = users::table.order(users::id).load::<User>(&conn)?;

        Ok(users)
    }

    fn find_by_id(&self, id: i64) -> Result<Option<User>, ApiError> {
        let conn = self.connection()?;

        let user = users::table
            .filter(users::id.eq(id))
            .first(&conn)
            .optional()?;

        Ok(user)
    }

    fn delete(&self, user: &User) -> Result<usize, ApiError> {
        let conn = self.connection()?;

        let res = diesel::delete(users::table.filter(users::id.eq(user.id))).execute(&conn)?;

        Ok(res)
    }
}

#[derive(Default)]
struct MemoryState {
    users: BTreeMap<i64, User>,
    last_id: i64,
}

/// Process-local store used by the tests and when no database is configured.
#[derive(Default)]
pub struct InMemoryUserRepository {
    state: Mutex<MemoryState>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        InMemoryUserRepository::default()
    }

    fn with_state<T>(&self, f: impl FnOnce(&mut MemoryState) -> T) -> Result<T, ApiError> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| ApiError::internal("In-memory user store lock poisoned"))?;
        Ok(f(&mut *state))
    }
}

impl UserRepository for InMemoryUserRepository {
    fn save(&self, user: UserMessage) -> Result<User, ApiError> {
        self.with_state(|state| -> Result<User, ApiError> {
            let id = match user.id {
                Some(id) => id,
                None => state
                    .last_id
                    .checked_add(1)
                    .ok_or_else(|| ApiError::internal("User id space exhausted"))?,
            };
            state.last_id = state.last_id.max(id);

            let saved = User::from_message(id, user);
            state.users.insert(id, saved.clone());
            Ok(saved)
        })?
    }

    fn find_all(&self) -> Result<Vec<User>, ApiError> {
        self.with_state(|state| state.users.values().cloned().collect())
    }

    fn find_by_id(&self, id: i64) -> Result<Option<User>, ApiError> {
        self.with_state(|state| state.users.get(&id).cloned())
    }

    fn delete(&self, user: &User) -> Result<usize, ApiError> {
        self.with_state(|state| state.users.remove(&user.id).map_or(0, |_| 1))
    }
}
