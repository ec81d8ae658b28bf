use async_trait::async_trait;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use domain::{DomainError, NewUser, User, UserChanges, UserRepository};

use super::sqlite_storage::{last_insert_id, SqliteSession};
use crate::database::users;

// Database model - separate from domain entity
#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
struct UserModel {
    id: i32,
    name: String,
    surname: String,
    username: String,
    email: String,
    password_hash: String,
    national_id: String,
    created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = users)]
struct NewUserModel {
    name: String,
    surname: String,
    username: String,
    email: String,
    password_hash: String,
    national_id: String,
    created_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = users)]
struct UserChangeset {
    name: Option<String>,
    surname: Option<String>,
    username: Option<String>,
    email: Option<String>,
    password_hash: Option<String>,
    national_id: Option<String>,
}

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: model.id,
            name: model.name,
            surname: model.surname,
            username: model.username,
            email: model.email,
            password_hash: model.password_hash,
            national_id: model.national_id,
            created_at: model.created_at,
        }
    }
}

impl From<&NewUser> for NewUserModel {
    fn from(user: &NewUser) -> Self {
        NewUserModel {
            name: user.name.clone(),
            surname: user.surname.clone(),
            username: user.username.clone(),
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            national_id: user.national_id.clone(),
            created_at: chrono::Utc::now().naive_utc(),
        }
    }
}

impl From<&UserChanges> for UserChangeset {
    fn from(changes: &UserChanges) -> Self {
        UserChangeset {
            name: changes.name.clone(),
            surname: changes.surname.clone(),
            username: changes.username.clone(),
            email: changes.email.clone(),
            password_hash: changes.password_hash.clone(),
            national_id: changes.national_id.clone(),
        }
    }
}

#[async_trait]
impl UserRepository for SqliteSession {
    async fn find_all(&mut self) -> Result<Vec<User>, DomainError> {
        let rows = self
            .run(|conn| {
                users::table
                    .order(users::id.asc())
                    .select(UserModel::as_select())
                    .load::<UserModel>(conn)
            })
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&mut self, id: i32) -> Result<Option<User>, DomainError> {
        let row = self
            .run(move |conn| {
                users::table
                    .filter(users::id.eq(id))
                    .select(UserModel::as_select())
                    .first::<UserModel>(conn)
                    .optional()
            })
            .await?;

        Ok(row.map(Into::into))
    }

    async fn exists(&mut self, id: i32) -> Result<bool, DomainError> {
        self.run(move |conn| {
            diesel::select(diesel::dsl::exists(users::table.filter(users::id.eq(id))))
                .get_result::<bool>(conn)
        })
        .await
    }

    async fn insert(&mut self, user: &NewUser) -> Result<i32, DomainError> {
        let new_user = NewUserModel::from(user);
        self.run(move |conn| {
            diesel::insert_into(users::table)
                .values(&new_user)
                .execute(conn)?;
            last_insert_id(conn)
        })
        .await
    }

    async fn update(&mut self, id: i32, changes: &UserChanges) -> Result<usize, DomainError> {
        let changeset = UserChangeset::from(changes);
        self.run(move |conn| {
            diesel::update(users::table.filter(users::id.eq(id)))
                .set(&changeset)
                .execute(conn)
        })
        .await
    }

    async fn delete(&mut self, id: i32) -> Result<usize, DomainError> {
        self.run(move |conn| diesel::delete(users::table.filter(users::id.eq(id))).execute(conn))
            .await
    }
}
