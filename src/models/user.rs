use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::profile::{Account as DomainAccount, UpdateAccount as DomainUpdateAccount};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::users)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub created_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::users)]
pub struct UpdateUser<'a> {
    pub username: Option<&'a str>,
    pub first_name: Option<&'a str>,
    pub last_name: Option<&'a str>,
    pub email: Option<&'a str>,
}

impl From<User> for DomainAccount {
    fn from(value: User) -> Self {
        Self {
            id: value.id,
            username: value.username,
            first_name: value.first_name,
            last_name: value.last_name,
            email: value.email,
        }
    }
}

impl<'a> From<&'a DomainUpdateAccount> for UpdateUser<'a> {
    fn from(value: &'a DomainUpdateAccount) -> Self {
        Self {
            username: value.username.as_deref(),
            first_name: value.first_name.as_deref(),
            last_name: value.last_name.as_deref(),
            email: value.email.as_deref(),
        }
    }
}
