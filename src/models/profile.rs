use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::profile::{Profile as DomainProfile, UpdateProfile as DomainUpdateProfile};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::profiles)]
pub struct Profile {
    pub id: i32,
    pub user_id: i32,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub image: Option<String>,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::profiles)]
pub struct NewProfile {
    pub user_id: i32,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::profiles)]
pub struct UpdateProfile<'a> {
    pub bio: Option<Option<&'a str>>,
    pub location: Option<Option<&'a str>>,
    pub image: Option<Option<&'a str>>,
    pub updated_at: NaiveDateTime,
}

impl From<Profile> for DomainProfile {
    fn from(value: Profile) -> Self {
        Self {
            id: value.id,
            user_id: value.user_id,
            bio: value.bio,
            location: value.location,
            image: value.image,
            updated_at: value.updated_at,
        }
    }
}

impl NewProfile {
    pub fn for_user(user_id: i32) -> Self {
        Self {
            user_id,
            updated_at: chrono::Local::now().naive_utc(),
        }
    }
}

impl<'a> From<&'a DomainUpdateProfile> for UpdateProfile<'a> {
    fn from(value: &'a DomainUpdateProfile) -> Self {
        Self {
            bio: value.bio.as_ref().map(|bio| bio.as_deref()),
            location: value.location.as_ref().map(|location| location.as_deref()),
            image: value.image.as_ref().map(|image| image.as_deref()),
            updated_at: chrono::Local::now().naive_utc(),
        }
    }
}
