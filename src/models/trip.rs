use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::trip::{
    NewTrip as DomainNewTrip, Trip as DomainTrip, UpdateTrip as DomainUpdateTrip,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::trips)]
pub struct Trip {
    pub id: i32,
    pub user_id: i32,
    pub title: String,
    pub destination: String,
    pub date: NaiveDateTime,
    pub notes: Option<String>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::trips)]
pub struct NewTrip<'a> {
    pub user_id: i32,
    pub title: &'a str,
    pub destination: &'a str,
    pub date: NaiveDateTime,
    pub notes: Option<&'a str>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::trips)]
pub struct UpdateTrip<'a> {
    pub title: Option<&'a str>,
    pub destination: Option<&'a str>,
    pub date: Option<NaiveDateTime>,
    pub notes: Option<Option<&'a str>>,
}

impl From<Trip> for DomainTrip {
    fn from(value: Trip) -> Self {
        Self {
            id: value.id,
            user_id: value.user_id,
            title: value.title,
            destination: value.destination,
            date: value.date,
            notes: value.notes,
        }
    }
}

impl<'a> From<&'a DomainNewTrip> for NewTrip<'a> {
    fn from(value: &'a DomainNewTrip) -> Self {
        Self {
            user_id: value.user_id,
            title: value.title.as_str(),
            destination: value.destination.as_str(),
            date: value.date,
            notes: value.notes.as_deref(),
        }
    }
}

impl<'a> From<&'a DomainUpdateTrip> for UpdateTrip<'a> {
    fn from(value: &'a DomainUpdateTrip) -> Self {
        Self {
            title: value.title.as_deref(),
            destination: value.destination.as_deref(),
            date: value.date,
            notes: value.notes.as_ref().map(|notes| notes.as_deref()),
        }
    }
}
