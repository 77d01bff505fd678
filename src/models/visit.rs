use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::visit::{ItemType, NewVisit as DomainNewVisit, Visit as DomainVisit};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::visits)]
pub struct Visit {
    pub id: i32,
    pub user_id: i32,
    pub item_id: i32,
    pub item_type: String,
    pub timestamp: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::visits)]
pub struct NewVisit<'a> {
    pub user_id: i32,
    pub item_id: i32,
    pub item_type: &'a str,
    pub timestamp: NaiveDateTime,
}

impl Visit {
    /// Converts the row, skipping item types this build does not know.
    pub fn into_domain(self) -> Option<DomainVisit> {
        let item_type = match self.item_type.parse::<ItemType>() {
            Ok(item_type) => item_type,
            Err(unknown) => {
                log::warn!("Skipping visit {} with unknown item type `{unknown}`", self.id);
                return None;
            }
        };

        Some(DomainVisit {
            id: self.id,
            user_id: self.user_id,
            item_id: self.item_id,
            item_type,
            timestamp: self.timestamp,
        })
    }
}

impl<'a> From<&'a DomainNewVisit> for NewVisit<'a> {
    fn from(value: &'a DomainNewVisit) -> Self {
        Self {
            user_id: value.user_id,
            item_id: value.item_id,
            item_type: value.item_type.as_str(),
            timestamp: value.timestamp,
        }
    }
}
