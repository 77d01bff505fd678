use diesel::prelude::*;
use diesel::upsert::excluded;

use crate::{
    domain::visit::{NewVisit as DomainNewVisit, Visit as DomainVisit},
    models::visit::{NewVisit as DbNewVisit, Visit as DbVisit},
    repository::{DieselRepository, RepositoryError, RepositoryResult, VisitReader, VisitWriter},
    schema::visits,
};

impl VisitReader for DieselRepository {
    fn list_visits(&self, user_id: i32) -> RepositoryResult<Vec<DomainVisit>> {
        let mut conn = self.conn()?;
        let rows = visits::table
            .filter(visits::user_id.eq(user_id))
            .order((visits::timestamp.desc(), visits::id.desc()))
            .load::<DbVisit>(&mut conn)?;

        Ok(rows.into_iter().filter_map(DbVisit::into_domain).collect())
    }
}

impl VisitWriter for DieselRepository {
    fn record_visit(&self, new_visit: &DomainNewVisit) -> RepositoryResult<DomainVisit> {
        let mut conn = self.conn()?;
        let db_new = DbNewVisit::from(new_visit);

        let stored = diesel::insert_into(visits::table)
            .values(&db_new)
            .on_conflict((visits::user_id, visits::item_id, visits::item_type))
            .do_update()
            .set(visits::timestamp.eq(excluded(visits::timestamp)))
            .get_result::<DbVisit>(&mut conn)?;

        stored.into_domain().ok_or(RepositoryError::NotFound)
    }
}
