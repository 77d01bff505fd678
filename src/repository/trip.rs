use diesel::prelude::*;

use crate::{
    domain::trip::{
        NewTrip as DomainNewTrip, Trip as DomainTrip, TripListQuery,
        UpdateTrip as DomainUpdateTrip,
    },
    models::trip::{NewTrip as DbNewTrip, Trip as DbTrip, UpdateTrip as DbUpdateTrip},
    repository::{DieselRepository, RepositoryError, RepositoryResult, TripReader, TripWriter},
    schema::trips,
};

impl TripReader for DieselRepository {
    fn get_trip_by_id(&self, id: i32) -> RepositoryResult<Option<DomainTrip>> {
        let mut conn = self.conn()?;
        let trip = trips::table
            .filter(trips::id.eq(id))
            .first::<DbTrip>(&mut conn)
            .optional()?;

        Ok(trip.map(Into::into))
    }

    fn list_trips(&self, query: TripListQuery) -> RepositoryResult<Vec<DomainTrip>> {
        let mut conn = self.conn()?;

        let mut items = trips::table
            .filter(trips::user_id.eq(query.user_id))
            .into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(before) = query.before {
            items = items.filter(trips::date.lt(before));
        }

        let rows = items
            .order((trips::date.desc(), trips::id.desc()))
            .load::<DbTrip>(&mut conn)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

impl TripWriter for DieselRepository {
    fn create_trip(&self, new_trip: &DomainNewTrip) -> RepositoryResult<DomainTrip> {
        let mut conn = self.conn()?;
        let db_new = DbNewTrip::from(new_trip);

        let created = diesel::insert_into(trips::table)
            .values(&db_new)
            .get_result::<DbTrip>(&mut conn)?;

        Ok(created.into())
    }

    fn update_trip(
        &self,
        trip_id: i32,
        user_id: i32,
        updates: &DomainUpdateTrip,
    ) -> RepositoryResult<DomainTrip> {
        let mut conn = self.conn()?;

        let target = trips::table
            .filter(trips::id.eq(trip_id))
            .filter(trips::user_id.eq(user_id));

        let updated = if updates == &DomainUpdateTrip::default() {
            target.first::<DbTrip>(&mut conn)?
        } else {
            diesel::update(target)
                .set(&DbUpdateTrip::from(updates))
                .get_result::<DbTrip>(&mut conn)?
        };

        Ok(updated.into())
    }

    fn delete_trip(&self, trip_id: i32, user_id: i32) -> RepositoryResult<()> {
        let mut conn = self.conn()?;

        let target = trips::table
            .filter(trips::id.eq(trip_id))
            .filter(trips::user_id.eq(user_id));

        let deleted = diesel::delete(target).execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
