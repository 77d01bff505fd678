use chrono::{NaiveDateTime, Utc};

use crate::domain::auth::Principal;
use crate::domain::trip::{Trip, TripListQuery};
use crate::forms::trips::{AddTripForm, EditTripForm};
use crate::repository::{TripReader, TripWriter};
use crate::services::access::{Action, authorize};
use crate::services::{ServiceError, ServiceResult};

pub fn list_trips<R>(repo: &R, principal: &Principal) -> ServiceResult<Vec<Trip>>
where
    R: TripReader + ?Sized,
{
    repo.list_trips(TripListQuery::new(principal.user_id))
        .map_err(ServiceError::from)
}

/// Trips of the caller dated before `now`.
pub fn trip_history<R>(
    repo: &R,
    principal: &Principal,
    now: NaiveDateTime,
) -> ServiceResult<Vec<Trip>>
where
    R: TripReader + ?Sized,
{
    repo.list_trips(TripListQuery::new(principal.user_id).before(now))
        .map_err(ServiceError::from)
}

/// [`trip_history`] against the server clock.
pub fn past_trips<R>(repo: &R, principal: &Principal) -> ServiceResult<Vec<Trip>>
where
    R: TripReader + ?Sized,
{
    trip_history(repo, principal, Utc::now().naive_utc())
}

pub fn create_trip<R>(repo: &R, principal: &Principal, form: AddTripForm) -> ServiceResult<Trip>
where
    R: TripWriter + ?Sized,
{
    let new_trip = form.into_new_trip(principal.user_id)?;
    repo.create_trip(&new_trip).map_err(ServiceError::from)
}

fn owned_trip<R>(repo: &R, principal: &Principal, action: Action, trip_id: i32) -> ServiceResult<Trip>
where
    R: TripReader + ?Sized,
{
    let trip = repo
        .get_trip_by_id(trip_id)
        .map_err(ServiceError::from)?
        .ok_or_else(ServiceError::not_found)?;

    authorize(principal, action, &trip).into_result(ServiceError::not_found)?;
    Ok(trip)
}

pub fn get_trip<R>(repo: &R, principal: &Principal, trip_id: i32) -> ServiceResult<Trip>
where
    R: TripReader + ?Sized,
{
    owned_trip(repo, principal, Action::View, trip_id)
}

pub fn update_trip<R>(
    repo: &R,
    principal: &Principal,
    trip_id: i32,
    form: EditTripForm,
) -> ServiceResult<Trip>
where
    R: TripReader + TripWriter + ?Sized,
{
    let trip = owned_trip(repo, principal, Action::Edit, trip_id)?;
    let updates = form.into_update()?;

    repo.update_trip(trip.id, principal.user_id, &updates)
        .map_err(ServiceError::from)
}

pub fn delete_trip<R>(repo: &R, principal: &Principal, trip_id: i32) -> ServiceResult<()>
where
    R: TripReader + TripWriter + ?Sized,
{
    let trip = owned_trip(repo, principal, Action::Edit, trip_id)?;

    repo.delete_trip(trip.id, principal.user_id)
        .map_err(ServiceError::from)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::trip::{NewTrip, UpdateTrip};
    use crate::repository::RepositoryResult;
    use crate::repository::mock::{MockTripReader, MockTripWriter};

    fn date(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, day)
            .and_then(|date| date.and_hms_opt(9, 0, 0))
            .unwrap_or_default()
    }

    fn trip(id: i32, user_id: i32) -> Trip {
        Trip {
            id,
            user_id,
            title: "Moon weekend".to_string(),
            destination: "Tranquility Base".to_string(),
            date: date(1),
            notes: None,
        }
    }

    struct FakeRepo {
        reader: MockTripReader,
        writer: MockTripWriter,
    }

    impl FakeRepo {
        fn new() -> Self {
            Self {
                reader: MockTripReader::new(),
                writer: MockTripWriter::new(),
            }
        }
    }

    impl TripReader for FakeRepo {
        fn get_trip_by_id(&self, id: i32) -> RepositoryResult<Option<Trip>> {
            self.reader.get_trip_by_id(id)
        }

        fn list_trips(&self, query: TripListQuery) -> RepositoryResult<Vec<Trip>> {
            self.reader.list_trips(query)
        }
    }

    impl TripWriter for FakeRepo {
        fn create_trip(&self, new_trip: &NewTrip) -> RepositoryResult<Trip> {
            self.writer.create_trip(new_trip)
        }

        fn update_trip(
            &self,
            trip_id: i32,
            user_id: i32,
            updates: &UpdateTrip,
        ) -> RepositoryResult<Trip> {
            self.writer.update_trip(trip_id, user_id, updates)
        }

        fn delete_trip(&self, trip_id: i32, user_id: i32) -> RepositoryResult<()> {
            self.writer.delete_trip(trip_id, user_id)
        }
    }

    #[test]
    fn history_only_asks_for_past_trips() {
        let mut repo = FakeRepo::new();
        repo.reader
            .expect_list_trips()
            .times(1)
            .withf(|query| *query == TripListQuery::new(3).before(date(10)))
            .returning(|_| Ok(vec![trip(1, 3)]));

        match trip_history(&repo, &Principal::new(3, false), date(10)) {
            Ok(trips) => assert_eq!(trips.len(), 1),
            Err(err) => panic!("unexpected error: {err}"),
        }
    }

    #[test]
    fn foreign_trip_cannot_be_updated() {
        let mut repo = FakeRepo::new();
        repo.reader
            .expect_get_trip_by_id()
            .returning(|id| Ok(Some(trip(id, 3))));
        repo.writer.expect_update_trip().times(0);

        let form = EditTripForm {
            title: Some("Mars instead".to_string()),
            ..EditTripForm::default()
        };
        let result = update_trip(&repo, &Principal::new(4, false), 1, form);
        assert!(matches!(result, Err(ServiceError::NotFound(_))));
    }

    #[test]
    fn owner_update_is_scoped_to_owner() {
        let mut repo = FakeRepo::new();
        repo.reader
            .expect_get_trip_by_id()
            .returning(|id| Ok(Some(trip(id, 3))));
        repo.writer
            .expect_update_trip()
            .times(1)
            .withf(|trip_id, user_id, updates| {
                *trip_id == 1 && *user_id == 3 && updates.title.as_deref() == Some("Mars instead")
            })
            .returning(|id, user_id, _| Ok(trip(id, user_id)));

        let form = EditTripForm {
            title: Some("Mars instead".to_string()),
            ..EditTripForm::default()
        };
        assert!(update_trip(&repo, &Principal::new(3, false), 1, form).is_ok());
    }
}
