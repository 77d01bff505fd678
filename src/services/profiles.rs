use crate::domain::auth::Principal;
use crate::domain::profile::{Account, Profile, UpdateProfile};
use crate::forms::FieldErrors;
use crate::forms::profiles::{EditAccountForm, EditProfileForm};
use crate::repository::{ProfileReader, ProfileWriter};
use crate::services::{ServiceError, ServiceResult};

/// The caller's profile. A user without one gets an empty profile created.
pub fn get_profile<R>(repo: &R, principal: &Principal) -> ServiceResult<Profile>
where
    R: ProfileReader + ProfileWriter + ?Sized,
{
    match repo
        .get_profile(principal.user_id)
        .map_err(ServiceError::from)?
    {
        Some(profile) => Ok(profile),
        None => repo
            .update_profile(principal.user_id, &UpdateProfile::default())
            .map_err(ServiceError::from),
    }
}

pub fn update_profile<R>(
    repo: &R,
    principal: &Principal,
    form: EditProfileForm,
) -> ServiceResult<Profile>
where
    R: ProfileWriter + ?Sized,
{
    let updates = form.into_update()?;
    repo.update_profile(principal.user_id, &updates)
        .map_err(ServiceError::from)
}

pub fn get_account<R>(repo: &R, principal: &Principal) -> ServiceResult<Account>
where
    R: ProfileReader + ?Sized,
{
    repo.get_account(principal.user_id)
        .map_err(ServiceError::from)?
        .ok_or_else(ServiceError::not_found)
}

pub fn update_account<R>(
    repo: &R,
    principal: &Principal,
    form: EditAccountForm,
) -> ServiceResult<Account>
where
    R: ProfileWriter + ?Sized,
{
    let updates = form.into_update()?;
    repo.update_account(principal.user_id, &updates)
        .map_err(|err| match ServiceError::from(err) {
            ServiceError::Conflict => ServiceError::Validation(FieldErrors::single(
                "username",
                "A user with that username already exists.",
            )),
            other => other,
        })
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDateTime;

    use super::*;
    use crate::domain::profile::UpdateAccount;
    use crate::repository::{RepositoryError, RepositoryResult};
    use crate::repository::mock::{MockProfileReader, MockProfileWriter};

    fn profile(user_id: i32) -> Profile {
        Profile {
            id: 1,
            user_id,
            bio: None,
            location: None,
            image: None,
            updated_at: NaiveDateTime::default(),
        }
    }

    struct FakeRepo {
        reader: MockProfileReader,
        writer: MockProfileWriter,
    }

    impl FakeRepo {
        fn new() -> Self {
            Self {
                reader: MockProfileReader::new(),
                writer: MockProfileWriter::new(),
            }
        }
    }

    impl ProfileReader for FakeRepo {
        fn get_profile(&self, user_id: i32) -> RepositoryResult<Option<Profile>> {
            self.reader.get_profile(user_id)
        }

        fn get_account(&self, user_id: i32) -> RepositoryResult<Option<Account>> {
            self.reader.get_account(user_id)
        }
    }

    impl ProfileWriter for FakeRepo {
        fn update_profile(
            &self,
            user_id: i32,
            updates: &UpdateProfile,
        ) -> RepositoryResult<Profile> {
            self.writer.update_profile(user_id, updates)
        }

        fn update_account(
            &self,
            user_id: i32,
            updates: &UpdateAccount,
        ) -> RepositoryResult<Account> {
            self.writer.update_account(user_id, updates)
        }
    }

    #[test]
    fn missing_profile_is_created_on_read() {
        let mut repo = FakeRepo::new();
        repo.reader.expect_get_profile().returning(|_| Ok(None));
        repo.writer
            .expect_update_profile()
            .times(1)
            .withf(|user_id, updates| *user_id == 6 && *updates == UpdateProfile::default())
            .returning(|user_id, _| Ok(profile(user_id)));

        match get_profile(&repo, &Principal::new(6, false)) {
            Ok(found) => assert_eq!(found.user_id, 6),
            Err(err) => panic!("unexpected error: {err}"),
        }
    }

    #[test]
    fn cleared_image_is_passed_through() {
        let mut repo = FakeRepo::new();
        repo.writer
            .expect_update_profile()
            .times(1)
            .withf(|_, updates| updates.image == Some(None))
            .returning(|user_id, _| Ok(profile(user_id)));

        let form = EditProfileForm {
            image: Some(String::new()),
            ..EditProfileForm::default()
        };
        assert!(update_profile(&repo, &Principal::new(6, false), form).is_ok());
    }

    #[test]
    fn taken_username_is_a_field_error() {
        let mut repo = FakeRepo::new();
        repo.writer
            .expect_update_account()
            .returning(|_, _| Err(RepositoryError::Conflict));

        let form = EditAccountForm {
            username: Some("taken".to_string()),
            ..EditAccountForm::default()
        };
        match update_account(&repo, &Principal::new(6, false), form) {
            Err(ServiceError::Validation(errors)) => assert!(errors.get("username").is_some()),
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
