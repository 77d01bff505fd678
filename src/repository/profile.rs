use diesel::prelude::*;

use crate::{
    domain::profile::{
        Account as DomainAccount, Profile as DomainProfile, UpdateAccount as DomainUpdateAccount,
        UpdateProfile as DomainUpdateProfile,
    },
    models::profile::{NewProfile, Profile as DbProfile, UpdateProfile as DbUpdateProfile},
    models::user::{UpdateUser as DbUpdateUser, User as DbUser},
    repository::{DieselRepository, ProfileReader, ProfileWriter, RepositoryError, RepositoryResult},
    schema::{profiles, users},
};

impl ProfileReader for DieselRepository {
    fn get_profile(&self, user_id: i32) -> RepositoryResult<Option<DomainProfile>> {
        let mut conn = self.conn()?;
        let profile = profiles::table
            .filter(profiles::user_id.eq(user_id))
            .first::<DbProfile>(&mut conn)
            .optional()?;

        Ok(profile.map(Into::into))
    }

    fn get_account(&self, user_id: i32) -> RepositoryResult<Option<DomainAccount>> {
        let mut conn = self.conn()?;
        let user = users::table
            .filter(users::id.eq(user_id))
            .first::<DbUser>(&mut conn)
            .optional()?;

        Ok(user.map(Into::into))
    }
}

impl ProfileWriter for DieselRepository {
    fn update_profile(
        &self,
        user_id: i32,
        updates: &DomainUpdateProfile,
    ) -> RepositoryResult<DomainProfile> {
        let mut conn = self.conn()?;

        conn.transaction::<DomainProfile, RepositoryError, _>(|conn| {
            diesel::insert_into(profiles::table)
                .values(&NewProfile::for_user(user_id))
                .on_conflict(profiles::user_id)
                .do_nothing()
                .execute(conn)?;

            let target = profiles::table.filter(profiles::user_id.eq(user_id));
            let updated = diesel::update(target)
                .set(&DbUpdateProfile::from(updates))
                .get_result::<DbProfile>(conn)?;

            Ok(updated.into())
        })
    }

    fn update_account(
        &self,
        user_id: i32,
        updates: &DomainUpdateAccount,
    ) -> RepositoryResult<DomainAccount> {
        let mut conn = self.conn()?;
        let target = users::table.filter(users::id.eq(user_id));

        let updated = if updates == &DomainUpdateAccount::default() {
            target.first::<DbUser>(&mut conn)?
        } else {
            diesel::update(target)
                .set(&DbUpdateUser::from(updates))
                .get_result::<DbUser>(&mut conn)?
        };

        Ok(updated.into())
    }
}
