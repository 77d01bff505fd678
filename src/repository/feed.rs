use diesel::prelude::*;
use pushkind_common::pagination::Pagination;

use crate::{
    domain::feed::{
        FeedEntry as DomainFeedEntry, FeedKind, NewFeedEntry as DomainNewFeedEntry,
        UpdateFeedEntry as DomainUpdateFeedEntry,
    },
    models::feed::FeedEntry as DbFeedEntry,
    repository::{DieselRepository, FeedReader, FeedWriter, RepositoryError, RepositoryResult},
};

/// Runs `$body` with `$table` bound to the schema module backing `$kind`.
///
/// Both feed tables share their column layout, so the same body type-checks
/// against either one.
macro_rules! with_feed_table {
    ($kind:expr, $table:ident => $body:block) => {
        match $kind {
            FeedKind::Notification => {
                use crate::schema::notifications as $table;
                $body
            }
            FeedKind::Update => {
                use crate::schema::updates as $table;
                $body
            }
        }
    };
}

impl FeedReader for DieselRepository {
    fn get_feed_entry(&self, kind: FeedKind, id: i32) -> RepositoryResult<Option<DomainFeedEntry>> {
        let mut conn = self.conn()?;

        let entry = with_feed_table!(kind, feed => {
            feed::table
                .filter(feed::id.eq(id))
                .first::<DbFeedEntry>(&mut conn)
                .optional()?
        });

        Ok(entry.map(Into::into))
    }

    fn list_feed(
        &self,
        kind: FeedKind,
        user_id: i32,
        pagination: Option<Pagination>,
    ) -> RepositoryResult<(usize, Vec<DomainFeedEntry>)> {
        let mut conn = self.conn()?;

        let (total, rows) = with_feed_table!(kind, feed => {
            let total = feed::table
                .filter(feed::user_id.eq(user_id))
                .count()
                .get_result::<i64>(&mut conn)? as usize;

            let mut items = feed::table
                .filter(feed::user_id.eq(user_id))
                .order((feed::timestamp.desc(), feed::id.desc()))
                .into_boxed::<diesel::sqlite::Sqlite>();

            if let Some(pagination) = &pagination {
                let offset = (pagination.page.max(1) - 1).saturating_mul(pagination.per_page);
                let offset = i64::try_from(offset).unwrap_or(i64::MAX);
                let limit = i64::try_from(pagination.per_page).unwrap_or(i64::MAX);
                items = items.offset(offset).limit(limit);
            }

            (total, items.load::<DbFeedEntry>(&mut conn)?)
        });

        Ok((total, rows.into_iter().map(Into::into).collect()))
    }
}

impl FeedWriter for DieselRepository {
    fn create_feed_entry(
        &self,
        kind: FeedKind,
        new_entry: &DomainNewFeedEntry,
    ) -> RepositoryResult<DomainFeedEntry> {
        let mut conn = self.conn()?;
        let now = chrono::Local::now().naive_utc();

        let created = with_feed_table!(kind, feed => {
            diesel::insert_into(feed::table)
                .values((
                    feed::user_id.eq(new_entry.user_id),
                    feed::message.eq(new_entry.message.as_str()),
                    feed::is_read.eq(false),
                    feed::timestamp.eq(now),
                ))
                .get_result::<DbFeedEntry>(&mut conn)?
        });

        Ok(created.into())
    }

    fn update_feed_entry(
        &self,
        kind: FeedKind,
        entry_id: i32,
        user_id: i32,
        updates: &DomainUpdateFeedEntry,
    ) -> RepositoryResult<DomainFeedEntry> {
        let mut conn = self.conn()?;

        let updated = with_feed_table!(kind, feed => {
            let target = feed::table
                .filter(feed::id.eq(entry_id))
                .filter(feed::user_id.eq(user_id));

            if updates.message.is_none() && updates.is_read.is_none() {
                target.first::<DbFeedEntry>(&mut conn)?
            } else {
                diesel::update(target)
                    .set((
                        updates.message.as_deref().map(|message| feed::message.eq(message)),
                        updates.is_read.map(|is_read| feed::is_read.eq(is_read)),
                    ))
                    .get_result::<DbFeedEntry>(&mut conn)?
            }
        });

        Ok(updated.into())
    }

    fn delete_feed_entry(&self, kind: FeedKind, entry_id: i32, user_id: i32) -> RepositoryResult<()> {
        let mut conn = self.conn()?;

        let deleted = with_feed_table!(kind, feed => {
            let target = feed::table
                .filter(feed::id.eq(entry_id))
                .filter(feed::user_id.eq(user_id));
            diesel::delete(target).execute(&mut conn)?
        });

        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
