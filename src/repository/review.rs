use std::collections::HashMap;

use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::{
    domain::profile::Account,
    domain::review::{
        NewReview as DomainNewReview, Review as DomainReview, ReviewAuthor, ReviewListQuery,
        ReviewProduct, UpdateReview as DomainUpdateReview,
    },
    models::review::{NewReview as DbNewReview, Review as DbReview, UpdateReview as DbUpdateReview},
    models::user::User as DbUser,
    repository::{DieselRepository, RepositoryResult, ReviewReader, ReviewWriter},
    schema::{products, profiles, reviews, users},
};

impl ReviewReader for DieselRepository {
    fn get_review_by_id(&self, id: i32) -> RepositoryResult<Option<DomainReview>> {
        let mut conn = self.conn()?;
        let review = reviews::table
            .filter(reviews::id.eq(id))
            .first::<DbReview>(&mut conn)
            .optional()?;

        match review {
            Some(review) => Ok(hydrate(&mut conn, vec![review])?.pop()),
            None => Ok(None),
        }
    }

    fn list_reviews(&self, query: ReviewListQuery) -> RepositoryResult<Vec<DomainReview>> {
        let mut conn = self.conn()?;

        let mut items = reviews::table.into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(user_id) = query.user_id {
            items = items.filter(reviews::user_id.eq(user_id));
        }

        if let Some(product_id) = query.product_id {
            items = items.filter(reviews::product_id.eq(product_id));
        }

        if query.approved_only {
            items = items.filter(reviews::approved.eq(true));
        }

        let rows = items
            .order((reviews::created_at.desc(), reviews::id.desc()))
            .load::<DbReview>(&mut conn)?;

        hydrate(&mut conn, rows)
    }
}

impl ReviewWriter for DieselRepository {
    fn create_review(&self, new_review: &DomainNewReview) -> RepositoryResult<DomainReview> {
        let mut conn = self.conn()?;
        let db_new = DbNewReview::from(new_review);

        let created = diesel::insert_into(reviews::table)
            .values(&db_new)
            .get_result::<DbReview>(&mut conn)?;

        first_hydrated(&mut conn, created)
    }

    fn update_review(
        &self,
        review_id: i32,
        updates: &DomainUpdateReview,
    ) -> RepositoryResult<DomainReview> {
        let mut conn = self.conn()?;
        let target = reviews::table.filter(reviews::id.eq(review_id));

        // An empty changeset is rejected by diesel; treat it as a no-op read.
        let updated = if updates.is_empty() {
            target.first::<DbReview>(&mut conn)?
        } else {
            diesel::update(target)
                .set(&DbUpdateReview::from(updates))
                .get_result::<DbReview>(&mut conn)?
        };

        first_hydrated(&mut conn, updated)
    }
}

fn first_hydrated(conn: &mut SqliteConnection, row: DbReview) -> RepositoryResult<DomainReview> {
    let review_id = row.id;
    hydrate(conn, vec![row])?.pop().ok_or_else(|| {
        log::error!("Review {review_id} vanished while loading its author");
        crate::repository::RepositoryError::NotFound
    })
}

/// Attaches product titles and author display data to review rows.
fn hydrate(
    conn: &mut SqliteConnection,
    rows: Vec<DbReview>,
) -> RepositoryResult<Vec<DomainReview>> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let product_ids: Vec<i32> = rows.iter().filter_map(|row| row.product_id).collect();
    let user_ids: Vec<i32> = rows.iter().map(|row| row.user_id).collect();

    let titles: HashMap<i32, String> = products::table
        .filter(products::id.eq_any(&product_ids))
        .select((products::id, products::title))
        .load::<(i32, String)>(conn)?
        .into_iter()
        .collect();

    let accounts: HashMap<i32, Account> = users::table
        .filter(users::id.eq_any(&user_ids))
        .load::<DbUser>(conn)?
        .into_iter()
        .map(|user| (user.id, Account::from(user)))
        .collect();

    let images: HashMap<i32, Option<String>> = profiles::table
        .filter(profiles::user_id.eq_any(&user_ids))
        .select((profiles::user_id, profiles::image))
        .load::<(i32, Option<String>)>(conn)?
        .into_iter()
        .collect();

    Ok(rows
        .into_iter()
        .map(|row| {
            let product = row.product_id.and_then(|id| {
                titles.get(&id).map(|title| ReviewProduct {
                    id,
                    title: title.clone(),
                })
            });
            let author = accounts
                .get(&row.user_id)
                .map(|account| ReviewAuthor {
                    name: account.display_name(),
                    email: account.email.clone(),
                    profile_image: images.get(&row.user_id).cloned().flatten(),
                })
                .unwrap_or_default();
            row.into_domain(product, author)
        })
        .collect())
}
