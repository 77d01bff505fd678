use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::{
    domain::wishlist::{WishlistEntry as DomainEntry, WishlistInsert},
    models::wishlist::{NewWishlistEntry, WishlistEntry as DbEntry},
    repository::product::load_products_by_ids,
    repository::{
        DieselRepository, RepositoryError, RepositoryResult, WishlistReader, WishlistWriter,
    },
    schema::wishlists,
};

impl WishlistReader for DieselRepository {
    fn get_wishlist_entry(&self, id: i32) -> RepositoryResult<Option<DomainEntry>> {
        let mut conn = self.conn()?;
        let entry = wishlists::table
            .filter(wishlists::id.eq(id))
            .first::<DbEntry>(&mut conn)
            .optional()?;

        match entry {
            Some(entry) => Ok(with_products(&mut conn, vec![entry])?.pop()),
            None => Ok(None),
        }
    }

    fn list_wishlist(&self, user_id: i32) -> RepositoryResult<Vec<DomainEntry>> {
        let mut conn = self.conn()?;
        let rows = wishlists::table
            .filter(wishlists::user_id.eq(user_id))
            .order((wishlists::created_at.desc(), wishlists::id.desc()))
            .load::<DbEntry>(&mut conn)?;

        with_products(&mut conn, rows)
    }
}

impl WishlistWriter for DieselRepository {
    fn add_to_wishlist(&self, user_id: i32, product_id: i32) -> RepositoryResult<WishlistInsert> {
        let mut conn = self.conn()?;

        conn.transaction::<WishlistInsert, RepositoryError, _>(|conn| {
            // The unique (user_id, product_id) index decides the race, not a prior read.
            let inserted = diesel::insert_into(wishlists::table)
                .values(&NewWishlistEntry::new(user_id, product_id))
                .on_conflict((wishlists::user_id, wishlists::product_id))
                .do_nothing()
                .execute(conn)?;

            let row = wishlists::table
                .filter(wishlists::user_id.eq(user_id))
                .filter(wishlists::product_id.eq(product_id))
                .first::<DbEntry>(conn)?;

            let entry = with_products(conn, vec![row])?
                .pop()
                .ok_or(RepositoryError::NotFound)?;

            if inserted == 1 {
                Ok(WishlistInsert::Created(entry))
            } else {
                Ok(WishlistInsert::Existing(entry))
            }
        })
    }

    fn delete_wishlist_entry(&self, entry_id: i32, user_id: i32) -> RepositoryResult<()> {
        let mut conn = self.conn()?;

        let target = wishlists::table
            .filter(wishlists::id.eq(entry_id))
            .filter(wishlists::user_id.eq(user_id));

        let deleted = diesel::delete(target).execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}

fn with_products(
    conn: &mut SqliteConnection,
    rows: Vec<DbEntry>,
) -> RepositoryResult<Vec<DomainEntry>> {
    let product_ids: Vec<i32> = rows.iter().map(|row| row.product_id).collect();
    let mut products = load_products_by_ids(conn, &product_ids)?;

    Ok(rows
        .into_iter()
        .map(|row| {
            let product = products.remove(&row.product_id);
            row.into_domain(product)
        })
        .collect())
}
