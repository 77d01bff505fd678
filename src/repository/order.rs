use diesel::prelude::*;

use crate::{
    domain::order::{
        NewOrder as DomainNewOrder, Order as DomainOrder, UpdateOrder as DomainUpdateOrder,
    },
    models::order::{NewOrder as DbNewOrder, Order as DbOrder, UpdateOrder as DbUpdateOrder},
    repository::{DieselRepository, OrderReader, OrderWriter, RepositoryError, RepositoryResult},
    schema::orders,
};

impl OrderReader for DieselRepository {
    fn get_order_by_id(&self, id: i32) -> RepositoryResult<Option<DomainOrder>> {
        let mut conn = self.conn()?;
        let order = orders::table
            .filter(orders::id.eq(id))
            .first::<DbOrder>(&mut conn)
            .optional()?;

        Ok(order.map(Into::into))
    }

    fn list_orders(&self, user_id: i32) -> RepositoryResult<Vec<DomainOrder>> {
        let mut conn = self.conn()?;
        let rows = orders::table
            .filter(orders::user_id.eq(user_id))
            .order((orders::created_at.desc(), orders::id.desc()))
            .load::<DbOrder>(&mut conn)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

impl OrderWriter for DieselRepository {
    fn create_order(&self, new_order: &DomainNewOrder) -> RepositoryResult<DomainOrder> {
        let mut conn = self.conn()?;
        let db_new = DbNewOrder::from(new_order);

        let created = diesel::insert_into(orders::table)
            .values(&db_new)
            .get_result::<DbOrder>(&mut conn)?;

        Ok(created.into())
    }

    fn update_order(
        &self,
        order_id: i32,
        user_id: i32,
        updates: &DomainUpdateOrder,
    ) -> RepositoryResult<DomainOrder> {
        let mut conn = self.conn()?;

        let target = orders::table
            .filter(orders::id.eq(order_id))
            .filter(orders::user_id.eq(user_id));

        let updated = if updates == &DomainUpdateOrder::default() {
            target.first::<DbOrder>(&mut conn)?
        } else {
            diesel::update(target)
                .set(&DbUpdateOrder::from(updates))
                .get_result::<DbOrder>(&mut conn)?
        };

        Ok(updated.into())
    }

    fn delete_order(&self, order_id: i32, user_id: i32) -> RepositoryResult<()> {
        let mut conn = self.conn()?;

        let target = orders::table
            .filter(orders::id.eq(order_id))
            .filter(orders::user_id.eq(user_id));

        let deleted = diesel::delete(target).execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
