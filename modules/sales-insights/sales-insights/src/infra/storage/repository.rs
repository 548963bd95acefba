//! Generic data access over one SeaORM entity.
//!
//! Query methods hand back an unexecuted [`Select`] so callers can keep
//! appending filters, ordering, joins or projections before running it.
//! Mutations take any [`ConnectionTrait`]: pass a pooled connection to commit
//! immediately, or a `DatabaseTransaction` to stage the change in a unit of work.

use std::fmt;
use std::marker::PhantomData;

use sea_orm::sea_query::IntoCondition;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, PrimaryKeyTrait, QueryFilter, Select,
};

pub struct EntityRepository<E: EntityTrait> {
    entity: PhantomData<fn() -> E>,
}

impl<E: EntityTrait> EntityRepository<E> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entity: PhantomData,
        }
    }

    /// Every row of the table, not yet executed.
    #[must_use]
    pub fn all(&self) -> Select<E> {
        E::find()
    }

    /// Rows matching `predicate`, not yet executed.
    #[must_use]
    pub fn find<F>(&self, predicate: F) -> Select<E>
    where
        F: IntoCondition,
    {
        E::find().filter(predicate)
    }

    /// The row with the given primary key, if any.
    ///
    /// # Errors
    /// Propagates database failures.
    pub async fn get_by_id<C, K>(&self, conn: &C, id: K) -> Result<Option<E::Model>, DbErr>
    where
        C: ConnectionTrait,
        K: Into<<E::PrimaryKey as PrimaryKeyTrait>::ValueType>,
    {
        E::find_by_id(id).one(conn).await
    }

    /// Insert a row and return it as stored.
    ///
    /// # Errors
    /// Propagates database failures, including constraint violations.
    pub async fn add<C, A>(&self, conn: &C, model: A) -> Result<E::Model, DbErr>
    where
        C: ConnectionTrait,
        A: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send,
        E::Model: IntoActiveModel<A>,
    {
        model.insert(conn).await
    }

    /// Write the changed columns of an existing row.
    ///
    /// # Errors
    /// Returns `DbErr::RecordNotUpdated` when no row matches the primary key.
    pub async fn update<C, A>(&self, conn: &C, model: A) -> Result<E::Model, DbErr>
    where
        C: ConnectionTrait,
        A: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send,
        E::Model: IntoActiveModel<A>,
    {
        model.update(conn).await
    }

    /// Delete by primary key; returns the number of rows removed.
    ///
    /// # Errors
    /// Propagates database failures.
    pub async fn delete<C, A>(&self, conn: &C, model: A) -> Result<u64, DbErr>
    where
        C: ConnectionTrait,
        A: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send,
    {
        Ok(model.delete(conn).await?.rows_affected)
    }
}

impl<E: EntityTrait> Default for EntityRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: EntityTrait> Clone for EntityRepository<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E: EntityTrait> Copy for EntityRepository<E> {}

impl<E: EntityTrait> fmt::Debug for EntityRepository<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityRepository")
            .field("table", &E::default().table_name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{ActiveValue, ColumnTrait, QueryOrder, TransactionTrait};

    use super::*;
    use crate::infra::storage::entity::{client, order, order_detail, product};
    use crate::test_support::{at, dec, migrated_sqlite};
    use sales_insights_sdk::models::OrderDetail;

    fn new_client(name: &str) -> client::ActiveModel {
        client::ActiveModel {
            name: ActiveValue::Set(name.to_owned()),
            email: ActiveValue::Set(format!("{name}@example.com")),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn add_get_update_delete_round() {
        let db = migrated_sqlite().await;
        let clients = EntityRepository::<client::Entity>::new();

        let ana = clients.add(&db, new_client("Ana")).await.unwrap();
        assert_eq!(
            clients.get_by_id(&db, ana.client_id).await.unwrap(),
            Some(ana.clone())
        );

        let renamed = clients
            .update(
                &db,
                client::ActiveModel {
                    client_id: ActiveValue::Unchanged(ana.client_id),
                    name: ActiveValue::Set("Ana Maria".to_owned()),
                    email: ActiveValue::NotSet,
                },
            )
            .await
            .unwrap();
        assert_eq!(renamed.name, "Ana Maria");
        assert_eq!(renamed.email, ana.email);

        let removed = clients
            .delete(
                &db,
                client::ActiveModel {
                    client_id: ActiveValue::Unchanged(ana.client_id),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(removed, 1);
        assert!(clients.get_by_id(&db, ana.client_id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn query_handles_compose_before_execution() {
        let db = migrated_sqlite().await;
        let clients = EntityRepository::<client::Entity>::new();
        for name in ["Ana", "Andres", "Beatriz"] {
            clients.add(&db, new_client(name)).await.unwrap();
        }

        let handle = clients.find(client::Column::Name.starts_with("An"));
        let names: Vec<String> = handle
            .order_by_desc(client::Column::Name)
            .all(&db)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Andres", "Ana"]);

        assert_eq!(clients.all().all(&db).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn rolled_back_unit_of_work_leaves_no_rows() {
        let db = migrated_sqlite().await;
        let clients = EntityRepository::<client::Entity>::new();

        let txn = db.begin().await.unwrap();
        clients.add(&txn, new_client("Ghost")).await.unwrap();
        txn.rollback().await.unwrap();

        assert!(clients.all().all(&db).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn foreign_keys_guard_order_details() {
        let db = migrated_sqlite().await;
        let clients = EntityRepository::<client::Entity>::new();
        let products = EntityRepository::<product::Entity>::new();
        let orders = EntityRepository::<order::Entity>::new();
        let details = EntityRepository::<order_detail::Entity>::new();

        let ana = clients.add(&db, new_client("Ana")).await.unwrap();
        let pen = products
            .add(
                &db,
                product::ActiveModel {
                    name: ActiveValue::Set("Pen".to_owned()),
                    description: ActiveValue::Set(None),
                    price: ActiveValue::Set(dec("2.5")),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        let ord = orders
            .add(
                &db,
                order::ActiveModel {
                    client_id: ActiveValue::Set(ana.client_id),
                    order_date: ActiveValue::Set(at(2024, 1, 1)),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let line = details
            .add(
                &db,
                order_detail::ActiveModel {
                    order_id: ActiveValue::Set(ord.order_id),
                    product_id: ActiveValue::Set(pen.product_id),
                    quantity: ActiveValue::Set(3),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        let line: OrderDetail = line.into();
        assert_eq!(line.quantity, 3);

        let dangling = details
            .add(
                &db,
                order_detail::ActiveModel {
                    order_id: ActiveValue::Set(999),
                    product_id: ActiveValue::Set(pen.product_id),
                    quantity: ActiveValue::Set(1),
                    ..Default::default()
                },
            )
            .await;
        assert!(dangling.is_err());

        let negative = details
            .add(
                &db,
                order_detail::ActiveModel {
                    order_id: ActiveValue::Set(ord.order_id),
                    product_id: ActiveValue::Set(pen.product_id),
                    quantity: ActiveValue::Set(-1),
                    ..Default::default()
                },
            )
            .await;
        assert!(negative.is_err());
    }
}
