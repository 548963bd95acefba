use async_trait::async_trait;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use sales_insights_sdk::models::{Client, Order, OrderLine, Product};
use sea_orm::sea_query::{Expr, LikeExpr};
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, DbErr, FromQueryResult, JoinType, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait,
};

use crate::domain::error::DomainError;
use crate::domain::repo::{ClientLine, SalesRepository};

use super::entity::{client, order, order_detail, product};
use super::repository::EntityRepository;

impl From<DbErr> for DomainError {
    fn from(e: DbErr) -> Self {
        match e {
            DbErr::ConnectionAcquire(_) | DbErr::Conn(_) => Self::Unavailable(e.into()),
            _ => Self::Database(e.into()),
        }
    }
}

const LIKE_ESCAPE: char = '\\';

/// `LIKE` pattern matching values that start with `prefix` literally.
fn prefix_pattern(prefix: &str) -> String {
    let mut pattern = String::with_capacity(prefix.len() + 1);
    for ch in prefix.chars() {
        if matches!(ch, '%' | '_' | LIKE_ESCAPE) {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

#[derive(Debug, FromQueryResult)]
struct OrderLineRow {
    order_id: i32,
    product_name: String,
    quantity: i32,
}

/// [`SalesRepository`] on top of SeaORM, one [`EntityRepository`] per table.
pub struct OrmSalesRepository {
    conn: DatabaseConnection,
    clients: EntityRepository<client::Entity>,
    products: EntityRepository<product::Entity>,
    orders: EntityRepository<order::Entity>,
    details: EntityRepository<order_detail::Entity>,
}

impl OrmSalesRepository {
    #[must_use]
    pub fn new(conn: DatabaseConnection) -> Self {
        Self {
            conn,
            clients: EntityRepository::new(),
            products: EntityRepository::new(),
            orders: EntityRepository::new(),
            details: EntityRepository::new(),
        }
    }
}

#[async_trait]
impl SalesRepository for OrmSalesRepository {
    async fn clients_with_name_prefix(&self, prefix: &str) -> Result<Vec<Client>, DomainError> {
        // LIKE ignores case on some engines; candidates are narrowed to exact
        // prefixes afterwards.
        let like = LikeExpr::new(prefix_pattern(prefix)).escape(LIKE_ESCAPE);
        let rows = self
            .clients
            .find(Expr::col((client::Entity, client::Column::Name)).like(like))
            .order_by_asc(client::Column::ClientId)
            .all(&self.conn)
            .await?;

        Ok(rows
            .into_iter()
            .filter(|c| c.name.starts_with(prefix))
            .map(Into::into)
            .collect())
    }

    async fn products_priced_above(&self, price: Decimal) -> Result<Vec<Product>, DomainError> {
        let rows = self
            .products
            .find(product::Column::Price.gt(price))
            .order_by_asc(product::Column::ProductId)
            .all(&self.conn)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn order_lines(&self, order_id: Option<i32>) -> Result<Vec<OrderLine>, DomainError> {
        let mut query = self
            .details
            .all()
            .select_only()
            .column(order_detail::Column::OrderId)
            .column_as(product::Column::Name, "product_name")
            .column(order_detail::Column::Quantity)
            .inner_join(product::Entity)
            .order_by_asc(order_detail::Column::OrderDetailId);
        if let Some(id) = order_id {
            query = query.filter(order_detail::Column::OrderId.eq(id));
        }

        let rows = query.into_model::<OrderLineRow>().all(&self.conn).await?;
        Ok(rows
            .into_iter()
            .map(|r| OrderLine {
                order_id: r.order_id,
                product_name: r.product_name,
                quantity: r.quantity,
            })
            .collect())
    }

    async fn order_quantities(&self, order_id: i32) -> Result<Vec<i32>, DomainError> {
        Ok(self
            .details
            .find(order_detail::Column::OrderId.eq(order_id))
            .select_only()
            .column(order_detail::Column::Quantity)
            .into_tuple::<i32>()
            .all(&self.conn)
            .await?)
    }

    async fn most_expensive_product(&self) -> Result<Option<Product>, DomainError> {
        let row = self
            .products
            .all()
            .order_by_desc(product::Column::Price)
            .order_by_asc(product::Column::ProductId)
            .one(&self.conn)
            .await?;
        Ok(row.map(Into::into))
    }

    async fn orders_after(&self, date: NaiveDateTime) -> Result<Vec<Order>, DomainError> {
        let rows = self
            .orders
            .find(order::Column::OrderDate.gt(date))
            .order_by_asc(order::Column::OrderId)
            .all(&self.conn)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn product_prices(&self) -> Result<Vec<Decimal>, DomainError> {
        Ok(self
            .products
            .all()
            .select_only()
            .column(product::Column::Price)
            .into_tuple::<Decimal>()
            .all(&self.conn)
            .await?)
    }

    async fn products_without_description(&self) -> Result<Vec<Product>, DomainError> {
        let rows = self
            .products
            .find(
                Condition::any()
                    .add(product::Column::Description.is_null())
                    .add(product::Column::Description.eq("")),
            )
            .order_by_asc(product::Column::ProductId)
            .all(&self.conn)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn order_counts_by_client(&self) -> Result<Vec<(i32, i64)>, DomainError> {
        Ok(self
            .orders
            .all()
            .select_only()
            .column(order::Column::ClientId)
            .column_as(
                Expr::col((order::Entity, order::Column::OrderId)).count(),
                "orders_count",
            )
            .group_by(order::Column::ClientId)
            .order_by_asc(order::Column::ClientId)
            .into_tuple::<(i32, i64)>()
            .all(&self.conn)
            .await?)
    }

    async fn find_client(&self, client_id: i32) -> Result<Option<Client>, DomainError> {
        let row = self.clients.get_by_id(&self.conn, client_id).await?;
        Ok(row.map(Into::into))
    }

    async fn product_names_for_client(&self, client_id: i32) -> Result<Vec<String>, DomainError> {
        Ok(self
            .details
            .all()
            .select_only()
            .column(product::Column::Name)
            .distinct()
            .inner_join(product::Entity)
            .inner_join(order::Entity)
            .filter(order::Column::ClientId.eq(client_id))
            .order_by_asc(product::Column::Name)
            .into_tuple::<String>()
            .all(&self.conn)
            .await?)
    }

    async fn client_names_for_product(&self, product_id: i32) -> Result<Vec<String>, DomainError> {
        Ok(self
            .clients
            .all()
            .select_only()
            .column(client::Column::Name)
            .distinct()
            .inner_join(order::Entity)
            .join(JoinType::InnerJoin, order::Relation::OrderDetail.def())
            .filter(order_detail::Column::ProductId.eq(product_id))
            .order_by_asc(client::Column::Name)
            .into_tuple::<String>()
            .all(&self.conn)
            .await?)
    }

    async fn list_clients(&self) -> Result<Vec<Client>, DomainError> {
        let rows = self
            .clients
            .all()
            .order_by_asc(client::Column::ClientId)
            .all(&self.conn)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_orders(&self) -> Result<Vec<Order>, DomainError> {
        let rows = self
            .orders
            .all()
            .order_by_asc(order::Column::OrderId)
            .all(&self.conn)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_order(&self, order_id: i32) -> Result<Option<Order>, DomainError> {
        let row = self.orders.get_by_id(&self.conn, order_id).await?;
        Ok(row.map(Into::into))
    }

    async fn client_lines(&self) -> Result<Vec<ClientLine>, DomainError> {
        let rows = self
            .details
            .all()
            .select_only()
            .column(order::Column::ClientId)
            .column(order_detail::Column::Quantity)
            .column(product::Column::Price)
            .inner_join(order::Entity)
            .inner_join(product::Entity)
            .order_by_asc(order_detail::Column::OrderDetailId)
            .into_tuple::<(i32, i32, Decimal)>()
            .all(&self.conn)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(client_id, quantity, unit_price)| ClientLine {
                client_id,
                quantity,
                unit_price,
            })
            .collect())
    }

    async fn ping(&self) -> Result<(), DomainError> {
        Ok(self.conn.ping().await?)
    }
}
