use async_trait::async_trait;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use domain::{
    Currency, DomainError, NewOrder, Order, OrderChanges, OrderListing, OrderRepository, OrderType,
};

use super::sqlite_storage::{last_insert_id, SqliteSession};
use crate::database::{items, orders};

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = orders)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
struct OrderModel {
    id: i32,
    item_id: Option<i32>,
    order_type: String,
    price: f64,
    crypto: String,
    wallet: String,
    created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = orders)]
struct NewOrderModel {
    item_id: i32,
    order_type: String,
    price: f64,
    crypto: String,
    wallet: String,
    created_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = orders)]
struct OrderChangeset {
    item_id: Option<i32>,
    order_type: Option<String>,
    price: Option<f64>,
    crypto: Option<String>,
    wallet: Option<String>,
}

type OrderRow = (OrderModel, Option<String>);

// Convert between domain and database models
fn into_listing((model, item_name): OrderRow) -> Result<OrderListing, DomainError> {
    let order_type = OrderType::parse(&model.order_type).ok_or_else(|| {
        DomainError::Repository(format!("order {} has unknown type '{}'", model.id, model.order_type))
    })?;
    let crypto = Currency::parse(&model.crypto).ok_or_else(|| {
        DomainError::Repository(format!("order {} has unknown currency '{}'", model.id, model.crypto))
    })?;

    Ok(OrderListing {
        order: Order {
            id: model.id,
            item_id: model.item_id,
            order_type,
            price: model.price,
            crypto,
            wallet: model.wallet,
            created_at: model.created_at,
        },
        item_name,
    })
}

impl From<&NewOrder> for NewOrderModel {
    fn from(order: &NewOrder) -> Self {
        NewOrderModel {
            item_id: order.item_id,
            order_type: order.order_type.as_str().to_string(),
            price: order.price,
            crypto: order.crypto.as_str().to_string(),
            wallet: order.wallet.clone(),
            created_at: chrono::Utc::now().naive_utc(),
        }
    }
}

impl From<&OrderChanges> for OrderChangeset {
    fn from(changes: &OrderChanges) -> Self {
        OrderChangeset {
            item_id: changes.item_id,
            order_type: changes.order_type.map(|t| t.as_str().to_string()),
            price: changes.price,
            crypto: changes.crypto.map(|c| c.as_str().to_string()),
            wallet: changes.wallet.clone(),
        }
    }
}

#[async_trait]
impl OrderRepository for SqliteSession {
    async fn find_all(&mut self) -> Result<Vec<OrderListing>, DomainError> {
        let rows = self
            .run(|conn| {
                orders::table
                    .left_join(items::table)
                    .select((OrderModel::as_select(), items::name.nullable()))
                    .order(orders::id.asc())
                    .load::<OrderRow>(conn)
            })
            .await?;

        rows.into_iter().map(into_listing).collect()
    }

    async fn find_by_id(&mut self, id: i32) -> Result<Option<OrderListing>, DomainError> {
        let row = self
            .run(move |conn| {
                orders::table
                    .left_join(items::table)
                    .filter(orders::id.eq(id))
                    .select((OrderModel::as_select(), items::name.nullable()))
                    .first::<OrderRow>(conn)
                    .optional()
            })
            .await?;

        row.map(into_listing).transpose()
    }

    async fn insert(&mut self, order: &NewOrder) -> Result<i32, DomainError> {
        let new_order = NewOrderModel::from(order);
        self.run(move |conn| {
            diesel::insert_into(orders::table)
                .values(&new_order)
                .execute(conn)?;
            last_insert_id(conn)
        })
        .await
    }

    async fn update(&mut self, id: i32, changes: &OrderChanges) -> Result<usize, DomainError> {
        let changeset = OrderChangeset::from(changes);
        self.run(move |conn| {
            diesel::update(orders::table.filter(orders::id.eq(id)))
                .set(&changeset)
                .execute(conn)
        })
        .await
    }

    async fn delete(&mut self, id: i32) -> Result<usize, DomainError> {
        self.run(move |conn| diesel::delete(orders::table.filter(orders::id.eq(id))).execute(conn))
            .await
    }
}
