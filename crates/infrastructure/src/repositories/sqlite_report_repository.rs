use async_trait::async_trait;
use diesel::dsl::sum;
use diesel::prelude::*;
use domain::{DomainError, MarketSummary, OrderType, ReportRepository};

use super::sqlite_storage::SqliteSession;
use crate::database::{items, orders, users};

#[async_trait]
impl ReportRepository for SqliteSession {
    async fn market_summary(&mut self) -> Result<MarketSummary, DomainError> {
        self.run(|conn| {
            let count_orders = |conn: &mut SqliteConnection, kind: OrderType| {
                orders::table
                    .filter(orders::order_type.eq(kind.as_str()))
                    .count()
                    .get_result::<i64>(conn)
            };

            Ok(MarketSummary {
                users: users::table.count().get_result(conn)?,
                items: items::table.count().get_result(conn)?,
                orders: orders::table.count().get_result(conn)?,
                buy_orders: count_orders(conn, OrderType::Buy)?,
                sell_orders: count_orders(conn, OrderType::Sell)?,
                order_volume: orders::table
                    .select(sum(orders::price))
                    .get_result::<Option<f64>>(conn)?
                    .unwrap_or(0.0),
            })
        })
        .await
    }
}
