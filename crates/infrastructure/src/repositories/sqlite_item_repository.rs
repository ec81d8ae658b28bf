use async_trait::async_trait;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use domain::{DomainError, Item, ItemChanges, ItemFilter, ItemListing, ItemRepository, NewItem};

use super::sqlite_storage::{last_insert_id, SqliteSession};
use crate::database::{items, users};

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = items)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
struct ItemModel {
    id: i32,
    owner_id: Option<i32>,
    name: String,
    price: f64,
    description: Option<String>,
    created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = items)]
struct NewItemModel {
    owner_id: Option<i32>,
    name: String,
    price: f64,
    description: Option<String>,
    created_at: NaiveDateTime,
}

// `Some(None)` on a nullable column writes NULL; `None` skips the column.
#[derive(AsChangeset)]
#[diesel(table_name = items)]
struct ItemChangeset {
    owner_id: Option<Option<i32>>,
    name: Option<String>,
    price: Option<f64>,
    description: Option<Option<String>>,
}

type ItemRow = (ItemModel, Option<String>, Option<String>);

fn into_listing((model, owner_name, owner_surname): ItemRow) -> ItemListing {
    ItemListing {
        item: Item {
            id: model.id,
            owner_id: model.owner_id,
            name: model.name,
            price: model.price,
            description: model.description,
            created_at: model.created_at,
        },
        owner_name,
        owner_surname,
    }
}

impl From<&NewItem> for NewItemModel {
    fn from(item: &NewItem) -> Self {
        NewItemModel {
            owner_id: item.owner_id,
            name: item.name.clone(),
            price: item.price,
            description: item.description.clone(),
            created_at: chrono::Utc::now().naive_utc(),
        }
    }
}

impl From<&ItemChanges> for ItemChangeset {
    fn from(changes: &ItemChanges) -> Self {
        ItemChangeset {
            owner_id: changes.owner_id,
            name: changes.name.clone(),
            price: changes.price,
            description: changes.description.clone(),
        }
    }
}

#[async_trait]
impl ItemRepository for SqliteSession {
    async fn find_all(&mut self, filter: &ItemFilter) -> Result<Vec<ItemListing>, DomainError> {
        let filter = *filter;
        let rows = self
            .run(move |conn| {
                let mut query = items::table
                    .left_join(users::table)
                    .select((
                        ItemModel::as_select(),
                        users::name.nullable(),
                        users::surname.nullable(),
                    ))
                    .order(items::id.asc())
                    .into_boxed();
                if let Some(min) = filter.min_price {
                    query = query.filter(items::price.ge(min));
                }
                if let Some(max) = filter.max_price {
                    query = query.filter(items::price.le(max));
                }
                query.load::<ItemRow>(conn)
            })
            .await?;

        Ok(rows.into_iter().map(into_listing).collect())
    }

    async fn find_by_id(&mut self, id: i32) -> Result<Option<ItemListing>, DomainError> {
        let row = self
            .run(move |conn| {
                items::table
                    .left_join(users::table)
                    .filter(items::id.eq(id))
                    .select((
                        ItemModel::as_select(),
                        users::name.nullable(),
                        users::surname.nullable(),
                    ))
                    .first::<ItemRow>(conn)
                    .optional()
            })
            .await?;

        Ok(row.map(into_listing))
    }

    async fn exists(&mut self, id: i32) -> Result<bool, DomainError> {
        self.run(move |conn| {
            diesel::select(diesel::dsl::exists(items::table.filter(items::id.eq(id))))
                .get_result::<bool>(conn)
        })
        .await
    }

    async fn insert(&mut self, item: &NewItem) -> Result<i32, DomainError> {
        let new_item = NewItemModel::from(item);
        self.run(move |conn| {
            diesel::insert_into(items::table)
                .values(&new_item)
                .execute(conn)?;
            last_insert_id(conn)
        })
        .await
    }

    async fn update(&mut self, id: i32, changes: &ItemChanges) -> Result<usize, DomainError> {
        let changeset = ItemChangeset::from(changes);
        self.run(move |conn| {
            diesel::update(items::table.filter(items::id.eq(id)))
                .set(&changeset)
                .execute(conn)
        })
        .await
    }

    async fn delete(&mut self, id: i32) -> Result<usize, DomainError> {
        self.run(move |conn| diesel::delete(items::table.filter(items::id.eq(id))).execute(conn))
            .await
    }
}
