//! Boundary between raw request descriptors and typed commands.
//!
//! Resolution happens in two steps. [`Route::resolve`] maps the
//! `(method, resource, id)` triple without looking at the body, so routing
//! errors never need storage. [`Command::build`] then validates the body
//! and query for the resolved route and hashes credentials, so a command is
//! ready to be written before any connection is taken.

pub mod fields;
pub mod item;
pub mod order;
pub mod user;

pub use fields::Body;
pub use user::{CreateUser, UserField, UserPatch, NATIONAL_ID_LEN};

use crate::entities::{ItemChanges, ItemFilter, NewItem, NewOrder, NewUser, OrderChanges, UserChanges};
use crate::errors::DomainError;
use crate::services::CredentialHasher;
use std::collections::BTreeMap;

/// Decoded query-string parameters.
pub type Query = BTreeMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn parse(method: &str) -> Option<Self> {
        match method.to_ascii_uppercase().as_str() {
            "GET" => Some(Method::Get),
            "POST" => Some(Method::Post),
            "PUT" => Some(Method::Put),
            "PATCH" => Some(Method::Patch),
            "DELETE" => Some(Method::Delete),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Users,
    Items,
    Orders,
    Stats,
}

impl Resource {
    pub const SUPPORTED: &'static str = "user, item, orders, stats";

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "user" | "users" => Some(Resource::Users),
            "item" | "items" => Some(Resource::Items),
            "order" | "orders" => Some(Resource::Orders),
            "stats" => Some(Resource::Stats),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Resource::Users => "user",
            Resource::Items => "item",
            Resource::Orders => "orders",
            Resource::Stats => "stats",
        }
    }

    /// Entity name used in human-readable messages.
    pub fn entity(&self) -> &'static str {
        match self {
            Resource::Users => "User",
            Resource::Items => "Item",
            Resource::Orders => "Order",
            Resource::Stats => "Stats",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    List,
    Get(i32),
    Create,
    Update(i32),
    Delete(i32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub resource: Resource,
    pub action: Action,
}

impl Route {
    pub fn resolve(method: &str, resource: &str, id: Option<&str>) -> Result<Self, DomainError> {
        let resource_kind =
            Resource::parse(resource).ok_or_else(|| DomainError::UnknownResource {
                resource: resource.to_string(),
                supported: Resource::SUPPORTED.to_string(),
            })?;

        let not_allowed = || DomainError::MethodNotAllowed {
            method: method.to_string(),
            resource: resource_kind.label().to_string(),
        };

        let method = Method::parse(method).ok_or_else(not_allowed)?;
        let id = id.filter(|raw| !raw.is_empty()).map(parse_id).transpose()?;

        let action = match (resource_kind, method, id) {
            (Resource::Stats, Method::Get, None) => Action::List,
            (Resource::Stats, _, _) => return Err(not_allowed()),
            (_, Method::Get, None) => Action::List,
            (_, Method::Get, Some(id)) => Action::Get(id),
            (_, Method::Post, None) => Action::Create,
            (_, Method::Post, Some(_)) => return Err(not_allowed()),
            (_, Method::Put | Method::Patch, Some(id)) => Action::Update(id),
            (_, Method::Delete, Some(id)) => Action::Delete(id),
            (_, Method::Put | Method::Patch | Method::Delete, None) => {
                return Err(DomainError::validation(format!(
                    "Missing {} id",
                    resource_kind.entity()
                )))
            }
        };

        Ok(Self {
            resource: resource_kind,
            action,
        })
    }
}

fn parse_id(raw: &str) -> Result<i32, DomainError> {
    raw.parse::<i32>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| DomainError::validation("Invalid id"))
}

/// A fully validated operation, one variant per resource-operation pair.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    ListUsers,
    GetUser(i32),
    CreateUser(NewUser),
    UpdateUser(i32, UserChanges),
    DeleteUser(i32),
    ListItems(ItemFilter),
    GetItem(i32),
    CreateItem(NewItem),
    UpdateItem(i32, ItemChanges),
    DeleteItem(i32),
    ListOrders,
    GetOrder(i32),
    CreateOrder(NewOrder),
    UpdateOrder(i32, OrderChanges),
    DeleteOrder(i32),
    MarketSummary,
}

impl Command {
    pub async fn build(
        route: Route,
        body: &Body,
        query: &Query,
        hasher: &dyn CredentialHasher,
    ) -> Result<Self, DomainError> {
        let command = match (route.resource, route.action) {
            (Resource::Stats, _) => Command::MarketSummary,

            (Resource::Users, Action::List) => Command::ListUsers,
            (Resource::Users, Action::Get(id)) => Command::GetUser(id),
            (Resource::Users, Action::Create) => {
                let request = CreateUser::from_body(body)?;
                Command::CreateUser(request.into_new_user(hasher).await?)
            }
            (Resource::Users, Action::Update(id)) => {
                let patch = UserPatch::from_body(body)?;
                if patch.is_empty() {
                    return Err(no_valid_fields());
                }
                Command::UpdateUser(id, patch.into_changes(hasher).await?)
            }
            (Resource::Users, Action::Delete(id)) => Command::DeleteUser(id),

            (Resource::Items, Action::List) => Command::ListItems(item::item_filter(query)?),
            (Resource::Items, Action::Get(id)) => Command::GetItem(id),
            (Resource::Items, Action::Create) => Command::CreateItem(item::new_item(body)?),
            (Resource::Items, Action::Update(id)) => {
                let changes = item::item_changes(body)?;
                if changes.is_empty() {
                    return Err(no_valid_fields());
                }
                Command::UpdateItem(id, changes)
            }
            (Resource::Items, Action::Delete(id)) => Command::DeleteItem(id),

            (Resource::Orders, Action::List) => Command::ListOrders,
            (Resource::Orders, Action::Get(id)) => Command::GetOrder(id),
            (Resource::Orders, Action::Create) => Command::CreateOrder(order::new_order(body)?),
            (Resource::Orders, Action::Update(id)) => {
                let changes = order::order_changes(body)?;
                if changes.is_empty() {
                    return Err(no_valid_fields());
                }
                Command::UpdateOrder(id, changes)
            }
            (Resource::Orders, Action::Delete(id)) => Command::DeleteOrder(id),
        };
        Ok(command)
    }
}

fn no_valid_fields() -> DomainError {
    DomainError::validation("No valid fields to update")
}
