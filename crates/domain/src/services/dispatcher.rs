use crate::errors::DomainError;
use crate::repositories::{Storage, StorageSession};
use crate::requests::{Action, Body, Command, Query, Route};
use crate::services::CredentialHasher;
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, error, info};

/// Request body as received from the transport.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(Value),
    /// The transport could not parse the body; carries the parser's reason.
    Malformed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DispatchRequest {
    pub method: String,
    pub resource: String,
    pub id: Option<String>,
    pub query: Query,
    pub body: RequestBody,
}

impl DispatchRequest {
    pub fn new(method: impl Into<String>, resource: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            resource: resource.into(),
            id: None,
            query: Query::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn with_id(mut self, id: impl ToString) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    pub fn with_json(mut self, body: Value) -> Self {
        self.body = RequestBody::Json(body);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DispatchResponse {
    pub status: u16,
    pub body: Value,
}

impl DispatchResponse {
    pub fn error(err: &DomainError) -> Self {
        Self {
            status: err.status_code(),
            body: json!({ "error": err.to_string() }),
        }
    }

    fn json<T: Serialize>(status: u16, body: &T) -> Result<Self, DomainError> {
        let body = serde_json::to_value(body).map_err(|e| DomainError::Repository(e.to_string()))?;
        Ok(Self { status, body })
    }

    fn ok<T: Serialize>(body: &T) -> Result<Self, DomainError> {
        Self::json(200, body)
    }

    fn message(text: &str) -> Self {
        Self {
            status: 200,
            body: json!({ "message": text }),
        }
    }
}

/// Resource Dispatcher - maps a request descriptor onto storage calls
/// and turns every outcome into a terminal response.
pub struct ResourceDispatcher {
    storage: Arc<dyn Storage>,
    hasher: Arc<dyn CredentialHasher>,
}

impl ResourceDispatcher {
    pub fn new(storage: Arc<dyn Storage>, hasher: Arc<dyn CredentialHasher>) -> Self {
        Self { storage, hasher }
    }

    pub async fn dispatch(&self, request: DispatchRequest) -> DispatchResponse {
        match self.handle(&request).await {
            Ok(response) => response,
            Err(err) => {
                if err.status_code() >= 500 {
                    error!(method = %request.method, resource = %request.resource, "request failed: {}", err);
                } else {
                    debug!(method = %request.method, resource = %request.resource, "request rejected: {}", err);
                }
                DispatchResponse::error(&err)
            }
        }
    }

    async fn handle(&self, request: &DispatchRequest) -> Result<DispatchResponse, DomainError> {
        let route = Route::resolve(&request.method, &request.resource, request.id.as_deref())?;

        let body = match route.action {
            Action::Create | Action::Update(_) => body_map(&request.body)?,
            _ => Body::new(),
        };
        let command =
            Command::build(route, &body, &request.query, self.hasher.as_ref()).await?;

        // Held until this function returns; dropping it releases the connection.
        let mut session = self.storage.acquire().await?;
        self.execute(session.as_mut(), command).await
    }

    async fn execute(
        &self,
        session: &mut dyn StorageSession,
        command: Command,
    ) -> Result<DispatchResponse, DomainError> {
        match command {
            Command::ListUsers => DispatchResponse::ok(&session.users().find_all().await?),
            Command::GetUser(id) => match session.users().find_by_id(id).await? {
                Some(user) => DispatchResponse::ok(&user),
                None => Err(DomainError::not_found("User not found")),
            },
            Command::CreateUser(new_user) => {
                let id = session.users().insert(&new_user).await?;
                info!("created user {} ({})", id, new_user.username);
                DispatchResponse::json(201, &json!({ "message": "User created", "UID": id }))
            }
            Command::UpdateUser(id, changes) => {
                let affected = session.users().update(id, &changes).await?;
                written(affected, "User", "User updated", id)
            }
            Command::DeleteUser(id) => {
                let affected = session.users().delete(id).await?;
                written(affected, "User", "User deleted", id)
            }

            Command::ListItems(filter) => {
                DispatchResponse::ok(&session.items().find_all(&filter).await?)
            }
            Command::GetItem(id) => match session.items().find_by_id(id).await? {
                Some(item) => DispatchResponse::ok(&item),
                None => Err(DomainError::not_found("Item not found")),
            },
            Command::CreateItem(new_item) => {
                if let Some(owner_id) = new_item.owner_id {
                    ensure_user_exists(session, owner_id).await?;
                }
                let id = session.items().insert(&new_item).await?;
                info!("created item {} ({})", id, new_item.name);
                DispatchResponse::json(201, &json!({ "message": "Item created", "IID": id }))
            }
            Command::UpdateItem(id, changes) => {
                if let Some(Some(owner_id)) = changes.owner_id {
                    ensure_user_exists(session, owner_id).await?;
                }
                let affected = session.items().update(id, &changes).await?;
                written(affected, "Item", "Item updated", id)
            }
            Command::DeleteItem(id) => {
                let affected = session.items().delete(id).await?;
                written(affected, "Item", "Item deleted", id)
            }

            Command::ListOrders => DispatchResponse::ok(&session.orders().find_all().await?),
            Command::GetOrder(id) => match session.orders().find_by_id(id).await? {
                Some(order) => DispatchResponse::ok(&order),
                None => Err(DomainError::not_found("Order not found")),
            },
            Command::CreateOrder(new_order) => {
                ensure_item_exists(session, new_order.item_id).await?;
                let id = session.orders().insert(&new_order).await?;
                info!("created {} order {} for item {}", new_order.order_type, id, new_order.item_id);
                DispatchResponse::json(201, &json!({ "message": "Order created", "id": id }))
            }
            Command::UpdateOrder(id, changes) => {
                if let Some(item_id) = changes.item_id {
                    ensure_item_exists(session, item_id).await?;
                }
                let affected = session.orders().update(id, &changes).await?;
                written(affected, "Order", "Order updated", id)
            }
            Command::DeleteOrder(id) => {
                let affected = session.orders().delete(id).await?;
                written(affected, "Order", "Order deleted", id)
            }

            Command::MarketSummary => DispatchResponse::ok(&session.reports().market_summary().await?),
        }
    }
}

fn body_map(body: &RequestBody) -> Result<Body, DomainError> {
    match body {
        RequestBody::Empty | RequestBody::Json(Value::Null) => Ok(Body::new()),
        RequestBody::Json(Value::Object(map)) => Ok(map.clone()),
        RequestBody::Json(_) => Err(DomainError::validation(
            "Request body must be a JSON object",
        )),
        RequestBody::Malformed(reason) => Err(DomainError::validation(format!(
            "Invalid JSON body: {reason}"
        ))),
    }
}

// Zero affected rows is reported as missing whether or not the id existed.
fn written(affected: usize, entity: &str, message: &str, id: i32) -> Result<DispatchResponse, DomainError> {
    if affected == 0 {
        return Err(DomainError::not_found(format!("{entity} not found")));
    }
    info!("{} {}", message.to_lowercase(), id);
    Ok(DispatchResponse::message(message))
}

// Check-then-insert is not atomic; a concurrent delete surfaces as a
// foreign-key violation from storage instead.
async fn ensure_user_exists(session: &mut dyn StorageSession, id: i32) -> Result<(), DomainError> {
    if session.users().exists(id).await? {
        Ok(())
    } else {
        Err(DomainError::not_found("User (UID) not found"))
    }
}

async fn ensure_item_exists(session: &mut dyn StorageSession, id: i32) -> Result<(), DomainError> {
    if session.items().exists(id).await? {
        Ok(())
    } else {
        Err(DomainError::not_found("Item (item_id) not found"))
    }
}
