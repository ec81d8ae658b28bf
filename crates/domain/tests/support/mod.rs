//! In-memory storage double mirroring the SQLite adapter's contract:
//! unique user columns, `ON DELETE SET NULL` references and affected-row
//! counts.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use domain::*;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    items: Vec<Item>,
    orders: Vec<Order>,
    next_id: i32,
}

impl Tables {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Clone, Default)]
pub struct MemoryStorage {
    tables: Arc<Mutex<Tables>>,
    unavailable: Arc<AtomicBool>,
    open_sessions: Arc<AtomicUsize>,
    acquired: Arc<AtomicUsize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn open_sessions(&self) -> usize {
        self.open_sessions.load(Ordering::SeqCst)
    }

    pub fn acquired(&self) -> usize {
        self.acquired.load(Ordering::SeqCst)
    }

    pub fn user_count(&self) -> usize {
        self.tables.lock().unwrap().users.len()
    }

    pub fn item_count(&self) -> usize {
        self.tables.lock().unwrap().items.len()
    }

    pub fn order_count(&self) -> usize {
        self.tables.lock().unwrap().orders.len()
    }

    pub fn stored_user(&self, id: i32) -> Option<User> {
        let tables = self.tables.lock().unwrap();
        tables.users.iter().find(|u| u.id == id).cloned()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn acquire(&self) -> Result<Box<dyn StorageSession>, DomainError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DomainError::StorageUnavailable("connection refused".into()));
        }
        self.acquired.fetch_add(1, Ordering::SeqCst);
        self.open_sessions.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MemorySession {
            tables: self.tables.clone(),
            open_sessions: self.open_sessions.clone(),
        }))
    }
}

struct MemorySession {
    tables: Arc<Mutex<Tables>>,
    open_sessions: Arc<AtomicUsize>,
}

impl Drop for MemorySession {
    fn drop(&mut self) {
        self.open_sessions.fetch_sub(1, Ordering::SeqCst);
    }
}

impl StorageSession for MemorySession {
    fn users(&mut self) -> &mut dyn UserRepository {
        self
    }

    fn items(&mut self) -> &mut dyn ItemRepository {
        self
    }

    fn orders(&mut self) -> &mut dyn OrderRepository {
        self
    }

    fn reports(&mut self) -> &mut dyn ReportRepository {
        self
    }
}

fn check_unique(users: &[User], skip: Option<i32>, username: &str, email: &str, national_id: &str) -> Result<(), DomainError> {
    for user in users.iter().filter(|u| Some(u.id) != skip) {
        let column = if user.username == username {
            "UserName"
        } else if user.email == email {
            "email"
        } else if user.national_id == national_id {
            "NationalID"
        } else {
            continue;
        };
        return Err(DomainError::Conflict(format!(
            "A user with this {column} already exists"
        )));
    }
    Ok(())
}

#[async_trait]
impl UserRepository for MemorySession {
    async fn find_all(&mut self) -> Result<Vec<User>, DomainError> {
        Ok(self.tables.lock().unwrap().users.clone())
    }

    async fn find_by_id(&mut self, id: i32) -> Result<Option<User>, DomainError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn exists(&mut self, id: i32) -> Result<bool, DomainError> {
        Ok(self.tables.lock().unwrap().users.iter().any(|u| u.id == id))
    }

    async fn insert(&mut self, user: &NewUser) -> Result<i32, DomainError> {
        let mut tables = self.tables.lock().unwrap();
        check_unique(&tables.users, None, &user.username, &user.email, &user.national_id)?;
        let id = tables.next_id();
        tables.users.push(User {
            id,
            name: user.name.clone(),
            surname: user.surname.clone(),
            username: user.username.clone(),
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            national_id: user.national_id.clone(),
            created_at: Utc::now().naive_utc(),
        });
        Ok(id)
    }

    async fn update(&mut self, id: i32, changes: &UserChanges) -> Result<usize, DomainError> {
        let mut tables = self.tables.lock().unwrap();
        let Some(current) = tables.users.iter().find(|u| u.id == id).cloned() else {
            return Ok(0);
        };
        let mut next = current;
        if let Some(v) = &changes.name {
            next.name = v.clone();
        }
        if let Some(v) = &changes.surname {
            next.surname = v.clone();
        }
        if let Some(v) = &changes.username {
            next.username = v.clone();
        }
        if let Some(v) = &changes.email {
            next.email = v.clone();
        }
        if let Some(v) = &changes.password_hash {
            next.password_hash = v.clone();
        }
        if let Some(v) = &changes.national_id {
            next.national_id = v.clone();
        }
        check_unique(&tables.users, Some(id), &next.username, &next.email, &next.national_id)?;
        if let Some(slot) = tables.users.iter_mut().find(|u| u.id == id) {
            *slot = next;
        }
        Ok(1)
    }

    async fn delete(&mut self, id: i32) -> Result<usize, DomainError> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.users.len();
        tables.users.retain(|u| u.id != id);
        let affected = before - tables.users.len();
        for item in tables.items.iter_mut().filter(|i| i.owner_id == Some(id)) {
            item.owner_id = None;
        }
        Ok(affected)
    }
}

fn item_listing(tables: &Tables, item: &Item) -> ItemListing {
    let owner = item
        .owner_id
        .and_then(|owner| tables.users.iter().find(|u| u.id == owner));
    ItemListing {
        item: item.clone(),
        owner_name: owner.map(|u| u.name.clone()),
        owner_surname: owner.map(|u| u.surname.clone()),
    }
}

#[async_trait]
impl ItemRepository for MemorySession {
    async fn find_all(&mut self, filter: &ItemFilter) -> Result<Vec<ItemListing>, DomainError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .items
            .iter()
            .filter(|i| filter.matches(i.price))
            .map(|i| item_listing(&tables, i))
            .collect())
    }

    async fn find_by_id(&mut self, id: i32) -> Result<Option<ItemListing>, DomainError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .items
            .iter()
            .find(|i| i.id == id)
            .map(|i| item_listing(&tables, i)))
    }

    async fn exists(&mut self, id: i32) -> Result<bool, DomainError> {
        Ok(self.tables.lock().unwrap().items.iter().any(|i| i.id == id))
    }

    async fn insert(&mut self, item: &NewItem) -> Result<i32, DomainError> {
        let mut tables = self.tables.lock().unwrap();
        let id = tables.next_id();
        tables.items.push(Item {
            id,
            owner_id: item.owner_id,
            name: item.name.clone(),
            price: item.price,
            description: item.description.clone(),
            created_at: Utc::now().naive_utc(),
        });
        Ok(id)
    }

    async fn update(&mut self, id: i32, changes: &ItemChanges) -> Result<usize, DomainError> {
        let mut tables = self.tables.lock().unwrap();
        let Some(item) = tables.items.iter_mut().find(|i| i.id == id) else {
            return Ok(0);
        };
        if let Some(owner_id) = changes.owner_id {
            item.owner_id = owner_id;
        }
        if let Some(name) = &changes.name {
            item.name = name.clone();
        }
        if let Some(price) = changes.price {
            item.price = price;
        }
        if let Some(description) = &changes.description {
            item.description = description.clone();
        }
        Ok(1)
    }

    async fn delete(&mut self, id: i32) -> Result<usize, DomainError> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.items.len();
        tables.items.retain(|i| i.id != id);
        let affected = before - tables.items.len();
        for order in tables.orders.iter_mut().filter(|o| o.item_id == Some(id)) {
            order.item_id = None;
        }
        Ok(affected)
    }
}

fn order_listing(tables: &Tables, order: &Order) -> OrderListing {
    OrderListing {
        order: order.clone(),
        item_name: order
            .item_id
            .and_then(|item| tables.items.iter().find(|i| i.id == item))
            .map(|i| i.name.clone()),
    }
}

#[async_trait]
impl OrderRepository for MemorySession {
    async fn find_all(&mut self) -> Result<Vec<OrderListing>, DomainError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.orders.iter().map(|o| order_listing(&tables, o)).collect())
    }

    async fn find_by_id(&mut self, id: i32) -> Result<Option<OrderListing>, DomainError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .orders
            .iter()
            .find(|o| o.id == id)
            .map(|o| order_listing(&tables, o)))
    }

    async fn insert(&mut self, order: &NewOrder) -> Result<i32, DomainError> {
        let mut tables = self.tables.lock().unwrap();
        let id = tables.next_id();
        tables.orders.push(Order {
            id,
            item_id: Some(order.item_id),
            order_type: order.order_type,
            price: order.price,
            crypto: order.crypto,
            wallet: order.wallet.clone(),
            created_at: Utc::now().naive_utc(),
        });
        Ok(id)
    }

    async fn update(&mut self, id: i32, changes: &OrderChanges) -> Result<usize, DomainError> {
        let mut tables = self.tables.lock().unwrap();
        let Some(order) = tables.orders.iter_mut().find(|o| o.id == id) else {
            return Ok(0);
        };
        if let Some(item_id) = changes.item_id {
            order.item_id = Some(item_id);
        }
        if let Some(order_type) = changes.order_type {
            order.order_type = order_type;
        }
        if let Some(price) = changes.price {
            order.price = price;
        }
        if let Some(crypto) = changes.crypto {
            order.crypto = crypto;
        }
        if let Some(wallet) = &changes.wallet {
            order.wallet = wallet.clone();
        }
        Ok(1)
    }

    async fn delete(&mut self, id: i32) -> Result<usize, DomainError> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.orders.len();
        tables.orders.retain(|o| o.id != id);
        Ok(before - tables.orders.len())
    }
}

#[async_trait]
impl ReportRepository for MemorySession {
    async fn market_summary(&mut self) -> Result<MarketSummary, DomainError> {
        let tables = self.tables.lock().unwrap();
        let count = |t: OrderType| tables.orders.iter().filter(|o| o.order_type == t).count() as i64;
        Ok(MarketSummary {
            users: tables.users.len() as i64,
            items: tables.items.len() as i64,
            orders: tables.orders.len() as i64,
            buy_orders: count(OrderType::Buy),
            sell_orders: count(OrderType::Sell),
            order_volume: tables.orders.iter().map(|o| o.price).sum(),
        })
    }
}

pub struct PrefixHasher;

#[async_trait]
impl CredentialHasher for PrefixHasher {
    async fn hash(&self, plaintext: &str) -> Result<String, DomainError> {
        Ok(format!("hashed:{plaintext}"))
    }
}

/// Records how many sessions were open each time a password was hashed.
pub struct SessionAwareHasher {
    storage: MemoryStorage,
    open_while_hashing: Mutex<Vec<usize>>,
}

impl SessionAwareHasher {
    pub fn new(storage: &MemoryStorage) -> Self {
        Self {
            storage: storage.clone(),
            open_while_hashing: Mutex::new(Vec::new()),
        }
    }

    pub fn observed(&self) -> Vec<usize> {
        self.open_while_hashing.lock().unwrap().clone()
    }
}

#[async_trait]
impl CredentialHasher for SessionAwareHasher {
    async fn hash(&self, plaintext: &str) -> Result<String, DomainError> {
        self.open_while_hashing
            .lock()
            .unwrap()
            .push(self.storage.open_sessions());
        Ok(format!("hashed:{plaintext}"))
    }
}

pub fn dispatcher(storage: &MemoryStorage) -> ResourceDispatcher {
    ResourceDispatcher::new(Arc::new(storage.clone()), Arc::new(PrefixHasher))
}
