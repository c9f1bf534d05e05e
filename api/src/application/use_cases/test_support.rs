//! In-memory implementation of every port, mirroring the constraint
//! behaviour of the PostgreSQL schema closely enough for use-case tests.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};

use crate::application::dto::imports::{ImportKind, ImportStatus};
use crate::application::ports::account_repository::AccountRepository;
use crate::application::ports::constraint::{ConstraintKind, ConstraintViolation};
use crate::application::ports::customer_repository::CustomerRepository;
use crate::application::ports::import_history_repository::{
    ImportHistoryRepository, ImportHistoryRow,
};
use crate::application::ports::membership_repository::MembershipRepository;
use crate::application::ports::notification_repository::NotificationRepository;
use crate::application::ports::product_repository::ProductRepository;
use crate::application::ports::report_repository::ReportRepository;
use crate::application::ports::reward_repository::RewardRepository;
use crate::application::ports::transaction_repository::{
    LedgerEntry, LedgerOutcome, TransactionFilter, TransactionRepository,
};
use crate::application::use_cases::auth::password::hash_password;
use crate::domain::accounts::{Account, NewAccount, Role};
use crate::domain::customers::{Customer, CustomerPatch, NewCustomer};
use crate::domain::memberships::{Membership, NewMembership};
use crate::domain::notifications::{NewNotification, Notification};
use crate::domain::products::{NewProduct, Product};
use crate::domain::reports::{DailySales, PointsTotals, TierBucket, UNRANKED_BUCKET};
use crate::domain::rewards::{NewReward, Reward, RewardPatch};
use crate::domain::transactions::{ImportedTransaction, PAYMENT_SUCCESS, Transaction};

#[derive(Default)]
struct State {
    next_id: i64,
    owners: Vec<Account>,
    staff: Vec<Account>,
    customers: Vec<Customer>,
    products: Vec<Product>,
    memberships: Vec<NewMembership>,
    rewards: Vec<Reward>,
    notifications: Vec<Notification>,
    transactions: Vec<Transaction>,
    history: Vec<ImportHistoryRow>,
}

impl State {
    fn id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn accounts(&mut self, role: Role) -> &mut Vec<Account> {
        match role {
            Role::Owner => &mut self.owners,
            Role::Staff => &mut self.staff,
        }
    }

    fn tier_for(&self, points: i64) -> Option<String> {
        self.memberships
            .iter()
            .filter(|m| m.required_points <= points)
            .max_by_key(|m| m.required_points)
            .map(|m| m.tier.clone())
    }

    fn resync_tiers(&mut self) {
        let tiers: Vec<Option<String>> = self
            .customers
            .iter()
            .map(|c| self.tier_for(c.points))
            .collect();
        for (c, tier) in self.customers.iter_mut().zip(tiers) {
            c.tier = tier;
        }
    }

    fn membership(&self, m: &NewMembership) -> Membership {
        Membership {
            tier: m.tier.clone(),
            required_points: m.required_points,
            discount_percent: m.discount_percent,
            member_count: self
                .customers
                .iter()
                .filter(|c| c.tier.as_deref() == Some(m.tier.as_str()))
                .count() as i64,
        }
    }

    fn customer_collision(
        &self,
        phone: &str,
        email: &Option<String>,
        exclude: Option<i64>,
    ) -> Option<&'static str> {
        let others = self.customers.iter().filter(|c| Some(c.id) != exclude);
        for c in others {
            if c.phone == phone {
                return Some("customers_phone_key");
            }
            if email.is_some() && &c.email == email {
                return Some("customers_email_key");
            }
        }
        None
    }

    fn notification_with_name(&self, mut n: Notification) -> Notification {
        n.customer_name = n
            .customer_id
            .and_then(|id| self.customers.iter().find(|c| c.id == id))
            .map(|c| c.name.clone());
        n
    }
}

fn violation(kind: ConstraintKind, name: &str) -> anyhow::Error {
    anyhow::Error::new(ConstraintViolation::new(kind, Some(name)))
}

fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    pub fn seed_account(&self, role: Role, username: &str, password: &str) -> Account {
        let mut s = self.state.lock().unwrap();
        let id = s.id();
        let account = Account {
            id,
            role,
            name: username.to_string(),
            email: format!("{}@kopi.id", username),
            username: username.to_string(),
            phone: None,
            password_hash: Some(hash_password(password).unwrap()),
        };
        s.accounts(role).push(account.clone());
        account
    }

    pub fn seed_customer(&self, name: &str, phone: &str, points: i64) -> Customer {
        let mut s = self.state.lock().unwrap();
        let id = s.id();
        let customer = Customer {
            id,
            name: name.to_string(),
            email: None,
            phone: phone.to_string(),
            points,
            tier: s.tier_for(points),
            created_at: Utc::now(),
        };
        s.customers.push(customer.clone());
        customer
    }

    pub fn seed_product(&self, name: &str, exchange_points: i64, unit_price: Option<i64>) -> Product {
        let mut s = self.state.lock().unwrap();
        let id = s.id();
        let product = Product {
            id,
            name: name.to_string(),
            category: "Coffee".into(),
            notes: None,
            exchange_points,
            unit_price,
        };
        s.products.push(product.clone());
        product
    }

    pub fn seed_membership(&self, tier: &str, required_points: i64, discount_percent: f64) {
        let mut s = self.state.lock().unwrap();
        s.memberships.push(NewMembership {
            tier: tier.to_string(),
            required_points,
            discount_percent,
        });
        s.resync_tiers();
    }

    pub fn seed_reward(&self, name: &str, points_required: i64, stock: i64) -> Reward {
        let mut s = self.state.lock().unwrap();
        let id = s.id();
        let reward = Reward {
            id,
            name: name.to_string(),
            points_required,
            stock,
            claimed: 0,
        };
        s.rewards.push(reward.clone());
        reward
    }

    pub fn set_points(&self, id: i64, points: i64) {
        let mut s = self.state.lock().unwrap();
        if let Some(c) = s.customers.iter_mut().find(|c| c.id == id) {
            c.points = points;
        }
    }

    pub fn customer(&self, id: i64) -> Option<Customer> {
        let s = self.state.lock().unwrap();
        s.customers.iter().find(|c| c.id == id).cloned()
    }

    pub fn reward(&self, id: i64) -> Option<Reward> {
        let s = self.state.lock().unwrap();
        s.rewards.iter().find(|r| r.id == id).cloned()
    }

    pub fn transactions(&self) -> Vec<Transaction> {
        self.state.lock().unwrap().transactions.clone()
    }

    pub fn history(&self) -> Vec<ImportHistoryRow> {
        self.state.lock().unwrap().history.clone()
    }
}

#[async_trait]
impl AccountRepository for MemoryStore {
    async fn find_by_username(&self, role: Role, username: &str) -> anyhow::Result<Option<Account>> {
        let mut s = self.state.lock().unwrap();
        Ok(s.accounts(role).iter().find(|a| a.username == username).cloned())
    }

    async fn find_by_email(&self, role: Role, email: &str) -> anyhow::Result<Option<Account>> {
        let mut s = self.state.lock().unwrap();
        Ok(s.accounts(role)
            .iter()
            .find(|a| a.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn find_by_id(&self, role: Role, id: i64) -> anyhow::Result<Option<Account>> {
        let mut s = self.state.lock().unwrap();
        Ok(s.accounts(role).iter().find(|a| a.id == id).cloned())
    }

    async fn create(&self, role: Role, account: &NewAccount) -> anyhow::Result<Account> {
        let mut s = self.state.lock().unwrap();
        let id = s.id();
        let created = Account {
            id,
            role,
            name: account.name.clone(),
            email: account.email.clone(),
            username: account.username.clone(),
            phone: account.phone.clone(),
            password_hash: Some(account.password_hash.clone()),
        };
        s.accounts(role).push(created.clone());
        Ok(Account {
            password_hash: None,
            ..created
        })
    }

    async fn create_first_owner(&self, account: &NewAccount) -> anyhow::Result<Option<Account>> {
        let has_owner = !self.state.lock().unwrap().owners.is_empty();
        if has_owner {
            return Ok(None);
        }
        AccountRepository::create(self, Role::Owner, account)
            .await
            .map(Some)
    }

    async fn set_password(&self, role: Role, id: i64, password_hash: &str) -> anyhow::Result<bool> {
        let mut s = self.state.lock().unwrap();
        match s.accounts(role).iter_mut().find(|a| a.id == id) {
            Some(a) => {
                a.password_hash = Some(password_hash.to_string());
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl CustomerRepository for MemoryStore {
    async fn list(&self, search: Option<String>) -> anyhow::Result<Vec<Customer>> {
        let s = self.state.lock().unwrap();
        let mut out: Vec<Customer> = s
            .customers
            .iter()
            .filter(|c| match &search {
                Some(q) => {
                    contains(&c.name, q)
                        || contains(&c.phone, q)
                        || c.email.as_deref().is_some_and(|e| contains(e, q))
                }
                None => true,
            })
            .cloned()
            .collect();
        out.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(out)
    }

    async fn get(&self, id: i64) -> anyhow::Result<Option<Customer>> {
        let s = self.state.lock().unwrap();
        Ok(s.customers.iter().find(|c| c.id == id).cloned())
    }

    async fn find_by_phone(&self, phone: &str, exclude_id: Option<i64>) -> anyhow::Result<Option<Customer>> {
        let s = self.state.lock().unwrap();
        Ok(s.customers
            .iter()
            .find(|c| c.phone == phone && Some(c.id) != exclude_id)
            .cloned())
    }

    async fn create(&self, input: &NewCustomer) -> anyhow::Result<Customer> {
        let mut s = self.state.lock().unwrap();
        if let Some(name) = s.customer_collision(&input.phone, &input.email, None) {
            return Err(violation(ConstraintKind::Unique, name));
        }
        if input.points < 0 {
            return Err(violation(ConstraintKind::Check, "customers_points_check"));
        }
        let id = s.id();
        let customer = Customer {
            id,
            name: input.name.clone(),
            email: input.email.clone(),
            phone: input.phone.clone(),
            points: input.points,
            tier: s.tier_for(input.points),
            created_at: Utc::now(),
        };
        s.customers.push(customer.clone());
        Ok(customer)
    }

    async fn update(&self, id: i64, input: &CustomerPatch) -> anyhow::Result<Option<Customer>> {
        let mut s = self.state.lock().unwrap();
        let Some(stored) = s.customers.iter().find(|c| c.id == id).map(|c| c.points) else {
            return Ok(None);
        };
        if let Some(name) = s.customer_collision(&input.phone, &input.email, Some(id)) {
            return Err(violation(ConstraintKind::Unique, name));
        }
        let points = input.points.unwrap_or(stored);
        let tier = s.tier_for(points);
        let Some(c) = s.customers.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };
        c.name = input.name.clone();
        c.email = input.email.clone();
        c.phone = input.phone.clone();
        c.points = points;
        c.tier = tier;
        Ok(Some(c.clone()))
    }

    async fn count_transactions(&self, id: i64) -> anyhow::Result<i64> {
        let s = self.state.lock().unwrap();
        Ok(s.transactions
            .iter()
            .filter(|t| t.customer_id == Some(id))
            .count() as i64)
    }

    async fn delete(&self, id: i64) -> anyhow::Result<bool> {
        let mut s = self.state.lock().unwrap();
        if s.transactions.iter().any(|t| t.customer_id == Some(id)) {
            return Err(violation(ConstraintKind::ForeignKey, "transactions_customer_id_fkey"));
        }
        let before = s.customers.len();
        s.customers.retain(|c| c.id != id);
        s.notifications.retain(|n| n.customer_id != Some(id));
        Ok(s.customers.len() < before)
    }

    async fn import(&self, rows: &[NewCustomer]) -> anyhow::Result<u64> {
        let mut inserted = 0;
        for row in rows {
            match CustomerRepository::create(self, row).await {
                Ok(_) => inserted += 1,
                Err(e) if e.downcast_ref::<ConstraintViolation>().is_some() => {}
                Err(e) => return Err(e),
            }
        }
        Ok(inserted)
    }
}

#[async_trait]
impl ProductRepository for MemoryStore {
    async fn list(&self, search: Option<String>) -> anyhow::Result<Vec<Product>> {
        let s = self.state.lock().unwrap();
        let id_match = search.as_deref().and_then(|q| q.parse::<i64>().ok());
        let mut out: Vec<Product> = s
            .products
            .iter()
            .filter(|p| match &search {
                Some(q) => {
                    Some(p.id) == id_match || contains(&p.name, q) || contains(&p.category, q)
                }
                None => true,
            })
            .cloned()
            .collect();
        out.sort_by_key(|p| p.id);
        Ok(out)
    }

    async fn get(&self, id: i64) -> anyhow::Result<Option<Product>> {
        let s = self.state.lock().unwrap();
        Ok(s.products.iter().find(|p| p.id == id).cloned())
    }

    async fn create(&self, input: &NewProduct) -> anyhow::Result<Product> {
        let mut s = self.state.lock().unwrap();
        if s.products.iter().any(|p| p.name == input.name) {
            return Err(violation(ConstraintKind::Unique, "products_name_key"));
        }
        let id = s.id();
        let product = Product {
            id,
            name: input.name.clone(),
            category: input.category.clone(),
            notes: input.notes.clone(),
            exchange_points: input.exchange_points,
            unit_price: input.unit_price,
        };
        s.products.push(product.clone());
        Ok(product)
    }

    async fn update(&self, id: i64, input: &NewProduct) -> anyhow::Result<Option<Product>> {
        let mut s = self.state.lock().unwrap();
        if s.products.iter().any(|p| p.id != id && p.name == input.name) {
            return Err(violation(ConstraintKind::Unique, "products_name_key"));
        }
        let Some(p) = s.products.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        p.name = input.name.clone();
        p.category = input.category.clone();
        p.notes = input.notes.clone();
        p.exchange_points = input.exchange_points;
        p.unit_price = input.unit_price;
        Ok(Some(p.clone()))
    }

    async fn delete(&self, id: i64) -> anyhow::Result<bool> {
        let mut s = self.state.lock().unwrap();
        if s.transactions.iter().any(|t| t.product_id == Some(id)) {
            return Err(violation(ConstraintKind::ForeignKey, "transactions_product_id_fkey"));
        }
        let before = s.products.len();
        s.products.retain(|p| p.id != id);
        Ok(s.products.len() < before)
    }

    async fn import(&self, rows: &[NewProduct]) -> anyhow::Result<u64> {
        let mut inserted = 0;
        for row in rows {
            if ProductRepository::create(self, row).await.is_ok() {
                inserted += 1;
            }
        }
        Ok(inserted)
    }
}

#[async_trait]
impl MembershipRepository for MemoryStore {
    async fn list(&self, search: Option<String>) -> anyhow::Result<Vec<Membership>> {
        let s = self.state.lock().unwrap();
        let mut out: Vec<Membership> = s
            .memberships
            .iter()
            .filter(|m| search.as_deref().is_none_or(|q| contains(&m.tier, q)))
            .map(|m| s.membership(m))
            .collect();
        out.sort_by_key(|m| m.required_points);
        Ok(out)
    }

    async fn get(&self, tier: &str) -> anyhow::Result<Option<Membership>> {
        let s = self.state.lock().unwrap();
        Ok(s.memberships
            .iter()
            .find(|m| m.tier == tier)
            .map(|m| s.membership(m)))
    }

    async fn create(&self, input: &NewMembership) -> anyhow::Result<Membership> {
        let mut s = self.state.lock().unwrap();
        if s.memberships.iter().any(|m| m.tier == input.tier) {
            return Err(violation(ConstraintKind::Unique, "memberships_pkey"));
        }
        s.memberships.push(input.clone());
        s.resync_tiers();
        Ok(s.membership(input))
    }

    async fn update(
        &self,
        tier: &str,
        required_points: Option<i64>,
        discount_percent: Option<f64>,
    ) -> anyhow::Result<Option<Membership>> {
        let mut s = self.state.lock().unwrap();
        let Some(m) = s.memberships.iter_mut().find(|m| m.tier == tier) else {
            return Ok(None);
        };
        if let Some(p) = required_points {
            m.required_points = p;
        }
        if let Some(d) = discount_percent {
            m.discount_percent = d;
        }
        let updated = m.clone();
        s.resync_tiers();
        Ok(Some(s.membership(&updated)))
    }

    async fn delete(&self, tier: &str) -> anyhow::Result<bool> {
        let mut s = self.state.lock().unwrap();
        if s.customers.iter().any(|c| c.tier.as_deref() == Some(tier)) {
            return Err(violation(ConstraintKind::ForeignKey, "customers_tier_fkey"));
        }
        let before = s.memberships.len();
        s.memberships.retain(|m| m.tier != tier);
        let removed = s.memberships.len() < before;
        s.resync_tiers();
        Ok(removed)
    }

    async fn import(&self, rows: &[NewMembership]) -> anyhow::Result<u64> {
        let mut inserted = 0;
        for row in rows {
            if MembershipRepository::create(self, row).await.is_ok() {
                inserted += 1;
            }
        }
        Ok(inserted)
    }
}

#[async_trait]
impl RewardRepository for MemoryStore {
    async fn list(&self, search: Option<String>) -> anyhow::Result<Vec<Reward>> {
        let s = self.state.lock().unwrap();
        let mut out: Vec<Reward> = s
            .rewards
            .iter()
            .filter(|r| search.as_deref().is_none_or(|q| contains(&r.name, q)))
            .cloned()
            .collect();
        out.sort_by_key(|r| (r.points_required, r.id));
        Ok(out)
    }

    async fn get(&self, id: i64) -> anyhow::Result<Option<Reward>> {
        let s = self.state.lock().unwrap();
        Ok(s.rewards.iter().find(|r| r.id == id).cloned())
    }

    async fn create(&self, input: &NewReward) -> anyhow::Result<Reward> {
        let mut s = self.state.lock().unwrap();
        if s.rewards.iter().any(|r| r.name == input.name) {
            return Err(violation(ConstraintKind::Unique, "rewards_name_key"));
        }
        let id = s.id();
        let reward = Reward {
            id,
            name: input.name.clone(),
            points_required: input.points_required,
            stock: input.stock,
            claimed: 0,
        };
        s.rewards.push(reward.clone());
        Ok(reward)
    }

    async fn update(&self, id: i64, patch: &RewardPatch) -> anyhow::Result<Option<Reward>> {
        let mut s = self.state.lock().unwrap();
        if let Some(name) = &patch.name {
            if s.rewards.iter().any(|r| r.id != id && &r.name == name) {
                return Err(violation(ConstraintKind::Unique, "rewards_name_key"));
            }
        }
        let Some(r) = s.rewards.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };
        if let Some(name) = &patch.name {
            r.name = name.clone();
        }
        if let Some(p) = patch.points_required {
            r.points_required = p;
        }
        if let Some(stock) = patch.stock {
            r.stock = stock;
        }
        Ok(Some(r.clone()))
    }

    async fn delete(&self, id: i64) -> anyhow::Result<bool> {
        let mut s = self.state.lock().unwrap();
        if s.transactions.iter().any(|t| t.reward_id == Some(id)) {
            return Err(violation(ConstraintKind::ForeignKey, "transactions_reward_id_fkey"));
        }
        let before = s.rewards.len();
        s.rewards.retain(|r| r.id != id);
        Ok(s.rewards.len() < before)
    }

    async fn import(&self, rows: &[NewReward]) -> anyhow::Result<u64> {
        let mut inserted = 0;
        for row in rows {
            if RewardRepository::create(self, row).await.is_ok() {
                inserted += 1;
            }
        }
        Ok(inserted)
    }
}

#[async_trait]
impl NotificationRepository for MemoryStore {
    async fn list(&self, customer_id: Option<i64>, search: Option<String>) -> anyhow::Result<Vec<Notification>> {
        let s = self.state.lock().unwrap();
        let mut out: Vec<Notification> = s
            .notifications
            .iter()
            .filter(|n| customer_id.is_none() || n.customer_id == customer_id)
            .filter(|n| search.as_deref().is_none_or(|q| contains(&n.message, q)))
            .map(|n| s.notification_with_name(n.clone()))
            .collect();
        out.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(out)
    }

    async fn get(&self, id: i64) -> anyhow::Result<Option<Notification>> {
        let s = self.state.lock().unwrap();
        Ok(s.notifications
            .iter()
            .find(|n| n.id == id)
            .map(|n| s.notification_with_name(n.clone())))
    }

    async fn create(&self, input: &NewNotification) -> anyhow::Result<Notification> {
        let mut s = self.state.lock().unwrap();
        if let Some(cid) = input.customer_id {
            if !s.customers.iter().any(|c| c.id == cid) {
                return Err(violation(ConstraintKind::ForeignKey, "notifications_customer_id_fkey"));
            }
        }
        let id = s.id();
        let n = Notification {
            id,
            message: input.message.clone(),
            customer_id: input.customer_id,
            customer_name: None,
            created_at: Utc::now(),
        };
        s.notifications.push(n.clone());
        Ok(s.notification_with_name(n))
    }

    async fn update(
        &self,
        id: i64,
        message: Option<String>,
        customer_id: Option<Option<i64>>,
    ) -> anyhow::Result<Option<Notification>> {
        let mut s = self.state.lock().unwrap();
        if let Some(Some(cid)) = customer_id {
            if !s.customers.iter().any(|c| c.id == cid) {
                return Err(violation(ConstraintKind::ForeignKey, "notifications_customer_id_fkey"));
            }
        }
        let Some(n) = s.notifications.iter_mut().find(|n| n.id == id) else {
            return Ok(None);
        };
        if let Some(m) = message {
            n.message = m;
        }
        if let Some(c) = customer_id {
            n.customer_id = c;
        }
        let n = n.clone();
        Ok(Some(s.notification_with_name(n)))
    }

    async fn delete(&self, id: i64) -> anyhow::Result<bool> {
        let mut s = self.state.lock().unwrap();
        let before = s.notifications.len();
        s.notifications.retain(|n| n.id != id);
        Ok(s.notifications.len() < before)
    }

    async fn import(&self, rows: &[NewNotification]) -> anyhow::Result<u64> {
        let mut inserted = 0;
        for row in rows {
            if NotificationRepository::create(self, row).await.is_ok() {
                inserted += 1;
            }
        }
        Ok(inserted)
    }
}

#[async_trait]
impl TransactionRepository for MemoryStore {
    async fn apply(&self, entry: &LedgerEntry) -> anyhow::Result<LedgerOutcome> {
        let mut s = self.state.lock().unwrap();
        let Some(available) = s
            .customers
            .iter()
            .find(|c| c.id == entry.customer_id)
            .map(|c| c.points)
        else {
            return Ok(LedgerOutcome::CustomerNotFound);
        };
        if let Some(reward_id) = entry.reward_id {
            let Some(reward) = s.rewards.iter().find(|r| r.id == reward_id) else {
                return Ok(LedgerOutcome::RewardNotFound);
            };
            if reward.stock < entry.quantity {
                return Ok(LedgerOutcome::OutOfStock {
                    available: reward.stock,
                });
            }
        }
        let Some(new_balance) = available.checked_add(entry.points_delta) else {
            return Ok(LedgerOutcome::BalanceOverflow);
        };
        if new_balance < 0 {
            return Ok(LedgerOutcome::InsufficientPoints {
                required: -entry.points_delta,
                available,
            });
        }

        let id = s.id();
        let transaction = Transaction {
            id,
            customer_id: Some(entry.customer_id),
            product_id: entry.product_id,
            reward_id: entry.reward_id,
            product_name: entry.product_name.clone(),
            quantity: entry.quantity,
            total_price: entry.total_price,
            payment_method: entry.payment_method.clone(),
            payment_status: PAYMENT_SUCCESS.into(),
            points_delta: entry.points_delta,
            occurred_at: Utc::now(),
        };
        s.transactions.push(transaction.clone());
        let tier = s.tier_for(new_balance);
        if let Some(c) = s.customers.iter_mut().find(|c| c.id == entry.customer_id) {
            c.points = new_balance;
            c.tier = tier.clone();
        }
        if let Some(reward_id) = entry.reward_id {
            if let Some(r) = s.rewards.iter_mut().find(|r| r.id == reward_id) {
                r.stock -= entry.quantity;
                r.claimed += entry.quantity;
            }
        }
        Ok(LedgerOutcome::Recorded {
            transaction,
            new_balance,
            tier,
        })
    }

    async fn list(&self, filter: &TransactionFilter) -> anyhow::Result<Vec<Transaction>> {
        let s = self.state.lock().unwrap();
        let mut out: Vec<Transaction> = s
            .transactions
            .iter()
            .filter(|t| filter.customer_id.is_none() || t.customer_id == filter.customer_id)
            .filter(|t| filter.start.is_none_or(|d| t.occurred_at.date_naive() >= d))
            .filter(|t| filter.end.is_none_or(|d| t.occurred_at.date_naive() <= d))
            .cloned()
            .collect();
        out.sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at).then(b.id.cmp(&a.id)));
        out.truncate(filter.limit.max(0) as usize);
        Ok(out)
    }

    async fn import(&self, rows: &[ImportedTransaction]) -> anyhow::Result<u64> {
        let mut s = self.state.lock().unwrap();
        for row in rows {
            let id = s.id();
            s.transactions.push(Transaction {
                id,
                customer_id: None,
                product_id: None,
                reward_id: None,
                product_name: row.product_name.clone(),
                quantity: row.quantity,
                total_price: row.total_price,
                payment_method: row.payment_method.clone(),
                payment_status: PAYMENT_SUCCESS.into(),
                points_delta: 0,
                occurred_at: row.occurred_at,
            });
        }
        Ok(rows.len() as u64)
    }
}

#[async_trait]
impl ImportHistoryRepository for MemoryStore {
    async fn record(
        &self,
        kind: ImportKind,
        row_count: u64,
        status: ImportStatus,
        source: &str,
    ) -> anyhow::Result<()> {
        let mut s = self.state.lock().unwrap();
        let id = s.id();
        s.history.push(ImportHistoryRow {
            id,
            kind: kind.as_str().into(),
            row_count: row_count as i64,
            status: status.as_str().into(),
            source: source.into(),
            created_at: Utc::now(),
        });
        Ok(())
    }

    async fn list_recent(&self, limit: i64) -> anyhow::Result<Vec<ImportHistoryRow>> {
        let s = self.state.lock().unwrap();
        Ok(s.history
            .iter()
            .rev()
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ReportRepository for MemoryStore {
    async fn daily_sales(&self, start: NaiveDate, end: NaiveDate) -> anyhow::Result<Vec<DailySales>> {
        let s = self.state.lock().unwrap();
        let mut days: Vec<DailySales> = Vec::new();
        for t in &s.transactions {
            let day = t.occurred_at.date_naive();
            if day < start || day > end {
                continue;
            }
            match days.iter_mut().find(|d| d.day == day) {
                Some(d) => {
                    d.revenue += t.total_price;
                    d.transactions += 1;
                }
                None => days.push(DailySales {
                    day,
                    revenue: t.total_price,
                    transactions: 1,
                }),
            }
        }
        days.sort_by_key(|d| d.day);
        Ok(days)
    }

    async fn points_totals(&self, start: NaiveDate, end: NaiveDate) -> anyhow::Result<PointsTotals> {
        let s = self.state.lock().unwrap();
        let mut totals = PointsTotals::default();
        for t in &s.transactions {
            let day = t.occurred_at.date_naive();
            if day < start || day > end {
                continue;
            }
            if t.points_delta > 0 {
                totals.earned += t.points_delta;
            } else {
                totals.redeemed -= t.points_delta;
            }
        }
        Ok(totals)
    }

    async fn customer_count(&self) -> anyhow::Result<i64> {
        Ok(self.state.lock().unwrap().customers.len() as i64)
    }

    async fn tier_distribution(&self) -> anyhow::Result<Vec<TierBucket>> {
        let s = self.state.lock().unwrap();
        let mut tiers = s.memberships.clone();
        tiers.sort_by_key(|m| m.required_points);
        let mut out: Vec<TierBucket> = tiers
            .iter()
            .map(|m| TierBucket {
                tier: m.tier.clone(),
                customers: s.membership(m).member_count,
            })
            .collect();
        out.push(TierBucket {
            tier: UNRANKED_BUCKET.into(),
            customers: s.customers.iter().filter(|c| c.tier.is_none()).count() as i64,
        });
        Ok(out)
    }
}
