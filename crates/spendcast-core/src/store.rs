//! Read interface to the transaction store
//!
//! The forecasting core never writes to the store. `Database` is the SQLite
//! implementation; `MemoryStore` holds everything in memory for callers that
//! already have their ledger loaded.

use crate::error::Result;
use crate::models::{TransactionRecord, UserProfile};

/// Read-only access to users, categories, and categorized transactions
pub trait TransactionStore {
    /// All transactions for a user, with category names resolved
    fn list_user_transactions(&self, user_id: i64) -> Result<Vec<TransactionRecord>>;

    /// The user's profile, or `None` if no such user exists
    fn get_user(&self, user_id: i64) -> Result<Option<UserProfile>>;

    /// Every known category name, in store order
    fn list_category_names(&self) -> Result<Vec<String>>;
}

impl<T: TransactionStore + ?Sized> TransactionStore for &T {
    fn list_user_transactions(&self, user_id: i64) -> Result<Vec<TransactionRecord>> {
        (**self).list_user_transactions(user_id)
    }

    fn get_user(&self, user_id: i64) -> Result<Option<UserProfile>> {
        (**self).get_user(user_id)
    }

    fn list_category_names(&self) -> Result<Vec<String>> {
        (**self).list_category_names()
    }
}

/// In-memory transaction store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    users: Vec<UserProfile>,
    categories: Vec<String>,
    transactions: Vec<TransactionRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_categories<I, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            categories: categories.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Add or replace a user profile
    pub fn add_user(&mut self, user: UserProfile) {
        self.users.retain(|u| u.id != user.id);
        self.users.push(user);
    }

    /// Add a transaction, registering its category if unseen
    pub fn add_transaction(&mut self, record: TransactionRecord) {
        if !self.categories.contains(&record.category) {
            self.categories.push(record.category.clone());
        }
        self.transactions.push(record);
    }
}

impl TransactionStore for MemoryStore {
    fn list_user_transactions(&self, user_id: i64) -> Result<Vec<TransactionRecord>> {
        Ok(self
            .transactions
            .iter()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect())
    }

    fn get_user(&self, user_id: i64) -> Result<Option<UserProfile>> {
        Ok(self.users.iter().find(|u| u.id == user_id).cloned())
    }

    fn list_category_names(&self) -> Result<Vec<String>> {
        Ok(self.categories.clone())
    }
}
