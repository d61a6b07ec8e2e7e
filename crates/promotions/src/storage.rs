//! Key-value storage port.
//!
//! The browser storefront persisted cart state and popup flags straight into
//! `localStorage`. This port makes that an explicit collaborator: callers get
//! and set string values by key, and tests run against [`MemoryStorage`]
//! without a browser environment.

use std::collections::HashMap;
use std::sync::Mutex;

use thiserror::Error;

/// Storage backend failures.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend rejected or failed the operation.
    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Get/set/remove string values by key.
pub trait StoragePort {
    /// Read a value, `None` when the key is absent.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the backend fails.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write a value, replacing any existing one.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the backend fails.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove a key; removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the backend fails.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Well-known storage keys, matching what the browser storefront wrote.
pub mod keys {
    /// Serialized cart line items.
    pub const CART: &str = "foltz_cart";
    /// Black Friday popup dismissed flag.
    pub const BLACK_FRIDAY_POPUP_SEEN: &str = "blackFridayPopupSeen";
    /// Combo 3x popup dismissed flag.
    pub const COMBO_POPUP_SEEN: &str = "combo3xPopupSeen";
    /// Packs still available today.
    pub const PACKS_REMAINING: &str = "packBlackRemaining";
    /// Date the pack counter was last reset.
    pub const PACKS_RESET_DATE: &str = "packBlackResetDate";
    /// Pay-on-delivery opt-in flag.
    pub const PAY_ON_DELIVERY_ENABLED: &str = "payOnDeliveryEnabled";
}

/// In-memory storage for tests and native callers.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, StorageError> {
        self.entries
            .lock()
            .map_err(|_| StorageError::Backend("storage mutex poisoned".to_string()))
    }
}

impl StoragePort for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries()?.remove(key);
        Ok(())
    }
}

/// A boolean flag stored under a well-known key ("popup seen", opt-ins).
///
/// Reads treat anything other than the literal `"true"` as unset, matching
/// the storefront's original `localStorage` convention.
#[derive(Debug, Clone, Copy)]
pub struct StoredFlag {
    key: &'static str,
}

impl StoredFlag {
    /// A flag stored under `key`.
    #[must_use]
    pub const fn new(key: &'static str) -> Self {
        Self { key }
    }

    /// Whether the flag is set.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the backend fails.
    pub fn is_set(&self, storage: &dyn StoragePort) -> Result<bool, StorageError> {
        Ok(storage.get(self.key)?.as_deref() == Some("true"))
    }

    /// Set the flag.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the backend fails.
    pub fn set(&self, storage: &dyn StoragePort) -> Result<(), StorageError> {
        storage.set(self.key, "true")
    }

    /// Clear the flag.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the backend fails.
    pub fn clear(&self, storage: &dyn StoragePort) -> Result<(), StorageError> {
        storage.set(self.key, "false")
    }
}
