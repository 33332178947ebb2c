//! Category service

use serde_json::json;

use crate::audit::EntityType;
use crate::error::BudgetResult;
use crate::models::CategorySet;
use crate::storage::Storage;

/// Service for the shared category list
pub struct CategoryService<'a> {
    storage: &'a mut Storage,
}

impl<'a> CategoryService<'a> {
    pub fn new(storage: &'a mut Storage) -> Self {
        Self { storage }
    }

    pub fn list(&self) -> &CategorySet {
        &self.storage.state().categories
    }

    /// Append a category and persist
    pub fn add(&mut self, name: &str) -> BudgetResult<String> {
        let name = self.storage.commit(|state| state.add_category(name))?;

        self.storage.log_create(
            EntityType::Category,
            &name,
            Some(name.clone()),
            &json!({ "name": name }),
        )?;
        tracing::info!(category = %name, "category added");
        Ok(name)
    }

    /// Write the current categories (and the rest of the ledger) to disk
    pub fn save(&self) -> BudgetResult<()> {
        self.storage.save()
    }
}
