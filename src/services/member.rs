//! Member service
//!
//! Adding and selecting family members.

use crate::audit::EntityType;
use crate::error::{BudgetError, BudgetResult};
use crate::models::FamilyMember;
use crate::storage::Storage;

/// Service for family member management
pub struct MemberService<'a> {
    storage: &'a mut Storage,
}

impl<'a> MemberService<'a> {
    pub fn new(storage: &'a mut Storage) -> Self {
        Self { storage }
    }

    /// Add a member, select it and persist
    pub fn add(&mut self, name: &str) -> BudgetResult<FamilyMember> {
        let member = self
            .storage
            .commit(|state| state.add_member(name).cloned())?;

        self.storage.log_create(
            EntityType::FamilyMember,
            member.id.as_str(),
            Some(member.name.clone()),
            &member,
        )?;
        tracing::info!(member = %member.id, name = %member.name, "family member added");

        Ok(member)
    }

    /// Select a member by ID or name and persist the selection
    ///
    /// An unknown reference is an error and leaves the current selection alone.
    pub fn select(&mut self, query: &str) -> BudgetResult<FamilyMember> {
        let id = self
            .storage
            .state()
            .find_member(query)
            .map(|m| m.id.clone())
            .ok_or_else(|| BudgetError::member_not_found(query.trim()))?;

        let previous = self.storage.state().current_member_id().cloned();
        let member = self.storage.commit(|state| {
            state
                .select_member(&id)
                .cloned()
                .ok_or_else(|| BudgetError::member_not_found(id.as_str()))
        })?;

        self.storage.log_update(
            EntityType::FamilyMember,
            member.id.as_str(),
            Some(member.name.clone()),
            &serde_json::json!({ "selected": previous.as_ref() == Some(&member.id) }),
            &serde_json::json!({ "selected": true }),
        )?;
        tracing::info!(member = %member.id, "family member selected");

        Ok(member)
    }

    pub fn list(&self) -> &[FamilyMember] {
        &self.storage.state().family_members
    }

    /// The selected member, or NotFound when nobody is selected
    pub fn current(&self) -> BudgetResult<&FamilyMember> {
        self.storage
            .state()
            .current_member()
            .ok_or_else(BudgetError::no_member_selected)
    }
}
