//! Root ledger state
//!
//! `AppState` owns every family member and the shared category set. The
//! selected member is kept as an ID resolved against `family_members`, never as
//! a copy. All mutations go through the methods here; each one validates first
//! and only then changes the state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::budget::BudgetEnvelope;
use super::category::CategorySet;
use super::expense::Expense;
use super::ids::MemberId;
use super::lenient;
use super::member::{ExpenseValidationError, FamilyMember};
use crate::error::{BudgetError, BudgetResult};

/// The complete ledger, as stored in one snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    #[serde(default, deserialize_with = "lenient::list")]
    pub family_members: Vec<FamilyMember>,

    #[serde(default, deserialize_with = "lenient_member_ref")]
    current_member: Option<MemberId>,

    #[serde(default, deserialize_with = "lenient::or_default")]
    pub categories: CategorySet,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            family_members: Vec::new(),
            current_member: None,
            categories: CategorySet::defaults(),
        }
    }
}

/// Accept an ID, the legacy whole-member object, or anything else as none
fn lenient_member_ref<'de, D>(deserializer: D) -> Result<Option<MemberId>, D::Error>
where
    D: Deserializer<'de>,
{
    fn token(value: Value) -> Option<String> {
        match value {
            Value::String(id) => Some(id),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    let id = match Value::deserialize(deserializer)? {
        Value::Object(mut member) => member.remove("id").and_then(token),
        other => token(other),
    };
    Ok(id.map(MemberId::from))
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a snapshot, defaulting missing or unreadable fields and dropping a
    /// dangling selection
    ///
    /// Only text that is not JSON at all is an error.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut state = match serde_json::from_str::<Value>(json)? {
            value @ Value::Object(_) => serde_json::from_value(value)?,
            _ => {
                tracing::warn!("snapshot is not a JSON object; starting from defaults");
                AppState::default()
            }
        };
        state.normalize();
        Ok(state)
    }

    /// Clear a selection that does not resolve to a member
    pub fn normalize(&mut self) {
        if let Some(id) = &self.current_member {
            if self.member(id).is_none() {
                tracing::debug!(member = %id, "stored selection does not resolve; clearing it");
                self.current_member = None;
            }
        }
    }

    pub fn member(&self, id: &MemberId) -> Option<&FamilyMember> {
        self.family_members.iter().find(|m| &m.id == id)
    }

    /// Find a member by full or short ID, then by case-insensitive name
    pub fn find_member(&self, query: &str) -> Option<&FamilyMember> {
        let query = query.trim();
        if let Some(member) = self.family_members.iter().find(|m| m.id.as_str() == query) {
            return Some(member);
        }

        let name_lower = query.to_lowercase();
        if let Some(member) = self
            .family_members
            .iter()
            .find(|m| m.name.to_lowercase() == name_lower)
        {
            return Some(member);
        }

        let mut by_prefix = self.family_members.iter().filter(|m| m.id.matches(query));
        match (by_prefix.next(), by_prefix.next()) {
            (Some(member), None) => Some(member),
            _ => None,
        }
    }

    pub fn current_member_id(&self) -> Option<&MemberId> {
        self.current_member.as_ref()
    }

    pub fn current_member(&self) -> Option<&FamilyMember> {
        self.current_member.as_ref().and_then(|id| self.member(id))
    }

    fn current_member_mut(&mut self) -> BudgetResult<&mut FamilyMember> {
        let id = self
            .current_member
            .as_ref()
            .ok_or_else(BudgetError::no_member_selected)?;
        self.family_members
            .iter_mut()
            .find(|m| &m.id == id)
            .ok_or_else(|| BudgetError::member_not_found(id.as_str()))
    }

    /// Select a member by ID; an unknown ID clears the selection
    pub fn select_member(&mut self, id: &MemberId) -> Option<&FamilyMember> {
        self.current_member = self.member(id).map(|m| m.id.clone());
        self.current_member()
    }

    pub fn clear_selection(&mut self) {
        self.current_member = None;
    }

    /// Append a new member and select it
    pub fn add_member(&mut self, name: &str) -> BudgetResult<&FamilyMember> {
        let name = name.trim();
        if name.is_empty() {
            return Err(BudgetError::Validation(
                "Please enter a family member name".into(),
            ));
        }

        let member = FamilyMember::new(name);
        self.current_member = Some(member.id.clone());
        self.family_members.push(member);
        Ok(&self.family_members[self.family_members.len() - 1])
    }

    /// Set the selected member's budget
    pub fn set_budget(
        &mut self,
        starting_balance: f64,
        timeframe_days: i64,
        now: DateTime<Utc>,
    ) -> BudgetResult<BudgetEnvelope> {
        self.current_member_mut()?
            .set_budget(starting_balance, timeframe_days, now)
            .map_err(|e| BudgetError::Validation(e.to_string()))
    }

    /// Reset the selected member's budget, clearing their expenses
    pub fn reset_budget(
        &mut self,
        new_starting_balance: f64,
        now: DateTime<Utc>,
    ) -> BudgetResult<BudgetEnvelope> {
        self.current_member_mut()?
            .reset_budget(new_starting_balance, now)
            .map_err(|e| BudgetError::Validation(e.to_string()))
    }

    /// Record an expense for the selected member
    pub fn add_expense(
        &mut self,
        amount: f64,
        category: &str,
        now: DateTime<Utc>,
    ) -> BudgetResult<Expense> {
        let categories = self.categories.clone();
        self.current_member_mut()?
            .add_expense(amount, category, &categories, now)
            .map_err(|e| match e {
                ExpenseValidationError::UnknownCategory(name) => {
                    BudgetError::Validation(format!("Unknown expense category '{}'", name))
                }
                other => BudgetError::Validation(other.to_string()),
            })
    }

    /// Add a category to the shared set
    pub fn add_category(&mut self, name: &str) -> BudgetResult<String> {
        use super::category::CategoryValidationError;

        self.categories
            .add(name)
            .map(str::to_string)
            .map_err(|e| match e {
                CategoryValidationError::Duplicate(name) => BudgetError::Duplicate {
                    entity_type: "Category",
                    identifier: name,
                },
                other => BudgetError::Validation(other.to_string()),
            })
    }
}
