//! Strongly-typed ID wrappers for ledger entities
//!
//! IDs are prefixed string tokens (`member-…`, `expense-…`). New IDs carry a
//! random v4 UUID; IDs read back from older snapshots (e.g. `member-1700000000000`)
//! are kept verbatim so existing references still resolve.

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Number of token characters shown in the short form of an ID
const SHORT_LEN: usize = 8;

macro_rules! define_id {
    ($name:ident, $prefix:literal) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Prefix shared by every ID of this type
            pub const PREFIX: &'static str = $prefix;

            /// Create a new random ID
            pub fn new() -> Self {
                Self(format!("{}{}", $prefix, Uuid::new_v4().simple()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Prefix plus the first few token characters, for display
            pub fn short(&self) -> &str {
                let end = ($prefix.len() + SHORT_LEN).min(self.0.len());
                // IDs may come from user files; never split a multi-byte char
                match self.0.get(..end) {
                    Some(short) => short,
                    None => &self.0,
                }
            }

            /// Whether a user-supplied reference names this ID
            ///
            /// Accepts the full ID, the short form, or either without the prefix.
            pub fn matches(&self, query: &str) -> bool {
                let query = query.trim();
                if query.is_empty() {
                    return false;
                }
                let token = self.0.strip_prefix($prefix).unwrap_or(&self.0);
                let query_token = query.strip_prefix($prefix).unwrap_or(query);
                token == query_token
                    || (query_token.len() >= SHORT_LEN && token.starts_with(query_token))
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl FromStr for $name {
            type Err = Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                if s.starts_with($prefix) {
                    Ok(Self(s.to_string()))
                } else {
                    Ok(Self(format!("{}{}", $prefix, s)))
                }
            }
        }
    };
}

define_id!(MemberId, "member-");
define_id!(ExpenseId, "expense-");
