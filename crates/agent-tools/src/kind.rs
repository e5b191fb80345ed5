//! The closed set of handler kinds the router can dispatch to.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A capability handler kind.
///
/// Identifiers are the strings used in model replies, selections and result
/// maps (`"conversation"`, `"database"`, `"search"`, `"expense"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    /// General conversation; also the fallback for everything else.
    Conversation,
    /// Structured record queries and listings.
    Database,
    /// Web search.
    Search,
    /// Expense bookkeeping.
    Expense,
}

impl ToolKind {
    /// Every kind, in registry order.
    pub const ALL: [ToolKind; 4] = [
        ToolKind::Conversation,
        ToolKind::Database,
        ToolKind::Search,
        ToolKind::Expense,
    ];

    /// The identifier string for this kind.
    pub fn id(self) -> &'static str {
        match self {
            Self::Conversation => "conversation",
            Self::Database => "database",
            Self::Search => "search",
            Self::Expense => "expense",
        }
    }

    /// Parse an identifier. Matching is exact.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.id() == id)
    }

    /// Name used in progress notifications.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Conversation => "Conversation",
            Self::Database => "Database",
            Self::Search => "Search",
            Self::Expense => "Expense",
        }
    }

    /// Canned example utterances shown to the classifier model.
    pub fn examples(self) -> &'static [&'static str] {
        match self {
            Self::Conversation => &[
                "Hello, how are you?",
                "Can you explain how compound interest works?",
                "Send a report to my manager",
            ],
            Self::Database => &[
                "Show all users",
                "List the records created this week",
                "Get all orders for customer 42",
            ],
            Self::Search => &[
                "Search for Laravel documentation",
                "Find the latest news about electric cars",
                "Look up the population of Canada",
            ],
            Self::Expense => &[
                "$25 for lunch",
                "Add expense 40 dollars for taxi",
                "How much did I spend on groceries this month?",
            ],
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
