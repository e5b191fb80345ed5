//! Deterministic keyword classification.

use agent_tools::ToolKind;
use regex::Regex;
use tracing::debug;

use crate::selection::ToolSelection;

/// Patterns that mark a message as unambiguous enough to skip the model.
const OBVIOUS_PATTERNS: &[&str] = &[
    // Leading currency amount: "$25 for lunch"
    r"^\s*[$€£¥]\s*\d",
    // Explicit expense creation: "add expense ...", "create an expense ..."
    r"(?i)^\s*(add|create)\s+(an?\s+|new\s+)?expenses?\b",
    // Search intent, including common misspellings
    r"(?i)\b(search|find|look\s+up|latest\s+news|look\s+for|serch|finde)\b",
    // Listing: "show all ...", "list me all ..."
    r"(?i)^\s*(show|list)\s+(me\s+)?all\b",
];

/// Keyword groups, checked independently and in this order.
const KEYWORD_GROUPS: &[(ToolKind, &str)] = &[
    (
        ToolKind::Expense,
        r"(?i)\b(expenses?|spend|spending|spent|costs?|pay|paid|payments?|bills?|receipts?)\b|[$€£¥]",
    ),
    (
        ToolKind::Database,
        r"(?i)\b(show|list|display|users|records|get\s+all)\b",
    ),
    (
        ToolKind::Search,
        r"(?i)\b(search|find|look\s+for|look\s+up|latest|news|serch|finde)\b",
    ),
    // Communication requests are drafted by the conversation tool.
    (
        ToolKind::Conversation,
        r"(?i)\b(email|send|report|notify|message)\b",
    ),
];

/// Regex/keyword classifier. Never fails and never calls out.
pub struct PatternClassifier {
    obvious: Vec<Regex>,
    groups: Vec<(ToolKind, Regex)>,
}

impl PatternClassifier {
    pub fn new() -> Self {
        Self {
            obvious: OBVIOUS_PATTERNS.iter().map(|p| compile(p)).collect(),
            groups: KEYWORD_GROUPS
                .iter()
                .map(|(kind, p)| (*kind, compile(p)))
                .collect(),
        }
    }

    /// Whether the message is unambiguous enough for the keyword path.
    pub fn looks_obvious(&self, message: &str) -> bool {
        self.obvious.iter().any(|re| re.is_match(message))
    }

    /// Tool identifiers whose keyword groups match, in group order.
    ///
    /// Returns exactly `["conversation"]` when nothing matches.
    pub fn select_tools_with_keywords(&self, message: &str) -> Vec<String> {
        let mut tools: Vec<String> = Vec::new();

        for (kind, re) in &self.groups {
            if re.is_match(message) && !tools.iter().any(|t| t == kind.id()) {
                tools.push(kind.id().to_string());
            }
        }

        if tools.is_empty() {
            tools.push(ToolKind::Conversation.id().to_string());
        }

        debug!(tools = ?tools, "Keyword selection");
        tools
    }

    /// Keyword selection wrapped as a full-confidence [`ToolSelection`].
    pub fn classify(&self, message: &str) -> ToolSelection {
        let tools = self.select_tools_with_keywords(message);
        let reasoning = format!("keyword match: {}", tools.join(", "));
        ToolSelection::new(tools, 1.0, Some(reasoning))
    }
}

impl Default for PatternClassifier {
    fn default() -> Self {
        Self::new()
    }
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("built-in keyword pattern must compile")
}
