//! Tool registry built once from the enablement flags.

use std::collections::HashMap;
use std::env;
use std::sync::Arc;

use indexmap::IndexMap;
use tracing::{debug, info, warn};

use crate::error::ToolError;
use crate::kind::ToolKind;
use crate::tool::Tool;

/// Which handler kinds are switched on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnabledTools {
    pub conversation: bool,
    pub database: bool,
    pub search: bool,
    pub expense: bool,
}

impl Default for EnabledTools {
    fn default() -> Self {
        Self {
            conversation: true,
            database: true,
            search: true,
            expense: true,
        }
    }
}

impl EnabledTools {
    /// Only the conversation handler.
    pub fn conversation_only() -> Self {
        Self {
            conversation: true,
            database: false,
            search: false,
            expense: false,
        }
    }

    /// Build from an identifier → flag map.
    ///
    /// Kinds missing from the map are disabled; unknown identifiers are
    /// ignored with a warning.
    pub fn from_flags(flags: &HashMap<String, bool>) -> Self {
        for id in flags.keys() {
            if ToolKind::from_id(id).is_none() {
                warn!("Ignoring enablement flag for unknown tool '{}'", id);
            }
        }

        let flag = |kind: ToolKind| flags.get(kind.id()).copied().unwrap_or(false);

        Self {
            conversation: flag(ToolKind::Conversation),
            database: flag(ToolKind::Database),
            search: flag(ToolKind::Search),
            expense: flag(ToolKind::Expense),
        }
    }

    /// Create from environment variables.
    ///
    /// Environment variables (all default to true):
    /// - `TOOL_ENABLE_CONVERSATION`
    /// - `TOOL_ENABLE_DATABASE`
    /// - `TOOL_ENABLE_SEARCH`
    /// - `TOOL_ENABLE_EXPENSE`
    pub fn from_env() -> Self {
        Self {
            conversation: env_flag("TOOL_ENABLE_CONVERSATION", true),
            database: env_flag("TOOL_ENABLE_DATABASE", true),
            search: env_flag("TOOL_ENABLE_SEARCH", true),
            expense: env_flag("TOOL_ENABLE_EXPENSE", true),
        }
    }

    /// Whether a kind is enabled.
    pub fn is_enabled(&self, kind: ToolKind) -> bool {
        match kind {
            ToolKind::Conversation => self.conversation,
            ToolKind::Database => self.database,
            ToolKind::Search => self.search,
            ToolKind::Expense => self.expense,
        }
    }
}

/// Read a boolean environment variable.
///
/// `true` (any case) and `1` are true, any other value is false. Unset
/// variables take `default`.
pub fn env_flag(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .map(|v| {
            let v = v.trim();
            v.eq_ignore_ascii_case("true") || v == "1"
        })
        .unwrap_or(default)
}

/// Immutable map from handler kind to handler instance.
///
/// Iteration order is [`ToolKind::ALL`] order, so prompts and listings are
/// deterministic. A built registry always contains a conversation handler.
pub struct ToolRegistry {
    tools: IndexMap<ToolKind, Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// Start building a registry that honours `enabled`.
    pub fn builder(enabled: EnabledTools) -> ToolRegistryBuilder {
        ToolRegistryBuilder {
            enabled,
            tools: HashMap::new(),
        }
    }

    /// Get a tool by identifier.
    pub fn get(&self, id: &str) -> Option<&Arc<dyn Tool>> {
        ToolKind::from_id(id).and_then(|kind| self.tools.get(&kind))
    }

    /// Get a tool by kind.
    pub fn get_kind(&self, kind: ToolKind) -> Option<&Arc<dyn Tool>> {
        self.tools.get(&kind)
    }

    /// Check if an identifier is registered.
    pub fn has_tool(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// The conversation handler.
    pub fn conversation(&self) -> Result<&Arc<dyn Tool>, ToolError> {
        self.tools
            .get(&ToolKind::Conversation)
            .ok_or(ToolError::MissingConversation)
    }

    /// Registered kinds, in registry order.
    pub fn kinds(&self) -> Vec<ToolKind> {
        self.tools.keys().copied().collect()
    }

    /// Registered identifiers, in registry order.
    pub fn list_tools(&self) -> Vec<&'static str> {
        self.tools.keys().map(|k| k.id()).collect()
    }

    /// Tool descriptions for prompts and help text.
    pub fn get_descriptions(&self) -> Vec<(ToolKind, &str)> {
        self.tools
            .iter()
            .map(|(kind, tool)| (*kind, tool.description()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

/// Collects handlers before freezing them into a [`ToolRegistry`].
pub struct ToolRegistryBuilder {
    enabled: EnabledTools,
    tools: HashMap<ToolKind, Arc<dyn Tool>>,
}

impl ToolRegistryBuilder {
    /// Register a tool for a kind.
    ///
    /// If the kind already has a tool, it will be replaced.
    pub fn register<T: Tool + 'static>(self, kind: ToolKind, tool: T) -> Self {
        self.register_shared(kind, Arc::new(tool))
    }

    /// Register a shared tool.
    pub fn register_shared(mut self, kind: ToolKind, tool: Arc<dyn Tool>) -> Self {
        if !self.enabled.is_enabled(kind) {
            debug!("Tool '{}' is disabled, not registering", kind);
            return self;
        }
        info!("Registering tool: {}", kind);
        self.tools.insert(kind, tool);
        self
    }

    /// Freeze the registry.
    ///
    /// Fails with [`ToolError::MissingConversation`] when no conversation
    /// handler was registered, because every fallback path needs it.
    pub fn build(mut self) -> Result<ToolRegistry, ToolError> {
        if !self.tools.contains_key(&ToolKind::Conversation) {
            return Err(ToolError::MissingConversation);
        }

        let mut tools = IndexMap::with_capacity(self.tools.len());
        for kind in ToolKind::ALL {
            if let Some(tool) = self.tools.remove(&kind) {
                tools.insert(kind, tool);
            }
        }

        info!("Tool registry built with {} tools", tools.len());
        Ok(ToolRegistry { tools })
    }
}
