//! Configuration for the orchestrator.

use std::env;

use agent_tools::{env_flag, EnabledTools};

use crate::error::OrchestratorError;

/// Default minimum confidence for model selections.
pub const DEFAULT_MIN_CONFIDENCE: f64 = 0.5;

/// Configuration for intent routing.
#[derive(Debug, Clone, PartialEq)]
pub struct OrchestratorConfig {
    /// Use the language model to classify intents.
    pub use_model_intent: bool,

    /// With model intent on, take the keyword path for obvious messages.
    pub hybrid_mode: bool,

    /// Model selections below this confidence are replaced by conversation.
    pub min_confidence: f64,

    /// Which handler kinds are registered.
    pub enabled_tools: EnabledTools,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            use_model_intent: true,
            hybrid_mode: true,
            min_confidence: DEFAULT_MIN_CONFIDENCE,
            enabled_tools: EnabledTools::default(),
        }
    }
}

impl OrchestratorConfig {
    /// Create configuration from environment variables.
    ///
    /// Optional environment variables:
    /// - `INTENT_USE_MODEL` - Classify with the language model (default: true)
    /// - `INTENT_HYBRID_MODE` - Keyword fast path for obvious messages (default: true)
    /// - `INTENT_MIN_CONFIDENCE` - Confidence threshold in [0, 1] (default: 0.5)
    /// - `TOOL_ENABLE_*` - See [`EnabledTools::from_env`]
    pub fn from_env() -> Result<Self, OrchestratorError> {
        let use_model_intent = env_flag("INTENT_USE_MODEL", true);
        let hybrid_mode = env_flag("INTENT_HYBRID_MODE", true);

        let min_confidence = match env::var("INTENT_MIN_CONFIDENCE") {
            Ok(raw) => raw.trim().parse::<f64>().map_err(|e| {
                OrchestratorError::Configuration(format!(
                    "INTENT_MIN_CONFIDENCE '{}' is not a number: {}",
                    raw, e
                ))
            })?,
            Err(_) => DEFAULT_MIN_CONFIDENCE,
        };

        let config = Self {
            use_model_intent,
            hybrid_mode,
            min_confidence,
            enabled_tools: EnabledTools::from_env(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Keyword-only routing, never calls the model.
    pub fn keyword_only() -> Self {
        Self {
            use_model_intent: false,
            ..Self::default()
        }
    }

    pub fn with_model_intent(mut self, enabled: bool) -> Self {
        self.use_model_intent = enabled;
        self
    }

    pub fn with_hybrid_mode(mut self, enabled: bool) -> Self {
        self.hybrid_mode = enabled;
        self
    }

    pub fn with_min_confidence(mut self, min_confidence: f64) -> Self {
        self.min_confidence = min_confidence;
        self
    }

    pub fn with_enabled_tools(mut self, enabled_tools: EnabledTools) -> Self {
        self.enabled_tools = enabled_tools;
        self
    }

    /// Check that values are in range.
    pub fn validate(&self) -> Result<(), OrchestratorError> {
        if !(0.0..=1.0).contains(&self.min_confidence) {
            return Err(OrchestratorError::Configuration(format!(
                "min_confidence must be within [0, 1], got {}",
                self.min_confidence
            )));
        }
        if !self.enabled_tools.conversation {
            return Err(OrchestratorError::Configuration(
                "the conversation tool cannot be disabled".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = OrchestratorConfig::default();
        assert!(config.use_model_intent);
        assert!(config.hybrid_mode);
        assert_eq!(config.min_confidence, DEFAULT_MIN_CONFIDENCE);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builders() {
        let config = OrchestratorConfig::default()
            .with_model_intent(true)
            .with_hybrid_mode(false)
            .with_min_confidence(0.8);
        assert!(!config.hybrid_mode);
        assert_eq!(config.min_confidence, 0.8);

        assert!(!OrchestratorConfig::keyword_only().use_model_intent);
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let config = OrchestratorConfig::default().with_min_confidence(1.5);
        assert!(matches!(
            config.validate(),
            Err(OrchestratorError::Configuration(_))
        ));
    }

    #[test]
    fn test_validate_requires_conversation() {
        let config = OrchestratorConfig::default().with_enabled_tools(EnabledTools {
            conversation: false,
            ..EnabledTools::default()
        });
        assert!(config.validate().is_err());
    }

    // Env vars are process-global, so every env scenario runs in one test.
    #[test]
    fn test_from_env_scenarios() {
        fn clear_all_intent_vars() {
            for name in [
                "INTENT_USE_MODEL",
                "INTENT_HYBRID_MODE",
                "INTENT_MIN_CONFIDENCE",
                "TOOL_ENABLE_CONVERSATION",
                "TOOL_ENABLE_DATABASE",
                "TOOL_ENABLE_SEARCH",
                "TOOL_ENABLE_EXPENSE",
            ] {
                env::remove_var(name);
            }
        }

        // Scenario 1: nothing set, defaults used
        clear_all_intent_vars();
        let config = OrchestratorConfig::from_env().unwrap();
        assert_eq!(config, OrchestratorConfig::default());

        // Scenario 2: flags accept true/1 in any case, anything else is false
        env::set_var("INTENT_USE_MODEL", "1");
        env::set_var("INTENT_HYBRID_MODE", "off");
        env::set_var("INTENT_MIN_CONFIDENCE", " 0.75 ");
        env::set_var("TOOL_ENABLE_SEARCH", "FALSE");
        let config = OrchestratorConfig::from_env().unwrap();
        assert!(config.use_model_intent);
        assert!(!config.hybrid_mode);
        assert_eq!(config.min_confidence, 0.75);
        assert!(!config.enabled_tools.search);
        assert!(config.enabled_tools.expense);

        env::set_var("INTENT_USE_MODEL", "False");
        env::set_var("INTENT_HYBRID_MODE", "TRUE");
        let config = OrchestratorConfig::from_env().unwrap();
        assert!(!config.use_model_intent);
        assert!(config.hybrid_mode);

        // Scenario 3: non-numeric threshold is rejected
        clear_all_intent_vars();
        env::set_var("INTENT_MIN_CONFIDENCE", "high");
        match OrchestratorConfig::from_env() {
            Err(OrchestratorError::Configuration(msg)) => {
                assert!(msg.contains("INTENT_MIN_CONFIDENCE"));
            }
            other => panic!("Expected Configuration error, got {:?}", other),
        }

        // Scenario 4: out-of-range threshold is rejected
        env::set_var("INTENT_MIN_CONFIDENCE", "1.5");
        assert!(matches!(
            OrchestratorConfig::from_env(),
            Err(OrchestratorError::Configuration(_))
        ));

        // Scenario 5: conversation cannot be switched off
        clear_all_intent_vars();
        env::set_var("TOOL_ENABLE_CONVERSATION", "0");
        assert!(matches!(
            OrchestratorConfig::from_env(),
            Err(OrchestratorError::Configuration(_))
        ));

        clear_all_intent_vars();
    }
}
