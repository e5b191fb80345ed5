//! Intent routing: keyword fast path, model path, keyword fallback.

use std::sync::Arc;

use agent_tools::{ExecutionContext, ToolRegistry};
use brain_core::Brain;
use tracing::{debug, info, warn};

use crate::config::OrchestratorConfig;
use crate::model_classifier::ModelClassifier;
use crate::patterns::PatternClassifier;
use crate::selection::ToolSelection;
use crate::validator::ConfidenceValidator;

/// Which path produced a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutePath {
    /// Keyword classification, by configuration.
    Keyword,
    /// Keyword classification because the message looked obvious.
    FastPath,
    /// Model classification.
    Model,
    /// Keyword classification after the model failed.
    KeywordFallback,
}

/// Decides which tools handle a message.
///
/// Every selection it returns has passed the [`ConfidenceValidator`], so it
/// is non-empty and only names registered tools.
pub struct IntentRouter {
    use_model_intent: bool,
    hybrid_mode: bool,
    patterns: PatternClassifier,
    model: ModelClassifier,
    validator: ConfidenceValidator,
    registry: Arc<ToolRegistry>,
}

impl IntentRouter {
    /// Create a router; the model prompt is loaded per [`crate::load_intent_prompt`].
    pub fn new(
        config: &OrchestratorConfig,
        brain: Arc<dyn Brain>,
        registry: Arc<ToolRegistry>,
    ) -> Self {
        let model = ModelClassifier::new(brain, &registry);
        Self::with_model(config, model, registry)
    }

    /// Create a router around an already built model classifier.
    pub fn with_model(
        config: &OrchestratorConfig,
        model: ModelClassifier,
        registry: Arc<ToolRegistry>,
    ) -> Self {
        info!(
            use_model_intent = config.use_model_intent,
            hybrid_mode = config.hybrid_mode,
            min_confidence = config.min_confidence,
            tools = ?registry.list_tools(),
            "Intent router ready"
        );

        Self {
            use_model_intent: config.use_model_intent,
            hybrid_mode: config.hybrid_mode,
            patterns: PatternClassifier::new(),
            model,
            validator: ConfidenceValidator::new(config.min_confidence),
            registry,
        }
    }

    /// Route a message and return the validated selection.
    pub async fn route(&self, message: &str, context: &ExecutionContext) -> ToolSelection {
        self.route_with_path(message, context).await.0
    }

    /// Route a message and also report which path was taken.
    pub async fn route_with_path(
        &self,
        message: &str,
        context: &ExecutionContext,
    ) -> (ToolSelection, RoutePath) {
        let (proposed, path) = if !self.use_model_intent {
            (self.patterns.classify(message), RoutePath::Keyword)
        } else if self.hybrid_mode && self.patterns.looks_obvious(message) {
            debug!("Message looks obvious, taking keyword fast path");
            (self.patterns.classify(message), RoutePath::FastPath)
        } else {
            match self.model.classify_with_model(message, context).await {
                Ok(selection) => (selection, RoutePath::Model),
                Err(e) => {
                    warn!(error = %e, "Model classification failed, falling back to keywords");
                    (self.patterns.classify(message), RoutePath::KeywordFallback)
                }
            }
        };

        let selection = self.validator.validate(proposed, &self.registry);
        info!(path = ?path, "Routed to {}", selection.description());
        (selection, path)
    }

    pub fn patterns(&self) -> &PatternClassifier {
        &self.patterns
    }

    pub fn model(&self) -> &ModelClassifier {
        &self.model
    }

    pub fn validator(&self) -> &ConfidenceValidator {
        &self.validator
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agent_tools::{async_trait, EnabledTools, Tool, ToolError, ToolKind};
    use mock_brain::{FailingBrain, ScriptedBrain};
    use serde_json::{json, Value};

    struct NullTool;

    #[async_trait]
    impl Tool for NullTool {
        fn description(&self) -> &str {
            "null"
        }

        async fn execute(
            &self,
            _message: &str,
            _context: &ExecutionContext,
        ) -> Result<Value, ToolError> {
            Ok(json!({}))
        }
    }

    fn registry() -> Arc<ToolRegistry> {
        let mut builder = ToolRegistry::builder(EnabledTools::default());
        for kind in ToolKind::ALL {
            builder = builder.register(kind, NullTool);
        }
        Arc::new(builder.build().unwrap())
    }

    fn build_router(config: OrchestratorConfig, brain: Arc<dyn Brain>) -> IntentRouter {
        let registry = registry();
        let model = ModelClassifier::with_base_prompt(brain, &registry, "classify");
        IntentRouter::with_model(&config, model, registry)
    }

    #[tokio::test]
    async fn test_keyword_only_never_calls_model() {
        let brain = Arc::new(ScriptedBrain::new(r#"{"tools": ["search"], "confidence": 1.0}"#));
        let router = build_router(OrchestratorConfig::keyword_only(), brain.clone());

        let (selection, path) = router
            .route_with_path("Tell me a joke", &ExecutionContext::new())
            .await;

        assert_eq!(selection.tools, vec!["conversation"]);
        assert_eq!(path, RoutePath::Keyword);
        assert_eq!(brain.calls(), 0);
    }

    #[tokio::test]
    async fn test_hybrid_fast_path_for_obvious() {
        let brain = Arc::new(ScriptedBrain::new(r#"{"tools": ["database"], "confidence": 1.0}"#));
        let router = build_router(OrchestratorConfig::default(), brain.clone());

        let (selection, path) = router
            .route_with_path("Search for Laravel documentation", &ExecutionContext::new())
            .await;

        assert_eq!(selection.tools, vec!["search"]);
        assert_eq!(path, RoutePath::FastPath);
        assert_eq!(brain.calls(), 0);
    }

    #[tokio::test]
    async fn test_hybrid_uses_model_for_ambiguous() {
        let brain = Arc::new(ScriptedBrain::new(
            r#"{"tools": ["database", "weather"], "reasoning": "records", "confidence": 0.8}"#,
        ));
        let router = build_router(OrchestratorConfig::default(), brain.clone());

        let (selection, path) = router
            .route_with_path("who signed up this week?", &ExecutionContext::new())
            .await;

        assert_eq!(selection.tools, vec!["database"]);
        assert_eq!(path, RoutePath::Model);
        assert_eq!(brain.calls(), 1);
    }

    #[tokio::test]
    async fn test_model_low_confidence_overridden() {
        let brain = Arc::new(ScriptedBrain::new(r#"{"tools": ["expense"], "confidence": 0.2}"#));
        let router = build_router(OrchestratorConfig::default().with_min_confidence(0.6), brain);

        let selection = router
            .route("maybe I bought something", &ExecutionContext::new())
            .await;
        assert_eq!(selection.tools, vec!["conversation"]);
    }

    #[tokio::test]
    async fn test_model_error_matches_keyword_path() {
        let config = OrchestratorConfig::default().with_hybrid_mode(false);
        let router = build_router(config, Arc::new(FailingBrain::default()));
        let keyword = build_router(
            OrchestratorConfig::keyword_only(),
            Arc::new(FailingBrain::default()),
        );

        for message in ["I paid the electricity bill", "display users", "hello there"] {
            let (selection, path) = router.route_with_path(message, &ExecutionContext::new()).await;
            let expected = keyword.route(message, &ExecutionContext::new()).await;
            assert_eq!(path, RoutePath::KeywordFallback);
            assert_eq!(selection.tools, expected.tools, "message: {}", message);
        }
    }

    #[tokio::test]
    async fn test_non_hybrid_always_calls_model() {
        let brain = Arc::new(ScriptedBrain::new("not json"));
        let config = OrchestratorConfig::default().with_hybrid_mode(false);
        let router = build_router(config, brain.clone());

        let (selection, path) = router
            .route_with_path("$25 for lunch", &ExecutionContext::new())
            .await;

        assert_eq!(brain.calls(), 1);
        assert_eq!(path, RoutePath::KeywordFallback);
        assert_eq!(selection.tools, vec!["expense"]);
    }
}
