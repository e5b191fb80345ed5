//! Intent classification through the language model.

use std::env;
use std::sync::Arc;

use agent_tools::{ExecutionContext, ToolKind, ToolRegistry};
use brain_core::{hash_prompt, load_prompt_file, Brain};
use tracing::{debug, info, trace, warn};

use crate::error::OrchestratorError;
use crate::selection::ToolSelection;

/// Default path for the intent prompt file.
pub const DEFAULT_INTENT_PROMPT_FILE: &str = "INTENT_PROMPT.md";

/// Words that must steer the model toward the search tool.
///
/// Models tend to answer "find me X" conversationally; the prompt calls
/// these out explicitly.
pub const SEARCH_BIAS_KEYWORDS: &[&str] = &[
    "search", "find", "look up", "look for", "latest", "news", "serch", "finde",
];

/// Default instructions placed before the tool listing.
pub const DEFAULT_INTENT_SYSTEM_PROMPT: &str = r#"You are an intent classifier. Decide which tools should handle the user's message.

Pick every tool the message needs, in the order they should run. Most messages need exactly one tool. Use "conversation" when no other tool clearly applies.

The input format is:
[CONTEXT: caller-supplied context as JSON, if any]
[MESSAGE: the user's message]"#;

/// Load the base intent prompt.
///
/// Priority:
/// 1. `INTENT_ROUTER_PROMPT` env var (if set)
/// 2. Contents of prompt file (`INTENT_ROUTER_PROMPT_FILE` or default `INTENT_PROMPT.md`)
/// 3. Embedded default prompt
pub fn load_intent_prompt() -> String {
    if let Ok(prompt) = env::var("INTENT_ROUTER_PROMPT") {
        info!("Using intent prompt from INTENT_ROUTER_PROMPT env var");
        return prompt;
    }

    let prompt_file = env::var("INTENT_ROUTER_PROMPT_FILE")
        .unwrap_or_else(|_| DEFAULT_INTENT_PROMPT_FILE.to_string());

    if let Some(prompt) = load_prompt_file(&prompt_file) {
        info!("Loaded intent prompt from {}", prompt_file);
        return prompt;
    }

    info!("Using embedded default intent prompt");
    DEFAULT_INTENT_SYSTEM_PROMPT.to_string()
}

/// Classifier that asks the language model which tools to use.
///
/// Stateless: every call is a single completion. Any provider or parse
/// failure comes back as [`OrchestratorError::Classification`]; the caller
/// decides what to fall back to.
pub struct ModelClassifier {
    brain: Arc<dyn Brain>,
    system_prompt: String,
    prompt_hash: String,
}

impl ModelClassifier {
    /// Create a classifier for the tools in `registry`, loading the base
    /// prompt from env/file (see [`load_intent_prompt`]).
    pub fn new(brain: Arc<dyn Brain>, registry: &ToolRegistry) -> Self {
        Self::with_base_prompt(brain, registry, &load_intent_prompt())
    }

    /// Create a classifier with explicit base instructions.
    pub fn with_base_prompt(brain: Arc<dyn Brain>, registry: &ToolRegistry, base: &str) -> Self {
        let system_prompt = Self::build_system_prompt(base, registry);
        let prompt_hash = hash_prompt(&system_prompt);
        info!("Intent prompt fingerprint: {}", prompt_hash);

        Self {
            brain,
            system_prompt,
            prompt_hash,
        }
    }

    /// Get the intent prompt fingerprint.
    pub fn prompt_hash(&self) -> &str {
        &self.prompt_hash
    }

    /// The full system prompt sent with every classification.
    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    /// Compose base instructions, the tool catalogue, the search rules and
    /// the output format.
    pub fn build_system_prompt(base: &str, registry: &ToolRegistry) -> String {
        let mut prompt = String::from(base.trim());

        prompt.push_str("\n\nAvailable tools:\n");
        for (kind, description) in registry.get_descriptions() {
            prompt.push_str(&format!("- \"{}\": {}\n", kind.id(), description));
            let examples: Vec<String> = kind
                .examples()
                .iter()
                .map(|e| format!("\"{}\"", e))
                .collect();
            prompt.push_str(&format!("  Examples: {}\n", examples.join(", ")));
        }

        if registry.get_kind(ToolKind::Search).is_some() {
            let keywords: Vec<String> = SEARCH_BIAS_KEYWORDS
                .iter()
                .map(|k| format!("\"{}\"", k))
                .collect();
            prompt.push_str(&format!(
                "\nSEARCH RULE: If the message contains any of {} (even misspelled), \
                 include \"search\". Do not answer such requests with \"conversation\" alone.\n",
                keywords.join(", ")
            ));
            prompt.push_str(
                "\n[MESSAGE: find the best pizza places in Chicago]\n\
                 → {\"tools\": [\"search\"], \"reasoning\": \"find = search request\", \"confidence\": 0.95}\n\
                 \n[MESSAGE: serch for rust tutorials]\n\
                 → {\"tools\": [\"search\"], \"reasoning\": \"misspelled search\", \"confidence\": 0.9}\n\
                 \n[MESSAGE: what's the latest news on the election?]\n\
                 → {\"tools\": [\"search\"], \"reasoning\": \"latest news needs web search\", \"confidence\": 0.95}\n",
            );
        }

        prompt.push_str(
            "\nRespond with JSON only, no explanation:\n\
             {\"tools\": [\"<tool>\", ...], \"reasoning\": \"<short reason>\", \"confidence\": <0.0-1.0>}",
        );

        prompt
    }

    /// Format the user prompt with optional context.
    pub fn format_user_prompt(message: &str, context: &ExecutionContext) -> String {
        let mut parts = Vec::new();

        if !context.values().is_empty() {
            let ctx = serde_json::to_string(context.values()).unwrap_or_default();
            parts.push(format!("[CONTEXT: {}]", ctx));
        }

        parts.push(format!("[MESSAGE: {}]", message));
        parts.join("\n")
    }

    /// Classify a message with the model.
    pub async fn classify_with_model(
        &self,
        message: &str,
        context: &ExecutionContext,
    ) -> Result<ToolSelection, OrchestratorError> {
        let user_prompt = Self::format_user_prompt(message, context);
        trace!(user_prompt = %user_prompt, "INTENT_INPUT");

        let raw = self
            .brain
            .complete(&self.system_prompt, &user_prompt)
            .await
            .map_err(|e| {
                warn!(error = %e, "INTENT_BRAIN_ERROR");
                OrchestratorError::Classification(format!("provider error: {}", e))
            })?;

        trace!(raw_response = %raw, response_len = raw.len(), "INTENT_RAW_RESPONSE");

        let selection = parse_selection(&raw).inspect_err(|e| {
            warn!(error = %e, raw_response = %raw, "INTENT_PARSE_FAILED");
        })?;

        debug!("Model selection: {}", selection.description());
        Ok(selection)
    }
}

/// Parse a model reply into a selection.
pub fn parse_selection(response: &str) -> Result<ToolSelection, OrchestratorError> {
    let json_str = extract_json(response);

    let selection = serde_json::from_str::<ToolSelection>(json_str).map_err(|e| {
        OrchestratorError::Classification(format!("parse error: {}, response was: {}", e, response))
    })?;

    Ok(selection.normalized())
}

/// Extract JSON from a reply that may contain markdown or other text.
///
/// Tried in order: the body of the first fenced code block, the first
/// brace-balanced `{...}` span, the trimmed text itself.
pub fn extract_json(response: &str) -> &str {
    let trimmed = response.trim();

    if let Some(start) = trimmed.find("```") {
        let after_backticks = &trimmed[start + 3..];
        // Skip optional language identifier
        let body_start = after_backticks.find('\n').map(|i| i + 1).unwrap_or(0);
        if let Some(end) = after_backticks[body_start..].find("```") {
            let body = after_backticks[body_start..body_start + end].trim();
            return match body.find('{') {
                Some(brace) => extract_balanced_json(&body[brace..]),
                None => body,
            };
        }
    }

    if let Some(start) = trimmed.find('{') {
        return extract_balanced_json(&trimmed[start..]);
    }

    trimmed
}

/// Extract a balanced JSON object from a string that starts with '{'.
///
/// Handles trailing characters after the object, including extra braces:
/// `{"tools": ["search"]}}}` -> `{"tools": ["search"]}`
fn extract_balanced_json(s: &str) -> &str {
    if !s.starts_with('{') {
        return s;
    }

    let mut depth = 0;
    let mut in_string = false;
    let mut escape_next = false;

    for (i, ch) in s.char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match ch {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            '{' if !in_string => depth += 1,
            '}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return &s[..=i];
                }
            }
            _ => {}
        }
    }

    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use agent_tools::{async_trait, EnabledTools, Tool, ToolError};
    use mock_brain::{FailingBrain, ScriptedBrain};
    use serde_json::{json, Value};

    struct NamedTool(&'static str);

    #[async_trait]
    impl Tool for NamedTool {
        fn description(&self) -> &str {
            self.0
        }

        async fn execute(
            &self,
            _message: &str,
            _context: &ExecutionContext,
        ) -> Result<Value, ToolError> {
            Ok(json!({}))
        }
    }

    fn registry(with_search: bool) -> ToolRegistry {
        let builder = ToolRegistry::builder(EnabledTools::default())
            .register(ToolKind::Conversation, NamedTool("Talk with the user"))
            .register(ToolKind::Expense, NamedTool("Record and query expenses"));
        let builder = if with_search {
            builder.register(ToolKind::Search, NamedTool("Search the web"))
        } else {
            builder
        };
        builder.build().unwrap()
    }

    #[test]
    fn test_extract_balanced_json_trailing_braces() {
        let input = r#"{"tools": ["search"]}}}"#;
        assert_eq!(extract_balanced_json(input), r#"{"tools": ["search"]}"#);
    }

    #[test]
    fn test_extract_balanced_json_with_strings() {
        let input = r#"{"reasoning": "use { braces } and \"quotes\"", "tools": []}"#;
        assert_eq!(extract_balanced_json(input), input);
    }

    #[test]
    fn test_extract_json_fenced_block() {
        let input = "Here you go:\n```json\n{\"tools\": [\"expense\"]}\n```\nanything else?";
        assert_eq!(extract_json(input), r#"{"tools": ["expense"]}"#);
    }

    #[test]
    fn test_extract_json_plain_fence() {
        let input = "```\n{\"tools\": [\"search\"], \"confidence\": 0.8}\n```";
        assert_eq!(extract_json(input), r#"{"tools": ["search"], "confidence": 0.8}"#);
    }

    #[test]
    fn test_extract_json_prefers_fence_over_earlier_braces() {
        let input = "Format is {tools}.\n```json\n{\"tools\": [\"database\"]}\n```";
        assert_eq!(extract_json(input), r#"{"tools": ["database"]}"#);
    }

    #[test]
    fn test_extract_json_embedded_object() {
        let input = r#"Sure! {"tools": ["search"], "confidence": 0.9} Hope that helps."#;
        assert_eq!(extract_json(input), r#"{"tools": ["search"], "confidence": 0.9}"#);
    }

    #[test]
    fn test_extract_json_raw_text() {
        assert_eq!(extract_json("  not json at all  "), "not json at all");
    }

    #[test]
    fn test_parse_selection_valid() {
        let selection =
            parse_selection(r#"{"tools": ["search", "search", "expense"], "reasoning": "r", "confidence": 0.85}"#)
                .unwrap();
        assert_eq!(selection.tools, vec!["search", "expense"]);
        assert_eq!(selection.confidence, 0.85);
    }

    #[test]
    fn test_parse_selection_invalid() {
        assert!(matches!(
            parse_selection("I think you want search"),
            Err(OrchestratorError::Classification(_))
        ));
        assert!(matches!(
            parse_selection(r#"{"reasoning": "no tools"}"#),
            Err(OrchestratorError::Classification(_))
        ));
        assert!(matches!(
            parse_selection(r#"{"tools": "search"}"#),
            Err(OrchestratorError::Classification(_))
        ));
    }

    #[test]
    fn test_prompt_lists_tools_and_examples() {
        let prompt =
            ModelClassifier::build_system_prompt(DEFAULT_INTENT_SYSTEM_PROMPT, &registry(true));

        assert!(prompt.contains("- \"conversation\": Talk with the user"));
        assert!(prompt.contains("- \"expense\": Record and query expenses"));
        assert!(prompt.contains("- \"search\": Search the web"));
        assert!(prompt.contains("\"$25 for lunch\""));
        assert!(!prompt.contains("- \"database\""));
    }

    #[test]
    fn test_prompt_search_bias() {
        let prompt =
            ModelClassifier::build_system_prompt(DEFAULT_INTENT_SYSTEM_PROMPT, &registry(true));
        assert!(prompt.contains("SEARCH RULE"));
        for keyword in SEARCH_BIAS_KEYWORDS {
            assert!(prompt.contains(&format!("\"{}\"", keyword)), "missing {}", keyword);
        }

        let prompt =
            ModelClassifier::build_system_prompt(DEFAULT_INTENT_SYSTEM_PROMPT, &registry(false));
        assert!(!prompt.contains("SEARCH RULE"));
    }

    #[test]
    fn test_format_user_prompt() {
        let prompt = ModelClassifier::format_user_prompt("hi", &ExecutionContext::new());
        assert_eq!(prompt, "[MESSAGE: hi]");

        let ctx = ExecutionContext::new().with_value("tenant_id", "acme");
        let prompt = ModelClassifier::format_user_prompt("hi", &ctx);
        assert_eq!(prompt, "[CONTEXT: {\"tenant_id\":\"acme\"}]\n[MESSAGE: hi]");
    }

    #[test]
    fn test_prompt_hash_tracks_prompt() {
        let brain = Arc::new(ScriptedBrain::new("{}"));
        let a = ModelClassifier::with_base_prompt(brain.clone(), &registry(true), "base one");
        let b = ModelClassifier::with_base_prompt(brain, &registry(true), "base two");
        assert_ne!(a.prompt_hash(), b.prompt_hash());
        assert_eq!(a.prompt_hash(), hash_prompt(a.system_prompt()));
    }

    #[tokio::test]
    async fn test_classify_with_model_fenced_reply() {
        let brain = Arc::new(ScriptedBrain::new(
            "```json\n{\"tools\": [\"search\"], \"reasoning\": \"lookup\", \"confidence\": 0.9}\n```",
        ));
        let classifier = ModelClassifier::with_base_prompt(brain.clone(), &registry(true), "base");

        let selection = classifier
            .classify_with_model("find rust jobs", &ExecutionContext::new())
            .await
            .unwrap();

        assert_eq!(selection.tools, vec!["search"]);
        assert_eq!(selection.reasoning.as_deref(), Some("lookup"));
        assert_eq!(brain.calls(), 1);
    }

    #[tokio::test]
    async fn test_classify_with_model_provider_error() {
        let classifier = ModelClassifier::with_base_prompt(
            Arc::new(FailingBrain::default()),
            &registry(true),
            "base",
        );

        let err = classifier
            .classify_with_model("hello", &ExecutionContext::new())
            .await
            .unwrap_err();
        assert!(matches!(err, OrchestratorError::Classification(_)));
    }

    #[tokio::test]
    async fn test_classify_with_model_bad_json() {
        let classifier = ModelClassifier::with_base_prompt(
            Arc::new(ScriptedBrain::new("{tools: [search")),
            &registry(true),
            "base",
        );

        let err = classifier
            .classify_with_model("hello", &ExecutionContext::new())
            .await
            .unwrap_err();
        assert!(matches!(err, OrchestratorError::Classification(_)));
    }

    // Env vars are process-global, so every prompt source runs in one test.
    #[test]
    fn test_load_intent_prompt_sources() {
        fn clear_prompt_vars() {
            env::remove_var("INTENT_ROUTER_PROMPT");
            env::remove_var("INTENT_ROUTER_PROMPT_FILE");
        }

        let path = env::temp_dir().join(format!("intent-prompt-{}.md", std::process::id()));
        std::fs::write(&path, "\n  Route from the file.  \n").unwrap();

        // Scenario 1: nothing set and no default file, embedded prompt
        clear_prompt_vars();
        env::set_var("INTENT_ROUTER_PROMPT_FILE", path.with_extension("missing"));
        assert_eq!(load_intent_prompt(), DEFAULT_INTENT_SYSTEM_PROMPT);

        // Scenario 2: prompt file
        env::set_var("INTENT_ROUTER_PROMPT_FILE", &path);
        assert_eq!(load_intent_prompt(), "Route from the file.");

        // Scenario 3: env prompt wins over the file
        env::set_var("INTENT_ROUTER_PROMPT", "Route from the env.");
        assert_eq!(load_intent_prompt(), "Route from the env.");

        // The loaded base ends up in the classifier prompt and its hash
        let classifier = ModelClassifier::new(Arc::new(ScriptedBrain::new("{}")), &registry(true));
        assert!(classifier.system_prompt().starts_with("Route from the env."));
        assert_eq!(classifier.prompt_hash(), hash_prompt(classifier.system_prompt()));

        clear_prompt_vars();
        std::fs::remove_file(&path).unwrap();
    }
}
