//! Route messages from the command line through the orchestrator.
//!
//! Uses a mock brain, so no provider is needed. The brain echoes the user
//! prompt, which makes model classification fail to parse and exercises the
//! keyword fallback.
//!
//! Run with: cargo run -p orchestrator --example route_message -- "$25 for lunch"
//!
//! Configuration via .env file or environment variables:
//!   INTENT_USE_MODEL       - Classify with the model (default: true)
//!   INTENT_HYBRID_MODE     - Keyword fast path for obvious messages (default: true)
//!   INTENT_MIN_CONFIDENCE  - Confidence threshold (default: 0.5)
//!   TOOL_ENABLE_DATABASE   - Register the database tool (default: true)
//!   TOOL_ENABLE_SEARCH     - Register the search tool (default: true)
//!   TOOL_ENABLE_EXPENSE    - Register the expense tool (default: true)

use std::env;
use std::sync::Arc;

use mock_brain::EchoBrain;
use orchestrator::{
    async_trait, validate_message, Brain, ExecutionContext, LoggingProgress, Orchestrator, Tool,
    ToolError, ToolKind,
};
use regex::Regex;
use serde_json::{json, Value};

/// Records the first currency amount in the message.
struct ExpenseTool {
    amount: Regex,
}

#[async_trait]
impl Tool for ExpenseTool {
    fn description(&self) -> &str {
        "Record and summarize expenses"
    }

    async fn execute(
        &self,
        message: &str,
        _context: &ExecutionContext,
    ) -> Result<Value, ToolError> {
        let amount = self
            .amount
            .captures(message)
            .and_then(|c| c[1].parse::<f64>().ok())
            .ok_or_else(|| ToolError::ExecutionFailed("no amount in message".to_string()))?;

        Ok(json!({
            "message": format!("Expense added: ${:.2}", amount),
            "amount": amount,
        }))
    }
}

/// Answers every query with a canned result.
struct CannedSearch;

#[async_trait]
impl Tool for CannedSearch {
    fn description(&self) -> &str {
        "Search the web for current information"
    }

    async fn execute(
        &self,
        message: &str,
        _context: &ExecutionContext,
    ) -> Result<Value, ToolError> {
        Ok(json!({ "response": format!("No live search in this example (query: {})", message) }))
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("orchestrator=debug".parse()?)
                .add_directive("agent_tools=info".parse()?),
        )
        .init();

    let raw: Vec<String> = env::args().skip(1).collect();
    let raw = if raw.is_empty() {
        "Add expense $15 for coffee".to_string()
    } else {
        raw.join(" ")
    };
    let message = validate_message(&raw)?;

    let brain: Arc<dyn Brain> = Arc::new(EchoBrain::new());
    let tools: Vec<(ToolKind, Arc<dyn Tool>)> = vec![
        (
            ToolKind::Expense,
            Arc::new(ExpenseTool {
                amount: Regex::new(r"[$€£¥]\s*(\d+(?:\.\d+)?)")?,
            }) as Arc<dyn Tool>,
        ),
        (ToolKind::Search, Arc::new(CannedSearch) as Arc<dyn Tool>),
    ];
    let orchestrator = Orchestrator::from_env(brain, tools)?;

    let context = ExecutionContext::new()
        .with_value("source", "cli")
        .with_progress(LoggingProgress);

    let envelope = orchestrator.handle(message, context).await;
    println!("{}", serde_json::to_string_pretty(&envelope.to_json())?);

    Ok(())
}
