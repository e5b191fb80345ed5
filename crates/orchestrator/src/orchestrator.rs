//! Main orchestrator: route, execute, combine, and recover.

use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;

use agent_tools::{
    panic_message, ConversationTool, ExecutionContext, Tool, ToolExecutor, ToolKind, ToolRegistry,
    ToolResults,
};
use brain_core::Brain;
use futures::FutureExt;
use tracing::{error, info, warn};

use crate::combiner::{combine, CombinedResult};
use crate::config::OrchestratorConfig;
use crate::envelope::{ResponseEnvelope, ResponseMetadata};
use crate::error::OrchestratorError;
use crate::router::IntentRouter;
use crate::selection::ToolSelection;

/// Text returned when even the conversation fallback fails.
pub const APOLOGY_TEXT: &str =
    "I'm sorry, something went wrong while processing your request. Please try again in a moment.";

/// Reject empty messages before they reach the pipeline.
pub fn validate_message(message: &str) -> Result<&str, OrchestratorError> {
    let trimmed = message.trim();
    if trimmed.is_empty() {
        return Err(OrchestratorError::EmptyMessage);
    }
    Ok(trimmed)
}

/// Where a routing call currently is.
enum PipelineState {
    Routing,
    Executing(ToolSelection),
    Combining(ToolSelection, ToolResults),
    Recovering(OrchestratorError),
    Done(ResponseEnvelope),
}

/// Routes a message to tools and always produces a [`ResponseEnvelope`].
///
/// The orchestrator:
/// - Classifies the message (keywords, model, or both)
/// - Runs the selected tools in order, isolating failures per tool
/// - Combines their results
/// - Falls back to the conversation tool, then to an apology, if any stage fails
pub struct Orchestrator {
    router: IntentRouter,
    executor: ToolExecutor,
    registry: Arc<ToolRegistry>,
}

impl Orchestrator {
    /// Create an orchestrator over a built registry.
    pub fn new(
        config: &OrchestratorConfig,
        brain: Arc<dyn Brain>,
        registry: ToolRegistry,
    ) -> Result<Self, OrchestratorError> {
        config.validate()?;
        let registry = Arc::new(registry);
        let router = IntentRouter::new(config, brain, registry.clone());
        Ok(Self::with_router(router, registry))
    }

    /// Create an orchestrator from tool instances.
    ///
    /// The registry honours `config.enabled_tools`. Without an explicit
    /// conversation tool, a [`ConversationTool`] on `brain` is used.
    pub fn from_tools<I>(
        config: &OrchestratorConfig,
        brain: Arc<dyn Brain>,
        tools: I,
    ) -> Result<Self, OrchestratorError>
    where
        I: IntoIterator<Item = (ToolKind, Arc<dyn Tool>)>,
    {
        let mut builder = ToolRegistry::builder(config.enabled_tools)
            .register(ToolKind::Conversation, ConversationTool::new(brain.clone()));
        for (kind, tool) in tools {
            builder = builder.register_shared(kind, tool);
        }
        let registry = builder.build()?;
        Self::new(config, brain, registry)
    }

    /// Create an orchestrator with configuration from environment variables.
    pub fn from_env<I>(brain: Arc<dyn Brain>, tools: I) -> Result<Self, OrchestratorError>
    where
        I: IntoIterator<Item = (ToolKind, Arc<dyn Tool>)>,
    {
        let config = OrchestratorConfig::from_env()?;
        Self::from_tools(&config, brain, tools)
    }

    /// Create an orchestrator around an existing router.
    pub fn with_router(router: IntentRouter, registry: Arc<ToolRegistry>) -> Self {
        Self {
            router,
            executor: ToolExecutor::new(registry.clone()),
            registry,
        }
    }

    /// Handle a message end-to-end. Never fails.
    ///
    /// 1. Route the message to a validated selection
    /// 2. Execute the selected tools in order
    /// 3. Combine the results
    /// 4. On any failure, answer through the conversation tool, or apologize
    pub async fn handle(&self, message: &str, context: ExecutionContext) -> ResponseEnvelope {
        let started = Instant::now();
        info!("Handling message ({} chars)", message.len());

        let mut state = PipelineState::Routing;
        loop {
            state = match state {
                PipelineState::Routing => {
                    match guard("routing", self.route_stage(message, &context)).await {
                        Ok(selection) => PipelineState::Executing(selection),
                        Err(e) => PipelineState::Recovering(e),
                    }
                }

                PipelineState::Executing(selection) => {
                    let executing = self.execute_stage(&selection, message, &context);
                    match guard("execution", executing).await {
                        Ok(results) => PipelineState::Combining(selection, results),
                        Err(e) => PipelineState::Recovering(e),
                    }
                }

                PipelineState::Combining(selection, results) => {
                    let combining = async {
                        context.notify("Processing results...");
                        Ok::<_, OrchestratorError>(combine(results.clone()))
                    };
                    match guard("combination", combining).await {
                        Ok(formatted) => {
                            info!(tools = ?selection.tools, "Message handled");
                            PipelineState::Done(ResponseEnvelope {
                                original_message: message.to_string(),
                                tools_used: selection.tools,
                                raw_results: results,
                                formatted_result: formatted,
                                context: context.clone(),
                                metadata: ResponseMetadata {
                                    execution_time: started.elapsed().as_secs_f64(),
                                    fallback: None,
                                    error: None,
                                },
                            })
                        }
                        Err(e) => PipelineState::Recovering(e),
                    }
                }

                PipelineState::Recovering(e) => {
                    PipelineState::Done(self.recover(message, &context, e, started).await)
                }

                PipelineState::Done(envelope) => return envelope,
            };
        }
    }

    async fn route_stage(
        &self,
        message: &str,
        context: &ExecutionContext,
    ) -> Result<ToolSelection, OrchestratorError> {
        context.notify("Analyzing your request...");
        let selection = self.router.route(message, context).await;
        context.notify(&format!("Selected tools: {}", selection.tools.join(", ")));
        Ok(selection)
    }

    async fn execute_stage(
        &self,
        selection: &ToolSelection,
        message: &str,
        context: &ExecutionContext,
    ) -> Result<ToolResults, OrchestratorError> {
        let results = self.executor.execute(&selection.tools, message, context).await;
        if results.is_empty() {
            return Err(OrchestratorError::NoHandlers);
        }
        Ok(results)
    }

    /// Answer through the conversation tool alone, or apologize.
    async fn recover(
        &self,
        message: &str,
        context: &ExecutionContext,
        cause: OrchestratorError,
        started: Instant,
    ) -> ResponseEnvelope {
        error!(error = %cause, "PIPELINE_FAILED, falling back to conversation");
        let cause = cause.to_string();

        let attempt = async {
            context.notify("Falling back to conversation...");
            let tool = self.registry.conversation()?;
            Ok::<_, OrchestratorError>(tool.execute(message, context).await?)
        };

        match guard("fallback", attempt).await {
            Ok(value) => {
                let mut raw_results = ToolResults::new();
                raw_results.insert(ToolKind::Conversation.id().to_string(), value.clone());

                ResponseEnvelope {
                    original_message: message.to_string(),
                    tools_used: vec![ToolKind::Conversation.id().to_string()],
                    raw_results,
                    formatted_result: CombinedResult::Single(value),
                    context: context.clone(),
                    metadata: ResponseMetadata {
                        execution_time: started.elapsed().as_secs_f64(),
                        fallback: Some(true),
                        error: Some(cause),
                    },
                }
            }
            Err(second) => {
                warn!(error = %second, "FALLBACK_FAILED, returning apology");

                ResponseEnvelope {
                    original_message: message.to_string(),
                    tools_used: Vec::new(),
                    raw_results: ToolResults::new(),
                    formatted_result: CombinedResult::error(APOLOGY_TEXT),
                    context: context.clone(),
                    metadata: ResponseMetadata {
                        execution_time: started.elapsed().as_secs_f64(),
                        fallback: Some(true),
                        error: Some(format!("{}; fallback failed: {}", cause, second)),
                    },
                }
            }
        }
    }

    /// Get the router.
    pub fn router(&self) -> &IntentRouter {
        &self.router
    }

    /// Get the tool registry.
    pub fn registry(&self) -> &ToolRegistry {
        self.registry.as_ref()
    }
}

/// Run a stage, turning a panic into [`OrchestratorError::Panicked`].
async fn guard<T, F>(stage: &'static str, future: F) -> Result<T, OrchestratorError>
where
    F: Future<Output = Result<T, OrchestratorError>>,
{
    match AssertUnwindSafe(future).catch_unwind().await {
        Ok(result) => result,
        Err(panic) => Err(OrchestratorError::Panicked {
            stage,
            message: panic_message(panic.as_ref()),
        }),
    }
}
