//! Prompt execution pipeline and comparison orchestration.
//!
//! One invocation loads a definition, renders it, counts prompt tokens
//! locally, calls the model and prices the usage. Comparisons repeat that
//! for each prompt in order and stop at the first failure.

use std::path::PathBuf;
use std::sync::Arc;

use log::{info, warn};

use crate::cost::CostEstimator;
use crate::domain::{ComparisonBatch, InvocationResult};
use crate::error::{PlaygroundError, Result};
use crate::history::{HistoryRecorder, timestamp_now};
use crate::llm::{CompletionRequest, LlmClient};
use crate::prompt::{PromptLoader, PromptRenderer, RenderMode};
use crate::tokens::TokenCounter;

use super::input::InputSource;

/// Tokens the chat message framing adds on top of the raw prompt text
const CHAT_FORMAT_OVERHEAD: u64 = 8;

/// Configuration for the Playground.
#[derive(Debug, Clone, Default)]
pub struct PlaygroundConfig {
    /// What to do with templates lacking the placeholder
    pub render_mode: RenderMode,
    /// Flat per-token pricing
    pub estimator: CostEstimator,
}

/// Result of a single `run`, with where its transcript went
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub result: InvocationResult,
    pub transcript_path: PathBuf,
}

/// Runs prompt definitions against an LLM client and records the results.
pub struct Playground<L>
where
    L: LlmClient,
{
    llm: Arc<L>,
    loader: PromptLoader,
    recorder: HistoryRecorder,
    renderer: PromptRenderer,
    estimator: CostEstimator,
}

impl<L> Playground<L>
where
    L: LlmClient,
{
    pub fn new(llm: Arc<L>, loader: PromptLoader, recorder: HistoryRecorder) -> Self {
        Self::with_config(llm, loader, recorder, PlaygroundConfig::default())
    }

    pub fn with_config(llm: Arc<L>, loader: PromptLoader, recorder: HistoryRecorder, config: PlaygroundConfig) -> Self {
        Self {
            llm,
            loader,
            recorder,
            renderer: PromptRenderer::new(config.render_mode),
            estimator: config.estimator,
        }
    }

    /// Execute one prompt definition against `input` without recording it.
    ///
    /// Every step that can fail locally (load, render, tokenizer lookup)
    /// runs before the remote call.
    pub async fn invoke(&self, prompt_id: &str, input: &str) -> Result<InvocationResult> {
        let definition = self.loader.load(prompt_id)?;
        let rendered = self.renderer.render(prompt_id, &definition.prompt, input)?;

        let counter = TokenCounter::for_model(&definition.model)?;
        let prompt_tokens = counter.count(&rendered) as u64;

        info!(
            "Invoking {} (model {}, temperature {}, {} prompt tokens)",
            prompt_id, definition.model, definition.temperature, prompt_tokens
        );

        let request = CompletionRequest::single(&definition.model, &rendered, definition.temperature);
        let response = self.llm.complete(request).await?;
        let usage = response.usage;

        // Remote numbers are authoritative; the local count is a cross-check
        if usage.prompt_tokens.abs_diff(prompt_tokens) > CHAT_FORMAT_OVERHEAD {
            warn!(
                "Prompt token mismatch for {}: local {} vs remote {}",
                prompt_id, prompt_tokens, usage.prompt_tokens
            );
        }

        Ok(InvocationResult {
            prompt_id: prompt_id.to_string(),
            model: definition.model,
            rendered_prompt: rendered,
            output: response.content,
            prompt_tokens,
            completion_tokens: usage.completion_tokens,
            total_tokens: usage.total_tokens,
            cost_usd: self.estimator.estimate(usage.total_tokens),
        })
    }

    /// Execute one prompt and write its transcript.
    pub async fn run(&self, prompt_id: &str, input: &str) -> Result<RunOutcome> {
        let result = self.invoke(prompt_id, input).await?;
        let transcript_path = self.recorder.record_run(input, &result, &timestamp_now())?;
        Ok(RunOutcome {
            result,
            transcript_path,
        })
    }

    /// Compare with the input read from `source`.
    ///
    /// An input file that is missing or malformed fails before anything is
    /// written or called.
    pub async fn compare_from(&self, source: &InputSource, prompt_ids: &[String]) -> Result<ComparisonBatch> {
        let input = source.read()?;
        self.compare(&input, prompt_ids).await
    }

    /// Run `input` through every prompt in `prompt_ids`, in order.
    ///
    /// Each result is flushed to the comparison transcript and CSV as soon as
    /// it arrives. The first failure ends the batch; rows already written stay.
    pub async fn compare(&self, input: &str, prompt_ids: &[String]) -> Result<ComparisonBatch> {
        if prompt_ids.is_empty() {
            return Err(PlaygroundError::Usage("compare needs at least one prompt file".to_string()));
        }

        let mut log = self.recorder.start_comparison(input, &timestamp_now())?;
        let mut results = Vec::with_capacity(prompt_ids.len());

        for (index, prompt_id) in prompt_ids.iter().enumerate() {
            info!("Comparing prompt {}/{}: {}", index + 1, prompt_ids.len(), prompt_id);
            let result = self.invoke(prompt_id, input).await?;
            log.append(&result)?;
            results.push(result);
        }

        Ok(ComparisonBatch {
            input: input.to_string(),
            results,
            transcript_path: log.transcript_path().to_path_buf(),
            summary_path: log.summary_path().to_path_buf(),
        })
    }

    pub fn loader(&self) -> &PromptLoader {
        &self.loader
    }
}
