//! Complete command handler.
//!
//! Builds the completion pipeline over the catalog, marks canceled steps,
//! then delivers the completion signals from several threads at once, the
//! way a download transport would.

use std::sync::Arc;

use lessoncache_core::{CompletionEvent, StepId};
use lessoncache_download::{
    CancellationRegistry, CompletionPipelineDeps, DownloadDomainLock, build_completion_pipeline,
};

use crate::adapters::{LoggingDownloadSubsystem, PrintingEventSink, SummaryReporter};
use crate::bootstrap::CliContext;
use crate::error::CliError;

/// What a `complete` run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionSummary {
    pub delivered: usize,
    pub discarded: usize,
    pub errors: usize,
    /// Canceled steps no signal in this run matched.
    pub unmatched_cancels: Vec<StepId>,
}

/// Execute the complete command.
pub async fn execute(
    ctx: &CliContext,
    references: &[i64],
    cancel: &[i64],
    threads: usize,
) -> Result<CompletionSummary, CliError> {
    let subsystem = Arc::new(LoggingDownloadSubsystem::new());
    let sink = Arc::new(PrintingEventSink::new());
    let reporter = Arc::new(SummaryReporter::new());

    let pipeline = build_completion_pipeline(CompletionPipelineDeps {
        store: ctx.store.clone(),
        lesson_state: ctx.store.clone(),
        subsystem: subsystem.clone(),
        preferences: Arc::new(ctx.config.storage.clone()),
        reporter: reporter.clone(),
        sink: sink.clone(),
        relocator: None,
        cancellations: Arc::new(CancellationRegistry::new()),
        lock: DownloadDomainLock::new(),
    });

    let cancellations = Arc::clone(pipeline.cancellations());
    for &step in cancel {
        cancellations.mark(StepId(step)).await;
    }

    let chunk_size = references.len().div_ceil(threads.max(1)).max(1);
    let mut senders = Vec::new();
    for chunk in references.chunks(chunk_size) {
        let listener = pipeline.listener();
        let chunk = chunk.to_vec();
        senders.push(tokio::task::spawn_blocking(move || {
            for raw in chunk {
                listener.on_completion(CompletionEvent::new(raw));
            }
        }));
    }
    for sender in senders {
        sender
            .await
            .map_err(|e| CliError::Runtime(format!("Signal delivery failed: {e}")))?;
    }

    pipeline.shutdown().await;

    let summary = CompletionSummary {
        delivered: sink.delivered(),
        discarded: subsystem.discarded().len(),
        errors: reporter.kinds().len(),
        unmatched_cancels: cancellations.pending().await,
    };
    println!(
        "{} cached, {} discarded, {} error(s)",
        summary.delivered, summary.discarded, summary.errors
    );
    if !summary.unmatched_cancels.is_empty() {
        let steps: Vec<String> = summary
            .unmatched_cancels
            .iter()
            .map(ToString::to_string)
            .collect();
        println!("no completion arrived for canceled step(s): {}", steps.join(", "));
    }
    Ok(summary)
}
