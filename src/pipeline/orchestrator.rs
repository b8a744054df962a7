use std::sync::Arc;
use std::time::{Duration, Instant};
use futures::stream::{FuturesUnordered, StreamExt};
use futures::FutureExt;
use tokio::sync::{mpsc, Semaphore};
use tokio_util::sync::CancellationToken;
use crate::errors::ScanError;
use crate::fetch::PageFetcher;
use crate::models::{
    InterestSet, ScanOutcome, TrackFailure, TrackMetrics, TrackSource, TrackStatus,
};
use super::events::ScanEvent;
use super::scanner::TrackScanner;
use super::state::{OrchestratorConfig, ScanProgress};
use tracing::{error, info, warn};

/// Fans a scan out to one task per track and merges what comes back.
///
/// Never fails: tracks that cannot be scanned end up in
/// [`ScanOutcome::track_errors`], everything else in `records`.
pub struct ScanOrchestrator {
    fetcher: Arc<dyn PageFetcher>,
    config: OrchestratorConfig,
    cancel_token: CancellationToken,
    event_tx: Option<mpsc::UnboundedSender<ScanEvent>>,
}

impl ScanOrchestrator {
    pub fn new(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self {
            fetcher,
            config: OrchestratorConfig::default(),
            cancel_token: CancellationToken::new(),
            event_tx: None,
        }
    }

    pub fn with_config(mut self, config: OrchestratorConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the orchestrator's cancel token with an external one (e.g. a
    /// Ctrl-C handler's). Cancelling aborts every unfinished track as a whole.
    pub fn with_cancel_token(mut self, token: CancellationToken) -> Self {
        self.cancel_token = token;
        self
    }

    /// Attach an event channel for streaming scan events to a display.
    pub fn with_event_channel(mut self, tx: mpsc::UnboundedSender<ScanEvent>) -> Self {
        self.event_tx = Some(tx);
        self
    }

    fn emit(&self, event: ScanEvent) {
        if let Some(ref tx) = self.event_tx {
            let _ = tx.send(event);
        }
    }

    /// Scan every source concurrently.
    ///
    /// `on_progress` is called once per track, in completion order, after
    /// that track's records have been merged.
    pub async fn run<P>(&self, sources: &[TrackSource], interest: &InterestSet, mut on_progress: P) -> ScanOutcome
    where
        P: FnMut(&ScanProgress),
    {
        let started = Instant::now();
        let total = sources.len();
        info!(
            tracks = total,
            components = interest.len(),
            fetcher = self.fetcher.fetcher_name(),
            max_concurrent = ?self.config.max_concurrent_tracks,
            "Scan started"
        );
        self.emit(ScanEvent::ScanStarted { total_tracks: total });

        let interest = Arc::new(interest.clone());
        let limiter = self
            .config
            .max_concurrent_tracks
            .map(|n| Arc::new(Semaphore::new(n.max(1))));

        let mut pending = FuturesUnordered::new();
        let mut abort_handles = Vec::with_capacity(total);

        for (idx, source) in sources.iter().enumerate() {
            let source = source.clone();
            let fetcher = self.fetcher.clone();
            let interest = interest.clone();
            let limiter = limiter.clone();
            let event_tx = self.event_tx.clone();

            let handle = tokio::spawn(async move {
                let _permit = match limiter {
                    Some(sem) => sem.acquire_owned().await.ok(),
                    None => None,
                };
                if let Some(ref tx) = event_tx {
                    let _ = tx.send(ScanEvent::TrackStarted {
                        name: source.name.clone(),
                        url: source.url.clone(),
                    });
                }

                let track_start = Instant::now();
                let result = TrackScanner::new(fetcher.as_ref())
                    .with_events(event_tx.as_ref())
                    .scan(&source, &interest)
                    .await;
                (track_start.elapsed(), result)
            });

            abort_handles.push(handle.abort_handle());
            pending.push(handle.map(move |joined| (idx, joined)));
        }

        let mut outcome = ScanOutcome {
            total_tracks: total,
            ..Default::default()
        };
        let mut completed = 0;
        let mut cancelled = false;

        loop {
            let (idx, joined) = tokio::select! {
                _ = self.cancel_token.cancelled(), if !cancelled => {
                    cancelled = true;
                    warn!(remaining = total - completed, "Scan cancelled, aborting unfinished tracks");
                    for handle in &abort_handles {
                        handle.abort();
                    }
                    continue;
                }
                next = pending.next() => match next {
                    Some(next) => next,
                    None => break,
                },
            };

            let source = &sources[idx];
            let (track_elapsed, failure) = match joined {
                Ok((_, Ok(scan))) => {
                    let elapsed = scan.duration;
                    outcome.tracks.push(TrackMetrics {
                        name: source.name.clone(),
                        url: source.url.clone(),
                        status: TrackStatus::Completed,
                        duration_ms: elapsed.as_millis() as u64,
                        records: scan.records.len(),
                        failing_tools: scan.failing_tools,
                        rows_without_link: scan.rows_without_link,
                        details_failed: scan.details_failed,
                    });
                    self.emit(ScanEvent::TrackCompleted {
                        name: source.name.clone(),
                        records: scan.records.len(),
                        duration_ms: elapsed.as_millis() as u64,
                    });
                    outcome.records.extend(scan.records);
                    (elapsed, None)
                }
                Ok((elapsed, Err(e))) => {
                    warn!(
                        track = %source.name,
                        url = %source.url,
                        error_type = e.classify().error_type,
                        error = %e,
                        "Track failed"
                    );
                    (elapsed, Some(e.to_string()))
                }
                // No timing survives an aborted or panicked task.
                Err(join_err) if join_err.is_cancelled() => {
                    (Duration::ZERO, Some(ScanError::Cancelled.to_string()))
                }
                Err(join_err) => {
                    error!(track = %source.name, error = %join_err, "Track task panicked");
                    (Duration::ZERO, Some(format!("Track task panicked: {}", join_err)))
                }
            };

            let failed = failure.is_some();
            if let Some(reason) = failure {
                outcome.tracks.push(TrackMetrics {
                    name: source.name.clone(),
                    url: source.url.clone(),
                    status: TrackStatus::Failed,
                    duration_ms: track_elapsed.as_millis() as u64,
                    records: 0,
                    failing_tools: 0,
                    rows_without_link: 0,
                    details_failed: 0,
                });
                self.emit(ScanEvent::TrackFailed {
                    name: source.name.clone(),
                    error: reason.clone(),
                });
                outcome.track_errors.push(TrackFailure {
                    source: source.clone(),
                    reason,
                });
            }

            completed += 1;
            let progress = ScanProgress {
                completed,
                total,
                elapsed: started.elapsed(),
                track: source.name.clone(),
                track_elapsed,
                failed,
            };
            on_progress(&progress);
        }

        outcome.elapsed_ms = started.elapsed().as_millis() as u64;
        info!(
            records = outcome.records.len(),
            failed_tracks = outcome.failed_count(),
            total_tracks = total,
            elapsed_ms = outcome.elapsed_ms,
            "Scan complete"
        );
        self.emit(ScanEvent::ScanCompleted {
            total_records: outcome.records.len(),
            failed_tracks: outcome.failed_count(),
            elapsed_ms: outcome.elapsed_ms,
        });

        outcome
    }

    pub fn cancel(&self) {
        self.cancel_token.cancel();
    }

    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel_token.clone()
    }
}

/// Scan every source with full fan-out and no event stream.
pub async fn run_scan<P>(
    fetcher: Arc<dyn PageFetcher>,
    sources: &[TrackSource],
    interest: &InterestSet,
    on_progress: P,
) -> ScanOutcome
where
    P: FnMut(&ScanProgress),
{
    ScanOrchestrator::new(fetcher).run(sources, interest, on_progress).await
}
