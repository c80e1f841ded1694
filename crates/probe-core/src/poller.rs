use futures::stream::{self, Stream, StreamExt};
use serde::Serialize;
use tokio::time::Instant;

use crate::config::PollConfig;
use crate::error::{ProbeError, Result};
use crate::ledger::LedgerQuery;
use crate::types::{ProgramId, Signature};

// ─── Outcomes ─────────────────────────────────────────────────────────────

/// Where the marker was first seen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarkerMatch {
    /// 1-based attempt number.
    pub attempt: u32,
    pub signature: Signature,
    pub log_line: String,
}

/// Result of one pass of listing, fetching and scanning.
#[derive(Debug)]
pub enum Attempt {
    Matched(MarkerMatch),
    /// Nothing matched. `unconfirmed` counts handles whose record was not yet
    /// available.
    Pending {
        attempt: u32,
        candidates: usize,
        unconfirmed: usize,
    },
    /// A query failed and `retry_query_errors` folded it into the loop.
    Failed { attempt: u32, error: ProbeError },
}

impl Attempt {
    pub fn number(&self) -> u32 {
        match self {
            Attempt::Matched(m) => m.attempt,
            Attempt::Pending { attempt, .. } | Attempt::Failed { attempt, .. } => *attempt,
        }
    }

    pub fn is_match(&self) -> bool {
        matches!(self, Attempt::Matched(_))
    }
}

/// Successful probe, as printed by `--json`.
#[derive(Debug, Clone, Serialize)]
pub struct ProbeReport {
    pub program_id: ProgramId,
    pub marker: String,
    #[serde(flatten)]
    pub found: MarkerMatch,
    pub elapsed_ms: u64,
}

// ─── ReadinessPoller ──────────────────────────────────────────────────────

/// Polls a ledger until a program's recent transactions contain a log marker.
///
/// Each attempt lists up to `signature_limit` recent handles, fetches them in
/// listing order, and stops at the first log line containing the marker.
/// Attempts are separated by `interval`; there is no sleep before the first
/// attempt or after the last.
///
/// ```rust,ignore
/// let poller = ReadinessPoller::new(client, config.poll_config());
/// let report = poller.wait_for_marker(&program_id).await?;
/// println!("found in {}", report.found.signature);
/// ```
pub struct ReadinessPoller<L> {
    ledger: L,
    config: PollConfig,
}

impl<L: LedgerQuery> ReadinessPoller<L> {
    pub fn new(ledger: L, config: PollConfig) -> Self {
        ReadinessPoller { ledger, config }
    }

    pub fn config(&self) -> &PollConfig {
        &self.config
    }

    /// Run a single attempt. Query errors are returned as-is.
    pub async fn run_attempt(&self, program: &ProgramId, attempt: u32) -> Result<Attempt> {
        let limit = self.config.signature_limit;
        let commitment = self.config.commitment;

        let handles = self.ledger.list_recent(program, limit, commitment).await?;
        let candidates = handles.len().min(limit);
        let mut unconfirmed = 0;

        for signature in handles.into_iter().take(limit) {
            let Some(record) = self.ledger.get_record(&signature, commitment).await? else {
                tracing::trace!(attempt, %signature, "record not yet available");
                unconfirmed += 1;
                continue;
            };
            if let Some(line) = record.find_marker(&self.config.marker) {
                return Ok(Attempt::Matched(MarkerMatch {
                    attempt,
                    log_line: line.to_string(),
                    signature,
                }));
            }
        }

        tracing::debug!(attempt, candidates, unconfirmed, "marker not found");
        Ok(Attempt::Pending {
            attempt,
            candidates,
            unconfirmed,
        })
    }

    /// Bounded stream of attempt outcomes.
    ///
    /// Ends after `max_attempts` items, after the first match, or after the
    /// first error. The interval sleep runs lazily before each attempt past
    /// the first, so dropping the stream at a match never waits.
    pub fn attempts<'a>(
        &'a self,
        program: &'a ProgramId,
    ) -> impl Stream<Item = Result<Attempt>> + 'a {
        stream::unfold(Some(1u32), move |state| async move {
            let Some(attempt) = state else {
                return None;
            };
            if attempt > self.config.max_attempts {
                return None;
            }
            if attempt > 1 {
                tokio::time::sleep(self.config.interval).await;
            }

            let outcome = match self.run_attempt(program, attempt).await {
                Err(error) if self.config.retry_query_errors && !error.is_configuration() => {
                    tracing::warn!(attempt, error = %error, "ledger query failed, will retry");
                    Ok(Attempt::Failed { attempt, error })
                }
                other => other,
            };

            let next = match &outcome {
                Ok(Attempt::Matched(_)) | Err(_) => None,
                Ok(_) => Some(attempt + 1),
            };
            Some((outcome, next))
        })
    }

    /// Drive [`attempts`](Self::attempts) to a terminal state.
    ///
    /// Returns [`ProbeError::Timeout`] when every attempt comes back without
    /// the marker.
    pub async fn wait_for_marker(&self, program: &ProgramId) -> Result<ProbeReport> {
        let started = Instant::now();
        let mut made = 0;

        let attempts = self.attempts(program);
        futures::pin_mut!(attempts);

        while let Some(outcome) = attempts.next().await {
            made += 1;
            if let Attempt::Matched(found) = outcome? {
                tracing::info!(
                    attempt = found.attempt,
                    signature = %found.signature,
                    "found matching log"
                );
                return Ok(ProbeReport {
                    program_id: *program,
                    marker: self.config.marker.clone(),
                    found,
                    elapsed_ms: started.elapsed().as_millis() as u64,
                });
            }
        }

        Err(ProbeError::Timeout {
            program_id: *program,
            marker: self.config.marker.clone(),
            attempts: made,
        })
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────
