//! Parallel encoder.
//!
//! Architecture:
//! - Worker pool: each worker owns a contiguous range of positions and
//!   computes the best match candidate at every one of them
//! - Main thread: collects the ranges in order, then runs the same greedy
//!   parse as the single-threaded encoder over the precomputed candidates
//!
//! Candidates depend only on the input, not on earlier parse decisions, so
//! the output is byte-identical to [`SingleThreadedEncoder`].

use std::collections::BTreeMap;

use crossbeam::channel::{bounded, Receiver, Sender};

use super::encoder::{encode_greedy, SingleThreadedEncoder};
use crate::error::{Error, Result};
use crate::matcher::{MatchCandidate, SearchStrategy};
use crate::{CompressConfig, CompressStats, Compressor};

/// Inputs smaller than this are encoded on the calling thread
pub const PARALLEL_MIN_INPUT: usize = 64 * 1024;

/// Candidates computed by one worker
struct SearchResult {
    /// Sequence number for ordering
    chunk_id: usize,
    candidates: Vec<MatchCandidate>,
}

/// Parallel encoder implementation
pub struct ParallelEncoder {
    config: CompressConfig,
}

impl ParallelEncoder {
    pub fn new(config: CompressConfig) -> Self {
        Self { config }
    }

    fn effective_threads(&self) -> usize {
        match self.config.num_threads {
            0 => num_cpus::get().clamp(1, 32),
            n => n.clamp(1, 32),
        }
    }
}

impl Compressor for ParallelEncoder {
    fn compress(&mut self, input: &[u8]) -> Result<(Vec<u8>, CompressStats)> {
        let num_threads = self.effective_threads();

        // For single thread or small input, delegate to the single-threaded encoder
        if num_threads == 1 || input.len() < PARALLEL_MIN_INPUT {
            return Ok(SingleThreadedEncoder::new(self.config.clone()).encode(input));
        }

        self.compress_parallel(input, num_threads)
    }
}

impl ParallelEncoder {
    fn compress_parallel(
        &self,
        input: &[u8],
        num_threads: usize,
    ) -> Result<(Vec<u8>, CompressStats)> {
        let chunk_len = (input.len() + num_threads - 1) / num_threads;
        let search = self.config.search;

        let (result_tx, result_rx): (Sender<SearchResult>, Receiver<SearchResult>) =
            bounded(num_threads);

        // Use crossbeam's scoped threads so workers can borrow the input
        let result = crossbeam::scope(|scope| {
            for (chunk_id, start) in (0..input.len()).step_by(chunk_len).enumerate() {
                let result_tx = result_tx.clone();
                let end = (start + chunk_len).min(input.len());

                scope.spawn(move |_| {
                    search_worker(input, start, end, search, chunk_id, result_tx);
                });
            }

            // Drop our copy so the receiver ends when every worker is done
            drop(result_tx);

            collect_in_order(result_rx)
        });

        let candidates =
            result.map_err(|_| Error::Internal("Thread panicked".to_string()))?;

        if candidates.len() != input.len() {
            return Err(Error::Internal(format!(
                "expected {} match candidates, got {}",
                input.len(),
                candidates.len()
            )));
        }

        Ok(encode_greedy(input, |pos| candidates[pos]))
    }
}

/// Compute the best candidate for every position in `start..end`
fn search_worker(
    input: &[u8],
    start: usize,
    end: usize,
    search: SearchStrategy,
    chunk_id: usize,
    result_tx: Sender<SearchResult>,
) {
    let mut finder = search.finder(start);
    let candidates = (start..end).map(|pos| finder.find(input, pos)).collect();

    // Receiver only disappears if the main thread is already unwinding
    let _ = result_tx.send(SearchResult { chunk_id, candidates });
}

/// Concatenate worker results by chunk order
fn collect_in_order(result_rx: Receiver<SearchResult>) -> Vec<MatchCandidate> {
    let mut pending: BTreeMap<usize, Vec<MatchCandidate>> = BTreeMap::new();
    for result in result_rx {
        pending.insert(result.chunk_id, result.candidates);
    }
    pending.into_values().flatten().collect()
}
