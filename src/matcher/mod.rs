pub mod brute;
pub mod hash_chain;

pub use brute::BruteForceMatcher;
pub use hash_chain::HashChainMatcher;

use crate::format::{MAX_MATCH, WINDOW_SIZE};

/// Best back-reference found for one position
///
/// `length == 0` means no candidate was found.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MatchCandidate {
    pub offset: usize,
    pub length: usize,
}

/// Longest-match search over the window preceding a position
///
/// Implementations must agree on every candidate of length `MIN_MATCH` or
/// more: the longest match wins, and among equal lengths the most distant
/// one. Shorter candidates never reach the wire, so finders may report them
/// or not.
pub trait MatchFinder {
    /// Find the best match for `input[pos..]`
    ///
    /// Positions must be queried in increasing order.
    fn find(&mut self, input: &[u8], pos: usize) -> MatchCandidate;
}

/// Match finder selection
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SearchStrategy {
    /// Scan every window position, oldest first
    BruteForce,
    /// Walk chains of positions sharing a 3-byte prefix
    #[default]
    HashChain,
}

impl SearchStrategy {
    /// Create a finder that will first be queried at `start`
    pub fn finder(self, start: usize) -> Box<dyn MatchFinder + Send> {
        match self {
            Self::BruteForce => Box::new(BruteForceMatcher),
            Self::HashChain => Box::new(HashChainMatcher::starting_at(start)),
        }
    }
}

/// First position of the search window for `pos`
#[inline]
pub fn window_start(pos: usize) -> usize {
    pos.saturating_sub(WINDOW_SIZE)
}

/// Count equal bytes starting at `src` and `pos`, capped at `MAX_MATCH`
///
/// `src < pos`; the compared ranges may overlap.
#[inline]
pub fn match_length(input: &[u8], src: usize, pos: usize) -> usize {
    let limit = (input.len() - pos).min(MAX_MATCH);
    input[src..src + limit]
        .iter()
        .zip(&input[pos..pos + limit])
        .take_while(|(a, b)| a == b)
        .count()
}
