use super::{match_length, window_start, MatchCandidate, MatchFinder};
use crate::format::{MIN_MATCH, WINDOW_SIZE};

const HASH_BITS: u32 = 15;
const HASH_SIZE: usize = 1 << HASH_BITS;

/// Ring size for chain links; must exceed the window
const CHAIN_SIZE: usize = (WINDOW_SIZE + 1).next_power_of_two();
const CHAIN_MASK: usize = CHAIN_SIZE - 1;

const NIL: usize = usize::MAX;

/// Hash of the 3 bytes at `pos`
#[inline]
fn hash3(input: &[u8], pos: usize) -> usize {
    let key = (input[pos] as u32) << 16 | (input[pos + 1] as u32) << 8 | input[pos + 2] as u32;
    (key.wrapping_mul(0x9E37_79B1) >> (32 - HASH_BITS)) as usize
}

/// Indexed longest-match search
///
/// Every window position sharing the 3-byte prefix of the query sits on one
/// chain, newest first. The whole chain is walked (no depth limit) and a
/// candidate replaces the best on `>=`, so the last one kept among equal
/// lengths is the most distant. That matches [`BruteForceMatcher`] for every
/// match of `MIN_MATCH` bytes or more.
///
/// [`BruteForceMatcher`]: super::BruteForceMatcher
pub struct HashChainMatcher {
    /// head[hash] = most recent position with this hash
    head: Vec<usize>,
    /// prev[pos & CHAIN_MASK] = previous position with the same hash
    prev: Vec<usize>,
    /// Next position to index
    next_insert: usize,
}

impl HashChainMatcher {
    pub fn new() -> Self {
        Self::starting_at(0)
    }

    /// Finder whose first query will be at `pos`
    ///
    /// Indexing starts at the window preceding `pos`, which lets a worker
    /// search an arbitrary slice of positions.
    pub fn starting_at(pos: usize) -> Self {
        Self {
            head: vec![NIL; HASH_SIZE],
            prev: vec![NIL; CHAIN_SIZE],
            next_insert: window_start(pos),
        }
    }

    /// Index every position before `end` that can start a 3-byte match
    fn insert_up_to(&mut self, input: &[u8], end: usize) {
        // Positions older than the window can never be reached again
        self.next_insert = self.next_insert.max(window_start(end));
        let last = input.len().saturating_sub(MIN_MATCH - 1);

        while self.next_insert < end {
            let pos = self.next_insert;
            if pos < last {
                let h = hash3(input, pos);
                self.prev[pos & CHAIN_MASK] = self.head[h];
                self.head[h] = pos;
            }
            self.next_insert += 1;
        }
    }
}

impl Default for HashChainMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchFinder for HashChainMatcher {
    fn find(&mut self, input: &[u8], pos: usize) -> MatchCandidate {
        self.insert_up_to(input, pos);

        let mut best = MatchCandidate::default();
        if pos + MIN_MATCH > input.len() {
            return best;
        }

        let min_pos = window_start(pos);
        let mut candidate = self.head[hash3(input, pos)];

        // A link is only read while its slot is inside the window, so it is never stale
        while candidate != NIL && candidate >= min_pos {
            let length = match_length(input, candidate, pos);
            if length >= MIN_MATCH && length >= best.length {
                best = MatchCandidate { offset: pos - candidate, length };
            }
            candidate = self.prev[candidate & CHAIN_MASK];
        }
        best
    }
}
