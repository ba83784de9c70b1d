use super::{match_length, window_start, MatchCandidate, MatchFinder};

/// Reference longest-match search
///
/// Scans the window oldest to newest and only replaces the best candidate on
/// a strictly longer match, so equal lengths resolve to the largest offset.
/// Window positions whose first byte differs are skipped with `memchr`; they
/// have length 0 and could never win.
#[derive(Clone, Copy, Debug, Default)]
pub struct BruteForceMatcher;

impl MatchFinder for BruteForceMatcher {
    fn find(&mut self, input: &[u8], pos: usize) -> MatchCandidate {
        let mut best = MatchCandidate::default();
        if pos >= input.len() {
            return best;
        }

        let start = window_start(pos);
        for rel in memchr::memchr_iter(input[pos], &input[start..pos]) {
            let src = start + rel;
            let length = match_length(input, src, pos);
            if length > best.length {
                best = MatchCandidate { offset: pos - src, length };
            }
        }
        best
    }
}
