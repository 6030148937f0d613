// SPDX-License-Identifier: MIT
// Ratcliff-Obershelp alignment: longest matching runs found greedily, then
// the regions on either side of each run searched in turn via an explicit
// work queue (bounded depth regardless of input shape).

use rustc_hash::{FxHashMap, FxHashSet};

use crate::types::MatchingBlock;

/// Second-sequence length at which the popular-symbol heuristic engages.
const POPULAR_MIN_LEN: usize = 200;

/// Matching-block finder over two code-point sequences.
///
/// Construction indexes the second sequence once; `matching_blocks` and
/// `ratio` can then be taken from the same aligner.
pub struct SequenceAligner<'a> {
    a: &'a [char],
    b: &'a [char],
    b2j: FxHashMap<char, Vec<usize>>,
    popular: FxHashSet<char>,
}

impl<'a> SequenceAligner<'a> {
    pub fn new(a: &'a [char], b: &'a [char]) -> Self {
        let mut b2j: FxHashMap<char, Vec<usize>> = FxHashMap::default();
        for (j, &c) in b.iter().enumerate() {
            b2j.entry(c).or_default().push(j);
        }

        // Symbols dominating a long second sequence are noise for run
        // *seeding* only; the extension scans below still walk through them.
        // Threshold is 1% of the sequence plus one occurrence.
        let mut popular = FxHashSet::default();
        let n = b.len();
        if n >= POPULAR_MIN_LEN {
            let threshold = n / 100 + 1;
            b2j.retain(|&c, indices| {
                if indices.len() > threshold {
                    popular.insert(c);
                    false
                } else {
                    true
                }
            });
        }

        SequenceAligner { a, b, b2j, popular }
    }

    fn is_popular(&self, c: char) -> bool {
        self.popular.contains(&c)
    }

    /// Longest common run within `a[alo..ahi]` x `b[blo..bhi]`.
    ///
    /// Ties break on the earliest start in `a`, then the earliest in `b`.
    /// Runs seeded through non-popular symbols are extended over popular
    /// ones afterwards, so the heuristic never splits a run it can reach.
    fn find_longest_match(
        &self,
        alo: usize,
        ahi: usize,
        blo: usize,
        bhi: usize,
    ) -> MatchingBlock {
        let mut besti = alo;
        let mut bestj = blo;
        let mut bestk = 0usize;

        // j2len[j] = length of the longest run ending at a[i], b[j]
        let mut j2len: FxHashMap<usize, usize> = FxHashMap::default();
        for i in alo..ahi {
            let mut newj2len: FxHashMap<usize, usize> = FxHashMap::default();
            if let Some(indices) = self.b2j.get(&self.a[i]) {
                for &j in indices {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break; // indices are ascending
                    }
                    let k = if j > blo {
                        j2len.get(&(j - 1)).copied().unwrap_or(0) + 1
                    } else {
                        1
                    };
                    newj2len.insert(j, k);
                    if k > bestk {
                        besti = i + 1 - k;
                        bestj = j + 1 - k;
                        bestk = k;
                    }
                }
            }
            j2len = newj2len;
        }

        // Extend over adjacent equal non-popular symbols first, then over
        // popular ones, mirroring the seeding exclusion above.
        while besti > alo
            && bestj > blo
            && !self.is_popular(self.b[bestj - 1])
            && self.a[besti - 1] == self.b[bestj - 1]
        {
            besti -= 1;
            bestj -= 1;
            bestk += 1;
        }
        while besti + bestk < ahi
            && bestj + bestk < bhi
            && !self.is_popular(self.b[bestj + bestk])
            && self.a[besti + bestk] == self.b[bestj + bestk]
        {
            bestk += 1;
        }
        while besti > alo
            && bestj > blo
            && self.is_popular(self.b[bestj - 1])
            && self.a[besti - 1] == self.b[bestj - 1]
        {
            besti -= 1;
            bestj -= 1;
            bestk += 1;
        }
        while besti + bestk < ahi
            && bestj + bestk < bhi
            && self.is_popular(self.b[bestj + bestk])
            && self.a[besti + bestk] == self.b[bestj + bestk]
        {
            bestk += 1;
        }

        MatchingBlock::new(besti, bestj, bestk)
    }

    /// All maximal non-overlapping matching runs, position-ordered, with a
    /// zero-length terminal block at `(len(a), len(b))`.
    pub fn matching_blocks(&self) -> Vec<MatchingBlock> {
        let la = self.a.len();
        let lb = self.b.len();

        let mut queue = vec![(0usize, la, 0usize, lb)];
        let mut raw: Vec<MatchingBlock> = Vec::new();
        while let Some((alo, ahi, blo, bhi)) = queue.pop() {
            let m = self.find_longest_match(alo, ahi, blo, bhi);
            if m.size > 0 {
                if alo < m.a && blo < m.b {
                    queue.push((alo, m.a, blo, m.b));
                }
                if m.a + m.size < ahi && m.b + m.size < bhi {
                    queue.push((m.a + m.size, ahi, m.b + m.size, bhi));
                }
                raw.push(m);
            }
        }
        raw.sort_unstable();

        // Runs the region split left adjacent get merged back together.
        let mut i1 = 0usize;
        let mut j1 = 0usize;
        let mut k1 = 0usize;
        let mut blocks: Vec<MatchingBlock> = Vec::new();
        for m in raw {
            if i1 + k1 == m.a && j1 + k1 == m.b {
                k1 += m.size;
            } else {
                if k1 > 0 {
                    blocks.push(MatchingBlock::new(i1, j1, k1));
                }
                i1 = m.a;
                j1 = m.b;
                k1 = m.size;
            }
        }
        if k1 > 0 {
            blocks.push(MatchingBlock::new(i1, j1, k1));
        }
        blocks.push(MatchingBlock::new(la, lb, 0));
        blocks
    }

    /// Base similarity `2*M / T` where `M` is the total matched length and
    /// `T` the combined sequence length.
    pub fn ratio(&self) -> f64 {
        let matches: usize = self.matching_blocks().iter().map(|m| m.size).sum();
        let total = self.a.len() + self.b.len();
        if total == 0 {
            return 1.0;
        }
        2.0 * matches as f64 / total as f64
    }
}

pub fn matching_blocks(a: &[char], b: &[char]) -> Vec<MatchingBlock> {
    SequenceAligner::new(a, b).matching_blocks()
}

pub fn ratio(a: &[char], b: &[char]) -> f64 {
    SequenceAligner::new(a, b).ratio()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn finds_single_block_plus_terminal() {
        let a = chars("abcd");
        let b = chars("xxabcdyy");
        let blocks = matching_blocks(&a, &b);
        assert_eq!(
            blocks,
            vec![MatchingBlock::new(0, 2, 4), MatchingBlock::new(4, 8, 0)]
        );
    }

    #[test]
    fn splits_around_the_longest_run() {
        let a = chars("abxcd");
        let b = chars("abcd");
        let blocks = matching_blocks(&a, &b);
        assert_eq!(
            blocks,
            vec![
                MatchingBlock::new(0, 0, 2),
                MatchingBlock::new(3, 2, 2),
                MatchingBlock::new(5, 4, 0),
            ]
        );
    }

    #[test]
    fn ties_break_on_earliest_position() {
        // "ab" and "cd" are both length-2 runs; the earlier one in `a` wins
        // the first split.
        let a = chars("abzcd");
        let b = chars("ab cd");
        let blocks = matching_blocks(&a, &b);
        assert_eq!(blocks[0], MatchingBlock::new(0, 0, 2));
    }

    #[test]
    fn disjoint_sequences_have_no_blocks() {
        let a = chars("abc");
        let b = chars("xyz");
        let blocks = matching_blocks(&a, &b);
        assert_eq!(blocks, vec![MatchingBlock::new(3, 3, 0)]);
        assert_eq!(ratio(&a, &b), 0.0);
    }

    #[test]
    fn ratio_counts_matched_over_total() {
        let a = chars("abcd");
        let b = chars("bcde");
        assert!((ratio(&a, &b) - 0.75).abs() < 1e-12);
    }

    #[test]
    fn identical_sequences_score_one() {
        let a = chars("same text");
        assert_eq!(ratio(&a, &a), 1.0);
    }

    #[test]
    fn popular_symbols_change_the_score() {
        // Below the length threshold the repeated run matches in full.
        let a: Vec<char> = std::iter::repeat('a').take(50).collect();
        let mut b_short = vec!['z'];
        b_short.extend(std::iter::repeat('a').take(149));
        assert!((ratio(&a, &b_short) - 0.5).abs() < 1e-12);

        // At >= 200 symbols, 'a' (150 occurrences > 200/100 + 1) is dropped
        // from run seeding and nothing else lines up, so the score collapses.
        // Known divergence on adversarial repetitive input.
        let mut b_long = vec!['z'];
        b_long.extend(std::iter::repeat('a').take(150));
        b_long.extend("bcdefghijklmnopqrstuvwxyz".chars().cycle().take(49));
        assert_eq!(b_long.len(), 200);
        assert_eq!(ratio(&a, &b_long), 0.0);
        assert_eq!(
            matching_blocks(&a, &b_long),
            vec![MatchingBlock::new(50, 200, 0)]
        );
    }
}
