//! String similarity scoring.
//!
//! The score is the classic matching-blocks ratio: find the longest contiguous
//! block shared by both strings, recurse on the unmatched text to its left and
//! right, and sum the matched lengths `M`. The ratio is `2 * M / (len(a) + len(b))`.

/// A contiguous run of characters shared by both strings.
///
/// `a` and `b` are character offsets into the first and second string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchingBlock {
    pub a: usize,
    pub b: usize,
    pub size: usize,
}

/// Computes the similarity of two strings as a ratio in `[0, 1]`.
///
/// Two empty strings are identical (`1.0`); an empty string against a
/// non-empty one shares nothing (`0.0`).
///
/// # Example
///
/// ```rust
/// use citeloc_core::similarity;
///
/// assert_eq!(similarity("abcd", "abcd"), 1.0);
/// assert_eq!(similarity("abcd", "bcde"), 0.75);
/// assert_eq!(similarity("", ""), 1.0);
/// ```
pub fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();

    if total == 0 {
        return 1.0;
    }

    let matched: usize = matching_blocks(&a, &b).iter().map(|block| block.size).sum();
    2.0 * matched as f64 / total as f64
}

/// Returns every matching block between `a` and `b`, ordered by position.
///
/// Blocks are found by repeatedly taking the longest common block inside an
/// unmatched region and splitting the region around it.
pub fn matching_blocks(a: &[char], b: &[char]) -> Vec<MatchingBlock> {
    let mut pending = vec![(0, a.len(), 0, b.len())];
    let mut blocks = Vec::new();

    while let Some((alo, ahi, blo, bhi)) = pending.pop() {
        let block = longest_match(a, b, alo, ahi, blo, bhi);
        if block.size == 0 {
            continue;
        }

        if alo < block.a && blo < block.b {
            pending.push((alo, block.a, blo, block.b));
        }
        if block.a + block.size < ahi && block.b + block.size < bhi {
            pending.push((block.a + block.size, ahi, block.b + block.size, bhi));
        }
        blocks.push(block);
    }

    blocks.sort_by_key(|block| (block.a, block.b));
    blocks
}

/// Finds the longest block common to `a[alo..ahi]` and `b[blo..bhi]`.
///
/// Among equally long blocks the one ending earliest in `a` wins, then the
/// one ending earliest in `b`.
fn longest_match(a: &[char], b: &[char], alo: usize, ahi: usize, blo: usize, bhi: usize) -> MatchingBlock {
    let width = bhi - blo;
    let mut best = MatchingBlock { a: alo, b: blo, size: 0 };
    // current[j + 1] holds the length of the common suffix ending at a[i], b[blo + j]
    let mut previous = vec![0usize; width + 1];
    let mut current = vec![0usize; width + 1];

    for i in alo..ahi {
        for j in 0..width {
            current[j + 1] = if a[i] == b[blo + j] { previous[j] + 1 } else { 0 };
            let size = current[j + 1];
            if size > best.size {
                best = MatchingBlock { a: i + 1 - size, b: blo + j + 1 - size, size };
            }
        }
        std::mem::swap(&mut previous, &mut current);
    }

    best
}
