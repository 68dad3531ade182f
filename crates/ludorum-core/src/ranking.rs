//! Tie-block walk with skip ranking.
//!
//! A sorted sequence is cut into maximal runs of equal keys. Each run
//! occupies as many rank slots as it has members, so two entries tied at 1
//! are followed by rank 3.

use std::ops::Range;

/// A maximal run of equal keys within a sorted slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TieBlock {
    /// First rank slot the block occupies (1-based).
    pub slot: u32,
    /// Index of the first member in the sorted slice.
    pub start: usize,
    /// Number of members.
    pub len: usize,
}

impl TieBlock {
    /// Indices of the block's members in the sorted slice.
    pub fn range(&self) -> Range<usize> {
        self.start..self.start + self.len
    }

    /// Every rank slot the block occupies: `slot..slot + len`.
    pub fn slots(&self) -> Range<u32> {
        let len = u32::try_from(self.len).unwrap_or(u32::MAX);
        self.slot..self.slot.saturating_add(len)
    }

    pub fn is_tie(&self) -> bool {
        self.len > 1
    }
}

/// Cut an already sorted slice into tie blocks keyed by `key`.
pub fn tie_blocks<T, K, F>(sorted: &[T], key: F) -> Vec<TieBlock>
where
    K: PartialEq,
    F: Fn(&T) -> K,
{
    let mut blocks = Vec::new();
    let mut slot: u32 = 1;
    let mut start = 0;
    while start < sorted.len() {
        let head = key(&sorted[start]);
        let mut end = start + 1;
        while end < sorted.len() && key(&sorted[end]) == head {
            end += 1;
        }
        let block = TieBlock {
            slot,
            start,
            len: end - start,
        };
        slot = block.slots().end;
        blocks.push(block);
        start = end;
    }
    blocks
}
