//! Pool data models.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::matches::EntrantId;

/// A round-robin pool produced by seeding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pool {
    /// 0-based position in the seeding output
    pub index: usize,
    /// 1-based pool number, continued from the caller's counter
    pub number: u32,
    /// Letter derived from `number` (A, B, ..., Z, AA, ...)
    pub letter: String,
    /// Members in seed order
    pub members: Vec<EntrantId>,
    /// Minimum size the seeding run was asked to respect
    pub min_size: usize,
}

impl Pool {
    pub fn new(index: usize, number: u32, members: Vec<EntrantId>, min_size: usize) -> Self {
        Self {
            index,
            number,
            letter: pool_letter(number),
            members,
            min_size,
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, entrant: EntrantId) -> bool {
        self.members.contains(&entrant)
    }

    /// Number of bouts a full round robin of this pool needs
    pub fn bout_count(&self) -> usize {
        let n = self.members.len();
        n * n.saturating_sub(1) / 2
    }
}

/// Overview of a seeding run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedingSummary {
    pub pool_count: usize,
    pub pool_sizes: Vec<usize>,
    /// 1-based seed rank -> pool index, for the top `pool_count` seeds
    pub seed_placement: BTreeMap<usize, usize>,
}

/// Spreadsheet-style letter for a 1-based pool number
///
/// 1 -> "A", 26 -> "Z", 27 -> "AA". Zero maps to "A".
pub fn pool_letter(number: u32) -> String {
    let mut letters = Vec::new();
    let mut n = number;
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(char::from(b'A' + rem as u8));
        n = (n - 1) / 26;
    }
    if letters.is_empty() {
        return "A".to_string();
    }
    letters.iter().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_letter() {
        assert_eq!(pool_letter(1), "A");
        assert_eq!(pool_letter(2), "B");
        assert_eq!(pool_letter(26), "Z");
        assert_eq!(pool_letter(27), "AA");
        assert_eq!(pool_letter(52), "AZ");
        assert_eq!(pool_letter(53), "BA");
        assert_eq!(pool_letter(0), "A");
    }

    #[test]
    fn test_pool_bout_count() {
        let pool = Pool::new(0, 1, vec![1, 2, 3, 4, 5, 6, 7], 3);
        assert_eq!(pool.bout_count(), 21);
        assert_eq!(pool.letter, "A");
        assert!(pool.contains(4));

        let single = Pool::new(0, 1, vec![1], 1);
        assert_eq!(single.bout_count(), 0);
    }
}
