//! Pool standings under the tie-break cascade.

use log::warn;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

use crate::matches::{EntrantId, Match, MatchStatus};
use crate::seeding::Pool;

/// One entrant's line in a standings table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub entrant: EntrantId,
    /// 1-based final rank
    pub rank: u32,
    pub wins: u32,
    pub losses: u32,
    pub matches_played: u32,
    pub touches_scored: u32,
    pub touches_received: u32,
    /// Touches scored minus touches received
    pub indicator: i64,
    /// Set by `PromotionSelector::flag_qualifiers`
    pub qualified: bool,
}

impl Standing {
    fn new(entrant: EntrantId) -> Self {
        Self {
            entrant,
            rank: 0,
            wins: 0,
            losses: 0,
            matches_played: 0,
            touches_scored: 0,
            touches_received: 0,
            indicator: 0,
            qualified: false,
        }
    }

    /// Victories over bouts fenced (V/M)
    pub fn win_ratio(&self) -> f64 {
        if self.matches_played == 0 {
            return 0.0;
        }
        self.wins as f64 / self.matches_played as f64
    }

    /// Ordering under the cascade (wins, indicator, touches scored), best first
    fn cascade_cmp(&self, other: &Self) -> Ordering {
        other
            .wins
            .cmp(&self.wins)
            .then_with(|| other.indicator.cmp(&self.indicator))
            .then_with(|| other.touches_scored.cmp(&self.touches_scored))
    }

    fn record(&mut self, scored: u32, received: u32) {
        // scores on stored matches are not re-checked against a target
        self.matches_played = self.matches_played.saturating_add(1);
        self.touches_scored = self.touches_scored.saturating_add(scored);
        self.touches_received = self.touches_received.saturating_add(received);
        self.indicator = i64::from(self.touches_scored) - i64::from(self.touches_received);
        match scored.cmp(&received) {
            Ordering::Greater => self.wins = self.wins.saturating_add(1),
            Ordering::Less => self.losses = self.losses.saturating_add(1),
            Ordering::Equal => {}
        }
    }
}

/// Outcome of the direct bouts between two entrants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeadToHead {
    Won,
    Lost,
    Even,
}

/// Standings of one pool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolStandings {
    pub pool_index: usize,
    pub standings: Vec<Standing>,
}

impl PoolStandings {
    /// Top `k` entries in rank order
    pub fn top(&self, k: usize) -> &[Standing] {
        &self.standings[..k.min(self.standings.len())]
    }

    pub fn get(&self, entrant: EntrantId) -> Option<&Standing> {
        self.standings.iter().find(|s| s.entrant == entrant)
    }
}

/// Ranking engine
pub struct RankingEngine;

impl RankingEngine {
    /// Rank entrants from a set of matches
    ///
    /// Only Completed matches between two real entrants count; anything else is
    /// skipped. Entrants are ordered by wins, then indicator, then touches
    /// scored, all descending. When exactly two entrants are level on all
    /// three, the winner of their direct bout goes first. Larger ties keep the
    /// order in which entrants first appear in `matches`.
    ///
    /// # Returns
    ///
    /// * `Vec<Standing>` - one entry per entrant of a counted match, ranks 1..=n
    pub fn rank(matches: &[Match]) -> Vec<Standing> {
        let mut standings: Vec<Standing> = Vec::new();
        let mut position: HashMap<EntrantId, usize> = HashMap::new();
        let mut direct: HashMap<(EntrantId, EntrantId), i32> = HashMap::new();
        let mut skipped = 0usize;

        for m in matches {
            if m.status != MatchStatus::Completed {
                skipped += 1;
                continue;
            }
            let Some((a, b)) = m.entrants() else {
                skipped += 1;
                continue;
            };

            for id in [a, b] {
                position.entry(id).or_insert_with(|| {
                    standings.push(Standing::new(id));
                    standings.len() - 1
                });
            }
            standings[position[&a]].record(m.score.a, m.score.b);
            standings[position[&b]].record(m.score.b, m.score.a);

            let margin = match m.score.a.cmp(&m.score.b) {
                Ordering::Greater => 1,
                Ordering::Less => -1,
                Ordering::Equal => 0,
            };
            *direct.entry((a, b)).or_insert(0) += margin;
            *direct.entry((b, a)).or_insert(0) -= margin;
        }

        if skipped > 0 {
            warn!("ranking skipped {skipped} matches that are not completed bouts");
        }

        // stable: equal keys keep first-appearance order
        standings.sort_by(Standing::cascade_cmp);

        let mut start = 0;
        while start < standings.len() {
            let mut end = start + 1;
            while end < standings.len()
                && standings[start].cascade_cmp(&standings[end]) == Ordering::Equal
            {
                end += 1;
            }
            if end - start == 2 {
                let first = standings[start].entrant;
                let second = standings[start + 1].entrant;
                if head_to_head(&direct, second, first) == HeadToHead::Won {
                    standings.swap(start, start + 1);
                }
            }
            start = end;
        }

        for (i, standing) in standings.iter_mut().enumerate() {
            standing.rank = i as u32 + 1;
        }
        standings
    }

    /// Rank the matches that belong to one pool
    pub fn rank_pool(pool_index: usize, matches: &[Match]) -> PoolStandings {
        let pool_matches: Vec<Match> = matches
            .iter()
            .filter(|m| m.pool_index() == Some(pool_index))
            .cloned()
            .collect();
        PoolStandings {
            pool_index,
            standings: Self::rank(&pool_matches),
        }
    }

    /// Rank every pool of a stage, in pool order
    pub fn rank_pools(pools: &[Pool], matches: &[Match]) -> Vec<PoolStandings> {
        pools
            .iter()
            .map(|pool| Self::rank_pool(pool.index, matches))
            .collect()
    }
}

/// Direct-bout outcome for `entrant` against `opponent`
pub fn head_to_head_of(matches: &[Match], entrant: EntrantId, opponent: EntrantId) -> HeadToHead {
    let mut net = 0i32;
    for m in matches.iter().filter(|m| m.status == MatchStatus::Completed) {
        match m.entrants() {
            Some((a, b)) if a == entrant && b == opponent => {
                net += m.score.a.cmp(&m.score.b) as i32;
            }
            Some((a, b)) if a == opponent && b == entrant => {
                net += m.score.b.cmp(&m.score.a) as i32;
            }
            _ => {}
        }
    }
    outcome(net)
}

fn head_to_head(
    direct: &HashMap<(EntrantId, EntrantId), i32>,
    entrant: EntrantId,
    opponent: EntrantId,
) -> HeadToHead {
    outcome(direct.get(&(entrant, opponent)).copied().unwrap_or(0))
}

fn outcome(net: i32) -> HeadToHead {
    match net.cmp(&0) {
        Ordering::Greater => HeadToHead::Won,
        Ordering::Less => HeadToHead::Lost,
        Ordering::Equal => HeadToHead::Even,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matches::PoolMatchGenerator;

    /// Round robin of `entrants` with scores given in generation order
    fn played(entrants: &[EntrantId], scores: &[(u32, u32)], target: u32) -> Vec<Match> {
        let mut matches = PoolMatchGenerator::generate(entrants, 1, 1, None);
        for (m, &(a, b)) in matches.iter_mut().zip(scores) {
            m.record_score(a, b, target).unwrap();
        }
        matches
    }

    fn order(standings: &[Standing]) -> Vec<EntrantId> {
        standings.iter().map(|s| s.entrant).collect()
    }

    #[test]
    fn test_cascade_order() {
        let matches = played(
            &[401, 402, 403, 404],
            &[(15, 10), (15, 12), (12, 15), (15, 14), (10, 15), (13, 15)],
            15,
        );
        let standings = RankingEngine::rank(&matches);
        assert_eq!(order(&standings), vec![404, 401, 402, 403]);

        let top = &standings[0];
        assert_eq!(top.wins, 3);
        assert_eq!(top.indicator, 10);
        assert_eq!(top.touches_scored, 45);
        assert_eq!(top.touches_received, 35);
        assert_eq!(top.rank, 1);
        assert_eq!(standings[3].rank, 4);
        assert_eq!(standings[3].losses, 3);
    }

    #[test]
    fn test_two_way_tie_uses_direct_bout() {
        // 1 and 2 finish level on wins, indicator and touches; 2 won their bout
        let matches = played(
            &[1, 2, 3, 4],
            &[(4, 5), (5, 2), (5, 2), (5, 0), (4, 5), (3, 5)],
            5,
        );
        let standings = RankingEngine::rank(&matches);
        assert_eq!(order(&standings), vec![2, 1, 4, 3]);
        assert_eq!(standings[0].indicator, standings[1].indicator);
        assert_eq!(standings[0].touches_scored, 14);
    }

    #[test]
    fn test_three_way_tie_keeps_appearance_order() {
        // 1 beats 2, 2 beats 3, 3 beats 1, all 5-4
        let matches = played(&[1, 2, 3], &[(5, 4), (4, 5), (5, 4)], 5);
        let standings = RankingEngine::rank(&matches);
        assert_eq!(order(&standings), vec![1, 2, 3]);
        assert!(standings.iter().all(|s| s.wins == 1 && s.indicator == 0));
    }

    #[test]
    fn test_incomplete_matches_ignored() {
        let mut matches = played(&[1, 2, 3], &[(5, 1)], 5);
        matches[2].cancel().unwrap();
        let standings = RankingEngine::rank(&matches);
        assert_eq!(order(&standings), vec![1, 2]);
        assert_eq!(standings[0].matches_played, 1);
    }

    #[test]
    fn test_draw_counts_no_win() {
        let matches = played(&[1, 2], &[(3, 3)], 5);
        let standings = RankingEngine::rank(&matches);
        assert!(standings.iter().all(|s| s.wins == 0 && s.losses == 0));
        assert_eq!(standings[0].matches_played, 1);
        assert_eq!(order(&standings), vec![1, 2]);
    }

    #[test]
    fn test_stored_scores_saturate() {
        let mut matches = played(&[1, 2, 3], &[(5, 1), (5, 2), (5, 4)], 5);
        // scores edited outside record_score, as a loaded match may carry
        matches[0].score.a = u32::MAX - 1;
        matches[1].score.a = 10;
        let standings = RankingEngine::rank(&matches);
        let first = &standings[0];
        assert_eq!(first.entrant, 1);
        assert_eq!(first.touches_scored, u32::MAX);
        assert_eq!(first.touches_received, 3);
        assert_eq!(first.indicator, i64::from(u32::MAX) - 3);
        assert_eq!(first.wins, 2);
    }

    #[test]
    fn test_rank_is_pure() {
        let matches = played(&[7, 8, 9, 10], &[(5, 3), (2, 5), (5, 4), (5, 1), (0, 5), (4, 5)], 5);
        assert_eq!(RankingEngine::rank(&matches), RankingEngine::rank(&matches));
    }

    #[test]
    fn test_win_ratio() {
        let matches = played(&[1, 2, 3], &[(5, 1), (5, 2), (1, 5)], 5);
        let standings = RankingEngine::rank(&matches);
        assert_eq!(standings[0].win_ratio(), 1.0);
        assert_eq!(Standing::new(9).win_ratio(), 0.0);
    }

    #[test]
    fn test_head_to_head_of() {
        let matches = played(&[1, 2, 3], &[(5, 1), (3, 3), (1, 5)], 5);
        assert_eq!(head_to_head_of(&matches, 1, 2), HeadToHead::Won);
        assert_eq!(head_to_head_of(&matches, 2, 1), HeadToHead::Lost);
        assert_eq!(head_to_head_of(&matches, 1, 3), HeadToHead::Even);
    }

    #[test]
    fn test_rank_pools() {
        let pools = vec![
            Pool::new(0, 1, vec![1, 2], 2),
            Pool::new(1, 2, vec![3, 4], 2),
        ];
        let mut matches = PoolMatchGenerator::generate_all(&pools, 1, 1, None);
        matches[0].record_score(2, 5, 5).unwrap();
        matches[1].record_score(5, 0, 5).unwrap();

        let ranked = RankingEngine::rank_pools(&pools, &matches);
        assert_eq!(ranked.len(), 2);
        assert_eq!(order(&ranked[0].standings), vec![2, 1]);
        assert_eq!(order(&ranked[1].standings), vec![3, 4]);
        assert_eq!(ranked[1].top(1)[0].entrant, 3);
        assert_eq!(ranked[1].top(10).len(), 2);
    }
}
