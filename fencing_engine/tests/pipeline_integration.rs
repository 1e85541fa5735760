//! Integration tests for the full pool-to-bracket pipeline.
//!
//! Covers seeding, round-robin generation, ranking with tie-breaks,
//! promotion and playing a bracket through to the final.

use fencing_engine::matches::{MatchStatus, Slot};
use fencing_engine::ranking::PoolStandings;
use fencing_engine::{
    BracketGenerator, BracketType, EntrantId, EngineConfig, EngineError, Match, PoolMatchGenerator,
    PromotionSelector, RankingEngine, SeedingEngine,
};

/// Round robin with the given scores applied in generation order
fn played(entrants: &[EntrantId], scores: &[(u32, u32)], target: u32) -> Vec<Match> {
    let mut matches = PoolMatchGenerator::generate(entrants, 1, 1, None);
    assert_eq!(matches.len(), scores.len());
    for (m, &(a, b)) in matches.iter_mut().zip(scores) {
        m.record_score(a, b, target).unwrap();
    }
    matches
}

/// Lower ID always wins, margin depends on the gap
fn play_by_seed(matches: &mut [Match], target: u32) {
    for m in matches.iter_mut() {
        let (a, b) = m.entrants().unwrap();
        let margin = ((a - b).unsigned_abs() % target as u64) as u32;
        let loser_score = target - 1 - margin.min(target - 1);
        if a < b {
            m.record_score(target, loser_score, target).unwrap();
        } else {
            m.record_score(loser_score, target, target).unwrap();
        }
    }
}

#[test]
fn test_ranking_cascade_scenario() {
    let matches = played(
        &[401, 402, 403, 404],
        &[(15, 10), (15, 12), (12, 15), (15, 14), (10, 15), (13, 15)],
        15,
    );

    let first = RankingEngine::rank(&matches);
    let order: Vec<EntrantId> = first.iter().map(|s| s.entrant).collect();
    assert_eq!(order, vec![404, 401, 402, 403]);
    assert_eq!(first[0].wins, 3);
    assert_eq!(first[0].indicator, 10);

    // same input, same output
    assert_eq!(RankingEngine::rank(&matches), first);
}

#[test]
fn test_head_to_head_scenario() {
    let matches = played(&[501, 502, 503], &[(15, 10), (15, 5), (15, 5)], 15);
    let order: Vec<EntrantId> = RankingEngine::rank(&matches)
        .iter()
        .map(|s| s.entrant)
        .collect();
    assert_eq!(order, vec![501, 502, 503]);
}

#[test]
fn test_promotion_two_pools() {
    let pool_a = played(
        &[1, 2, 3, 4],
        &[(5, 1), (5, 2), (5, 3), (5, 1), (5, 2), (5, 4)],
        5,
    );
    let pool_b = played(
        &[5, 6, 7, 8],
        &[(1, 5), (5, 2), (5, 3), (5, 1), (5, 2), (5, 4)],
        5,
    );
    let standings = vec![
        PoolStandings {
            pool_index: 0,
            standings: RankingEngine::rank(&pool_a),
        },
        PoolStandings {
            pool_index: 1,
            standings: RankingEngine::rank(&pool_b),
        },
    ];

    let qualifiers = PromotionSelector::promote(&standings, 2).unwrap();
    assert_eq!(qualifiers.len(), 4);
    assert_eq!(
        qualifiers,
        vec![
            standings[0].standings[0].entrant,
            standings[0].standings[1].entrant,
            standings[1].standings[0].entrant,
            standings[1].standings[1].entrant,
        ]
    );
    assert_eq!(&qualifiers[..2], &[1, 2]);
}

#[test]
fn test_pool_to_champion() {
    let config = EngineConfig::default();
    let roster: Vec<EntrantId> = (1..=24).collect();

    let pools = SeedingEngine::from_config(&config)
        .unwrap()
        .seed(&roster)
        .unwrap();
    assert_eq!(pools.len(), 4);

    let mut matches = PoolMatchGenerator::generate_all(&pools, 1, 1, None);
    assert_eq!(matches.len(), 4 * 15);
    play_by_seed(&mut matches, config.pool_target_score);

    let mut standings = RankingEngine::rank_pools(&pools, &matches);
    PromotionSelector::flag_qualifiers(&mut standings, config.promotion_count).unwrap();
    let qualifiers = PromotionSelector::promote(&standings, config.promotion_count).unwrap();
    assert_eq!(qualifiers.len(), 16);
    // the best seed of each pool tops it
    assert_eq!(&qualifiers[..4], &pools[0].members[..4]);
    assert!(standings.iter().all(|p| p.standings[3].qualified));
    assert!(standings.iter().all(|p| !p.standings[4].qualified));

    let mut bracket =
        BracketGenerator::generate(&qualifiers, 2, config.bracket_type).unwrap();
    assert_eq!(bracket.size, 16);
    assert!(bracket.resolve_byes().unwrap().is_empty());

    for round in 1..=bracket.rounds {
        let ids: Vec<usize> = bracket.round(round).map(|m| m.id).collect();
        for id in ids {
            let (a, b) = bracket.matches[id].entrants().unwrap();
            let (sa, sb) = if a < b { (15, 11) } else { (11, 15) };
            bracket
                .record_result(id, sa, sb, config.elimination_target_score)
                .unwrap();
        }
    }

    assert_eq!(bracket.champion(), Some(1));
    assert!(bracket.matches.iter().all(|m| m.status == MatchStatus::Completed));
}

#[test]
fn test_regeneration_is_identical() {
    let roster: Vec<EntrantId> = vec![90, 12, 55, 3, 71, 28, 40, 66, 19, 8, 33];
    let engine = SeedingEngine::new(5, 3).unwrap();

    let first = engine.seed(&roster).unwrap();
    let second = engine.seed(&roster).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        PoolMatchGenerator::generate_all(&first, 3, 1, None),
        PoolMatchGenerator::generate_all(&second, 3, 1, None)
    );
}

#[test]
fn test_validation_failures_emit_nothing() {
    assert!(matches!(
        SeedingEngine::new(7, 3).unwrap().seed(&[42]),
        Err(EngineError::Validation(_))
    ));
    assert!(matches!(
        BracketGenerator::generate(&[42], 1, BracketType::SingleElimination),
        Err(EngineError::Validation(_))
    ));
    assert!(matches!(
        BracketGenerator::generate(&[1, 2, 3, 4], 1, BracketType::RoundRobinOnly),
        Err(EngineError::Configuration(_))
    ));
    assert!(matches!(
        PromotionSelector::promote(&[], 0),
        Err(EngineError::Validation(_))
    ));
}

#[test]
fn test_pool_draw_and_cancelled_bout() {
    let mut matches = PoolMatchGenerator::generate(&[1, 2, 3], 1, 1, None);
    matches[0].record_score(4, 4, 5).unwrap();
    matches[1].record_score(5, 2, 5).unwrap();
    matches[2].cancel().unwrap();

    let standings = RankingEngine::rank(&matches);
    assert_eq!(standings[0].entrant, 1);
    assert_eq!(standings[0].wins, 1);
    assert_eq!(standings.len(), 3);
    assert_eq!(matches[0].a, Slot::Real(1));
    assert_eq!(matches[0].winner, None);
}
