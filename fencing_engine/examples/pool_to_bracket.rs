//! Pool to Bracket Example
//!
//! Seeds a small field into pools, plays the pools with made-up scores, ranks
//! them and runs the elimination table to a champion.

use fencing_engine::{
    BracketGenerator, EngineConfig, PoolMatchGenerator, PromotionSelector, RankingEngine,
    RulePreset, SeedingEngine,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Pool to Bracket Example ===\n");

    let config = EngineConfig::from_preset(&RulePreset::youth());
    let roster: Vec<i64> = (101..=118).collect();

    // Step 1: seed the field into pools
    let pools = SeedingEngine::from_config(&config)?.seed(&roster)?;
    for pool in &pools {
        println!("Pool {}: {:?}", pool.letter, pool.members);
    }

    // Step 2: fence the round robins; the better seed wins by a few touches
    let mut bouts = PoolMatchGenerator::generate_all(&pools, 1, 1, None);
    for bout in &mut bouts {
        if let Some((a, b)) = bout.entrants() {
            let loser = ((a + b) % 4) as u32;
            if a < b {
                bout.record_score(config.pool_target_score, loser, config.pool_target_score)?;
            } else {
                bout.record_score(loser, config.pool_target_score, config.pool_target_score)?;
            }
        }
    }
    println!("\n{} pool bouts recorded", bouts.len());

    // Step 3: rank each pool and take the qualifiers
    let mut standings = RankingEngine::rank_pools(&pools, &bouts);
    PromotionSelector::flag_qualifiers(&mut standings, config.promotion_count)?;
    for pool in &standings {
        println!("\nPool {} standings:", pool.pool_index + 1);
        for s in &pool.standings {
            println!(
                "  {}. #{} V={} TS={} TR={} Ind={:+}{}",
                s.rank,
                s.entrant,
                s.wins,
                s.touches_scored,
                s.touches_received,
                s.indicator,
                if s.qualified { "  Q" } else { "" }
            );
        }
    }
    let qualifiers = PromotionSelector::promote(&standings, config.promotion_count)?;

    // Step 4: elimination table
    let mut bracket = BracketGenerator::generate(&qualifiers, 2, config.bracket_type)?;
    bracket.resolve_byes()?;
    println!(
        "\nElimination table of {} for {} qualifiers",
        bracket.size,
        qualifiers.len()
    );

    for round in 1..=bracket.rounds {
        println!("\n{}:", bracket.round_name(round));
        let ids: Vec<usize> = bracket.round(round).map(|m| m.id).collect();
        for id in ids {
            let m = bracket.get(id)?;
            let Some((a, b)) = m.entrants() else {
                println!("  {} vs {} (bye)", m.a, m.b);
                continue;
            };
            let (sa, sb) = if a < b { (10, 7) } else { (7, 10) };
            bracket.record_result(id, sa, sb, config.elimination_target_score)?;
            println!("  #{a} vs #{b}: {sa}-{sb}");
        }
    }

    match bracket.champion() {
        Some(champion) => println!("\nChampion: #{champion}"),
        None => println!("\nNo champion decided"),
    }

    Ok(())
}
