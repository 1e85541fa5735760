//! Plain-text rendering of pools, standings and brackets.

use fencing_engine::matches::{MatchStatus, Slot};
use fencing_engine::{Bracket, Match, Pool, PoolStandings};
use std::fmt::Write;

/// One line per pool with its members in seed order
pub fn format_pools(pools: &[Pool]) -> String {
    let mut out = String::new();
    for pool in pools {
        let members: Vec<String> = pool.members.iter().map(|id| format!("#{id}")).collect();
        let _ = writeln!(
            out,
            "Pool {} ({} fencers, {} bouts): {}",
            pool.letter,
            pool.len(),
            pool.bout_count(),
            members.join(" ")
        );
    }
    out
}

/// Bout list with ids, so scores can be entered against them
pub fn format_bouts(matches: &[Match]) -> String {
    let mut out = String::new();
    for m in matches {
        let when = m
            .scheduled_at
            .map(|t| t.format(" %H:%M").to_string())
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "[{:>3}] pool {} {}{}: {} vs {} {}",
            m.id,
            m.pool_index().map(|i| i + 1).unwrap_or(0),
            m.label,
            when,
            m.a,
            m.b,
            result(m)
        );
    }
    out
}

/// Standings table per pool
pub fn format_standings(pools: &[PoolStandings]) -> String {
    let mut out = String::new();
    for pool in pools {
        let _ = writeln!(out, "Pool {}", pool.pool_index + 1);
        let _ = writeln!(out, "  Rk  Fencer      V   M   TS   TR   Ind");
        for s in &pool.standings {
            let _ = writeln!(
                out,
                "  {:>2}  #{:<9} {:>2}  {:>2}  {:>3}  {:>3}  {:>+4}{}",
                s.rank,
                s.entrant,
                s.wins,
                s.matches_played,
                s.touches_scored,
                s.touches_received,
                s.indicator,
                if s.qualified { "  Q" } else { "" }
            );
        }
    }
    out
}

/// Bracket listing by round
pub fn format_bracket(bracket: &Bracket) -> String {
    let mut out = String::new();
    for round in 1..=bracket.rounds {
        let _ = writeln!(out, "{}", bracket.round_name(round));
        for m in bracket.round(round) {
            let _ = writeln!(out, "  [{:>3}] {} vs {} {}", m.id, m.a, m.b, result(m));
        }
    }
    if let Some(champion) = bracket.champion() {
        let _ = writeln!(out, "Champion: #{champion}");
    }
    out
}

fn result(m: &Match) -> String {
    match m.status {
        MatchStatus::Completed if m.a == Slot::Bye || m.b == Slot::Bye => "(bye)".to_string(),
        MatchStatus::Completed => format!("{}-{}", m.score.a, m.score.b),
        MatchStatus::Forfeited => "(forfeit)".to_string(),
        status => format!("({status})"),
    }
}
