//! Fencing competition runner.
//!
//! Each invocation loads the event file, runs one step of the pool-to-bracket
//! pipeline through a `StageDirector` and saves the event again.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Error, bail};
use chrono::{DateTime, Utc};
use fe_cli::config::{CliConfig, CliOverrides};
use fe_cli::event::{self, ELIMINATION_STAGE, POOL_STAGE};
use fe_cli::{logging, report};
use fencing_engine::director::{PersistenceSink, StageDirector};
use fencing_engine::seeding::summarize;
use fencing_engine::{EntrantId, RulePreset};
use log::info;
use pico_args::Arguments;

const HELP: &str = "\
Run a fencing competition from pools to the final

USAGE:
  fe_cli [OPTIONS] <COMMAND> [ARGS]

COMMANDS:
  init <IDS>               Register entrants in seed order (comma-separated IDs)
  pools                    Seed the pools and generate their bouts
  score <BOUT> <A> <B>     Record a pool bout
  rank                     Rank the pools and mark qualifiers
  bracket                  Build the elimination table from the qualifiers
  advance <MATCH> <A> <B>  Record an elimination bout and advance the winner
  show                     Print pools, standings and the table
  rules                    List rule presets

OPTIONS:
  --event      PATH        Event file                  [default: env FE_EVENT_FILE]
  --rule       NAME        Rule preset                 [default: env FE_RULE or weapon default]
  --weapon     NAME        foil, epee or sabre         [default: env FE_WEAPON or epee]
  --pool-size  N           Preferred pool size         [default: env FE_POOL_SIZE or rule]
  --promote    N           Qualifiers per pool         [default: env FE_PROMOTION_COUNT or rule]
  --start      RFC3339     Start time for pool bouts   [pools only]

FLAGS:
  -h, --help               Print help information

ENVIRONMENT:
  FE_MIN_POOL_SIZE         Smallest pool allowed
  FE_BRACKET_TYPE          single_elimination (only supported type)
  FE_LOG_FORMAT            plain for env_logger output
  RUST_LOG                 Log filter
";

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let overrides = CliOverrides {
        event_file: pargs.opt_value_from_str("--event")?,
        rule: pargs.opt_value_from_str("--rule")?,
        weapon: pargs.opt_value_from_str("--weapon")?,
        pool_size: pargs.opt_value_from_str("--pool-size")?,
        promotion_count: pargs.opt_value_from_str("--promote")?,
    };
    let start: Option<DateTime<Utc>> = pargs.opt_value_from_str("--start")?;
    let command = pargs.subcommand()?.unwrap_or_else(|| "show".to_string());

    if command == "rules" {
        for preset in RulePreset::all() {
            println!(
                "{:<20} {:<18} pool {} to {}, DE to {}, ratio {:.1}  {}",
                preset.name,
                preset.bracket_type.to_string(),
                preset.pool_size,
                preset.pool_target_score,
                preset
                    .elimination_target_score
                    .map(|t| t.to_string())
                    .unwrap_or_else(|| "-".to_string()),
                preset.qualification_ratio,
                preset.description
            );
        }
        return Ok(());
    }

    let config = CliConfig::load(overrides)?;
    logging::init(config.log_format);
    config.validate()?;
    info!(
        "Event {} ({} rule, {})",
        config.event_file.display(),
        config.rule,
        config.weapon
    );

    let store = Arc::new(event::load(&config.event_file).await?);
    let director = StageDirector::new(store.clone(), store.clone(), config.engine.clone())?;

    match command.as_str() {
        "init" => {
            let ids: String = pargs.free_from_str().context("init needs entrant IDs")?;
            let entrants = parse_ids(&ids)?;
            info!("Registered {} entrants", entrants.len());
            store.set_roster(POOL_STAGE, entrants).await;
        }
        "pools" => {
            let timer = Instant::now();
            let entrants = store.snapshot().await.rosters.remove(&POOL_STAGE);
            let pools = director.seed_pool_stage(POOL_STAGE, start).await?;
            logging::log_generation(
                POOL_STAGE,
                "pools",
                pools.len(),
                timer.elapsed().as_millis() as u64,
            );
            if let Some(entrants) = entrants {
                let summary = summarize(&entrants, &pools);
                info!("Pool sizes {:?}", summary.pool_sizes);
            }
            print!("{}", report::format_pools(&pools));
            print!(
                "{}",
                report::format_bouts(&store.load_matches(POOL_STAGE).await?)
            );
        }
        "score" => {
            let (bout, a, b) = parse_result(&mut pargs)?;
            let m = director.record_pool_result(POOL_STAGE, bout, a, b).await?;
            print!("{}", report::format_bouts(std::slice::from_ref(&m)));
        }
        "rank" => {
            let timer = Instant::now();
            let qualifiers = director.close_pool_stage(POOL_STAGE).await?;
            logging::log_generation(
                POOL_STAGE,
                "standings",
                qualifiers.len(),
                timer.elapsed().as_millis() as u64,
            );
            print!(
                "{}",
                report::format_standings(&store.load_standings(POOL_STAGE).await?)
            );
        }
        "bracket" => {
            let timer = Instant::now();
            let qualifiers = director.close_pool_stage(POOL_STAGE).await?;
            let bracket = director
                .build_elimination(ELIMINATION_STAGE, &qualifiers)
                .await?;
            logging::log_generation(
                ELIMINATION_STAGE,
                "bracket",
                bracket.matches.len(),
                timer.elapsed().as_millis() as u64,
            );
            print!("{}", report::format_bracket(&bracket));
        }
        "advance" => {
            let (id, a, b) = parse_result(&mut pargs)?;
            let bracket = director
                .record_bracket_result(ELIMINATION_STAGE, id, a, b)
                .await?;
            print!("{}", report::format_bracket(&bracket));
        }
        "show" => {
            if let Some(pools) = store.load_pools(POOL_STAGE).await? {
                print!("{}", report::format_pools(&pools));
                print!(
                    "{}",
                    report::format_bouts(&store.load_matches(POOL_STAGE).await?)
                );
            }
            let standings = store.load_standings(POOL_STAGE).await?;
            if !standings.is_empty() {
                print!("{}", report::format_standings(&standings));
            }
            if let Some(bracket) = store.load_bracket(ELIMINATION_STAGE).await? {
                print!("{}", report::format_bracket(&bracket));
            }
        }
        other => bail!("Unknown command '{other}', see --help"),
    }

    let remaining = pargs.finish();
    if !remaining.is_empty() {
        log::warn!("Ignoring extra arguments: {:?}", remaining);
    }

    event::save(&config.event_file, &store).await?;
    Ok(())
}

/// Parse a comma-separated list of entrant IDs
fn parse_ids(raw: &str) -> Result<Vec<EntrantId>, Error> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<EntrantId>()
                .with_context(|| format!("'{s}' is not an entrant ID"))
        })
        .collect()
}

/// Read `<ID> <A> <B>` positional arguments
fn parse_result(pargs: &mut Arguments) -> Result<(usize, u32, u32), Error> {
    let id = pargs.free_from_str().context("missing match ID")?;
    let a = pargs.free_from_str().context("missing score for side A")?;
    let b = pargs.free_from_str().context("missing score for side B")?;
    Ok((id, a, b))
}
