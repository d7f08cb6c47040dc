//! Rangedice round simulator
//!
//! Plays a configurable number of randomized rounds against an in-memory
//! treasury and prints a house-accounting summary. Aborted rounds restore
//! the treasury from a pre-round checkpoint, emulating the all-or-nothing
//! round semantics a hosting platform provides.

use clap::Parser;
use rand::{rngs::StdRng, Rng, SeedableRng};
use rangedice::{
    config::{self, ConfigLoader, DiceConfig},
    errors::BetError,
    limits::{self, MIN_STAKE},
    side_bet::SideBetType,
    treasury::Treasury,
    BetRequest, InMemoryTreasury, Round, RoundContext, SettlementResult, TracingEventSink,
};
use std::collections::BTreeMap;

const TOKEN: u128 = 1_000_000_000_000_000_000;

#[derive(Parser, Debug)]
#[command(name = "rangedice")]
#[command(about = "Number-range dice game round simulator", long_about = None)]
struct Args {
    /// Configuration file (TOML); defaults plus env overrides when omitted
    #[arg(long)]
    config: Option<String>,

    /// Override the number of rounds to play
    #[arg(long)]
    rounds: Option<u64>,

    /// Override the RNG seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Write a sample configuration file to this path and exit
    #[arg(long)]
    sample_config: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rangedice=info".into()),
        )
        .init();

    let args = Args::parse();

    if let Some(path) = args.sample_config {
        config::generate_sample_config(&path)?;
        println!("📝 Sample configuration written to {}", path);
        return Ok(());
    }

    let loader = match &args.config {
        Some(path) => ConfigLoader::new().with_path(path),
        None => ConfigLoader::new(),
    };
    let mut config = loader.load()?;
    if let Some(rounds) = args.rounds {
        config.simulation.rounds = rounds;
    }
    if let Some(seed) = args.seed {
        config.simulation.rng_seed = Some(seed);
    }

    run_simulation(&config);
    Ok(())
}

fn run_simulation(config: &DiceConfig) {
    let mut rng = match config.simulation.rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let starting_balance = config.simulation.starting_reserve_tokens as u128 * TOKEN;
    let mut treasury = InMemoryTreasury::new(starting_balance);
    let events = TracingEventSink;
    let mut stats = SimulationStats::default();

    println!(
        "🎲 Playing {} rounds against a {}-token treasury",
        config.simulation.rounds, config.simulation.starting_reserve_tokens
    );

    for round_index in 0..config.simulation.rounds {
        let (ctx, request, stake) = random_round(&mut rng, &treasury, round_index);

        // Pre-round checkpoint stands in for the host's atomic rollback.
        let checkpoint = treasury.clone();
        match Round::new(&config.game, &mut treasury, &events).place_bet(&ctx, &request, stake) {
            Ok(result) => stats.record_settled(stake, &result),
            Err(error) => {
                treasury = checkpoint;
                stats.record_rejected(&error);
            }
        }
    }

    stats.print(starting_balance, treasury.balance());
}

/// Builds a mostly-valid randomized round; a small share of requests is
/// deliberately malformed so the rejection paths show up in the summary.
fn random_round(
    rng: &mut StdRng,
    treasury: &InMemoryTreasury,
    round_index: u64,
) -> (RoundContext, BetRequest, u128) {
    let mut transaction_id = [0u8; 32];
    rng.fill(&mut transaction_id[..]);
    let ctx = RoundContext::new(
        transaction_id,
        1_700_000_000_000_000 + round_index,
        format!("hx{:08x}", rng.gen::<u32>()),
    );

    let reserve = treasury.reserve_floor();
    let lower = rng.gen_range(0..=99);
    let span = rng.gen_range(0..=(99 - lower).min(95));
    let upper = lower + span;
    let gap = (span + 1) as u8;

    let mut request = BetRequest::range(lower, upper).with_seed(format!("round-{}", round_index));

    if rng.gen_ratio(1, 20) {
        // Malformed on purpose: range outside the number space.
        request.upper = rng.gen_range(100..=120);
        return (ctx, request, TOKEN);
    }

    let main_ceiling = limits::main_bet_limit(reserve, gap).max(MIN_STAKE);
    let main_amount = rng.gen_range(MIN_STAKE..=main_ceiling.min(50 * TOKEN).max(MIN_STAKE));

    let mut stake = main_amount;
    if rng.gen_ratio(1, 4) {
        let kind = SideBetType::ALL[rng.gen_range(0..SideBetType::ALL.len())];
        let side_ceiling = limits::side_bet_limit(reserve, kind).max(MIN_STAKE);
        let side_amount = rng.gen_range(MIN_STAKE..=side_ceiling.min(10 * TOKEN).max(MIN_STAKE));
        request = request.with_side_bet(kind.to_string(), side_amount as i128);
        stake += side_amount;
    }

    (ctx, request, stake)
}

#[derive(Default)]
struct SimulationStats {
    settled: u64,
    won: u64,
    total_staked: u128,
    total_paid: u128,
    rejections: BTreeMap<&'static str, u64>,
}

impl SimulationStats {
    fn record_settled(&mut self, stake: u128, result: &SettlementResult) {
        self.settled += 1;
        self.total_staked += stake;
        self.total_paid += result.total_payout;
        if result.total_payout > 0 {
            self.won += 1;
        }
    }

    fn record_rejected(&mut self, error: &BetError) {
        *self.rejections.entry(reason_label(error)).or_insert(0) += 1;
    }

    fn print(&self, starting_balance: u128, final_balance: u128) {
        let rejected: u64 = self.rejections.values().sum();
        println!("\n📊 Simulation complete");
        println!(
            "   Rounds settled: {} ({} won, {} lost)",
            self.settled,
            self.won,
            self.settled - self.won
        );
        println!("   Rounds rejected: {}", rejected);
        for (reason, count) in &self.rejections {
            println!("     {}: {}", reason, count);
        }
        println!("   Total staked: {} tokens", format_tokens(self.total_staked));
        println!("   Total paid out: {} tokens", format_tokens(self.total_paid));
        let net = self.total_staked as i128 - self.total_paid as i128;
        println!(
            "   House net: {}{} tokens",
            if net < 0 { "-" } else { "" },
            format_tokens(net.unsigned_abs())
        );
        println!(
            "   Treasury balance: {} -> {} tokens",
            format_tokens(starting_balance),
            format_tokens(final_balance)
        );
    }
}

fn reason_label(error: &BetError) -> &'static str {
    match error {
        BetError::GameInactive => "game inactive",
        BetError::RangeOutOfBounds { .. } => "range out of bounds",
        BetError::InvalidGap { .. } => "invalid gap",
        BetError::InconsistentSideBet => "inconsistent side bet",
        BetError::NegativeSideBetAmount { .. } => "negative side bet amount",
        BetError::UnknownSideBetType { .. } => "unknown side bet type",
        BetError::SideBetAmountOutOfRange { .. } => "side bet amount out of range",
        BetError::NoMainBetAmount => "no main bet amount",
        BetError::MainBetAmountOutOfRange { .. } => "main bet amount out of range",
        BetError::InsufficientReserve { .. } => "insufficient reserve",
        BetError::NonHumanCaller => "non-human caller",
        BetError::PayoutTransfer(_) => "payout transfer failure",
    }
}

/// Formats a smallest-unit amount as whole tokens with three decimals.
fn format_tokens(amount: u128) -> String {
    format!("{}.{:03}", amount / TOKEN, amount % TOKEN / (TOKEN / 1_000))
}
