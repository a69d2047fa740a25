//! Apportion CLI
//!
//! Splits an amount into exact proportional parts from the command line.

use anyhow::{Context, bail};
use clap::Parser;
use rust_decimal::Decimal;
use tracing::{debug, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use apportion_core::allocation::{Allocator, WeightSpec, allocate_money};
use apportion_shared::{AppConfig, Currency, Money};

/// Split an amount into parts proportional to the given weights.
///
/// The parts always add up to the amount exactly.
#[derive(Debug, Parser)]
#[command(name = "apportion", version, allow_negative_numbers = true)]
struct Opts {
    /// Amount to split. Read as minor units unless a currency is given.
    amount: Decimal,

    /// Relative weight of each party, in output order.
    weights: Vec<Decimal>,

    /// Split evenly among this many parties.
    #[clap(short = 'n', long, conflicts_with = "weights")]
    parties: Option<usize>,

    /// Keep fractional parts instead of truncating to whole units.
    #[clap(long, action = clap::ArgAction::SetTrue)]
    fractional: bool,

    /// Read the amount as major units of this currency (e.g. USD, JPY).
    #[clap(short = 'c', long)]
    currency: Option<Currency>,

    /// Print the parts as a JSON array.
    #[clap(long, action = clap::ArgAction::SetTrue)]
    json: bool,
}

impl Opts {
    fn weight_spec(&self) -> anyhow::Result<WeightSpec> {
        match self.parties {
            Some(parties) => Ok(WeightSpec::Count(parties)),
            None if self.weights.is_empty() => {
                bail!("Either WEIGHTS or --parties must be given")
            }
            None => Ok(WeightSpec::Weights(self.weights.clone())),
        }
    }
}

/// Runs the allocation described by the options, with configuration defaults
/// filling in what the command line leaves out.
fn run(opts: &Opts, config: &AppConfig) -> anyhow::Result<Vec<Decimal>> {
    let weights = opts.weight_spec()?;

    if let Some(currency) = opts.currency.or(config.allocation.currency) {
        if opts.fractional {
            warn!(%currency, "--fractional is ignored when allocating money");
        }
        let money = Money::new(opts.amount, currency);
        let parts = allocate_money(&money, weights)
            .with_context(|| format!("Failed to allocate {} {currency}", opts.amount))?;
        return Ok(parts.into_iter().map(|m| m.amount).collect());
    }

    let whole_units = config.allocation.whole_units && !opts.fractional;
    debug!(amount = %opts.amount, whole_units, "Allocating");
    Allocator::with_whole_units(whole_units)
        .allocate(opts.amount, weights)
        .with_context(|| format!("Failed to allocate {}", opts.amount))
}

fn render(parts: &[Decimal], json: bool) -> anyhow::Result<String> {
    if json {
        return serde_json::to_string(parts).context("Failed to encode result");
    }
    Ok(parts
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n"))
}

fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let opts = Opts::parse();
    let config = AppConfig::load().context("Failed to load configuration")?;

    // Initialize tracing; stdout is reserved for the result
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log.filter)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let parts = run(&opts, &config)?;
    println!("{}", render(&parts, opts.json)?);

    Ok(())
}
