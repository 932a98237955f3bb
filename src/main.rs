#![deny(
    unused_import_braces,
    unused_lifetimes,
    unreachable_pub,
    trivial_numeric_casts,
    missing_debug_implementations,
    missing_copy_implementations,
    deprecated_in_future,
    meta_variable_misuse,
    non_ascii_idents,
    rust_2018_compatibility,
    rust_2018_idioms,
    future_incompatible,
    nonstandard_style,
    clippy::all
)]
#![warn(variant_size_differences, let_underscore_drop)]

//! # Ubistats

pub mod cli_options;
pub mod config;
pub mod logger;
pub mod render;
pub mod setup;
pub mod util;

use crate::{
    cli_options::{
        CliOptions,
        OutputFormat,
    },
    config::Config,
};
use anyhow::Context as _;
use tracing::info;
use ubi_stats::{
    Aggregation,
    AggregationKind,
    BombsiteStats,
    Decoder,
    MapStats,
    MovingTrendStats,
    OperatorStats,
    SummarizedStats,
    WeaponStats,
};

/// Pre-main setup
fn setup(cli_options: &CliOptions) -> anyhow::Result<Config> {
    let config = setup::load_config(&cli_options.config).context("failed to load config")?;

    eprintln!("setting up logger...");
    logger::setup(&config).context("failed to initialize logger")?;

    eprintln!();
    Ok(config)
}

/// Decode a response body and print it in the requested format.
fn print_aggregation<A>(
    decoder: &Decoder,
    bytes: &[u8],
    format: OutputFormat,
    render_table: fn(&A) -> render::RenderResult,
) -> anyhow::Result<()>
where
    A: Aggregation + serde::Serialize,
{
    let stats: A = decoder
        .decode(bytes)
        .with_context(|| format!("failed to decode {} response", A::KIND))?;

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&stats).context("failed to serialize stats")?;
            println!("{json}");
        }
        OutputFormat::Table => {
            let table = render_table(&stats).context("failed to render table")?;
            print!("{table}");
        }
    }

    Ok(())
}

/// The main entry.
///
/// Loads config and sets up logging, logging errors to the stderr directly until the logger exists.
fn main() -> anyhow::Result<()> {
    // This line MUST run first.
    // It is needed to exit early if the options are invalid,
    // and this will NOT run destructors if it does so.
    let cli_options: CliOptions = argh::from_env();

    let config = setup(&cli_options)?;
    real_main(cli_options, config)
}

/// The actual entry point
fn real_main(cli_options: CliOptions, config: Config) -> anyhow::Result<()> {
    info!("reading `{}`...", cli_options.input);
    let bytes = std::fs::read(&cli_options.input)
        .with_context(|| format!("failed to read `{}`", cli_options.input))?;

    let decoder = Decoder::with_options(config.decode_options());
    let format = cli_options.format;

    match cli_options.kind {
        AggregationKind::Summary => {
            print_aggregation::<SummarizedStats>(&decoder, &bytes, format, render::summary)
        }
        AggregationKind::Operators => {
            print_aggregation::<OperatorStats>(&decoder, &bytes, format, render::operators)
        }
        AggregationKind::Maps => {
            print_aggregation::<MapStats>(&decoder, &bytes, format, render::maps)
        }
        AggregationKind::Bombsites => {
            print_aggregation::<BombsiteStats>(&decoder, &bytes, format, render::bombsites)
        }
        AggregationKind::Weapons => {
            print_aggregation::<WeaponStats>(&decoder, &bytes, format, render::weapons)
        }
        AggregationKind::MovingPoint => {
            print_aggregation::<MovingTrendStats>(&decoder, &bytes, format, render::moving_trends)
        }
    }
}
