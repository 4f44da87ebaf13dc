use std::process::ExitCode;

use clap::Parser;
use kline_fetch::{
    BinanceKlineSource, Cli, KlineFetcher,
    config::BinanceApiConfig,
    report::{close_percentiles, percentile_lines, preview_table},
};

fn init_log() {
    let (global_level, my_code_level) = if cfg!(debug_assertions) {
        (log::LevelFilter::Warn, log::LevelFilter::Info)
    } else {
        (log::LevelFilter::Error, log::LevelFilter::Error)
    };

    // RUST_LOG, when set, overrides the levels above
    env_logger::Builder::new()
        .filter(None, global_level)
        .filter(Some("kline_fetch"), my_code_level)
        .parse_env(env_logger::Env::default())
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_log();
    let args = Cli::parse();

    let fetcher = KlineFetcher::new(BinanceKlineSource::new(BinanceApiConfig::default()));
    let symbol = args.symbol();

    let klines = match fetcher
        .fetch_klines(
            &symbol,
            &args.timeframe,
            &args.start_date,
            args.end_date.as_deref(),
            args.lookback.as_deref(),
        )
        .await
    {
        Ok(klines) => klines,
        Err(e) => {
            log::error!("{} fetch failed: {}", symbol, e);
            eprintln!("Error fetching data for {}: {}", args.currency, e);
            return ExitCode::FAILURE;
        }
    };

    if args.json {
        match serde_json::to_string_pretty(&klines) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing klines: {}", e);
                return ExitCode::FAILURE;
            }
        }
        return ExitCode::SUCCESS;
    }

    println!(
        "Fetched {} rows for {} ({}) from {} to {}",
        klines.len(),
        args.currency,
        args.timeframe,
        args.start_date,
        args.end_date.as_deref().unwrap_or("now")
    );
    if !klines.is_empty() {
        println!("{}", preview_table(&klines, args.rows));
        for line in percentile_lines(&close_percentiles(&klines, &args.percentiles)) {
            println!("{}", line);
        }
    }

    ExitCode::SUCCESS
}
