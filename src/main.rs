//! EVM Vanity Address Generator CLI
//!
//! Usage:
//!   evm-vanity -p dead             # Find an address starting with "dead"
//!   evm-vanity -s beef             # Find an address ending with "beef"
//!   evm-vanity -p 00 -s 00 -n 5    # Find 5 addresses starting and ending with "00"

use std::process;
use std::sync::Arc;

use clap::Parser;
use log::error;

use evm_vanity::{Config, ConsoleReporter, Secp256k1Generator, WorkerPool};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::parse();

    let criteria = match config.validate() {
        Ok(criteria) => criteria,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            process::exit(1);
        }
    };

    println!("EVM Vanity Address Generator");
    println!("============================");
    println!("Prefix:     {}", display_or_any(criteria.prefix()));
    println!("Suffix:     {}", display_or_any(criteria.suffix()));
    println!(
        "Difficulty: {} ({} expected attempts)",
        criteria.difficulty_description(),
        format_number(criteria.expected_attempts())
    );
    println!("Workers:    {}", config.worker_count());
    println!("Target:     {} address(es)", config.count);
    println!();

    ctrlc_handler();

    let pool = WorkerPool::new(config.worker_count(), Arc::new(Secp256k1Generator::new()))
        .report_interval(config.report_interval());

    let summary = match pool.run(&criteria, config.count, ConsoleReporter::new()) {
        Ok(summary) => summary,
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    };

    println!("--- Final Statistics ---");
    println!("Total keys generated: {}", format_number(summary.total_attempts as f64));
    println!("Total matches found:  {}", summary.matches);
    println!("Time elapsed:         {:.2}s", summary.elapsed.as_secs_f64());
    println!("Average speed:        {}/s", format_number(summary.keys_per_second()));
}

fn display_or_any(part: &str) -> &str {
    if part.is_empty() {
        "(any)"
    } else {
        part
    }
}

fn format_number(n: f64) -> String {
    if n >= 1_000_000_000.0 {
        format!("{:.2}B", n / 1_000_000_000.0)
    } else if n >= 1_000_000.0 {
        format!("{:.2}M", n / 1_000_000.0)
    } else if n >= 1_000.0 {
        format!("{:.2}K", n / 1_000.0)
    } else {
        format!("{:.0}", n)
    }
}

fn ctrlc_handler() {
    let installed = ctrlc::set_handler(|| {
        eprintln!("\nStopped by user.");
        process::exit(130);
    });
    if let Err(e) = installed {
        error!("Error setting Ctrl-C handler: {}", e);
    }
}
