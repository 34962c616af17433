//! # bgg-collection
//!
//! Reads a raw BoardGameGeek collection response and prints the validated
//! collection.

use anyhow::Result;
use bgg_collection::source;
use bgg_collection::{Collection, CollectionOptions};
use clap::Parser;
use env_logger::Builder as LoggerBuilder;
use log::LevelFilter;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    long_about = "bgg-collection: validates a BoardGameGeek collection response and prints it.\n\
                  Data is read from a JSON file or from the stored response of a user."
)]
struct Args {
    /// Path to a raw collection response (JSON)
    #[arg(short, long, conflicts_with = "user")]
    file: Option<PathBuf>,

    /// User whose stored collection is loaded from the data directory
    #[arg(short, long)]
    user: Option<String>,

    /// Directory of stored responses, one <user>.json per user
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Keep version information of the entries
    #[arg(long)]
    versions: bool,

    /// Print the collection as plain JSON data
    #[arg(long)]
    json: bool,

    /// Print every field of each entry
    #[arg(short, long)]
    details: bool,

    /// Show all paths used by the application
    #[arg(long)]
    config: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_env_logger(verbosity: u8) {
    let level_filter = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let mut logger_builder = LoggerBuilder::new();
    logger_builder.filter(None, level_filter);
    if let Ok(rust_log) = std::env::var("RUST_LOG") {
        logger_builder.parse_filters(&rust_log);
    }
    logger_builder.init();
}

/// The platform data dir is only created when no override is given.
fn resolve_data_dir(args: &Args) -> Result<PathBuf> {
    match &args.data_dir {
        Some(dir) => Ok(dir.clone()),
        None => source::get_data_dir(),
    }
}

fn print_collection(collection: &Collection, details: bool) {
    println!("{collection}");
    for game in collection {
        if details {
            println!();
            print!("{}", game.details());
        } else {
            println!("  {game}");
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_env_logger(args.verbose);

    if args.config {
        println!("App Paths:");
        println!("  Data:    {}", resolve_data_dir(&args)?.display());
        return Ok(());
    }

    let options = CollectionOptions {
        ignore_versions: !args.versions,
    };
    let collection = match (&args.file, &args.user) {
        (Some(file), _) => {
            let raw = source::load_raw(file)?;
            Collection::from_value_with_options(&raw, options)?
        }
        (None, Some(user)) => {
            source::load_user_collection(user, &resolve_data_dir(&args)?, options)?
        }
        (None, None) => anyhow::bail!("Use --file or --user to specify the data source."),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&collection.to_plain_data())?);
    } else {
        print_collection(&collection, args.details);
    }

    Ok(())
}
