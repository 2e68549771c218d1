use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, Command};

use clean_and_split::config::{AppConfig, OutputFormat, SETTINGS_ENV};
use clean_and_split::{clean_and_split, CleanedPrompt};
use region_scanner::RegionTag;

fn main() -> Result<()> {
    let matches = Command::new("clean_and_split")
        .version("0.1.0")
        .about("Strips comment lines from prompt text and splits out <AR1>..<AR5> regions")
        .arg(
            Arg::new("text_file")
                .long("text-file")
                .num_args(1)
                .help("Read the prompt text from this file instead of stdin"),
        )
        .arg(
            Arg::new("bundle")
                .long("bundle")
                .num_args(1)
                .conflicts_with("text_file")
                .help("Read a JSON bundle {before_text, text, after_text}"),
        )
        .arg(
            Arg::new("before")
                .long("before")
                .num_args(1)
                .help("Prefix text; literal \\n is turned into a newline"),
        )
        .arg(
            Arg::new("after")
                .long("after")
                .num_args(1)
                .help("Suffix text; literal \\n is turned into a newline"),
        )
        .arg(
            Arg::new("comment_prefix")
                .long("comment-prefix")
                .num_args(1)
                .help("Comment marker; overrides the settings file (empty disables filtering)"),
        )
        .arg(
            Arg::new("settings")
                .long("settings")
                .num_args(1)
                .help("JSON settings file holding the comment marker"),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .num_args(1)
                .default_value("cleaned")
                .value_parser(["cleaned", "marker-free", "regions", "impact", "fingerprint", "json"])
                .help("What to print"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose logging")
                .action(ArgAction::SetTrue)
                .default_value("false"),
        )
        .get_matches();

    let settings_path = matches
        .get_one::<String>("settings")
        .map(PathBuf::from)
        .or_else(|| env::var(SETTINGS_ENV).ok().map(PathBuf::from));

    let config = AppConfig {
        text_file: matches.get_one::<String>("text_file").map(PathBuf::from),
        bundle_file: matches.get_one::<String>("bundle").map(PathBuf::from),
        before_text: matches.get_one::<String>("before").cloned(),
        after_text: matches.get_one::<String>("after").cloned(),
        comment_prefix: matches.get_one::<String>("comment_prefix").cloned(),
        settings_path,
        output: matches
            .get_one::<String>("output")
            .map(|s| s.parse::<OutputFormat>())
            .transpose()?
            .unwrap_or_default(),
        verbose: matches.get_flag("verbose"),
    };

    let mut logger =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if config.verbose {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.target(env_logger::Target::Stderr).init();

    log::debug!("{:?}", config);

    let input = config.load_input()?;
    let clean_config = config.clean_config();
    log::debug!("comment prefix: {:?}", clean_config.comment_prefix);

    let result = clean_and_split(&input, &clean_config);
    print_result(&result, config.output)
}

fn print_result(result: &CleanedPrompt, output: OutputFormat) -> Result<()> {
    match output {
        OutputFormat::Cleaned => println!("{}", result.cleaned_text),
        OutputFormat::MarkerFree => println!("{}", result.marker_free_text),
        OutputFormat::Impact => println!("{}", result.impact),
        OutputFormat::Fingerprint => println!("{}", result.fingerprint),
        OutputFormat::Regions => {
            for (tag, slot) in RegionTag::ALL.iter().zip(result.regions.iter()) {
                match slot {
                    Some(content) => println!("[{}] {}", tag, content),
                    None => println!("[{}]", tag),
                }
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(result).context("Failed to serialize result")?;
            println!("{}", json);
        }
    }
    Ok(())
}
