use std::io::{self, Read, Write};

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, Command};

use comment_prefix::sanitize_prefix;
use settings_source::{is_toggle_enabled, JsonSettingsFile, NoSettings, SettingsSource};
use toggle_line_comment::toggle_comment_lines;

fn main() -> Result<()> {
    let matches = Command::new("toggle_line_comment")
        .version("0.1.0")
        .about("Toggles a line-comment prefix on lines read from stdin")
        .arg(
            Arg::new("from")
                .long("from")
                .value_parser(clap::value_parser!(usize))
                .help("First line to toggle (1-based)"),
        )
        .arg(
            Arg::new("to")
                .long("to")
                .value_parser(clap::value_parser!(usize))
                .help("Last line to toggle (1-based, inclusive)"),
        )
        .arg(
            Arg::new("prefix")
                .long("prefix")
                .num_args(1)
                .help("Comment prefix; overrides the settings file"),
        )
        .arg(
            Arg::new("settings")
                .long("settings")
                .num_args(1)
                .help("JSON settings file holding the comment prefix"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose logging")
                .action(ArgAction::SetTrue)
                .default_value("false"),
        )
        .get_matches();

    let verbose = matches.get_flag("verbose");
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(if verbose {
        "debug"
    } else {
        "warn"
    }))
    .target(env_logger::Target::Stderr)
    .init();

    let settings: Box<dyn SettingsSource> = match matches.get_one::<String>("settings") {
        Some(path) => Box::new(JsonSettingsFile::new(path)),
        None => Box::new(NoSettings),
    };

    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("Failed to read text from stdin")?;

    let output = if is_toggle_enabled(settings.as_ref()) {
        let prefix = match matches.get_one::<String>("prefix") {
            Some(prefix) => sanitize_prefix(Some(prefix)),
            None => sanitize_prefix(settings.get_string(comment_prefix::COMMENT_PREFIX_SETTING).as_deref()),
        };
        let range = line_range(
            matches.get_one::<usize>("from").copied(),
            matches.get_one::<usize>("to").copied(),
        );
        log::debug!("toggling '{}' on lines {:?}", prefix, range);
        toggle_comment_lines(&input, &prefix, range)
    } else {
        log::warn!("Line comment toggle is disabled in settings; leaving text unchanged.");
        input
    };

    io::stdout()
        .write_all(output.as_bytes())
        .context("Failed to write to stdout")?;
    Ok(())
}

/// Converts 1-based CLI bounds into a zero-based inclusive range.
fn line_range(from: Option<usize>, to: Option<usize>) -> Option<std::ops::RangeInclusive<usize>> {
    if from.is_none() && to.is_none() {
        return None;
    }
    let start = from.unwrap_or(1).max(1) - 1;
    let end = to.unwrap_or(usize::MAX).max(1) - 1;
    Some(start..=end)
}
