//! Command-line front end: label paths or status codes given as arguments or
//! read line by line from stdin.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use pathnorm_core::config::NormalizerConfig;
use pathnorm_core::strategy::StrategyKind;
use pathnorm_core::{normalize_status_code, Normalizer, RuleSet};

#[derive(Debug, Parser)]
#[command(name = "pathnorm", about = "Normalize request paths and status codes into metric labels")]
pub struct Cli {
    /// Log rule evaluation to stderr (filter with RUST_LOG).
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Normalize request URLs or paths.
    Path {
        /// URLs to normalize. Read from stdin when omitted.
        urls: Vec<String>,

        /// A rule as PATTERN=>REPLACEMENT. Repeatable; evaluated after
        /// config-file rules, in the order given.
        #[arg(long = "rule", short = 'r')]
        rules: Vec<String>,

        /// TOML config file with a [path] section.
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,

        /// Replace id-like segments with placeholders after rules run.
        #[arg(long)]
        placeholders: bool,
    },
    /// Bucket status codes into 2XX/3XX/4XX/5XX.
    Status {
        /// Status codes. Read from stdin when omitted.
        #[arg(allow_negative_numbers = true)]
        codes: Vec<i64>,
    },
}

/// Split a `PATTERN=>REPLACEMENT` argument into a one-rule set.
pub fn parse_rule(arg: &str) -> pathnorm_core::Result<RuleSet> {
    let parts: Vec<&str> = arg.split("=>").collect();
    RuleSet::from_pairs([parts])
}

/// Build the normalizer for the `path` subcommand.
pub fn build_normalizer(
    config: Option<&Path>,
    rules: &[String],
    placeholders: bool,
) -> anyhow::Result<Normalizer> {
    let mut cfg = match config {
        Some(path) => NormalizerConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => NormalizerConfig::defaults(),
    };
    if placeholders {
        cfg.path.strategy = StrategyKind::ValuePlaceholders;
    }

    let mut set = cfg.rule_set().map_err(|e| {
        let context = match e.rule_index() {
            Some(index) => format!("bad rule at [path.rules] index {index}"),
            None => "bad [path.rules]".to_string(),
        };
        anyhow::Error::new(e).context(context)
    })?;
    for arg in rules {
        let parsed = parse_rule(arg).with_context(|| format!("bad --rule {arg:?}"))?;
        for rule in &parsed {
            set.push(rule.clone());
        }
    }

    let strategy = cfg.path.strategy.build(&cfg.path.placeholders)?;
    Ok(Normalizer::with_strategy(set, strategy)?)
}

/// Execute `command`, printing one label per input line to `out`.
pub fn run(command: Command, input: impl BufRead, mut out: impl Write) -> anyhow::Result<()> {
    match command {
        Command::Path {
            urls,
            rules,
            config,
            placeholders,
        } => {
            let normalizer = build_normalizer(config.as_deref(), &rules, placeholders)?;
            tracing::debug!(rules = normalizer.rules().len(), "path normalizer built");
            for url in values_or_lines(urls, input)? {
                writeln!(out, "{}", normalizer.normalize_path(&url)?)?;
            }
        }
        Command::Status { codes } => {
            let codes = if codes.is_empty() {
                lines(input)?
                    .iter()
                    .map(|l| {
                        l.parse::<i64>()
                            .with_context(|| format!("not a status code: {l:?}"))
                    })
                    .collect::<anyhow::Result<Vec<_>>>()?
            } else {
                codes
            };
            for code in codes {
                writeln!(out, "{}", normalize_status_code(code))?;
            }
        }
    }
    Ok(())
}

fn values_or_lines(values: Vec<String>, input: impl BufRead) -> anyhow::Result<Vec<String>> {
    if values.is_empty() {
        lines(input)
    } else {
        Ok(values)
    }
}

fn lines(input: impl BufRead) -> anyhow::Result<Vec<String>> {
    let mut out = Vec::new();
    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if !line.is_empty() {
            out.push(line.to_string());
        }
    }
    Ok(out)
}
