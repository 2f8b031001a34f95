//! Report filter CLI
//!
//! Reads one request per line from stdin (or a single request from the
//! command line), prints each `ParseResult` as JSON on stdout and keeps the
//! last successful filter set as context for follow-ups like "export them".
//! Logs go to stderr.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use report_filter_config::{load_settings_from, Settings};
use report_filter_core::{AvailableOptions, ParseResult, ParsedFilters, RequestKind};
use report_filter_text_processing::ReportRequestParser;

#[derive(Parser, Debug)]
#[command(name = "report-filter")]
#[command(about = "Turn free-text report requests into structured filters")]
struct Cli {
    /// JSON file with the currently valid option values
    #[arg(long, value_name = "PATH")]
    options: Option<PathBuf>,

    /// Configuration directory holding default.* and {env}.* files
    #[arg(long, value_name = "DIR", default_value = "config")]
    config_dir: String,

    /// Configuration environment to layer over the defaults
    #[arg(long, env = "REPORT_FILTER_ENV")]
    env: Option<String>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Parse this request and exit instead of reading stdin
    request: Option<String>,
}

/// Conversation state threaded between turns
struct Conversation<'a> {
    parser: &'a ReportRequestParser,
    options: Option<AvailableOptions>,
    previous: Option<ParsedFilters>,
}

impl<'a> Conversation<'a> {
    fn new(parser: &'a ReportRequestParser, options: Option<AvailableOptions>) -> Self {
        Self {
            parser,
            options,
            previous: None,
        }
    }

    fn turn(&mut self, request: &str) -> ParseResult {
        let result = self
            .parser
            .parse(request, self.options.as_ref(), self.previous.as_ref());

        match result.kind() {
            RequestKind::Count | RequestKind::Export => {
                tracing::info!(filters = %result.filters.describe(), "Request parsed");
                self.previous = Some(result.filters.clone());
            },
            RequestKind::Casual => tracing::debug!("Casual reply"),
            RequestKind::Failed => tracing::info!(request, "No filters found"),
        }
        result
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Priority: env vars > config/{env}.* > config/default.* > defaults
    let (settings, load_error) = match load_settings_from(&cli.config_dir, cli.env.as_deref()) {
        Ok(settings) => (settings, None),
        Err(e) => {
            // Tracing not yet initialized
            eprintln!("Warning: Failed to load config: {}. Using defaults.", e);
            (Settings::default(), Some(e))
        },
    };

    init_tracing(&settings);
    if let Some(e) = load_error {
        tracing::warn!(error = %e, "Running with default settings");
    }
    tracing::info!(
        env = cli.env.as_deref().unwrap_or("default"),
        range_start = settings.parser.open_range_start_year,
        "Starting report-filter"
    );

    let parser = ReportRequestParser::from_config(&settings.parser)
        .context("Failed to build report request parser")?;
    let options = cli.options.as_deref().map(load_options).transpose()?;
    let mut conversation = Conversation::new(&parser, options);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if let Some(request) = &cli.request {
        let result = conversation.turn(request);
        write_result(&mut out, &result, cli.pretty)?;
        return Ok(());
    }

    for line in io::stdin().lock().lines() {
        let line = line.context("Failed to read request from stdin")?;
        if line.trim().is_empty() {
            continue;
        }
        let result = conversation.turn(&line);
        write_result(&mut out, &result, cli.pretty)?;
    }

    Ok(())
}

fn load_options(path: &Path) -> Result<AvailableOptions> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read options file {}", path.display()))?;
    let options: AvailableOptions = serde_json::from_str(&content)
        .with_context(|| format!("Invalid options file {}", path.display()))?;
    tracing::info!(path = %path.display(), "Loaded available options");
    Ok(options)
}

fn write_result(out: &mut impl Write, result: &ParseResult, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    writeln!(out, "{}", json)?;
    out.flush()?;
    Ok(())
}

fn init_tracing(config: &Settings) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = &config.observability.log_level;
        format!("report_filter={},warn", level).into()
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);
    let fmt_layer = if config.observability.log_json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(io::stderr)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer().with_writer(io::stderr).boxed()
    };
    subscriber.with(fmt_layer).init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use report_filter_core::FilterField;

    #[test]
    fn test_conversation_threads_previous_filters() {
        let parser = ReportRequestParser::new();
        let mut conversation = Conversation::new(&parser, None);

        let first = conversation.turn("open actions for 2024");
        assert!(first.success);

        // casual turns and failures leave the context alone
        let casual = conversation.turn("thanks!");
        assert_eq!(casual.kind(), RequestKind::Casual);
        let failed = conversation.turn("asdkjasd");
        assert_eq!(failed.kind(), RequestKind::Failed);

        let follow_up = conversation.turn("export them");
        assert_eq!(follow_up.filters, first.filters);
        assert_eq!(follow_up.filters.get(FilterField::Status), Some("Open"));
        assert_eq!(follow_up.filters.get(FilterField::AuditYear), Some("2024"));
    }

    #[test]
    fn test_write_result_is_one_json_line() {
        let mut buffer = Vec::new();
        write_result(&mut buffer, &ParseResult::failure("nothing"), false).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(text, "{\"success\":false,\"filters\":{},\"error\":\"nothing\"}\n");
    }

    #[test]
    fn test_cli_arguments() {
        let cli = Cli::parse_from(["report-filter", "--options", "opts.json", "--pretty", "export"]);
        assert_eq!(cli.options, Some(PathBuf::from("opts.json")));
        assert!(cli.pretty);
        assert_eq!(cli.request.as_deref(), Some("export"));
        assert_eq!(cli.config_dir, "config");
    }
}
