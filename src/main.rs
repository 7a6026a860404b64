use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use autolinker::config::{ConfigManager, KeywordEntry, LinkTarget, LinkerConfig};
use autolinker::core::{autolink_content, AutolinkError, AutolinkResult, AutolinkStatus};
use autolinker::env::{core::LogLevel, describe_all, EnvVar};
use autolinker::parsers::html::decode_markup;

const ASCII: &str = " \
 _____ _____ _____ _____ __    _____ _____ _____
|  _  |  |  |_   _|     |  |  |     |   | |  |  |
|     |  |  | | | |  |  |  |__|-   -| | | |    -|
|__|__|_____| |_| |_____|_____|_____|_|___|__|__|
";

/// 日志输出格式
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(
    name = "autolinker",
    version,
    about = "Insert keyword links into HTML content",
    before_help = ASCII,
    after_help = env_help()
)]
struct Cli {
    /// Input file, `-` or absent for stdin
    input: Option<String>,

    /// Configuration file (TOML or JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write annotated markup to file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Content scope of the input
    #[arg(short, long, default_value = "post")]
    scope: String,

    /// Additional keyword, repeatable
    #[arg(short, long = "keyword", value_name = "KEYWORD=URL", value_parser = parse_keyword)]
    keywords: Vec<KeywordEntry>,

    /// Maximum links per document, 0 for unlimited
    #[arg(long)]
    max_links_per_post: Option<usize>,

    /// Maximum links per keyword
    #[arg(long)]
    max_links_per_keyword: Option<usize>,

    /// Match keywords case-sensitively
    #[arg(long)]
    case_sensitive: bool,

    /// Open inserted links in a new window
    #[arg(long)]
    new_window: bool,

    /// Allow links inside existing anchors
    #[arg(long)]
    include_existing_links: bool,

    /// Charset of the input
    #[arg(short = 'E', long, default_value = "utf-8")]
    encoding: String,

    /// Print a summary to stderr
    #[arg(long)]
    stats: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

fn env_help() -> String {
    let mut help = String::from("Environment variables:\n");
    for (name, description) in describe_all() {
        help.push_str(&format!("  {:<34}{}\n", name, description));
    }
    help
}

fn parse_keyword(value: &str) -> Result<KeywordEntry, String> {
    KeywordEntry::parse_pair(value).ok_or_else(|| format!("expected KEYWORD=URL, got '{}'", value))
}

fn init_tracing(cli: &Cli) {
    let env_filter = match cli.verbose {
        0 => EnvFilter::try_new(LogLevel::get_or_default("info".to_string()))
            .unwrap_or_else(|_| EnvFilter::new("info")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr);

    match cli.log_format {
        LogFormat::Text => builder.with_target(false).init(),
        LogFormat::Json => builder.json().init(),
    }
}

fn read_input(input: Option<&str>) -> AutolinkResult<Vec<u8>> {
    let mut data = Vec::new();

    match input {
        None | Some("-") => {
            io::stdin().read_to_end(&mut data)?;
        }
        Some(path) => {
            data = fs::read(path).map_err(|e| {
                AutolinkError::InvalidInput(format!("无法读取输入文件 {}: {}", path, e))
            })?;
        }
    }

    Ok(data)
}

fn write_output(output: Option<&PathBuf>, html: &str) -> AutolinkResult<()> {
    match output {
        Some(path) => fs::write(path, html)?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(html.as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(())
}

/// 合并配置文件、环境变量和命令行参数
fn build_config(cli: &Cli) -> LinkerConfig {
    let manager = match &cli.config {
        Some(path) => ConfigManager::from_path(path),
        None => ConfigManager::new(),
    };
    let snapshot = manager.load();

    let mut settings = snapshot.settings.clone();
    if let Some(value) = cli.max_links_per_post {
        settings.max_links_per_post = value;
    }
    if let Some(value) = cli.max_links_per_keyword {
        settings.max_links_per_keyword = value;
    }
    if cli.case_sensitive {
        settings.case_sensitive = true;
    }
    if cli.new_window {
        settings.link_target = LinkTarget::NewWindow;
    }
    if cli.include_existing_links {
        settings.exclude_existing_links = false;
    }

    // Raw file entries: deduplication must run under the final case rule
    let file_keywords = manager
        .config_path()
        .and_then(|path| ConfigManager::load_from_file(path).ok())
        .map(|file| file.keywords)
        .unwrap_or_default();

    let entries = file_keywords
        .into_iter()
        .chain(cli.keywords.iter().cloned());

    LinkerConfig::new(settings, entries)
}

fn run(cli: &Cli) -> AutolinkResult<()> {
    let data = read_input(cli.input.as_deref())?;
    let markup = decode_markup(&data, &cli.encoding);
    let config = build_config(cli);

    let outcome = autolink_content(&markup, &cli.scope, &config);

    write_output(cli.output.as_ref(), &outcome.html)?;

    if cli.stats {
        let status = match &outcome.status {
            AutolinkStatus::Linked => "linked".to_string(),
            AutolinkStatus::NoOp(reason) => format!("no-op ({})", reason),
            AutolinkStatus::Skipped(reason) => format!("skipped ({})", reason),
        };
        eprintln!(
            "status: {}, links: {}, text nodes: {}, budget exhausted: {}",
            status, outcome.links_inserted, outcome.text_nodes_visited, outcome.budget_exhausted
        );
        for (keyword, count) in outcome.keyword_counts.iter() {
            eprintln!("  {}: {}", keyword, count);
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
