use std::fs;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use owo_colors::OwoColorize;
use seoscope_core::{
    AnalysisResult, Analyzer, AnalyzerConfig, JsonConfig, RenderConfig, ReportRenderer, Source, TextConfig,
    convert_to_json, convert_to_text, fetch_file, fetch_stdin,
};
use tracing_subscriber::EnvFilter;

mod echo;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Where PDF reports go when no `--output` is given.
const DEFAULT_REPORT_PATH: &str = "seoscope_report.pdf";

/// Output format for the analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Pdf,
    Json,
    Text,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pdf" => Ok(Self::Pdf),
            "json" => Ok(Self::Json),
            "text" | "txt" => Ok(Self::Text),
            _ => Err(format!("Invalid format: {}. Valid options: pdf, json, text", s)),
        }
    }
}

/// SEO and readability reports for web pages and text
#[derive(Parser, Debug)]
#[command(name = "seoscope")]
#[command(version)]
#[command(about = "SEO and readability reports for web pages and text", long_about = None)]
struct Args {
    /// URL to fetch, local HTML file, "-" for stdin, or raw text with --text
    #[arg(value_name = "INPUT")]
    input: String,

    /// Treat INPUT as raw text instead of a URL or file
    #[arg(long)]
    text: bool,

    /// Output file (default: stdout; seoscope_report.pdf for pdf)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Output format (pdf, json, text)
    #[arg(short, long, default_value = "text", value_name = "FORMAT")]
    format: OutputFormat,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "10", value_name = "SECS")]
    timeout: u64,

    /// Custom User-Agent for HTTP requests
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// Number of keywords and phrases to keep
    #[arg(long, default_value = "10", value_name = "NUM")]
    top: usize,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn is_url(input: &str) -> bool {
    url::Url::parse(input).is_ok_and(|u| matches!(u.scheme(), "http" | "https"))
}

async fn run_analysis(args: &Args, analyzer: &Analyzer) -> anyhow::Result<AnalysisResult> {
    if args.text {
        let text = if args.input == "-" { fetch_stdin().context("Failed to read from stdin")? } else { args.input.clone() };
        if args.verbose {
            echo::print_step(1, 3, "Analyzing direct text");
            eprintln!("  {} {}", "Size:".dimmed(), echo::format_size(text.len()).bright_white());
        }
        return Ok(analyzer.analyze_text(&text));
    }

    if is_url(&args.input) {
        if args.verbose {
            echo::print_step(1, 3, &format!("Fetching from {}", args.input.bright_white().underline()));
        }
        return Ok(analyzer.analyze_url(&args.input).await);
    }

    let (html, source) = if args.input == "-" {
        if args.verbose {
            echo::print_step(1, 3, "Reading from stdin");
        }
        (fetch_stdin().context("Failed to read from stdin")?, Source::File("-".to_string()))
    } else {
        if args.verbose {
            echo::print_step(1, 3, &format!("Reading from file {}", args.input.bright_white()));
        }
        let html = fetch_file(&args.input).with_context(|| format!("Failed to read file: {}", args.input))?;
        (html, Source::File(args.input.clone()))
    };

    if args.verbose {
        eprintln!("  {} {}", "Size:".dimmed(), echo::format_size(html.len()).bright_white());
    }

    Ok(analyzer.analyze_html(&html, source))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new("seoscope_core=debug"))
            .with_writer(std::io::stderr)
            .init();
        echo::print_banner();
        echo::print_info("Debug logging enabled");
        eprintln!();
    }

    let mut builder = AnalyzerConfig::builder().timeout(args.timeout).top_n(args.top);
    if let Some(user_agent) = &args.user_agent {
        builder = builder.user_agent(user_agent.clone());
    }
    let config = builder.build();
    let preview_chars = config.thresholds.preview_chars;
    let analyzer = Analyzer::new(config);

    let started = Instant::now();
    let result = run_analysis(&args, &analyzer).await?;

    if args.verbose {
        echo::print_step(2, 3, "Scoring content");
        echo::print_timing("Analysis", started.elapsed());
        echo::print_analysis_details(&result);
    }

    if let Some(error) = &result.error {
        echo::print_warning(error);
    }

    if args.verbose {
        echo::print_step(3, 3, &format!("Writing {:?} output", args.format));
    }

    match args.format {
        OutputFormat::Pdf => {
            let path = args.output.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_REPORT_PATH));
            ReportRenderer::new(RenderConfig::from(&analyzer.config().thresholds))
                .render_to_file(&result, &path)
                .with_context(|| format!("Failed to write report: {}", path.display()))?;
            echo::print_success(&format!("Report written to {}", path.display().bright_white()));
        }
        OutputFormat::Json | OutputFormat::Text => {
            let output = if args.format == OutputFormat::Json {
                let config = JsonConfig { include_text: true, preview_chars, pretty: true };
                convert_to_json(&result, &config).context("Failed to serialize result")?
            } else {
                convert_to_text(&result, &TextConfig { preview_chars, ..Default::default() })
            };

            match &args.output {
                Some(path) => {
                    fs::write(path, output).with_context(|| format!("Failed to write to file: {}", path.display()))?;
                    echo::print_success(&format!("Output written to {}", path.display().bright_white()));
                }
                None => println!("{}", output),
            }
        }
    }

    Ok(())
}
