//! bracewise CLI - Go/C++ ↔ Java transpiler

use anyhow::{Context, Result};
use bracewise::{Direction, SessionConfig, SessionReport, TranslationSession};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, Layer};

/// bracewise - line-oriented source transpiler
#[derive(Parser, Debug)]
#[command(name = "transpile")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Translate Go and C++ trees to Java, or Java trees to C++", long_about = None)]
struct Cli {
    /// Source tree to translate
    #[arg(value_name = "SRC_DIR")]
    src: PathBuf,

    /// Destination root
    #[arg(value_name = "DEST_DIR")]
    dest: PathBuf,

    /// forward (Go/C++ → Java), reverse (Java → C++) or auto
    #[arg(value_enum, default_value_t = Direction::Auto)]
    direction: Direction,

    /// Java package prefix for translated files
    #[arg(default_value = "transpiled")]
    namespace: String,

    /// Check only (don't write output)
    #[arg(short, long)]
    check: bool,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Write the session report as JSON
    #[arg(long, value_name = "FILE")]
    report_json: Option<PathBuf>,

    /// Translate test files too (`_test.go`, `*Test.java`, ...)
    #[arg(long)]
    include_tests: bool,
}

impl Cli {
    fn session_config(&self) -> SessionConfig {
        SessionConfig {
            src_root: self.src.clone(),
            dest_root: self.dest.clone(),
            direction: self.direction,
            namespace: self.namespace.clone(),
            check: self.check,
            skip_tests: !self.include_tests,
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let console_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(level);
    tracing_subscriber::registry().with(console_layer).init();
}

fn print_summary(report: &SessionReport) {
    let stats = &report.stats;
    if report.check {
        println!("Check mode: nothing written");
    }
    println!("Files converted:    {}", stats.files_converted);
    println!("Structs found:      {}", stats.structs_found);
    println!("Classes found:      {}", stats.classes_found);
    println!("Functions found:    {}", stats.functions_found);
    if report.failed() > 0 {
        println!("Failed files:       {}", report.failed());
        for file in report.files.iter().filter(|f| f.error.is_some()) {
            println!("  {}: {}", file.path.display(), file.error.as_deref().unwrap_or(""));
        }
    }
    let warnings = report
        .diagnostics
        .iter()
        .filter(|d| d.severity >= bracewise::diagnostics::DiagnosticSeverity::Warning)
        .count();
    if warnings > 0 {
        println!("Warnings:           {warnings}");
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let session = TranslationSession::new(cli.session_config())?;
    let report = session.run();
    print_summary(&report);

    if let Some(path) = &cli.report_json {
        report
            .write_json(path)
            .with_context(|| format!("writing report to {}", path.display()))?;
    }

    Ok(())
}
