use clap::{CommandFactory, Parser};
use colored::*;
use i18n_extractor::{run_extract, ExtractQuery, ExtractReport, OutdatedFile};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const USAGE_NOTES: &str = "\
If LANGUAGES is provided, update/create translation files for LANGUAGES with
internationalized strings extracted from SOURCE_DIR. If LANGUAGES is omitted or
'all', update the already existing translation files. LANGUAGES must be a
comma-separated list of languages, such as 'cn,es,pt'.

When no SOURCE_DIR is provided, uses '${project_root}/src'. Translation files
are created at '${project_root}/locales/${language}.json'; translations whose
source string disappeared are kept in '${language}.outdated.json'.";

/// i18n Extractor - Sync translation catalogs with the strings used in source
#[derive(Parser, Debug)]
#[command(name = "i18n-extractor")]
#[command(author, version, about, long_about = None)]
#[command(after_help = USAGE_NOTES)]
struct Cli {
    /// Comma-separated languages to update (e.g. "cn,es,pt"), or "all"
    #[arg(value_name = "LANGUAGES")]
    languages: Option<String>,

    /// Directories to scan for .js/.jsx/.ts/.tsx/.html files
    #[arg(value_name = "SOURCE_DIR")]
    source_dirs: Vec<PathBuf>,

    /// Catalog directory (default: <project_root>/locales)
    #[arg(long, value_name = "DIR")]
    locales_dir: Option<PathBuf>,

    /// Show debug output
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress the summary
    #[arg(short, long)]
    quiet: bool,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = if verbose {
        EnvFilter::new(default_level)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
    };

    let console_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(filter);

    tracing_subscriber::registry().with(console_layer).init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut query = ExtractQuery::new().with_source_dirs(cli.source_dirs);
    if let Some(languages) = cli.languages {
        query = query.with_languages(languages);
    }
    if let Some(locales_dir) = cli.locales_dir {
        query = query.with_locales_dir(locales_dir);
    }

    let report = match run_extract(query) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            eprintln!();
            eprintln!("{}", Cli::command().render_usage());
            eprintln!("For more information, try '--help'.");
            process::exit(1);
        }
    };

    if !cli.quiet {
        print_summary(&report);
    }

    for (language, err) in report.failures() {
        eprintln!("{} {}: {}", "Error:".red().bold(), language, err);
    }

    if !report.is_success() {
        process::exit(1);
    }
}

fn print_summary(report: &ExtractReport) {
    let stats = report.extraction;
    println!(
        "Extracted {} message(s) ({} plural) from {} file(s)",
        report.messages.to_string().bold(),
        stats.plurals,
        stats.files
    );
    if stats.skipped > 0 {
        println!("{} {} file(s) skipped", "warning:".yellow(), stats.skipped);
    }

    if report.updates.is_empty() {
        println!(
            "No languages to update in {}",
            report.locales_dir.display().to_string().cyan()
        );
        return;
    }

    for (language, result) in &report.updates {
        let Ok(update) = result else {
            println!("  {} {}", language.red(), "failed".red());
            continue;
        };

        let stats = update.stats;
        let mut line = format!(
            "  {} {}/{} translated",
            language.green().bold(),
            stats.translated,
            stats.total
        );
        if stats.added > 0 {
            line.push_str(&format!(", {} new", stats.added));
        }
        if stats.restored > 0 {
            line.push_str(&format!(", {} restored", stats.restored));
        }
        match update.outdated_file {
            OutdatedFile::Written(count) => {
                line.push_str(&format!(", {} outdated", count.to_string().yellow()))
            }
            OutdatedFile::Removed => line.push_str(", outdated file removed"),
            OutdatedFile::Absent => {}
        }
        println!("{}", line);
    }
}
