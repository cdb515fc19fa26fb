//! Procurement CLI - inspect and convert procurement sheet exports
//!
//! ```bash
//! procurement parse sheet.csv               # Records as JSON
//! procurement parse sheet.csv -f csv -o out.csv
//! procurement columns sheet.csv             # Show header resolution
//! procurement summary sheet.csv             # Dashboard aggregates
//! procurement tokenize sheet.csv            # Raw logical rows (debug)
//! procurement --log-json parse sheet.csv    # Progress as JSON lines on stderr
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use procurement::{
    config::parse_delimiter,
    load_file,
    logs::{LogCollector, LOG_BROADCASTER},
    read_file_auto, summarize, write_records, Config, OutputFormat, ParseOptions,
    QuoteBalanceTokenizer, RowTokenizer,
};
use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "procurement")]
#[command(about = "Parse procurement dashboard sheet exports", long_about = None)]
struct Cli {
    /// Silence progress logs
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Emit progress logs as JSON lines on stderr instead of text
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Csv,
}

impl From<Format> for OutputFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Json => OutputFormat::Json,
            Format::Csv => OutputFormat::Csv,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a sheet export into procurement records
    Parse {
        /// Input CSV file
        input: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: Format,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Extra cell separator besides ',' (e.g. "tab")
        #[arg(short = 's', long, value_parser = parse_delimiter_arg)]
        secondary_delimiter: Option<char>,
    },

    /// Show which column each field resolved to
    Columns {
        /// Input CSV file
        input: PathBuf,
    },

    /// Aggregate records per manager, category and vendor
    Summary {
        /// Input CSV file
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print tokenized logical rows as JSON
    Tokenize {
        /// Input CSV file
        input: PathBuf,

        /// Extra cell separator besides ','
        #[arg(short = 's', long, value_parser = parse_delimiter_arg)]
        secondary_delimiter: Option<char>,
    },
}

fn parse_delimiter_arg(raw: &str) -> Result<char, String> {
    parse_delimiter(raw).ok_or_else(|| format!("not a single-character delimiter: '{}'", raw))
}

fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = Config::from_env();
    LOG_BROADCASTER.set_quiet(cli.quiet || config.quiet || cli.log_json);
    let mut collector = cli.log_json.then(|| LOG_BROADCASTER.subscribe());

    let result = match cli.command {
        Commands::Parse { input, format, output, secondary_delimiter } => cmd_parse(
            &input,
            format.into(),
            output.as_deref(),
            options(secondary_delimiter, &config),
        ),
        Commands::Columns { input } => cmd_columns(&input, options(None, &config)),
        Commands::Summary { input, output } => {
            cmd_summary(&input, output.as_deref(), options(None, &config))
        }
        Commands::Tokenize { input, secondary_delimiter } => {
            cmd_tokenize(&input, secondary_delimiter.or(config.secondary_delimiter))
        }
    };

    if let Some(collector) = collector.as_mut() {
        print_json_logs(collector);
    }

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn options(secondary_delimiter: Option<char>, config: &Config) -> ParseOptions {
    ParseOptions {
        secondary_delimiter: secondary_delimiter.or(config.secondary_delimiter),
        ..ParseOptions::default()
    }
}

fn cmd_parse(
    input: &Path,
    format: OutputFormat,
    output: Option<&Path>,
    options: ParseOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let result = load_file(input, &options)?;

    match output {
        Some(path) => {
            write_records(BufWriter::new(File::create(path)?), &result.records, format)?;
            eprintln!("💾 Output written to: {}", path.display());
        }
        None => write_records(io::stdout().lock(), &result.records, format)?,
    }

    Ok(())
}

fn cmd_columns(input: &Path, options: ParseOptions) -> Result<(), Box<dyn std::error::Error>> {
    let result = load_file(input, &options)?;
    println!("{}", serde_json::to_string_pretty(&result.columns)?);
    Ok(())
}

fn cmd_summary(
    input: &Path,
    output: Option<&Path>,
    options: ParseOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let result = load_file(input, &options)?;
    let summary = summarize(&result.records);

    eprintln!(
        "📊 {} records, {} managers, {} vendors",
        summary.total_records,
        summary.managers.len(),
        summary.vendors.len()
    );

    let json = serde_json::to_string_pretty(&summary)?;
    write_output(&json, output)
}

fn cmd_tokenize(
    input: &Path,
    secondary_delimiter: Option<char>,
) -> Result<(), Box<dyn std::error::Error>> {
    let decoded = read_file_auto(input)?;
    let tokenizer = QuoteBalanceTokenizer::new().with_secondary_delimiter(secondary_delimiter);
    let rows = tokenizer.tokenize(&decoded.text);

    eprintln!("   Encoding: {}", decoded.encoding);
    eprintln!("✅ {} logical rows", rows.len());

    println!("{}", serde_json::to_string_pretty(&rows)?);
    Ok(())
}

fn print_json_logs(collector: &mut LogCollector) {
    for entry in collector.drain() {
        match serde_json::to_string(&entry) {
            Ok(line) => eprintln!("{}", line),
            Err(e) => eprintln!("❌ Unserializable log entry: {}", e),
        }
    }
    if collector.dropped() > 0 {
        eprintln!("⚠️  {} log entries dropped", collector.dropped());
    }
}

fn write_output(content: &str, path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
            eprintln!("💾 Output written to: {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
