use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use pdfsift_core::config_file::{self, ConfigFile};
use pdfsift_core::{MIN_RECOVERED_TEXT_LEN, Record};
use pdfsift_ingest::{DEFAULT_MAX_FILE_SIZE, mb_to_bytes};
use pdfsift_parsing::{InferenceConfigBuilder, RecordInferencer};
use pdfsift_recovery::RawByteBackend;
use pdfsift_reporting::ExportFormat;

mod output;

use output::ColorMode;

/// PDF Data Extractor - Recover text and structured records from PDF files
#[derive(Parser, Debug)]
#[command(name = "pdfsift", version, about, long_about = None)]
struct Cli {
    /// Log pipeline details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Recover text from a PDF and infer structured records
    Extract {
        /// Path to the PDF file
        file_path: PathBuf,

        /// Output format [default: table]
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Write output to this file (csv/json/report default to `<name>.<ext>`)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Only show records with a value containing this text (table view)
        #[arg(short, long)]
        search: Option<String>,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,

        /// Largest accepted file size in MB
        #[arg(long)]
        max_size_mb: Option<u64>,
    },

    /// Inspect the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Print the platform config file location
    Path,
    /// Print the effective configuration as TOML
    Show,
    /// Write the effective configuration to the platform config file
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    /// Records as numbered blocks
    Table,
    /// The recovered text, verbatim
    Text,
    Csv,
    Json,
    /// Records as plain-text blocks, written to `<name>.txt`
    Report,
}

impl OutputFormat {
    fn export_format(self) -> Option<ExportFormat> {
        match self {
            Self::Csv => Some(ExportFormat::Csv),
            Self::Json => Some(ExportFormat::Json),
            Self::Report => Some(ExportFormat::Text),
            Self::Table | Self::Text => None,
        }
    }
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    install_panic_hook();

    let config = config_file::load_config();

    match cli.command {
        Command::Extract {
            file_path,
            format,
            output,
            search,
            no_color,
            max_size_mb,
        } => extract(
            &config,
            ExtractArgs {
                file_path,
                format,
                output,
                search,
                no_color,
                max_size_mb,
            },
        ),
        Command::Config { action } => match action {
            ConfigAction::Path => {
                let path = config_file::config_path()
                    .ok_or_else(|| anyhow::anyhow!("could not determine config directory"))?;
                println!("{}", path.display());
                Ok(())
            }
            ConfigAction::Show => {
                print!("{}", toml::to_string_pretty(&config)?);
                Ok(())
            }
            ConfigAction::Init { force } => {
                if let Some(path) = config_file::config_path().filter(|p| !force && p.exists()) {
                    anyhow::bail!(
                        "{} already exists (use --force to overwrite)",
                        path.display()
                    );
                }
                let path = config_file::save_config(&config)?;
                eprintln!("Wrote {}", path.display());
                Ok(())
            }
        },
    }
}

/// Keep panics recovered inside record inference off stderr; they surface as
/// an `Error` record instead.
fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        if pdfsift_parsing::in_guarded_section() {
            tracing::debug!(%info, "recovered inference panic");
            return;
        }
        default_hook(info);
    }));
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

struct ExtractArgs {
    file_path: PathBuf,
    format: Option<OutputFormat>,
    output: Option<PathBuf>,
    search: Option<String>,
    no_color: bool,
    max_size_mb: Option<u64>,
}

fn extract(config: &ConfigFile, args: ExtractArgs) -> anyhow::Result<()> {
    // Resolve settings: CLI flags > env vars > config file > defaults
    let format = match args.format {
        Some(f) => f,
        None => resolve_format(config)?,
    };
    let max_bytes = args
        .max_size_mb
        .or_else(|| env_u64("PDFSIFT_MAX_FILE_SIZE_MB"))
        .or_else(|| config.admission.as_ref().and_then(|a| a.max_file_size_mb))
        .map(mb_to_bytes)
        .unwrap_or(DEFAULT_MAX_FILE_SIZE);
    let config_color = config
        .output
        .as_ref()
        .and_then(|o| o.color)
        .unwrap_or(true);
    let color = ColorMode(!args.no_color && config_color && args.output.is_none());
    tracing::debug!(?format, max_bytes, "resolved extract settings");

    let backend = RawByteBackend::new().with_min_text_length(
        config
            .recovery
            .as_ref()
            .and_then(|r| r.min_text_length)
            .unwrap_or(MIN_RECOVERED_TEXT_LEN),
    );
    let inference_config = match &config.inference {
        Some(section) => InferenceConfigBuilder::from_section(section).build()?,
        None => InferenceConfigBuilder::new().build()?,
    };
    let inferencer = RecordInferencer::with_config(inference_config);

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner:.green} {msg}").unwrap());
    spinner.enable_steady_tick(Duration::from_millis(120));

    let result = pdfsift_ingest::process_path(
        &args.file_path,
        max_bytes,
        &backend,
        &inferencer,
        &mut |step| spinner.set_message(step.message()),
    );
    spinner.finish_and_clear();
    let doc = result?;

    if let Some(export) = format.export_format() {
        let path = args
            .output
            .unwrap_or_else(|| pdfsift_reporting::default_output_path(&doc.meta.name, export));
        pdfsift_reporting::export_records(&doc.records, export, &path)?;
        eprintln!(
            "Exported {} records as {} to {}",
            doc.records.len(),
            export.label(),
            path.display()
        );
        return Ok(());
    }

    let mut writer: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(std::fs::File::create(path)?),
        None => Box::new(std::io::stdout()),
    };

    match format {
        OutputFormat::Text => writeln!(writer, "{}", doc.text)?,
        _ => {
            output::print_extraction_summary(&mut writer, &doc, color)?;
            let shown: Vec<&Record> = match &args.search {
                Some(term) => pdfsift_reporting::filter_records(&doc.records, term),
                None => doc.records.iter().collect(),
            };
            if shown.is_empty() {
                if let Some(term) = &args.search {
                    output::print_no_matches(&mut writer, term, color)?;
                }
            } else {
                output::print_records(&mut writer, &shown, doc.records.len(), color)?;
            }
        }
    }
    writer.flush()?;
    Ok(())
}

fn resolve_format(config: &ConfigFile) -> anyhow::Result<OutputFormat> {
    let configured = std::env::var("PDFSIFT_FORMAT")
        .ok()
        .or_else(|| config.output.as_ref().and_then(|o| o.format.clone()));
    match configured {
        Some(name) => OutputFormat::from_str(&name, true)
            .map_err(|_| anyhow::anyhow!("unknown output format: {name}")),
        None => Ok(OutputFormat::Table),
    }
}

fn env_u64(key: &str) -> Option<u64> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}
