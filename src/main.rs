use clap::{Args, Parser, Subcommand, ValueEnum};
use fra_dss::config::{AppConfig, OutputFormat};
use fra_dss::eligibility::{ApplicantRecord, EligibilityEngine};
use fra_dss::error::AppError;
use fra_dss::extraction::{DocumentExtractor, DocumentOrigin, DocumentSource};
use fra_dss::report::{batch_assessment, generate_summary_report, BatchEntry, SummaryReport};
use fra_dss::telemetry;
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "fra-dss",
    about = "Extract claim documents and assess forest rights applications",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract structured fields from recognised document text files
    Extract(ExtractArgs),
    /// Assess a single application stored as a JSON object
    Assess(AssessArgs),
    /// Assess a JSON array of applications and summarise the results
    Batch(BatchArgs),
}

#[derive(Args, Debug)]
struct ExtractArgs {
    /// Treat every file as this origin instead of inferring it from the file name
    #[arg(long, value_enum)]
    origin: Option<OriginArg>,
    /// Text files produced by the recognition service
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

#[derive(Args, Debug)]
struct AssessArgs {
    file: PathBuf,
}

#[derive(Args, Debug)]
struct BatchArgs {
    file: PathBuf,
    /// Print only the summary report
    #[arg(long)]
    summary_only: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OriginArg {
    Image,
    Pdf,
}

impl From<OriginArg> for DocumentOrigin {
    fn from(value: OriginArg) -> Self {
        match value {
            OriginArg::Image => DocumentOrigin::Image,
            OriginArg::Pdf => DocumentOrigin::Pdf,
        }
    }
}

#[derive(Debug, Serialize)]
struct BatchOutput<'a> {
    entries: &'a [BatchEntry],
    summary: SummaryReport,
}

fn main() {
    if let Err(err) = run_cli() {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    info!(?config.environment, "fra decision support starting");

    let rendered = match cli.command {
        Command::Extract(args) => run_extract(args, config.output)?,
        Command::Assess(args) => run_assess(args, config.output)?,
        Command::Batch(args) => run_batch(args, config.output)?,
    };

    println!("{rendered}");
    Ok(())
}

fn run_extract(args: ExtractArgs, output: OutputFormat) -> Result<String, AppError> {
    let sources = args
        .files
        .iter()
        .map(|path| {
            let text = fs::read_to_string(path)?;
            let source = DocumentSource::new(file_name(path), text);
            Ok(match args.origin {
                Some(origin) => source.with_origin(origin.into()),
                None => source,
            })
        })
        .collect::<Result<Vec<_>, AppError>>()?;

    let entries = DocumentExtractor::default().batch_process(sources);
    Ok(output.render(&entries)?)
}

fn run_assess(args: AssessArgs, output: OutputFormat) -> Result<String, AppError> {
    let payload: Value = read_json(&args.file)?;
    let record = ApplicantRecord::from_value(&payload)?;
    let assessment = EligibilityEngine::default().assess(&record);
    Ok(output.render(&assessment)?)
}

fn run_batch(args: BatchArgs, output: OutputFormat) -> Result<String, AppError> {
    let applications: Vec<Value> = read_json(&args.file)?;
    let entries = batch_assessment(&EligibilityEngine::default(), &applications);
    let summary = generate_summary_report(&entries)?;

    if args.summary_only {
        Ok(output.render(&summary)?)
    } else {
        Ok(output.render(&BatchOutput {
            entries: &entries,
            summary,
        })?)
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, AppError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
