use std::path::{Path, PathBuf};
use chrono::Local;
use clap::{Parser, ValueEnum};
use deposit_parser::{
    write_csv, ConfigOverrides, DepositExtractor, ExtractError, ExtractorConfig, OutputRow,
    ReceiptFallback, Summary,
};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::process;
use tracing::info;
use tracing_subscriber::EnvFilter;


#[derive(Parser, Debug)]
#[command(
    name = "cli_extractor",
    version,
    about = "Извлекает поступления из текстовой банковской выписки и сохраняет их в CSV для импорта в учёт.",
    long_about = None,
)]
struct Args {
    /// Входной файл с текстом выписки ("-" - читать из stdin)
    #[arg(long)]
    input: PathBuf,

    /// Выходной CSV ("-" - писать в stdout). По умолчанию deposits_ultra_clean_<время>.csv
    #[arg(long)]
    output: Option<PathBuf>,

    /// TOML-файл с настройками
    #[arg(long)]
    config: Option<PathBuf>,

    /// Минимальная сумма поступления, например 200.00
    #[arg(long)]
    min_amount: Option<String>,

    /// Максимальная сумма поступления, например 200000.00
    #[arg(long)]
    max_amount: Option<String>,

    /// Сколько строк-продолжений приклеивать к строке с датой
    #[arg(long)]
    lookahead: Option<usize>,

    /// Как генерировать номер квитанции, если его нет в выписке
    #[arg(long, value_enum)]
    receipt_fallback: Option<Fallback>,

    /// Подробный лог в stderr
    #[arg(short, long)]
    verbose: bool,
}

/// Способы генерации номера квитанции для CLI
#[derive(Copy, Clone, Debug, ValueEnum)]
enum Fallback {
    Clock,
    Sequence,
}

impl From<Fallback> for ReceiptFallback {
    fn from(f: Fallback) -> Self {
        match f {
            Fallback::Clock => ReceiptFallback::Clock,
            Fallback::Sequence => ReceiptFallback::Sequence,
        }
    }
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    if let Err(err) = run(args) {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

impl Args {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            min_amount: self.min_amount.clone(),
            max_amount: self.max_amount.clone(),
            lookahead_lines: self.lookahead,
            receipt_fallback: self.receipt_fallback.map(Into::into),
        }
    }
}

/// Конфиг: значения по умолчанию -> файл -> флаги командной строки
fn build_config(args: &Args) -> Result<ExtractorConfig, ExtractError> {
    let config = match &args.config {
        Some(path) => ExtractorConfig::load(path)?,
        None => ExtractorConfig::default(),
    };
    config.with_overrides(&args.overrides())
}

fn default_output_path() -> PathBuf {
    PathBuf::from(format!(
        "deposits_ultra_clean_{}.csv",
        Local::now().format("%Y%m%d_%H%M%S")
    ))
}

fn run(args: Args) -> Result<(), ExtractError> {
    let config = build_config(&args)?;

    let mut extractor = DepositExtractor::new(config.clone());
    let deposits = extractor.extract_file(&args.input)?;

    let rows: Vec<OutputRow> = deposits
        .iter()
        .map(|d| OutputRow::from_record(d, &config))
        .collect();

    let summary = Summary::from_records(&deposits).with_currency(&config.currency_label);

    let output = args.output.unwrap_or_else(default_output_path);
    if write_rows(&output, &rows, io::stdout().lock())? {
        // stdout занят под CSV - сводку в stderr
        eprintln!("{summary}");
    } else {
        println!("{summary}");
        println!("CSV created: {}", output.display());
    }

    Ok(())
}

/// Пишет CSV в файл или в `stdout`, если путь "-". Возвращает true, если писали в `stdout`
fn write_rows<W: Write>(output: &Path, rows: &[OutputRow], stdout: W) -> Result<bool, ExtractError> {
    if output == Path::new("-") {
        write_csv(stdout, rows)?;
        return Ok(true);
    }

    let file = File::create(output)?;
    write_csv(BufWriter::new(file), rows)?;
    info!(path = %output.display(), rows = rows.len(), "CSV created");
    Ok(false)
}
