use std::fs;
use std::io::{self, Read};
use std::path::Path;
use tracing::{debug, info};
use crate::classifier::{BalanceTracker, Classification};
use crate::config::ExtractorConfig;
use crate::error::ExtractError;
use crate::extractor::extract_fields;
use crate::model::{ChannelType, DepositRecord};
use crate::receipt::ReceiptSynthesizer;
use crate::scanner::BoundaryScanner;
use crate::utils::{format_minor_units, normalize_date};

/// Читает текст выписки из файла, или из stdin, если путь "-".
///
/// Это единственное место, где разбор может упасть: без входа продолжать нечего.
pub fn read_statement(path: &Path) -> Result<String, ExtractError> {
    read_statement_from(path, io::stdin().lock())
}

/// То же, что [`read_statement`], но с явным источником вместо stdin
pub fn read_statement_from<R: Read>(path: &Path, mut stdin: R) -> Result<String, ExtractError> {
    let io_err = |source| ExtractError::Io {
        path: path.to_path_buf(),
        source,
    };

    if path == Path::new("-") {
        let mut text = String::new();
        stdin.read_to_string(&mut text).map_err(io_err)?;
        Ok(text)
    } else {
        fs::read_to_string(path).map_err(io_err)
    }
}

/// Извлекает поступления из строк выписки.
///
/// Владеет состоянием остатка, поэтому один экземпляр = одна выписка.
/// Строки обрабатываются строго по порядку.
///
/// Пример использования:
/// ```no_run
/// use deposit_parser::{DepositExtractor, ExtractorConfig};
///
/// let mut extractor = DepositExtractor::new(ExtractorConfig::default());
/// let deposits = extractor.extract_file("statement.txt".as_ref())?;
/// # Ok::<(), deposit_parser::ExtractError>(())
/// ```
#[derive(Debug)]
pub struct DepositExtractor {
    config: ExtractorConfig,
    tracker: BalanceTracker,
    receipts: ReceiptSynthesizer,
}

impl DepositExtractor {
    pub fn new(config: ExtractorConfig) -> Self {
        let receipts = ReceiptSynthesizer::new(config.receipt_fallback);
        DepositExtractor {
            config,
            tracker: BalanceTracker::new(),
            receipts,
        }
    }

    pub fn tracker(&self) -> &BalanceTracker {
        &self.tracker
    }

    pub fn extract_file(&mut self, path: &Path) -> Result<Vec<DepositRecord>, ExtractError> {
        let text = read_statement(path)?;
        Ok(self.extract_text(&text))
    }

    pub fn extract_text(&mut self, text: &str) -> Vec<DepositRecord> {
        let lines: Vec<&str> = text.lines().collect();
        self.extract_lines(&lines)
    }

    pub fn extract_lines<S: AsRef<str>>(&mut self, lines: &[S]) -> Vec<DepositRecord> {
        let range = self.config.amount_range();
        let mut deposits = Vec::new();

        for candidate in BoundaryScanner::new(lines, self.config.lookahead_lines) {
            let (amount, balance) = match self.tracker.observe(&candidate) {
                Classification::Deposit { amount, balance } => (amount, balance),
                Classification::Withdrawal { .. } | Classification::Skipped => continue,
            };

            let channel = ChannelType::tag(&candidate.anchor);
            let fields = extract_fields(&candidate.text, channel);

            if !range.contains(amount) {
                debug!(
                    line = candidate.anchor_index,
                    amount = %format_minor_units(amount),
                    "deposit amount out of range, dropped"
                );
                continue;
            }

            let receipt_no = match fields.receipt {
                Some(receipt) => receipt,
                None => self.receipts.next_receipt(),
            };

            debug!(
                line = candidate.anchor_index,
                %channel,
                amount = %format_minor_units(amount),
                %receipt_no,
                "deposit found"
            );

            deposits.push(DepositRecord {
                date: normalize_date(&candidate.date),
                raw_date: candidate.date,
                amount,
                balance,
                channel,
                customer: fields.customer,
                receipt_no,
                text: candidate.text,
            });
        }

        info!(deposits = deposits.len(), lines = lines.len(), "statement processed");
        deposits
    }
}
