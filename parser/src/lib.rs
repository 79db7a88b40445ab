//! Извлечение поступлений из текстовой банковской выписки.
//!
//! Текст выписки (уже вытащенный из PDF) разбивается на транзакции, поступления
//! определяются по росту остатка, для каждого определяется канал, имя клиента и номер
//! квитанции. Результат - строки CSV для импорта в учётную систему.

pub mod error;
pub mod model;
pub mod config;
pub mod scanner;
pub mod classifier;
pub mod tagger;
pub mod extractor;
pub mod validator;
pub mod receipt;
pub mod pipeline;
pub mod summary;
pub mod serialization;

mod utils;

pub use crate::model::{Balance, CandidateTransaction, ChannelType, DepositRecord, ExtractedFields};
pub use crate::config::{ConfigOverrides, ExtractorConfig};
pub use crate::classifier::{BalanceTracker, Classification};
pub use crate::error::ExtractError;
pub use crate::pipeline::{read_statement, read_statement_from, DepositExtractor};
pub use crate::receipt::ReceiptFallback;
pub use crate::scanner::BoundaryScanner;
pub use crate::serialization::{write_csv, OutputRow};
pub use crate::summary::Summary;
pub use crate::utils::{format_grouped, format_minor_units};
pub use crate::validator::AmountRange;
