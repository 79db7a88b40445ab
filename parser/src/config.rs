use std::fs;
use std::path::Path;
use serde::Deserialize;
use crate::error::ExtractError;
use crate::receipt::ReceiptFallback;
use crate::scanner::DEFAULT_LOOKAHEAD;
use crate::utils::parse_amount;
use crate::validator::{AmountRange, DEFAULT_MAX_AMOUNT, DEFAULT_MIN_AMOUNT};

/// Больше строк-продолжений у одной транзакции не бывает даже в теории
pub const MAX_LOOKAHEAD: usize = 20;

/// Настройки извлечения поступлений.
///
/// Значения по умолчанию подобраны под выписки I&M Bank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractorConfig {
    /// минимальная сумма поступления в центах (включительно)
    pub min_amount: u64,
    /// максимальная сумма поступления в центах (включительно)
    pub max_amount: u64,
    /// сколько строк-продолжений можно приклеить к строке с датой
    pub lookahead_lines: usize,
    /// счёт зачисления в выходном CSV
    pub deposit_account: String,
    /// название товара/услуги в выходном CSV
    pub item_name: String,
    /// подпись валюты в сводке
    pub currency_label: String,
    pub receipt_fallback: ReceiptFallback,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        ExtractorConfig {
            min_amount: DEFAULT_MIN_AMOUNT,
            max_amount: DEFAULT_MAX_AMOUNT,
            lookahead_lines: DEFAULT_LOOKAHEAD,
            deposit_account: "I&M Bank".to_string(),
            item_name: "Jaba Juice".to_string(),
            currency_label: "KES".to_string(),
            receipt_fallback: ReceiptFallback::Clock,
        }
    }
}

/// Конфиг в том виде, в каком он лежит в TOML-файле: всё опционально, суммы строками
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    min_amount: Option<String>,
    max_amount: Option<String>,
    lookahead_lines: Option<usize>,
    deposit_account: Option<String>,
    item_name: Option<String>,
    currency_label: Option<String>,
    receipt_fallback: Option<ReceiptFallback>,
}

/// Значения из командной строки: перекрывают и умолчания, и файл настроек
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    /// сумма строкой, например "200.00"
    pub min_amount: Option<String>,
    pub max_amount: Option<String>,
    pub lookahead_lines: Option<usize>,
    pub receipt_fallback: Option<ReceiptFallback>,
}

impl ExtractorConfig {
    /// Разбирает TOML поверх значений по умолчанию
    pub fn from_toml_str(raw: &str) -> Result<Self, ExtractError> {
        let file: ConfigFile = toml::from_str(raw)?;
        let defaults = ExtractorConfig::default();

        let config = ExtractorConfig {
            min_amount: file
                .min_amount
                .as_deref()
                .map(parse_amount)
                .transpose()?
                .unwrap_or(defaults.min_amount),
            max_amount: file
                .max_amount
                .as_deref()
                .map(parse_amount)
                .transpose()?
                .unwrap_or(defaults.max_amount),
            lookahead_lines: file.lookahead_lines.unwrap_or(defaults.lookahead_lines),
            deposit_account: file.deposit_account.unwrap_or(defaults.deposit_account),
            item_name: file.item_name.unwrap_or(defaults.item_name),
            currency_label: file.currency_label.unwrap_or(defaults.currency_label),
            receipt_fallback: file.receipt_fallback.unwrap_or(defaults.receipt_fallback),
        };

        config.validate()?;
        Ok(config)
    }

    /// Читает TOML-файл с настройками
    pub fn load(path: &Path) -> Result<Self, ExtractError> {
        let raw = fs::read_to_string(path).map_err(|source| ExtractError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    /// Задаёт нижнюю границу суммы строкой, например "200.00"
    pub fn set_min_amount(&mut self, raw: &str) -> Result<(), ExtractError> {
        self.min_amount = parse_amount(raw)?;
        Ok(())
    }

    /// Задаёт верхнюю границу суммы строкой, например "200000.00"
    pub fn set_max_amount(&mut self, raw: &str) -> Result<(), ExtractError> {
        self.max_amount = parse_amount(raw)?;
        Ok(())
    }

    /// Накладывает значения из командной строки и заново проверяет результат
    pub fn with_overrides(mut self, overrides: &ConfigOverrides) -> Result<Self, ExtractError> {
        if let Some(raw) = overrides.min_amount.as_deref() {
            self.set_min_amount(raw)?;
        }
        if let Some(raw) = overrides.max_amount.as_deref() {
            self.set_max_amount(raw)?;
        }
        if let Some(lookahead) = overrides.lookahead_lines {
            self.lookahead_lines = lookahead;
        }
        if let Some(fallback) = overrides.receipt_fallback {
            self.receipt_fallback = fallback;
        }

        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ExtractError> {
        if self.min_amount > self.max_amount {
            return Err(ExtractError::InvalidConfig(format!(
                "min_amount ({}) is greater than max_amount ({})",
                self.min_amount, self.max_amount
            )));
        }
        if self.lookahead_lines > MAX_LOOKAHEAD {
            return Err(ExtractError::InvalidConfig(format!(
                "lookahead_lines must be at most {MAX_LOOKAHEAD}, got {}",
                self.lookahead_lines
            )));
        }
        Ok(())
    }

    pub fn amount_range(&self) -> AmountRange {
        AmountRange::new(self.min_amount, self.max_amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_statement_format() {
        let config = ExtractorConfig::default();
        assert_eq!(config.min_amount, 20000);
        assert_eq!(config.max_amount, 20000000);
        assert_eq!(config.lookahead_lines, 4);
        assert_eq!(config.deposit_account, "I&M Bank");
        assert_eq!(config.item_name, "Jaba Juice");
        assert_eq!(config.receipt_fallback, ReceiptFallback::Clock);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_toml_gives_defaults() {
        assert_eq!(ExtractorConfig::from_toml_str("").unwrap(), ExtractorConfig::default());
    }

    #[test]
    fn toml_overrides_selected_fields() {
        let raw = r#"
            min_amount = "50.00"
            max_amount = "1,000,000.00"
            lookahead_lines = 2
            item_name = "Catering"
            receipt_fallback = "sequence"
        "#;
        let config = ExtractorConfig::from_toml_str(raw).unwrap();

        assert_eq!(config.min_amount, 5000);
        assert_eq!(config.max_amount, 100_000_000);
        assert_eq!(config.lookahead_lines, 2);
        assert_eq!(config.item_name, "Catering");
        assert_eq!(config.deposit_account, "I&M Bank");
        assert_eq!(config.receipt_fallback, ReceiptFallback::Sequence);
    }

    #[test]
    fn rejects_unknown_keys() {
        let err = ExtractorConfig::from_toml_str("min_amont = \"1.00\"").unwrap_err();
        assert!(matches!(err, ExtractError::Config(_)), "{err}");
    }

    #[test]
    fn rejects_bad_amounts_and_inverted_range() {
        let err = ExtractorConfig::from_toml_str("min_amount = \"abc\"").unwrap_err();
        assert!(matches!(err, ExtractError::Int(_)), "{err}");

        let err = ExtractorConfig::from_toml_str("min_amount = \"500.00\"\nmax_amount = \"100.00\"")
            .unwrap_err();
        assert!(matches!(err, ExtractError::InvalidConfig(_)), "{err}");
    }

    #[test]
    fn rejects_huge_lookahead() {
        let config = ExtractorConfig { lookahead_lines: 21, ..ExtractorConfig::default() };
        assert!(matches!(config.validate(), Err(ExtractError::InvalidConfig(_))));
    }

    #[test]
    fn setters_parse_decimal_strings() {
        let mut config = ExtractorConfig::default();
        config.set_min_amount("1.5").unwrap();
        config.set_max_amount("2,000.00").unwrap();
        assert_eq!(config.amount_range(), AmountRange::new(150, 200000));
        assert!(config.set_min_amount("-1").is_err());
    }

    #[test]
    fn missing_config_file_is_reported_as_config() {
        let err = ExtractorConfig::load(Path::new("/nope/settings.toml")).unwrap_err();
        assert!(matches!(err, ExtractError::ConfigIo { .. }), "{err}");

        let message = err.to_string();
        assert!(message.starts_with("failed to read config /nope/settings.toml"), "{message}");
        assert!(!message.contains("statement"), "{message}");
    }

    #[test]
    fn flags_override_toml_values() {
        let raw = r#"
            min_amount = "50.00"
            max_amount = "1,000.00"
            lookahead_lines = 2
            item_name = "Catering"
        "#;
        let overrides = ConfigOverrides {
            max_amount: Some("5,000.00".into()),
            lookahead_lines: Some(6),
            receipt_fallback: Some(ReceiptFallback::Sequence),
            ..ConfigOverrides::default()
        };
        let config = ExtractorConfig::from_toml_str(raw)
            .unwrap()
            .with_overrides(&overrides)
            .unwrap();

        // из файла
        assert_eq!(config.min_amount, 5000);
        assert_eq!(config.item_name, "Catering");
        // из флагов
        assert_eq!(config.max_amount, 500_000);
        assert_eq!(config.lookahead_lines, 6);
        assert_eq!(config.receipt_fallback, ReceiptFallback::Sequence);
    }

    #[test]
    fn empty_overrides_change_nothing() {
        let config = ExtractorConfig::default()
            .with_overrides(&ConfigOverrides::default())
            .unwrap();
        assert_eq!(config, ExtractorConfig::default());
    }

    #[test]
    fn overrides_are_validated() {
        let overrides = ConfigOverrides {
            min_amount: Some("2,000.00".into()),
            max_amount: Some("100.00".into()),
            ..ConfigOverrides::default()
        };
        let err = ExtractorConfig::default().with_overrides(&overrides).unwrap_err();
        assert!(matches!(err, ExtractError::InvalidConfig(_)), "{err}");
    }
}
