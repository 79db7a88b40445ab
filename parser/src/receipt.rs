use chrono::Local;
use serde::Deserialize;
use tracing::warn;

/// Префикс сгенерированных номеров квитанций
pub const AUTO_PREFIX: &str = "AUTO";

/// Как генерировать номер квитанции, если в тексте транзакции его нет
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReceiptFallback {
    /// `AUTO` + текущее время HHMMSS.
    ///
    /// Важно: в пределах одной секунды номера совпадают, уникальность не гарантируется.
    #[default]
    Clock,
    /// `AUTO` + порядковый номер в рамках запуска: AUTO000001, AUTO000002, ...
    Sequence,
}

/// Выдаёт номера квитанций для поступлений без своего номера
#[derive(Debug, Clone)]
pub struct ReceiptSynthesizer {
    mode: ReceiptFallback,
    issued: u32,
}

impl ReceiptSynthesizer {
    pub fn new(mode: ReceiptFallback) -> Self {
        ReceiptSynthesizer { mode, issued: 0 }
    }

    /// Сколько номеров уже выдано
    pub fn issued(&self) -> u32 {
        self.issued
    }

    pub fn next_receipt(&mut self) -> String {
        self.issued += 1;
        match self.mode {
            ReceiptFallback::Clock => {
                let receipt = format!("{AUTO_PREFIX}{}", Local::now().format("%H%M%S"));
                warn!(%receipt, "no reference in transaction, using clock-based receipt number");
                receipt
            }
            ReceiptFallback::Sequence => format!("{AUTO_PREFIX}{:06}", self.issued),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_receipts_look_like_auto_hhmmss() {
        let mut synth = ReceiptSynthesizer::new(ReceiptFallback::Clock);
        let receipt = synth.next_receipt();

        assert!(receipt.starts_with(AUTO_PREFIX));
        assert_eq!(receipt.len(), AUTO_PREFIX.len() + 6);
        assert!(receipt[AUTO_PREFIX.len()..].chars().all(|c| c.is_ascii_digit()));
        assert_eq!(synth.issued(), 1);
    }

    #[test]
    fn sequence_receipts_are_unique_within_run() {
        let mut synth = ReceiptSynthesizer::new(ReceiptFallback::Sequence);
        assert_eq!(synth.next_receipt(), "AUTO000001");
        assert_eq!(synth.next_receipt(), "AUTO000002");

        let mut other = ReceiptSynthesizer::new(ReceiptFallback::Sequence);
        assert_eq!(other.next_receipt(), "AUTO000001");
    }
}
