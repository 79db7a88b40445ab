use std::fmt;
use crate::model::{Balance, ChannelType, DepositRecord};
use crate::utils::format_grouped;

/// Сколько первых поступлений показывать в сводке
pub const PREVIEW_LEN: usize = 5;

/// Итоги по одному каналу
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelTotals {
    pub channel: ChannelType,
    pub count: usize,
    pub amount: u64,
}

/// Сводка по найденным поступлениям
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub total: u64,
    /// сколько поступлений с непустым именем клиента
    pub with_customer: usize,
    /// каналы в порядке первого появления
    pub by_channel: Vec<ChannelTotals>,
    /// первые несколько поступлений для предпросмотра
    pub preview: Vec<DepositRecord>,
    pub currency_label: String,
}

impl Summary {
    pub fn from_records(records: &[DepositRecord]) -> Self {
        let mut by_channel: Vec<ChannelTotals> = Vec::new();

        for record in records {
            match by_channel.iter_mut().find(|t| t.channel == record.channel) {
                Some(totals) => {
                    totals.count += 1;
                    totals.amount += record.amount;
                }
                None => by_channel.push(ChannelTotals {
                    channel: record.channel,
                    count: 1,
                    amount: record.amount,
                }),
            }
        }

        Summary {
            count: records.len(),
            total: records.iter().map(|r| r.amount).sum(),
            with_customer: records
                .iter()
                .filter(|r| !r.customer.trim().is_empty())
                .count(),
            by_channel,
            preview: records.iter().take(PREVIEW_LEN).cloned().collect(),
            currency_label: "KES".to_string(),
        }
    }

    pub fn with_currency(mut self, label: &str) -> Self {
        self.currency_label = label.to_string();
        self
    }

    /// Доля поступлений с именем клиента, в процентах. Для пустой выписки - 0
    pub fn customer_percentage(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.with_customer as f64 * 100.0 / self.count as f64
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ccy = &self.currency_label;

        writeln!(f, "DEPOSIT SUMMARY")?;
        writeln!(f, "{}", "=".repeat(40))?;
        writeln!(f, "Total deposits: {}", self.count)?;
        writeln!(f, "Total amount: {ccy} {}", format_grouped(self.total as Balance))?;
        writeln!(
            f,
            "With customer names: {} ({:.1}%)",
            self.with_customer,
            self.customer_percentage()
        )?;

        writeln!(f)?;
        writeln!(f, "Transaction types:")?;
        for t in &self.by_channel {
            writeln!(
                f,
                "- {}: {} transactions ({ccy} {})",
                t.channel,
                t.count,
                format_grouped(t.amount as Balance)
            )?;
        }

        if !self.preview.is_empty() {
            writeln!(f)?;
            writeln!(f, "First {} transactions:", self.preview.len())?;
            for (i, record) in self.preview.iter().enumerate() {
                writeln!(f, "{}. {record}", i + 1)?;
            }
        }

        Ok(())
    }
}
