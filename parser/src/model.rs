use std::fmt;

/// Тип для хранения баланса счёта в центах (минимальных единицах валюты), signed
pub type Balance = i128;

/// Канал поступления денег
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelType {
    /// Перевод через M-Pesa
    MPesa,
    /// Чек
    Chq,
    /// Перевод со счёта ("<номер счёта>/<имя>")
    AccountDeposit,
    /// Всё остальное
    OtherDeposit,
}

impl ChannelType {
    /// Название канала так, как оно попадает в отчёт и в Memo
    pub fn label(&self) -> &'static str {
        match self {
            ChannelType::MPesa => "M-Pesa",
            ChannelType::Chq => "CHQ",
            ChannelType::AccountDeposit => "Account Deposit",
            ChannelType::OtherDeposit => "Other Deposit",
        }
    }
}

impl fmt::Display for ChannelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Одна строка выписки вместе с её позицией
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawLine<'a> {
    pub index: usize,
    pub text: &'a str,
}

/// Кандидат в транзакции: строка с датой + строки-продолжения.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateTransaction {
    /// индекс строки с датой
    pub anchor_index: usize,
    /// дата как в выписке, например "01-Jan-2024"
    pub date: String,
    /// сама строка с датой (уже обрезанная)
    pub anchor: String,
    /// строка с датой + продолжения через пробел
    pub text: String,
    /// суммы из строки с датой, в центах, в порядке появления
    pub amounts: Vec<u64>,
}

/// Имя клиента и номер квитанции, вытащенные из текста транзакции
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedFields {
    /// может быть пустым
    pub customer: String,
    /// None - в тексте нет подходящего номера, его придётся сгенерировать
    pub receipt: Option<String>,
}

/// Итоговое поступление, прошедшее все проверки
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepositRecord {
    /// дата как в выписке
    pub raw_date: String,
    /// дата в формате DD/MM/YYYY (или raw_date, если не разобралась)
    pub date: String,
    /// сумма в центах
    pub amount: u64,
    /// баланс после операции
    pub balance: Balance,
    pub channel: ChannelType,
    pub customer: String,
    pub receipt_no: String,
    /// полный текст транзакции, для сверки
    pub text: String,
}

impl fmt::Display for DepositRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let customer: String = self.customer.chars().take(20).collect();
        write!(
            f,
            "{} | {:<20} | {:>12} | {}",
            self.channel,
            customer,
            crate::utils::format_grouped(self.amount as Balance),
            self.receipt_no,
        )
    }
}
