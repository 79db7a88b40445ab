use once_cell::sync::Lazy;
use regex::Regex;
use crate::model::ChannelType;

static ACCOUNT_REF_RE: Lazy<Regex> = Lazy::new(|| {
    // длинный номер счёта, слэш и сразу буква: "12345678901/Acme"
    Regex::new(r"\d{8,}/[a-zA-Z]").unwrap()
});

/// Проверка текста транзакции
pub type Predicate = fn(&str) -> bool;

pub(crate) fn is_mpesa(text: &str) -> bool {
    text.contains("MMP/Mpesa") || text.to_uppercase().contains("MPESA")
}

pub(crate) fn is_chq(text: &str) -> bool {
    text.to_uppercase().contains("CHQ")
}

pub(crate) fn has_account_ref(text: &str) -> bool {
    ACCOUNT_REF_RE.is_match(text)
}

/// Правила определения канала, в порядке приоритета.
///
/// Побеждает первое сработавшее; если не сработало ни одно - [`ChannelType::OtherDeposit`].
pub const TAG_RULES: &[(Predicate, ChannelType)] = &[
    (is_mpesa, ChannelType::MPesa),
    (is_chq, ChannelType::Chq),
    (has_account_ref, ChannelType::AccountDeposit),
];

impl ChannelType {
    /// Определяет канал поступления по тексту транзакции
    pub fn tag(text: &str) -> ChannelType {
        TAG_RULES
            .iter()
            .find(|(matches, _)| matches(text))
            .map(|(_, channel)| *channel)
            .unwrap_or(ChannelType::OtherDeposit)
    }
}
