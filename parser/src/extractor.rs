mod utils;

use lazy_regex::regex_captures;
use once_cell::sync::Lazy;
use regex::Regex;
use crate::model::{ChannelType, ExtractedFields};
use crate::utils::AMOUNT_PATTERN;
use utils::*;

/// Имя, которое подставляется, если для "прочего" поступления ничего не нашлось
pub const UNKNOWN_CUSTOMER: &str = "Unknown Customer";

/// Извлекатель полей для одного канала
pub type FieldExtractor = fn(&str) -> ExtractedFields;

/// Какой извлекатель отвечает за какой канал
pub const EXTRACTORS: &[(ChannelType, FieldExtractor)] = &[
    (ChannelType::MPesa, extract_mpesa),
    (ChannelType::Chq, extract_chq),
    (ChannelType::AccountDeposit, extract_account_deposit),
    (ChannelType::OtherDeposit, extract_other_deposit),
];

static MPESA_FROM_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)From\s+(.+?)(?:\s+Transaction|\s+Ref|\s+S\d|\s+{AMOUNT_PATTERN}|$)"
    ))
    .unwrap()
});

static CHQ_NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?i)NO\d+\s+(.+?)(?:\s+{AMOUNT_PATTERN}|$)")).unwrap()
});

/// Запасные шаблоны имени для "прочих" поступлений, по порядку:
/// буквы после слэша; слова с заглавной перед "S<цифры>"; слова с заглавной перед суммой.
static OTHER_NAME_PATTERNS: Lazy<[Regex; 3]> = Lazy::new(|| {
    [
        Regex::new(&format!(
            r"/([a-zA-Z][a-zA-Z\s]+?)(?:\s+S\d+|\s+{AMOUNT_PATTERN}|$)"
        ))
        .unwrap(),
        Regex::new(r"(\b[A-Z][a-z]+(?:\s+[A-Z][a-z]+)*)\s+S\d+").unwrap(),
        Regex::new(&format!(r"(\b[A-Z][a-z]+(?:\s+[A-Z][a-z]+)*)\s+{AMOUNT_PATTERN}")).unwrap(),
    ]
});

/// Достаёт имя клиента и номер квитанции по правилам своего канала.
///
/// Никогда не падает: если ничего не нашлось, поля остаются пустыми.
pub fn extract_fields(text: &str, channel: ChannelType) -> ExtractedFields {
    EXTRACTORS
        .iter()
        .find(|(c, _)| *c == channel)
        .map(|(_, extract)| extract(text))
        .unwrap_or_default()
}

fn extract_mpesa(text: &str) -> ExtractedFields {
    let receipt = find_s_reference(text);

    let customer = MPESA_FROM_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| keep_name_words(&strip_mpesa_tails(m.as_str())))
        .unwrap_or_default();

    ExtractedFields { customer, receipt }
}

fn extract_chq(text: &str) -> ExtractedFields {
    let receipt = regex_captures!(r"(?i)CHQ\s*(?:NO)?\s*(\d+)", text)
        .map(|(_, number)| number.to_string());

    let customer = CHQ_NAME_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| strip_chq_tails(m.as_str()))
        .unwrap_or_default();

    ExtractedFields { customer, receipt }
}

fn extract_account_deposit(text: &str) -> ExtractedFields {
    let receipt = find_s_reference(text);

    let customer = regex_captures!(r"\d{8,}/([a-zA-Z][a-zA-Z0-9]*)", text)
        .map(|(_, name)| name.to_string())
        .unwrap_or_default();

    ExtractedFields { customer, receipt }
}

fn extract_other_deposit(text: &str) -> ExtractedFields {
    let receipt = find_s_reference(text);

    let customer = OTHER_NAME_PATTERNS
        .iter()
        .find_map(|re| re.captures(text))
        .and_then(|caps| caps.get(1).map(|m| m.as_str().trim().to_string()))
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| UNKNOWN_CUSTOMER.to_string());

    ExtractedFields { customer, receipt }
}
