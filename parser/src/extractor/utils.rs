use lazy_regex::regex_find;
use once_cell::sync::Lazy;
use regex::Regex;
use crate::utils::AMOUNT_PATTERN;

/// Хвосты, которые срезаются с имени M-Pesa отправителя, по порядку
static MPESA_NAME_TAILS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"\s+S\d+.*$".to_string(),
        format!(r"\s+{AMOUNT_PATTERN}.*$"),
        r"(?i)\s+Transaction.*$".to_string(),
        r"(?i)\s+Ref.*$".to_string(),
        r"(?i)\s+TH\d+.*$".to_string(),
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Хвосты, которые срезаются с имени после "NO<цифры>" в чеках
static CHQ_NAME_TAILS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [format!(r"\s+{AMOUNT_PATTERN}.*$"), r"\s+S\d+.*$".to_string()]
        .iter()
        .map(|p| Regex::new(p).unwrap())
        .collect()
});

pub(super) const MAX_NAME_WORDS: usize = 4;

/// Первый токен вида "S12345" где угодно в тексте
pub(super) fn find_s_reference(text: &str) -> Option<String> {
    regex_find!(r"S\d+", text).map(str::to_string)
}

fn strip_tails(name: &str, tails: &[Regex]) -> String {
    tails
        .iter()
        .fold(name.trim().to_string(), |acc, re| re.replace(&acc, "").into_owned())
        .trim()
        .to_string()
}

pub(super) fn strip_mpesa_tails(name: &str) -> String {
    strip_tails(name, &MPESA_NAME_TAILS)
}

pub(super) fn strip_chq_tails(name: &str) -> String {
    strip_tails(name, &CHQ_NAME_TAILS)
}

/// Оставляет только слова из букв (от 2 символов), слева направо.
///
/// Как только набралось хотя бы одно слово, первый же "мусорный" токен обрывает имя.
pub(super) fn keep_name_words(raw: &str) -> String {
    let mut words: Vec<&str> = Vec::new();

    for word in raw.split_whitespace() {
        if word.chars().all(char::is_alphabetic) && word.chars().count() >= 2 {
            words.push(word);
        } else if !words.is_empty() {
            break;
        }
    }

    words.truncate(MAX_NAME_WORDS);
    words.join(" ")
}
