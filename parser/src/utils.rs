use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;
use crate::error::ExtractError;
use crate::model::Balance;

/// Фрагмент регулярки для денежной суммы: "500.00", "10500.00", "10,500.00"
pub(crate) const AMOUNT_PATTERN: &str = r"\d[\d,]*\.\d{2}";

static AMOUNT_TOKEN_RE: Lazy<Regex> = Lazy::new(|| {
    // \b по краям - чтобы не откусывать хвост от "10500.00" или "S12345.00"
    Regex::new(r"\b(?:\d{1,3}(?:,\d{3})+|\d+)\.\d{2}\b").unwrap()
});

/// Разбирает сумму вида "10,500.00" в центы
pub(crate) fn parse_amount(raw: &str) -> Result<u64, ExtractError> {
    let mut cleaned = raw.trim().replace(' ', "");

    if raw.contains(',') {
        if raw.contains('.') {
            cleaned = cleaned.replace(',', "");
        } else {
            cleaned = cleaned.replace(',', ".");
        }
    }

    if cleaned.is_empty() {
        return Err(ExtractError::InvalidAmount("empty amount".into()));
    }
    if cleaned.starts_with('-') {
        return Err(ExtractError::InvalidAmount(format!("negative amount: {cleaned}")));
    }

    let (int_part, dec_part) = cleaned.split_once('.').unwrap_or((cleaned.as_str(), ""));
    if dec_part.contains('.') {
        // больше одной точки - странный формат
        return Err(ExtractError::InvalidAmount(format!("too many dots in amount: {cleaned}")));
    }

    let int_part: u64 = int_part.parse()?;

    let dec_part: u64 = match dec_part.len() {
        0 => 0,
        1 => dec_part.parse::<u64>()? * 10,
        2 => dec_part.parse()?,
        _ => {
            return Err(ExtractError::InvalidAmount(format!(
                "too many fractional digits in amount: {cleaned}"
            )));
        }
    };

    int_part
        .checked_mul(100)
        .and_then(|v| v.checked_add(dec_part))
        .ok_or_else(|| ExtractError::InvalidAmount(format!("amount overflow: {cleaned}")))
}

/// Все денежные суммы строки в порядке появления.
///
/// Нераспознанные токены пропускаются с предупреждением, строка целиком не отбрасывается.
pub(crate) fn find_amounts(line: &str) -> Vec<u64> {
    AMOUNT_TOKEN_RE
        .find_iter(line)
        .filter_map(|m| match parse_amount(m.as_str()) {
            Ok(v) => Some(v),
            Err(e) => {
                warn!("skipping amount token '{}': {e}", m.as_str());
                None
            }
        })
        .collect()
}

/// Форматирует центы в человекочитаемый формат: 50000 -> "500.00"
pub fn format_minor_units<T>(value: T) -> String
where
    T: Into<i128>,
{
    let v: i128 = value.into();
    let sign = if v < 0 { "-" } else { "" };
    let v = v.unsigned_abs();
    let units = v / 100;
    let frac = v % 100;

    format!("{sign}{units}.{frac:02}")
}

/// Как [`format_minor_units`], но с разделителем тысяч: 123456789 -> "1,234,567.89"
pub fn format_grouped(value: Balance) -> String {
    let sign = if value < 0 { "-" } else { "" };
    let v = value.unsigned_abs();
    let units = (v / 100).to_string();
    let frac = v % 100;

    let mut grouped = String::with_capacity(units.len() + units.len() / 3);
    for (i, c) in units.chars().enumerate() {
        if i > 0 && (units.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    format!("{sign}{grouped}.{frac:02}")
}

/// "01-Jan-2024" -> "01/01/2024"
///
/// Если дата не разбирается - возвращается как есть, запись при этом не теряется.
pub(crate) fn normalize_date(raw: &str) -> String {
    match NaiveDate::parse_from_str(raw.trim(), "%d-%b-%Y") {
        Ok(date) => date.format("%d/%m/%Y").to_string(),
        Err(e) => {
            warn!("keeping raw date '{raw}': {e}");
            raw.to_string()
        }
    }
}
