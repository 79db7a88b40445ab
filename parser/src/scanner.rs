use once_cell::sync::Lazy;
use regex::Regex;
use crate::model::{CandidateTransaction, RawLine};
use crate::utils::find_amounts;

/// Сколько строк после строки с датой можно приклеить к транзакции
pub const DEFAULT_LOOKAHEAD: usize = 4;

/// Подстроки, по которым строка считается продолжением транзакции
pub const CONTINUATION_KEYWORDS: &[&str] = &["Ref ", "From ", "S6", "S7", "S8", "TH", "NO0", "CHQ"];

static DATE_ANCHOR_RE: Lazy<Regex> = Lazy::new(|| {
    // DD-Mon-YYYY в начале строки
    Regex::new(r"^(\d{2}-[A-Za-z]{3}-\d{4})").unwrap()
});

/// Дата в начале строки, если строка начинает транзакцию
pub(crate) fn anchor_date(line: &str) -> Option<&str> {
    DATE_ANCHOR_RE
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Можно ли приклеить строку к текущей транзакции
pub(crate) fn is_continuation(line: &str) -> bool {
    if anchor_date(line).is_some() {
        return false;
    }

    if CONTINUATION_KEYWORDS.iter().any(|kw| line.contains(kw)) {
        return true;
    }

    !line.is_empty()
        && !line.starts_with(|c: char| c.is_ascii_digit())
        && line.chars().count() > 3
}

/// Идёт по строкам выписки и лениво отдаёт кандидатов в транзакции.
///
/// Транзакция начинается со строки `DD-Mon-YYYY ...`, к ней приклеивается
/// до `lookahead` следующих строк, пока они похожи на продолжение.
/// Общего состояния не трогает.
pub struct BoundaryScanner<'a, S> {
    lines: &'a [S],
    pos: usize,
    lookahead: usize,
}

impl<'a, S: AsRef<str>> BoundaryScanner<'a, S> {
    pub fn new(lines: &'a [S], lookahead: usize) -> Self {
        BoundaryScanner { lines, pos: 0, lookahead }
    }

    fn raw_line(&self, index: usize) -> Option<RawLine<'a>> {
        self.lines.get(index).map(|l| RawLine {
            index,
            text: l.as_ref().trim(),
        })
    }
}

impl<S: AsRef<str>> Iterator for BoundaryScanner<'_, S> {
    type Item = CandidateTransaction;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(anchor) = self.raw_line(self.pos) {
            self.pos += 1;

            let Some(date) = anchor_date(anchor.text) else {
                continue;
            };

            let mut text = anchor.text.to_string();
            let mut absorbed = 0;
            while absorbed < self.lookahead {
                let Some(next) = self.raw_line(self.pos) else {
                    break;
                };
                if !is_continuation(next.text) {
                    break;
                }
                text.push(' ');
                text.push_str(next.text);
                self.pos += 1;
                absorbed += 1;
            }

            return Some(CandidateTransaction {
                anchor_index: anchor.index,
                date: date.to_string(),
                anchor: anchor.text.to_string(),
                text,
                amounts: find_amounts(anchor.text),
            });
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(lines: &[&str]) -> Vec<CandidateTransaction> {
        BoundaryScanner::new(lines, DEFAULT_LOOKAHEAD).collect()
    }

    #[test]
    fn only_date_prefixed_lines_start_transactions() {
        let lines = [
            "STATEMENT OF ACCOUNT",
            "Transaction Date Description Balance",
            "  01-Jan-2024 Opening 0.00 100.00  ",
            "Page 1 of 3 01-Jan-2024",
        ];
        let txs = scan(&lines);

        assert_eq!(txs.len(), 1);
        assert_eq!(txs[0].anchor_index, 2);
        assert_eq!(txs[0].date, "01-Jan-2024");
        assert_eq!(txs[0].anchor, "01-Jan-2024 Opening 0.00 100.00");
        assert_eq!(txs[0].amounts, vec![0, 10000]);
    }

    #[test]
    fn merges_reference_continuation_line() {
        let lines = [
            "01-Jan-2024 MMP/Mpesa 500.00 10500.00",
            "Ref ABC123",
        ];
        let txs = scan(&lines);

        assert_eq!(txs.len(), 1);
        assert_eq!(txs[0].text, "01-Jan-2024 MMP/Mpesa 500.00 10500.00 Ref ABC123");
        // суммы берутся только из строки с датой
        assert_eq!(txs[0].amounts, vec![50000, 1050000]);
    }

    #[test]
    fn new_date_line_always_stops_lookahead() {
        let lines = [
            "01-Jan-2024 MMP/Mpesa 500.00 10500.00",
            "02-Jan-2024 Ref From CHQ S7 300.00 10800.00",
        ];
        let txs = scan(&lines);

        assert_eq!(txs.len(), 2);
        assert_eq!(txs[0].text, "01-Jan-2024 MMP/Mpesa 500.00 10500.00");
        assert_eq!(txs[1].anchor_index, 1);
    }

    #[test]
    fn lookahead_is_limited() {
        let lines = [
            "01-Jan-2024 Transfer 500.00 10500.00",
            "line one",
            "line two",
            "line three",
            "line four",
            "line five",
        ];
        let txs = scan(&lines);

        assert_eq!(txs.len(), 1);
        assert_eq!(
            txs[0].text,
            "01-Jan-2024 Transfer 500.00 10500.00 line one line two line three line four"
        );

        let short: Vec<_> = BoundaryScanner::new(&lines, 1).collect();
        assert_eq!(short[0].text, "01-Jan-2024 Transfer 500.00 10500.00 line one");
    }

    #[test]
    fn stops_on_blank_numeric_or_short_lines() {
        for stopper in ["", "254712345678", "abc"] {
            let lines = ["01-Jan-2024 Transfer 500.00 10500.00", stopper, "Ref later"];
            let txs = scan(&lines);
            assert_eq!(txs[0].text, "01-Jan-2024 Transfer 500.00 10500.00", "stopper {stopper:?}");
        }
    }

    #[test]
    fn keyword_beats_numeric_start() {
        let lines = ["01-Jan-2024 Transfer 500.00 10500.00", "12 Ref 99", "123 S7001234"];
        let txs = scan(&lines);
        assert_eq!(
            txs[0].text,
            "01-Jan-2024 Transfer 500.00 10500.00 12 Ref 99 123 S7001234"
        );
    }

    #[test]
    fn continuation_rules() {
        assert!(is_continuation("Ref S12345"));
        assert!(is_continuation("NO001234"));
        assert!(is_continuation("Branch Westlands"));
        assert!(!is_continuation("abc"));
        assert!(!is_continuation("9 Kenyatta Avenue"));
        assert!(!is_continuation("05-Feb-2024 CHQ"));
    }
}
