/// Нижняя граница правдоподобного поступления, 200.00
pub const DEFAULT_MIN_AMOUNT: u64 = 200_00;
/// Верхняя граница правдоподобного поступления, 200 000.00
pub const DEFAULT_MAX_AMOUNT: u64 = 200_000_00;

/// Допустимый диапазон суммы поступления (в центах), границы включены.
///
/// Отсекает комиссии и явные аномалии.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmountRange {
    pub min: u64,
    pub max: u64,
}

impl AmountRange {
    pub fn new(min: u64, max: u64) -> Self {
        AmountRange { min, max }
    }

    pub fn contains(&self, amount: u64) -> bool {
        (self.min..=self.max).contains(&amount)
    }
}

impl Default for AmountRange {
    fn default() -> Self {
        AmountRange::new(DEFAULT_MIN_AMOUNT, DEFAULT_MAX_AMOUNT)
    }
}
