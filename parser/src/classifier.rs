use tracing::debug;
use crate::model::{Balance, CandidateTransaction};
use crate::tagger::{has_account_ref, is_chq, is_mpesa};

/// Результат проверки одной транзакции
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// меньше двух сумм в строке - транзакция не участвует вообще
    Skipped,
    /// баланс не вырос (или первая транзакция не похожа на поступление)
    Withdrawal { amount: u64, balance: Balance },
    /// поступление
    Deposit { amount: u64, balance: Balance },
}

/// Отслеживает остаток по счёту между транзакциями.
///
/// Поступление или списание определяется только по изменению остатка
/// относительно предыдущей транзакции, поэтому транзакции нужно скармливать строго по порядку.
#[derive(Debug, Default, Clone)]
pub struct BalanceTracker {
    previous: Option<Balance>,
}

impl BalanceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Трекер, у которого уже известен предыдущий остаток
    pub fn starting_at(balance: Balance) -> Self {
        BalanceTracker { previous: Some(balance) }
    }

    /// Последний учтённый остаток
    pub fn previous_balance(&self) -> Option<Balance> {
        self.previous
    }

    /// Классифицирует транзакцию и запоминает её остаток.
    ///
    /// Последняя сумма строки - остаток после операции, предпоследняя - сумма операции.
    /// Остаток обновляется для любой транзакции с двумя суммами, не только для поступлений.
    pub fn observe(&mut self, tx: &CandidateTransaction) -> Classification {
        let [.., amount, balance] = tx.amounts.as_slice() else {
            debug!(line = tx.anchor_index, "skipping transaction with fewer than two amounts");
            return Classification::Skipped;
        };
        let amount = *amount;
        let balance = *balance as Balance;

        let is_deposit = match self.previous.replace(balance) {
            Some(previous) => balance - previous > 0,
            // первая транзакция: сравнивать не с чем, смотрим на описание
            None => looks_like_deposit(&tx.anchor),
        };

        if is_deposit {
            Classification::Deposit { amount, balance }
        } else {
            Classification::Withdrawal { amount, balance }
        }
    }
}

fn looks_like_deposit(text: &str) -> bool {
    is_mpesa(text) || is_chq(text) || (has_account_ref(text) && text.contains("From"))
}
