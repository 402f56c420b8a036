use std::fmt;
use std::slice::Iter;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::period::{self, Period};
use super::transaction::{round_amount, Kind, Transaction, AMOUNT_PRECISION};

/// In-memory store of every transaction, kept in insertion order.
///
/// Insertion order only matters when the ledger is written back to disk. Every
/// query goes through [`Ledger::all`], which sorts most recent first.
#[derive(Debug, Default)]
pub struct Ledger {
    transactions: Vec<Transaction>,
}

impl Ledger {
    pub fn new() -> Ledger {
        Ledger { transactions: Vec::new() }
    }

    pub fn add(&mut self, transaction: Transaction) {
        self.transactions.push(transaction);
    }

    /// Every transaction, most recent first. Entries on the same day keep
    /// their insertion order.
    pub fn all(&self) -> Vec<&Transaction> {
        let mut list: Vec<&Transaction> = self.transactions.iter().collect();
        list.sort_by(|a, b| b.date().cmp(&a.date()));
        list
    }

    pub fn by_kind(&self, kind: Kind) -> Vec<&Transaction> {
        self.all().into_iter().filter(|t| kind.matches(t)).collect()
    }

    pub fn by_vendor(&self, name: &str) -> Vec<&Transaction> {
        let needle = name.to_lowercase();
        self.all()
            .into_iter()
            .filter(|t| t.vendor().to_lowercase() == needle)
            .collect()
    }

    pub fn by_period(&self, period: Period) -> Vec<&Transaction> {
        self.by_period_on(period, period::today())
    }

    pub fn by_period_on(&self, period: Period, today: NaiveDate) -> Vec<&Transaction> {
        let window = period.window(today);
        self.all()
            .into_iter()
            .filter(|t| window.contains(t.date()))
            .collect()
    }

    /// Insertion order, as persisted.
    pub fn iter(&self) -> Iter<'_, Transaction> {
        self.transactions.iter()
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

impl FromIterator<Transaction> for Ledger {
    fn from_iter<I: IntoIterator<Item = Transaction>>(iter: I) -> Self {
        Ledger {
            transactions: iter.into_iter().collect(),
        }
    }
}

/// Totals over a query result. Credits are the negative amounts (deposits),
/// debits the positive ones (payments).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub count: usize,
    pub credits: Decimal,
    pub debits: Decimal,
}

impl Summary {
    pub fn of(transactions: &[&Transaction]) -> Summary {
        transactions.iter().fold(
            Summary {
                count: 0,
                credits: Decimal::ZERO,
                debits: Decimal::ZERO,
            },
            |mut summary, t| {
                summary.count += 1;
                if t.amount() < dec!(0) {
                    summary.credits += t.amount();
                } else {
                    summary.debits += t.amount();
                }
                summary
            },
        )
    }

    pub fn net(&self) -> Decimal {
        self.credits + self.debits
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prec = AMOUNT_PRECISION as usize;
        write!(
            f,
            "{} transaction(s), credits {:.prec$}, debits {:.prec$}, net {:.prec$}",
            self.count,
            round_amount(self.credits),
            round_amount(self.debits),
            round_amount(self.net()),
        )
    }
}
