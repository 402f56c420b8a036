use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use getset::{CopyGetters, Getters};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use super::LedgerError;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// Only the calendar date is retained, so every entry is written at midnight.
pub const MIDNIGHT: &str = "00:00:00";

/// Amounts are always written with this many fractional digits.
pub const AMOUNT_PRECISION: u32 = 2;

/// One ledger entry.
///
/// Amounts follow the ledger's sign convention: deposits are stored negative
/// and payments positive. Keep it that way, existing files depend on it.
#[derive(Debug, Clone, PartialEq, Getters, CopyGetters)]
pub struct Transaction {
    #[getset(get_copy = "pub")]
    date: NaiveDate,
    #[getset(get = "pub")]
    description: String,
    #[getset(get = "pub")]
    vendor: String,
    #[getset(get_copy = "pub")]
    amount: Decimal,
}

impl Transaction {
    pub fn new(date: NaiveDate, description: impl Into<String>, vendor: impl Into<String>, amount: Decimal) -> Transaction {
        Transaction {
            date,
            description: description.into(),
            vendor: vendor.into(),
            amount,
        }
    }

    /// The amount as written to the ledger file, rounded half away from zero.
    pub fn rounded_amount(&self) -> Decimal {
        round_amount(self.amount)
    }
}

pub fn round_amount(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(AMOUNT_PRECISION, RoundingStrategy::MidpointAwayFromZero)
}

/// Canonical single line form, `YYYY-MM-DD|HH:MM:SS|description|vendor|amount`.
impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}|{}|{}|{}|{:.prec$}",
            self.date.format(DATE_FORMAT),
            MIDNIGHT,
            self.description,
            self.vendor,
            self.rounded_amount(),
            prec = AMOUNT_PRECISION as usize
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    All,
    Deposits,
    Payments,
}

impl Kind {
    /// `Deposits` keeps strictly positive amounts and `Payments` strictly
    /// negative ones, so zero amounts only ever show up under `All`.
    pub fn matches(&self, transaction: &Transaction) -> bool {
        match self {
            Kind::All => true,
            Kind::Deposits => transaction.amount() > dec!(0),
            Kind::Payments => transaction.amount() < dec!(0),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Kind::All => "ALL",
            Kind::Deposits => "DEPOSITS",
            Kind::Payments => "PAYMENTS",
        }
    }
}

impl FromStr for Kind {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "ALL" => Ok(Kind::All),
            "DEPOSITS" => Ok(Kind::Deposits),
            "PAYMENTS" => Ok(Kind::Payments),
            _ => Err(LedgerError::UnknownKind(s.to_string())),
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
