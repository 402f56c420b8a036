use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use log::{debug, info, warn};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::accounting::ledger::Ledger;
use crate::accounting::period;
use crate::accounting::transaction::{round_amount, Transaction, AMOUNT_PRECISION, DATE_FORMAT, MIDNIGHT, TIME_FORMAT};

pub const DELIMITER: u8 = b'|';
pub const HEADER: [&str; 5] = ["date", "time", "description", "vendor", "amount"];

#[derive(Debug, Error)]
pub enum DataError {
    #[error("{0}")]
    Csv(#[from] csv::Error),
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

/// One line of the ledger file, fields in file order.
#[derive(Debug, Deserialize, Serialize)]
pub struct TransactionRecord {
    pub date: String,
    pub time: String,
    pub description: String,
    pub vendor: String,
    pub amount: String,
}

impl From<&Transaction> for TransactionRecord {
    fn from(tx: &Transaction) -> Self {
        TransactionRecord {
            date: tx.date().format(DATE_FORMAT).to_string(),
            time: MIDNIGHT.to_string(),
            description: tx.description().clone(),
            vendor: tx.vendor().clone(),
            amount: format!("{:.prec$}", tx.rounded_amount(), prec = AMOUNT_PRECISION as usize),
        }
    }
}

/// The date of a stored line, or where it could not be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedDate {
    Parsed(NaiveDate),
    Recovered { line: usize },
}

impl ParsedDate {
    pub fn parse(date: &str, time: &str, line: usize) -> ParsedDate {
        let stamp = format!("{} {}", date, time);
        match NaiveDateTime::parse_from_str(&stamp, &format!("{} {}", DATE_FORMAT, TIME_FORMAT)) {
            Ok(parsed) => ParsedDate::Parsed(parsed.date()),
            Err(_) => ParsedDate::Recovered { line },
        }
    }

    pub fn or(self, fallback: NaiveDate) -> NaiveDate {
        match self {
            ParsedDate::Parsed(date) => date,
            ParsedDate::Recovered { .. } => fallback,
        }
    }
}

/// Something that went wrong with a single line. `line` is the data record
/// number counted from 1: the header and blank lines are not counted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadIssue {
    /// The line was kept but dated with the load date instead.
    DateRecovered { line: usize, value: String },
    /// The line was dropped.
    Skipped { line: usize, reason: String },
}

impl LoadIssue {
    pub fn line(&self) -> usize {
        match self {
            LoadIssue::DateRecovered { line, .. } | LoadIssue::Skipped { line, .. } => *line,
        }
    }
}

#[derive(Debug, Default)]
pub struct Loaded {
    pub transactions: Vec<Transaction>,
    pub issues: Vec<LoadIssue>,
}

pub fn read_transactions<R: Read>(reader: R, today: NaiveDate) -> Result<Loaded, DataError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(true)
        .flexible(true)
        .quoting(false)
        .from_reader(reader);

    let mut loaded = Loaded::default();

    for (index, record) in csv_reader.records().enumerate() {
        let fallback_line = index + 1;
        let record = match record {
            Ok(record) => record,
            Err(err) if err.is_io_error() => return Err(err.into()),
            Err(err) => {
                let line = err.position().map_or(fallback_line, data_line);
                loaded.issues.push(LoadIssue::Skipped {
                    line,
                    reason: err.to_string(),
                });
                continue;
            },
        };
        let line = record.position().map_or(fallback_line, data_line);

        if record.len() != HEADER.len() {
            loaded.issues.push(LoadIssue::Skipped {
                line,
                reason: format!("expected {} fields, found {}", HEADER.len(), record.len()),
            });
            continue;
        }

        let tx = match record.deserialize::<TransactionRecord>(None) {
            Ok(tx) => tx,
            Err(err) => {
                loaded.issues.push(LoadIssue::Skipped {
                    line,
                    reason: err.to_string(),
                });
                continue;
            },
        };

        // Rounded here so the loaded value is exactly what a save writes back.
        let amount = match Decimal::from_str(&tx.amount) {
            Ok(amount) => round_amount(amount),
            Err(err) => {
                loaded.issues.push(LoadIssue::Skipped {
                    line,
                    reason: format!("invalid amount {:?}: {}", tx.amount, err),
                });
                continue;
            },
        };

        let date = ParsedDate::parse(&tx.date, &tx.time, line);
        if let ParsedDate::Recovered { line } = date {
            loaded.issues.push(LoadIssue::DateRecovered {
                line,
                value: format!("{} {}", tx.date, tx.time),
            });
        }

        loaded
            .transactions
            .push(Transaction::new(date.or(today), tx.description, tx.vendor, amount));
    }

    Ok(loaded)
}

pub fn write_transactions<'a, W, I>(writer: W, transactions: I) -> Result<(), DataError>
where
    W: Write,
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(false)
        .quote_style(csv::QuoteStyle::Never)
        .from_writer(writer);

    csv_writer.write_record(HEADER)?;
    for tx in transactions {
        let record: TransactionRecord = tx.into();
        csv_writer.serialize(record)?;
    }

    csv_writer.flush()?;

    Ok(())
}

// csv counts the header as line 1 and does not count blank lines.
fn data_line(position: &csv::Position) -> usize {
    position.line().saturating_sub(1) as usize
}

/// The ledger's backing file.
#[derive(Debug, Clone)]
pub struct LedgerFile {
    path: PathBuf,
}

impl LedgerFile {
    pub fn new(path: impl Into<PathBuf>) -> LedgerFile {
        LedgerFile { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Best effort: a missing or unreadable file gives an empty ledger.
    pub fn load(&self) -> Ledger {
        self.load_on(period::today())
    }

    pub fn load_on(&self, today: NaiveDate) -> Ledger {
        match self.try_load(today) {
            Ok(loaded) => {
                for issue in &loaded.issues {
                    match issue {
                        LoadIssue::DateRecovered { line, value } => {
                            warn!("failed to parse date in record {}, using {} instead, value={:?}", line, today, value)
                        },
                        LoadIssue::Skipped { line, reason } => warn!("skipped record {}, err={}", line, reason),
                    }
                }
                info!("loaded {} transaction(s) from {}", loaded.transactions.len(), self.path.display());
                loaded.transactions.into_iter().collect()
            },
            Err(err) => {
                warn!("failed to read {}, starting empty, err={}", self.path.display(), err);
                Ledger::new()
            },
        }
    }

    pub fn try_load(&self, today: NaiveDate) -> Result<Loaded, DataError> {
        let file = File::open(&self.path)?;
        read_transactions(file, today)
    }

    /// Rewrites the whole file. Failures are logged, and a partially written
    /// file is left as is.
    pub fn save(&self, ledger: &Ledger) {
        match self.try_save(ledger) {
            Ok(()) => debug!("saved {} transaction(s) to {}", ledger.len(), self.path.display()),
            Err(err) => warn!("failed to write {}, err={}", self.path.display(), err),
        }
    }

    pub fn try_save(&self, ledger: &Ledger) -> Result<(), DataError> {
        let file = File::create(&self.path)?;
        write_transactions(BufWriter::new(file), ledger.iter())
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn write_to_string(transactions: &[Transaction]) -> Result<String> {
        let mut out = Vec::new();
        write_transactions(&mut out, transactions)?;
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn test_write_empty_is_header_only() -> Result<()> {
        assert_eq!(write_to_string(&[])?, "date|time|description|vendor|amount\n");

        Ok(())
    }

    #[test]
    fn test_write_keeps_insertion_order() -> Result<()> {
        let transactions = vec![
            Transaction::new(date(2024, 1, 15), "Paycheck", "Employer Inc", dec!(-1500)),
            Transaction::new(date(2023, 6, 1), "Say \"hi\"", "O'Brien", dec!(9.9)),
            Transaction::new(date(2024, 3, 1), "Rent", "Landlord", dec!(900.00)),
        ];

        assert_eq!(
            write_to_string(&transactions)?,
            "date|time|description|vendor|amount\n\
             2024-01-15|00:00:00|Paycheck|Employer Inc|-1500.00\n\
             2023-06-01|00:00:00|Say \"hi\"|O'Brien|9.90\n\
             2024-03-01|00:00:00|Rent|Landlord|900.00\n"
        );

        Ok(())
    }

    #[test]
    fn test_written_lines_match_display() -> Result<()> {
        let tx = Transaction::new(date(2024, 1, 15), "Lunch", "Deli", dec!(12.3));
        let written = write_to_string(std::slice::from_ref(&tx))?;

        assert_eq!(written.lines().nth(1), Some(tx.to_string().as_str()));

        Ok(())
    }

    #[test]
    fn test_round_trip() -> Result<()> {
        let transactions = vec![
            Transaction::new(date(2024, 2, 29), "Leap day", "Acme", dec!(-20.05)),
            Transaction::new(date(1999, 12, 31), "  padded  ", "Y2K Supply", dec!(0.00)),
            Transaction::new(date(2024, 1, 1), "", "Blank", dec!(123456.78)),
        ];
        let written = write_to_string(&transactions)?;
        let loaded = read_transactions(written.as_bytes(), date(2030, 1, 1))?;

        assert!(loaded.issues.is_empty());
        assert_eq!(loaded.transactions, transactions);

        Ok(())
    }

    #[test]
    fn test_read_drops_time_of_day() -> Result<()> {
        let content = "date|time|description|vendor|amount\n2024-01-15|23:59:59|Late|Shop|5.00\n";
        let loaded = read_transactions(content.as_bytes(), date(2030, 1, 1))?;

        assert_eq!(loaded.transactions[0].date(), date(2024, 1, 15));

        Ok(())
    }

    #[test]
    fn test_read_recovers_bad_date() -> Result<()> {
        let today = date(2024, 3, 15);
        let content = "date|time|description|vendor|amount\nnotadate|00:00:00|X|Y|10.00\n";
        let loaded = read_transactions(content.as_bytes(), today)?;

        assert_eq!(loaded.transactions, vec![Transaction::new(today, "X", "Y", dec!(10.00))]);
        assert_eq!(
            loaded.issues,
            vec![LoadIssue::DateRecovered {
                line: 1,
                value: "notadate 00:00:00".to_string()
            }]
        );

        Ok(())
    }

    #[test]
    fn test_read_skips_bad_amount_and_short_lines() -> Result<()> {
        let content = "date|time|description|vendor|amount\n\
                       2024-01-01|00:00:00|ok|V|1.00\n\
                       2024-01-02|00:00:00|bad|V|lots\n\
                       2024-01-03|00:00:00|short\n\
                       2024-01-04|00:00:00|ok too|V|-2.00\n";
        let loaded = read_transactions(content.as_bytes(), date(2030, 1, 1))?;

        let kept: Vec<&str> = loaded.transactions.iter().map(|t| t.description().as_str()).collect();
        assert_eq!(kept, vec!["ok", "ok too"]);
        let lines: Vec<usize> = loaded.issues.iter().map(LoadIssue::line).collect();
        assert_eq!(lines, vec![2, 3]);

        Ok(())
    }

    #[test]
    fn test_read_skips_blank_lines_and_header_only() -> Result<()> {
        let loaded = read_transactions("date|time|description|vendor|amount\n".as_bytes(), date(2030, 1, 1))?;
        assert!(loaded.transactions.is_empty());

        let content = "date|time|description|vendor|amount\n\n2024-01-01|00:00:00|a|b|1.00\n\n";
        let loaded = read_transactions(content.as_bytes(), date(2030, 1, 1))?;
        assert_eq!(loaded.transactions.len(), 1);
        assert!(loaded.issues.is_empty());

        Ok(())
    }

    #[test]
    fn test_read_ignores_header_names() -> Result<()> {
        let content = "whatever\n2024-01-01|00:00:00|a|b|1.00\n";
        let loaded = read_transactions(content.as_bytes(), date(2030, 1, 1))?;

        assert_eq!(loaded.transactions.len(), 1);

        Ok(())
    }

    #[test]
    fn test_read_rounds_amounts_to_written_precision() -> Result<()> {
        let content = "date|time|description|vendor|amount\n\
                       2024-01-01|00:00:00|a|b|10.005\n\
                       2024-01-02|00:00:00|c|d|-2.999\n";
        let loaded = read_transactions(content.as_bytes(), date(2030, 1, 1))?;

        let amounts: Vec<Decimal> = loaded.transactions.iter().map(Transaction::amount).collect();
        assert_eq!(amounts, vec![dec!(10.01), dec!(-3.00)]);
        assert_eq!(
            write_to_string(&loaded.transactions)?,
            "date|time|description|vendor|amount\n\
             2024-01-01|00:00:00|a|b|10.01\n\
             2024-01-02|00:00:00|c|d|-3.00\n"
        );

        Ok(())
    }

    #[test]
    fn test_write_rounds_unrounded_amounts() -> Result<()> {
        let transactions = vec![Transaction::new(date(2024, 1, 1), "a", "b", dec!(-2.999))];

        assert_eq!(
            write_to_string(&transactions)?,
            "date|time|description|vendor|amount\n2024-01-01|00:00:00|a|b|-3.00\n"
        );

        Ok(())
    }

    #[test]
    fn test_issue_numbers_count_records_not_blank_lines() -> Result<()> {
        let content = "date|time|description|vendor|amount\n\n\nnotadate|00:00:00|X|Y|10.00\n";
        let loaded = read_transactions(content.as_bytes(), date(2024, 3, 15))?;

        assert_eq!(loaded.transactions.len(), 1);
        assert_eq!(loaded.issues.iter().map(LoadIssue::line).collect::<Vec<_>>(), vec![1]);

        Ok(())
    }

    #[test]
    fn test_parsed_date() {
        assert_eq!(ParsedDate::parse("2024-02-29", "12:00:00", 4), ParsedDate::Parsed(date(2024, 2, 29)));
        assert_eq!(ParsedDate::parse("2023-02-29", "12:00:00", 4), ParsedDate::Recovered { line: 4 });
        assert_eq!(ParsedDate::parse("2024-01-01", "25:00:00", 7), ParsedDate::Recovered { line: 7 });
        assert_eq!(ParsedDate::Recovered { line: 1 }.or(date(2024, 3, 15)), date(2024, 3, 15));
    }
}
