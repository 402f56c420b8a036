use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use crate::accounting::transaction::round_amount;
use crate::data::DELIMITER;

use super::{Shell, ShellError};

pub const ENTRY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const YES: [&str; 4] = ["true", "yes", "t", "y"];

impl Shell<'_> {
    /// One line of input without its line ending.
    pub(super) fn read_line(&mut self) -> Result<String, ShellError> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(ShellError::InputClosed);
        }

        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    pub(super) fn prompt(&mut self, label: &str) -> Result<String, ShellError> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        Ok(self.read_line()?.trim().to_string())
    }

    /// Asks until the answer parses as `yyyy-MM-dd HH:mm:ss`. Only the date is kept.
    pub(super) fn prompt_date(&mut self) -> Result<NaiveDate, ShellError> {
        loop {
            let value = self.prompt("\nEnter Date and Time (yyyy-MM-dd HH:mm:ss): ")?;
            match NaiveDateTime::parse_from_str(&value, ENTRY_FORMAT) {
                Ok(stamp) => return Ok(stamp.date()),
                Err(err) => writeln!(self.output, "Invalid date and time \"{}\": {}", value, err)?,
            }
        }
    }

    /// The delimiter would corrupt the ledger file, so it is refused here.
    pub(super) fn prompt_field(&mut self, label: &str, required: bool) -> Result<String, ShellError> {
        loop {
            let value = self.prompt(label)?;
            if value.contains(char::from(DELIMITER)) {
                writeln!(self.output, "\"{}\" is not allowed.", char::from(DELIMITER))?;
            } else if required && value.is_empty() {
                writeln!(self.output, "A value is required.")?;
            } else {
                return Ok(value);
            }
        }
    }

    pub(super) fn prompt_amount(&mut self) -> Result<Decimal, ShellError> {
        loop {
            let value = self.prompt("\nEnter Amount (0.00): ")?;
            match Decimal::from_str(&value) {
                Ok(amount) => return Ok(round_amount(amount)),
                Err(err) => writeln!(self.output, "Invalid amount \"{}\": {}", value, err)?,
            }
        }
    }

    pub(super) fn confirm(&mut self, label: &str) -> Result<bool, ShellError> {
        let answer = self.prompt(label)?.to_lowercase();

        Ok(YES.contains(&answer.as_str()))
    }
}
