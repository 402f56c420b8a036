use std::fmt;

use chrono::{Datelike, Days, Local, NaiveDate};

/// Named report timeframes, all anchored on the current date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    MonthToDate,
    PreviousMonth,
    YearToDate,
    PreviousYear,
    Today,
}

/// Inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub first: NaiveDate,
    pub last: NaiveDate,
}

impl DateWindow {
    pub fn contains(&self, date: NaiveDate) -> bool {
        !(date < self.first || date > self.last)
    }
}

impl Period {
    pub fn label(&self) -> &'static str {
        match self {
            Period::MonthToDate => "Month To Date",
            Period::PreviousMonth => "Previous Month",
            Period::YearToDate => "Year To Date",
            Period::PreviousYear => "Previous Year",
            Period::Today => "Today",
        }
    }

    pub fn window(&self, today: NaiveDate) -> DateWindow {
        let (first, last) = match self {
            Period::MonthToDate => (first_of_month(today), today),
            Period::PreviousMonth => {
                let last = first_of_month(today) - Days::new(1);
                (first_of_month(last), last)
            },
            Period::YearToDate => (first_of_year(today), today),
            Period::PreviousYear => {
                let last = first_of_year(today) - Days::new(1);
                (first_of_year(last), last)
            },
            Period::Today => (today, today),
        };

        DateWindow { first, last }
    }
}

/// Unrecognized labels fall back to `Today`.
impl From<&str> for Period {
    fn from(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "month to date" => Period::MonthToDate,
            "previous month" => Period::PreviousMonth,
            "year to date" => Period::YearToDate,
            "previous year" => Period::PreviousYear,
            _ => Period::Today,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.day0()))
}

fn first_of_year(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.ordinal0()))
}
