use std::io::{self, Write};

use crate::accounting::period::Period;
use crate::accounting::transaction::Kind;

use super::commands::{AddEntry, Command, ListKind, ListPeriod, OpenMenu, SearchVendor};

pub struct MenuEntry {
    pub key: &'static str,
    pub label: &'static str,
    pub command: Command,
}

impl MenuEntry {
    pub fn new(key: &'static str, label: &'static str, command: impl Into<Command>) -> MenuEntry {
        MenuEntry {
            key,
            label,
            command: command.into(),
        }
    }
}

pub struct Menu {
    pub title: &'static str,
    pub entries: Vec<MenuEntry>,
    pub exit_key: &'static str,
    pub exit_label: &'static str,
}

impl Menu {
    pub fn find(&self, command: &str) -> Option<&MenuEntry> {
        self.entries.iter().find(|entry| entry.key.eq_ignore_ascii_case(command))
    }

    pub fn render(&self, output: &mut dyn Write) -> io::Result<()> {
        writeln!(output, "\n\t{}:", self.title)?;
        for entry in &self.entries {
            writeln!(output, "\t\t{}) {}", entry.key, entry.label)?;
        }
        writeln!(output, "\t\t{}) {}", self.exit_key, self.exit_label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    Ledger,
    Reports,
}

impl Screen {
    pub fn menu(&self) -> Menu {
        match self {
            Screen::Home => Menu {
                title: "HOME SCREEN",
                entries: vec![
                    MenuEntry::new("D", "Add Deposit", AddEntry { deposit: true }),
                    MenuEntry::new("P", "Make Payment (Debit)", AddEntry { deposit: false }),
                    MenuEntry::new("L", "Ledger", OpenMenu { screen: Screen::Ledger }),
                ],
                exit_key: "X",
                exit_label: "Exit",
            },
            Screen::Ledger => Menu {
                title: "LEDGER SCREEN",
                entries: vec![
                    MenuEntry::new("A", "All", ListKind { kind: Kind::All }),
                    MenuEntry::new("D", "Deposits", ListKind { kind: Kind::Deposits }),
                    MenuEntry::new("P", "Payments", ListKind { kind: Kind::Payments }),
                    MenuEntry::new("R", "Reports", OpenMenu { screen: Screen::Reports }),
                ],
                exit_key: "H",
                exit_label: "Home",
            },
            Screen::Reports => Menu {
                title: "REPORTS SCREEN",
                entries: vec![
                    MenuEntry::new("1", "Month To Date", ListPeriod { period: Period::MonthToDate }),
                    MenuEntry::new("2", "Previous Month", ListPeriod { period: Period::PreviousMonth }),
                    MenuEntry::new("3", "Year To Date", ListPeriod { period: Period::YearToDate }),
                    MenuEntry::new("4", "Previous Year", ListPeriod { period: Period::PreviousYear }),
                    MenuEntry::new("5", "Search by Vendor", SearchVendor),
                ],
                exit_key: "0",
                exit_label: "Back",
            },
        }
    }
}
