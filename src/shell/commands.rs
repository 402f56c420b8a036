use enum_dispatch::enum_dispatch;
use log::debug;

use crate::accounting::period::Period;
use crate::accounting::transaction::{Kind, Transaction};

use super::menu::Screen;
use super::{print_transactions, Shell, ShellError};

#[enum_dispatch]
pub trait Action {
    fn run(&self, shell: &mut Shell<'_>) -> Result<(), ShellError>;
}

#[enum_dispatch(Action)]
pub enum Command {
    AddEntry,
    ListKind,
    ListPeriod,
    SearchVendor,
    OpenMenu,
}

/// Prompts for new transactions until the user declines to add another.
/// Deposits are stored with their sign flipped.
pub struct AddEntry {
    pub deposit: bool,
}

impl Action for AddEntry {
    fn run(&self, shell: &mut Shell<'_>) -> Result<(), ShellError> {
        loop {
            let date = shell.prompt_date()?;
            let description = shell.prompt_field("Enter Description: ", false)?;
            let vendor = shell.prompt_field("Enter Vendor Name: ", true)?;
            let amount = shell.prompt_amount()?;
            let amount = if self.deposit { -amount } else { amount };

            let transaction = Transaction::new(date, description, vendor, amount);
            debug!("adding transaction, tx={}", transaction);
            writeln!(shell.output, "Added: {}", transaction)?;
            shell.ledger.add(transaction);

            if !shell.confirm("Add another? (y/n) ")? {
                return Ok(());
            }
        }
    }
}

pub struct ListKind {
    pub kind: Kind,
}

impl Action for ListKind {
    fn run(&self, shell: &mut Shell<'_>) -> Result<(), ShellError> {
        let list = shell.ledger.by_kind(self.kind);
        print_transactions(shell.output, self.kind.label(), &list)?;

        Ok(())
    }
}

pub struct ListPeriod {
    pub period: Period,
}

impl Action for ListPeriod {
    fn run(&self, shell: &mut Shell<'_>) -> Result<(), ShellError> {
        let list = shell.ledger.by_period(self.period);
        print_transactions(shell.output, self.period.label(), &list)?;

        Ok(())
    }
}

pub struct SearchVendor;

impl Action for SearchVendor {
    fn run(&self, shell: &mut Shell<'_>) -> Result<(), ShellError> {
        let vendor = shell.prompt_field("\nEnter Vendor: ", true)?;
        let list = shell.ledger.by_vendor(&vendor);
        print_transactions(shell.output, &vendor, &list)?;

        Ok(())
    }
}

pub struct OpenMenu {
    pub screen: Screen,
}

impl Action for OpenMenu {
    fn run(&self, shell: &mut Shell<'_>) -> Result<(), ShellError> {
        shell.run_menu(&self.screen.menu())
    }
}
