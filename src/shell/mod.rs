//! Interactive menus on top of a [`Ledger`].
//!
//! The shell only gathers input and prints results, every query goes straight
//! to the ledger. Menus are tables of [`MenuEntry`] values mapping a command
//! key to a [`Command`].

use std::io::{self, BufRead, Write};

use log::debug;
use thiserror::Error;

use crate::accounting::ledger::{Ledger, Summary};
use crate::accounting::transaction::Transaction;

pub mod commands;
pub mod menu;
mod prompt;

pub use commands::{Action, Command};
pub use menu::{Menu, MenuEntry, Screen};

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("input closed")]
    InputClosed,
    #[error("{0}")]
    Io(#[from] io::Error),
}

pub struct Shell<'a> {
    input: &'a mut dyn BufRead,
    output: &'a mut dyn Write,
    ledger: &'a mut Ledger,
}

impl<'a> Shell<'a> {
    pub fn new(input: &'a mut dyn BufRead, output: &'a mut dyn Write, ledger: &'a mut Ledger) -> Shell<'a> {
        Shell { input, output, ledger }
    }

    /// Runs the home menu until the user exits. Running out of input counts
    /// as exiting.
    pub fn run(&mut self) -> Result<(), ShellError> {
        match self.run_menu(&Screen::Home.menu()) {
            Err(ShellError::InputClosed) => {
                debug!("input closed, leaving the shell");
                Ok(())
            },
            other => other,
        }
    }

    pub fn run_menu(&mut self, menu: &Menu) -> Result<(), ShellError> {
        loop {
            menu.render(self.output)?;
            self.output.flush()?;

            let command = self.read_line()?.trim().to_uppercase();
            if command.eq_ignore_ascii_case(menu.exit_key) {
                return Ok(());
            }

            match menu.find(&command) {
                Some(entry) => entry.command.run(self)?,
                None => writeln!(self.output, "\nNo such command: \"{}\".", command)?,
            }
        }
    }
}

fn print_transactions(output: &mut dyn Write, title: &str, list: &[&Transaction]) -> io::Result<()> {
    writeln!(output, "{}:", title)?;
    for tx in list {
        writeln!(output, "{}", tx)?;
    }
    writeln!(output, "{}", Summary::of(list))
}
