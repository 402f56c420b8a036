use std::io;

use anyhow::Result;
use clap::Parser;
use log::error;

use ledgerly::config::Config;
use ledgerly::data::LedgerFile;
use ledgerly::shell::Shell;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = Config::parse();
    let file = LedgerFile::new(config.file);
    let mut ledger = file.load();

    let mut input = io::stdin().lock();
    let mut output = io::stdout();
    if let Err(err) = Shell::new(&mut input, &mut output, &mut ledger).run() {
        error!("shell stopped, err={}", err);
    }

    file.save(&ledger);

    Ok(())
}
