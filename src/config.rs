use std::path::PathBuf;

use clap::Parser;

pub const DEFAULT_FILE: &str = "transactions.csv";

/// Personal finance ledger: record deposits and payments, browse and report on them.
#[derive(Debug, Parser)]
#[command(name = "ledgerly", version, about, long_about = None)]
pub struct Config {
    /// Path to the pipe-delimited ledger file
    #[arg(short, long, env = "LEDGER_FILE", default_value = DEFAULT_FILE)]
    pub file: PathBuf,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_file_flag() {
        let config = Config::parse_from(["ledgerly", "--file", "/tmp/books.csv"]);
        assert_eq!(config.file, PathBuf::from("/tmp/books.csv"));

        let config = Config::parse_from(["ledgerly", "-f", "other.csv"]);
        assert_eq!(config.file, PathBuf::from("other.csv"));
    }

    #[test]
    fn test_command_definition() {
        use clap::CommandFactory;
        Config::command().debug_assert();
    }
}
