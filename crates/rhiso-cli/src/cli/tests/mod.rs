//! CLI parse and rendering tests.

use super::{Cli, CliCommand};
use clap::Parser;

pub(super) fn parse(args: &[&str]) -> CliCommand {
    let cli = Cli::try_parse_from(args).unwrap();
    cli.command
}

pub(super) fn parse_err(args: &[&str]) -> clap::error::ErrorKind {
    Cli::try_parse_from(args).unwrap_err().kind()
}

#[test]
fn cli_parse_global_flags_after_subcommand() {
    let cli = Cli::try_parse_from([
        "rhiso",
        "list",
        "--json",
        "--token-file",
        "/tmp/token.txt",
        "--config",
        "/tmp/rhiso.toml",
    ])
    .unwrap();
    assert!(cli.json);
    assert_eq!(cli.token_file.unwrap().to_str(), Some("/tmp/token.txt"));
    assert_eq!(cli.config.unwrap().to_str(), Some("/tmp/rhiso.toml"));
}

#[test]
fn cli_parse_defaults() {
    let cli = Cli::try_parse_from(["rhiso", "versions"]).unwrap();
    assert!(!cli.json);
    assert!(cli.token_file.is_none());
    assert!(cli.config.is_none());
    match cli.command {
        CliCommand::Versions { arch } => assert!(arch.is_none()),
        _ => panic!("expected Versions"),
    }
}

#[test]
fn cli_requires_subcommand() {
    assert!(Cli::try_parse_from(["rhiso"]).is_err());
}
