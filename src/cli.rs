// File: ./src/cli.rs
//! Command-line parsing and help text shared by the binary.
use crate::config::OutputFormat;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Command {
    #[default]
    Report,
    Init,
    ShowConfigPath,
    Help,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliArgs {
    pub command: Command,
    pub root: Option<PathBuf>,
    pub vault: Option<PathBuf>,
    pub date: Option<NaiveDate>,
    pub format: Option<OutputFormat>,
    /// 0 = warnings only, 1 = info, 2+ = debug.
    pub verbosity: u8,
}

/// `-v`, `-vv`, `-vvv`, ...
fn is_verbosity_flag(arg: &str) -> bool {
    arg.strip_prefix('-')
        .is_some_and(|vs| !vs.is_empty() && vs.bytes().all(|b| b == b'v'))
}

impl CliArgs {
    /// Parses arguments, excluding the binary name.
    pub fn parse<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out = CliArgs::default();
        let mut iter = args.into_iter().map(Into::into);

        while let Some(arg) = iter.next() {
            let mut value_for = |flag: &str| {
                iter.next()
                    .ok_or_else(|| anyhow::anyhow!("Missing value for {}", flag))
            };
            match arg.as_str() {
                "-h" | "--help" | "help" => out.command = Command::Help,
                "init" => out.command = Command::Init,
                "config" => out.command = Command::ShowConfigPath,
                "report" => out.command = Command::Report,
                "-r" | "--root" => out.root = Some(PathBuf::from(value_for(&arg)?)),
                "--vault" => out.vault = Some(PathBuf::from(value_for(&arg)?)),
                "--date" => {
                    let raw = value_for(&arg)?;
                    let date = NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
                        .with_context(|| format!("Invalid --date '{}', expected YYYY-MM-DD", raw))?;
                    out.date = Some(date);
                }
                "-f" | "--format" => out.format = Some(value_for(&arg)?.parse()?),
                flag if is_verbosity_flag(flag) => {
                    let count = u8::try_from(flag.len() - 1).unwrap_or(u8::MAX);
                    out.verbosity = out.verbosity.saturating_add(count);
                }
                other => anyhow::bail!("Unknown argument '{}'. See --help.", other),
            }
        }
        Ok(out)
    }
}

pub fn print_help(binary_name: &str) {
    println!(
        "Vaultdigest v{} - Daily task digest for a Markdown note vault",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("USAGE:");
    println!("    {} [OPTIONS]              Print today's digest", binary_name);
    println!("    {} init [--root <path>]   Write a default config file", binary_name);
    println!("    {} config                 Print the config file path", binary_name);
    println!("    {} --help", binary_name);
    println!();
    println!("OPTIONS:");
    println!("    -r, --root <path>     Use a different directory for the config.");
    println!("    --vault <path>        Vault root (overrides 'vault_path' in the config).");
    println!("    --date <YYYY-MM-DD>   Build the digest as if today were this date.");
    println!(
        "    -f, --format <fmt>    Output format: {} (default: markdown).",
        OutputFormat::choices()
    );
    println!("    -v, -vv, ...          Log progress to stderr (info, debug).");
    println!("    -h, --help            Show this help message.");
    println!();
    println!("TASK SYNTAX:");
    println!("    - [ ] text            Open task (- [x] done, - [-] will not do)");
    println!("    #work / #personal     Counted in the daily note's time totals");
    println!("    #waiting              Listed under 'Waiting On' from the backlog");
    println!("    ⏲ 30m, ⏲ 2h           Time estimate (a bare 45m also counts)");
    println!("    📅 2024-06-01          Due date");
    println!();
    println!("EXAMPLE:");
    println!("    - [ ] Fix bug #work ⏲ 2h 📅 2024-06-01");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_report_args() {
        let args = CliArgs::parse([
            "--vault", "/v", "--date", "2024-01-17", "-f", "json", "-vv",
        ])
        .unwrap();
        assert_eq!(args.command, Command::Report);
        assert_eq!(args.vault, Some(PathBuf::from("/v")));
        assert_eq!(args.date, NaiveDate::from_ymd_opt(2024, 1, 17));
        assert_eq!(args.format, Some(OutputFormat::Json));
        assert_eq!(args.verbosity, 2);
    }

    #[test]
    fn test_verbosity_flags_stack() {
        assert_eq!(CliArgs::parse(["-vvv"]).unwrap().verbosity, 3);
        assert_eq!(CliArgs::parse(["-v", "-vv"]).unwrap().verbosity, 3);
        assert_eq!(CliArgs::parse(["-v"]).unwrap().verbosity, 1);
        assert!(CliArgs::parse(["-vx"]).is_err());
        assert!(CliArgs::parse(["-"]).is_err());
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(CliArgs::parse(["--date", "17/01/2024"]).is_err());
        assert!(CliArgs::parse(["--vault"]).is_err());
        assert!(CliArgs::parse(["--format", "html"]).is_err());
        assert!(CliArgs::parse(["--bogus"]).is_err());
    }

    #[test]
    fn test_parse_subcommands() {
        let args = CliArgs::parse(["init", "--root", "/tmp/x"]).unwrap();
        assert_eq!(args.command, Command::Init);
        assert_eq!(args.root, Some(PathBuf::from("/tmp/x")));
        assert_eq!(CliArgs::parse(["config"]).unwrap().command, Command::ShowConfigPath);
    }
}
