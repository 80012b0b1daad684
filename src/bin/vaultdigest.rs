use anyhow::{Context, Result};
use chrono::Local;
use simplelog::{ColorChoice, LevelFilter, TermLogger, TerminalMode};
use std::env;
use std::io::{self, Write};
use vaultdigest::cli::{CliArgs, Command, print_help};
use vaultdigest::config::{Config, OutputFormat};
use vaultdigest::context::StandardContext;
use vaultdigest::digest::{DigestOptions, build_digest, render_digest};
use vaultdigest::render::{MarkdownRenderer, PlainRenderer};
use vaultdigest::vault::FsVault;

fn init_logging(verbosity: u8) -> Result<()> {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    TermLogger::init(
        level,
        simplelog::Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )?;
    Ok(())
}

fn main() -> Result<()> {
    let args = CliArgs::parse(env::args().skip(1))?;
    init_logging(args.verbosity)?;

    let ctx = StandardContext::new(args.root.clone());

    match args.command {
        Command::Help => {
            print_help("vaultdigest");
            Ok(())
        }
        Command::ShowConfigPath => {
            println!("{}", Config::get_path_string(&ctx)?);
            Ok(())
        }
        Command::Init => {
            let mut config = Config::load_or_default(&ctx)?;
            if let Some(vault) = &args.vault {
                config.vault_path = Some(vault.clone());
            }
            config.save(&ctx)?;
            println!("Config written to {}", Config::get_path_string(&ctx)?);
            Ok(())
        }
        Command::Report => report(&args, &ctx),
    }
}

fn report(args: &CliArgs, ctx: &StandardContext) -> Result<()> {
    let config = Config::load_or_default(ctx)?;
    let vault_path = args
        .vault
        .clone()
        .or_else(|| config.vault_path.clone())
        .ok_or_else(|| {
            anyhow::anyhow!("No vault configured. Pass --vault <path> or run 'vaultdigest init --vault <path>'.")
        })?;
    if !vault_path.is_dir() {
        anyhow::bail!("Vault directory does not exist: {}", vault_path.display());
    }

    let today = args.date.unwrap_or_else(|| Local::now().date_naive());
    log::debug!("Building digest for {} from {}", today, vault_path.display());

    let vault = FsVault::new(vault_path);
    let digest = build_digest(&vault, &DigestOptions::from(&config), today);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match args.format.unwrap_or(config.format) {
        OutputFormat::Markdown => render_digest(&digest, &mut MarkdownRenderer::new(&mut out)),
        OutputFormat::Plain => render_digest(&digest, &mut PlainRenderer::new(&mut out)),
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, &digest)?;
            writeln!(out)
        }
    }
    .context("Failed to write digest")?;
    out.flush()?;
    Ok(())
}
