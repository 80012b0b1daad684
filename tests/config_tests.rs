use std::fs;
use std::path::PathBuf;
use vaultdigest::config::{Config, OutputFormat};
use vaultdigest::context::{AppContext, TestContext};
use vaultdigest::digest::DigestOptions;

#[test]
fn test_defaults() {
    let c = Config::default();
    assert_eq!(c.vault_path, None);
    assert_eq!(c.daily_folder, "discord");
    assert_eq!(c.backlog_path, "discord/BACKLOG.md");
    assert_eq!(c.work_tag, "#work");
    assert_eq!(c.personal_tag, "#personal");
    assert_eq!(c.waiting_tag, "#waiting");
    assert_eq!(c.due_soon_days, 7);
    assert_eq!(c.format, OutputFormat::Markdown);
}

#[test]
fn test_partial_file_uses_serde_defaults() {
    let ctx = TestContext::new();
    let path = ctx.get_config_file_path().unwrap();
    fs::write(
        &path,
        "vault_path = \"/notes\"\ndue_soon_days = 3\nformat = \"plain\"\n",
    )
    .unwrap();

    let c = Config::load(&ctx).unwrap();
    assert_eq!(c.vault_path, Some(PathBuf::from("/notes")));
    assert_eq!(c.due_soon_days, 3);
    assert_eq!(c.format, OutputFormat::Plain);
    assert_eq!(c.work_tag, "#work");

    let opts = DigestOptions::from(&c);
    assert_eq!(opts.due_soon_days, 3);
    assert_eq!(opts.backlog_path, "discord/BACKLOG.md");
}

#[test]
fn test_missing_file_is_detected_and_defaults_apply() {
    let ctx = TestContext::new();
    let err = Config::load(&ctx).unwrap_err();
    assert!(Config::is_missing_config_error(&err));
    assert_eq!(Config::load_or_default(&ctx).unwrap(), Config::default());
}

#[test]
fn test_malformed_file_is_an_error() {
    let ctx = TestContext::new();
    fs::write(ctx.get_config_file_path().unwrap(), "due_soon_days = \"seven\"\n").unwrap();
    let err = Config::load_or_default(&ctx).unwrap_err();
    assert!(!Config::is_missing_config_error(&err));
    assert!(err.to_string().contains("Failed to parse config file"));
}

#[test]
fn test_save_then_load() {
    let ctx = TestContext::new();
    let config = Config {
        vault_path: Some(PathBuf::from("/home/me/vault")),
        daily_folder: "journal".to_string(),
        format: OutputFormat::Json,
        ..Config::default()
    };
    config.save(&ctx).unwrap();
    assert_eq!(Config::load(&ctx).unwrap(), config);
}

#[test]
fn test_output_format_names() {
    assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
    assert_eq!(OutputFormat::choices(), "markdown|plain|json");
    assert!("html".parse::<OutputFormat>().is_err());
}
