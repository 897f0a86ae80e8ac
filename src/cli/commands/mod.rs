//! CLI subcommands and the field arguments they share

pub mod config;
pub mod profile;
pub mod project;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;

use crate::api::ApiClient;
use crate::cli::output::print_error;
use crate::config::Config;
use crate::form::preview::load_file;
use crate::form::{FieldValue, FormRecord};

/// Field values given on the command line
#[derive(Args, Debug, Clone, Default)]
pub struct FieldArgs {
    /// Set a text field (repeatable), e.g. --set title=Portfolio
    #[arg(long, value_name = "FIELD=VALUE")]
    pub set: Vec<String>,

    /// Attach a file to a file field (repeatable), e.g. --file projectBanner=banner.png
    #[arg(long, value_name = "FIELD=PATH")]
    pub file: Vec<String>,
}

/// Split `field=value` at the first `=`
fn parse_assignment(arg: &str) -> Result<(&str, &str)> {
    match arg.split_once('=') {
        Some((field, value)) if !field.is_empty() => Ok((field, value)),
        _ => bail!("Expected FIELD=VALUE, got '{}'", arg),
    }
}

impl FieldArgs {
    /// Write the given values into the record, reading any files.
    pub async fn apply(&self, record: &mut FormRecord) -> Result<()> {
        for arg in &self.set {
            let (field, value) = parse_assignment(arg)?;
            record.set_text(field, value)?;
        }

        for arg in &self.file {
            let (field, path) = parse_assignment(arg)?;
            let loaded = load_file(PathBuf::from(path))
                .await
                .with_context(|| format!("Failed to read file: {}", path))?;
            tracing::debug!("Attached {} ({} bytes) to {}", path, loaded.handle.len(), field);
            record.set(field, FieldValue::File(loaded.handle))?;
        }

        Ok(())
    }
}

/// Build an API client from the saved configuration
fn client() -> Result<ApiClient> {
    let config = Config::load()?;
    Ok(ApiClient::new(&config.api)?)
}

/// Fail with every field message if the record does not validate
fn ensure_valid(record: &FormRecord) -> Result<()> {
    let errors = record.validate();
    if errors.is_empty() {
        return Ok(());
    }
    for error in &errors {
        print_error(&format!("{}: {}", error.field, error.message));
    }
    bail!("{} field(s) failed validation", errors.len())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::form::{ADD_PROJECT, UPDATE_PROFILE};

    #[test]
    fn test_parse_assignment() {
        assert_eq!(parse_assignment("title=A=B").unwrap(), ("title", "A=B"));
        assert_eq!(parse_assignment("title=").unwrap(), ("title", ""));
        assert!(parse_assignment("title").is_err());
        assert!(parse_assignment("=x").is_err());
    }

    #[tokio::test]
    async fn test_apply_sets_text_and_files() {
        let mut banner = tempfile::Builder::new().suffix(".jpg").tempfile().unwrap();
        banner.write_all(b"jpeg").unwrap();

        let args = FieldArgs {
            set: vec!["title=CLI project".into(), "deployed=No".into()],
            file: vec![format!("projectBanner={}", banner.path().display())],
        };
        let mut record = FormRecord::new(&ADD_PROJECT);
        args.apply(&mut record).await.unwrap();

        assert_eq!(record.text("title"), Some("CLI project"));
        assert_eq!(record.text("deployed"), Some("No"));
        let file = record.get("projectBanner").and_then(FieldValue::as_file).unwrap();
        assert_eq!(file.mime, "image/jpeg");
    }

    #[tokio::test]
    async fn test_apply_rejects_unknown_field() {
        let args = FieldArgs {
            set: vec!["nickname=Ada".into()],
            ..Default::default()
        };
        let mut record = FormRecord::new(&UPDATE_PROFILE);
        assert!(args.apply(&mut record).await.is_err());
    }

    #[tokio::test]
    async fn test_apply_rejects_text_for_file_field() {
        let args = FieldArgs {
            set: vec!["avatar=me.png".into()],
            ..Default::default()
        };
        let mut record = FormRecord::new(&UPDATE_PROFILE);
        assert!(args.apply(&mut record).await.is_err());
    }

    #[test]
    fn test_ensure_valid() {
        let mut record = FormRecord::new(&UPDATE_PROFILE);
        assert!(ensure_valid(&record).is_err());
        record.set_text("fullName", "Ada").unwrap();
        record.set_text("email", "ada@example.com").unwrap();
        record.set_text("phone", "123").unwrap();
        assert!(ensure_valid(&record).is_ok());
    }
}
