//! Profile commands

use anyhow::Result;
use clap::Subcommand;

use crate::api::{EditableEntity, PortfolioApi, User};
use crate::cli::commands::{client, ensure_valid, FieldArgs};
use crate::cli::output::{print_formatted, print_submit_result, OutputFormat};
use crate::form::{FormRecord, Payload, UPDATE_PROFILE};

#[derive(Subcommand, Debug)]
pub enum ProfileCommands {
    /// Show the current profile
    Show,

    /// Update the profile; fields not given keep their stored values
    Update {
        #[command(flatten)]
        fields: FieldArgs,
    },
}

pub async fn run(command: ProfileCommands, format: OutputFormat, quiet: bool) -> Result<()> {
    let api = client()?;
    match command {
        ProfileCommands::Show => show(&api, format).await,
        ProfileCommands::Update { fields } => update(&api, &fields, format, quiet).await,
    }
}

fn describe(user: &User) -> String {
    let mut lines: Vec<String> = user
        .field_map()
        .into_iter()
        .map(|(name, value)| format!("{:<14} {}", name, value))
        .collect();
    for (field, url) in user.asset_urls() {
        lines.push(format!("{:<14} {}", field, url));
    }
    lines.join("\n")
}

async fn show(api: &dyn PortfolioApi, format: OutputFormat) -> Result<()> {
    let user = api.get_user().await?;
    print_formatted(&user, format, describe);
    Ok(())
}

async fn update(
    api: &dyn PortfolioApi,
    fields: &FieldArgs,
    format: OutputFormat,
    quiet: bool,
) -> Result<()> {
    let current = api.get_user().await?;
    let mut record = FormRecord::new(&UPDATE_PROFILE);
    record.seed(&current.field_map());
    fields.apply(&mut record).await?;
    ensure_valid(&record)?;

    let message = api.update_profile(Payload::from_record(&record)).await?;
    print_submit_result(None, &message, format, quiet);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::{ApiCall, RecordingApi};

    fn ada() -> User {
        User {
            full_name: Some("Ada Lovelace".into()),
            email: Some("ada@example.com".into()),
            phone: Some("555".into()),
            github_url: Some("https://github.com/ada".into()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_update_keeps_unspecified_fields() {
        let api = RecordingApi::default();
        *api.user.lock().unwrap() = Ok(ada());
        let fields = FieldArgs {
            set: vec!["phone=777".into()],
            ..Default::default()
        };

        update(&api, &fields, OutputFormat::Text, true).await.unwrap();

        let payload = api
            .calls()
            .into_iter()
            .find_map(|c| match c {
                ApiCall::UpdateProfile(p) => Some(p),
                _ => None,
            })
            .unwrap();
        assert_eq!(payload.text("phone"), Some("777"));
        assert_eq!(payload.text("fullName"), Some("Ada Lovelace"));
        assert_eq!(payload.text("githubURL"), Some("https://github.com/ada"));
    }

    #[tokio::test]
    async fn test_update_blocked_by_bad_email() {
        let api = RecordingApi::default();
        *api.user.lock().unwrap() = Ok(ada());
        let fields = FieldArgs {
            set: vec!["email=not-an-email".into()],
            ..Default::default()
        };

        assert!(update(&api, &fields, OutputFormat::Text, true).await.is_err());
        assert_eq!(api.count(|c| matches!(c, ApiCall::UpdateProfile(_))), 0);
    }
}
