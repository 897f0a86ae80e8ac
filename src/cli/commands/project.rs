//! Project commands

use anyhow::Result;
use clap::Subcommand;

use crate::api::{EditableEntity, PortfolioApi, Project};
use crate::cli::commands::{client, ensure_valid, FieldArgs};
use crate::cli::output::{or_dash, print_formatted, print_submit_result, OutputFormat};
use crate::form::{FormRecord, Payload, ADD_PROJECT, UPDATE_PROJECT};

#[derive(Subcommand, Debug)]
pub enum ProjectCommands {
    /// List all projects
    List,

    /// Show one project
    Show {
        /// Project id
        id: String,
    },

    /// Add a new project
    Add {
        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Update a project; fields not given keep their stored values
    Update {
        /// Project id
        id: String,

        #[command(flatten)]
        fields: FieldArgs,
    },
}

pub async fn run(command: ProjectCommands, format: OutputFormat, quiet: bool) -> Result<()> {
    let api = client()?;
    match command {
        ProjectCommands::List => list(&api, format).await,
        ProjectCommands::Show { id } => show(&api, &id, format).await,
        ProjectCommands::Add { fields } => add(&api, &fields, format, quiet).await,
        ProjectCommands::Update { id, fields } => update(&api, &id, &fields, format, quiet).await,
    }
}

async fn list(api: &dyn PortfolioApi, format: OutputFormat) -> Result<()> {
    let projects = api.list_projects().await?;

    print_formatted(&projects, format, |projects| {
        if projects.is_empty() {
            return "No projects".to_string();
        }
        projects
            .iter()
            .map(|p| {
                format!(
                    "{:<26} {:<32} {:<12} {}",
                    p.id,
                    or_dash(p.title.as_deref()),
                    or_dash(p.stack.as_deref()),
                    or_dash(p.deployed.as_deref())
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    });

    Ok(())
}

fn describe(project: &Project) -> String {
    let mut lines: Vec<String> = project
        .field_map()
        .into_iter()
        .map(|(name, value)| format!("{:<14} {}", name, value))
        .collect();
    lines.insert(0, format!("{:<14} {}", "id", project.id));
    for (field, url) in project.asset_urls() {
        lines.push(format!("{:<14} {}", field, url));
    }
    lines.join("\n")
}

async fn show(api: &dyn PortfolioApi, id: &str, format: OutputFormat) -> Result<()> {
    let project = api.get_project(id).await?;
    print_formatted(&project, format, describe);
    Ok(())
}

async fn add(
    api: &dyn PortfolioApi,
    fields: &FieldArgs,
    format: OutputFormat,
    quiet: bool,
) -> Result<()> {
    let mut record = FormRecord::new(&ADD_PROJECT);
    fields.apply(&mut record).await?;
    ensure_valid(&record)?;

    let message = api.add_project(Payload::from_record(&record)).await?;
    print_submit_result(None, &message, format, quiet);
    Ok(())
}

async fn update(
    api: &dyn PortfolioApi,
    id: &str,
    fields: &FieldArgs,
    format: OutputFormat,
    quiet: bool,
) -> Result<()> {
    let current = api.get_project(id).await?;
    let mut record = FormRecord::new(&UPDATE_PROJECT);
    record.seed(&current.field_map());
    fields.apply(&mut record).await?;
    ensure_valid(&record)?;

    let message = api.update_project(id, Payload::from_record(&record)).await?;
    print_submit_result(Some(id), &message, format, quiet);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::{ApiCall, RecordingApi};

    #[tokio::test]
    async fn test_update_resends_stored_fields() {
        let api = RecordingApi::default();
        *api.project.lock().unwrap() = Ok(Project {
            id: "7".into(),
            title: Some("Old".into()),
            description: Some("undefined".into()),
            stack: Some("Mern".into()),
            ..Default::default()
        });
        let fields = FieldArgs {
            set: vec!["title=New".into()],
            ..Default::default()
        };

        update(&api, "7", &fields, OutputFormat::Text, true)
            .await
            .unwrap();

        let payload = api
            .calls()
            .into_iter()
            .find_map(|c| match c {
                ApiCall::UpdateProject(id, p) if id == "7" => Some(p),
                _ => None,
            })
            .unwrap();
        assert_eq!(payload.text("title"), Some("New"));
        assert_eq!(payload.text("stack"), Some("Mern"));
        assert_eq!(payload.text("description"), Some(""));
    }

    #[tokio::test]
    async fn test_update_missing_project_fails_without_submit() {
        let api = RecordingApi::default();
        let result = update(&api, "nope", &FieldArgs::default(), OutputFormat::Text, true).await;

        assert_eq!(result.unwrap_err().to_string(), "Project not found");
        assert_eq!(api.count(|c| matches!(c, ApiCall::UpdateProject(..))), 0);
    }

    #[tokio::test]
    async fn test_add_sends_given_fields() {
        let api = RecordingApi::default();
        let fields = FieldArgs {
            set: vec!["title=Fresh".into()],
            ..Default::default()
        };

        add(&api, &fields, OutputFormat::Json, true).await.unwrap();

        assert!(matches!(
            &api.calls()[0],
            ApiCall::AddProject(p) if p.text("title") == Some("Fresh")
        ));
    }

    #[test]
    fn test_describe_lists_fields() {
        let project = Project {
            id: "1".into(),
            title: Some("Portfolio".into()),
            ..Default::default()
        };
        let text = describe(&project);
        assert!(text.starts_with("id"));
        assert!(text.contains("Portfolio"));
    }
}
