//! Client account command handlers.

use std::sync::Arc;

use tabled::Tabled;

use venmap_core::{
    Client, ClientId, Command as CoreCommand, CommandResult, CreateClientRequest,
    UpdateClientRequest, View, Workspace,
};

use crate::cli::{ClientsArgs, ClientsCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ClientRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Industry")]
    industry: String,
    #[tabled(rename = "Website")]
    website: String,
}

impl From<&Arc<Client>> for ClientRow {
    fn from(c: &Arc<Client>) -> Self {
        Self {
            id: c.id.to_string(),
            name: c.name.clone(),
            industry: util::dash(c.industry.as_deref()),
            website: util::dash(c.website.as_deref()),
        }
    }
}

fn detail(c: &Arc<Client>) -> String {
    let mut lines = vec![
        format!("ID:        {}", c.id),
        format!("Name:      {}", c.name),
        format!("Industry:  {}", util::dash(c.industry.as_deref())),
        format!("Website:   {}", util::dash(c.website.as_deref())),
    ];
    if let Some(ref tone) = c.brand_tone {
        lines.push(format!("Tone:      {tone}"));
    }
    if let Some(ref prefs) = c.description_preferences {
        lines.push(format!("Prefs:     {prefs}"));
    }
    if !c.standard_requirements.is_empty() {
        lines.push(format!("Requires:  {}", c.requirement_keys().join(", ")));
    }
    if let Some(ref notes) = c.notes {
        lines.push(format!("Notes:     {notes}"));
    }
    lines.join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    workspace: &Workspace,
    args: ClientsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        ClientsCommand::List => {
            workspace.load_view(View::Clients).await?;
            let snap = workspace.clients_snapshot();
            let out = output::render_list(
                &global.output,
                &snap,
                |c| ClientRow::from(c),
                |c| c.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ClientsCommand::Get { client } => {
            let id: ClientId = util::parse_id(&client, "client", "clients list")?;
            workspace.load_view(View::ClientDetails(id)).await?;
            let found = workspace.store().client_by_id(id).ok_or_else(|| {
                CliError::NotFound {
                    resource_type: "client".into(),
                    identifier: client,
                    list_command: "clients list".into(),
                }
            })?;
            let out = output::render_single(&global.output, &found, detail, |c| c.id.to_string());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ClientsCommand::Create {
            name,
            industry,
            website,
            brand_tone,
            notes,
        } => {
            let result = workspace
                .execute(CoreCommand::CreateClient(CreateClientRequest {
                    name,
                    industry,
                    website,
                    logo_url: None,
                    brand_tone,
                    description_preferences: None,
                    standard_requirements: None,
                    notes,
                }))
                .await?;
            if let CommandResult::Client(c) = result {
                if !global.quiet {
                    eprintln!("Client created: {}", c.id);
                }
            }
            Ok(())
        }

        ClientsCommand::Update {
            client,
            name,
            industry,
            website,
            brand_tone,
            notes,
        } => {
            let id: ClientId = util::parse_id(&client, "client", "clients list")?;
            workspace
                .execute(CoreCommand::UpdateClient {
                    id,
                    update: UpdateClientRequest {
                        name,
                        industry,
                        website,
                        brand_tone,
                        notes,
                        ..Default::default()
                    },
                })
                .await?;
            if !global.quiet {
                eprintln!("Client updated");
            }
            Ok(())
        }

        ClientsCommand::Delete { client } => {
            let id: ClientId = util::parse_id(&client, "client", "clients list")?;
            if !util::confirm(
                &format!("Delete client {client}? Projects keep their plain client name."),
                global.yes,
            )? {
                return Ok(());
            }
            workspace.execute(CoreCommand::DeleteClient { id }).await?;
            if !global.quiet {
                eprintln!("Client deleted");
            }
            Ok(())
        }
    }
}
