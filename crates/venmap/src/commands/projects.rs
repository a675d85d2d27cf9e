//! Project command handlers: CRUD, attached venues, proposal export.

use std::str::FromStr;
use std::sync::Arc;

use tabled::Tabled;

use venmap_core::{
    Command as CoreCommand, CommandResult, CreateProjectRequest, OutreachStatus, Project,
    ProjectId, ProjectStatus, UpdateLinkRequest, UpdateProjectRequest, VenueId, VenueLink, View,
    Workspace,
};

use crate::cli::{
    GlobalOpts, ProjectVenuesCommand, ProjectsArgs, ProjectsCommand, ProposalCommand,
};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct ProjectRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Client")]
    client: String,
    #[tabled(rename = "Event")]
    event: String,
    #[tabled(rename = "Dates")]
    dates: String,
    #[tabled(rename = "Attendees")]
    attendees: u32,
    #[tabled(rename = "Budget")]
    budget: String,
    #[tabled(rename = "Venues")]
    venues: usize,
    #[tabled(rename = "Status")]
    status: String,
}

impl From<&Arc<Project>> for ProjectRow {
    fn from(p: &Arc<Project>) -> Self {
        Self {
            id: p.id.to_string(),
            client: p.client_name.clone(),
            event: p.event_name.clone(),
            dates: p.date_range(),
            attendees: p.attendee_count,
            budget: util::eur(p.budget),
            venues: p.venue_count,
            status: p.status.to_string(),
        }
    }
}

fn project_detail(p: &Arc<Project>) -> String {
    let mut lines = vec![
        format!("ID:         {}", p.id),
        format!("Client:     {}", p.client_name),
        format!("Event:      {}", p.event_name),
        format!("Dates:      {}", p.date_range()),
        format!("Attendees:  {}", p.attendee_count),
        format!("Budget:     {}", util::eur(p.budget)),
        format!("Status:     {}", p.status),
        format!("Venues:     {}", p.venue_count),
    ];
    if let Some(ref loc) = p.location_preference {
        lines.push(format!("Location:   {loc}"));
    }
    if !p.requirements.is_empty() {
        lines.push(format!("Requires:   {}", p.requirements.join(", ")));
    }
    if let Some(ref notes) = p.notes {
        lines.push(format!("Notes:      {notes}"));
    }
    lines.join("\n")
}

#[derive(Tabled)]
struct LinkRow {
    #[tabled(rename = "Venue ID")]
    venue_id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "City")]
    city: String,
    #[tabled(rename = "Outreach")]
    outreach: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Proposal")]
    proposal: String,
    #[tabled(rename = "Description")]
    description: String,
}

impl From<&Arc<VenueLink>> for LinkRow {
    fn from(l: &Arc<VenueLink>) -> Self {
        Self {
            venue_id: l.venue_id.to_string(),
            name: l.venue.name.clone(),
            city: l.venue.city.clone(),
            outreach: l.outreach_status.to_string(),
            price: util::eur(l.quoted_price),
            proposal: if l.include_in_proposal { "yes" } else { "no" }.into(),
            description: match l.resolved_description() {
                Some((source, _)) => format!("{source:?}").to_lowercase(),
                None => "missing".into(),
            },
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    workspace: &Workspace,
    args: ProjectsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        ProjectsCommand::List => {
            let snap = workspace.projects_snapshot();
            let out = output::render_list(
                &global.output,
                &snap,
                |p| ProjectRow::from(p),
                |p| p.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ProjectsCommand::Get { project } => {
            let id: ProjectId = util::parse_id(&project, "project", "projects list")?;
            // Pull the fresh record plus its associations.
            workspace.load_view(View::ProjectVenues(id)).await?;
            let found = workspace.store().project_by_id(id).ok_or_else(|| {
                CliError::NotFound {
                    resource_type: "project".into(),
                    identifier: project,
                    list_command: "projects list".into(),
                }
            })?;
            let out =
                output::render_single(&global.output, &found, project_detail, |p| p.id.to_string());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ProjectsCommand::Create {
            client_name,
            client_id,
            event_name,
            start,
            end,
            attendees,
            budget,
            location,
            requirements,
            notes,
        } => {
            let client_id = client_id
                .map(|raw| util::parse_id(&raw, "client", "clients list"))
                .transpose()?;
            let result = workspace
                .execute(CoreCommand::CreateProject(CreateProjectRequest {
                    client_id,
                    client_name,
                    event_name,
                    event_date_start: start,
                    event_date_end: end.unwrap_or(start),
                    attendee_count: attendees,
                    budget,
                    location_preference: location,
                    requirements,
                    notes,
                }))
                .await?;
            if let CommandResult::Project(p) = result {
                if !global.quiet {
                    eprintln!("Project created: {}", p.id);
                }
            }
            Ok(())
        }

        ProjectsCommand::Update {
            project,
            client_name,
            event_name,
            start,
            end,
            attendees,
            budget,
            status,
            notes,
        } => {
            let id: ProjectId = util::parse_id(&project, "project", "projects list")?;
            let status = status
                .map(|s| {
                    ProjectStatus::from_str(&s).map_err(|_| CliError::Validation {
                        field: "status".into(),
                        reason: format!("expected active, completed, or cancelled, got '{s}'"),
                    })
                })
                .transpose()?;
            workspace
                .execute(CoreCommand::UpdateProject {
                    id,
                    update: UpdateProjectRequest {
                        client_name,
                        event_name,
                        event_date_start: start,
                        event_date_end: end,
                        attendee_count: attendees,
                        budget,
                        status,
                        notes,
                        ..Default::default()
                    },
                })
                .await?;
            if !global.quiet {
                eprintln!("Project updated");
            }
            Ok(())
        }

        ProjectsCommand::Delete { project } => {
            let id: ProjectId = util::parse_id(&project, "project", "projects list")?;
            if !util::confirm(
                &format!("Delete project {project} and all its venue associations?"),
                global.yes,
            )? {
                return Ok(());
            }
            workspace.execute(CoreCommand::DeleteProject { id }).await?;
            if !global.quiet {
                eprintln!("Project deleted");
            }
            Ok(())
        }

        ProjectsCommand::Venues(sub) => handle_venues(workspace, sub.command, global).await,

        ProjectsCommand::Proposal(sub) => handle_proposal(workspace, sub.command, global).await,
    }
}

// ── Attached venues ─────────────────────────────────────────────────

async fn handle_venues(
    workspace: &Workspace,
    cmd: ProjectVenuesCommand,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        ProjectVenuesCommand::List { project } => {
            let id: ProjectId = util::parse_id(&project, "project", "projects list")?;
            workspace.load_view(View::ProjectVenues(id)).await?;
            let snap = workspace.links_snapshot();
            let out = output::render_list(
                &global.output,
                &snap,
                |l| LinkRow::from(l),
                |l| l.venue_id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ProjectVenuesCommand::Add { project, venues } => {
            let project_id: ProjectId = util::parse_id(&project, "project", "projects list")?;
            let venue_ids = venues
                .iter()
                .map(|raw| util::parse_id::<VenueId>(raw, "venue", "venues list"))
                .collect::<Result<Vec<_>, _>>()?;

            let result = workspace
                .execute(CoreCommand::AttachVenues {
                    project_id,
                    venue_ids,
                })
                .await?;
            if let CommandResult::Attach(report) = result {
                if !global.quiet {
                    eprintln!("{} venue(s) attached", report.attached.len());
                }
                for (venue_id, err) in &report.failed {
                    eprintln!("  failed {venue_id}: {err}");
                }
                if !report.all_succeeded() {
                    return Err(CliError::ApiError {
                        message: format!("{} venue(s) could not be attached", report.failed.len()),
                        status: None,
                    });
                }
            }
            Ok(())
        }

        ProjectVenuesCommand::Remove { project, venue } => {
            let project_id: ProjectId = util::parse_id(&project, "project", "projects list")?;
            let venue_id: VenueId = util::parse_id(&venue, "venue", "venues list")?;
            if !util::confirm(
                &format!("Detach venue {venue} from project {project}? Outreach data is lost."),
                global.yes,
            )? {
                return Ok(());
            }
            workspace
                .execute(CoreCommand::DetachVenue {
                    project_id,
                    venue_id,
                })
                .await?;
            if !global.quiet {
                eprintln!("Venue detached");
            }
            Ok(())
        }

        ProjectVenuesCommand::SetStatus {
            project,
            venue,
            status,
        } => {
            let project_id: ProjectId = util::parse_id(&project, "project", "projects list")?;
            let venue_id: VenueId = util::parse_id(&venue, "venue", "venues list")?;
            let status = OutreachStatus::from_str(&status).map_err(|_| CliError::Validation {
                field: "status".into(),
                reason: format!(
                    "expected draft, sent, pending, responded, or declined, got '{status}'"
                ),
            })?;
            workspace
                .execute(CoreCommand::UpdateLink {
                    project_id,
                    venue_id,
                    update: UpdateLinkRequest {
                        outreach_status: Some(status),
                        ..Default::default()
                    },
                })
                .await?;
            if !global.quiet {
                eprintln!("Outreach status set to {status}");
            }
            Ok(())
        }

        ProjectVenuesCommand::Update {
            project,
            venue,
            price,
            availability,
            available,
            rooms,
            catering,
            pros,
            cons,
            description,
            include,
            notes,
        } => {
            let project_id: ProjectId = util::parse_id(&project, "project", "projects list")?;
            let venue_id: VenueId = util::parse_id(&venue, "venue", "venues list")?;
            workspace
                .execute(CoreCommand::UpdateLink {
                    project_id,
                    venue_id,
                    update: UpdateLinkRequest {
                        quoted_price: price,
                        availability_dates: availability,
                        is_available: available,
                        room_allocation: rooms,
                        catering_description: catering,
                        pros,
                        cons,
                        final_description: description,
                        include_in_proposal: include,
                        notes,
                        ..Default::default()
                    },
                })
                .await?;
            if !global.quiet {
                eprintln!("Venue association updated");
            }
            Ok(())
        }

        ProjectVenuesCommand::Describe { project, venue } => {
            let project_id: ProjectId = util::parse_id(&project, "project", "projects list")?;
            let venue_id: VenueId = util::parse_id(&venue, "venue", "venues list")?;
            let result = workspace
                .execute(CoreCommand::GenerateDescription {
                    project_id,
                    venue_id,
                })
                .await?;
            if let CommandResult::Generated(outcome) = result {
                if !outcome.success {
                    return Err(CliError::ApiError {
                        message: outcome
                            .message
                            .unwrap_or_else(|| "description generation failed".into()),
                        status: None,
                    });
                }
                if let Some(text) = outcome.ai_description {
                    output::print_output(&text, global.quiet);
                }
            }
            Ok(())
        }
    }
}

// ── Proposal export ─────────────────────────────────────────────────

async fn handle_proposal(
    workspace: &Workspace,
    cmd: ProposalCommand,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        ProposalCommand::Preview { project, out } => {
            let project_id: ProjectId = util::parse_id(&project, "project", "projects list")?;
            let result = workspace
                .execute(CoreCommand::ProposalPreview { project_id })
                .await?;
            if let CommandResult::Html(html) = result {
                match out {
                    Some(path) => {
                        std::fs::write(&path, html)?;
                        if !global.quiet {
                            eprintln!("Proposal preview written to {}", path.display());
                        }
                    }
                    None => output::print_output(&html, global.quiet),
                }
            }
            Ok(())
        }

        ProposalCommand::Pdf { project, out } => {
            let project_id: ProjectId = util::parse_id(&project, "project", "projects list")?;
            let result = workspace
                .execute(CoreCommand::ProposalPdf { project_id })
                .await?;
            if let CommandResult::Pdf(bytes) = result {
                std::fs::write(&out, bytes)?;
                if !global.quiet {
                    eprintln!("Proposal PDF written to {}", out.display());
                }
            }
            Ok(())
        }
    }
}
