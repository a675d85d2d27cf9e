//! Venue gallery command handlers: CRUD, CSV import, photos.

use std::sync::Arc;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use tabled::Tabled;

use venmap_core::{
    Command as CoreCommand, CommandResult, CreateVenueRequest, GalleryFilter, PhotoId,
    UpdateVenueRequest, Venue, VenueId, View, Workspace,
};

use crate::cli::{GlobalOpts, PhotosCommand, VenuesArgs, VenuesCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct VenueRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "City")]
    city: String,
    #[tabled(rename = "Capacity")]
    capacity: u32,
    #[tabled(rename = "Facilities")]
    facilities: String,
    #[tabled(rename = "Photos")]
    photos: usize,
}

impl From<&Arc<Venue>> for VenueRow {
    fn from(v: &Arc<Venue>) -> Self {
        Self {
            id: v.id.to_string(),
            name: v.name.clone(),
            city: v.city.clone(),
            capacity: v.capacity,
            facilities: v.facilities_label(),
            photos: v.photos.len(),
        }
    }
}

fn venue_detail(v: &Arc<Venue>) -> String {
    let mut lines = vec![
        format!("ID:          {}", v.id),
        format!("Name:        {}", v.name),
        format!("City:        {}", v.city),
        format!("Capacity:    {}", v.capacity),
        format!("Facilities:  {}", util::dash(Some(&v.facilities_label()))),
        format!("Event types: {}", util::dash(Some(&v.event_types.join(", ")))),
    ];
    if let Some(ref email) = v.contact_email {
        lines.push(format!("Contact:     {email}"));
    }
    if let Some(ref phone) = v.contact_phone {
        lines.push(format!("Phone:       {phone}"));
    }
    if let Some(ref website) = v.website {
        lines.push(format!("Website:     {website}"));
    }
    if let Some(ref address) = v.address {
        lines.push(format!("Address:     {address}"));
    }
    if let Some(ref template) = v.description_template {
        lines.push(format!("Description: {template}"));
    }
    for photo in &v.photos {
        lines.push(format!(
            "Photo:       {} ({})",
            photo.url,
            util::dash(photo.caption.as_deref())
        ));
    }
    lines.join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    workspace: &Workspace,
    args: VenuesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        VenuesCommand::List {
            city,
            min_capacity,
            facilities,
            event_types,
        } => {
            let filter = GalleryFilter {
                city,
                min_capacity,
                facilities,
                event_types,
            };
            workspace.apply_gallery_filter(filter.clone()).await?;
            workspace.load_view(View::Venues).await?;

            // The backend handles city/capacity/facilities; event types
            // are filtered client-side over the cached gallery.
            let snap = workspace.venues_snapshot();
            let filtered: Vec<Arc<Venue>> = snap
                .iter()
                .filter(|v| filter.matches(v))
                .cloned()
                .collect();

            let out = output::render_list(
                &global.output,
                &filtered,
                |v| VenueRow::from(v),
                |v| v.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        VenuesCommand::Get { venue } => {
            let id: VenueId = util::parse_id(&venue, "venue", "venues list")?;
            workspace.load_view(View::Venues).await?;
            let found = workspace.store().venue_by_id(id).ok_or_else(|| {
                CliError::NotFound {
                    resource_type: "venue".into(),
                    identifier: venue,
                    list_command: "venues list".into(),
                }
            })?;
            let out =
                output::render_single(&global.output, &found, venue_detail, |v| v.id.to_string());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        VenuesCommand::Create {
            name,
            city,
            capacity,
            facilities,
            event_types,
            contact_email,
            contact_phone,
            website,
            address,
            description,
            notes,
        } => {
            let result = workspace
                .execute(CoreCommand::CreateVenue(CreateVenueRequest {
                    name,
                    city,
                    capacity,
                    facilities,
                    event_types,
                    contact_email,
                    contact_phone,
                    website,
                    address,
                    description_template: description,
                    notes,
                }))
                .await?;
            if let CommandResult::Venue(v) = result {
                if !global.quiet {
                    eprintln!("Venue created: {}", v.id);
                }
            }
            Ok(())
        }

        VenuesCommand::Update {
            venue,
            name,
            city,
            capacity,
            facilities,
            event_types,
            contact_email,
            contact_phone,
            website,
            address,
            description,
            notes,
        } => {
            let id: VenueId = util::parse_id(&venue, "venue", "venues list")?;
            workspace
                .execute(CoreCommand::UpdateVenue {
                    id,
                    update: UpdateVenueRequest {
                        name,
                        city,
                        capacity,
                        facilities: if facilities.is_empty() { None } else { Some(facilities) },
                        event_types: if event_types.is_empty() { None } else { Some(event_types) },
                        contact_email,
                        contact_phone,
                        website,
                        address,
                        description_template: description,
                        notes,
                    },
                })
                .await?;
            if !global.quiet {
                eprintln!("Venue updated");
            }
            Ok(())
        }

        VenuesCommand::Delete { venue } => {
            let id: VenueId = util::parse_id(&venue, "venue", "venues list")?;
            if !util::confirm(
                &format!("Delete venue {venue}? It disappears from every project."),
                global.yes,
            )? {
                return Ok(());
            }
            workspace.execute(CoreCommand::DeleteVenue { id }).await?;
            if !global.quiet {
                eprintln!("Venue deleted");
            }
            Ok(())
        }

        VenuesCommand::Import { file } => {
            let (file_name, bytes) = util::read_file_bytes(&file)?;

            let bar = if global.quiet {
                ProgressBar::hidden()
            } else {
                let bar = ProgressBar::new_spinner();
                bar.set_style(
                    ProgressStyle::with_template("{spinner} {msg}")
                        .expect("progress template is valid"),
                );
                bar.set_message(format!("Uploading {file_name}..."));
                bar.enable_steady_tick(std::time::Duration::from_millis(100));
                bar
            };

            let result = workspace
                .execute(CoreCommand::ImportVenuesCsv { file_name, bytes })
                .await;
            bar.finish_and_clear();

            if let CommandResult::Import(report) = result? {
                let use_color = output::should_color(&global.color);
                if !global.quiet {
                    eprintln!(
                        "{} of {} rows imported, {} failed",
                        report.successful, report.total_rows, report.failed
                    );
                }
                // Rejected rows are reported individually; accepted rows
                // are already committed server-side.
                for err in &report.errors {
                    let field = util::dash(err.field.as_deref());
                    if use_color {
                        eprintln!(
                            "  {} row {} [{}]: {}",
                            "error".red(),
                            err.row,
                            field,
                            err.message
                        );
                    } else {
                        eprintln!("  error row {} [{}]: {}", err.row, field, err.message);
                    }
                }
                if report.failed > 0 {
                    return Err(CliError::ApiError {
                        message: format!("{} row(s) rejected", report.failed),
                        status: None,
                    });
                }
            }
            Ok(())
        }

        VenuesCommand::Template { out } => {
            let result = workspace.execute(CoreCommand::DownloadCsvTemplate).await?;
            if let CommandResult::CsvTemplate(template) = result {
                match out {
                    Some(path) => {
                        std::fs::write(&path, template)?;
                        if !global.quiet {
                            eprintln!("Template written to {}", path.display());
                        }
                    }
                    None => output::print_output(&template, global.quiet),
                }
            }
            Ok(())
        }

        VenuesCommand::Photos(sub) => match sub.command {
            PhotosCommand::Add {
                venue,
                file,
                caption,
                order,
            } => {
                let venue_id: VenueId = util::parse_id(&venue, "venue", "venues list")?;
                let mime = util::photo_mime(&file)?;
                let (file_name, bytes) = util::read_file_bytes(&file)?;
                workspace
                    .execute(CoreCommand::UploadPhoto {
                        venue_id,
                        file_name,
                        mime,
                        bytes,
                        caption,
                        display_order: order,
                    })
                    .await?;
                if !global.quiet {
                    eprintln!("Photo uploaded");
                }
                Ok(())
            }

            PhotosCommand::Remove { venue, photo } => {
                let venue_id: VenueId = util::parse_id(&venue, "venue", "venues list")?;
                let photo_id: PhotoId = util::parse_id(&photo, "photo", "venues get")?;
                if !util::confirm(&format!("Delete photo {photo}?"), global.yes)? {
                    return Ok(());
                }
                workspace
                    .execute(CoreCommand::DeletePhoto { venue_id, photo_id })
                    .await?;
                if !global.quiet {
                    eprintln!("Photo deleted");
                }
                Ok(())
            }
        },
    }
}
