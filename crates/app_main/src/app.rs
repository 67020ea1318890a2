//! Application wiring and command execution
//!
//! Opens the database, builds a gallery session over it, and executes CLI
//! commands. Store change events and user commands both land on this
//! thread, so the session only ever sees one logical thread of control.

use crate::cli::{Commands, FolderCommands};
use anyhow::{Context, Result};
use app_core::{FilterCriteria, GalleryConfig, GallerySession, MonthGroup};
use app_db::{FolderDb, PhotoDb, StoreEvent, StoreNotifier};
use chrono::{DateTime, NaiveDate};
use crossbeam_channel::Receiver;
use std::sync::Arc;

pub struct App {
    photos: PhotoDb,
    folders: FolderDb,
    session: GallerySession,
    events: Receiver<StoreEvent>,
}

impl App {
    pub fn open(config: &GalleryConfig) -> Result<Self> {
        let pool = app_db::init()?;

        let notifier = StoreNotifier::new();
        let photos = PhotoDb::new(pool.clone(), notifier.clone());
        let folders = FolderDb::new(pool, notifier.clone());
        let events = notifier.subscribe();

        let mut session =
            GallerySession::new(Arc::new(photos.clone()), Arc::new(folders.clone()))?;
        session.set_segment(config.general.default_segment)?;

        Ok(Self {
            photos,
            folders,
            session,
            events,
        })
    }

    pub fn run(&mut self, command: Commands) -> Result<()> {
        match command {
            Commands::Add {
                image_ref,
                taken,
                note,
            } => self.cmd_add(&image_ref, taken.as_deref(), note.as_deref()),
            Commands::List {
                keyword,
                liked,
                segment,
            } => self.cmd_list(FilterCriteria {
                keyword,
                liked_only: liked,
                segment: segment.into(),
            }),
            Commands::Like { photo_id } => self.cmd_like(photo_id),
            Commands::Note { photo_id, text } => self.cmd_note(photo_id, text.as_deref()),
            Commands::Remove { photo_id } => self.cmd_remove(photo_id),
            Commands::Folder(folder) => self.cmd_folder(folder),
        }
    }

    /// Drain pending store events into the session before reading state
    fn pump_events(&mut self) -> Result<()> {
        let mut changed = false;
        while let Ok(event) = self.events.try_recv() {
            tracing::debug!("Store event: {:?}", event);
            changed = true;
        }
        if changed {
            self.session.on_repository_changed()?;
        }
        Ok(())
    }

    fn cmd_add(&mut self, image_ref: &str, taken: Option<&str>, note: Option<&str>) -> Result<()> {
        let taken_at = taken.map(parse_date).transpose()?;

        let photo_id = self.photos.insert_photo(image_ref, taken_at, note)?;
        self.pump_events()?;

        println!("Added photo {}", photo_id);
        Ok(())
    }

    fn cmd_list(&mut self, criteria: FilterCriteria) -> Result<()> {
        self.pump_events()?;
        self.session.set_filter(criteria)?;

        let derived = self.session.derived();
        if derived.is_empty() {
            println!("No photos match.");
            return Ok(());
        }

        for group in &derived.groups {
            print_group(group, derived.start_index[&group.key]);
        }
        println!("{} photos", derived.len());
        Ok(())
    }

    fn cmd_like(&mut self, photo_id: i64) -> Result<()> {
        let photo = self
            .photos
            .get_photo(photo_id)?
            .with_context(|| format!("photo {} not found", photo_id))?;

        self.photos.set_liked(photo_id, !photo.liked)?;
        self.pump_events()?;

        println!(
            "Photo {} {}",
            photo_id,
            if photo.liked { "unliked" } else { "liked" }
        );
        Ok(())
    }

    fn cmd_note(&mut self, photo_id: i64, text: Option<&str>) -> Result<()> {
        self.photos.set_note(photo_id, text)?;
        self.pump_events()?;

        match text {
            Some(_) => println!("Note set on photo {}", photo_id),
            None => println!("Note cleared on photo {}", photo_id),
        }
        Ok(())
    }

    fn cmd_remove(&mut self, photo_id: i64) -> Result<()> {
        if !self.photos.delete_photo(photo_id)? {
            anyhow::bail!("photo {} not found", photo_id);
        }
        self.pump_events()?;

        println!("Removed photo {}", photo_id);
        Ok(())
    }

    fn cmd_folder(&mut self, command: FolderCommands) -> Result<()> {
        match command {
            FolderCommands::Create { name, photos } => {
                if name.trim().is_empty() {
                    anyhow::bail!("folder name must not be empty");
                }
                let folder_id = self.folders.create_folder(name.trim(), &photos)?;
                println!("Created folder {} ({:?})", folder_id, name.trim());
            }
            FolderCommands::Add { folder_id, photos } => {
                self.folders.add_photos(folder_id, &photos)?;
                println!("Added {} photos to folder {}", photos.len(), folder_id);
            }
            FolderCommands::Remove { folder_id, photos } => {
                self.folders.remove_photos(folder_id, &photos)?;
                println!("Removed {} photos from folder {}", photos.len(), folder_id);
            }
            FolderCommands::Delete { folder_id } => {
                if !self.folders.delete_folder(folder_id)? {
                    anyhow::bail!("folder {} not found", folder_id);
                }
                println!("Deleted folder {}", folder_id);
            }
            FolderCommands::List => {
                for folder in self.folders.list_folders()? {
                    let count = self.folders.member_photo_ids(folder.folder_id)?.len();
                    println!(
                        "[{:>4}] {}  ({} photos)",
                        folder.folder_id, folder.name, count
                    );
                }
            }
        }
        self.pump_events()?;
        Ok(())
    }
}

fn print_group(group: &MonthGroup, start_index: usize) {
    println!("{}  (starts at #{})", group.key, start_index);
    for photo in &group.photos {
        let date = photo
            .taken_at
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .map(|dt| dt.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "????-??-??".to_string());
        let mark = if photo.liked { "*" } else { " " };
        let note = photo.note.as_deref().unwrap_or("");
        println!("  [{:>4}]{} {}  {}  {}", photo.photo_id, mark, date, photo.image_ref, note);
    }
}

fn parse_date(text: &str) -> Result<i64> {
    let date = NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .with_context(|| format!("invalid date {:?}, expected YYYY-MM-DD", text))?;
    Ok(date.and_time(chrono::NaiveTime::MIN).and_utc().timestamp())
}
