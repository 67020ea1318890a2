//! Command-line interface definitions

use app_core::Segment;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "photoshelf", version, about = "Local photo gallery engine")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Date segment choice on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentArg {
    /// Calendar month before today
    Prior,
    /// Calendar month after today
    Next,
    /// No date restriction
    All,
}

impl From<SegmentArg> for Segment {
    fn from(arg: SegmentArg) -> Self {
        match arg {
            SegmentArg::Prior => Segment::PriorMonth,
            SegmentArg::Next => Segment::NextMonth,
            SegmentArg::All => Segment::All,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Import a photo record into the library
    Add {
        /// Reference to the image bytes (path or URI); stored opaquely
        image_ref: String,

        /// Capture date as YYYY-MM-DD
        #[arg(long)]
        taken: Option<String>,

        /// Note text attached to the photo
        #[arg(long)]
        note: Option<String>,
    },

    /// List photos grouped by month
    List {
        /// Keyword to match against photo notes
        #[arg(long, default_value = "")]
        keyword: String,

        /// Only show liked photos
        #[arg(long)]
        liked: bool,

        /// Date segment
        #[arg(long, value_enum, default_value = "all")]
        segment: SegmentArg,
    },

    /// Toggle the liked flag on a photo
    Like {
        photo_id: i64,
    },

    /// Set the note on a photo, or clear it when no text is given
    Note {
        photo_id: i64,
        text: Option<String>,
    },

    /// Delete a photo record from the library
    Remove {
        photo_id: i64,
    },

    /// Manage folders
    #[command(subcommand)]
    Folder(FolderCommands),
}

#[derive(Subcommand, Debug)]
pub enum FolderCommands {
    /// Create a folder, optionally seeding it with photos
    Create {
        name: String,

        /// Photo ids to place in the new folder
        #[arg(long = "photo")]
        photos: Vec<i64>,
    },

    /// Add photos to a folder
    Add {
        folder_id: i64,
        photos: Vec<i64>,
    },

    /// Remove photos from a folder
    Remove {
        folder_id: i64,
        photos: Vec<i64>,
    },

    /// Delete a folder; its photos stay in the library
    Delete {
        folder_id: i64,
    },

    /// List folders with their member counts
    List,
}
