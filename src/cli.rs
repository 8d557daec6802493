use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "vidshare",
    version,
    about = "Upload and browse videos on a video-sharing backend"
)]
pub struct Cli {
    /// Session token, stored as the session cookie for this run.
    #[arg(long, env = "SESSION_AUTH_ACCESS", hide_env_values = true, global = true)]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Upload a video together with its thumbnail.
    Upload(UploadArgs),
    /// List videos, or your watch history.
    List(ListArgs),
}

#[derive(Debug, Args)]
pub struct UploadArgs {
    #[arg(long, default_value = "")]
    pub title: String,

    #[arg(long, default_value = "")]
    pub description: String,

    /// Video file to upload.
    #[arg(long)]
    pub video: Option<PathBuf>,

    /// Thumbnail image for the video.
    #[arg(long)]
    pub thumbnail: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Show watch history instead of the public listing.
    #[arg(long)]
    pub history: bool,
}
