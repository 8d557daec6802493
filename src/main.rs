mod cli;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use reqwest::cookie::Jar;
use tracing::info;
use url::Url;

use vidshare_client::api::videos::VideoApi;
use vidshare_client::auth::credentials::{CookieCredentials, SESSION_COOKIE};
use vidshare_client::models::models::{CardMode, MediaFile};
use vidshare_client::utils::log::init_logger_once;
use vidshare_client::{AuthenticatedClient, Config, UploadFormController};

use crate::cli::{Cli, Command, ListArgs, UploadArgs};

#[tokio::main]
async fn main() -> Result<()> {
    init_logger_once();
    let cli = Cli::parse();

    let config = Config::load()?;
    let origin = Url::parse(&config.api_base()).context("API base is not a valid URL")?;

    let jar = Arc::new(Jar::default());
    if let Some(token) = &cli.token {
        jar.add_cookie_str(&format!("{SESSION_COOKIE}={token}; Path=/"), &origin);
    }
    let credentials = Arc::new(CookieCredentials::new(jar.clone(), origin));

    let client = AuthenticatedClient::from_config(&config, credentials, jar)?;
    info!("Using API at {}", client.api_base());
    let api = VideoApi::new(client);

    match cli.command {
        Command::Upload(args) => upload(&api, args).await,
        Command::List(args) => list(&api, args).await,
    }
}

async fn upload(api: &VideoApi, args: UploadArgs) -> Result<()> {
    let mut form = UploadFormController::new();
    form.set_title(args.title);
    form.set_description(args.description);
    form.set_video(select_file(args.video.as_deref()).await?);
    form.set_thumbnail(select_file(args.thumbnail.as_deref()).await?);

    if let Some(label) = form.selected_video_label() {
        println!("Selected: {label}");
    }

    let mut submission = None;
    form.submit(|payload, name, size| submission = Some((payload, name, size)))?;
    let Some((payload, name, size)) = submission else {
        return Ok(());
    };

    println!("Uploading {name} ({size})...");
    let response = api
        .publish_video(payload)
        .await
        .with_context(|| format!("Upload of {name} failed"))?;
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

async fn select_file(path: Option<&Path>) -> Result<Option<MediaFile>> {
    match path {
        Some(path) => {
            let file = MediaFile::from_path(path)
                .await
                .with_context(|| format!("Cannot read {}", path.display()))?;
            Ok(Some(file))
        }
        None => Ok(None),
    }
}

async fn list(api: &VideoApi, args: ListArgs) -> Result<()> {
    let (cards, mode) = if args.history {
        (api.watch_history().await?, CardMode::History)
    } else {
        (api.list_videos().await?, CardMode::Standard)
    };

    let now = Utc::now();
    for card in &cards {
        println!("{} [{}] {}", card.thumbnail_alt(), card.duration_label, card.watch_path());
        if mode.shows_details() {
            println!("    {}", card.summary_line(now));
            if let Some(owner) = card.owner.as_ref().and_then(|o| o.username.as_deref()) {
                println!("    {owner}");
            }
        }
    }
    info!("{} videos", cards.len());
    Ok(())
}
