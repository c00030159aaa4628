use std::time::Duration;

use anyhow::anyhow;
use clap::Parser;
use colored::Colorize;
use tracing::{error, info, warn};

use echo360_downloader::Result;
use echo360_downloader::cli::Cli;
use echo360_downloader::common::client::EchoClient;
use echo360_downloader::downloader::LectureDownloader;
use echo360_downloader::parser::models::{LectureManifest, UrlType};
use echo360_downloader::parser::{Parser as _, PublicMediaParser, SectionParser, UrlParser};
use echo360_downloader::session::{BrowserSession, LoginWait, SessionConfig, wait_for_login};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args = Cli::parse();

    let target = UrlParser::new().parse(&args.url).map_err(|e| {
        error!("could not understand URL {}: {}", args.url, e);
        e
    })?;
    info!("resolved target: {}", target);

    match target {
        UrlType::PublicMedia { hostname, media_id } => {
            run_public(&args, &hostname, &media_id).await
        }
        UrlType::CourseSection {
            hostname,
            section_id,
        } => run_course(&args, &hostname, &section_id).await,
    }
}

/// Public video: no login, discover streams by watching the player page's
/// network traffic.
async fn run_public(args: &Cli, hostname: &str, media_id: &str) -> Result<()> {
    println!("> Public Echo360 video detected - skipping login");
    println!("{}", "-".repeat(80));
    println!("> Media UUID: {}", media_id);
    println!("> Hostname: {}", hostname);

    let session = BrowserSession::launch(&SessionConfig {
        driver_path: args.driver.clone(),
        headless: args.headless,
        capture_network: true,
    })
    .await?;

    // The browser must go away on the failure path too, before the error
    // propagates.
    let discovered = discover_public(&session, args, hostname, media_id).await;
    let cookies = match &discovered {
        Ok(_) => session.cookies().await.unwrap_or_default(),
        Err(_) => Vec::new(),
    };
    if let Err(e) = session.close().await {
        warn!("failed to close browser session: {}", e);
    }
    let manifests = discovered?;

    // Some deployments sign their stream URLs through cookies rather than
    // query parameters; carry whatever the player page set.
    let client = EchoClient::new()?;
    let base = reqwest::Url::parse(hostname)
        .map_err(|e| anyhow!("invalid hostname {}: {}", hostname, e))?;
    client.import_browser_cookies(&cookies, &base)?;

    let downloader = LectureDownloader::new(client, &args.output, !args.no_merge);
    downloader.download_all(&manifests).await?;

    println!("{}", "-".repeat(80));
    println!("> {}", "Download complete!".green());
    Ok(())
}

async fn discover_public(
    session: &BrowserSession,
    args: &Cli,
    hostname: &str,
    media_id: &str,
) -> Result<Vec<LectureManifest>> {
    let mut parser = PublicMediaParser::new(
        session,
        hostname,
        media_id,
        Duration::from_secs(args.discover_timeout),
    );
    Ok(parser.parse().await?)
}

/// Course capture: interactive login in a visible browser, then enumerate and
/// download everything through the authenticated HTTP client.
async fn run_course(args: &Cli, hostname: &str, section_id: &str) -> Result<()> {
    println!("> Echo360 platform detected");
    println!("> Please wait for Echo360 to load on SSO");
    println!("{}", "-".repeat(80));

    if args.headless {
        warn!("--headless is ignored for course capture; the login needs a visible window");
    }

    let session = BrowserSession::launch(&SessionConfig {
        driver_path: args.driver.clone(),
        headless: false,
        capture_network: false,
    })
    .await?;

    let credentials = setup_credentials(&session, hostname).await;
    if let Err(e) = session.close().await {
        warn!("failed to close browser session: {}", e);
    }
    let client = credentials?;

    let mut parser = SectionParser::new(&client, hostname, section_id);
    let manifests = parser.parse().await.map_err(|e| {
        error!("could not enumerate course videos: {}", e);
        e
    })?;
    println!("> Found {} lecture(s)", manifests.len());

    let downloader = LectureDownloader::new(client, &args.output, !args.no_merge);
    downloader.download_all(&manifests).await?;

    println!("{}", "-".repeat(80));
    println!("> {}", "Download complete!".green());
    Ok(())
}

/// Open the platform's login page, block until the operator confirms (or
/// abandons the wait), then export the browser's cookies into the HTTP client.
async fn setup_credentials(session: &BrowserSession, hostname: &str) -> Result<EchoClient> {
    session.goto(hostname).await?;

    match wait_for_login().await? {
        LoginWait::Confirmed => info!("login confirmed by operator"),
        LoginWait::Abandoned => warn!("login wait abandoned; using whatever session exists"),
    }

    let cookies = session.cookies().await?;
    let client = EchoClient::new()?;
    let base = reqwest::Url::parse(hostname)
        .map_err(|e| anyhow!("invalid hostname {}: {}", hostname, e))?;
    let imported = client.import_browser_cookies(&cookies, &base)?;
    info!("imported {} session cookies", imported);

    Ok(client)
}
