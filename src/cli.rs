use clap::Parser;
use std::path::PathBuf;

/// Echo360 lecture downloader
#[derive(Parser, Debug)]
#[command(name = "echodl")]
#[command(version)]
#[command(about = "Download Echo360 lecture videos", long_about = None)]
pub struct Cli {
    /// Echo360 URL, either a course section or a public video,
    /// e.g. https://echo360.org/section/a1b8850e-3a11-40e8-b413-b79bb7d783a5/home
    #[arg(value_name = "URL")]
    #[arg(value_hint = clap::ValueHint::Url)]
    pub url: String,

    /// Directory to save the videos to
    #[arg(short, long, value_name = "OUTPUT_DIR")]
    #[arg(default_value = "download")]
    #[arg(value_hint = clap::ValueHint::DirPath)]
    pub output: PathBuf,

    /// Path to the chromedriver binary
    #[arg(long, value_name = "PATH")]
    #[arg(default_value = "chromedriver")]
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub driver: PathBuf,

    /// Run the browser headless (public videos only; course login needs a visible window)
    #[arg(long)]
    pub headless: bool,

    /// How long to watch network traffic for stream URLs, in seconds
    #[arg(long, value_name = "SECS", default_value_t = 30)]
    pub discover_timeout: u64,

    /// Keep video and audio tracks separate instead of merging with ffmpeg
    #[arg(long)]
    pub no_merge: bool,
}
