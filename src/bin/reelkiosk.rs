use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context as _;
use clap::Parser;
use reelkiosk::{
    Canvas, DirEnumerator, FfmpegBackend, Library, Player, PlayerConfig, PlayerError,
    Presenter,
};

#[derive(Parser, Debug)]
#[command(name = "reelkiosk", version, about = "Kiosk-style vertical video player")]
struct Cli {
    /// Player configuration JSON. Built-in defaults are used when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding one sub-folder per category (overrides `video_root`).
    #[arg(long)]
    videos: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            match e.downcast_ref::<PlayerError>() {
                Some(PlayerError::EmptyLibrary(_)) => ExitCode::from(2),
                _ => ExitCode::FAILURE,
            }
        }
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut cfg = match &cli.config {
        Some(path) => PlayerConfig::from_path(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => PlayerConfig::default(),
    };
    if let Some(videos) = cli.videos {
        cfg.video_root = videos;
    }
    let opts = cfg.player_opts()?;
    let overlay = cfg.overlay()?;

    let library = Library::new(
        &cfg.video_root,
        cfg.categories.clone(),
        Box::new(DirEnumerator),
    )?;
    let mut player = Player::new(
        opts,
        library,
        Box::new(FfmpegBackend::new()),
        Box::new(overlay),
    )?;
    print_banner(&player);

    let mut presenter = open_presenter(cfg.canvas)?;
    let stats = player.run(presenter.as_mut())?;
    eprintln!(
        "played {} frames, {} transitions ({} aborted), {} category switches",
        stats.frames_presented,
        stats.transitions_completed,
        stats.transitions_aborted,
        stats.category_switches
    );
    Ok(())
}

fn print_banner(player: &Player) {
    let category = &player.library().categories()[player.state().category];
    println!("reelkiosk: {} ({} videos)", category.label, player.videos().len());
    for (i, video) in player.videos().iter().enumerate() {
        let name = video
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| video.path.display().to_string());
        println!("  {}. {name}", i + 1);
    }
    println!();
    println!("controls:");
    println!("  w / up          previous video");
    println!("  s / down        next video");
    println!("  drag up         next video");
    println!("  drag down       previous video");
    println!("  tap a button    switch category");
    println!("  space           pause / resume");
    println!("  h               show / hide UI");
    println!("  q               quit");
}

#[cfg(feature = "sdl2")]
fn open_presenter(canvas: Canvas) -> anyhow::Result<Box<dyn Presenter>> {
    let presenter = reelkiosk::SdlPresenter::open("reelkiosk", canvas)?;
    Ok(Box::new(presenter))
}

#[cfg(not(feature = "sdl2"))]
fn open_presenter(_canvas: Canvas) -> anyhow::Result<Box<dyn Presenter>> {
    anyhow::bail!("no display backend available: rebuild with the `sdl2` feature (on by default)")
}
