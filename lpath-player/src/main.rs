//! Lesson Path Player (lpath-player) - Main entry point
//!
//! Command-line front end for the lesson map: browse the course catalog,
//! show the learning path or the profile dashboard, mark a lesson complete,
//! check a video URL, or play a lesson against the simulated player.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use lpath_common::api::{CourseApi, HttpCourseApi, Session};
use lpath_common::config::{
    resolve_config_path, resolve_course_id, resolve_setting, API_URL_ENV_VAR, DEFAULT_API_URL,
    TOKEN_ENV_VAR,
};
use lpath_common::events::{EventBus, LessonEvent};
use lpath_common::human_time::format_position_label;
use lpath_player::config::PlayerConfigFile;
use lpath_player::dashboard;
use lpath_player::playback::{self, ModalCommand, SimulatedPlayer};
use lpath_player::video_source::{VideoSource, INVALID_VIDEO_MESSAGE};
use lpath_player::{LessonMap, WatchOutcome};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for lpath-player
#[derive(Parser, Debug)]
#[command(name = "lpath-player")]
#[command(about = "Lesson path video player")]
#[command(version)]
struct Args {
    /// Config file (default: <config_dir>/lpath/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Course API base URL [env: LPATH_API_URL]
    #[arg(long)]
    api_url: Option<String>,

    /// Bearer token [env: LPATH_TOKEN]
    #[arg(long)]
    token: Option<String>,

    /// Course whose path to use, default the user's path [env: LPATH_COURSE_ID]
    #[arg(long)]
    course: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every course with its difficulty and lesson count
    Courses,

    /// Show account details and overall progress
    Profile,

    /// Show the learning path and progress
    Path {
        /// Print the lessons as JSON
        #[arg(long)]
        json: bool,
    },

    /// Mark a lesson as watched
    Complete { lesson_id: u64 },

    /// Show the video id extracted from a URL
    CheckUrl { url: String },

    /// Play a lesson in the simulated player until it ends
    Watch {
        lesson_id: u64,

        /// Simulated video length in seconds
        #[arg(long, default_value = "10")]
        duration: f64,

        /// Seek here right after the player is ready
        #[arg(long)]
        seek: Option<f64>,

        /// Print a line for every progress sample
        #[arg(long)]
        progress: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config_path = resolve_config_path(args.config.as_deref());
    let config = PlayerConfigFile::load(config_path.as_deref())
        .context("Failed to load configuration")?;

    // Initialize tracing
    let default_filter = format!(
        "lpath_player={level},lpath_common={level}",
        level = config.common.logging.level
    );
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let api_url = resolve_setting(
        args.api_url.as_deref(),
        API_URL_ENV_VAR,
        Some(&config.common.api_url),
    )
    .unwrap_or_else(|| DEFAULT_API_URL.to_string());
    let token = resolve_setting(
        args.token.as_deref(),
        TOKEN_ENV_VAR,
        config.common.token.as_deref(),
    );
    let course_id = resolve_course_id(args.course, config.common.course_id)
        .context("Failed to resolve course")?;
    let connection = Connection {
        api_url,
        token,
        course_id,
    };
    let events = EventBus::default();

    match args.command {
        Command::CheckUrl { url } => match VideoSource::parse(&url) {
            VideoSource::Embedded(id) => println!("{}", id),
            VideoSource::Invalid => bail!("{}", INVALID_VIDEO_MESSAGE),
        },
        Command::Courses => {
            let api = connection.client()?;
            let courses = dashboard::load_catalog(&api)
                .await
                .context("Failed to load courses")?;
            for line in dashboard::format_catalog(&courses) {
                println!("{}", line);
            }
        }
        Command::Profile => {
            let api = connection.client()?;
            let session = connection.sign_in(&api).await;
            let profile = dashboard::load_profile(&api, &session)
                .await
                .context("Failed to load profile")?;
            for line in dashboard::format_profile(&profile) {
                println!("{}", line);
            }
        }
        Command::Path { json } => {
            let map = open_map(&connection, &config, &events).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(map.lessons())?);
            } else {
                print_path(&map);
            }
        }
        Command::Complete { lesson_id } => {
            let mut map = open_map(&connection, &config, &events).await?;
            map.record_completion(lesson_id)
                .await
                .with_context(|| format!("Failed to save progress for lesson {}", lesson_id))?;
            println!("{}", map.progress());
        }
        Command::Watch {
            lesson_id,
            duration,
            seek,
            progress,
        } => {
            let mut map = open_map(&connection, &config, &events).await?;
            let outcome =
                watch_simulated(&mut map, &events, lesson_id, duration, seek, progress).await?;
            match outcome {
                WatchOutcome::Completed => {
                    println!("Lesson {} completed. {}", lesson_id, map.progress())
                }
                WatchOutcome::Closed => println!("Closed"),
                WatchOutcome::InvalidVideo(message) => println!("{}", message),
                WatchOutcome::Detached => println!("Player went away"),
            }
        }
    }

    Ok(())
}

/// Resolved API settings
struct Connection {
    api_url: String,
    token: Option<String>,
    course_id: Option<u64>,
}

impl Connection {
    fn client(&self) -> Result<HttpCourseApi> {
        info!("Course API: {}", self.api_url);
        HttpCourseApi::new(&self.api_url).context("Failed to create API client")
    }

    async fn sign_in(&self, api: &HttpCourseApi) -> Session {
        match &self.token {
            Some(token) => Session::login(api, token.clone()).await,
            None => Session::anonymous(),
        }
    }
}

/// Sign in and load the course path
async fn open_map(
    connection: &Connection,
    config: &PlayerConfigFile,
    events: &EventBus,
) -> Result<LessonMap<HttpCourseApi>> {
    let api = connection.client()?;
    let session = connection.sign_in(&api).await;
    if !session.is_authenticated() {
        warn!("Not signed in; the learning path will be empty");
    }

    let mut map = LessonMap::new(
        api,
        session,
        connection.course_id,
        config.player.clone(),
        events.clone(),
    );
    map.load().await.context("Failed to load learning path")?;
    Ok(map)
}

fn print_path<A: CourseApi>(map: &LessonMap<A>) {
    println!("{}", map.course_title());
    if map.session().is_premium() {
        println!("PREMIUM");
    }
    for lesson in map.lessons() {
        println!(
            "{:>4}  {:<40}  {}",
            lesson.id,
            lesson.title,
            lesson.status.caption()
        );
    }
    let progress = map.progress();
    println!("{} ({:.0}%)", progress, progress.percent);
}

/// Feed a `SimulatedPlayer` into `LessonMap::watch`
async fn watch_simulated<A: CourseApi>(
    map: &mut LessonMap<A>,
    events: &EventBus,
    lesson_id: u64,
    duration: f64,
    seek: Option<f64>,
    print_progress: bool,
) -> Result<WatchOutcome> {
    let (handle, mut inbox) = playback::channel::<SimulatedPlayer>(32);
    let player = SimulatedPlayer::new(duration, handle.provider_sink())
        .with_context(|| format!("Cannot simulate a {}s video", duration))?;

    let driver = tokio::spawn(async move {
        if !handle.player_ready(player) {
            return;
        }
        if let Some(seconds) = seek {
            handle.send(ModalCommand::Seek(seconds)).await;
        }
        // Keep the channel open until the modal is done with it
        handle.closed().await;
    });

    let printer = print_progress.then(|| {
        let mut rx = events.subscribe();
        tokio::spawn(async move {
            while let Ok(event) = rx.recv().await {
                if let LessonEvent::PositionSampled {
                    position, duration, ..
                } = event
                {
                    println!("{}", format_position_label(position, duration));
                }
            }
        })
    });

    let outcome = map
        .watch(lesson_id, &mut inbox)
        .await
        .with_context(|| format!("Cannot watch lesson {}", lesson_id))?;

    drop(inbox);
    if let Err(e) = driver.await {
        warn!("Player driver failed: {}", e);
    }
    if let Some(printer) = printer {
        printer.abort();
    }
    Ok(outcome)
}
