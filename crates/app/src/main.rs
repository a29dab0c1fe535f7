use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{
    AccountService, AppServices, AssessmentFormService, AssessmentSessionService, AuthService,
    ProfileService, RosterService, SessionContext, StatisticsService,
};
use storage::ApiConfig;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use ui::{App, UiApp, build_app_context};

const DB_ENV: &str = "LITERACY_DB_URL";
const IMAGE_DIR_ENV: &str = "LITERACY_IMAGE_DIR";
const DEFAULT_DB_URL: &str = "sqlite://literacy.sqlite3";
const DEFAULT_IMAGE_DIR: &str = "images";

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidApiUrl { raw: String, reason: String },
    InvalidDbUrl { raw: String },
    InvalidImageDir { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidApiUrl { raw, reason } => {
                write!(f, "invalid --api value {raw}: {reason}")
            }
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidImageDir { raw } => write!(f, "invalid --images value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    services: AppServices,
    image_base: String,
}

impl UiApp for DesktopApp {
    fn session(&self) -> Arc<SessionContext> {
        self.services.session()
    }

    fn auth(&self) -> Arc<AuthService> {
        self.services.auth()
    }

    fn assessment_sessions(&self) -> Arc<AssessmentSessionService> {
        self.services.assessment_sessions()
    }

    fn roster(&self) -> Arc<RosterService> {
        self.services.roster()
    }

    fn statistics(&self) -> Arc<StatisticsService> {
        self.services.statistics()
    }

    fn profile(&self) -> Arc<ProfileService> {
        self.services.profile()
    }

    fn accounts(&self) -> Arc<AccountService> {
        self.services.accounts()
    }

    fn assessment_form(&self) -> Arc<AssessmentFormService> {
        self.services.assessment_form()
    }

    fn image_base(&self) -> String {
        self.image_base.clone()
    }
}

#[derive(Debug)]
struct Args {
    api: ApiConfig,
    db_url: String,
    image_dir: PathBuf,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [ui] [--api <url>] [--db <sqlite_url>] [--images <dir>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --api {}", ApiConfig::DEFAULT_URL);
    eprintln!("  --db {DEFAULT_DB_URL}");
    eprintln!("  --images {DEFAULT_IMAGE_DIR}");
    eprintln!();
    eprintln!("Environment (a .env file is read if present):");
    eprintln!("  {}, {DB_ENV}, {IMAGE_DIR_ENV}, RUST_LOG", ApiConfig::ENV_VAR);
}

fn parse_api(raw: &str) -> Result<ApiConfig, ArgsError> {
    ApiConfig::parse(raw).map_err(|err| ArgsError::InvalidApiUrl {
        raw: raw.to_owned(),
        reason: err.to_string(),
    })
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}

impl Args {
    fn parse_ui(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut api = match env_value(ApiConfig::ENV_VAR) {
            Some(raw) => parse_api(&raw)?,
            None => parse_api(ApiConfig::DEFAULT_URL)?,
        };
        let mut db_url = env_value(DB_ENV)
            .map_or_else(|| DEFAULT_DB_URL.into(), normalize_sqlite_url);
        let mut image_dir =
            PathBuf::from(env_value(IMAGE_DIR_ENV).unwrap_or_else(|| DEFAULT_IMAGE_DIR.into()));

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--api" => {
                    let value = require_value(args, "--api")?;
                    api = parse_api(&value)?;
                }
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--images" => {
                    let value = require_value(args, "--images")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidImageDir { raw: value });
                    }
                    image_dir = PathBuf::from(value);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            api,
            db_url,
            image_dir,
        })
    }
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

/// Split the image directory into the webview resource root and the URL
/// prefix the images are served under.
fn image_mount(image_dir: &Path) -> Result<(PathBuf, String), ArgsError> {
    let invalid = || ArgsError::InvalidImageDir {
        raw: image_dir.display().to_string(),
    };
    let absolute = std::path::absolute(image_dir).map_err(|_| invalid())?;
    let name = absolute
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(invalid)?
        .to_owned();
    let root = absolute.parent().ok_or_else(invalid)?.to_path_buf();
    Ok((root, format!("/{name}")))
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    match argv.first().map(String::as_str) {
        None | Some("ui") => {}
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => {}
        Some(first) => {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            return Err(ArgsError::UnknownArg(first.to_owned()).into());
        }
    }
    if argv.first().is_some_and(|first| first == "ui") {
        argv.remove(0);
    }

    let mut iter = argv.into_iter();
    let parsed = Args::parse_ui(&mut iter).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    // The session record lives in SQLite; create the file before connecting.
    prepare_sqlite_file(&parsed.db_url)?;
    let (resource_root, image_base) = image_mount(&parsed.image_dir)?;
    info!(
        api = %parsed.api.base_url(),
        db = %parsed.db_url,
        images = %parsed.image_dir.display(),
        "starting literacy client"
    );

    let services = AppServices::new_sqlite(&parsed.db_url, parsed.api).await?;
    let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
        services,
        image_base,
    });
    let context = build_app_context(&app);

    // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
    let desktop_cfg = DesktopConfig::new()
        .with_resource_directory(resource_root)
        .with_window(
            WindowBuilder::new()
                .with_title("Literacy Assessment")
                .with_always_on_top(false),
        );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args, ArgsError> {
        let mut iter = args.iter().map(|s| (*s).to_owned());
        Args::parse_ui(&mut iter)
    }

    #[test]
    fn flags_override_defaults() {
        let args = parse(&[
            "--api",
            "https://literacy.example.org/api",
            "--db",
            "sqlite:///tmp/lit.sqlite3",
            "--images",
            "/srv/assets/images",
        ])
        .unwrap();
        assert_eq!(
            args.api.base_url().as_str(),
            "https://literacy.example.org/api/"
        );
        assert_eq!(args.db_url, "sqlite:///tmp/lit.sqlite3");
        assert_eq!(args.image_dir, PathBuf::from("/srv/assets/images"));
    }

    #[test]
    fn bad_flags_are_rejected() {
        assert!(matches!(
            parse(&["--api", "ftp://host"]),
            Err(ArgsError::InvalidApiUrl { .. })
        ));
        assert!(matches!(
            parse(&["--db"]),
            Err(ArgsError::MissingValue { flag: "--db" })
        ));
        assert!(matches!(parse(&["--bogus"]), Err(ArgsError::UnknownArg(_))));
    }

    #[test]
    fn relative_sqlite_paths_become_absolute() {
        let url = normalize_sqlite_url("sqlite:data/lit.sqlite3".into());
        assert!(url.starts_with("sqlite:///"), "{url}");
        assert!(url.ends_with("data/lit.sqlite3"), "{url}");
        assert_eq!(normalize_sqlite_url("sqlite::memory:".into()), "sqlite::memory:");
    }

    #[test]
    fn image_dir_splits_into_root_and_prefix() {
        let (root, base) = image_mount(Path::new("/srv/assets/images")).unwrap();
        assert_eq!(root, PathBuf::from("/srv/assets"));
        assert_eq!(base, "/images");
    }
}
