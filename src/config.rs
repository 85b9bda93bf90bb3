use regex::Regex;
use std::env;
use std::sync::LazyLock;
use std::time::Duration;

pub const DEFAULT_TAIL: u64 = 100;
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_COMMAND_TIMEOUT_SECS: u64 = 30;

/// First character alphanumeric, remainder alphanumeric plus `_`, `.`, `-`;
/// minimum length 2. Applied to allow-listed and discovered names alike.
static NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_.-]+$").expect("container name pattern is a valid regex")
});

pub fn is_valid_container_name(name: &str) -> bool {
    NAME_PATTERN.is_match(name)
}

/// Parse a comma-separated allow-list. Invalid entries are dropped with a log
/// line; valid entries are deduplicated and sorted ascending.
pub fn parse_container_list(raw: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for entry in raw.split(',') {
        if is_valid_container_name(entry) {
            if !names.iter().any(|n| n == entry) {
                names.push(entry.to_string());
            }
        } else {
            log::info!("\"{entry}\" is not a valid container name. Skipping");
        }
    }
    names.sort();
    names
}

/// Tail values are taken as the absolute value of the parsed integer.
pub fn parse_tail(raw: &str) -> Option<u64> {
    raw.parse::<i64>().ok().map(i64::unsigned_abs)
}

/// Case-insensitive truthy/falsy vocabulary shared by environment variables
/// and query parameters. Unrecognized tokens leave the caller's default
/// unchanged.
pub fn parse_bool_token(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "" | "true" | "1" | "yes" | "y" | "enable" | "on" => Some(true),
        "false" | "0" | "no" | "n" | "disable" | "off" => Some(false),
        _ => None,
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Sorted allow-list; empty means discover containers on every request.
    pub containers: Vec<String>,
    pub tail: u64,
    pub timestamps: bool,
    pub inspect: bool,
    pub health: bool,
    pub port: u16,
    pub command_timeout: Duration,
}

impl Config {
    /// Read once at startup. Every parse failure falls back to a default with
    /// an informational log line; the process always starts.
    pub fn from_env() -> Self {
        let containers = env::var("CONTAINER_LIST")
            .map(|raw| parse_container_list(&raw))
            .unwrap_or_default();
        if containers.is_empty() {
            log::info!(
                "Since no valid \"CONTAINER_LIST\" was given ALL containers logs will be available"
            );
        } else {
            log::info!(
                "These containers logs are available: {}",
                containers.join(", ")
            );
        }

        let tail = env::var("TAIL")
            .ok()
            .and_then(|v| parse_tail(&v))
            .unwrap_or(DEFAULT_TAIL);
        log::info!("Default log tail will be {tail} lines");

        let timestamps = env_flag("TIMESTAMPS");
        log::info!("Log timestamps default to {timestamps}");

        let inspect = env_flag("INSPECT");
        log::info!("Inspect route enabled: {inspect}");

        let health = env_flag("HEALTH");
        log::info!("Health route enabled: {health}");

        let port = env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_PORT);
        log::info!("Listening on port {port}");

        let timeout_secs = env::var("COMMAND_TIMEOUT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_COMMAND_TIMEOUT_SECS);
        log::info!("Docker commands time out after {timeout_secs}s");

        Self {
            containers,
            tail,
            timestamps,
            inspect,
            health,
            port,
            command_timeout: Duration::from_secs(timeout_secs),
        }
    }
}

fn env_flag(name: &str) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| parse_bool_token(&v))
        .unwrap_or(false)
}
