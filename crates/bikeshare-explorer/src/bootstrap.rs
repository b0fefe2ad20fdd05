use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// ── Directory bootstrap ────────────────────────────────────────────────────────

/// Ensure the `~/.bikeshare-explorer/` configuration directory exists.
pub fn ensure_directories() -> anyhow::Result<()> {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(home.join(".bikeshare-explorer"))?;
    Ok(())
}

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Initialise the global `tracing` subscriber.
///
/// `log_level` is mapped to a [`tracing_subscriber::EnvFilter`] directive,
/// falling back to `"info"` if the level string is not recognised. Output goes
/// to stderr so log lines never interleave with the interactive prompts on
/// stdout.
pub fn setup_logging(log_level: &str) -> anyhow::Result<()> {
    let normalised = match log_level.to_uppercase().as_str() {
        "DEBUG" => "debug",
        "INFO" => "info",
        "WARNING" => "warn",
        "ERROR" => "error",
        other => return setup_with_directive(&other.to_lowercase()),
    };
    setup_with_directive(normalised)
}

fn setup_with_directive(directive: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("info"));

    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false);

    tracing_subscriber::registry().with(filter).with(layer).init();

    Ok(())
}

// ── Data-directory discovery ───────────────────────────────────────────────────

/// Pick the directory holding the city CSVs.
///
/// An explicit override always wins. Otherwise the first existing candidate
/// is used, falling back to the current directory:
/// 1. `./data/`
/// 2. `~/bikeshare-data/`
/// 3. `.`
pub fn discover_data_dir(override_dir: Option<&Path>) -> PathBuf {
    if let Some(dir) = override_dir {
        return dir.to_path_buf();
    }

    let mut candidates = vec![PathBuf::from("data")];
    if let Some(home) = dirs::home_dir() {
        candidates.push(home.join("bikeshare-data"));
    }

    candidates
        .into_iter()
        .find(|p| p.is_dir())
        .unwrap_or_else(|| PathBuf::from("."))
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_discover_data_dir_explicit_override_wins() {
        let dir = discover_data_dir(Some(Path::new("/srv/bikeshare")));
        assert_eq!(dir, PathBuf::from("/srv/bikeshare"));
    }

    #[test]
    fn test_discover_data_dir_override_used_even_when_missing() {
        // The loader reports per-file errors; discovery does not second-guess
        // an explicit choice.
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("nope");
        assert_eq!(discover_data_dir(Some(&missing)), missing);
    }

    #[test]
    fn test_ensure_directories() {
        let tmp = TempDir::new().expect("tempdir");

        // Override HOME so that dirs::home_dir() resolves to our temp dir.
        let original_home = std::env::var_os("HOME");
        std::env::set_var("HOME", tmp.path());

        let result = ensure_directories();

        // Restore HOME.
        match original_home {
            Some(v) => std::env::set_var("HOME", v),
            None => std::env::remove_var("HOME"),
        }

        result.expect("ensure_directories should succeed");
        assert!(tmp.path().join(".bikeshare-explorer").is_dir());
    }
}
