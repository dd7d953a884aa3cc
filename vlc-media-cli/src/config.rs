//! Database location resolution.
//!
//! The store itself takes an explicit path; defaults live only here, at the
//! CLI entry point.

use std::io;
use std::path::{Path, PathBuf};

/// Directory name under the platform config dir.
const APP_DIR: &str = "vlc-media";

/// Database file name used when nothing else is configured.
const DATABASE_FILE: &str = "vlc_media.db";

/// Canonical path to the settings file: `~/.config/vlc-media/settings.toml`.
pub(crate) fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join(APP_DIR).join("settings.toml")
}

/// Resolve the database path using a priority chain:
///
/// 1. CLI override (if `Some`)
/// 2. `store.db_path` in `settings.toml`
/// 3. `vlc_media.db` next to the running executable
pub(crate) fn resolve_db_path(cli_override: Option<PathBuf>) -> PathBuf {
    if let Some(p) = cli_override {
        return p;
    }
    if let Some(p) = load_db_path() {
        return p;
    }
    default_db_path()
}

/// Read `store.db_path` from `settings.toml`, if set.
fn load_db_path() -> Option<PathBuf> {
    let path = settings_path();
    let contents = std::fs::read_to_string(&path).ok()?;
    let db_path = db_path_from_settings(&contents);
    if db_path.is_none() {
        log::debug!("No store.db_path in {}", path.display());
    }
    db_path
}

/// Extract `store.db_path` from settings TOML text.
pub(crate) fn db_path_from_settings(contents: &str) -> Option<PathBuf> {
    let doc: toml::Value = match contents.parse() {
        Ok(doc) => doc,
        Err(e) => {
            log::warn!("Ignoring malformed settings.toml: {}", e);
            return None;
        }
    };
    let db_path = doc.get("store")?.get("db_path")?.as_str()?;
    if db_path.is_empty() {
        None
    } else {
        Some(PathBuf::from(db_path))
    }
}

/// `vlc_media.db` beside the executable, or in the current directory.
fn default_db_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DATABASE_FILE)
}

/// Create the directory that will hold the database file.
pub(crate) fn ensure_parent_dir(db_path: &Path) -> io::Result<()> {
    match db_path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => std::fs::create_dir_all(dir),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_override_wins() {
        let p = PathBuf::from("/tmp/custom.db");
        assert_eq!(resolve_db_path(Some(p.clone())), p);
    }

    #[test]
    fn default_path_uses_database_file_name() {
        assert!(default_db_path().ends_with(DATABASE_FILE));
    }

    #[test]
    fn settings_db_path_is_read() {
        let toml = "[store]\ndb_path = \"/srv/media/vlc.db\"\n";
        assert_eq!(
            db_path_from_settings(toml),
            Some(PathBuf::from("/srv/media/vlc.db"))
        );
    }

    #[test]
    fn settings_without_db_path_are_ignored() {
        assert_eq!(db_path_from_settings(""), None);
        assert_eq!(db_path_from_settings("[store]\ndb_path = \"\"\n"), None);
        assert_eq!(db_path_from_settings("[other]\nkey = 1\n"), None);
        assert_eq!(db_path_from_settings("not = [valid"), None);
    }

    #[test]
    fn parent_dir_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("nested").join("deeper").join("media.db");
        ensure_parent_dir(&db).unwrap();
        assert!(db.parent().unwrap().is_dir());
        ensure_parent_dir(Path::new("bare.db")).unwrap();
    }
}
