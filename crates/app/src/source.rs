use std::fmt;
use std::path::{Path, PathBuf};

use storage::Storage;

use crate::args::SourceArgs;

#[derive(Debug)]
pub enum SourceError {
    InvalidDbUrl { raw: String },
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
        }
    }
}

impl std::error::Error for SourceError {}

/// Open the question-set store selected on the command line.
///
/// A SQLite URL wins over the data directory. The database file is created
/// and migrated before use.
pub async fn open(args: &SourceArgs) -> Result<Storage, Box<dyn std::error::Error>> {
    match &args.db_url {
        Some(raw) => {
            let db_url = normalize_sqlite_url(raw, &current_dir());
            prepare_sqlite_file(&db_url)?;
            tracing::info!(db = %db_url, "using SQLite question bank");
            Ok(Storage::sqlite(&db_url).await?)
        }
        None => {
            tracing::info!(dir = %args.data_dir.display(), "using JSON data directory");
            Ok(Storage::json_dir(args.data_dir.clone()))
        }
    }
}

fn current_dir() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

/// Turn `bank.sqlite`, `sqlite:bank.sqlite` or an absolute path into an
/// absolute `sqlite://` URL resolved against `base`.
pub fn normalize_sqlite_url(raw: &str, base: &Path) -> String {
    let trimmed = raw.trim();
    if trimmed == "sqlite::memory:" || trimmed.starts_with("sqlite://") {
        return trimmed.to_owned();
    }

    let path_str = trimmed.strip_prefix("sqlite:").unwrap_or(trimmed);
    let path = Path::new(path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    };
    format!("sqlite://{}", absolute.display())
}

/// Create the database file and its parent directories if missing.
pub fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| SourceError::InvalidDbUrl {
            raw: db_url.to_owned(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(SourceError::InvalidDbUrl {
            raw: db_url.to_owned(),
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_paths_become_absolute_urls() {
        let base = Path::new("/srv/exams");
        assert_eq!(
            normalize_sqlite_url("bank.sqlite", base),
            "sqlite:///srv/exams/bank.sqlite"
        );
        assert_eq!(
            normalize_sqlite_url("sqlite:db/bank.sqlite", base),
            "sqlite:///srv/exams/db/bank.sqlite"
        );
        assert_eq!(
            normalize_sqlite_url("/tmp/bank.sqlite", base),
            "sqlite:///tmp/bank.sqlite"
        );
        assert_eq!(normalize_sqlite_url(" sqlite::memory: ", base), "sqlite::memory:");
    }

    #[test]
    fn prepare_creates_missing_file_and_parents() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("nested").join("bank.sqlite");
        let url = format!("sqlite://{}", file.display());

        prepare_sqlite_file(&url).unwrap();
        assert!(file.exists());
        prepare_sqlite_file(&url).unwrap();
    }

    #[test]
    fn prepare_rejects_non_file_urls() {
        assert!(prepare_sqlite_file("postgres://nope").is_err());
        assert!(prepare_sqlite_file("sqlite://").is_err());
        assert!(prepare_sqlite_file("sqlite::memory:").is_ok());
    }
}
