//! Loading of schema text from files, directories and URLs.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

const SCHEMA_EXTENSIONS: [&str; 2] = ["graphqls", "graphql"];

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to fetch {url}: {source}")]
    Fetch { url: String, source: reqwest::Error },
    #[error("no .graphqls or .graphql files in {}", path.display())]
    EmptyDirectory { path: PathBuf },
}

/// A schema document and where it came from.
#[derive(Debug)]
pub struct SchemaSource {
    pub origin: String,
    pub text: String,
}

fn is_url(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

fn is_schema_file(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| SCHEMA_EXTENSIONS.contains(&ext))
}

fn read_file(path: &Path) -> Result<SchemaSource, SourceError> {
    debug!(path = %path.display(), "reading schema file");
    let text = std::fs::read_to_string(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(SchemaSource {
        origin: path.display().to_string(),
        text,
    })
}

/// Every schema file directly inside `dir`, sorted by file name.
fn read_dir(dir: &Path) -> Result<Vec<SchemaSource>, SourceError> {
    let io_error = |source| SourceError::Io {
        path: dir.to_path_buf(),
        source,
    };
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_error)? {
        let path = entry.map_err(io_error)?.path();
        if is_schema_file(&path) {
            paths.push(path);
        }
    }
    if paths.is_empty() {
        return Err(SourceError::EmptyDirectory {
            path: dir.to_path_buf(),
        });
    }
    paths.sort();
    paths.iter().map(|path| read_file(path)).collect()
}

fn fetch(url: &str) -> Result<SchemaSource, SourceError> {
    info!(url, "fetching schema");
    let fetch_error = |source| SourceError::Fetch {
        url: url.to_string(),
        source,
    };
    let text = reqwest::blocking::get(url)
        .and_then(|response| response.error_for_status())
        .and_then(|response| response.text())
        .map_err(fetch_error)?;
    Ok(SchemaSource {
        origin: url.to_string(),
        text,
    })
}

/// Loads every input in order. Directories expand to their schema files.
pub fn load(inputs: &[String]) -> Result<Vec<SchemaSource>, SourceError> {
    let mut sources = Vec::new();
    for input in inputs {
        if is_url(input) {
            sources.push(fetch(input)?);
            continue;
        }
        let path = Path::new(input);
        if path.is_dir() {
            sources.extend(read_dir(path)?);
        } else {
            sources.push(read_file(path)?);
        }
    }
    info!(count = sources.len(), "loaded schema sources");
    Ok(sources)
}
