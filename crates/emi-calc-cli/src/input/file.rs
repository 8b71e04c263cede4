use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

/// Structured document formats accepted on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// `.yaml`/`.yml` read as YAML, anything else as JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                DocumentFormat::Yaml
            }
            _ => DocumentFormat::Json,
        }
    }
}

/// Read a JSON or YAML file, choosing the parser from the extension.
pub fn read_document<T: DeserializeOwned>(path: &str) -> Result<T, Box<dyn std::error::Error>> {
    let canonical = resolve_path(path)?;
    let contents = read_contents(&canonical)?;
    parse(&canonical, &contents, DocumentFormat::from_path(&canonical))
}

fn read_contents(path: &Path) -> Result<String, Box<dyn std::error::Error>> {
    Ok(fs::read_to_string(path)
        .map_err(|e| format!("Failed to read '{}': {}", path.display(), e))?)
}

fn parse<T: DeserializeOwned>(
    path: &Path,
    contents: &str,
    format: DocumentFormat,
) -> Result<T, Box<dyn std::error::Error>> {
    log::debug!("parsing {} as {:?}", path.display(), format);
    let value = match format {
        DocumentFormat::Json => serde_json::from_str(contents)
            .map_err(|e| format!("Failed to parse '{}': {}", path.display(), e))?,
        DocumentFormat::Yaml => serde_yaml::from_str(contents)
            .map_err(|e| format!("Failed to parse '{}': {}", path.display(), e))?,
    };
    Ok(value)
}

/// Absolute path to an existing regular file, relative paths taken from the working directory.
fn resolve_path(path: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    // Joining an absolute path replaces the base
    let candidate = std::env::current_dir()?.join(path);
    match fs::metadata(&candidate) {
        Ok(meta) if meta.is_file() => Ok(candidate),
        Ok(_) => Err(format!("Not a file: {}", candidate.display()).into()),
        Err(_) => Err(format!("File not found: {}", candidate.display()).into()),
    }
}
