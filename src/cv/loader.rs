// src/cv/loader.rs
use std::path::{Path, PathBuf};

use tokio::task::JoinSet;

use crate::cv::models::RawDocument;
use crate::utils::error::LoadError;

// Lattes exports are plain text; anything else in a directory is ignored.
const CV_EXTENSION: &str = "txt";
const UTF8_BOM: &str = "\u{feff}";

/// Expands the command-line inputs into a list of files.
/// Directories contribute their `*.txt` files in sorted order; plain files are kept as given.
/// An input that cannot be inspected stays in the list so loading reports it by name.
pub async fn expand_inputs(inputs: &[PathBuf]) -> Result<Vec<PathBuf>, LoadError> {
    let mut files = Vec::new();

    for input in inputs {
        let is_dir = match tokio::fs::metadata(input).await {
            Ok(metadata) => metadata.is_dir(),
            Err(e) => {
                tracing::warn!("Cannot inspect input {}: {}", input.display(), e);
                false
            }
        };

        if !is_dir {
            files.push(input.clone());
            continue;
        }

        match list_cv_files(input).await {
            Ok(found) => {
                tracing::debug!("Directory {} contributed {} CV files", input.display(), found.len());
                files.extend(found);
            }
            Err(e) => {
                tracing::warn!("Cannot list directory {}: {}", input.display(), e);
                files.push(input.clone());
            }
        }
    }

    if files.is_empty() {
        return Err(LoadError::EmptyInput);
    }

    Ok(files)
}

async fn list_cv_files(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    let mut entries = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        let is_cv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case(CV_EXTENSION))
            .unwrap_or(false);
        if is_cv {
            found.push(path);
        }
    }
    found.sort();
    Ok(found)
}

/// Reads every file concurrently and returns one result per file, in input order.
/// A failing file yields an error naming it; the others still load.
pub async fn load_documents(paths: &[PathBuf]) -> Vec<Result<RawDocument, LoadError>> {
    let mut set = JoinSet::new();

    for (index, path) in paths.iter().cloned().enumerate() {
        set.spawn(async move {
            let result = read_document(&path).await;
            (index, result)
        });
    }

    let mut slots: Vec<Option<Result<RawDocument, LoadError>>> = (0..paths.len()).map(|_| None).collect();
    while let Some(joined) = set.join_next().await {
        match joined {
            Ok((index, result)) => slots[index] = Some(result),
            Err(e) => tracing::error!("Document loading task failed: {}", e),
        }
    }

    // Barrier: every slot is filled unless a task panicked.
    slots
        .into_iter()
        .zip(paths)
        .map(|(slot, path)| {
            slot.unwrap_or_else(|| {
                Err(LoadError::Io {
                    file: display_name(path),
                    source: std::io::Error::new(std::io::ErrorKind::Other, "loading task aborted"),
                })
            })
        })
        .collect()
}

async fn read_document(path: &Path) -> Result<RawDocument, LoadError> {
    let file_name = display_name(path);
    let bytes = tokio::fs::read(path).await.map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => LoadError::NotFound(path.to_path_buf()),
        _ => LoadError::Io {
            file: file_name.clone(),
            source: e,
        },
    })?;

    let text = decode_text(&file_name, bytes);
    tracing::debug!("Loaded {} ({} chars)", file_name, text.chars().count());

    Ok(RawDocument::new(file_name, text))
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// UTF-8 with an optional byte-order mark; falls back to Latin-1 for legacy exports.
fn decode_text(file_name: &str, bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => match text.strip_prefix(UTF8_BOM) {
            Some(stripped) => stripped.to_string(),
            None => text,
        },
        Err(e) => {
            tracing::warn!("{} is not valid UTF-8, decoding as Latin-1", file_name);
            e.into_bytes().into_iter().map(char::from).collect()
        }
    }
}
