//! Uploaded files: copied under the media root and referenced by their
//! relative path.

use crate::errors::{AppError, AppResult};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Longest path an image column accepts.
pub const MAX_PATH_LEN: usize = 511;

/// Copy `source` into `<media_root>/<upload_to>/<uuid>.<ext>` and return the
/// path relative to the media root, always with `/` separators.
pub fn store_upload(media_root: &Path, upload_to: &str, source: &Path) -> AppResult<String> {
    if !source.is_file() {
        return Err(AppError::InvalidInput(format!(
            "Uploaded file not found: {}",
            source.display()
        )));
    }

    let ext = source
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    let file_name = if ext.is_empty() {
        Uuid::new_v4().to_string()
    } else {
        format!("{}.{}", Uuid::new_v4(), ext)
    };

    let relative = format!("{}/{}", upload_to.trim_matches('/'), file_name);
    if relative.len() > MAX_PATH_LEN {
        return Err(AppError::InvalidInput(format!(
            "Stored path is longer than {} characters",
            MAX_PATH_LEN
        )));
    }

    let dest_dir = media_root.join(upload_to.trim_matches('/'));
    fs::create_dir_all(&dest_dir)?;
    fs::copy(source, dest_dir.join(&file_name))?;

    log::debug!("stored upload {} as {}", source.display(), relative);
    Ok(relative)
}

/// Store a batch of uploads, each under the folder `upload_to` picks for its
/// slot. All or nothing: when one copy fails the ones before it are removed.
pub fn store_uploads<S: Copy>(
    media_root: &Path,
    uploads: &[(S, PathBuf)],
    upload_to: impl Fn(S) -> &'static str,
) -> AppResult<Vec<(S, String)>> {
    let mut stored = Vec::with_capacity(uploads.len());
    for (slot, source) in uploads {
        match store_upload(media_root, upload_to(*slot), source) {
            Ok(relative) => stored.push((*slot, relative)),
            Err(e) => {
                discard_uploads(media_root, stored.iter().map(|(_, p)| p.as_str()));
                return Err(e);
            }
        }
    }
    Ok(stored)
}

/// Remove stored files that ended up referenced by nothing.
pub fn discard_uploads<'a>(media_root: &Path, relative: impl IntoIterator<Item = &'a str>) {
    for rel in relative {
        if let Err(e) = fs::remove_file(media_root.join(rel)) {
            log::warn!("could not remove orphan upload {}: {}", rel, e);
        }
    }
}
