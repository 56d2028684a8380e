//! Lecture loader: turns lecture files into one text blob for the prompt.
//!
//! `.pdf` files are text-extracted, everything else is read as UTF-8 (invalid
//! sequences are replaced, not rejected). Office containers and other binary files are
//! refused rather than passed to the model as noise. Several files are joined with a
//! `=== <file name> ===` header before each.

use std::path::Path;

use tracing::{debug, info, warn};

use crate::errors::AppError;

/// Zip-based office formats; their text is not readable without unpacking.
const UNSUPPORTED_EXTENSIONS: [&str; 6] = ["docx", "doc", "pptx", "ppt", "odt", "xlsx"];

/// Reads one lecture file as text.
pub fn extract_text(path: &Path) -> Result<String, AppError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    if UNSUPPORTED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(load_error(
            path,
            format!("unsupported .{extension} file; export it as .pdf or .txt first"),
        ));
    }

    let bytes = std::fs::read(path).map_err(|e| load_error(path, e))?;
    let is_pdf = extension == "pdf";

    let text = if is_pdf {
        pdf_extract::extract_text_from_mem(&bytes).map_err(|e| load_error(path, e))?
    } else if bytes.contains(&0) {
        return Err(load_error(path, "file is binary, not text"));
    } else {
        String::from_utf8_lossy(&bytes).into_owned()
    };

    debug!(path = %path.display(), chars = text.len(), pdf = is_pdf, "extracted lecture text");
    Ok(text)
}

/// Loads and concatenates all lecture files. Fails if nothing readable is left.
pub fn load_lecture<P: AsRef<Path>>(paths: &[P]) -> Result<String, AppError> {
    if paths.is_empty() {
        return Err(AppError::Validation("no lecture files given".to_string()));
    }

    let mut sections = Vec::with_capacity(paths.len());
    for path in paths {
        let path = path.as_ref();
        let text = extract_text(path)?;
        if text.trim().is_empty() {
            warn!(path = %path.display(), "lecture file has no text");
            continue;
        }
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        sections.push(format!("=== {name} ===\n{}", text.trim()));
    }

    if sections.is_empty() {
        return Err(AppError::Validation(
            "lecture files contain no text".to_string(),
        ));
    }

    let combined = sections.join("\n\n");
    info!(files = sections.len(), chars = combined.len(), "loaded lecture material");
    Ok(combined)
}

fn load_error(path: &Path, err: impl std::fmt::Display) -> AppError {
    AppError::LectureLoad {
        path: path.display().to_string(),
        message: err.to_string(),
    }
}
