use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::{error, info};
use unicode_normalization::UnicodeNormalization;
use uuid::Uuid;

const FALLBACK_FILENAME: &str = "imagen";

// NOTE: expect() is acceptable here: the pattern is a literal
static UNSAFE_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_.-]").expect("Invalid regex: unsafe filename chars"));

/// Reduces a client-supplied filename to a safe basename.
///
/// Accents are folded to their ASCII base letter (`á` becomes `a`), other
/// non-ASCII characters are dropped. Keeps ASCII letters, digits, `.`, `_`
/// and `-`; whitespace becomes `_`; path components and leading or trailing
/// dots and underscores are dropped.
pub fn secure_filename(raw: &str) -> String {
    let basename = raw.rsplit(['/', '\\']).next().unwrap_or_default();
    let folded: String = basename.nfkd().filter(char::is_ascii).collect();
    let joined = folded.split_whitespace().collect::<Vec<_>>().join("_");
    let cleaned = UNSAFE_CHARS.replace_all(&joined, "");
    let trimmed = cleaned.trim_matches(['.', '_']);

    if trimmed.is_empty() {
        FALLBACK_FILENAME.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Directory that holds uploads while they are being processed.
#[derive(Debug, Clone)]
pub struct UploadStore {
    root: PathBuf,
}

impl UploadStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Creates the upload directory if it does not exist.
    pub fn init(&self) -> Result<(), std::io::Error> {
        if !self.root.exists() {
            info!("Creating upload directory: {:?}", self.root);
            fs::create_dir_all(&self.root)?;
        }
        Ok(())
    }

    /// Writes the bytes under a unique name. The file is deleted when the guard drops.
    ///
    /// The write is synchronous so no await point sits between creating the
    /// file and handing out its guard. Buffers are capped by the route's body
    /// limit.
    pub fn store(&self, filename: &str, data: &[u8]) -> Result<TempUpload, std::io::Error> {
        let path = self.root.join(format!("{}_{}", Uuid::new_v4().simple(), filename));
        let guard = TempUpload { path };
        fs::write(&guard.path, data)?;
        Ok(guard)
    }
}

/// Owns an uploaded file on disk for the lifetime of a request.
#[derive(Debug)]
pub struct TempUpload {
    path: PathBuf,
}

impl TempUpload {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempUpload {
    fn drop(&mut self) {
        if !self.path.exists() {
            return;
        }
        match fs::remove_file(&self.path) {
            Ok(_) => info!("Temporary upload removed: {:?}", self.path),
            Err(e) => error!("Failed to remove temporary upload {:?}: {}", self.path, e),
        }
    }
}
