//! # pdfium-locate
//!
//! Find a [PDFium](https://pdfium.googlesource.com/pdfium/) shared library
//! on the local machine and bind `pdfium-render` to it, reporting a typed
//! error instead of panicking when no library can be loaded.
//!
//! `Pdfium::default()` panics when the library is missing. Callers that must
//! treat a missing engine as an ordinary, reportable condition use [`bind`]
//! instead.
//!
//! ## Search order
//!
//! 1. An explicit path handed to [`bind`] / [`find_library`].
//! 2. `PDFIUM_LIB_PATH`: path to an existing library file.
//! 3. The per-user cache directory, see [`pdfium_cache_dir`].
//! 4. The directory containing the running executable.
//! 5. The operating system's library search path.
//!
//! Steps 1 and 2 are strict: a configured path that does not exist is an
//! error, not a silent fall-through.
//!
//! ```rust,no_run
//! let pdfium = pdfium_locate::bind(None).expect("PDFium unavailable");
//! ```

use std::path::{Path, PathBuf};

use pdfium_render::prelude::Pdfium;
use thiserror::Error;

// ── Public constants ─────────────────────────────────────────────────────────

/// Environment variable pointing at an existing pdfium library file.
pub const LIB_PATH_ENV: &str = "PDFIUM_LIB_PATH";

/// Environment variable overriding the cache directory searched for pdfium.
pub const CACHE_DIR_ENV: &str = "PDFIUM_CACHE_DIR";

// ── Error type ───────────────────────────────────────────────────────────────

/// Errors returned while locating or binding PDFium.
#[derive(Error, Debug)]
pub enum LocateError {
    /// The current OS has no known pdfium library file name.
    #[error("Unsupported platform: {os}/{arch}")]
    UnsupportedPlatform { os: String, arch: String },

    /// A configured library path does not exist.
    #[error("PDFium library not found at '{path}'")]
    NotFound { path: PathBuf },

    /// `pdfium-render` could not load the library at `path`.
    #[error("Failed to bind PDFium from '{path}': {reason}")]
    Bind { path: PathBuf, reason: String },

    /// No candidate file existed and the system library could not be loaded.
    #[error("Failed to bind the system PDFium library: {reason}")]
    BindSystem { reason: String },
}

// ── Platform metadata ────────────────────────────────────────────────────────

/// File name of the pdfium shared library on the current platform.
pub fn platform_library_name() -> Result<&'static str, LocateError> {
    library_name_for(std::env::consts::OS, std::env::consts::ARCH)
}

fn library_name_for(os: &str, arch: &str) -> Result<&'static str, LocateError> {
    match os {
        "macos" => Ok("libpdfium.dylib"),
        "linux" | "freebsd" | "android" => Ok("libpdfium.so"),
        "windows" => Ok("pdfium.dll"),
        _ => Err(LocateError::UnsupportedPlatform {
            os: os.to_string(),
            arch: arch.to_string(),
        }),
    }
}

// ── Cache directory resolution ───────────────────────────────────────────────

/// Directory searched for a user-installed pdfium library.
///
/// Default locations:
/// - **macOS**: `~/Library/Caches/pdftokens/pdfium/`
/// - **Linux**: `~/.cache/pdftokens/pdfium/`
/// - **Windows**: `%LOCALAPPDATA%\pdftokens\pdfium\`
///
/// Override by setting `PDFIUM_CACHE_DIR`.
pub fn pdfium_cache_dir() -> PathBuf {
    if let Ok(override_dir) = std::env::var(CACHE_DIR_ENV) {
        if !override_dir.is_empty() {
            return PathBuf::from(override_dir);
        }
    }

    let base = dirs::cache_dir()
        .or_else(|| dirs::home_dir().map(|h| h.join(".cache")))
        .unwrap_or_else(std::env::temp_dir);

    base.join("pdftokens").join("pdfium")
}

// ── Public API ───────────────────────────────────────────────────────────────

/// Resolve the pdfium library file to load.
///
/// Returns `Ok(None)` when no candidate file exists, meaning the caller
/// should fall back to the system library search path.
pub fn find_library(explicit: Option<&Path>) -> Result<Option<PathBuf>, LocateError> {
    if let Some(path) = explicit {
        return strict_candidate(path).map(Some);
    }

    if let Ok(env_path) = std::env::var(LIB_PATH_ENV) {
        if !env_path.is_empty() {
            return strict_candidate(Path::new(&env_path)).map(Some);
        }
    }

    let lib_name = platform_library_name()?;
    Ok(search_dirs()
        .into_iter()
        .map(|dir| dir.join(lib_name))
        .find(|candidate| candidate.is_file()))
}

/// Bind to PDFium using the search order described in the crate docs.
pub fn bind(explicit: Option<&Path>) -> Result<Pdfium, LocateError> {
    match find_library(explicit)? {
        Some(path) => bind_from_path(&path),
        None => Pdfium::bind_to_system_library()
            .map(Pdfium::new)
            .map_err(|e| LocateError::BindSystem {
                reason: e.to_string(),
            }),
    }
}

/// Bind to a PDFium library at an explicit `path`.
pub fn bind_from_path(path: &Path) -> Result<Pdfium, LocateError> {
    Pdfium::bind_to_library(path)
        .map(Pdfium::new)
        .map_err(|e| LocateError::Bind {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
}

// ── Internal helpers ─────────────────────────────────────────────────────────

/// A configured path may name the library file itself or its directory.
fn strict_candidate(path: &Path) -> Result<PathBuf, LocateError> {
    if path.is_dir() {
        let file = path.join(platform_library_name()?);
        if file.is_file() {
            return Ok(file);
        }
        return Err(LocateError::NotFound { path: file });
    }
    if path.is_file() {
        return Ok(path.to_path_buf());
    }
    Err(LocateError::NotFound {
        path: path.to_path_buf(),
    })
}

fn search_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![pdfium_cache_dir()];
    if let Some(exe_dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        dirs.push(exe_dir);
    }
    dirs
}

// ── Tests ─────────────────────────────────────────────────────────────────────
