//! Server configuration.

use std::path::{Path, PathBuf};

/// Default address the API binds to.
pub const DEFAULT_BIND: &str = "127.0.0.1:5173";

/// Configuration for the library server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Directory holding one subdirectory per manga.
    pub library_root: PathBuf,

    /// Address to bind the HTTP server.
    pub bind: String,

    /// Optional directory of static client assets.
    pub public_dir: Option<PathBuf>,
}

impl ServerConfig {
    /// Create a config for `library_root` with default bind and no assets.
    pub fn new(library_root: PathBuf) -> Self {
        Self {
            library_root: absolute(&library_root),
            bind: DEFAULT_BIND.to_string(),
            public_dir: None,
        }
    }

    /// Set the bind address.
    pub fn with_bind(mut self, bind: impl Into<String>) -> Self {
        self.bind = bind.into();
        self
    }

    /// Serve static assets from `dir`.
    pub fn with_public_dir(mut self, dir: PathBuf) -> Self {
        self.public_dir = Some(dir);
        self
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        let library_root = directories::ProjectDirs::from("org", "tankobon", "tankobon")
            .map(|d| d.data_dir().join("library"))
            .unwrap_or_else(|| PathBuf::from("library"));

        Self::new(library_root)
    }
}

/// Make `path` absolute: canonical when it exists, otherwise joined onto
/// the working directory.
fn absolute(path: &Path) -> PathBuf {
    if let Ok(canonical) = std::fs::canonicalize(path) {
        return canonical;
    }
    if path.is_absolute() {
        return path.to_path_buf();
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .unwrap_or_else(|_| path.to_path_buf())
}
