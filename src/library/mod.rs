//! Library index over a `manga/chapter/page` directory tree.
//!
//! Every listing is recomputed from disk on each call. Nothing is cached,
//! so a change to the tree shows up on the next listing and repeated
//! listings of an unchanged directory always come back in the same order.
//!
//! The listing methods are blocking. Async callers go through
//! [`LibraryIndex::run_blocking`], which moves the walk onto tokio's
//! blocking pool instead of stalling the reactor.

pub mod media;
pub mod natural;
pub mod path_guard;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::fs::File;
use tracing::{debug, warn};

pub use path_guard::{PathGuard, PathTraversalError};

/// Errors from library lookups.
#[derive(Error, Debug)]
pub enum LibraryError {
    /// A required identifier was missing or blank.
    #[error("{0}")]
    BadRequest(String),

    #[error("bad path: {0}")]
    BadPath(#[from] PathTraversalError),

    /// The target does not exist or has the wrong type.
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("blocking task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, LibraryError>;

/// An opened page file ready to stream.
#[derive(Debug)]
pub struct OpenedPage {
    /// Open handle on the page.
    pub file: File,

    /// Content type derived from the file extension.
    pub content_type: &'static str,

    /// File size in bytes.
    pub len: u64,
}

/// Ordered views of the library tree.
#[derive(Debug, Clone)]
pub struct LibraryIndex {
    guard: PathGuard,
}

impl LibraryIndex {
    /// Create an index rooted at `root`.
    ///
    /// The root is canonicalized when it exists so that symlink checks
    /// compare like with like. A missing root is kept as given and simply
    /// lists as empty.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let root = fs::canonicalize(&root).unwrap_or(root);
        Self {
            guard: PathGuard::new(root),
        }
    }

    /// The library root.
    pub fn root(&self) -> &Path {
        self.guard.root()
    }

    /// List manga titles (directories directly under the root).
    ///
    /// A missing root, or a root that is not a directory, lists as empty.
    pub fn list_manga(&self) -> Result<Vec<String>> {
        let root = self.root();
        match fs::metadata(root) {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => {
                debug!(root = %root.display(), "Library root is not a directory");
                return Ok(Vec::new());
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(root = %root.display(), "Library root does not exist");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        }

        let mut manga = list_entries(root, |meta| meta.is_dir())?;
        natural::sort(&mut manga);
        debug!(count = manga.len(), "Listed manga");
        Ok(manga)
    }

    /// List the chapters of one manga.
    pub fn list_chapters(&self, manga: &str) -> Result<Vec<String>> {
        let manga = required(manga, "manga is required")?;
        let dir = self.existing(&[manga], Kind::Dir, "manga")?;

        let mut chapters = list_entries(&dir, |meta| meta.is_dir())?;
        natural::sort(&mut chapters);
        debug!(manga = %manga, count = chapters.len(), "Listed chapters");
        Ok(chapters)
    }

    /// List the page files of one chapter in reading order.
    pub fn list_pages(&self, manga: &str, chapter: &str) -> Result<Vec<String>> {
        let manga = required(manga, "manga and chapter are required")?;
        let chapter = required(chapter, "manga and chapter are required")?;
        let dir = self.existing(&[manga, chapter], Kind::Dir, "chapter")?;

        let mut pages: Vec<String> = list_entries(&dir, |meta| meta.is_file())?
            .into_iter()
            .filter(|name| media::is_image_file(name))
            .collect();
        natural::sort(&mut pages);
        debug!(manga = %manga, chapter = %chapter, count = pages.len(), "Listed pages");
        Ok(pages)
    }

    /// Resolve one page file on disk without opening it.
    pub fn locate_page(&self, manga: &str, chapter: &str, file: &str) -> Result<PathBuf> {
        let manga = required(manga, "missing params")?;
        let chapter = required(chapter, "missing params")?;
        let file = required(file, "missing params")?;
        self.existing(&[manga, chapter, file], Kind::File, "page")
    }

    /// Open one page file for streaming.
    pub async fn open_page(&self, manga: &str, chapter: &str, file: &str) -> Result<OpenedPage> {
        let path = {
            let (manga, chapter, file) = (manga.to_owned(), chapter.to_owned(), file.to_owned());
            self.run_blocking(move |index| index.locate_page(&manga, &chapter, &file))
                .await?
        };

        let handle = File::open(&path).await.map_err(not_found_or_io("page"))?;
        let len = handle.metadata().await?.len();

        Ok(OpenedPage {
            file: handle,
            content_type: media::content_type_for(file),
            len,
        })
    }

    /// Run a blocking lookup on tokio's blocking pool.
    pub async fn run_blocking<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&LibraryIndex) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let index = self.clone();
        tokio::task::spawn_blocking(move || f(&index)).await?
    }

    /// Resolve `segments` one library level each, require the target to
    /// exist with the given kind, then confirm the canonical target is
    /// still inside the root.
    fn existing(&self, segments: &[&str], kind: Kind, what: &'static str) -> Result<PathBuf> {
        let path = self.guard.resolve_entry(segments)?;

        let meta = fs::metadata(&path).map_err(not_found_or_io(what))?;
        let matches = match kind {
            Kind::Dir => meta.is_dir(),
            Kind::File => meta.is_file(),
        };
        if !matches {
            return Err(LibraryError::NotFound(what));
        }

        let canonical = fs::canonicalize(&path)?;
        if let Err(e) = self.guard.confine(&canonical) {
            warn!(path = %path.display(), "Symlink points outside the library");
            return Err(e.into());
        }
        Ok(canonical)
    }
}

#[derive(Clone, Copy)]
enum Kind {
    Dir,
    File,
}

fn required<'a>(value: &'a str, message: &str) -> Result<&'a str> {
    if value.trim().is_empty() {
        Err(LibraryError::BadRequest(message.to_string()))
    } else {
        Ok(value)
    }
}

fn not_found_or_io(what: &'static str) -> impl Fn(io::Error) -> LibraryError {
    move |e| {
        if e.kind() == io::ErrorKind::NotFound {
            LibraryError::NotFound(what)
        } else {
            LibraryError::Io(e)
        }
    }
}

/// Names of entries in `dir` whose followed metadata passes `keep`.
///
/// Entries that vanish mid-walk or whose names are not UTF-8 are skipped.
fn list_entries(dir: &Path, keep: impl Fn(&fs::Metadata) -> bool) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = match entry.file_name().into_string() {
            Ok(name) => name,
            Err(raw) => {
                debug!(name = ?raw, "Skipping non UTF-8 entry");
                continue;
            }
        };
        match fs::metadata(entry.path()) {
            Ok(meta) if keep(&meta) => names.push(name),
            Ok(_) => {}
            Err(e) => debug!(name = %name, error = %e, "Skipping unreadable entry"),
        }
    }
    Ok(names)
}
