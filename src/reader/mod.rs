//! Reader controller.
//!
//! The controller owns a [`ReaderState`], turns intents into transitions,
//! and performs any library loads they ask for against a
//! [`LibrarySource`]. A failed load puts the previous state back, so the
//! last good chapter stays on screen.

pub mod keymap;
pub mod state;
pub mod view;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::client::{ApiClient, ClientError};
use crate::library::{LibraryError, LibraryIndex};

pub use keymap::{intent_for_button, intent_for_key, Button, Key};
pub use state::{
    complete, transition, Intent, Load, LoadRequest, Loaded, Mode, OpenedManga, Phase,
    ReaderState,
};
pub use view::{image_url, ReaderView, SpreadView, PLACEHOLDER_URL};

/// Where the reader gets its listings from.
#[async_trait]
pub trait LibrarySource: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    async fn list_manga(&self) -> Result<Vec<String>, Self::Error>;

    async fn list_chapters(&self, manga: &str) -> Result<Vec<String>, Self::Error>;

    async fn list_pages(&self, manga: &str, chapter: &str) -> Result<Vec<String>, Self::Error>;
}

#[async_trait]
impl LibrarySource for ApiClient {
    type Error = ClientError;

    async fn list_manga(&self) -> Result<Vec<String>, ClientError> {
        self.manga().await
    }

    async fn list_chapters(&self, manga: &str) -> Result<Vec<String>, ClientError> {
        self.chapters(manga).await
    }

    async fn list_pages(&self, manga: &str, chapter: &str) -> Result<Vec<String>, ClientError> {
        self.pages(manga, chapter).await
    }
}

#[async_trait]
impl LibrarySource for LibraryIndex {
    type Error = LibraryError;

    async fn list_manga(&self) -> Result<Vec<String>, LibraryError> {
        self.run_blocking(|index| index.list_manga()).await
    }

    async fn list_chapters(&self, manga: &str) -> Result<Vec<String>, LibraryError> {
        let manga = manga.to_owned();
        self.run_blocking(move |index| index.list_chapters(&manga))
            .await
    }

    async fn list_pages(&self, manga: &str, chapter: &str) -> Result<Vec<String>, LibraryError> {
        let (manga, chapter) = (manga.to_owned(), chapter.to_owned());
        self.run_blocking(move |index| index.list_pages(&manga, &chapter))
            .await
    }
}

/// Drives a [`ReaderState`] from intents.
pub struct ReaderController<S> {
    source: S,
    state: ReaderState,
}

impl<S: LibrarySource> ReaderController<S> {
    /// Create a controller and run the initial library load.
    pub async fn start(source: S) -> Result<Self, S::Error> {
        let (state, request) = ReaderState::start();
        let mut controller = Self { source, state };
        controller.run(request).await?;
        Ok(controller)
    }

    pub fn state(&self) -> &ReaderState {
        &self.state
    }

    /// The render model for the current state.
    pub fn view(&self) -> ReaderView {
        ReaderView::from_state(&self.state)
    }

    /// Apply an intent, loading from the source if it needs to.
    ///
    /// On a load failure the state from before the intent is restored and
    /// the error is returned.
    pub async fn dispatch(&mut self, intent: Intent) -> Result<&ReaderState, S::Error> {
        debug!(?intent, "Dispatching reader intent");
        let previous = self.state.clone();
        let (next, request) = transition(std::mem::take(&mut self.state), intent);
        self.state = next;

        if let Some(request) = request {
            if let Err(e) = self.run(request).await {
                warn!(error = %e, "Reader load failed, keeping previous view");
                self.state = previous;
                return Err(e);
            }
        }
        Ok(&self.state)
    }

    async fn run(&mut self, request: LoadRequest) -> Result<(), S::Error> {
        let loaded = self.fetch(&request.load).await?;
        self.state = complete(std::mem::take(&mut self.state), request.generation, loaded);
        Ok(())
    }

    async fn fetch(&self, load: &Load) -> Result<Loaded, S::Error> {
        match load {
            Load::Library => {
                let manga_list = self.source.list_manga().await?;
                let opened = match manga_list.first() {
                    Some(manga) => Some(self.open_manga(manga).await?),
                    None => None,
                };
                Ok(Loaded::Library { manga_list, opened })
            }
            Load::Manga { manga } => Ok(Loaded::Manga(self.open_manga(manga).await?)),
            Load::Chapter { manga, chapter } => Ok(Loaded::Chapter {
                chapter: chapter.clone(),
                pages: self.source.list_pages(manga, chapter).await?,
            }),
        }
    }

    async fn open_manga(&self, manga: &str) -> Result<OpenedManga, S::Error> {
        let chapters = self.source.list_chapters(manga).await?;
        let chapter = chapters.first().cloned();
        let pages = match &chapter {
            Some(chapter) => self.source.list_pages(manga, chapter).await?,
            None => Vec::new(),
        };
        Ok(OpenedManga {
            manga: manga.to_string(),
            chapters,
            chapter,
            pages,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"x").unwrap();
    }

    fn library() -> TempDir {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        for page in ["1.jpg", "2.jpg", "3.jpg", "4.jpg", "5.jpg"] {
            touch(&root.join("Alpha").join("ch1").join(page));
        }
        touch(&root.join("Alpha").join("ch2").join("1.png"));
        fs::create_dir_all(root.join("Alpha").join("ch3")).unwrap();
        touch(&root.join("Beta").join("only").join("cover.webp"));
        temp
    }

    #[tokio::test]
    async fn test_start_opens_first_chapter() {
        let temp = library();
        let reader = ReaderController::start(LibraryIndex::new(temp.path()))
            .await
            .unwrap();
        let state = reader.state();
        assert_eq!(state.phase, Phase::Ready);
        assert_eq!(state.manga_list, vec!["Alpha", "Beta"]);
        assert_eq!(state.manga.as_deref(), Some("Alpha"));
        assert_eq!(state.chapter.as_deref(), Some("ch1"));
        assert_eq!(state.pages.len(), 5);
    }

    #[tokio::test]
    async fn test_start_empty_library() {
        let temp = TempDir::new().unwrap();
        let reader = ReaderController::start(LibraryIndex::new(temp.path().join("missing")))
            .await
            .unwrap();
        assert_eq!(reader.state().manga, None);
        assert_eq!(reader.view(), ReaderView::Empty);
    }

    #[tokio::test]
    async fn test_navigation() {
        let temp = library();
        let mut reader = ReaderController::start(LibraryIndex::new(temp.path()))
            .await
            .unwrap();

        reader.dispatch(Intent::SetMode(Mode::Horizontal)).await.unwrap();
        reader.dispatch(Intent::AdvanceSpread).await.unwrap();
        let state = reader.dispatch(Intent::AdvanceSpread).await.unwrap();
        assert_eq!(state.spread_index, 2);

        let ReaderView::Horizontal(view) = reader.view() else {
            panic!("expected a spread");
        };
        assert_eq!(view.page_numbers, vec![4, 5]);

        let state = reader.dispatch(Intent::NextChapter).await.unwrap();
        assert_eq!(state.chapter.as_deref(), Some("ch2"));
        assert_eq!(state.spread_index, 0);
        assert_eq!(state.pages, vec!["1.png"]);

        let state = reader.dispatch(Intent::NextChapter).await.unwrap();
        assert_eq!(state.chapter.as_deref(), Some("ch3"));
        assert!(state.pages.is_empty());
        assert_eq!(reader.view(), ReaderView::Empty);

        // Already at the last chapter.
        let state = reader.dispatch(Intent::NextChapter).await.unwrap();
        assert_eq!(state.chapter.as_deref(), Some("ch3"));

        let state = reader.dispatch(Intent::SelectManga("Beta".into())).await.unwrap();
        assert_eq!(state.chapters, vec!["only"]);
        assert_eq!(state.pages, vec!["cover.webp"]);
        assert_eq!(state.mode, Mode::Horizontal);
    }

    #[tokio::test]
    async fn test_failed_load_keeps_previous_state() {
        let temp = library();
        let mut reader = ReaderController::start(LibraryIndex::new(temp.path()))
            .await
            .unwrap();
        reader.dispatch(Intent::SetMode(Mode::Horizontal)).await.unwrap();
        reader.dispatch(Intent::AdvanceSpread).await.unwrap();
        let before = reader.state().clone();

        let err = reader
            .dispatch(Intent::SelectManga("Gamma".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, LibraryError::NotFound(_)));
        assert_eq!(reader.state(), &before);

        let err = reader
            .dispatch(Intent::SelectChapter("../../..".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, LibraryError::BadPath(_)));
        assert_eq!(reader.state(), &before);
    }
}
