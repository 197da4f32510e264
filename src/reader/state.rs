//! Reader state and its transitions.
//!
//! Transitions are pure: they take a [`ReaderState`] by value and hand back
//! the next one. Intents that need data from the library return a
//! [`LoadRequest`] alongside the new state; the result is folded back in
//! with [`complete`]. Each request carries the generation it was issued
//! under, and a completion from an older generation is dropped, so only
//! the latest navigation ever lands.

use serde::{Deserialize, Serialize};

use crate::spread::SpreadLayout;

/// How pages are presented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Continuous scroll of every page. No spreads.
    #[default]
    Vertical,
    /// Two-page RTL spreads.
    Horizontal,
}

/// Whether a load is outstanding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Loading,
    Ready,
}

/// Navigation intents, independent of whatever input produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    SelectManga(String),
    SelectChapter(String),
    SetMode(Mode),
    AdvanceSpread,
    RetreatSpread,
    PrevChapter,
    NextChapter,
}

/// Data a transition needs before it can finish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Load {
    /// List manga, then open the first one.
    Library,
    /// List a manga's chapters, then open its first chapter.
    Manga { manga: String },
    /// List a chapter's pages.
    Chapter { manga: String, chapter: String },
}

/// A load tagged with the generation that issued it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    pub generation: u64,
    pub load: Load,
}

/// A manga with its first chapter opened.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpenedManga {
    pub manga: String,
    pub chapters: Vec<String>,
    pub chapter: Option<String>,
    pub pages: Vec<String>,
}

/// The result of a [`Load`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Loaded {
    Library {
        manga_list: Vec<String>,
        opened: Option<OpenedManga>,
    },
    Manga(OpenedManga),
    Chapter {
        chapter: String,
        pages: Vec<String>,
    },
}

/// Everything the reader shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReaderState {
    pub phase: Phase,
    pub manga_list: Vec<String>,
    pub manga: Option<String>,
    pub chapters: Vec<String>,
    pub chapter: Option<String>,
    pub pages: Vec<String>,
    pub mode: Mode,
    pub spread_index: usize,
    generation: u64,
}

impl ReaderState {
    /// A fresh state plus the initial library load.
    pub fn start() -> (Self, LoadRequest) {
        let mut state = Self::default();
        let request = state.issue(Load::Library);
        (state, request)
    }

    /// Number of spreads in the current chapter.
    pub fn total_spreads(&self) -> usize {
        SpreadLayout::new(&self.pages).total()
    }

    fn issue(&mut self, load: Load) -> LoadRequest {
        self.generation += 1;
        self.phase = Phase::Loading;
        LoadRequest {
            generation: self.generation,
            load,
        }
    }

    fn open_chapter(&mut self, chapter: Option<String>, pages: Vec<String>) {
        self.chapter = chapter;
        self.pages = pages;
        self.spread_index = 0;
    }

    fn open_manga(&mut self, opened: OpenedManga) {
        self.manga = Some(opened.manga);
        self.chapters = opened.chapters;
        self.open_chapter(opened.chapter, opened.pages);
    }

    fn adjacent_chapter(&self, forward: bool) -> Option<&String> {
        let current = self.chapter.as_ref()?;
        let position = self.chapters.iter().position(|c| c == current)?;
        if forward {
            self.chapters.get(position + 1)
        } else {
            position.checked_sub(1).and_then(|p| self.chapters.get(p))
        }
    }
}

/// Apply an intent.
pub fn transition(mut state: ReaderState, intent: Intent) -> (ReaderState, Option<LoadRequest>) {
    match intent {
        Intent::SelectManga(manga) => {
            let request = state.issue(Load::Manga { manga });
            (state, Some(request))
        }
        Intent::SelectChapter(chapter) => select_chapter(state, chapter),
        Intent::SetMode(mode) => {
            state.mode = mode;
            state.spread_index = 0;
            (state, None)
        }
        Intent::AdvanceSpread => {
            if state.mode == Mode::Horizontal && state.spread_index + 1 < state.total_spreads() {
                state.spread_index += 1;
            }
            (state, None)
        }
        Intent::RetreatSpread => {
            if state.mode == Mode::Horizontal {
                state.spread_index = state.spread_index.saturating_sub(1);
            }
            (state, None)
        }
        Intent::PrevChapter => step_chapter(state, false),
        Intent::NextChapter => step_chapter(state, true),
    }
}

fn step_chapter(state: ReaderState, forward: bool) -> (ReaderState, Option<LoadRequest>) {
    match state.adjacent_chapter(forward).cloned() {
        Some(chapter) => select_chapter(state, chapter),
        None => (state, None),
    }
}

fn select_chapter(mut state: ReaderState, chapter: String) -> (ReaderState, Option<LoadRequest>) {
    let Some(manga) = state.manga.clone() else {
        return (state, None);
    };
    let request = state.issue(Load::Chapter { manga, chapter });
    (state, Some(request))
}

/// Fold a finished load into the state.
///
/// Loads from a superseded generation leave the state untouched.
pub fn complete(mut state: ReaderState, generation: u64, loaded: Loaded) -> ReaderState {
    if generation != state.generation {
        return state;
    }

    match loaded {
        Loaded::Library { manga_list, opened } => {
            state.manga_list = manga_list;
            match opened {
                Some(opened) => state.open_manga(opened),
                None => {
                    state.manga = None;
                    state.chapters.clear();
                    state.open_chapter(None, Vec::new());
                }
            }
        }
        Loaded::Manga(opened) => state.open_manga(opened),
        Loaded::Chapter { chapter, pages } => state.open_chapter(Some(chapter), pages),
    }
    state.phase = Phase::Ready;
    state
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn ready(pages: usize, mode: Mode) -> ReaderState {
        let (state, request) = ReaderState::start();
        let mut state = complete(
            state,
            request.generation,
            Loaded::Library {
                manga_list: names(&["M"]),
                opened: Some(OpenedManga {
                    manga: "M".into(),
                    chapters: names(&["c1", "c2", "c3"]),
                    chapter: Some("c2".into()),
                    pages: (1..=pages).map(|i| format!("{i}.jpg")).collect(),
                }),
            },
        );
        state.mode = mode;
        state
    }

    #[test]
    fn test_start() {
        let (state, request) = ReaderState::start();
        assert_eq!(state.phase, Phase::Loading);
        assert_eq!(request.load, Load::Library);

        let state = complete(
            state,
            request.generation,
            Loaded::Library {
                manga_list: Vec::new(),
                opened: None,
            },
        );
        assert_eq!(state.phase, Phase::Ready);
        assert_eq!(state.manga, None);
        assert!(state.pages.is_empty());
    }

    #[test]
    fn test_select_manga_resets_spread() {
        let mut state = ready(6, Mode::Horizontal);
        state.spread_index = 2;

        let (state, request) = transition(state, Intent::SelectManga("N".into()));
        let request = request.unwrap();
        assert_eq!(request.load, Load::Manga { manga: "N".into() });
        assert_eq!(state.phase, Phase::Loading);
        // The previous chapter stays visible until the load lands.
        assert_eq!(state.manga.as_deref(), Some("M"));

        let state = complete(
            state,
            request.generation,
            Loaded::Manga(OpenedManga {
                manga: "N".into(),
                chapters: names(&["a"]),
                chapter: Some("a".into()),
                pages: names(&["1.png"]),
            }),
        );
        assert_eq!(state.phase, Phase::Ready);
        assert_eq!(state.manga.as_deref(), Some("N"));
        assert_eq!(state.chapter.as_deref(), Some("a"));
        assert_eq!(state.spread_index, 0);
        assert_eq!(state.mode, Mode::Horizontal);
    }

    #[test]
    fn test_select_chapter() {
        let mut state = ready(6, Mode::Horizontal);
        state.spread_index = 3;

        let (state, request) = transition(state, Intent::SelectChapter("c3".into()));
        let request = request.unwrap();
        assert_eq!(
            request.load,
            Load::Chapter {
                manga: "M".into(),
                chapter: "c3".into()
            }
        );
        let state = complete(
            state,
            request.generation,
            Loaded::Chapter {
                chapter: "c3".into(),
                pages: names(&["1.jpg", "2.jpg"]),
            },
        );
        assert_eq!(state.chapter.as_deref(), Some("c3"));
        assert_eq!(state.spread_index, 0);
        assert_eq!(state.pages.len(), 2);
    }

    #[test]
    fn test_select_chapter_without_manga() {
        let state = ReaderState::default();
        let (after, request) = transition(state.clone(), Intent::SelectChapter("c1".into()));
        assert!(request.is_none());
        assert_eq!(after, state);
    }

    #[test]
    fn test_set_mode_resets_spread() {
        let mut state = ready(6, Mode::Horizontal);
        state.spread_index = 2;
        let (state, request) = transition(state, Intent::SetMode(Mode::Vertical));
        assert!(request.is_none());
        assert_eq!(state.mode, Mode::Vertical);
        assert_eq!(state.spread_index, 0);

        let (state, _) = transition(state, Intent::SetMode(Mode::Horizontal));
        assert_eq!(state.spread_index, 0);
    }

    #[test]
    fn test_advance_and_retreat_clamp() {
        // 5 pages -> 3 spreads.
        let mut state = ready(5, Mode::Horizontal);
        for expected in [1, 2, 2, 2] {
            state = transition(state, Intent::AdvanceSpread).0;
            assert_eq!(state.spread_index, expected);
        }
        for expected in [1, 0, 0] {
            state = transition(state, Intent::RetreatSpread).0;
            assert_eq!(state.spread_index, expected);
        }
    }

    #[test]
    fn test_spread_navigation_ignored_in_vertical() {
        let state = ready(5, Mode::Vertical);
        let (state, request) = transition(state, Intent::AdvanceSpread);
        assert!(request.is_none());
        assert_eq!(state.spread_index, 0);
    }

    #[test]
    fn test_advance_with_no_pages() {
        let state = ready(0, Mode::Horizontal);
        let (state, _) = transition(state, Intent::AdvanceSpread);
        assert_eq!(state.spread_index, 0);
    }

    #[test]
    fn test_adjacent_chapters() {
        let state = ready(3, Mode::Vertical);
        let (_, request) = transition(state.clone(), Intent::NextChapter);
        assert_eq!(
            request.unwrap().load,
            Load::Chapter {
                manga: "M".into(),
                chapter: "c3".into()
            }
        );
        let (_, request) = transition(state, Intent::PrevChapter);
        assert_eq!(
            request.unwrap().load,
            Load::Chapter {
                manga: "M".into(),
                chapter: "c1".into()
            }
        );
    }

    #[test]
    fn test_adjacent_chapter_at_edges() {
        let mut state = ready(3, Mode::Vertical);
        state.chapter = Some("c1".into());
        let (after, request) = transition(state.clone(), Intent::PrevChapter);
        assert!(request.is_none());
        assert_eq!(after, state);

        state.chapter = Some("c3".into());
        let (after, request) = transition(state.clone(), Intent::NextChapter);
        assert!(request.is_none());
        assert_eq!(after, state);
    }

    #[test]
    fn test_stale_load_dropped() {
        let state = ready(3, Mode::Vertical);
        let (state, first) = transition(state, Intent::SelectChapter("c1".into()));
        let (state, second) = transition(state, Intent::SelectChapter("c3".into()));
        let (first, second) = (first.unwrap(), second.unwrap());
        assert!(second.generation > first.generation);

        // The newer load finishes first; the older one arrives late.
        let state = complete(
            state,
            second.generation,
            Loaded::Chapter {
                chapter: "c3".into(),
                pages: names(&["x.jpg"]),
            },
        );
        let state = complete(
            state,
            first.generation,
            Loaded::Chapter {
                chapter: "c1".into(),
                pages: names(&["y.jpg", "z.jpg"]),
            },
        );
        assert_eq!(state.chapter.as_deref(), Some("c3"));
        assert_eq!(state.pages, names(&["x.jpg"]));
        assert_eq!(state.phase, Phase::Ready);
    }
}
