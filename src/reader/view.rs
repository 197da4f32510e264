//! Render model derived from a [`ReaderState`].

use crate::reader::state::{Mode, ReaderState};
use crate::spread::SpreadLayout;

/// Image shown in an empty spread slot.
pub const PLACEHOLDER_URL: &str = "/placeholder.jpg";

/// URL of one page image on the server.
pub fn image_url(manga: &str, chapter: &str, file: &str) -> String {
    format!(
        "/img?manga={}&chapter={}&file={}",
        urlencoding::encode(manga),
        urlencoding::encode(chapter),
        urlencoding::encode(file)
    )
}

/// What the reader should draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReaderView {
    /// Nothing selected, or the chapter has no pages.
    Empty,
    /// Every page, top to bottom.
    Vertical { pages: Vec<String> },
    /// One spread.
    Horizontal(SpreadView),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpreadView {
    pub left: String,
    pub right: String,
    /// 1-based page numbers in reading order.
    pub page_numbers: Vec<usize>,
    /// e.g. `Spread 2/4 (RTL)`.
    pub info: String,
    /// e.g. `Pages 2–3 / 7`.
    pub indicator: String,
}

impl ReaderView {
    pub fn from_state(state: &ReaderState) -> Self {
        let (Some(manga), Some(chapter)) = (state.manga.as_deref(), state.chapter.as_deref())
        else {
            return ReaderView::Empty;
        };
        if state.pages.is_empty() {
            return ReaderView::Empty;
        }

        let url = |file: &String| image_url(manga, chapter, file);

        match state.mode {
            Mode::Vertical => ReaderView::Vertical {
                pages: state.pages.iter().map(url).collect(),
            },
            Mode::Horizontal => {
                let layout = SpreadLayout::new(&state.pages);
                let Some(si) = layout.clamp(state.spread_index) else {
                    return ReaderView::Empty;
                };
                let (left, right) = layout.pages_of(si);
                let slot = |page: Option<&String>| {
                    page.map(url).unwrap_or_else(|| PLACEHOLDER_URL.to_string())
                };
                let page_numbers = layout.page_numbers(si);
                let total = state.pages.len();
                let indicator = match page_numbers.as_slice() {
                    [first, second] => format!("Pages {first}–{second} / {total}"),
                    [only] => format!("Page {only} / {total}"),
                    _ => String::new(),
                };

                ReaderView::Horizontal(SpreadView {
                    left: slot(left),
                    right: slot(right),
                    info: format!("Spread {}/{} (RTL)", si + 1, layout.total()),
                    indicator,
                    page_numbers,
                })
            }
        }
    }
}
