//! Right-to-left two-page spread layout.
//!
//! Spread 0 holds the cover alone: the cover sits in the left slot and the
//! right slot, which an RTL reader looks at first, is left empty. Every
//! later spread takes the next two pages, the earlier one on the right and
//! the later one on the left. A lone final page goes in the right slot.
//!
//! ```text
//! pages:   0 | 1 2 | 3 4 | 5
//! spread:  0 |  1  |  2  | 3
//! slots:  [0,_] [2,1] [4,3] [_,5]     (left, right)
//! ```

use serde::Serialize;

/// One slot of a spread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    /// A real page, by 0-based index.
    Page(usize),
    /// Nothing occupies this position.
    Placeholder,
}

impl Slot {
    fn at(index: usize, len: usize) -> Self {
        if index < len {
            Slot::Page(index)
        } else {
            Slot::Placeholder
        }
    }

    /// The page index, if this slot holds one.
    pub fn index(self) -> Option<usize> {
        match self {
            Slot::Page(index) => Some(index),
            Slot::Placeholder => None,
        }
    }

    /// Look the slot up in `pages`.
    pub fn resolve<T>(self, pages: &[T]) -> Option<&T> {
        self.index().and_then(|index| pages.get(index))
    }
}

/// The two slots shown together, in visual left/right order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Spread {
    pub left: Slot,
    pub right: Slot,
}

impl Spread {
    const EMPTY: Spread = Spread {
        left: Slot::Placeholder,
        right: Slot::Placeholder,
    };
}

/// Number of spreads for `n` pages.
pub fn total_spreads(n: usize) -> usize {
    match n {
        0 => 0,
        1 => 1,
        n => 1 + (n - 1).div_ceil(2),
    }
}

/// Page indices `(right, left)` for a spread at or after spread 1.
fn pair_indices(si: usize) -> (usize, usize) {
    let right = (si - 1).saturating_mul(2).saturating_add(1);
    (right, right.saturating_add(1))
}

/// Spread layout over an ordered page list.
#[derive(Debug, Clone, Copy)]
pub struct SpreadLayout<'a, T> {
    pages: &'a [T],
}

impl<'a, T> SpreadLayout<'a, T> {
    pub fn new(pages: &'a [T]) -> Self {
        Self { pages }
    }

    /// Number of spreads.
    pub fn total(&self) -> usize {
        total_spreads(self.pages.len())
    }

    /// Clamp a requested spread index into range.
    ///
    /// Returns `None` when there are no pages, meaning nothing to show.
    pub fn clamp(&self, si: usize) -> Option<usize> {
        self.total().checked_sub(1).map(|last| si.min(last))
    }

    /// Slots for spread `si`. Out-of-range spreads are all placeholder.
    pub fn sources(&self, si: usize) -> Spread {
        let n = self.pages.len();
        if n == 0 {
            return Spread::EMPTY;
        }
        if si == 0 {
            return Spread {
                left: Slot::Page(0),
                right: Slot::Placeholder,
            };
        }

        let (right, left) = pair_indices(si);
        Spread {
            left: Slot::at(left, n),
            right: Slot::at(right, n),
        }
    }

    /// 1-based page numbers shown by spread `si`, in reading order
    /// (right slot first). Empty when `si` is out of range.
    pub fn page_numbers(&self, si: usize) -> Vec<usize> {
        let n = self.pages.len();
        if n == 0 {
            return Vec::new();
        }
        if si == 0 {
            return vec![1];
        }

        let (right, left) = pair_indices(si);
        if right >= n {
            Vec::new()
        } else if left >= n {
            vec![right + 1]
        } else {
            vec![right + 1, left + 1]
        }
    }

    /// Resolve both slots of spread `si` to pages.
    pub fn pages_of(&self, si: usize) -> (Option<&'a T>, Option<&'a T>) {
        let spread = self.sources(si);
        (spread.left.resolve(self.pages), spread.right.resolve(self.pages))
    }

    /// Every spread in order.
    pub fn iter(&self) -> impl Iterator<Item = Spread> + '_ {
        (0..self.total()).map(move |si| self.sources(si))
    }
}
