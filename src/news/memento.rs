//! Where the reader was in the news list before leaving the portal.
//!
//! Kept on the UI thread: the list is only ever driven from there.

use std::cell::Cell;

thread_local! {
    static LAST_NEWS_POS: Cell<Option<usize>> = const { Cell::new(None) };
}

pub fn remember(index: usize) {
    LAST_NEWS_POS.with(|pos| pos.set(Some(index)));
}

pub fn peek() -> Option<usize> {
    LAST_NEWS_POS.with(Cell::get)
}

pub fn forget() {
    LAST_NEWS_POS.with(|pos| pos.set(None));
}
