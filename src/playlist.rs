//! The playlist store: ordered entries plus a circular cursor.
//!
//! Invariant: the playlist is either empty with no cursor, or non-empty with
//! the cursor inside `[0, len)`.

use crate::library::TrackEntry;

#[derive(Debug, Default, Clone)]
pub struct Playlist {
    entries: Vec<TrackEntry>,
    cursor: Option<usize>,
}

impl Playlist {
    pub fn entries(&self) -> &[TrackEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&TrackEntry> {
        self.entries.get(index)
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// The cursor with `-1` standing for "no current track".
    #[cfg(test)]
    pub fn cursor_index(&self) -> isize {
        self.cursor.map(|c| c as isize).unwrap_or(-1)
    }

    #[cfg(test)]
    pub fn current(&self) -> Option<&TrackEntry> {
        self.cursor.and_then(|c| self.entries.get(c))
    }

    /// Install `entries`, resetting the cursor to the first one (if any).
    pub fn replace(&mut self, entries: Vec<TrackEntry>) {
        self.entries = entries;
        self.cursor = if self.entries.is_empty() { None } else { Some(0) };
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = None;
    }

    /// Point the cursor at `index`. Returns false when out of bounds.
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.entries.len() {
            self.cursor = Some(index);
            true
        } else {
            false
        }
    }

    /// Move forward one entry, wrapping past the end.
    ///
    /// Returns the new cursor and whether it wrapped, or `None` when empty.
    pub fn advance(&mut self) -> Option<(usize, bool)> {
        if self.entries.is_empty() {
            return None;
        }
        let next = self.cursor.map_or(0, |c| c + 1);
        let (next, wrapped) = if next >= self.entries.len() {
            (0, true)
        } else {
            (next, false)
        };
        self.cursor = Some(next);
        Some((next, wrapped))
    }

    /// Move back one entry, wrapping below zero to the last entry.
    pub fn retreat(&mut self) -> Option<usize> {
        if self.entries.is_empty() {
            return None;
        }
        let prev = match self.cursor {
            Some(0) | None => self.entries.len() - 1,
            Some(c) => c - 1,
        };
        self.cursor = Some(prev);
        Some(prev)
    }
}
