//! Cursor-over-sequence list shared by all three panes
//!
//! Every pane is a `NavigableList`: an ordered backing sequence plus a
//! selection cursor. The backing sequence is replaced wholesale on every
//! rebuild; the cursor is clamped rather than reset so the selection
//! survives external graph changes as well as it can.

/// An ordered sequence with a bounded selection cursor.
///
/// Invariant: `cursor < len()` whenever the list is non-empty, and
/// `cursor == 0` when it is empty.
#[derive(Debug, Default)]
pub struct NavigableList<T> {
    items: Vec<T>,
    cursor: usize,
}

impl<T> NavigableList<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            cursor: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The selected item, or `None` when the list is empty.
    pub fn selected(&self) -> Option<&T> {
        self.items.get(self.cursor)
    }

    /// Move the selection down one item, stopping at the end.
    pub fn next(&mut self) {
        if self.cursor + 1 < self.items.len() {
            self.cursor += 1;
        }
    }

    /// Move the selection up one item, stopping at the start.
    pub fn previous(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn first(&mut self) {
        self.cursor = 0;
    }

    pub fn last(&mut self) {
        self.cursor = self.items.len().saturating_sub(1);
    }

    /// Replace the backing sequence, keeping the cursor in bounds.
    ///
    /// The cursor clamps to `min(cursor, len - 1)`, or resets to 0 when
    /// the new sequence is empty. This is what keeps the selection legal
    /// after a list shrinks underneath it.
    pub fn replace(&mut self, items: Vec<T>) {
        self.items = items;
        self.clamp_cursor();
    }

    /// Remove one entry in place, keeping the cursor in bounds.
    ///
    /// Used by disconnect-all to drop entries without a full rebuild.
    pub fn remove(&mut self, index: usize) -> Option<T> {
        if index >= self.items.len() {
            return None;
        }
        let item = self.items.remove(index);
        self.clamp_cursor();
        Some(item)
    }

    fn clamp_cursor(&mut self) {
        if self.items.is_empty() {
            self.cursor = 0;
        } else if self.cursor >= self.items.len() {
            self.cursor = self.items.len() - 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_of(n: usize) -> NavigableList<usize> {
        let mut list = NavigableList::new();
        list.replace((0..n).collect());
        list
    }

    #[test]
    fn empty_list_has_no_selection() {
        let list: NavigableList<usize> = NavigableList::new();
        assert_eq!(list.cursor(), 0);
        assert!(list.selected().is_none());
    }

    #[test]
    fn next_stops_at_the_end() {
        let mut list = list_of(3);
        list.next();
        list.next();
        list.next();
        list.next();
        assert_eq!(list.cursor(), 2);
        assert_eq!(list.selected(), Some(&2));
    }

    #[test]
    fn previous_stops_at_zero() {
        let mut list = list_of(3);
        list.previous();
        assert_eq!(list.cursor(), 0);
    }

    #[test]
    fn movement_on_empty_list_keeps_cursor_at_zero() {
        let mut list: NavigableList<usize> = NavigableList::new();
        list.next();
        list.previous();
        list.first();
        list.last();
        assert_eq!(list.cursor(), 0);
    }

    #[test]
    fn first_and_last_jump_to_the_ends() {
        let mut list = list_of(5);
        list.last();
        assert_eq!(list.cursor(), 4);
        list.first();
        assert_eq!(list.cursor(), 0);
    }

    #[test]
    fn replace_clamps_cursor_into_shrunk_list() {
        let mut list = list_of(5);
        list.last();
        list.replace(vec![10, 20]);
        assert_eq!(list.cursor(), 1);
        assert_eq!(list.selected(), Some(&20));
    }

    #[test]
    fn replace_keeps_in_range_cursor() {
        let mut list = list_of(5);
        list.next();
        list.replace(vec![10, 20, 30]);
        assert_eq!(list.cursor(), 1);
    }

    #[test]
    fn replace_with_empty_resets_cursor() {
        let mut list = list_of(5);
        list.last();
        list.replace(Vec::new());
        assert_eq!(list.cursor(), 0);
        assert!(list.selected().is_none());
    }

    #[test]
    fn remove_last_entry_clamps_cursor() {
        let mut list = list_of(3);
        list.last();
        assert_eq!(list.remove(2), Some(2));
        assert_eq!(list.cursor(), 1);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn remove_out_of_range_is_none() {
        let mut list = list_of(2);
        assert_eq!(list.remove(5), None);
        assert_eq!(list.len(), 2);
    }
}
