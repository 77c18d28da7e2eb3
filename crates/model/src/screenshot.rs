//! Staged screenshots and the current selection.

use std::sync::Arc;

use image::RgbaImage;

use crate::error::ModelError;

/// A decoded screenshot plus its identity.
#[derive(Debug, Clone)]
pub struct Screenshot {
    /// Insertion-order identity; survives replacement of the image.
    pub id: u64,
    pub image: Arc<RgbaImage>,
}

impl Screenshot {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

/// Ordered collection of staged screenshots with exactly one selection.
///
/// The selection index is kept within `[0, len - 1]` (0 when empty).
#[derive(Debug, Clone, Default)]
pub struct ScreenshotSet {
    items: Vec<Screenshot>,
    selected: usize,
    next_id: u64,
}

impl ScreenshotSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Screenshot> {
        self.items.iter()
    }

    /// Append a decoded image, returning its id.
    pub fn push(&mut self, image: Arc<RgbaImage>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.items.push(Screenshot { id, image });
        id
    }

    /// Append a batch in order. The selection is left where it was.
    pub fn extend(&mut self, images: impl IntoIterator<Item = Arc<RgbaImage>>) -> Vec<u64> {
        images.into_iter().map(|img| self.push(img)).collect()
    }

    /// Swap the image at `index`, keeping its id and the selection.
    pub fn replace(&mut self, index: usize, image: Arc<RgbaImage>) -> Result<(), ModelError> {
        let len = self.items.len();
        let item = self
            .items
            .get_mut(index)
            .ok_or(ModelError::ScreenshotIndex { index, len })?;
        item.image = image;
        Ok(())
    }

    /// Remove the screenshot at `index`.
    ///
    /// Removing an entry before the selection shifts the selection down so it
    /// keeps pointing at the same screenshot; removing the selected last entry
    /// moves the selection to the new last entry.
    pub fn remove(&mut self, index: usize) -> Result<Screenshot, ModelError> {
        let len = self.items.len();
        if index >= len {
            return Err(ModelError::ScreenshotIndex { index, len });
        }
        let removed = self.items.remove(index);
        if index < self.selected {
            self.selected -= 1;
        }
        self.clamp_selection();
        Ok(removed)
    }

    /// Select the screenshot at `index`, clamped to the valid range.
    pub fn select(&mut self, index: usize) {
        self.selected = index;
        self.clamp_selection();
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// The screenshot to composite, if any are staged.
    pub fn selected(&self) -> Option<&Screenshot> {
        self.items.get(self.selected)
    }

    fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.items.len().saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn img(w: u32) -> Arc<RgbaImage> {
        Arc::new(RgbaImage::new(w, 10))
    }

    fn set_of(n: u32) -> ScreenshotSet {
        let mut set = ScreenshotSet::new();
        set.extend((1..=n).map(img));
        set
    }

    #[test]
    fn test_empty_set_has_no_selection() {
        let set = ScreenshotSet::new();
        assert!(set.selected().is_none());
        assert_eq!(set.selected_index(), 0);
    }

    #[test]
    fn test_extend_keeps_order_and_selection() {
        let mut set = set_of(2);
        set.select(1);
        set.extend([img(7)]);
        assert_eq!(set.len(), 3);
        assert_eq!(set.selected_index(), 1);
        let widths: Vec<u32> = set.iter().map(|s| s.width()).collect();
        assert_eq!(widths, vec![1, 2, 7]);
    }

    #[test]
    fn test_select_clamps() {
        let mut set = set_of(3);
        set.select(10);
        assert_eq!(set.selected_index(), 2);
    }

    #[test]
    fn test_remove_before_selection_keeps_target() {
        let mut set = set_of(3);
        set.select(2);
        let target = set.selected().unwrap().id;
        set.remove(0).unwrap();
        assert_eq!(set.selected_index(), 1);
        assert_eq!(set.selected().unwrap().id, target);
    }

    #[test]
    fn test_remove_selected_last_moves_back() {
        let mut set = set_of(3);
        set.select(2);
        set.remove(2).unwrap();
        assert_eq!(set.selected_index(), 1);
    }

    #[test]
    fn test_remove_selected_middle_keeps_index() {
        let mut set = set_of(3);
        set.select(1);
        let next = set.iter().nth(2).unwrap().id;
        set.remove(1).unwrap();
        assert_eq!(set.selected_index(), 1);
        assert_eq!(set.selected().unwrap().id, next);
    }

    #[test]
    fn test_remove_all_leaves_empty_selection() {
        let mut set = set_of(1);
        set.remove(0).unwrap();
        assert!(set.selected().is_none());
        assert_eq!(set.selected_index(), 0);
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut set = set_of(1);
        assert_eq!(
            set.remove(4).unwrap_err(),
            ModelError::ScreenshotIndex { index: 4, len: 1 }
        );
    }

    #[test]
    fn test_replace_keeps_identity() {
        let mut set = set_of(2);
        let id = set.iter().next().unwrap().id;
        set.replace(0, img(42)).unwrap();
        let first = set.iter().next().unwrap();
        assert_eq!(first.id, id);
        assert_eq!(first.width(), 42);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Push,
        Remove(usize),
        Select(usize),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            Just(Op::Push),
            (0usize..8).prop_map(Op::Remove),
            (0usize..8).prop_map(Op::Select),
        ]
    }

    proptest! {
        #[test]
        fn prop_selection_always_addresses_an_item(ops in proptest::collection::vec(op(), 0..40)) {
            let mut set = ScreenshotSet::new();
            for op in ops {
                match op {
                    Op::Push => {
                        set.push(img(1));
                    }
                    Op::Remove(i) => {
                        let _ = set.remove(i);
                    }
                    Op::Select(i) => set.select(i),
                }
                if set.is_empty() {
                    prop_assert_eq!(set.selected_index(), 0);
                    prop_assert!(set.selected().is_none());
                } else {
                    prop_assert!(set.selected_index() < set.len());
                }
            }
        }
    }
}
