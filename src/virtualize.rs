//! Windowed rendering for large lists
//!
//! Computes the contiguous index range that must be rendered for a list of
//! fixed-height items, given the scroll offset and viewport height, expanded
//! by an overscan margin on both sides. The computation is a pure function of
//! its inputs; the only state held here is the scroll offset itself.
//!
//! Heights and offsets are unit-agnostic: the TUI feeds terminal rows, but
//! nothing below assumes a particular unit.

use std::ops::Range;

/// Extra items rendered beyond the viewport on each side to mask
/// scroll-induced pop-in.
pub const DEFAULT_OVERSCAN: usize = 5;

/// One item inside the visible window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleItem<'a, T> {
    /// Index of the item in the full list
    pub index: usize,
    pub item: &'a T,
    /// Offset of the item's top edge from the start of the list
    pub top: usize,
}

/// Scroll state and window arithmetic for a virtualized list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualList {
    item_height: usize,
    viewport_height: usize,
    overscan: usize,
    scroll_offset: usize,
}

impl VirtualList {
    /// Creates a virtual list over items of a fixed height.
    ///
    /// # Panics
    ///
    /// Panics if `item_height` is zero; a zero-height item is an invalid
    /// configuration, not a runtime condition.
    pub fn new(item_height: usize, viewport_height: usize) -> Self {
        assert!(item_height > 0, "item_height must be positive");
        Self {
            item_height,
            viewport_height,
            overscan: DEFAULT_OVERSCAN,
            scroll_offset: 0,
        }
    }

    /// Overrides the overscan margin.
    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    /// Updates the viewport height (the hosting view resizes freely).
    pub fn set_viewport_height(&mut self, viewport_height: usize) {
        self.viewport_height = viewport_height;
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn viewport_height(&self) -> usize {
        self.viewport_height
    }

    /// The index range `[start, end)` to render for a list of `item_count`
    /// items, including overscan.
    pub fn window(&self, item_count: usize) -> Range<usize> {
        let first_visible = self.scroll_offset / self.item_height;
        let visible_count = self.viewport_height.div_ceil(self.item_height);

        let end = (first_visible + visible_count + self.overscan).min(item_count);
        let start = first_visible.saturating_sub(self.overscan).min(end);
        start..end
    }

    /// The items inside the current window, with their list positions.
    pub fn visible_items<'a, T>(&self, items: &'a [T]) -> Vec<VisibleItem<'a, T>> {
        self.window(items.len())
            .map(|index| VisibleItem {
                index,
                item: &items[index],
                top: index * self.item_height,
            })
            .collect()
    }

    /// Total scrollable height of `item_count` items.
    pub fn total_height(&self, item_count: usize) -> usize {
        item_count * self.item_height
    }

    /// Jumps the scroll offset to put `index` at the top of the viewport.
    ///
    /// An index outside `0..item_count` is ignored; the negative side of the
    /// range is ruled out by the unsigned argument.
    pub fn scroll_to_index(&mut self, index: usize, item_count: usize) {
        if index < item_count {
            self.scroll_offset = index * self.item_height;
        }
    }

    /// Scrolls by a signed amount, clamped to the valid range for
    /// `item_count` items.
    pub fn scroll_by(&mut self, delta: isize, item_count: usize) {
        let max = self.total_height(item_count).saturating_sub(self.viewport_height);
        let next = self.scroll_offset as isize + delta;
        self.scroll_offset = next.clamp(0, max as isize) as usize;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_boundary_arithmetic() {
        let mut list = VirtualList::new(80, 600).with_overscan(5);
        list.scroll_offset = 800;

        // floor(800/80)=10, ceil(600/80)=8: start = 10-5, end = 10+8+5
        assert_eq!(list.window(100), 5..23);
    }

    #[test]
    fn test_window_at_top_clamps_start_to_zero() {
        let list = VirtualList::new(80, 600).with_overscan(5);
        assert_eq!(list.window(100), 0..13);
    }

    #[test]
    fn test_window_at_bottom_clamps_end_to_item_count() {
        let mut list = VirtualList::new(80, 600).with_overscan(5);
        list.scroll_offset = 95 * 80;
        assert_eq!(list.window(100), 90..100);
    }

    #[test]
    fn test_empty_list_yields_empty_window() {
        let list = VirtualList::new(80, 600);
        assert_eq!(list.window(0), 0..0);

        let items: Vec<u32> = Vec::new();
        assert!(list.visible_items(&items).is_empty());
        assert_eq!(list.total_height(0), 0);
    }

    #[test]
    fn test_visible_items_carry_index_and_top() {
        let mut list = VirtualList::new(10, 30).with_overscan(0);
        list.scroll_offset = 20;
        let items: Vec<u32> = (0..100).collect();

        let visible = list.visible_items(&items);
        assert_eq!(visible.len(), 3);
        assert_eq!(visible[0].index, 2);
        assert_eq!(*visible[0].item, 2);
        assert_eq!(visible[0].top, 20);
        assert_eq!(visible[2].index, 4);
    }

    #[test]
    fn test_scroll_to_index_sets_offset() {
        let mut list = VirtualList::new(80, 600);
        list.scroll_to_index(7, 100);
        assert_eq!(list.scroll_offset(), 560);

        list.scroll_to_index(0, 100);
        assert_eq!(list.scroll_offset(), 0);
    }

    #[test]
    fn test_scroll_to_index_out_of_range_is_a_no_op() {
        let mut list = VirtualList::new(80, 600);
        list.scroll_to_index(7, 100);
        let before = list.scroll_offset();

        list.scroll_to_index(100, 100);
        assert_eq!(list.scroll_offset(), before);

        list.scroll_to_index(105, 100);
        assert_eq!(list.scroll_offset(), before);
    }

    #[test]
    fn test_scroll_to_index_on_empty_list_is_a_no_op() {
        let mut list = VirtualList::new(80, 600);
        list.scroll_to_index(0, 0);
        assert_eq!(list.scroll_offset(), 0);
    }

    #[test]
    fn test_scroll_by_clamps_to_valid_range() {
        let mut list = VirtualList::new(10, 30);
        let count = 10; // total height 100, max offset 70

        list.scroll_by(-50, count);
        assert_eq!(list.scroll_offset(), 0);

        list.scroll_by(40, count);
        assert_eq!(list.scroll_offset(), 40);

        list.scroll_by(1000, count);
        assert_eq!(list.scroll_offset(), 70);
    }

    #[test]
    fn test_scroll_by_on_short_list_stays_at_zero() {
        let mut list = VirtualList::new(10, 600);
        list.scroll_by(100, 3);
        assert_eq!(list.scroll_offset(), 0);
    }

    #[test]
    fn test_total_height_scales_with_count() {
        let list = VirtualList::new(80, 600);
        assert_eq!(list.total_height(100), 8000);
    }

    #[test]
    #[should_panic(expected = "item_height must be positive")]
    fn test_zero_item_height_is_rejected() {
        let _ = VirtualList::new(0, 600);
    }

    #[test]
    fn test_window_is_pure() {
        let mut list = VirtualList::new(80, 600);
        list.scroll_offset = 800;
        assert_eq!(list.window(100), list.window(100));
    }
}
