//! View tree arena
//!
//! Views are addressed by [`ViewId`]. Holding an id does not keep the view
//! alive: once a subtree is removed every lookup through its ids returns
//! `None`, which is how the controller's back-references go empty.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Handle to a view in a [`ViewTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ViewId(pub u32);

impl std::fmt::Display for ViewId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Incremental vertical scrolling capability
///
/// `offset` is how far the content is scrolled, `0..=extent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollRange {
    pub offset: i32,
    pub extent: i32,
}

impl ScrollRange {
    pub fn new(extent: i32) -> Self {
        Self {
            offset: 0,
            extent: extent.max(0),
        }
    }

    /// Negative direction asks "can it scroll back toward the top?"
    pub fn can_scroll_vertically(&self, direction: i32) -> bool {
        if direction < 0 {
            self.offset > 0
        } else if direction > 0 {
            self.offset < self.extent
        } else {
            false
        }
    }

    /// Scroll by `dy` within bounds, returning the amount actually scrolled
    pub fn scroll_by(&mut self, dy: i32) -> i32 {
        let target = self.offset.saturating_add(dy).clamp(0, self.extent);
        let scrolled = target - self.offset;
        self.offset = target;
        scrolled
    }
}

/// A rectangular view node
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct View {
    /// Top edge in parent coordinates
    pub top: i32,
    pub left: i32,
    pub width: i32,
    pub height: i32,
    pub children: Vec<ViewId>,
    /// Present when the view scrolls its own content
    pub scroll: Option<ScrollRange>,
    parent: Option<ViewId>,
}

impl View {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn scrollable(width: i32, height: i32, extent: i32) -> Self {
        Self {
            scroll: Some(ScrollRange::new(extent)),
            ..Self::new(width, height)
        }
    }

    pub fn at(mut self, left: i32, top: i32) -> Self {
        self.left = left;
        self.top = top;
        self
    }

    pub fn bottom(&self) -> i32 {
        self.top + self.height
    }

    pub fn right(&self) -> i32 {
        self.left + self.width
    }

    pub fn parent(&self) -> Option<ViewId> {
        self.parent
    }
}

/// Owner of all views
#[derive(Debug, Clone, Default)]
pub struct ViewTree {
    views: HashMap<ViewId, View>,
    next_id: u32,
}

impl ViewTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `view` under `parent` (or as a root)
    ///
    /// Children listed on the incoming view are ignored; use `add` per child.
    pub fn add(&mut self, parent: Option<ViewId>, mut view: View) -> ViewId {
        self.next_id += 1;
        let id = ViewId(self.next_id);
        view.children.clear();
        view.parent = parent.filter(|p| self.views.contains_key(p));
        if let Some(parent_view) = view.parent.and_then(|p| self.views.get_mut(&p)) {
            parent_view.children.push(id);
        }
        self.views.insert(id, view);
        id
    }

    /// Remove `id` and its whole subtree
    pub fn remove(&mut self, id: ViewId) -> bool {
        let Some(view) = self.views.remove(&id) else {
            return false;
        };
        if let Some(parent) = view.parent.and_then(|p| self.views.get_mut(&p)) {
            parent.children.retain(|child| *child != id);
        }
        for child in view.children {
            self.remove(child);
        }
        true
    }

    pub fn get(&self, id: ViewId) -> Option<&View> {
        self.views.get(&id)
    }

    pub fn get_mut(&mut self, id: ViewId) -> Option<&mut View> {
        self.views.get_mut(&id)
    }

    pub fn contains(&self, id: ViewId) -> bool {
        self.views.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    pub fn top(&self, id: ViewId) -> Option<i32> {
        self.get(id).map(|view| view.top)
    }

    /// Move a view vertically by `dy`
    pub fn offset_top_and_bottom(&mut self, id: ViewId, dy: i32) {
        if let Some(view) = self.get_mut(id) {
            view.top = view.top.saturating_add(dy);
        }
    }

    pub fn set_top(&mut self, id: ViewId, top: i32) {
        if let Some(view) = self.get_mut(id) {
            view.top = top;
        }
    }

    /// Whether `id` can scroll its content in `direction`
    ///
    /// Views without a scroll capability (or missing views) never can.
    pub fn can_scroll_vertically(&self, id: ViewId, direction: i32) -> bool {
        self.get(id)
            .and_then(|view| view.scroll)
            .is_some_and(|scroll| scroll.can_scroll_vertically(direction))
    }

    pub fn scroll_by(&mut self, id: ViewId, dy: i32) -> i32 {
        self.get_mut(id)
            .and_then(|view| view.scroll.as_mut())
            .map_or(0, |scroll| scroll.scroll_by(dy))
    }

    /// Depth-first search for the first view with a scroll capability
    ///
    /// `root` itself is checked first; children are visited in insertion order.
    pub fn find_scrolling_child(&self, root: ViewId) -> Option<ViewId> {
        let view = self.get(root)?;
        if view.scroll.is_some() {
            return Some(root);
        }
        view.children
            .iter()
            .find_map(|child| self.find_scrolling_child(*child))
    }

    /// Top-left of `id` in the coordinates of its root ancestor
    pub fn absolute_origin(&self, id: ViewId) -> Option<(i32, i32)> {
        let view = self.get(id)?;
        let (mut x, mut y) = (view.left, view.top);
        let mut parent = view.parent;
        while let Some(parent_id) = parent {
            let parent_view = self.get(parent_id)?;
            x += parent_view.left;
            y += parent_view.top;
            parent = parent_view.parent;
        }
        Some((x, y))
    }

    /// Whether a root-coordinate point lies inside `id`
    pub fn contains_point(&self, id: ViewId, x: i32, y: i32) -> bool {
        let (Some(view), Some((left, top))) = (self.get(id), self.absolute_origin(id)) else {
            return false;
        };
        x >= left && x < left + view.width && y >= top && y < top + view.height
    }
}
