//! Drill-down cursor over a [`PathTree`]
//!
//! The navigator owns the tree and tracks the level being shown plus the
//! highlighted child on that level. Entering a level (initially, on descend
//! and on ascend) always selects the middle child.

use crate::tree::{ChildExtent, NodeId, PathTree};
use serde::{Deserialize, Serialize};

/// One row of the popup menu
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: NodeId,
    pub name: String,
    pub is_selected: bool,
    pub has_children: bool,
}

/// View model for rendering the current level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuView {
    pub title: String,
    pub items: Vec<MenuItem>,
    pub selected_index: usize,
    pub longest_child_name: String,
    pub longest_child_size: ChildExtent,
}

#[derive(Debug, Clone)]
pub struct TreeNavigator {
    tree: PathTree,
    current: NodeId,
    selected: usize,
}

impl TreeNavigator {
    /// Bind a navigator to the root of `tree`
    pub fn new(tree: PathTree) -> Self {
        let current = tree.root();
        let selected = middle_index(tree.node(current).child_count());
        Self {
            tree,
            current,
            selected,
        }
    }

    pub fn tree(&self) -> &PathTree {
        &self.tree
    }

    /// Mutable tree access, used by the renderer to store measured sizes
    pub fn tree_mut(&mut self) -> &mut PathTree {
        &mut self.tree
    }

    pub fn current_node(&self) -> NodeId {
        self.current
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// The highlighted child, `None` only when the current level is empty
    pub fn selected_child(&self) -> Option<NodeId> {
        self.tree.children(self.current).get(self.selected).copied()
    }

    pub fn is_at_root(&self) -> bool {
        self.tree.parent(self.current).is_none()
    }

    /// Move the highlight to the next child, wrapping to the first
    pub fn selection_down(&mut self) {
        let count = self.child_count();
        if count == 0 {
            return;
        }
        self.selected = (self.selected + 1) % count;
    }

    /// Move the highlight to the previous child, wrapping to the last
    pub fn selection_up(&mut self) {
        let count = self.child_count();
        if count == 0 {
            return;
        }
        self.selected = (self.selected + count - 1) % count;
    }

    /// Descend into the highlighted child. Returns false, leaving the cursor
    /// alone, when that child has no children of its own.
    pub fn enter_selected(&mut self) -> bool {
        let Some(child) = self.selected_child() else {
            return false;
        };
        if !self.tree.node(child).has_children() {
            return false;
        }
        self.move_to(child);
        true
    }

    /// Ascend to the parent level. Returns false at the root.
    ///
    /// The parent's selection is recentered, not restored.
    pub fn enter_parent(&mut self) -> bool {
        let Some(parent) = self.tree.parent(self.current) else {
            return false;
        };
        self.move_to(parent);
        true
    }

    /// Full path of the highlighted child
    pub fn selected_path(&self) -> Option<String> {
        self.selected_child().map(|id| self.tree.full_path(id))
    }

    /// Full path of the level being shown; empty at the root
    pub fn current_path(&self) -> String {
        self.tree.full_path(self.current)
    }

    /// Build the rows of the current level in name order
    pub fn menu_view(&self) -> MenuView {
        let node = self.tree.node(self.current);
        let items = node
            .children()
            .iter()
            .enumerate()
            .map(|(index, &id)| {
                let child = self.tree.node(id);
                MenuItem {
                    id,
                    name: child.name().to_string(),
                    is_selected: index == self.selected,
                    has_children: child.has_children(),
                }
            })
            .collect();

        MenuView {
            title: self.current_path(),
            items,
            selected_index: self.selected,
            longest_child_name: node.longest_child_name().to_string(),
            longest_child_size: node.longest_child_size(),
        }
    }

    fn child_count(&self) -> usize {
        self.tree.node(self.current).child_count()
    }

    fn move_to(&mut self, id: NodeId) {
        self.current = id;
        self.selected = middle_index(self.tree.node(id).child_count());
        log::debug!(
            "Navigator: now at {:?}, selected index {}",
            self.tree.full_path(id),
            self.selected
        );
    }
}

fn middle_index(count: usize) -> usize {
    count / 2
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::DirLister;
    use proptest::prelude::*;
    use std::io;
    use std::path::Path;

    struct NoDirs;

    impl DirLister for NoDirs {
        fn list_subdirs(&self, _path: &Path) -> io::Result<Vec<String>> {
            Ok(Vec::new())
        }
    }

    fn navigator(text: &str) -> TreeNavigator {
        TreeNavigator::new(PathTree::parse_with(text, '\\', &NoDirs).unwrap())
    }

    fn selected_name(nav: &TreeNavigator) -> String {
        let id = nav.selected_child().unwrap();
        nav.tree().name(id).to_string()
    }

    #[test]
    fn test_initial_selection_is_centered() {
        let nav = navigator("A\nB\nC\nD\nE");
        assert_eq!(nav.selected_index(), 2);
        assert_eq!(selected_name(&nav), "C");

        let nav = navigator("A\nB\nC\nD");
        assert_eq!(selected_name(&nav), "C");

        let nav = navigator("A");
        assert_eq!(selected_name(&nav), "A");
    }

    #[test]
    fn test_selection_wraps_around() {
        let mut nav = navigator("B\nD\nF");
        nav.selection_up();
        assert_eq!(selected_name(&nav), "B");

        nav.selection_down();
        nav.selection_down();
        nav.selection_down();
        assert_eq!(selected_name(&nav), "B");

        nav.selection_up();
        assert_eq!(selected_name(&nav), "F");
    }

    #[test]
    fn test_enter_selected_leaf_is_refused() {
        let mut nav = navigator("A\nB\nC");
        let before = (nav.current_node(), nav.selected_index());
        assert!(!nav.enter_selected());
        assert_eq!((nav.current_node(), nav.selected_index()), before);
    }

    #[test]
    fn test_enter_parent_at_root_is_refused() {
        let mut nav = navigator("A\nB");
        assert!(nav.is_at_root());
        assert!(!nav.enter_parent());
        assert_eq!(nav.current_node(), nav.tree().root());
    }

    #[test]
    fn test_descend_and_ascend_recenter() {
        let mut nav = navigator("X\\1\nX\\2\nX\\3\nX\\4\nX\\5\nY\nZ");
        // root children: X, Y, Z
        nav.selection_up();
        assert_eq!(selected_name(&nav), "X");

        assert!(nav.enter_selected());
        assert_eq!(nav.tree().name(nav.current_node()), "X");
        assert_eq!(selected_name(&nav), "3");

        nav.selection_down();
        assert_eq!(selected_name(&nav), "4");

        assert!(nav.enter_parent());
        assert!(nav.is_at_root());
        // recentered on Y rather than restored to X
        assert_eq!(selected_name(&nav), "Y");
    }

    #[test]
    fn test_paths_for_launching() {
        let mut nav = navigator("D:\\Work\\a\nD:\\Work\\b\nD:\\Games");
        assert_eq!(nav.current_path(), "");
        assert_eq!(nav.selected_path().as_deref(), Some("D:"));

        assert!(nav.enter_selected());
        assert_eq!(nav.current_path(), "D:");
        assert_eq!(selected_name(&nav), "Work");
        assert_eq!(nav.selected_path().as_deref(), Some("D:\\Work"));
    }

    #[test]
    fn test_menu_view_reports_row_facts() {
        let nav = navigator("A\\1\nA\\2\nBB\nCCC");
        let view = nav.menu_view();

        let names: Vec<&str> = view.items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["A", "BB", "CCC"]);
        assert_eq!(view.selected_index, 1);
        assert!(view.items[1].is_selected);
        assert!(!view.items[0].is_selected);
        assert!(view.items[0].has_children);
        assert!(!view.items[2].has_children);
        assert_eq!(view.longest_child_name, "CCC");
        assert_eq!(view.title, "");
    }

    proptest! {
        #[test]
        fn prop_full_cycle_returns_to_start(count in 1usize..12, steps in 0usize..40) {
            let text: Vec<String> = (0..count).map(|i| format!("n{:02}", i)).collect();
            let mut nav = navigator(&text.join("\n"));
            let start = nav.selected_index();

            for _ in 0..steps {
                nav.selection_down();
            }
            prop_assert_eq!(nav.selected_index(), (start + steps) % count);

            for _ in 0..steps {
                nav.selection_up();
            }
            prop_assert_eq!(nav.selected_index(), start);
        }

        #[test]
        fn prop_entering_a_level_selects_middle(count in 1usize..12) {
            let text: Vec<String> = (0..count).map(|i| format!("P\\c{:02}", i)).collect();
            let mut text = text.join("\n");
            text.push_str("\nQ");
            let mut nav = navigator(&text);
            // root children are P and Q; middle is Q
            nav.selection_up();
            if count >= 2 {
                prop_assert!(nav.enter_selected());
                prop_assert_eq!(nav.selected_index(), count / 2);
            }
        }
    }
}
