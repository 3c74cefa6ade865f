use crate::error::LoadError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, MAIN_SEPARATOR};
use std::time::Instant;

/// Segment that expands to every subdirectory of the path before it
pub const WILDCARD: &str = "*";

/// Stable handle of a node inside its [`PathTree`] arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(usize);

/// Size of the longest child row, in terminal cells. Zero until the renderer measured it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildExtent {
    pub width: u16,
    pub height: u16,
}

impl ChildExtent {
    pub fn is_measured(&self) -> bool {
        self.width != 0
    }
}

/// Lists the subdirectories of a directory for wildcard expansion
pub trait DirLister {
    fn list_subdirs(&self, path: &Path) -> io::Result<Vec<String>>;
}

/// Lists subdirectories on the real filesystem
#[derive(Debug, Default, Clone, Copy)]
pub struct FsDirLister;

impl DirLister for FsDirLister {
    fn list_subdirs(&self, path: &Path) -> io::Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(path)? {
            match entry {
                Ok(entry) => {
                    // follows symlinks
                    if entry.path().is_dir() {
                        names.push(entry.file_name().to_string_lossy().into_owned());
                    }
                }
                Err(err) => {
                    log::warn!("Skipping unreadable entry in {:?}: {}", path, err);
                }
            }
        }
        Ok(names)
    }
}

/// One entry of the folder menu
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    name: String,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
    explicit: bool,
    longest_child_name: String,
    longest_child_size: ChildExtent,
}

impl Node {
    fn new(name: String, parent: Option<NodeId>) -> Self {
        Self {
            name,
            parent,
            ..Self::default()
        }
    }

    /// Display label, possibly several path segments joined after flattening
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Children in name order
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Whether an input line ended exactly on this node
    pub fn is_explicit(&self) -> bool {
        self.explicit
    }

    pub fn longest_child_name(&self) -> &str {
        &self.longest_child_name
    }

    pub fn longest_child_size(&self) -> ChildExtent {
        self.longest_child_size
    }

    /// Offer a child name to the longest-name cache.
    ///
    /// Ties go to the name that sorts first, so the result does not depend on
    /// insertion order.
    fn offer_longest(&mut self, name: &str) {
        let candidate = name.chars().count();
        let current = self.longest_child_name.chars().count();
        // Both comparisons are always evaluated; no early exit on the lengths.
        let longer = candidate > current;
        let earlier_tie = (candidate == current) & (name < self.longest_child_name.as_str());
        if longer | earlier_tie {
            self.longest_child_name.clear();
            self.longest_child_name.push_str(name);
        }
    }
}

/// Hierarchy of folders built from a folder list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathTree {
    nodes: Vec<Node>,
    separator: char,
}

impl Default for PathTree {
    fn default() -> Self {
        Self::with_separator(MAIN_SEPARATOR)
    }
}

impl PathTree {
    /// Create a tree holding only the root
    pub fn with_separator(separator: char) -> Self {
        Self {
            nodes: vec![Node::new(String::new(), None)],
            separator,
        }
    }

    /// Parse a folder list using the platform separator and the real filesystem
    pub fn parse(text: &str) -> Result<Self, LoadError> {
        Self::parse_with(text, MAIN_SEPARATOR, &FsDirLister)
    }

    /// Read and parse a folder list file
    pub fn load_file<P: AsRef<Path>>(path: P, separator: char) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse_with(&text, separator, &FsDirLister)
    }

    /// Parse a folder list, one path per line, then flatten single-child chains
    pub fn parse_with(
        text: &str,
        separator: char,
        lister: &dyn DirLister,
    ) -> Result<Self, LoadError> {
        let start_time = Instant::now();
        let mut tree = Self::with_separator(separator);

        let mut inserted = 0usize;
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            tree.insert_path(line, lister);
            inserted += 1;
        }

        if inserted == 0 {
            return Err(LoadError::EmptyInput);
        }

        tree.flatten();
        let tree = tree.compact();
        if tree.is_empty() {
            log::warn!("PathTree: {} lines produced no folders", inserted);
            return Err(LoadError::EmptyInput);
        }

        log::info!(
            "PathTree: loaded {} lines into {} nodes in {:?}",
            inserted,
            tree.len(),
            start_time.elapsed()
        );
        Ok(tree)
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn separator(&self) -> char {
        self.separator
    }

    /// Number of nodes, root included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when there are no folders below the root
    pub fn is_empty(&self) -> bool {
        self.nodes[0].children.is_empty()
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn name(&self, id: NodeId) -> &str {
        &self.nodes[id.0].name
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// Look up a direct child by its display name
    pub fn child(&self, id: NodeId, name: &str) -> Option<NodeId> {
        self.search_children(id, name)
            .ok()
            .map(|pos| self.nodes[id.0].children[pos])
    }

    /// Look up a direct child that is known to exist.
    ///
    /// # Panics
    ///
    /// Panics if `id` has no child called `name`. Names must come from
    /// iterating the node's children.
    pub fn get_child(&self, id: NodeId, name: &str) -> NodeId {
        match self.child(id, name) {
            Some(child) => child,
            None => panic!(
                "no child named {:?} under {:?}",
                name,
                self.full_path(id)
            ),
        }
    }

    /// Add a child (or return the existing one with that name), keeping name order
    pub fn add_child(&mut self, parent: NodeId, name: &str) -> NodeId {
        match self.search_children(parent, name) {
            Ok(pos) => self.nodes[parent.0].children[pos],
            Err(pos) => {
                let id = NodeId(self.nodes.len());
                self.nodes.push(Node::new(name.to_string(), Some(parent)));
                let node = &mut self.nodes[parent.0];
                node.children.insert(pos, id);
                node.offer_longest(name);
                id
            }
        }
    }

    pub fn set_longest_child_size(&mut self, id: NodeId, size: ChildExtent) {
        self.nodes[id.0].longest_child_size = size;
    }

    /// Filesystem path of a node: names from the root down, joined by the separator
    pub fn full_path(&self, id: NodeId) -> String {
        let mut segments = Vec::new();
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let node = &self.nodes[current.0];
            if node.parent.is_none() {
                break;
            }
            segments.push(node.name.as_str());
            cursor = node.parent;
        }

        let mut path = String::new();
        for segment in segments.iter().rev() {
            join_segment(&mut path, segment, self.separator);
        }
        path
    }

    /// Get tree statistics
    pub fn stats(&self) -> TreeStats {
        let mut stats = TreeStats::default();
        let mut stack = vec![(self.root(), 0usize)];
        while let Some((id, depth)) = stack.pop() {
            let node = &self.nodes[id.0];
            if node.parent.is_some() {
                stats.nodes += 1;
                if node.children.is_empty() {
                    stats.leaves += 1;
                }
                stats.max_depth = stats.max_depth.max(depth);
            }
            stack.extend(node.children.iter().map(|&child| (child, depth + 1)));
        }
        stats
    }

    fn search_children(&self, id: NodeId, name: &str) -> Result<usize, usize> {
        self.nodes[id.0]
            .children
            .binary_search_by(|child| self.nodes[child.0].name.as_str().cmp(name))
    }

    fn insert_path(&mut self, line: &str, lister: &dyn DirLister) {
        let segments = split_segments(line, self.separator);
        let mut node = self.root();

        for (index, segment) in segments.iter().enumerate() {
            if *segment == WILDCARD {
                if index + 1 < segments.len() {
                    log::warn!("Ignoring segments after wildcard in {:?}", line);
                }
                self.expand_wildcard(node, lister);
                break;
            }
            node = self.add_child(node, segment);
        }

        self.nodes[node.0].explicit = true;
    }

    fn expand_wildcard(&mut self, node: NodeId, lister: &dyn DirLister) {
        let dir = self.full_path(node);
        match lister.list_subdirs(Path::new(&dir)) {
            Ok(names) => {
                log::debug!("Wildcard under {:?}: {} subdirectories", dir, names.len());
                for name in names {
                    self.add_child(node, &name);
                }
            }
            Err(err) => {
                log::warn!("Cannot expand wildcard under {:?}: {}", dir, err);
            }
        }
    }

    /// Collapse single-child chains below the root. The root itself is never merged.
    fn flatten(&mut self) {
        let root = self.root();
        let children = self.nodes[root.0].children.clone();
        for child in children {
            self.flatten_node(child);
        }
        self.rebuild_children(root);
    }

    /// Flatten the subtree under `id`, bottom-up. Returns true when `id`
    /// absorbed its only child and its name changed.
    fn flatten_node(&mut self, id: NodeId) -> bool {
        let children = self.nodes[id.0].children.clone();
        for &child in &children {
            self.flatten_node(child);
        }

        if children.len() != 1 || self.nodes[id.0].explicit {
            self.rebuild_children(id);
            return false;
        }

        let absorbed = std::mem::take(&mut self.nodes[children[0].0]);
        for &grandchild in &absorbed.children {
            self.nodes[grandchild.0].parent = Some(id);
        }

        let separator = self.separator;
        let node = &mut self.nodes[id.0];
        join_segment(&mut node.name, &absorbed.name, separator);
        node.children = absorbed.children;
        node.explicit = absorbed.explicit;
        node.longest_child_name = absorbed.longest_child_name;
        true
    }

    /// Re-sort children under their current names and recompute the longest name
    fn rebuild_children(&mut self, id: NodeId) {
        let mut children = self.nodes[id.0].children.clone();
        children.sort_by(|a, b| self.nodes[a.0].name.cmp(&self.nodes[b.0].name));

        let mut rebuilt = Node {
            children: Vec::with_capacity(children.len()),
            ..Node::default()
        };
        for child in children {
            rebuilt.offer_longest(&self.nodes[child.0].name);
            rebuilt.children.push(child);
        }

        let node = &mut self.nodes[id.0];
        node.children = rebuilt.children;
        node.longest_child_name = rebuilt.longest_child_name;
    }

    /// Drop nodes no longer reachable from the root and renumber the rest in pre-order
    fn compact(self) -> Self {
        let mut old_nodes = self.nodes;
        let mut remap: Vec<Option<NodeId>> = vec![None; old_nodes.len()];
        let mut order = Vec::with_capacity(old_nodes.len());

        let mut stack = vec![NodeId(0)];
        while let Some(old) = stack.pop() {
            remap[old.0] = Some(NodeId(order.len()));
            order.push(old);
            stack.extend(old_nodes[old.0].children.iter().rev().copied());
        }

        let nodes = order
            .into_iter()
            .map(|old| {
                let mut node = std::mem::take(&mut old_nodes[old.0]);
                node.children = node.children.iter().filter_map(|c| remap[c.0]).collect();
                node.parent = node.parent.and_then(|p| remap[p.0]);
                node
            })
            .collect();

        Self {
            nodes,
            separator: self.separator,
        }
    }
}

/// Statistics about the folder tree, root excluded
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TreeStats {
    pub nodes: usize,
    pub leaves: usize,
    pub max_depth: usize,
}

/// Split a line into segments. A run of leading separators stays as the first
/// segment so absolute paths survive; other empty segments are dropped.
fn split_segments(line: &str, separator: char) -> Vec<&str> {
    let body = line.trim_start_matches(separator);
    let lead = &line[..line.len() - body.len()];

    let mut segments = Vec::new();
    if !lead.is_empty() {
        segments.push(lead);
    }
    segments.extend(body.split(separator).filter(|s| !s.is_empty()));
    segments
}

fn join_segment(path: &mut String, segment: &str, separator: char) {
    if !path.is_empty() && !path.ends_with(separator) {
        path.push(separator);
    }
    path.push_str(segment);
}
