//! Binary search tree of books keyed by ISBN.
//!
//! Nodes own their children exclusively (`Option<Box<BookNode>>`). A `BookTree`
//! owns the root; searchers only ever borrow it.

use std::fmt;

use termtree::Tree;
use tracing::instrument;

use crate::domain::entities::Book;
use crate::domain::search::CatalogSearcher;

/// Levels shown by [`TreeNodeConvert::to_tree_string`] before subtrees are folded.
pub const DEFAULT_RENDER_DEPTH: usize = 64;

/// Tree node holding one book and its optional children.
pub struct BookNode {
    pub(crate) book: Book,
    pub(crate) left: Option<Box<BookNode>>,
    pub(crate) right: Option<Box<BookNode>>,
}

impl BookNode {
    /// Build a node from a book and already-built subtrees.
    ///
    /// No ordering check is done here: callers that need the BST-by-ISBN
    /// invariant go through [`TreeBuilder`](crate::domain::TreeBuilder).
    pub fn new(book: Book, left: Option<BookNode>, right: Option<BookNode>) -> Self {
        Self {
            book,
            left: left.map(Box::new),
            right: right.map(Box::new),
        }
    }

    pub fn leaf(book: Book) -> Self {
        Self::new(book, None, None)
    }

    pub fn book(&self) -> &Book {
        &self.book
    }

    pub fn left(&self) -> Option<&BookNode> {
        self.left.as_deref()
    }

    pub fn right(&self) -> Option<&BookNode> {
        self.right.as_deref()
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

// Default drop recurses once per level; list-shaped trees would blow the stack.
impl Drop for BookNode {
    fn drop(&mut self) {
        let mut stack: Vec<Box<BookNode>> = Vec::new();
        stack.extend(self.left.take());
        stack.extend(self.right.take());

        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
    }
}

// Derived impls would recurse per level; children are shown by ISBN only.
impl fmt::Debug for BookNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BookNode")
            .field("book", &self.book)
            .field("left", &self.left().map(|n| n.book.isbn()))
            .field("right", &self.right().map(|n| n.book.isbn()))
            .finish()
    }
}

/// Owner of a complete, immutable catalog tree.
#[derive(Default)]
pub struct BookTree {
    root: Option<Box<BookNode>>,
    len: usize,
}

impl BookTree {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Wrap an externally built node structure.
    ///
    /// The shape is taken as-is; ISBN lookups are only meaningful if it is
    /// ordered by ISBN.
    pub fn from_root(root: Option<BookNode>) -> Self {
        let root = root.map(Box::new);
        let len = Iter::new(root.as_deref()).count();
        Self { root, len }
    }

    pub(crate) fn from_parts(root: Option<Box<BookNode>>, len: usize) -> Self {
        Self { root, len }
    }

    pub fn root(&self) -> Option<&BookNode> {
        self.root.as_deref()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Searcher borrowing this tree.
    pub fn searcher(&self) -> CatalogSearcher<'_> {
        CatalogSearcher::new(self.root())
    }

    /// Number of levels, 0 for an empty tree.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack: Vec<(&BookNode, usize)> = self.root().map(|r| (r, 1)).into_iter().collect();

        while let Some((node, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            if let Some(left) = node.left() {
                stack.push((left, depth + 1));
            }
            if let Some(right) = node.right() {
                stack.push((right, depth + 1));
            }
        }

        max_depth
    }

    /// Pre-order iteration (node, left subtree, right subtree).
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self.root())
    }

    /// Books in ISBN order, assuming the tree is ordered.
    #[instrument(level = "debug", skip(self))]
    pub fn in_order(&self) -> Vec<&Book> {
        let mut books = Vec::with_capacity(self.len);
        let mut stack: Vec<&BookNode> = Vec::new();
        let mut current = self.root();

        while current.is_some() || !stack.is_empty() {
            while let Some(node) = current {
                stack.push(node);
                current = node.left();
            }
            if let Some(node) = stack.pop() {
                books.push(node.book());
                current = node.right();
            }
        }

        books
    }
}

impl fmt::Debug for BookTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BookTree")
            .field("root", &self.root().map(|n| n.book.isbn()))
            .field("len", &self.len)
            .finish()
    }
}

impl<'a> IntoIterator for &'a BookTree {
    type Item = &'a Book;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Pre-order iterator over the books of a tree, driven by an explicit stack.
pub struct Iter<'a> {
    stack: Vec<&'a BookNode>,
}

impl<'a> Iter<'a> {
    fn new(root: Option<&'a BookNode>) -> Self {
        Self {
            stack: root.into_iter().collect(),
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Book;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // right first so the left subtree is yielded first
        if let Some(right) = node.right() {
            self.stack.push(right);
        }
        if let Some(left) = node.left() {
            self.stack.push(left);
        }
        Some(node.book())
    }
}

/// Rendering of a tree for terminal display.
pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String> {
        self.to_tree_string_to_depth(DEFAULT_RENDER_DEPTH)
    }

    /// Render at most `max_depth` levels (at least the root). Deeper subtrees
    /// are folded into a single "... N more books" leaf.
    fn to_tree_string_to_depth(&self, max_depth: usize) -> Tree<String>;
}

impl TreeNodeConvert for BookNode {
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string_to_depth(&self, max_depth: usize) -> Tree<String> {
        let max_depth = max_depth.max(1);

        // pre-order pass: (label, parent index); a parent always precedes its children
        let mut entries: Vec<(String, usize)> = Vec::new();
        let mut stack: Vec<(&BookNode, String, usize, usize)> =
            vec![(self, self.book.to_string(), 0, 1)];

        while let Some((node, label, parent, depth)) = stack.pop() {
            let idx = entries.len();
            entries.push((label, parent));

            // right first so the left child is rendered first
            let children = [("R", node.right()), ("L", node.left())];
            if depth >= max_depth {
                let hidden: usize = children
                    .iter()
                    .filter_map(|(_, child)| *child)
                    .map(|child| Iter::new(Some(child)).count())
                    .sum();
                if hidden > 0 {
                    entries.push((format!("... {hidden} more books"), idx));
                }
                continue;
            }
            for (side, child) in children {
                if let Some(child) = child {
                    stack.push((child, format!("{side} {}", child.book), idx, depth + 1));
                }
            }
        }

        // assemble bottom-up so no step recurses over the node chain
        let mut pending: Vec<Vec<Tree<String>>> = entries.iter().map(|_| Vec::new()).collect();
        let mut rendered = Tree::new(String::new());
        for (idx, (label, parent)) in entries.into_iter().enumerate().rev() {
            let mut leaves = std::mem::take(&mut pending[idx]);
            leaves.reverse();
            let sub = Tree::new(label).with_leaves(leaves);
            if idx == 0 {
                rendered = sub;
            } else {
                pending[parent].push(sub);
            }
        }
        rendered
    }
}

impl TreeNodeConvert for BookTree {
    fn to_tree_string_to_depth(&self, max_depth: usize) -> Tree<String> {
        match self.root() {
            Some(root) => root.to_tree_string_to_depth(max_depth),
            None => Tree::new("Empty catalog".to_string()),
        }
    }
}
