//! Content nodes: pages and directory listings.
//!
//! The wiki tree has exactly two kinds of node. A [`Page`] is one source
//! document; a [`Listing`] is the auto-generated index of one directory and
//! holds an ordered collection of children. Children are modeled as the
//! closed [`Child`] enum — the builder only ever needs to ask "document or
//! directory?", so there is no open-ended trait hierarchy here.
//!
//! Nodes carry identity only (relative path, breadcrumb trail, derived
//! output link). Rendering lives in [`crate::render`], which owns the
//! template engine and the source root.

use crate::crumb::Crumb;
use serde::Serialize;

/// Relative path of the synthetic root listing.
pub const ROOT_PATH: &str = ".";

/// One source document, discovered by the walker and rendered to a
/// mirrored `.html` file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    /// `/`-separated path relative to the wiki source root.
    pub path: String,
    /// Trail from the root crumb down to this document (final crumb linkless).
    pub crumbs: Vec<Crumb>,
    /// The recognized extension this file matched, e.g. `md`.
    pub ext: String,
}

impl Page {
    pub fn new(path: impl Into<String>, crumbs: Vec<Crumb>, ext: impl Into<String>) -> Self {
        Page {
            path: path.into(),
            crumbs,
            ext: ext.into(),
        }
    }

    /// File name component, extension included (`subdir/stuff.md` → `stuff.md`).
    pub fn file_name(&self) -> &str {
        match self.path.rsplit_once('/') {
            Some((_, name)) => name,
            None => &self.path,
        }
    }

    /// Relative output path: the source path with the matched extension
    /// swapped for `.html`.
    ///
    /// The swap is generalized over extension length: strip the matched
    /// extension, drop the separating dot, append `.html`.
    pub fn html_path(&self) -> String {
        format!("{}.html", stem(&self.path, &self.ext))
    }

    /// Absolute-from-site-root link to the rendered page.
    pub fn href(&self) -> String {
        format!("/{}", self.html_path())
    }

    /// Display title: base name with the extension stripped, separator
    /// characters turned into spaces, and each word title-cased.
    ///
    /// `another_page.md` → "Another Page".
    pub fn title(&self) -> String {
        title_case(&stem(self.file_name(), &self.ext).replace(['-', '_'], " "))
    }
}

/// Strip the matched extension from `name`, dropping the dot that
/// separated it. `stuff.md` with ext `md` → `stuff`.
fn stem<'a>(name: &'a str, ext: &str) -> &'a str {
    name.strip_suffix(ext)
        .unwrap_or(name)
        .trim_end_matches('.')
}

fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// The auto-generated index page of one directory, with its direct children
/// in discovery order.
///
/// A listing exists for every directory that contains a document directly or
/// through any descendant. Children are append-only; a directory encountered
/// again reuses its existing listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Listing {
    /// `/`-separated path relative to the source root; `.` for the root.
    pub path: String,
    /// Trail from the root crumb down to this directory. The directory's own
    /// crumb keeps its link (listings link to themselves from deeper pages).
    pub crumbs: Vec<Crumb>,
    /// Direct children, documents and sub-listings mixed, in the order their
    /// triggering document was first encountered.
    pub children: Vec<Child>,
}

impl Listing {
    pub fn new(path: impl Into<String>, crumbs: Vec<Crumb>) -> Self {
        Listing {
            path: path.into(),
            crumbs,
            children: Vec::new(),
        }
    }

    pub fn is_root(&self) -> bool {
        self.path == ROOT_PATH
    }

    /// Directory name shown in parent listings; the root shows as `index`.
    pub fn name(&self) -> &str {
        if self.is_root() {
            "index"
        } else {
            match self.path.rsplit_once('/') {
                Some((_, name)) => name,
                None => &self.path,
            }
        }
    }

    /// Absolute-from-site-root link to the listing's `index.html`.
    pub fn href(&self) -> String {
        if self.is_root() {
            "/index.html".to_string()
        } else {
            format!("/{}/index.html", self.path)
        }
    }

    pub fn add_child(&mut self, child: Child) {
        self.children.push(child);
    }
}

/// A child of a listing: either a document or a nested directory listing.
///
/// Sub-listings are held by reference (path only) rather than ownership —
/// the directory registry owns every listing, and a child listing keeps
/// accumulating children of its own after being attached to its parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Child {
    Page(Page),
    Listing(ListingRef),
}

/// Identity snapshot of a child listing, enough to name and link it from
/// its parent's listing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingRef {
    pub path: String,
}

impl ListingRef {
    pub fn new(path: impl Into<String>) -> Self {
        ListingRef { path: path.into() }
    }

    pub fn name(&self) -> &str {
        match self.path.rsplit_once('/') {
            Some((_, name)) => name,
            None => &self.path,
        }
    }

    pub fn href(&self) -> String {
        format!("/{}/index.html", self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(path: &str) -> Page {
        Page::new(path, vec![Crumb::root()], "md")
    }

    #[test]
    fn page_href_swaps_extension() {
        assert_eq!(page("stuff.md").href(), "/stuff.html");
        assert_eq!(page("subdir/stuff.md").href(), "/subdir/stuff.html");
    }

    #[test]
    fn page_href_is_absolute_and_html() {
        let p = page("a/b/c/d.md");
        assert!(p.href().starts_with('/'));
        assert!(p.href().ends_with(".html"));
    }

    #[test]
    fn extension_swap_is_not_fixed_length() {
        let p = Page::new("notes.markdown", vec![Crumb::root()], "markdown");
        assert_eq!(p.href(), "/notes.html");
    }

    #[test]
    fn title_strips_extension_and_separators() {
        assert_eq!(page("another_page.md").title(), "Another Page");
        assert_eq!(page("subdir/my-notes.md").title(), "My Notes");
    }

    #[test]
    fn title_uses_base_name_only() {
        assert_eq!(page("deep/nested/stuff.md").title(), "Stuff");
    }

    #[test]
    fn root_listing_href() {
        let root = Listing::new(ROOT_PATH, vec![Crumb::root()]);
        assert!(root.is_root());
        assert_eq!(root.href(), "/index.html");
        assert_eq!(root.name(), "index");
    }

    #[test]
    fn nested_listing_href_and_name() {
        let listing = Listing::new("a/b", vec![]);
        assert_eq!(listing.href(), "/a/b/index.html");
        assert_eq!(listing.name(), "b");
    }

    #[test]
    fn children_keep_append_order() {
        let mut listing = Listing::new(ROOT_PATH, vec![Crumb::root()]);
        listing.add_child(Child::Page(page("one.md")));
        listing.add_child(Child::Listing(ListingRef::new("subdir")));
        listing.add_child(Child::Page(page("two.md")));

        assert_eq!(listing.children.len(), 3);
        assert!(matches!(listing.children[0], Child::Page(_)));
        assert!(matches!(listing.children[1], Child::Listing(_)));
        assert!(matches!(listing.children[2], Child::Page(_)));
    }
}
