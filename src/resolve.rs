//! Path resolution and listing-tree construction.
//!
//! Consumes the full walker sequence and produces the complete node set for
//! one build pass: every document as a [`Page`], plus one [`Listing`] per
//! directory that contains a document directly or through any descendant.
//!
//! The walk is consumed eagerly — a directory's listing page embeds its
//! complete child set, so no listing can be finalized until the whole tree
//! has been discovered. Listings materialize lazily while documents stream
//! in: registering a document under `a/b/c` creates listings for `a/b/c`,
//! `a/b`, and `a` on first need, each attached to its parent at creation
//! time, ancestors before descendants. Re-encountering a directory reuses
//! its existing listing and appends further children.
//!
//! Child order within a listing is discovery order, not lexical order: a
//! sub-listing is attached at the moment the first document beneath it is
//! seen, so siblings may interleave with documents.

use crate::crumb::Crumb;
use crate::node::{Child, Listing, ListingRef, Page, ROOT_PATH};
use crate::walk::{WalkError, WalkedDoc};
use std::collections::BTreeMap;

/// The fully resolved node set for one build pass.
///
/// `directories` is the directory registry: path (with `.` for the root) to
/// listing. `pages` preserves walker order. Both are rebuilt from scratch on
/// every pass and discarded afterward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub directories: BTreeMap<String, Listing>,
    pub pages: Vec<Page>,
}

/// Immediate parent directory path; `.` for entries at the wiki root.
fn parent_dir(path: &str) -> String {
    match path.rsplit_once('/') {
        Some((dir, _)) => dir.to_string(),
        None => ROOT_PATH.to_string(),
    }
}

/// Consume the walker and build the document list plus the linked listing
/// tree.
///
/// Fails on the first walker error without surfacing any partial result.
pub fn resolve(
    walked: impl Iterator<Item = Result<WalkedDoc, WalkError>>,
) -> Result<Resolved, WalkError> {
    let mut directories = BTreeMap::new();
    // The root listing always exists, even for an empty wiki.
    directories.insert(
        ROOT_PATH.to_string(),
        Listing::new(ROOT_PATH, vec![Crumb::root()]),
    );

    let mut pages = Vec::new();
    for doc in walked {
        let doc = doc?;

        // The document's relative path is its crumb names joined, minus the
        // synthetic root crumb.
        let rel_path = doc
            .crumbs
            .iter()
            .skip(1)
            .map(|c| c.name.as_str())
            .collect::<Vec<_>>()
            .join("/");
        let page = Page::new(rel_path, doc.crumbs.clone(), doc.ext);

        let parent = parent_dir(&page.path);
        let parent_crumbs = &doc.crumbs[..doc.crumbs.len() - 1];
        ensure_listing(&mut directories, &parent, parent_crumbs);
        if let Some(listing) = directories.get_mut(&parent) {
            listing.add_child(Child::Page(page.clone()));
        }

        pages.push(page);
    }

    Ok(Resolved { directories, pages })
}

/// Get-or-create upsert for the directory registry.
///
/// If `path` is new, its ancestors are created first (recursively, from the
/// same crumb trail truncated by one), then the new listing is registered
/// and attached as a child of its immediate parent — exactly once, at
/// creation time.
fn ensure_listing(directories: &mut BTreeMap<String, Listing>, path: &str, crumbs: &[Crumb]) {
    if directories.contains_key(path) {
        return;
    }

    let parent = parent_dir(path);
    ensure_listing(directories, &parent, &crumbs[..crumbs.len() - 1]);

    directories.insert(path.to_string(), Listing::new(path, crumbs.to_vec()));
    if let Some(parent_listing) = directories.get_mut(&parent) {
        parent_listing.add_child(Child::Listing(ListingRef::new(path)));
    }
}
