//! Source tree traversal.
//!
//! Walks the wiki source directory and lazily yields one [`WalkedDoc`] per
//! recognized document: its file name, its breadcrumb trail, and the
//! extension it matched. Hidden entries (leading `.`) are pruned from the
//! traversal entirely — neither descended into nor yielded.
//!
//! ## Ordering
//!
//! Within each directory, files are visited before subdirectories and both
//! are name-sorted. A directory's own documents are therefore always
//! discovered before any document beneath its subdirectories, and two walks
//! over an unchanged tree yield identical sequences.
//!
//! ## Reserved name
//!
//! A source file whose base name is literally `index` would collide with the
//! synthesized listing pages, so the walker rejects it anywhere in the tree
//! with [`WalkError::ReservedFileName`].

use crate::crumb::Crumb;
use std::cmp::Ordering;
use std::path::Path;
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

/// Base file name (extension stripped) that no source document may use.
pub const RESERVED_INDEX_TOKEN: &str = "index";

#[derive(Error, Debug)]
pub enum WalkError {
    #[error("reserved file name '{path}': 'index' collides with generated listing pages")]
    ReservedFileName { path: String },
    #[error("IO error while walking source tree: {0}")]
    Io(#[from] walkdir::Error),
}

/// One qualifying document yielded by the walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkedDoc {
    /// File name, extension included (`stuff.md`).
    pub file_name: String,
    /// Root crumb, one crumb per directory segment, then the linkless
    /// file crumb.
    pub crumbs: Vec<Crumb>,
    /// The configured extension the file name matched.
    pub ext: String,
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Files before directories, each group name-sorted.
fn files_first(a: &DirEntry, b: &DirEntry) -> Ordering {
    let key = |e: &DirEntry| (e.file_type().is_dir(), e.file_name().to_owned());
    key(a).cmp(&key(b))
}

/// Lazily walk `source_dir`, yielding each document whose name ends with one
/// of `extensions`.
///
/// The sequence is finite and non-restartable; consume it once per build
/// pass. Errors terminate the useful portion of the sequence — callers stop
/// at the first `Err`.
pub fn walk<'a>(
    source_dir: &'a Path,
    extensions: &'a [String],
) -> impl Iterator<Item = Result<WalkedDoc, WalkError>> + 'a {
    WalkDir::new(source_dir)
        .min_depth(1)
        .sort_by(files_first)
        .into_iter()
        .filter_entry(|entry| !is_hidden(entry))
        .filter_map(move |entry| {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => return Some(Err(WalkError::Io(err))),
            };
            if !entry.file_type().is_file() {
                return None;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            let ext = extensions.iter().find(|ext| name.ends_with(ext.as_str()))?;
            Some(classify(entry.path(), source_dir, name, ext))
        })
}

/// Build the [`WalkedDoc`] for one qualifying file, rejecting the reserved
/// index name.
fn classify(
    full_path: &Path,
    source_dir: &Path,
    file_name: String,
    ext: &str,
) -> Result<WalkedDoc, WalkError> {
    let rel_path = full_path
        .strip_prefix(source_dir)
        .unwrap_or(full_path)
        .to_string_lossy()
        .replace(std::path::MAIN_SEPARATOR, "/");

    let base = file_name
        .strip_suffix(ext)
        .unwrap_or(&file_name)
        .trim_end_matches('.');
    if base == RESERVED_INDEX_TOKEN {
        return Err(WalkError::ReservedFileName { path: rel_path });
    }

    let segments: Vec<&str> = rel_path.split('/').collect();
    let mut crumbs = vec![Crumb::root()];
    let mut link = String::from("/");
    for segment in &segments[..segments.len() - 1] {
        link.push_str(segment);
        link.push('/');
        crumbs.push(Crumb::new(*segment, Some(link.clone())));
    }
    crumbs.push(Crumb::new(file_name.as_str(), None));

    Ok(WalkedDoc {
        file_name,
        crumbs,
        ext: ext.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn md_exts() -> Vec<String> {
        vec!["md".to_string()]
    }

    fn make_wiki(files: &[&str]) -> TempDir {
        let tmp = TempDir::new().unwrap();
        for file in files {
            let path = tmp.path().join(file);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(&path, "# hello\n").unwrap();
        }
        tmp
    }

    fn collect(tmp: &TempDir, exts: &[String]) -> Vec<WalkedDoc> {
        walk(tmp.path(), exts)
            .collect::<Result<Vec<_>, _>>()
            .unwrap()
    }

    #[test]
    fn yields_only_recognized_extensions() {
        let tmp = make_wiki(&["home.md", "notes.txt", "data.md.csv"]);
        let docs = collect(&tmp, &md_exts());
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].file_name, "home.md");
    }

    #[test]
    fn skips_hidden_files_and_directories() {
        let tmp = make_wiki(&["home.md", ".drafts/secret.md", ".hidden.md"]);
        let docs = collect(&tmp, &md_exts());
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].file_name, "home.md");
    }

    #[test]
    fn root_document_has_root_and_self_crumbs() {
        let tmp = make_wiki(&["home.md"]);
        let docs = collect(&tmp, &md_exts());
        assert_eq!(
            docs[0].crumbs,
            vec![Crumb::root(), Crumb::new("home.md", None)]
        );
    }

    #[test]
    fn crumb_count_is_depth_plus_two() {
        let tmp = make_wiki(&["a/b/c/d.md"]);
        let docs = collect(&tmp, &md_exts());
        assert_eq!(
            docs[0].crumbs,
            vec![
                Crumb::root(),
                Crumb::new("a", Some("/a/".to_string())),
                Crumb::new("b", Some("/a/b/".to_string())),
                Crumb::new("c", Some("/a/b/c/".to_string())),
                Crumb::new("d.md", None),
            ]
        );
    }

    #[test]
    fn last_crumb_never_links() {
        let tmp = make_wiki(&["home.md", "subdir/stuff.md", "a/b/c/d.md"]);
        for doc in collect(&tmp, &md_exts()) {
            assert!(doc.crumbs.last().unwrap().link.is_none());
        }
    }

    #[test]
    fn parent_documents_come_before_subdirectory_documents() {
        let tmp = make_wiki(&["zz.md", "another_page.md", "subdir/stuff.md"]);
        let names: Vec<String> = collect(&tmp, &md_exts())
            .into_iter()
            .map(|d| d.file_name)
            .collect();
        assert_eq!(names, vec!["another_page.md", "zz.md", "stuff.md"]);
    }

    #[test]
    fn reserved_index_name_is_rejected() {
        let tmp = make_wiki(&["home.md", "index.md"]);
        let result: Result<Vec<_>, _> = walk(tmp.path(), &md_exts()).collect();
        assert!(matches!(
            result,
            Err(WalkError::ReservedFileName { path }) if path == "index.md"
        ));
    }

    #[test]
    fn reserved_index_name_is_rejected_in_subdirectories() {
        let tmp = make_wiki(&["home.md", "subdir/index.md"]);
        let result: Result<Vec<_>, _> = walk(tmp.path(), &md_exts()).collect();
        assert!(matches!(
            result,
            Err(WalkError::ReservedFileName { path }) if path == "subdir/index.md"
        ));
    }

    #[test]
    fn index_prefix_alone_is_not_reserved() {
        let tmp = make_wiki(&["indexing.md", "index_of_things.md"]);
        let docs = collect(&tmp, &md_exts());
        assert_eq!(docs.len(), 2);
    }

    #[test]
    fn walks_repeatably() {
        let tmp = make_wiki(&["home.md", "subdir/stuff.md", "other/deep/note.md"]);
        assert_eq!(collect(&tmp, &md_exts()), collect(&tmp, &md_exts()));
    }
}
