//! # mdwiki
//!
//! A lightweight wiki compiler: point it at a directory tree of markdown
//! documents and it produces a navigable static HTML site. Every document
//! gets breadcrumb navigation; every directory gets a synthesized listing
//! page enumerating its files and subdirectories, all the way up to the
//! root.
//!
//! # Pipeline
//!
//! A build pass runs in two strict phases:
//!
//! ```text
//! 1. Discover   walk the source tree  →  pages + linked listing tree
//! 2. Emit       render each node      →  mirrored .html files on disk
//! ```
//!
//! Discovery must finish before anything is emitted: a directory's listing
//! page embeds its complete child set, and listings are created lazily as
//! documents are found beneath them — including for directories that hold
//! no document themselves but sit above one that does.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`crumb`] | Breadcrumb trail steps (name + optional link) |
//! | [`node`] | `Page` and `Listing` content nodes: identity, output links, titles |
//! | [`walk`] | Source tree traversal — extension filtering, hidden-entry pruning, reserved-name rejection |
//! | [`resolve`] | The tree builder: documents in, linked listing tree out |
//! | [`render`] | Markdown conversion (pulldown-cmark) + template expansion (tera) |
//! | [`build`] | Orchestration: one `build()` pass from walk to written files |
//! | [`middleware`] | Post-render HTML hooks; ships absolute→relative link rewriting |
//! | [`config`] | `wiki.toml` loading with spec'd defaults |
//! | [`watch`] | Rebuild-on-change loop over the source tree |
//! | [`scaffold`] | `init` skeleton for a new wiki |
//! | [`output`] | CLI output formatting |
//!
//! # Conventions
//!
//! - Source documents are recognized by configurable extension suffix
//!   (default `md`); hidden entries (leading `.`) are ignored at any depth.
//! - A source file whose base name is `index` is rejected anywhere in the
//!   tree — it would collide with the generated listing pages.
//! - The output tree mirrors the source tree: `subdir/stuff.md` becomes
//!   `subdir/stuff.html`, and `subdir/` gains an `index.html`.
//! - Nodes live for exactly one build pass; nothing persists between runs.

pub mod build;
pub mod config;
pub mod crumb;
pub mod middleware;
pub mod node;
pub mod output;
pub mod render;
pub mod resolve;
pub mod scaffold;
pub mod walk;
pub mod watch;
