//! Build orchestration.
//!
//! [`Builder`] owns the configuration for one wiki and drives a full build
//! pass: walk the source tree, resolve the node set, render every node, and
//! write the results into the mirrored output tree. Discovery is completed
//! before any rendering starts — a listing page embeds its full child set,
//! so nothing can be written until the whole tree is known.
//!
//! Any failure aborts the remaining worklist for the pass; nothing is
//! retried or skipped. Files written by an earlier successful pass are not
//! rolled back.

use crate::config::WikiConfig;
use crate::middleware::Middleware;
use crate::node::{Listing, Page};
use crate::render::{RenderError, Renderer};
use crate::resolve::resolve;
use crate::walk::{walk, WalkError};
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

/// Umbrella error for one build pass, carrying the offending node's path
/// where one exists.
#[derive(Error, Debug)]
pub enum BuildError {
    #[error(transparent)]
    Walk(#[from] WalkError),
    #[error("failed to load templates: {0}")]
    Templates(#[from] tera::Error),
    #[error("failed to build '{path}': {source}")]
    Node {
        path: String,
        #[source]
        source: RenderError,
    },
    #[error("failed to write '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub struct Builder {
    config: WikiConfig,
    middleware: Option<Middleware>,
}

impl Builder {
    pub fn new(config: WikiConfig) -> Self {
        Builder {
            config,
            middleware: None,
        }
    }

    /// Install a post-render middleware, applied to every document after
    /// template expansion and before the file is written.
    pub fn with_middleware(mut self, middleware: Middleware) -> Self {
        self.middleware = Some(middleware);
        self
    }

    pub fn config(&self) -> &WikiConfig {
        &self.config
    }

    /// Run one full build pass and return the paths of every file written,
    /// documents first, listings after.
    pub fn build(&self) -> Result<Vec<PathBuf>, BuildError> {
        let resolved = resolve(walk(
            &self.config.source_dir,
            &self.config.document_extensions,
        ))?;
        let renderer = Renderer::new(
            &self.config.source_dir,
            self.config.template_dir.as_deref(),
        )?;

        let mut written = Vec::new();
        for page in &resolved.pages {
            written.push(self.write_page(&renderer, page)?);
        }
        for listing in resolved.directories.values() {
            written.push(self.write_listing(&renderer, listing)?);
        }
        Ok(written)
    }

    /// Render one document and write it to the mirrored output path with the
    /// extension swapped for `.html`.
    fn write_page(&self, renderer: &Renderer, page: &Page) -> Result<PathBuf, BuildError> {
        let mut html = renderer.render_page(page).map_err(|source| BuildError::Node {
            path: page.path.clone(),
            source,
        })?;
        if let Some(middleware) = &self.middleware {
            html = middleware(&page.href(), &html);
        }

        let dest = self.config.output_dir.join(page.html_path());
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).map_err(|source| BuildError::Io {
                path: parent.display().to_string(),
                source,
            })?;
        }
        fs::write(&dest, html).map_err(|source| BuildError::Io {
            path: dest.display().to_string(),
            source,
        })?;
        Ok(dest)
    }

    /// Render one listing and write it as `index.html` inside the mirrored
    /// output directory.
    fn write_listing(&self, renderer: &Renderer, listing: &Listing) -> Result<PathBuf, BuildError> {
        let html = renderer
            .render_listing(listing)
            .map_err(|source| BuildError::Node {
                path: listing.path.clone(),
                source,
            })?;

        let dest_dir = if listing.is_root() {
            self.config.output_dir.clone()
        } else {
            self.config.output_dir.join(&listing.path)
        };
        fs::create_dir_all(&dest_dir).map_err(|source| BuildError::Io {
            path: dest_dir.display().to_string(),
            source,
        })?;

        let dest = dest_dir.join("index.html");
        fs::write(&dest, html).map_err(|source| BuildError::Io {
            path: dest.display().to_string(),
            source,
        })?;
        Ok(dest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn builder_for(tmp: &TempDir, files: &[&str]) -> Builder {
        let source = tmp.path().join("wiki");
        for file in files {
            let path = source.join(file);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(&path, "# hello\n").unwrap();
        }
        fs::create_dir_all(&source).unwrap();
        Builder::new(WikiConfig {
            source_dir: source,
            output_dir: tmp.path().join("_html"),
            ..WikiConfig::default()
        })
    }

    #[test]
    fn build_mirrors_the_source_tree() {
        let tmp = TempDir::new().unwrap();
        let builder = builder_for(&tmp, &["home.md", "subdir/stuff.md"]);

        let written = builder.build().unwrap();

        let out = tmp.path().join("_html");
        assert!(out.join("home.html").exists());
        assert!(out.join("subdir/stuff.html").exists());
        assert!(out.join("index.html").exists());
        assert!(out.join("subdir/index.html").exists());
        assert_eq!(written.len(), 4);
    }

    #[test]
    fn reserved_index_aborts_before_any_write() {
        let tmp = TempDir::new().unwrap();
        let builder = builder_for(&tmp, &["home.md", "subdir/index.md"]);

        let err = builder.build().unwrap_err();
        assert!(matches!(err, BuildError::Walk(WalkError::ReservedFileName { .. })));
        assert!(!tmp.path().join("_html").exists());
    }

    #[test]
    fn middleware_rewrites_document_output() {
        let tmp = TempDir::new().unwrap();
        let builder = builder_for(&tmp, &["home.md"])
            .with_middleware(Box::new(|link, html| format!("<!-- {link} -->\n{html}")));

        builder.build().unwrap();

        let html = fs::read_to_string(tmp.path().join("_html/home.html")).unwrap();
        assert!(html.starts_with("<!-- /home.html -->"));
    }

    #[test]
    fn middleware_not_applied_to_listings() {
        let tmp = TempDir::new().unwrap();
        let builder = builder_for(&tmp, &["home.md"])
            .with_middleware(Box::new(|_, _| "REPLACED".to_string()));

        builder.build().unwrap();

        let listing = fs::read_to_string(tmp.path().join("_html/index.html")).unwrap();
        assert_ne!(listing, "REPLACED");
    }

    #[test]
    fn rebuild_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let builder = builder_for(&tmp, &["home.md", "subdir/stuff.md"]);

        let first = builder.build().unwrap();
        let second = builder.build().unwrap();
        assert_eq!(first, second);

        let html = fs::read_to_string(tmp.path().join("_html/home.html")).unwrap();
        assert!(html.contains("<h1>hello</h1>"));
    }

    #[test]
    fn written_paths_round_trip_relative_paths() {
        let tmp = TempDir::new().unwrap();
        let builder = builder_for(&tmp, &["home.md", "a/b/c/d.md"]);

        let written = builder.build().unwrap();

        for page_rel in ["home.html", "a/b/c/d.html"] {
            let expected = tmp.path().join("_html").join(page_rel);
            assert_eq!(
                written.iter().filter(|p| **p == expected).count(),
                1,
                "{page_rel} should be written exactly once"
            );
        }
    }
}
