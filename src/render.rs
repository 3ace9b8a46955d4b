//! Node rendering: markdown conversion plus template expansion.
//!
//! [`Renderer`] owns the tera template set and the source root; nodes carry
//! identity only. A document is read from disk, converted with
//! pulldown-cmark, and expanded through the `document.html` template with
//! `{ content, title, crumbs }`. A listing partitions its children into
//! files and sub-directories (stable, preserving each sub-sequence's order)
//! and expands `listing.html` with `{ files, directories, crumbs }`.
//!
//! ## Templates
//!
//! Stock templates are embedded in the binary. Pointing the renderer at a
//! template directory instead loads every `*.html` file in it by glob; a
//! missing or failing template surfaces as [`RenderError::Template`].

use crate::node::{Child, Listing, Page};
use pulldown_cmark::{html as md_html, Parser};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tera::Tera;
use thiserror::Error;

const DOCUMENT_TEMPLATE: &str = "document.html";
const LISTING_TEMPLATE: &str = "listing.html";

const STOCK_DOCUMENT: &str = include_str!("../static/templates/document.html");
const STOCK_LISTING: &str = include_str!("../static/templates/listing.html");

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("failed to read source file '{path}': {source}")]
    SourceRead {
        path: String,
        source: std::io::Error,
    },
    #[error("template error: {0}")]
    Template(#[from] tera::Error),
}

/// Listing-template view of a document child.
#[derive(Debug, Serialize)]
struct FileEntry {
    name: String,
    title: String,
    href: String,
}

/// Listing-template view of a sub-listing child.
#[derive(Debug, Serialize)]
struct DirEntry {
    name: String,
    href: String,
}

pub struct Renderer {
    tera: Tera,
    source_dir: PathBuf,
}

impl Renderer {
    /// Build a renderer for one build pass.
    ///
    /// With `template_dir = None` the embedded stock templates are used;
    /// otherwise every `*.html` under the directory is loaded.
    pub fn new(source_dir: &Path, template_dir: Option<&Path>) -> Result<Self, tera::Error> {
        let mut tera = match template_dir {
            Some(dir) => Tera::new(&format!("{}/**/*.html", dir.display()))?,
            None => {
                let mut tera = Tera::default();
                tera.add_raw_template(DOCUMENT_TEMPLATE, STOCK_DOCUMENT)?;
                tera.add_raw_template(LISTING_TEMPLATE, STOCK_LISTING)?;
                tera
            }
        };
        // Markdown output is already HTML; crumb names and titles are plain
        // text and still get escaped per-variable by the templates.
        tera.autoescape_on(vec![]);

        Ok(Renderer {
            tera,
            source_dir: source_dir.to_path_buf(),
        })
    }

    /// Render one document: read source, convert markdown, expand the
    /// document template.
    pub fn render_page(&self, page: &Page) -> Result<String, RenderError> {
        let full_path = self.source_dir.join(&page.path);
        let text = fs::read_to_string(&full_path).map_err(|source| RenderError::SourceRead {
            path: page.path.clone(),
            source,
        })?;

        let mut ctx = tera::Context::new();
        ctx.insert("content", &markdown_to_html(&text));
        ctx.insert("title", &page.title());
        ctx.insert("crumbs", &page.crumbs);

        Ok(self.tera.render(DOCUMENT_TEMPLATE, &ctx)?)
    }

    /// Render one directory listing from its (already final) child set.
    pub fn render_listing(&self, listing: &Listing) -> Result<String, RenderError> {
        let mut files = Vec::new();
        let mut directories = Vec::new();
        for child in &listing.children {
            match child {
                Child::Page(page) => files.push(FileEntry {
                    name: page.file_name().to_string(),
                    title: page.title(),
                    href: page.href(),
                }),
                Child::Listing(sub) => directories.push(DirEntry {
                    name: sub.name().to_string(),
                    href: sub.href(),
                }),
            }
        }

        let mut ctx = tera::Context::new();
        ctx.insert("files", &files);
        ctx.insert("directories", &directories);
        ctx.insert("crumbs", &listing.crumbs);

        Ok(self.tera.render(LISTING_TEMPLATE, &ctx)?)
    }
}

/// Convert markdown text to an HTML fragment.
fn markdown_to_html(text: &str) -> String {
    let parser = Parser::new(text);
    let mut html = String::new();
    md_html::push_html(&mut html, parser);
    html
}
