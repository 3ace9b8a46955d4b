//! Post-render HTML middleware.
//!
//! A middleware is a function from `(output link, html)` to rewritten html,
//! applied once per document after template expansion and before the file is
//! written. It must not alter where the file lands — only its contents.
//!
//! The one middleware shipped here, [`relative_links`], rewrites
//! site-absolute `href`/`src` values into paths relative to the page being
//! written, so a built wiki can be browsed straight from the filesystem or
//! hosted under a sub-path.

use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

/// Middleware contract: `(node output link, rendered html) -> html`.
pub type Middleware = Box<dyn Fn(&str, &str) -> String>;

fn link_attr_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // href/src attributes whose value starts with "/": site-absolute,
    // scheme-less. Everything else (external URLs, fragments, already
    // relative paths) is left alone. Protocol-relative URLs ("//host/…")
    // also start with "/" and are excluded in relativize().
    RE.get_or_init(|| Regex::new(r#"(href|src)="(/[^"]*)""#).expect("link attribute regex"))
}

/// Rewrite site-absolute links in `html` to be relative to the page at
/// `output_link` (itself an absolute-from-site-root path like
/// `/subdir/stuff.html`).
///
/// Directory links (`/subdir/` or `/`) resolve to that directory's
/// `index.html`.
pub fn relative_links(output_link: &str, html: &str) -> String {
    let from_dir = Path::new(output_link.trim_start_matches('/'))
        .parent()
        .unwrap_or_else(|| Path::new(""))
        .to_path_buf();

    link_attr_re()
        .replace_all(html, |caps: &regex::Captures| {
            let attr = &caps[1];
            let target = relativize(&caps[2], &from_dir);
            format!(r#"{attr}="{target}""#)
        })
        .into_owned()
}

/// Turn one site-absolute target into a path relative to `from_dir`.
fn relativize(target: &str, from_dir: &Path) -> String {
    // "//host/path" is protocol-relative, an external reference despite the
    // leading slash.
    if target.starts_with("//") {
        return target.to_string();
    }

    let mut rel_target = target.trim_start_matches('/').to_string();
    if rel_target.is_empty() || rel_target.ends_with('/') {
        rel_target.push_str("index.html");
    }

    match pathdiff::diff_paths(Path::new(&rel_target), from_dir) {
        Some(diff) => diff
            .to_string_lossy()
            .replace(std::path::MAIN_SEPARATOR, "/"),
        None => rel_target,
    }
}
