//! New-wiki scaffolding for `mdwiki init`.
//!
//! Lays down the minimal working layout:
//!
//! ```text
//! <path>/
//! ├── wiki.toml            # config, defaults spelled out
//! ├── wiki/
//! │   └── home.md          # starter page
//! └── templates/
//!     ├── document.html    # editable copies of the built-in templates
//!     └── listing.html
//! ```
//!
//! The scaffolded `wiki.toml` points at the local `templates/` copy so edits
//! take effect immediately.

use std::fs;
use std::io;
use std::path::Path;

const STARTER_PAGE: &str = "\
# Welcome

This is your new wiki. Add markdown files under the `wiki/` directory and
run `mdwiki build` to turn them into a browsable site.
";

const STARTER_CONFIG: &str = "\
source-dir = \"wiki\"
output-dir = \"_html\"
template-dir = \"templates\"
document-extensions = [\"md\"]
";

const STOCK_DOCUMENT: &str = include_str!("../static/templates/document.html");
const STOCK_LISTING: &str = include_str!("../static/templates/listing.html");

/// Create a fresh wiki skeleton at `path`. Existing files are not
/// overwritten.
pub fn init(path: &Path) -> io::Result<()> {
    fs::create_dir_all(path.join("wiki"))?;
    fs::create_dir_all(path.join("templates"))?;

    write_if_absent(&path.join("wiki.toml"), STARTER_CONFIG)?;
    write_if_absent(&path.join("wiki/home.md"), STARTER_PAGE)?;
    write_if_absent(&path.join("templates/document.html"), STOCK_DOCUMENT)?;
    write_if_absent(&path.join("templates/listing.html"), STOCK_LISTING)?;
    Ok(())
}

fn write_if_absent(path: &Path, contents: &str) -> io::Result<()> {
    if path.exists() {
        return Ok(());
    }
    fs::write(path, contents)
}
