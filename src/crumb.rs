//! Breadcrumb trail steps.
//!
//! Every page and directory listing carries an ordered trail of crumbs from
//! the wiki root down to itself. The first crumb is always the synthetic root
//! (`index` → `/`); the last crumb of a document trail is the document itself
//! and carries no link, because it is the current page rather than a
//! hyperlink target.

use serde::Serialize;

/// One step in the navigation trail from the wiki root to the current page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Crumb {
    /// Display name (directory segment, file name, or `index` for the root).
    pub name: String,
    /// Destination URL path. `None` for the trail's final, current-page crumb.
    pub link: Option<String>,
}

impl Crumb {
    pub fn new(name: impl Into<String>, link: Option<String>) -> Self {
        Crumb {
            name: name.into(),
            link,
        }
    }

    /// The synthetic root crumb that starts every trail.
    pub fn root() -> Self {
        Crumb {
            name: "index".to_string(),
            link: Some("/".to_string()),
        }
    }
}
