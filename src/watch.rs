//! Watch-and-rebuild loop.
//!
//! Watches the wiki source directory recursively and re-runs the full build
//! whenever a recognized document (or anything that could contain one)
//! changes. Build failures are reported and the loop keeps watching —
//! a half-edited file should not kill the session.
//!
//! Rebuilds are serialized by construction: events are handled one at a
//! time on the watching thread, and events that piled up during a rebuild
//! are drained before the next one, so a burst of editor writes triggers a
//! single trailing rebuild rather than one per event.

use crate::build::Builder;
use notify::{Event, EventKind, RecursiveMode, Watcher};
use std::sync::mpsc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WatchError {
    #[error("file watcher error: {0}")]
    Notify(#[from] notify::Error),
    #[error("file watcher channel closed")]
    ChannelClosed,
}

/// Does this event touch a recognized document?
fn is_relevant(event: &Event, extensions: &[String]) -> bool {
    let touches_content = matches!(
        event.kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    );
    touches_content
        && event.paths.iter().any(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .map(|name| {
                    !name.starts_with('.') && extensions.iter().any(|ext| name.ends_with(ext.as_str()))
                })
                .unwrap_or(false)
        })
}

/// Watch the builder's source directory and rebuild on every relevant
/// change. Runs until the watcher channel closes.
pub fn watch(builder: &Builder) -> Result<(), WatchError> {
    let source_dir = builder.config().source_dir.clone();
    let extensions = builder.config().document_extensions.clone();

    let (tx, rx) = mpsc::channel();
    let mut watcher = notify::recommended_watcher(tx)?;
    watcher.watch(&source_dir, RecursiveMode::Recursive)?;

    println!(
        "Watching {} (ctrl-C to stop)",
        source_dir.display()
    );

    loop {
        let event = match rx.recv() {
            Ok(Ok(event)) => event,
            Ok(Err(err)) => {
                eprintln!("watch error: {err}");
                continue;
            }
            Err(_) => return Err(WatchError::ChannelClosed),
        };

        if !is_relevant(&event, &extensions) {
            continue;
        }

        println!("Change detected, rebuilding wiki");
        match builder.build() {
            Ok(written) => println!("Rebuilt {} files", written.len()),
            Err(err) => eprintln!("Rebuild failed: {err}"),
        }

        // Collapse the backlog accumulated while building.
        while rx.try_recv().is_ok() {}
    }
}
