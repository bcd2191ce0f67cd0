//! Errors reported while starting a program.

use std::path::PathBuf;

use crate::layout::WidgetKind;

/// A layout resource could not be used.
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    /// The file could not be read.
    #[error("{}: {source}", .path.display())]
    Read {
        /// The path that was read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The file is not a valid layout description.
    #[error("invalid layout: {0}")]
    Parse(#[from] toml::de::Error),
    /// Two widgets share an id.
    #[error("widget id `{id}` is used more than once")]
    DuplicateId {
        /// The repeated id.
        id: String,
    },
    /// A widget the program needs is not in the layout.
    #[error("no widget with id `{id}`")]
    MissingWidget {
        /// The id that was looked up.
        id: String,
    },
    /// A widget the program needs has the wrong kind.
    #[error("widget `{id}` is a {found}, expected a {expected}")]
    WrongKind {
        /// The id that was looked up.
        id: String,
        /// The kind the program needs.
        expected: WidgetKind,
        /// The kind the layout declares.
        found: WidgetKind,
    },
    /// A button names a handler the program does not provide.
    #[error("no handler named `{name}`")]
    UnknownHandler {
        /// The handler name from the layout.
        name: String,
    },
}
