//! Two small programs showing how a widget toolkit delivers clicks to
//! application code.
//!
//! - `layout-counter` builds its window from a declarative
//!   [layout](crate::layout) file and counts clicks on a label.
//! - `greeter` builds a single button in code that changes its caption when
//!   pressed.
//!
//! The handlers are written against the capabilities in [`toolkit`], which are
//! implemented for [`cushy`] in [`cushy_frontend`] and for an in-process event
//! queue in [`headless`].
#![warn(clippy::pedantic, missing_docs)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]

pub mod context;
pub mod counter;
pub mod cushy_frontend;
pub mod error;
pub mod greeter;
pub mod headless;
pub mod layout;
pub mod shutdown;
pub mod toolkit;

pub use error::LayoutError;
pub use shutdown::ExitStatus;

/// Installs the global `tracing` subscriber.
///
/// Debug builds log at `INFO` and release builds at `ERROR` unless `RUST_LOG`
/// says otherwise. Calling this more than once has no effect.
pub fn initialize_tracing() {
    #[cfg(feature = "tracing-output")]
    {
        use tracing::Level;
        use tracing_subscriber::filter::LevelFilter;
        use tracing_subscriber::layer::SubscriberExt;
        use tracing_subscriber::util::SubscriberInitExt;
        use tracing_subscriber::EnvFilter;

        #[cfg(debug_assertions)]
        const MAX_LEVEL: Level = Level::INFO;
        #[cfg(not(debug_assertions))]
        const MAX_LEVEL: Level = Level::ERROR;

        let _result = tracing_subscriber::fmt::fmt()
            .with_max_level(MAX_LEVEL)
            .finish()
            .with(
                EnvFilter::builder()
                    .with_default_directive(LevelFilter::from_level(MAX_LEVEL).into())
                    .from_env_lossy(),
            )
            .try_init();
    }
}
