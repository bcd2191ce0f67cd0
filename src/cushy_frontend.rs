//! Running the programs in real windows with [`cushy`].

use std::fmt::{self, Debug};
use std::panic::AssertUnwindSafe;
use std::path::Path;
use std::sync::Arc;

use cushy::value::{Destination, Dynamic, Source};
use cushy::widget::{MakeWidget, WidgetInstance, WidgetList};
use cushy::Run;
use parking_lot::Mutex;

use crate::context::{report_startup_failure, CounterApp, GreeterApp};
use crate::greeter::Mnemonic;
use crate::shutdown::{ExitStatus, ShutdownHandler};
use crate::toolkit::{
    ClickHandler, Clickable, EventLoop, Orientation, TextDisplay, WidgetFactory,
};

impl TextDisplay for Dynamic<String> {
    fn set_text(&self, text: String) {
        self.set(text);
    }

    fn text(&self) -> String {
        self.get()
    }
}

/// A cushy button whose click handlers can be connected after the widget is
/// created.
#[derive(Clone)]
pub struct CushyButton {
    caption: Dynamic<String>,
    handlers: Arc<Mutex<Vec<ClickHandler<Dynamic<String>>>>>,
}

impl CushyButton {
    fn new(caption: &str) -> Self {
        let caption = Mnemonic::parse(caption);
        Self {
            caption: Dynamic::new(caption.text().to_string()),
            handlers: Arc::default(),
        }
    }

    /// Returns the caption shown on the button.
    #[must_use]
    pub const fn caption(&self) -> &Dynamic<String> {
        &self.caption
    }

    fn dispatch(&self) {
        for handler in self.handlers.lock().iter_mut() {
            handler(&self.caption);
        }
    }

    fn to_widget(&self) -> WidgetInstance {
        let button = AssertUnwindSafe(self.clone());
        self.caption
            .clone()
            .into_button()
            .on_click(move |_| button.dispatch())
            .make_widget()
    }
}

impl Debug for CushyButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CushyButton")
            .field("caption", &self.caption)
            .field("handlers", &self.handlers.lock().len())
            .finish()
    }
}

impl Clickable for CushyButton {
    type Handle = Dynamic<String>;

    fn on_click(&mut self, handler: ClickHandler<Self::Handle>) {
        self.handlers.lock().push(handler);
    }
}

/// Creates cushy widgets.
#[derive(Debug, Default, Clone, Copy)]
pub struct CushyToolkit;

impl WidgetFactory for CushyToolkit {
    type Button = CushyButton;
    type Label = Dynamic<String>;
    type Widget = WidgetInstance;

    fn label(&mut self, text: &str) -> (Self::Widget, Self::Label) {
        let text = Dynamic::new(text.to_string());
        (text.clone().make_widget(), text)
    }

    fn button(&mut self, caption: &str) -> (Self::Widget, Self::Button) {
        let button = CushyButton::new(caption);
        (button.to_widget(), button)
    }

    fn container(
        &mut self,
        orientation: Orientation,
        children: Vec<Self::Widget>,
    ) -> Self::Widget {
        let children = children.into_iter().collect::<WidgetList>();
        match orientation {
            Orientation::Vertical => children.into_rows().make_widget(),
            Orientation::Horizontal => children.into_columns().make_widget(),
        }
    }
}

/// Tracks whether the window's destroy notification asked the loop to stop.
///
/// Cushy stops its event loop once the last window closes, so quitting only
/// needs to be recorded.
#[derive(Debug, Clone)]
pub struct CushyEventLoop {
    quit: Dynamic<bool>,
}

impl CushyEventLoop {
    /// Returns a loop that has not been asked to stop.
    #[must_use]
    pub fn new() -> Self {
        Self {
            quit: Dynamic::new(false),
        }
    }
}

impl Default for CushyEventLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLoop for CushyEventLoop {
    fn quit(&self) {
        self.quit.set(true);
    }

    fn quit_requested(&self) -> bool {
        self.quit.get()
    }
}

/// Opens `root` in a window titled `title` and runs until it is closed.
pub fn run_window(title: String, root: WidgetInstance) -> ExitStatus {
    let shutdown = AssertUnwindSafe(ShutdownHandler::new(CushyEventLoop::new()));
    let event_loop = shutdown.event_loop().clone();
    tracing::debug!(%title, "opening window");

    let result = root
        .into_window()
        .titled(title)
        .on_close(move || {
            shutdown.handle_destroy();
        })
        .run();

    match result {
        Ok(()) => {
            if !event_loop.quit_requested() {
                tracing::warn!("event loop ended before the window was destroyed");
            }
            ExitStatus::Success
        }
        Err(err) => {
            tracing::error!("{err}");
            eprintln!("Error running event loop: {err}");
            ExitStatus::ToolkitFailure
        }
    }
}

/// Runs the layout-driven counter using the layout at `path`.
pub fn run_counter(path: impl AsRef<Path>) -> ExitStatus {
    match CounterApp::load(path, &mut CushyToolkit) {
        Ok(app) => {
            let (title, root) = app.into_window();
            run_window(title, root)
        }
        Err(err) => report_startup_failure(&err),
    }
}

/// Runs the programmatic greeter.
pub fn run_greeter() -> ExitStatus {
    let (root, app) = GreeterApp::build(&mut CushyToolkit);
    run_window(app.title().to_string(), root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::greeter::{self, GREETING, INITIAL_CAPTION};

    #[test]
    fn dynamic_displays_text() {
        let label = Dynamic::new(String::from("Hello, World!"));
        assert_eq!(TextDisplay::text(&label), "Hello, World!");
        label.set_text(String::from("1"));
        assert_eq!(label.get(), "1");
    }

    #[test]
    fn button_caption_drops_mnemonic() {
        let button = CushyButton::new(INITIAL_CAPTION);
        assert_eq!(button.caption().get(), "Click me!");
    }

    #[test]
    fn connected_handlers_receive_caption() {
        let mut button = CushyButton::new(INITIAL_CAPTION);
        button.on_click(Box::new(|caption| greeter::press(caption)));
        let shared = button.clone();
        shared.dispatch();
        assert_eq!(button.caption().get(), GREETING);
    }

    #[test]
    fn event_loop_records_quit() {
        let handler = ShutdownHandler::new(CushyEventLoop::default());
        assert!(!handler.event_loop().quit_requested());
        assert_eq!(handler.handle_destroy(), ExitStatus::Success);
        assert!(handler.event_loop().quit_requested());
    }
}
