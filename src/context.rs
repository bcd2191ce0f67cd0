//! Application state for the two programs.
//!
//! Each program's mutable state lives in one context object built at startup.
//! Handlers receive their share of it when they are connected, so nothing is
//! global and nothing is looked up at click time.

use std::path::Path;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::counter::{ClickCounter, CounterHandler};
use crate::error::LayoutError;
use crate::greeter::{self, INITIAL_CAPTION, WINDOW_TITLE};
use crate::layout::{Built, Layout, WidgetKind};
use crate::shutdown::ExitStatus;
use crate::toolkit::{Clickable, WidgetFactory};

/// The layout file read by the `layout-counter` program, relative to the
/// working directory.
pub const LAYOUT_PATH: &str = "counter-layout.toml";
/// The id of the counter's top-level window.
pub const WINDOW_ID: &str = "window_main";
/// The id of the label showing the click count.
pub const LABEL_ID: &str = "label_hello";
/// The handler name buttons use to increment the counter.
pub const CLICK_HANDLER: &str = "on_button_hello_clicked";

/// The layout-driven counter.
///
/// Every button whose `on_click` names [`CLICK_HANDLER`] shares one
/// [`ClickCounter`], shown on the label [`LABEL_ID`].
pub struct CounterApp<F>
where
    F: WidgetFactory,
{
    built: Built<F>,
    handler: Arc<Mutex<CounterHandler<F::Label>>>,
}

impl<F> CounterApp<F>
where
    F: WidgetFactory,
{
    /// Loads the layout at `path` and builds the counter from it.
    ///
    /// The layout description is dropped once the widgets exist.
    pub fn load(path: impl AsRef<Path>, factory: &mut F) -> Result<Self, LayoutError> {
        let layout = Layout::load(path)?;
        Self::build(&layout, factory)
    }

    /// Builds the counter's widgets from `layout` and connects its handlers.
    ///
    /// Fails if the window or label are missing or of the wrong kind, or if a
    /// button names an unknown handler.
    pub fn build(layout: &Layout, factory: &mut F) -> Result<Self, LayoutError> {
        layout.require(WINDOW_ID, WidgetKind::Window)?;
        layout.require(LABEL_ID, WidgetKind::Label)?;

        let mut built = layout.build(factory);
        let handler = Arc::new(Mutex::new(CounterHandler::new(built.label(LABEL_ID)?)));
        built.connect_signals(|name, button| match name {
            CLICK_HANDLER => {
                let handler = handler.clone();
                button.on_click(Box::new(move |_| handler.lock().handle_click()));
                true
            }
            _ => false,
        })?;
        tracing::debug!(window = WINDOW_ID, "counter ready");

        Ok(Self { built, handler })
    }

    /// Returns the number of clicks handled so far.
    #[must_use]
    pub fn clicks(&self) -> ClickCounter {
        self.handler.lock().count()
    }

    /// Returns the widgets created from the layout.
    #[must_use]
    pub const fn widgets(&self) -> &Built<F> {
        &self.built
    }

    /// Returns the window title and root widget.
    #[must_use]
    pub fn into_window(self) -> (String, F::Widget) {
        self.built.into_window()
    }
}

/// The programmatic greeter: one button that says [`GREETING`](greeter::GREETING)
/// once pressed.
#[derive(Debug)]
pub struct GreeterApp<Button> {
    button: Button,
}

impl<B> GreeterApp<B>
where
    B: Clickable,
{
    /// Connects the press handler to `button`.
    pub fn new(mut button: B) -> Self {
        button.on_click(Box::new(|control| greeter::press(control)));
        Self { button }
    }

    /// Creates the greeter's button with `factory`, returning the widget to
    /// place in the window.
    pub fn build<F>(factory: &mut F) -> (F::Widget, Self)
    where
        F: WidgetFactory<Button = B>,
    {
        let (widget, button) = factory.button(INITIAL_CAPTION);
        (widget, Self::new(button))
    }

    /// Returns the window title.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        WINDOW_TITLE
    }

    /// Returns the greeter's button.
    #[must_use]
    pub const fn button(&self) -> &B {
        &self.button
    }
}

/// Reports a layout failure on stderr and in the log.
pub fn report_startup_failure(err: &LayoutError) -> ExitStatus {
    tracing::error!("{err}");
    eprintln!("Error loading file: {err}");
    ExitStatus::LayoutFailure
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::greeter::GREETING;
    use crate::headless::{Event, HeadlessToolkit};
    use crate::toolkit::TextDisplay;

    const LAYOUT: &str = include_str!("../counter-layout.toml");

    fn counter() -> (CounterApp<HeadlessToolkit>, HeadlessToolkit) {
        let mut toolkit = HeadlessToolkit::default();
        let app = CounterApp::build(&Layout::parse(LAYOUT).unwrap(), &mut toolkit).unwrap();
        (app, toolkit)
    }

    #[test]
    fn three_clicks() {
        let (app, toolkit) = counter();
        let button = app.widgets().button("button_count").unwrap();
        let label = app.widgets().label(LABEL_ID).unwrap();
        let (title, root) = app.into_window();
        let mut window = toolkit
            .open_window(title, root)
            .with(Event::Click(button.clone()))
            .with(Event::Click(button.clone()))
            .with(Event::Click(button));
        assert_eq!(window.run(), None);
        assert_eq!(label.text(), "3");
    }

    #[test]
    fn label_matches_click_count() {
        for clicks in [0_u64, 1, 2, 9, 10, 99, 100, 1000] {
            let (app, _) = counter();
            let button = app.widgets().button("button_count").unwrap();
            for _ in 0..clicks {
                button.click();
            }
            let label = app.widgets().label(LABEL_ID).unwrap().text();
            if clicks == 0 {
                assert_eq!(label, "Hello, World!");
            } else {
                assert_eq!(label, clicks.to_string());
            }
            assert_eq!(app.clicks().get(), clicks);
        }
    }

    #[test]
    fn access_key_clicks_counter() {
        let (app, toolkit) = counter();
        let label = app.widgets().label(LABEL_ID).unwrap();
        let (title, root) = app.into_window();
        let mut window = toolkit
            .open_window(title, root)
            .with(Event::AccessKey('c'))
            .with(Event::Destroy);
        assert_eq!(window.run(), Some(ExitStatus::Success));
        assert_eq!(label.text(), "1");
    }

    #[test]
    fn destroy_exits_cleanly_after_any_clicks() {
        for clicks in [0, 1, 5] {
            let (app, toolkit) = counter();
            let button = app.widgets().button("button_count").unwrap();
            let (title, root) = app.into_window();
            let mut window = toolkit.open_window(title, root);
            for _ in 0..clicks {
                window.push(Event::Click(button.clone()));
            }
            window.push(Event::Destroy);
            assert_eq!(window.run().map(ExitStatus::code), Some(0));
        }
    }

    #[test]
    fn buttons_share_one_counter() {
        let source = r#"
            [window]
            id = "window_main"

            [window.child]
            kind = "box"
            orientation = "horizontal"

            [[window.child.children]]
            kind = "button"
            id = "left"
            label = "Left"
            on_click = "on_button_hello_clicked"

            [[window.child.children]]
            kind = "label"
            id = "label_hello"

            [[window.child.children]]
            kind = "button"
            id = "right"
            label = "Right"
            on_click = "on_button_hello_clicked"
        "#;
        let mut toolkit = HeadlessToolkit::default();
        let app = CounterApp::build(&Layout::parse(source).unwrap(), &mut toolkit).unwrap();
        app.widgets().button("left").unwrap().click();
        app.widgets().button("right").unwrap().click();
        app.widgets().button("left").unwrap().click();
        assert_eq!(app.widgets().label(LABEL_ID).unwrap().text(), "3");
        assert_eq!(app.clicks().get(), 3);
    }

    #[test]
    fn missing_widgets_fail_startup() {
        let without_label = LAYOUT.replace("label_hello", "label_other");
        let err = CounterApp::build(
            &Layout::parse(&without_label).unwrap(),
            &mut HeadlessToolkit::default(),
        )
        .err()
        .unwrap();
        assert!(matches!(err, LayoutError::MissingWidget { id } if id == LABEL_ID));

        let renamed_window = LAYOUT.replace("window_main", "window_other");
        let err = CounterApp::build(
            &Layout::parse(&renamed_window).unwrap(),
            &mut HeadlessToolkit::default(),
        )
        .err()
        .unwrap();
        assert!(matches!(err, LayoutError::MissingWidget { id } if id == WINDOW_ID));

        let swapped = LAYOUT
            .replace("id = \"label_hello\"", "id = \"label_tmp\"")
            .replace("id = \"button_count\"", "id = \"label_hello\"");
        let err = CounterApp::build(
            &Layout::parse(&swapped).unwrap(),
            &mut HeadlessToolkit::default(),
        )
        .err()
        .unwrap();
        assert!(matches!(
            err,
            LayoutError::WrongKind {
                expected: WidgetKind::Label,
                found: WidgetKind::Button,
                ..
            }
        ));
    }

    #[test]
    fn unreadable_layout_is_a_layout_failure() {
        let err = CounterApp::load("no/such/layout.toml", &mut HeadlessToolkit::default())
            .err()
            .unwrap();
        assert!(matches!(err, LayoutError::Read { .. }));
        assert_eq!(report_startup_failure(&err).code(), 1);
    }

    #[test]
    fn greeter_presses() {
        let mut toolkit = HeadlessToolkit::default();
        let (root, app) = GreeterApp::build(&mut toolkit);
        assert_eq!(app.button().caption(), "Click me!");
        assert_eq!(app.button().access_key(), Some('c'));

        let button = app.button().clone();
        let mut window = toolkit.open_window(app.title(), root);
        assert_eq!(window.title(), "Hello there");
        assert_eq!(window.run(), None);
        assert_eq!(button.caption(), "Click me!");

        for presses in 1..=3 {
            window.push(Event::Click(button.clone()));
            assert_eq!(window.run(), None);
            assert_eq!(button.caption(), GREETING, "after {presses} presses");
        }

        window.push(Event::Destroy);
        window.push(Event::Click(button.clone()));
        assert_eq!(window.run(), Some(ExitStatus::Success));
        assert_eq!(window.pending(), 1);
    }

    #[test]
    fn greeter_access_key() {
        let mut toolkit = HeadlessToolkit::default();
        let (root, app) = GreeterApp::build(&mut toolkit);
        let button = app.button().clone();
        let mut window = toolkit
            .open_window(app.title(), root)
            .with(Event::AccessKey('C'));
        assert_eq!(window.run(), None);
        assert_eq!(button.caption(), GREETING);
    }
}
