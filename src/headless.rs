//! An in-process toolkit that dispatches queued events without opening any
//! windows.
//!
//! The headless toolkit implements the same capabilities as the cushy
//! frontend, so the programs' handlers can be exercised one event at a time.

use std::collections::VecDeque;
use std::fmt::{self, Debug};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::greeter::Mnemonic;
use crate::shutdown::{ExitStatus, ShutdownHandler};
use crate::toolkit::{
    ClickHandler, Clickable, EventLoop, Orientation, TextDisplay, WidgetFactory,
};

/// A shared line of text.
#[derive(Debug, Clone, Default)]
pub struct HeadlessLabel(Arc<Mutex<String>>);

impl HeadlessLabel {
    /// Returns a label showing `text`.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self(Arc::new(Mutex::new(text.into())))
    }
}

impl TextDisplay for HeadlessLabel {
    fn set_text(&self, text: String) {
        *self.0.lock() = text;
    }

    fn text(&self) -> String {
        self.0.lock().clone()
    }
}

/// A button that invokes its handlers when [`click()`](Self::click)ed.
#[derive(Clone)]
pub struct HeadlessButton {
    caption: HeadlessLabel,
    mnemonic: Mnemonic,
    handlers: Arc<Mutex<Vec<ClickHandler<HeadlessLabel>>>>,
}

impl HeadlessButton {
    /// Returns a button with a caption in mnemonic form.
    #[must_use]
    pub fn new(caption: &str) -> Self {
        let mnemonic = Mnemonic::parse(caption);
        Self {
            caption: HeadlessLabel::new(mnemonic.text()),
            mnemonic,
            handlers: Arc::default(),
        }
    }

    /// Returns the displayed caption.
    #[must_use]
    pub fn caption(&self) -> String {
        self.caption.text()
    }

    /// Returns the access key parsed from the caption.
    #[must_use]
    pub const fn access_key(&self) -> Option<char> {
        self.mnemonic.key()
    }

    /// Invokes every registered handler.
    pub fn click(&self) {
        let mut handlers = self.handlers.lock();
        for handler in handlers.iter_mut() {
            handler(&self.caption);
        }
    }
}

impl Debug for HeadlessButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeadlessButton")
            .field("caption", &self.caption)
            .field("access_key", &self.access_key())
            .field("handlers", &self.handlers.lock().len())
            .finish()
    }
}

impl Clickable for HeadlessButton {
    type Handle = HeadlessLabel;

    fn on_click(&mut self, handler: ClickHandler<Self::Handle>) {
        self.handlers.lock().push(handler);
    }
}

/// A widget created by [`HeadlessToolkit`].
#[derive(Debug, Clone)]
pub enum HeadlessWidget {
    /// A label.
    Label(HeadlessLabel),
    /// A button.
    Button(HeadlessButton),
    /// A container.
    Container {
        /// The layout direction.
        orientation: Orientation,
        /// The contained widgets.
        children: Vec<HeadlessWidget>,
    },
}

/// Creates headless widgets, remembering every button for access-key
/// dispatch.
#[derive(Debug, Default)]
pub struct HeadlessToolkit {
    buttons: Vec<HeadlessButton>,
}

impl HeadlessToolkit {
    /// Opens a window containing `root`.
    ///
    /// The window's destroy notification is connected to a
    /// [`ShutdownHandler`] for the window's event loop.
    #[must_use]
    pub fn open_window(self, title: impl Into<String>, root: HeadlessWidget) -> HeadlessWindow {
        let event_loop = HeadlessLoop::default();
        HeadlessWindow {
            title: title.into(),
            root,
            buttons: self.buttons,
            shutdown: ShutdownHandler::new(event_loop.clone()),
            event_loop,
            queue: VecDeque::new(),
        }
    }
}

impl WidgetFactory for HeadlessToolkit {
    type Button = HeadlessButton;
    type Label = HeadlessLabel;
    type Widget = HeadlessWidget;

    fn label(&mut self, text: &str) -> (Self::Widget, Self::Label) {
        let label = HeadlessLabel::new(text);
        (HeadlessWidget::Label(label.clone()), label)
    }

    fn button(&mut self, caption: &str) -> (Self::Widget, Self::Button) {
        let button = HeadlessButton::new(caption);
        self.buttons.push(button.clone());
        (HeadlessWidget::Button(button.clone()), button)
    }

    fn container(
        &mut self,
        orientation: Orientation,
        children: Vec<Self::Widget>,
    ) -> Self::Widget {
        HeadlessWidget::Container {
            orientation,
            children,
        }
    }
}

/// An event loop that only records whether it was asked to stop.
#[derive(Debug, Clone, Default)]
pub struct HeadlessLoop(Arc<AtomicBool>);

impl EventLoop for HeadlessLoop {
    fn quit(&self) {
        self.0.store(true, Ordering::Release);
    }

    fn quit_requested(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// An event delivered to a [`HeadlessWindow`].
#[derive(Debug, Clone)]
pub enum Event {
    /// The button was clicked.
    Click(HeadlessButton),
    /// A key was pressed while holding the access-key modifier.
    AccessKey(char),
    /// The window was destroyed.
    Destroy,
}

/// An open headless window and its event queue.
#[derive(Debug)]
pub struct HeadlessWindow {
    title: String,
    root: HeadlessWidget,
    buttons: Vec<HeadlessButton>,
    event_loop: HeadlessLoop,
    shutdown: ShutdownHandler<HeadlessLoop>,
    queue: VecDeque<Event>,
}

impl HeadlessWindow {
    /// Returns the window title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the window's contents.
    #[must_use]
    pub const fn root(&self) -> &HeadlessWidget {
        &self.root
    }

    /// Queues `event` for dispatch.
    pub fn push(&mut self, event: Event) {
        self.queue.push_back(event);
    }

    /// Queues `event` and returns self.
    #[must_use]
    pub fn with(mut self, event: Event) -> Self {
        self.push(event);
        self
    }

    /// Returns the number of events that have not been dispatched.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Dispatches queued events in order until the event loop is asked to
    /// stop.
    ///
    /// Returns `None` if the queue ran dry while the loop was still running.
    /// Events queued after the one that stopped the loop stay undispatched.
    pub fn run(&mut self) -> Option<ExitStatus> {
        let mut status = None;
        while !self.event_loop.quit_requested() {
            let event = self.queue.pop_front()?;
            tracing::trace!(?event, "dispatching");
            match event {
                Event::Click(button) => button.click(),
                Event::AccessKey(key) => {
                    if let Some(button) = self
                        .buttons
                        .iter()
                        .find(|button| button.mnemonic.activated_by(key))
                    {
                        button.click();
                    }
                }
                Event::Destroy => status = Some(self.shutdown.handle_destroy()),
            }
        }
        status
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handlers_run_in_registration_order() {
        let mut button = HeadlessButton::new("Go");
        let log = HeadlessLabel::default();
        for name in ["first", "second"] {
            let log = log.clone();
            button.on_click(Box::new(move |_| {
                let mut text = log.text();
                text.push_str(name);
                log.set_text(text);
            }));
        }
        button.click();
        assert_eq!(log.text(), "firstsecond");
    }

    #[test]
    fn destroy_stops_dispatch() {
        let mut toolkit = HeadlessToolkit::default();
        let (root, mut button) = toolkit.button("_Go");
        let clicks = HeadlessLabel::new("0");
        let counter = clicks.clone();
        button.on_click(Box::new(move |_| {
            let next = counter.text().parse::<u32>().unwrap_or_default() + 1;
            counter.set_text(next.to_string());
        }));

        let mut window = toolkit
            .open_window("Test", root)
            .with(Event::Click(button.clone()))
            .with(Event::AccessKey('G'))
            .with(Event::AccessKey('x'))
            .with(Event::Destroy)
            .with(Event::Click(button));
        assert_eq!(window.title(), "Test");
        assert_eq!(window.run(), Some(ExitStatus::Success));
        assert_eq!(clicks.text(), "2");
        assert_eq!(window.pending(), 1);

        // The loop stays stopped.
        assert_eq!(window.run(), None);
        assert_eq!(clicks.text(), "2");
    }

    #[test]
    fn drained_queue_keeps_running() {
        let mut window = HeadlessToolkit::default().open_window(
            "Idle",
            HeadlessWidget::Container {
                orientation: Orientation::Horizontal,
                children: Vec::new(),
            },
        );
        assert_eq!(window.run(), None);
        window.push(Event::Destroy);
        assert_eq!(window.run(), Some(ExitStatus::Success));
    }
}
