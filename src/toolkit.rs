//! Capabilities the programs need from a widget toolkit.
//!
//! Handlers in this crate never talk to a toolkit directly. They are written
//! against these traits, which are implemented for [`cushy`] in
//! [`cushy_frontend`](crate::cushy_frontend) and for an in-process fake in
//! [`headless`](crate::headless).

/// A widget that displays a single line of text.
///
/// Implementors use interior mutability: the toolkit hands out shared
/// references to widgets, and handlers update them from the dispatch thread.
pub trait TextDisplay {
    /// Replaces the displayed text.
    fn set_text(&self, text: String);

    /// Returns the currently displayed text.
    fn text(&self) -> String;
}

/// A boxed handler invoked with a handle to the control that was clicked.
pub type ClickHandler<Handle> = Box<dyn FnMut(&Handle) + Send + 'static>;

/// A control that can report clicks.
pub trait Clickable {
    /// The handle passed to click handlers, giving access to the clicked
    /// control's own caption.
    type Handle: TextDisplay;

    /// Registers `handler` to be invoked each time this control is clicked.
    ///
    /// Handlers run synchronously on the dispatch thread in the order they
    /// were registered.
    fn on_click(&mut self, handler: ClickHandler<Self::Handle>);
}

/// The toolkit's event dispatch loop.
pub trait EventLoop {
    /// Requests that the loop stops dispatching events.
    ///
    /// The request is synchronous and unconditional. Calling it more than
    /// once has no additional effect.
    fn quit(&self);

    /// Returns true once [`quit()`](Self::quit) has been called.
    fn quit_requested(&self) -> bool;
}

/// The direction a container lays out its children.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Children are stacked top to bottom.
    #[default]
    Vertical,
    /// Children are placed left to right.
    Horizontal,
}

/// Creates widgets for a toolkit.
///
/// Widgets are created bottom-up: a container receives its already-created
/// children. Labels and buttons return a handle alongside the widget so that
/// handlers can be connected after the tree exists.
pub trait WidgetFactory {
    /// A finished widget, ready to be placed in a container or window.
    type Widget;
    /// A handle to a created label.
    type Label: TextDisplay + Clone + Send + 'static;
    /// A handle to a created button.
    type Button: Clickable + Clone;

    /// Creates a label showing `text`.
    fn label(&mut self, text: &str) -> (Self::Widget, Self::Label);

    /// Creates a button whose caption is given in mnemonic form.
    ///
    /// See [`Mnemonic`](crate::greeter::Mnemonic) for the caption syntax.
    fn button(&mut self, caption: &str) -> (Self::Widget, Self::Button);

    /// Creates a container laying out `children` along `orientation`.
    fn container(
        &mut self,
        orientation: Orientation,
        children: Vec<Self::Widget>,
    ) -> Self::Widget;
}
