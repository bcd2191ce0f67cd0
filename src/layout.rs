//! Declarative layout resources.
//!
//! A layout is a TOML document describing one window and the widget tree
//! inside it:
//!
//! ```toml
//! [window]
//! id = "window_main"
//! title = "Counter"
//!
//! [window.child]
//! kind = "box"
//! orientation = "vertical"
//!
//! [[window.child.children]]
//! kind = "label"
//! id = "label_hello"
//! text = "Hello, World!"
//!
//! [[window.child.children]]
//! kind = "button"
//! label = "_Count"
//! on_click = "on_button_hello_clicked"
//! ```
//!
//! A [`Layout`] is validated when it is parsed. [`Layout::build`] turns it into
//! widgets using any [`WidgetFactory`], producing a [`Built`] tree whose
//! widgets can be looked up by id and whose buttons can be connected to
//! handlers by name.

use std::fmt::{self, Display};
use std::path::Path;

use ahash::AHashMap;
use serde::Deserialize;

use crate::error::LayoutError;
use crate::toolkit::{Orientation, WidgetFactory};

/// A widget in a layout.
#[derive(Debug, Clone, Eq, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase", deny_unknown_fields)]
pub enum Node {
    /// A container laying out its children in a line.
    Box {
        /// The id used to look this widget up.
        #[serde(default)]
        id: Option<String>,
        /// The direction children are laid out.
        #[serde(default)]
        orientation: Orientation,
        /// The contained widgets.
        #[serde(default)]
        children: Vec<Node>,
    },
    /// A line of text.
    Label {
        /// The id used to look this widget up.
        #[serde(default)]
        id: Option<String>,
        /// The text displayed until a handler changes it.
        #[serde(default)]
        text: String,
    },
    /// A clickable button.
    Button {
        /// The id used to look this widget up.
        #[serde(default)]
        id: Option<String>,
        /// The caption, in mnemonic form.
        label: String,
        /// The name of the handler invoked when the button is clicked.
        #[serde(default)]
        on_click: Option<String>,
    },
}

impl Node {
    /// Returns this widget's id, if it has one.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        match self {
            Node::Box { id, .. } | Node::Label { id, .. } | Node::Button { id, .. } => {
                id.as_deref()
            }
        }
    }

    /// Returns the kind of this widget.
    #[must_use]
    pub const fn kind(&self) -> WidgetKind {
        match self {
            Node::Box { .. } => WidgetKind::Box,
            Node::Label { .. } => WidgetKind::Label,
            Node::Button { .. } => WidgetKind::Button,
        }
    }
}

/// The top-level window of a layout.
#[derive(Debug, Clone, Eq, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WindowNode {
    /// The id used to look the window up.
    pub id: String,
    /// The window title.
    #[serde(default)]
    pub title: String,
    /// The window's contents.
    pub child: Node,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct LayoutFile {
    window: WindowNode,
}

/// The kinds of widgets a layout can contain.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum WidgetKind {
    /// The top-level window.
    Window,
    /// A container.
    Box,
    /// A text label.
    Label,
    /// A button.
    Button,
}

impl Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            WidgetKind::Window => "window",
            WidgetKind::Box => "box",
            WidgetKind::Label => "label",
            WidgetKind::Button => "button",
        })
    }
}

/// A validated layout description.
#[derive(Debug, Clone)]
pub struct Layout {
    window: WindowNode,
    kinds: AHashMap<String, WidgetKind>,
}

impl Layout {
    /// Reads and validates the layout stored at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LayoutError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| LayoutError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let layout = Self::parse(&source)?;
        tracing::debug!(
            path = %path.display(),
            widgets = layout.kinds.len(),
            "loaded layout"
        );
        Ok(layout)
    }

    /// Parses and validates a layout from TOML source.
    pub fn parse(source: &str) -> Result<Self, LayoutError> {
        let file: LayoutFile = toml::from_str(source)?;
        Self::new(file.window)
    }

    /// Validates `window` as a layout.
    pub fn new(window: WindowNode) -> Result<Self, LayoutError> {
        let mut kinds = AHashMap::new();
        kinds.insert(window.id.clone(), WidgetKind::Window);
        index_ids(&window.child, &mut kinds)?;
        Ok(Self { window, kinds })
    }

    /// Returns the window title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.window.title
    }

    /// Returns the window's id.
    #[must_use]
    pub fn window_id(&self) -> &str {
        &self.window.id
    }

    /// Returns the window's contents.
    #[must_use]
    pub const fn root(&self) -> &Node {
        &self.window.child
    }

    /// Returns the kind of the widget with `id`.
    #[must_use]
    pub fn kind_of(&self, id: &str) -> Option<WidgetKind> {
        self.kinds.get(id).copied()
    }

    /// Checks that a widget with `id` exists and is of kind `expected`.
    pub fn require(&self, id: &str, expected: WidgetKind) -> Result<(), LayoutError> {
        check_kind(id, expected, self.kind_of(id))
    }

    /// Creates this layout's widgets with `factory`.
    pub fn build<F>(&self, factory: &mut F) -> Built<F>
    where
        F: WidgetFactory,
    {
        let mut named = AHashMap::new();
        named.insert(self.window.id.clone(), Named::Window);
        let mut connections = Vec::new();
        let root = build_node(&self.window.child, factory, &mut named, &mut connections);
        Built {
            title: self.window.title.clone(),
            root,
            named,
            connections,
        }
    }
}

fn index_ids(node: &Node, kinds: &mut AHashMap<String, WidgetKind>) -> Result<(), LayoutError> {
    if let Some(id) = node.id() {
        if kinds.insert(id.to_string(), node.kind()).is_some() {
            return Err(LayoutError::DuplicateId { id: id.to_string() });
        }
    }

    if let Node::Box { children, .. } = node {
        for child in children {
            index_ids(child, kinds)?;
        }
    }

    Ok(())
}

fn check_kind(
    id: &str,
    expected: WidgetKind,
    found: Option<WidgetKind>,
) -> Result<(), LayoutError> {
    match found {
        Some(found) if found == expected => Ok(()),
        found => Err(mismatch(id, expected, found)),
    }
}

fn mismatch(id: &str, expected: WidgetKind, found: Option<WidgetKind>) -> LayoutError {
    match found {
        Some(found) => LayoutError::WrongKind {
            id: id.to_string(),
            expected,
            found,
        },
        None => LayoutError::MissingWidget { id: id.to_string() },
    }
}

fn build_node<F>(
    node: &Node,
    factory: &mut F,
    named: &mut AHashMap<String, Named<F::Label, F::Button>>,
    connections: &mut Vec<(String, F::Button)>,
) -> F::Widget
where
    F: WidgetFactory,
{
    match node {
        Node::Box {
            id,
            orientation,
            children,
        } => {
            let children = children
                .iter()
                .map(|child| build_node(child, factory, named, connections))
                .collect();
            if let Some(id) = id {
                named.insert(id.clone(), Named::Box);
            }
            factory.container(*orientation, children)
        }
        Node::Label { id, text } => {
            let (widget, label) = factory.label(text);
            if let Some(id) = id {
                named.insert(id.clone(), Named::Label(label));
            }
            widget
        }
        Node::Button {
            id,
            label,
            on_click,
        } => {
            let (widget, button) = factory.button(label);
            if let Some(handler) = on_click {
                connections.push((handler.clone(), button.clone()));
            }
            if let Some(id) = id {
                named.insert(id.clone(), Named::Button(button));
            }
            widget
        }
    }
}

enum Named<Label, Button> {
    Window,
    Box,
    Label(Label),
    Button(Button),
}

impl<Label, Button> Named<Label, Button> {
    const fn kind(&self) -> WidgetKind {
        match self {
            Named::Window => WidgetKind::Window,
            Named::Box => WidgetKind::Box,
            Named::Label(_) => WidgetKind::Label,
            Named::Button(_) => WidgetKind::Button,
        }
    }
}

/// The widgets created from a [`Layout`].
pub struct Built<F>
where
    F: WidgetFactory,
{
    title: String,
    root: F::Widget,
    named: AHashMap<String, Named<F::Label, F::Button>>,
    connections: Vec<(String, F::Button)>,
}

impl<F> Built<F>
where
    F: WidgetFactory,
{
    /// Returns the window title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the label with `id`.
    pub fn label(&self, id: &str) -> Result<F::Label, LayoutError> {
        match self.named.get(id) {
            Some(Named::Label(label)) => Ok(label.clone()),
            other => Err(mismatch(id, WidgetKind::Label, other.map(Named::kind))),
        }
    }

    /// Returns the button with `id`.
    pub fn button(&self, id: &str) -> Result<F::Button, LayoutError> {
        match self.named.get(id) {
            Some(Named::Button(button)) => Ok(button.clone()),
            other => Err(mismatch(id, WidgetKind::Button, other.map(Named::kind))),
        }
    }

    /// Connects every button's `on_click` handler name using `connect`.
    ///
    /// `connect` is called once per button that names a handler, and returns
    /// false when it does not know the name. The first unknown name aborts
    /// connecting with [`LayoutError::UnknownHandler`].
    pub fn connect_signals<Connect>(&mut self, mut connect: Connect) -> Result<(), LayoutError>
    where
        Connect: FnMut(&str, &mut F::Button) -> bool,
    {
        for (name, button) in &mut self.connections {
            if !connect(name, button) {
                return Err(LayoutError::UnknownHandler { name: name.clone() });
            }
            tracing::debug!(handler = %name, "connected click handler");
        }
        Ok(())
    }

    /// Returns the window title and root widget, consuming the lookup tables.
    #[must_use]
    pub fn into_window(self) -> (String, F::Widget) {
        (self.title, self.root)
    }
}
