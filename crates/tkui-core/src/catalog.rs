//! Widget capability catalogs.
//!
//! The parser never knows which toolkit it is building for. It asks a
//! `WidgetCatalog` whether a class name exists and whether that class takes
//! its visual attributes through a style table ("themed") or directly as
//! configuration.

use std::collections::HashMap;

/// What the parser needs to know about one widget class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetClass {
    name: String,
    style_class: Option<String>,
}

impl WidgetClass {
    /// A class configured directly (`Label`, `Button`, ...).
    pub fn plain(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            style_class: None,
        }
    }

    /// A class styled through the toolkit's style table under `style_class`.
    pub fn themed(name: impl Into<String>, style_class: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            style_class: Some(style_class.into()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_themed(&self) -> bool {
        self.style_class.is_some()
    }

    /// Toolkit style class that synthesized style names end with.
    pub fn style_class(&self) -> Option<&str> {
        self.style_class.as_deref()
    }
}

/// Read-only lookup of widget classes, injected into the parser.
pub trait WidgetCatalog {
    fn lookup(&self, class: &str) -> Option<WidgetClass>;
}

impl<C: WidgetCatalog + ?Sized> WidgetCatalog for &C {
    fn lookup(&self, class: &str) -> Option<WidgetClass> {
        (**self).lookup(class)
    }
}

impl<C: WidgetCatalog + ?Sized> WidgetCatalog for Box<C> {
    fn lookup(&self, class: &str) -> Option<WidgetClass> {
        (**self).lookup(class)
    }
}

// ─── Tk ──────────────────────────────────────────────────────────────────

/// Classic Tk widgets (no style indirection).
const TK_PLAIN: &[&str] = &[
    "Label",
    "LabelFrame",
    "Entry",
    "Frame",
    "Button",
    "Checkbutton",
    "Menubutton",
    "PanedWindow",
    "Radiobutton",
    "Scale",
    "Scrollbar",
];

/// Themed (ttk) widgets and the style class each one is looked up under.
const TK_THEMED: &[(&str, &str)] = &[
    ("TLabel", "TLabel"),
    ("TLabelFrame", "TLabelframe"),
    ("TEntry", "TEntry"),
    ("TFrame", "TFrame"),
    ("TCheckbutton", "TCheckbutton"),
    ("TMenubutton", "TMenubutton"),
    ("TPanedWindow", "TPanedwindow"),
    ("TRadiobutton", "TRadiobutton"),
    ("TScale", "TScale"),
    ("TScrollbar", "TScrollbar"),
    ("Combobox", "TCombobox"),
    ("Notebook", "TNotebook"),
    ("Progressbar", "TProgressbar"),
    ("Separator", "TSeparator"),
    ("Sizegrip", "TSizegrip"),
    ("Treeview", "Treeview"),
];

/// The Tk/ttk widget set.
#[derive(Debug, Clone, Copy, Default)]
pub struct TkCatalog;

impl TkCatalog {
    /// Every class name this catalog knows, plain classes first.
    pub fn class_names() -> impl Iterator<Item = &'static str> {
        TK_PLAIN
            .iter()
            .copied()
            .chain(TK_THEMED.iter().map(|(name, _)| *name))
    }
}

impl WidgetCatalog for TkCatalog {
    fn lookup(&self, class: &str) -> Option<WidgetClass> {
        if TK_PLAIN.contains(&class) {
            return Some(WidgetClass::plain(class));
        }
        TK_THEMED
            .iter()
            .find(|(name, _)| *name == class)
            .map(|(name, style_class)| WidgetClass::themed(*name, *style_class))
    }
}

// ─── Class table ─────────────────────────────────────────────────────────

/// A catalog assembled by the caller, for other toolkits and for tests.
#[derive(Debug, Clone, Default)]
pub struct ClassTable {
    classes: HashMap<String, WidgetClass>,
}

impl ClassTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a directly-configured class.
    #[must_use]
    pub fn with_plain(mut self, name: &str) -> Self {
        self.insert(WidgetClass::plain(name));
        self
    }

    /// Add a themed class styled under `style_class`.
    #[must_use]
    pub fn with_themed(mut self, name: &str, style_class: &str) -> Self {
        self.insert(WidgetClass::themed(name, style_class));
        self
    }

    pub fn insert(&mut self, class: WidgetClass) {
        self.classes.insert(class.name().to_string(), class);
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl WidgetCatalog for ClassTable {
    fn lookup(&self, class: &str) -> Option<WidgetClass> {
        self.classes.get(class).cloned()
    }
}
