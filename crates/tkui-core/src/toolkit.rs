//! The toolkit collaborator: whatever turns a widget description into real
//! widgets.
//!
//! The parser never talks to a toolkit. [`crate::realize`] drives one over a
//! finished tree.

use crate::model::{AttrMap, GridAxis, LayoutMode, StyleId};
use thiserror::Error;

/// Failure reported by a toolkit while realizing a tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolkitError {
    #[error("unsupported widget class `{0}`")]
    UnsupportedClass(String),

    #[error("toolkit error: {0}")]
    Backend(String),
}

/// Operations a UI toolkit exposes to realization.
///
/// `Widget` is a cheap handle (an id, a reference-counted pointer); it is
/// cloned into the returned name map.
pub trait Toolkit {
    type Widget: Clone;
    type Style;

    /// Create a widget of `class` as a child of `parent`.
    fn create_widget(&mut self, class: &str, parent: &Self::Widget) -> Result<Self::Widget, ToolkitError>;

    /// Place `widget` in its parent with the given geometry manager.
    fn apply_layout(&mut self, widget: &Self::Widget, mode: LayoutMode, args: &AttrMap) -> Result<(), ToolkitError>;

    fn apply_config(&mut self, widget: &Self::Widget, attrs: &AttrMap) -> Result<(), ToolkitError>;

    /// Define a named style. Called once per style id.
    fn register_style(&mut self, id: &StyleId, attrs: &AttrMap) -> Result<Self::Style, ToolkitError>;

    fn apply_style(&mut self, widget: &Self::Widget, style: &Self::Style) -> Result<(), ToolkitError>;

    /// Give row or column `index` of `widget`'s grid weight 1.
    fn configure_grid_weight(&mut self, widget: &Self::Widget, axis: GridAxis, index: u32) -> Result<(), ToolkitError>;
}

impl<T: Toolkit + ?Sized> Toolkit for &mut T {
    type Widget = T::Widget;
    type Style = T::Style;

    fn create_widget(&mut self, class: &str, parent: &Self::Widget) -> Result<Self::Widget, ToolkitError> {
        (**self).create_widget(class, parent)
    }

    fn apply_layout(&mut self, widget: &Self::Widget, mode: LayoutMode, args: &AttrMap) -> Result<(), ToolkitError> {
        (**self).apply_layout(widget, mode, args)
    }

    fn apply_config(&mut self, widget: &Self::Widget, attrs: &AttrMap) -> Result<(), ToolkitError> {
        (**self).apply_config(widget, attrs)
    }

    fn register_style(&mut self, id: &StyleId, attrs: &AttrMap) -> Result<Self::Style, ToolkitError> {
        (**self).register_style(id, attrs)
    }

    fn apply_style(&mut self, widget: &Self::Widget, style: &Self::Style) -> Result<(), ToolkitError> {
        (**self).apply_style(widget, style)
    }

    fn configure_grid_weight(&mut self, widget: &Self::Widget, axis: GridAxis, index: u32) -> Result<(), ToolkitError> {
        (**self).configure_grid_weight(widget, axis, index)
    }
}
