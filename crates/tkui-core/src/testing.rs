//! A toolkit that records calls instead of building widgets.
//!
//! Useful for checking what realization would do to a real toolkit, in this
//! crate's tests and in downstream ones.

use crate::model::{AttrMap, GridAxis, LayoutMode, StyleId};
use crate::toolkit::{Toolkit, ToolkitError};
use std::collections::HashSet;

/// One recorded toolkit call. Widgets are numbered from 1 in creation order;
/// 0 is the mount handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    Create { widget: usize, class: String, parent: usize },
    Layout { widget: usize, mode: LayoutMode, args: AttrMap },
    Config { widget: usize, attrs: AttrMap },
    RegisterStyle { id: StyleId, attrs: AttrMap },
    ApplyStyle { widget: usize, style: StyleId },
    GridWeight { widget: usize, axis: GridAxis, index: u32 },
}

#[derive(Debug, Default)]
pub struct RecordingToolkit {
    pub ops: Vec<Op>,
    classes: Vec<String>,
    rejected: HashSet<String>,
}

impl RecordingToolkit {
    /// Handle to pass as the mount widget.
    pub const MOUNT: usize = 0;

    pub fn new() -> Self {
        Self::default()
    }

    /// A toolkit that fails `create_widget` for each of `classes`.
    pub fn rejecting<'a>(classes: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            rejected: classes.into_iter().map(str::to_string).collect(),
            ..Self::default()
        }
    }

    /// Class a handle was created with.
    pub fn class_of(&self, widget: usize) -> Option<&str> {
        widget
            .checked_sub(1)
            .and_then(|i| self.classes.get(i))
            .map(String::as_str)
    }

    /// Recorded calls that touched `widget`, style registrations excluded.
    pub fn ops_for(&self, widget: usize) -> Vec<&Op> {
        self.ops
            .iter()
            .filter(|op| match op {
                Op::Create { widget: w, .. }
                | Op::Layout { widget: w, .. }
                | Op::Config { widget: w, .. }
                | Op::ApplyStyle { widget: w, .. }
                | Op::GridWeight { widget: w, .. } => *w == widget,
                Op::RegisterStyle { .. } => false,
            })
            .collect()
    }
}

impl Toolkit for RecordingToolkit {
    type Widget = usize;
    type Style = StyleId;

    fn create_widget(&mut self, class: &str, parent: &usize) -> Result<usize, ToolkitError> {
        if self.rejected.contains(class) {
            return Err(ToolkitError::UnsupportedClass(class.to_string()));
        }
        self.classes.push(class.to_string());
        let widget = self.classes.len();
        self.ops.push(Op::Create {
            widget,
            class: class.to_string(),
            parent: *parent,
        });
        Ok(widget)
    }

    fn apply_layout(&mut self, widget: &usize, mode: LayoutMode, args: &AttrMap) -> Result<(), ToolkitError> {
        self.ops.push(Op::Layout {
            widget: *widget,
            mode,
            args: args.clone(),
        });
        Ok(())
    }

    fn apply_config(&mut self, widget: &usize, attrs: &AttrMap) -> Result<(), ToolkitError> {
        self.ops.push(Op::Config {
            widget: *widget,
            attrs: attrs.clone(),
        });
        Ok(())
    }

    fn register_style(&mut self, id: &StyleId, attrs: &AttrMap) -> Result<StyleId, ToolkitError> {
        self.ops.push(Op::RegisterStyle {
            id: id.clone(),
            attrs: attrs.clone(),
        });
        Ok(id.clone())
    }

    fn apply_style(&mut self, widget: &usize, style: &StyleId) -> Result<(), ToolkitError> {
        self.ops.push(Op::ApplyStyle {
            widget: *widget,
            style: style.clone(),
        });
        Ok(())
    }

    fn configure_grid_weight(&mut self, widget: &usize, axis: GridAxis, index: u32) -> Result<(), ToolkitError> {
        self.ops.push(Op::GridWeight {
            widget: *widget,
            axis,
            index,
        });
        Ok(())
    }
}
