//! Box styles for elements.
//!
//! Every field is optional: an unset field means "let layout decide", which is
//! observably different from an explicit value. Overlays rely on that to
//! stretch over the image when no height has been measured yet.

use std::fmt;

use crate::layout::{Dimension, Position};

use super::widget::Color;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Style {
    pub position: Option<Position>,
    pub top: Option<f32>,
    pub left: Option<f32>,
    pub z_index: Option<i32>,
    pub width: Option<Dimension>,
    pub height: Option<Dimension>,
    pub opacity: Option<f32>,
    pub background_color: Option<Color>,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    pub fn top(mut self, top: f32) -> Self {
        self.top = Some(top);
        self
    }

    pub fn left(mut self, left: f32) -> Self {
        self.left = Some(left);
        self
    }

    pub fn z_index(mut self, z_index: i32) -> Self {
        self.z_index = Some(z_index);
        self
    }

    pub fn width(mut self, width: impl Into<Dimension>) -> Self {
        self.width = Some(width.into());
        self
    }

    pub fn height(mut self, height: impl Into<Dimension>) -> Self {
        self.height = Some(height.into());
        self
    }

    /// Set the height only when one is known, leaving it unset otherwise.
    pub fn maybe_height(mut self, height: Option<f32>) -> Self {
        self.height = height.map(Dimension::Points);
        self
    }

    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = Some(opacity);
        self
    }

    pub fn background_color(mut self, color: Color) -> Self {
        self.background_color = Some(color);
        self
    }

    /// Overlay `other` on top of `self`; fields set in `other` win.
    pub fn merge(self, other: Style) -> Style {
        Style {
            position: other.position.or(self.position),
            top: other.top.or(self.top),
            left: other.left.or(self.left),
            z_index: other.z_index.or(self.z_index),
            width: other.width.or(self.width),
            height: other.height.or(self.height),
            opacity: other.opacity.or(self.opacity),
            background_color: other.background_color.or(self.background_color),
        }
    }

    pub fn is_absolute(&self) -> bool {
        self.position == Some(Position::Absolute)
    }

    pub fn is_empty(&self) -> bool {
        *self == Style::default()
    }
}

/// Depth used when no z-index is given.
pub const DEFAULT_Z_INDEX: i32 = 1;

/// [`create_position_style`] at [`DEFAULT_Z_INDEX`].
pub fn default_position_style() -> Style {
    create_position_style(DEFAULT_Z_INDEX)
}

/// Absolute positioning pinned to the top-left corner at the given depth.
///
/// ```
/// use guido_hero::prelude::*;
///
/// let style = create_position_style(2);
/// assert_eq!(style.z_index, Some(2));
/// assert!(style.is_absolute());
/// ```
pub fn create_position_style(z_index: i32) -> Style {
    Style {
        position: Some(Position::Absolute),
        top: Some(0.0),
        left: Some(0.0),
        z_index: Some(z_index),
        ..Style::default()
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut fields: Vec<String> = Vec::new();
        if let Some(position) = self.position {
            fields.push(format!("position: {position}"));
        }
        if let Some(top) = self.top {
            fields.push(format!("top: {top}"));
        }
        if let Some(left) = self.left {
            fields.push(format!("left: {left}"));
        }
        if let Some(z_index) = self.z_index {
            fields.push(format!("z_index: {z_index}"));
        }
        if let Some(width) = self.width {
            fields.push(format!("width: {width}"));
        }
        if let Some(height) = self.height {
            fields.push(format!("height: {height}"));
        }
        if let Some(opacity) = self.opacity {
            fields.push(format!("opacity: {opacity}"));
        }
        if let Some(color) = self.background_color {
            fields.push(format!("background_color: {color}"));
        }
        write!(f, "{{{}}}", fields.join(", "))
    }
}
