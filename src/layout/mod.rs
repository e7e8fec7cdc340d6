//! Box layout for element trees.
//!
//! In-flow children stack vertically and stretch to their parent's width.
//! Absolutely positioned children are placed afterwards over the parent's
//! final bounds, so they never contribute to the parent's size. This is how
//! the hero image sizes its container while both overlays float above it.

pub mod overlay;

use std::fmt;

pub use overlay::paint_order;

use crate::image_metadata::IntrinsicSizes;
use crate::widgets::element::{Element, ElementKind, TextContent};
use crate::widgets::Rect;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub const fn zero() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

impl Default for Size {
    fn default() -> Self {
        Self::zero()
    }
}

/// A length along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Dimension {
    /// Decided by layout (content size, stretch, or aspect ratio).
    #[default]
    Auto,
    /// Logical pixels.
    Points(f32),
    /// Percentage of the containing box along the same axis.
    Percent(f32),
}

impl Dimension {
    /// Resolve against the containing length. Percentages of an unbounded
    /// basis stay unresolved.
    pub fn resolve(self, basis: f32) -> Option<f32> {
        match self {
            Dimension::Auto => None,
            Dimension::Points(points) => Some(points),
            Dimension::Percent(pct) if basis.is_finite() => Some(basis * pct / 100.0),
            Dimension::Percent(_) => None,
        }
    }
}

/// f32 converts to a point length
impl From<f32> for Dimension {
    fn from(value: f32) -> Self {
        Dimension::Points(value)
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::Auto => write!(f, "auto"),
            Dimension::Points(points) => write!(f, "{points}"),
            Dimension::Percent(pct) => write!(f, "{pct}%"),
        }
    }
}

/// Create a percentage length.
pub fn percent(value: f32) -> Dimension {
    Dimension::Percent(value)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Position {
    #[default]
    Relative,
    Absolute,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Relative => write!(f, "relative"),
            Position::Absolute => write!(f, "absolute"),
        }
    }
}

/// Computed geometry for one element, mirroring the element tree.
/// Frames are in viewport coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutNode {
    pub frame: Rect,
    pub children: Vec<LayoutNode>,
}

impl LayoutNode {
    pub fn child(&self, index: usize) -> Option<&LayoutNode> {
        self.children.get(index)
    }
}

const CHAR_ADVANCE_EM: f32 = 0.6;
const LINE_HEIGHT_EM: f32 = 1.2;

/// Lay out `root` inside a viewport.
pub fn compute_layout(root: &Element, viewport: Size, sizes: &mut IntrinsicSizes) -> LayoutNode {
    let width = root
        .style()
        .width
        .and_then(|w| w.resolve(viewport.width))
        .unwrap_or(viewport.width);
    layout_box(root, (0.0, 0.0), width, None, viewport, sizes)
}

/// Lay out one box whose width is already decided.
///
/// `containing` is the size percentages resolve against.
pub(crate) fn layout_box(
    element: &Element,
    origin: (f32, f32),
    width: f32,
    forced_height: Option<f32>,
    containing: Size,
    sizes: &mut IntrinsicSizes,
) -> LayoutNode {
    let style = element.style();
    let explicit_height = forced_height.or_else(|| {
        style
            .height
            .and_then(|h| h.resolve(containing.height))
    });

    let mut children: Vec<Option<LayoutNode>> = vec![None; element.children().len()];

    let height = match element.kind() {
        ElementKind::Text(content) => {
            explicit_height.unwrap_or_else(|| text_height(content, width))
        }
        ElementKind::Image(props) => explicit_height.unwrap_or_else(|| {
            match sizes.get(&props.source) {
                Some((iw, ih)) if iw > 0 => width * ih as f32 / iw as f32,
                _ => 0.0,
            }
        }),
        ElementKind::View => {
            let inner = Size::new(width, explicit_height.unwrap_or(f32::INFINITY));
            let mut cursor = origin.1;
            for (index, child) in element.children().iter().enumerate() {
                if child.style().is_absolute() {
                    continue;
                }
                let child_width = child
                    .style()
                    .width
                    .and_then(|w| w.resolve(width))
                    .unwrap_or(width);
                let node = layout_box(child, (origin.0, cursor), child_width, None, inner, sizes);
                cursor += node.frame.height;
                children[index] = Some(node);
            }
            explicit_height.unwrap_or(cursor - origin.1)
        }
    };

    let frame = Rect::new(origin.0, origin.1, width, height);

    for (index, child) in element.children().iter().enumerate() {
        if child.style().is_absolute() {
            children[index] = Some(overlay::place_absolute(child, frame, sizes));
        }
    }

    LayoutNode {
        frame,
        children: children.into_iter().flatten().collect(),
    }
}

/// Width a box would take if allowed to shrink to its content.
pub(crate) fn content_width(element: &Element, available: f32, sizes: &mut IntrinsicSizes) -> f32 {
    if let Some(width) = element.style().width.and_then(|w| w.resolve(available)) {
        return width;
    }
    match element.kind() {
        ElementKind::Text(content) => text_width(content).min(available),
        ElementKind::Image(props) => sizes
            .get(&props.source)
            .map(|(iw, _)| (iw as f32).min(available))
            .unwrap_or(0.0),
        ElementKind::View => element
            .children()
            .iter()
            .filter(|child| !child.style().is_absolute())
            .map(|child| content_width(child, available, sizes))
            .fold(0.0, f32::max),
    }
}

fn text_width(content: &TextContent) -> f32 {
    content.text.chars().count() as f32 * content.font_size * CHAR_ADVANCE_EM
}

fn text_height(content: &TextContent, width: f32) -> f32 {
    let lines = if width > 0.0 {
        (text_width(content) / width).ceil().max(1.0)
    } else {
        1.0
    };
    lines * content.font_size * LINE_HEIGHT_EM
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::element::{text, view};
    use crate::widgets::Style;

    #[test]
    fn test_dimension_resolve() {
        assert_eq!(Dimension::Points(10.0).resolve(50.0), Some(10.0));
        assert_eq!(percent(50.0).resolve(300.0), Some(150.0));
        assert_eq!(percent(50.0).resolve(f32::INFINITY), None);
        assert_eq!(Dimension::Auto.resolve(300.0), None);
    }

    #[test]
    fn test_dimension_display() {
        assert_eq!(percent(100.0).to_string(), "100%");
        assert_eq!(Dimension::from(1000.0).to_string(), "1000");
        assert_eq!(Dimension::Auto.to_string(), "auto");
    }

    #[test]
    fn test_flow_children_stack_and_stretch() {
        let tree = view()
            .child(view().with_style(Style::new().height(20.0)))
            .child(view().with_style(Style::new().height(30.0).width(percent(50.0))));

        let layout = compute_layout(&tree, Size::new(200.0, 400.0), &mut IntrinsicSizes::new());

        assert_eq!(layout.frame, Rect::new(0.0, 0.0, 200.0, 50.0));
        assert_eq!(layout.children[0].frame, Rect::new(0.0, 0.0, 200.0, 20.0));
        assert_eq!(layout.children[1].frame, Rect::new(0.0, 20.0, 100.0, 30.0));
    }

    #[test]
    fn test_text_wraps_to_width() {
        // 10 chars * 10px * 0.6 = 60px wide, 12px per line
        let tree = view().child(text("abcdefghij").font_size(10.0));

        let wide = compute_layout(&tree, Size::new(100.0, 100.0), &mut IntrinsicSizes::new());
        assert_eq!(wide.frame.height, 12.0);

        let narrow = compute_layout(&tree, Size::new(25.0, 100.0), &mut IntrinsicSizes::new());
        assert_eq!(narrow.frame.height, 36.0);
    }
}
