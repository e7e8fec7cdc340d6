//! Absolute placement and depth ordering.
//!
//! Absolutely positioned boxes are stacked over their parent's bounds. Later
//! layers do not push earlier ones around; depth is decided by `z_index`
//! alone, with ties kept in tree order.

use crate::image_metadata::IntrinsicSizes;
use crate::widgets::element::{Element, ElementKind};
use crate::widgets::Rect;

use super::{content_width, layout_box, LayoutNode};

/// Place an absolutely positioned child over `parent`.
///
/// Auto sizes shrink to the child's content, except for an empty view with
/// auto height: that one stretches down to the parent's bottom edge, so a
/// tint layer always covers whatever the in-flow content measured.
pub(crate) fn place_absolute(
    element: &Element,
    parent: Rect,
    sizes: &mut IntrinsicSizes,
) -> LayoutNode {
    let style = element.style();
    let left = style.left.unwrap_or(0.0);
    let top = style.top.unwrap_or(0.0);
    let available = (parent.width - left).max(0.0);
    let leaf_view = matches!(element.kind(), ElementKind::View) && element.children().is_empty();

    let width = match style.width.and_then(|w| w.resolve(parent.width)) {
        Some(width) => width,
        None if leaf_view => available,
        None => content_width(element, available, sizes),
    };

    let height = match style.height.and_then(|h| h.resolve(parent.height)) {
        Some(height) => Some(height),
        None if leaf_view => Some((parent.height - top).max(0.0)),
        None => None,
    };

    layout_box(
        element,
        (parent.x + left, parent.y + top),
        width,
        height,
        parent.size(),
        sizes,
    )
}

/// Child indices in paint order: ascending `z_index`, stable.
pub fn paint_order(element: &Element) -> Vec<usize> {
    let mut order: Vec<usize> = (0..element.children().len()).collect();
    order.sort_by_key(|&index| element.children()[index].style().z_index.unwrap_or(0));
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{compute_layout, percent, Size};
    use crate::widgets::element::{text, view};
    use crate::widgets::{create_position_style, Style};

    fn stacked() -> Element {
        view()
            .child(view().with_style(Style::new().width(percent(100.0)).merge(create_position_style(1))))
            .child(
                view()
                    .with_style(create_position_style(2))
                    .child(text("hello").font_size(10.0)),
            )
            .child(view().with_style(Style::new().height(80.0)))
    }

    #[test]
    fn test_absolute_children_do_not_size_parent() {
        let layout = compute_layout(&stacked(), Size::new(300.0, 600.0), &mut IntrinsicSizes::new());
        assert_eq!(layout.frame.height, 80.0);
    }

    #[test]
    fn test_empty_overlay_stretches_to_parent() {
        let layout = compute_layout(&stacked(), Size::new(300.0, 600.0), &mut IntrinsicSizes::new());
        assert_eq!(layout.children[0].frame, Rect::new(0.0, 0.0, 300.0, 80.0));
    }

    #[test]
    fn test_content_overlay_shrinks_to_content() {
        let layout = compute_layout(&stacked(), Size::new(300.0, 600.0), &mut IntrinsicSizes::new());
        // 5 chars at 0.6em, one 1.2em line
        let width = 5.0_f32 * 10.0 * 0.6;
        let height = 10.0_f32 * 1.2;
        let frame = layout.children[1].frame;
        assert!((frame.width - 30.0).abs() < 1e-4);
        assert_eq!(frame, Rect::new(0.0, 0.0, width, height));
    }

    #[test]
    fn test_paint_order_sorts_by_z_index() {
        // in-flow child has implicit z-index 0 and paints first
        assert_eq!(paint_order(&stacked()), vec![2, 0, 1]);
    }

    #[test]
    fn test_paint_order_is_stable_for_ties() {
        let tree = view()
            .child(view().with_style(create_position_style(1)))
            .child(view().with_style(create_position_style(1)))
            .child(view());
        assert_eq!(paint_order(&tree), vec![2, 0, 1]);
    }
}
