//! Declarative element trees.
//!
//! Components render into `Element`s; the host lays them out, reports
//! measured sizes back through `on_layout` callbacks, and hands the result to
//! the renderer. Elements are cheap to rebuild every frame.

use std::fmt;
use std::rc::Rc;

use super::image::ImageProps;
use super::style::Style;
use super::widget::Rect;

pub const DEFAULT_FONT_SIZE: f32 = 14.0;

/// Measured geometry delivered to an element's `on_layout` callback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutEvent {
    pub layout: Rect,
}

pub type LayoutCallback = Rc<dyn Fn(LayoutEvent)>;

#[derive(Debug, Clone, PartialEq)]
pub struct TextContent {
    pub text: String,
    pub font_size: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ElementKind {
    View,
    Text(TextContent),
    Image(ImageProps),
}

#[derive(Clone)]
pub struct Element {
    kind: ElementKind,
    style: Style,
    children: Vec<Element>,
    on_layout: Option<LayoutCallback>,
}

impl Element {
    fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            style: Style::default(),
            children: Vec::new(),
            on_layout: None,
        }
    }

    /// An image element. The props' style becomes the element's style.
    pub fn image(props: ImageProps) -> Self {
        let style = props.style;
        Self {
            style,
            ..Self::new(ElementKind::Image(props))
        }
    }

    pub fn with_style(mut self, style: Style) -> Self {
        if let ElementKind::Image(props) = &mut self.kind {
            props.style = style;
        }
        self.style = style;
        self
    }

    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Append a child only when there is one.
    pub fn maybe_child(mut self, child: Option<Element>) -> Self {
        self.children.extend(child);
        self
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// Set the font size. Only meaningful for text elements.
    pub fn font_size(mut self, size: f32) -> Self {
        if let ElementKind::Text(content) = &mut self.kind {
            content.font_size = size;
        }
        self
    }

    /// Register a callback fired after layout whenever this element's
    /// measured size changes.
    pub fn on_layout<F: Fn(LayoutEvent) + 'static>(mut self, callback: F) -> Self {
        self.on_layout = Some(Rc::new(callback));
        self
    }

    pub fn kind(&self) -> &ElementKind {
        &self.kind
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn layout_callback(&self) -> Option<&LayoutCallback> {
        self.on_layout.as_ref()
    }

    pub fn type_name(&self) -> &'static str {
        match self.kind {
            ElementKind::View => "View",
            ElementKind::Text(_) => "Text",
            ElementKind::Image(_) => "Image",
        }
    }

    fn write_tree(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        write!(f, "{:indent$}{}", "", self.type_name(), indent = depth * 2)?;
        match &self.kind {
            ElementKind::View => {}
            ElementKind::Text(content) => write!(f, " {:?}", content.text)?,
            ElementKind::Image(props) => {
                write!(f, " source={} resize_mode={}", props.source, props.resize_mode)?;
                for (key, value) in &props.attributes {
                    write!(f, " {key}={value}")?;
                }
            }
        }
        if !self.style.is_empty() {
            write!(f, " {}", self.style)?;
        }
        if self.on_layout.is_some() {
            write!(f, " on_layout")?;
        }
        writeln!(f)?;
        for child in &self.children {
            child.write_tree(f, depth + 1)?;
        }
        Ok(())
    }
}

/// Indented tree dump, one element per line. Stable across runs, so it
/// doubles as a textual snapshot.
impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_tree(f, 0)
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("kind", &self.kind)
            .field("style", &self.style)
            .field("children", &self.children)
            .field("on_layout", &self.on_layout.is_some())
            .finish()
    }
}

/// Create an empty view.
pub fn view() -> Element {
    Element::new(ElementKind::View)
}

/// Create a text element with the default font size.
pub fn text(text: impl Into<String>) -> Element {
    Element::new(ElementKind::Text(TextContent {
        text: text.into(),
        font_size: DEFAULT_FONT_SIZE,
    }))
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::widgets::create_position_style;
    use crate::widgets::image::ImageSource;

    #[test]
    fn test_builder_collects_children() {
        let tree = view()
            .child(text("React Native Hero"))
            .maybe_child(None)
            .maybe_child(Some(text("Testing!")));
        assert_eq!(tree.children().len(), 2);
        assert_eq!(tree.children()[0].type_name(), "Text");
    }

    #[test]
    fn test_image_style_follows_element_style() {
        let element = Element::image(ImageProps::new(ImageSource::from("a.png")))
            .with_style(create_position_style(3));
        let ElementKind::Image(props) = element.kind() else {
            panic!("expected image");
        };
        assert_eq!(props.style, *element.style());
    }

    #[test]
    fn test_on_layout_callback_is_kept() {
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        let element = view().on_layout(move |_| counter.set(counter.get() + 1));

        let callback = element.layout_callback().unwrap();
        callback(LayoutEvent {
            layout: Rect::new(0.0, 0.0, 1.0, 1.0),
        });
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_display_tree() {
        let tree = view()
            .with_style(create_position_style(2))
            .on_layout(|_| {})
            .child(text("hi"));
        assert_eq!(
            tree.to_string(),
            "View {position: absolute, top: 0, left: 0, z_index: 2} on_layout\n  Text \"hi\"\n"
        );
    }
}
