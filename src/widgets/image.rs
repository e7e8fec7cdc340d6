//! Image sources, resize modes and the pluggable image primitive.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;

use super::element::Element;
use super::style::Style;

/// Source for an image.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ImageSource {
    /// Remote resource. Kept as a reference only, never fetched.
    Uri(String),
    /// Raster image from a file path (PNG, JPEG, GIF, WebP)
    Path(PathBuf),
    /// Raster image from in-memory bytes
    Bytes(Arc<[u8]>),
    /// SVG from a file path
    SvgPath(PathBuf),
    /// SVG from in-memory bytes
    SvgBytes(Arc<[u8]>),
}

impl ImageSource {
    pub fn is_svg(&self) -> bool {
        matches!(self, ImageSource::SvgPath(_) | ImageSource::SvgBytes(_))
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, ImageSource::Uri(_))
    }
}

fn is_svg_path(path: &std::path::Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"))
}

impl From<&str> for ImageSource {
    fn from(s: &str) -> Self {
        if s.contains("://") {
            return ImageSource::Uri(s.to_string());
        }
        ImageSource::from(PathBuf::from(s))
    }
}

impl From<String> for ImageSource {
    fn from(s: String) -> Self {
        ImageSource::from(s.as_str())
    }
}

impl From<PathBuf> for ImageSource {
    fn from(path: PathBuf) -> Self {
        if is_svg_path(&path) {
            ImageSource::SvgPath(path)
        } else {
            ImageSource::Path(path)
        }
    }
}

impl fmt::Display for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageSource::Uri(uri) => write!(f, "{uri}"),
            ImageSource::Path(path) | ImageSource::SvgPath(path) => {
                write!(f, "{}", path.display())
            }
            ImageSource::Bytes(bytes) => write!(f, "<{} bytes>", bytes.len()),
            ImageSource::SvgBytes(bytes) => write!(f, "<svg {} bytes>", bytes.len()),
        }
    }
}

/// How the image fits the box it is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResizeMode {
    /// Scale uniformly to cover the box, cropping the overflow.
    #[default]
    Cover,
    /// Scale uniformly to fit inside the box, letterboxing.
    Contain,
    /// Scale each axis independently to fill the box exactly.
    Stretch,
    /// Like `Contain`, but never scales up.
    Center,
    /// Tile at the intrinsic size from the top-left corner.
    Repeat,
}

impl fmt::Display for ResizeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResizeMode::Cover => "cover",
            ResizeMode::Contain => "contain",
            ResizeMode::Stretch => "stretch",
            ResizeMode::Center => "center",
            ResizeMode::Repeat => "repeat",
        };
        f.write_str(name)
    }
}

/// Everything an image primitive needs to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageProps {
    pub source: ImageSource,
    pub resize_mode: ResizeMode,
    pub style: Style,
    /// Extra renderer-specific attributes, passed through untouched.
    pub attributes: BTreeMap<String, String>,
}

impl ImageProps {
    pub fn new(source: ImageSource) -> Self {
        Self {
            source,
            resize_mode: ResizeMode::default(),
            style: Style::default(),
            attributes: BTreeMap::new(),
        }
    }

    pub fn resize_mode(mut self, mode: ResizeMode) -> Self {
        self.resize_mode = mode;
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }
}

/// Turns image props into an element tree.
pub trait ImageRenderer {
    fn render(&self, props: ImageProps) -> Element;
}

impl<F> ImageRenderer for F
where
    F: Fn(ImageProps) -> Element,
{
    fn render(&self, props: ImageProps) -> Element {
        self(props)
    }
}

/// The built-in image primitive.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultImage;

impl ImageRenderer for DefaultImage {
    fn render(&self, props: ImageProps) -> Element {
        Element::image(props)
    }
}

/// A replacement image renderer plus attributes merged into its props.
///
/// Attributes given here override same-named attributes already present.
#[derive(Clone)]
pub struct CustomImage {
    renderer: Rc<dyn ImageRenderer>,
    attributes: BTreeMap<String, String>,
}

impl CustomImage {
    pub fn new(renderer: impl ImageRenderer + 'static) -> Self {
        Self {
            renderer: Rc::new(renderer),
            attributes: BTreeMap::new(),
        }
    }

    pub fn attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn render(&self, mut props: ImageProps) -> Element {
        props.attributes.extend(
            self.attributes
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );
        self.renderer.render(props)
    }
}

impl fmt::Debug for CustomImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomImage")
            .field("attributes", &self.attributes)
            .finish_non_exhaustive()
    }
}

/// Create an image element from a source with default props.
///
/// ```
/// use guido_hero::prelude::*;
///
/// let element = image("https://example.com/hero.jpg");
/// assert_eq!(element.type_name(), "Image");
/// ```
pub fn image(source: impl Into<ImageSource>) -> Element {
    DefaultImage.render(ImageProps::new(source.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::element::{view, ElementKind};

    #[test]
    fn test_source_from_str() {
        assert!(matches!(
            ImageSource::from("https://placeimg.com/640/480/any"),
            ImageSource::Uri(_)
        ));
        assert!(ImageSource::from("assets/logo.SVG").is_svg());
        assert!(matches!(
            ImageSource::from("assets/photo.webp"),
            ImageSource::Path(_)
        ));
    }

    #[test]
    fn test_default_image_renders_image_element() {
        let props = ImageProps::new("a.png".into()).resize_mode(ResizeMode::Contain);
        let element = DefaultImage.render(props.clone());
        match element.kind() {
            ElementKind::Image(rendered) => assert_eq!(rendered, &props),
            _ => panic!("expected an image element"),
        }
    }

    #[test]
    fn test_custom_image_merges_attributes() {
        let custom = CustomImage::new(|props: ImageProps| {
            view().child(Element::image(props))
        })
        .attribute("fade_duration", "300");

        let mut props = ImageProps::new("a.png".into());
        props.attributes.insert("fade_duration".into(), "0".into());
        props.attributes.insert("priority".into(), "high".into());

        let element = custom.render(props);
        assert_eq!(element.type_name(), "View");
        let ElementKind::Image(inner) = element.children()[0].kind() else {
            panic!("expected wrapped image");
        };
        assert_eq!(inner.attributes["fade_duration"], "300");
        assert_eq!(inner.attributes["priority"], "high");
    }

    #[test]
    fn test_resize_mode_default_is_cover() {
        assert_eq!(ResizeMode::default(), ResizeMode::Cover);
        assert_eq!(ResizeMode::Cover.to_string(), "cover");
    }
}
