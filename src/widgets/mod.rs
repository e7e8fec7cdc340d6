pub mod component;
pub mod element;
pub mod hero;
pub mod image;
pub mod style;
pub mod widget;

pub use component::{Component, MountContext};
pub use element::{text, view, Element, ElementKind, LayoutEvent, TextContent};
pub use hero::{HeroConfig, HeroState, HeroView, Lifecycle};
pub use self::image::{image, CustomImage, DefaultImage, ImageProps, ImageRenderer, ImageSource, ResizeMode};
pub use style::{
    create_position_style, default_position_style, Style, DEFAULT_Z_INDEX,
};
pub use widget::{Color, ColorParseError, Rect};
