//! A hero image widget: a background image with an optional color tint and
//! an optional content overlay, sized from its content and the window.
//!
//! The crate is headless. [`host::Host`] drives a [`widgets::Component`]
//! through render, layout and lifecycle events, and [`renderer::Renderer`]
//! rasterizes settled frames for inspection and image snapshots.

pub mod host;
pub mod image_metadata;
pub mod layout;
pub mod reactive;
pub mod renderer;
pub mod widgets;

pub mod prelude {
    pub use crate::host::{Dimensions, Frame, Host, Subscription, WindowSize};
    pub use crate::layout::{percent, Dimension, LayoutNode, Position, Size};
    pub use crate::reactive::{create_signal, on_cleanup, Signal};
    pub use crate::renderer::{RenderError, Renderer};
    pub use crate::widgets::{
        create_position_style, default_position_style, image, text, view, Color, Component,
        CustomImage, Element, ElementKind, HeroConfig, HeroState, HeroView, ImageProps,
        ImageRenderer, ImageSource, LayoutEvent, Lifecycle, MountContext, Rect, ResizeMode, Style,
    };
}
