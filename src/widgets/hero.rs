//! Hero image with an optional color tint and an optional content overlay.
//!
//! The image sits in normal flow and sizes the hero. Both overlays are
//! absolutely positioned at the top-left corner over the same bounds, the
//! tint at depth 1 and the content at depth 2, so content always paints over
//! the tint and both paint over the image.
//!
//! Without a `min_height`, the hero takes its height from the content
//! overlay: the first time the overlay is measured, the measured height is
//! pushed into state and the image is re-laid out to match.
//!
//! ```
//! use guido_hero::prelude::*;
//!
//! let config = HeroConfig::new("https://example.com/hero.jpg")
//!     .overlay_color(Color::RED)
//!     .overlay_opacity(0.4)
//!     .content(|| text("Welcome"));
//!
//! let mut host = Host::new(HeroView::new(config), WindowSize::new(390.0, 844.0));
//! let frame = host.mount();
//! assert_eq!(frame.root.children().len(), 3);
//! ```

use std::fmt;
use std::rc::Rc;

use crate::host::{Dimensions, WindowSize};
use crate::layout::{percent, Dimension, Position};
use crate::reactive::{create_signal, dispose_owner, on_cleanup, run_in_owner, with_owner};
use crate::reactive::{OwnerId, Signal};

use super::component::{Component, MountContext};
use super::element::{view, Element, LayoutEvent};
use super::image::{CustomImage, DefaultImage, ImageProps, ImageRenderer, ImageSource, ResizeMode};
use super::style::{
    create_position_style, default_position_style, Style, DEFAULT_Z_INDEX,
};
use super::widget::Color;

pub const DEFAULT_OVERLAY_OPACITY: f32 = 0.3;
pub const COLOR_OVERLAY_DEPTH: i32 = DEFAULT_Z_INDEX;
pub const CONTENT_OVERLAY_DEPTH: i32 = 2;

pub type ContentRenderer = Rc<dyn Fn() -> Element>;

/// Caller-supplied hero configuration.
#[derive(Clone)]
pub struct HeroConfig {
    source: ImageSource,
    overlay_color: Option<Color>,
    overlay_opacity: Option<f32>,
    content: Option<ContentRenderer>,
    min_height: Option<f32>,
    full_width: bool,
    resize_mode: Option<ResizeMode>,
    custom_image: Option<CustomImage>,
}

impl HeroConfig {
    pub fn new(source: impl Into<ImageSource>) -> Self {
        Self {
            source: source.into(),
            overlay_color: None,
            overlay_opacity: None,
            content: None,
            min_height: None,
            full_width: true,
            resize_mode: None,
            custom_image: None,
        }
    }

    /// Tint the image. Without a color there is no tint layer at all.
    pub fn overlay_color(mut self, color: Color) -> Self {
        self.overlay_color = Some(color);
        self
    }

    /// Tint opacity, clamped to `[0, 1]`. Defaults to 0.3.
    pub fn overlay_opacity(mut self, opacity: f32) -> Self {
        self.overlay_opacity = Some(opacity.clamp(0.0, 1.0));
        self
    }

    pub fn content<F: Fn() -> Element + 'static>(mut self, render: F) -> Self {
        self.content = Some(Rc::new(render));
        self
    }

    /// Pin the hero's height. A non-positive value counts as unset.
    pub fn min_height(mut self, height: f32) -> Self {
        self.min_height = (height > 0.0).then_some(height);
        self
    }

    pub fn full_width(mut self, full_width: bool) -> Self {
        self.full_width = full_width;
        self
    }

    pub fn resize_mode(mut self, mode: ResizeMode) -> Self {
        self.resize_mode = Some(mode);
        self
    }

    pub fn custom_image(mut self, custom: CustomImage) -> Self {
        self.custom_image = Some(custom);
        self
    }

    pub fn source(&self) -> &ImageSource {
        &self.source
    }

    pub fn get_overlay_color(&self) -> Option<Color> {
        self.overlay_color
    }

    pub fn get_overlay_opacity(&self) -> f32 {
        self.overlay_opacity.unwrap_or(DEFAULT_OVERLAY_OPACITY)
    }

    pub fn get_min_height(&self) -> Option<f32> {
        self.min_height
    }

    pub fn is_full_width(&self) -> bool {
        self.full_width
    }

    pub fn has_content(&self) -> bool {
        self.content.is_some()
    }
}

impl fmt::Debug for HeroConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeroConfig")
            .field("source", &self.source)
            .field("overlay_color", &self.overlay_color)
            .field("overlay_opacity", &self.overlay_opacity)
            .field("content", &self.content.is_some())
            .field("min_height", &self.min_height)
            .field("full_width", &self.full_width)
            .field("resize_mode", &self.resize_mode)
            .field("custom_image", &self.custom_image)
            .finish()
    }
}

/// Reactive state owned by one hero instance.
#[derive(Clone)]
pub struct HeroState {
    pub height: Signal<Option<f32>>,
    pub width: Signal<Option<f32>>,
    pub opacity: Signal<f32>,
    pub source: Signal<ImageSource>,
    pub resize_mode: Signal<ResizeMode>,
}

impl HeroState {
    fn new(config: &HeroConfig) -> Self {
        Self {
            height: create_signal(config.min_height),
            width: create_signal(None),
            opacity: create_signal(0.0),
            source: create_signal(config.source.clone()),
            resize_mode: create_signal(config.resize_mode.unwrap_or_default()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Created,
    Mounted,
    Unmounted,
}

/// Handles the two external events, content layout and window change,
/// detached from the view so callbacks can outlive a single render.
///
/// After unmount the state's signals are disposed and every write here is
/// dropped, so a late event cannot touch a torn-down hero.
#[derive(Clone)]
struct EventHandler {
    state: HeroState,
    pinned_height: Option<f32>,
    full_width: bool,
    window: Option<Dimensions>,
}

impl EventHandler {
    fn update_view_height(&self, height: f32) {
        if self.pinned_height.is_some() {
            return;
        }

        if self.state.height.get() != Some(height) {
            self.state.height.set(Some(height));
        }

        // seed the width once; later changes arrive through the window listener
        if self.full_width && self.state.width.get().is_none() {
            if let Some(window) = &self.window {
                HeroView::update_width_state(&self.state, window.get());
            }
        }
    }

    fn on_window_change(&self, window: WindowSize) {
        HeroView::update_width_state(&self.state, window);
    }
}

/// Hero image view. See the module docs for the layering contract.
pub struct HeroView {
    config: HeroConfig,
    state: HeroState,
    owner: OwnerId,
    pinned_height: Option<f32>,
    window: Option<Dimensions>,
    lifecycle: Lifecycle,
}

impl HeroView {
    pub fn new(config: HeroConfig) -> Self {
        let (state, owner) = with_owner(|| HeroState::new(&config));
        Self {
            pinned_height: config.min_height,
            config,
            state,
            owner,
            window: None,
            lifecycle: Lifecycle::Created,
        }
    }

    pub fn config(&self) -> &HeroConfig {
        &self.config
    }

    pub fn state(&self) -> &HeroState {
        &self.state
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// Write a window width into hero state. Ignored once the state's owner
    /// has been disposed.
    pub fn update_width_state(state: &HeroState, window: WindowSize) {
        state.width.set(Some(window.width));
    }

    /// Content overlay measured at `height`.
    pub fn on_content_layout(&self, height: f32) {
        self.event_handler().update_view_height(height);
    }

    fn event_handler(&self) -> EventHandler {
        EventHandler {
            state: self.state.clone(),
            pinned_height: self.pinned_height,
            full_width: self.config.full_width,
            window: self.window.clone(),
        }
    }

    pub fn render_color_overlay(&self) -> Option<Element> {
        let color = self.config.overlay_color?;
        let style = Style::new()
            .background_color(color)
            .maybe_height(self.state.height.get())
            .opacity(self.config.get_overlay_opacity())
            .width(percent(100.0))
            .merge(default_position_style());
        Some(view().with_style(style))
    }

    pub fn render_content_overlay(&self) -> Option<Element> {
        let content = self.config.content.as_ref()?;
        let style = Style::new()
            .background_color(Color::TRANSPARENT)
            .merge(create_position_style(CONTENT_OVERLAY_DEPTH));
        let handler = self.event_handler();
        Some(
            view()
                .with_style(style)
                .on_layout(move |event: LayoutEvent| {
                    handler.update_view_height(event.layout.height)
                })
                .child(content()),
        )
    }

    pub fn image_props(&self) -> ImageProps {
        let width = self
            .state
            .width
            .get()
            .map(Dimension::Points)
            .unwrap_or(percent(100.0));
        ImageProps::new(self.state.source.get())
            .resize_mode(self.state.resize_mode.get())
            .style(Style {
                width: Some(width),
                ..Style::new().maybe_height(self.state.height.get())
            })
    }

    pub fn render_image(&self) -> Element {
        let props = self.image_props();
        match &self.config.custom_image {
            Some(custom) => custom.render(props),
            None => DefaultImage.render(props),
        }
    }
}

impl Component for HeroView {
    type Props = HeroConfig;

    fn render(&self) -> Element {
        let root = Style::new()
            .opacity(self.state.opacity.get())
            .position(Position::Relative);
        view()
            .with_style(root)
            .maybe_child(self.render_color_overlay())
            .maybe_child(self.render_content_overlay())
            .child(self.render_image())
    }

    fn mounted(&mut self, ctx: &MountContext) {
        if self.lifecycle != Lifecycle::Created {
            log::warn!("hero mounted from {:?}, ignoring", self.lifecycle);
            return;
        }
        self.lifecycle = Lifecycle::Mounted;
        self.window = Some(ctx.window().clone());
        self.state.opacity.set(1.0);

        if self.config.full_width {
            let handler = self.event_handler();
            let subscription = ctx
                .window()
                .add_listener(move |window| handler.on_window_change(window));
            run_in_owner(self.owner, || on_cleanup(move || subscription.unsubscribe()));
            log::debug!("hero subscribed to window changes");
        }
    }

    fn props_changed(&mut self, props: HeroConfig) {
        if props.source != self.config.source {
            log::debug!("hero source changed to {}", props.source);
            self.state.source.set(props.source.clone());
        }
        self.config = props;
    }

    fn unmounted(&mut self) {
        if self.lifecycle != Lifecycle::Mounted {
            return;
        }
        self.lifecycle = Lifecycle::Unmounted;
        dispose_owner(self.owner);
        log::debug!("hero unmounted");
    }
}

impl Drop for HeroView {
    fn drop(&mut self) {
        dispose_owner(self.owner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reactive::take_change_flags;
    use crate::widgets::element::text;

    const IMAGE_URL: &str = "https://placeimg.com/640/480/any";

    fn mounted(config: HeroConfig) -> (HeroView, Dimensions) {
        let window = Dimensions::new(WindowSize::new(390.0, 844.0));
        let mut hero = HeroView::new(config);
        hero.mounted(&MountContext::new(window.clone()));
        (hero, window)
    }

    #[test]
    fn test_initial_state() {
        let hero = HeroView::new(HeroConfig::new(IMAGE_URL).min_height(250.0));
        let state = hero.state();
        assert_eq!(state.height.get(), Some(250.0));
        assert_eq!(state.width.get(), None);
        assert_eq!(state.opacity.get(), 0.0);
        assert_eq!(state.resize_mode.get(), ResizeMode::Cover);
        assert_eq!(state.source.get(), ImageSource::from(IMAGE_URL));
    }

    #[test]
    fn test_zero_min_height_counts_as_unset() {
        let hero = HeroView::new(HeroConfig::new(IMAGE_URL).min_height(0.0));
        assert_eq!(hero.state().height.get(), None);
    }

    #[test]
    fn test_mount_fades_in_once() {
        let (mut hero, window) = mounted(HeroConfig::new(IMAGE_URL));
        assert_eq!(hero.state().opacity.get(), 1.0);
        assert_eq!(hero.lifecycle(), Lifecycle::Mounted);

        hero.state().opacity.set(0.5);
        hero.mounted(&MountContext::new(window));
        assert_eq!(hero.state().opacity.get(), 0.5);
    }

    #[test]
    fn test_layout_sets_height_and_seeds_width() {
        let (hero, _window) = mounted(HeroConfig::new(IMAGE_URL).content(|| text("hi")));
        hero.on_content_layout(120.0);
        assert_eq!(hero.state().height.get(), Some(120.0));
        assert_eq!(hero.state().width.get(), Some(390.0));
    }

    #[test]
    fn test_layout_before_mount_does_not_seed_width() {
        let hero = HeroView::new(HeroConfig::new(IMAGE_URL));
        hero.on_content_layout(80.0);
        assert_eq!(hero.state().height.get(), Some(80.0));
        assert_eq!(hero.state().width.get(), None);
    }

    #[test]
    fn test_min_height_pins_height() {
        let (hero, _window) = mounted(HeroConfig::new(IMAGE_URL).min_height(1000.0));
        hero.on_content_layout(42.0);
        assert_eq!(hero.state().height.get(), Some(1000.0));
        assert_eq!(hero.state().width.get(), None);
    }

    #[test]
    fn test_single_listener_per_mount() {
        let (hero, window) = mounted(HeroConfig::new(IMAGE_URL));
        for height in [10.0, 20.0, 30.0] {
            hero.on_content_layout(height);
        }
        assert_eq!(window.listener_count(), 1);
    }

    #[test]
    fn test_full_width_false_never_subscribes() {
        let (hero, window) = mounted(HeroConfig::new(IMAGE_URL).full_width(false));
        hero.on_content_layout(64.0);
        window.set(WindowSize::new(844.0, 390.0));
        assert_eq!(window.listener_count(), 0);
        assert_eq!(hero.state().width.get(), None);
    }

    #[test]
    fn test_window_changes_keep_updating_width() {
        let (hero, window) = mounted(HeroConfig::new(IMAGE_URL));
        hero.on_content_layout(64.0);
        window.set(WindowSize::new(844.0, 390.0));
        assert_eq!(hero.state().width.get(), Some(844.0));
        window.set(WindowSize::new(390.0, 844.0));
        assert_eq!(hero.state().width.get(), Some(390.0));
    }

    #[test]
    fn test_unmount_releases_listener_and_freezes_state() {
        let (mut hero, window) = mounted(HeroConfig::new(IMAGE_URL));
        hero.unmounted();
        assert_eq!(window.listener_count(), 0);

        window.set(WindowSize::new(1024.0, 768.0));
        hero.on_content_layout(90.0);
        HeroView::update_width_state(hero.state(), WindowSize::new(1024.0, 768.0));
        assert_eq!(hero.state().width.get(), None);
        assert_eq!(hero.state().height.get(), None);
    }

    #[test]
    fn test_props_change_tracks_source_only() {
        let (mut hero, _window) = mounted(HeroConfig::new(IMAGE_URL));
        take_change_flags();

        hero.props_changed(HeroConfig::new(IMAGE_URL).resize_mode(ResizeMode::Contain));
        assert!(take_change_flags().is_empty());
        assert_eq!(hero.state().resize_mode.get(), ResizeMode::Cover);

        hero.props_changed(HeroConfig::new("https://placeimg.com/1280/720/any"));
        assert!(!take_change_flags().is_empty());
        assert_eq!(
            hero.image_props().source,
            ImageSource::from("https://placeimg.com/1280/720/any")
        );
    }

    #[test]
    fn test_overlay_opacity_defaults_and_clamps() {
        assert_eq!(HeroConfig::new(IMAGE_URL).get_overlay_opacity(), 0.3);
        assert_eq!(HeroConfig::new(IMAGE_URL).overlay_opacity(0.0).get_overlay_opacity(), 0.0);
        assert_eq!(HeroConfig::new(IMAGE_URL).overlay_opacity(3.0).get_overlay_opacity(), 1.0);
    }

    #[test]
    fn test_image_width_follows_state() {
        let (hero, _window) = mounted(HeroConfig::new(IMAGE_URL));
        assert_eq!(hero.image_props().style.width, Some(percent(100.0)));
        hero.on_content_layout(50.0);
        assert_eq!(hero.image_props().style.width, Some(Dimension::Points(390.0)));
        assert_eq!(hero.image_props().style.height, Some(Dimension::Points(50.0)));
    }
}
