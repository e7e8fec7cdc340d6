//! Headless host: drives a component through render, layout and lifecycle.
//!
//! Each [`Host::frame`] renders the component, lays the tree out inside the
//! window, then reports measured sizes to `on_layout` callbacks whose box
//! changed since the last report. Layout events only reach mounted trees.
//! Callbacks typically write signals, which requests another pass; the host
//! repeats until layout settles.

pub mod dimensions;

use std::collections::HashMap;

pub use dimensions::{Dimensions, Subscription, WindowSize};

use crate::image_metadata::IntrinsicSizes;
use crate::layout::{compute_layout, LayoutNode, Size};
use crate::reactive::{request_layout, take_change_flags, ChangeFlags};
use crate::widgets::component::{Component, MountContext};
use crate::widgets::element::{Element, LayoutCallback, LayoutEvent};
use crate::widgets::Rect;

/// Upper bound on render/layout passes per frame.
pub const MAX_LAYOUT_PASSES: usize = 8;

/// A settled frame: the rendered tree and its geometry.
#[derive(Debug, Clone)]
pub struct Frame {
    pub root: Element,
    pub layout: LayoutNode,
    pub viewport: Size,
    pub passes: usize,
}

impl Frame {
    /// Find the first element (depth-first, tree order) matching `pred`,
    /// together with its layout.
    pub fn find(&self, pred: impl Fn(&Element) -> bool) -> Option<(&Element, &LayoutNode)> {
        fn walk<'a>(
            element: &'a Element,
            node: &'a LayoutNode,
            pred: &dyn Fn(&Element) -> bool,
        ) -> Option<(&'a Element, &'a LayoutNode)> {
            if pred(element) {
                return Some((element, node));
            }
            element
                .children()
                .iter()
                .zip(&node.children)
                .find_map(|(child, child_node)| walk(child, child_node, pred))
        }
        walk(&self.root, &self.layout, &pred)
    }
}

pub struct Host<C: Component> {
    root: C,
    window: Dimensions,
    mounted: bool,
    measured: HashMap<Vec<usize>, Rect>,
    sizes: IntrinsicSizes,
}

impl<C: Component> Host<C> {
    pub fn new(root: C, window: WindowSize) -> Self {
        Self {
            root,
            window: Dimensions::new(window),
            mounted: false,
            measured: HashMap::new(),
            sizes: IntrinsicSizes::new(),
        }
    }

    pub fn component(&self) -> &C {
        &self.root
    }

    pub fn window(&self) -> &Dimensions {
        &self.window
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Intrinsic size cache used by layout. Seed it for sources the host
    /// cannot read itself, such as remote URIs.
    pub fn intrinsic_sizes(&mut self) -> &mut IntrinsicSizes {
        &mut self.sizes
    }

    /// Attach the component: produce its first frame, run `mounted`, then
    /// settle a frame with layout events delivered.
    pub fn mount(&mut self) -> Frame {
        if self.mounted {
            log::warn!("component already mounted");
            return self.frame();
        }
        self.frame();
        self.mounted = true;
        log::debug!("mounting component");
        self.root.mounted(&MountContext::new(self.window.clone()));
        self.frame()
    }

    pub fn update_props(&mut self, props: C::Props) {
        self.root.props_changed(props);
        request_layout();
    }

    pub fn set_window_size(&self, window: WindowSize) {
        self.window.set(window);
        request_layout();
    }

    pub fn needs_frame(&self) -> bool {
        !crate::reactive::change_flags().is_empty()
    }

    /// Render and lay out until no further layout is requested.
    pub fn frame(&mut self) -> Frame {
        let viewport = self.window.get().size();
        let mut passes = 0;
        loop {
            take_change_flags();
            passes += 1;

            let root = self.root.render();
            let layout = compute_layout(&root, viewport, &mut self.sizes);

            let mut events = Vec::new();
            if self.mounted {
                self.collect_layout_events(&root, &layout, &mut Vec::new(), &mut events);
            }
            for (callback, event) in events {
                log::trace!("on_layout {:?}", event.layout);
                callback(event);
            }

            let flags = take_change_flags();
            if !flags.contains(ChangeFlags::NEEDS_LAYOUT) {
                return Frame {
                    root,
                    layout,
                    viewport,
                    passes,
                };
            }
            if passes >= MAX_LAYOUT_PASSES {
                log::warn!("layout did not settle after {passes} passes");
                return Frame {
                    root,
                    layout,
                    viewport,
                    passes,
                };
            }
        }
    }

    fn collect_layout_events(
        &mut self,
        element: &Element,
        node: &LayoutNode,
        path: &mut Vec<usize>,
        events: &mut Vec<(LayoutCallback, LayoutEvent)>,
    ) {
        if let Some(callback) = element.layout_callback() {
            let previous = self.measured.insert(path.clone(), node.frame);
            if previous.map(|rect| rect.size()) != Some(node.frame.size()) {
                events.push((
                    callback.clone(),
                    LayoutEvent {
                        layout: node.frame,
                    },
                ));
            }
        }
        for (index, (child, child_node)) in element.children().iter().zip(&node.children).enumerate()
        {
            path.push(index);
            self.collect_layout_events(child, child_node, path, events);
            path.pop();
        }
    }

    /// Detach the component. Safe to call more than once.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        log::debug!("unmounting component");
        self.root.unmounted();
        self.measured.clear();
    }
}

impl<C: Component> Drop for Host<C> {
    fn drop(&mut self) {
        self.unmount();
    }
}
