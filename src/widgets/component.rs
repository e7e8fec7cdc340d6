use crate::host::Dimensions;

use super::element::Element;

/// What a component can reach from its host once mounted.
pub struct MountContext {
    window: Dimensions,
}

impl MountContext {
    pub fn new(window: Dimensions) -> Self {
        Self { window }
    }

    pub fn window(&self) -> &Dimensions {
        &self.window
    }
}

/// A stateful view driven by a host.
///
/// The host calls `render` every frame and the lifecycle hooks at the
/// matching points: `mounted` once after the first frame is attached,
/// `props_changed` when the parent supplies new props, and `unmounted`
/// before the component is dropped from the tree.
pub trait Component {
    type Props;

    fn render(&self) -> Element;

    fn mounted(&mut self, _ctx: &MountContext) {}

    fn props_changed(&mut self, _props: Self::Props) {}

    fn unmounted(&mut self) {}
}
