use std::cell::Cell;

use bitflags::bitflags;

bitflags! {
    /// Flags indicating what aspects of rendering need to be updated
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct ChangeFlags: u8 {
        /// Tree needs layout recalculation (size/position may change)
        const NEEDS_LAYOUT = 0b01;
        /// Tree needs repainting (visual appearance changed)
        const NEEDS_PAINT  = 0b10;
    }
}

thread_local! {
    static PENDING: Cell<ChangeFlags> = const { Cell::new(ChangeFlags::empty()) };
}

/// Request a relayout (and repaint) on the next frame.
pub fn request_layout() {
    PENDING.with(|pending| {
        pending.set(pending.get() | ChangeFlags::NEEDS_LAYOUT | ChangeFlags::NEEDS_PAINT)
    });
}

/// Request a repaint without layout on the next frame.
pub fn request_paint() {
    PENDING.with(|pending| pending.set(pending.get() | ChangeFlags::NEEDS_PAINT));
}

/// Peek at the pending flags without clearing them.
pub fn change_flags() -> ChangeFlags {
    PENDING.with(|pending| pending.get())
}

/// Take and clear the pending flags.
pub fn take_change_flags() -> ChangeFlags {
    PENDING.with(|pending| pending.replace(ChangeFlags::empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_layout_implies_paint() {
        take_change_flags();
        request_layout();
        let flags = take_change_flags();
        assert!(flags.contains(ChangeFlags::NEEDS_LAYOUT));
        assert!(flags.contains(ChangeFlags::NEEDS_PAINT));
    }

    #[test]
    fn test_request_paint_only() {
        take_change_flags();
        request_paint();
        assert_eq!(change_flags(), ChangeFlags::NEEDS_PAINT);
    }

    #[test]
    fn test_take_clears() {
        request_layout();
        take_change_flags();
        assert!(change_flags().is_empty());
    }
}
