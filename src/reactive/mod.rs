pub mod invalidation;
pub mod owner;
pub mod signal;

pub use invalidation::{
    change_flags, request_layout, request_paint, take_change_flags, ChangeFlags,
};
pub use owner::{
    current_owner, dispose_owner, is_alive, on_cleanup, run_in_owner, with_owner, OwnerId,
};
pub use signal::{create_signal, Signal};
