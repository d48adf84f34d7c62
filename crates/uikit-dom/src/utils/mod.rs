//! DOM helpers used by UI components

pub mod anchor;
pub mod id;
pub mod overscroll;
pub mod path;
pub mod scroll_lock;

pub use anchor::{is_same_site_anchor, target_element};
pub use id::{Component, ComponentMeta, generate_id};
pub use overscroll::{blocks_overscroll, prevent_overscroll};
pub use path::max_path_length;
pub use scroll_lock::{BackgroundScrollLock, prevent_background_scroll};
