//! Domain layer: the outline forest and its pure transformations
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).
//! Every function takes a borrowed forest and returns a new value.

pub mod entities;
pub mod error;
pub mod locator;
pub mod mutator;
pub mod traversal;

pub use entities::*;
pub use error::{DomainError, DomainResult};
pub use locator::{find, find_parent, get_breadcrumb, Crumb};
pub use mutator::{
    add_after_item, add_as_last_child, add_item, delete_item, indent_item, outdent_item,
    swap_with_previous, toggle_expanded, update_at, update_children, update_symbol, update_text,
    Edit, Refusal,
};
pub use traversal::{
    find_next, find_next_in, find_prev, find_prev_for_delete, find_prev_in, flat_order,
    visible_order, VisibleOrder,
};
