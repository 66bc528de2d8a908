//! Binding points of the context, and the operations available on whatever is bound to them.
//!
//! Binding an object returns an `Active` marker borrowing the slot. Operations that act on
//! "the currently bound object" hang off that marker, so they can only be reached while the
//! binding is known.

pub mod buffer;
pub mod marker;
pub mod program;
pub mod vertex_array;
