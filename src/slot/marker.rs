//! Markers for static information about the current binding.

use crate::sealed::Sealed;

/// Marker trait for the two known states of a binding: [`IsDefault`] and [`NotDefault`].
///
/// For every slot this crate exposes (buffers, vertex arrays, programs) name 0 means
/// "nothing bound", so almost every operation requires [`NotDefault`].
pub trait Defaultness: Sealed + 'static {}

/// Statically known that nothing (name 0) is bound.
#[derive(Debug)]
pub struct IsDefault;
impl Sealed for IsDefault {}
impl Defaultness for IsDefault {}
/// Statically known that a user-created object is bound.
#[derive(Debug)]
pub struct NotDefault;
impl Sealed for NotDefault {}
impl Defaultness for NotDefault {}
