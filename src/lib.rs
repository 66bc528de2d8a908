//! # Starting GL
//!
//! The "getting started" OpenGL lessons: open a window with a 3.3 core context, clear it,
//! and draw a triangle or a rectangle with a fixed shader pair.
//!
//! The crate is split in two halves. The lower half is a thin, typed projection of the handful
//! of GL calls the lessons make ([`buffer`], [`vertex_array`], [`program`], [`draw`],
//! [`state`]), reached through the zero-sized [`Gl`] entry point. The upper half is the lesson
//! plumbing: [`window`] creation, the embedded [`shader`] pair, static [`geometry`], [`input`]
//! handling, and the [`app`] loop that ties them together.
//!
//! ## Doc Aliases
//! Wrappers carry `#[doc(alias = ...)]` with the GL function they issue, so searching the docs
//! for e.g. `glPolygonMode` finds [`state::State::set_polygon_mode`].

#![warn(rustdoc::all)]

use gl::types::{GLenum, GLsizei, GLuint};
use std::num::NonZero;
type NonZeroName = NonZero<GLuint>;

pub mod gl {
    #![doc(hidden)]
    #![allow(clippy::all)]
    include!(concat!(env!("OUT_DIR"), "/gl_bindings.rs"));
}

pub use slot::marker;

pub mod app;
pub mod buffer;
pub mod config;
pub mod draw;
pub mod error;
pub mod geometry;
pub mod input;
pub mod logging;
pub mod new;
pub mod program;
pub mod shader;
pub mod slot;
pub mod state;
pub mod vertex_array;
pub mod window;

pub use app::{run, Lesson, RunReport};
pub use config::RunConfig;
pub use error::{InitError, RunError};

/// Process exit status for a failed start-up (window, context or function loader).
pub const FAILURE_EXIT_CODE: i32 = -1;

/// Entry point for GL calls.
#[allow(clippy::manual_non_exhaustive)]
pub struct Gl {
    /// `glBindBuffer`
    pub buffer: slot::buffer::Slots,
    /// `glBindVertexArray`
    pub vertex_array: slot::vertex_array::Slot,
    /// `glUseProgram`
    pub program: slot::program::Slot,
    /// `glGen*` and `glCreate*`
    pub new: new::New,
    /// `glDraw*`
    pub draw: draw::Draw,
    /// Clear values, viewport, polygon mode.
    pub state: state::State,
    _cant_destructure: (),
}
impl Gl {
    /// Create a wrapper for the currently bound context.
    /// This is a no-op function, and is free to recreate every frame.
    ///
    /// # Safety
    /// * There must be a current GL context on the calling thread.
    /// * The current GL context should be version 3.3 core or newer.
    /// * The `gl` module must have been fully initialized with [`gl::load_with`]
    /// * There must be no other `Gl` object alive for the same context.
    #[must_use]
    pub unsafe fn current() -> Self {
        use slot::{buffer, program, vertex_array};
        use std::marker::PhantomData;

        Self {
            buffer: buffer::Slots {
                array: buffer::Slot(PhantomData, PhantomData),
                element_array: buffer::Slot(PhantomData, PhantomData),
            },
            vertex_array: vertex_array::Slot(PhantomData),
            program: program::Slot(PhantomData),
            new: new::New(PhantomData),
            draw: draw::Draw(PhantomData),
            state: state::State(PhantomData),
            _cant_destructure: (),
        }
    }
}

mod sealed {
    pub trait Sealed {}
}

/// A GL object represented by nothing but its non-zero name.
///
/// # Safety
/// * `Self` must be `#[repr(transparent)]` over [`NonZero<GLuint>`] (plus zero-sized markers).
/// * [`Self::from_name`] must produce a value whose [`Self::name`] is the given name.
pub unsafe trait ThinGLObject: sealed::Sealed + Sized {
    /// Wrap a raw name.
    ///
    /// # Safety
    /// The name must refer to a live GL object of the kind and state `Self` describes.
    #[doc(hidden)]
    unsafe fn from_name(name: NonZeroName) -> Self;
    /// Fetch the "name" of the object, the unique ID used to interact with the GL.
    fn name(&self) -> NonZeroName;
    /// Export the `GLuint` name, losing the typestate.
    #[must_use = "dropping a gl handle leaks resources"]
    fn into_name(self) -> NonZeroName {
        let name = self.name();
        std::mem::forget(self);
        name
    }
}

/// Implements [`ThinGLObject`] for a `#[repr(transparent)]` tuple struct whose first field is the name.
macro_rules! thin_object {
    ($name:ident $(<$param:ident : $bound:path>)?) => {
        impl$(<$param: $bound>)? crate::sealed::Sealed for $name$(<$param>)? {}
        // # Safety
        // Repr(transparent) over a NonZero<u32> (and some ZSTs).
        unsafe impl$(<$param: $bound>)? crate::ThinGLObject for $name$(<$param>)? {
            unsafe fn from_name(name: crate::NonZeroName) -> Self {
                Self(name, $(::core::marker::PhantomData::<$param>)?)
            }
            fn name(&self) -> crate::NonZeroName {
                self.0
            }
        }
    };
}
pub(crate) use thin_object;

/// Trait for rusty `GLenum`s.
///
/// # Safety
/// * Must be implemented only on fieldless `#[repr(u32)]` enums.
/// * Every variant must be a correct constant of `GLenum`.
pub unsafe trait GLEnum: Sized {
    /// Access the raw `GLenum` value of this enum.
    fn as_gl(&self) -> GLenum {
        unsafe { *std::ptr::from_ref(self).cast() }
    }
}

/// # Safety
/// * The context associated with `gl_gen` must be current on the calling thread.
/// * `gl_gen` must be the appropriate GL generator for objects of type `T`.
unsafe fn gl_gen_with<const N: usize, T: ThinGLObject>(
    gl_gen: unsafe fn(GLsizei, *mut GLuint),
) -> [T; N] {
    const { assert!(N <= GLsizei::MAX as usize) };
    let mut names: [GLuint; N] = [0; N];
    gl_gen(N as _, names.as_mut_ptr());

    names.map(|name| {
        let name = NonZero::new(name).expect("gl returned a zeroed object name");
        T::from_name(name)
    })
}

/// # Safety
/// * The context associated with `gl_delete` must be current on the calling thread.
/// * `gl_delete` must be the appropriate GL deleter for objects of type `T`.
unsafe fn gl_delete_with<const N: usize, T: ThinGLObject>(
    gl_delete: unsafe fn(GLsizei, *const GLuint),
    objects: [T; N],
) {
    const { assert!(N <= GLsizei::MAX as usize) };
    let names = objects.map(|object| object.into_name().get());
    gl_delete(N as _, names.as_ptr());
}

type NotSync = std::marker::PhantomData<std::cell::Cell<()>>;
