use crate::{
    buffer::{usage, Buffer},
    gl,
    slot::marker::{IsDefault, NotDefault},
    GLenum, NotSync, ThinGLObject,
};

/// Marker trait for the buffer targets.
pub trait Target: crate::sealed::Sealed {
    const TARGET: GLenum;
}

macro_rules! target {
    (pub struct $marker:ident = $value:ident) => {
        #[doc = "Marker for `"]
        #[doc = stringify!($value)]
        #[doc = "`"]
        #[derive(Debug)]
        pub struct $marker;
        impl crate::sealed::Sealed for $marker {}
        impl Target for $marker {
            const TARGET: GLenum = gl::$value;
        }
    };
}

target!(pub struct Array = ARRAY_BUFFER);
target!(pub struct ElementArray = ELEMENT_ARRAY_BUFFER);

/// Proof that `Slot` has a binding of `Kind` for the lifetime `'slot`.
#[derive(Debug)]
pub struct Active<'slot, Slot, Kind>(
    std::marker::PhantomData<&'slot mut ()>,
    std::marker::PhantomData<(Kind, Slot)>,
);
impl<T: Target> Active<'_, T, NotDefault> {
    /// (Re)allocate the datastore of the buffer and fill with bytes from `data`.
    #[doc(alias = "glBufferData")]
    pub fn data(&self, data: &[u8], frequency: usage::Frequency, access: usage::Access) -> &Self {
        let len = isize::try_from(data.len()).expect("buffer data larger than isize::MAX");
        unsafe {
            gl::BufferData(
                T::TARGET,
                len,
                data.as_ptr().cast(),
                usage::as_gl(frequency, access),
            );
        }
        self
    }
}

pub struct Slot<T: Target>(pub(crate) NotSync, pub(crate) std::marker::PhantomData<T>);
impl<T: Target> Slot<T> {
    /// Bind a buffer to this slot.
    #[doc(alias = "glBindBuffer")]
    pub fn bind(&mut self, buffer: &Buffer) -> Active<T, NotDefault> {
        unsafe {
            gl::BindBuffer(T::TARGET, buffer.name().get());
        }
        Active(std::marker::PhantomData, std::marker::PhantomData)
    }
    /// Make the slot empty.
    ///
    /// Unbinding [`ElementArray`] while a vertex array is bound detaches the element buffer
    /// from that vertex array.
    #[doc(alias = "glBindBuffer")]
    pub fn unbind(&mut self) -> Active<T, IsDefault> {
        unsafe {
            gl::BindBuffer(T::TARGET, 0);
        }
        Active(std::marker::PhantomData, std::marker::PhantomData)
    }
}

pub struct Slots {
    pub array: Slot<Array>,
    pub element_array: Slot<ElementArray>,
}
impl Slots {
    /// Delete buffers. If any were bound to a slot, the slot becomes unbound.
    #[doc(alias = "glDeleteBuffers")]
    pub fn delete<const N: usize>(&mut self, buffers: [Buffer; N]) {
        unsafe { crate::gl_delete_with(gl::DeleteBuffers, buffers) }
    }
}
