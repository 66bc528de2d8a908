//! Binding and manipulating vertex array objects and their attribute definitions.
use crate::{
    gl,
    slot::marker::{IsDefault, NotDefault},
    vertex_array::{self, VertexArray},
    GLEnum, NotSync, ThinGLObject,
};

impl Active<'_, NotDefault> {
    /// Set the properties of a vertex attribute slot. The source buffer is remembered
    /// internally, and does not need to be active at time of draw.
    ///
    /// `enable` is provided as a convenience - if set to `Some`, will enable or disable
    /// the attribute after setting properties. If `None`, the previous state is kept.
    /// By default, attributes are disabled.
    ///
    /// # Panics
    /// If the [`offset`](vertex_array::Attribute::offset) or stride does not fit the align
    /// requirements of the attribute type.
    #[doc(alias = "glVertexAttribPointer")]
    #[doc(alias = "glVertexAttribIPointer")]
    pub fn attribute(
        &mut self,
        _source: &super::buffer::Active<super::buffer::Array, NotDefault>,
        index: u32,
        attribute: vertex_array::Attribute,
        enable: Option<bool>,
    ) -> &mut Self {
        use vertex_array::AttributeType;
        let size = attribute.components.into();
        let stride = attribute
            .stride
            .map_or(0, |stride| stride.get().try_into().expect("stride overflows GLsizei"));
        let align = attribute.ty.align_of();

        assert_eq!(attribute.offset % align, 0, "attribute offset must be aligned");
        assert_eq!(
            attribute.effective_stride() % align,
            0,
            "attribute stride must be aligned"
        );

        // With an array buffer bound (proven by `_source`) this is a byte offset into it,
        // never a client pointer.
        let offset_pointer: *const std::ffi::c_void = attribute.offset as _;

        match attribute.ty {
            AttributeType::Integer(ty) => unsafe {
                gl::VertexAttribIPointer(index, size, ty.as_gl(), stride, offset_pointer);
            },
            AttributeType::Float(ty) => unsafe {
                gl::VertexAttribPointer(index, size, ty.as_gl(), gl::FALSE, stride, offset_pointer);
            },
            AttributeType::Normalized(ty) => unsafe {
                gl::VertexAttribPointer(index, size, ty.as_gl(), gl::TRUE, stride, offset_pointer);
            },
        }

        if let Some(enable) = enable {
            self.set_attribute_enabled(index, enable)
        } else {
            self
        }
    }
    /// Enable or disable the attribute at `index`. By default, all attributes are disabled.
    #[doc(alias = "glEnableVertexAttribArray")]
    #[doc(alias = "glDisableVertexAttribArray")]
    pub fn set_attribute_enabled(&mut self, index: u32, enabled: bool) -> &mut Self {
        unsafe {
            if enabled {
                gl::EnableVertexAttribArray(index);
            } else {
                gl::DisableVertexAttribArray(index);
            }
        }
        self
    }
}

/// Entry points for `gl*VertexAttrib*`.
#[derive(Debug)]
pub struct Active<'slot, Kind>(
    std::marker::PhantomData<&'slot mut ()>,
    std::marker::PhantomData<Kind>,
);
pub struct Slot(pub(crate) NotSync);
impl Slot {
    /// Bind a user-defined array to this slot.
    #[doc(alias = "glBindVertexArray")]
    pub fn bind(&mut self, array: &VertexArray) -> Active<NotDefault> {
        unsafe {
            gl::BindVertexArray(array.name().get());
        }
        Active(std::marker::PhantomData, std::marker::PhantomData)
    }
    /// Make the slot empty.
    #[doc(alias = "glBindVertexArray")]
    pub fn unbind(&mut self) -> Active<IsDefault> {
        unsafe {
            gl::BindVertexArray(0);
        }
        Active(std::marker::PhantomData, std::marker::PhantomData)
    }
    /// Delete vertex arrays. If any were bound to this slot, the slot becomes unbound.
    #[doc(alias = "glDeleteVertexArrays")]
    pub fn delete<const N: usize>(&mut self, arrays: [VertexArray; N]) {
        unsafe { crate::gl_delete_with(gl::DeleteVertexArrays, arrays) }
    }
}
