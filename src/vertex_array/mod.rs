//! Vertex array objects and the layout of the attributes they fetch.

use super::{gl, NonZero, NonZeroName};

/// Number of components fetched per vertex. Should match the dimensionality of the
/// vertex shader input, e.g. [`Components::Vec3`] for `in vec3 aPos`.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Components {
    Scalar = 1,
    Vec2 = 2,
    Vec3 = 3,
    Vec4 = 4,
}
impl From<Components> for i32 {
    fn from(value: Components) -> Self {
        value as _
    }
}

/// One float per component.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloatingAttribute {
    F16 = gl::HALF_FLOAT,
    F32 = gl::FLOAT,
    F64 = gl::DOUBLE,
}
impl FloatingAttribute {
    /// Size in bytes of one component.
    #[must_use]
    pub fn size_of(&self) -> usize {
        match self {
            Self::F16 => std::mem::size_of::<u16>(),
            Self::F32 => std::mem::size_of::<f32>(),
            Self::F64 => std::mem::size_of::<f64>(),
        }
    }
    /// Align requirement for fetching this attribute.
    #[must_use]
    pub fn align_of(&self) -> usize {
        match self {
            Self::F16 => std::mem::align_of::<u16>(),
            Self::F32 => std::mem::align_of::<f32>(),
            Self::F64 => std::mem::align_of::<f64>(),
        }
    }
}

// Safety: is repr(u32) enum.
unsafe impl crate::GLEnum for FloatingAttribute {}

/// One integer per component.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegerAttribute {
    U8 = gl::UNSIGNED_BYTE,
    I8 = gl::BYTE,
    U16 = gl::UNSIGNED_SHORT,
    I16 = gl::SHORT,
    U32 = gl::UNSIGNED_INT,
    I32 = gl::INT,
}
impl IntegerAttribute {
    /// Size in bytes of one component.
    #[must_use]
    pub fn size_of(&self) -> usize {
        match self {
            Self::U8 | Self::I8 => 1,
            Self::U16 | Self::I16 => 2,
            Self::U32 | Self::I32 => 4,
        }
    }
    /// Align requirement for fetching this attribute. Integers align to their size.
    #[must_use]
    pub fn align_of(&self) -> usize {
        self.size_of()
    }
}

// Safety: is repr(u32) enum.
unsafe impl crate::GLEnum for IntegerAttribute {}

/// Specifies the type and interpretation of component data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeType {
    /// Fetch as integers, access in shader as integers.
    Integer(IntegerAttribute),
    /// Fetch as integers, access in shader as normalized floats.
    /// `[0, 1]` for unsigned integer formats and `[-1, 1]` for signed integer formats.
    Normalized(IntegerAttribute),
    /// Fetch as floats, access in shader as floats.
    Float(FloatingAttribute),
}
impl AttributeType {
    /// Size in bytes of one component.
    #[must_use]
    pub fn size_of(&self) -> usize {
        match self {
            Self::Float(ty) => ty.size_of(),
            Self::Integer(ty) | Self::Normalized(ty) => ty.size_of(),
        }
    }
    /// Align requirement for fetching this attribute.
    #[must_use]
    pub fn align_of(&self) -> usize {
        match self {
            Self::Float(ty) => ty.align_of(),
            Self::Integer(ty) | Self::Normalized(ty) => ty.align_of(),
        }
    }
}
impl From<FloatingAttribute> for AttributeType {
    fn from(value: FloatingAttribute) -> Self {
        Self::Float(value)
    }
}

/// Arguments to `glVertexAttrib[I]Pointer`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attribute {
    /// The type of data to fetch from the array, as well as it's interpretation
    /// within the shader interface.
    pub ty: AttributeType,
    /// The number of components of the scalar/vector.
    pub components: Components,
    /// The spacing in bytes between consecutive attribute values.
    /// `None` means tightly packed, the GL derives it from [`Self::ty`] and [`Self::components`].
    pub stride: Option<NonZero<usize>>,
    /// Offset, in bytes, from the beginning of the buffer where the first component is located.
    ///
    /// This must be aligned with [`AttributeType::align_of`].
    pub offset: usize,
}
impl Attribute {
    /// A tightly packed `vec3` of `f32`s starting at byte 0, the layout every lesson uses.
    #[must_use]
    pub const fn packed_vec3_f32() -> Self {
        Self {
            ty: AttributeType::Float(FloatingAttribute::F32),
            components: Components::Vec3,
            stride: None,
            offset: 0,
        }
    }
    /// The distance in bytes between consecutive values, resolving `None` to the packed size.
    #[must_use]
    pub fn effective_stride(&self) -> usize {
        self.stride
            .map_or(self.ty.size_of() * i32::from(self.components) as usize, NonZero::get)
    }
}

/// VAO.
/// A vertex array remembers the element buffer bound while it is bound, and the source buffer,
/// offsets, sizes, and types of the attributes fetched by the vertex shader.
#[repr(transparent)]
#[must_use = "dropping a gl handle leaks resources"]
#[derive(Debug)]
pub struct VertexArray(pub(crate) NonZeroName);

crate::thin_object!(VertexArray);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packed_vec3_has_twelve_byte_stride() {
        let attribute = Attribute::packed_vec3_f32();
        assert_eq!(attribute.stride, None);
        assert_eq!(attribute.effective_stride(), 12);
        assert_eq!(attribute.offset % attribute.ty.align_of(), 0);
    }

    #[test]
    fn explicit_stride_wins() {
        let attribute = Attribute {
            stride: NonZero::new(24),
            ..Attribute::packed_vec3_f32()
        };
        assert_eq!(attribute.effective_stride(), 24);
    }

    #[test]
    fn components_convert_to_gl_size() {
        assert_eq!(i32::from(Components::Scalar), 1);
        assert_eq!(i32::from(Components::Vec4), 4);
    }
}
