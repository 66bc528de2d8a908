//! Shader and program objects, typed by what has successfully happened to them.
//!
//! A shader starts out as an [`EmptyShader`] and only becomes a [`CompiledShader`] once the GL
//! reports `GL_COMPILE_STATUS == GL_TRUE`. Likewise a [`Program`] becomes a [`LinkedProgram`]
//! only after `GL_LINK_STATUS == GL_TRUE`. See [`crate::slot::program::Slot`] for the
//! operations that move between states.

use core::marker::PhantomData;

use super::{gl, GLenum, NonZeroName};

/// Marker trait for the shader stages.
pub trait Type: crate::sealed::Sealed {
    const TYPE: GLenum;
    /// Upper-case stage name, as it appears in diagnostics.
    const NAME: &'static str;
}

macro_rules! stage {
    (pub struct $marker:ident = $value:ident, $label:literal) => {
        #[doc = "Marker for `"]
        #[doc = stringify!($value)]
        #[doc = "`"]
        #[derive(Debug)]
        pub struct $marker;
        impl crate::sealed::Sealed for $marker {}
        impl Type for $marker {
            const TYPE: GLenum = gl::$value;
            const NAME: &'static str = $label;
        }
    };
}

stage!(pub struct Vertex = VERTEX_SHADER, "VERTEX");
stage!(pub struct Fragment = FRAGMENT_SHADER, "FRAGMENT");

/// The set of compiled stages to link together.
pub enum ProgramShaders<'a> {
    Graphics {
        vertex: &'a CompiledShader<Vertex>,
        fragment: &'a CompiledShader<Fragment>,
    },
}

/// A shader which has no (successfully compiled) source code.
#[repr(transparent)]
#[must_use = "dropping a gl handle leaks resources"]
#[derive(Debug)]
pub struct EmptyShader<Ty: Type>(pub(crate) NonZeroName, PhantomData<Ty>);
impl<Ty: Type> EmptyShader<Ty> {
    /// Convert the typestate without checking for correctness.
    ///
    /// # Safety
    /// If `glGetShaderiv(self, GL_COMPILE_STATUS)` would return `true`, this is safe.
    pub unsafe fn into_compiled_unchecked(self) -> CompiledShader<Ty> {
        use crate::ThinGLObject;
        CompiledShader(self.into_name(), PhantomData)
    }
}

crate::thin_object!(EmptyShader<Ty: Type>);

/// A shader which has been successfully compiled.
#[repr(transparent)]
#[must_use = "dropping a gl handle leaks resources"]
#[derive(Debug)]
pub struct CompiledShader<Ty: Type>(pub(crate) NonZeroName, PhantomData<Ty>);

crate::thin_object!(CompiledShader<Ty: Type>);

/// Forget the compiled status of the shader, e.g. to delete it.
impl<Ty: Type> From<CompiledShader<Ty>> for EmptyShader<Ty> {
    fn from(value: CompiledShader<Ty>) -> Self {
        use crate::ThinGLObject;
        EmptyShader(value.into_name(), PhantomData)
    }
}

/// A program which has not been linked.
#[repr(transparent)]
#[must_use = "dropping a gl handle leaks resources"]
#[derive(Debug)]
pub struct Program(pub(crate) NonZeroName);
impl Program {
    /// Convert the typestate without checking for correctness.
    ///
    /// # Safety
    /// If `glGetProgramiv(self, GL_LINK_STATUS)` would return `true`, this is safe.
    pub unsafe fn into_linked_unchecked(self) -> LinkedProgram {
        use crate::ThinGLObject;
        LinkedProgram(self.into_name())
    }
}

crate::thin_object!(Program);

/// A program which has been successfully linked.
#[repr(transparent)]
#[must_use = "dropping a gl handle leaks resources"]
#[derive(Debug)]
pub struct LinkedProgram(pub(crate) NonZeroName);

crate::thin_object!(LinkedProgram);

/// Forget the linked status of the program.
impl From<LinkedProgram> for Program {
    fn from(value: LinkedProgram) -> Self {
        use crate::ThinGLObject;
        Program(value.into_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_names_match_diagnostics() {
        assert_eq!(Vertex::NAME, "VERTEX");
        assert_eq!(Fragment::NAME, "FRAGMENT");
        assert_eq!(Vertex::TYPE, gl::VERTEX_SHADER);
        assert_eq!(Fragment::TYPE, gl::FRAGMENT_SHADER);
    }

    #[test]
    fn typestate_conversions_keep_the_name() {
        use crate::ThinGLObject;
        let name = NonZeroName::new(7).unwrap();
        let shader = unsafe { EmptyShader::<Vertex>::from_name(name) };
        let compiled = unsafe { shader.into_compiled_unchecked() };
        assert_eq!(compiled.name(), name);
        let empty: EmptyShader<Vertex> = compiled.into();
        assert_eq!(empty.into_name(), name);

        let linked = unsafe { Program::from_name(name).into_linked_unchecked() };
        let program: Program = linked.into();
        assert_eq!(program.into_name(), name);
    }
}
