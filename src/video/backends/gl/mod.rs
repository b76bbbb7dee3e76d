pub mod visitor;

mod glutin {
    use ::glutin::{GlContext, GlWindow};

    use super::visitor::GLVisitor;
    use crate::errors::*;

    impl GLVisitor {
        /// Loads the GL function pointers from the current context of `window`.
        pub unsafe fn glutin(window: &GlWindow) -> Result<Self> {
            gl::load_with(|symbol| window.get_proc_address(symbol) as *const _);
            Self::new()
        }
    }
}
