//! Entry points called without glow
//!
//! `glow` allocates textures one at a time and panics when `glGetString`
//! returns null, but the checks need both a negative `glGenTextures` count
//! and the null result of an invalid string query to reach the caller.

use std::ffi::{CStr, c_char, c_void};

use crate::{ContextError, ContextResult};

type GenTexturesFn = unsafe extern "system" fn(n: i32, textures: *mut u32);
type GetStringFn = unsafe extern "system" fn(name: u32) -> *const u8;

/// Function pointers loaded from the current context
pub struct RawEntryPoints {
    gen_textures: GenTexturesFn,
    get_string: GetStringFn,
}

impl RawEntryPoints {
    /// Resolve the entry points through `loader`.
    ///
    /// # Safety
    ///
    /// `loader` must return pointers to the named OpenGL functions (or null)
    /// for the context that is current on this thread.
    pub unsafe fn load(mut loader: impl FnMut(&str) -> *const c_void) -> ContextResult<Self> {
        let gen_textures = loader("glGenTextures");
        if gen_textures.is_null() {
            return Err(ContextError::load_function("glGenTextures"));
        }
        let get_string = loader("glGetString");
        if get_string.is_null() {
            return Err(ContextError::load_function("glGetString"));
        }

        unsafe {
            Ok(Self {
                gen_textures: std::mem::transmute::<*const c_void, GenTexturesFn>(gen_textures),
                get_string: std::mem::transmute::<*const c_void, GetStringFn>(get_string),
            })
        }
    }

    /// `glGenTextures` with the count passed through unchanged
    ///
    /// # Safety
    ///
    /// The context the pointers were loaded from must be current.
    pub unsafe fn gen_textures(&self, count: i32) -> Vec<u32> {
        let mut names = vec![0u32; usize::try_from(count).unwrap_or(0)];
        // The driver must not write for n <= 0, but never hand it a dangling pointer
        let mut scratch = 0u32;
        let out = if names.is_empty() {
            &mut scratch as *mut u32
        } else {
            names.as_mut_ptr()
        };
        unsafe { (self.gen_textures)(count, out) };
        names
    }

    /// `glGetString`; `None` for a null result
    ///
    /// # Safety
    ///
    /// The context the pointers were loaded from must be current.
    pub unsafe fn get_string(&self, name: u32) -> Option<String> {
        let ptr = unsafe { (self.get_string)(name) };
        if ptr.is_null() {
            return None;
        }
        let value = unsafe { CStr::from_ptr(ptr as *const c_char) };
        Some(value.to_string_lossy().into_owned())
    }
}
