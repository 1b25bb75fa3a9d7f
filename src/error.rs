//! Error types for stratus operations.
//!
//! Every fallible operation in this crate is a single call into the netCDF
//! C library; failures fall into two kinds. Either the attribute's external
//! type code is one this crate cannot marshal (surfaced before any library
//! call is made), or the library call itself returned a nonzero status
//! (surfaced with the library's own message). Nothing is retried.

use thiserror::Error;

/// The main error type for stratus operations.
#[derive(Error, Debug)]
pub enum NcError {
    /// The netCDF library returned a nonzero status code
    #[error("netCDF error {code}: {message}")]
    Netcdf { code: i32, message: String },

    /// The attribute or variable uses a type this crate cannot marshal
    #[error("unsupported netCDF type code: {code}")]
    UnsupportedType { code: i32 },

    /// A name contained an interior NUL byte and cannot cross the C boundary
    #[error("invalid name: {0}")]
    InvalidName(#[from] std::ffi::NulError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl NcError {
    /// Translate a nonzero netCDF status code into an error carrying the
    /// library's human-readable message.
    pub(crate) fn from_code(code: i32) -> Self {
        let message = unsafe {
            let ptr = netcdf_sys::nc_strerror(code);
            std::ffi::CStr::from_ptr(ptr).to_string_lossy().into_owned()
        };
        NcError::Netcdf { code, message }
    }
}

/// Convenience type alias for Results with NcError
pub type Result<T> = std::result::Result<T, NcError>;
