//! # stratus
//!
//! Safe, minimal Rust bindings to the netCDF scientific data library.
//!
//! This library wraps the native netCDF C library (through `netcdf-sys`) in
//! owned Rust handles, with a focus on the attribute surface: looking up,
//! declaring, reading, writing, renaming and deleting named attributes on a
//! dataset or on one of its variables.
//!
//! ## Key Features
//!
//! - **Typed value marshaling**: every netCDF atomic type maps to an exact
//!   Rust representation — scalars for single-element attributes, `Vec`s for
//!   multi-element ones, `String` for text
//! - **Plain error propagation**: every library failure surfaces as a
//!   [`NcError`] carrying the C library's own message
//! - **No hidden machinery**: each operation is one synchronous call into
//!   the underlying storage engine
//!
//! ## Example
//!
//! ```no_run
//! use stratus::AttrValue;
//!
//! fn main() -> stratus::Result<()> {
//!     let mut file = stratus::create("example.nc")?;
//!     file.put_attribute("title", AttrValue::from("reanalysis subset"))?;
//!     let attr = file.attribute("title")?;
//!     println!("{} = {:?}", attr.name(), attr.value()?);
//!     Ok(())
//! }
//! ```

pub mod attribute;
pub mod error;
mod ffi;
pub mod file;
pub mod logging;
pub mod types;
pub mod value;
pub mod variable;

pub use attribute::Attribute;
pub use error::{NcError, Result};
pub use file::{Dimension, File};
pub use logging::init_tracing;
pub use types::NcType;
pub use value::AttrValue;
pub use variable::Variable;

use std::path::Path;

/// Open an existing dataset read-only.
pub fn open<P: AsRef<Path>>(path: P) -> Result<File> {
    File::open(path)
}

/// Open an existing dataset for reading and writing.
pub fn append<P: AsRef<Path>>(path: P) -> Result<File> {
    File::append(path)
}

/// Create a new dataset, replacing any file already at the path.
pub fn create<P: AsRef<Path>>(path: P) -> Result<File> {
    File::create(path)
}
