//! Call discipline for the netCDF C library.
//!
//! libnetcdf is not thread-safe: every entry into the library must hold a
//! process-wide lock. The lock is scoped to the single call; no operation
//! holds it across a return to the caller.

use once_cell::sync::Lazy;
use parking_lot::Mutex;

use crate::error::{NcError, Result};

static LIBNC_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

/// Run one call into libnetcdf while holding the process-wide lock.
pub(crate) fn with_lock<T>(f: impl FnOnce() -> T) -> T {
    let _guard = LIBNC_LOCK.lock();
    f()
}

/// Map a netCDF status code to `Ok(())` or an error with the library's
/// message. Zero means success.
pub(crate) fn checked(code: std::os::raw::c_int) -> Result<()> {
    if code == netcdf_sys::NC_NOERR {
        Ok(())
    } else {
        Err(NcError::from_code(code))
    }
}
