//! The attribute wrapper: a named metadata value attached to a variable or
//! to a dataset as a whole.
//!
//! An [`Attribute`] is a handle made of ids and a cached name/type; it holds
//! no open resource of its own and may outlive the attribute in the file.
//! Liveness is never checked ahead of time — each operation issues exactly
//! one call into the netCDF library and relays its result, so a handle whose
//! underlying attribute was deleted simply reports the library's error on
//! the next access.

use std::ffi::{CStr, CString};
use std::fmt;
use std::os::raw::c_int;

use netcdf_sys::{
    nc_del_att, nc_get_att_double, nc_get_att_float, nc_get_att_int, nc_get_att_longlong,
    nc_get_att_schar, nc_get_att_short, nc_get_att_text, nc_get_att_ubyte, nc_get_att_uint,
    nc_get_att_ulonglong, nc_get_att_ushort, nc_inq_attlen, nc_inq_attname, nc_inq_atttype,
    nc_inq_natts, nc_inq_varnatts, nc_put_att_double, nc_put_att_float, nc_put_att_int,
    nc_put_att_longlong, nc_put_att_schar, nc_put_att_short, nc_put_att_text, nc_put_att_ubyte,
    nc_put_att_uint, nc_put_att_ulonglong, nc_put_att_ushort, nc_rename_att, nc_type, NC_GLOBAL,
    NC_MAX_NAME,
};
use tracing::warn;

use crate::error::{NcError, Result};
use crate::ffi;
use crate::types::NcType;
use crate::value::AttrValue;

/// A handle to one named attribute of a variable or of the root group.
#[derive(Debug, Clone)]
pub struct Attribute {
    name: String,
    ncid: c_int,
    varid: c_int,
    nctype: NcType,
}

impl Attribute {
    /// Look up an existing attribute, querying its type from the library.
    /// Fails if the attribute does not exist or uses a type this crate
    /// cannot marshal.
    pub(crate) fn from_existing(ncid: c_int, varid: c_int, name: &str) -> Result<Self> {
        let nc_name = CString::new(name)?;
        let mut code: nc_type = 0;
        ffi::with_lock(|| {
            ffi::checked(unsafe { nc_inq_atttype(ncid, varid, nc_name.as_ptr(), &mut code) })
        })?;
        Ok(Self {
            name: name.to_string(),
            ncid,
            varid,
            nctype: NcType::from_code(code)?,
        })
    }

    /// Build a handle for an attribute whose type is already known, without
    /// touching the library.
    pub(crate) fn with_type(ncid: c_int, varid: c_int, name: &str, nctype: NcType) -> Self {
        Self {
            name: name.to_string(),
            ncid,
            varid,
            nctype,
        }
    }

    /// The cached attribute name. No library call.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The cached atomic type of the stored value.
    pub fn nc_type(&self) -> NcType {
        self.nctype
    }

    /// Rename the attribute. The cached name is updated only after the
    /// library reports success; on failure the handle is unchanged.
    pub fn set_name(&mut self, new_name: &str) -> Result<()> {
        let old = CString::new(self.name.as_str())?;
        let new = CString::new(new_name)?;
        ffi::with_lock(|| {
            ffi::checked(unsafe { nc_rename_att(self.ncid, self.varid, old.as_ptr(), new.as_ptr()) })
        })?;
        self.name = new_name.to_string();
        Ok(())
    }

    /// Number of stored elements, as reported by the library right now.
    pub fn len(&self) -> Result<usize> {
        let nc_name = CString::new(self.name.as_str())?;
        let mut len: usize = 0;
        ffi::with_lock(|| {
            ffi::checked(unsafe { nc_inq_attlen(self.ncid, self.varid, nc_name.as_ptr(), &mut len) })
        })?;
        Ok(len)
    }

    /// Read the attribute's value.
    ///
    /// The stored length is queried first, then the value is decoded along
    /// the fixed-width path for the cached type: length 1 yields the scalar
    /// variant, any other length the typed array variant. Char and string
    /// attributes always yield a single [`AttrValue::Text`], read through a
    /// null-terminated buffer one byte longer than the stored length.
    pub fn value(&self) -> Result<AttrValue> {
        let nc_name = CString::new(self.name.as_str())?;

        // The length query and the read must share one lock acquisition:
        // a writer in between could grow the attribute and the read would
        // overrun a buffer sized from the stale length.
        macro_rules! read_numeric {
            ($getter:ident, $ty:ty, $scalar:ident, $array:ident) => {{
                let buf = ffi::with_lock(|| -> Result<Vec<$ty>> {
                    let mut len: usize = 0;
                    ffi::checked(unsafe {
                        nc_inq_attlen(self.ncid, self.varid, nc_name.as_ptr(), &mut len)
                    })?;
                    let mut buf = vec![<$ty>::default(); len];
                    ffi::checked(unsafe {
                        $getter(self.ncid, self.varid, nc_name.as_ptr(), buf.as_mut_ptr().cast())
                    })?;
                    Ok(buf)
                })?;
                if buf.len() == 1 {
                    AttrValue::$scalar(buf[0])
                } else {
                    AttrValue::$array(buf)
                }
            }};
        }

        let value = match self.nctype {
            NcType::Byte => read_numeric!(nc_get_att_schar, i8, Byte, Bytes),
            NcType::Ubyte => read_numeric!(nc_get_att_ubyte, u8, Ubyte, Ubytes),
            NcType::Short => read_numeric!(nc_get_att_short, i16, Short, Shorts),
            NcType::Ushort => read_numeric!(nc_get_att_ushort, u16, Ushort, Ushorts),
            NcType::Int => read_numeric!(nc_get_att_int, i32, Int, Ints),
            NcType::Uint => read_numeric!(nc_get_att_uint, u32, Uint, Uints),
            NcType::Int64 => read_numeric!(nc_get_att_longlong, i64, Int64, Int64s),
            NcType::Uint64 => read_numeric!(nc_get_att_ulonglong, u64, Uint64, Uint64s),
            NcType::Float => read_numeric!(nc_get_att_float, f32, Float, Floats),
            NcType::Double => read_numeric!(nc_get_att_double, f64, Double, Doubles),
            NcType::Char | NcType::String => {
                let mut buf = ffi::with_lock(|| -> Result<Vec<u8>> {
                    let mut len: usize = 0;
                    ffi::checked(unsafe {
                        nc_inq_attlen(self.ncid, self.varid, nc_name.as_ptr(), &mut len)
                    })?;
                    let mut buf = vec![0u8; len + 1];
                    ffi::checked(unsafe {
                        nc_get_att_text(self.ncid, self.varid, nc_name.as_ptr(), buf.as_mut_ptr().cast())
                    })?;
                    Ok(buf)
                })?;
                let len = buf.len() - 1;
                let end = buf.iter().position(|&b| b == 0).unwrap_or(len);
                buf.truncate(end);
                AttrValue::Text(String::from_utf8_lossy(&buf).into_owned())
            }
        };
        Ok(value)
    }

    /// Overwrite the attribute's value, redeclaring its type if the new
    /// value differs. The cached type follows the write on success.
    pub fn set_value(&mut self, value: AttrValue) -> Result<()> {
        Self::put(self.ncid, self.varid, &self.name, &value)?;
        self.nctype = value.nc_type();
        Ok(())
    }

    /// Delete the attribute from the file, consuming the handle. Other
    /// handles to the same attribute report the library's error on their
    /// next access.
    pub fn delete(self) -> Result<()> {
        let nc_name = CString::new(self.name.as_str())?;
        ffi::with_lock(|| {
            ffi::checked(unsafe { nc_del_att(self.ncid, self.varid, nc_name.as_ptr()) })
        })
    }

    /// Write an attribute value, declaring or redeclaring its type. One put
    /// call per invocation; scalars write with length 1, arrays with their
    /// element count, text with its byte length.
    pub(crate) fn put(ncid: c_int, varid: c_int, name: &str, value: &AttrValue) -> Result<()> {
        let nc_name = CString::new(name)?;
        let code = value.nc_type().code();

        macro_rules! put_numeric {
            ($putter:ident, $slice:expr) => {{
                let slice = $slice;
                ffi::with_lock(|| {
                    ffi::checked(unsafe {
                        $putter(
                            ncid,
                            varid,
                            nc_name.as_ptr(),
                            code,
                            slice.len(),
                            slice.as_ptr().cast(),
                        )
                    })
                })
            }};
        }

        match value {
            AttrValue::Byte(v) => put_numeric!(nc_put_att_schar, std::slice::from_ref(v)),
            AttrValue::Bytes(v) => put_numeric!(nc_put_att_schar, v.as_slice()),
            AttrValue::Ubyte(v) => put_numeric!(nc_put_att_ubyte, std::slice::from_ref(v)),
            AttrValue::Ubytes(v) => put_numeric!(nc_put_att_ubyte, v.as_slice()),
            AttrValue::Short(v) => put_numeric!(nc_put_att_short, std::slice::from_ref(v)),
            AttrValue::Shorts(v) => put_numeric!(nc_put_att_short, v.as_slice()),
            AttrValue::Ushort(v) => put_numeric!(nc_put_att_ushort, std::slice::from_ref(v)),
            AttrValue::Ushorts(v) => put_numeric!(nc_put_att_ushort, v.as_slice()),
            AttrValue::Int(v) => put_numeric!(nc_put_att_int, std::slice::from_ref(v)),
            AttrValue::Ints(v) => put_numeric!(nc_put_att_int, v.as_slice()),
            AttrValue::Uint(v) => put_numeric!(nc_put_att_uint, std::slice::from_ref(v)),
            AttrValue::Uints(v) => put_numeric!(nc_put_att_uint, v.as_slice()),
            AttrValue::Int64(v) => put_numeric!(nc_put_att_longlong, std::slice::from_ref(v)),
            AttrValue::Int64s(v) => put_numeric!(nc_put_att_longlong, v.as_slice()),
            AttrValue::Uint64(v) => put_numeric!(nc_put_att_ulonglong, std::slice::from_ref(v)),
            AttrValue::Uint64s(v) => put_numeric!(nc_put_att_ulonglong, v.as_slice()),
            AttrValue::Float(v) => put_numeric!(nc_put_att_float, std::slice::from_ref(v)),
            AttrValue::Floats(v) => put_numeric!(nc_put_att_float, v.as_slice()),
            AttrValue::Double(v) => put_numeric!(nc_put_att_double, std::slice::from_ref(v)),
            AttrValue::Doubles(v) => put_numeric!(nc_put_att_double, v.as_slice()),
            AttrValue::Text(s) => ffi::with_lock(|| {
                ffi::checked(unsafe {
                    nc_put_att_text(ncid, varid, nc_name.as_ptr(), s.len(), s.as_ptr().cast())
                })
            }),
        }
    }

    /// Enumerate all attributes of a variable, or of the root group when
    /// `varid` is `NC_GLOBAL`. Attributes with types this crate cannot
    /// marshal are skipped with a warning.
    pub(crate) fn list(ncid: c_int, varid: c_int) -> Result<Vec<Attribute>> {
        let mut natts: c_int = 0;
        ffi::with_lock(|| {
            ffi::checked(unsafe {
                if varid == NC_GLOBAL {
                    nc_inq_natts(ncid, &mut natts)
                } else {
                    nc_inq_varnatts(ncid, varid, &mut natts)
                }
            })
        })?;

        let mut attributes = Vec::with_capacity(natts as usize);
        for attnum in 0..natts {
            let mut buf = vec![0u8; NC_MAX_NAME as usize + 1];
            let name = ffi::with_lock(|| {
                ffi::checked(unsafe { nc_inq_attname(ncid, varid, attnum, buf.as_mut_ptr().cast()) })?;
                let name = unsafe { CStr::from_ptr(buf.as_ptr().cast()) };
                Ok::<String, NcError>(name.to_string_lossy().into_owned())
            })?;
            match Attribute::from_existing(ncid, varid, &name) {
                Ok(attr) => attributes.push(attr),
                Err(NcError::UnsupportedType { code }) => {
                    warn!(attribute = %name, code, "skipping attribute with unsupported type");
                }
                Err(e) => return Err(e),
            }
        }
        Ok(attributes)
    }
}

impl fmt::Display for Attribute {
    /// A fixed human-readable tag; formatting never touches the dataset.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[object Attribute]")
    }
}
