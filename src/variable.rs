//! Variable handles.
//!
//! A [`Variable`] is an id-based handle into an open dataset, carried only
//! as far as the attribute surface needs: enough to address per-variable
//! attributes and to describe the variable when inspecting a file.

use std::ffi::{CStr, CString};
use std::os::raw::c_int;

use netcdf_sys::{nc_inq_nvars, nc_inq_varid, nc_inq_varname, nc_inq_vartype, nc_type, NC_MAX_NAME};
use serde::Serialize;
use tracing::warn;

use crate::attribute::Attribute;
use crate::error::{NcError, Result};
use crate::ffi;
use crate::types::NcType;
use crate::value::AttrValue;

/// A handle to one variable of an open dataset.
#[derive(Debug, Clone, Serialize)]
pub struct Variable {
    name: String,
    #[serde(skip)]
    ncid: c_int,
    #[serde(skip)]
    varid: c_int,
    /// The variable's atomic data type
    pub nctype: NcType,
}

impl Variable {
    /// Look up a variable by name.
    pub(crate) fn from_name(ncid: c_int, name: &str) -> Result<Self> {
        let nc_name = CString::new(name)?;
        let mut varid: c_int = 0;
        ffi::with_lock(|| {
            ffi::checked(unsafe { nc_inq_varid(ncid, nc_name.as_ptr(), &mut varid) })
        })?;
        Self::from_id(ncid, varid, name.to_string())
    }

    fn from_id(ncid: c_int, varid: c_int, name: String) -> Result<Self> {
        let mut code: nc_type = 0;
        ffi::with_lock(|| ffi::checked(unsafe { nc_inq_vartype(ncid, varid, &mut code) }))?;
        Ok(Self {
            name,
            ncid,
            varid,
            nctype: NcType::from_code(code)?,
        })
    }

    /// Build a handle for a variable this crate just defined.
    pub(crate) fn new(ncid: c_int, varid: c_int, name: &str, nctype: NcType) -> Self {
        Self {
            name: name.to_string(),
            ncid,
            varid,
            nctype,
        }
    }

    /// The variable name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Look up one attribute of this variable.
    pub fn attribute(&self, name: &str) -> Result<Attribute> {
        Attribute::from_existing(self.ncid, self.varid, name)
    }

    /// Enumerate all attributes of this variable.
    pub fn attributes(&self) -> Result<Vec<Attribute>> {
        Attribute::list(self.ncid, self.varid)
    }

    /// Write an attribute on this variable, creating or overwriting it.
    pub fn put_attribute(&mut self, name: &str, value: AttrValue) -> Result<Attribute> {
        Attribute::put(self.ncid, self.varid, name, &value)?;
        Ok(Attribute::with_type(
            self.ncid,
            self.varid,
            name,
            value.nc_type(),
        ))
    }

    /// Enumerate all variables of an open dataset.
    pub(crate) fn list(ncid: c_int) -> Result<Vec<Variable>> {
        let mut nvars: c_int = 0;
        ffi::with_lock(|| ffi::checked(unsafe { nc_inq_nvars(ncid, &mut nvars) }))?;

        let mut variables = Vec::with_capacity(nvars as usize);
        for varid in 0..nvars {
            let mut buf = vec![0u8; NC_MAX_NAME as usize + 1];
            let name = ffi::with_lock(|| {
                ffi::checked(unsafe { nc_inq_varname(ncid, varid, buf.as_mut_ptr().cast()) })?;
                let name = unsafe { CStr::from_ptr(buf.as_ptr().cast()) };
                Ok::<String, NcError>(name.to_string_lossy().into_owned())
            })?;
            match Self::from_id(ncid, varid, name.clone()) {
                Ok(var) => variables.push(var),
                Err(NcError::UnsupportedType { code }) => {
                    warn!(variable = %name, code, "skipping variable with unsupported type");
                }
                Err(e) => return Err(e),
            }
        }
        Ok(variables)
    }
}
