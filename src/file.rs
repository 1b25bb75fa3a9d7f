//! Open datasets and the root-group attribute surface.
//!
//! A [`File`] owns the open netCDF handle and closes it on drop. Global
//! attributes are attributes of the root group, addressed with the
//! library's `NC_GLOBAL` owner id; dimension and variable definition is
//! carried only as far as attribute access needs it.

use std::ffi::CString;
use std::os::raw::c_int;
use std::path::{Path, PathBuf};

use netcdf_sys::{
    nc_close, nc_create, nc_def_dim, nc_def_var, nc_inq_dimid, nc_inq_dimlen, nc_inq_ndims,
    nc_open, NC_CLOBBER, NC_GLOBAL, NC_NETCDF4, NC_NOWRITE, NC_WRITE,
};
use serde::Serialize;
use tracing::{debug, error};

use crate::attribute::Attribute;
use crate::error::Result;
use crate::ffi;
use crate::types::NcType;
use crate::value::AttrValue;
use crate::variable::Variable;

/// Metadata about a netCDF dimension
#[derive(Debug, Clone, Serialize)]
pub struct Dimension {
    /// Name of the dimension
    pub name: String,
    /// Size of the dimension
    pub len: usize,
    #[serde(skip)]
    pub(crate) id: c_int,
}

/// An open netCDF dataset.
#[derive(Debug)]
pub struct File {
    ncid: c_int,
    path: PathBuf,
}

impl File {
    /// Open an existing dataset read-only.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_mode(path.as_ref(), NC_NOWRITE)
    }

    /// Open an existing dataset for reading and writing.
    pub fn append<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_mode(path.as_ref(), NC_WRITE)
    }

    fn open_with_mode(path: &Path, mode: c_int) -> Result<Self> {
        let nc_path = CString::new(path.to_string_lossy().as_bytes().to_vec())?;
        let mut ncid: c_int = 0;
        ffi::with_lock(|| ffi::checked(unsafe { nc_open(nc_path.as_ptr(), mode, &mut ncid) }))?;
        debug!(path = %path.display(), ncid, "opened dataset");
        Ok(Self {
            ncid,
            path: path.to_path_buf(),
        })
    }

    /// Create a new netCDF-4 dataset, replacing any file already at the
    /// path.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let nc_path = CString::new(path.to_string_lossy().as_bytes().to_vec())?;
        let mut ncid: c_int = 0;
        ffi::with_lock(|| {
            ffi::checked(unsafe { nc_create(nc_path.as_ptr(), NC_CLOBBER | NC_NETCDF4, &mut ncid) })
        })?;
        debug!(path = %path.display(), ncid, "created dataset");
        Ok(Self {
            ncid,
            path: path.to_path_buf(),
        })
    }

    /// Path the dataset was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Look up one global attribute.
    pub fn attribute(&self, name: &str) -> Result<Attribute> {
        Attribute::from_existing(self.ncid, NC_GLOBAL, name)
    }

    /// Enumerate all global attributes.
    pub fn attributes(&self) -> Result<Vec<Attribute>> {
        Attribute::list(self.ncid, NC_GLOBAL)
    }

    /// Write a global attribute, creating or overwriting it.
    pub fn put_attribute(&mut self, name: &str, value: AttrValue) -> Result<Attribute> {
        Attribute::put(self.ncid, NC_GLOBAL, name, &value)?;
        Ok(Attribute::with_type(
            self.ncid,
            NC_GLOBAL,
            name,
            value.nc_type(),
        ))
    }

    /// Look up a variable by name.
    pub fn variable(&self, name: &str) -> Result<Variable> {
        Variable::from_name(self.ncid, name)
    }

    /// Enumerate all variables.
    pub fn variables(&self) -> Result<Vec<Variable>> {
        Variable::list(self.ncid)
    }

    /// Define a new dimension.
    pub fn add_dimension(&mut self, name: &str, len: usize) -> Result<Dimension> {
        let nc_name = CString::new(name)?;
        let mut dimid: c_int = 0;
        ffi::with_lock(|| {
            ffi::checked(unsafe { nc_def_dim(self.ncid, nc_name.as_ptr(), len, &mut dimid) })
        })?;
        Ok(Dimension {
            name: name.to_string(),
            len,
            id: dimid,
        })
    }

    /// Look up a dimension by name.
    pub fn dimension(&self, name: &str) -> Result<Dimension> {
        let nc_name = CString::new(name)?;
        let mut dimid: c_int = 0;
        let mut len: usize = 0;
        ffi::with_lock(|| {
            ffi::checked(unsafe { nc_inq_dimid(self.ncid, nc_name.as_ptr(), &mut dimid) })?;
            ffi::checked(unsafe { nc_inq_dimlen(self.ncid, dimid, &mut len) })
        })?;
        Ok(Dimension {
            name: name.to_string(),
            len,
            id: dimid,
        })
    }

    /// Number of dimensions defined in the dataset.
    pub fn num_dimensions(&self) -> Result<usize> {
        let mut ndims: c_int = 0;
        ffi::with_lock(|| ffi::checked(unsafe { nc_inq_ndims(self.ncid, &mut ndims) }))?;
        Ok(ndims as usize)
    }

    /// Define a new variable over previously defined dimensions.
    pub fn add_variable(&mut self, name: &str, nctype: NcType, dims: &[&str]) -> Result<Variable> {
        let dimids: Vec<c_int> = dims
            .iter()
            .map(|d| self.dimension(d).map(|dim| dim.id))
            .collect::<Result<_>>()?;
        let nc_name = CString::new(name)?;
        let mut varid: c_int = 0;
        ffi::with_lock(|| {
            ffi::checked(unsafe {
                nc_def_var(
                    self.ncid,
                    nc_name.as_ptr(),
                    nctype.code(),
                    dimids.len() as c_int,
                    dimids.as_ptr(),
                    &mut varid,
                )
            })
        })?;
        Ok(Variable::new(self.ncid, varid, name, nctype))
    }
}

impl Drop for File {
    fn drop(&mut self) {
        let code = ffi::with_lock(|| unsafe { nc_close(self.ncid) });
        if code != netcdf_sys::NC_NOERR {
            error!(path = %self.path.display(), code, "failed to close dataset");
        }
    }
}
