//! The netCDF external atomic type table.
//!
//! netCDF identifies the type of every attribute and variable with a small
//! integer code. This module maps the eleven atomic codes this crate can
//! marshal onto an enum; everything outside that range (user-defined
//! compounds, enums, opaque and vlen types) is rejected up front, before any
//! library call is issued against the resource.

use std::fmt;

use netcdf_sys::{
    nc_type, NC_BYTE, NC_CHAR, NC_DOUBLE, NC_FLOAT, NC_INT, NC_INT64, NC_SHORT, NC_STRING,
    NC_UBYTE, NC_UINT, NC_UINT64, NC_USHORT,
};
use serde::{Deserialize, Serialize};

use crate::error::{NcError, Result};

/// One of the netCDF external atomic types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NcType {
    /// Signed 8-bit integer (`NC_BYTE`)
    Byte,
    /// Text stored as 8-bit characters (`NC_CHAR`)
    Char,
    /// Signed 16-bit integer (`NC_SHORT`)
    Short,
    /// Signed 32-bit integer (`NC_INT`)
    Int,
    /// IEEE 32-bit float (`NC_FLOAT`)
    Float,
    /// IEEE 64-bit float (`NC_DOUBLE`)
    Double,
    /// Unsigned 8-bit integer (`NC_UBYTE`)
    Ubyte,
    /// Unsigned 16-bit integer (`NC_USHORT`)
    Ushort,
    /// Unsigned 32-bit integer (`NC_UINT`)
    Uint,
    /// Signed 64-bit integer (`NC_INT64`)
    Int64,
    /// Unsigned 64-bit integer (`NC_UINT64`)
    Uint64,
    /// Variable-length string (`NC_STRING`)
    String,
}

impl NcType {
    /// Look up the enum for a raw type code, rejecting anything this crate
    /// cannot marshal.
    pub fn from_code(code: nc_type) -> Result<Self> {
        match code {
            NC_BYTE => Ok(NcType::Byte),
            NC_CHAR => Ok(NcType::Char),
            NC_SHORT => Ok(NcType::Short),
            NC_INT => Ok(NcType::Int),
            NC_FLOAT => Ok(NcType::Float),
            NC_DOUBLE => Ok(NcType::Double),
            NC_UBYTE => Ok(NcType::Ubyte),
            NC_USHORT => Ok(NcType::Ushort),
            NC_UINT => Ok(NcType::Uint),
            NC_INT64 => Ok(NcType::Int64),
            NC_UINT64 => Ok(NcType::Uint64),
            NC_STRING => Ok(NcType::String),
            _ => Err(NcError::UnsupportedType { code }),
        }
    }

    /// The raw netCDF type code.
    pub fn code(self) -> nc_type {
        match self {
            NcType::Byte => NC_BYTE,
            NcType::Char => NC_CHAR,
            NcType::Short => NC_SHORT,
            NcType::Int => NC_INT,
            NcType::Float => NC_FLOAT,
            NcType::Double => NC_DOUBLE,
            NcType::Ubyte => NC_UBYTE,
            NcType::Ushort => NC_USHORT,
            NcType::Uint => NC_UINT,
            NcType::Int64 => NC_INT64,
            NcType::Uint64 => NC_UINT64,
            NcType::String => NC_STRING,
        }
    }

    /// Byte width of one element of this type. Char and string count as one
    /// byte per stored character, matching the length reported by the
    /// library for text attributes.
    pub fn size(self) -> usize {
        match self {
            NcType::Byte | NcType::Char | NcType::Ubyte | NcType::String => 1,
            NcType::Short | NcType::Ushort => 2,
            NcType::Int | NcType::Uint | NcType::Float => 4,
            NcType::Double | NcType::Int64 | NcType::Uint64 => 8,
        }
    }

    /// The netCDF name of the type, as it appears in CDL dumps.
    pub fn name(self) -> &'static str {
        match self {
            NcType::Byte => "byte",
            NcType::Char => "char",
            NcType::Short => "short",
            NcType::Int => "int",
            NcType::Float => "float",
            NcType::Double => "double",
            NcType::Ubyte => "ubyte",
            NcType::Ushort => "ushort",
            NcType::Uint => "uint",
            NcType::Int64 => "int64",
            NcType::Uint64 => "uint64",
            NcType::String => "string",
        }
    }
}

impl fmt::Display for NcType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
