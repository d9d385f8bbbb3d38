use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::policy::PrecisionPolicy;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarType {
    Char,
    Uchar,
    Short,
    Ushort,
    Int,
    Uint,
    Long,
    Ulong,
    Float,
    Double,
}

impl ScalarType {
    pub const ALL: [ScalarType; 10] = [
        ScalarType::Char,
        ScalarType::Uchar,
        ScalarType::Short,
        ScalarType::Ushort,
        ScalarType::Int,
        ScalarType::Uint,
        ScalarType::Long,
        ScalarType::Ulong,
        ScalarType::Float,
        ScalarType::Double,
    ];

    pub fn name(self) -> &'static str {
        self.descriptor().name
    }

    /// The static table row of this type, independent of any policy.
    pub fn descriptor(self) -> &'static TypeDescriptor {
        &TYPE_TABLE[self as usize]
    }

    pub fn from_name(name: &str) -> Option<Self> {
        TYPE_TABLE.iter().find(|d| d.name == name).map(|d| d.ty)
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which feature set a type depends on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrecisionClass {
    Standard,
    ExtendedInt64,
    ExtendedFloat64,
}

/// The literal tokens a saturating conversion clamps against.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct ClampBounds {
    pub min: &'static str,
    pub max: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeDescriptor {
    pub ty: ScalarType,
    pub name: &'static str,
    pub is_integer: bool,
    pub is_unsigned: bool,
    pub size_bytes: u32,
    /// Element type of a relational result on this type, used as the mask
    /// argument of `select`.
    pub bool_result: ScalarType,
    pub unsigned_counterpart: Option<ScalarType>,
    pub clamp: Option<ClampBounds>,
    pub precision: PrecisionClass,
}

impl TypeDescriptor {
    pub fn is_float(&self) -> bool {
        !self.is_integer
    }
}

macro_rules! int_type {
    (
        $ty:ident, $name:literal, $unsigned:literal, $size:literal, $bool:ident, $u:ident,
        $min:literal, $max:literal, $class:ident
    ) => {
        TypeDescriptor {
            ty: ScalarType::$ty,
            name: $name,
            is_integer: true,
            is_unsigned: $unsigned,
            size_bytes: $size,
            bool_result: ScalarType::$bool,
            unsigned_counterpart: Some(ScalarType::$u),
            clamp: Some(ClampBounds {
                min: $min,
                max: $max,
            }),
            precision: PrecisionClass::$class,
        }
    };
}

macro_rules! float_type {
    ($ty:ident, $name:literal, $size:literal, $bool:ident, $class:ident) => {
        TypeDescriptor {
            ty: ScalarType::$ty,
            name: $name,
            is_integer: false,
            is_unsigned: false,
            size_bytes: $size,
            bool_result: ScalarType::$bool,
            unsigned_counterpart: None,
            clamp: None,
            precision: PrecisionClass::$class,
        }
    };
}

// Indexed by `ScalarType as usize`.
static TYPE_TABLE: [TypeDescriptor; 10] = [
    int_type!(Char, "char", false, 1, Char, Uchar, "CHAR_MIN", "CHAR_MAX", Standard),
    int_type!(Uchar, "uchar", true, 1, Char, Uchar, "0", "UCHAR_MAX", Standard),
    int_type!(Short, "short", false, 2, Short, Ushort, "SHRT_MIN", "SHRT_MAX", Standard),
    int_type!(Ushort, "ushort", true, 2, Short, Ushort, "0", "USHRT_MAX", Standard),
    int_type!(Int, "int", false, 4, Int, Uint, "INT_MIN", "INT_MAX", Standard),
    int_type!(Uint, "uint", true, 4, Int, Uint, "0", "UINT_MAX", Standard),
    int_type!(Long, "long", false, 8, Long, Ulong, "LONG_MIN", "LONG_MAX", ExtendedInt64),
    int_type!(Ulong, "ulong", true, 8, Long, Ulong, "0", "ULONG_MAX", ExtendedInt64),
    float_type!(Float, "float", 4, Int, Standard),
    float_type!(Double, "double", 8, Long, ExtendedFloat64),
];

/// The set of types a generation pass works over.
///
/// Built once from the static table and the precision policy, read-only
/// afterwards.
#[derive(Clone, Debug)]
pub struct TypeRegistry {
    types: Vec<&'static TypeDescriptor>,
    by_name: HashMap<&'static str, ScalarType>,
}

impl TypeRegistry {
    pub fn new(policy: &PrecisionPolicy) -> Self {
        let types: Vec<&'static TypeDescriptor> = TYPE_TABLE
            .iter()
            .filter(|d| match d.precision {
                PrecisionClass::Standard => true,
                PrecisionClass::ExtendedInt64 => policy.int64.is_enabled(),
                PrecisionClass::ExtendedFloat64 => policy.fp64.is_enabled(),
            })
            .collect();
        let by_name = types.iter().map(|d| (d.name, d.ty)).collect();
        log::debug!(
            "type registry: {}",
            types.iter().map(|d| d.name).collect::<Vec<_>>().join(", ")
        );
        Self { types, by_name }
    }

    pub fn lookup(&self, name: &str) -> Result<&'static TypeDescriptor> {
        self.by_name
            .get(name)
            .map(|t| t.descriptor())
            .ok_or_else(|| Error::UnknownType(name.to_string()))
    }

    /// Like [`lookup`](Self::lookup) for an already-parsed type; fails if the
    /// policy left the type out.
    pub fn get(&self, ty: ScalarType) -> Result<&'static TypeDescriptor> {
        if self.contains(ty) {
            Ok(ty.descriptor())
        } else {
            Err(Error::UnknownType(ty.name().to_string()))
        }
    }

    pub fn contains(&self, ty: ScalarType) -> bool {
        self.by_name.contains_key(ty.name())
    }

    pub fn types(&self) -> &[&'static TypeDescriptor] {
        &self.types
    }

    pub fn integer_types(&self) -> impl Iterator<Item = &'static TypeDescriptor> + '_ {
        self.types.iter().copied().filter(|d| d.is_integer)
    }

    pub fn float_types(&self) -> impl Iterator<Item = &'static TypeDescriptor> + '_ {
        self.types.iter().copied().filter(|d| d.is_float())
    }

    pub fn is_unsigned(&self, ty: ScalarType) -> Result<bool> {
        Ok(self.get(ty)?.is_unsigned)
    }

    pub fn unsigned_variant_of(&self, ty: ScalarType) -> Result<ScalarType> {
        let d = self.get(ty)?;
        d.unsigned_counterpart.ok_or(Error::NoUnsignedVariant(d.name))
    }

    pub fn clamp_bounds(&self, ty: ScalarType) -> Result<ClampBounds> {
        let d = self.get(ty)?;
        d.clamp.ok_or(Error::NotClampable(d.name))
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new(&PrecisionPolicy::default())
    }
}
