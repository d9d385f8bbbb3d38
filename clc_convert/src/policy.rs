use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How an optional 64-bit type family takes part in a generation pass.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Extension {
    /// The types are not registered, so no conversion mentions them.
    #[default]
    Disabled,
    /// The types are registered and their conversions are bracketed by the
    /// feature guard.
    Guarded,
    /// The target always provides the types, no guard is emitted.
    Native,
}

impl Extension {
    pub fn is_enabled(self) -> bool {
        self != Extension::Disabled
    }
    pub fn is_guarded(self) -> bool {
        self == Extension::Guarded
    }
}

impl fmt::Display for Extension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Extension::Disabled => "disabled",
            Extension::Guarded => "guarded",
            Extension::Native => "native",
        };
        f.write_str(s)
    }
}

impl FromStr for Extension {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "disabled" => Ok(Extension::Disabled),
            "guarded" => Ok(Extension::Guarded),
            "native" => Ok(Extension::Native),
            _ => Err(format!(
                "invalid extension policy `{}`, expected disabled, guarded or native",
                s
            )),
        }
    }
}

/// Which extended-precision families exist for a pass.
///
/// `long`/`ulong` follow `int64`, `double` follows `fp64`. The defaults are
/// picked by the `int64` and `fp64` cargo features.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct PrecisionPolicy {
    pub int64: Extension,
    pub fp64: Extension,
}

impl Default for PrecisionPolicy {
    fn default() -> Self {
        Self {
            int64: if cfg!(feature = "int64") {
                Extension::Guarded
            } else {
                Extension::Disabled
            },
            fp64: if cfg!(feature = "fp64") {
                Extension::Guarded
            } else {
                Extension::Disabled
            },
        }
    }
}

impl PrecisionPolicy {
    /// Only the standard types: char through uint, and float.
    pub const STANDARD: Self = Self {
        int64: Extension::Disabled,
        fp64: Extension::Disabled,
    };
    /// Every type, with the 64-bit families behind their guards.
    pub const FULL_GUARDED: Self = Self {
        int64: Extension::Guarded,
        fp64: Extension::Guarded,
    };
}
