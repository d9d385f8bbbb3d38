use serde::Serialize;

use crate::policy::PrecisionPolicy;
use crate::types::{PrecisionClass, ScalarType};
use crate::variant::ConversionVariant;

/// A conditional-compilation bracket around a generated definition.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Guard {
    /// Double precision available. In the embedded profile `cl_khr_fp64`
    /// implies 64-bit integers too, so this guard alone covers mixed pairs.
    Fp64,
    /// 64-bit integers available, or a full-profile build.
    Int64,
}

impl Guard {
    /// The OpenCL extension that makes the family usable.
    pub fn extension(self) -> &'static str {
        match self {
            Guard::Fp64 => "cl_khr_fp64",
            Guard::Int64 => "cles_khr_int64",
        }
    }

    pub fn open_directive(self) -> &'static str {
        match self {
            Guard::Fp64 => "#ifdef cl_khr_fp64",
            Guard::Int64 => "#if defined cles_khr_int64 || !defined(__EMBEDDED_PROFILE__)",
        }
    }

    pub fn close_directive(self) -> &'static str {
        "#endif"
    }
}

/// Decides which variants are only available on some targets.
#[derive(Copy, Clone, Debug)]
pub struct GuardResolver {
    policy: PrecisionPolicy,
}

impl GuardResolver {
    pub fn new(policy: &PrecisionPolicy) -> Self {
        Self { policy: *policy }
    }

    /// A type whose family the policy marks as native is standard for
    /// guarding purposes.
    pub fn classify(&self, ty: ScalarType) -> PrecisionClass {
        match ty.descriptor().precision {
            PrecisionClass::ExtendedInt64 if self.policy.int64.is_guarded() => {
                PrecisionClass::ExtendedInt64
            }
            PrecisionClass::ExtendedFloat64 if self.policy.fp64.is_guarded() => {
                PrecisionClass::ExtendedFloat64
            }
            _ => PrecisionClass::Standard,
        }
    }

    /// Never returns both guards: a double on either side wins over a
    /// 64-bit integer on the other.
    pub fn guard_for(&self, variant: &ConversionVariant) -> Option<Guard> {
        let classes = [self.classify(variant.src), self.classify(variant.dst)];
        if classes.contains(&PrecisionClass::ExtendedFloat64) {
            Some(Guard::Fp64)
        } else if classes.contains(&PrecisionClass::ExtendedInt64) {
            Some(Guard::Int64)
        } else {
            None
        }
    }
}
