//! Decides which OpenCL C `convert_*` builtins a runtime library must
//! provide, and with what semantics.
//!
//! Data flows one way: [`types::TypeRegistry`] feeds [`enumerate`], whose
//! variants are resolved against [`guard::GuardResolver`] into a
//! [`plan::Plan`]. Rendering the plan to text is left to the caller.

pub mod enumerate;
pub mod error;
pub mod guard;
pub mod plan;
pub mod policy;
pub mod types;
pub mod variant;

pub use error::{Error, Result};
pub mod prelude {
    pub use crate::enumerate::{enumerate, standard_variants, Variants, WidthPair};
    pub use crate::guard::{Guard, GuardResolver};
    pub use crate::plan::{Plan, VariantRecord};
    pub use crate::policy::{Extension, PrecisionPolicy};
    pub use crate::types::{ClampBounds, PrecisionClass, ScalarType, TypeDescriptor, TypeRegistry};
    pub use crate::variant::{ConversionVariant, ParsedName, RoundingMode, VectorWidth};
}
