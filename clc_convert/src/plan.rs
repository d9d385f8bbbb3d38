use serde::Serialize;

use crate::enumerate::standard_variants;
use crate::error::Result;
use crate::guard::{Guard, GuardResolver};
use crate::policy::PrecisionPolicy;
use crate::types::{ClampBounds, ScalarType, TypeRegistry};
use crate::variant::{ConversionVariant, RoundingMode, VectorWidth};

/// Everything an emitter needs to write one function.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct VariantRecord {
    pub name: String,
    pub src: ScalarType,
    pub dst: ScalarType,
    pub width: VectorWidth,
    pub saturate: bool,
    pub rounding: RoundingMode,
    /// Present only for saturating conversions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clamp: Option<ClampBounds>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guard: Option<Guard>,
}

impl VariantRecord {
    pub fn resolve(
        registry: &TypeRegistry,
        guards: &GuardResolver,
        variant: ConversionVariant,
    ) -> Result<Self> {
        let variant = variant.canonical();
        registry.get(variant.src)?;
        let clamp = if variant.saturate {
            Some(registry.clamp_bounds(variant.dst)?)
        } else {
            registry.get(variant.dst)?;
            None
        };
        Ok(Self {
            name: variant.function_name(),
            src: variant.src,
            dst: variant.dst,
            width: variant.width,
            saturate: variant.saturate,
            rounding: variant.rounding,
            clamp,
            guard: guards.guard_for(&variant),
        })
    }

    pub fn variant(&self) -> ConversionVariant {
        ConversionVariant::new(self.src, self.dst, self.width, self.saturate, self.rounding)
    }
}

/// One complete generation pass, held in memory so that nothing is written
/// unless every variant resolved.
#[derive(Clone, Debug)]
pub struct Plan {
    policy: PrecisionPolicy,
    registry: TypeRegistry,
    records: Vec<VariantRecord>,
}

impl Plan {
    pub fn build(policy: &PrecisionPolicy) -> Result<Self> {
        let registry = TypeRegistry::new(policy);
        let guards = GuardResolver::new(policy);
        let records = standard_variants(&registry)?
            .map(|v| VariantRecord::resolve(&registry, &guards, v))
            .collect::<Result<Vec<_>>>()?;
        log::debug!(
            "planned {} conversions over {} types (int64: {}, fp64: {})",
            records.len(),
            registry.types().len(),
            policy.int64,
            policy.fp64
        );
        Ok(Self {
            policy: *policy,
            registry,
            records,
        })
    }

    pub fn policy(&self) -> &PrecisionPolicy {
        &self.policy
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    pub fn records(&self) -> &[VariantRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
