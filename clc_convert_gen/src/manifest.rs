use clc_convert::prelude::*;
use serde::Serialize;

/// Machine-readable listing of a generation pass, for build steps that need
/// to know which symbols the generated source defines.
#[derive(Debug, Serialize)]
pub struct Manifest<'a> {
    pub policy: &'a PrecisionPolicy,
    pub count: usize,
    /// [`sha256`](crate::sha256) of the generated source.
    pub digest: String,
    pub conversions: &'a [VariantRecord],
}

impl<'a> Manifest<'a> {
    pub fn new(plan: &'a Plan, source: &str) -> Self {
        Self {
            policy: plan.policy(),
            count: plan.len(),
            digest: crate::sha256(source),
            conversions: plan.records(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
