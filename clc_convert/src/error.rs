use thiserror::Error;

use crate::variant::VectorWidth;

/// Every error here is a static defect of the generator's inputs, so none of
/// them is retried and a pass that hits one produces no output at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("unknown type `{0}`")]
    UnknownType(String),

    #[error("type `{0}` has no unsigned variant")]
    NoUnsignedVariant(&'static str),

    #[error("type `{0}` has no clamp bounds")]
    NotClampable(&'static str),

    #[error("source width `{src}` does not match destination width `{dst}`")]
    InvalidWidthPairing { src: VectorWidth, dst: VectorWidth },

    #[error("`{0}` is not a conversion function name")]
    MalformedName(String),
}

pub type Result<T> = std::result::Result<T, Error>;
