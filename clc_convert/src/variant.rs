use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::ScalarType;

/// Lane count of a converted value.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VectorWidth {
    Scalar,
    #[serde(rename = "2")]
    W2,
    #[serde(rename = "3")]
    W3,
    #[serde(rename = "4")]
    W4,
    #[serde(rename = "8")]
    W8,
    #[serde(rename = "16")]
    W16,
}

impl VectorWidth {
    pub const ALL: [VectorWidth; 6] = [
        VectorWidth::Scalar,
        VectorWidth::W2,
        VectorWidth::W3,
        VectorWidth::W4,
        VectorWidth::W8,
        VectorWidth::W16,
    ];

    pub fn lanes(self) -> u32 {
        match self {
            VectorWidth::Scalar => 1,
            VectorWidth::W2 => 2,
            VectorWidth::W3 => 3,
            VectorWidth::W4 => 4,
            VectorWidth::W8 => 8,
            VectorWidth::W16 => 16,
        }
    }

    /// Type-name suffix: empty for scalars.
    pub fn suffix(self) -> &'static str {
        match self {
            VectorWidth::Scalar => "",
            VectorWidth::W2 => "2",
            VectorWidth::W3 => "3",
            VectorWidth::W4 => "4",
            VectorWidth::W8 => "8",
            VectorWidth::W16 => "16",
        }
    }

    /// Width of the `lo`/`hi` halves. Width 3 has none and scalars cannot
    /// be split.
    pub fn half(self) -> Option<Self> {
        match self {
            VectorWidth::W2 => Some(VectorWidth::Scalar),
            VectorWidth::W4 => Some(VectorWidth::W2),
            VectorWidth::W8 => Some(VectorWidth::W4),
            VectorWidth::W16 => Some(VectorWidth::W8),
            VectorWidth::Scalar | VectorWidth::W3 => None,
        }
    }
}

impl fmt::Display for VectorWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VectorWidth::Scalar => f.write_str("scalar"),
            w => write!(f, "{}", w.lanes()),
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundingMode {
    #[default]
    None,
    Rtz,
    Rte,
    Rtp,
    Rtn,
}

impl RoundingMode {
    pub const ALL: [RoundingMode; 5] = [
        RoundingMode::None,
        RoundingMode::Rtz,
        RoundingMode::Rte,
        RoundingMode::Rtp,
        RoundingMode::Rtn,
    ];

    pub fn suffix(self) -> &'static str {
        match self {
            RoundingMode::None => "",
            RoundingMode::Rtz => "_rtz",
            RoundingMode::Rte => "_rte",
            RoundingMode::Rtp => "_rtp",
            RoundingMode::Rtn => "_rtn",
        }
    }

    fn from_suffix(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.suffix() == s)
    }
}

const PREFIX: &str = "convert_";
const SAT: &str = "_sat";

/// One generated function.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConversionVariant {
    pub src: ScalarType,
    pub dst: ScalarType,
    pub width: VectorWidth,
    pub saturate: bool,
    pub rounding: RoundingMode,
}

impl ConversionVariant {
    pub fn new(
        src: ScalarType,
        dst: ScalarType,
        width: VectorWidth,
        saturate: bool,
        rounding: RoundingMode,
    ) -> Self {
        Self {
            src,
            dst,
            width,
            saturate,
            rounding,
        }
    }

    /// The default, unsaturated conversion with no rounding suffix.
    pub fn default_of(src: ScalarType, dst: ScalarType, width: VectorWidth) -> Self {
        Self::new(src, dst, width, false, RoundingMode::None)
    }

    /// Saturation only matters for integer destinations.
    pub fn saturation_applies(&self) -> bool {
        self.dst.descriptor().is_integer
    }

    /// A rounding suffix only matters when narrowing a floating value to an
    /// integer.
    pub fn rounding_applies(&self) -> bool {
        self.dst.descriptor().is_integer && self.src.descriptor().is_float()
    }

    pub fn is_canonical(&self) -> bool {
        (!self.saturate || self.saturation_applies())
            && (self.rounding == RoundingMode::None || self.rounding_applies())
    }

    /// Drops the flags that carry no meaning for this pair, so that the
    /// result names a function that is actually generated.
    pub fn canonical(self) -> Self {
        Self {
            saturate: self.saturate && self.saturation_applies(),
            rounding: if self.rounding_applies() {
                self.rounding
            } else {
                RoundingMode::None
            },
            ..self
        }
    }

    pub fn function_name(&self) -> String {
        format!(
            "{}{}{}{}{}",
            PREFIX,
            self.dst.name(),
            self.width.suffix(),
            if self.saturate { SAT } else { "" },
            self.rounding.suffix()
        )
    }

    /// Source type spelled with its width, e.g. `float4`.
    pub fn src_type_name(&self) -> String {
        format!("{}{}", self.src.name(), self.width.suffix())
    }

    pub fn dst_type_name(&self) -> String {
        format!("{}{}", self.dst.name(), self.width.suffix())
    }
}

impl fmt::Display for ConversionVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.function_name(), self.src_type_name())
    }
}

/// The parts of a function name. The source type is not part of the name,
/// OpenCL overloads on it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ParsedName {
    pub dst: ScalarType,
    pub width: VectorWidth,
    pub saturate: bool,
    pub rounding: RoundingMode,
}

impl ParsedName {
    pub fn parse(name: &str) -> Result<Self> {
        let malformed = || Error::MalformedName(name.to_string());
        let rest = name.strip_prefix(PREFIX).ok_or_else(malformed)?;

        let type_end = rest
            .find(|c: char| !c.is_ascii_lowercase())
            .unwrap_or(rest.len());
        let dst = ScalarType::from_name(&rest[..type_end]).ok_or_else(malformed)?;
        let rest = &rest[type_end..];

        let digits_end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        let width = match &rest[..digits_end] {
            "" => VectorWidth::Scalar,
            digits => VectorWidth::ALL
                .into_iter()
                .find(|w| w.suffix() == digits)
                .ok_or_else(malformed)?,
        };
        let rest = &rest[digits_end..];

        let (saturate, rest) = match rest.strip_prefix(SAT) {
            Some(rest) => (true, rest),
            None => (false, rest),
        };
        let rounding = RoundingMode::from_suffix(rest).ok_or_else(malformed)?;

        Ok(Self {
            dst,
            width,
            saturate,
            rounding,
        })
    }

    pub fn matches(&self, variant: &ConversionVariant) -> bool {
        self.dst == variant.dst
            && self.width == variant.width
            && self.saturate == variant.saturate
            && self.rounding == variant.rounding
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ScalarType::*;

    #[test]
    fn names() {
        let v = ConversionVariant::new(Float, Uint, VectorWidth::W4, true, RoundingMode::Rtz);
        assert_eq!(v.function_name(), "convert_uint4_sat_rtz");
        let v = ConversionVariant::new(Uint, Char, VectorWidth::Scalar, true, RoundingMode::None);
        assert_eq!(v.function_name(), "convert_char_sat");
        let v = ConversionVariant::default_of(Char, Float, VectorWidth::W16);
        assert_eq!(v.function_name(), "convert_float16");
        assert_eq!(v.to_string(), "convert_float16(char16)");
    }

    #[test]
    fn halves() {
        assert_eq!(VectorWidth::W3.half(), None);
        assert_eq!(VectorWidth::Scalar.half(), None);
        assert_eq!(VectorWidth::W2.half(), Some(VectorWidth::Scalar));
        assert_eq!(VectorWidth::W16.half(), Some(VectorWidth::W8));
        for w in VectorWidth::ALL {
            if let Some(h) = w.half() {
                assert_eq!(h.lanes() * 2, w.lanes());
            }
        }
    }

    #[test]
    fn canonical_collapses_float_destination() {
        let v = ConversionVariant::new(Int, Float, VectorWidth::W2, true, RoundingMode::Rte);
        assert!(!v.is_canonical());
        assert_eq!(v.canonical(), ConversionVariant::default_of(Int, Float, VectorWidth::W2));
    }

    #[test]
    fn canonical_drops_rounding_for_integer_source() {
        let v = ConversionVariant::new(Short, Int, VectorWidth::W8, true, RoundingMode::Rtp);
        assert!(!v.is_canonical());
        let c = v.canonical();
        assert!(c.saturate);
        assert_eq!(c.rounding, RoundingMode::None);
        assert!(c.is_canonical());
    }

    #[test]
    fn parse_names() {
        assert_eq!(
            ParsedName::parse("convert_uint4_sat_rtz"),
            Ok(ParsedName {
                dst: Uint,
                width: VectorWidth::W4,
                saturate: true,
                rounding: RoundingMode::Rtz,
            })
        );
        assert_eq!(
            ParsedName::parse("convert_uchar"),
            Ok(ParsedName {
                dst: Uchar,
                width: VectorWidth::Scalar,
                saturate: false,
                rounding: RoundingMode::None,
            })
        );
        assert_eq!(
            ParsedName::parse("convert_short16_rtn").map(|p| (p.width, p.rounding)),
            Ok((VectorWidth::W16, RoundingMode::Rtn))
        );
    }

    #[test]
    fn parse_rejects() {
        for bad in [
            "convert_",
            "convert_int5",
            "convert_int4_rtz_sat",
            "convert_half2",
            "as_int4",
            "convert_int4_sat_",
            "convert_int04",
        ] {
            assert_eq!(
                ParsedName::parse(bad),
                Err(Error::MalformedName(bad.to_string())),
                "{}",
                bad
            );
        }
    }
}
