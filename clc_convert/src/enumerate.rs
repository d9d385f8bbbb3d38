use crate::error::{Error, Result};
use crate::types::{ScalarType, TypeRegistry};
use crate::variant::{ConversionVariant, RoundingMode, VectorWidth};

/// Widths of the two sides of a conversion. Only matched pairs are
/// generated; OpenCL has no mixed-width `convert_` builtins.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct WidthPair {
    pub src: VectorWidth,
    pub dst: VectorWidth,
}

impl WidthPair {
    pub fn new(src: VectorWidth, dst: VectorWidth) -> Self {
        Self { src, dst }
    }
    pub fn matched(width: VectorWidth) -> Self {
        Self::new(width, width)
    }
    fn shared(self) -> Result<VectorWidth> {
        if self.src == self.dst {
            Ok(self.src)
        } else {
            Err(Error::InvalidWidthPairing {
                src: self.src,
                dst: self.dst,
            })
        }
    }
}

impl From<VectorWidth> for WidthPair {
    fn from(width: VectorWidth) -> Self {
        Self::matched(width)
    }
}

fn dedup<T: PartialEq + Copy>(items: &[T]) -> Vec<T> {
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        if !out.contains(item) {
            out.push(*item);
        }
    }
    out
}

/// Lazily walks destination, source, width, saturation and rounding mode,
/// in that nesting order.
///
/// Each combination is collapsed to its canonical variant. A canonical
/// variant is yielded at its first occurrence and skipped after that, so
/// every (source, destination, width) triple on the axes yields at least
/// its default conversion.
///
/// Clone before iterating to walk the same sequence again.
#[derive(Clone, Debug)]
pub struct Variants {
    types: Vec<ScalarType>,
    widths: Vec<VectorWidth>,
    saturation: Vec<bool>,
    rounding: Vec<RoundingMode>,
    // dst, src, width, saturation, rounding
    cursor: [usize; 5],
    // canonical (saturate, rounding) already yielded for the current triple
    yielded: Vec<(bool, RoundingMode)>,
    done: bool,
}

impl Variants {
    fn axis_lens(&self) -> [usize; 5] {
        [
            self.types.len(),
            self.types.len(),
            self.widths.len(),
            self.saturation.len(),
            self.rounding.len(),
        ]
    }

    fn current(&self) -> ConversionVariant {
        let [d, s, w, sat, r] = self.cursor;
        ConversionVariant::new(
            self.types[s],
            self.types[d],
            self.widths[w],
            self.saturation[sat],
            self.rounding[r],
        )
    }

    fn advance(&mut self) {
        let lens = self.axis_lens();
        for axis in (0..5).rev() {
            self.cursor[axis] += 1;
            if self.cursor[axis] < lens[axis] {
                return;
            }
            self.cursor[axis] = 0;
        }
        self.done = true;
    }
}

impl Iterator for Variants {
    type Item = ConversionVariant;
    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            if self.cursor[3] == 0 && self.cursor[4] == 0 {
                self.yielded.clear();
            }
            let v = self.current().canonical();
            self.advance();
            let key = (v.saturate, v.rounding);
            if !self.yielded.contains(&key) {
                self.yielded.push(key);
                return Some(v);
            }
        }
        None
    }
}

/// Every width pair is checked before the sequence is handed out, so a bad
/// pairing fails the pass before anything is generated.
///
/// Repeated axis values are dropped after their first occurrence.
pub fn enumerate(
    types: &[ScalarType],
    widths: &[WidthPair],
    saturation: &[bool],
    rounding: &[RoundingMode],
) -> Result<Variants> {
    let widths = widths
        .iter()
        .map(|p| p.shared())
        .collect::<Result<Vec<_>>>()?;
    let variants = Variants {
        types: dedup(types),
        widths: dedup(&widths),
        saturation: dedup(saturation),
        rounding: dedup(rounding),
        cursor: [0; 5],
        yielded: Vec::new(),
        done: false,
    };
    let done = variants.axis_lens().contains(&0);
    Ok(Variants { done, ..variants })
}

/// All registered types over every width, both saturation settings and all
/// rounding modes.
pub fn standard_variants(registry: &TypeRegistry) -> Result<Variants> {
    let types: Vec<ScalarType> = registry.types().iter().map(|d| d.ty).collect();
    let widths: Vec<WidthPair> = VectorWidth::ALL
        .into_iter()
        .map(WidthPair::from)
        .collect();
    enumerate(&types, &widths, &[false, true], &RoundingMode::ALL)
}
