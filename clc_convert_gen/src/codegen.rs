use std::fmt::Write;

use clc_convert::prelude::*;
use clc_convert::Result;

const HEADER: &str = "\
/* Generated by gen-convert. Do not edit.

   OpenCL type conversion functions of the form

     convert_<destTypen><_sat><_roundingMode>(<sourceTypen>)
*/

#include <clc/clc.h>
";

/// Renders a [`Plan`] as OpenCL C.
///
/// Records are written in plan order. Runs of records sharing a guard share
/// one `#if`/`#endif` pair.
pub struct CodeGen<'a> {
    registry: &'a TypeRegistry,
    body: String,
    open_guard: Option<Guard>,
}

impl<'a> CodeGen<'a> {
    pub fn new(registry: &'a TypeRegistry) -> Self {
        Self {
            registry,
            body: String::new(),
            open_guard: None,
        }
    }

    pub fn generate(plan: &Plan) -> Result<String> {
        let mut gen = CodeGen::new(plan.registry());
        gen.gen_header(plan.policy());
        for record in plan.records() {
            gen.gen_record(record)?;
        }
        gen.switch_guard(None);
        log::debug!("emitted {} conversion functions", plan.len());
        Ok(gen.body)
    }

    fn gen_header(&mut self, policy: &PrecisionPolicy) {
        self.body.push_str(HEADER);
        for (guard, ext) in [(Guard::Fp64, policy.fp64), (Guard::Int64, policy.int64)] {
            match (guard, ext) {
                (_, Extension::Guarded) => self.gen_pragma(guard, true),
                // 64-bit integers are core in the full profile
                (Guard::Fp64, Extension::Native) => self.gen_pragma(guard, false),
                _ => {}
            }
        }
    }

    fn gen_pragma(&mut self, guard: Guard, bracketed: bool) {
        writeln!(&mut self.body).unwrap();
        if bracketed {
            writeln!(&mut self.body, "#ifdef {}", guard.extension()).unwrap();
        }
        writeln!(
            &mut self.body,
            "#pragma OPENCL EXTENSION {} : enable",
            guard.extension()
        )
        .unwrap();
        if bracketed {
            writeln!(&mut self.body, "{}", guard.close_directive()).unwrap();
        }
    }

    fn switch_guard(&mut self, guard: Option<Guard>) {
        if self.open_guard == guard {
            return;
        }
        if let Some(open) = self.open_guard.take() {
            writeln!(&mut self.body, "\n{}", open.close_directive()).unwrap();
        }
        if let Some(g) = guard {
            writeln!(&mut self.body, "\n{}", g.open_directive()).unwrap();
        }
        self.open_guard = guard;
    }

    fn gen_record(&mut self, r: &VariantRecord) -> Result<()> {
        self.switch_guard(r.guard);
        let v = r.variant();
        writeln!(
            &mut self.body,
            "\n_CLC_DEF _CLC_OVERLOAD\n{} {}({} x)\n{{",
            v.dst_type_name(),
            r.name,
            v.src_type_name()
        )
        .unwrap();
        if v.rounding != RoundingMode::None {
            self.gen_rounded(&v);
        } else if v.saturate {
            self.gen_saturated(&v)?;
        } else {
            self.gen_default(&v);
        }
        writeln!(&mut self.body, "}}").unwrap();
        Ok(())
    }

    fn gen_default(&mut self, v: &ConversionVariant) {
        let dst = v.dst.name();
        let n = v.width.suffix();
        match (v.width, v.width.half()) {
            (VectorWidth::Scalar, _) => {
                writeln!(&mut self.body, "  return ({})x;", dst).unwrap();
            }
            (VectorWidth::W3, _) => {
                writeln!(
                    &mut self.body,
                    "  return ({dst}3)(convert_{dst}2(x.s01), convert_{dst}(x.s2));",
                    dst = dst
                )
                .unwrap();
            }
            (_, Some(half)) => {
                writeln!(
                    &mut self.body,
                    "  return ({dst}{n})(convert_{dst}{h}(x.lo), convert_{dst}{h}(x.hi));",
                    dst = dst,
                    n = n,
                    h = half.suffix()
                )
                .unwrap();
            }
            (_, None) => unreachable!("every vector width except 3 has a half"),
        }
    }

    fn gen_saturated(&mut self, v: &ConversionVariant) -> Result<()> {
        let src = self.registry.get(v.src)?;
        let dst = self.registry.get(v.dst)?;
        let bounds = self.registry.clamp_bounds(v.dst)?;
        let n = v.width.suffix();

        if v.src == v.dst {
            writeln!(&mut self.body, "  return x;").unwrap();
            return Ok(());
        }

        if src.is_float() {
            // select() wants a signed mask; unsigned destinations bitcast it
            // back after the sign extension.
            let (bp, bs) = if dst.is_unsigned {
                (
                    format!("as_{}{}(convert_{}{}", dst.name, n, dst.bool_result, n),
                    ")",
                )
            } else {
                (format!("convert_{}{}", dst.bool_result, n), "")
            };
            writeln!(
                &mut self.body,
                "  {dst}{n} y = convert_{dst}{n}(x);\n  \
                 y = select(y, ({dst}{n}){min}, {bp}(x <= ({src}{n}){min}){bs});\n  \
                 y = select(y, ({dst}{n}){max}, {bp}(x >= ({src}{n}){max}){bs});\n  \
                 return y;",
                dst = dst.name,
                src = src.name,
                n = n,
                min = bounds.min,
                max = bounds.max,
                bp = bp,
                bs = bs
            )
            .unwrap();
            return Ok(());
        }

        let src_unsigned = self.registry.is_unsigned(v.src)?;
        if src.size_bytes == dst.size_bytes {
            if src_unsigned {
                writeln!(&mut self.body, "  x = min(x, ({}){});", src.name, bounds.max).unwrap();
            } else {
                writeln!(&mut self.body, "  x = max(x, ({})0);", src.name).unwrap();
            }
        } else if src.size_bytes > dst.size_bytes {
            if src_unsigned {
                writeln!(&mut self.body, "  x = min(x, ({}){});", src.name, bounds.max).unwrap();
            } else {
                writeln!(
                    &mut self.body,
                    "  x = clamp(x, ({src}){min}, ({src}){max});",
                    src = src.name,
                    min = bounds.min,
                    max = bounds.max
                )
                .unwrap();
            }
        } else if !src_unsigned && dst.is_unsigned {
            writeln!(&mut self.body, "  x = max(x, ({})0);", src.name).unwrap();
        }
        writeln!(&mut self.body, "  return convert_{}{}(x);", dst.name, n).unwrap();
        Ok(())
    }

    // Floating source, integer destination: round in the source type first,
    // then defer to the truncating conversion.
    fn gen_rounded(&mut self, v: &ConversionVariant) {
        let step = match v.rounding {
            RoundingMode::Rte => Some("rint"),
            RoundingMode::Rtp => Some("ceil"),
            RoundingMode::Rtn => Some("floor"),
            RoundingMode::Rtz | RoundingMode::None => None,
        };
        if let Some(f) = step {
            writeln!(&mut self.body, "  x = {}(x);", f).unwrap();
        }
        writeln!(
            &mut self.body,
            "  return convert_{}{}{}(x);",
            v.dst.name(),
            v.width.suffix(),
            if v.saturate { "_sat" } else { "" }
        )
        .unwrap();
    }
}
