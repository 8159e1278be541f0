use arch::inst::Inst;
use color_print::cformat;
use indexmap::IndexMap;
use std::io::{self, Write};

use crate::codegen::Assembled;
use crate::label::Literal;

const BIN_WIDTH: usize = 26;

/// Write the data labels and an annotated listing of the emitted program
pub fn print_dump<W: Write>(
    out: &mut W,
    path: &str,
    source: &str,
    assembled: &Assembled,
) -> io::Result<()> {
    let rule = "-".repeat(BIN_WIDTH + 9);

    if assembled.labels.data().next().is_some() {
        writeln!(out, "{}+------[readonly]", rule)?;
        for (name, value) in assembled.labels.data() {
            let value = match value {
                Literal::Int(v) => format!("{}", v),
                Literal::Double(v) => format!("{:.6}", v),
                Literal::Text(s) => format!("\"{}\"", s),
            };
            writeln!(out, "{:w$}| {}", "", cformat!("<c>{}</> = <y>{}</>", name, value), w = rule.len())?;
        }
    }

    // line -> addresses of the instructions it emitted
    let mut lines: IndexMap<usize, Vec<usize>> = IndexMap::new();
    for (pc, line) in &assembled.origins {
        lines.entry(*line).or_default().push(*pc);
    }

    writeln!(out, "{}+------[{}]", rule, path)?;
    for (idx, raw) in source.lines().enumerate() {
        let line_num = idx + 1;
        let Some(pcs) = lines.get(&line_num) else {
            writeln!(out, "{:w$}| {:>4}: {}", "", line_num, raw, w = rule.len())?;
            continue;
        };
        for pc in pcs {
            for label in assembled.labels.at(*pc) {
                writeln!(out, "{:w$}| {}", "", cformat!("<g>{}:</>", label), w = rule.len())?;
            }
            let body = match Inst::decode(&assembled.program, *pc) {
                Ok(inst) => {
                    let bin = inst
                        .to_bin()
                        .iter()
                        .map(|b| format!("{:02X}", b))
                        .collect::<Vec<_>>()
                        .join(" ");
                    format!("{:<w$} | {:>4}:   {}", bin, line_num, inst.cformat(), w = BIN_WIDTH)
                }
                Err(_) => cformat!("<r,s>{:<w$}</> | {:>4}: {}", "!!", line_num, raw, w = BIN_WIDTH),
            };
            writeln!(out, "[{:04X}] {}", pc, body)?;
        }
    }
    writeln!(out, "{}+{}", rule, "-".repeat(24))
}
