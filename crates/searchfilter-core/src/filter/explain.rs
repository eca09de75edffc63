use crate::filter::{FilterNode, GranularRangeFilter};
use std::fmt::{self, Write};

// Render term bytes as text when they are printable UTF-8, otherwise as hex.
fn write_term(f: &mut fmt::Formatter<'_>, term: &[u8]) -> fmt::Result {
    match std::str::from_utf8(term) {
        Ok(text) if text.chars().all(|c| !c.is_control()) => write!(f, "{text:?}"),
        _ => {
            f.write_str("0x")?;
            for byte in term {
                write!(f, "{byte:02x}")?;
            }
            Ok(())
        }
    }
}

fn write_range(f: &mut fmt::Formatter<'_>, range: &GranularRangeFilter) -> fmt::Result {
    let open = if range.min_inclusive { '[' } else { '(' };
    let close = if range.max_inclusive { ']' } else { ')' };
    write!(
        f,
        "RANGE({} in {open}{}, {}{close}, boost={})",
        range.field, range.min, range.max, range.boost
    )
}

impl FilterNode {
    fn write_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        for _ in 0..depth {
            f.write_str("  ")?;
        }

        match self {
            Self::Term(term) => {
                write!(f, "TERM({} = ", term.field)?;
                write_term(f, &term.term)?;
                write!(f, ", boost={})", term.boost)?;
            }
            Self::GranularRange(range) => write_range(f, range)?,
            Self::Or { boost, .. } => write!(f, "OR(boost={boost})")?,
            Self::Not(_) => f.write_str("NOT")?,
            Self::Expression(expr) => {
                write!(f, "EXPRESSION({}, boost={})", expr.node(), expr.boost())?;
            }
            Self::Empty => f.write_str("EMPTY")?,
            Self::All { boost } => write!(f, "ALL(boost={boost})")?,
        }

        for child in self.children() {
            f.write_char('\n')?;
            child.write_indented(f, depth + 1)?;
        }
        Ok(())
    }
}

/// Indented one-node-per-line tree rendering.
impl fmt::Display for FilterNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_indented(f, 0)
    }
}
