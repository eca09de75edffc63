use crate::{
    encode::decode_full_precision,
    expr::{EvalError, Evaluator, ScanContext},
    filter::{ExpressionFilter, FilterNode},
    index::IndexedDocument,
    value::to_bool,
};

impl FilterNode {
    /// Whether `document` passes this filter.
    ///
    /// Only `Expression` leaves can fail; every leaf first checks the scan
    /// for cancellation.
    pub fn matches(
        &self,
        document: &IndexedDocument,
        scan: &ScanContext,
    ) -> Result<bool, EvalError> {
        match self {
            Self::Term(term) => {
                scan.check()?;
                Ok(document.has_term(&term.field, &term.term))
            }
            Self::GranularRange(range) => {
                scan.check()?;
                Ok(document
                    .terms(&range.field)
                    .filter_map(decode_full_precision)
                    .any(|value| range.contains(value)))
            }
            Self::Or { children, .. } => {
                for child in children {
                    if child.matches(document, scan)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
            Self::Not(child) => Ok(!child.matches(document, scan)?),
            Self::Expression(expr) => {
                scan.check()?;
                expr.matches(document, scan)
            }
            Self::Empty => Ok(false),
            Self::All { .. } => Ok(true),
        }
    }
}

impl ExpressionFilter {
    /// Evaluate the wrapped expression with the variable bound to the
    /// document source. Nothing is cached between documents.
    pub fn matches(
        &self,
        document: &IndexedDocument,
        scan: &ScanContext,
    ) -> Result<bool, EvalError> {
        let value = Evaluator::new(&self.functions, &self.bindings)
            .with_current(self.variable, document.source())
            .with_scan(scan)
            .evaluate(&self.node)
            .inspect_err(|err| tracing::debug!(error = %err, "expression filter failed"))?;

        Ok(to_bool(&value))
    }
}
