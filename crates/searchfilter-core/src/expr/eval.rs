use crate::{
    ast::{AstNode, BinaryOp, UnaryOp, VariableId},
    expr::{Bindings, EvalError, FunctionRegistry, ScanContext},
    value::{Range, Value, compare, contains, to_bool, to_int64, to_number},
};
use std::cmp::Ordering;

///
/// Evaluator
///
/// Evaluates an expression tree against bound variables and, optionally,
/// the document currently being scanned.
///

#[derive(Clone, Copy, Debug)]
pub struct Evaluator<'a> {
    functions: &'a FunctionRegistry,
    bindings: &'a Bindings,
    current: Option<(VariableId, &'a Value)>,
    scan: Option<&'a ScanContext>,
}

impl<'a> Evaluator<'a> {
    #[must_use]
    pub const fn new(functions: &'a FunctionRegistry, bindings: &'a Bindings) -> Self {
        Self {
            functions,
            bindings,
            current: None,
            scan: None,
        }
    }

    /// Bind the scanned document to `variable` for this evaluation.
    #[must_use]
    pub const fn with_current(mut self, variable: VariableId, document: &'a Value) -> Self {
        self.current = Some((variable, document));
        self
    }

    #[must_use]
    pub const fn with_scan(mut self, scan: &'a ScanContext) -> Self {
        self.scan = Some(scan);
        self
    }

    fn check(&self) -> Result<(), EvalError> {
        self.scan.map_or(Ok(()), ScanContext::check)
    }

    pub fn evaluate(&self, node: &AstNode) -> Result<Value, EvalError> {
        match node {
            AstNode::Value(value) => Ok(value.clone()),
            AstNode::Array(items) => {
                let mut out = Vec::with_capacity(items.len());
                for item in items {
                    self.check()?;
                    out.push(self.evaluate(item)?);
                }
                Ok(Value::Array(out))
            }
            AstNode::Object(entries) => entries
                .iter()
                .map(|(key, value)| Ok((key.clone(), self.evaluate(value)?)))
                .collect::<Result<Vec<_>, EvalError>>()
                .map(Value::Object),
            AstNode::Range { low, high } => {
                let low = to_int64(&self.evaluate(low)?);
                let high = to_int64(&self.evaluate(high)?);
                Ok(Value::Range(Range::new(low, high)))
            }
            AstNode::Reference(variable) => match self.current {
                Some((id, document)) if id == variable.id => Ok(document.clone()),
                _ => self.bindings.get(variable.id).cloned().ok_or_else(|| {
                    EvalError::UnboundVariable {
                        name: variable.name.clone(),
                    }
                }),
            },
            AstNode::AttributeAccess { object, name } => {
                let object = self.evaluate(object)?;
                Ok(object.get(name).cloned().unwrap_or(Value::Null))
            }
            AstNode::IndexedAccess { object, index } => {
                let object = self.evaluate(object)?;
                let index = self.evaluate(index)?;
                Ok(Self::index(&object, &index))
            }
            AstNode::Expansion { object } => match self.evaluate(object)? {
                array @ Value::Array(_) => Ok(array),
                Value::Range(range) => self.expand_range(range),
                _ => Ok(Value::Array(Vec::new())),
            },
            AstNode::Unary { op, operand } => {
                let operand = self.evaluate(operand)?;
                Ok(match op {
                    UnaryOp::Not => Value::Bool(!to_bool(&operand)),
                    UnaryOp::Minus => number(-to_number(&operand)),
                    UnaryOp::Plus => number(to_number(&operand)),
                })
            }
            AstNode::Binary { op, lhs, rhs } => self.binary(*op, lhs, rhs),
            AstNode::Call { name, args } => {
                self.check()?;
                let function = self.functions.resolve(name)?;
                let args = args
                    .iter()
                    .map(|arg| self.evaluate(arg))
                    .collect::<Result<Vec<_>, _>>()?;
                function.invoke(&args)
            }
        }
    }

    fn binary(&self, op: BinaryOp, lhs: &AstNode, rhs: &AstNode) -> Result<Value, EvalError> {
        // logical operators short-circuit and yield an operand
        match op {
            BinaryOp::And => {
                let left = self.evaluate(lhs)?;
                return if to_bool(&left) { self.evaluate(rhs) } else { Ok(left) };
            }
            BinaryOp::Or => {
                let left = self.evaluate(lhs)?;
                return if to_bool(&left) { Ok(left) } else { self.evaluate(rhs) };
            }
            _ => {}
        }

        let left = self.evaluate(lhs)?;
        let right = self.evaluate(rhs)?;

        Ok(match op {
            BinaryOp::Eq => Value::Bool(compare(&left, &right) == Ordering::Equal),
            BinaryOp::Ne => Value::Bool(compare(&left, &right) != Ordering::Equal),
            BinaryOp::Lt => Value::Bool(compare(&left, &right) == Ordering::Less),
            BinaryOp::Lte => Value::Bool(compare(&left, &right) != Ordering::Greater),
            BinaryOp::Gt => Value::Bool(compare(&left, &right) == Ordering::Greater),
            BinaryOp::Gte => Value::Bool(compare(&left, &right) != Ordering::Less),
            BinaryOp::In => Value::Bool(contains(&right, &left)),
            BinaryOp::NotIn => Value::Bool(!contains(&right, &left)),
            BinaryOp::Add => number(to_number(&left) + to_number(&right)),
            BinaryOp::Sub => number(to_number(&left) - to_number(&right)),
            BinaryOp::Mul => number(to_number(&left) * to_number(&right)),
            BinaryOp::Div => divide(to_number(&left), to_number(&right), |a, b| a / b),
            BinaryOp::Mod => divide(to_number(&left), to_number(&right), |a, b| a % b),
            BinaryOp::And | BinaryOp::Or => {
                unreachable!("logical arm must short-circuit before operand evaluation")
            }
        })
    }

    fn expand_range(&self, range: Range) -> Result<Value, EvalError> {
        if !range.is_expandable() {
            return Err(EvalError::ExpansionTooLarge {
                range,
                len: range.len(),
                limit: Range::EXPANSION_LIMIT,
            });
        }

        let members = Value::Range(range);
        let mut out = Vec::new();
        for index in 0..members.sequence_len() {
            self.check()?;
            out.extend(members.sequence_get(index));
        }

        Ok(Value::Array(out))
    }

    fn index(object: &Value, index: &Value) -> Value {
        match (object, index) {
            (Value::Object(_), Value::String(name)) => {
                object.get(name).cloned().unwrap_or(Value::Null)
            }
            (Value::Array(_) | Value::Range(_), Value::Number(_)) => {
                object.at(to_int64(index)).unwrap_or(Value::Null)
            }
            _ => Value::Null,
        }
    }
}

// Arithmetic never yields NaN or infinity; those become null.
fn number(n: f64) -> Value {
    if n.is_finite() { Value::Number(n) } else { Value::Null }
}

fn divide(lhs: f64, rhs: f64, op: impl Fn(f64, f64) -> f64) -> Value {
    if rhs == 0.0 { Value::Null } else { number(op(lhs, rhs)) }
}
