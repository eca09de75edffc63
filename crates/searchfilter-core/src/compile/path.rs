use crate::{
    ast::{AstNode, VariableId},
    compile::CompileMode,
    error::CompileError,
    expr::Evaluator,
    value::{Value, to_int64},
};
use std::fmt;

///
/// PathSegment
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PathSegment {
    Name(String),
    Offset(i64),
    /// Dynamic segment left unevaluated while probing.
    Unresolved,
}

///
/// AttributePath
///
/// Attribute path rooted at the filtered variable, e.g. `a.b[4].c`.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct AttributePath {
    segments: Vec<PathSegment>,
}

impl AttributePath {
    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }
}

impl fmt::Display for AttributePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Name(name) => {
                    if i > 0 {
                        f.write_str(".")?;
                    }
                    f.write_str(name)?;
                }
                PathSegment::Offset(offset) => write!(f, "[{offset}]")?,
                PathSegment::Unresolved => f.write_str("[?]")?,
            }
        }
        Ok(())
    }
}

///
/// PathResolver
///
/// Turns `d.a[x].b` chains into attribute paths, evaluating dynamic
/// segments once.
///

#[derive(Clone, Copy, Debug)]
pub struct PathResolver<'a> {
    variable: VariableId,
    evaluator: Evaluator<'a>,
    mode: CompileMode,
}

impl<'a> PathResolver<'a> {
    #[must_use]
    pub const fn new(variable: VariableId, evaluator: Evaluator<'a>, mode: CompileMode) -> Self {
        Self {
            variable,
            evaluator,
            mode,
        }
    }

    /// Whether `node` is a non-empty access chain rooted at the filtered
    /// variable whose dynamic segments do not read the variable themselves.
    /// Expansions (`[*]`) never qualify.
    #[must_use]
    pub fn is_attribute_access(&self, node: &AstNode) -> bool {
        let mut current = node;
        let mut depth = 0usize;

        loop {
            match current {
                AstNode::AttributeAccess { object, .. } => current = object.as_ref(),
                AstNode::IndexedAccess { object, index } => {
                    if index.references(self.variable) {
                        return false;
                    }
                    current = object.as_ref();
                }
                AstNode::Reference(variable) => return depth > 0 && variable.id == self.variable,
                _ => return false,
            }
            depth += 1;
        }
    }

    /// Resolve an attribute access chain.
    ///
    /// Callers check [`Self::is_attribute_access`] first; anything else is
    /// reported as unsupported.
    pub fn resolve(&self, node: &AstNode) -> Result<AttributePath, CompileError> {
        if !self.is_attribute_access(node) {
            return Err(CompileError::unsupported(format!(
                "'{node}' is not an attribute access"
            )));
        }

        // collect segments leaf-first, then flip to root-first
        let mut pending = Vec::new();
        let mut current = node;
        while let AstNode::AttributeAccess { object, .. } | AstNode::IndexedAccess { object, .. } =
            current
        {
            pending.push(current);
            current = object.as_ref();
        }
        pending.reverse();

        let segments = pending
            .into_iter()
            .enumerate()
            .map(|(position, access)| self.segment(position, access))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(AttributePath { segments })
    }

    fn segment(&self, position: usize, access: &AstNode) -> Result<PathSegment, CompileError> {
        let index = match access {
            AstNode::AttributeAccess { name, .. } => return Ok(PathSegment::Name(name.clone())),
            AstNode::IndexedAccess { index, .. } => index,
            _ => return Err(CompileError::unsupported("malformed attribute access chain")),
        };

        // literal segments never need the bindings, so probing resolves them too
        let value = match (index.as_ref(), self.mode) {
            (AstNode::Value(value), _) => value.clone(),
            (_, CompileMode::Probe) => return Ok(PathSegment::Unresolved),
            (_, CompileMode::Build) => self.evaluator.evaluate(index)?,
        };

        match value {
            Value::String(name) => Ok(PathSegment::Name(name)),
            Value::Number(_) => Ok(PathSegment::Offset(to_int64(&value))),
            _ if self.mode == CompileMode::Probe => Ok(PathSegment::Unresolved),
            other => Err(CompileError::InvalidDynamicSegmentType {
                segment: position,
                found: other.tag(),
            }),
        }
    }
}
