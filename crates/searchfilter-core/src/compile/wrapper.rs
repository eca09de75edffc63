//! `ANALYZER(expr, name)` and `BOOST(expr, factor)`.

use crate::{
    ast::AstNode,
    compile::{CompileContext, Compiler},
    error::CompileError,
    filter::FilterNode,
    value::Value,
};

const ANALYZER: &str = "ANALYZER";
const BOOST: &str = "BOOST";

pub(crate) fn is_analyzer(name: &str) -> bool {
    name.eq_ignore_ascii_case(ANALYZER)
}

pub(crate) fn is_boost(name: &str) -> bool {
    name.eq_ignore_ascii_case(BOOST)
}

impl Compiler<'_> {
    pub(crate) fn compile_analyzer(
        &self,
        args: &[AstNode],
        ctx: &CompileContext,
    ) -> Result<FilterNode, CompileError> {
        let (inner, argument) = Self::wrapper_args(ANALYZER, args)?;

        let analyzer = match self.wrapper_value(ANALYZER, argument)? {
            Some(Value::String(name)) => self.query.analyzers.get(&name)?,
            Some(other) => {
                return Err(CompileError::InvalidArgument {
                    function: ANALYZER,
                    position: 2,
                    reason: format!("expected analyzer name as string, got {}", other.tag()),
                });
            }
            None => ctx.analyzer.clone(),
        };

        self.compile_node(inner, &ctx.with_analyzer(analyzer))
    }

    #[expect(clippy::cast_possible_truncation)]
    pub(crate) fn compile_boost(
        &self,
        args: &[AstNode],
        ctx: &CompileContext,
    ) -> Result<FilterNode, CompileError> {
        let (inner, argument) = Self::wrapper_args(BOOST, args)?;

        let factor = match self.wrapper_value(BOOST, argument)? {
            Some(Value::Number(factor)) => factor as f32,
            Some(other) => {
                return Err(CompileError::InvalidArgument {
                    function: BOOST,
                    position: 2,
                    reason: format!("expected number, got {}", other.tag()),
                });
            }
            None => 1.0,
        };

        self.compile_node(inner, &ctx.with_boost_factor(factor))
    }

    fn wrapper_args<'n>(
        function: &'static str,
        args: &'n [AstNode],
    ) -> Result<(&'n AstNode, &'n AstNode), CompileError> {
        match args {
            [inner, argument] => Ok((inner, argument)),
            _ => Err(CompileError::MalformedNode {
                node: function,
                reason: format!("expected 2 arguments, got {}", args.len()),
            }),
        }
    }

    // The setting argument must be decidable at compile time.
    fn wrapper_value(
        &self,
        function: &'static str,
        argument: &AstNode,
    ) -> Result<Option<Value>, CompileError> {
        if !self.classifier.is_deterministic(argument)?
            || argument.references(self.query.variable.id)
        {
            return Err(CompileError::unsupported(format!(
                "second argument of {function} must be a constant expression, got '{argument}'"
            )));
        }

        self.value_of(argument)
    }
}
