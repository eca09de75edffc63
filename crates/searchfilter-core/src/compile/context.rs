use crate::{
    analyzer::{Analyzer, AnalyzerCache, AnalyzerProvider},
    ast::{Variable, VariableId},
    error::CompileError,
    expr::{Bindings, Evaluator, FunctionRegistry},
    filter::Boost,
    options::CompileOptions,
};
use std::{fmt, sync::Arc};

///
/// CompileMode
///
/// `Probe` answers "would this compile?" without evaluating anything that
/// depends on bindings; `Build` produces the filter tree.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum CompileMode {
    #[default]
    Build,
    Probe,
}

///
/// QueryContext
///
/// Everything the compiler reads from the surrounding query.
///

#[derive(Clone)]
pub struct QueryContext {
    pub variable: Variable,
    pub bindings: Arc<Bindings>,
    pub functions: Arc<FunctionRegistry>,
    pub analyzers: Arc<dyn AnalyzerProvider>,
    pub options: CompileOptions,
}

impl QueryContext {
    /// Context filtering `variable` with no bindings, builtin functions and
    /// a fresh analyzer cache.
    #[must_use]
    pub fn new(variable: Variable) -> Self {
        Self {
            variable,
            bindings: Arc::new(Bindings::new()),
            functions: Arc::new(FunctionRegistry::default()),
            analyzers: Arc::new(AnalyzerCache::new()),
            options: CompileOptions::default(),
        }
    }

    #[must_use]
    pub fn with_bindings(mut self, bindings: Bindings) -> Self {
        self.bindings = Arc::new(bindings);
        self
    }

    #[must_use]
    pub fn with_functions(mut self, functions: FunctionRegistry) -> Self {
        self.functions = Arc::new(functions);
        self
    }

    #[must_use]
    pub fn with_analyzers(mut self, analyzers: Arc<dyn AnalyzerProvider>) -> Self {
        self.analyzers = analyzers;
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: CompileOptions) -> Self {
        self.options = options;
        self
    }

    pub(crate) fn evaluator(&self) -> Evaluator<'_> {
        Evaluator::new(&self.functions, &self.bindings)
    }
}

impl fmt::Debug for QueryContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryContext")
            .field("variable", &self.variable)
            .field("bindings", &self.bindings.len())
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

///
/// CompileContext
///
/// Immutable per-subtree settings. Wrappers derive new contexts; the parent
/// is never modified.
///

#[derive(Clone, Debug)]
pub struct CompileContext {
    pub boost: Boost,
    pub analyzer: Arc<dyn Analyzer>,
    pub filtered_variable: VariableId,
}

impl CompileContext {
    pub fn root(query: &QueryContext) -> Result<Self, CompileError> {
        Ok(Self {
            boost: Boost::new(query.options.default_boost),
            analyzer: query.analyzers.get(&query.options.default_analyzer)?,
            filtered_variable: query.variable.id,
        })
    }

    #[must_use]
    pub fn with_boost_factor(&self, factor: f32) -> Self {
        Self {
            boost: self.boost * factor,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_analyzer(&self, analyzer: Arc<dyn Analyzer>) -> Self {
        Self {
            analyzer,
            ..self.clone()
        }
    }

    /// Context for the children of a disjunction: the boost stays on the
    /// disjunction itself.
    #[must_use]
    pub fn child(&self) -> Self {
        Self {
            boost: Boost::NONE,
            ..self.clone()
        }
    }
}
