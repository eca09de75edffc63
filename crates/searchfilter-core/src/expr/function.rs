use crate::{
    expr::EvalError,
    value::{Value, to_bool, to_number},
};
use std::{collections::HashMap, fmt, sync::Arc};

/// Function body: receives already-evaluated arguments.
pub type FunctionImpl = Arc<dyn Fn(&[Value]) -> Result<Value, EvalError> + Send + Sync>;

///
/// Function
///
/// A callable registered under an upper-case name. Non-deterministic
/// functions are never evaluated at compile time.
///

#[derive(Clone)]
pub struct Function {
    name: String,
    deterministic: bool,
    min_args: usize,
    max_args: Option<usize>,
    body: FunctionImpl,
}

impl Function {
    pub fn new(
        name: impl Into<String>,
        deterministic: bool,
        min_args: usize,
        max_args: Option<usize>,
        body: impl Fn(&[Value]) -> Result<Value, EvalError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            deterministic,
            min_args,
            max_args,
            body: Arc::new(body),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn is_deterministic(&self) -> bool {
        self.deterministic
    }

    pub fn invoke(&self, args: &[Value]) -> Result<Value, EvalError> {
        let too_few = args.len() < self.min_args;
        let too_many = self.max_args.is_some_and(|max| args.len() > max);
        if too_few || too_many {
            let expected = match self.max_args {
                Some(max) if max == self.min_args => max.to_string(),
                Some(max) => format!("{}..{max}", self.min_args),
                None => format!("at least {}", self.min_args),
            };
            return Err(EvalError::ArgumentCount {
                function: self.name.clone(),
                expected,
                actual: args.len(),
            });
        }

        (self.body)(args)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("name", &self.name)
            .field("deterministic", &self.deterministic)
            .finish_non_exhaustive()
    }
}

///
/// FunctionRegistry
///
/// Case-insensitive function table. `Default` yields the builtin set.
///

#[derive(Clone, Debug)]
pub struct FunctionRegistry {
    functions: HashMap<String, Function>,
}

impl FunctionRegistry {
    /// Registry with no functions at all.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            functions: HashMap::new(),
        }
    }

    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        for function in builtins() {
            registry.register(function);
        }
        registry
    }

    /// Register or replace a function.
    pub fn register(&mut self, function: Function) {
        self.functions.insert(function.name.clone(), function);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Function> {
        self.functions.get(&name.to_ascii_uppercase())
    }

    pub fn resolve(&self, name: &str) -> Result<&Function, EvalError> {
        self.get(name).ok_or_else(|| EvalError::UnknownFunction {
            name: name.to_string(),
        })
    }
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

fn builtins() -> Vec<Function> {
    vec![
        Function::new("RAND", false, 0, Some(0), |_| {
            Ok(Value::Number(rand::random::<f64>()))
        }),
        Function::new("NOOPT", true, 1, Some(1), |args| Ok(args[0].clone())),
        Function::new("TO_BOOL", true, 1, Some(1), |args| {
            Ok(Value::Bool(to_bool(&args[0])))
        }),
        Function::new("TO_NUMBER", true, 1, Some(1), |args| {
            Ok(Value::Number(to_number(&args[0])))
        }),
        Function::new("TO_STRING", true, 1, Some(1), |args| {
            Ok(Value::String(stringify(&args[0])))
        }),
        Function::new("CONCAT", true, 0, None, |args| {
            Ok(Value::String(args.iter().map(stringify).collect()))
        }),
        Function::new("LOWER", true, 1, Some(1), |args| {
            Ok(Value::String(stringify(&args[0]).to_lowercase()))
        }),
        Function::new("UPPER", true, 1, Some(1), |args| {
            Ok(Value::String(stringify(&args[0]).to_uppercase()))
        }),
        Function::new("LENGTH", true, 1, Some(1), |args| {
            #[expect(clippy::cast_precision_loss)]
            let len = match &args[0] {
                Value::Null => 0,
                Value::Bool(b) => usize::from(*b),
                Value::Number(n) => stringify(&Value::Number(*n)).chars().count(),
                Value::String(s) => s.chars().count(),
                Value::Object(entries) => entries.len(),
                other => other.sequence_len(),
            } as f64;
            Ok(Value::Number(len))
        }),
    ]
}

// Strings stringify without quotes, null to the empty string, the rest as JSON.
fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
