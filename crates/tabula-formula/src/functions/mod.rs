//! Built-in functions and the function registry
//!
//! A function only supplies its signature ([`FunctionDescriptor`]) and the
//! rule for one cell. Arity checks, defaults, error short-circuiting and
//! broadcasting are done once, by the [`Dispatcher`].
//!
//! [`Dispatcher`]: crate::Dispatcher

pub mod info;
pub mod logical;
pub mod math;

use std::sync::Arc;

use ahash::AHashMap;

use crate::value::Value;

/// One formal parameter
#[derive(Debug, Clone)]
pub struct ParamSpec {
    /// Parameter name, for diagnostics
    pub name: &'static str,
    /// Literal used when the argument is omitted; `None` makes it required
    pub default: Option<Value>,
    /// Whether an error in this argument is returned before evaluation
    pub short_circuit: bool,
}

impl ParamSpec {
    /// A required parameter whose errors propagate immediately
    pub fn required(name: &'static str) -> Self {
        Self {
            name,
            default: None,
            short_circuit: true,
        }
    }

    /// An optional parameter with a literal default
    pub fn optional(name: &'static str, default: impl Into<Value>) -> Self {
        Self {
            name,
            default: Some(default.into()),
            short_circuit: true,
        }
    }

    /// Leave errors in this argument to the per-cell rule
    pub fn lazy(mut self) -> Self {
        self.short_circuit = false;
        self
    }

    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }
}

/// Which arguments decide between the scalar path and the array path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifting {
    /// Any array argument triggers broadcasting
    Elementwise,
    /// Only the argument at this index does; the others are handed over
    /// verbatim on the scalar path
    DrivenBy(usize),
}

/// Signature of a function
#[derive(Debug, Clone)]
pub struct FunctionDescriptor {
    /// Function name (uppercase)
    pub name: &'static str,
    /// Formal parameters, required ones first
    pub params: Vec<ParamSpec>,
    pub lifting: Lifting,
}

impl FunctionDescriptor {
    /// # Panics
    ///
    /// Panics if a required parameter follows an optional one, or if a
    /// `DrivenBy` index is out of range.
    pub fn new(name: &'static str, params: Vec<ParamSpec>, lifting: Lifting) -> Self {
        let required = params.iter().take_while(|p| p.is_required()).count();
        assert!(
            params[required..].iter().all(|p| !p.is_required()),
            "{}: required parameters must precede optional ones",
            name
        );
        if let Lifting::DrivenBy(index) = lifting {
            assert!(index < params.len(), "{}: driver index {} out of range", name, index);
        }

        Self {
            name,
            params,
            lifting,
        }
    }

    /// Number of parameters that must be supplied
    pub fn required_count(&self) -> usize {
        self.params.iter().filter(|p| p.is_required()).count()
    }

    /// Largest accepted argument count
    pub fn max_args(&self) -> usize {
        self.params.len()
    }

    /// Whether the argument at `index` can switch the call onto the array path
    pub fn is_driver(&self, index: usize) -> bool {
        match self.lifting {
            Lifting::Elementwise => true,
            Lifting::DrivenBy(driver) => driver == index,
        }
    }
}

/// A function the dispatcher can call
pub trait FormulaFunction: Send + Sync {
    fn descriptor(&self) -> &FunctionDescriptor;

    /// Evaluate one aligned cell
    ///
    /// `args` holds one value per parameter; none of them is an array.
    fn calculate_cell(&self, args: &[Value]) -> Value;

    /// Evaluate a call whose driving arguments are all scalar
    ///
    /// Non-driving arguments may still be arrays here.
    fn calculate_scalar(&self, args: &[Value]) -> Value {
        self.calculate_cell(args)
    }
}

/// Per-cell rule signature
pub type CellRule = fn(&[Value]) -> Value;

/// A function defined by plain rule functions
pub struct BuiltinFunction {
    descriptor: FunctionDescriptor,
    cell: CellRule,
    scalar: Option<CellRule>,
}

impl BuiltinFunction {
    pub fn new(descriptor: FunctionDescriptor, cell: CellRule) -> Self {
        Self {
            descriptor,
            cell,
            scalar: None,
        }
    }

    /// Use a different rule on the scalar path
    pub fn with_scalar_rule(mut self, scalar: CellRule) -> Self {
        self.scalar = Some(scalar);
        self
    }
}

impl FormulaFunction for BuiltinFunction {
    fn descriptor(&self) -> &FunctionDescriptor {
        &self.descriptor
    }

    fn calculate_cell(&self, args: &[Value]) -> Value {
        (self.cell)(args)
    }

    fn calculate_scalar(&self, args: &[Value]) -> Value {
        match self.scalar {
            Some(rule) => rule(args),
            None => (self.cell)(args),
        }
    }
}

/// Function registry
pub struct FunctionRegistry {
    functions: AHashMap<String, Arc<dyn FormulaFunction>>,
}

impl FunctionRegistry {
    /// Create a new registry with all built-in functions
    pub fn new() -> Self {
        let mut registry = Self::empty();

        registry.register_logical_functions();
        registry.register_info_functions();
        registry.register_math_functions();

        registry
    }

    /// Create a registry with no functions
    pub fn empty() -> Self {
        Self {
            functions: AHashMap::new(),
        }
    }

    /// Look up a function by name (case-insensitive)
    pub fn get(&self, name: &str) -> Option<&Arc<dyn FormulaFunction>> {
        self.functions.get(&name.to_uppercase())
    }

    /// Register a function, replacing any earlier one with the same name
    pub fn register(&mut self, function: impl FormulaFunction + 'static) {
        let name = function.descriptor().name.to_uppercase();
        self.functions.insert(name, Arc::new(function));
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.functions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    fn register_logical_functions(&mut self) {
        self.register(logical::if_function());
        self.register(logical::not_function());
        self.register(logical::iferror_function());
        self.register(logical::ifna_function());
        self.register(logical::true_function());
        self.register(logical::false_function());
    }

    fn register_info_functions(&mut self) {
        self.register(info::is_function("ISBLANK", info::is_blank));
        self.register(info::is_function("ISERROR", info::is_error));
        self.register(info::is_function("ISERR", info::is_err));
        self.register(info::is_function("ISNA", info::is_na));
        self.register(info::is_function("ISNUMBER", info::is_number));
        self.register(info::is_function("ISTEXT", info::is_text));
        self.register(info::is_function("ISLOGICAL", info::is_logical));
        self.register(info::na_function());
    }

    fn register_math_functions(&mut self) {
        self.register(math::unary("ABS", math::abs));
        self.register(math::unary("SIGN", math::sign));
        self.register(math::unary("INT", math::int));
        self.register(math::round_function());
        self.register(math::binary("MOD", "divisor", math::modulo));
        self.register(math::binary("POWER", "power", math::power));
    }
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_registry_lookup_is_case_insensitive() {
        let registry = FunctionRegistry::new();
        assert!(registry.get("if").is_some());
        assert!(registry.get("IsNumber").is_some());
        assert!(registry.get("NOPE").is_none());
    }

    #[test]
    fn test_registry_contents() {
        let registry = FunctionRegistry::new();
        assert_eq!(
            registry.names(),
            vec![
                "ABS", "FALSE", "IF", "IFERROR", "IFNA", "INT", "ISBLANK", "ISERR", "ISERROR",
                "ISLOGICAL", "ISNA", "ISNUMBER", "ISTEXT", "MOD", "NA", "NOT", "POWER", "ROUND",
                "SIGN", "TRUE",
            ]
        );
        assert!(FunctionRegistry::empty().is_empty());
    }

    #[test]
    fn test_register_replaces() {
        fn always_one(_: &[Value]) -> Value {
            Value::from(1.0)
        }

        let mut registry = FunctionRegistry::new();
        let before = registry.len();
        registry.register(BuiltinFunction::new(
            FunctionDescriptor::new("abs", vec![ParamSpec::required("number")], Lifting::Elementwise),
            always_one,
        ));

        assert_eq!(registry.len(), before);
        let abs = registry.get("ABS").unwrap();
        assert_eq!(abs.calculate_cell(&[Value::from(-5.0)]), Value::from(1.0));
    }

    #[test]
    fn test_descriptor_counts() {
        let descriptor = FunctionDescriptor::new(
            "ROUND",
            vec![ParamSpec::required("number"), ParamSpec::optional("num_digits", 0.0)],
            Lifting::Elementwise,
        );
        assert_eq!(descriptor.required_count(), 1);
        assert_eq!(descriptor.max_args(), 2);
        assert!(descriptor.is_driver(1));

        let descriptor = FunctionDescriptor::new(
            "PICK",
            vec![ParamSpec::required("a"), ParamSpec::required("b")],
            Lifting::DrivenBy(0),
        );
        assert!(descriptor.is_driver(0));
        assert!(!descriptor.is_driver(1));
    }

    #[test]
    #[should_panic(expected = "required parameters must precede optional ones")]
    fn test_descriptor_rejects_required_after_optional() {
        FunctionDescriptor::new(
            "BAD",
            vec![ParamSpec::optional("a", 1.0), ParamSpec::required("b")],
            Lifting::Elementwise,
        );
    }
}
