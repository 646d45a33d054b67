//! Function dispatch
//!
//! Every call goes through the same steps:
//!
//! 1. bind arguments, filling defaults (a missing required argument is `#N/A`);
//! 2. return the first error among short-circuiting parameters;
//! 3. replace 1×1 driving arguments with their only cell;
//! 4. if no driving argument is an array, run the function's scalar rule once;
//! 5. otherwise broadcast every argument to the common shape and run the
//!    per-cell rule on each aligned cell.
//!
//! Only step 4 and 5's rules differ between functions.

use std::sync::OnceLock;

use tabula_core::ErrorKind;

use crate::broadcast;
use crate::error::{FormulaError, FormulaResult};
use crate::functions::{FormulaFunction, FunctionDescriptor, FunctionRegistry};
use crate::settings::EvaluationSettings;
use crate::value::{ArrayValue, Value};

/// Global dispatcher with the built-in registry and default settings
static GLOBAL_DISPATCHER: OnceLock<Dispatcher> = OnceLock::new();

/// Evaluates function calls over already-resolved argument values
pub struct Dispatcher {
    registry: FunctionRegistry,
    settings: EvaluationSettings,
}

impl Dispatcher {
    /// Create a dispatcher with the built-in functions and default settings
    pub fn new() -> Self {
        Self {
            registry: FunctionRegistry::new(),
            settings: EvaluationSettings::default(),
        }
    }

    /// The shared default dispatcher
    pub fn global() -> &'static Dispatcher {
        GLOBAL_DISPATCHER.get_or_init(Dispatcher::new)
    }

    pub fn with_settings(mut self, settings: EvaluationSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_registry(mut self, registry: FunctionRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn settings(&self) -> &EvaluationSettings {
        &self.settings
    }

    pub fn registry(&self) -> &FunctionRegistry {
        &self.registry
    }

    /// Mutable access to the registry, for registering host functions
    pub fn registry_mut(&mut self) -> &mut FunctionRegistry {
        &mut self.registry
    }

    /// Call a function by name with every argument supplied
    pub fn call(&self, name: &str, args: &[Value]) -> FormulaResult<Value> {
        let args: Vec<Option<Value>> = args.iter().cloned().map(Some).collect();
        self.call_with(name, &args)
    }

    /// Call a function by name; `None` marks an omitted argument, as in
    /// `IF(A1,,3)`
    pub fn call_with(&self, name: &str, args: &[Option<Value>]) -> FormulaResult<Value> {
        let function = self.registry.get(name).ok_or_else(|| {
            tracing::debug!("Unknown function: {}", name);
            FormulaError::UnknownFunction(name.to_string())
        })?;
        self.invoke(&**function, args)
    }

    /// Call a function that is not necessarily registered
    pub fn invoke(
        &self,
        function: &dyn FormulaFunction,
        args: &[Option<Value>],
    ) -> FormulaResult<Value> {
        let descriptor = function.descriptor();

        if args.len() > descriptor.max_args() {
            tracing::debug!(
                "{}: rejected call with {} arguments",
                descriptor.name,
                args.len()
            );
            return Err(FormulaError::ArgumentCount {
                function: descriptor.name.to_string(),
                expected: expected_arguments(descriptor),
                actual: args.len(),
            });
        }

        let mut bound = match bind_arguments(descriptor, args) {
            Some(bound) => bound,
            None => {
                tracing::trace!("{}: required argument missing", descriptor.name);
                return Ok(Value::na());
            }
        };

        // Errors are terminal; hand back the first one untouched
        for (param, value) in descriptor.params.iter().zip(&bound) {
            if param.short_circuit && value.is_error() {
                tracing::trace!("{}: short-circuit on {}", descriptor.name, param.name);
                return Ok(value.clone());
            }
        }

        for (index, value) in bound.iter_mut().enumerate() {
            if descriptor.is_driver(index) {
                *value = std::mem::take(value).unwrap_singleton();
            }
        }

        let array_path = bound
            .iter()
            .enumerate()
            .any(|(index, value)| descriptor.is_driver(index) && value.is_array());

        if !array_path {
            tracing::trace!("{}: scalar path, {} arguments", descriptor.name, args.len());
            return Ok(function.calculate_scalar(&bound));
        }

        Ok(self.broadcast_call(function, &bound))
    }

    /// Align every argument to the common shape and run the per-cell rule
    fn broadcast_call(&self, function: &dyn FormulaFunction, args: &[Value]) -> Value {
        let name = function.descriptor().name;
        let target = broadcast::target_shape(args);

        let within_limit = target
            .checked_cell_count()
            .is_some_and(|cells| cells <= self.settings.max_array_cells);
        if !within_limit {
            tracing::debug!(
                "{}: {} result exceeds the {} cell limit",
                name,
                target,
                self.settings.max_array_cells
            );
            return Value::error(ErrorKind::Spill);
        }

        tracing::trace!("{}: array path, {} arguments, {}", name, args.len(), target);

        let fill = Value::na();
        let (target, expanded) = broadcast::expand_all(args, &fill, self.settings.expansion);

        let mut cell_args = vec![Value::null(); args.len()];
        let result = ArrayValue::from_fn(target, |row, col| {
            for (slot, grid) in cell_args.iter_mut().zip(&expanded) {
                *slot = grid.get(row, col);
            }
            function.calculate_cell(&cell_args)
        });

        Value::Array(result)
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Positional binding with defaults; `None` if a required argument is absent
fn bind_arguments(descriptor: &FunctionDescriptor, args: &[Option<Value>]) -> Option<Vec<Value>> {
    descriptor
        .params
        .iter()
        .enumerate()
        .map(|(index, param)| match args.get(index) {
            Some(Some(value)) => Some(value.clone()),
            _ => param.default.clone(),
        })
        .collect()
}

fn expected_arguments(descriptor: &FunctionDescriptor) -> String {
    let (min, max) = (descriptor.required_count(), descriptor.max_args());
    if min == max {
        min.to_string()
    } else {
        format!("{} to {}", min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::functions::{BuiltinFunction, Lifting, ParamSpec};
    use crate::settings::ExpansionMode;
    use crate::value::ErrorValue;
    use pretty_assertions::assert_eq;

    fn array(rows: Vec<Vec<Value>>) -> Value {
        ArrayValue::from_rows(rows).unwrap().into()
    }

    #[test]
    fn test_unknown_function() {
        let dispatcher = Dispatcher::new();
        assert_eq!(
            dispatcher.call("NOSUCH", &[]),
            Err(FormulaError::UnknownFunction("NOSUCH".into()))
        );
    }

    #[test]
    fn test_too_many_arguments() {
        let dispatcher = Dispatcher::new();
        let result = dispatcher.call("IF", &[true.into(), 1.0.into(), 2.0.into(), 3.0.into()]);
        assert_eq!(
            result,
            Err(FormulaError::ArgumentCount {
                function: "IF".into(),
                expected: "2 to 3".into(),
                actual: 4,
            })
        );
    }

    #[test]
    fn test_missing_required_argument_is_na() {
        let dispatcher = Dispatcher::new();
        assert_eq!(dispatcher.call("IF", &[true.into()]).unwrap(), Value::na());
        assert_eq!(
            dispatcher
                .call_with("IF", &[Some(true.into()), None, Some(3.0.into())])
                .unwrap(),
            Value::na()
        );
    }

    #[test]
    fn test_default_fills_omitted_argument() {
        let dispatcher = Dispatcher::new();
        assert_eq!(
            dispatcher.call("IF", &[false.into(), 1.0.into()]).unwrap(),
            Value::from(false)
        );
        assert_eq!(
            dispatcher
                .call_with("ROUND", &[Some(2.6.into()), None])
                .unwrap(),
            Value::from(3.0)
        );
    }

    #[test]
    fn test_short_circuit_order() {
        let dispatcher = Dispatcher::new();
        let first = Value::from(ErrorValue::with_message(ErrorKind::Ref, "first"));
        let second = Value::from(ErrorValue::with_message(ErrorKind::Ref, "second"));

        let result = dispatcher
            .call("IF", &[first.clone(), second.clone(), 0.0.into()])
            .unwrap();
        assert_eq!(result.as_error().and_then(ErrorValue::message), Some("first"));

        let result = dispatcher
            .call("IF", &[true.into(), second.clone(), 0.0.into()])
            .unwrap();
        assert_eq!(result, second);

        // The false branch is only checked once it is chosen
        let result = dispatcher
            .call("IF", &[true.into(), 1.0.into(), first.clone()])
            .unwrap();
        assert_eq!(result, Value::from(1.0));
        let result = dispatcher
            .call("IF", &[false.into(), 1.0.into(), first.clone()])
            .unwrap();
        assert_eq!(result, first);
    }

    #[test]
    fn test_elementwise_unwraps_single_cells() {
        let dispatcher = Dispatcher::new();
        let single = array(vec![vec![(-4.0).into()]]);
        assert_eq!(dispatcher.call("ABS", &[single]).unwrap(), Value::from(4.0));
    }

    #[test]
    fn test_elementwise_broadcast() {
        let dispatcher = Dispatcher::new();
        let numbers = array(vec![vec![2.0.into()], vec![3.0.into()]]);
        let powers = array(vec![vec![1.0.into(), 2.0.into()]]);

        let result = dispatcher.call("POWER", &[numbers.clone(), 2.0.into()]).unwrap();
        assert_eq!(result.to_string(), "{4;9}");

        let result = dispatcher.call("POWER", &[numbers, powers]).unwrap();
        assert_eq!(result.to_string(), "{2,#N/A;#N/A,#N/A}");
    }

    #[test]
    fn test_replicate_vectors_setting() {
        let dispatcher = Dispatcher::new().with_settings(
            EvaluationSettings::default().with_expansion(ExpansionMode::ReplicateVectors),
        );
        let numbers = array(vec![vec![2.0.into()], vec![3.0.into()]]);
        let powers = array(vec![vec![1.0.into(), 2.0.into()]]);

        let result = dispatcher.call("POWER", &[numbers, powers]).unwrap();
        assert_eq!(result.to_string(), "{2,4;3,9}");
    }

    #[test]
    fn test_array_limit_spills() {
        let dispatcher =
            Dispatcher::new().with_settings(EvaluationSettings::default().with_max_array_cells(3));
        let condition = array(vec![vec![true.into(), false.into()], vec![false.into(), true.into()]]);

        assert_eq!(
            dispatcher.call("IF", &[condition, 1.0.into(), 2.0.into()]).unwrap(),
            Value::error(ErrorKind::Spill)
        );
    }

    #[test]
    fn test_host_function() {
        fn double(args: &[Value]) -> Value {
            match args[0].as_scalar().map(|s| s.to_number()) {
                Some(Ok(n)) => Value::from(n * 2.0),
                _ => Value::error(ErrorKind::Value),
            }
        }

        let mut dispatcher = Dispatcher::new();
        dispatcher.registry_mut().register(BuiltinFunction::new(
            FunctionDescriptor::new("DOUBLE", vec![ParamSpec::required("n")], Lifting::Elementwise),
            double,
        ));

        let result = dispatcher
            .call("double", &[array(vec![vec![1.0.into(), 2.5.into()]])])
            .unwrap();
        assert_eq!(result.to_string(), "{2,5}");
        assert!(Dispatcher::global().registry().get("DOUBLE").is_none());
    }

    #[test]
    fn test_zero_argument_functions() {
        let dispatcher = Dispatcher::new();
        assert_eq!(dispatcher.call("TRUE", &[]).unwrap(), Value::from(true));
        assert_eq!(dispatcher.call("NA", &[]).unwrap(), Value::na());
        assert!(matches!(
            dispatcher.call("NA", &[1.0.into()]),
            Err(FormulaError::ArgumentCount { actual: 1, .. })
        ));
    }
}
