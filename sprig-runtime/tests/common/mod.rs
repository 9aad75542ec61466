//! Shared harness for the integration tests: an in-memory execution context
//! and helpers for calling intrinsics by name.

#![allow(dead_code)]

use std::collections::HashMap;

use indexmap::IndexMap;
use sprig_runtime::{
    Dispatch, ExecutionContext, IntrinsicError, IntrinsicId, IntrinsicResult, Runtime,
    RuntimeConfig, TypeKind, Value,
};

/// An execution context backed by plain collections, with a clock the test
/// advances by hand and captured output.
#[derive(Default)]
pub struct TestContext {
    pub vars: HashMap<String, Value>,
    pub clock: f64,
    pub output: String,
    pub yielding: bool,
    pub types: HashMap<TypeKind, Value>,
    pub version: Option<Value>,
    pub frames: Vec<String>,
}

impl ExecutionContext for TestContext {
    fn get_var(&self, name: &str) -> Value {
        self.vars.get(name).cloned().unwrap_or_default()
    }

    fn run_time(&self) -> f64 {
        self.clock
    }

    fn yielding(&self) -> bool {
        self.yielding
    }

    fn set_yielding(&mut self, yielding: bool) {
        self.yielding = yielding;
    }

    fn standard_output(&mut self, text: &str, line_break: bool) {
        self.output.push_str(text);
        if line_break {
            self.output.push('\n');
        }
    }

    fn type_slot(&self, kind: TypeKind) -> Option<Value> {
        self.types.get(&kind).cloned()
    }

    fn set_type_slot(&mut self, kind: TypeKind, table: Value) {
        self.types.insert(kind, table);
    }

    fn version_map(&self) -> Option<Value> {
        self.version.clone()
    }

    fn set_version_map(&mut self, map: Value) {
        self.version = Some(map);
    }

    fn stack_trace(&self) -> Vec<String> {
        self.frames.clone()
    }
}

/// A runtime paired with one context, standing in for a script engine.
pub struct Harness {
    pub runtime: Runtime,
    pub context: TestContext,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(RuntimeConfig::default())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::with_config(RuntimeConfig::default().with_seed(seed))
    }

    pub fn with_config(config: RuntimeConfig) -> Self {
        Self {
            runtime: Runtime::with_config(config),
            context: TestContext::default(),
        }
    }

    /// Binds `args` for intrinsic `name` and returns its id.
    pub fn bind(&mut self, name: &str, args: Vec<Value>) -> Result<IntrinsicId, IntrinsicError> {
        let intrinsic = self.runtime.lookup(name).expect("intrinsic is registered");
        let id = intrinsic.id();
        self.context.vars = intrinsic.bind(args)?;
        Ok(id)
    }

    /// Starts a call, returning whatever the first tick produced.
    pub fn start(&mut self, name: &str, args: Vec<Value>) -> Result<Dispatch, IntrinsicError> {
        let id = self.bind(name, args)?;
        self.runtime.execute(id, &mut self.context, None)
    }

    /// Runs another tick of an in-progress call, reusing the bound arguments.
    pub fn resume(
        &mut self,
        name: &str,
        partial: IntrinsicResult,
    ) -> Result<Dispatch, IntrinsicError> {
        let id = self.runtime.lookup(name).expect("intrinsic is registered").id();
        self.runtime.execute(id, &mut self.context, Some(partial))
    }

    /// Calls an intrinsic that completes in a single tick.
    pub fn call(&mut self, name: &str, args: Vec<Value>) -> Result<Value, IntrinsicError> {
        let dispatch = self.start(name, args)?;
        assert!(dispatch.result.done, "{name} did not complete in one tick");
        Ok(dispatch.result.value)
    }
}

pub fn num(value: f64) -> Value {
    Value::Number(value)
}

pub fn text(value: &str) -> Value {
    Value::string(value)
}

pub fn list(items: Vec<Value>) -> Value {
    Value::list(items)
}

pub fn numbers(items: &[f64]) -> Value {
    Value::list(items.iter().copied().map(Value::Number).collect())
}

pub fn map(entries: Vec<(Value, Value)>) -> Value {
    Value::map(entries.into_iter().collect::<IndexMap<_, _>>())
}

/// Elements of a list value; panics on anything else.
pub fn items(value: &Value) -> Vec<Value> {
    match value {
        Value::List(items) => items.borrow().clone(),
        other => panic!("expected a list, got {other:?}"),
    }
}

pub fn as_numbers(value: &Value) -> Vec<f64> {
    items(value).iter().map(Value::double_value).collect()
}
