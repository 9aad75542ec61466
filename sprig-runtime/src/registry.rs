use std::cell::OnceCell;
use std::collections::HashMap;
use std::fmt;

use tracing::{debug, warn};

use crate::error::{IntrinsicError, RegistryError, Result};
use crate::result::IntrinsicResult;
use crate::runtime::Call;
use crate::value::{Function, Param, Value};

/// Numeric handle of a registered intrinsic. Ids start at 1 and are never reused.
pub type IntrinsicId = usize;

/// Signature of the built-in intrinsic implementations.
pub type IntrinsicImpl = fn(&mut Call<'_>, Option<IntrinsicResult>) -> Result<IntrinsicResult>;

type NativeCode = Box<dyn Fn(&mut Call<'_>, Option<IntrinsicResult>) -> Result<IntrinsicResult>>;

/// A named native function callable from script code.
pub struct Intrinsic {
    name: String,
    id: IntrinsicId,
    params: Vec<Param>,
    code: Option<NativeCode>,
    function: OnceCell<Value>,
}

impl Intrinsic {
    fn new(name: String, id: IntrinsicId) -> Self {
        Self {
            name,
            id,
            params: Vec::new(),
            code: None,
            function: OnceCell::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> IntrinsicId {
        self.id
    }

    pub fn params(&self) -> &[Param] {
        &self.params
    }

    pub fn has_code(&self) -> bool {
        self.code.is_some()
    }

    /// Declares a parameter without a default; omitted arguments bind to null.
    pub fn add_param(&mut self, name: &str) -> &mut Self {
        self.push_param(Param::new(name, None))
    }

    pub fn add_param_default(&mut self, name: &str, default: Value) -> &mut Self {
        self.push_param(Param::new(name, Some(default)))
    }

    pub fn add_param_number(&mut self, name: &str, default: f64) -> &mut Self {
        self.add_param_default(name, Value::Number(default))
    }

    pub fn add_param_str(&mut self, name: &str, default: &str) -> &mut Self {
        self.add_param_default(name, Value::string(default))
    }

    fn push_param(&mut self, param: Param) -> &mut Self {
        self.params.push(param);
        // The cached function value would be missing the new parameter.
        self.function = OnceCell::new();
        self
    }

    pub fn set_code<F>(&mut self, code: F) -> &mut Self
    where
        F: Fn(&mut Call<'_>, Option<IntrinsicResult>) -> Result<IntrinsicResult> + 'static,
    {
        self.code = Some(Box::new(code));
        self
    }

    /// The script-visible function value for this intrinsic. Built on first
    /// use and shared afterwards, so repeated calls return the same reference.
    pub fn function_value(&self) -> Value {
        self.function
            .get_or_init(|| {
                Value::function(Function {
                    params: self.params.clone(),
                    intrinsic: Some(self.id),
                })
            })
            .clone()
    }

    /// Binds positional `args` to the declared parameters, filling defaults
    /// (or null) for the rest.
    pub fn bind(&self, args: Vec<Value>) -> Result<HashMap<String, Value>> {
        if args.len() > self.params.len() {
            return Err(IntrinsicError::argument(
                &self.name,
                format!(
                    "Too Many Arguments (expected at most {}, got {})",
                    self.params.len(),
                    args.len()
                ),
            ));
        }
        let mut args = args.into_iter();
        Ok(self
            .params
            .iter()
            .map(|param| {
                let value = args
                    .next()
                    .or_else(|| param.default.clone())
                    .unwrap_or_default();
                (param.name.clone(), value)
            })
            .collect())
    }

    pub(crate) fn invoke(
        &self,
        call: &mut Call<'_>,
        partial: Option<IntrinsicResult>,
    ) -> Result<IntrinsicResult> {
        match &self.code {
            Some(code) => code(call, partial),
            None => Err(IntrinsicError::argument(&self.name, "intrinsic has no code")),
        }
    }
}

impl fmt::Debug for Intrinsic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Intrinsic")
            .field("name", &self.name)
            .field("id", &self.id)
            .field("params", &self.params)
            .field("has_code", &self.code.is_some())
            .finish()
    }
}

/// Name and id index over every declared intrinsic.
#[derive(Debug)]
pub struct Registry {
    // Slot 0 is never populated so that no intrinsic has id 0.
    entries: Vec<Option<Intrinsic>>,
    names: HashMap<String, IntrinsicId>,
}

impl Default for Registry {
    fn default() -> Self {
        Self {
            entries: vec![None],
            names: HashMap::new(),
        }
    }
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a new intrinsic and returns it for parameter and code setup.
    pub fn create(&mut self, name: &str) -> Result<&mut Intrinsic, RegistryError> {
        if self.names.contains_key(name) {
            warn!(name, "intrinsic name already registered");
            return Err(RegistryError::DuplicateName(name.to_string()));
        }
        let id = self.entries.len();
        self.names.insert(name.to_string(), id);
        self.entries.push(Some(Intrinsic::new(name.to_string(), id)));
        debug!(name, id, "registered intrinsic");
        let slot = self.entries.last_mut().and_then(Option::as_mut);
        slot.ok_or_else(|| RegistryError::UnknownName(name.to_string()))
    }

    pub fn get_by_id(&self, id: IntrinsicId) -> Option<&Intrinsic> {
        self.entries.get(id).and_then(Option::as_ref)
    }

    pub fn get_by_name(&self, name: &str) -> Option<&Intrinsic> {
        self.names.get(name).and_then(|&id| self.get_by_id(id))
    }

    pub fn require(&self, name: &str) -> Result<&Intrinsic, RegistryError> {
        self.get_by_name(name)
            .ok_or_else(|| RegistryError::UnknownName(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains_key(name)
    }

    /// Intrinsics in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Intrinsic> {
        self.entries.iter().flatten()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
