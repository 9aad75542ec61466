use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, trace};

use crate::config::RuntimeConfig;
use crate::context::{ExecutionContext, TypeKind};
use crate::error::{IntrinsicError, RegistryError, Result};
use crate::registry::{Intrinsic, IntrinsicId, Registry};
use crate::result::IntrinsicResult;
use crate::stdlib;
use crate::types::TypeTables;
use crate::value::Value;

/// What the engine's scheduler should do once an intrinsic returns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SchedulerDirective {
    #[default]
    Continue,
    /// End the current time slice before running further script code.
    Yield,
}

/// Outcome of [`Runtime::execute`].
#[derive(Clone, Debug, PartialEq)]
pub struct Dispatch {
    pub result: IntrinsicResult,
    pub directive: SchedulerDirective,
}

/// State shared by every call made through one runtime.
pub(crate) struct Session {
    config: RuntimeConfig,
    rng: Option<StdRng>,
    types: TypeTables,
    intrinsics_map: Option<Value>,
}

impl Session {
    fn new(config: RuntimeConfig) -> Self {
        Self {
            config,
            rng: None,
            types: TypeTables::default(),
            intrinsics_map: None,
        }
    }

    fn rng(&mut self) -> &mut StdRng {
        let seed = self.config.seed;
        self.rng.get_or_insert_with(|| match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        })
    }
}

/// One in-flight intrinsic invocation: the engine's context plus the
/// runtime state the intrinsic may touch.
pub struct Call<'a> {
    context: &'a mut dyn ExecutionContext,
    registry: &'a Registry,
    session: &'a mut Session,
    directive: SchedulerDirective,
}

impl<'a> Call<'a> {
    /// The bound value of parameter `name`.
    pub fn arg(&self, name: &str) -> Value {
        self.context.get_var(name)
    }

    pub fn context(&mut self) -> &mut dyn ExecutionContext {
        &mut *self.context
    }

    pub fn registry(&self) -> &'a Registry {
        self.registry
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.session.config
    }

    pub fn rng(&mut self) -> &mut StdRng {
        self.session.rng()
    }

    /// Replaces the shared generator with one seeded from `seed`.
    pub fn reseed(&mut self, seed: u64) {
        trace!(seed, "reseeding random generator");
        self.session.rng = Some(StdRng::seed_from_u64(seed));
    }

    /// Asks the scheduler to end the current time slice.
    pub fn request_yield(&mut self) {
        self.directive = SchedulerDirective::Yield;
        self.context.set_yielding(true);
    }

    pub fn directive(&self) -> SchedulerDirective {
        self.directive
    }

    pub(crate) fn type_table(&mut self, kind: TypeKind) -> Value {
        self.session.types.get(kind, self.registry)
    }

    /// Map from every intrinsic name to its function value.
    pub(crate) fn intrinsics_map(&mut self) -> Value {
        let registry = self.registry;
        self.session
            .intrinsics_map
            .get_or_insert_with(|| {
                Value::map(
                    registry
                        .iter()
                        .map(|intrinsic| {
                            (Value::string(intrinsic.name()), intrinsic.function_value())
                        })
                        .collect(),
                )
            })
            .clone()
    }
}

/// The intrinsic runtime: a registry of native functions plus the shared
/// state they run against.
pub struct Runtime {
    registry: Registry,
    session: Session,
    initialized: bool,
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

impl Runtime {
    pub fn new() -> Self {
        Self::with_config(RuntimeConfig::default())
    }

    pub fn with_config(config: RuntimeConfig) -> Self {
        Self {
            registry: Registry::new(),
            session: Session::new(config),
            initialized: false,
        }
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.session.config
    }

    /// Installs the standard library on first use; later calls do nothing.
    pub fn init_if_needed(&mut self) -> Result<(), RegistryError> {
        if self.initialized {
            return Ok(());
        }
        self.initialized = true;
        stdlib::install(&mut self.registry)?;
        debug!(count = self.registry.len(), "standard intrinsics installed");
        Ok(())
    }

    /// Installed intrinsics. Empty until the first `lookup`, `registry_mut`
    /// or `execute` installs the standard library.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The registry, with the standard library already installed, for hosts
    /// that declare their own intrinsics.
    pub fn registry_mut(&mut self) -> Result<&mut Registry, RegistryError> {
        self.init_if_needed()?;
        Ok(&mut self.registry)
    }

    pub fn lookup(&mut self, name: &str) -> Result<&Intrinsic, RegistryError> {
        self.init_if_needed()?;
        self.registry.require(name)
    }

    /// Runs intrinsic `id` once.
    ///
    /// The intrinsic reads its arguments from `context` and receives
    /// `partial` when the engine is resuming a call that previously returned
    /// an incomplete result.
    pub fn execute(
        &mut self,
        id: IntrinsicId,
        context: &mut dyn ExecutionContext,
        partial: Option<IntrinsicResult>,
    ) -> Result<Dispatch> {
        self.init_if_needed().map_err(|err| IntrinsicError::argument("execute", err))?;
        let intrinsic = self.registry.get_by_id(id).ok_or_else(|| {
            IntrinsicError::argument("execute", format!("no intrinsic with id {id}"))
        })?;
        trace!(name = intrinsic.name(), resuming = partial.is_some(), "executing intrinsic");
        let mut call = Call {
            context,
            registry: &self.registry,
            session: &mut self.session,
            directive: SchedulerDirective::Continue,
        };
        let result = intrinsic.invoke(&mut call, partial)?;
        Ok(Dispatch {
            result,
            directive: call.directive,
        })
    }
}
