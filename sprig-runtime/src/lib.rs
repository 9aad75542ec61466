//! Built-in function runtime for the sprig scripting language.
//!
//! The engine resolves intrinsics by name or id through a [`Runtime`], binds
//! call arguments into its [`ExecutionContext`], and calls
//! [`Runtime::execute`] once per scheduler tick until the returned
//! [`IntrinsicResult`] is done.

mod config;
mod context;
mod error;
mod registry;
mod result;
mod runtime;
mod value;

pub mod stdlib;
pub mod types;

pub use crate::config::{HostInfo, RuntimeConfig, DEFAULT_ENGINE_VERSION, DEFAULT_MAX_LIST_SIZE};
pub use crate::context::{ExecutionContext, TypeKind};
pub use crate::error::{ConfigError, ErrorKind, IntrinsicError, RegistryError, Result};
pub use crate::registry::{Intrinsic, IntrinsicId, IntrinsicImpl, Registry};
pub use crate::result::IntrinsicResult;
pub use crate::runtime::{Call, Dispatch, Runtime, SchedulerDirective};
pub use crate::value::{Function, ListRef, MapRef, Param, Value};
