use crate::value::Value;

/// The value types that own a method table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TypeKind {
    List,
    String,
    Map,
    Number,
    Function,
}

impl TypeKind {
    pub const ALL: [TypeKind; 5] = [
        TypeKind::List,
        TypeKind::String,
        TypeKind::Map,
        TypeKind::Number,
        TypeKind::Function,
    ];

    /// Name of the intrinsic that exposes this type's method table.
    pub fn intrinsic_name(self) -> &'static str {
        match self {
            TypeKind::List => "list",
            TypeKind::String => "string",
            TypeKind::Map => "map",
            TypeKind::Number => "number",
            TypeKind::Function => "funcRef",
        }
    }
}

/// The engine-side services an intrinsic may use while it runs.
///
/// One context belongs to one script engine. The runtime never keeps a
/// reference past the end of a call.
pub trait ExecutionContext {
    /// Value bound to `name` in the current call frame; `null` if unbound.
    fn get_var(&self, name: &str) -> Value;

    /// Seconds since the engine started running.
    fn run_time(&self) -> f64;

    fn yielding(&self) -> bool;

    fn set_yielding(&mut self, yielding: bool);

    /// Writes script output. `line_break` asks for the host's line ending
    /// after `text`.
    fn standard_output(&mut self, text: &str, line_break: bool);

    /// Per-engine method table for `kind`, once the script has asked for it.
    fn type_slot(&self, kind: TypeKind) -> Option<Value>;

    fn set_type_slot(&mut self, kind: TypeKind, table: Value);

    fn version_map(&self) -> Option<Value>;

    fn set_version_map(&mut self, map: Value);

    /// Script call stack, innermost frame first.
    fn stack_trace(&self) -> Vec<String> {
        Vec::new()
    }
}
