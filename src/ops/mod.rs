//! Exposed operations and their dispatch.
//!
//! Each operation is described once (name, ordered parameter names,
//! native entry point) and registered at construction. Invocation
//! validates arity, marshals the arguments, makes the native call, and
//! bridges the outcome: payloads come back as owned strings, native error
//! text comes back verbatim as [`SdkError::Native`].

use std::ffi::CString;

use crate::error::SdkError;
use crate::native::{capture, NativeApi, Outcome};

/// Name of the repository listing operation.
pub const LIST_REPOS: &str = "list_repos";

/// Name of the bundle listing operation.
pub const LIST_BUNDLES: &str = "list_bundles";

/// Native entry point adapter: marshaled arguments in, collapsed outcome
/// out. Arity has already been validated when this runs.
type OpFn = for<'lib> fn(&'lib dyn NativeApi, &[CString]) -> Result<Outcome<'lib>, SdkError>;

/// One exposed operation.
#[derive(Clone)]
pub struct OpDescriptor {
    name: &'static str,
    params: &'static [&'static str],
    call: OpFn,
}

impl OpDescriptor {
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Ordered parameter names; arity is their count.
    pub fn params(&self) -> &'static [&'static str] {
        self.params
    }

    /// Fixed usage line reported on any arity or type mismatch.
    pub fn usage(&self) -> String {
        let plural = if self.params.len() == 1 {
            "parameter"
        } else {
            "parameters"
        };
        format!(
            "{} requires {} {}: {}",
            self.name,
            self.params.len(),
            plural,
            self.params.join(", ")
        )
    }
}

/// The set of exposed operations, built once at initialization and
/// read-only afterwards.
pub struct Registry {
    ops: Vec<OpDescriptor>,
}

impl Registry {
    /// Build the registry with every exposed operation registered.
    pub fn new() -> Self {
        let mut registry = Self { ops: Vec::new() };
        registry.register(OpDescriptor {
            name: LIST_REPOS,
            params: &["config"],
            call: call_list_repos,
        });
        registry.register(OpDescriptor {
            name: LIST_BUNDLES,
            params: &["config", "repo"],
            call: call_list_bundles,
        });
        registry
    }

    fn register(&mut self, op: OpDescriptor) {
        self.ops.push(op);
    }

    pub fn get(&self, name: &str) -> Option<&OpDescriptor> {
        self.ops.iter().find(|op| op.name == name)
    }

    pub fn list(&self) -> &[OpDescriptor] {
        &self.ops
    }

    /// Validate, marshal, call, and bridge one invocation.
    ///
    /// Exactly one of a returned value or an error is produced, and
    /// whichever buffer the native side populated has been released by the
    /// time this returns.
    pub fn invoke(
        &self,
        api: &dyn NativeApi,
        name: &str,
        args: &[&str],
    ) -> Result<String, SdkError> {
        let op = self
            .get(name)
            .ok_or_else(|| SdkError::UnknownOperation(name.to_string()))?;
        let marshaled = marshal_args(op, args)?;
        match (op.call)(api, &marshaled)? {
            Outcome::Success(payload) => payload.into_string(),
            Outcome::Failure(message) => Err(SdkError::Native(message.into_string()?)),
        }
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

/// Arity check plus C-string marshaling. Both failure modes report the
/// operation's usage line, before the native side is touched.
fn marshal_args(op: &OpDescriptor, args: &[&str]) -> Result<Vec<CString>, SdkError> {
    if args.len() != op.params().len() {
        return Err(SdkError::InvalidArguments(op.usage()));
    }
    args.iter()
        .map(|arg| CString::new(*arg).map_err(|_| SdkError::InvalidArguments(op.usage())))
        .collect()
}

fn call_list_repos<'lib>(
    api: &'lib dyn NativeApi,
    args: &[CString],
) -> Result<Outcome<'lib>, SdkError> {
    capture(api, |result, err| unsafe {
        api.list_repos(args[0].as_ptr(), result, err)
    })
}

fn call_list_bundles<'lib>(
    api: &'lib dyn NativeApi,
    args: &[CString],
) -> Result<Outcome<'lib>, SdkError> {
    capture(api, |result, err| unsafe {
        api.list_bundles(args[0].as_ptr(), args[1].as_ptr(), result, err)
    })
}
