//! Handler capability and the name -> handler table.

use std::collections::HashMap;
use std::sync::Arc;

use crate::fault::Fault;
use crate::value::{Value, ValueKind};

/// One remotely callable method.
///
/// `params` declares the expected arity and kinds. The dispatcher checks
/// them before `call` runs, so `call` may index its parameters freely; it
/// still owns the semantic checks (is this key live, ...).
pub trait MethodHandler: Send + Sync {
    fn params(&self) -> &[ValueKind];

    fn call(&self, params: Vec<Value>) -> Result<Value, Fault>;
}

/// Closure-backed handler, for small methods that need no state of their own.
pub struct FnHandler<F> {
    params: &'static [ValueKind],
    f: F,
}

/// Wrap `f` as a handler taking `params`.
pub fn handler_fn<F>(params: &'static [ValueKind], f: F) -> FnHandler<F>
where
    F: Fn(Vec<Value>) -> Result<Value, Fault> + Send + Sync,
{
    FnHandler { params, f }
}

impl<F> MethodHandler for FnHandler<F>
where
    F: Fn(Vec<Value>) -> Result<Value, Fault> + Send + Sync,
{
    fn params(&self) -> &[ValueKind] {
        self.params
    }

    fn call(&self, params: Vec<Value>) -> Result<Value, Fault> {
        (self.f)(params)
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MethodTableError {
    #[error("method already registered: {0}")]
    Duplicate(String),

    #[error("cannot alias unknown method: {0}")]
    UnknownTarget(String),
}

/// Name -> handler mapping. Filled at startup, then frozen inside an
/// [`RpcService`](crate::RpcService). Lookups are exact and case-sensitive.
#[derive(Default)]
pub struct MethodTable {
    handlers: HashMap<String, Arc<dyn MethodHandler>>,
}

pub const LIST_METHODS: &str = "system.listMethods";

impl MethodTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<H>(&mut self, name: impl Into<String>, handler: H) -> Result<(), MethodTableError>
    where
        H: MethodHandler + 'static,
    {
        self.insert(name.into(), Arc::new(handler))
    }

    /// Make `alias` dispatch to the handler already registered as `target`.
    pub fn alias(&mut self, alias: impl Into<String>, target: &str) -> Result<(), MethodTableError> {
        let handler = self
            .handlers
            .get(target)
            .cloned()
            .ok_or_else(|| MethodTableError::UnknownTarget(target.to_string()))?;
        self.insert(alias.into(), handler)
    }

    /// Register `system.listMethods`, answering with every name registered
    /// so far plus itself.
    pub fn register_introspection(&mut self) -> Result<(), MethodTableError> {
        let mut names = self.names();
        names.push(LIST_METHODS.to_string());
        names.sort();
        self.register(
            LIST_METHODS,
            handler_fn(ValueKind::NONE, move |_| Ok(Value::from(names.clone()))),
        )
    }

    fn insert(&mut self, name: String, handler: Arc<dyn MethodHandler>) -> Result<(), MethodTableError> {
        if self.handlers.contains_key(&name) {
            return Err(MethodTableError::Duplicate(name));
        }
        self.handlers.insert(name, handler);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&dyn MethodHandler> {
        self.handlers.get(name).map(|handler| handler.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.handlers.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}
