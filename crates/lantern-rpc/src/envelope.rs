use crate::fault::Fault;
use crate::value::Value;

/// A decoded request: method name plus positional parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodCall {
    pub method: String,
    pub params: Vec<Value>,
}

impl MethodCall {
    pub fn new(method: impl Into<String>, params: Vec<Value>) -> Self {
        Self {
            method: method.into(),
            params,
        }
    }
}

/// What goes back to the caller: exactly one value, or a fault.
#[derive(Debug, Clone, PartialEq)]
pub enum MethodResponse {
    Success(Value),
    Fault(Fault),
}

impl MethodResponse {
    pub fn is_fault(&self) -> bool {
        matches!(self, MethodResponse::Fault(_))
    }
}

impl From<Result<Value, Fault>> for MethodResponse {
    fn from(result: Result<Value, Fault>) -> Self {
        match result {
            Ok(value) => MethodResponse::Success(value),
            Err(fault) => MethodResponse::Fault(fault),
        }
    }
}
