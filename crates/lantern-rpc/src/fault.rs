//! Wire-level failure values.

use crate::value::Value;

/// A failure reported to the caller inside a normal response.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("fault {code}: {message}")]
pub struct Fault {
    pub code: i32,
    pub message: String,
}

impl Fault {
    /// Body is not well-formed XML.
    pub const PARSE_ERROR: i32 = -32700;
    /// Well-formed XML that is not a method call.
    pub const INVALID_REQUEST: i32 = -32600;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    /// Wrong parameter count or kinds.
    pub const INVALID_PARAMS: i32 = -32602;
    pub const INTERNAL_ERROR: i32 = -32603;
    /// Raised by a handler.
    pub const APPLICATION_ERROR: i32 = -32500;

    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn method_not_found(method: &str) -> Self {
        Self::new(Self::METHOD_NOT_FOUND, format!("unknown method: {method}"))
    }

    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::new(Self::INVALID_PARAMS, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(Self::INTERNAL_ERROR, message)
    }

    pub fn application(message: impl Into<String>) -> Self {
        Self::new(Self::APPLICATION_ERROR, message)
    }

    /// The `faultCode`/`faultString` struct carried on the wire.
    pub fn to_value(&self) -> Value {
        Value::Struct(vec![
            ("faultCode".to_string(), Value::Int(i64::from(self.code))),
            ("faultString".to_string(), Value::String(self.message.clone())),
        ])
    }

    /// Rebuild a fault from its wire struct.
    pub fn from_value(value: &Value) -> Option<Self> {
        let code = value.member("faultCode")?.as_int()?;
        let message = value.member("faultString")?.as_str()?;
        Some(Self::new(i32::try_from(code).ok()?, message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_code_and_message() {
        let fault = Fault::method_not_found("window.explode");
        assert_eq!(fault.to_string(), "fault -32601: unknown method: window.explode");
    }

    #[test]
    fn value_form_round_trips() {
        let fault = Fault::application("window limit reached");
        assert_eq!(Fault::from_value(&fault.to_value()), Some(fault));
    }

    #[test]
    fn from_value_rejects_non_fault_structs() {
        assert!(Fault::from_value(&Value::Bool(false)).is_none());
        let partial = Value::Struct(vec![("faultCode".into(), Value::Int(1))]);
        assert!(Fault::from_value(&partial).is_none());
    }
}
