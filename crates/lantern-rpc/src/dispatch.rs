//! Request dispatch: decode, route, check, invoke, encode.

use std::time::Instant;

use tracing::{debug, info, trace, warn};

use crate::envelope::MethodResponse;
use crate::fault::Fault;
use crate::method::{MethodHandler, MethodTable};
use crate::value::Value;
use crate::xml::{decode_method_call, encode_response};

/// Bounds applied while decoding untrusted request bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeLimits {
    /// Deepest accepted array/struct nesting; a top-level parameter is depth 1.
    pub max_depth: usize,
}

impl Default for DecodeLimits {
    fn default() -> Self {
        Self { max_depth: 32 }
    }
}

/// Owns the frozen method table and turns request bodies into responses.
///
/// Holds no per-request state, so one instance serves any number of
/// concurrent requests.
pub struct RpcService {
    methods: MethodTable,
    limits: DecodeLimits,
}

impl RpcService {
    pub fn new(methods: MethodTable) -> Self {
        Self {
            methods,
            limits: DecodeLimits::default(),
        }
    }

    pub fn with_limits(mut self, limits: DecodeLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn methods(&self) -> &MethodTable {
        &self.methods
    }

    pub fn limits(&self) -> DecodeLimits {
        self.limits
    }

    /// Handle one request body. Failures before the handler runs skip it
    /// entirely and come back as faults; so do handler failures.
    pub fn dispatch(&self, body: &[u8]) -> MethodResponse {
        trace!(body = %String::from_utf8_lossy(body), "rpc request body");

        let call = match decode_method_call(body, &self.limits) {
            Ok(call) => call,
            Err(e) => {
                warn!(error = %e, body_len = body.len(), "malformed rpc request");
                return MethodResponse::Fault(e.into());
            }
        };

        let Some(handler) = self.methods.get(&call.method) else {
            warn!(method = %call.method, "unknown rpc method");
            return MethodResponse::Fault(Fault::method_not_found(&call.method));
        };

        if let Err(fault) = check_params(handler, &call.params) {
            warn!(method = %call.method, error = %fault.message, "rejected rpc parameters");
            return MethodResponse::Fault(fault);
        }

        debug!(method = %call.method, params = call.params.len(), "invoking rpc method");
        let started = Instant::now();
        let response = MethodResponse::from(handler.call(call.params));
        let elapsed_us = started.elapsed().as_micros() as u64;

        match &response {
            MethodResponse::Success(_) => {
                info!(method = %call.method, elapsed_us, "rpc call succeeded");
            }
            MethodResponse::Fault(fault) => {
                warn!(
                    method = %call.method,
                    code = fault.code,
                    error = %fault.message,
                    elapsed_us,
                    "rpc call faulted"
                );
            }
        }
        response
    }

    /// [`dispatch`](Self::dispatch) followed by encoding to XML.
    pub fn handle(&self, body: &[u8]) -> String {
        encode_response(&self.dispatch(body))
    }
}

fn check_params(handler: &dyn MethodHandler, params: &[Value]) -> Result<(), Fault> {
    let expected = handler.params();
    if expected.len() != params.len() {
        return Err(Fault::invalid_params(format!(
            "expected {} parameter(s), got {}",
            expected.len(),
            params.len()
        )));
    }

    for (index, (kind, value)) in expected.iter().zip(params).enumerate() {
        if !kind.accepts(value) {
            return Err(Fault::invalid_params(format!(
                "parameter {}: expected {kind}, got {}",
                index + 1,
                value.kind()
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::method::handler_fn;
    use crate::value::ValueKind;
    use crate::xml::encode_method_call;
    use crate::MethodCall;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn service_with_counter() -> (RpcService, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);

        let mut table = MethodTable::new();
        table
            .register(
                "echo.string",
                handler_fn(&[ValueKind::String], move |mut params| {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Ok(params.remove(0))
                }),
            )
            .unwrap();
        table
            .register(
                "always.fails",
                handler_fn(ValueKind::NONE, |_| Err(Fault::application("collaborator down"))),
            )
            .unwrap();
        (RpcService::new(table), calls)
    }

    fn call(service: &RpcService, method: &str, params: Vec<Value>) -> MethodResponse {
        let body = encode_method_call(&MethodCall::new(method, params));
        service.dispatch(body.as_bytes())
    }

    #[test]
    fn routes_to_handler() {
        let (service, calls) = service_with_counter();
        let response = call(&service, "echo.string", vec![Value::from("hi")]);
        assert_eq!(response, MethodResponse::Success(Value::from("hi")));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn unknown_method_is_fault_without_invocation() {
        let (service, calls) = service_with_counter();
        let response = call(&service, "window.explode", vec![]);
        match response {
            MethodResponse::Fault(fault) => assert_eq!(fault.code, Fault::METHOD_NOT_FOUND),
            other => panic!("expected fault, got {other:?}"),
        }
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(service.methods().len(), 2);
    }

    #[test]
    fn wrong_arity_is_rejected_before_handler() {
        let (service, calls) = service_with_counter();
        for params in [vec![], vec![Value::from("a"), Value::from("b")]] {
            match call(&service, "echo.string", params) {
                MethodResponse::Fault(fault) => assert_eq!(fault.code, Fault::INVALID_PARAMS),
                other => panic!("expected fault, got {other:?}"),
            }
        }
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn wrong_kind_is_rejected_before_handler() {
        let (service, calls) = service_with_counter();
        match call(&service, "echo.string", vec![Value::Int(0)]) {
            MethodResponse::Fault(fault) => {
                assert_eq!(fault.code, Fault::INVALID_PARAMS);
                assert_eq!(fault.message, "parameter 1: expected string, got int");
            }
            other => panic!("expected fault, got {other:?}"),
        }
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn malformed_body_is_parse_fault() {
        let (service, calls) = service_with_counter();
        for body in ["", "garbage", "<methodCall><methodName>echo.string"] {
            match service.dispatch(body.as_bytes()) {
                MethodResponse::Fault(fault) => assert_eq!(fault.code, Fault::PARSE_ERROR),
                other => panic!("expected fault for {body:?}, got {other:?}"),
            }
        }
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn handler_failure_becomes_fault() {
        let (service, _) = service_with_counter();
        let response = call(&service, "always.fails", vec![]);
        assert_eq!(
            response,
            MethodResponse::Fault(Fault::application("collaborator down"))
        );
    }

    #[test]
    fn handle_encodes_xml() {
        let (service, _) = service_with_counter();
        let body = encode_method_call(&MethodCall::new("echo.string", vec![Value::from("0")]));
        let xml = service.handle(body.as_bytes());
        assert!(xml.starts_with("<?xml"));
        assert!(xml.contains("<string>0</string>"));

        let xml = service.handle(b"nope");
        assert!(xml.contains("<fault>"));
        assert!(xml.contains("-32700"));
    }

    #[test]
    fn custom_limits_apply() {
        let (service, _) = service_with_counter();
        let service = service.with_limits(DecodeLimits { max_depth: 1 });
        let nested = Value::Array(vec![Value::Array(vec![])]);
        let body = encode_method_call(&MethodCall::new("echo.string", vec![nested]));
        match service.dispatch(body.as_bytes()) {
            MethodResponse::Fault(fault) => assert_eq!(fault.code, Fault::INVALID_REQUEST),
            other => panic!("expected fault, got {other:?}"),
        }
    }
}
