//! XML-RPC surface of the window service.

use std::sync::Arc;

use lantern_rpc::{Fault, MethodHandler, MethodTable, MethodTableError, Value, ValueKind};
use lantern_window::WindowBackend;
use tracing::warn;

use crate::context::WindowService;

pub const WINDOW_MAKE: &str = "window.make";
pub const WINDOW_DELETE: &str = "window.delete";
pub const WINDOW_LIST: &str = "window.list";

/// Legacy names some clients still send.
pub const CREATE_WINDOW: &str = "create-window";
pub const DELETE_WINDOW: &str = "delete-window";

/// Build the method table for `service`, introspection included.
pub fn method_table<B: WindowBackend>(
    service: &Arc<WindowService<B>>,
) -> Result<MethodTable, MethodTableError> {
    let mut table = MethodTable::new();
    table.register(WINDOW_MAKE, MakeWindow(Arc::clone(service)))?;
    table.register(WINDOW_DELETE, DeleteWindow(Arc::clone(service)))?;
    table.register(WINDOW_LIST, ListWindows(Arc::clone(service)))?;
    table.alias(CREATE_WINDOW, WINDOW_MAKE)?;
    table.alias(DELETE_WINDOW, WINDOW_DELETE)?;
    table.register_introspection()?;
    Ok(table)
}

struct MakeWindow<B: WindowBackend>(Arc<WindowService<B>>);

impl<B: WindowBackend> MethodHandler for MakeWindow<B> {
    fn params(&self) -> &[ValueKind] {
        ValueKind::NONE
    }

    fn call(&self, _params: Vec<Value>) -> Result<Value, Fault> {
        match self.0.create_window() {
            Ok(key) => Ok(Value::String(key)),
            Err(e) => {
                warn!(error = %e, "window construction failed");
                Err(Fault::application(format!("window construction failed: {e}")))
            }
        }
    }
}

struct DeleteWindow<B: WindowBackend>(Arc<WindowService<B>>);

impl<B: WindowBackend> MethodHandler for DeleteWindow<B> {
    fn params(&self) -> &[ValueKind] {
        &[ValueKind::String]
    }

    fn call(&self, params: Vec<Value>) -> Result<Value, Fault> {
        let key = params
            .first()
            .and_then(Value::as_str)
            .ok_or_else(|| Fault::invalid_params("expected a window key"))?;
        Ok(Value::Bool(self.0.delete_window(key)))
    }
}

struct ListWindows<B: WindowBackend>(Arc<WindowService<B>>);

impl<B: WindowBackend> MethodHandler for ListWindows<B> {
    fn params(&self) -> &[ValueKind] {
        ValueKind::NONE
    }

    fn call(&self, _params: Vec<Value>) -> Result<Value, Fault> {
        Ok(Value::from(self.0.window_keys()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lantern_rpc::method::LIST_METHODS;
    use lantern_window::{HeadlessBackend, WindowTemplate};

    fn table() -> (Arc<WindowService<HeadlessBackend>>, MethodTable) {
        let service = Arc::new(WindowService::new(HeadlessBackend::new(
            WindowTemplate::default(),
        )));
        let table = method_table(&service).unwrap();
        (service, table)
    }

    #[test]
    fn registers_every_window_method() {
        let (_, table) = table();
        for name in [
            WINDOW_MAKE,
            WINDOW_DELETE,
            WINDOW_LIST,
            CREATE_WINDOW,
            DELETE_WINDOW,
            LIST_METHODS,
        ] {
            assert!(table.contains(name), "missing {name}");
        }
        assert_eq!(table.len(), 6);
    }

    #[test]
    fn make_then_delete() {
        let (service, table) = table();
        let made = table.get(WINDOW_MAKE).unwrap().call(vec![]).unwrap();
        assert_eq!(made, Value::String("0".into()));

        let delete = table.get(WINDOW_DELETE).unwrap();
        assert_eq!(delete.call(vec![made.clone()]).unwrap(), Value::Bool(true));
        assert_eq!(delete.call(vec![made]).unwrap(), Value::Bool(false));
        assert!(service.windows().is_empty());
    }

    #[test]
    fn alias_shares_handler_state() {
        let (service, table) = table();
        let made = table.get(CREATE_WINDOW).unwrap().call(vec![]).unwrap();
        assert_eq!(service.windows().len(), 1);
        let deleted = table.get(WINDOW_DELETE).unwrap().call(vec![made]).unwrap();
        assert_eq!(deleted, Value::Bool(true));
    }

    #[test]
    fn list_reports_live_keys_in_order() {
        let (_, table) = table();
        let make = table.get(WINDOW_MAKE).unwrap();
        for _ in 0..12 {
            make.call(vec![]).unwrap();
        }
        table
            .get(WINDOW_DELETE)
            .unwrap()
            .call(vec![Value::from("3")])
            .unwrap();

        let listed = table.get(WINDOW_LIST).unwrap().call(vec![]).unwrap();
        let keys: Vec<&str> = listed
            .as_array()
            .unwrap()
            .iter()
            .filter_map(Value::as_str)
            .collect();
        assert_eq!(keys.len(), 11);
        assert_eq!(keys[..3], ["0", "1", "2"]);
        assert_eq!(keys[3], "4");
        assert_eq!(keys[9..], ["10", "11"]);
    }

    #[test]
    fn exhausted_backend_is_application_fault() {
        let service = Arc::new(WindowService::new(
            HeadlessBackend::new(WindowTemplate::default()).with_max_windows(1),
        ));
        let table = method_table(&service).unwrap();
        let make = table.get(WINDOW_MAKE).unwrap();
        make.call(vec![]).unwrap();

        let fault = make.call(vec![]).unwrap_err();
        assert_eq!(fault.code, Fault::APPLICATION_ERROR);
        assert_eq!(service.windows().len(), 1);
    }
}
