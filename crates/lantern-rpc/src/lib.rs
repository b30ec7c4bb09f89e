//! XML-RPC dispatch for the lantern renderer.
//!
//! Request flow: HTTP body -> [`xml::decode_method_call`] -> lookup in the
//! [`MethodTable`] -> parameter check against the handler's declared kinds
//! -> [`MethodHandler::call`] -> [`xml::encode_response`]. Anything that
//! fails before the handler runs is answered with a [`Fault`].

pub mod dispatch;
pub mod envelope;
pub mod fault;
pub mod method;
pub mod server;
pub mod value;
pub mod xml;

pub use dispatch::{DecodeLimits, RpcService};
pub use envelope::{MethodCall, MethodResponse};
pub use fault::Fault;
pub use method::{handler_fn, FnHandler, MethodHandler, MethodTable, MethodTableError};
pub use server::{bind, router, serve, ServeError};
pub use value::{Value, ValueKind};
