//! XML-RPC envelope codec.

mod decode;
mod encode;
mod tree;

pub use decode::{decode_method_call, decode_method_response, DecodeError};
pub use encode::{encode_method_call, encode_response};
