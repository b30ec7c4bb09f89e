//! Envelope decoding: XML text to [`MethodCall`] / [`MethodResponse`].

use crate::dispatch::DecodeLimits;
use crate::envelope::{MethodCall, MethodResponse};
use crate::fault::Fault;
use crate::value::Value;

use super::tree::{parse_document, Element};

/// Why a body could not be turned into an envelope.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("empty request body")]
    Empty,

    #[error("request body is not valid UTF-8")]
    NotUtf8,

    #[error("malformed XML: {0}")]
    Xml(String),

    #[error("invalid envelope: {0}")]
    Structure(String),

    #[error("invalid value: {0}")]
    Value(String),

    #[error("values nested deeper than {0} levels")]
    TooDeep(usize),
}

impl From<DecodeError> for Fault {
    fn from(err: DecodeError) -> Self {
        let code = match err {
            DecodeError::Empty | DecodeError::NotUtf8 | DecodeError::Xml(_) => Fault::PARSE_ERROR,
            DecodeError::Structure(_) | DecodeError::Value(_) | DecodeError::TooDeep(_) => {
                Fault::INVALID_REQUEST
            }
        };
        Fault::new(code, err.to_string())
    }
}

/// Decode a `<methodCall>` body.
pub fn decode_method_call(body: &[u8], limits: &DecodeLimits) -> Result<MethodCall, DecodeError> {
    let root = parse_root(body, limits, "methodCall")?;

    let mut method: Option<String> = None;
    let mut params: Option<Vec<Value>> = None;

    for child in root.child_elements()? {
        match child.name.as_str() {
            "methodName" if method.is_none() => {
                let name = child.leaf_text()?.trim().to_string();
                if name.is_empty() {
                    return Err(DecodeError::Structure("empty <methodName>".into()));
                }
                method = Some(name);
            }
            "params" if params.is_none() => {
                params = Some(decode_params(child, limits)?);
            }
            other => {
                return Err(DecodeError::Structure(format!(
                    "unexpected <{other}> in <methodCall>"
                )))
            }
        }
    }

    let method = method.ok_or_else(|| DecodeError::Structure("missing <methodName>".into()))?;
    Ok(MethodCall {
        method,
        params: params.unwrap_or_default(),
    })
}

/// Decode a `<methodResponse>` body, success or fault.
pub fn decode_method_response(
    body: &[u8],
    limits: &DecodeLimits,
) -> Result<MethodResponse, DecodeError> {
    let root = parse_root(body, limits, "methodResponse")?;

    let child = match root.child_elements()?.as_slice() {
        [child] => *child,
        _ => {
            return Err(DecodeError::Structure(
                "<methodResponse> must contain <params> or <fault>".into(),
            ))
        }
    };

    match child.name.as_str() {
        "params" => {
            let mut values = decode_params(child, limits)?;
            if values.len() != 1 {
                return Err(DecodeError::Structure(format!(
                    "response carries {} values, expected 1",
                    values.len()
                )));
            }
            Ok(MethodResponse::Success(values.remove(0)))
        }
        "fault" => {
            let value = decode_value(child.only_child("value")?, 1, limits.max_depth)?;
            let fault = Fault::from_value(&value)
                .ok_or_else(|| DecodeError::Structure("malformed fault struct".into()))?;
            Ok(MethodResponse::Fault(fault))
        }
        other => Err(DecodeError::Structure(format!(
            "unexpected <{other}> in <methodResponse>"
        ))),
    }
}

fn parse_root(body: &[u8], limits: &DecodeLimits, expected: &str) -> Result<Element, DecodeError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(DecodeError::Empty);
    }
    let text = std::str::from_utf8(body).map_err(|_| DecodeError::NotUtf8)?;

    // Each value level costs up to four elements (value/array/data/value),
    // plus the fixed envelope prefix.
    let root = parse_document(text, limits.max_depth.saturating_mul(4).saturating_add(4))?;
    if root.name != expected {
        return Err(DecodeError::Structure(format!(
            "expected <{expected}>, found <{}>",
            root.name
        )));
    }
    Ok(root)
}

fn decode_params(params: &Element, limits: &DecodeLimits) -> Result<Vec<Value>, DecodeError> {
    params
        .child_elements()?
        .into_iter()
        .map(|param| {
            if param.name != "param" {
                return Err(DecodeError::Structure(format!(
                    "unexpected <{}> in <params>",
                    param.name
                )));
            }
            decode_value(param.only_child("value")?, 1, limits.max_depth)
        })
        .collect()
}

fn decode_value(value: &Element, depth: usize, max_depth: usize) -> Result<Value, DecodeError> {
    if depth > max_depth {
        return Err(DecodeError::TooDeep(max_depth));
    }

    // Untyped content is a string, whitespace and all.
    if !value.has_child_elements() {
        return Ok(Value::String(value.text()));
    }

    let typed = match value.child_elements()?.as_slice() {
        [typed] => *typed,
        _ => {
            return Err(DecodeError::Structure(
                "<value> must contain exactly one typed element".into(),
            ))
        }
    };

    match typed.name.as_str() {
        "string" => Ok(Value::String(typed.leaf_text()?)),
        "int" | "i4" | "i8" => {
            let text = typed.leaf_text()?;
            text.trim()
                .parse::<i64>()
                .map(Value::Int)
                .map_err(|_| DecodeError::Value(format!("bad integer {text:?}")))
        }
        "boolean" => match typed.leaf_text()?.trim() {
            "1" => Ok(Value::Bool(true)),
            "0" => Ok(Value::Bool(false)),
            other => Err(DecodeError::Value(format!("bad boolean {other:?}"))),
        },
        "double" => {
            let text = typed.leaf_text()?;
            match text.trim().parse::<f64>() {
                Ok(d) if d.is_finite() => Ok(Value::Double(d)),
                _ => Err(DecodeError::Value(format!("bad double {text:?}"))),
            }
        }
        "array" => {
            let data = typed.only_child("data")?;
            data.child_elements()?
                .into_iter()
                .map(|item| {
                    if item.name != "value" {
                        return Err(DecodeError::Structure(format!(
                            "unexpected <{}> in <data>",
                            item.name
                        )));
                    }
                    decode_value(item, depth + 1, max_depth)
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array)
        }
        "struct" => typed
            .child_elements()?
            .into_iter()
            .map(|member| decode_member(member, depth, max_depth))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Struct),
        other => Err(DecodeError::Value(format!("unsupported type <{other}>"))),
    }
}

fn decode_member(
    member: &Element,
    depth: usize,
    max_depth: usize,
) -> Result<(String, Value), DecodeError> {
    if member.name != "member" {
        return Err(DecodeError::Structure(format!(
            "unexpected <{}> in <struct>",
            member.name
        )));
    }

    let mut name: Option<String> = None;
    let mut value: Option<Value> = None;
    for part in member.child_elements()? {
        match part.name.as_str() {
            "name" if name.is_none() => name = Some(part.leaf_text()?),
            "value" if value.is_none() => value = Some(decode_value(part, depth + 1, max_depth)?),
            other => {
                return Err(DecodeError::Structure(format!(
                    "unexpected <{other}> in <member>"
                )))
            }
        }
    }

    match (name, value) {
        (Some(name), Some(value)) => Ok((name, value)),
        _ => Err(DecodeError::Structure(
            "<member> needs a <name> and a <value>".into(),
        )),
    }
}
