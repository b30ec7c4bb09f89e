//! Envelope encoding.

use quick_xml::escape::escape;

use crate::envelope::{MethodCall, MethodResponse};
use crate::value::Value;

const XML_DECL: &str = r#"<?xml version="1.0"?>"#;

/// Serialize a response or fault as a `<methodResponse>` document.
pub fn encode_response(response: &MethodResponse) -> String {
    let mut out = String::from(XML_DECL);
    out.push_str("<methodResponse>");
    match response {
        MethodResponse::Success(value) => {
            out.push_str("<params><param>");
            write_value(&mut out, value);
            out.push_str("</param></params>");
        }
        MethodResponse::Fault(fault) => {
            out.push_str("<fault>");
            write_value(&mut out, &fault.to_value());
            out.push_str("</fault>");
        }
    }
    out.push_str("</methodResponse>");
    out
}

/// Serialize a `<methodCall>` document, as a controller would send it.
pub fn encode_method_call(call: &MethodCall) -> String {
    let mut out = String::from(XML_DECL);
    out.push_str("<methodCall><methodName>");
    out.push_str(&escape(call.method.as_str()));
    out.push_str("</methodName><params>");
    for param in &call.params {
        out.push_str("<param>");
        write_value(&mut out, param);
        out.push_str("</param>");
    }
    out.push_str("</params></methodCall>");
    out
}

fn write_value(out: &mut String, value: &Value) {
    out.push_str("<value>");
    match value {
        Value::String(s) => {
            out.push_str("<string>");
            out.push_str(&escape(s.as_str()));
            out.push_str("</string>");
        }
        Value::Int(i) => {
            // <int> is 32-bit on the wire; wider values need <i8>.
            let tag = if i32::try_from(*i).is_ok() { "int" } else { "i8" };
            out.push_str(&format!("<{tag}>{i}</{tag}>"));
        }
        Value::Bool(b) => {
            out.push_str(if *b {
                "<boolean>1</boolean>"
            } else {
                "<boolean>0</boolean>"
            });
        }
        Value::Double(d) => out.push_str(&format!("<double>{d}</double>")),
        Value::Array(items) => {
            out.push_str("<array><data>");
            for item in items {
                write_value(out, item);
            }
            out.push_str("</data></array>");
        }
        Value::Struct(members) => {
            out.push_str("<struct>");
            for (name, member) in members {
                out.push_str("<member><name>");
                out.push_str(&escape(name.as_str()));
                out.push_str("</name>");
                write_value(out, member);
                out.push_str("</member>");
            }
            out.push_str("</struct>");
        }
    }
    out.push_str("</value>");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::DecodeLimits;
    use crate::fault::Fault;
    use crate::xml::{decode_method_call, decode_method_response};

    #[test]
    fn encodes_string_result() {
        let xml = encode_response(&MethodResponse::Success(Value::from("0")));
        assert_eq!(
            xml,
            "<?xml version=\"1.0\"?><methodResponse><params><param>\
             <value><string>0</string></value></param></params></methodResponse>"
        );
    }

    #[test]
    fn encodes_boolean_result() {
        let xml = encode_response(&MethodResponse::Success(Value::Bool(false)));
        assert!(xml.contains("<value><boolean>0</boolean></value>"));
    }

    #[test]
    fn encodes_fault_struct() {
        let xml = encode_response(&MethodResponse::Fault(Fault::method_not_found("nope")));
        assert!(xml.contains("<fault><value><struct>"));
        assert!(xml.contains("<name>faultCode</name><value><int>-32601</int></value>"));
        assert!(xml.contains("<name>faultString</name><value><string>unknown method: nope</string></value>"));
    }

    #[test]
    fn escapes_markup_in_strings() {
        let xml = encode_response(&MethodResponse::Success(Value::from("<b>&</b>")));
        assert!(xml.contains("<string>&lt;b&gt;&amp;&lt;/b&gt;</string>"));
    }

    #[test]
    fn wide_integers_use_i8() {
        let xml = encode_response(&MethodResponse::Success(Value::Int(1 << 40)));
        assert!(xml.contains("<i8>1099511627776</i8>"));
        let xml = encode_response(&MethodResponse::Success(Value::Int(-5)));
        assert!(xml.contains("<int>-5</int>"));
    }

    #[test]
    fn encoded_array_decodes_back() {
        let value = Value::Array(vec![Value::from("0"), Value::from("3"), Value::Double(0.5)]);
        let xml = encode_response(&MethodResponse::Success(value.clone()));
        let decoded = decode_method_response(xml.as_bytes(), &DecodeLimits::default()).unwrap();
        assert_eq!(decoded, MethodResponse::Success(value));
    }

    #[test]
    fn encoded_call_decodes_back() {
        let call = MethodCall::new("window.delete", vec![Value::from("a & b")]);
        let xml = encode_method_call(&call);
        let decoded = decode_method_call(xml.as_bytes(), &DecodeLimits::default()).unwrap();
        assert_eq!(decoded, call);
    }
}
