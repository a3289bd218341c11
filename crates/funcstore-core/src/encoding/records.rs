//! JSON encoding of [`App`] and [`Route`].

use crate::types::{App, Route};
use crate::CoreError;

use super::{Decoder, Encoder};

impl Encoder for App {
    fn encode(&self) -> Result<Vec<u8>, CoreError> {
        Ok(serde_json::to_vec(self)?)
    }
}

impl Decoder for App {
    fn decode(bytes: &[u8]) -> Result<Self, CoreError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

impl Encoder for Route {
    fn encode(&self) -> Result<Vec<u8>, CoreError> {
        Ok(serde_json::to_vec(self)?)
    }
}

impl Decoder for Route {
    fn decode(bytes: &[u8]) -> Result<Self, CoreError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Format, RouteType};

    #[test]
    fn test_route_json_field_names() {
        let route = Route::new("myapp", "/hello").with_type(RouteType::Async).with_format(Format::Http);
        let json: serde_json::Value =
            serde_json::from_slice(&route.encode().expect("encode failed")).expect("invalid json");

        assert_eq!(json["app_name"], "myapp");
        assert_eq!(json["name"], "/hello");
        assert_eq!(json["type"], "async");
        assert_eq!(json["format"], "http");
    }

    #[test]
    fn test_route_decode_fills_defaults() {
        let route = Route::decode(br#"{"app_name":"myapp","name":"/hello"}"#).expect("decode failed");
        assert_eq!(route, Route::new("myapp", "/hello"));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(App::decode(b"\xff\x00"), Err(CoreError::Encoding(_))));
        assert!(matches!(Route::decode(br#"{"name":"/x"}"#), Err(CoreError::Encoding(_))));
    }
}
