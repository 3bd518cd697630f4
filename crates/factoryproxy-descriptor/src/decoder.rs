use factoryproxy_binary::{BinaryReader, CodecConfig, RawReader, Value};
use serde_json::json;
use tracing::{debug, trace};

use crate::descriptor::{FactoryDescriptor, FactoryKind, FactoryTarget};
use crate::error::{DecodeError, Result};

/// A descriptor read back from the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedFactory {
    pub descriptor: FactoryDescriptor,
    /// Key/value pairs announced by a non-zero reserved field.
    ///
    /// Always empty for bytes produced by this crate's encoder.
    pub properties: Vec<(String, Value)>,
}

impl DecodedFactory {
    /// Render for display: `kind`, `kind_code`, `class_name`, `payload` and
    /// `properties`.
    ///
    /// `properties` is an array of `{"key", "value"}` objects in wire order,
    /// so repeated keys are all kept.
    pub fn to_json(&self) -> serde_json::Value {
        let descriptor = &self.descriptor;
        let properties: Vec<serde_json::Value> = self
            .properties
            .iter()
            .map(|(key, value)| json!({ "key": key, "value": value.to_json() }))
            .collect();
        json!({
            "kind": descriptor.kind().as_str(),
            "kind_code": descriptor.kind().code(),
            "class_name": descriptor.class_name(),
            "payload": descriptor.payload().map_or(serde_json::Value::Null, Value::to_json),
            "properties": properties,
        })
    }

    /// Route the descriptor to the matching resolver method.
    pub fn dispatch<F: FactoryResolver + ?Sized>(
        &self,
        resolver: &mut F,
    ) -> std::result::Result<F::Output, F::Error> {
        let payload = self.descriptor.payload();
        match self.descriptor.target() {
            FactoryTarget::User(class_name) => resolver.resolve_user(class_name, payload),
            FactoryTarget::Default(id) => resolver.resolve_default(id, payload),
        }
    }
}

/// Remote-side factory resolution, split by factory kind.
pub trait FactoryResolver {
    type Output;
    type Error;

    /// Resolve a user factory by fully-qualified class name.
    fn resolve_user(
        &mut self,
        class_name: &str,
        payload: Option<&Value>,
    ) -> std::result::Result<Self::Output, Self::Error>;

    /// Resolve a factory built into the remote runtime.
    fn resolve_default(
        &mut self,
        id: &str,
        payload: Option<&Value>,
    ) -> std::result::Result<Self::Output, Self::Error>;
}

/// Read a descriptor's four fields.
///
/// A positive reserved field is read as a count of `(string, object)`
/// property pairs following it; zero means no properties.
pub fn decode<R: RawReader + ?Sized>(reader: &mut R) -> Result<DecodedFactory> {
    let code = reader.read_int().map_err(DecodeError::reader)?;
    let kind = FactoryKind::from_code(code).ok_or(DecodeError::UnknownKind(code))?;

    let class_name = reader
        .read_string()
        .map_err(DecodeError::reader)?
        .ok_or(DecodeError::MissingClassName)?;

    let payload = reader.read_object().map_err(DecodeError::reader)?;

    let count = reader.read_int().map_err(DecodeError::reader)?;
    if count < 0 {
        return Err(DecodeError::NegativePropertyCount(count));
    }

    let mut properties = Vec::new();
    for index in 0..count as usize {
        let key = reader
            .read_string()
            .map_err(DecodeError::reader)?
            .ok_or(DecodeError::NullPropertyKey { index })?;
        let value = reader.read_object().map_err(DecodeError::reader)?;
        properties.push((key, value));
    }
    if !properties.is_empty() {
        debug!(
            class_name = %class_name,
            count = properties.len(),
            "descriptor carries reserved properties"
        );
    }

    let descriptor = FactoryDescriptor::new(FactoryTarget::new(kind, class_name), Some(payload))?;
    trace!(
        kind = %descriptor.kind(),
        class_name = descriptor.class_name(),
        "decoded factory descriptor"
    );

    Ok(DecodedFactory {
        descriptor,
        properties,
    })
}

/// Decode a descriptor from the start of `data`.
///
/// Bytes after the descriptor are ignored; the enclosing frame owns them.
pub fn decode_bytes(data: &[u8], config: &CodecConfig) -> Result<DecodedFactory> {
    let mut reader = BinaryReader::with_config(data.to_vec(), *config);
    decode(&mut reader)
}

#[cfg(test)]
mod tests {
    use factoryproxy_binary::{
        BinaryError, BinaryWriter, Field, FieldRecorder, FieldReplay, RawWriter, ReplayError,
    };

    use super::*;
    use crate::encoder::encode;
    use crate::error::DescriptorError;

    fn roundtrip(descriptor: &FactoryDescriptor) -> DecodedFactory {
        let bytes = descriptor.to_bytes().unwrap();
        decode_bytes(&bytes, &CodecConfig::default()).unwrap()
    }

    #[test]
    fn scenario_user_factory_fields_decode() {
        let fields = vec![
            Field::Int(0),
            Field::String(Some("com.example.MyFactory".to_string())),
            Field::Object(Value::Null),
            Field::Int(0),
        ];
        let decoded = decode(&mut FieldReplay::new(fields)).unwrap();

        let original = FactoryDescriptor::user("com.example.MyFactory", None).unwrap();
        assert_eq!(decoded.descriptor, original);
        assert!(decoded.properties.is_empty());
    }

    #[test]
    fn roundtrip_both_kinds_and_payloads() {
        let payloads = [
            None,
            Some(Value::map([("size", 10)])),
            Some(Value::Collection(vec![
                Value::from("a"),
                Value::Null,
                Value::Double(2.5),
            ])),
            Some(Value::String(String::new())),
        ];
        for payload in payloads {
            for descriptor in [
                FactoryDescriptor::user("com.example.MyFactory", payload.clone()).unwrap(),
                FactoryDescriptor::default_factory("built-in-cache-factory", payload.clone())
                    .unwrap(),
            ] {
                let decoded = roundtrip(&descriptor);
                assert_eq!(decoded.descriptor, descriptor);
                assert_eq!(decoded.descriptor.payload(), payload.as_ref());
            }
        }
    }

    #[test]
    fn float_payloads_roundtrip_bitwise() {
        let payloads = [
            Value::Double(f64::NAN),
            Value::Float(f32::NAN),
            Value::Double(-0.0),
            Value::map([("ratio", Value::Double(f64::NAN))]),
        ];
        for payload in payloads {
            let descriptor = FactoryDescriptor::user("a.B", Some(payload)).unwrap();
            let decoded = roundtrip(&descriptor);
            assert_eq!(decoded.descriptor, descriptor);
            assert_eq!(decoded.descriptor.to_bytes().unwrap(), descriptor.to_bytes().unwrap());
        }

        let negative_zero = FactoryDescriptor::user("a.B", Some(Value::Double(-0.0))).unwrap();
        assert_ne!(roundtrip(&negative_zero).descriptor.payload(), Some(&Value::Double(0.0)));
    }

    #[test]
    fn builtin_id_with_dollar_roundtrips() {
        let descriptor =
            FactoryDescriptor::default_factory("org.cache.Factories$Lru", None).unwrap();
        assert_eq!(roundtrip(&descriptor).descriptor, descriptor);
    }

    #[test]
    fn absent_payload_decodes_as_absent() {
        let descriptor = FactoryDescriptor::default_factory("cache", None).unwrap();
        let decoded = roundtrip(&descriptor);
        assert!(decoded.descriptor.payload().is_none());
    }

    #[test]
    fn roundtrip_through_field_recorder() {
        let descriptor =
            FactoryDescriptor::user("com.example.F", Some(Value::map([("k", "v")]))).unwrap();
        let mut recorder = FieldRecorder::new();
        let Ok(()) = encode(&descriptor, &mut recorder);

        let mut replay = FieldReplay::from(recorder);
        let decoded = decode(&mut replay).unwrap();
        assert_eq!(decoded.descriptor, descriptor);
        assert_eq!(replay.remaining(), 0);
    }

    #[test]
    fn unknown_kind_rejected() {
        let fields = [
            Field::Int(2),
            Field::String(Some("x".to_string())),
            Field::Object(Value::Null),
            Field::Int(0),
        ];
        let err = decode(&mut FieldReplay::new(fields)).unwrap_err();
        assert!(matches!(err, DecodeError::UnknownKind(2)));
    }

    #[test]
    fn null_class_name_rejected() {
        let fields = [
            Field::Int(0),
            Field::String(None),
            Field::Object(Value::Null),
            Field::Int(0),
        ];
        let err = decode(&mut FieldReplay::new(fields)).unwrap_err();
        assert!(matches!(err, DecodeError::MissingClassName));
    }

    #[test]
    fn malformed_class_name_rejected() {
        let fields = [
            Field::Int(0),
            Field::String(Some("not a class".to_string())),
            Field::Object(Value::Null),
            Field::Int(0),
        ];
        let err = decode(&mut FieldReplay::new(fields)).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::Descriptor(DescriptorError::InvalidClassName { .. })
        ));
    }

    #[test]
    fn to_json_keeps_repeated_property_keys() {
        let fields = [
            Field::Int(0),
            Field::String(Some("a.B".to_string())),
            Field::Object(Value::map([("size", 10)])),
            Field::Int(2),
            Field::String(Some("k".to_string())),
            Field::Object(Value::Int(1)),
            Field::String(Some("k".to_string())),
            Field::Object(Value::Int(2)),
        ];
        let decoded = decode(&mut FieldReplay::new(fields)).unwrap();
        assert_eq!(decoded.properties.len(), 2);

        let json = decoded.to_json();
        assert_eq!(json["kind"], "user");
        assert_eq!(json["kind_code"], 0);
        assert_eq!(json["class_name"], "a.B");
        assert_eq!(json["payload"], serde_json::json!({"size": 10}));
        assert_eq!(
            json["properties"],
            serde_json::json!([{"key": "k", "value": 1}, {"key": "k", "value": 2}])
        );
    }

    #[test]
    fn to_json_without_properties_has_empty_array() {
        let decoded = roundtrip(&FactoryDescriptor::user("a.B", None).unwrap());
        let json = decoded.to_json();
        assert!(json["payload"].is_null());
        assert_eq!(json["properties"], serde_json::json!([]));
    }

    #[test]
    fn reserved_properties_are_read() {
        let fields = [
            Field::Int(1),
            Field::String(Some("cache".to_string())),
            Field::Object(Value::Null),
            Field::Int(2),
            Field::String(Some("backups".to_string())),
            Field::Object(Value::Int(1)),
            Field::String(Some("name".to_string())),
            Field::Object(Value::from("orders")),
        ];
        let decoded = decode(&mut FieldReplay::new(fields)).unwrap();
        assert_eq!(
            decoded.properties,
            vec![
                ("backups".to_string(), Value::Int(1)),
                ("name".to_string(), Value::from("orders")),
            ]
        );
    }

    #[test]
    fn negative_reserved_count_rejected() {
        let fields = [
            Field::Int(0),
            Field::String(Some("a.B".to_string())),
            Field::Object(Value::Null),
            Field::Int(-3),
        ];
        let err = decode(&mut FieldReplay::new(fields)).unwrap_err();
        assert!(matches!(err, DecodeError::NegativePropertyCount(-3)));
    }

    #[test]
    fn null_property_key_rejected() {
        let fields = [
            Field::Int(0),
            Field::String(Some("a.B".to_string())),
            Field::Object(Value::Null),
            Field::Int(1),
            Field::String(None),
            Field::Object(Value::Null),
        ];
        let err = decode(&mut FieldReplay::new(fields)).unwrap_err();
        assert!(matches!(err, DecodeError::NullPropertyKey { index: 0 }));
    }

    #[test]
    fn missing_reserved_field_is_reader_error() {
        let fields = [
            Field::Int(0),
            Field::String(Some("a.B".to_string())),
            Field::Object(Value::Null),
        ];
        let err = decode(&mut FieldReplay::new(fields)).unwrap_err();
        match err {
            DecodeError::Reader(source) => assert_eq!(
                source.downcast_ref::<ReplayError>(),
                Some(&ReplayError::Exhausted)
            ),
            other => panic!("expected reader error, got {other:?}"),
        }
    }

    #[test]
    fn truncated_bytes_rejected() {
        let bytes = FactoryDescriptor::user("a.B", None)
            .unwrap()
            .to_bytes()
            .unwrap();
        let err = decode_bytes(&bytes[..bytes.len() - 1], &CodecConfig::default()).unwrap_err();
        match err {
            DecodeError::Reader(source) => assert!(matches!(
                source.downcast_ref::<BinaryError>(),
                Some(BinaryError::UnexpectedEof { .. })
            )),
            other => panic!("expected reader error, got {other:?}"),
        }
    }

    #[test]
    fn trailing_bytes_ignored() {
        let descriptor = FactoryDescriptor::user("a.B", Some(Value::Int(4))).unwrap();
        let mut writer = BinaryWriter::new();
        encode(&descriptor, &mut writer).unwrap();
        writer.write_int(99).unwrap();

        let decoded = decode_bytes(writer.as_bytes(), &CodecConfig::default()).unwrap();
        assert_eq!(decoded.descriptor, descriptor);
    }

    #[derive(Default)]
    struct NameResolver;

    impl FactoryResolver for NameResolver {
        type Output = String;
        type Error = std::convert::Infallible;

        fn resolve_user(
            &mut self,
            class_name: &str,
            payload: Option<&Value>,
        ) -> std::result::Result<String, Self::Error> {
            Ok(format!("user:{class_name}:{}", payload.is_some()))
        }

        fn resolve_default(
            &mut self,
            id: &str,
            payload: Option<&Value>,
        ) -> std::result::Result<String, Self::Error> {
            Ok(format!("default:{id}:{}", payload.is_some()))
        }
    }

    #[test]
    fn dispatch_routes_on_kind() {
        let mut resolver = NameResolver;

        let user = roundtrip(&FactoryDescriptor::user("com.example.F", None).unwrap());
        let Ok(out) = user.dispatch(&mut resolver);
        assert_eq!(out, "user:com.example.F:false");

        let builtin = roundtrip(
            &FactoryDescriptor::default_factory("built-in-cache-factory", Some(Value::Int(1)))
                .unwrap(),
        );
        let Ok(out) = builtin.dispatch(&mut resolver);
        assert_eq!(out, "default:built-in-cache-factory:true");
    }
}
