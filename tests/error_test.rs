use tdev::{DeviceError, Result};

#[test]
fn test_error_display() {
    let err = DeviceError::UnknownKind("tpu".to_string());
    assert!(err.to_string().contains("tpu"));
}

#[test]
fn test_invalid_index_display() {
    let err = DeviceError::InvalidIndex {
        input: "cuda:x".to_string(),
        reason: "expected a non-negative integer".to_string(),
    };
    let msg = err.to_string();
    assert!(msg.contains("cuda:x"));
    assert!(msg.contains("non-negative"));
}

#[test]
fn test_result_alias() {
    fn returns_error() -> Result<()> {
        Err(DeviceError::EmptyDevice)
    }
    assert!(returns_error().is_err());
}

#[test]
fn parse_errors_classified() {
    assert!(DeviceError::EmptyDevice.is_parse_error());
    assert!(DeviceError::UnknownKind("x".into()).is_parse_error());
    assert!(!DeviceError::InvalidThreads(0).is_parse_error());
    assert!(!DeviceError::Configuration("x".into()).is_parse_error());
}
