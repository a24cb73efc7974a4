#[derive(Debug, derive_more::Display)]
pub enum CallError {
    #[display("The remote '{method}' call got no reply within {timeout_ms} ms")]
    Timeout { method: &'static str, timeout_ms: u128 },
}

impl std::error::Error for CallError {}

#[derive(Debug, derive_more::Display)]
pub enum ConfigError {
    #[display("Provided invalid value. Expected [{expected}], but given [{actual}]")]
    InvalidValue {
        expected: &'static str,
        actual: String,
    },
}

impl std::error::Error for ConfigError {}
