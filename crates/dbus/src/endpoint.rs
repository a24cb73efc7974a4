//! The bus coordinates of the gdigi parameter object.

pub const GDIGI_SERVICE: &str = "gdigi.server";
pub const GDIGI_OBJECT_PATH: &str = "/gdigi/parameter/Object";
pub const GDIGI_INTERFACE: &str = "gdigi.parameter.io";

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display("{service} {path} {interface}")]
pub struct Endpoint {
    pub service: String,
    pub path: String,
    pub interface: String,
}

impl Default for Endpoint {
    fn default() -> Self {
        Self {
            service: GDIGI_SERVICE.to_string(),
            path: GDIGI_OBJECT_PATH.to_string(),
            interface: GDIGI_INTERFACE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_endpoint() {
        let endpoint = Endpoint::default();
        assert_eq!(endpoint.service, "gdigi.server");
        assert_eq!(endpoint.path, "/gdigi/parameter/Object");
        assert_eq!(endpoint.interface, "gdigi.parameter.io");
    }

    #[test]
    fn display_lists_coordinates() {
        assert_eq!(
            Endpoint::default().to_string(),
            "gdigi.server /gdigi/parameter/Object gdigi.parameter.io"
        );
    }
}
