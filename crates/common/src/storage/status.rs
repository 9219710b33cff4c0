use serde::{Deserialize, Serialize};

/// Status codes carried on every response of the RPC surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Code {
    #[default]
    Ok,
    NotFound,
    PermissionDenied,
    InvalidArgument,
    NotSupported,
    Unimplemented,
    Internal,
}

/// A structured status: code plus a human-readable message.
///
/// Operations never surface transport errors directly; they are mapped
/// into a `Status` so that clients see a uniform envelope regardless of
/// which backend failed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    pub code: Code,
    #[serde(default)]
    pub message: String,
}

impl Status {
    pub fn new(code: Code, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn ok() -> Self {
        Self::new(Code::Ok, "")
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(Code::NotFound, message)
    }

    pub fn permission_denied(message: impl Into<String>) -> Self {
        Self::new(Code::PermissionDenied, message)
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(Code::InvalidArgument, message)
    }

    pub fn not_supported(message: impl Into<String>) -> Self {
        Self::new(Code::NotSupported, message)
    }

    pub fn unimplemented(message: impl Into<String>) -> Self {
        Self::new(Code::Unimplemented, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(Code::Internal, message)
    }

    pub fn is_ok(&self) -> bool {
        self.code == Code::Ok
    }

    /// Translate a non-OK downstream status into the status the gateway
    /// reports for it: `NotFound` passes through, everything else
    /// becomes `Internal` with the given context.
    ///
    /// Must not be called with an OK status; those pass through the
    /// operations unchanged.
    pub fn downstream(&self, context: &str) -> Status {
        match self.code {
            Code::NotFound => Status::not_found(context.to_string()),
            _ => Status::internal(format!(
                "{}: downstream status {:?}: {}",
                context, self.code, self.message
            )),
        }
    }
}
