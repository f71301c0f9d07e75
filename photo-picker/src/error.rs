use std::fmt;

use crate::picker::{ACCESS_DENIED_MESSAGE, NO_CAMERA_MESSAGE};

/// Central error type for the photo picker
#[derive(Debug)]
pub enum PickerError {
    /// The photo library refused access (e.g. missing permission)
    AccessDenied(String),
    /// Album or asset does not exist (anymore)
    NotFound(String),
    /// Filesystem error
    Io(std::io::Error),
    /// Decoding or encoding an image failed
    Image(String),
    /// Selection is already at its configured maximum
    SelectionLimit { maximum: usize },
    /// User dismissed the camera without taking a photo
    Cancelled(String),
    /// Camera did not deliver a result in time
    Timeout(String),
    /// Feature not available on this platform
    PlatformNotSupported(String),
    /// Invalid picker configuration
    Config(String),
    /// General error
    Other(String),
}

impl fmt::Display for PickerError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PickerError::AccessDenied(msg) => write!(f, "Access denied: {}", msg),
            PickerError::NotFound(msg) => write!(f, "Not found: {}", msg),
            PickerError::Io(e) => write!(f, "IO error: {}", e),
            PickerError::Image(msg) => write!(f, "Image error: {}", msg),
            PickerError::SelectionLimit { maximum } => {
                write!(f, "Selection limit of {} reached", maximum)
            }
            PickerError::Cancelled(msg) => write!(f, "Cancelled: {}", msg),
            PickerError::Timeout(msg) => write!(f, "Timeout: {}", msg),
            PickerError::PlatformNotSupported(msg) => write!(f, "Platform not supported: {}", msg),
            PickerError::Config(msg) => write!(f, "Configuration error: {}", msg),
            PickerError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for PickerError {}

impl From<std::io::Error> for PickerError {
    fn from(e: std::io::Error) -> Self {
        if e.kind() == std::io::ErrorKind::PermissionDenied {
            PickerError::AccessDenied(e.to_string())
        } else {
            PickerError::Io(e)
        }
    }
}

impl From<image::ImageError> for PickerError {
    fn from(e: image::ImageError) -> Self {
        PickerError::Image(e.to_string())
    }
}

impl From<toml::de::Error> for PickerError {
    fn from(e: toml::de::Error) -> Self {
        PickerError::Config(e.to_string())
    }
}

/// User-facing messages for the picker UI
impl PickerError {
    pub fn user_message(&self) -> String {
        match self {
            PickerError::AccessDenied(_) => ACCESS_DENIED_MESSAGE.to_string(),
            PickerError::NotFound(msg) => format!("{} was not found.", msg),
            PickerError::Io(_) => "Error accessing files. Please check app permissions.".to_string(),
            PickerError::Image(_) => "Error processing image.".to_string(),
            PickerError::SelectionLimit { maximum } => {
                format!("You can select up to {} photos.", maximum)
            }
            PickerError::Cancelled(_) => "Cancelled.".to_string(),
            PickerError::Timeout(_) => "The camera did not respond in time.".to_string(),
            PickerError::PlatformNotSupported(_) => NO_CAMERA_MESSAGE.to_string(),
            PickerError::Config(msg) => format!("Invalid picker settings: {}", msg),
            PickerError::Other(msg) => msg.clone(),
        }
    }

    pub fn is_access_denied(&self) -> bool {
        matches!(self, PickerError::AccessDenied(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_denied_io_maps_to_access_denied() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope");
        let err = PickerError::from(io);
        assert!(err.is_access_denied());
        assert_eq!(
            err.user_message(),
            "This application doesn't have access to your photos"
        );
    }

    #[test]
    fn test_other_io_stays_io() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert!(matches!(PickerError::from(io), PickerError::Io(_)));
    }
}
