//! Error type for field construction and window startup.

use std::fmt;

#[derive(Debug)]
pub enum Error {
    /// The field needs at least a 2x2 area so spawn positions in [1, size - 1] exist.
    InvalidDimensions { width: u32, height: u32 },
    /// The window or its drawing surface could not be created.
    Window(eframe::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidDimensions { width, height } => write!(
                f,
                "Invalid field dimensions {}x{}: width and height must both be at least 2",
                width, height
            ),
            Error::Window(e) => write!(f, "Failed to create window: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Window(e) => Some(e),
            _ => None,
        }
    }
}

impl From<eframe::Error> for Error {
    fn from(e: eframe::Error) -> Self {
        Error::Window(e)
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_dimensions_message_names_both_sides() {
        let message = Error::InvalidDimensions { width: 1, height: 300 }.to_string();
        assert!(message.contains("1x300"));
    }

    #[test]
    fn invalid_dimensions_has_no_source() {
        let err = Error::InvalidDimensions { width: 0, height: 0 };
        assert!(std::error::Error::source(&err).is_none());
    }
}
