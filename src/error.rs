use std::error::Error;
use std::fmt;

/// Errors raised while assembling a run. All of them are fatal at start-up;
/// the search itself never fails once it is running.
#[derive(Debug, Clone, PartialEq)]
pub enum GentourError {
    /// Coordinates and names files have different line counts
    DatasetMismatch { coordinates: usize, names: usize },
    /// The configured start location is not in the names file
    UnknownStartLocation(String),
    /// A parameter is outside its valid range
    InvalidConfiguration(String),
}

impl fmt::Display for GentourError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GentourError::DatasetMismatch { coordinates, names } => write!(
                f,
                "Dataset mismatch: {} coordinates but {} names",
                coordinates, names
            ),
            GentourError::UnknownStartLocation(name) => {
                write!(f, "Unknown start location: {}", name)
            }
            GentourError::InvalidConfiguration(message) => {
                write!(f, "Invalid configuration: {}", message)
            }
        }
    }
}

impl Error for GentourError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_dataset_mismatch() {
        let err = GentourError::DatasetMismatch {
            coordinates: 27,
            names: 26,
        };
        assert_eq!(
            err.to_string(),
            "Dataset mismatch: 27 coordinates but 26 names"
        );
    }

    #[test]
    fn test_display_unknown_start() {
        let err = GentourError::UnknownStartLocation("Atlantis".to_string());
        assert_eq!(err.to_string(), "Unknown start location: Atlantis");
    }

    #[test]
    fn test_display_invalid_configuration() {
        let err = GentourError::InvalidConfiguration("population_size=0".to_string());
        assert!(err.to_string().starts_with("Invalid configuration:"));
    }
}
