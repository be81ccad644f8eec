//! View-model errors.

use game_core::{ErrorSeverity, GameError};

/// Errors raised while building or reconfiguring minimap view-models.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ViewModelError {
    /// A mandatory collaborator was not supplied to the builder.
    #[error("{role} is required to build a creature map view-model")]
    MissingCollaborator {
        /// Which collaborator is missing (`creature` or `hero`).
        role: &'static str,
    },

    /// Zoom scale must be finite and strictly positive.
    #[error("invalid map scale {scale}: must be finite and greater than zero")]
    InvalidScale {
        /// The rejected value.
        scale: f32,
    },
}

impl GameError for ViewModelError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::MissingCollaborator { .. } | Self::InvalidScale { .. } => {
                ErrorSeverity::Validation
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingCollaborator { .. } => "VM_MISSING_COLLABORATOR",
            Self::InvalidScale { .. } => "VM_INVALID_SCALE",
        }
    }
}

pub type Result<T> = std::result::Result<T, ViewModelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_are_validation_failures_with_stable_codes() {
        let missing = ViewModelError::MissingCollaborator { role: "hero" };
        assert_eq!(missing.severity(), ErrorSeverity::Validation);
        assert_eq!(missing.error_code(), "VM_MISSING_COLLABORATOR");
        assert_eq!(
            missing.to_string(),
            "hero is required to build a creature map view-model"
        );

        let scale = ViewModelError::InvalidScale { scale: -2.0 };
        assert_eq!(scale.error_code(), "VM_INVALID_SCALE");
        assert!(!scale.severity().is_recoverable());
    }
}
