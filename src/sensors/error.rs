//! Location provider error types and handling

use crate::core::Locale;
use thiserror::Error;

/// Errors reported by the location provider in place of a fix
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    /// User or platform refused location access
    #[error("Location permission denied")]
    PermissionDenied,
    /// No position could be determined (no GPS signal, provider off)
    #[error("Position unavailable")]
    PositionUnavailable,
    /// No fix arrived within the configured timeout
    #[error("Location request timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u32 },
    /// The platform has no location provider at all
    #[error("Geolocation not supported")]
    Unsupported,
    /// Any other platform error code
    #[error("Unknown location error (code {code})")]
    Unknown { code: u16 },
}

/// Result type for sensor operations
pub type SensorResult<T> = Result<T, LocationError>;

impl LocationError {
    /// Map a platform position-error code (1 = denied, 2 = unavailable, 3 = timeout)
    pub fn from_code(code: u16, timeout_ms: u32) -> Self {
        match code {
            1 => LocationError::PermissionDenied,
            2 => LocationError::PositionUnavailable,
            3 => LocationError::Timeout { timeout_ms },
            other => LocationError::Unknown { code: other },
        }
    }

    /// Whether the provider may still deliver fixes later in the session
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            LocationError::PermissionDenied | LocationError::Unsupported
        )
    }

    /// Message suitable for showing to the user
    pub fn user_message(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (LocationError::PermissionDenied, Locale::PortugueseBr) => {
                "Permissão de localização negada. Habilite nas configurações."
            }
            (LocationError::PermissionDenied, Locale::English) => {
                "Location permission denied. Enable it in your settings."
            }
            (LocationError::PositionUnavailable, Locale::PortugueseBr) => {
                "Localização indisponível. Verifique seu GPS."
            }
            (LocationError::PositionUnavailable, Locale::English) => {
                "Location unavailable. Check your GPS."
            }
            (LocationError::Timeout { .. }, Locale::PortugueseBr) => {
                "Tempo esgotado ao buscar localização."
            }
            (LocationError::Timeout { .. }, Locale::English) => {
                "Timed out while fetching location."
            }
            (LocationError::Unsupported, Locale::PortugueseBr) => {
                "Geolocalização não suportada pelo navegador"
            }
            (LocationError::Unsupported, Locale::English) => {
                "Geolocation is not supported on this device"
            }
            (LocationError::Unknown { .. }, Locale::PortugueseBr) => {
                "Erro desconhecido ao buscar localização."
            }
            (LocationError::Unknown { .. }, Locale::English) => {
                "Unknown error while fetching location."
            }
        }
    }
}
