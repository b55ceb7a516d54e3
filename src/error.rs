#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SectorError {
    #[error("sector radius must be finite and non-negative, got {0}")]
    InvalidRadius(f64),

    #[error("sector view angle range must be finite and positive, got {0}")]
    InvalidViewAngleRange(f64),

    #[error("sector center must have finite coordinates, got ({lat}, {lng})")]
    InvalidCenter { lat: f64, lng: f64 },
}
