use thiserror::Error;

#[derive(Error, Debug)]
pub enum FormFillError {
    #[error("Invalid field region: {0}")]
    InvalidRegion(String),

    #[error("Draft persistence failed: {0}")]
    Persistence(String),

    #[error("Render surface unavailable: {0}")]
    SurfaceUnavailable(String),
}
