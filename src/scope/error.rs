use thiserror::Error;
#[derive(Debug, Error)]
pub enum ScopeError {
    #[error("event carries no samples")]
    EmptyEvent,
    #[error("frame header declares {0} samples, above the sanity limit")]
    OversizedFrame(u32),
    #[error("read error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to render plot: {0}")]
    Plot(String),
}
impl<E: std::error::Error + Send + Sync + 'static> From<plotters::drawing::DrawingAreaErrorKind<E>>
    for ScopeError
{
    fn from(value: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        ScopeError::Plot(format!("{value:?}"))
    }
}
impl From<image::ImageError> for ScopeError {
    fn from(value: image::ImageError) -> Self {
        ScopeError::Plot(value.to_string())
    }
}
