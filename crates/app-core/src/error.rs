use thiserror::Error;

/// Errors surfaced by the scene. None of these are fatal to the embedder:
/// frontends render them as on-screen messages or fall back to a flat sky.
#[derive(Debug, Error)]
pub enum SceneError {
    /// The platform has no usable GPU adapter or device. Fatal for the
    /// scene; frontends must show an error panel and skip renderer setup.
    #[error("no compatible GPU adapter available")]
    AdapterUnavailable,

    /// One or more faces of a panorama failed to fetch or decode.
    #[error("failed to load panorama '{name}': {reason}")]
    TextureLoad { name: String, reason: String },

    /// The six decoded faces disagree on dimensions or are not square.
    #[error("panorama '{name}' has mismatched face dimensions")]
    FaceDimensions { name: String },

    /// Catch-all for unexpected setup failures.
    #[error("scene initialization failed: {0}")]
    Init(String),
}
