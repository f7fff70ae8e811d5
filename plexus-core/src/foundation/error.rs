/// Convenience result type used across the crate.
pub type PlexusResult<T> = Result<T, PlexusError>;

/// Top-level error taxonomy.
///
/// `Configuration`, `Lookup` and `UnknownGrouping` are authoring defects: the topology and the
/// scene scripts are fixed, so none of them is recoverable at runtime.
#[derive(thiserror::Error, Debug)]
pub enum PlexusError {
    /// Malformed graph model, grouping, scene script or style configuration.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Query for a node or edge that is not in the model.
    #[error("lookup error: {0}")]
    Lookup(String),

    /// A scene step references a grouping the model does not define.
    #[error("unknown grouping '{0}'")]
    UnknownGrouping(String),

    /// The renderer reported a failure while executing a call.
    #[error("render error: {0}")]
    Render(String),

    /// Lifecycle misuse of a scene run.
    #[error("sequencing error: {0}")]
    Sequencing(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PlexusError {
    /// Build a [`PlexusError::Configuration`] value.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Build a [`PlexusError::Lookup`] value.
    pub fn lookup(msg: impl Into<String>) -> Self {
        Self::Lookup(msg.into())
    }

    /// Build a [`PlexusError::UnknownGrouping`] value.
    pub fn unknown_grouping(name: impl Into<String>) -> Self {
        Self::UnknownGrouping(name.into())
    }

    /// Build a [`PlexusError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`PlexusError::Sequencing`] value.
    pub fn sequencing(msg: impl Into<String>) -> Self {
        Self::Sequencing(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
