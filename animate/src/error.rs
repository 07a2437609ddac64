/// Errors that may occur while building a rig from configuration.
#[derive(Debug, thiserror::Error)]
pub enum RigError {
    #[error("Failed to read rig file")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse rig")]
    Parse(#[from] ron::Error),

    #[error("Segment '{0}' is declared twice")]
    DuplicateSegment(String),

    /// Parents must be declared before their children.
    #[error("Segment '{segment}' refers to unknown parent '{parent}'")]
    UnknownParent { segment: String, parent: String },

    #[error("Joint {joint} drives unknown segment '{segment}'")]
    UnknownSegment { joint: usize, segment: String },
}
