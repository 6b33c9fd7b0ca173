pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid topology snapshot: {message}")]
    Snapshot { message: String },

    #[error("Device record has no usable id")]
    MissingId,

    #[error("Unknown node: {id}")]
    UnknownNode { id: String },

    #[error("Unknown edge: {id}")]
    UnknownEdge { id: String },

    #[error("Node already exists: {id}")]
    DuplicateNode { id: String },

    #[error("Edge already exists: {id}")]
    DuplicateEdge { id: String },

    #[error("Cannot connect {id} to itself")]
    SelfConnection { id: String },
}
