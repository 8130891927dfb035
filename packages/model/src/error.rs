use crate::element::ElementType;
use thiserror::Error;

pub type ModelResult<T> = Result<T, ModelError>;

/// Errors raised while loading or validating a document
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Malformed document JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Expected an array or an object at the top of the document, found {0}")]
    NotADocument(&'static str),

    #[error("Document has no root element")]
    MissingRoot,

    #[error("Document has {0} root elements, expected exactly one")]
    MultipleRoots(usize),

    #[error("Root element {id} has type {kind}, expected __body")]
    RootNotBody { id: String, kind: ElementType },

    #[error("Element {id} of type {kind} has content of the wrong shape")]
    ContentMismatch { id: String, kind: ElementType },

    #[error("Duplicate element id: {0}")]
    DuplicateId(String),

    #[error("Body element {0} cannot be nested")]
    NestedBody(String),

    #[error("Element {0} has a position or size that is not a finite number")]
    InvalidGeometry(String),
}

/// Errors raised by structural tree operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TreeError {
    #[error("Element not found: {0}")]
    NotFound(String),

    #[error("Element {0} cannot have children")]
    NotAContainer(String),

    #[error("The root element cannot be removed")]
    RootImmutable,
}
