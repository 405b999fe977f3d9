use thiserror::Error;

use crate::ast::NodeKind;

#[derive(Debug, Error)]
pub enum Error {
    #[error("i/o error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("parse error: {0}")]
    ParseError(#[from] glsl::parser::ParseError),
    #[error("expected a {expected:?} fragment, found a {found:?} node")]
    ShapeMismatch {
        expected: crate::parse::ParseShape,
        found: NodeKind,
    },
    #[error("expected exactly one entry for {key:?}, found {found}")]
    UniquenessViolation { key: String, found: usize },
    #[error("node {0:?} is detached or deleted and cannot be used here")]
    DetachmentViolation(crate::ast::NodeId),
    #[error("template hole {name:?} {problem}")]
    TemplateHole { name: String, problem: String },
    #[error("index does not agree with the tree structure: {0}")]
    IndexInvariantBroken(String),
    #[error("node {node:?} of kind {found:?} cannot fill a {expected} slot")]
    KindMismatch {
        node: crate::ast::NodeId,
        found: NodeKind,
        expected: String,
    },
    #[error("no function named {0} in this translation unit")]
    NoSuchFunction(String),
    #[error("malformed query path: {0}")]
    MalformedPath(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn unique(key: impl Into<String>, found: usize) -> Self {
        Error::UniquenessViolation {
            key: key.into(),
            found,
        }
    }

    pub(crate) fn hole(name: impl Into<String>, problem: impl Into<String>) -> Self {
        Error::TemplateHole {
            name: name.into(),
            problem: problem.into(),
        }
    }
}
