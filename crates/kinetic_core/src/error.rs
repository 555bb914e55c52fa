//! Errors raised when binding a motion object to its host

use crate::host::ElementId;
use thiserror::Error;

/// Construction-time failures. Per-frame problems never surface as errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MotionError {
    #[error("container element {0:?} is not attached")]
    MissingContainer(ElementId),
    #[error("element {0:?} is not attached")]
    MissingElement(ElementId),
}

pub type Result<T> = std::result::Result<T, MotionError>;
