use crate::vr_context::InterfaceId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("error loading the ClientKit library: {0}")]
    Library(String),

    #[error("osvrClientInit returned no context for {0}")]
    Init(String),

    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument {
        name: &'static str,
        reason: &'static str,
    },

    #[error("the client context has been disposed")]
    Disposed,

    #[error("{call} failed with return code {code}")]
    Native { call: &'static str, code: i32 },

    #[error("unknown interface {0:?}")]
    UnknownInterface(InterfaceId),

    #[error("string parameter {0} is not valid UTF-8")]
    InvalidParameter(String),
}

#[derive(Error, Debug)]
pub enum DescriptorError {
    #[error("malformed display descriptor: {0}")]
    Json(#[from] serde_json::Error),

    #[error("display descriptor lists no resolutions")]
    MissingResolution,
}

#[derive(Error, Debug, PartialEq)]
pub enum ProjectionError {
    #[error("field of view must be within (0, pi) radians, got {0}")]
    FieldOfView(f32),

    #[error("aspect ratio must be positive, got {0}")]
    AspectRatio(f32),

    #[error("invalid clipping planes near={near} far={far}")]
    ClippingPlanes { near: f32, far: f32 },
}
