//! Error types

use thiserror::Error;

use crate::property::Property;

/// Failure reported by a [`Target`](crate::target::Target) when it cannot
/// apply a value
pub type ApplyError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised while configuring or driving transitions
#[derive(Error, Debug)]
pub enum TransitError {
    /// A controller was built with nothing to animate
    #[error("controller has no property ranges and no effect")]
    EmptyController,

    /// Neither the transition nor its controller set knows a target
    #[error("no target bound to `{0}`")]
    NoTarget(String),

    /// A setter that reads the current value was used before a target was set
    #[error("`{property}` needs a target to read its start value or geometry from")]
    TargetUnresolved { property: Property },

    /// The target cannot report the current value of a property
    #[error("target has no current value for `{property}`")]
    UnknownValue { property: Property },

    /// A group transition was requested on a target without children
    #[error("target is not a container, group transitions need child elements")]
    NotAContainer,

    /// The target rejected a value
    #[error("failed to apply `{property}`: {source}")]
    Apply {
        property: Property,
        #[source]
        source: ApplyError,
    },
}

pub type Result<T> = std::result::Result<T, TransitError>;
