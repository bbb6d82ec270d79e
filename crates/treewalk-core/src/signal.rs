//! Flow-control signals returned by hooks and visitors.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::BoxError;

/// Signal returned by a hook or visitor to steer the traversal.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ControlSignal {
    /// Keep going.
    #[default]
    Continue,
    /// Stop iterating the current directory's remaining children.
    SkipSiblings,
    /// Do not descend into this directory. Only meaningful from `pre_dir`.
    SkipSubtree,
    /// Stop the whole traversal.
    Terminate,
}

impl ControlSignal {
    /// Check if this signal ends the traversal.
    pub fn is_terminate(self) -> bool {
        self == ControlSignal::Terminate
    }
}

/// Conversion from a callback's return value into an optional signal.
///
/// Returning nothing (`()` or `None`) means [`ControlSignal::Continue`].
/// A `Result` error becomes a callback failure that unwinds the traversal.
pub trait IntoSignal {
    /// Convert into an optional signal, or the callback's error.
    fn into_signal(self) -> Result<Option<ControlSignal>, BoxError>;
}

impl IntoSignal for () {
    fn into_signal(self) -> Result<Option<ControlSignal>, BoxError> {
        Ok(None)
    }
}

impl IntoSignal for ControlSignal {
    fn into_signal(self) -> Result<Option<ControlSignal>, BoxError> {
        Ok(Some(self))
    }
}

impl IntoSignal for Option<ControlSignal> {
    fn into_signal(self) -> Result<Option<ControlSignal>, BoxError> {
        Ok(self)
    }
}

impl<T, E> IntoSignal for Result<T, E>
where
    T: IntoSignal,
    E: Into<BoxError>,
{
    fn into_signal(self) -> Result<Option<ControlSignal>, BoxError> {
        match self {
            Ok(value) => value.into_signal(),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_is_no_signal() {
        assert_eq!(().into_signal().unwrap(), None);
    }

    #[test]
    fn test_signal_passthrough() {
        assert_eq!(
            ControlSignal::SkipSubtree.into_signal().unwrap(),
            Some(ControlSignal::SkipSubtree)
        );
        assert_eq!(Some(ControlSignal::Terminate).into_signal().unwrap(), Some(ControlSignal::Terminate));
    }

    #[test]
    fn test_result_error_propagates() {
        let ok: Result<ControlSignal, std::io::Error> = Ok(ControlSignal::SkipSiblings);
        assert_eq!(ok.into_signal().unwrap(), Some(ControlSignal::SkipSiblings));

        let err: Result<(), std::io::Error> = Err(std::io::Error::other("nope"));
        assert!(err.into_signal().is_err());
    }

    #[test]
    fn test_signal_parse() {
        assert_eq!("SKIP_SUBTREE".parse::<ControlSignal>().unwrap(), ControlSignal::SkipSubtree);
        assert_eq!(ControlSignal::default(), ControlSignal::Continue);
        assert!(ControlSignal::Terminate.is_terminate());
    }
}
