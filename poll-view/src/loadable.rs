use std::fmt::Display;

/// A value read from the contract, as seen while the read is in flight.
///
/// A failed read is kept apart from an empty answer: `Unavailable` carries the
/// reason and is never shown as "no polls" or "0 votes".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Loadable<T> {
    Loading,
    Ready(T),
    Unavailable(String),
}

impl<T> Default for Loadable<T> {
    fn default() -> Self {
        Loadable::Loading
    }
}

impl<T> Loadable<T> {
    pub fn from_result<E: Display>(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Loadable::Ready(value),
            Err(error) => Loadable::Unavailable(error.to_string()),
        }
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Loadable::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_ready(self) -> Option<T> {
        match self {
            Loadable::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Loadable::Loading)
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, Loadable::Unavailable(_))
    }

    pub fn as_ref(&self) -> Loadable<&T> {
        match self {
            Loadable::Loading => Loadable::Loading,
            Loadable::Ready(value) => Loadable::Ready(value),
            Loadable::Unavailable(reason) => Loadable::Unavailable(reason.clone()),
        }
    }

    pub fn map<U, F>(self, f: F) -> Loadable<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Loadable::Loading => Loadable::Loading,
            Loadable::Ready(value) => Loadable::Ready(f(value)),
            Loadable::Unavailable(reason) => Loadable::Unavailable(reason),
        }
    }
}

impl<T> From<Option<T>> for Loadable<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Loadable::Ready(value),
            None => Loadable::Loading,
        }
    }
}
