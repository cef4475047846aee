//! Request lifecycle state shared by the view coordinators.

/// The four states a data request moves through on screen.
///
/// `Idle` doubles as "no data to show": a fetch that legitimately returned
/// nothing resolves back to `Idle` so rendering code shows placeholders, not
/// an error banner. `Failed` is reserved for futures that never resolved.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum RequestLifecycle<T> {
    #[default]
    Idle,
    Loading,
    Succeeded(T),
    Failed,
}

impl<T> RequestLifecycle<T> {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Reference to the payload when the request has succeeded.
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Succeeded(value) => Some(value),
            _ => None,
        }
    }
}
