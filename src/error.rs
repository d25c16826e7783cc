use thiserror::Error;

/// The ways a map operation can refuse to proceed.
///
/// Both variants report a broken caller contract rather than a transient
/// condition; the map is left exactly as it was before the failing call.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Error)]
pub enum MapError {
    /// A bounds-checked lookup ([`at`](crate::AvlMap::at)) named a key that is
    /// not in the map.
    #[error("key not found in map")]
    KeyNotFound,

    /// A cursor was stepped past either end, dereferenced at past-the-end, or
    /// does not denote a live entry of the map it was used with.
    #[error("cursor does not denote a valid position in this map")]
    InvalidIterator,
}
