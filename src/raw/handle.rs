use core::num::NonZero;

/// Storage width of a [`Handle`].
///
/// Unit tests shrink it to 16 bits so that an arena can actually be driven to
/// [`Handle::MAX`] and the capacity panic in `Arena::alloc()` is exercised.
/// Normal builds use 32 bits, which caps a map at `u32::MAX - 1` entries.
#[cfg(test)]
type RawHandle = u16;
#[cfg(not(test))]
type RawHandle = u32;

/// Slot index into an [`Arena`](super::arena::Arena).
///
/// Stored as `index + 1` so that the zero niche makes `Option<Handle>`, which
/// every node link is, the same size as `Handle`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub(crate) struct Handle(NonZero<RawHandle>);

impl Handle {
    /// Largest slot index a handle can carry.
    pub(crate) const MAX: usize = (RawHandle::MAX - 1) as usize;

    #[inline]
    pub(crate) const fn from_index(index: usize) -> Self {
        assert!(index <= Self::MAX, "`Handle::from_index()` - `index` > `Handle::MAX`!");
        #[allow(clippy::cast_possible_truncation)]
        let offset = (index + 1) as RawHandle;
        match NonZero::new(offset) {
            Some(raw) => Self(raw),
            None => panic!("`Handle::from_index()` - offset index is zero!"),
        }
    }

    #[inline]
    pub(crate) const fn to_index(self) -> usize {
        (self.0.get() - 1) as usize
    }
}
