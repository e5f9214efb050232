use super::handle::Handle;

/// Number of nodes in a subtree.
///
/// Shares the handle's representation: a subtree can never hold more nodes
/// than the arena has slots.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(transparent)]
pub(crate) struct Size(Handle);

impl Size {
    pub(crate) const MAX: usize = Handle::MAX;
    pub(crate) const ZERO: Self = Self::from_usize(0);
    pub(crate) const ONE: Self = Self::from_usize(1);

    #[inline]
    pub(crate) const fn from_usize(size: usize) -> Self {
        assert!(size <= Self::MAX, "`Size::from_usize()` - `size` > `Size::MAX`!");
        Self(Handle::from_index(size))
    }

    #[inline]
    pub(crate) const fn to_usize(self) -> usize {
        self.0.to_index()
    }

    #[inline]
    pub(crate) const fn increment(self) -> Self {
        Self::from_usize(self.to_usize() + 1)
    }

    #[inline]
    pub(crate) const fn decrement(self) -> Self {
        assert!(self.to_usize() > 0, "`Size::decrement()` - `size` is zero!");
        Self::from_usize(self.to_usize() - 1)
    }

    /// Size of a node whose children have the given sizes.
    #[inline]
    pub(crate) const fn parent_of(left: Self, right: Self) -> Self {
        Self::from_usize(left.to_usize() + right.to_usize() + 1)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use static_assertions::assert_eq_size;

    assert_eq_size!(Size, Option<Size>);
    assert_eq_size!(Size, Handle);

    #[test]
    #[should_panic(expected = "`Size::from_usize()` - `size` > `Size::MAX`!")]
    fn size_past_max() {
        let _ = Size::from_usize(Size::MAX + 1);
    }

    #[test]
    #[should_panic(expected = "`Size::decrement()` - `size` is zero!")]
    fn decrement_zero() {
        let _ = Size::ZERO.decrement();
    }

    #[test]
    fn parent_counts_itself() {
        assert_eq!(Size::parent_of(Size::ZERO, Size::ZERO), Size::ONE);
        assert_eq!(Size::parent_of(Size::from_usize(3), Size::from_usize(4)).to_usize(), 8);
    }

    proptest! {
        #[test]
        fn increment_then_decrement(size in 0..Size::MAX) {
            let s = Size::from_usize(size);
            prop_assert_eq!(s.increment().decrement(), s);
            prop_assert_eq!(s.increment().to_usize(), size + 1);
        }
    }
}
