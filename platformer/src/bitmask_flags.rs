use num_traits::{One, PrimInt};

/// Trait implemented by flag enums declared with [`define_bitmask_flags!`].
///
/// The enum's discriminant (via `#[repr(u8)]`) is the bit index; the backing
/// integer type is chosen via the associated `Storage`.
pub trait FlagBitmask {
    type Storage: PrimInt;

    fn bit_index(&self) -> u8;

    fn mask(&self) -> Self::Storage {
        // NOTE: `bit_index()` must be < number of bits in `Storage`.
        Self::Storage::one() << (self.bit_index() as usize)
    }
}

/// A plain bitmask of independently combinable flags.
///
/// Used for character states, character areas and per-move contact edges.
/// Comparing two sets with `==` compares the raw bits.
#[derive(Default, Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct BitmaskFlags<T: PrimInt> {
    pub bits: T,
}

impl<T: PrimInt> BitmaskFlags<T> {
    pub fn new(bits: T) -> Self {
        Self { bits }
    }

    /// Builds a set containing exactly `tags`.
    pub fn from_tags<U: FlagBitmask<Storage = T> + Copy>(tags: &[U]) -> Self {
        let mut set = Self::new(T::zero());
        set.add_many(tags);
        set
    }

    // --- Single Tag Operations ---
    pub fn add<U: FlagBitmask<Storage = T>>(&mut self, tag: U) {
        self.bits = self.bits | tag.mask();
    }

    pub fn remove<U: FlagBitmask<Storage = T>>(&mut self, tag: U) {
        self.bits = self.bits & !tag.mask();
    }

    pub fn has<U: FlagBitmask<Storage = T>>(&self, tag: U) -> bool {
        (self.bits & tag.mask()) != T::zero()
    }

    /// True when `tag` is the only flag set.
    pub fn is_exactly<U: FlagBitmask<Storage = T>>(&self, tag: U) -> bool {
        self.bits == tag.mask()
    }

    // --- Bulk Operations ---
    pub fn add_many<U: FlagBitmask<Storage = T> + Copy>(&mut self, tags: &[U]) {
        for &tag in tags {
            self.add(tag);
        }
    }

    pub fn remove_many<U: FlagBitmask<Storage = T> + Copy>(&mut self, tags: &[U]) {
        for &tag in tags {
            self.remove(tag);
        }
    }

    // --- Logic Gates ---
    pub fn has_all<U: FlagBitmask<Storage = T> + Copy>(&self, tags: &[U]) -> bool {
        if tags.is_empty() {
            return true;
        }
        let combined = tags.iter().fold(T::zero(), |acc, t| acc | t.mask());
        (self.bits & combined) == combined
    }

    pub fn has_any<U: FlagBitmask<Storage = T> + Copy>(&self, tags: &[U]) -> bool {
        if tags.is_empty() {
            return false;
        }
        let combined = tags.iter().fold(T::zero(), |acc, t| acc | t.mask());
        (self.bits & combined) != T::zero()
    }

    pub fn is_empty(&self) -> bool {
        self.bits == T::zero()
    }

    pub fn clear(&mut self) {
        self.bits = T::zero();
    }
}

/// Declare a bitmask-backed enum and implement `FlagBitmask` for it.
///
/// The generated enum also gets an `ALL` slice listing every variant in bit
/// order, which is handy for logging a set flag by flag.
///
/// Example:
/// ```rust
/// platformer::define_bitmask_flags!(Surface, u8, {
///     Ice,
///     Mud,
///     Conveyor,
/// });
/// ```
#[macro_export]
macro_rules! define_bitmask_flags {
    ($name:ident, $storage:ty, { $($variant:ident),* $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(u8)]
        pub enum $name {
            $($variant),*
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),*];
        }

        impl $crate::bitmask_flags::FlagBitmask for $name {
            type Storage = $storage;

            fn bit_index(&self) -> u8 {
                *self as u8
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    define_bitmask_flags!(Probe, u8, { Alpha, Beta, Gamma });

    #[test]
    fn add_remove_has() {
        let mut set: BitmaskFlags<u8> = BitmaskFlags::default();
        assert!(set.is_empty());

        set.add(Probe::Beta);
        assert!(set.has(Probe::Beta));
        assert!(!set.has(Probe::Alpha));
        assert!(set.is_exactly(Probe::Beta));

        set.add(Probe::Gamma);
        assert!(!set.is_exactly(Probe::Beta));
        assert!(set.has_all(&[Probe::Beta, Probe::Gamma]));
        assert!(!set.has_all(&[Probe::Alpha, Probe::Gamma]));
        assert!(set.has_any(&[Probe::Alpha, Probe::Gamma]));

        set.remove_many(&[Probe::Beta, Probe::Gamma]);
        assert!(set.is_empty());
    }

    #[test]
    fn from_tags_matches_manual_bits() {
        let set = BitmaskFlags::from_tags(&[Probe::Alpha, Probe::Gamma]);
        assert_eq!(set.bits, 0b101);
        assert_eq!(Probe::ALL.len(), 3);
    }
}
