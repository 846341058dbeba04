//! Opaque ID newtype for technology cells.
//!
//! [`CellId`] is a thin `u32` wrapper used as an index into the technology's
//! cell list. It is `Copy`, `Hash`, and `Serialize`/`Deserialize`.

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
        pub struct $name(u32);

        impl $name {
            /// Creates an ID from a raw `u32` index.
            pub fn from_raw(index: u32) -> Self {
                Self(index)
            }

            /// Returns the raw `u32` index.
            pub fn as_raw(self) -> u32 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id!(
    /// Opaque, copyable ID for a cell definition in a [`Technology`](crate::Technology).
    CellId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip() {
        let id = CellId::from_raw(12);
        assert_eq!(id.as_raw(), 12);
        assert_eq!(format!("{id}"), "12");
    }

    #[test]
    fn ordering_follows_index() {
        assert!(CellId::from_raw(1) < CellId::from_raw(2));
    }
}
