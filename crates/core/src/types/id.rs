//! Newtype IDs for type-safe entity references.
//!
//! The remote catalog numbers users and products independently, so a bare
//! integer could easily be passed where the other kind was meant. The
//! `define_id!` macro creates wrappers that make that a compile error.

/// Define an `i64` id newtype.
///
/// The generated type is `Copy`, ordered by its value, serializes as a bare
/// number, and converts to and from `i64`.
///
/// ```rust
/// # use pocketshop_core::define_id;
/// define_id!(WishlistId);
/// define_id!(CouponId);
///
/// let wishlist = WishlistId::new(1);
/// assert_eq!(wishlist.as_i64(), 1);
/// // let _: WishlistId = CouponId::new(1); // mismatched types
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            #[must_use]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Raw numeric id.
            #[must_use]
            pub const fn as_i64(&self) -> i64 {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                ::core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id!(UserId);
define_id!(ProductId);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_id_serializes_as_bare_number() {
        let id = ProductId::new(42);
        assert_eq!(serde_json::to_string(&id).unwrap(), "42");

        let parsed: ProductId = serde_json::from_str("42").unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_id_ordering_follows_value() {
        assert!(ProductId::new(1) < ProductId::new(2));
    }

    #[test]
    fn test_id_display() {
        assert_eq!(UserId::new(7).to_string(), "7");
    }
}
