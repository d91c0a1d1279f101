//! Opaque 32-byte identities for assets and accounts.
//!
//! Both id types wrap a `[u8; 32]`, render as lowercase hex and parse from
//! 64 hex characters (an optional `0x` prefix is accepted).  With the
//! `serde` feature they serialize as that hex string.

use core::fmt;
use core::str::FromStr;

use crate::error::AmmError;

/// Generates a 32-byte id newtype with hex `Display`/`FromStr`.
macro_rules! byte_id {
    ($(#[$meta:meta])* $name:ident, $parse_err:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
        pub struct $name([u8; 32]);

        impl $name {
            /// Creates an id from raw bytes.
            #[must_use]
            pub const fn from_bytes(bytes: [u8; 32]) -> Self {
                Self(bytes)
            }

            /// Returns `true` for the all-zero id.
            #[must_use]
            pub fn is_zero(&self) -> bool {
                self.0.iter().all(|b| *b == 0)
            }

            /// Short prefix used in log fields.
            #[must_use]
            pub fn short(&self) -> String {
                hex::encode(&self.0[..4])
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&hex::encode(self.0))
            }
        }

        impl FromStr for $name {
            type Err = AmmError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let digits = s.strip_prefix("0x").unwrap_or(s);
                let mut bytes = [0u8; 32];
                hex::decode_to_slice(digits, &mut bytes).map_err(|_| $parse_err)?;
                Ok(Self(bytes))
            }
        }

        impl TryFrom<String> for $name {
            type Error = AmmError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.to_string()
            }
        }
    };
}

byte_id!(
    /// Opaque identity of a fungible asset held by a pool.
    ///
    /// ```
    /// use pair_amm::domain::TokenId;
    ///
    /// let usdc = TokenId::from_bytes([1u8; 32]);
    /// let parsed: TokenId = usdc.to_string().parse().expect("hex round trip");
    /// assert_eq!(parsed, usdc);
    /// ```
    TokenId,
    AmmError::InvalidToken("token id must be 64 hex characters")
);

byte_id!(
    /// Opaque identity of a ledger account: an LP holder, a trader, a
    /// governor, or the pool's own custody account.
    AccountId,
    AmmError::InvalidConfiguration("account id must be 64 hex characters")
);
