//! Macro for implementing Display and FromStr for tag enums
//!
//! Tag enums (client types, cycle outcomes) travel as plain strings in logs,
//! requests and config. This macro keeps the string mapping in one place.
//! Matching is exact: tags arrive from external clients that compare them
//! case-sensitively, so `"Human"` is not `"human"`.
//!
//! # Example
//!
//! ```rust
//! use rotaboard_domain::impl_tag_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Mode {
//!     Fast,
//!     Slow,
//! }
//!
//! impl_tag_conversions!(Mode {
//!     Fast => "fast",
//!     Slow => "slow",
//! });
//!
//! assert_eq!(Mode::Fast.as_str(), "fast");
//! assert_eq!("slow".parse::<Mode>(), Ok(Mode::Slow));
//! ```

/// Implements `as_str`, Display and FromStr for tag enums
///
/// # Arguments
///
/// * `$enum_name` - The name of the enum type
/// * `$variant => $str` - Mapping of enum variants to their string
///   representations
#[macro_export]
macro_rules! impl_tag_conversions {
    ($enum_name:ident { $($variant:ident => $str:literal),+ $(,)? }) => {
        impl $enum_name {
            /// Wire representation of this tag.
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $str,)+
                }
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                match s {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}
