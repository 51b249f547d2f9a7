//! Macros for reducing boilerplate code
//!
//! Declarative macros for the small value types used by pattern settings:
//! name conversions for enums and bit-flag sets.

/// Implements Display and FromStr traits for named enums
///
/// This macro generates:
/// - Display trait: converts enum variants to lowercase strings
/// - FromStr trait: parses case-insensitive strings to enum variants
///
/// # Example
///
/// ```rust
/// use patterncache_common::impl_name_conversions;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// pub enum Newline {
///     Cr,
///     Lf,
/// }
///
/// impl_name_conversions!(Newline {
///     Cr => "cr",
///     Lf => "lf",
/// });
///
/// assert_eq!(Newline::Lf.to_string(), "lf");
/// assert_eq!("CR".parse::<Newline>(), Ok(Newline::Cr));
/// ```
#[macro_export]
macro_rules! impl_name_conversions {
    ($enum_name:ident { $($variant:ident => $str:literal),+ $(,)? }) => {
        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(Self::$variant => write!(f, $str),)+
                }
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}

/// Declares a `Copy` bit-flag set over an unsigned integer
///
/// The generated type offers named constants, `|`, `|=`, `&`, `contains`,
/// `is_empty` and `bits`. Unknown bits are kept as-is so values coming from
/// an engine round-trip unchanged.
///
/// # Example
///
/// ```rust
/// use patterncache_common::impl_flag_set;
///
/// impl_flag_set! {
///     /// Demo flags
///     pub struct Demo: u32 {
///         const A = 0x1;
///         const B = 0x2;
///     }
/// }
///
/// let both = Demo::A | Demo::B;
/// assert!(both.contains(Demo::A));
/// assert_eq!(both.bits(), 0x3);
/// ```
#[macro_export]
macro_rules! impl_flag_set {
    (
        $(#[$outer:meta])*
        pub struct $name:ident: $repr:ty {
            $(
                $(#[$inner:meta])*
                const $flag:ident = $value:expr;
            )+
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
        pub struct $name($repr);

        impl $name {
            /// No flags set
            pub const NONE: Self = Self(0);

            $(
                $(#[$inner])*
                pub const $flag: Self = Self($value);
            )+

            /// Build a set from raw bits
            #[must_use]
            pub const fn from_bits(bits: $repr) -> Self {
                Self(bits)
            }

            /// Raw bit representation
            #[must_use]
            pub const fn bits(self) -> $repr {
                self.0
            }

            /// `true` when every flag of `other` is set in `self`
            #[must_use]
            pub const fn contains(self, other: Self) -> bool {
                self.0 & other.0 == other.0
            }

            /// `true` when no flag is set
            #[must_use]
            pub const fn is_empty(self) -> bool {
                self.0 == 0
            }
        }

        impl std::ops::BitOr for $name {
            type Output = Self;

            fn bitor(self, rhs: Self) -> Self {
                Self(self.0 | rhs.0)
            }
        }

        impl std::ops::BitOrAssign for $name {
            fn bitor_assign(&mut self, rhs: Self) {
                self.0 |= rhs.0;
            }
        }

        impl std::ops::BitAnd for $name {
            type Output = Self;

            fn bitand(self, rhs: Self) -> Self {
                Self(self.0 & rhs.0)
            }
        }
    };
}
