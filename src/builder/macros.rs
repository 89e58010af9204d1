//! Macros for declaring identifiers.

/// Declare a unit-variant enum and implement `Identifier` for it.
///
/// Each variant's name is the variant identifier itself.
///
/// # Example
///
/// ```
/// use rewind::core::Identifier;
/// use rewind::identifier_enum;
///
/// identifier_enum! {
///     pub enum Turnstile {
///         Locked,
///         Unlocked,
///     }
/// }
///
/// assert_eq!(Turnstile::Locked.name(), "Locked");
/// ```
#[macro_export]
macro_rules! identifier_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::Identifier for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }
    };
}
