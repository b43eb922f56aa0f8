/// Implements `From` and `PartialEq` between a sum type and the types it wraps.
macro_rules! enum_traits {
    (|$target:ident| $($content:ident => $variant:ident),*) => {
        $(
            // Implement `From` to allow easy conversion from the inner type to the enum wrapper.
            impl From<$content> for $target {
                #[inline]
                fn from(value: $content) -> Self {
                    Self::$variant(value)
                }
            }

            // Implement `PartialEq` to allow comparing the enum with a potential inner value.
            impl PartialEq<$content> for $target {
                #[inline]
                fn eq(&self, other: &$content) -> bool {
                    if let Self::$variant(inner) = self {
                        inner.eq(other)
                    } else {
                        false
                    }
                }
            }
        )*
    }
}

/// Marks types as leaf elements: they project through `serde` and can fill a
/// [`Fragment`](crate::project::Fragment) slot directly.
macro_rules! leaves {
    ($($leaf:ident)*) => {
        $(
            impl $crate::project::Project for $leaf {}

            impl From<$leaf> for $crate::project::Fragment<$leaf> {
                #[inline]
                fn from(value: $leaf) -> Self {
                    Self::Typed(value)
                }
            }
        )*
    }
}

/// Declares a string-valued wire enum with `as_str`, `Display` and `FromStr`.
///
/// The `Other` arm, when requested, keeps values this crate does not know about.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident => $wire:literal,
            )*
        }
        $(other: $other:ident)?
    ) => {
        $(#[$meta])*
        pub enum $name {
            $(
                $(#[$vmeta])*
                $variant,
            )*
            $(
                /// A value this crate does not model, sent as-is.
                $other(String),
            )?
        }

        impl $name {
            /// Returns the wire string for this value.
            pub fn as_str(&self) -> &str {
                match self {
                    $(Self::$variant => $wire,)*
                    $(Self::$other(value) => value.as_str(),)?
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: ::serde::Serializer,
            {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: ::serde::Deserializer<'de>,
            {
                let raw = <String as ::serde::Deserialize<'de>>::deserialize(deserializer)?;
                raw.parse().map_err(::serde::de::Error::custom)
            }
        }

        wire_enum!(@from_str $name { $($variant => $wire,)* } $($other)?);
    };
    (@from_str $name:ident { $($variant:ident => $wire:literal,)* } $other:ident) => {
        impl ::std::str::FromStr for $name {
            type Err = ::std::convert::Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(match s {
                    $($wire => Self::$variant,)*
                    other => Self::$other(other.to_owned()),
                })
            }
        }
    };
    (@from_str $name:ident { $($variant:ident => $wire:literal,)* }) => {
        impl ::std::str::FromStr for $name {
            type Err = $crate::error::UnknownValue;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok(Self::$variant),)*
                    other => Err($crate::error::UnknownValue {
                        expected: stringify!($name),
                        value: other.to_owned(),
                    }),
                }
            }
        }
    };
}
