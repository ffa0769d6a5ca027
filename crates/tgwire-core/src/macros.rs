//! Declarative helpers shared by the entity model.

/// Declares a closed enumeration whose variants travel as fixed strings on the wire.
///
/// Generates the enum with serde renames plus a [`WireEnum`](crate::value::WireEnum)
/// impl and a conversion into [`Param`](crate::value::Param).
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident => $wire:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ::serde::Serialize, ::serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $crate::value::WireEnum for $name {
            const TYPE_NAME: &'static str = stringify!($name);
            const ALL: &'static [Self] = &[$(Self::$variant),+];

            fn wire_value(self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                }
            }

            fn variant_name(self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant),)+
                }
            }
        }

        impl From<$name> for $crate::value::Param {
            fn from(value: $name) -> Self {
                $crate::value::Param::Enum($crate::value::EnumValue::of(value))
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str($crate::value::WireEnum::wire_value(*self))
            }
        }
    };
}
