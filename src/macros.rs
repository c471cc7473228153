/// Generate the [`crate::value::ConstantSet`] and [`crate::value::PropertyType`] implementation
/// for a field-less enum, so it can be used as an enumerated property type.
///
/// The enum gets an associated `CONSTANTS` set holding the variant names in declaration order.
/// Strings written to a property of this type are resolved by variant name.
///
/// # Arguments
/// * `$ty` - The enum type
/// * `$variant` - Every variant of the enum, in declaration order
///
/// # Example
/// ```rust
/// use beanprop::{property_constants, value::{PropertyData, PropertyType}};
///
/// #[derive(Debug, Clone, Copy, PartialEq)]
/// enum Isolation { ReadCommitted, Serializable }
///
/// property_constants!(Isolation { ReadCommitted, Serializable });
///
/// assert_eq!(Isolation::CONSTANTS.names(), ["ReadCommitted", "Serializable"]);
/// let data = Isolation::Serializable.into_data();
/// assert_eq!(data.to_string(), "Serializable");
/// assert_eq!(Isolation::from_data(data), Ok(Isolation::Serializable));
/// ```
#[macro_export]
macro_rules! property_constants {
    ($ty:ident { $($variant:ident),+ $(,)? }) => {
        impl $ty {
            /// The named constants of this type, in declaration order
            pub const CONSTANTS: $crate::value::ConstantSet = $crate::value::ConstantSet::new(
                stringify!($ty),
                &[$(stringify!($variant)),+],
            );
        }

        impl $crate::value::PropertyType for $ty {
            fn value_kind() -> $crate::value::ValueKind {
                $crate::value::ValueKind::Constant(Self::CONSTANTS)
            }

            fn into_data(self) -> $crate::value::PropertyData {
                let name = match self {
                    $($ty::$variant => stringify!($variant)),+
                };
                Self::CONSTANTS
                    .constant(name)
                    .map_or($crate::value::PropertyData::None, $crate::value::PropertyData::Constant)
            }

            fn from_data(
                data: $crate::value::PropertyData,
            ) -> ::std::result::Result<Self, $crate::value::PropertyData> {
                match data {
                    $crate::value::PropertyData::Constant(constant)
                        if constant.set() == Self::CONSTANTS =>
                    {
                        match constant.name() {
                            $(stringify!($variant) => Ok($ty::$variant),)+
                            _ => Err($crate::value::PropertyData::Constant(constant)),
                        }
                    }
                    other => Err(other),
                }
            }
        }

        impl ::std::convert::From<$ty> for $crate::value::PropertyData {
            fn from(value: $ty) -> Self {
                $crate::value::PropertyType::into_data(value)
            }
        }
    };
}
