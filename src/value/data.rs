use std::{
    any::{type_name, Any, TypeId},
    fmt,
    sync::Arc,
};

use crate::{Error::ConstantNotFound, Result};

/// The closed list of named constants of an enumerated type.
///
/// A `ConstantSet` is what a property of enumerated type declares as its [`ValueKind`]; string
/// values written to such a property are looked up by name in the set. Sets are usually created
/// through [`crate::property_constants!`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConstantSet {
    type_name: &'static str,
    names: &'static [&'static str],
}

impl ConstantSet {
    /// Create a new set of constants
    ///
    /// ## Arguments
    /// * `type_name` - The name of the enumerated type
    /// * `names`     - The constant names, in ordinal order
    #[must_use]
    pub const fn new(type_name: &'static str, names: &'static [&'static str]) -> Self {
        ConstantSet { type_name, names }
    }

    /// The name of the enumerated type
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// All constant names, in ordinal order
    #[must_use]
    pub fn names(&self) -> &'static [&'static str] {
        self.names
    }

    /// Returns the constant at `ordinal`, if there is one
    #[must_use]
    pub fn get(&self, ordinal: usize) -> Option<Constant> {
        (ordinal < self.names.len()).then_some(Constant { set: *self, ordinal })
    }

    /// Returns the constant named `name`, if there is one
    #[must_use]
    pub fn constant(&self, name: &str) -> Option<Constant> {
        self.names
            .iter()
            .position(|candidate| *candidate == name)
            .map(|ordinal| Constant { set: *self, ordinal })
    }

    /// Look up the constant named `name`
    ///
    /// # Errors
    /// Returns [`crate::Error::ConstantNotFound`] if the set has no constant of that name.
    pub fn lookup(&self, name: &str) -> Result<Constant> {
        self.constant(name).ok_or_else(|| ConstantNotFound {
            type_name: self.type_name.to_string(),
            name: name.to_string(),
        })
    }
}

/// A single constant out of a [`ConstantSet`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Constant {
    set: ConstantSet,
    ordinal: usize,
}

impl Constant {
    /// The set this constant belongs to
    #[must_use]
    pub fn set(&self) -> ConstantSet {
        self.set
    }

    /// The position of this constant within its set
    #[must_use]
    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    /// The name of this constant
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.set.names[self.ordinal]
    }
}

/// A shared reference to an arbitrary object used as a property value.
///
/// Two `ObjectRef`s are equal only if they point at the same allocation; the referenced
/// objects are never compared structurally.
#[derive(Clone)]
pub struct ObjectRef {
    value: Arc<dyn Any + Send + Sync>,
    type_id: TypeId,
    type_name: &'static str,
}

impl ObjectRef {
    /// Wrap a shared object
    #[must_use]
    pub fn new<T: Any + Send + Sync>(value: Arc<T>) -> Self {
        ObjectRef {
            value,
            type_id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
        }
    }

    /// The `TypeId` of the referenced object
    #[must_use]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// The type name of the referenced object
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Returns the referenced object if it is of type `T`
    #[must_use]
    pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        Arc::clone(&self.value).downcast::<T>().ok()
    }

    /// Returns true if both references point at the same object
    #[must_use]
    pub fn ptr_eq(&self, other: &ObjectRef) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.value), Arc::as_ptr(&other.value))
    }
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectRef({} @ {:p})", self.type_name, Arc::as_ptr(&self.value))
    }
}

/// The value of a single property.
///
/// Values are opaque to [`crate::value::PropertyValueSet`]; the declared type of the property they
/// are written to decides whether (and how) they get converted. Equality follows identity
/// semantics: scalars compare by value, floats bitwise (so `NaN` equals itself) and objects by
/// pointer.
#[derive(Debug, Clone, Default)]
pub enum PropertyData {
    /// No value
    #[default]
    None,
    /// Boolean value
    Bool(bool),
    /// Character value
    Char(char),
    /// 8-bit signed integer
    I8(i8),
    /// 8-bit unsigned integer
    U8(u8),
    /// 16-bit signed integer
    I16(i16),
    /// 16-bit unsigned integer
    U16(u16),
    /// 32-bit signed integer
    I32(i32),
    /// 32-bit unsigned integer
    U32(u32),
    /// 64-bit signed integer
    I64(i64),
    /// 64-bit unsigned integer
    U64(u64),
    /// 32-bit floating point
    F32(f32),
    /// 64-bit floating point
    F64(f64),
    /// String value
    String(String),
    /// Named constant of an enumerated type
    Constant(Constant),
    /// Shared object
    Object(ObjectRef),
}

impl PropertyData {
    /// The shape of this value
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            PropertyData::None => ValueKind::None,
            PropertyData::Bool(_) => ValueKind::Bool,
            PropertyData::Char(_) => ValueKind::Char,
            PropertyData::I8(_) => ValueKind::I8,
            PropertyData::U8(_) => ValueKind::U8,
            PropertyData::I16(_) => ValueKind::I16,
            PropertyData::U16(_) => ValueKind::U16,
            PropertyData::I32(_) => ValueKind::I32,
            PropertyData::U32(_) => ValueKind::U32,
            PropertyData::I64(_) => ValueKind::I64,
            PropertyData::U64(_) => ValueKind::U64,
            PropertyData::F32(_) => ValueKind::F32,
            PropertyData::F64(_) => ValueKind::F64,
            PropertyData::String(_) => ValueKind::String,
            PropertyData::Constant(constant) => ValueKind::Constant(constant.set()),
            PropertyData::Object(object) => ValueKind::Object {
                type_name: object.type_name(),
                type_id: object.type_id(),
            },
        }
    }

    /// Returns true if this is [`PropertyData::None`]
    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, PropertyData::None)
    }

    /// Try to convert to a boolean value
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropertyData::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Try to convert to a 64-bit integer value
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        self.as_integer().and_then(|value| i64::try_from(value).ok())
    }

    /// Try to convert to a floating point value
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            PropertyData::F32(value) => Some(f64::from(*value)),
            PropertyData::F64(value) => Some(*value),
            _ => None,
        }
    }

    /// Try to borrow a string value
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyData::String(value) => Some(value),
            _ => None,
        }
    }

    /// Widen any integer variant to `i128`
    pub(crate) fn as_integer(&self) -> Option<i128> {
        match self {
            PropertyData::I8(value) => Some(i128::from(*value)),
            PropertyData::U8(value) => Some(i128::from(*value)),
            PropertyData::I16(value) => Some(i128::from(*value)),
            PropertyData::U16(value) => Some(i128::from(*value)),
            PropertyData::I32(value) => Some(i128::from(*value)),
            PropertyData::U32(value) => Some(i128::from(*value)),
            PropertyData::I64(value) => Some(i128::from(*value)),
            PropertyData::U64(value) => Some(i128::from(*value)),
            _ => None,
        }
    }
}

impl PartialEq for PropertyData {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (PropertyData::None, PropertyData::None) => true,
            (PropertyData::Bool(a), PropertyData::Bool(b)) => a == b,
            (PropertyData::Char(a), PropertyData::Char(b)) => a == b,
            (PropertyData::I8(a), PropertyData::I8(b)) => a == b,
            (PropertyData::U8(a), PropertyData::U8(b)) => a == b,
            (PropertyData::I16(a), PropertyData::I16(b)) => a == b,
            (PropertyData::U16(a), PropertyData::U16(b)) => a == b,
            (PropertyData::I32(a), PropertyData::I32(b)) => a == b,
            (PropertyData::U32(a), PropertyData::U32(b)) => a == b,
            (PropertyData::I64(a), PropertyData::I64(b)) => a == b,
            (PropertyData::U64(a), PropertyData::U64(b)) => a == b,
            (PropertyData::F32(a), PropertyData::F32(b)) => a.to_bits() == b.to_bits(),
            (PropertyData::F64(a), PropertyData::F64(b)) => a.to_bits() == b.to_bits(),
            (PropertyData::String(a), PropertyData::String(b)) => a == b,
            (PropertyData::Constant(a), PropertyData::Constant(b)) => a == b,
            (PropertyData::Object(a), PropertyData::Object(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl fmt::Display for PropertyData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyData::None => write!(f, "null"),
            PropertyData::Bool(value) => write!(f, "{value}"),
            PropertyData::Char(value) => write!(f, "{value}"),
            PropertyData::I8(value) => write!(f, "{value}"),
            PropertyData::U8(value) => write!(f, "{value}"),
            PropertyData::I16(value) => write!(f, "{value}"),
            PropertyData::U16(value) => write!(f, "{value}"),
            PropertyData::I32(value) => write!(f, "{value}"),
            PropertyData::U32(value) => write!(f, "{value}"),
            PropertyData::I64(value) => write!(f, "{value}"),
            PropertyData::U64(value) => write!(f, "{value}"),
            PropertyData::F32(value) => write!(f, "{value}"),
            PropertyData::F64(value) => write!(f, "{value}"),
            PropertyData::String(value) => write!(f, "{value}"),
            PropertyData::Constant(value) => write!(f, "{}", value.name()),
            PropertyData::Object(value) => write!(f, "<{}>", value.type_name()),
        }
    }
}

/// The shape of a [`PropertyData`], or the declared type of a property.
///
/// [`ValueKind::Any`] is only meaningful as a declared type: it accepts every value unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// The shape of [`PropertyData::None`]
    None,
    /// `bool`
    Bool,
    /// `char`
    Char,
    /// `i8`
    I8,
    /// `u8`
    U8,
    /// `i16`
    I16,
    /// `u16`
    U16,
    /// `i32`
    I32,
    /// `u32`
    U32,
    /// `i64`
    I64,
    /// `u64`
    U64,
    /// `f32`
    F32,
    /// `f64`
    F64,
    /// `String`
    String,
    /// A constant out of the given set
    Constant(ConstantSet),
    /// A shared object of a specific type
    Object {
        /// Name of the object type
        type_name: &'static str,
        /// Identity of the object type
        type_id: TypeId,
    },
    /// Any value
    Any,
}

impl ValueKind {
    /// Returns true for the integer kinds
    #[must_use]
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            ValueKind::I8
                | ValueKind::U8
                | ValueKind::I16
                | ValueKind::U16
                | ValueKind::I32
                | ValueKind::U32
                | ValueKind::I64
                | ValueKind::U64
        )
    }

    /// Returns true for the floating point kinds
    #[must_use]
    pub fn is_float(&self) -> bool {
        matches!(self, ValueKind::F32 | ValueKind::F64)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::None => write!(f, "null"),
            ValueKind::Bool => write!(f, "bool"),
            ValueKind::Char => write!(f, "char"),
            ValueKind::I8 => write!(f, "i8"),
            ValueKind::U8 => write!(f, "u8"),
            ValueKind::I16 => write!(f, "i16"),
            ValueKind::U16 => write!(f, "u16"),
            ValueKind::I32 => write!(f, "i32"),
            ValueKind::U32 => write!(f, "u32"),
            ValueKind::I64 => write!(f, "i64"),
            ValueKind::U64 => write!(f, "u64"),
            ValueKind::F32 => write!(f, "f32"),
            ValueKind::F64 => write!(f, "f64"),
            ValueKind::String => write!(f, "string"),
            ValueKind::Constant(set) => write!(f, "constant {}", set.type_name()),
            ValueKind::Object { type_name, .. } => write!(f, "object {type_name}"),
            ValueKind::Any => write!(f, "any"),
        }
    }
}

/// Rust types that can be stored in, and read back from, a property.
///
/// Registration through [`crate::metadata::BeanInfoBuilder::property`] uses this trait to declare
/// the property's [`ValueKind`] and to move values between the typed world of the bean and the
/// untyped [`PropertyData`] world of the accessor.
pub trait PropertyType: Sized + 'static {
    /// The declared kind of a property of this type
    fn value_kind() -> ValueKind;

    /// Convert into untyped data
    fn into_data(self) -> PropertyData;

    /// Convert from untyped data which has already been coerced to [`Self::value_kind`]
    ///
    /// # Errors
    /// Hands the data back if it does not fit this type.
    fn from_data(data: PropertyData) -> std::result::Result<Self, PropertyData>;
}

macro_rules! impl_scalar_property_type {
    ($($ty:ty => $variant:ident),+ $(,)?) => {
        $(
            impl PropertyType for $ty {
                fn value_kind() -> ValueKind {
                    ValueKind::$variant
                }

                fn into_data(self) -> PropertyData {
                    PropertyData::$variant(self)
                }

                fn from_data(data: PropertyData) -> std::result::Result<Self, PropertyData> {
                    match data {
                        PropertyData::$variant(value) => Ok(value),
                        other => Err(other),
                    }
                }
            }

            impl From<$ty> for PropertyData {
                fn from(value: $ty) -> Self {
                    PropertyData::$variant(value)
                }
            }
        )+
    };
}

impl_scalar_property_type!(
    bool => Bool,
    char => Char,
    i8 => I8,
    u8 => U8,
    i16 => I16,
    u16 => U16,
    i32 => I32,
    u32 => U32,
    i64 => I64,
    u64 => U64,
    f32 => F32,
    f64 => F64,
    String => String,
);

impl From<&str> for PropertyData {
    fn from(value: &str) -> Self {
        PropertyData::String(value.to_string())
    }
}

impl From<Constant> for PropertyData {
    fn from(value: Constant) -> Self {
        PropertyData::Constant(value)
    }
}

impl From<ObjectRef> for PropertyData {
    fn from(value: ObjectRef) -> Self {
        PropertyData::Object(value)
    }
}

impl PropertyType for PropertyData {
    fn value_kind() -> ValueKind {
        ValueKind::Any
    }

    fn into_data(self) -> PropertyData {
        self
    }

    fn from_data(data: PropertyData) -> std::result::Result<Self, PropertyData> {
        Ok(data)
    }
}

impl PropertyType for () {
    fn value_kind() -> ValueKind {
        ValueKind::None
    }

    fn into_data(self) -> PropertyData {
        PropertyData::None
    }

    fn from_data(data: PropertyData) -> std::result::Result<Self, PropertyData> {
        match data {
            PropertyData::None => Ok(()),
            other => Err(other),
        }
    }
}

impl<T: PropertyType> PropertyType for Option<T> {
    fn value_kind() -> ValueKind {
        T::value_kind()
    }

    fn into_data(self) -> PropertyData {
        self.map_or(PropertyData::None, PropertyType::into_data)
    }

    fn from_data(data: PropertyData) -> std::result::Result<Self, PropertyData> {
        match data {
            PropertyData::None => Ok(None),
            other => T::from_data(other).map(Some),
        }
    }
}

impl<T: Any + Send + Sync> PropertyType for Arc<T> {
    fn value_kind() -> ValueKind {
        ValueKind::Object {
            type_name: type_name::<T>(),
            type_id: TypeId::of::<T>(),
        }
    }

    fn into_data(self) -> PropertyData {
        PropertyData::Object(ObjectRef::new(self))
    }

    fn from_data(data: PropertyData) -> std::result::Result<Self, PropertyData> {
        let object = match &data {
            PropertyData::Object(object) => object.downcast::<T>(),
            _ => None,
        };
        object.ok_or(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLORS: ConstantSet = ConstantSet::new("Color", &["Red", "Green", "Blue"]);

    #[test]
    fn test_constant_lookup() {
        let green = COLORS.lookup("Green").unwrap();
        assert_eq!(green.ordinal(), 1);
        assert_eq!(green.name(), "Green");
        assert_eq!(COLORS.get(1), Some(green));
        assert!(COLORS.get(3).is_none());

        let error = COLORS.lookup("Purple").unwrap_err();
        assert_eq!(error.to_string(), "Constant [Purple] not found in [Color]");
    }

    #[test]
    fn test_identity_equality() {
        let shared = Arc::new(vec![1u8, 2, 3]);
        let a = PropertyData::Object(ObjectRef::new(Arc::clone(&shared)));
        let b = PropertyData::Object(ObjectRef::new(Arc::clone(&shared)));
        let c = PropertyData::Object(ObjectRef::new(Arc::new(vec![1u8, 2, 3])));

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(PropertyData::F64(f64::NAN), PropertyData::F64(f64::NAN));
        assert_ne!(PropertyData::I32(1), PropertyData::I64(1));
    }

    #[test]
    fn test_kind_and_display() {
        assert_eq!(PropertyData::U16(7).kind(), ValueKind::U16);
        assert_eq!(
            PropertyData::Constant(COLORS.lookup("Red").unwrap()).kind(),
            ValueKind::Constant(COLORS)
        );
        assert_eq!(ValueKind::Constant(COLORS).to_string(), "constant Color");
        assert_eq!(PropertyData::None.to_string(), "null");
        assert_eq!(PropertyData::String("x".into()).to_string(), "x");
    }

    #[test]
    fn test_typed_views() {
        assert_eq!(PropertyData::Bool(true).as_bool(), Some(true));
        assert_eq!(PropertyData::String("true".into()).as_bool(), None);
        assert_eq!(PropertyData::U8(200).as_i64(), Some(200));
        assert_eq!(PropertyData::F32(0.5).as_f64(), Some(0.5));

        assert!(ValueKind::F32.is_float());
        assert!(ValueKind::F64.is_float());
        assert!(!ValueKind::I64.is_float());
        assert!(ValueKind::U64.is_integer());
        assert!(!ValueKind::F64.is_integer());
    }

    #[test]
    fn test_property_type_round_trip_through_option_and_arc() {
        assert_eq!(Option::<i32>::value_kind(), ValueKind::I32);
        assert_eq!(Option::<i32>::from_data(PropertyData::None), Ok(None));
        assert!(i32::from_data(PropertyData::None).is_err());

        let shared = Arc::new(String::from("pool"));
        let data = Arc::clone(&shared).into_data();
        let back = Arc::<String>::from_data(data).unwrap();
        assert!(Arc::ptr_eq(&shared, &back));
        assert!(Arc::<u32>::from_data(PropertyData::Object(ObjectRef::new(shared))).is_err());
    }
}
