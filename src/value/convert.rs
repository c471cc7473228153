//! Coercion of property values to declared property types.
//!
//! Values staged in a [`crate::value::PropertyValueSet`] do not need to have the final type of
//! the property they are applied to. Before a write reaches the bean, the accessor runs the value
//! through [`convert`], which either returns it unchanged (exact match), converts it, or rejects
//! it with an [`crate::Error::TypeMismatch`].
//!
//! # Conversion Rules
//!
//! - **Exact match**: value passes through unchanged
//! - **`Any`**: every value passes through unchanged
//! - **`None`**: passes through; the property's type decides whether it accepts it
//! - **Numeric widening**: lossless by type, e.g. `i16 → i64`, `u8 → f32`, `f32 → f64`
//! - **Narrowing**: only with [`BeanConfig::lossless_narrowing`] and only if the value survives
//! - **String parsing**: `bool`, `char`, integers and floats, with [`BeanConfig::parse_strings`]
//! - **Constants**: strings resolved by name, with [`BeanConfig::lookup_constants`]
//! - **`char → String`**: always

use crate::{
    value::{PropertyData, ValueKind},
    BeanConfig, Error, Result,
};

/// Convert `value` so it can be written to `property`, which is declared as `required`.
///
/// ## Arguments
/// * `property` - The property (used for diagnostics only)
/// * `value`    - The value to convert
/// * `required` - The declared type of the property
/// * `config`   - Which conversions are enabled
///
/// # Errors
/// Returns [`crate::Error::TypeMismatch`] carrying the rejected value, its kind, the required kind
/// and the property name if no enabled conversion applies.
///
/// # Examples
///
/// ```rust
/// use beanprop::{value::{convert, PropertyData, ValueKind}, BeanConfig};
///
/// let config = BeanConfig::default();
/// let port = convert("port", PropertyData::String(" 8080 ".into()), &ValueKind::U16, &config)?;
/// assert_eq!(port, PropertyData::U16(8080));
///
/// let wide = convert("count", PropertyData::I8(-3), &ValueKind::I64, &config)?;
/// assert_eq!(wide, PropertyData::I64(-3));
/// # Ok::<(), beanprop::Error>(())
/// ```
pub fn convert(
    property: &str,
    value: PropertyData,
    required: &ValueKind,
    config: &BeanConfig,
) -> Result<PropertyData> {
    coerce(value, required, config).map_err(|rejected| Error::type_mismatch(property, rejected, required))
}

/// Convert `value` to `required`, handing the value back if that is not possible
pub(crate) fn coerce(
    value: PropertyData,
    required: &ValueKind,
    config: &BeanConfig,
) -> std::result::Result<PropertyData, PropertyData> {
    if matches!(required, ValueKind::Any) || value.is_none() || value.kind() == *required {
        return Ok(value);
    }

    let converted = match &value {
        PropertyData::String(text) => from_string(text, required, config),
        PropertyData::Char(c) if *required == ValueKind::String => {
            Some(PropertyData::String(c.to_string()))
        }
        _ => numeric(&value, required, config),
    };

    converted.ok_or(value)
}

/// Returns true if every value of kind `from` is exactly representable as `to`
#[must_use]
pub fn widens(from: &ValueKind, to: &ValueKind) -> bool {
    use ValueKind::{F32, F64, I16, I32, I64, I8, U16, U32, U64, U8};

    match from {
        I8 => matches!(to, I16 | I32 | I64 | F32 | F64),
        U8 => matches!(to, I16 | U16 | I32 | U32 | I64 | U64 | F32 | F64),
        I16 => matches!(to, I32 | I64 | F32 | F64),
        U16 => matches!(to, I32 | U32 | I64 | U64 | F32 | F64),
        I32 => matches!(to, I64 | F64),
        U32 => matches!(to, I64 | U64 | F64),
        F32 => matches!(to, F64),
        _ => false,
    }
}

fn numeric(value: &PropertyData, required: &ValueKind, config: &BeanConfig) -> Option<PropertyData> {
    if !widens(&value.kind(), required) && !config.lossless_narrowing {
        return None;
    }

    if let Some(integer) = value.as_integer() {
        return if required.is_integer() {
            integer_to(required, integer)
        } else {
            integer_to_float(required, integer)
        };
    }

    value.as_f64().and_then(|float| float_to(required, float))
}

fn integer_to(required: &ValueKind, value: i128) -> Option<PropertyData> {
    match required {
        ValueKind::I8 => i8::try_from(value).ok().map(PropertyData::I8),
        ValueKind::U8 => u8::try_from(value).ok().map(PropertyData::U8),
        ValueKind::I16 => i16::try_from(value).ok().map(PropertyData::I16),
        ValueKind::U16 => u16::try_from(value).ok().map(PropertyData::U16),
        ValueKind::I32 => i32::try_from(value).ok().map(PropertyData::I32),
        ValueKind::U32 => u32::try_from(value).ok().map(PropertyData::U32),
        ValueKind::I64 => i64::try_from(value).ok().map(PropertyData::I64),
        ValueKind::U64 => u64::try_from(value).ok().map(PropertyData::U64),
        _ => None,
    }
}

#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
fn integer_to_float(required: &ValueKind, value: i128) -> Option<PropertyData> {
    match required {
        ValueKind::F64 => {
            let float = value as f64;
            (float as i128 == value).then_some(PropertyData::F64(float))
        }
        ValueKind::F32 => {
            let float = value as f32;
            (float as i128 == value).then_some(PropertyData::F32(float))
        }
        _ => None,
    }
}

#[allow(clippy::cast_possible_truncation)]
fn float_to(required: &ValueKind, value: f64) -> Option<PropertyData> {
    match required {
        ValueKind::F64 => Some(PropertyData::F64(value)),
        ValueKind::F32 => {
            let narrow = value as f32;
            (f64::from(narrow) == value || value.is_nan()).then_some(PropertyData::F32(narrow))
        }
        kind if kind.is_integer() => {
            if value.is_finite() && value.fract() == 0.0 {
                integer_to(kind, value as i128)
            } else {
                None
            }
        }
        _ => None,
    }
}

fn from_string(text: &str, required: &ValueKind, config: &BeanConfig) -> Option<PropertyData> {
    let text = if config.trim_strings { text.trim() } else { text };

    if let ValueKind::Constant(set) = required {
        return if config.lookup_constants {
            set.constant(text).map(PropertyData::Constant)
        } else {
            None
        };
    }

    if !config.parse_strings {
        return None;
    }

    match required {
        ValueKind::Bool => parse_bool(text).map(PropertyData::Bool),
        ValueKind::Char => {
            let mut chars = text.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some(PropertyData::Char(c)),
                _ => None,
            }
        }
        ValueKind::I8 => text.parse().ok().map(PropertyData::I8),
        ValueKind::U8 => text.parse().ok().map(PropertyData::U8),
        ValueKind::I16 => text.parse().ok().map(PropertyData::I16),
        ValueKind::U16 => text.parse().ok().map(PropertyData::U16),
        ValueKind::I32 => text.parse().ok().map(PropertyData::I32),
        ValueKind::U32 => text.parse().ok().map(PropertyData::U32),
        ValueKind::I64 => text.parse().ok().map(PropertyData::I64),
        ValueKind::U64 => text.parse().ok().map(PropertyData::U64),
        ValueKind::F32 => text.parse().ok().map(PropertyData::F32),
        ValueKind::F64 => text.parse().ok().map(PropertyData::F64),
        _ => None,
    }
}

fn parse_bool(text: &str) -> Option<bool> {
    if text.eq_ignore_ascii_case("true") {
        Some(true)
    } else if text.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}
