#![no_main]

use libfuzzer_sys::fuzz_target;
use beanprop::{
    value::{convert, ConstantSet, PropertyData, ValueKind},
    BeanConfig,
};

const LEVELS: ConstantSet = ConstantSet::new("Level", &["Low", "Medium", "High"]);

fuzz_target!(|data: &[u8]| {
    let Some((&selector, text)) = data.split_first() else {
        return;
    };
    let Ok(text) = std::str::from_utf8(text) else {
        return;
    };

    let required = match selector % 16 {
        0 => ValueKind::Bool,
        1 => ValueKind::Char,
        2 => ValueKind::I8,
        3 => ValueKind::U8,
        4 => ValueKind::I16,
        5 => ValueKind::U16,
        6 => ValueKind::I32,
        7 => ValueKind::U32,
        8 => ValueKind::I64,
        9 => ValueKind::U64,
        10 => ValueKind::F32,
        11 => ValueKind::F64,
        12 => ValueKind::String,
        13 => ValueKind::Constant(LEVELS),
        14 => ValueKind::Any,
        _ => ValueKind::None,
    };
    let config = if selector & 0x80 == 0 {
        BeanConfig::default()
    } else {
        BeanConfig::lenient()
    };

    let value = PropertyData::String(text.to_string());
    if let Ok(converted) = convert("fuzz", value.clone(), &required, &config) {
        // a successful conversion always has the required shape
        assert!(
            matches!(required, ValueKind::Any) || converted.kind() == required,
            "{value:?} converted to {converted:?}, required {required}"
        );

        // and converting it again is a no-op
        let again = convert("fuzz", converted.clone(), &required, &config).unwrap();
        assert_eq!(again, converted);
    }
});
