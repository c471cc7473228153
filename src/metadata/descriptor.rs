use std::{any::Any, fmt, sync::Arc};

use bitflags::bitflags;

use crate::{
    value::{PropertyData, ValueKind},
    Result,
};

bitflags! {
    /// Which accessors a property provides
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct AccessFlags: u8 {
        /// The property can be read
        const READ = 0x01;
        /// The property can be written
        const WRITE = 0x02;
        /// The property can be read and written
        const READ_WRITE = Self::READ.bits() | Self::WRITE.bits();
    }
}

pub(crate) type Reader = Arc<dyn Fn(&dyn Any) -> Option<PropertyData> + Send + Sync>;
pub(crate) type Writer =
    Arc<dyn Fn(&mut dyn Any, PropertyData) -> std::result::Result<(), WriteFailure> + Send + Sync>;
pub(crate) type Invoker =
    Arc<dyn Fn(&mut dyn Any, Vec<PropertyData>) -> Result<PropertyData> + Send + Sync>;

/// Why a type-erased writer did not store a value
#[derive(Debug)]
pub(crate) enum WriteFailure {
    /// The target is not an instance of the registering type
    WrongTarget,
    /// The value does not fit the property type
    Rejected(PropertyData),
}

/// Metadata of one named, typed property of a bean type.
///
/// Descriptors are created once during introspection and never change afterwards. Cloning is
/// cheap: the accessors are shared.
#[derive(Clone)]
pub struct PropertyDescriptor {
    name: String,
    kind: ValueKind,
    access: AccessFlags,
    reader: Option<Reader>,
    writer: Option<Writer>,
}

impl PropertyDescriptor {
    pub(crate) fn new(
        name: String,
        kind: ValueKind,
        reader: Option<Reader>,
        writer: Option<Writer>,
    ) -> Self {
        let mut access = AccessFlags::empty();
        access.set(AccessFlags::READ, reader.is_some());
        access.set(AccessFlags::WRITE, writer.is_some());

        PropertyDescriptor {
            name,
            kind,
            access,
            reader,
            writer,
        }
    }

    /// The name of the property
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared type of the property
    #[must_use]
    pub fn kind(&self) -> &ValueKind {
        &self.kind
    }

    /// The accessors this property provides
    #[must_use]
    pub fn access(&self) -> AccessFlags {
        self.access
    }

    /// Returns true if the property has a read accessor
    #[must_use]
    pub fn is_readable(&self) -> bool {
        self.access.contains(AccessFlags::READ)
    }

    /// Returns true if the property has a write accessor
    #[must_use]
    pub fn is_writable(&self) -> bool {
        self.access.contains(AccessFlags::WRITE)
    }

    /// Read the property from `bean`; `None` if unreadable or `bean` is of another type
    pub(crate) fn read(&self, bean: &dyn Any) -> Option<PropertyData> {
        self.reader.as_ref().and_then(|reader| reader(bean))
    }

    /// Store an already converted value into `bean`
    pub(crate) fn write(
        &self,
        bean: &mut dyn Any,
        value: PropertyData,
    ) -> std::result::Result<(), WriteFailure> {
        match &self.writer {
            Some(writer) => writer(bean, value),
            None => Err(WriteFailure::Rejected(value)),
        }
    }
}

impl fmt::Debug for PropertyDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyDescriptor")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("access", &self.access)
            .finish_non_exhaustive()
    }
}

/// Metadata of one named method of a bean type
#[derive(Clone)]
pub struct MethodDescriptor {
    name: String,
    parameters: Vec<ValueKind>,
    returns: ValueKind,
    invoker: Invoker,
}

impl MethodDescriptor {
    pub(crate) fn new(
        name: String,
        parameters: Vec<ValueKind>,
        returns: ValueKind,
        invoker: Invoker,
    ) -> Self {
        MethodDescriptor {
            name,
            parameters,
            returns,
            invoker,
        }
    }

    /// The name of the method
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared parameter types
    #[must_use]
    pub fn parameters(&self) -> &[ValueKind] {
        &self.parameters
    }

    /// The declared return type, [`ValueKind::None`] for methods without a result
    #[must_use]
    pub fn returns(&self) -> &ValueKind {
        &self.returns
    }

    pub(crate) fn invoke(&self, bean: &mut dyn Any, args: Vec<PropertyData>) -> Result<PropertyData> {
        (self.invoker)(bean, args)
    }
}

impl fmt::Debug for MethodDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodDescriptor")
            .field("name", &self.name)
            .field("parameters", &self.parameters)
            .field("returns", &self.returns)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_flags_follow_accessors() {
        let reader: Reader = Arc::new(|_| Some(PropertyData::Bool(true)));
        let read_only = PropertyDescriptor::new("flag".into(), ValueKind::Bool, Some(reader), None);

        assert_eq!(read_only.access(), AccessFlags::READ);
        assert!(read_only.is_readable());
        assert!(!read_only.is_writable());
        assert_eq!(read_only.read(&()), Some(PropertyData::Bool(true)));
        assert!(matches!(
            read_only.write(&mut (), PropertyData::Bool(false)),
            Err(WriteFailure::Rejected(PropertyData::Bool(false)))
        ));

        let writer: Writer = Arc::new(|_, _| Ok(()));
        let write_only = PropertyDescriptor::new("sink".into(), ValueKind::Any, None, Some(writer));
        assert_eq!(write_only.access(), AccessFlags::WRITE);
        assert!(write_only.read(&()).is_none());
    }
}
