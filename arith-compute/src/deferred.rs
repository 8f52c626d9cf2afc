//! Lazily produced operands.
//!
//! The row pipeline hands the evaluator one accessor per operand. Each knows
//! its declared type up front and materializes its value only when forced,
//! which may fail with whatever fault the producer reports.

use arith_result::Result;
use arith_types::{RuntimeValue, TypeDescriptor};

pub trait DeferredValue {
    /// Declared type of the value this accessor produces.
    fn descriptor(&self) -> TypeDescriptor;

    /// Force the value.
    fn get(&self) -> Result<RuntimeValue>;
}

/// An operand whose value is already materialized.
#[derive(Debug, Clone, PartialEq)]
pub struct DeferredLiteral {
    descriptor: TypeDescriptor,
    value: RuntimeValue,
}

impl DeferredLiteral {
    pub fn new(descriptor: TypeDescriptor, value: RuntimeValue) -> Self {
        Self { descriptor, value }
    }

    /// Parse `text` as a literal of `descriptor`.
    pub fn parse(descriptor: TypeDescriptor, text: &str) -> Result<Self> {
        let value = RuntimeValue::parse(&descriptor, text)?;
        Ok(Self { descriptor, value })
    }

    pub fn value(&self) -> &RuntimeValue {
        &self.value
    }
}

impl DeferredValue for DeferredLiteral {
    fn descriptor(&self) -> TypeDescriptor {
        self.descriptor
    }

    fn get(&self) -> Result<RuntimeValue> {
        Ok(self.value.clone())
    }
}

/// An operand computed by a closure each time it is forced.
pub struct DeferredFn<F> {
    descriptor: TypeDescriptor,
    producer: F,
}

impl<F> DeferredFn<F>
where
    F: Fn() -> Result<RuntimeValue>,
{
    pub fn new(descriptor: TypeDescriptor, producer: F) -> Self {
        Self {
            descriptor,
            producer,
        }
    }
}

impl<F> DeferredValue for DeferredFn<F>
where
    F: Fn() -> Result<RuntimeValue>,
{
    fn descriptor(&self) -> TypeDescriptor {
        self.descriptor
    }

    fn get(&self) -> Result<RuntimeValue> {
        (self.producer)()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arith_result::Error;

    #[test]
    fn literal_is_returned_on_every_force() {
        let lit = DeferredLiteral::parse(TypeDescriptor::Int, "7").unwrap();
        assert_eq!(lit.get().unwrap(), RuntimeValue::Int(7));
        assert_eq!(lit.get().unwrap(), RuntimeValue::Int(7));
        assert_eq!(lit.descriptor(), TypeDescriptor::Int);
    }

    #[test]
    fn producer_fault_passes_through() {
        let failing = DeferredFn::new(TypeDescriptor::Long, || {
            Err(Error::Eval("upstream read failed".into()))
        });
        assert_eq!(
            failing.get().unwrap_err(),
            Error::Eval("upstream read failed".into())
        );
    }
}
