use std::any::{Any, TypeId};

/// Typed key for one settable property of `T`: the property's name plus a
/// setter writing a `V` into it. Generated as a `SCREAMING_CASE` associated
/// constant by `#[derive(Buildable)]`; only such keys are accepted by the
/// typed setter, so selecting anything that is not a declared property does
/// not compile.
pub struct Property<T, V> {
    name: &'static str,
    write: fn(&mut T, V),
}

impl<T, V> Property<T, V> {
    pub const fn new(name: &'static str, write: fn(&mut T, V)) -> Self {
        Self { name, write }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub const fn write(&self) -> fn(&mut T, V) {
        self.write
    }
}

impl<T, V> Clone for Property<T, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, V> Copy for Property<T, V> {}

/// Runtime descriptor for one property of `T`, the unit the build-time
/// validation scan iterates over.
///
/// `nullable` is the author's explicit nullability declaration: `Option`
/// fields are nullable unless marked `non_null`, and `is_null` reports
/// whether the property currently holds no value (constant `false` for
/// fields that cannot be null). `write_any` applies a type-erased value by
/// cloning it in, returning `false` on a type mismatch.
pub struct PropertyInfo<T> {
    pub name: &'static str,
    pub required: bool,
    pub nullable: bool,
    pub value_type: fn() -> TypeId,
    pub is_null: fn(&T) -> bool,
    pub write_any: fn(&mut T, &dyn Any) -> bool,
}
