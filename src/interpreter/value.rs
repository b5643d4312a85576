/// Struct descriptors and instances.
///
/// Defines the `StructDef` type registered by a struct declaration and the
/// `Instance` type created by `new`. A descriptor owns the struct's methods;
/// instances share their descriptor and carry a dynamic field map.
pub mod object;

pub mod core;
