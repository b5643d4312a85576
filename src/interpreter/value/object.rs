use std::{cell::RefCell, collections::HashMap, rc::Rc};

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::EvalResult,
        value::core::{FunctionValue, Value},
    },
};

/// The method name a struct declares to act as its constructor.
pub const CONSTRUCTOR_NAME: &str = "init";

/// The descriptor of a user-defined struct type.
///
/// One descriptor exists per `struct` declaration; every instance created
/// from it holds a shared reference back to it for method lookup. The
/// language has no method overloading, so method names are unique.
#[derive(Debug, PartialEq)]
pub struct StructDef {
    /// The declared type name.
    pub name:    String,
    /// The struct's methods, keyed by name.
    pub methods: HashMap<String, Rc<FunctionValue>>,
}

impl StructDef {
    /// Creates a descriptor with no methods.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self { name:    name.to_string(),
               methods: HashMap::new(), }
    }

    /// Adds a method to the descriptor.
    ///
    /// # Errors
    /// Returns [`RuntimeError::DuplicateMethod`] when a method with the same
    /// name was already added; the language has no overloading.
    ///
    /// # Example
    /// ```
    /// use comet::{
    ///     ast::BlockStatement,
    ///     interpreter::value::{core::FunctionValue, object::StructDef},
    /// };
    ///
    /// let mut def = StructDef::new("Point");
    /// let method = FunctionValue { name:       "norm".to_string(),
    ///                              parameters: vec![],
    ///                              body:       BlockStatement::empty(1), };
    ///
    /// assert!(def.add(method.clone(), 1).is_ok());
    /// assert!(def.add(method, 2).is_err());
    /// ```
    pub fn add(&mut self, method: FunctionValue, line: usize) -> EvalResult<()> {
        if self.methods.contains_key(&method.name) {
            return Err(RuntimeError::DuplicateMethod { method: method.name,
                                                       type_name: self.name.clone(),
                                                       line });
        }
        self.methods.insert(method.name.clone(), Rc::new(method));
        Ok(())
    }

    /// The struct's `init` method, if one was declared. Consulted once per
    /// `new` expression.
    #[must_use]
    pub fn constructor(&self) -> Option<&Rc<FunctionValue>> {
        self.methods.get(CONSTRUCTOR_NAME)
    }

    /// Looks up a method by name.
    #[must_use]
    pub fn method(&self, name: &str) -> Option<&Rc<FunctionValue>> {
        self.methods.get(name)
    }
}

/// A value created from a struct descriptor by `new`.
///
/// Fields are a dynamic bag: methods may add new fields at any point through
/// `this.field = value`. The field map sits behind a [`RefCell`] because the
/// instance itself is shared, and sharing is what gives instances identity.
#[derive(Debug, PartialEq)]
pub struct Instance {
    /// The type this instance was created from.
    pub struct_def: Rc<StructDef>,
    /// The instance's state.
    pub fields:     RefCell<HashMap<String, Value>>,
}

impl Instance {
    /// Creates an instance with no fields set.
    #[must_use]
    pub fn new(struct_def: Rc<StructDef>) -> Self {
        Self { struct_def,
               fields: RefCell::new(HashMap::new()) }
    }
}
