#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can be raised while evaluating a program.
///
/// Runtime errors short-circuit evaluation: any failing subexpression aborts
/// its enclosing expression and statement, and the error reaches the caller
/// of the evaluator unchanged.
pub enum RuntimeError {
    /// Read or assigned an identifier that no scope declares.
    UnknownIdentifier {
        /// The identifier name.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Called a name that is neither a builtin nor bound in any scope.
    UnknownFunction {
        /// The name that was called.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Called a value that is not a function.
    NotCallable {
        /// Type tag of the value that was called.
        type_name: &'static str,
        /// The source line where the error occurred.
        line:      usize,
    },
    /// A function was called with fewer arguments than it has parameters.
    FunctionArity {
        /// The function name.
        name:     String,
        /// Declared parameter count.
        expected: usize,
        /// Number of arguments supplied.
        given:    usize,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// `new` named a type that was never declared.
    UnknownType {
        /// The requested type name.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// `new` passed arguments to a struct that declares no `init` method.
    MissingConstructor {
        /// The struct name.
        type_name: String,
        /// The source line where the error occurred.
        line:      usize,
    },
    /// Called a method that the instance's struct does not declare.
    UnknownMethod {
        /// The method name.
        method:    String,
        /// The struct name.
        type_name: String,
        /// The source line where the error occurred.
        line:      usize,
    },
    /// A method was called with fewer arguments than it has parameters.
    MethodArity {
        /// The method name.
        method:    String,
        /// The struct name.
        type_name: String,
        /// Declared parameter count.
        expected:  usize,
        /// Number of arguments supplied.
        given:     usize,
        /// The source line where the error occurred.
        line:      usize,
    },
    /// A struct declared two methods with the same name.
    DuplicateMethod {
        /// The repeated method name.
        method:    String,
        /// The struct name.
        type_name: String,
        /// The source line where the error occurred.
        line:      usize,
    },
    /// Called a method on a value that is not a struct instance.
    MethodTargetNotObject {
        /// The method name.
        method: String,
        /// The source line where the error occurred.
        line:   usize,
    },
    /// Read or wrote a field on a value that is not a struct instance.
    FieldTargetNotObject {
        /// The field name.
        field:     String,
        /// Type tag of the value the access was attempted on.
        type_name: &'static str,
        /// The source line where the error occurred.
        line:      usize,
    },
    /// Read an instance field that was never set.
    UnknownField {
        /// The field name.
        field:     String,
        /// The struct name.
        type_name: String,
        /// The source line where the error occurred.
        line:      usize,
    },
    /// The right-hand side of `.` was neither a field nor a method call.
    InvalidMemberAccess {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A prefix operator was applied to the wrong operand type.
    PrefixTypeMismatch {
        /// The operator literal.
        operator: &'static str,
        /// Type tag the operator requires.
        expected: &'static str,
        /// Type tag of the operand that was found.
        found:    &'static str,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// A binary operator was applied to an unsupported pair of operand types.
    OperatorTypeMismatch {
        /// The operator literal.
        operator: String,
        /// Type tag of the left operand.
        left:     &'static str,
        /// Type tag of the right operand.
        right:    &'static str,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// A mixed string operation other than concatenation or repetition.
    StringOperandMismatch {
        /// The operator literal.
        operator: String,
        /// Type tag of the left operand.
        left:     &'static str,
        /// Type tag of the right operand.
        right:    &'static str,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// Strings support no binary operator besides `+`.
    InvalidStringOperation {
        /// The operator literal.
        operator: String,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// Booleans support no binary operator besides `==` and `!=`.
    InvalidBooleanOperation {
        /// The operator literal.
        operator: String,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// Repeated a string a negative number of times.
    NegativeRepeat {
        /// The repetition count that was supplied.
        count: i64,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// An `if` test evaluated to something other than a boolean.
    ConditionNotBoolean {
        /// Display form of the value the test produced.
        found: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Indexed a value that is not an array.
    IndexTargetNotArray {
        /// Type tag of the indexed value.
        found: &'static str,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Used a non-integer value as an array index.
    IndexNotInteger {
        /// Type tag of the index value.
        found: &'static str,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Array index outside `0..length`.
    IndexOutOfBounds {
        /// The array length.
        length: usize,
        /// The requested index.
        index:  i64,
        /// The source line where the error occurred.
        line:   usize,
    },
    /// A `for` loop iterated over something that is not a range.
    LoopTargetNotRange {
        /// Type tag of the iterated value.
        found: &'static str,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Integer arithmetic overflowed.
    Overflow {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Attempted division by zero.
    DivisionByZero {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A builtin callback rejected its arguments.
    Builtin {
        /// The message produced by the callback.
        details: String,
        /// The source line of the call.
        line:    usize,
    },
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownIdentifier { name, line } => write!(f,
                                                             "Error on line {line}: Identifier ({name}) is not bounded to any value, have you tried declaring it?"),

            Self::UnknownFunction { name, line } => {
                write!(f, "Error on line {line}: Cannot find callable symbol {name}")
            },

            Self::NotCallable { type_name, line } => write!(f,
                                                            "Error on line {line}: Cannot invoke none callable object of type {type_name}"),

            Self::FunctionArity { name,
                                  expected,
                                  given,
                                  line, } => write!(f,
                                                    "Error on line {line}: Function '{name}' expects {expected} arguments, {given} were given"),

            Self::UnknownType { name, line } => {
                write!(f, "Error on line {line}: Type '{name}' not found")
            },

            Self::MissingConstructor { type_name, line } => write!(f,
                                                                   "Error on line {line}: Cannot find a defined constructor on the '{type_name}' type, make sure to define an 'init' method on the struct"),

            Self::UnknownMethod { method,
                                  type_name,
                                  line, } => write!(f,
                                                    "Error on line {line}: Could not find method '{method}' on type '{type_name}'"),

            Self::MethodArity { method,
                                type_name,
                                expected,
                                given,
                                line, } => write!(f,
                                                  "Error on line {line}: Method '{method}' on type '{type_name}' expects at least {expected} parameters, {given} were given"),

            Self::DuplicateMethod { method,
                                    type_name,
                                    line, } => write!(f,
                                                      "Error on line {line}: Method already exist with the name '{method}' on '{type_name}' struct"),

            Self::MethodTargetNotObject { method, line } => write!(f,
                                                                   "Error on line {line}: Cannot call method '{method}' on none object type"),

            Self::FieldTargetNotObject { field,
                                         type_name,
                                         line, } => write!(f,
                                                           "Error on line {line}: Cannot access field '{field}' on none object type {type_name}"),

            Self::UnknownField { field,
                                 type_name,
                                 line, } => write!(f,
                                                   "Error on line {line}: Field '{field}' is not defined on instance of type '{type_name}'"),

            Self::InvalidMemberAccess { line } => {
                write!(f, "Error on line {line}: Used '.' operator with none function element")
            },

            Self::PrefixTypeMismatch { operator,
                                       expected,
                                       found,
                                       line, } => write!(f,
                                                         "Error on line {line}: Cannot apply operator ({operator}) on none {expected} type {found}"),

            Self::OperatorTypeMismatch { operator,
                                         left,
                                         right,
                                         line, } => write!(f,
                                                           "Error on line {line}: Cannot apply operator {operator} on given types {left} and {right}"),

            Self::StringOperandMismatch { operator,
                                          left,
                                          right,
                                          line, } => write!(f,
                                                            "Error on line {line}: Cannot apply operation '{operator}' on operands of type '{left}' and '{right}'"),

            Self::InvalidStringOperation { operator, line } => write!(f,
                                                                      "Error on line {line}: Cannot execute binary operator '{operator}' on strings"),

            Self::InvalidBooleanOperation { operator, line } => write!(f,
                                                                       "Error on line {line}: None-applicable operator {operator} for booleans"),

            Self::NegativeRepeat { count, line } => write!(f,
                                                           "Error on line {line}: Cannot repeat a string a negative number of times ({count})"),

            Self::ConditionNotBoolean { found, line } => write!(f,
                                                                "Error on line {line}: Test part of the if statement should evaluate to CometBool, evaluated to {found} instead"),

            Self::IndexTargetNotArray { found, line } => {
                write!(f, "Error on line {line}: Expected CometArray got {found}")
            },

            Self::IndexNotInteger { found, line } => {
                write!(f, "Error on line {line}: Expected CometInt got {found}")
            },

            Self::IndexOutOfBounds { length, index, line } => write!(f,
                                                                     "Error on line {line}: Array access out of bounds, array of length {length}, index was: {index}"),

            Self::LoopTargetNotRange { found, line } => write!(f,
                                                               "Error on line {line}: For loops can only iterate over RANGE values, got {found} instead"),

            Self::Overflow { line } => write!(f,
                                              "Error on line {line}: Integer overflow while trying to compute result"),

            Self::DivisionByZero { line } => write!(f, "Error on line {line}: Division by zero"),

            Self::Builtin { details, line } => write!(f, "Error on line {line}: {details}"),
        }
    }
}

impl std::error::Error for RuntimeError {}
