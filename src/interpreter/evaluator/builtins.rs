use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Evaluator},
        value::core::Value,
    },
};

/// A host-provided builtin callback.
///
/// Callbacks receive the already evaluated arguments and either produce a
/// value or reject with a message; the evaluator attaches the call site's
/// line when it wraps a rejection into a runtime error.
pub type Callback = Box<dyn Fn(&[Value]) -> Result<Value, String>>;

impl Evaluator {
    /// Registers a builtin under the given name, replacing any previous one.
    ///
    /// Builtins take precedence over user-defined functions during a call,
    /// so registering `println` again changes what every `println(...)` in
    /// a program does.
    ///
    /// # Example
    /// ```
    /// use comet::interpreter::{evaluator::core::Evaluator, parser::core::Parser, value::core::Value};
    ///
    /// let mut evaluator = Evaluator::new();
    /// evaluator.register_builtin("double", Box::new(|args| match args {
    ///                               [Value::Int(n)] => Ok(Value::Int(n * 2)),
    ///                               _ => Err("Expected exactly 1 integer.".to_string()),
    ///                           }));
    ///
    /// let program = Parser::new("double(21)").parse();
    /// assert_eq!(evaluator.eval(&program), Ok(Value::Int(42)));
    /// ```
    pub fn register_builtin(&mut self, name: &str, callback: Callback) {
        self.builtins.insert(name.to_string(), callback);
    }

    /// Registers the standard builtins every evaluator starts with.
    pub(crate) fn register_default_builtins(&mut self) {
        self.register_builtin("println", Box::new(builtin_println));
        self.register_builtin("printf", Box::new(builtin_printf));
    }

    /// Runs a registered builtin, attaching the call line to any rejection.
    pub(crate) fn invoke_builtin(&mut self,
                                 name: &str,
                                 args: &[Value],
                                 line: usize)
                                 -> EvalResult<Value> {
        let callback = &self.builtins[name];
        callback(args).map_err(|details| RuntimeError::Builtin { details, line })
    }
}

/// The text a value prints as: strings print their raw text, integers and
/// booleans their literal forms, everything else its display form.
#[must_use]
pub fn primitive_text(value: &Value) -> String {
    match value {
        Value::Str(text) => text.clone(),
        Value::Int(value) => value.to_string(),
        Value::Bool(value) => value.to_string(),
        other => other.to_string(),
    }
}

/// `println()` prints a bare newline; `println(value)` prints the value's
/// primitive text followed by a newline. More than one argument is an
/// error.
fn builtin_println(args: &[Value]) -> Result<Value, String> {
    match args {
        [] => println!(),
        [value] => println!("{}", primitive_text(value)),
        _ => return Err(format!("Expected 0 or 1 arguments, got {}.", args.len())),
    }
    Ok(Value::Nop)
}

/// `printf(format, args...)` substitutes each `%d`, `%s`, `%v` or `%t` verb
/// with the next argument's primitive text and writes the result to
/// standard output without a trailing newline.
fn builtin_printf(args: &[Value]) -> Result<Value, String> {
    let Some((format, rest)) = args.split_first() else {
        return Err("Expected 1 or more arguments, got none.".to_string());
    };
    let Value::Str(format) = format else {
        return Err(format!("First argument expected to be CometString got '{}' instead",
                           format.type_name()));
    };
    let text = format_text(format, rest)?;
    print!("{text}");
    Ok(Value::Nop)
}

/// Substitutes format verbs left to right. `%%` renders a literal percent
/// sign and unknown verbs pass through unchanged; running out of arguments
/// is an error.
///
/// # Example
/// ```
/// use comet::interpreter::{evaluator::builtins::format_text, value::core::Value};
///
/// let args = [Value::Int(3), Value::from("stars")];
///
/// assert_eq!(format_text("%d %s out of 5%%", &args).unwrap(), "3 stars out of 5%");
/// assert_eq!(format_text("100%x", &[]).unwrap(), "100%x");
/// assert!(format_text("%d %d", &args[..1]).is_err());
/// ```
pub fn format_text(format: &str, args: &[Value]) -> Result<String, String> {
    let mut output = String::with_capacity(format.len());
    let mut characters = format.chars();
    let mut remaining = args.iter();

    while let Some(character) = characters.next() {
        if character != '%' {
            output.push(character);
            continue;
        }
        match characters.next() {
            Some('%') => output.push('%'),
            Some('d' | 's' | 'v' | 't') => {
                let value = remaining.next()
                                     .ok_or_else(|| {
                                         "Not enough arguments for the given format string."
                                             .to_string()
                                     })?;
                output.push_str(&primitive_text(value));
            },
            Some(other) => {
                output.push('%');
                output.push(other);
            },
            None => output.push('%'),
        }
    }

    Ok(output)
}
