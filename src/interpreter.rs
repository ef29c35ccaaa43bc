//! API to control the interpreter.

use std::error::Error;
use std::fmt;
use std::io::prelude::*;

use crate::eval::Evaluator;
use crate::lexer::Lexer;
use crate::parser::Parser;

pub use crate::diag::ParseError;
pub use crate::eval::RuntimeError;
pub use crate::value::Value;

/// Tree-walk interpreter.
///
/// Definitions persist across `eval` calls, which is what makes a REPL
/// session work.
///
/// # Example
///
/// Define a function in one invocation and use it in later ones:
///
/// ```
/// # use rmonkey::interpreter::{Interpreter, MonkeyError};
///
/// let mut output: Vec<u8> = Vec::new();
/// let mut interp = Interpreter::new(&mut output);
///
/// interp.eval("let max = fn(x, y) { if (x > y) { x } else { y } };")?;
/// let result = interp.eval("max(10, 20)")?;
/// interp.eval(r#"puts("hello")"#)?;
///
/// assert_eq!(result.to_string(), "20");
/// assert_eq!(output, b"hello\n");
/// # Ok::<(), MonkeyError>(())
/// ```
#[derive(Debug)]
pub struct Interpreter<'t, W: Write> {
    evaluator: Evaluator<'t, W>,
}

/// Errors the interpreter can raise: one channel per pipeline stage.
#[derive(Debug)]
pub enum MonkeyError {
    /// Everything the parser accumulated for this source text.
    /// Evaluation does not run when this is non-empty.
    Parse(Vec<ParseError>),

    /// Error occurring during evaluation.
    Runtime(RuntimeError),
}

impl fmt::Display for MonkeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonkeyError::Parse(errors) => {
                write!(f, "parse errors:")?;
                for e in errors {
                    write!(f, "\n\t{}", e)?;
                }
                Ok(())
            }
            MonkeyError::Runtime(e) => write!(f, "runtime error: {}", e),
        }
    }
}

impl Error for MonkeyError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            MonkeyError::Parse(_) => None,
            MonkeyError::Runtime(e) => Some(e),
        }
    }
}

impl From<RuntimeError> for MonkeyError {
    fn from(e: RuntimeError) -> MonkeyError {
        MonkeyError::Runtime(e)
    }
}

impl<W: Write> Interpreter<'_, W> {
    pub fn new(output: &mut W) -> Interpreter<'_, W> {
        Interpreter {
            evaluator: Evaluator::new(output),
        }
    }

    /// Run `source` through the whole pipeline against the persistent
    /// environment and return the final value.
    pub fn eval(&mut self, source: &str) -> Result<Value, MonkeyError> {
        let mut parser = Parser::new(Lexer::new(source));
        let program = parser.parse_program();
        let errors = parser.into_errors();
        if !errors.is_empty() {
            return Err(MonkeyError::Parse(errors));
        }
        Ok(self.evaluator.eval_program(&program)?)
    }
}
