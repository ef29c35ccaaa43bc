//! Tree-walking evaluator.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use std::io;
use std::io::prelude::*;
use std::rc::Rc;

use crate::ast::{Block, Expr, InfixOp, PrefixOp, Program, Stmt};
use crate::builtins;
use crate::env::Env;
use crate::value::{Function, HashPair, Value, ValueKind};

/// Errors raised while evaluating.
///
/// Every variant renders to one of the stable message strings asserted
/// by the tests. An error short-circuits all further evaluation of the
/// current program; nothing in the language intercepts one.
#[derive(Debug)]
pub enum RuntimeError {
    TypeMismatch(ValueKind, InfixOp, ValueKind),
    UnknownPrefixOperator(PrefixOp, ValueKind),
    UnknownInfixOperator(ValueKind, InfixOp, ValueKind),
    IdentifierNotFound(String),
    /// Assignment to a name no scope on the chain binds. Rendered with
    /// backticks, unlike `IdentifierNotFound`.
    AssignmentToUnbound(String),
    NotAFunction(ValueKind),
    IndexNotSupported(ValueKind),
    /// Non-hashable key in index position.
    UnusableHashKey(ValueKind),
    /// Non-hashable key in a hash literal. Renders without the colon of
    /// `UnusableHashKey`; the discrepancy is part of the stable surface.
    UnusableHashLiteralKey(ValueKind),
    WrongArgumentCount { got: usize, want: usize },
    UnsupportedArgument(&'static str, ValueKind),
    ArgumentMustBeArray(&'static str, ValueKind),
    DivisionByZero,
    Io(io::Error),
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeError::TypeMismatch(left, op, right) => {
                write!(f, "type mismatch: {} {} {}", left, op, right)
            }
            RuntimeError::UnknownPrefixOperator(op, right) => {
                write!(f, "unknown operator: {}{}", op, right)
            }
            RuntimeError::UnknownInfixOperator(left, op, right) => {
                write!(f, "unknown operator: {} {} {}", left, op, right)
            }
            RuntimeError::IdentifierNotFound(name) => {
                write!(f, "identifier not found: {}", name)
            }
            RuntimeError::AssignmentToUnbound(name) => {
                write!(f, "identifier not found `{}`", name)
            }
            RuntimeError::NotAFunction(kind) => write!(f, "not a function: {}", kind),
            RuntimeError::IndexNotSupported(kind) => {
                write!(f, "index operator not supported: {}", kind)
            }
            RuntimeError::UnusableHashKey(kind) => {
                write!(f, "unusable as hash key: {}", kind)
            }
            RuntimeError::UnusableHashLiteralKey(kind) => {
                write!(f, "unusable as hash key {}", kind)
            }
            RuntimeError::WrongArgumentCount { got, want } => {
                write!(f, "wrong number of arguments. got={}, want={}", got, want)
            }
            RuntimeError::UnsupportedArgument(builtin, kind) => {
                write!(f, "argument to `{}` not supported, got={}", builtin, kind)
            }
            RuntimeError::ArgumentMustBeArray(builtin, kind) => {
                write!(f, "argument to `{}` must be an ARRAY, got={}", builtin, kind)
            }
            RuntimeError::DivisionByZero => write!(f, "division by zero"),
            RuntimeError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl Error for RuntimeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            RuntimeError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for RuntimeError {
    fn from(e: io::Error) -> RuntimeError {
        RuntimeError::Io(e)
    }
}

/// Recursive tree walker.
///
/// The global environment persists across `eval_program` calls so a REPL
/// can keep definitions from one line to the next. `output` is where
/// `puts` writes.
#[derive(Debug)]
pub struct Evaluator<'a, W: Write> {
    output: &'a mut W,
    globals: Rc<Env>,

    // Slot carrying the value of a `return` upward through enclosing
    // blocks until a call or program boundary takes it.
    is_returning: Option<Value>,
}

impl<'a, W: Write> Evaluator<'a, W> {
    pub fn new(output: &'a mut W) -> Evaluator<'a, W> {
        Evaluator {
            output,
            globals: Env::new(),
            is_returning: None,
        }
    }

    /// Evaluate a program against the persistent global environment.
    ///
    /// A top-level `return` stops the program and yields its unwrapped
    /// value; otherwise the result is the value of the last statement.
    pub fn eval_program(&mut self, program: &Program) -> Result<Value, RuntimeError> {
        self.is_returning = None;
        let env = self.globals.clone();
        let mut result = Value::Null;
        for stmt in &program.statements {
            result = self.eval_stmt(stmt, &env)?;
            if let Some(value) = self.is_returning.take() {
                return Ok(value);
            }
        }
        Ok(result)
    }

    fn eval_stmt(&mut self, stmt: &Stmt, env: &Rc<Env>) -> Result<Value, RuntimeError> {
        match stmt {
            Stmt::Let { name, value } => {
                let value = self.eval_expr(value, env)?;
                env.set(name, value);
                Ok(Value::Null)
            }
            Stmt::Return(value) => {
                let value = self.eval_expr(value, env)?;
                self.is_returning = Some(value);
                Ok(Value::Null)
            }
            Stmt::Expr(expr) => self.eval_expr(expr, env),
        }
    }

    /// Unlike `eval_program`, a block stops at a `return` but leaves the
    /// value in the slot, so `return` works across nested blocks.
    fn eval_block(&mut self, block: &Block, env: &Rc<Env>) -> Result<Value, RuntimeError> {
        let mut result = Value::Null;
        for stmt in &block.0 {
            result = self.eval_stmt(stmt, env)?;
            if self.is_returning.is_some() {
                break;
            }
        }
        Ok(result)
    }

    fn eval_expr(&mut self, expr: &Expr, env: &Rc<Env>) -> Result<Value, RuntimeError> {
        match expr {
            Expr::Int(value) => Ok(Value::Integer(*value)),
            Expr::Bool(value) => Ok(Value::Boolean(*value)),
            Expr::Str(value) => Ok(Value::Str(value.clone())),
            Expr::Ident(name) => self.eval_identifier(name, env),
            Expr::Prefix { op, right } => {
                let right = self.eval_expr(right, env)?;
                eval_prefix(*op, right)
            }
            Expr::Infix { op, left, right } => {
                let left = self.eval_expr(left, env)?;
                let right = self.eval_expr(right, env)?;
                eval_infix(*op, left, right)
            }
            Expr::If {
                cond,
                consequence,
                alternative,
            } => {
                if self.eval_expr(cond, env)?.is_truthy() {
                    self.eval_block(consequence, env)
                } else if let Some(alt) = alternative {
                    self.eval_block(alt, env)
                } else {
                    Ok(Value::Null)
                }
            }
            Expr::Function { params, body } => Ok(Value::Function(Rc::new(Function {
                params: params.clone(),
                body: body.clone(),
                env: env.clone(),
            }))),
            Expr::Call { func, args } => {
                let func = self.eval_expr(func, env)?;
                let args = args
                    .iter()
                    .map(|arg| self.eval_expr(arg, env))
                    .collect::<Result<Vec<_>, _>>()?;
                self.apply_function(func, args)
            }
            Expr::Array(elements) => {
                let elements = elements
                    .iter()
                    .map(|e| self.eval_expr(e, env))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Value::Array(elements))
            }
            Expr::Index { left, index } => {
                let left = self.eval_expr(left, env)?;
                let index = self.eval_expr(index, env)?;
                eval_index(left, index)
            }
            Expr::Hash(pairs) => self.eval_hash_literal(pairs, env),
            Expr::Assign { name, value } => {
                let value = self.eval_expr(value, env)?;
                if env.reset(name, value.clone()) {
                    Ok(value)
                } else {
                    Err(RuntimeError::AssignmentToUnbound(name.clone()))
                }
            }
        }
    }

    /// Environment chain first, builtins table second.
    fn eval_identifier(&mut self, name: &str, env: &Rc<Env>) -> Result<Value, RuntimeError> {
        if let Some(value) = env.get(name) {
            return Ok(value);
        }
        if let Some(builtin) = builtins::lookup(name) {
            return Ok(Value::Builtin(builtin));
        }
        Err(RuntimeError::IdentifierNotFound(name.to_string()))
    }

    fn apply_function(&mut self, func: Value, args: Vec<Value>) -> Result<Value, RuntimeError> {
        match func {
            Value::Function(func) => {
                if args.len() != func.params.len() {
                    return Err(RuntimeError::WrongArgumentCount {
                        got: args.len(),
                        want: func.params.len(),
                    });
                }
                let call_env = Env::enclosing(func.env.clone());
                for (param, arg) in func.params.iter().zip(args) {
                    call_env.set(param, arg);
                }
                let result = self.eval_block(&func.body, &call_env)?;
                // The call boundary unwraps an early return; without one
                // the function yields its last expression.
                Ok(self.is_returning.take().unwrap_or(result))
            }
            Value::Builtin(builtin) => (builtin.func)(self.output, &args),
            other => Err(RuntimeError::NotAFunction(other.kind())),
        }
    }

    fn eval_hash_literal(
        &mut self,
        pairs: &[(Expr, Expr)],
        env: &Rc<Env>,
    ) -> Result<Value, RuntimeError> {
        let mut map = HashMap::new();
        for (key_expr, value_expr) in pairs {
            let key = self.eval_expr(key_expr, env)?;
            let hash_key = key
                .hash_key()
                .ok_or_else(|| RuntimeError::UnusableHashLiteralKey(key.kind()))?;
            let value = self.eval_expr(value_expr, env)?;
            // A later duplicate overwrites an earlier one.
            map.insert(hash_key, HashPair { key, value });
        }
        Ok(Value::Hash(map))
    }
}

fn eval_prefix(op: PrefixOp, right: Value) -> Result<Value, RuntimeError> {
    match op {
        PrefixOp::Bang => Ok(Value::Boolean(!right.is_truthy())),
        PrefixOp::Minus => match right {
            Value::Integer(value) => Ok(Value::Integer(-value)),
            other => Err(RuntimeError::UnknownPrefixOperator(op, other.kind())),
        },
    }
}

/// Infix dispatch. The order of the arms matters: `==`/`!=` on mixed
/// operand kinds compare identity (yielding false) rather than raising
/// the type mismatch the other operators raise.
fn eval_infix(op: InfixOp, left: Value, right: Value) -> Result<Value, RuntimeError> {
    match (left, right) {
        (Value::Integer(l), Value::Integer(r)) => eval_integer_infix(op, l, r),
        (Value::Str(l), Value::Str(r)) => match op {
            InfixOp::Plus => Ok(Value::Str(l + &r)),
            _ => Err(RuntimeError::UnknownInfixOperator(
                ValueKind::Str,
                op,
                ValueKind::Str,
            )),
        },
        (left, right) => match op {
            InfixOp::Eq => Ok(Value::Boolean(identity_eq(&left, &right))),
            InfixOp::NotEq => Ok(Value::Boolean(!identity_eq(&left, &right))),
            _ if left.kind() != right.kind() => {
                Err(RuntimeError::TypeMismatch(left.kind(), op, right.kind()))
            }
            _ => Err(RuntimeError::UnknownInfixOperator(
                left.kind(),
                op,
                right.kind(),
            )),
        },
    }
}

fn eval_integer_infix(op: InfixOp, left: i64, right: i64) -> Result<Value, RuntimeError> {
    match op {
        InfixOp::Plus => Ok(Value::Integer(left + right)),
        InfixOp::Minus => Ok(Value::Integer(left - right)),
        InfixOp::Asterisk => Ok(Value::Integer(left * right)),
        InfixOp::Slash => {
            if right == 0 {
                Err(RuntimeError::DivisionByZero)
            } else {
                Ok(Value::Integer(left / right))
            }
        }
        InfixOp::Lt => Ok(Value::Boolean(left < right)),
        InfixOp::Gt => Ok(Value::Boolean(left > right)),
        InfixOp::Eq => Ok(Value::Boolean(left == right)),
        InfixOp::NotEq => Ok(Value::Boolean(left != right)),
    }
}

/// The identity comparison `==`/`!=` fall back to for operands that are
/// neither integer nor string pairs. Meaningful for booleans, null, and
/// same-instance functions; everything else is unequal.
fn identity_eq(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Boolean(l), Value::Boolean(r)) => l == r,
        (Value::Null, Value::Null) => true,
        (Value::Function(l), Value::Function(r)) => Rc::ptr_eq(l, r),
        _ => false,
    }
}

fn eval_index(left: Value, index: Value) -> Result<Value, RuntimeError> {
    match (left, index) {
        (Value::Array(elements), Value::Integer(i)) => {
            if i < 0 || i as usize >= elements.len() {
                Ok(Value::Null)
            } else {
                Ok(elements[i as usize].clone())
            }
        }
        (Value::Hash(pairs), index) => {
            let key = index
                .hash_key()
                .ok_or_else(|| RuntimeError::UnusableHashKey(index.kind()))?;
            Ok(pairs
                .get(&key)
                .map(|pair| pair.value.clone())
                .unwrap_or(Value::Null))
        }
        (left, _) => Err(RuntimeError::IndexNotSupported(left.kind())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;
    use crate::parser::Parser;

    fn eval_input(input: &str) -> Result<Value, RuntimeError> {
        eval_with_output(input).0
    }

    fn eval_with_output(input: &str) -> (Result<Value, RuntimeError>, String) {
        let mut out: Vec<u8> = Vec::new();
        let mut parser = Parser::new(Lexer::new(input));
        let program = parser.parse_program();
        assert!(
            parser.errors().is_empty(),
            "parse errors for {:?}: {:?}",
            input,
            parser.errors()
        );
        let mut evaluator = Evaluator::new(&mut out);
        let result = evaluator.eval_program(&program);
        (result, String::from_utf8(out).expect("output is not UTF-8"))
    }

    fn eval_ok(input: &str) -> Value {
        eval_input(input).unwrap_or_else(|e| panic!("runtime error for {:?}: {}", input, e))
    }

    fn eval_err(input: &str) -> String {
        match eval_input(input) {
            Err(e) => e.to_string(),
            Ok(v) => panic!("expected error for {:?}, got {:?}", input, v),
        }
    }

    #[test]
    fn integer_expressions() {
        let tests = [
            ("5", 5),
            ("10", 10),
            ("-5", -5),
            ("-10", -10),
            ("5 + 5 + 5 + 5 - 10", 10),
            ("2 * 2 * 2 * 2 * 2", 32),
            ("-50 + 100 + -50", 0),
            ("5 * 2 + 10", 20),
            ("5 + 2 * 10", 25),
            ("20 + 2 * -10", 0),
            ("50 / 2 * 2 + 10", 60),
            ("2 * (5 + 10)", 30),
            ("3 * 3 * 3 + 10", 37),
            ("3 * (3 * 3) + 10", 37),
            ("(5 + 10 * 2 + 15 / 3) * 2 + -10", 50),
        ];
        for (input, expected) in tests {
            assert_eq!(eval_ok(input), Value::Integer(expected), "input: {:?}", input);
        }
    }

    #[test]
    fn boolean_expressions() {
        let tests = [
            ("true", true),
            ("false", false),
            ("1 < 2", true),
            ("1 > 2", false),
            ("1 < 1", false),
            ("1 > 1", false),
            ("1 == 1", true),
            ("1 != 1", false),
            ("1 == 2", false),
            ("1 != 2", true),
            ("true == true", true),
            ("false == false", true),
            ("true == false", false),
            ("true != false", true),
            ("false != true", true),
            ("(1 < 2) == true", true),
            ("(1 < 2) == false", false),
            ("(1 > 2) == true", false),
            ("(1 > 2) == false", true),
        ];
        for (input, expected) in tests {
            assert_eq!(eval_ok(input), Value::Boolean(expected), "input: {:?}", input);
        }
    }

    #[test]
    fn mixed_kind_equality_is_identity_not_error() {
        assert_eq!(eval_ok("5 == true"), Value::Boolean(false));
        assert_eq!(eval_ok("5 != true"), Value::Boolean(true));
        assert_eq!(eval_ok("[1] == [1]"), Value::Boolean(false));
    }

    #[test]
    fn bang_operator() {
        let tests = [
            ("!true", false),
            ("!false", true),
            ("!5", false),
            ("!!true", true),
            ("!!false", false),
            ("!!5", true),
        ];
        for (input, expected) in tests {
            assert_eq!(eval_ok(input), Value::Boolean(expected), "input: {:?}", input);
        }
    }

    #[test]
    fn if_else_expressions() {
        let tests = [
            ("if (true) { 10 }", Value::Integer(10)),
            ("if (false) { 10 }", Value::Null),
            ("if (1) { 10 }", Value::Integer(10)),
            ("if (1 < 2) { 10 }", Value::Integer(10)),
            ("if (1 > 2) { 10 }", Value::Null),
            ("if (1 > 2) { 10 } else { 20 }", Value::Integer(20)),
            ("if (1 < 2) { 10 } else { 20 }", Value::Integer(10)),
        ];
        for (input, expected) in tests {
            assert_eq!(eval_ok(input), expected, "input: {:?}", input);
        }
    }

    #[test]
    fn return_statements() {
        let tests = [
            ("return 10;", 10),
            ("return 10; 9;", 10),
            ("return 2 * 5; 9;", 10),
            ("9; return 2 * 5; 9;", 10),
            ("if (10 > 1) { if (10 > 1) { return 10; } return 1; }", 10),
        ];
        for (input, expected) in tests {
            assert_eq!(eval_ok(input), Value::Integer(expected), "input: {:?}", input);
        }
    }

    #[test]
    fn error_messages() {
        let tests = [
            ("5 + true;", "type mismatch: INTEGER + BOOLEAN"),
            ("5 + true; 5;", "type mismatch: INTEGER + BOOLEAN"),
            ("-true", "unknown operator: -BOOLEAN"),
            ("true + false;", "unknown operator: BOOLEAN + BOOLEAN"),
            ("5; true + false; 5", "unknown operator: BOOLEAN + BOOLEAN"),
            (
                "if (10 > 1) { true + false; }",
                "unknown operator: BOOLEAN + BOOLEAN",
            ),
            (
                "if (10 > 1) { if (10 > 1) { return true + false; } return 1; }",
                "unknown operator: BOOLEAN + BOOLEAN",
            ),
            ("foobar", "identifier not found: foobar"),
            ("\"Hello\" - \"World\"", "unknown operator: STRING - STRING"),
            (
                "{\"name\": \"Monkey\"}[fn(x) { x }];",
                "unusable as hash key: FUNCTION",
            ),
            ("{fn(x) { x }: \"Monkey\"}", "unusable as hash key FUNCTION"),
            ("5 / 0", "division by zero"),
            ("5[0]", "index operator not supported: INTEGER"),
            ("[1, 2, 3][\"one\"]", "index operator not supported: ARRAY"),
            ("10(5)", "not a function: INTEGER"),
        ];
        for (input, expected) in tests {
            assert_eq!(eval_err(input), expected, "input: {:?}", input);
        }
    }

    #[test]
    fn error_stops_evaluation() {
        // The statement after the failing one must not run.
        let (result, output) = eval_with_output("puts(1); 5 + true; puts(2);");
        assert_eq!(
            result.unwrap_err().to_string(),
            "type mismatch: INTEGER + BOOLEAN"
        );
        assert_eq!(output, "1\n");
    }

    #[test]
    fn let_statements() {
        let tests = [
            ("let a = 5; a;", 5),
            ("let a = 5 * 5; a;", 25),
            ("let a = 5; let b = a; b;", 5),
            ("let a = 5; let b = a; let c = a + b + 5; c;", 15),
        ];
        for (input, expected) in tests {
            assert_eq!(eval_ok(input), Value::Integer(expected), "input: {:?}", input);
        }
    }

    #[test]
    fn let_yields_no_observable_value() {
        assert_eq!(eval_ok("let a = 5;"), Value::Null);
    }

    #[test]
    fn let_rebinding_shadows() {
        assert_eq!(eval_ok("let a = 5; let a = 6; a;"), Value::Integer(6));
    }

    #[test]
    fn function_values_capture_their_environment() {
        match eval_ok("fn(x) { x + 2; };") {
            Value::Function(func) => {
                assert_eq!(func.params, vec!["x".to_string()]);
                assert_eq!(func.body.to_string(), "(x + 2)");
            }
            other => panic!("expected function, got {:?}", other),
        }
    }

    #[test]
    fn function_application() {
        let tests = [
            ("let identity = fn(x) { x; }; identity(5);", 5),
            ("let identity = fn(x) { return x; }; identity(5);", 5),
            ("let double = fn(x) { x * 2; }; double(5);", 10),
            ("let add = fn(x, y) { x + y; }; add(5, 5);", 10),
            ("let add = fn(x, y) { x + y; }; add(5 + 5, add(5, 5));", 20),
            ("fn(x) { x; }(5)", 5),
        ];
        for (input, expected) in tests {
            assert_eq!(eval_ok(input), Value::Integer(expected), "input: {:?}", input);
        }
    }

    #[test]
    fn closures() {
        let input = "
            let newAdder = fn(x) { fn(y) { x + y }; };
            let addTwo = newAdder(2);
            addTwo(2);
        ";
        assert_eq!(eval_ok(input), Value::Integer(4));
    }

    #[test]
    fn closures_observe_updates_to_captured_bindings() {
        let input = "
            let x = 1;
            let get = fn() { x };
            x = 2;
            get();
        ";
        assert_eq!(eval_ok(input), Value::Integer(2));
    }

    #[test]
    fn recursive_function_via_let_binding() {
        let input = "
            let fact = fn(n) { if (n < 1) { 1 } else { n * fact(n - 1) } };
            fact(5);
        ";
        assert_eq!(eval_ok(input), Value::Integer(120));
    }

    #[test]
    fn call_arity_is_checked() {
        assert_eq!(
            eval_err("fn(x) { x; }(1, 2)"),
            "wrong number of arguments. got=2, want=1"
        );
        assert_eq!(
            eval_err("fn(x, y) { x + y; }(1)"),
            "wrong number of arguments. got=1, want=2"
        );
    }

    #[test]
    fn assignment_mutates_the_defining_scope() {
        assert_eq!(eval_ok("let x = 5; x = 10; x;"), Value::Integer(10));
        assert_eq!(
            eval_ok("let x = 5; let bump = fn() { x = x + 1; x; }; bump(); bump(); x;"),
            Value::Integer(7)
        );
    }

    #[test]
    fn assignment_evaluates_to_the_assigned_value() {
        assert_eq!(eval_ok("let x = 1; x = 5;"), Value::Integer(5));
    }

    #[test]
    fn assignment_to_unbound_name_is_an_error() {
        assert_eq!(eval_err("x = 5;"), "identifier not found `x`");
    }

    #[test]
    fn string_literals_and_concatenation() {
        assert_eq!(
            eval_ok("\"Hello World!\""),
            Value::Str("Hello World!".to_string())
        );
        assert_eq!(
            eval_ok("\"Hello\" + \" \" + \"World!\""),
            Value::Str("Hello World!".to_string())
        );
    }

    #[test]
    fn array_literals() {
        assert_eq!(
            eval_ok("[1, 2 * 2, 3 + 3]"),
            Value::Array(vec![
                Value::Integer(1),
                Value::Integer(4),
                Value::Integer(6),
            ])
        );
    }

    #[test]
    fn array_index_expressions() {
        let tests = [
            ("[1, 2, 3][0]", Value::Integer(1)),
            ("[1, 2, 3][1]", Value::Integer(2)),
            ("[1, 2, 3][2]", Value::Integer(3)),
            ("let i = 0; [1][i];", Value::Integer(1)),
            ("[1, 2, 3][1 + 1];", Value::Integer(3)),
            ("let myArray = [1, 2, 3]; myArray[2];", Value::Integer(3)),
            (
                "let myArray = [1, 2, 3]; myArray[0] + myArray[1] + myArray[2];",
                Value::Integer(6),
            ),
            (
                "let myArray = [1, 2, 3]; let i = myArray[0]; myArray[i]",
                Value::Integer(2),
            ),
            ("[1, 2, 3][3]", Value::Null),
            ("[1, 2, 3][-1]", Value::Null),
        ];
        for (input, expected) in tests {
            assert_eq!(eval_ok(input), expected, "input: {:?}", input);
        }
    }

    #[test]
    fn hash_literals() {
        let input = "
            let two = \"two\";
            {
                \"one\": 10 - 9,
                two: 1 + 1,
                \"thr\" + \"ee\": 6 / 2,
                4: 4,
                true: 5,
                false: 6
            }
        ";
        let pairs = match eval_ok(input) {
            Value::Hash(pairs) => pairs,
            other => panic!("expected hash, got {:?}", other),
        };
        let expected = [
            (Value::Str("one".to_string()), 1),
            (Value::Str("two".to_string()), 2),
            (Value::Str("three".to_string()), 3),
            (Value::Integer(4), 4),
            (Value::Boolean(true), 5),
            (Value::Boolean(false), 6),
        ];
        assert_eq!(pairs.len(), expected.len());
        for (key, value) in expected {
            let pair = pairs
                .get(&key.hash_key().unwrap())
                .unwrap_or_else(|| panic!("missing key {:?}", key));
            assert_eq!(pair.key, key);
            assert_eq!(pair.value, Value::Integer(value));
        }
    }

    #[test]
    fn hash_index_expressions() {
        let tests = [
            ("{\"foo\": 5}[\"foo\"]", Value::Integer(5)),
            ("{\"foo\": 5}[\"bar\"]", Value::Null),
            ("let key = \"foo\"; {\"foo\": 5}[key]", Value::Integer(5)),
            ("{}[\"foo\"]", Value::Null),
            ("{5: 5}[5]", Value::Integer(5)),
            ("{true: 5}[true]", Value::Integer(5)),
            ("{false: 5}[false]", Value::Integer(5)),
        ];
        for (input, expected) in tests {
            assert_eq!(eval_ok(input), expected, "input: {:?}", input);
        }
    }

    #[test]
    fn later_duplicate_hash_keys_overwrite() {
        assert_eq!(
            eval_ok("{\"a\": 1, \"a\": 2}[\"a\"]"),
            Value::Integer(2)
        );
    }

    #[test]
    fn puts_writes_render_forms_to_the_output() {
        let (result, output) = eval_with_output("puts(1, \"two\", [3, 4])");
        assert_eq!(result.unwrap(), Value::Null);
        assert_eq!(output, "1\ntwo\n[3, 4]\n");
    }

    #[test]
    fn evaluation_is_deterministic() {
        let input = "let f = fn(x) { x * 2 }; f(3) + f(4)";
        assert_eq!(eval_ok(input), eval_ok(input));
    }
}
