use serde::Serialize;
use serde_json::{Map, Value};
use service_core::error::AppError;
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_OPERATION: &str = "add";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalculationError {
    #[error("Invalid input. Please provide valid numbers.")]
    InvalidNumber,

    #[error("Cannot divide by zero")]
    DivisionByZero,

    #[error("Invalid operation. Use: add, subtract, multiply, or divide")]
    UnsupportedOperation,
}

impl CalculationError {
    /// Label used for the `calculations_total` counter.
    pub fn outcome(&self) -> &'static str {
        match self {
            CalculationError::InvalidNumber => "invalid_number",
            CalculationError::DivisionByZero => "division_by_zero",
            CalculationError::UnsupportedOperation => "unsupported_operation",
        }
    }
}

impl From<CalculationError> for AppError {
    fn from(err: CalculationError) -> Self {
        AppError::bad_request(err)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::Subtract => "subtract",
            Operation::Multiply => "multiply",
            Operation::Divide => "divide",
        }
    }

    /// Divisor is checked before dividing; `-0.0` counts as zero.
    pub fn apply(self, num1: f64, num2: f64) -> Result<f64, CalculationError> {
        match self {
            Operation::Add => Ok(num1 + num2),
            Operation::Subtract => Ok(num1 - num2),
            Operation::Multiply => Ok(num1 * num2),
            Operation::Divide => {
                if num2 == 0.0 {
                    return Err(CalculationError::DivisionByZero);
                }
                Ok(num1 / num2)
            }
        }
    }
}

/// Exact, case-sensitive match.
impl FromStr for Operation {
    type Err = CalculationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "add" => Ok(Operation::Add),
            "subtract" => Ok(Operation::Subtract),
            "multiply" => Ok(Operation::Multiply),
            "divide" => Ok(Operation::Divide),
            _ => Err(CalculationError::UnsupportedOperation),
        }
    }
}

/// Raw calculator fields as they arrived, before any conversion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CalculationInput {
    pub num1: Option<Value>,
    pub num2: Option<Value>,
    pub operation: Option<Value>,
}

impl CalculationInput {
    pub fn from_map(mut map: Map<String, Value>) -> Self {
        Self {
            num1: map.remove("num1"),
            num2: map.remove("num2"),
            operation: map.remove("operation"),
        }
    }

    /// Numbers are checked first, so a bad number wins over a bad operation.
    pub fn validate(self) -> Result<CalculationRequest, CalculationError> {
        let num1 = parse_number(self.num1.as_ref())?;
        let num2 = parse_number(self.num2.as_ref())?;

        let operation = match self.operation {
            None => DEFAULT_OPERATION.to_string(),
            Some(Value::String(op)) => op,
            Some(_) => return Err(CalculationError::UnsupportedOperation),
        };

        Ok(CalculationRequest {
            num1,
            num2,
            operation,
        })
    }
}

/// Convert one numeric field. Absent means zero.
pub fn parse_number(value: Option<&Value>) -> Result<f64, CalculationError> {
    match value {
        None => Ok(0.0),
        Some(Value::Number(n)) => n.as_f64().ok_or(CalculationError::InvalidNumber),
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| CalculationError::InvalidNumber),
        Some(Value::Bool(b)) => Ok(if *b { 1.0 } else { 0.0 }),
        Some(Value::Null | Value::Array(_) | Value::Object(_)) => {
            Err(CalculationError::InvalidNumber)
        }
    }
}

/// Validated calculator request. The operation is kept verbatim so it can be
/// echoed back.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculationRequest {
    pub num1: f64,
    pub num2: f64,
    pub operation: String,
}

impl CalculationRequest {
    pub fn calculate(self) -> Result<CalculationResponse, CalculationError> {
        let operation: Operation = self.operation.parse()?;
        let result = operation.apply(self.num1, self.num2)?;

        Ok(CalculationResponse {
            num1: self.num1,
            num2: self.num2,
            operation: self.operation,
            result,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculationResponse {
    pub num1: f64,
    pub num2: f64,
    pub operation: String,
    pub result: f64,
}
