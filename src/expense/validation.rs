//! Checks user input before it becomes a [NewExpense].
//!
//! Both the JSON API and the HTML form go through [ExpenseRequest::validate],
//! so bad input is reported as a client error instead of reaching the database.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::expense::NewExpense;

const INPUT_DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

/// The reasons an expense submitted by a client can be rejected.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ValidationError {
    /// A required field was missing or null.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// A text field was present but only contained whitespace.
    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    /// A text field was given a number, list or object.
    #[error("{0} must be text")]
    NotText(&'static str),

    /// The amount could not be read as a finite number.
    #[error("amount \"{0}\" is not a number")]
    InvalidAmount(String),

    /// Expenses record money spent, so the amount must be above zero.
    #[error("amount must be greater than zero, got {0}")]
    NonPositiveAmount(f64),

    /// The date was not a calendar date in the format YYYY-MM-DD.
    #[error("date \"{0}\" is not a valid date, use the format YYYY-MM-DD")]
    InvalidDate(String),
}

/// The unchecked fields of an expense as sent by a client.
///
/// Fields are kept as raw JSON values so that wrong types produce a
/// [ValidationError] rather than a deserialization failure.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRequest {
    /// A JSON number or a numeric string.
    #[serde(default)]
    pub amount: Option<Value>,
    /// The category label.
    #[serde(default)]
    pub category: Option<Value>,
    /// The description text.
    #[serde(default)]
    pub description: Option<Value>,
    /// A date string in the format YYYY-MM-DD.
    #[serde(default)]
    pub date: Option<Value>,
}

impl ExpenseRequest {
    /// Create a request from the text fields of an HTML form.
    pub fn from_text(amount: &str, category: &str, description: &str, date: &str) -> Self {
        Self {
            amount: Some(Value::String(amount.to_owned())),
            category: Some(Value::String(category.to_owned())),
            description: Some(Value::String(description.to_owned())),
            date: Some(Value::String(date.to_owned())),
        }
    }

    /// Check every field and convert the request into a [NewExpense].
    ///
    /// Text fields are stored exactly as submitted; whitespace is only
    /// trimmed to decide whether a field is empty.
    ///
    /// # Errors
    /// Returns the [ValidationError] for the first field that fails, checked
    /// in the order amount, category, description, date.
    pub fn validate(self) -> Result<NewExpense, ValidationError> {
        let amount = parse_amount(self.amount)?;
        let category = parse_text("category", self.category)?;
        let description = parse_text("description", self.description)?;
        let date = parse_date(self.date)?;

        Ok(NewExpense {
            amount,
            category,
            description,
            date,
        })
    }
}

fn parse_amount(value: Option<Value>) -> Result<f64, ValidationError> {
    let amount = match value {
        None | Some(Value::Null) => return Err(ValidationError::MissingField("amount")),
        Some(Value::Number(number)) => number
            .as_f64()
            .ok_or_else(|| ValidationError::InvalidAmount(number.to_string()))?,
        Some(Value::String(text)) if text.trim().is_empty() => {
            return Err(ValidationError::MissingField("amount"));
        }
        Some(Value::String(text)) => text
            .trim()
            .parse::<f64>()
            .map_err(|_| ValidationError::InvalidAmount(text.clone()))?,
        Some(other) => return Err(ValidationError::InvalidAmount(other.to_string())),
    };

    if !amount.is_finite() {
        return Err(ValidationError::InvalidAmount(amount.to_string()));
    }

    if amount <= 0.0 {
        return Err(ValidationError::NonPositiveAmount(amount));
    }

    Ok(amount)
}

fn parse_text(field: &'static str, value: Option<Value>) -> Result<String, ValidationError> {
    match value {
        None | Some(Value::Null) => Err(ValidationError::MissingField(field)),
        Some(Value::String(text)) if text.trim().is_empty() => {
            Err(ValidationError::EmptyField(field))
        }
        Some(Value::String(text)) => Ok(text),
        Some(_) => Err(ValidationError::NotText(field)),
    }
}

fn parse_date(value: Option<Value>) -> Result<Date, ValidationError> {
    match value {
        None | Some(Value::Null) => Err(ValidationError::MissingField("date")),
        Some(Value::String(text)) if text.trim().is_empty() => {
            Err(ValidationError::MissingField("date"))
        }
        Some(Value::String(text)) => Date::parse(text.trim(), INPUT_DATE_FORMAT)
            .map_err(|_| ValidationError::InvalidDate(text)),
        Some(other) => Err(ValidationError::InvalidDate(other.to_string())),
    }
}
