//! Transaction model
//!
//! A transaction is an immutable record of one monetary movement. Amounts are
//! stored non-negative; the type decides whether it adds to or subtracts
//! from a balance. Edits build a new value with the same id.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::category::Category;
use super::ids::TransactionId;
use super::money::{Money, MAX_AMOUNT};
use super::month::Month;
use crate::error::{LedgerError, LedgerResult};

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    /// Wire token, matched case-sensitively on import
    pub fn token(&self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::Expense => "Expense",
        }
    }

    /// Apply this type's sign to an amount
    pub fn signed(&self, amount: Money) -> Money {
        match self {
            Self::Income => amount,
            Self::Expense => -amount,
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

impl FromStr for TransactionType {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Income" => Ok(Self::Income),
            "Expense" => Ok(Self::Expense),
            other => Err(LedgerError::validation(format!(
                "Unknown transaction type '{}', expected Income or Expense",
                other
            ))),
        }
    }
}

/// Field values for creating or revising a transaction
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionInput {
    pub description: String,
    pub amount: Money,
    pub transaction_type: TransactionType,
    pub date: NaiveDate,
    pub category: Option<Category>,
}

impl TransactionInput {
    pub fn new(
        description: impl Into<String>,
        amount: Money,
        transaction_type: TransactionType,
        date: NaiveDate,
        category: Option<Category>,
    ) -> Self {
        Self {
            description: description.into(),
            amount,
            transaction_type,
            date,
            category,
        }
    }

    fn validate(&self) -> LedgerResult<()> {
        if self.amount.is_negative() {
            return Err(LedgerError::validation(format!(
                "Amount must not be negative ({}); use the transaction type for direction",
                self.amount
            )));
        }
        if self.amount.exceeds_limit() {
            return Err(LedgerError::validation(format!(
                "Amount {} is larger than the maximum of {}",
                self.amount, MAX_AMOUNT
            )));
        }
        Ok(())
    }
}

/// A financial transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TransactionRecord")]
pub struct Transaction {
    id: TransactionId,
    description: String,
    amount: Money,
    #[serde(rename = "type")]
    transaction_type: TransactionType,
    date: NaiveDate,
    category: Option<Category>,
}

/// Serialized shape of a [`Transaction`], checked on the way in
#[derive(Deserialize)]
struct TransactionRecord {
    id: TransactionId,
    description: String,
    amount: Money,
    #[serde(rename = "type")]
    transaction_type: TransactionType,
    date: NaiveDate,
    category: Option<Category>,
}

impl TryFrom<TransactionRecord> for Transaction {
    type Error = LedgerError;

    fn try_from(record: TransactionRecord) -> LedgerResult<Self> {
        Self::with_id(
            record.id,
            TransactionInput::new(
                record.description,
                record.amount,
                record.transaction_type,
                record.date,
                record.category,
            ),
        )
    }
}

impl Transaction {
    /// Create a new transaction with a fresh id
    pub fn new(input: TransactionInput) -> LedgerResult<Self> {
        Self::with_id(TransactionId::new(), input)
    }

    /// Rebuild a transaction with a known id (CSV import)
    pub fn with_id(id: TransactionId, input: TransactionInput) -> LedgerResult<Self> {
        input.validate()?;
        Ok(Self {
            id,
            description: input.description,
            amount: input.amount,
            transaction_type: input.transaction_type,
            date: input.date,
            category: input.category,
        })
    }

    /// Build the edited version of this transaction, keeping its id
    pub fn revise(&self, input: TransactionInput) -> LedgerResult<Self> {
        Self::with_id(self.id, input)
    }

    /// Copy of this transaction's fields, ready to be edited and revised
    pub fn to_input(&self) -> TransactionInput {
        TransactionInput {
            description: self.description.clone(),
            amount: self.amount,
            transaction_type: self.transaction_type,
            date: self.date,
            category: self.category.clone(),
        }
    }

    pub fn id(&self) -> TransactionId {
        self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn transaction_type(&self) -> TransactionType {
        self.transaction_type
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn category(&self) -> Option<&Category> {
        self.category.as_ref()
    }

    pub fn month(&self) -> Month {
        Month::of(self.date)
    }

    pub fn is_income(&self) -> bool {
        self.transaction_type == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.transaction_type == TransactionType::Expense
    }

    /// Amount with the type's sign applied
    pub fn signed_amount(&self) -> Money {
        self.transaction_type.signed(self.amount)
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.date.format("%Y-%m-%d"),
            self.description,
            self.transaction_type,
            self.amount
        )
    }
}
