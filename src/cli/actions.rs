use std::fmt;
use std::str::FromStr;

use regex::Regex;
use thiserror::Error;

use crate::models::cart::QuantityChange;
use crate::services::{CartService, CartServiceError};

lazy_static::lazy_static! {
    static ref ACTION_REGEX: Regex =
        Regex::new(r"^(add|inc|dec|set):(\d+)(?:=(-?\d+))?$").unwrap();
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ActionParseError {
    #[error("Unrecognised action '{0}', expected add:<id>, inc:<id>, dec:<id> or set:<id>=<qty>")]
    Malformed(String),
    #[error("Action '{0}' needs a quantity, e.g. set:1=3")]
    MissingQuantity(String),
    #[error("Action '{0}' does not take a quantity")]
    UnexpectedQuantity(String),
    #[error("Number out of range in '{0}'")]
    OutOfRange(String),
}

/// One user action against the cart, as typed on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartAction {
    Add(u32),
    Increment(u32),
    Decrement(u32),
    Set { id: u32, quantity: i64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Added { quantity: u32 },
    Changed(QuantityChange),
}

impl CartAction {
    pub fn product_id(&self) -> u32 {
        match self {
            CartAction::Add(id) | CartAction::Increment(id) | CartAction::Decrement(id) => *id,
            CartAction::Set { id, .. } => *id,
        }
    }

    pub fn apply(&self, service: &mut CartService) -> Result<ActionOutcome, CartServiceError> {
        let outcome = match *self {
            CartAction::Add(id) => ActionOutcome::Added {
                quantity: service.add_product(id)?,
            },
            CartAction::Increment(id) => ActionOutcome::Changed(service.increment(id)),
            CartAction::Decrement(id) => ActionOutcome::Changed(service.decrement(id)),
            CartAction::Set { id, quantity } => {
                ActionOutcome::Changed(service.set_quantity(id, quantity))
            }
        };
        Ok(outcome)
    }
}

impl FromStr for CartAction {
    type Err = ActionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        let caps = ACTION_REGEX
            .captures(input)
            .ok_or_else(|| ActionParseError::Malformed(input.to_string()))?;

        let id: u32 = caps[2]
            .parse()
            .map_err(|_| ActionParseError::OutOfRange(input.to_string()))?;
        let quantity = caps
            .get(3)
            .map(|m| m.as_str().parse::<i64>())
            .transpose()
            .map_err(|_| ActionParseError::OutOfRange(input.to_string()))?;

        match (&caps[1], quantity) {
            ("set", Some(quantity)) => Ok(CartAction::Set { id, quantity }),
            ("set", None) => Err(ActionParseError::MissingQuantity(input.to_string())),
            (_, Some(_)) => Err(ActionParseError::UnexpectedQuantity(input.to_string())),
            ("add", None) => Ok(CartAction::Add(id)),
            ("inc", None) => Ok(CartAction::Increment(id)),
            ("dec", None) => Ok(CartAction::Decrement(id)),
            _ => Err(ActionParseError::Malformed(input.to_string())),
        }
    }
}

impl fmt::Display for CartAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CartAction::Add(id) => write!(f, "add:{}", id),
            CartAction::Increment(id) => write!(f, "inc:{}", id),
            CartAction::Decrement(id) => write!(f, "dec:{}", id),
            CartAction::Set { id, quantity } => write!(f, "set:{}={}", id, quantity),
        }
    }
}
