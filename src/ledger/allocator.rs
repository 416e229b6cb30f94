//! Split allocation
//!
//! Turns an expense total and a split directive into one [`Split`] per group
//! member. Indivisible remainders are handed out one minor unit at a time to
//! the first members in allocation order, so every allocation sums to the
//! total exactly (custom splits are accepted within one minor unit).

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::models::{MemberId, Money, Split};

/// Largest accepted gap between the split sum and the expense total
const SUM_TOLERANCE: Money = Money::from_cents(1);

/// How an expense is divided, as named by the authoring layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitMode {
    /// Equal shares for every member
    #[default]
    #[serde(alias = "equally")]
    Equal,

    /// Equal shares among selected members, zero for the rest
    #[serde(alias = "unequally", alias = "selective-equal")]
    Selective,

    /// Caller-supplied amount per member
    Custom,
}

impl fmt::Display for SplitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SplitMode::Equal => write!(f, "equal"),
            SplitMode::Selective => write!(f, "selective"),
            SplitMode::Custom => write!(f, "custom"),
        }
    }
}

impl FromStr for SplitMode {
    type Err = AllocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "equal" | "equally" => Ok(SplitMode::Equal),
            "selective" | "selective-equal" | "unequally" => Ok(SplitMode::Selective),
            "custom" => Ok(SplitMode::Custom),
            other => Err(AllocationError::UnknownSplitMode(other.to_string())),
        }
    }
}

/// Instruction for dividing one expense
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SplitDirective {
    /// Divide among all members
    Equal,

    /// Divide among this subset, in the given order
    SelectiveEqual(Vec<MemberId>),

    /// Explicit amount per member; absent members owe zero
    Custom(HashMap<MemberId, Money>),
}

impl SplitDirective {
    pub fn mode(&self) -> SplitMode {
        match self {
            SplitDirective::Equal => SplitMode::Equal,
            SplitDirective::SelectiveEqual(_) => SplitMode::Selective,
            SplitDirective::Custom(_) => SplitMode::Custom,
        }
    }

    /// Build a custom directive from untrusted decimal input
    ///
    /// Values that fail to parse or are negative count as zero.
    pub fn custom_from_raw<'a, I>(raw: I) -> Self
    where
        I: IntoIterator<Item = (MemberId, &'a str)>,
    {
        let amounts = raw
            .into_iter()
            .map(|(member_id, value)| {
                let amount = match Money::parse(value) {
                    Ok(amount) if !amount.is_negative() => amount,
                    _ => {
                        tracing::debug!(
                            member = %member_id,
                            value,
                            "custom split value coerced to zero"
                        );
                        Money::zero()
                    }
                };
                (member_id, amount)
            })
            .collect();

        SplitDirective::Custom(amounts)
    }
}

/// Errors raised while allocating an expense
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllocationError {
    #[error("You must select at least one person to split the expense with.")]
    SplitCountMismatch,

    #[error("Splits total ({computed}) does not match the expense amount ({expected}).")]
    SplitSumMismatch { computed: Money, expected: Money },

    #[error("Invalid split type: {0}")]
    UnknownSplitMode(String),

    #[error("Split amounts are too large to add up.")]
    AmountOverflow,
}

/// Allocate an expense total across the group's members
///
/// The result has exactly one entry per member. Selective splits list the
/// selected members first (in selection order) followed by zero entries for
/// the rest in group order; the other modes follow group order.
pub fn allocate_splits(
    total: Money,
    members: &[MemberId],
    directive: &SplitDirective,
) -> Result<Vec<Split>, AllocationError> {
    let splits = match directive {
        SplitDirective::Equal => {
            if members.is_empty() {
                return Err(AllocationError::SplitCountMismatch);
            }
            distribute_equally(total, members)
        }
        SplitDirective::SelectiveEqual(selected) => {
            let member_set: HashSet<MemberId> = members.iter().copied().collect();
            let mut seen = HashSet::new();
            let chosen: Vec<MemberId> = selected
                .iter()
                .copied()
                .filter(|id| member_set.contains(id) && seen.insert(*id))
                .collect();

            if chosen.len() != selected.len() {
                tracing::debug!(
                    requested = selected.len(),
                    accepted = chosen.len(),
                    "ignored unknown or repeated members in selective split"
                );
            }
            if chosen.is_empty() {
                return Err(AllocationError::SplitCountMismatch);
            }

            let mut splits = distribute_equally(total, &chosen);
            splits.extend(
                members
                    .iter()
                    .filter(|id| !seen.contains(*id))
                    .map(|id| Split::new(*id, Money::zero())),
            );
            splits
        }
        SplitDirective::Custom(amounts) => members
            .iter()
            .map(|id| {
                let amount = amounts
                    .get(id)
                    .copied()
                    .filter(|a| !a.is_negative())
                    .unwrap_or_default();
                Split::new(*id, amount)
            })
            .collect(),
    };

    let computed = splits
        .iter()
        .try_fold(Money::zero(), |acc, s| acc.checked_add(s.amount))
        .ok_or(AllocationError::AmountOverflow)?;
    let difference = computed
        .checked_sub(total)
        .ok_or(AllocationError::AmountOverflow)?;
    if difference.abs() > SUM_TOLERANCE {
        return Err(AllocationError::SplitSumMismatch {
            computed,
            expected: total,
        });
    }

    tracing::debug!(
        mode = %directive.mode(),
        total = total.cents(),
        member_count = members.len(),
        "allocated expense splits"
    );

    Ok(splits)
}

/// Equal shares with the remainder spread over the first members
fn distribute_equally(total: Money, members: &[MemberId]) -> Vec<Split> {
    let count = members.len() as i64;
    let share = total.cents() / count;
    let remainder = (total.cents() % count) as usize;

    members
        .iter()
        .enumerate()
        .map(|(index, id)| {
            let extra = i64::from(index < remainder);
            Split::new(*id, Money::from_cents(share + extra))
        })
        .collect()
}
