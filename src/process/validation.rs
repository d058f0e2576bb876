/*!
 * Process Spec Validation
 * Field checks applied to every submission before it reaches the queue
 */

use super::record::ProcessSpec;
use crate::core::errors::ValidationError;
use crate::core::types::{Priority, SimTime};

/// A spec whose fields passed validation, converted to record types
#[derive(Debug, Clone)]
pub(crate) struct ValidSpec {
    pub name: String,
    pub arrival: SimTime,
    pub burst: u64,
    pub priority: Option<Priority>,
    pub quantum: Option<u64>,
}

/// Validate the fields of a single spec
///
/// Name uniqueness is checked by the admission queue, which owns the set of
/// names admitted so far. `requires_priority` carries the policy name when
/// the active policy orders by priority.
pub(crate) fn validate_spec(
    spec: &ProcessSpec,
    requires_priority: Option<&'static str>,
) -> Result<ValidSpec, ValidationError> {
    if spec.name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }

    let name = spec.name.clone();

    if spec.burst <= 0 {
        return Err(ValidationError::NonPositiveBurst {
            name,
            burst: spec.burst,
        });
    }

    if spec.arrival < 0 {
        return Err(ValidationError::NegativeArrival {
            name,
            arrival: spec.arrival,
        });
    }

    let priority = match spec.priority {
        Some(p) if p < 0 => {
            return Err(ValidationError::NegativePriority { name, priority: p });
        }
        Some(p) => Some(Priority::try_from(p).map_err(|_| ValidationError::OutOfRange {
            name: name.clone(),
            field: "priority",
            value: p,
        })?),
        None => {
            if let Some(policy) = requires_priority {
                return Err(ValidationError::MissingPriority { name, policy });
            }
            None
        }
    };

    let quantum = match spec.quantum {
        Some(q) if q <= 0 => {
            return Err(ValidationError::NonPositiveQuantum { name, quantum: q });
        }
        Some(q) => Some(q as u64),
        None => None,
    };

    Ok(ValidSpec {
        name,
        arrival: spec.arrival as SimTime,
        burst: spec.burst as u64,
        priority,
        quantum,
    })
}
