//! Inventory movement audit records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use validator::Validate;

/// Direction of a stock movement.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MovementType {
    In,
    Out,
    Transfer,
}

impl MovementType {
    /// Converts to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementType::In => "in",
            MovementType::Out => "out",
            MovementType::Transfer => "transfer",
        }
    }

    /// Parses from database string representation.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "in" => Some(MovementType::In),
            "out" => Some(MovementType::Out),
            "transfer" => Some(MovementType::Transfer),
            _ => None,
        }
    }
}

/// Inconsistent source/destination for a movement type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MovementError {
    #[error("Movement of type 'in' requires to_warehouse_id")]
    MissingDestination,

    #[error("Movement of type 'out' requires from_warehouse_id")]
    MissingSource,

    #[error("Transfer requires both from_warehouse_id and to_warehouse_id")]
    IncompleteTransfer,

    #[error("Transfer source and destination must differ")]
    SameWarehouse,
}

/// A recorded stock movement.
#[derive(Debug, Clone, Serialize)]
pub struct Movement {
    pub id: i64,
    pub item_id: i64,
    pub quantity: i32,
    pub from_warehouse_id: Option<i64>,
    pub to_warehouse_id: Option<i64>,
    pub movement_type: MovementType,
    pub performed_by: Option<i64>,
    pub note: Option<String>,
    pub data: Option<Value>,
    pub timestamp: DateTime<Utc>,
}

/// Request payload for recording a movement.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateMovementRequest {
    pub item_id: i64,

    #[validate(range(min = 1, message = "Quantity must be positive"))]
    pub quantity: i32,

    pub from_warehouse_id: Option<i64>,

    pub to_warehouse_id: Option<i64>,

    pub movement_type: MovementType,

    pub performed_by: Option<i64>,

    #[validate(length(max = 1000, message = "Note must be at most 1000 characters"))]
    pub note: Option<String>,

    pub data: Option<serde_json::Map<String, Value>>,
}

impl CreateMovementRequest {
    /// Checks that the warehouses given match the movement type.
    pub fn check_endpoints(&self) -> Result<(), MovementError> {
        match (self.movement_type, self.from_warehouse_id, self.to_warehouse_id) {
            (MovementType::In, _, None) => Err(MovementError::MissingDestination),
            (MovementType::Out, None, _) => Err(MovementError::MissingSource),
            (MovementType::Transfer, Some(from), Some(to)) if from == to => {
                Err(MovementError::SameWarehouse)
            }
            (MovementType::Transfer, None, _) | (MovementType::Transfer, _, None) => {
                Err(MovementError::IncompleteTransfer)
            }
            _ => Ok(()),
        }
    }
}

/// Query parameters for listing movements.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListMovementsQuery {
    /// Only movements into or out of this warehouse.
    pub warehouse_id: Option<i64>,
    pub limit: Option<i64>,
}

/// Response for listing movements.
#[derive(Debug, Clone, Serialize)]
pub struct ListMovementsResponse {
    pub movements: Vec<Movement>,
    pub total: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(movement_type: MovementType, from: Option<i64>, to: Option<i64>) -> CreateMovementRequest {
        CreateMovementRequest {
            item_id: 1,
            quantity: 10,
            from_warehouse_id: from,
            to_warehouse_id: to,
            movement_type,
            performed_by: None,
            note: None,
            data: None,
        }
    }

    #[test]
    fn test_movement_type_serialization() {
        assert_eq!(serde_json::to_string(&MovementType::In).unwrap(), "\"in\"");
        assert_eq!(
            serde_json::to_string(&MovementType::Transfer).unwrap(),
            "\"transfer\""
        );
        let out: MovementType = serde_json::from_str("\"out\"").unwrap();
        assert_eq!(out, MovementType::Out);
        assert!(serde_json::from_str::<MovementType>("\"loan\"").is_err());
    }

    #[test]
    fn test_movement_type_from_str() {
        for t in [MovementType::In, MovementType::Out, MovementType::Transfer] {
            assert_eq!(MovementType::from_str(t.as_str()), Some(t));
        }
        assert_eq!(MovementType::from_str("IN"), None);
    }

    #[test]
    fn test_check_endpoints() {
        assert!(request(MovementType::In, None, Some(2)).check_endpoints().is_ok());
        assert!(request(MovementType::Out, Some(1), None).check_endpoints().is_ok());
        assert!(request(MovementType::Transfer, Some(1), Some(2))
            .check_endpoints()
            .is_ok());

        assert_eq!(
            request(MovementType::In, Some(1), None).check_endpoints(),
            Err(MovementError::MissingDestination)
        );
        assert_eq!(
            request(MovementType::Out, None, Some(2)).check_endpoints(),
            Err(MovementError::MissingSource)
        );
        assert_eq!(
            request(MovementType::Transfer, Some(1), None).check_endpoints(),
            Err(MovementError::IncompleteTransfer)
        );
        assert_eq!(
            request(MovementType::Transfer, Some(3), Some(3)).check_endpoints(),
            Err(MovementError::SameWarehouse)
        );
    }

    #[test]
    fn test_quantity_must_be_positive() {
        let mut req = request(MovementType::In, None, Some(2));
        req.quantity = 0;
        assert!(req.validate().is_err());
    }
}
