//! Rules Model (singleton)

use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_DAYS_PER_WEEK: u32 = 3;
pub const DEFAULT_PREFERRED_BALANCE: f64 = 0.2;

/// Scheduling rules; exactly one instance exists
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rules {
    /// Maximum consecutive days as first-line support
    pub max_days_per_week: u32,
    /// Preferred maximum deviation from the average workload (fraction)
    pub preferred_balance: f64,
    #[serde(default)]
    pub revision: u64,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            max_days_per_week: DEFAULT_MAX_DAYS_PER_WEEK,
            preferred_balance: DEFAULT_PREFERRED_BALANCE,
            revision: 0,
        }
    }
}

/// Partial rules update; `None` leaves the stored field untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RulesUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_days_per_week: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_balance: Option<f64>,
}

impl RulesUpdate {
    pub fn is_empty(&self) -> bool {
        self.max_days_per_week.is_none() && self.preferred_balance.is_none()
    }

    /// Check ranges: days in 1..=7, balance a finite fraction in [0, 1]
    pub fn validate(&self) -> Result<(), String> {
        if let Some(days) = self.max_days_per_week {
            if !(1..=7).contains(&days) {
                return Err(format!(
                    "max_days_per_week must be between 1 and 7, got {days}"
                ));
            }
        }
        if let Some(balance) = self.preferred_balance {
            if !(balance.is_finite() && (0.0..=1.0).contains(&balance)) {
                return Err(format!(
                    "preferred_balance must be between 0.0 and 1.0, got {balance}"
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let rules = Rules::default();
        assert_eq!(rules.max_days_per_week, 3);
        assert_eq!(rules.preferred_balance, 0.2);
    }

    #[test]
    fn test_update_validation() {
        assert!(RulesUpdate::default().is_empty());
        let update = RulesUpdate {
            max_days_per_week: Some(5),
            preferred_balance: None,
        };
        assert!(update.validate().is_ok());

        let update = RulesUpdate {
            max_days_per_week: Some(0),
            preferred_balance: None,
        };
        assert!(update.validate().is_err());

        let update = RulesUpdate {
            max_days_per_week: None,
            preferred_balance: Some(f64::NAN),
        };
        assert!(update.validate().is_err());
    }
}
