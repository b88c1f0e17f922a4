//! Sparse update of a subscription.

use crate::domain::foundation::{MonthYear, ValidationError};

/// Wire sentinel that clears a stored end date.
pub const CLEAR_END_DATE: &str = "0";

/// What a patch does to the end date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EndDateChange {
    /// Leave the stored value as is.
    #[default]
    Unchanged,
    /// Set the stored value to NULL (open-ended subscription).
    Clear,
    /// Replace the stored value.
    SetTo(MonthYear),
}

impl EndDateChange {
    /// Decodes the three-state wire field.
    ///
    /// Absent and empty strings leave the value unchanged, [`CLEAR_END_DATE`]
    /// clears it, anything else must be a month-year.
    pub fn from_wire(value: Option<&str>) -> Result<Self, ValidationError> {
        match value.map(str::trim) {
            None | Some("") => Ok(EndDateChange::Unchanged),
            Some(CLEAR_END_DATE) => Ok(EndDateChange::Clear),
            Some(raw) => MonthYear::parse_field("end_date", raw).map(EndDateChange::SetTo),
        }
    }

    pub fn is_unchanged(&self) -> bool {
        matches!(self, EndDateChange::Unchanged)
    }
}

/// Fields to change on an existing subscription. `None` means "not supplied".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubscriptionPatch {
    pub service_name: Option<String>,
    pub price: Option<i64>,
    pub user_id: Option<String>,
    pub start_date: Option<MonthYear>,
    pub end_date: EndDateChange,
}

impl SubscriptionPatch {
    /// True when no field is supplied.
    pub fn is_empty(&self) -> bool {
        self.service_name.is_none()
            && self.price.is_none()
            && self.user_id.is_none()
            && self.start_date.is_none()
            && self.end_date.is_unchanged()
    }

    /// Checks the supplied values on their own.
    ///
    /// The end date is only compared with a start date carried by the same
    /// patch; the stored row is not consulted.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(price) = self.price {
            if price < 0 {
                return Err(ValidationError::negative("price", price));
            }
        }
        if matches!(&self.service_name, Some(name) if name.trim().is_empty()) {
            return Err(ValidationError::empty_field("service_name"));
        }
        if matches!(&self.user_id, Some(user) if user.trim().is_empty()) {
            return Err(ValidationError::empty_field("user_id"));
        }
        if let (Some(start), EndDateChange::SetTo(end)) = (self.start_date, self.end_date) {
            if end < start {
                return Err(ValidationError::out_of_order("end_date", "start_date"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_patch_is_empty() {
        assert!(SubscriptionPatch::default().is_empty());
    }

    #[test]
    fn zero_price_counts_as_supplied() {
        let patch = SubscriptionPatch {
            price: Some(0),
            ..Default::default()
        };
        assert!(!patch.is_empty());
        assert!(patch.validate().is_ok());
    }

    #[test]
    fn clearing_end_date_counts_as_supplied() {
        let patch = SubscriptionPatch {
            end_date: EndDateChange::Clear,
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }

    #[test]
    fn end_date_wire_decoding_has_three_states() {
        assert_eq!(EndDateChange::from_wire(None).unwrap(), EndDateChange::Unchanged);
        assert_eq!(EndDateChange::from_wire(Some("")).unwrap(), EndDateChange::Unchanged);
        assert_eq!(EndDateChange::from_wire(Some("0")).unwrap(), EndDateChange::Clear);
        assert_eq!(
            EndDateChange::from_wire(Some("02-2026")).unwrap(),
            EndDateChange::SetTo("02-2026".parse().unwrap())
        );
    }

    #[test]
    fn end_date_wire_decoding_rejects_garbage() {
        let err = EndDateChange::from_wire(Some("2026-02")).unwrap_err();
        assert_eq!(err.field(), "end_date");
    }

    #[test]
    fn validate_rejects_negative_price() {
        let patch = SubscriptionPatch {
            price: Some(-10),
            ..Default::default()
        };
        assert!(patch.validate().is_err());
    }

    #[test]
    fn validate_rejects_end_before_start_within_patch() {
        let patch = SubscriptionPatch {
            start_date: Some("06-2025".parse().unwrap()),
            end_date: EndDateChange::SetTo("05-2025".parse().unwrap()),
            ..Default::default()
        };
        assert!(matches!(patch.validate(), Err(ValidationError::OutOfOrder { .. })));
    }

    #[test]
    fn validate_ignores_end_date_without_start_in_patch() {
        let patch = SubscriptionPatch {
            end_date: EndDateChange::SetTo("05-2000".parse().unwrap()),
            ..Default::default()
        };
        assert!(patch.validate().is_ok());
    }
}
