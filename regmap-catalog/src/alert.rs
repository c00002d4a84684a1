//! Range alerts evaluated by the time-series database.

use serde::Serialize;

use crate::error::{CatalogError, Result};

/// Alert raised when a field leaves a range.
///
/// At least one bound is always present; [`Alert::range`] rejects an
/// unbounded alert when the catalog is declared.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alert {
    field: String,
    min: Option<f64>,
    max: Option<f64>,
}

impl Alert {
    pub fn range(
        field: impl Into<String>,
        min: impl Into<Option<f64>>,
        max: impl Into<Option<f64>>,
    ) -> Result<Self> {
        let field = field.into();
        let (min, max) = (min.into(), max.into());

        if min.is_none() && max.is_none() {
            return Err(CatalogError::UnboundedAlert { field });
        }

        Ok(Self { field, min, max })
    }

    /// Short id of the property the alert watches.
    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn min(&self) -> Option<f64> {
        self.min
    }

    pub fn max(&self) -> Option<f64> {
        self.max
    }

    /// Flux predicate that holds when the value is out of range.
    pub fn flux(&self) -> String {
        let mut criteria = Vec::with_capacity(2);
        if let Some(min) = self.min {
            criteria.push(format!("r.value < {}", min));
        }
        if let Some(max) = self.max {
            criteria.push(format!("r.value > {}", max));
        }
        criteria.join(" or ")
    }

    /// Status message template for the check.
    pub fn message(&self) -> String {
        let min = self.min.map_or_else(|| "-inf".to_string(), |v| v.to_string());
        let max = self.max.map_or_else(|| "inf".to_string(), |v| v.to_string());
        format!(
            "has value `{}` ${{ if r._level == \"crit\" then \"out of\" else \"in\" }} range [{}, {}]: ${{ r.value }}",
            self.field, min, max
        )
    }
}
