//! Forecast horizon selection and the `/forecast` request body

use crate::Sku;
use serde::{Deserialize, Serialize};

/// Number of future days to forecast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Horizon {
    Week,
    Month,
    Quarter,
    Custom(u32),
}

impl Horizon {
    /// Default horizon on the upload form
    pub const UPLOAD_DEFAULT: Horizon = Horizon::Custom(14);

    pub fn days(&self) -> u32 {
        match self {
            Self::Week => 7,
            Self::Month => 30,
            Self::Quarter => 90,
            Self::Custom(days) => *days,
        }
    }

    /// Map a day count onto a preset when one matches
    pub fn from_days(days: u32) -> Option<Self> {
        match days {
            0 => None,
            7 => Some(Self::Week),
            30 => Some(Self::Month),
            90 => Some(Self::Quarter),
            n => Some(Self::Custom(n)),
        }
    }

    /// Parse free-form input from a number field
    pub fn parse(input: &str) -> Option<Self> {
        input.trim().parse::<u32>().ok().and_then(Self::from_days)
    }

    pub fn label(&self) -> String {
        format!("{}D", self.days())
    }

    pub fn presets() -> &'static [Self] {
        &[Self::Week, Self::Month, Self::Quarter]
    }
}

impl Default for Horizon {
    fn default() -> Self {
        Self::Month
    }
}

impl std::fmt::Display for Horizon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} days", self.days())
    }
}

/// JSON body of `POST /forecast`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastRequest {
    pub sku: Sku,
    pub forecast_days: u32,
}

impl ForecastRequest {
    pub fn new(sku: Sku, horizon: Horizon) -> Self {
        Self {
            sku,
            forecast_days: horizon.days(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_days_maps_presets() {
        assert_eq!(Horizon::from_days(7), Some(Horizon::Week));
        assert_eq!(Horizon::from_days(90), Some(Horizon::Quarter));
        assert_eq!(Horizon::from_days(14), Some(Horizon::Custom(14)));
        assert_eq!(Horizon::from_days(0), None);
    }

    #[test]
    fn test_parse() {
        assert_eq!(Horizon::parse(" 30 "), Some(Horizon::Month));
        assert_eq!(Horizon::parse("abc"), None);
        assert_eq!(Horizon::parse("-3"), None);
    }

    #[test]
    fn test_request_body() {
        let body = ForecastRequest::new(Sku::new("SKU-9"), Horizon::Quarter);
        let json = serde_json::to_string(&body).unwrap();
        assert_eq!(json, r#"{"sku":"SKU-9","forecast_days":90}"#);
    }

    #[test]
    fn test_label() {
        assert_eq!(Horizon::Week.label(), "7D");
        assert_eq!(Horizon::UPLOAD_DEFAULT.days(), 14);
    }
}
