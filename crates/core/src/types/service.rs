//! The fixed service menu offered across the barbershop network.

use serde::{Deserialize, Serialize};

/// A service that can be booked at a barbershop.
///
/// The wire value is the human-facing label; the reservations collection
/// stores the label verbatim, and free-text service labels outside this set
/// are also accepted by the store (the plain page variant submits free text).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceKind {
    #[serde(rename = "Classic Cut")]
    ClassicCut,
    #[serde(rename = "Beard Trim")]
    BeardTrim,
    #[serde(rename = "Cut+Beard Combo")]
    CutBeardCombo,
    #[serde(rename = "Color & Style")]
    ColorStyle,
}

impl ServiceKind {
    /// All services, in menu order.
    pub const ALL: [Self; 4] = [
        Self::ClassicCut,
        Self::BeardTrim,
        Self::CutBeardCombo,
        Self::ColorStyle,
    ];

    /// The label shown to users and written to the store.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::ClassicCut => "Classic Cut",
            Self::BeardTrim => "Beard Trim",
            Self::CutBeardCombo => "Cut+Beard Combo",
            Self::ColorStyle => "Color & Style",
        }
    }
}

impl std::fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for ServiceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.label() == s)
            .ok_or_else(|| format!("unknown service: {s}"))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_label_roundtrip() {
        for kind in ServiceKind::ALL {
            assert_eq!(kind.label().parse::<ServiceKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_display_matches_label() {
        assert_eq!(ServiceKind::CutBeardCombo.to_string(), "Cut+Beard Combo");
        assert_eq!(ServiceKind::ColorStyle.to_string(), "Color & Style");
    }

    #[test]
    fn test_unknown_service_is_rejected() {
        assert!("Mullet Revival".parse::<ServiceKind>().is_err());
    }

    #[test]
    fn test_serde_uses_labels() {
        let json = serde_json::to_string(&ServiceKind::ClassicCut).unwrap();
        assert_eq!(json, "\"Classic Cut\"");
        let back: ServiceKind = serde_json::from_str("\"Beard Trim\"").unwrap();
        assert_eq!(back, ServiceKind::BeardTrim);
    }
}
