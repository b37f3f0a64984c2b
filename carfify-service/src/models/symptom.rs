use serde::{Deserialize, Serialize};
use std::fmt;

/// A fault indicator reported by the caller.
///
/// Recognised identifiers map to their own variant. Anything else is kept as
/// [`Symptom::Unknown`] so the decision to drop it happens when rules are
/// matched, not while decoding the request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Symptom {
    EngineNoise,
    OilLeak,
    BrakeNoise,
    BatteryWarning,
    Overheating,
    Unknown(String),
}

impl Symptom {
    /// Every recognised symptom, in catalogue order.
    pub const KNOWN: [Symptom; 5] = [
        Symptom::EngineNoise,
        Symptom::OilLeak,
        Symptom::BrakeNoise,
        Symptom::BatteryWarning,
        Symptom::Overheating,
    ];

    pub fn key(&self) -> &str {
        match self {
            Symptom::EngineNoise => "engine_noise",
            Symptom::OilLeak => "oil_leak",
            Symptom::BrakeNoise => "brake_noise",
            Symptom::BatteryWarning => "battery_warning",
            Symptom::Overheating => "overheating",
            Symptom::Unknown(raw) => raw,
        }
    }

    /// Short label for forms.
    pub fn label(&self) -> &str {
        match self {
            Symptom::EngineNoise => "Unusual engine noise",
            Symptom::OilLeak => "Oil leak",
            Symptom::BrakeNoise => "Squealing brakes",
            Symptom::BatteryWarning => "Battery warning light",
            Symptom::Overheating => "Engine overheating",
            Symptom::Unknown(raw) => raw,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Symptom::Unknown(_))
    }
}

impl From<&str> for Symptom {
    fn from(raw: &str) -> Self {
        Symptom::KNOWN
            .into_iter()
            .find(|known| known.key() == raw)
            .unwrap_or_else(|| Symptom::Unknown(raw.to_string()))
    }
}

impl From<String> for Symptom {
    fn from(raw: String) -> Self {
        match Symptom::from(raw.as_str()) {
            Symptom::Unknown(_) => Symptom::Unknown(raw),
            known => known,
        }
    }
}

impl From<Symptom> for String {
    fn from(symptom: Symptom) -> Self {
        match symptom {
            Symptom::Unknown(raw) => raw,
            known => known.key().to_string(),
        }
    }
}

impl fmt::Display for Symptom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
