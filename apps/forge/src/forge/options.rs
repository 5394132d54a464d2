//! Closed choice sets offered by the form.
//!
//! Every enum (de)serializes, parses, and displays as the exact label the
//! user sees, so the HTML `<select>` values and the JSON API agree.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A label that is not part of a field's choice set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{value}' is not a valid {field}")]
pub struct UnknownOption {
    pub field: &'static str,
    pub value: String,
}

/// A fixed, ordered set of labelled choices.
pub trait ChoiceSet: Copy + Default + PartialEq + 'static {
    /// Human name of the field, used in validation messages.
    const FIELD: &'static str;

    fn all() -> &'static [Self];
    fn label(&self) -> &'static str;

    /// Parses an exact label. Empty input falls back to the default choice.
    fn parse_label(value: &str) -> Result<Self, UnknownOption> {
        let value = value.trim();
        if value.is_empty() {
            return Ok(Self::default());
        }
        Self::all()
            .iter()
            .copied()
            .find(|choice| choice.label() == value)
            .ok_or_else(|| UnknownOption {
                field: Self::FIELD,
                value: value.to_string(),
            })
    }
}

macro_rules! impl_label_traits {
    ($ty:ty) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $ty {
            type Err = UnknownOption;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <$ty as ChoiceSet>::parse_label(s)
            }
        }
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Seniority {
    #[serde(rename = "Entry")]
    Entry,
    #[serde(rename = "Mid")]
    Mid,
    #[default]
    #[serde(rename = "Senior")]
    Senior,
    #[serde(rename = "Lead / Principal")]
    LeadPrincipal,
    #[serde(rename = "Director & above")]
    DirectorAbove,
}

impl ChoiceSet for Seniority {
    const FIELD: &'static str = "seniority level";

    fn all() -> &'static [Self] {
        &[
            Seniority::Entry,
            Seniority::Mid,
            Seniority::Senior,
            Seniority::LeadPrincipal,
            Seniority::DirectorAbove,
        ]
    }

    fn label(&self) -> &'static str {
        match self {
            Seniority::Entry => "Entry",
            Seniority::Mid => "Mid",
            Seniority::Senior => "Senior",
            Seniority::LeadPrincipal => "Lead / Principal",
            Seniority::DirectorAbove => "Director & above",
        }
    }
}

impl_label_traits!(Seniority);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Tone {
    #[serde(rename = "Neutral professional")]
    NeutralProfessional,
    #[default]
    #[serde(rename = "Confident")]
    Confident,
    #[serde(rename = "Bold")]
    Bold,
    #[serde(rename = "Concise & minimal")]
    ConciseMinimal,
}

impl ChoiceSet for Tone {
    const FIELD: &'static str = "tone";

    fn all() -> &'static [Self] {
        &[
            Tone::NeutralProfessional,
            Tone::Confident,
            Tone::Bold,
            Tone::ConciseMinimal,
        ]
    }

    fn label(&self) -> &'static str {
        match self {
            Tone::NeutralProfessional => "Neutral professional",
            Tone::Confident => "Confident",
            Tone::Bold => "Bold",
            Tone::ConciseMinimal => "Concise & minimal",
        }
    }
}

impl_label_traits!(Tone);

/// Models the user may pick. The label is the OpenAI model id sent on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ModelId {
    #[default]
    #[serde(rename = "gpt-4o-mini")]
    Gpt4oMini,
    #[serde(rename = "gpt-4o")]
    Gpt4o,
    #[serde(rename = "gpt-4.1-mini")]
    Gpt41Mini,
    #[serde(rename = "gpt-4.1")]
    Gpt41,
}

impl ChoiceSet for ModelId {
    const FIELD: &'static str = "OpenAI model";

    fn all() -> &'static [Self] {
        &[
            ModelId::Gpt4oMini,
            ModelId::Gpt4o,
            ModelId::Gpt41Mini,
            ModelId::Gpt41,
        ]
    }

    fn label(&self) -> &'static str {
        match self {
            ModelId::Gpt4oMini => "gpt-4o-mini",
            ModelId::Gpt4o => "gpt-4o",
            ModelId::Gpt41Mini => "gpt-4.1-mini",
            ModelId::Gpt41 => "gpt-4.1",
        }
    }
}

impl_label_traits!(ModelId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum QuantifyPreference {
    #[default]
    #[serde(rename = "Add metrics where obvious only")]
    ObviousOnly,
    #[serde(rename = "Aggressively add metrics")]
    Aggressive,
    #[serde(rename = "Light touch (minimal changes)")]
    LightTouch,
}

impl QuantifyPreference {
    /// Guidance phrase woven into the prompt for this preference.
    pub fn hint(&self) -> &'static str {
        match self {
            QuantifyPreference::ObviousOnly => {
                "add metrics only when they are implied or obvious; avoid making up unrealistic numbers."
            }
            QuantifyPreference::Aggressive => {
                "prioritize quantification; infer reasonable metrics and percentages where possible."
            }
            QuantifyPreference::LightTouch => {
                "make subtle improvements and light quantification; preserve original wording as much as possible."
            }
        }
    }
}

impl ChoiceSet for QuantifyPreference {
    const FIELD: &'static str = "quantification preference";

    fn all() -> &'static [Self] {
        &[
            QuantifyPreference::ObviousOnly,
            QuantifyPreference::Aggressive,
            QuantifyPreference::LightTouch,
        ]
    }

    fn label(&self) -> &'static str {
        match self {
            QuantifyPreference::ObviousOnly => "Add metrics where obvious only",
            QuantifyPreference::Aggressive => "Aggressively add metrics",
            QuantifyPreference::LightTouch => "Light touch (minimal changes)",
        }
    }
}

impl_label_traits!(QuantifyPreference);
