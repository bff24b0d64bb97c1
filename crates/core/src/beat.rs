//! Story beats: the 40-item spine produced on the Beats stage.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::lenient;
use crate::validation::non_blank;

/// Number of beats in a complete spine.
pub const BEAT_COUNT: usize = 40;

/// Corrective calls allowed after the first generation attempt.
pub const MAX_BEAT_CORRECTIONS: usize = 2;

/// A single beat as exchanged with the client and the model.
///
/// Every field is optional on the wire: the model omits fields, and the
/// client posts partially edited rows. Off-type values are coerced rather
/// than rejected, and unknown keys are carried through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Beat {
    /// Ordinal position, ideally `1..=40`. `"7"` reads as 7.
    #[serde(deserialize_with = "lenient::ordinal")]
    pub num: Option<i32>,
    #[serde(deserialize_with = "lenient::text")]
    pub label: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub summary: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub purpose: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub stakes: Option<String>,
    #[serde(flatten, skip_serializing_if = "Map::is_empty")]
    pub extra: Map<String, Value>,
}

/// A bare string in a beat list is taken as the summary.
impl From<String> for Beat {
    fn from(summary: String) -> Self {
        Self {
            summary: Some(summary),
            ..Self::default()
        }
    }
}

impl Beat {
    /// A beat is worth persisting once it has a label or a summary.
    pub fn is_storable(&self) -> bool {
        non_blank(self.label.as_deref()).is_some() || non_blank(self.summary.as_deref()).is_some()
    }
}

/// The `{"beats": [...]}` document returned by the model and the API.
///
/// Every array entry yields one beat, however malformed, so [`len`](Self::len)
/// is the number of entries the model wrote.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BeatSheet {
    #[serde(default, deserialize_with = "lenient::items")]
    pub beats: Vec<Beat>,
}

impl BeatSheet {
    pub fn len(&self) -> usize {
        self.beats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.beats.is_empty()
    }

    /// Exactly [`BEAT_COUNT`] beats. Numbering is not checked; the model is
    /// asked for `1..40` but a correctly sized sheet is accepted as-is.
    pub fn is_complete(&self) -> bool {
        self.beats.len() == BEAT_COUNT
    }
}

/// Follow-up user message asking the model to repair a short or long sheet.
pub fn correction_message(got: usize) -> String {
    format!(
        "You returned {got} beats. Return JSON again with EXACTLY {BEAT_COUNT} beats \
         (1..{BEAT_COUNT}). Do not omit any numbers. No prose, JSON only."
    )
}
