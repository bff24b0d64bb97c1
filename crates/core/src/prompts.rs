//! Prompt builders, one per [`Task`](crate::stage::Task).
//!
//! Each builder takes the raw request fields (absent fields render as empty
//! strings) and returns the system and user messages for a single-turn
//! completion.

use crate::beat::BEAT_COUNT;
use crate::coaching::BeatDraft;

/// Fallback premise for beat generation when the client sends no logline.
pub const DEFAULT_PREMISE: &str = "Use canonical project premise";

/// Story-architect persona shared by the ingredient and character stages.
const ARCHITECT: &str =
    "You are a story architect (Field, Snyder, Truby, Vogler, Hauge, McKee, Story Grid).";

/// A system + user message pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

fn or_empty(value: Option<&str>) -> &str {
    value.unwrap_or("")
}

/// Stage 1: rewrite a raw idea into market-ready loglines.
pub fn refine_logline(idea: Option<&str>, genre: Option<&str>, tone: Option<&str>) -> Prompt {
    Prompt {
        system: "You are a development exec. Rewrite loglines to maximize irony, specificity, \
                 and market hook. Include 3 bullet viability notes."
            .to_string(),
        user: format!(
            "Idea: {}\nGenre: {}\nTone: {}\nReturn: 5 loglines + viability notes.",
            or_empty(idea),
            or_empty(genre),
            or_empty(tone)
        ),
    }
}

/// Stage 2: theme equation, world brief, genre obligations and motifs.
pub fn refine_ingredients(
    logline: Option<&str>,
    genre: Option<&str>,
    tone: Option<&str>,
) -> Prompt {
    Prompt {
        system: format!("{ARCHITECT} Return tight JSON only."),
        user: format!(
            r#"LOGLINE: {}
GENRE: {}
TONE: {}

TASK: Propose story ingredients as strict JSON with keys:
{{
  "theme_equation": "Because __, the right choice is __, even at cost __.",
  "world_brief": "1 paragraph that signals texture, culture, rules-of-world.",
  "genre_obligations": ["...", "...", "...", "..."],
  "conventions": ["...", "...", "...", "..."],
  "motifs": [{{"name": "object/image", "meaning": "why it matters"}}]
}}

Constraints:
- Preserve the premise; do not change setting or core conflict.
- Be specific, cinematic, and usable in beats later."#,
            or_empty(logline),
            or_empty(genre),
            or_empty(tone)
        ),
    }
}

/// Stage 3: a compact cast list.
pub fn refine_characters(
    logline: Option<&str>,
    theme: Option<&str>,
    world: Option<&str>,
) -> Prompt {
    Prompt {
        system: format!("{ARCHITECT} Return strict JSON only."),
        user: format!(
            r#"LOGLINE: {}
THEME: {}
WORLD: {}

TASK: Propose a compact cast list as JSON. Use this exact shape:
{{
  "characters": [
    {{
      "name": "...",
      "role": "protagonist",
      "one_line": "One sentence that pitches the character.",
      "want": "...",
      "need": "...",
      "wound": "...",
      "misbelief": "...",
      "fear": "...",
      "moral_line": "...",
      "voice_rules": "...",
      "behavior_tells": "..."
    }}
  ]
}}
Constraints:
- 5-7 characters total: protagonist, antagonist, ally (2-3), love_interest, wildcard.
- Keep wants/needs actionable. Avoid vague traits."#,
            or_empty(logline),
            or_empty(theme),
            or_empty(world)
        ),
    }
}

/// Stage 4: the full beat spine. The correction turn reuses this prompt.
pub fn generate_beats(logline: Option<&str>, theme: Option<&str>, world: Option<&str>) -> Prompt {
    let logline = logline.filter(|l| !l.trim().is_empty()).unwrap_or(DEFAULT_PREMISE);
    Prompt {
        system: "You are a story architect. Return STRICT JSON only.".to_string(),
        user: format!(
            r#"LOGLINE: {logline}
THEME: {}
WORLD: {}

TASK: Output exactly {BEAT_COUNT} beats as JSON:
{{
  "beats": [
    {{ "num": 1, "label": "Opening Image", "summary": "...", "purpose": "...", "stakes": "..." }},
    {{ "num": 2, "label": "Set-Up", "summary": "...", "purpose": "...", "stakes": "..." }},
    ...
    {{ "num": {BEAT_COUNT}, "label": "Final Image", "summary": "...", "purpose": "...", "stakes": "..." }}
  ]
}}
Constraints:
- Exactly {BEAT_COUNT} items in "beats" (num = 1..{BEAT_COUNT}). No fewer, no more.
- Keep the premise of the logline; do not invent a new one.
- Each beat 1-2 sentences, concrete and shootable.
- Use clear labels (Opening Image, Catalyst, Debate, Break into 2, Midpoint, All Is Lost, etc.) and fill the rest with concise labels."#,
            or_empty(theme),
            or_empty(world)
        ),
    }
}

fn spine(logline: Option<&str>, theme: Option<&str>) -> String {
    format!(
        "SPINE:\nLOGLINE: {}\nTHEME: {}",
        or_empty(logline),
        or_empty(theme)
    )
}

/// Beats coach: score a drafted beat against the logline and theme.
pub fn validate_beat(logline: Option<&str>, theme: Option<&str>, beat: &BeatDraft) -> Prompt {
    Prompt {
        system: "You are a story editor. Always return strict JSON. Be concise and actionable."
            .to_string(),
        user: format!(
            r#"{}

BEAT DRAFT:
Label: {}
Summary: {}

TASK: Evaluate the beat against the spine. Return JSON:
{{
  "score": {{ "purpose": 0, "stakes": 0, "causality": 0, "freshness": 0, "clarity": 0, "overall": 0 }},
  "diagnostics": {{
    "is_scene_worthy": true,
    "missing": ["purpose", "stakes", "turn", "value_shift", "goal", "obstacle", "decision"],
    "conflicts_with_theme": false
  }},
  "notes": ["short actionable notes..."],
  "rewrite_suggestion": "1-2 sentence improved beat that keeps the same intent"
}}"#,
            spine(logline, theme),
            or_empty(beat.label.as_deref()),
            or_empty(beat.summary.as_deref())
        ),
    }
}

/// Scene coach: what a scene built on the beat must deliver.
pub fn scene_expectations(
    logline: Option<&str>,
    theme: Option<&str>,
    beat: &BeatDraft,
) -> Prompt {
    Prompt {
        system: "You are a scene design coach. Return strict JSON. Be specific and brief."
            .to_string(),
        user: format!(
            r#"{}

BEAT:
{} - {}

TASK: Return JSON:
{{
  "what_must_happen": ["required outcome #1", "required outcome #2"],
  "checklist": ["clear objective", "credible opposition", "escalation", "turn/decision", "value shift", "setup/payoff"],
  "watchouts": ["cliche specific to this beat", "pacing risk"],
  "micro_prompts": {{ "open": "", "middle": "", "close": "" }}
}}"#,
            spine(logline, theme),
            or_empty(beat.label.as_deref()),
            or_empty(beat.summary.as_deref())
        ),
    }
}
