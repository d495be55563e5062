//! Randomizer screen view model.
//!
//! Pure function of a [`RollSnapshot`]. Holds no state of its own and never
//! talks back to the randomizer.

use crate::application::randomizer::{RollPhase, RollSnapshot};

pub const PROMPT_LABEL: &str = "Hungry? Press the button!";
pub const NOPE_HEADLINE: &str = "NOPE";
pub const APPROVED_HEADLINE: &str = "No backing down now! You're having lunch at:";
pub const APPROVE_LABEL: &str = "Ok, I'm picking this one!";

/// Start preloading the result entry this many rolls before the end.
const PRELOAD_ROLLS: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonView {
    pub label: String,
    pub enabled: bool,
}

impl ButtonView {
    fn new(label: impl Into<String>, enabled: bool) -> Self {
        Self {
            label: label.into(),
            enabled,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RandomizerView {
    /// "NOPE" while the easter egg runs
    pub headline: Option<&'static str>,
    /// Gone once the result is approved
    pub roll_button: Option<ButtonView>,
    pub approve_button: Option<ButtonView>,
    pub filter_button: Option<ButtonView>,
    pub filter_panel_visible: bool,
    pub food_model_visible: bool,
    pub confetti: bool,
    /// Error message, rolling candidate, or the prompt
    pub result_label: String,
    pub approved_headline: Option<&'static str>,
    /// Mount the result entry (hidden until settled)
    pub load_entry: bool,
    pub entry_hidden: bool,
    /// Link to the winner's website
    pub website_href: Option<String>,
}

impl RandomizerView {
    pub fn derive(snapshot: &RollSnapshot) -> Self {
        let phase = snapshot.phase;
        let rolling = phase.is_busy();
        let has_result = phase.has_result();
        let approved = phase == RollPhase::Approved;

        let roll_label = if rolling {
            if snapshot.rolls_remaining as f64 > snapshot.max_rolls as f64 / 3.0 {
                "Rolling!".to_string()
            } else {
                "Wait for it...".to_string()
            }
        } else if has_result {
            "Nope, gimme another one!".to_string()
        } else {
            format!(
                "I'm feeling {}!",
                if snapshot.filter.is_picky() { "picky" } else { "lucky" }
            )
        };

        let filter_label = if snapshot.filter.visible {
            "Hide filter"
        } else {
            "Set filter"
        };

        let result_label = match (&snapshot.error, &snapshot.displayed) {
            (Some(error), _) if phase == RollPhase::Errored => error.clone(),
            (_, Some(displayed)) if rolling || has_result => displayed.name.clone(),
            _ => PROMPT_LABEL.to_string(),
        };

        Self {
            headline: snapshot.easter_egg_active.then_some(NOPE_HEADLINE),
            roll_button: (!approved).then(|| ButtonView::new(roll_label, !rolling)),
            approve_button: (phase == RollPhase::Settled)
                .then(|| ButtonView::new(APPROVE_LABEL, true)),
            filter_button: (!approved).then(|| ButtonView::new(filter_label, !rolling)),
            filter_panel_visible: !approved && snapshot.filter.visible,
            food_model_visible: !(has_result || phase == RollPhase::Errored),
            confetti: has_result,
            result_label,
            approved_headline: approved.then_some(APPROVED_HEADLINE),
            load_entry: has_result
                || (phase.is_rolling() && snapshot.rolls_remaining < PRELOAD_ROLLS),
            entry_hidden: !has_result,
            website_href: snapshot.result.as_ref().and_then(|r| r.website_href()),
        }
    }
}
