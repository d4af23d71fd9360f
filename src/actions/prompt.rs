//! The system prompt for the sales reply: a fixed persona plus a tone hint
//! picked by the classified emotion.

use super::Emotion;

const PERSONA: &str = "You are Mia, the voice concierge of Silk & Strand, a hair-care \
    boutique. Your mission is to understand the customer's hair concern and \
    recommend exactly one product from the Silk & Strand range that solves it:\n\
    - Argan Repair Oil for dry, brittle or frizzy hair\n\
    - Scalp Balance Shampoo for oily roots, itching or dandruff\n\
    - Volume Lift Mousse for fine or flat hair\n\
    - Color Guard Conditioner for dyed or highlighted hair\n\
    - Bond Rescue Mask for heat or bleach damage\n\
    Follow this script: acknowledge the concern in one sentence, ask at most \
    one clarifying question if the concern is unclear, then name the product, \
    explain in one sentence why it fits, and close by inviting the customer to \
    try it today with the 15% first-order discount. Your answer is spoken \
    aloud, so keep it under four sentences and never use lists, markdown or \
    emojis.";

const CALMING_SUFFIX: &str = "The customer sounds stressed. Speak slowly and \
    reassuringly, tell them the problem is common and fixable, and keep the \
    sales pitch gentle.";

const EMPATHETIC_SUFFIX: &str = "The customer sounds frustrated. Acknowledge \
    their frustration with empathy before anything else, and do not be pushy.";

const ENERGY_SUFFIX: &str = "The customer sounds excited. Match their \
    energy with an upbeat, enthusiastic tone.";

/// The tone hint for an emotion label. Only stressed, frustrated and excited
/// change the tone; every other label, known or not, adds nothing.
#[must_use]
pub fn tone_suffix(emotion: &str) -> Option<&'static str> {
    match Emotion::from_label(emotion)? {
        Emotion::Stressed => Some(CALMING_SUFFIX),
        Emotion::Frustrated => Some(EMPATHETIC_SUFFIX),
        Emotion::Excited => Some(ENERGY_SUFFIX),
        Emotion::Calm | Emotion::Neutral => None,
    }
}

/// The persona text without any tone hint.
#[must_use]
pub fn base_persona(language: Option<&str>) -> String {
    let language = language
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .unwrap_or("the language the customer speaks");
    format!("{PERSONA}\nAlways answer in {language}.")
}

#[must_use]
pub fn build_system_prompt(language: Option<&str>, emotion: &str) -> String {
    let persona = base_persona(language);
    match tone_suffix(emotion) {
        Some(suffix) => format!("{persona}\n{suffix}"),
        None => persona,
    }
}
