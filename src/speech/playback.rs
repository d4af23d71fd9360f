use base64::prelude::*;

use super::output::SynthesizedSpeech;

/// An auto-playing `<audio>` element with the speech inlined as a data URL.
#[must_use]
pub fn autoplay_html(speech: &SynthesizedSpeech) -> String {
    let encoded = BASE64_STANDARD.encode(&speech.audio);
    format!(
        "<audio autoplay controls src=\"data:audio/mpeg;base64,{encoded}\"></audio>"
    )
}
