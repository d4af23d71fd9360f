pub mod audio_format;
pub mod input;
pub mod output;
pub mod playback;

pub use input::{RecognizedSpeech, SpeechListener};
pub use output::{SpeechSynthesizer, SynthesizedSpeech};
