use std::fmt::Display;

/// Audio containers the transcription endpoint can decode, told apart by
/// their leading magic bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AudioContainer {
    Wav,
    WebM,
    Ogg,
    Mp3,
    Flac,
    Mp4,
}

impl AudioContainer {
    #[must_use]
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        match bytes {
            [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'A', b'V', b'E', ..] => Some(Self::Wav),
            [0x1A, 0x45, 0xDF, 0xA3, ..] => Some(Self::WebM),
            [b'O', b'g', b'g', b'S', ..] => Some(Self::Ogg),
            [b'f', b'L', b'a', b'C', ..] => Some(Self::Flac),
            [b'I', b'D', b'3', ..] => Some(Self::Mp3),
            // MPEG audio frame sync; layer bits 00 are AAC ADTS, which the
            // endpoint does not take
            [0xFF, second, ..] if second & 0xE0 == 0xE0 && second & 0x06 != 0 => {
                Some(Self::Mp3)
            }
            [_, _, _, _, b'f', b't', b'y', b'p', ..] => Some(Self::Mp4),
            _ => None,
        }
    }

    /// File name to upload the clip as; the endpoint goes by its extension.
    #[must_use]
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Wav => "speech.wav",
            Self::WebM => "speech.webm",
            Self::Ogg => "speech.ogg",
            Self::Mp3 => "speech.mp3",
            Self::Flac => "speech.flac",
            Self::Mp4 => "speech.m4a",
        }
    }

    #[must_use]
    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Wav => "audio/wav",
            Self::WebM => "audio/webm",
            Self::Ogg => "audio/ogg",
            Self::Mp3 => "audio/mpeg",
            Self::Flac => "audio/flac",
            Self::Mp4 => "audio/mp4",
        }
    }
}

impl Display for AudioContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let fmt_str = match self {
            AudioContainer::Wav => "wav",
            AudioContainer::WebM => "webm",
            AudioContainer::Ogg => "ogg",
            AudioContainer::Mp3 => "mp3",
            AudioContainer::Flac => "flac",
            AudioContainer::Mp4 => "mp4",
        };
        f.write_str(fmt_str)
    }
}
