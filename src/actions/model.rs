/// The tone a customer's utterance was classified as.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Emotion {
    Calm,
    Stressed,
    Frustrated,
    Excited,
    Neutral,
}

impl Emotion {
    /// Return all the variants of this Enum.
    pub fn variants() -> Vec<Self> {
        // Walking the variants through a match means the compiler complains
        // here whenever a variant gets added.
        let mut vs = Vec::new();
        let mut nxt = Some(Self::Calm);
        while let Some(emotion) = nxt {
            vs.push(emotion);
            nxt = match emotion {
                Self::Calm => Some(Self::Stressed),
                Self::Stressed => Some(Self::Frustrated),
                Self::Frustrated => Some(Self::Excited),
                Self::Excited => Some(Self::Neutral),
                // last is None
                Self::Neutral => None,
            };
        }
        vs
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Calm => "calm",
            Self::Stressed => "stressed",
            Self::Frustrated => "frustrated",
            Self::Excited => "excited",
            Self::Neutral => "neutral",
        }
    }

    /// Exact match against the labels. Anything the classifier makes up
    /// beyond the five words is `None`.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::variants().into_iter().find(|e| e.label() == label)
    }
}
