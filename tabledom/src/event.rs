/// UI events delivered by an adapter, targeted at an element by ID.
///
/// The tree itself never listens for anything. Whoever owns the real
/// surface translates its native events into these and hands them to the
/// widget that owns the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Pointer activation on an element
    Click { target: String },
    /// The value of a form control changed
    Input { target: String, value: String },
}

impl Event {
    pub fn click(target: impl Into<String>) -> Self {
        Self::Click {
            target: target.into(),
        }
    }

    pub fn input(target: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Input {
            target: target.into(),
            value: value.into(),
        }
    }

    /// ID of the element the event is aimed at.
    pub fn target(&self) -> &str {
        match self {
            Self::Click { target } | Self::Input { target, .. } => target,
        }
    }
}
