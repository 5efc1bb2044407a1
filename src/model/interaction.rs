use serde::{Deserialize, Serialize};
use std::fmt;

/// Basic interaction events that a widget can emit for an item or category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionKind {
    #[default]
    None,
    Hovered,
    Unhovered,
    Clicked,
}

impl fmt::Display for InteractionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            InteractionKind::None => "None",
            InteractionKind::Hovered => "Hovered",
            InteractionKind::Unhovered => "Unhovered",
            InteractionKind::Clicked => "Clicked",
        };
        f.write_str(label)
    }
}

/// The latest interaction on an item or category, tagged with the widget it came from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interaction {
    pub kind: InteractionKind,
    pub source: String,
}

impl Interaction {
    pub fn new(kind: InteractionKind, source: impl Into<String>) -> Self {
        Self {
            kind,
            source: source.into(),
        }
    }

    pub fn hovered(source: impl Into<String>) -> Self {
        Self::new(InteractionKind::Hovered, source)
    }

    pub fn unhovered(source: impl Into<String>) -> Self {
        Self::new(InteractionKind::Unhovered, source)
    }

    pub fn clicked(source: impl Into<String>) -> Self {
        Self::new(InteractionKind::Clicked, source)
    }

    pub fn is_valid(&self) -> bool {
        self.kind != InteractionKind::None
    }
}
