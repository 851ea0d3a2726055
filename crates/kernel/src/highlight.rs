use facehover_common::Color;
use facehover_scene::MaterialSlots;

/// Which face, if any, is currently drawn in the hover color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HighlightState {
    #[default]
    Idle,
    Highlighted(usize),
}

impl HighlightState {
    pub fn index(self) -> Option<usize> {
        match self {
            Self::Idle => None,
            Self::Highlighted(i) => Some(i),
        }
    }
}

/// A change of highlighted face. Self-transitions are not reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightTransition {
    /// A face became highlighted from idle.
    Entered(usize),
    /// Highlight moved between faces.
    Moved { from: usize, to: usize },
    /// The highlighted face reverted and nothing replaced it.
    Cleared(usize),
}

/// Applies and reverts the hover color on material slots as the picked
/// face changes.
///
/// At most one slot differs from the default color after any call to
/// [`Highlighter::apply`], and it is the slot of the current state.
#[derive(Debug, Clone)]
pub struct Highlighter {
    state: HighlightState,
    default_color: Color,
    hover_color: Color,
}

impl Highlighter {
    pub fn new(default_color: Color, hover_color: Color) -> Self {
        Self {
            state: HighlightState::Idle,
            default_color,
            hover_color,
        }
    }

    pub fn state(&self) -> HighlightState {
        self.state
    }

    pub fn hovered(&self) -> Option<usize> {
        self.state.index()
    }

    pub fn default_color(&self) -> Color {
        self.default_color
    }

    pub fn hover_color(&self) -> Color {
        self.hover_color
    }

    /// Feed one frame's pick result. A target with no matching slot counts as
    /// no target.
    pub fn apply(
        &mut self,
        target: Option<usize>,
        slots: &mut MaterialSlots,
    ) -> Option<HighlightTransition> {
        let target = match target {
            Some(i) if i >= slots.len() => {
                tracing::warn!("pick resolved to material {i}, only {} slots exist", slots.len());
                None
            }
            other => other,
        };

        let transition = match (self.state, target) {
            (HighlightState::Idle, None) => return None,
            (HighlightState::Highlighted(current), Some(next)) if current == next => return None,
            (HighlightState::Idle, Some(next)) => {
                slots.set(next, self.hover_color);
                self.state = HighlightState::Highlighted(next);
                HighlightTransition::Entered(next)
            }
            (HighlightState::Highlighted(current), Some(next)) => {
                slots.set(current, self.default_color);
                slots.set(next, self.hover_color);
                self.state = HighlightState::Highlighted(next);
                HighlightTransition::Moved {
                    from: current,
                    to: next,
                }
            }
            (HighlightState::Highlighted(current), None) => {
                slots.set(current, self.default_color);
                self.state = HighlightState::Idle;
                HighlightTransition::Cleared(current)
            }
        };

        tracing::debug!(?transition, "highlight changed");
        Some(transition)
    }
}
