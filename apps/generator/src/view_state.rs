//! View state machine for the result area.
//!
//! ```text
//!   Idle ──Submit──▶ Pending ──Succeeded──▶ Shown(Generated)
//!                      │    ──FellBack───▶ Shown(Placeholder)
//!                      │    ──Failed─────▶ Failed
//!   Shown / Failed ──Submit──▶ Pending
//! ```

use crate::description::ResultOrigin;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    Idle,
    Pending,
    Shown(ResultOrigin),
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewEvent {
    Submit,
    Succeeded,
    FellBack,
    Failed,
}

impl ViewState {
    /// The next state, or `None` if `event` is not valid here.
    pub fn next(self, event: ViewEvent) -> Option<ViewState> {
        match (self, event) {
            (ViewState::Pending, ViewEvent::Submit) => None,
            (_, ViewEvent::Submit) => Some(ViewState::Pending),
            (ViewState::Pending, ViewEvent::Succeeded) => {
                Some(ViewState::Shown(ResultOrigin::Generated))
            }
            (ViewState::Pending, ViewEvent::FellBack) => {
                Some(ViewState::Shown(ResultOrigin::Placeholder))
            }
            (ViewState::Pending, ViewEvent::Failed) => Some(ViewState::Failed),
            _ => None,
        }
    }

    /// The submit control is disabled while a request is in flight.
    pub fn submit_enabled(self) -> bool {
        self != ViewState::Pending
    }

    pub fn is_loading(self) -> bool {
        self == ViewState::Pending
    }
}
