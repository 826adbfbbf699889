use skyfolio_scene::{Mode, Section};

use crate::session::Session;

/// The single controller allowed to write the camera in a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraStrategy {
    /// Section choreography around the stationary plane.
    PortfolioChoreography(Section),
    /// Chase camera behind the piloted plane.
    FreeFlightIntegration,
}

impl CameraStrategy {
    /// Strategy selected by the session's current mode and section.
    #[must_use]
    pub fn select(session: &Session) -> Self {
        match session.mode() {
            Mode::Portfolio => Self::PortfolioChoreography(session.section()),
            Mode::FreeFlight => Self::FreeFlightIntegration,
        }
    }

    #[must_use]
    pub fn mode(self) -> Mode {
        match self {
            Self::PortfolioChoreography(_) => Mode::Portfolio,
            Self::FreeFlightIntegration => Mode::FreeFlight,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_follows_mode() {
        let mut session = Session::default();
        session.navigate(Section::Projects);
        assert_eq!(
            CameraStrategy::select(&session),
            CameraStrategy::PortfolioChoreography(Section::Projects)
        );
        session.set_free_flight(true);
        let strategy = CameraStrategy::select(&session);
        assert_eq!(strategy, CameraStrategy::FreeFlightIntegration);
        assert_eq!(strategy.mode(), Mode::FreeFlight);
    }
}
