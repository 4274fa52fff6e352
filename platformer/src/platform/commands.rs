//! Remote control commands for moving platforms (levers, buttons, triggers).

use serde::{Deserialize, Serialize};

use super::MovingPlatform;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PlatformCommand {
    #[default]
    Nothing,
    Resume,
    /// Resume, then stop at the next waypoint.
    ResumeAndStop,
    ReverseAndResume,
    /// Reverse, resume, then stop at the next waypoint.
    ReverseAndResumeAndStop,
    Stop,
    /// Keep going and stop at the next waypoint.
    StopOnNext,
    /// If stopped, resume and stop again two waypoints later.
    IfStoppedReverse,
}

impl PlatformCommand {
    pub fn apply(self, platform: &mut MovingPlatform) {
        match self {
            PlatformCommand::Nothing => {}
            PlatformCommand::Resume => platform.resume(),
            PlatformCommand::ResumeAndStop => {
                platform.resume();
                platform.stop_on(1);
            }
            PlatformCommand::ReverseAndResume => {
                platform.reverse();
                platform.resume();
            }
            PlatformCommand::ReverseAndResumeAndStop => {
                platform.reverse();
                platform.resume();
                platform.stop_on(1);
            }
            PlatformCommand::Stop => platform.stop(),
            PlatformCommand::StopOnNext => platform.stop_on(1),
            PlatformCommand::IfStoppedReverse => {
                if platform.is_stopped() {
                    platform.resume();
                    platform.stop_on(2);
                }
            }
        }
    }
}
