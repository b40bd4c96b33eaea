//! The four scroll commands exposed to keymaps and command palettes

use std::fmt;
use std::str::FromStr;

use tracing::{debug, warn};

use crate::config::ScrollConfig;
use crate::host::EditorHost;
use crate::scroll::{CursorPreservingScroller, Direction, ScrollOutcome, ScrollUnit};
use crate::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScrollCommand {
    ScrollDownHalfPage,
    ScrollUpHalfPage,
    ScrollDownPage,
    ScrollUpPage,
}

impl ScrollCommand {
    /// Every command, in registration order
    pub const ALL: [ScrollCommand; 4] = [
        ScrollCommand::ScrollDownHalfPage,
        ScrollCommand::ScrollUpHalfPage,
        ScrollCommand::ScrollDownPage,
        ScrollCommand::ScrollUpPage,
    ];

    /// Stable identifier used for registration and on the command line
    pub fn id(&self) -> &'static str {
        match self {
            ScrollCommand::ScrollDownHalfPage => "scrollDownHalfPage",
            ScrollCommand::ScrollUpHalfPage => "scrollUpHalfPage",
            ScrollCommand::ScrollDownPage => "scrollDownPage",
            ScrollCommand::ScrollUpPage => "scrollUpPage",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ScrollCommand::ScrollDownHalfPage => "Scroll down half a page, keeping the cursor's screen position",
            ScrollCommand::ScrollUpHalfPage => "Scroll up half a page, keeping the cursor's screen position",
            ScrollCommand::ScrollDownPage => "Scroll down a page",
            ScrollCommand::ScrollUpPage => "Scroll up a page",
        }
    }

    pub fn direction(&self) -> Direction {
        match self {
            ScrollCommand::ScrollDownHalfPage | ScrollCommand::ScrollDownPage => Direction::Down,
            ScrollCommand::ScrollUpHalfPage | ScrollCommand::ScrollUpPage => Direction::Up,
        }
    }

    pub fn unit(&self) -> ScrollUnit {
        match self {
            ScrollCommand::ScrollDownHalfPage | ScrollCommand::ScrollUpHalfPage => ScrollUnit::HalfPage,
            ScrollCommand::ScrollDownPage | ScrollCommand::ScrollUpPage => ScrollUnit::Page,
        }
    }

    /// Whether this command keeps the cursor's relative position
    pub fn preserves_cursor(&self, config: &ScrollConfig) -> bool {
        self.unit() == ScrollUnit::HalfPage && config.preserve_cursor_on_half_page
    }

    /// Run the command against `host`.
    ///
    /// Never fails: host errors are logged and swallowed. Returns the outcome
    /// of a preserving scroll, or `None` for a plain scroll or a host error.
    pub async fn execute<H>(self, host: &mut H, config: &ScrollConfig) -> Option<ScrollOutcome>
    where
        H: EditorHost + ?Sized,
    {
        debug!(command = self.id(), "Running scroll command");

        let mut scroller = CursorPreservingScroller::new(host);
        if self.preserves_cursor(config) {
            match scroller.scroll(self.direction(), self.unit()).await {
                Ok(outcome) => Some(outcome),
                Err(e) => {
                    warn!(command = self.id(), error = %e, "Scroll command failed");
                    None
                }
            }
        } else {
            if let Err(e) = scroller.raw_scroll(self.direction(), self.unit()).await {
                warn!(command = self.id(), error = %e, "Scroll command failed");
            }
            None
        }
    }
}

impl fmt::Display for ScrollCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ScrollCommand {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ScrollCommand::ALL
            .into_iter()
            .find(|command| command.id() == s)
            .ok_or_else(|| Error::UnknownCommand(s.to_string()))
    }
}
