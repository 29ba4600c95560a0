//! Calendar lookup by id.

use tracing::warn;

use super::CalendarDefinition;
use super::presets;
use crate::error::{TimelineError, TimelineResult};

/// Id of the built-in solar calendar, used when nothing else is selected.
pub const DEFAULT_TIME_SYSTEM: &str = "default";

/// Read-only snapshot of every calendar a pipeline run may reference.
///
/// Built-ins always win over user calendars carrying the same id.
#[derive(Debug, Clone, Default)]
pub struct CalendarRegistry {
    user: Vec<CalendarDefinition>,
}

impl CalendarRegistry {
    pub fn new(user_calendars: Vec<CalendarDefinition>) -> Self {
        for calendar in &user_calendars {
            if presets::builtins().iter().any(|b| b.id == calendar.id) {
                warn!(id = %calendar.id, "user calendar shadowed by built-in with the same id");
            }
        }

        CalendarRegistry {
            user: user_calendars,
        }
    }

    /// Look up a calendar.
    ///
    /// `Ok(None)` means the id is unknown and callers should fall back to
    /// numeric formatting. A definition that exists but is structurally
    /// broken is rejected here, before anything indexes into it.
    pub fn resolve(&self, id: &str) -> TimelineResult<Option<&CalendarDefinition>> {
        let found = presets::builtins()
            .iter()
            .find(|c| c.id == id)
            .or_else(|| self.user.iter().find(|c| c.id == id));

        match found {
            Some(calendar) => {
                calendar.validate()?;
                Ok(Some(calendar))
            }
            None => Ok(None),
        }
    }

    /// Like [`resolve`](Self::resolve), but an unknown id is an error.
    pub fn require(&self, id: &str) -> TimelineResult<&CalendarDefinition> {
        self.resolve(id)?
            .ok_or_else(|| TimelineError::CalendarNotFound(id.to_string()))
    }

    pub fn builtins(&self) -> &'static [CalendarDefinition] {
        presets::builtins()
    }

    pub fn user_calendars(&self) -> &[CalendarDefinition] {
        &self.user
    }

    /// Every id that `resolve` can find, built-ins first.
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = presets::builtins().iter().map(|c| c.id.as_str()).collect();
        for calendar in &self.user {
            if !ids.contains(&calendar.id.as_str()) {
                ids.push(calendar.id.as_str());
            }
        }
        ids
    }
}
