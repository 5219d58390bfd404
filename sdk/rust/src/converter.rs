//! Model converter (component I): unwraps `Unset` wire sentinels into the
//! SDK's plain `Option` domain models.
//!
//! Grounded in
//! `command_model_converter.py::to_command_status`/`_unwrap_optional`.

use crate::types::{CommandStatus, CommandStatusResponse};

pub fn to_command_status(raw: CommandStatusResponse) -> CommandStatus {
    CommandStatus {
        id: raw.id.into_option(),
        content: raw.content.into_option(),
        running: raw.running.into_option(),
        exit_code: raw.exit_code.into_option(),
        error: raw.error.into_option(),
        started_at: raw.started_at.into_option(),
        finished_at: raw.finished_at.into_option(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Unset;

    #[test]
    fn converts_mixed_present_and_absent_fields() {
        let raw = CommandStatusResponse {
            id: Unset::Present("exec-1".to_string()),
            content: Unset::Null,
            running: Unset::Present(true),
            exit_code: Unset::Absent,
            error: Unset::Absent,
            started_at: Unset::Present("2026-01-01T00:00:00Z".to_string()),
            finished_at: Unset::Absent,
        };

        let status = to_command_status(raw);
        assert_eq!(status.id.as_deref(), Some("exec-1"));
        assert!(status.content.is_none());
        assert_eq!(status.running, Some(true));
        assert!(status.exit_code.is_none());
        assert_eq!(status.started_at.as_deref(), Some("2026-01-01T00:00:00Z"));
        assert!(status.finished_at.is_none());
    }
}
