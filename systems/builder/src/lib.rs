#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system responsible for emitting tower placement commands.

use glam::Vec2;
use wave_defence_core::{Command, PlacementPreview, TowerKind};

/// Button input distilled from adapter-provided frame input data.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BuilderInput {
    /// Tower kind the player picked from the sidebar on this frame.
    pub select: Option<TowerKind>,
    /// Indicates whether the player confirmed a placement on this frame.
    pub confirm: bool,
    /// Indicates whether the player discarded the preview on this frame.
    pub cancel: bool,
}

/// System that translates the placement preview plus input into commands.
///
/// A frame is handled in two steps. [`Builder::move_cursor`] runs first and
/// its commands must be applied before the preview handed to
/// [`Builder::handle`] is queried, so a click judges the position it was
/// made at.
#[derive(Clone, Debug, Default)]
pub struct Builder {
    last_cursor: Option<Vec2>,
    hovering: bool,
}

impl Builder {
    /// Creates a new builder system instance.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            last_cursor: None,
            hovering: false,
        }
    }

    /// Forwards cursor motion over the play area.
    ///
    /// `None` means the cursor left the play area; the preview stays where it
    /// was but clicks are ignored until the cursor returns. A position equal
    /// to the last forwarded one emits nothing.
    pub fn move_cursor(&mut self, cursor: Option<Vec2>, out: &mut Vec<Command>) {
        self.hovering = cursor.is_some();
        let Some(cursor) = cursor else {
            return;
        };
        if self.last_cursor != Some(cursor) {
            self.last_cursor = Some(cursor);
            out.push(Command::MovePlacement { cursor });
        }
    }

    /// Consumes the current preview and button input to emit placement commands.
    ///
    /// A confirmation is forwarded only while the cursor hovers the play area
    /// and the preview reports a valid position.
    pub fn handle(
        &self,
        preview: Option<PlacementPreview>,
        input: BuilderInput,
        out: &mut Vec<Command>,
    ) {
        if let Some(kind) = input.select {
            out.push(Command::BeginPlacement { kind });
            return;
        }

        let Some(preview) = preview else {
            return;
        };

        if input.cancel {
            out.push(Command::CancelPlacement);
            return;
        }

        if input.confirm && self.hovering && preview.is_placeable() {
            out.push(Command::ConfirmPlacement);
        }
    }
}
