//! Component trait - interface for UI components
//!
//! Components turn key events into Actions and render themselves. State
//! that belongs to the submission flows lives in the manager, not here.

use crate::action::Action;
use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};

/// Trait for UI components
///
/// 1. `handle_key_event` - map a key to an Action, without changing state
/// 2. `update` - apply an Action, optionally returning a follow-up
/// 3. `draw` - render into `area`
pub trait Component {
    /// Called once before the first frame
    fn init(&mut self) -> Result<()> {
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let _ = key;
        Ok(None)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        let _ = action;
        Ok(None)
    }

    /// Pure rendering; components that need external data render through
    /// a `draw_with_*` method instead and leave this empty
    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()>;
}
