//! Rotation state: the widget list and its cursor

use std::fmt;
use std::sync::Arc;

use rotaboard_domain::{Result, RotaboardError};

use super::ports::Widget;

/// Ordered, non-empty widget list with a wrapping cursor.
///
/// The cursor always denotes a valid widget. It is only ever moved by
/// [`Rotation::advance`], one step at a time.
pub struct Rotation {
    widgets: Vec<Arc<dyn Widget>>,
    position: usize,
}

impl Rotation {
    /// Create a rotation positioned on the first widget.
    ///
    /// # Errors
    /// Returns `RotaboardError::Config` if `widgets` is empty.
    pub fn new(widgets: Vec<Arc<dyn Widget>>) -> Result<Self> {
        Self::starting_at(widgets, 0)
    }

    /// Create a rotation positioned on `position`.
    ///
    /// # Errors
    /// Returns `RotaboardError::Config` if `widgets` is empty and
    /// `RotaboardError::InvalidInput` if `position` is out of range.
    pub fn starting_at(widgets: Vec<Arc<dyn Widget>>, position: usize) -> Result<Self> {
        if widgets.is_empty() {
            return Err(RotaboardError::Config(
                "rotation requires at least one widget".to_string(),
            ));
        }
        if position >= widgets.len() {
            return Err(RotaboardError::InvalidInput(format!(
                "start position {position} out of range for {} widgets",
                widgets.len()
            )));
        }

        Ok(Self { widgets, position })
    }

    /// Widget at the cursor
    pub fn current(&self) -> &Arc<dyn Widget> {
        &self.widgets[self.position]
    }

    /// Move the cursor one step, wrapping after the last widget
    pub fn advance(&mut self) {
        self.position = (self.position + 1) % self.widgets.len();
    }

    pub const fn position(&self) -> usize {
        self.position
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    /// True if the rotation has no widgets (never, by construction)
    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    pub fn widget_names(&self) -> Vec<&str> {
        self.widgets.iter().map(|widget| widget.name()).collect()
    }
}

impl fmt::Debug for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rotation")
            .field("widgets", &self.widget_names())
            .field("position", &self.position)
            .finish()
    }
}
