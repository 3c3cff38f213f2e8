//! Navigation state machine: pointer gestures and key presses in, navigation intents out.

use crate::foundation::core::{Canvas, Rect};
use crate::nav::input::{InputEvent, KeyBindings};

/// What the playback loop should do next.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Intent {
    /// Slide to the next video (wraps).
    Advance,
    /// Slide to the previous video (wraps).
    Retreat,
    /// Make category `k` current.
    SwitchCategory(usize),
    /// Flip the paused flag.
    TogglePause,
    /// Flip overlay visibility.
    ToggleUi,
    /// Stop the loop.
    Quit,
}

impl Intent {
    /// Return `true` for intents that change the active video source.
    pub fn is_navigation(self) -> bool {
        matches!(
            self,
            Self::Advance | Self::Retreat | Self::SwitchCategory(_)
        )
    }
}

/// Phase of the navigation state machine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NavPhase {
    /// Waiting for input.
    #[default]
    Idle,
    /// Primary pointer button is held.
    Dragging,
    /// A navigation intent was emitted and the loop has not finished acting on it.
    TransitionPending,
}

/// Gesture classification thresholds in canvas pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GestureConfig {
    /// Minimum vertical travel of a swipe.
    pub swipe_threshold_px: u32,
    /// A release closer than this on both axes is a tap.
    pub tap_tolerance_px: u32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            swipe_threshold_px: 100,
            tap_tolerance_px: 20,
        }
    }
}

/// Playback flags and position, mutated only by intent handlers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlaybackState {
    /// Index of the current category.
    pub category: usize,
    /// Index of the current video within the active list.
    pub index: usize,
    /// Whether frame reads are suspended.
    pub paused: bool,
    /// Whether the overlay is drawn.
    pub show_ui: bool,
    /// Number of intermediate frames in a transition.
    pub transition_steps: u32,
    /// Target size of every presented frame.
    pub canvas: Canvas,
}

impl PlaybackState {
    /// Fresh state at category 0, video 0, playing.
    pub fn new(canvas: Canvas, transition_steps: u32, show_ui: bool) -> Self {
        Self {
            category: 0,
            index: 0,
            paused: false,
            show_ui,
            transition_steps,
            canvas,
        }
    }

    /// Index after the current one in a circular list of `len`, `None` when empty.
    pub fn next_index(&self, len: usize) -> Option<usize> {
        (len > 0).then(|| (self.index % len + 1) % len)
    }

    /// Index before the current one in a circular list of `len`, `None` when empty.
    pub fn prev_index(&self, len: usize) -> Option<usize> {
        (len > 0).then(|| (self.index % len + len - 1) % len)
    }
}

/// Ephemeral pointer-drag bookkeeping.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PointerDragState {
    /// Whether the primary button is held.
    pub down: bool,
    /// Press position.
    pub start_x: i32,
    /// Press position.
    pub start_y: i32,
}

/// Consumes [`InputEvent`]s and resolves them into at most one pointer intent and one key
/// intent per poll.
#[derive(Clone, Debug)]
pub struct NavigationState {
    phase: NavPhase,
    drag: PointerDragState,
    category_buttons: Vec<Rect>,
    gesture: GestureConfig,
    bindings: KeyBindings,
    pointer_intent: Option<Intent>,
    key_intent: Option<Intent>,
}

impl NavigationState {
    /// Create an idle state machine.
    pub fn new(gesture: GestureConfig, bindings: KeyBindings) -> Self {
        Self {
            phase: NavPhase::Idle,
            drag: PointerDragState::default(),
            category_buttons: Vec::new(),
            gesture,
            bindings,
            pointer_intent: None,
            key_intent: None,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> NavPhase {
        self.phase
    }

    /// Current drag bookkeeping.
    pub fn drag(&self) -> PointerDragState {
        self.drag
    }

    /// Category button rectangles as last drawn, indexed by category.
    pub fn category_buttons(&self) -> &[Rect] {
        &self.category_buttons
    }

    /// Replace the hit regions of the category buttons.
    pub fn register_buttons(&mut self, buttons: Vec<Rect>) {
        self.category_buttons = buttons;
    }

    /// Feed one input event.
    pub fn handle(&mut self, event: InputEvent, playback: &PlaybackState) {
        match event {
            InputEvent::PointerDown { x, y } => {
                self.drag = PointerDragState {
                    down: true,
                    start_x: x,
                    start_y: y,
                };
                self.phase = NavPhase::Dragging;
            }
            InputEvent::PointerUp { x, y } => {
                if !self.drag.down {
                    return;
                }
                let intent = self.classify_release(
                    (self.drag.start_x, self.drag.start_y),
                    (x, y),
                    playback.category,
                );
                self.drag = PointerDragState::default();
                self.phase = NavPhase::Idle;
                if intent.is_some() {
                    self.pointer_intent = intent;
                }
            }
            InputEvent::PointerMove { .. } => {}
            InputEvent::Key(key) => {
                if let Some(intent) = self.bindings.lookup(key) {
                    self.key_intent = Some(intent);
                }
            }
            InputEvent::CloseRequested => self.key_intent = Some(Intent::Quit),
        }
    }

    /// Classify a press/release pair.
    ///
    /// Taps (both axes under the tap tolerance) hit-test the category buttons; vertical travel of
    /// at least the swipe threshold navigates (upward drag advances). Everything else is ignored.
    pub fn classify_release(
        &self,
        start: (i32, i32),
        end: (i32, i32),
        current_category: usize,
    ) -> Option<Intent> {
        let dx = end.0.abs_diff(start.0);
        let dy = end.1.abs_diff(start.1);
        let tol = self.gesture.tap_tolerance_px;

        if dy < tol && dx < tol {
            return self
                .category_buttons
                .iter()
                .position(|r| r.contains(end.0, end.1))
                .filter(|&k| k != current_category)
                .map(Intent::SwitchCategory);
        }
        if dy >= self.gesture.swipe_threshold_px {
            return Some(if end.1 < start.1 {
                Intent::Advance
            } else {
                Intent::Retreat
            });
        }
        None
    }

    /// Drain the intents resolved since the last call: pointer intent first, then key intent.
    ///
    /// The phase follows what is returned: `TransitionPending` when a navigation intent is
    /// handed out, otherwise `Dragging` while the button is still held, else `Idle`.
    pub fn take_intents(&mut self) -> Vec<Intent> {
        let intents: Vec<Intent> = self
            .pointer_intent
            .take()
            .into_iter()
            .chain(self.key_intent.take())
            .collect();
        self.phase = if intents.iter().any(|i| i.is_navigation()) {
            NavPhase::TransitionPending
        } else if self.drag.down {
            NavPhase::Dragging
        } else {
            NavPhase::Idle
        };
        intents
    }

    /// The loop finished acting on a navigation intent (completed or aborted).
    pub fn finish_transition(&mut self) {
        if self.phase == NavPhase::TransitionPending {
            self.phase = if self.drag.down {
                NavPhase::Dragging
            } else {
                NavPhase::Idle
            };
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/nav/state.rs"]
mod tests;
