use std::collections::VecDeque;
use std::time::Duration;

use crate::foundation::error::PlayerResult;
use crate::nav::input::InputEvent;
use crate::present::Presenter;
use crate::render::frame::Frame;

/// Headless presenter that replays scripted input and records everything it was asked to do.
///
/// Each call to [`Presenter::poll_input`] consumes one scripted batch. Once the script is exhausted
/// every poll reports [`InputEvent::CloseRequested`].
#[derive(Debug, Default)]
pub struct ScriptedPresenter {
    script: VecDeque<Vec<InputEvent>>,
    frames: Vec<Frame>,
    delays: Vec<Duration>,
    poll_timeouts: Vec<Duration>,
    keep_frames: bool,
    presented: usize,
}

impl ScriptedPresenter {
    /// Create a presenter that replays `batches` in order and keeps every presented frame.
    pub fn new(batches: impl IntoIterator<Item = Vec<InputEvent>>) -> Self {
        Self {
            script: batches.into_iter().collect(),
            keep_frames: true,
            ..Self::default()
        }
    }

    /// Count presented frames without keeping their pixels.
    pub fn discard_frames(mut self) -> Self {
        self.keep_frames = false;
        self
    }

    /// Append one batch to the end of the script.
    pub fn push_batch(&mut self, batch: Vec<InputEvent>) {
        self.script.push_back(batch);
    }

    /// Frames presented so far, oldest first. Empty after [`ScriptedPresenter::discard_frames`].
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Number of frames presented so far.
    pub fn presented(&self) -> usize {
        self.presented
    }

    /// Transition delays requested so far.
    pub fn delays(&self) -> &[Duration] {
        &self.delays
    }

    /// Timeouts passed to every poll so far.
    pub fn poll_timeouts(&self) -> &[Duration] {
        &self.poll_timeouts
    }

    /// Batches not yet consumed.
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl Presenter for ScriptedPresenter {
    fn present(&mut self, frame: &Frame) -> PlayerResult<()> {
        self.presented += 1;
        if self.keep_frames {
            self.frames.push(frame.clone());
        }
        Ok(())
    }

    fn poll_input(&mut self, timeout: Duration) -> PlayerResult<Vec<InputEvent>> {
        self.poll_timeouts.push(timeout);
        Ok(self
            .script
            .pop_front()
            .unwrap_or_else(|| vec![InputEvent::CloseRequested]))
    }

    fn delay(&mut self, duration: Duration) {
        self.delays.push(duration);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/present/scripted.rs"]
mod tests;
