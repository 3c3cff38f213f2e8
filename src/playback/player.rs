//! The playback loop: read, composite, overlay, present, poll, act on intents.

use std::ops::ControlFlow;
use std::path::Path;
use std::time::Duration;

use crate::animation::ease::Ease;
use crate::assets::catalog::{Library, VideoEntry};
use crate::assets::media::{VideoBackend, VideoSource};
use crate::effects::transitions::{TransitionKind, TransitionRun};
use crate::foundation::core::{Canvas, DEFAULT_FPS, Fps, FrameIndex};
use crate::foundation::error::{PlayerError, PlayerResult};
use crate::nav::input::KeyBindings;
use crate::nav::state::{GestureConfig, Intent, NavigationState, PlaybackState};
use crate::overlay::{Overlay, OverlayModel};
use crate::present::Presenter;
use crate::render::fit::fit;
use crate::render::frame::Frame;

/// Tunables of the playback loop.
#[derive(Clone, Debug)]
pub struct PlayerOpts {
    /// Size of every presented frame.
    pub canvas: Canvas,
    /// Transition used for advance; retreat runs it in the opposite direction.
    pub transition: TransitionKind,
    /// Progress curve of a transition.
    pub ease: Ease,
    /// Intermediate frames per transition.
    pub transition_steps: u32,
    /// Pause after each intermediate frame.
    pub step_delay: Duration,
    /// Tap and swipe thresholds.
    pub gesture: GestureConfig,
    /// Key table.
    pub bindings: KeyBindings,
    /// Initial overlay visibility.
    pub show_ui: bool,
    /// Frame rate substituted when a source reports none.
    pub default_fps: u32,
}

impl Default for PlayerOpts {
    fn default() -> Self {
        Self {
            canvas: Canvas {
                width: 720,
                height: 1280,
            },
            transition: TransitionKind::default(),
            ease: Ease::OutCubic,
            transition_steps: 20,
            step_delay: Duration::from_millis(16),
            gesture: GestureConfig::default(),
            bindings: KeyBindings::default(),
            show_ui: true,
            default_fps: DEFAULT_FPS,
        }
    }
}

/// Counters reported when the loop ends.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlaybackStats {
    /// Regular (non-transition) frames presented.
    pub frames_presented: u64,
    /// Intermediate transition frames presented.
    pub transition_frames_presented: u64,
    /// Advance/retreat transitions that swapped the active source.
    pub transitions_completed: u64,
    /// Advance/retreat requests dropped because the destination was unreadable.
    pub transitions_aborted: u64,
    /// Category switches performed.
    pub category_switches: u64,
}

struct ActiveSource {
    source: Box<dyn VideoSource>,
    fps: Fps,
    frame_count: u64,
    position: FrameIndex,
}

impl ActiveSource {
    fn new(source: Box<dyn VideoSource>, default_fps: u32) -> Self {
        let fps = Fps::from_source_rate(source.fps(), default_fps);
        let frame_count = source.frame_count();
        Self {
            source,
            fps,
            frame_count,
            position: FrameIndex(0),
        }
    }

    /// Next raw frame, looping to the start at end of stream. `None` when both reads fail.
    fn read_looping(&mut self) -> Option<Frame> {
        match self.source.read_frame() {
            Ok(Some(frame)) => {
                self.position.0 += 1;
                return Some(frame);
            }
            Ok(None) => {}
            Err(e) => tracing::warn!(
                path = %self.path().display(),
                error = %e,
                "frame read failed, rewinding"
            ),
        }

        if let Err(e) = self.source.seek_to_start() {
            tracing::warn!(path = %self.path().display(), error = %e, "rewind failed");
            return None;
        }
        self.position = FrameIndex(0);
        match self.source.read_frame() {
            Ok(Some(frame)) => {
                self.position.0 = 1;
                Some(frame)
            }
            Ok(None) => {
                tracing::warn!(path = %self.path().display(), "no frame after rewind");
                None
            }
            Err(e) => {
                tracing::warn!(
                    path = %self.path().display(),
                    error = %e,
                    "frame read after rewind failed"
                );
                None
            }
        }
    }

    fn path(&self) -> &Path {
        &self.source.info().source_path
    }

    fn release(mut self) {
        self.source.release();
    }
}

/// Kiosk player: owns the library, the active source and all playback state.
pub struct Player {
    opts: PlayerOpts,
    run: TransitionRun,
    library: Library,
    backend: Box<dyn VideoBackend>,
    overlay: Box<dyn Overlay>,
    state: PlaybackState,
    nav: NavigationState,
    videos: Vec<VideoEntry>,
    active: Option<ActiveSource>,
    last_frame: Option<Frame>,
    needs_redraw: bool,
    stats: PlaybackStats,
}

impl Player {
    /// Load the first category with playable videos and open its first video.
    ///
    /// Fails with [`PlayerError::EmptyLibrary`] when no category has a playable video.
    #[tracing::instrument(skip_all, fields(root = %library.root().display()))]
    pub fn new(
        opts: PlayerOpts,
        library: Library,
        mut backend: Box<dyn VideoBackend>,
        overlay: Box<dyn Overlay>,
    ) -> PlayerResult<Self> {
        opts.canvas.validate()?;
        let run = TransitionRun::new(opts.transition_steps, opts.ease)?;

        let mut initial = None;
        for (k, category) in library.categories().iter().enumerate() {
            let videos = library.load(k, backend.as_mut())?;
            if videos.is_empty() {
                tracing::warn!(error = %PlayerError::EmptyCategory(category.label.clone()), "skipping category at startup");
                continue;
            }
            initial = Some((k, videos));
            break;
        }
        let (category, videos) =
            initial.ok_or_else(|| PlayerError::EmptyLibrary(library.root().to_path_buf()))?;

        let source = backend.open(&videos[0].path)?;
        let active = ActiveSource::new(source, opts.default_fps);
        tracing::info!(
            category = %library.categories()[category].label,
            videos = videos.len(),
            first = %videos[0].path.display(),
            "player ready"
        );

        let mut state = PlaybackState::new(opts.canvas, opts.transition_steps, opts.show_ui);
        state.category = category;
        let nav = NavigationState::new(opts.gesture, opts.bindings.clone());

        Ok(Self {
            opts,
            run,
            library,
            backend,
            overlay,
            state,
            nav,
            videos,
            active: Some(active),
            last_frame: None,
            needs_redraw: false,
            stats: PlaybackStats::default(),
        })
    }

    /// Current playback state.
    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    /// Videos of the current category.
    pub fn videos(&self) -> &[VideoEntry] {
        &self.videos
    }

    /// The library being played.
    pub fn library(&self) -> &Library {
        &self.library
    }

    /// Navigation state machine.
    pub fn navigation(&self) -> &NavigationState {
        &self.nav
    }

    /// Counters so far.
    pub fn stats(&self) -> PlaybackStats {
        self.stats
    }

    /// Whether a video source is currently open.
    pub fn has_active_source(&self) -> bool {
        self.active.is_some()
    }

    /// Position of the last frame read from the active source.
    pub fn position(&self) -> Option<FrameIndex> {
        self.active.as_ref().map(|a| a.position)
    }

    /// Run until a quit intent and return the counters.
    ///
    /// The active source is released on every exit path.
    pub fn run(&mut self, presenter: &mut dyn Presenter) -> PlayerResult<PlaybackStats> {
        loop {
            match self.step(presenter) {
                Ok(ControlFlow::Continue(())) => {}
                Ok(ControlFlow::Break(())) => break,
                Err(e) => {
                    self.shutdown();
                    return Err(e);
                }
            }
        }
        tracing::info!(stats = ?self.stats, "playback finished");
        Ok(self.stats)
    }

    /// One loop iteration. Returns `Break` after a quit intent.
    pub fn step(&mut self, presenter: &mut dyn Presenter) -> PlayerResult<ControlFlow<()>> {
        let mut presented = false;
        if !self.state.paused
            && let Some(raw) = self.active.as_mut().and_then(ActiveSource::read_looping)
        {
            match fit(&raw, self.opts.canvas) {
                Ok(frame) => {
                    self.present_with_overlay(presenter, &frame)?;
                    self.last_frame = Some(frame);
                    presented = true;
                }
                Err(e) => tracing::warn!(error = %e, "dropping frame"),
            }
        }
        if !presented && self.needs_redraw {
            let base = match &self.last_frame {
                Some(frame) => frame.clone(),
                None => Frame::black(self.opts.canvas.width, self.opts.canvas.height),
            };
            self.present_with_overlay(presenter, &base)?;
            presented = true;
        }
        if presented {
            self.needs_redraw = false;
        }

        let events = presenter.poll_input(self.poll_timeout())?;
        for event in events {
            self.nav.handle(event, &self.state);
        }

        for intent in self.nav.take_intents() {
            if let ControlFlow::Break(()) = self.apply(intent, presenter)? {
                return Ok(ControlFlow::Break(()));
            }
        }
        Ok(ControlFlow::Continue(()))
    }

    fn poll_timeout(&self) -> Duration {
        match &self.active {
            None => Fps::from_source_rate(0.0, self.opts.default_fps).frame_interval(),
            Some(_) if self.state.paused => Duration::from_millis(1),
            Some(active) => active.fps.frame_interval(),
        }
    }

    fn apply(
        &mut self,
        intent: Intent,
        presenter: &mut dyn Presenter,
    ) -> PlayerResult<ControlFlow<()>> {
        match intent {
            Intent::Advance => {
                self.navigate(presenter, true)?;
                self.nav.finish_transition();
            }
            Intent::Retreat => {
                self.navigate(presenter, false)?;
                self.nav.finish_transition();
            }
            Intent::SwitchCategory(k) => {
                self.switch_category(k);
                self.nav.finish_transition();
            }
            Intent::TogglePause => {
                self.state.paused = !self.state.paused;
                tracing::info!(paused = self.state.paused, "toggled pause");
            }
            Intent::ToggleUi => {
                self.state.show_ui = !self.state.show_ui;
                self.needs_redraw = true;
                tracing::info!(show_ui = self.state.show_ui, "toggled overlay");
            }
            Intent::Quit => {
                tracing::info!("quit requested");
                self.shutdown();
                return Ok(ControlFlow::Break(()));
            }
        }
        Ok(ControlFlow::Continue(()))
    }

    fn present_with_overlay(
        &mut self,
        presenter: &mut dyn Presenter,
        base: &Frame,
    ) -> PlayerResult<()> {
        let mut out = base.clone();
        let (position, frame_count, fps) = match &self.active {
            Some(a) => (a.position, a.frame_count, a.fps),
            None => (
                FrameIndex(0),
                0,
                Fps::from_source_rate(0.0, self.opts.default_fps),
            ),
        };
        let model = OverlayModel {
            categories: self.library.categories(),
            current_category: self.state.category,
            index: self.state.index,
            total: self.videos.len(),
            position,
            frame_count,
            fps,
            show_ui: self.state.show_ui,
        };
        let buttons = self.overlay.draw(&mut out, &model);
        self.nav.register_buttons(buttons);
        presenter.present(&out)?;
        self.stats.frames_presented += 1;
        Ok(())
    }

    /// Slide to the next (`forward`) or previous video and make it active.
    fn navigate(&mut self, presenter: &mut dyn Presenter, forward: bool) -> PlayerResult<()> {
        let len = self.videos.len();
        let target = if forward {
            self.state.next_index(len)
        } else {
            self.state.prev_index(len)
        };
        let Some(target) = target else {
            tracing::debug!("navigation ignored, no videos in category");
            return Ok(());
        };

        let (mut dest, to) = match self.prepare_destination(target) {
            Ok(prepared) => prepared,
            Err(e) => {
                tracing::warn!(error = %e, "keeping current video");
                self.stats.transitions_aborted += 1;
                return Ok(());
            }
        };
        let from = match &self.last_frame {
            Some(frame) => frame.clone(),
            None => Frame::black(self.opts.canvas.width, self.opts.canvas.height),
        };

        let dir = if forward {
            self.opts.transition.dir()
        } else {
            self.opts.transition.dir().reversed()
        };
        let kind = self.opts.transition.with_dir(dir);
        if let Err(e) = self.play_transition(presenter, kind, &from, &to) {
            dest.release();
            return Err(e);
        }

        if let Some(old) = self.active.take() {
            old.release();
        }
        self.active = Some(ActiveSource::new(dest, self.opts.default_fps));
        self.state.index = target;
        self.state.paused = false;
        self.last_frame = Some(to);
        self.stats.transitions_completed += 1;
        tracing::info!(
            index = target,
            path = %self.videos[target].path.display(),
            "switched video"
        );
        Ok(())
    }

    fn play_transition(
        &mut self,
        presenter: &mut dyn Presenter,
        kind: TransitionKind,
        from: &Frame,
        to: &Frame,
    ) -> PlayerResult<()> {
        let run = self.run;
        for progress in run.progress() {
            let frame = kind.render(from, to, progress)?;
            presenter.present(&frame)?;
            self.stats.transition_frames_presented += 1;
            presenter.delay(self.opts.step_delay);
        }
        Ok(())
    }

    /// Open the video at `target`, read and fit its first frame, then rewind it.
    fn prepare_destination(&mut self, target: usize) -> PlayerResult<(Box<dyn VideoSource>, Frame)> {
        let path = self.videos[target].path.clone();
        let mut source = self
            .backend
            .open(&path)
            .map_err(|e| PlayerError::transition_abort(e.to_string()))?;
        match first_frame(source.as_mut(), self.opts.canvas) {
            Ok(frame) => Ok((source, frame)),
            Err(e) => {
                source.release();
                Err(PlayerError::transition_abort(format!(
                    "'{}': {e}",
                    path.display()
                )))
            }
        }
    }

    fn switch_category(&mut self, k: usize) {
        let Some(category) = self.library.categories().get(k).cloned() else {
            tracing::warn!(category = k, "no such category");
            return;
        };
        let videos = match self.library.load(k, self.backend.as_mut()) {
            Ok(videos) => videos,
            Err(e) => {
                tracing::warn!(category = %category.label, error = %e, "category load failed");
                Vec::new()
            }
        };

        if let Some(old) = self.active.take() {
            old.release();
        }
        self.state.category = k;
        self.state.index = 0;
        self.state.paused = false;
        self.videos = videos;
        self.last_frame = None;
        self.needs_redraw = true;
        self.stats.category_switches += 1;

        let Some(first) = self.videos.first() else {
            tracing::warn!(error = %PlayerError::EmptyCategory(category.label), "playback suspended");
            return;
        };
        match self.backend.open(&first.path) {
            Ok(source) => {
                self.active = Some(ActiveSource::new(source, self.opts.default_fps));
                tracing::info!(category = %category.label, videos = self.videos.len(), "switched category");
            }
            Err(e) => {
                tracing::warn!(category = %category.label, error = %e, "first video failed to open, playback suspended");
            }
        }
    }

    fn shutdown(&mut self) {
        if let Some(active) = self.active.take() {
            active.release();
        }
    }
}

impl Drop for Player {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn first_frame(source: &mut dyn VideoSource, canvas: Canvas) -> PlayerResult<Frame> {
    let raw = source
        .read_frame()?
        .ok_or_else(|| PlayerError::decode("no readable first frame"))?;
    let frame = fit(&raw, canvas)?;
    source.seek_to_start()?;
    Ok(frame)
}
