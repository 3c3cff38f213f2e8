use std::path::{Path, PathBuf};

use crate::foundation::error::{PlayerError, PlayerResult};
use crate::render::frame::Frame;

#[derive(Clone, Debug, PartialEq)]
/// Basic metadata about an opened video source.
pub struct VideoSourceInfo {
    /// Path the source was opened from.
    pub source_path: PathBuf,
    /// Display width in pixels (after rotation metadata is applied).
    pub width: u32,
    /// Display height in pixels (after rotation metadata is applied).
    pub height: u32,
    /// Native frame rate as reported by the container. May be `0.0` when unknown.
    pub fps: f64,
    /// Number of frames, `0` when unknown.
    pub frame_count: u64,
}

impl VideoSourceInfo {
    /// Return `true` when the source has a drawable size and at least one frame.
    pub fn is_playable(&self) -> bool {
        self.width > 0 && self.height > 0 && self.frame_count > 0
    }
}

/// An opened, sequentially readable video.
///
/// Frames are decoded at the source's display size; callers fit them to the canvas.
pub trait VideoSource {
    /// Metadata captured at open time.
    fn info(&self) -> &VideoSourceInfo;

    /// Decode the next frame. `Ok(None)` marks end of stream.
    fn read_frame(&mut self) -> PlayerResult<Option<Frame>>;

    /// Rewind so the next [`VideoSource::read_frame`] returns frame 0.
    fn seek_to_start(&mut self) -> PlayerResult<()>;

    /// Release decoder resources. Reads after release fail; releasing twice is a no-op.
    fn release(&mut self);

    /// Number of frames reported at open time.
    fn frame_count(&self) -> u64 {
        self.info().frame_count
    }

    /// Native frame rate reported at open time. Callers substitute a default when `<= 0`.
    fn fps(&self) -> f64 {
        self.info().fps
    }
}

/// Factory for [`VideoSource`]s.
pub trait VideoBackend {
    /// Open `path` for sequential decoding.
    fn open(&mut self, path: &Path) -> PlayerResult<Box<dyn VideoSource>>;
}

/// Video backend driving the system `ffprobe`/`ffmpeg` binaries.
#[derive(Clone, Copy, Debug, Default)]
pub struct FfmpegBackend;

impl FfmpegBackend {
    /// Create the backend. Binaries are looked up on `PATH` at open time.
    pub fn new() -> Self {
        Self
    }
}

impl VideoBackend for FfmpegBackend {
    fn open(&mut self, path: &Path) -> PlayerResult<Box<dyn VideoSource>> {
        let info = probe_video(path)?;
        Ok(Box::new(FfmpegSource::new(info)))
    }
}

/// A video decoded by a child `ffmpeg` process streaming raw `rgb24` frames on stdout.
///
/// The decoder is spawned on the first read, so sources opened only for their metadata never
/// start one.
pub struct FfmpegSource {
    info: VideoSourceInfo,
    decoder: Option<decoder::Decoder>,
    at_end: bool,
    released: bool,
}

impl FfmpegSource {
    fn new(info: VideoSourceInfo) -> Self {
        Self {
            info,
            decoder: None,
            at_end: false,
            released: false,
        }
    }
}

impl VideoSource for FfmpegSource {
    fn info(&self) -> &VideoSourceInfo {
        &self.info
    }

    fn read_frame(&mut self) -> PlayerResult<Option<Frame>> {
        if self.released {
            return Err(PlayerError::decode(format!(
                "read from released source '{}'",
                self.info.source_path.display()
            )));
        }
        if self.at_end {
            return Ok(None);
        }
        if self.decoder.is_none() {
            self.decoder = Some(decoder::Decoder::spawn(&self.info)?);
        }
        let Some(decoder) = self.decoder.as_mut() else {
            return Ok(None);
        };
        match decoder.next_frame(&self.info)? {
            Some(frame) => Ok(Some(frame)),
            None => {
                self.at_end = true;
                if let Some(done) = self.decoder.take() {
                    done.finish(&self.info.source_path);
                }
                Ok(None)
            }
        }
    }

    fn seek_to_start(&mut self) -> PlayerResult<()> {
        if self.released {
            return Err(PlayerError::decode(format!(
                "seek on released source '{}'",
                self.info.source_path.display()
            )));
        }
        if let Some(old) = self.decoder.take() {
            old.kill();
        }
        self.at_end = false;
        Ok(())
    }

    fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        if let Some(decoder) = self.decoder.take() {
            decoder.kill();
        }
        tracing::debug!(path = %self.info.source_path.display(), "released video source");
    }
}

impl Drop for FfmpegSource {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(feature = "media-ffmpeg")]
mod decoder {
    use std::io::Read;
    use std::path::Path;
    use std::process::{Child, ChildStdout, Command, Stdio};

    use crate::assets::media::VideoSourceInfo;
    use crate::foundation::error::{PlayerError, PlayerResult};
    use crate::render::frame::Frame;

    pub(super) struct Decoder {
        child: Child,
        stdout: ChildStdout,
        stderr_drain: std::thread::JoinHandle<std::io::Result<Vec<u8>>>,
    }

    impl Decoder {
        pub(super) fn spawn(info: &VideoSourceInfo) -> PlayerResult<Self> {
            let mut child = Command::new("ffmpeg")
                .args(["-v", "error", "-nostdin", "-i"])
                .arg(&info.source_path)
                .args(["-an", "-sn", "-f", "rawvideo", "-pix_fmt", "rgb24", "pipe:1"])
                .stdin(Stdio::null())
                .stdout(Stdio::piped())
                .stderr(Stdio::piped())
                .spawn()
                .map_err(|e| {
                    PlayerError::open(
                        &info.source_path,
                        format!("failed to spawn ffmpeg (is it installed and on PATH?): {e}"),
                    )
                })?;

            let stdout = child.stdout.take().ok_or_else(|| {
                PlayerError::open(&info.source_path, "failed to open ffmpeg stdout (unexpected)")
            })?;
            let mut stderr = child.stderr.take().ok_or_else(|| {
                PlayerError::open(&info.source_path, "failed to open ffmpeg stderr (unexpected)")
            })?;
            let stderr_drain = std::thread::spawn(move || {
                let mut stderr_bytes = Vec::new();
                stderr.read_to_end(&mut stderr_bytes)?;
                Ok(stderr_bytes)
            });

            Ok(Self {
                child,
                stdout,
                stderr_drain,
            })
        }

        pub(super) fn next_frame(&mut self, info: &VideoSourceInfo) -> PlayerResult<Option<Frame>> {
            let frame_len = info.width as usize * info.height as usize * 3;
            let mut buf = vec![0u8; frame_len];
            match self.stdout.read_exact(&mut buf) {
                Ok(()) => Frame::from_raw(info.width, info.height, buf).map(Some),
                Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => Ok(None),
                Err(e) => Err(PlayerError::decode(format!(
                    "reading frames of '{}' failed: {e}",
                    info.source_path.display()
                ))),
            }
        }

        /// Reap a decoder that reached end of stream, surfacing anything it printed.
        pub(super) fn finish(mut self, path: &Path) {
            drop(self.stdout);
            let status = self.child.wait();
            let stderr = self.stderr_drain.join().ok().and_then(|r| r.ok());
            let msg = stderr
                .map(|b| String::from_utf8_lossy(&b).trim().to_string())
                .unwrap_or_default();
            match status {
                Ok(s) if s.success() && msg.is_empty() => {}
                Ok(s) => tracing::warn!(path = %path.display(), status = %s, stderr = %msg, "ffmpeg decoder ended with diagnostics"),
                Err(e) => tracing::warn!(path = %path.display(), error = %e, "failed to reap ffmpeg decoder"),
            }
        }

        pub(super) fn kill(mut self) {
            let _ = self.child.kill();
            drop(self.stdout);
            let _ = self.child.wait();
            let _ = self.stderr_drain.join();
        }
    }
}

#[cfg(not(feature = "media-ffmpeg"))]
mod decoder {
    use std::path::Path;

    use crate::assets::media::VideoSourceInfo;
    use crate::foundation::error::{PlayerError, PlayerResult};
    use crate::render::frame::Frame;

    pub(super) struct Decoder;

    impl Decoder {
        pub(super) fn spawn(info: &VideoSourceInfo) -> PlayerResult<Self> {
            Err(PlayerError::open(
                &info.source_path,
                "video decoding requires the 'media-ffmpeg' feature",
            ))
        }

        pub(super) fn next_frame(&mut self, _info: &VideoSourceInfo) -> PlayerResult<Option<Frame>> {
            Ok(None)
        }

        pub(super) fn finish(self, _path: &Path) {}

        pub(super) fn kill(self) {}
    }
}

/// Probe source video metadata through `ffprobe`.
#[cfg(feature = "media-ffmpeg")]
pub fn probe_video(source_path: &Path) -> PlayerResult<VideoSourceInfo> {
    #[derive(serde::Deserialize)]
    struct ProbeTags {
        rotate: Option<String>,
    }
    #[derive(serde::Deserialize)]
    struct ProbeSideData {
        rotation: Option<f64>,
    }
    #[derive(serde::Deserialize)]
    struct ProbeStream {
        codec_type: Option<String>,
        width: Option<u32>,
        height: Option<u32>,
        r_frame_rate: Option<String>,
        avg_frame_rate: Option<String>,
        nb_frames: Option<String>,
        tags: Option<ProbeTags>,
        side_data_list: Option<Vec<ProbeSideData>>,
    }
    #[derive(serde::Deserialize)]
    struct ProbeFormat {
        duration: Option<String>,
    }
    #[derive(serde::Deserialize)]
    struct ProbeOut {
        streams: Vec<ProbeStream>,
        format: Option<ProbeFormat>,
    }

    let open_err = |reason: String| PlayerError::open(source_path, reason);

    let out = std::process::Command::new("ffprobe")
        .args([
            "-v",
            "error",
            "-print_format",
            "json",
            "-show_streams",
            "-show_format",
        ])
        .arg(source_path)
        .output()
        .map_err(|e| open_err(format!("failed to run ffprobe: {e}")))?;
    if !out.status.success() {
        return Err(open_err(format!(
            "ffprobe failed: {}",
            String::from_utf8_lossy(&out.stderr).trim()
        )));
    }

    let parsed: ProbeOut = serde_json::from_slice(&out.stdout)
        .map_err(|e| open_err(format!("ffprobe json parse failed: {e}")))?;
    let video_stream = parsed
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("video"))
        .ok_or_else(|| open_err("no video stream found".to_string()))?;
    let coded_width = video_stream
        .width
        .ok_or_else(|| open_err("missing video width from ffprobe".to_string()))?;
    let coded_height = video_stream
        .height
        .ok_or_else(|| open_err("missing video height from ffprobe".to_string()))?;

    let rotation = video_stream
        .side_data_list
        .iter()
        .flatten()
        .find_map(|d| d.rotation)
        .or_else(|| {
            video_stream
                .tags
                .as_ref()
                .and_then(|t| t.rotate.as_deref())
                .and_then(|r| r.trim().parse::<f64>().ok())
        })
        .unwrap_or(0.0);
    let (width, height) = if is_quarter_turn(rotation) {
        (coded_height, coded_width)
    } else {
        (coded_width, coded_height)
    };

    let fps = video_stream
        .r_frame_rate
        .as_deref()
        .and_then(parse_ff_ratio)
        .or_else(|| video_stream.avg_frame_rate.as_deref().and_then(parse_ff_ratio))
        .unwrap_or(0.0);
    let duration_sec = parsed
        .format
        .as_ref()
        .and_then(|f| f.duration.as_ref())
        .and_then(|s| s.parse::<f64>().ok())
        .unwrap_or(0.0);
    let frame_count = video_stream
        .nb_frames
        .as_deref()
        .and_then(|s| s.parse::<u64>().ok())
        .filter(|&n| n > 0)
        .unwrap_or_else(|| (duration_sec * fps).floor().max(0.0) as u64);

    Ok(VideoSourceInfo {
        source_path: source_path.to_path_buf(),
        width,
        height,
        fps,
        frame_count,
    })
}

#[cfg(not(feature = "media-ffmpeg"))]
/// Probe source video metadata through `ffprobe`.
///
/// Returns an error when `media-ffmpeg` feature is disabled.
pub fn probe_video(source_path: &Path) -> PlayerResult<VideoSourceInfo> {
    Err(PlayerError::open(
        source_path,
        "video decoding requires the 'media-ffmpeg' feature",
    ))
}

/// Return `true` when `ffmpeg` and `ffprobe` can be invoked from `PATH`.
pub fn is_ffmpeg_on_path() -> bool {
    ["ffmpeg", "ffprobe"].iter().all(|tool| {
        std::process::Command::new(tool)
            .arg("-version")
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    })
}

fn is_quarter_turn(degrees: f64) -> bool {
    let r = degrees.rem_euclid(360.0).round();
    r == 90.0 || r == 270.0
}

fn parse_ff_ratio(s: &str) -> Option<f64> {
    let mut parts = s.split('/');
    let a = parts.next()?.trim().parse::<u32>().ok()?;
    let b = match parts.next() {
        Some(b) => b.trim().parse::<u32>().ok()?,
        None => 1,
    };
    if a == 0 || b == 0 {
        return None;
    }
    Some(f64::from(a) / f64::from(b))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/media.rs"]
mod tests;
