use crate::app::{EventSink, HostEvent};
use crate::render::{LookDirection, MediaParams, RenderBackend, SharedVideo};
use std::path::Path;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("failed to decode {path}: {source}")]
    Image {
        path: String,
        #[source]
        source: image::ImageError,
    },
    #[error("remote sources are not fetched by the desktop viewer: {0}")]
    Remote(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum VisibleMedia {
    Photosphere {
        source: String,
        width: u32,
        height: u32,
        params: MediaParams,
    },
    Video {
        source: String,
        params: MediaParams,
    },
}

struct Decoded {
    source: String,
    result: Result<(u32, u32), DecodeError>,
}

/// Backend that prepares photospheres off-thread and tracks what is on screen.
///
/// Decode results are picked up on the next `render` call, which is where
/// readiness is reported, so events stay in frame order.
pub struct DecodingBackend<S> {
    events: S,
    decoded_tx: Sender<Decoded>,
    decoded_rx: Receiver<Decoded>,
    pending: Option<(String, MediaParams)>,
    visible: Option<VisibleMedia>,
    video: Option<SharedVideo>,
    look: LookDirection,
    frames_rendered: u64,
    last_frame_ms: Option<f64>,
}

impl<S: EventSink> DecodingBackend<S> {
    pub fn new(events: S) -> Self {
        let (decoded_tx, decoded_rx) = mpsc::channel();
        Self {
            events,
            decoded_tx,
            decoded_rx,
            pending: None,
            visible: None,
            video: None,
            look: LookDirection::default(),
            frames_rendered: 0,
            last_frame_ms: None,
        }
    }

    pub fn visible(&self) -> Option<&VisibleMedia> {
        self.visible.as_ref()
    }

    pub fn look(&self) -> LookDirection {
        self.look
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    fn collect_decoded(&mut self) {
        loop {
            let decoded = match self.decoded_rx.try_recv() {
                Ok(decoded) => decoded,
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            };
            let is_current = matches!(&self.pending, Some((source, _)) if *source == decoded.source);
            if !is_current {
                log::debug!("Dropping stale decode of {}", decoded.source);
                continue;
            }
            let Some((source, params)) = self.pending.take() else {
                continue;
            };
            match decoded.result {
                Ok((width, height)) => {
                    check_aspect(&source, width, height, params);
                    log::info!("Photosphere ready: {} ({}x{})", source, width, height);
                    self.visible = Some(VisibleMedia::Photosphere {
                        source,
                        width,
                        height,
                        params,
                    });
                    self.video = None;
                    self.events.emit(HostEvent::RenderReady);
                }
                Err(err) => {
                    log::warn!("{}", err);
                    self.events.emit(HostEvent::RenderFailed(err.to_string()));
                }
            }
        }
    }
}

impl<S: EventSink> RenderBackend for DecodingBackend<S> {
    fn set_photosphere(&mut self, source: &str, params: MediaParams) {
        self.pending = Some((source.to_string(), params));
        let tx = self.decoded_tx.clone();
        let source = source.to_string();
        std::thread::spawn(move || {
            let result = decode_dimensions(&source);
            // Receiver gone means the viewer is shutting down.
            let _ = tx.send(Decoded { source, result });
        });
    }

    fn set_360_video(&mut self, video: SharedVideo, params: MediaParams) {
        let source = video.borrow().source().to_string();
        log::info!("Showing 360 video {} (stereo: {})", source, params.is_stereo);
        self.pending = None;
        self.visible = Some(VisibleMedia::Video { source, params });
        self.video = Some(video);
    }

    fn set_default_look_direction(&mut self, yaw_degrees: f64) {
        self.look = LookDirection::from_yaw_degrees(yaw_degrees);
        log::debug!(
            "Default look direction yaw={:.1} forward={:?}",
            self.look.yaw_degrees(),
            self.look.forward()
        );
    }

    fn render(&mut self, timestamp_ms: f64) {
        self.collect_decoded();
        if let Some(last) = self.last_frame_ms {
            if timestamp_ms - last > 250.0 {
                log::debug!("Frame hitch: {:.1} ms", timestamp_ms - last);
            }
        }
        self.last_frame_ms = Some(timestamp_ms);
        if let Some(video) = &self.video {
            log::trace!("Video frame at {:.3}s", video.borrow().current_time());
        }
        self.frames_rendered += 1;
    }
}

fn decode_dimensions(source: &str) -> Result<(u32, u32), DecodeError> {
    if source.contains("://") {
        return Err(DecodeError::Remote(source.to_string()));
    }
    let image = image::open(Path::new(source)).map_err(|source_err| DecodeError::Image {
        path: source.to_string(),
        source: source_err,
    })?;
    Ok((image.width(), image.height()))
}

/// Mono equirectangular images are 2:1, top/bottom stereo pairs 1:1.
fn check_aspect(source: &str, width: u32, height: u32, params: MediaParams) {
    if height == 0 {
        return;
    }
    let expected = if params.is_stereo { 1.0 } else { 2.0 };
    let aspect = width as f32 / height as f32;
    if (aspect - expected).abs() > 0.05 {
        log::warn!(
            "{} is {}x{}, expected a {}:1 {} photosphere",
            source,
            width,
            height,
            expected,
            if params.is_stereo { "stereo" } else { "mono" }
        );
    }
}
