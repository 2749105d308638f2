use super::*;
use crate::render::{MediaEvent, VideoElement};
use crate::testing::{Call, Journal};

const VIDEO_SECONDS: f64 = 12.0;

fn started(caps: Capabilities) -> (Controller, Journal) {
    let journal = Journal::default();
    let mut controller = Controller::new(caps, journal.collaborators(VIDEO_SECONDS));
    assert_eq!(controller.start(), Startup::Running);
    (controller, journal)
}

fn legacy() -> Capabilities {
    Capabilities {
        legacy_browser: true,
        ..Capabilities::desktop()
    }
}

fn iphone() -> Capabilities {
    Capabilities {
        quirky_mobile: true,
        mobile: true,
        ..Capabilities::desktop()
    }
}

fn android() -> Capabilities {
    Capabilities {
        mobile: true,
        ..Capabilities::desktop()
    }
}

fn is_photosphere(call: &Call) -> bool {
    matches!(call, Call::SetPhotosphere { .. })
}

#[test]
fn missing_graphics_aborts_before_loading() {
    let journal = Journal::default();
    let caps = Capabilities {
        debug: true,
        ..Capabilities::default()
    };
    let mut controller = Controller::new(caps, journal.collaborators(VIDEO_SECONDS));
    assert_eq!(controller.start(), Startup::Aborted);
    assert_eq!(
        journal.error_state(),
        (true, "Error".to_string(), "WebGL not supported.".to_string())
    );
    assert_eq!(journal.count(|c| *c == Call::LoadScene), 0);
    assert!(!controller.stats_active());
}

#[test]
fn start_requests_scene_and_enables_overlay_in_debug() {
    let (controller, journal) = started(Capabilities {
        debug: true,
        ..Capabilities::desktop()
    });
    assert_eq!(journal.count(|c| *c == Call::LoadScene), 1);
    assert_eq!(journal.count(|c| *c == Call::OverlayShow), 1);
    assert!(controller.stats_active());
}

#[test]
fn image_only_scene_sets_photosphere_once() {
    let (mut controller, journal) = started(Capabilities::desktop());
    let scene = SceneDescriptor {
        is_stereo: true,
        yaw: 30.0,
        ..SceneDescriptor::image("pano.jpg")
    };
    controller.handle(HostEvent::SceneLoaded(scene.clone()));

    assert_eq!(journal.count(is_photosphere), 1);
    assert!(journal.calls().contains(&Call::SetPhotosphere {
        source: "pano.jpg".to_string(),
        is_stereo: true,
    }));
    assert_eq!(journal.count(|c| *c == Call::LookDirection(30.0)), 1);
    assert_eq!(controller.loaded_scene(), Some(&scene));

    controller.handle(HostEvent::RenderReady);
    assert_eq!(journal.count(|c| *c == Call::HideLoading), 1);
    assert!(!journal.error_state().0);
}

#[test]
fn look_direction_precedes_media() {
    let (mut controller, journal) = started(Capabilities::desktop());
    controller.handle(HostEvent::SceneLoaded(SceneDescriptor::image("pano.jpg")));
    let look = journal.position(|c| matches!(c, Call::LookDirection(_)));
    let media = journal.position(is_photosphere);
    assert!(look.unwrap() < media.unwrap());
    assert_eq!(journal.count(|c| *c == Call::LookDirection(0.0)), 1);
}

#[test]
fn preview_swaps_to_full_image_exactly_once() {
    let (mut controller, journal) = started(Capabilities::desktop());
    controller.handle(HostEvent::SceneLoaded(SceneDescriptor {
        preview: Some("low.jpg".to_string()),
        image: Some("full.jpg".to_string()),
        is_stereo: true,
        ..SceneDescriptor::default()
    }));
    assert_eq!(
        journal.calls().last(),
        Some(&Call::SetPhotosphere {
            source: "low.jpg".to_string(),
            is_stereo: true,
        })
    );
    assert_eq!(journal.count(is_photosphere), 1);

    // Preview ready: the preview handler is consumed before the full image
    // is requested.
    controller.handle(HostEvent::RenderReady);
    assert_eq!(
        controller.render_ready.peek(),
        Some(&RenderReadyHandler::HideLoading)
    );
    assert_eq!(journal.count(is_photosphere), 2);
    assert_eq!(journal.count(|c| *c == Call::HideLoading), 1);

    // Full image ready: second and last handler invocation.
    controller.handle(HostEvent::RenderReady);
    assert_eq!(journal.count(|c| *c == Call::HideLoading), 2);
    assert!(!controller.render_ready.is_armed());

    // Stray readiness afterwards does nothing.
    controller.handle(HostEvent::RenderReady);
    assert_eq!(journal.count(|c| *c == Call::HideLoading), 2);
    assert_eq!(journal.count(is_photosphere), 2);

    let last_media = journal
        .calls()
        .into_iter()
        .filter(is_photosphere)
        .last();
    assert_eq!(
        last_media,
        Some(Call::SetPhotosphere {
            source: "full.jpg".to_string(),
            is_stereo: true,
        })
    );
}

#[test]
fn preview_without_image_is_shown_instead_of_video() {
    let (mut controller, journal) = started(Capabilities::desktop());
    controller.handle(HostEvent::SceneLoaded(SceneDescriptor {
        preview: Some("low.jpg".to_string()),
        video: Some("v.mp4".to_string()),
        ..SceneDescriptor::default()
    }));
    assert_eq!(
        journal.calls().last(),
        Some(&Call::SetPhotosphere {
            source: "low.jpg".to_string(),
            is_stereo: false,
        })
    );
    assert_eq!(journal.count(|c| matches!(c, Call::CreateVideo(_))), 0);

    // Nothing to swap to: loading hides and the preview stays.
    controller.handle(HostEvent::RenderReady);
    assert_eq!(journal.count(|c| *c == Call::HideLoading), 1);
    assert_eq!(journal.count(is_photosphere), 1);
    assert!(!controller.render_ready.is_armed());
    assert!(journal.videos().is_empty());
}

#[test]
fn legacy_host_refuses_video_without_fallback() {
    let (mut controller, journal) = started(legacy());
    controller.handle(HostEvent::SceneLoaded(SceneDescriptor::video("v.mp4")));

    assert_eq!(
        journal.error_state(),
        (
            true,
            "Error".to_string(),
            "Video is not supported on IE11.".to_string()
        )
    );
    assert_eq!(journal.count(|c| matches!(c, Call::CreateVideo(_))), 0);
    assert!(journal.videos().is_empty());
    assert_eq!(controller.playback().phase(), VideoPhase::Unsupported);
}

#[test]
fn legacy_host_falls_back_to_image() {
    let (mut controller, journal) = started(legacy());
    controller.handle(HostEvent::SceneLoaded(SceneDescriptor {
        video: Some("v.mp4".to_string()),
        image: Some("still.jpg".to_string()),
        ..SceneDescriptor::default()
    }));

    assert_eq!(journal.count(|c| matches!(c, Call::CreateVideo(_))), 0);
    assert!(journal.calls().contains(&Call::SetPhotosphere {
        source: "still.jpg".to_string(),
        is_stereo: false,
    }));
    controller.handle(HostEvent::RenderReady);
    assert_eq!(journal.count(|c| *c == Call::HideLoading), 1);
    assert!(!journal.error_state().0);
}

#[test]
fn video_flow_builds_looping_cross_origin_element() {
    let (mut controller, journal) = started(Capabilities::desktop());
    controller.handle(HostEvent::SceneLoaded(SceneDescriptor::video("v.mp4")));

    assert_eq!(
        journal.count(|c| *c == Call::CreateVideo(crate::render::VideoRequest::looping("v.mp4"))),
        1
    );
    assert_eq!(controller.playback().phase(), VideoPhase::AwaitingCodecReady);
    assert_eq!(journal.count(|c| matches!(c, Call::Set360Video { .. })), 0);
}

#[test]
fn desktop_video_autoplays_once_ready() {
    let (mut controller, journal) = started(Capabilities::desktop());
    controller.handle(HostEvent::SceneLoaded(SceneDescriptor {
        is_stereo: true,
        ..SceneDescriptor::video("v.mp4")
    }));
    controller.handle(HostEvent::VideoReady);

    assert!(journal.calls().contains(&Call::Set360Video {
        source: "v.mp4".to_string(),
        is_stereo: true,
    }));
    assert_eq!(journal.count(|c| *c == Call::Play), 1);
    assert_eq!(journal.count(|c| *c == Call::HideLoading), 1);
    assert_eq!(
        journal.count(|c| *c == Call::Unlisten(MediaEvent::ReadyToPlayThrough)),
        1
    );
    assert_eq!(controller.playback().phase(), VideoPhase::Playing);
    assert!(!controller.playback().force_time_update());

    // Re-fired readiness is dropped.
    controller.handle(HostEvent::VideoReady);
    assert_eq!(journal.count(|c| *c == Call::Play), 1);
    assert_eq!(journal.count(|c| matches!(c, Call::Set360Video { .. })), 1);
}

#[test]
fn quirky_mobile_drives_video_clock_from_frames() {
    let (mut controller, journal) = started(iphone());
    controller.handle(HostEvent::SceneLoaded(SceneDescriptor::video("v.mp4")));
    controller.handle(HostEvent::VideoReady);

    assert!(controller.playback().force_time_update());
    assert_eq!(journal.count(|c| *c == Call::Play), 0);
    assert_eq!(journal.count(|c| *c == Call::HideLoading), 1);
    assert_eq!(controller.playback().phase(), VideoPhase::Playing);

    let video = journal.videos().pop().unwrap();
    let t0 = 1_250.0;
    controller.handle(HostEvent::Frame(t0));
    assert_eq!(controller.playback().start_time(), Some(t0));
    assert_eq!(journal.count(|c| matches!(c, Call::SetCurrentTime(_))), 0);

    for t in [4_000.0, 9_870.5, 15_000.0, 31_333.0] {
        controller.handle(HostEvent::Frame(t));
        let expected = ((t - t0) / 1000.0) % VIDEO_SECONDS;
        assert_eq!(video.borrow().current_time(), expected);
        assert!(journal.calls().contains(&Call::Render(t)));
    }
    assert_eq!(controller.playback().start_time(), Some(t0));
}

#[test]
fn generic_mobile_waits_for_a_single_tap() {
    let (mut controller, journal) = started(android());
    controller.handle(HostEvent::SceneLoaded(SceneDescriptor::video("v.mp4")));

    // Taps before the prompt are not ours to consume.
    controller.handle(HostEvent::Tap);
    controller.handle(HostEvent::VideoReady);

    assert_eq!(journal.count(|c| *c == Call::Play), 0);
    assert_eq!(
        journal.error_state(),
        (true, "Play".to_string(), "Tap to start video".to_string())
    );
    assert_eq!(journal.count(|c| *c == Call::GestureListen), 1);
    assert_eq!(controller.playback().phase(), VideoPhase::AwaitingGesture);

    controller.handle(HostEvent::Tap);
    assert_eq!(journal.count(|c| *c == Call::Play), 1);
    assert_eq!(journal.count(|c| *c == Call::GestureUnlisten), 1);
    assert!(!journal.error_state().0);
    assert_eq!(controller.playback().phase(), VideoPhase::Playing);

    controller.handle(HostEvent::Tap);
    assert_eq!(journal.count(|c| *c == Call::Play), 1);
    assert_eq!(journal.count(|c| *c == Call::GestureUnlisten), 1);
}

#[test]
fn video_error_is_reported_once_and_blocks_readiness() {
    let (mut controller, journal) = started(Capabilities::desktop());
    controller.handle(HostEvent::SceneLoaded(SceneDescriptor::video("v.mp4")));
    controller.handle(HostEvent::VideoFailed("MEDIA_ERR_SRC_NOT_SUPPORTED".to_string()));

    assert_eq!(
        journal.error_state(),
        (true, "Error".to_string(), "Video load error".to_string())
    );
    assert_eq!(journal.count(|c| *c == Call::Unlisten(MediaEvent::LoadError)), 1);

    controller.handle(HostEvent::VideoFailed("again".to_string()));
    assert_eq!(
        journal.count(|c| *c == Call::ErrorMessage("Video load error".to_string())),
        1
    );

    controller.handle(HostEvent::VideoReady);
    assert_eq!(journal.count(|c| *c == Call::Play), 0);
}

#[test]
fn incomplete_scene_fails_without_touching_backend() {
    let (mut controller, journal) = started(Capabilities::desktop());
    controller.handle(HostEvent::SceneLoaded(SceneDescriptor {
        preview: Some("low.jpg".to_string()),
        ..SceneDescriptor::default()
    }));

    assert_eq!(
        journal.error_state(),
        (true, "Error".to_string(), "Scene failed to load".to_string())
    );
    assert_eq!(journal.count(is_photosphere), 0);
    assert_eq!(journal.count(|c| matches!(c, Call::LookDirection(_))), 0);
    assert!(controller.loaded_scene().is_none());
}

#[test]
fn scene_results_are_handled_once() {
    let (mut controller, journal) = started(Capabilities::desktop());
    controller.handle(HostEvent::SceneFailed("404 Not Found".to_string()));
    assert_eq!(
        journal.error_state(),
        (true, "Error".to_string(), "Loader: 404 Not Found".to_string())
    );

    controller.handle(HostEvent::SceneLoaded(SceneDescriptor::image("pano.jpg")));
    assert_eq!(journal.count(is_photosphere), 0);
    assert!(controller.loaded_scene().is_none());
}

#[test]
fn render_failure_is_prefixed() {
    let (mut controller, journal) = started(Capabilities::desktop());
    controller.handle(HostEvent::RenderFailed("texture too large".to_string()));
    assert_eq!(
        journal.error_state(),
        (true, "Error".to_string(), "Render: texture too large".to_string())
    );
}

#[test]
fn failed_preview_surfaces_as_render_failure() {
    let (mut controller, journal) = started(Capabilities::desktop());
    controller.handle(HostEvent::SceneLoaded(SceneDescriptor {
        preview: Some("low.jpg".to_string()),
        image: Some("full.jpg".to_string()),
        ..SceneDescriptor::default()
    }));
    controller.handle(HostEvent::RenderFailed("404".to_string()));

    assert_eq!(journal.error_state().2, "Render: 404");
    assert_eq!(journal.count(is_photosphere), 1);
}

#[test]
fn tick_brackets_render_with_overlay_when_debugging() {
    let (mut controller, journal) = started(Capabilities {
        debug: true,
        ..Capabilities::desktop()
    });
    journal.clear();
    assert_eq!(controller.handle(HostEvent::Frame(16.0)), LoopControl::Continue);
    assert_eq!(
        journal.calls(),
        vec![Call::OverlayBegin, Call::Render(16.0), Call::OverlayEnd]
    );
}

#[test]
fn tick_without_overlay_only_renders() {
    let (mut controller, journal) = started(Capabilities::desktop());
    journal.clear();
    controller.tick(16.0);
    controller.tick(33.0);
    assert_eq!(journal.calls(), vec![Call::Render(16.0), Call::Render(33.0)]);
}

#[test]
fn stopped_loop_stops_rendering() {
    let (mut controller, journal) = started(Capabilities::desktop());
    let handle = controller.loop_handle();
    assert_eq!(controller.tick(1.0), LoopControl::Continue);
    handle.stop();
    assert_eq!(controller.tick(2.0), LoopControl::Stop);
    assert_eq!(journal.count(|c| matches!(c, Call::Render(_))), 1);
}

#[test]
fn report_failure_twice_then_dismiss() {
    let (mut controller, journal) = started(Capabilities::desktop());
    controller.report_failure("first", None);
    controller.report_failure("second", Some("Notice"));
    assert_eq!(
        journal.error_state(),
        (true, "Notice".to_string(), "second".to_string())
    );
    controller.dismiss_failure();
    assert!(!journal.error_state().0);
    assert_eq!(journal.count(|c| *c == Call::HideLoading), 2);
}
