use framepace::engine::core::DemoConfig;
use framepace::engine::motion::{MovementTarget, UpdatePhase};
use framepace::engine::platform::PlatformLayer;
use framepace::engine::DemoApp;
use framepace::ui::EDITOR_PACING_CAPTION;
use framepace::{DisplayContext, RefreshRate, SoftwareCap};

fn app_with(display: DisplayContext, config: DemoConfig) -> DemoApp<PlatformLayer> {
    DemoApp::new(config, PlatformLayer::new(display)).unwrap()
}

#[test]
fn ntsc_demo_config_runs_at_half_rate() {
    let config = DemoConfig::from_ron_str(include_str!("../demos/ntsc_half_rate.ron")).unwrap();
    let display = config.display;
    let mut app = app_with(display, config);

    assert_eq!(app.platform().vsync_count(), 2);
    assert_eq!(app.platform().software_cap(), SoftwareCap::Uncapped);
    assert!(app.platform().screen_mode().unwrap().fullscreen);
    assert_eq!(app.pacing().request().target_frame_rate_hz, 30);
    assert_eq!(app.pacing().delivered_rate(), RefreshRate::new(30_000, 1_001));

    app.run().unwrap();
    assert_eq!(app.frames_run(), 60);

    // 60 frames at 29.97 Hz is about two seconds of 50 Hz fixed steps.
    let x = app.scene().position(MovementTarget::EngineCamera).x;
    assert!((x - 8.0).abs() < 0.2, "camera ended at {x}");
    assert_eq!(app.scene().position(MovementTarget::FollowTarget).x, 0.0);
}

#[test]
fn startup_seeds_target_from_display() {
    let display = DisplayContext::runtime(RefreshRate::from_hz(144));
    let app = app_with(display, DemoConfig::default());

    assert_eq!(app.pacing().request().target_frame_rate_hz, 144);
    assert_eq!(app.platform().vsync_count(), 1);
    assert_eq!(app.panel().frame_rate_text(), "144");
}

#[test]
fn editor_host_caps_in_software() {
    let display = DisplayContext::editor(RefreshRate::from_hz(144));
    let mut app = app_with(display, DemoConfig::default());

    assert_eq!(app.platform().software_cap(), SoftwareCap::Hz(144));
    assert_eq!(app.platform().vsync_count(), 0);
    assert_eq!(app.panel().pacing_caption(), Some(EDITOR_PACING_CAPTION));

    let decision = app.edit_frame_rate("60").unwrap();
    assert_eq!(decision.software_cap(), SoftwareCap::Hz(60));
    assert_eq!(app.platform().software_cap(), SoftwareCap::Hz(60));

    app.toggle_system_pacing(true);
    assert!(!app.pacing().request().use_system_pacing);
}

#[test]
fn settings_edits_reach_the_platform() {
    let display = DisplayContext::runtime(RefreshRate::from_hz(60));
    let mut app = app_with(display, DemoConfig::default());

    app.toggle_system_pacing(true);
    assert!(app.panel().frame_rate_field_visible());
    app.edit_frame_rate("45").unwrap();
    assert_eq!(app.platform().software_cap(), SoftwareCap::Hz(45));
    assert_eq!(app.platform().vsync_count(), 0);

    app.toggle_system_pacing(false);
    assert_eq!(app.platform().software_cap(), SoftwareCap::Uncapped);
    assert_eq!(app.platform().vsync_count(), 1);

    let applied = app.platform().applied_count();
    assert!(app.edit_frame_rate("-5").is_err());
    assert_eq!(app.platform().applied_count(), applied);
    assert_eq!(app.pacing().request().target_frame_rate_hz, 45);

    app.edit_resolution_x("2560").unwrap();
    app.edit_resolution_y("1440").unwrap();
    let screen = app.platform().screen_mode().unwrap();
    assert_eq!((screen.width, screen.height), (2560, 1440));
}

#[test]
fn display_switch_recomputes_divisor() {
    let display = DisplayContext::runtime(RefreshRate::from_hz(60));
    let mut app = app_with(display, DemoConfig::default());
    assert_eq!(app.platform().vsync_count(), 1);

    app.platform_mut().set_display(DisplayContext::runtime(RefreshRate::from_hz(120)));
    let decision = app.display_changed();
    assert_eq!(decision.sync_divisor(), 2);
    assert_eq!(app.platform().vsync_count(), 2);
}

#[test]
fn resolution_edit_rereads_display() {
    let display = DisplayContext::runtime(RefreshRate::from_hz(60));
    let mut app = app_with(display, DemoConfig::default());
    assert_eq!(app.platform().vsync_count(), 1);

    app.platform_mut().set_display(DisplayContext::runtime(RefreshRate::from_hz(120)));
    let decision = app.edit_resolution_x("2560").unwrap();
    assert_eq!(decision.sync_divisor(), 2);
    assert_eq!(app.platform().vsync_count(), 2);
    assert_eq!(app.pacing().display().native_refresh_rate, RefreshRate::from_hz(120));

    app.platform_mut().set_display(DisplayContext::runtime(RefreshRate::from_hz(180)));
    let decision = app.edit_resolution_y("1440").unwrap();
    assert_eq!(decision.sync_divisor(), 3);
}

#[test]
fn engine_camera_ignores_camera_updated_phase() {
    let display = DisplayContext::runtime(RefreshRate::from_hz(60));
    let config = DemoConfig {
        update_phase: UpdatePhase::CameraUpdated,
        movement_target: MovementTarget::EngineCamera,
        frames: 60,
        ..DemoConfig::default()
    };
    let mut app = app_with(display, config);
    app.run().unwrap();
    assert_eq!(app.scene().position(MovementTarget::EngineCamera).x, 0.0);

    app.change_movement_target(MovementTarget::VirtualCamera.index()).unwrap();
    for _ in 0..60 {
        app.tick();
    }
    let x = app.scene().position(MovementTarget::VirtualCamera).x;
    assert!((x - 4.0).abs() < 1e-3, "virtual camera ended at {x}");
}

#[test]
fn movement_follows_selected_phase_and_target() {
    let display = DisplayContext::runtime(RefreshRate::from_hz(60));
    let config = DemoConfig {
        frames: 0,
        ..DemoConfig::default()
    };
    let mut app = app_with(display, config);

    app.change_update_phase(0).unwrap();
    app.change_movement_target(0).unwrap();
    assert_eq!(app.motion().phase(), UpdatePhase::Update);
    assert_eq!(app.motion().target(), MovementTarget::Layer);
    assert!(app.change_update_phase(7).is_err());

    for _ in 0..60 {
        app.tick();
    }
    let layer_x = app.scene().position(MovementTarget::Layer).x;
    assert!((layer_x + 4.0).abs() < 1e-3, "layer ended at {layer_x}");
    assert!((app.timing().fps - 60.0).abs() < 1e-3);

    app.restart();
    assert_eq!(app.scene().position(MovementTarget::Layer).x, 0.0);

    app.change_speed(0.9);
    app.tick();
    assert_eq!(app.scene().position(MovementTarget::Layer).x, 0.0);
}

#[test]
fn toggle_key_swaps_panels() {
    let mut app = app_with(DisplayContext::default(), DemoConfig::default());
    assert!(app.panel().settings_visible());
    assert!(app.handle_key('g'));
    assert!(!app.panel().settings_visible());
    assert!(app.panel().current_settings_visible());
}
