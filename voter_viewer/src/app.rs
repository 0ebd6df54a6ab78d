//! Top-level application state.
//!
//! `AppState` owns the Voter, the camera orbit, the jump state machine and
//! the jukebox.  Key presses mutate it between frames; `tick` advances it
//! once per frame; `render` draws it.

use std::fmt::Write as _;
use std::path::PathBuf;
use std::time::Instant;

use glam::{Mat4, Vec3};
use log::{info, warn};
use voter_model::{Canvas, Node, Recorder, Rgb, Voter};

use crate::controls::{Command, KEY_LEGEND};
use crate::error::ViewerError;
use crate::jump::Jump;
use crate::player::{open_audio_output, select_track, AudioOutput, Jukebox, NullOutput, Playlist};
use crate::raster::Rasterizer;
use crate::visualizer::{Visualizer, WIN_H, WIN_W};

/// Height of the ground plane below the camera.
const GROUND_LEVEL: f32 = -5.8;
const GROUND_HALF:  f32 = 10.0;

// ════════════════════════════════════════════════════════════════════════════
// AppConfig
// ════════════════════════════════════════════════════════════════════════════

/// Configuration for the full application.
#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub position: Vec3,
    pub scale:    Vec3,
    pub playlist: Playlist,
    /// Skip opening an audio device.
    pub mute:     bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            position: Vec3::new(0.0, 0.0, -6.0),
            scale:    Vec3::ONE,
            playlist: Playlist::default(),
            mute:     false,
        }
    }
}

impl AppConfig {
    pub fn with_tracks(mut self, track_a: Option<PathBuf>, track_b: Option<PathBuf>) -> Self {
        if let Some(a) = track_a { self.playlist.track_a = a; }
        if let Some(b) = track_b { self.playlist.track_b = b; }
        self
    }
}

// ════════════════════════════════════════════════════════════════════════════
// AppState
// ════════════════════════════════════════════════════════════════════════════

pub struct AppState {
    pub model:  Voter,
    /// Camera orbit about the vertical axis, degrees.  Unbounded.
    view_angle: f32,
    jump:       Jump,
    jukebox:    Jukebox<Box<dyn AudioOutput>>,
    playlist:   Playlist,
}

impl AppState {
    pub fn new(cfg: &AppConfig, output: Box<dyn AudioOutput>) -> Self {
        AppState {
            model:      Voter::new(cfg.position, cfg.scale),
            view_angle: 0.0,
            jump:       Jump::new(),
            jukebox:    Jukebox::new(output),
            playlist:   cfg.playlist.clone(),
        }
    }

    pub fn view_angle(&self) -> f32 { self.view_angle }
    pub fn jump(&self) -> &Jump { &self.jump }
    pub fn jukebox(&self) -> &Jukebox<Box<dyn AudioOutput>> { &self.jukebox }

    // ── process one key press ─────────────────────────────────────────────

    /// Apply a key press at `now`.  Returns false when the key asks to quit.
    pub fn handle_key(&mut self, key: char, now: Instant) -> bool {
        match Command::from_key(key) {
            Some(Command::Quit) => return false,
            Some(Command::RotateView(delta)) => self.view_angle += delta,
            Some(Command::TiltArms(delta)) => {
                self.model.body.left_arm.rotate_by(delta);
                self.model.body.right_arm.rotate_by(-delta);
            }
            Some(Command::Jump) => {
                self.jump.trigger(now);
            }
            None => {}
        }

        self.update_music();
        true
    }

    fn update_music(&mut self) {
        let body = &self.model.body;
        match select_track(body.left_arm.angle(), body.right_arm.angle()) {
            Some(track) => {
                let path = self.playlist.path(track);
                if let Err(e) = self.jukebox.play(path) {
                    warn!("{}", e);
                }
            }
            None => self.jukebox.stop(),
        }
    }

    // ── per-frame ─────────────────────────────────────────────────────────

    /// Sample the jump at `now`, pose the figure, advance its animations.
    pub fn tick(&mut self, now: Instant) {
        let pose = self.jump.sample(now);
        self.model.set_jump(pose.height);
        self.model.body.set_leg_spread(pose.leg_spread);
        self.model.update();
    }

    /// Draw the ground and the figure from the fixed camera.
    pub fn render(&self, canvas: &mut dyn Canvas) {
        let view = Mat4::look_at_rh(Vec3::Z, Vec3::ZERO, Vec3::Y);

        canvas.set_color(Rgb::GROUND);
        let ground = view * Mat4::from_translation(Vec3::new(0.0, GROUND_LEVEL, 0.0));
        canvas.draw_quad(&ground, [
            Vec3::new(-GROUND_HALF, 0.0, -GROUND_HALF),
            Vec3::new(-GROUND_HALF, 0.0, GROUND_HALF),
            Vec3::new(GROUND_HALF, 0.0, GROUND_HALF),
            Vec3::new(GROUND_HALF, 0.0, -GROUND_HALF),
        ]);

        let orbit = view * Mat4::from_rotation_y(self.view_angle.to_radians());
        self.model.render(&orbit, canvas);
    }
}

// ════════════════════════════════════════════════════════════════════════════
// run: the main application loop
// ════════════════════════════════════════════════════════════════════════════

/// Open the window and drive input, animation and drawing until it closes.
pub fn run(cfg: AppConfig) -> Result<(), ViewerError> {
    let output = open_audio_output(cfg.mute);
    let mut app = AppState::new(&cfg, output);
    let mut vis = Visualizer::new()?;
    let mut frame = Rasterizer::new(WIN_W, WIN_H);

    info!("keys: {}", KEY_LEGEND);

    while vis.is_open() {
        // 1. Input mutates the model between frames
        for key in vis.poll_keys() {
            if !app.handle_key(key, Instant::now()) {
                info!("quit requested");
                return Ok(());
            }
        }

        // 2. Per-frame animation.  A tick at the very instant of take-off
        // reads height 0 and lands at once, so it must be sampled after the
        // key press, never with the same `Instant`.
        app.tick(Instant::now());

        // 3. Render
        frame.clear();
        app.render(&mut frame);
        vis.present(&frame)?;
    }

    Ok(())
}

/// Render a single frame headlessly and list the draw calls, one per line.
pub fn dump_frame(cfg: &AppConfig) -> String {
    let mut app = AppState::new(cfg, Box::new(NullOutput::default()));
    app.tick(Instant::now());

    let mut rec = Recorder::default();
    app.render(&mut rec);

    let mut out = String::new();
    for cmd in &rec.commands {
        let _ = writeln!(out, "{}", cmd);
    }
    out
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jump::{trajectory, JumpState};
    use crate::player::tests::{Call, FakeOutput};
    use approx::assert_abs_diff_eq;
    use std::path::Path;
    use std::time::Duration;
    use voter_model::DrawCommand;

    fn make_app() -> (AppState, FakeOutput) {
        let fake = FakeOutput::default();
        let app = AppState::new(&AppConfig::default(), Box::new(fake.clone()));
        (app, fake)
    }

    fn arms(app: &AppState) -> (f32, f32) {
        (app.model.body.left_arm.angle(), app.model.body.right_arm.angle())
    }

    #[test]
    fn w_and_s_tilt_arms_oppositely() {
        let (mut app, _) = make_app();
        let now = Instant::now();
        app.handle_key('w', now);
        assert_eq!(arms(&app), (-85.0, -95.0));
        app.handle_key('s', now);
        app.handle_key('s', now);
        assert_eq!(arms(&app), (-95.0, -85.0));
    }

    #[test]
    fn arms_stay_clamped_under_key_spam() {
        let (mut app, _) = make_app();
        let now = Instant::now();
        for i in 0..500 {
            app.handle_key(if i % 7 < 5 { 'w' } else { 's' }, now);
            let (l, r) = arms(&app);
            assert!((-180.0..=0.0).contains(&l));
            assert!((-180.0..=0.0).contains(&r));
        }
        for _ in 0..100 { app.handle_key('w', now); }
        assert_eq!(arms(&app), (0.0, -180.0));
    }

    #[test]
    fn view_keys_accumulate_without_bound() {
        let (mut app, _) = make_app();
        let now = Instant::now();
        for _ in 0..200 { app.handle_key('d', now); }
        assert_abs_diff_eq!(app.view_angle(), 400.0, epsilon = 1e-3);
        app.handle_key('a', now);
        assert_abs_diff_eq!(app.view_angle(), 398.0, epsilon = 1e-3);
        assert_eq!(arms(&app), (-90.0, -90.0));
    }

    #[test]
    fn right_arm_up_plays_track_a() {
        let (mut app, fake) = make_app();
        app.handle_key('s', Instant::now());
        assert_eq!(arms(&app), (-95.0, -85.0));
        assert_eq!(app.jukebox().current(), Some(Path::new("music/music_1.mp3")));
        assert!(fake.calls.borrow().contains(&Call::Play));
    }

    #[test]
    fn left_arm_up_plays_track_b() {
        let (mut app, _) = make_app();
        app.handle_key('w', Instant::now());
        assert_eq!(app.jukebox().current(), Some(Path::new("music/music_2.mp3")));
    }

    #[test]
    fn level_arms_stop_music() {
        let (mut app, fake) = make_app();
        let now = Instant::now();
        app.handle_key('w', now);
        app.handle_key('s', now);
        assert_eq!(arms(&app), (-90.0, -90.0));
        assert_eq!(app.jukebox().current(), None);
        assert_eq!(fake.calls.borrow().last(), Some(&Call::Stop));
        assert!(!app.jukebox().is_playing());
    }

    #[test]
    fn same_side_keys_do_not_restart_track() {
        let (mut app, fake) = make_app();
        let now = Instant::now();
        app.handle_key('w', now);
        let loads = |f: &FakeOutput| {
            f.calls.borrow().iter().filter(|c| matches!(c, Call::Load(_))).count()
        };
        assert_eq!(loads(&fake), 1);
        app.handle_key('w', now);
        app.handle_key('a', now);
        app.handle_key('j', now);
        assert_eq!(loads(&fake), 1);
    }

    #[test]
    fn missing_track_keeps_previous_music() {
        let fake = FakeOutput::default();
        let cfg = AppConfig::default()
            .with_tracks(None, Some(PathBuf::from("music/missing.mp3")));
        let mut app = AppState::new(&cfg, Box::new(fake.clone()));
        let now = Instant::now();

        app.handle_key('s', now);
        assert_eq!(app.jukebox().current(), Some(Path::new("music/music_1.mp3")));

        // Swing straight to the other side without passing through level.
        app.model.body.left_arm.set_angle(-60.0);
        app.model.body.right_arm.set_angle(-100.0);
        assert!(app.handle_key('a', now));

        assert_eq!(app.jukebox().current(), Some(Path::new("music/music_1.mp3")));
        assert!(app.jukebox().is_playing());
    }

    #[test]
    fn any_key_restarts_finished_track() {
        let (mut app, fake) = make_app();
        let now = Instant::now();
        app.handle_key('w', now);
        *fake.playing.borrow_mut() = false;
        let before = fake.calls.borrow().len();

        assert!(app.handle_key('x', now));
        let calls = fake.calls.borrow();
        assert!(calls[before..].contains(&Call::Play));
        assert_eq!(calls[before], Call::Load(PathBuf::from("music/music_2.mp3")));
        assert!(app.jukebox().is_playing());
    }

    #[test]
    fn tick_at_take_off_instant_lands() {
        let (mut app, _) = make_app();
        let t0 = Instant::now();
        app.handle_key('j', t0);
        app.tick(t0);
        assert!(!app.jump().is_jumping());
        assert_eq!(app.model.jump(), 0.0);
    }

    #[test]
    fn jump_key_is_idempotent_midair() {
        let (mut app, _) = make_app();
        let t0 = Instant::now();
        app.handle_key('j', t0);
        app.handle_key('j', t0 + Duration::from_millis(300));
        assert_eq!(app.jump().state(), JumpState::Jumping { started: t0 });
    }

    #[test]
    fn tick_feeds_jump_into_model() {
        let (mut app, _) = make_app();
        let t0 = Instant::now();
        app.handle_key('j', t0);
        app.tick(t0 + Duration::from_millis(250));

        let expected = trajectory(0.25);
        assert_abs_diff_eq!(app.model.jump(), expected.height, epsilon = 1e-4);
        let body = &app.model.body;
        assert_abs_diff_eq!(body.right_leg.angle(), expected.leg_spread, epsilon = 1e-4);
        assert_eq!(body.left_leg.angle(), -body.right_leg.angle());
    }

    #[test]
    fn landing_resets_model() {
        let (mut app, _) = make_app();
        let t0 = Instant::now();
        app.handle_key('j', t0);
        app.tick(t0 + Duration::from_millis(600));
        assert!(app.model.jump() > 0.0);
        app.tick(t0 + Duration::from_millis(1100));
        assert_eq!(app.model.jump(), 0.0);
        assert_eq!(app.model.body.leg_spread(), 0.0);
        assert!(!app.jump().is_jumping());
    }

    #[test]
    fn legs_mirror_every_frame() {
        let (mut app, _) = make_app();
        let t0 = Instant::now();
        app.handle_key('j', t0);
        for ms in (16..1200).step_by(16) {
            app.tick(t0 + Duration::from_millis(ms));
            let body = &app.model.body;
            assert_eq!(body.left_leg.angle(), -body.right_leg.angle());
            assert!(app.model.jump() >= 0.0);
        }
    }

    #[test]
    fn render_draws_ground_first() {
        let (app, _) = make_app();
        let mut rec = Recorder::default();
        app.render(&mut rec);
        assert_eq!(rec.commands[0], DrawCommand::Color(Rgb::GROUND));
        assert!(matches!(rec.commands[1], DrawCommand::Quad { .. }));
        let origin = rec.commands[1].origin().unwrap();
        assert_abs_diff_eq!(origin.y, GROUND_LEVEL, epsilon = 1e-5);
    }

    #[test]
    fn view_orbit_moves_figure_not_ground() {
        let (mut app, _) = make_app();
        let mut before = Recorder::default();
        app.render(&mut before);
        for _ in 0..45 { app.handle_key('d', Instant::now()); }
        let mut after = Recorder::default();
        app.render(&mut after);

        assert_eq!(before.commands[1], after.commands[1]);
        // Head centre at (0, 0, -7) in camera space orbits a quarter turn.
        let head_before = before.commands[3].origin().unwrap();
        let head_after = after.commands[3].origin().unwrap();
        assert_abs_diff_eq!(head_before.z, -7.0, epsilon = 1e-4);
        assert_abs_diff_eq!(head_after.x, -6.0, epsilon = 1e-3);
        assert_abs_diff_eq!(head_after.z, -1.0, epsilon = 1e-3);
    }

    #[test]
    fn quit_key_stops_loop() {
        let (mut app, _) = make_app();
        assert!(!app.handle_key('q', Instant::now()));
        assert!(app.handle_key('x', Instant::now()));
    }

    #[test]
    fn dump_lists_every_primitive() {
        let text = dump_frame(&AppConfig::default());
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].starts_with("color"));
        assert!(lines[1].starts_with("quad"));
        // ground + head(4 spheres) + torso + 2 arms × (4 cubes + flag) + 2 legs × 4 cubes
        let prims = lines.iter()
            .filter(|l| l.starts_with("quad") || l.starts_with("cube") || l.starts_with("sphere"))
            .count();
        assert_eq!(prims, 1 + 4 + 1 + 10 + 8);
    }
}
