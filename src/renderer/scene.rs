//! Frame composition
//!
//! Turns the current `GameState` into one triangle list, back to front:
//! sky, parallax stripes, floor, finish line, obstacles, player, effects.

use glam::Vec2;

use super::shapes;
use super::vertex::{
    Vertex,
    colors::{self, fade},
};
use crate::consts::*;
use crate::persistence::Background;
use crate::settings::Settings;
use crate::sim::{
    CubeFragment, FinishLine, GameState, Obstacle, ObstacleKind, Particle, Player, ShapeKind,
};

/// Spacing of the parallax stripes
const STRIPE_SPACING: f32 = 240.0;
const STRIPE_WIDTH: f32 = 80.0;
/// Height of one finish-line checker cell
const CHECKER_CELL: f32 = 20.0;
const FLOOR_LINE_THICKNESS: f32 = 3.0;

/// Build every vertex for the current frame
pub fn build_scene(state: &GameState, settings: &Settings) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(4096);
    let background = state.progress.background();
    let segments = settings.quality.circle_segments();

    let (bg_offset, floor_offset) = state
        .session
        .as_ref()
        .map(|s| (s.clock.background_offset, s.clock.floor_offset))
        .unwrap_or((0.0, 0.0));

    draw_background(&mut vertices, background, bg_offset);
    draw_floor(&mut vertices, background, floor_offset);

    let Some(session) = &state.session else {
        return vertices;
    };

    if let Some(finish) = &session.finish_line {
        draw_finish_line(&mut vertices, finish);
    }
    for obstacle in &session.obstacles {
        draw_obstacle(&mut vertices, obstacle, segments);
    }
    if !session.player.exploded {
        draw_player(&mut vertices, &session.player, settings.quality.glow_enabled(), segments);
    }
    for fragment in &session.fragments {
        draw_fragment(&mut vertices, fragment);
    }
    // Newest sparks win when the preset caps what is drawn
    for particle in session.particles.iter().rev().take(settings.max_particles()) {
        draw_particle(&mut vertices, particle);
    }

    vertices
}

fn draw_background(out: &mut Vec<Vertex>, background: &Background, offset: f32) {
    out.extend(shapes::gradient_rect(
        Vec2::ZERO,
        Vec2::new(PLAYFIELD_WIDTH, GROUND_Y),
        background.sky_top,
        background.sky_bottom,
    ));

    let shift = offset.rem_euclid(STRIPE_SPACING);
    let mut x = -shift;
    while x < PLAYFIELD_WIDTH {
        out.extend(shapes::gradient_rect(
            Vec2::new(x, 0.0),
            Vec2::new(STRIPE_WIDTH, GROUND_Y),
            fade(background.stripe, 0.0),
            background.stripe,
        ));
        x += STRIPE_SPACING;
    }
}

fn draw_floor(out: &mut Vec<Vertex>, background: &Background, offset: f32) {
    out.extend(shapes::rect(
        Vec2::new(0.0, GROUND_Y),
        Vec2::new(PLAYFIELD_WIDTH, FLOOR_HEIGHT),
        background.floor,
    ));

    // Tick marks moving with the course
    let mut x = -offset.rem_euclid(FLOOR_TILE);
    while x < PLAYFIELD_WIDTH {
        out.extend(shapes::rect(
            Vec2::new(x, GROUND_Y),
            Vec2::new(2.0, FLOOR_HEIGHT),
            fade(background.floor_line, 0.25),
        ));
        x += FLOOR_TILE;
    }

    out.extend(shapes::rect(
        Vec2::new(0.0, GROUND_Y),
        Vec2::new(PLAYFIELD_WIDTH, FLOOR_LINE_THICKNESS),
        background.floor_line,
    ));
}

fn draw_finish_line(out: &mut Vec<Vertex>, finish: &FinishLine) {
    let cell = Vec2::new(finish.width / 2.0, CHECKER_CELL);
    let rows = (GROUND_Y / CHECKER_CELL).ceil() as usize;
    for row in 0..rows {
        for col in 0..2 {
            let color = if (row + col) % 2 == 0 {
                colors::FINISH_LIGHT
            } else {
                colors::FINISH_DARK
            };
            let min = Vec2::new(finish.x + col as f32 * cell.x, row as f32 * cell.y);
            out.extend(shapes::rect(min, cell, color));
        }
    }
}

fn draw_obstacle(out: &mut Vec<Vertex>, obstacle: &Obstacle, segments: u32) {
    let size = obstacle.size();
    match obstacle.kind {
        ObstacleKind::Block => {
            out.extend(shapes::rect(obstacle.pos, size, colors::BLOCK_EDGE));
            out.extend(shapes::rect(
                obstacle.pos + Vec2::splat(3.0),
                size - Vec2::splat(6.0),
                colors::BLOCK,
            ));
        }
        ObstacleKind::Spike | ObstacleKind::TripleSpike => {
            let count = (size.x / SPIKE_WIDTH).round() as usize;
            for i in 0..count {
                let base = Vec2::new(obstacle.pos.x + i as f32 * SPIKE_WIDTH, GROUND_Y);
                out.extend(shapes::spike(base, SPIKE_WIDTH, SPIKE_HEIGHT, colors::SPIKE));
            }
        }
        ObstacleKind::Saw { rotation } => {
            out.extend(shapes::saw_blade(
                obstacle.center(),
                SAW_RADIUS,
                rotation,
                colors::SAW,
                colors::SAW_HUB,
                segments,
            ));
        }
    }
}

fn draw_player(out: &mut Vec<Vertex>, player: &Player, glow: bool, segments: u32) {
    let center = player.center();
    if glow {
        out.extend(shapes::glow(
            player.shape,
            center,
            player.size,
            player.rotation,
            player.color,
            segments,
        ));
    }
    out.extend(shapes::shape(
        player.shape,
        center,
        player.size,
        player.rotation,
        player.color,
        segments,
    ));
}

fn draw_fragment(out: &mut Vec<Vertex>, fragment: &CubeFragment) {
    let center = fragment.pos + Vec2::splat(fragment.size / 2.0);
    out.extend(shapes::shape(
        ShapeKind::Square,
        center,
        fragment.size,
        fragment.rotation,
        fade(fragment.color, fragment.life),
        4,
    ));
}

fn draw_particle(out: &mut Vec<Vertex>, particle: &Particle) {
    out.extend(shapes::rect(
        particle.pos - Vec2::splat(particle.size / 2.0),
        Vec2::splat(particle.size),
        fade(particle.color, particle.life),
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::Progress;
    use crate::settings::QualityPreset;
    use crate::sim::{Command, GamePhase};

    fn fresh_state() -> GameState {
        GameState::new(3, Progress::default())
    }

    fn playing_state() -> GameState {
        let mut state = fresh_state();
        state.apply(Command::OpenLevelSelect, 0.0);
        state.apply(Command::StartLevel(1), 0.0);
        assert_eq!(state.phase, GamePhase::Playing);
        state
    }

    #[test]
    fn test_menu_scene_is_background_only() {
        let state = fresh_state();
        let settings = Settings::default();
        let menu = build_scene(&state, &settings);
        assert!(!menu.is_empty());
        assert_eq!(menu.len() % 3, 0);

        let playing = playing_state();
        assert!(build_scene(&playing, &settings).len() > menu.len());
    }

    #[test]
    fn test_exploded_player_not_drawn() {
        let settings = Settings::default();
        let mut state = playing_state();
        let alive = build_scene(&state, &settings).len();

        if let Some(session) = state.session.as_mut() {
            session.player.exploded = true;
        }
        let gone = build_scene(&state, &settings).len();
        assert!(gone < alive);
    }

    #[test]
    fn test_scene_stays_in_playfield_vertically() {
        let settings = Settings::default();
        let state = playing_state();
        let (min, max) = shapes::bounds(&build_scene(&state, &settings)).unwrap();
        assert!(min.y >= 0.0);
        assert!(max.y <= PLAYFIELD_HEIGHT);
    }

    #[test]
    fn test_finish_line_checker_alternates() {
        let mut out = Vec::new();
        draw_finish_line(&mut out, &FinishLine::new(600.0));
        // Six vertices per cell, two cells per row
        assert_eq!(out.len(), (GROUND_Y / CHECKER_CELL).ceil() as usize * 12);
        assert_eq!(out[0].color, colors::FINISH_LIGHT);
        assert_eq!(out[6].color, colors::FINISH_DARK);
    }

    #[test]
    fn test_particle_settings_only_affect_drawing() {
        let mut state = playing_state();
        state.apply(Command::Jump, 0.0);
        let sparks = state.session.as_ref().unwrap().particles.len();
        assert_eq!(sparks, JUMP_BURST);

        let shown = Settings::default();
        let hidden = Settings {
            particles: false,
            ..Settings::default()
        };
        let with = build_scene(&state, &shown).len();
        let without = build_scene(&state, &hidden).len();
        // Six vertices per particle quad
        assert_eq!(with - without, sparks * 6);
        assert_eq!(state.session.as_ref().unwrap().particles.len(), JUMP_BURST);
    }

    #[test]
    fn test_low_preset_caps_drawn_particles() {
        let mut state = playing_state();
        let mut rng = rand_pcg::Pcg32::new(1, 1);
        let cap = QualityPreset::Low.max_particles();
        state
            .session
            .as_mut()
            .unwrap()
            .burst(Vec2::new(100.0, 100.0), cap + 40, [1.0; 4], 1.0, &mut rng);

        let low = Settings::from_preset(QualityPreset::Low);
        let none = Settings {
            particles: false,
            ..low.clone()
        };
        let drawn = build_scene(&state, &low).len() - build_scene(&state, &none).len();
        assert_eq!(drawn, cap * 6);
    }

    #[test]
    fn test_faded_particles_are_translucent() {
        let mut out = Vec::new();
        let particle = Particle {
            pos: Vec2::new(10.0, 10.0),
            vel: Vec2::ZERO,
            size: 4.0,
            color: [1.0, 1.0, 1.0, 1.0],
            life: 0.5,
        };
        draw_particle(&mut out, &particle);
        assert!(out.iter().all(|v| (v.color[3] - 0.5).abs() < 1e-6));
    }
}
