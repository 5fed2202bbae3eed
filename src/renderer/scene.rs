//! Draw-list generation
//!
//! Turns a `GameState` into an ordered list of sprite draws. This is the
//! whole of the rendering logic; backends only know how to blit a sprite or
//! fill its fallback rectangle.

use glam::Vec2;

use crate::Settings;
use crate::consts::*;
use crate::sim::{GamePhase, GameState};

/// Every image the game draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteId {
    Background,
    PipeTop,
    PipeBottom,
    Ground,
    /// Flap animation frame
    Bird(u8),
    /// Score digit 0-9
    Digit(u8),
    StartOverlay,
    GameOverOverlay,
}

impl SpriteId {
    /// Every sprite, for preloading
    pub fn all() -> impl Iterator<Item = SpriteId> {
        [
            SpriteId::Background,
            SpriteId::PipeTop,
            SpriteId::PipeBottom,
            SpriteId::Ground,
            SpriteId::StartOverlay,
            SpriteId::GameOverOverlay,
        ]
        .into_iter()
        .chain((0..BIRD_FRAMES).map(SpriteId::Bird))
        .chain((0..10).map(SpriteId::Digit))
    }

    /// Image path relative to the page
    pub fn asset_path(&self) -> String {
        match self {
            SpriteId::Background => "img/bg.png".to_string(),
            SpriteId::PipeTop => "img/pipeTop.png".to_string(),
            SpriteId::PipeBottom => "img/pipeBottom.png".to_string(),
            SpriteId::Ground => "img/ground.png".to_string(),
            SpriteId::Bird(frame) => format!("img/bird/{}.png", frame),
            SpriteId::Digit(digit) => format!("img/score/{}.png", digit),
            SpriteId::StartOverlay => "img/start.png".to_string(),
            SpriteId::GameOverOverlay => "img/gameover.png".to_string(),
        }
    }
}

/// One sprite draw
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCommand {
    pub sprite: SpriteId,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Clockwise rotation about the sprite center (radians)
    pub rotation: f32,
    /// CSS colour to fill the rectangle with if the image is not loaded yet
    pub fallback: Option<&'static str>,
}

impl DrawCommand {
    fn new(sprite: SpriteId, pos: Vec2, size: Vec2) -> Self {
        Self {
            sprite,
            pos,
            size,
            rotation: 0.0,
            fallback: None,
        }
    }

    fn with_fallback(mut self, color: &'static str) -> Self {
        self.fallback = Some(color);
        self
    }

    fn rotated(mut self, radians: f32) -> Self {
        self.rotation = radians;
        self
    }
}

const SKY_COLOR: &str = "#70c5ce";
const PIPE_COLOR: &str = "green";
const BIRD_COLOR: &str = "yellow";

/// Build the frame, back to front
///
/// Before the first flap only the sky, ground, bird and title overlay are
/// drawn. During and after a run: sky, pipes, ground, bird, score, and the
/// game-over overlay once the bird is dead.
pub fn build_scene(state: &GameState, settings: &Settings) -> Vec<DrawCommand> {
    let screen = Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT);
    let mut cmds = Vec::with_capacity(8 + state.obstacles.len() * 2);

    cmds.push(DrawCommand::new(SpriteId::Background, Vec2::ZERO, screen).with_fallback(SKY_COLOR));

    let started = state.phase != GamePhase::NotStarted;
    if started {
        push_pipes(&mut cmds, state);
    }
    push_ground(&mut cmds, state);
    cmds.push(bird(state, settings));

    if started {
        cmds.extend(score_digits(state.score));
    }

    match state.phase {
        GamePhase::NotStarted => {
            cmds.push(DrawCommand::new(SpriteId::StartOverlay, Vec2::ZERO, screen));
        }
        GamePhase::Ended | GamePhase::RestartReady => {
            cmds.push(DrawCommand::new(SpriteId::GameOverOverlay, Vec2::ZERO, screen));
        }
        GamePhase::Running => {}
    }

    cmds
}

fn push_pipes(cmds: &mut Vec<DrawCommand>, state: &GameState) {
    let size = Vec2::new(PIPE_WIDTH, PIPE_HEIGHT);
    for obstacle in &state.obstacles {
        let top = Vec2::new(obstacle.x, obstacle.top_bottom - PIPE_HEIGHT);
        let bottom = Vec2::new(obstacle.x, obstacle.top_bottom + state.tuning.pipe_gap);
        cmds.push(DrawCommand::new(SpriteId::PipeTop, top, size).with_fallback(PIPE_COLOR));
        cmds.push(DrawCommand::new(SpriteId::PipeBottom, bottom, size).with_fallback(PIPE_COLOR));
    }
}

/// Two tiles side by side cover the strip at any scroll offset
fn push_ground(cmds: &mut Vec<DrawCommand>, state: &GameState) {
    let tile = state.tuning.ground_tile_width;
    let size = Vec2::new(tile, GROUND_HEIGHT);
    for offset in [0.0, tile] {
        let pos = Vec2::new(state.ground_x + offset, FLOOR_Y);
        cmds.push(DrawCommand::new(SpriteId::Ground, pos, size));
    }
}

fn bird(state: &GameState, settings: &Settings) -> DrawCommand {
    let frame = ((state.time_ticks / BIRD_FRAME_TICKS) % BIRD_FRAMES as u64) as u8;
    // Nose-up is a counter-clockwise turn on screen
    let rotation = if settings.reduced_motion {
        0.0
    } else {
        -state.avatar.tilt_degrees().to_radians()
    };
    DrawCommand::new(SpriteId::Bird(frame), state.avatar.pos, state.avatar.size)
        .with_fallback(BIRD_COLOR)
        .rotated(rotation)
}

/// Score digits, centered horizontally near the top
pub fn score_digits(score: u32) -> Vec<DrawCommand> {
    let digits = score.to_string();
    let total_width = digits.len() as f32 * DIGIT_WIDTH;
    let start_x = (SCREEN_WIDTH - total_width) / 2.0;
    digits
        .bytes()
        .enumerate()
        .map(|(i, b)| {
            let pos = Vec2::new(start_x + i as f32 * DIGIT_WIDTH, SCORE_Y);
            DrawCommand::new(
                SpriteId::Digit(b - b'0'),
                pos,
                Vec2::new(DIGIT_WIDTH, DIGIT_HEIGHT),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Obstacle;

    fn sprites(cmds: &[DrawCommand]) -> Vec<SpriteId> {
        cmds.iter().map(|c| c.sprite).collect()
    }

    #[test]
    fn test_title_screen_layers() {
        let state = GameState::new(1);
        let cmds = build_scene(&state, &Settings::default());
        assert_eq!(
            sprites(&cmds),
            vec![
                SpriteId::Background,
                SpriteId::Ground,
                SpriteId::Ground,
                SpriteId::Bird(0),
                SpriteId::StartOverlay,
            ]
        );
    }

    #[test]
    fn test_running_layers() {
        let mut state = GameState::new(1);
        state.phase = GamePhase::Running;
        state.score = 12;
        state.obstacles = vec![Obstacle::new(200.0, 100.0)];
        let cmds = build_scene(&state, &Settings::default());
        assert_eq!(
            sprites(&cmds),
            vec![
                SpriteId::Background,
                SpriteId::PipeTop,
                SpriteId::PipeBottom,
                SpriteId::Ground,
                SpriteId::Ground,
                SpriteId::Bird(0),
                SpriteId::Digit(1),
                SpriteId::Digit(2),
            ]
        );
        assert_eq!(cmds[1].pos, Vec2::new(200.0, 100.0 - PIPE_HEIGHT));
        assert_eq!(cmds[2].pos, Vec2::new(200.0, 250.0));
        assert_eq!(cmds[1].fallback, Some("green"));
    }

    #[test]
    fn test_game_over_overlay() {
        let mut state = GameState::new(1);
        state.phase = GamePhase::RestartReady;
        let cmds = build_scene(&state, &Settings::default());
        assert_eq!(cmds.last().map(|c| c.sprite), Some(SpriteId::GameOverOverlay));
    }

    #[test]
    fn test_ground_tiles_follow_scroll() {
        let mut state = GameState::new(1);
        state.ground_x = -30.0;
        let cmds = build_scene(&state, &Settings::default());
        let ground: Vec<_> = cmds.iter().filter(|c| c.sprite == SpriteId::Ground).collect();
        assert_eq!(ground[0].pos, Vec2::new(-30.0, FLOOR_Y));
        assert_eq!(ground[1].pos, Vec2::new(402.0, FLOOR_Y));
    }

    #[test]
    fn test_bird_animation_and_tilt() {
        let mut state = GameState::new(1);
        state.time_ticks = 12;
        state.avatar.velocity = 5.0;
        let cmds = build_scene(&state, &Settings::default());
        let bird = cmds.iter().find(|c| matches!(c.sprite, SpriteId::Bird(_))).unwrap();
        assert_eq!(bird.sprite, SpriteId::Bird(2));
        // Falling at 5 px/tick dives 30 degrees (clockwise on screen)
        assert!((bird.rotation - 30f32.to_radians()).abs() < 1e-5);
        assert_eq!(bird.fallback, Some("yellow"));

        let calm = Settings {
            reduced_motion: true,
            ..Settings::default()
        };
        let cmds = build_scene(&state, &calm);
        let bird = cmds.iter().find(|c| matches!(c.sprite, SpriteId::Bird(_))).unwrap();
        assert_eq!(bird.rotation, 0.0);
    }

    #[test]
    fn test_score_digits_centered() {
        let digits = score_digits(305);
        assert_eq!(digits.len(), 3);
        assert_eq!(digits[0].pos, Vec2::new(180.0, 20.0));
        assert_eq!(digits[1].sprite, SpriteId::Digit(0));
        assert_eq!(digits[2].pos.x, 228.0);
    }

    #[test]
    fn test_every_sprite_has_a_path() {
        let paths: Vec<_> = SpriteId::all().map(|s| s.asset_path()).collect();
        assert_eq!(paths.len(), 6 + 8 + 10);
        assert!(paths.contains(&"img/bird/7.png".to_string()));
        assert!(paths.contains(&"img/score/9.png".to_string()));
    }
}
