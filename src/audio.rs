//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects - no external files needed!

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// First flap of a run
    Start,
    /// Flap
    Jump,
    /// Pipe cleared
    Score,
    /// Hit a pipe or the ground
    Death,
}

impl SoundEffect {
    /// The cue for a simulation event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Started => Some(SoundEffect::Start),
            GameEvent::Jumped => Some(SoundEffect::Jump),
            GameEvent::Scored { .. } => Some(SoundEffect::Score),
            GameEvent::Died { .. } => Some(SoundEffect::Death),
            GameEvent::Restarted => None,
        }
    }

    /// Whether this cue also starts the background loop
    pub fn starts_music(self) -> bool {
        self == SoundEffect::Start
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::SoundEffect;
    use crate::Settings;

    /// Drone level relative to the effects volume
    const MUSIC_LEVEL: f32 = 0.05;

    /// Looping background drone; runs until the page goes away
    struct Music {
        gain: GainNode,
        _voices: Vec<OscillatorNode>,
    }

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        volume: f32,
        music: Option<Music>,
    }

    impl AudioManager {
        pub fn new(settings: &Settings) -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                volume: settings.effective_sfx_volume(),
                music: None,
            }
        }

        pub fn apply_settings(&mut self, settings: &Settings) {
            self.volume = settings.effective_sfx_volume();
            if let Some(music) = &self.music {
                music.gain.gain().set_value(self.volume * MUSIC_LEVEL);
            }
        }

        /// Play a sound effect
        pub fn play(&mut self, effect: SoundEffect) {
            let Some(ctx) = &self.ctx else { return };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            // Started even when muted so unmuting brings it back
            if effect.starts_music() && self.music.is_none() {
                self.music = Self::start_music(ctx, self.volume);
            }

            let vol = self.volume;
            if vol <= 0.0 {
                return;
            }

            match effect {
                SoundEffect::Start => self.play_start(ctx, vol),
                SoundEffect::Jump => self.play_jump(ctx, vol),
                SoundEffect::Score => self.play_score(ctx, vol),
                SoundEffect::Death => self.play_death(ctx, vol),
            }
        }

        // === Sound generators ===

        /// Create an oscillator with gain envelope
        fn create_osc(
            &self,
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        /// Background loop - low fifth with a slow vibrato
        fn start_music(ctx: &AudioContext, vol: f32) -> Option<Music> {
            let gain = ctx.create_gain().ok()?;
            gain.gain().set_value(vol * MUSIC_LEVEL);
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            let mut voices = Vec::new();
            for freq in [110.0, 165.0] {
                let osc = ctx.create_oscillator().ok()?;
                osc.set_type(OscillatorType::Sine);
                osc.frequency().set_value(freq);
                osc.connect_with_audio_node(&gain).ok()?;
                voices.push(osc);
            }

            // 0.25 Hz wobble on the upper voice
            let lfo = ctx.create_oscillator().ok()?;
            let depth = ctx.create_gain().ok()?;
            lfo.frequency().set_value(0.25);
            depth.gain().set_value(3.0);
            lfo.connect_with_audio_node(&depth).ok()?;
            depth.connect_with_audio_param(&voices[1].frequency()).ok()?;
            voices.push(lfo);

            for osc in &voices {
                osc.start().ok()?;
            }
            log::debug!("Background music started");
            Some(Music {
                gain,
                _voices: voices,
            })
        }

        /// Start - quick rising arpeggio
        fn play_start(&self, ctx: &AudioContext, vol: f32) {
            let t = ctx.current_time();
            for (i, freq) in [392.0, 523.0, 659.0].into_iter().enumerate() {
                let Some((osc, gain)) = self.create_osc(ctx, freq, OscillatorType::Square) else {
                    continue;
                };
                let start = t + i as f64 * 0.07;
                gain.gain().set_value_at_time(0.0, t).ok();
                gain.gain().set_value_at_time(vol * 0.15, start).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, start + 0.09)
                    .ok();
                osc.start_with_when(start).ok();
                osc.stop_with_when(start + 0.1).ok();
            }
        }

        /// Flap - short upward chirp
        fn play_jump(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 300.0, OscillatorType::Triangle) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.25, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.12)
                .ok();
            osc.frequency().set_value_at_time(300.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(700.0, t + 0.08)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.15).ok();
        }

        /// Point - two-tone ding
        fn play_score(&self, ctx: &AudioContext, vol: f32) {
            let t = ctx.current_time();

            if let Some((osc, gain)) = self.create_osc(ctx, 988.0, OscillatorType::Sine) {
                gain.gain().set_value_at_time(vol * 0.25, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.1)
                    .ok();
                osc.start().ok();
                osc.stop_with_when(t + 0.1).ok();
            }

            if let Some((osc, gain)) = self.create_osc(ctx, 1319.0, OscillatorType::Sine) {
                gain.gain().set_value_at_time(0.0, t).ok();
                gain.gain().set_value_at_time(vol * 0.25, t + 0.08).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                    .ok();
                osc.start_with_when(t + 0.08).ok();
                osc.stop_with_when(t + 0.3).ok();
            }
        }

        /// Death - thud and falling whine
        fn play_death(&self, ctx: &AudioContext, vol: f32) {
            let t = ctx.current_time();

            // Impact
            if let Some((osc, gain)) = self.create_osc(ctx, 120.0, OscillatorType::Sine) {
                gain.gain().set_value_at_time(vol * 0.5, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.2)
                    .ok();
                osc.frequency().set_value_at_time(120.0, t).ok();
                osc.frequency()
                    .exponential_ramp_to_value_at_time(40.0, t + 0.2)
                    .ok();
                osc.start().ok();
                osc.stop_with_when(t + 0.25).ok();
            }

            // Falling whine
            if let Some((osc, gain)) = self.create_osc(ctx, 600.0, OscillatorType::Sawtooth) {
                gain.gain().set_value_at_time(vol * 0.15, t + 0.1).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.6)
                    .ok();
                osc.frequency().set_value_at_time(600.0, t + 0.1).ok();
                osc.frequency()
                    .exponential_ramp_to_value_at_time(80.0, t + 0.6)
                    .ok();
                osc.start_with_when(t + 0.1).ok();
                osc.stop_with_when(t + 0.65).ok();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_cues() {
        assert_eq!(SoundEffect::for_event(&GameEvent::Started), Some(SoundEffect::Start));
        assert_eq!(SoundEffect::for_event(&GameEvent::Jumped), Some(SoundEffect::Jump));
        assert_eq!(
            SoundEffect::for_event(&GameEvent::Scored { score: 3 }),
            Some(SoundEffect::Score)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::Died { score: 3 }),
            Some(SoundEffect::Death)
        );
        assert_eq!(SoundEffect::for_event(&GameEvent::Restarted), None);
    }

    #[test]
    fn test_only_start_cue_starts_music() {
        assert!(SoundEffect::Start.starts_music());
        assert!(!SoundEffect::Jump.starts_music());
        assert!(!SoundEffect::Score.starts_music());
        assert!(!SoundEffect::Death.starts_music());
    }
}
