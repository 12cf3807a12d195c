//! Background music collaborator
//!
//! The simulation only asks for the music to start or stop. On the web a
//! pulsing Web Audio drone plays; anywhere audio is unavailable the silent
//! track stands in and the game runs exactly the same.

use crate::sim::GameEvent;

/// Start/stop control over the looping music
pub trait MusicTrack {
    /// Begin playback; calling while already playing does nothing
    fn start(&mut self);
    fn stop(&mut self);
    fn is_playing(&self) -> bool;
}

/// Forward music events from the simulation to a track
pub fn dispatch(track: &mut dyn MusicTrack, event: &GameEvent) {
    match event {
        GameEvent::MusicStart => track.start(),
        GameEvent::MusicStop => track.stop(),
        _ => {}
    }
}

/// Track that only remembers whether it would be playing
#[derive(Debug, Default)]
pub struct SilentTrack {
    playing: bool,
}

impl MusicTrack for SilentTrack {
    fn start(&mut self) {
        self.playing = true;
    }

    fn stop(&mut self) {
        self.playing = false;
    }

    fn is_playing(&self) -> bool {
        self.playing
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::WebAudioTrack;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::MusicTrack;

    /// Beats per second of the volume pulse
    const PULSE_HZ: f32 = 2.0;
    const BASS_HZ: f32 = 110.0;

    /// Live nodes of a playing loop
    struct Voice {
        bass: OscillatorNode,
        pulse: OscillatorNode,
        _gain: GainNode,
    }

    /// Web Audio music loop, silent if no AudioContext could be created
    pub struct WebAudioTrack {
        ctx: Option<AudioContext>,
        voice: Option<Voice>,
        volume: f32,
    }

    impl WebAudioTrack {
        pub fn new(volume: f32) -> Self {
            // May fail outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - music disabled");
            }
            Self {
                ctx,
                voice: None,
                volume: volume.clamp(0.0, 1.0),
            }
        }

        fn create_voice(&self, ctx: &AudioContext) -> Option<Voice> {
            let bass = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;
            bass.set_type(OscillatorType::Square);
            bass.frequency().set_value(BASS_HZ);
            gain.gain().set_value(self.volume * 0.08);
            bass.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            // Low-frequency oscillator wobbling the gain gives the beat
            let pulse = ctx.create_oscillator().ok()?;
            let depth = ctx.create_gain().ok()?;
            pulse.set_type(OscillatorType::Square);
            pulse.frequency().set_value(PULSE_HZ);
            depth.gain().set_value(self.volume * 0.06);
            pulse.connect_with_audio_node(&depth).ok()?;
            depth.connect_with_audio_param(&gain.gain()).ok()?;

            bass.start().ok()?;
            pulse.start().ok()?;
            Some(Voice {
                bass,
                pulse,
                _gain: gain,
            })
        }
    }

    impl MusicTrack for WebAudioTrack {
        fn start(&mut self) {
            if self.voice.is_some() || self.volume <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };

            // Browsers keep the context suspended until a user gesture
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }
            self.voice = self.create_voice(ctx);
        }

        fn stop(&mut self) {
            if let Some(voice) = self.voice.take() {
                voice.bass.stop().ok();
                voice.pulse.stop().ok();
            }
        }

        fn is_playing(&self) -> bool {
            self.voice.is_some()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GamePhase;

    #[test]
    fn test_dispatch_follows_events() {
        let mut track = SilentTrack::default();
        dispatch(&mut track, &GameEvent::MusicStart);
        assert!(track.is_playing());
        // Idempotent start
        dispatch(&mut track, &GameEvent::MusicStart);
        assert!(track.is_playing());
        dispatch(
            &mut track,
            &GameEvent::PhaseChanged {
                from: GamePhase::Playing,
                to: GamePhase::GameOver,
            },
        );
        assert!(track.is_playing());
        dispatch(&mut track, &GameEvent::MusicStop);
        assert!(!track.is_playing());
    }
}
