use log::{info, warn};
use rodio::{
    Decoder, OutputStream, OutputStreamHandle, Sink, Source,
    source::{Buffered, SineWave},
};
use std::fs::File;
use std::io::BufReader;
use std::rc::Rc;
use std::time::Duration;

use lockstep_invaders::AudioCue;

type Sound = Buffered<Decoder<BufReader<File>>>;

const FIRE_SOUND: &str = "assets/sounds/fire.wav";
const BOOM_SOUND: &str = "assets/sounds/boom.wav";

/// Synthesized stand-in for an effect whose sample is missing
#[derive(Debug, Clone, Copy, PartialEq)]
struct Tone {
    frequency: f32,
    length: Duration,
}

const FIRE_TONE: Tone = Tone {
    frequency: 880.0,
    length: Duration::from_millis(60),
};
const BOOM_TONE: Tone = Tone {
    frequency: 110.0,
    length: Duration::from_millis(150),
};

impl Tone {
    /// Same tone played at `speed`, shifting pitch like sample playback does
    fn at_speed(self, speed: f32) -> Tone {
        Tone {
            frequency: self.frequency * speed,
            ..self
        }
    }
}

/// Output device plus one pre-buffered copy of each effect
struct Output {
    _stream: OutputStream,
    stream_handle: OutputStreamHandle,
}

/// Audio manager for playing sound effects. Effects whose sample failed to
/// load are synthesized; nothing plays without an output device.
pub struct AudioManager {
    output: Option<Output>,
    fire_sound: Option<Sound>,
    boom_sound: Option<Sound>,
}

fn load(path: &str) -> Option<Sound> {
    let decoded = File::open(path)
        .map_err(|err| err.to_string())
        .and_then(|file| Decoder::new(BufReader::new(file)).map_err(|err| err.to_string()));
    match decoded {
        Ok(source) => Some(source.buffered()),
        Err(err) => {
            info!("sound {} not loaded ({}), using a synthesized tone", path, err);
            None
        }
    }
}

impl AudioManager {
    pub fn new() -> Self {
        let output = match OutputStream::try_default() {
            Ok((stream, stream_handle)) => Some(Output {
                _stream: stream,
                stream_handle,
            }),
            Err(err) => {
                warn!("audio disabled: {}", err);
                None
            }
        };

        let (fire_sound, boom_sound) = if output.is_some() {
            (load(FIRE_SOUND), load(BOOM_SOUND))
        } else {
            (None, None)
        };

        Self {
            output,
            fire_sound,
            boom_sound,
        }
    }

    fn play(&self, sound: Option<&Sound>, fallback: Tone, volume: f32, speed: f32) {
        let Some(output) = &self.output else {
            return;
        };
        let sink = match Sink::try_new(&output.stream_handle) {
            Ok(sink) => sink,
            Err(err) => {
                warn!("effect dropped: {}", err);
                return;
            }
        };
        sink.set_volume(volume);
        match sound {
            Some(sound) => sink.append(sound.clone().speed(speed)),
            None => {
                let tone = fallback.at_speed(speed);
                sink.append(SineWave::new(tone.frequency).take_duration(tone.length));
            }
        }
        sink.detach();
    }

    pub fn play_fire_sound(&self) {
        self.play(self.fire_sound.as_ref(), FIRE_TONE, 0.05, 1.0);
    }

    pub fn play_boom(&self, pitch: f32) {
        self.play(self.boom_sound.as_ref(), BOOM_TONE, 0.3, pitch);
    }
}

/// March-step cue cycling through a pitch table, one note per step
pub struct MarchCue {
    audio: Rc<AudioManager>,
    pitches: Vec<f32>,
    index: usize,
}

impl MarchCue {
    pub fn new(audio: Rc<AudioManager>) -> Self {
        Self {
            audio,
            pitches: vec![1.0, 0.94, 0.89, 0.84],
            index: 0,
        }
    }
}

impl AudioCue for MarchCue {
    fn play_boom(&mut self) {
        let Some(pitch) = self.pitches.get(self.index % self.pitches.len().max(1)) else {
            return;
        };
        self.audio.play_boom(*pitch);
        self.index = self.index.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tone_pitch_follows_speed() {
        let low = BOOM_TONE.at_speed(0.84);
        assert!((low.frequency - 92.4).abs() < 1e-3);
        assert_eq!(low.length, BOOM_TONE.length);
        assert_eq!(FIRE_TONE.at_speed(1.0), FIRE_TONE);
    }

    #[test]
    fn test_march_cue_cycles_pitch_table() {
        let mut cue = MarchCue::new(Rc::new(AudioManager::new()));
        for _ in 0..5 {
            cue.play_boom();
        }
        assert_eq!(cue.index, 5);
        assert_eq!(cue.pitches[cue.index % cue.pitches.len()], 0.94);
    }
}
