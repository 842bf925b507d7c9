//! Audio seam between the simulation and whatever actually makes noise.
//!
//! Entities own a [`SoundBank`] with one channel per cue they can trigger.
//! Playing or pausing a cue only records a command; the world drains every
//! bank into an [`AudioSink`] after each tick.  Muting zeroes the volume of
//! every channel and unmuting restores each channel's base volume.

use log::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cue {
    Theme,
    Walking,
    Jump,
    Hurt,
    Dead,
    CollectCoin,
    Snoring,
    BottleBreak,
    ChickenDead,
    SmallChickenDead,
    BossHurt,
    Win,
}

impl Cue {
    /// Looping cues keep running until paused; playing one that is already
    /// running does nothing.
    pub fn is_loop(self) -> bool {
        matches!(self, Cue::Walking | Cue::Snoring)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AudioCommand {
    Play { cue: Cue, volume: f32 },
    Pause { cue: Cue },
}

/// Receiver for drained audio commands.
pub trait AudioSink {
    fn play(&mut self, cue: Cue, volume: f32);
    fn pause(&mut self, cue: Cue);
}

/// Sink that only reports what would have been played.
#[derive(Debug, Default)]
pub struct LogSink;

impl AudioSink for LogSink {
    fn play(&mut self, cue: Cue, volume: f32) {
        debug!("audio: play {:?} at volume {:.1}", cue, volume);
    }

    fn pause(&mut self, cue: Cue) {
        debug!("audio: pause {:?}", cue);
    }
}

#[derive(Clone, Debug)]
struct Channel {
    cue: Cue,
    base_volume: f32,
    volume: f32,
    playing: bool,
}

#[derive(Clone, Debug, Default)]
pub struct SoundBank {
    channels: Vec<Channel>,
    pending: Vec<AudioCommand>,
    muted: bool,
}

impl SoundBank {
    /// A bank with one full-volume channel per cue.
    pub fn new(cues: &[Cue]) -> Self {
        let channels = cues
            .iter()
            .map(|&cue| Channel { cue, base_volume: 1.0, volume: 1.0, playing: false })
            .collect();
        Self { channels, pending: Vec::new(), muted: false }
    }

    pub fn play(&mut self, cue: Cue) {
        let Some(ch) = self.channels.iter_mut().find(|c| c.cue == cue) else {
            return;
        };
        if cue.is_loop() && ch.playing {
            return;
        }
        ch.playing = cue.is_loop();
        self.pending.push(AudioCommand::Play { cue, volume: ch.volume });
    }

    pub fn pause(&mut self, cue: Cue) {
        if let Some(ch) = self.channels.iter_mut().find(|c| c.cue == cue && c.playing) {
            ch.playing = false;
            self.pending.push(AudioCommand::Pause { cue });
        }
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        for ch in &mut self.channels {
            ch.volume = if muted { 0.0 } else { ch.base_volume };
        }
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn is_playing(&self, cue: Cue) -> bool {
        self.channels.iter().any(|c| c.cue == cue && c.playing)
    }

    pub fn volume(&self, cue: Cue) -> Option<f32> {
        self.channels.iter().find(|c| c.cue == cue).map(|c| c.volume)
    }

    /// Current volume of every channel, in registration order.
    pub fn volumes(&self) -> Vec<(Cue, f32)> {
        self.channels.iter().map(|c| (c.cue, c.volume)).collect()
    }

    pub fn drain_into(&mut self, sink: &mut dyn AudioSink) {
        for cmd in self.pending.drain(..) {
            match cmd {
                AudioCommand::Play { cue, volume } => sink.play(cue, volume),
                AudioCommand::Pause { cue } => sink.pause(cue),
            }
        }
    }

    /// Commands recorded since the last drain.
    pub fn pending(&self) -> &[AudioCommand] {
        &self.pending
    }
}

