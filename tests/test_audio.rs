use pollo_loco::audio::{AudioCommand, AudioSink, Cue, SoundBank};

#[derive(Default)]
struct Recorder {
    log: Vec<AudioCommand>,
}

impl AudioSink for Recorder {
    fn play(&mut self, cue: Cue, volume: f32) {
        self.log.push(AudioCommand::Play { cue, volume });
    }

    fn pause(&mut self, cue: Cue) {
        self.log.push(AudioCommand::Pause { cue });
    }
}

#[test]
fn loops_do_not_restart_while_playing() {
    let mut bank = SoundBank::new(&[Cue::Walking]);
    bank.play(Cue::Walking);
    bank.play(Cue::Walking);

    assert!(bank.is_playing(Cue::Walking));
    assert_eq!(bank.pending().len(), 1);

    bank.pause(Cue::Walking);
    bank.pause(Cue::Walking);
    bank.play(Cue::Walking);
    assert_eq!(bank.pending().len(), 3);
}

#[test]
fn one_shots_always_fire() {
    let mut bank = SoundBank::new(&[Cue::CollectCoin]);
    for _ in 0..3 {
        bank.play(Cue::CollectCoin);
    }

    assert_eq!(bank.pending().len(), 3);
    assert!(!bank.is_playing(Cue::CollectCoin));
}

#[test]
fn unknown_cues_are_ignored() {
    let mut bank = SoundBank::new(&[Cue::Jump]);
    bank.play(Cue::Win);
    bank.pause(Cue::Snoring);

    assert!(bank.pending().is_empty());
}

#[test]
fn mute_zeroes_and_unmute_restores() {
    let mut bank = SoundBank::new(&[Cue::Theme, Cue::Hurt]);
    bank.set_muted(true);
    assert!(bank.is_muted());
    assert_eq!(bank.volume(Cue::Theme), Some(0.0));

    bank.play(Cue::Hurt);
    bank.set_muted(false);
    assert_eq!(bank.volumes(), vec![(Cue::Theme, 1.0), (Cue::Hurt, 1.0)]);

    let mut sink = Recorder::default();
    bank.drain_into(&mut sink);
    assert_eq!(sink.log, vec![AudioCommand::Play { cue: Cue::Hurt, volume: 0.0 }]);
    assert!(bank.pending().is_empty());
}
