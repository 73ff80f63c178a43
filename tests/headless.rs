use sound_out::{AudioHost, CpalHost, SoundConfig, SoundError, SoundMode, SoundOut, Token};

fn silent(_: &mut [u8], _: Token) {}

#[test]
fn nosound_never_initializes_cpal() {
    let mut out = SoundOut::new(CpalHost::new(), SoundConfig::from_command_line(["game", "-nosound"]));
    let mode = SoundMode::new(44100, 16, 2).with_buffer_times(100, 500);

    let err = out.configure(mode, silent, Token(0x1234)).unwrap_err();
    assert!(matches!(err, SoundError::NoDevice(_)));
    assert_eq!(err.code(), -2);
    assert!(!out.host().is_initialized());
    assert!(!out.is_open());
    assert!(out.is_paused());
    assert_eq!(out.query_mode(), mode);
}

#[test]
fn invalid_format_is_rejected_before_the_host() {
    let mut out = SoundOut::with_default_host(SoundConfig::default());

    let err = out
        .configure(SoundMode::new(44100, 12, 2), silent, Token(0))
        .unwrap_err();
    assert!(matches!(err, SoundError::InvalidFormat(_)));
    assert_eq!(err.code(), -1);
    assert!(!out.host().is_initialized());
    assert_eq!(out.query_mode(), SoundMode::default());
}

#[test]
fn controls_are_safe_without_a_device() {
    let mut out = SoundOut::with_default_host(SoundConfig::headless());
    out.teardown();
    out.teardown();
    assert!(out.pause().is_ok());
    assert!(out.resume().is_ok());
    assert!(out.clear().is_ok());
    assert!(out.pump().is_ok());
    out.lock_audio();
    out.unlock_audio();
    out.set_current_buffer_time(75);
    assert_eq!(out.query_mode().current_buffer_time_ms, 75);
    assert_eq!(out.position(), 0);
    assert_eq!(out.time_position(), 0);
    assert!(out.is_paused());
}
