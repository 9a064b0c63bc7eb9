use super::*;

fn phrase(alternatives: &[&str]) -> RecognizedPhrase {
    RecognizedPhrase {
        alternatives: alternatives.iter().map(|s| s.to_string()).collect(),
    }
}

#[test]
fn default_settings_are_single_shot_fixed_locale() {
    let settings = RecognizerSettings::default();
    assert_eq!(settings.locale, VOICE_LOCALE);
    assert!(!settings.continuous);
    assert!(!settings.interim_results);
}

#[test]
fn started_moves_idle_to_listening() {
    let mut session = VoiceSession::new();
    assert_eq!(session.state(), VoiceState::Idle);

    let action = session.on_event(RecognizerEvent::Started);

    assert_eq!(action, VoiceAction::BeganListening);
    assert_eq!(session.state(), VoiceState::Listening);
}

#[test]
fn result_dispatches_first_alternative_of_first_phrase() {
    let mut session = VoiceSession::new();
    session.on_event(RecognizerEvent::Started);

    let action = session.on_event(RecognizerEvent::Result(vec![
        phrase(&["ligar luz", "ligar uz"]),
        phrase(&["second phrase"]),
    ]));

    assert_eq!(action, VoiceAction::Dispatch("ligar luz".to_string()));
    // The recognizer closes the session with Ended, not the result itself.
    assert_eq!(session.state(), VoiceState::Listening);
}

#[test]
fn empty_result_is_ignored() {
    let mut session = VoiceSession::new();
    session.on_event(RecognizerEvent::Started);

    assert_eq!(
        session.on_event(RecognizerEvent::Result(Vec::new())),
        VoiceAction::None
    );
    assert_eq!(
        session.on_event(RecognizerEvent::Result(vec![phrase(&[])])),
        VoiceAction::None
    );
}

#[test]
fn error_resets_to_idle() {
    let mut session = VoiceSession::new();
    session.on_event(RecognizerEvent::Started);

    let action = session.on_event(RecognizerEvent::Error("no-speech".to_string()));

    assert_eq!(action, VoiceAction::Failed("no-speech".to_string()));
    assert_eq!(session.state(), VoiceState::Idle);
}

#[test]
fn ended_returns_to_idle() {
    let mut session = VoiceSession::new();
    session.on_event(RecognizerEvent::Started);

    assert_eq!(session.on_event(RecognizerEvent::Ended), VoiceAction::Finished);
    assert_eq!(session.state(), VoiceState::Idle);
}

#[test]
fn out_of_order_events_are_ignored_while_idle() {
    let mut session = VoiceSession::new();

    assert_eq!(
        session.on_event(RecognizerEvent::Result(vec![phrase(&["ligar luz"])])),
        VoiceAction::None
    );
    assert_eq!(session.on_event(RecognizerEvent::Ended), VoiceAction::None);
    assert_eq!(session.state(), VoiceState::Idle);
}

#[test]
fn error_before_start_still_surfaces_failure() {
    let mut session = VoiceSession::new();

    let action = session.on_event(RecognizerEvent::Error("not-allowed".to_string()));

    assert_eq!(action, VoiceAction::Failed("not-allowed".to_string()));
    assert_eq!(session.state(), VoiceState::Idle);
}

#[test]
fn full_single_shot_session_round_trip() {
    let mut session = VoiceSession::new();

    assert_eq!(
        session.on_event(RecognizerEvent::Started),
        VoiceAction::BeganListening
    );
    assert_eq!(
        session.on_event(RecognizerEvent::Result(vec![phrase(&["que horas são"])])),
        VoiceAction::Dispatch("que horas são".to_string())
    );
    assert_eq!(session.on_event(RecognizerEvent::Ended), VoiceAction::Finished);
    assert_eq!(session.state(), VoiceState::Idle);
}
