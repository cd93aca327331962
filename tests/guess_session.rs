// Guess session state machine: attempt budget, matching and terminal outcomes.

use bollydle::{Error, GuessAttempt, GuessEvent, GuessSession, MAX_ATTEMPTS, Outcome};

#[test]
fn exact_title_in_any_casing_wins_on_first_match() {
    for guess in [
        "Kabhi Khushi Kabhie Gham",
        "kabhi khushi kabhie gham",
        "KABHI KHUSHI KABHIE GHAM",
    ] {
        let mut s = GuessSession::new("Kabhi Khushi Kabhie Gham", MAX_ATTEMPTS);
        s.submit_guess("Kal Ho Naa Ho").unwrap();
        s.skip().unwrap();
        let event = s.submit_guess(guess).unwrap();
        assert_eq!(
            event,
            GuessEvent::Won {
                answer: "Kabhi Khushi Kabhie Gham".into()
            }
        );
        assert_eq!(s.outcome(), Outcome::Won);
        assert_eq!(s.attempt_count(), 3);
    }
}

#[test]
fn six_wrong_guesses_lose_and_seventh_is_rejected() {
    let mut s = GuessSession::new("Dil Chahta Hai", MAX_ATTEMPTS);
    for i in 0..5 {
        let event = s.submit_guess(&format!("wrong {}", i)).unwrap();
        assert_eq!(event, GuessEvent::Wrong { attempts: i + 1 });
        assert_eq!(s.outcome(), Outcome::InProgress);
    }
    let last = s.submit_guess("still wrong").unwrap();
    match last {
        GuessEvent::Lost { answer } => assert!(answer.contains("Dil Chahta Hai")),
        other => panic!("expected loss, got {:?}", other),
    }
    assert_eq!(s.outcome(), Outcome::Lost);

    let seventh = s.submit_guess("Dil Chahta Hai");
    assert!(matches!(seventh, Err(Error::InvalidInput(_))));
    assert_eq!(s.attempt_count(), 6);
    assert_eq!(s.outcome(), Outcome::Lost);
}

#[test]
fn attempts_never_exceed_budget_for_mixed_sequences() {
    let mut s = GuessSession::new("Jai Ho", MAX_ATTEMPTS);
    for i in 0..20 {
        let _ = if i % 3 == 0 {
            s.skip()
        } else {
            s.submit_guess("nope")
        };
        assert!(s.attempt_count() <= MAX_ATTEMPTS);
    }
    assert_eq!(s.attempt_count(), MAX_ATTEMPTS);
    assert_eq!(s.outcome(), Outcome::Lost);
}

#[test]
fn nothing_is_appended_after_a_win() {
    let mut s = GuessSession::new("Jai Ho", MAX_ATTEMPTS);
    s.submit_guess("jai ho").unwrap();
    assert!(s.skip().is_err());
    assert!(s.submit_guess("anything").is_err());
    assert_eq!(s.attempts(), &[GuessAttempt::Guess("jai ho".into())]);
}

#[test]
fn blank_guesses_are_ignored() {
    let mut s = GuessSession::new("Jai Ho", MAX_ATTEMPTS);
    assert!(s.submit_guess("").is_err());
    assert!(s.submit_guess(" \t ").is_err());
    assert_eq!(s.attempt_count(), 0);
}

#[test]
fn skip_never_wins_and_final_skip_loses() {
    let mut s = GuessSession::new("Skipped", MAX_ATTEMPTS);
    for i in 1..MAX_ATTEMPTS {
        assert_eq!(s.skip().unwrap(), GuessEvent::Skipped { attempts: i });
    }
    assert_eq!(
        s.skip().unwrap(),
        GuessEvent::Lost {
            answer: "Skipped".into()
        }
    );
    assert_eq!(s.outcome(), Outcome::Lost);
}

#[test]
fn submit_clears_input_and_records_text() {
    let mut s = GuessSession::new("Tum Hi Ho", MAX_ATTEMPTS);
    s.set_input("Tum Se Hi");
    s.submit_input().unwrap();
    assert_eq!(s.input(), "");
    assert_eq!(s.attempts()[0].label(), "Tum Se Hi");
}

#[test]
fn clear_input_twice_is_idempotent() {
    let mut s = GuessSession::new("Tum Hi Ho", MAX_ATTEMPTS);
    s.set_input("Tum");
    s.clear_input();
    assert_eq!(s.input(), "");
    s.clear_input();
    assert_eq!(s.input(), "");
    assert_eq!(s.attempt_count(), 0);
}

#[test]
fn selecting_a_suggestion_suppresses_until_next_edit() {
    let mut s = GuessSession::new("Tum Hi Ho", MAX_ATTEMPTS);
    s.set_input("tum");
    assert!(!s.suggestions_suppressed());
    s.select_suggestion("Tum Hi Ho");
    assert_eq!(s.input(), "Tum Hi Ho");
    assert!(s.suggestions_suppressed());
    s.set_input("Tum Hi H");
    assert!(!s.suggestions_suppressed());
}
