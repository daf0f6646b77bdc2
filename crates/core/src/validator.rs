//! Input validator - compares player presses against the expected sequence.

use crate::types::{Signal, Verdict};

/// Append `signal` to `player_input` and classify the result.
///
/// - `Mismatch` if the new element differs from the expected signal at that
///   position (or the input already covers the whole sequence).
/// - `RoundComplete` if the input now reproduces the whole sequence.
/// - `Continue` otherwise.
pub fn submit(signal: Signal, player_input: &mut Vec<Signal>, sequence: &[Signal]) -> Verdict {
    player_input.push(signal);
    check(player_input, sequence)
}

/// Classify a whole input against a sequence by its first mismatching index.
///
/// An empty input is `Continue`.
pub fn check(player_input: &[Signal], sequence: &[Signal]) -> Verdict {
    let first_mismatch = player_input
        .iter()
        .enumerate()
        .any(|(i, signal)| sequence.get(i) != Some(signal));

    if first_mismatch {
        Verdict::Mismatch
    } else if !player_input.is_empty() && player_input.len() == sequence.len() {
        Verdict::RoundComplete
    } else {
        Verdict::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Signal::*;

    #[test]
    fn test_correct_prefix_continues() {
        let sequence = [Red, Blue, Green, Yellow];
        for len in 1..sequence.len() {
            let mut input = Vec::new();
            let mut last = Verdict::Continue;
            for &s in &sequence[..len] {
                last = submit(s, &mut input, &sequence);
            }
            assert_eq!(last, Verdict::Continue, "prefix of length {}", len);
            assert_eq!(check(&input, &sequence), Verdict::Continue);
        }
    }

    #[test]
    fn test_full_match_completes_round() {
        let sequence = [Yellow, Yellow, Red];
        let mut input = Vec::new();
        assert_eq!(submit(Yellow, &mut input, &sequence), Verdict::Continue);
        assert_eq!(submit(Yellow, &mut input, &sequence), Verdict::Continue);
        assert_eq!(submit(Red, &mut input, &sequence), Verdict::RoundComplete);
        assert_eq!(check(&input, &sequence), Verdict::RoundComplete);
    }

    #[test]
    fn test_single_signal_sequence() {
        let mut input = Vec::new();
        assert_eq!(submit(Red, &mut input, &[Red]), Verdict::RoundComplete);

        let mut input = Vec::new();
        assert_eq!(submit(Blue, &mut input, &[Red]), Verdict::Mismatch);
    }

    #[test]
    fn test_first_mismatch_wins_regardless_of_tail() {
        let sequence = [Red, Blue, Green];
        assert_eq!(check(&[Red, Green], &sequence), Verdict::Mismatch);
        assert_eq!(check(&[Red, Green, Green], &sequence), Verdict::Mismatch);
        assert_eq!(check(&[Blue, Blue, Green], &sequence), Verdict::Mismatch);
    }

    #[test]
    fn test_submit_appends_even_on_mismatch() {
        let mut input = vec![Red];
        assert_eq!(submit(Green, &mut input, &[Red, Blue]), Verdict::Mismatch);
        assert_eq!(input, vec![Red, Green]);
    }

    #[test]
    fn test_input_longer_than_sequence_is_mismatch() {
        let mut input = vec![Red];
        assert_eq!(submit(Red, &mut input, &[Red]), Verdict::Mismatch);
        assert_eq!(check(&[Red, Red], &[Red]), Verdict::Mismatch);
    }

    #[test]
    fn test_empty_input_continues() {
        assert_eq!(check(&[], &[Red]), Verdict::Continue);
    }
}
