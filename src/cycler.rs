//! Animated placeholder text for the navbar search input.
//!
//! Simulates someone typing a service name into the search box, holding it,
//! deleting it, and moving on to the next phrase, forever. The state machine
//! itself is synchronous and owns no timers; [`spawn_cycler`] drives it on
//! the tokio runtime with exactly one pending sleep at any instant and
//! publishes each new frame on the application event channel.

use crate::events::Event;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

/// Delay before the very first character appears.
const INITIAL_DELAY: Duration = Duration::from_millis(500);
/// Per-character delay while typing.
const TYPING_DELAY: Duration = Duration::from_millis(25);
/// Per-character delay while deleting. Deleting reads faster than typing.
const DELETING_DELAY: Duration = Duration::from_millis(10);
/// Dwell on the fully typed phrase.
const HOLD_DELAY: Duration = Duration::from_millis(1000);
/// Dwell on the empty field before the next phrase starts.
const REST_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Typing,
    PausedAfterTyping,
    Deleting,
    PausedAfterDeleting,
}

/// Four-phase typewriter over a fixed, non-empty phrase list.
///
/// The visible text is always a prefix of the current phrase: it grows one
/// character per step while typing and shrinks one per step while deleting.
/// The phrase index advances modulo the list length at the end of the
/// post-delete pause, so the cycle never terminates.
pub struct PlaceholderCycler {
    phrases: &'static [&'static str],
    phrase_index: usize,
    visible: String,
    phase: Phase,
}

impl PlaceholderCycler {
    pub fn new(phrases: &'static [&'static str]) -> Self {
        debug_assert!(!phrases.is_empty());
        Self {
            phrases,
            phrase_index: 0,
            visible: String::new(),
            phase: Phase::Typing,
        }
    }

    /// Current frame of the animation.
    pub fn visible_text(&self) -> &str {
        &self.visible
    }

    /// Delay to wait before calling [`advance`](Self::advance) the first time.
    pub fn initial_delay(&self) -> Duration {
        INITIAL_DELAY
    }

    /// Performs exactly one transition and returns the delay until the next.
    ///
    /// The caller is expected to sleep for the returned duration and call
    /// `advance` again; scheduling stays strictly sequential because the next
    /// step is only ever scheduled from the previous one.
    pub fn advance(&mut self) -> Duration {
        let phrase = self.phrases[self.phrase_index];
        match self.phase {
            Phase::Typing => {
                if let Some(c) = phrase.chars().nth(self.visible.chars().count()) {
                    self.visible.push(c);
                }
                if self.visible == phrase {
                    self.phase = Phase::PausedAfterTyping;
                    HOLD_DELAY
                } else {
                    TYPING_DELAY
                }
            }
            Phase::PausedAfterTyping => {
                self.phase = Phase::Deleting;
                DELETING_DELAY
            }
            Phase::Deleting => {
                self.visible.pop();
                if self.visible.is_empty() {
                    self.phase = Phase::PausedAfterDeleting;
                    REST_DELAY
                } else {
                    DELETING_DELAY
                }
            }
            Phase::PausedAfterDeleting => {
                self.phrase_index = (self.phrase_index + 1) % self.phrases.len();
                self.phase = Phase::Typing;
                TYPING_DELAY
            }
        }
    }
}

/// Spawns the driver task for the placeholder animation.
///
/// Each loop iteration sleeps for the delay the previous step returned, takes
/// one step, and posts the new frame as [`Event::PlaceholderUpdate`]. Abort
/// the returned handle on shutdown; the task also exits on its own once the
/// event channel closes.
pub fn spawn_cycler(
    phrases: &'static [&'static str],
    tx: UnboundedSender<Event>,
) -> JoinHandle<()> {
    let mut cycler = PlaceholderCycler::new(phrases);
    tokio::spawn(async move {
        let mut delay = cycler.initial_delay();
        loop {
            tokio::time::sleep(delay).await;
            delay = cycler.advance();
            if tx
                .send(Event::PlaceholderUpdate(cycler.visible_text().to_string()))
                .is_err()
            {
                break;
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;
    use tokio::sync::mpsc::error::TryRecvError;

    #[test]
    fn types_holds_deletes_and_rests_in_order() {
        let mut cycler = PlaceholderCycler::new(&["ab", "c"]);
        assert_eq!(cycler.visible_text(), "");
        assert_eq!(cycler.initial_delay(), INITIAL_DELAY);

        assert_eq!(cycler.advance(), TYPING_DELAY);
        assert_eq!(cycler.visible_text(), "a");

        assert_eq!(cycler.advance(), HOLD_DELAY);
        assert_eq!(cycler.visible_text(), "ab");
        assert_eq!(cycler.phase, Phase::PausedAfterTyping);

        // The hold changes no text; it only arms the delete phase.
        assert_eq!(cycler.advance(), DELETING_DELAY);
        assert_eq!(cycler.visible_text(), "ab");
        assert_eq!(cycler.phase, Phase::Deleting);

        assert_eq!(cycler.advance(), DELETING_DELAY);
        assert_eq!(cycler.visible_text(), "a");

        assert_eq!(cycler.advance(), REST_DELAY);
        assert_eq!(cycler.visible_text(), "");
        assert_eq!(cycler.phase, Phase::PausedAfterDeleting);

        // Rest ends: index advances, typing resumes on the next phrase.
        assert_eq!(cycler.advance(), TYPING_DELAY);
        assert_eq!(cycler.phrase_index, 1);
        assert_eq!(cycler.visible_text(), "");

        assert_eq!(cycler.advance(), HOLD_DELAY);
        assert_eq!(cycler.visible_text(), "c");
    }

    #[test]
    fn wraps_back_to_the_first_phrase() {
        let mut cycler = PlaceholderCycler::new(&["x", "y"]);
        for _ in 0..2 {
            cycler.advance(); // type the single character
            cycler.advance(); // hold
            cycler.advance(); // delete it
            cycler.advance(); // rest, advance index
        }
        assert_eq!(cycler.phrase_index, 0);
        assert_eq!(cycler.phase, Phase::Typing);
    }

    #[test]
    fn visible_text_is_always_a_prefix_of_the_current_phrase() {
        let phrases: &[&str] = &["House Deep Cleaning", "AC Repair & Cleaning"];
        let mut cycler = PlaceholderCycler::new(phrases);
        for _ in 0..500 {
            cycler.advance();
            let phrase = phrases[cycler.phrase_index];
            assert!(
                phrase.starts_with(cycler.visible_text()),
                "{:?} is not a prefix of {:?}",
                cycler.visible_text(),
                phrase
            );
        }
    }

    #[test]
    fn text_only_grows_while_typing_and_only_shrinks_while_deleting() {
        let mut cycler = PlaceholderCycler::new(&["Massage for Women & Couples"]);
        for _ in 0..200 {
            let phase = cycler.phase;
            let before = cycler.visible_text().chars().count();
            cycler.advance();
            let after = cycler.visible_text().chars().count();
            match phase {
                Phase::Typing => assert_eq!(after, before + 1),
                Phase::Deleting => assert_eq!(after, before - 1),
                Phase::PausedAfterTyping | Phase::PausedAfterDeleting => {
                    assert_eq!(after, before)
                }
            }
        }
    }

    #[tokio::test]
    async fn aborted_driver_publishes_nothing_further() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let handle = spawn_cycler(&["ab"], tx);

        // Wait for the animation to produce at least one frame.
        let first = rx.recv().await;
        assert!(matches!(first, Some(Event::PlaceholderUpdate(_))));

        handle.abort();
        let err = handle.await.unwrap_err();
        assert!(err.is_cancelled());

        // Drain whatever was already queued; after that the channel must be
        // closed, proving no further frames can ever arrive.
        while rx.try_recv().is_ok() {}
        assert!(matches!(rx.try_recv(), Err(TryRecvError::Disconnected)));
    }
}
