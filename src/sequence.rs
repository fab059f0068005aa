use crate::basic::Digit;

// 3 followed by the first 100 decimals
const PI_DIGITS: &str = "31415926535897932384626433832795028841971693993751058209749445923078164062862089986280348253421170679";

lazy_static! {
    static ref DIGITS: Vec<Digit> = PI_DIGITS.bytes().map(|b| b - b'0').collect();
}

/// Progress cursor along the digits of pi
///
/// The cursor only moves when [`offer`](Self::offer) is handed exactly
/// the digit it is waiting for, and wraps around after the last known
/// digit.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct DigitSequence {
    pos: usize,
}

impl DigitSequence {
    /// The digit the cursor is waiting for
    pub fn expected(self) -> Digit {
        DIGITS[self.pos]
    }

    /// Advances past `digit` if it is the expected one, returns
    /// whether it was
    pub fn offer(&mut self, digit: Digit) -> bool {
        if digit == self.expected() {
            self.pos = (self.pos + 1) % DIGITS.len();
            true
        } else {
            false
        }
    }

    pub fn position(self) -> usize {
        self.pos
    }

    /// The digits matched so far, as text
    pub fn prefix(self) -> &'static str {
        &PI_DIGITS[..self.pos]
    }

    pub fn reset(&mut self) {
        self.pos = 0;
    }
}

#[test]
fn test_starts_at_three() {
    let sequence = DigitSequence::default();
    assert_eq!(sequence.expected(), 3);
    assert_eq!(sequence.position(), 0);
    assert_eq!(sequence.prefix(), "");
}

#[test]
fn test_matches_advance_the_cursor() {
    let mut sequence = DigitSequence::default();
    for digit in [3, 1, 4, 1, 5] {
        assert!(sequence.offer(digit));
    }
    assert_eq!(sequence.position(), 5);
    assert_eq!(sequence.expected(), 9);
    assert_eq!(sequence.prefix(), "31415");
}

#[test]
fn test_wrong_digit_stands_still() {
    let mut sequence = DigitSequence::default();
    assert!(!sequence.offer(7));
    assert_eq!(sequence.position(), 0);
    assert_eq!(sequence.expected(), 3);

    assert!(sequence.offer(3));
    assert!(!sequence.offer(3));
    assert_eq!(sequence.position(), 1);
    assert_eq!(sequence.expected(), 1);
}

#[test]
fn test_wraps_after_the_last_digit() {
    let mut sequence = DigitSequence::default();
    for _ in 0..DIGITS.len() {
        assert!(sequence.offer(sequence.expected()));
    }
    assert_eq!(sequence.position(), 0);
    assert_eq!(sequence.expected(), 3);
}

#[test]
fn test_reset_rewinds() {
    let mut sequence = DigitSequence::default();
    sequence.offer(3);
    sequence.offer(1);
    sequence.reset();
    assert_eq!(sequence.position(), 0);
    assert_eq!(sequence.prefix(), "");
}
