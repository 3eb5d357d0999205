//! # Mapping Module
//!
//! The digit ↔ letter table behind every cost code.
//!
//! ## Default Scheme
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  digit   0   1   2   3   4   5   6   7   8   9                          │
//! │  letter  S   N   B   Q   M   F   Z   V   L   J                          │
//! │                                                                         │
//! │  zero runs   "00" → SC      "000" → SCS                                 │
//! │                                                                         │
//! │  C never stands for a digit, so SC / SCS can always be told apart       │
//! │  from a lone S followed by another digit letter.                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Custom Schemes
//! Stores may pick their own letters. Every scheme is checked once, when it
//! is built, so that decoding is always the exact inverse of encoding:
//! - all ten digits present, one uppercase letter each, no letter reused
//! - zero-run tokens are uppercase letters only
//! - no zero-run token can be read at a position where the encoder wrote
//!   something else (see [`MappingError::AmbiguousToken`])
//!
//! A mapping has no setters. Changing the scheme means building a new one.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::error::MappingError;

/// Letters for digits 0..=9 in the default scheme.
pub const DEFAULT_DIGIT_LETTERS: [char; 10] = ['S', 'N', 'B', 'Q', 'M', 'F', 'Z', 'V', 'L', 'J'];

/// Replaces "00" in the default scheme.
pub const DEFAULT_DOUBLE_ZERO: &str = "SC";

/// Replaces "000" in the default scheme.
pub const DEFAULT_TRIPLE_ZERO: &str = "SCS";

// =============================================================================
// Zero Runs
// =============================================================================

/// The two multi-digit symbols a scheme carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ZeroRun {
    /// "00"
    Double,
    /// "000"
    Triple,
}

impl ZeroRun {
    /// Number of zero digits the token stands for.
    #[inline]
    pub const fn zeros(self) -> usize {
        match self {
            ZeroRun::Double => 2,
            ZeroRun::Triple => 3,
        }
    }

    /// The digit run the token replaces.
    #[inline]
    pub const fn digits(self) -> &'static str {
        match self {
            ZeroRun::Double => "00",
            ZeroRun::Triple => "000",
        }
    }

    const fn field(self) -> &'static str {
        match self {
            ZeroRun::Double => "double_zero",
            ZeroRun::Triple => "triple_zero",
        }
    }
}

// =============================================================================
// Mapping Spec (serialized form)
// =============================================================================

/// The plain, serializable description of a scheme.
///
/// This is what gets stored next to store settings and edited by the pricing
/// UI. It is unchecked; turn it into a [`CostCodeMapping`] to use it.
///
/// ```json
/// {
///   "digits": { "0": "S", "1": "N", "2": "B", "...": "..." },
///   "double_zero": "SC",
///   "triple_zero": "SCS"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MappingSpec {
    /// Digit ("0".."9") to letter.
    pub digits: BTreeMap<String, String>,

    /// Token replacing "00".
    pub double_zero: String,

    /// Token replacing "000".
    pub triple_zero: String,
}

impl Default for MappingSpec {
    fn default() -> Self {
        CostCodeMapping::default_mapping().to_spec()
    }
}

// =============================================================================
// Cost Code Mapping
// =============================================================================

/// A validated, immutable cost code scheme.
///
/// Holds the forward table (digit → letter), the reverse table
/// (letter → digit) and the two zero-run tokens. All fields are private so
/// an instance can only come out of [`CostCodeMapping::new`],
/// [`CostCodeMapping::from_spec`] or deserialization, which all validate.
///
/// ## Example
/// ```rust
/// use costcode_core::mapping::CostCodeMapping;
///
/// let mapping = CostCodeMapping::default_mapping();
/// assert_eq!(mapping.letter_for(1), Some('N'));
/// assert_eq!(mapping.digit_for('S'), Some(0));
/// assert_eq!(mapping.triple_zero_code(), "SCS");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "MappingSpec", into = "MappingSpec")]
pub struct CostCodeMapping {
    /// Indexed by digit. Always ASCII uppercase.
    letters: [u8; 10],
    /// Indexed by `letter - b'A'`.
    digits: [Option<u8>; 26],
    double_zero: String,
    triple_zero: String,
    /// Zero-run tokens in the order decode must try them.
    zero_run_order: [ZeroRun; 2],
}

impl CostCodeMapping {
    /// Builds the canonical scheme (S N B Q M F Z V L J, SC, SCS).
    pub fn default_mapping() -> Self {
        let mut digits = [None; 26];
        let mut letters = [0u8; 10];
        for (digit, letter) in DEFAULT_DIGIT_LETTERS.iter().enumerate() {
            letters[digit] = *letter as u8;
            digits[letter_slot(*letter as u8)] = Some(digit as u8);
        }

        CostCodeMapping {
            letters,
            digits,
            double_zero: DEFAULT_DOUBLE_ZERO.to_string(),
            triple_zero: DEFAULT_TRIPLE_ZERO.to_string(),
            zero_run_order: [ZeroRun::Triple, ZeroRun::Double],
        }
    }

    /// Builds and validates a custom scheme.
    ///
    /// `letters[d]` is the letter for digit `d`.
    ///
    /// ## Errors
    /// - [`MappingError::InvalidLetter`] - a letter outside A-Z
    /// - [`MappingError::DuplicateLetter`] - two digits share a letter
    /// - [`MappingError::InvalidToken`] - empty or non A-Z zero-run token
    /// - [`MappingError::AmbiguousToken`] - decode could not undo encode
    ///
    /// ## Example
    /// ```rust
    /// use costcode_core::mapping::CostCodeMapping;
    ///
    /// let letters = ['A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J'];
    /// let mapping = CostCodeMapping::new(letters, "X", "Y").unwrap();
    /// assert_eq!(mapping.letter_for(9), Some('J'));
    ///
    /// // 'A' already means 0, so "A" cannot also mean 00
    /// assert!(CostCodeMapping::new(letters, "A", "Y").is_err());
    /// ```
    pub fn new(
        letters: [char; 10],
        double_zero: impl Into<String>,
        triple_zero: impl Into<String>,
    ) -> Result<Self, MappingError> {
        let double_zero = double_zero.into();
        let triple_zero = triple_zero.into();

        let mut letter_bytes = [0u8; 10];
        let mut digits: [Option<u8>; 26] = [None; 26];

        for (digit, &letter) in letters.iter().enumerate() {
            let digit = digit as u8;
            if !letter.is_ascii_uppercase() {
                return Err(MappingError::InvalidLetter {
                    digit,
                    symbol: letter.to_string(),
                });
            }

            let slot = &mut digits[letter_slot(letter as u8)];
            if let Some(first) = *slot {
                return Err(MappingError::DuplicateLetter {
                    letter,
                    first,
                    second: digit,
                });
            }
            *slot = Some(digit);
            letter_bytes[digit as usize] = letter as u8;
        }

        check_token_alphabet(ZeroRun::Double, &double_zero)?;
        check_token_alphabet(ZeroRun::Triple, &triple_zero)?;

        // Longer token first; on a tie the triple wins.
        let zero_run_order = if double_zero.len() > triple_zero.len() {
            [ZeroRun::Double, ZeroRun::Triple]
        } else {
            [ZeroRun::Triple, ZeroRun::Double]
        };

        let mapping = CostCodeMapping {
            letters: letter_bytes,
            digits,
            double_zero,
            triple_zero,
            zero_run_order,
        };
        mapping.check_unambiguous()?;

        debug!(
            letters = %mapping.letters_string(),
            double_zero = %mapping.double_zero,
            triple_zero = %mapping.triple_zero,
            "Built custom cost code mapping"
        );

        Ok(mapping)
    }

    /// Builds a scheme from its serialized description.
    pub fn from_spec(spec: &MappingSpec) -> Result<Self, MappingError> {
        let mut letters: [Option<char>; 10] = [None; 10];

        for (key, value) in &spec.digits {
            let digit = parse_digit_key(key)?;
            let mut chars = value.chars();
            let letter = match (chars.next(), chars.next()) {
                (Some(letter), None) => letter,
                _ => {
                    return Err(MappingError::InvalidLetter {
                        digit,
                        symbol: value.clone(),
                    })
                }
            };
            letters[digit as usize] = Some(letter);
        }

        let mut resolved = ['\0'; 10];
        for (digit, letter) in letters.iter().enumerate() {
            resolved[digit] = letter.ok_or(MappingError::MissingDigit { digit: digit as u8 })?;
        }

        Self::new(resolved, spec.double_zero.clone(), spec.triple_zero.clone())
    }

    /// Returns the serializable description of this scheme.
    pub fn to_spec(&self) -> MappingSpec {
        MappingSpec {
            digits: self
                .letters
                .iter()
                .enumerate()
                .map(|(digit, letter)| (digit.to_string(), (*letter as char).to_string()))
                .collect(),
            double_zero: self.double_zero.clone(),
            triple_zero: self.triple_zero.clone(),
        }
    }

    // =========================================================================
    // Lookups
    // =========================================================================

    /// Letter for a digit, `None` if `digit > 9`.
    #[inline]
    pub fn letter_for(&self, digit: u8) -> Option<char> {
        self.letters.get(digit as usize).map(|b| *b as char)
    }

    /// Digit for a letter, `None` if the letter is not part of the scheme.
    ///
    /// Case-sensitive: `'n'` is not `'N'`.
    #[inline]
    pub fn digit_for(&self, letter: char) -> Option<u8> {
        if letter.is_ascii_uppercase() {
            self.digits[letter_slot(letter as u8)]
        } else {
            None
        }
    }

    /// Same as [`digit_for`](Self::digit_for) on a raw byte.
    #[inline]
    pub(crate) fn digit_for_byte(&self, byte: u8) -> Option<u8> {
        if byte.is_ascii_uppercase() {
            self.digits[letter_slot(byte)]
        } else {
            None
        }
    }

    /// Letter byte for a digit known to be 0-9.
    #[inline]
    pub(crate) fn letter_byte(&self, digit: usize) -> u8 {
        self.letters[digit]
    }

    /// Token replacing "00".
    #[inline]
    pub fn double_zero_code(&self) -> &str {
        &self.double_zero
    }

    /// Token replacing "000".
    #[inline]
    pub fn triple_zero_code(&self) -> &str {
        &self.triple_zero
    }

    /// Token for a zero run.
    #[inline]
    pub fn zero_run_code(&self, run: ZeroRun) -> &str {
        match run {
            ZeroRun::Double => &self.double_zero,
            ZeroRun::Triple => &self.triple_zero,
        }
    }

    /// Zero-run tokens in decode priority order (longest first).
    #[inline]
    pub fn decode_order(&self) -> [ZeroRun; 2] {
        self.zero_run_order
    }

    /// Forward table, digit → letter.
    pub fn digit_to_letter(&self) -> BTreeMap<char, char> {
        self.letters
            .iter()
            .enumerate()
            .map(|(digit, letter)| ((b'0' + digit as u8) as char, *letter as char))
            .collect()
    }

    /// Reverse table, token → digits, zero-run tokens included.
    ///
    /// ```rust
    /// use costcode_core::mapping::CostCodeMapping;
    ///
    /// let reverse = CostCodeMapping::default_mapping().letter_to_digit();
    /// assert_eq!(reverse["F"], "5");
    /// assert_eq!(reverse["SC"], "00");
    /// assert_eq!(reverse["SCS"], "000");
    /// assert_eq!(reverse.len(), 12);
    /// ```
    pub fn letter_to_digit(&self) -> BTreeMap<String, String> {
        let mut reverse: BTreeMap<String, String> = self
            .letters
            .iter()
            .enumerate()
            .map(|(digit, letter)| ((*letter as char).to_string(), digit.to_string()))
            .collect();
        reverse.insert(self.triple_zero.clone(), ZeroRun::Triple.digits().to_string());
        reverse.insert(self.double_zero.clone(), ZeroRun::Double.digits().to_string());
        reverse
    }

    fn letters_string(&self) -> String {
        self.letters.iter().map(|b| *b as char).collect()
    }

    // =========================================================================
    // Ambiguity Check
    // =========================================================================

    /// Rejects schemes where decode could pick a zero-run token at a spot
    /// where encode wrote a different token.
    ///
    /// ## How It Works
    /// ```text
    /// For every token X the encoder can write:
    ///   for every token T that decode tries BEFORE X:
    ///     can T be read at the start of  X + (anything encode may write next)?
    ///       yes → AmbiguousToken
    ///
    /// What may follow X:
    ///   nonzero letter, triple token  → anything
    ///   lone zero letter, double token → a nonzero letter (the run is over)
    /// ```
    fn check_unambiguous(&self) -> Result<(), MappingError> {
        let mut emitted: Vec<Token> = (0..10u8).map(Token::Letter).collect();
        emitted.push(Token::Run(ZeroRun::Double));
        emitted.push(Token::Run(ZeroRun::Triple));

        for x in emitted {
            for run in self.tried_before(x) {
                let token = self.zero_run_code(run).as_bytes();
                if let Some(context) = self.readable_after(token, x) {
                    return Err(MappingError::AmbiguousToken {
                        name: run.field(),
                        token: self.zero_run_code(run).to_string(),
                        context,
                    });
                }
            }
        }

        Ok(())
    }

    /// Zero-run tokens decode tries before settling on `x`.
    fn tried_before(&self, x: Token) -> Vec<ZeroRun> {
        match x {
            Token::Letter(_) => self.zero_run_order.to_vec(),
            Token::Run(run) => self
                .zero_run_order
                .iter()
                .copied()
                .take_while(|r| *r != run)
                .collect(),
        }
    }

    /// If `token` can be a prefix of `x` followed by an encodable
    /// continuation, returns the offending text.
    fn readable_after(&self, token: &[u8], x: Token) -> Option<String> {
        let written = self.token_bytes(x);

        if token.len() <= written.len() {
            return written
                .starts_with(token)
                .then(|| String::from_utf8_lossy(written).into_owned());
        }

        if !token.starts_with(written) {
            return None;
        }

        self.continues_with(&token[written.len()..], x.follow())
            .then(|| String::from_utf8_lossy(token).into_owned())
    }

    /// Whether some sequence the encoder can write from `follow` starts with
    /// `rest` (or is cut short inside it).
    fn continues_with(&self, rest: &[u8], follow: Follow) -> bool {
        if rest.is_empty() {
            return true;
        }

        follow.candidates().into_iter().any(|next| {
            let bytes = self.token_bytes(next);
            if rest.starts_with(bytes) {
                self.continues_with(&rest[bytes.len()..], next.follow())
            } else {
                bytes.starts_with(rest)
            }
        })
    }

    fn token_bytes(&self, token: Token) -> &[u8] {
        match token {
            Token::Letter(digit) => std::slice::from_ref(&self.letters[digit as usize]),
            Token::Run(run) => self.zero_run_code(run).as_bytes(),
        }
    }
}

impl Default for CostCodeMapping {
    fn default() -> Self {
        CostCodeMapping::default_mapping()
    }
}

impl TryFrom<MappingSpec> for CostCodeMapping {
    type Error = MappingError;

    fn try_from(spec: MappingSpec) -> Result<Self, Self::Error> {
        CostCodeMapping::from_spec(&spec)
    }
}

impl From<CostCodeMapping> for MappingSpec {
    fn from(mapping: CostCodeMapping) -> Self {
        mapping.to_spec()
    }
}

// =============================================================================
// Token Grammar
// =============================================================================

/// One unit of encoder output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Letter(u8),
    Run(ZeroRun),
}

impl Token {
    fn follow(self) -> Follow {
        match self {
            Token::Letter(0) | Token::Run(ZeroRun::Double) => Follow::NonZero,
            Token::Letter(_) | Token::Run(ZeroRun::Triple) => Follow::Any,
        }
    }
}

/// What the encoder may write next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Follow {
    Any,
    NonZero,
}

impl Follow {
    fn candidates(self) -> Vec<Token> {
        let mut tokens: Vec<Token> = (1..10u8).map(Token::Letter).collect();
        if self == Follow::Any {
            tokens.push(Token::Letter(0));
            tokens.push(Token::Run(ZeroRun::Double));
            tokens.push(Token::Run(ZeroRun::Triple));
        }
        tokens
    }
}

// =============================================================================
// Helpers
// =============================================================================

#[inline]
fn letter_slot(letter: u8) -> usize {
    (letter - b'A') as usize
}

fn check_token_alphabet(run: ZeroRun, token: &str) -> Result<(), MappingError> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_uppercase()) {
        return Err(MappingError::InvalidToken {
            name: run.field(),
            token: token.to_string(),
        });
    }
    Ok(())
}

fn parse_digit_key(key: &str) -> Result<u8, MappingError> {
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_digit() => Ok(c as u8 - b'0'),
        _ => Err(MappingError::InvalidDigit {
            key: key.to_string(),
        }),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
