//! # Codec Module
//!
//! Turns a product cost into a cost code and back.
//!
//! ## Encoding
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  cost 20500                                                             │
//! │       │  clamp negatives to 0, drop the fraction                        │
//! │       ▼                                                                 │
//! │  "20500"   scan left → right, longest zero run first                    │
//! │                                                                         │
//! │   2    0    5    00                                                     │
//! │   │    │    │    │                                                      │
//! │   B    S    F    SC        → "BSFSC"                                    │
//! │                                                                         │
//! │  at each position:  "000" → triple token                                │
//! │                     "00"  → double token                                │
//! │                     else  → the digit's letter                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Decoding
//! The same scan in reverse: zero-run tokens first (longest first), then a
//! single letter. Anything that matches nothing makes the whole code
//! invalid and [`CostCodeCodec::decode`] returns `None`. Bad codes are
//! ordinary input at a register, so they are not errors.
//!
//! ## Thread Safety
//! A codec owns an immutable [`CostCodeMapping`]. Share one behind an `Arc`
//! or a `static` and call it from anywhere without locking.

use once_cell::sync::Lazy;

use crate::mapping::CostCodeMapping;
use crate::money::Money;

/// Longest decimal representation of a `u64`.
const MAX_DIGITS: usize = 20;

// =============================================================================
// Cost Code Codec
// =============================================================================

/// Encodes and decodes cost codes with one scheme.
///
/// ## Example
/// ```rust
/// use costcode_core::CostCodeCodec;
///
/// let codec = CostCodeCodec::default();
///
/// assert_eq!(codec.encode(125.0), "NBF");
/// assert_eq!(codec.encode(1000.0), "NSCS");
/// assert_eq!(codec.decode("QSCFS"), Some(30050));
/// assert_eq!(codec.decode("X"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CostCodeCodec {
    mapping: CostCodeMapping,
}

impl CostCodeCodec {
    /// Creates a codec for an already validated scheme.
    pub fn new(mapping: CostCodeMapping) -> Self {
        CostCodeCodec { mapping }
    }

    /// The scheme this codec uses.
    #[inline]
    pub fn mapping(&self) -> &CostCodeMapping {
        &self.mapping
    }

    // =========================================================================
    // Encode
    // =========================================================================

    /// Encodes any number.
    ///
    /// - negative values (and NaN) encode like `0`
    /// - the fraction is truncated, never rounded: `125.99` encodes like `125`
    /// - values past `u64::MAX` saturate
    ///
    /// ## Example
    /// ```rust
    /// use costcode_core::CostCodeCodec;
    ///
    /// let codec = CostCodeCodec::default();
    /// assert_eq!(codec.encode(125.99), "NBF");
    /// assert_eq!(codec.encode(-40.0), "S");
    /// ```
    pub fn encode(&self, value: f64) -> String {
        self.encode_units(Self::units_for(value))
    }

    /// The whole units [`encode`](Self::encode) writes for `value`.
    ///
    /// ```rust
    /// use costcode_core::CostCodeCodec;
    ///
    /// assert_eq!(CostCodeCodec::units_for(125.99), 125);
    /// assert_eq!(CostCodeCodec::units_for(-40.0), 0);
    /// assert_eq!(CostCodeCodec::units_for(f64::NAN), 0);
    /// ```
    #[inline]
    pub fn units_for(value: f64) -> u64 {
        // `as` saturates, truncates toward zero and maps NaN to 0.
        value as u64
    }

    /// Encodes a whole number of currency units.
    pub fn encode_units(&self, units: u64) -> String {
        let mut out = String::with_capacity(MAX_DIGITS);
        self.encode_into(units, &mut out);
        out
    }

    /// Encodes a cost kept in cents, using its whole units only.
    ///
    /// ## Example
    /// ```rust
    /// use costcode_core::{CostCodeCodec, Money};
    ///
    /// let codec = CostCodeCodec::default();
    /// assert_eq!(codec.encode_money(Money::from_cents(45_675)), "MFZ");
    /// assert_eq!(codec.encode_money(Money::from_cents(-100)), "S");
    /// ```
    pub fn encode_money(&self, cost: Money) -> String {
        let units = if cost.is_negative() {
            0
        } else {
            cost.whole_units() as u64
        };
        self.encode_units(units)
    }

    /// Appends the code for `units` to `out`.
    ///
    /// Lets bulk callers (label printing, reports) reuse one buffer.
    pub fn encode_into(&self, units: u64, out: &mut String) {
        let mut buf = [0u8; MAX_DIGITS];
        let digits = decimal_digits(units, &mut buf);

        let double_zero = self.mapping.double_zero_code();
        let triple_zero = self.mapping.triple_zero_code();

        let mut i = 0;
        while i < digits.len() {
            let rest = &digits[i..];
            if rest.starts_with(b"000") {
                out.push_str(triple_zero);
                i += 3;
            } else if rest.starts_with(b"00") {
                out.push_str(double_zero);
                i += 2;
            } else {
                let digit = (rest[0] - b'0') as usize;
                out.push(self.mapping.letter_byte(digit) as char);
                i += 1;
            }
        }
    }

    // =========================================================================
    // Decode
    // =========================================================================

    /// Decodes a cost code back to whole currency units.
    ///
    /// Returns `None` for the empty string, for any character or fragment
    /// the scheme does not know, and for codes whose value does not fit in
    /// a `u64`. Matching is case-sensitive.
    ///
    /// ## Example
    /// ```rust
    /// use costcode_core::CostCodeCodec;
    ///
    /// let codec = CostCodeCodec::default();
    /// assert_eq!(codec.decode("MFZ"), Some(456));
    /// assert_eq!(codec.decode("NSCS"), Some(1000));
    /// assert_eq!(codec.decode(""), None);
    /// assert_eq!(codec.decode("mfz"), None);
    /// ```
    pub fn decode(&self, code: &str) -> Option<u64> {
        let bytes = code.as_bytes();
        if bytes.is_empty() {
            return None;
        }

        let order = self.mapping.decode_order();
        let mut value: u64 = 0;
        let mut i = 0;

        'scan: while i < bytes.len() {
            let rest = &bytes[i..];

            for run in order {
                let token = self.mapping.zero_run_code(run).as_bytes();
                if rest.starts_with(token) {
                    value = value.checked_mul(10u64.pow(run.zeros() as u32))?;
                    i += token.len();
                    continue 'scan;
                }
            }

            let digit = self.mapping.digit_for_byte(rest[0])?;
            value = value.checked_mul(10)?.checked_add(u64::from(digit))?;
            i += 1;
        }

        Some(value)
    }

    /// Decodes a cost code into [`Money`] (whole units, zero cents).
    pub fn decode_money(&self, code: &str) -> Option<Money> {
        self.decode(code).map(Money::from_units)
    }

    /// Whether [`decode`](Self::decode) would succeed.
    #[inline]
    pub fn is_valid_code(&self, code: &str) -> bool {
        self.decode(code).is_some()
    }
}

impl From<CostCodeMapping> for CostCodeCodec {
    fn from(mapping: CostCodeMapping) -> Self {
        CostCodeCodec::new(mapping)
    }
}

// =============================================================================
// Default-Scheme Shortcuts
// =============================================================================

static DEFAULT_CODEC: Lazy<CostCodeCodec> = Lazy::new(CostCodeCodec::default);

/// The shared codec for the default scheme.
pub fn default_codec() -> &'static CostCodeCodec {
    &DEFAULT_CODEC
}

/// Encodes with the default scheme.
pub fn encode(value: f64) -> String {
    DEFAULT_CODEC.encode(value)
}

/// Decodes with the default scheme.
pub fn decode(code: &str) -> Option<u64> {
    DEFAULT_CODEC.decode(code)
}

/// Checks a code against the default scheme.
pub fn is_valid_code(code: &str) -> bool {
    DEFAULT_CODEC.is_valid_code(code)
}

/// Writes the decimal digits of `n` into the tail of `buf`.
fn decimal_digits(mut n: u64, buf: &mut [u8; MAX_DIGITS]) -> &[u8] {
    let mut pos = buf.len();
    loop {
        pos -= 1;
        buf[pos] = b'0' + (n % 10) as u8;
        n /= 10;
        if n == 0 {
            break;
        }
    }
    &buf[pos..]
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn codec() -> CostCodeCodec {
        CostCodeCodec::default()
    }

    #[test]
    fn test_encode_known_values() {
        let codec = codec();
        assert_eq!(codec.encode(125.0), "NBF");
        assert_eq!(codec.encode(100.0), "NSC");
        assert_eq!(codec.encode(1000.0), "NSCS");
        assert_eq!(codec.encode(10000.0), "NSCSS");
        assert_eq!(codec.encode(20500.0), "BSFSC");
        assert_eq!(codec.encode(0.0), "S");
        assert_eq!(codec.encode(10.0), "NS");
    }

    #[test]
    fn test_decode_known_values() {
        let codec = codec();
        assert_eq!(codec.decode("MFZ"), Some(456));
        assert_eq!(codec.decode("QSCFS"), Some(30050));
        assert_eq!(codec.decode("NSCS"), Some(1000));
        assert_eq!(codec.decode("NSCSS"), Some(10000));
        assert_eq!(codec.decode("S"), Some(0));
    }

    #[test]
    fn test_encode_truncates_and_clamps() {
        let codec = codec();
        assert_eq!(codec.encode(125.99), codec.encode(125.0));
        assert_eq!(codec.encode(0.999), "S");
        assert_eq!(codec.encode(-1.0), "S");
        assert_eq!(codec.encode(-12345.67), "S");
        assert_eq!(codec.encode(f64::NAN), "S");
        assert_eq!(codec.encode(f64::NEG_INFINITY), "S");
        assert_eq!(codec.encode(f64::INFINITY), codec.encode_units(u64::MAX));
    }

    #[test]
    fn test_decode_accepts_leading_zero_tokens() {
        let codec = codec();
        // Never produced by encode, still read as the number they spell.
        assert_eq!(codec.encode_units(1), "N");
        assert_eq!(codec.decode("SN"), Some(1));
        assert_eq!(codec.decode("SCN"), Some(1));
        assert_eq!(codec.decode("SCSN"), Some(1));
        assert_eq!(codec.decode("SSCS"), Some(0));
        assert!(codec.is_valid_code("SCSN"));
    }

    #[test]
    fn test_units_for_matches_encode() {
        for value in [0.0, 125.99, -3.5, 1e30, f64::NAN, f64::INFINITY] {
            let units = CostCodeCodec::units_for(value);
            assert_eq!(codec().encode(value), codec().encode_units(units));
        }
        assert_eq!(CostCodeCodec::units_for(f64::INFINITY), u64::MAX);
    }

    #[test]
    fn test_decode_rejects_invalid_input() {
        let codec = codec();
        for code in ["", "X", "NAX", "N1", "nbf", "N B", "SÇ", "C"] {
            assert_eq!(codec.decode(code), None, "{code:?} should not decode");
            assert!(!codec.is_valid_code(code));
        }
    }

    #[test]
    fn test_is_valid_code_agrees_with_decode() {
        let codec = codec();
        for code in ["NBF", "NSC", "NSCS", "NSCSS", "BSFSC", "MFZ", "QSCFS", "", "X", "NAX"] {
            assert_eq!(codec.is_valid_code(code), codec.decode(code).is_some());
        }
    }

    #[test]
    fn test_zero_runs_use_longest_token() {
        let codec = codec();
        assert_eq!(codec.encode_units(1_000_000), "NSCSSCS");
        assert_eq!(codec.encode_units(100_000), "NSCSSC");
        assert_eq!(codec.encode_units(1_001), "NSCN");
        assert_eq!(codec.decode("NSCSSCS"), Some(1_000_000));
        assert_eq!(codec.decode("NSCSSC"), Some(100_000));
    }

    #[test]
    fn test_code_length_bounds() {
        let codec = codec();
        for units in [1u64, 9, 10, 100, 1000, 20500, 999_999, 1_000_000, 10_203_000] {
            let digits = units.to_string().len();
            let len = codec.encode_units(units).len();
            assert!(len <= digits, "{units}: {len} > {digits}");
            assert!(len >= (digits + 2) / 3, "{units}: {len} too short");
        }
    }

    #[test]
    fn test_u64_limits() {
        let codec = codec();
        let code = codec.encode_units(u64::MAX);
        assert_eq!(codec.decode(&code), Some(u64::MAX));

        // 1 followed by twenty nines does not fit
        let too_big = format!("N{}", "J".repeat(20));
        assert_eq!(codec.decode(&too_big), None);
    }

    #[test]
    fn test_money_helpers() {
        let codec = codec();
        assert_eq!(codec.encode_money(Money::from_cents(12_599)), "NBF");
        assert_eq!(codec.encode_money(Money::from_cents(99)), "S");
        assert_eq!(codec.decode_money("NBF"), Some(Money::from_cents(12_500)));
        assert_eq!(codec.decode_money("?"), None);
    }

    #[test]
    fn test_encode_into_appends() {
        let codec = codec();
        let mut out = String::new();
        codec.encode_into(125, &mut out);
        out.push('/');
        codec.encode_into(100, &mut out);
        assert_eq!(out, "NBF/NSC");
    }

    #[test]
    fn test_custom_mapping_round_trip() {
        let letters = ['A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J'];
        let mapping = CostCodeMapping::new(letters, "XYZ", "XY").unwrap();
        let codec = CostCodeCodec::new(mapping);

        assert_eq!(codec.encode_units(100), "BXYZ");
        assert_eq!(codec.encode_units(1000), "BXY");
        for units in [0u64, 7, 100, 1000, 10_000, 100_000, 1_002_003, 90_000_000] {
            assert_eq!(codec.decode(&codec.encode_units(units)), Some(units));
        }
        assert_eq!(codec.decode("BSC"), None);
    }

    #[test]
    fn test_default_shortcuts() {
        assert_eq!(encode(125.0), "NBF");
        assert_eq!(decode("NBF"), Some(125));
        assert!(is_valid_code("NBF"));
        assert!(!is_valid_code(""));
        assert_eq!(default_codec().mapping(), &CostCodeMapping::default_mapping());
    }

    #[test]
    fn test_shared_across_threads() {
        let codec = Arc::new(codec());
        let handles: Vec<_> = (0..4u64)
            .map(|t| {
                let codec = Arc::clone(&codec);
                std::thread::spawn(move || {
                    (t * 1000..t * 1000 + 500)
                        .all(|units| codec.decode(&codec.encode_units(units)) == Some(units))
                })
            })
            .collect();

        for handle in handles {
            assert!(handle.join().unwrap());
        }
    }
}
