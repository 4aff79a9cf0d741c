//! Natural ordering of strings: `"item2"` sorts before `"item10"`.
//!
//! Both strings are scanned side by side. Wherever both sides sit on an ASCII digit, the whole
//! digit runs are consumed and compared by magnitude. Everything else compares byte by byte,
//! which for UTF-8 is the same as comparing code points.

use std::cmp::Ordering;

/// Three-way natural comparison of `a` and `b`.
///
/// Strings that only differ in leading zeros of some number (`"a01"` and `"a1"`) are
/// equivalent under natural order; those fall back to plain byte order, so the result is
/// [`Ordering::Equal`] only for equal strings.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    compare_natural(a.as_bytes(), b.as_bytes()).then_with(|| a.cmp(b))
}

fn compare_natural(a: &[u8], b: &[u8]) -> Ordering {
    let (mut i, mut j) = (0, 0);

    loop {
        match (a.get(i), b.get(j)) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) if x.is_ascii_digit() && y.is_ascii_digit() => {
                let left = digit_run(&a[i..]);
                let right = digit_run(&b[j..]);

                match compare_magnitude(left, right) {
                    Ordering::Equal => {
                        i += left.len();
                        j += right.len();
                    }
                    unequal => return unequal,
                }
            }
            (Some(x), Some(y)) => match x.cmp(y) {
                Ordering::Equal => {
                    i += 1;
                    j += 1;
                }
                unequal => return unequal,
            },
        }
    }
}

fn digit_run(bytes: &[u8]) -> &[u8] {
    let len = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
    &bytes[..len]
}

/// Compares two digit runs by value, without parsing them, so runs of any length work.
fn compare_magnitude(left: &[u8], right: &[u8]) -> Ordering {
    let left = strip_leading_zeros(left);
    let right = strip_leading_zeros(right);

    // same number of significant digits => digit-wise equals numeric
    left.len().cmp(&right.len()).then_with(|| left.cmp(right))
}

fn strip_leading_zeros(digits: &[u8]) -> &[u8] {
    let zeros = digits.iter().take_while(|&&b| b == b'0').count();
    &digits[zeros..]
}
