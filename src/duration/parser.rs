//! Parser for duration strings such as `300ms`, `5m`, `1h30m` or `1.5h`.
//!
//! A duration is an optionally signed sequence of decimal numbers, each with an
//! optional fraction and a unit suffix. Valid units are `ns`, `us` (or `µs`),
//! `ms`, `s`, `m` and `h`. A lone `0` is accepted without a unit.

use super::span::{error_column, ParseResult, RawSpan};
use crate::Error;
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, digit0, one_of},
    combinator::{all_consuming, eof, opt, value},
    error::{Error as NomError, ErrorKind},
    multi::fold_many1,
    sequence::{preceded, terminated},
};

const NANOS_PER_MICRO: u128 = 1_000;
const NANOS_PER_MILLI: u128 = 1_000_000;
const NANOS_PER_SECOND: u128 = 1_000_000_000;

/// Fraction digits beyond this cannot change a nanosecond value.
const MAX_FRACTION_DIGITS: usize = 18;

#[derive(Debug, Eq, PartialEq)]
struct ParsedDuration {
    negative: bool,
    nanos: u128,
}

fn unit(input: RawSpan<'_>) -> ParseResult<'_, u128> {
    alt((
        value(1, tag("ns")),
        value(NANOS_PER_MICRO, alt((tag("us"), tag("µs"), tag("μs")))),
        value(NANOS_PER_MILLI, tag("ms")),
        value(NANOS_PER_SECOND, tag("s")),
        value(60 * NANOS_PER_SECOND, tag("m")),
        value(3_600 * NANOS_PER_SECOND, tag("h")),
    ))(input)
}

fn number(input: RawSpan<'_>) -> ParseResult<'_, (RawSpan<'_>, Option<RawSpan<'_>>)> {
    let (rest, whole) = digit0(input)?;
    let (rest, fraction) = opt(preceded(char('.'), digit0))(rest)?;

    let has_digits =
        !whole.fragment().is_empty() || fraction.is_some_and(|f| !f.fragment().is_empty());

    if !has_digits {
        return Err(nom::Err::Error(NomError::new(input, ErrorKind::Digit)));
    }

    Ok((rest, (whole, fraction)))
}

fn component(input: RawSpan<'_>) -> ParseResult<'_, u128> {
    let too_large = || nom::Err::Failure(NomError::new(input, ErrorKind::TooLarge));

    let (rest, (whole, fraction)) = number(input)?;
    let (rest, unit) = unit(rest)?;

    let whole = if whole.fragment().is_empty() {
        0
    } else {
        whole.fragment().parse::<u128>().map_err(|_| too_large())?
    };

    let mut nanos = whole.checked_mul(unit).ok_or_else(too_large)?;

    if let Some(fraction) = fraction {
        let digits = fraction
            .fragment()
            .get(..fraction.fragment().len().min(MAX_FRACTION_DIGITS))
            .unwrap_or_default();

        if !digits.is_empty() {
            let numerator = digits.parse::<u128>().map_err(|_| too_large())?;

            #[allow(clippy::cast_possible_truncation)]
            let scale = 10_u128.pow(digits.len() as u32);

            nanos = nanos.saturating_add(numerator * unit / scale);
        }
    }

    Ok((rest, nanos))
}

fn duration(input: RawSpan<'_>) -> ParseResult<'_, ParsedDuration> {
    let (input, sign) = opt(one_of("+-"))(input)?;

    let (input, nanos) = alt((
        value(0, terminated(tag("0"), eof)),
        fold_many1(component, || 0, u128::saturating_add),
    ))(input)?;

    Ok((
        input,
        ParsedDuration {
            negative: sign == Some('-'),
            nanos,
        },
    ))
}

fn parse(s: &str) -> Result<ParsedDuration, String> {
    match all_consuming(duration)(RawSpan::new(s)) {
        Ok((_, parsed)) => Ok(parsed),
        Err(e) => Err(match error_column(&e) {
            Some(column) => format!("{s:?} is not a duration (at column {column})"),
            None => format!("{s:?} is not a duration"),
        }),
    }
}

fn to_width(s: &str, parsed: &ParsedDuration) -> crate::Result<Option<u64>> {
    if parsed.nanos == 0 {
        return Ok(None);
    }

    if parsed.negative {
        return Err(Error::InvalidWidth(format!("{s:?} is negative")));
    }

    let millis = parsed.nanos / NANOS_PER_MILLI;

    if millis == 0 {
        return Err(Error::InvalidWidth(format!(
            "{s:?} is shorter than one millisecond"
        )));
    }

    Ok(Some(u64::try_from(millis).unwrap_or(u64::MAX)))
}

/// Parses a requested bucket width from a duration string, in milliseconds.
///
/// Returns `Ok(None)` if the string is empty, a zero duration, or not a
/// duration at all, meaning the caller should fall back to its default width.
///
/// # Errors
///
/// Returns [`Error::InvalidWidth`] if the duration is negative or shorter than
/// one millisecond.
pub fn parse_width(s: &str) -> crate::Result<Option<u64>> {
    let s = s.trim();

    if s.is_empty() {
        return Ok(None);
    }

    match parse(s) {
        Ok(parsed) => to_width(s, &parsed),
        Err(reason) => {
            log::debug!("{reason}, falling back to the default width");
            Ok(None)
        }
    }
}

/// Like [`parse_width`], but a string that is not a duration is an error.
///
/// # Errors
///
/// Returns [`Error::InvalidWidth`] if the string is not a duration, is negative,
/// or is shorter than one millisecond. The message carries the column of the
/// first unexpected character.
pub fn parse_width_strict(s: &str) -> crate::Result<Option<u64>> {
    let s = s.trim();

    if s.is_empty() {
        return Ok(None);
    }

    let parsed = parse(s).map_err(Error::InvalidWidth)?;
    to_width(s, &parsed)
}
