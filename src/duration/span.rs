use nom::IResult;
use nom_locate::LocatedSpan;

#[allow(clippy::module_name_repetitions)]
pub type RawSpan<'a> = LocatedSpan<&'a str>;

pub type ParseResult<'a, T> = IResult<RawSpan<'a>, T>;

/// Column (1-based, in characters) at which a parser gave up.
pub fn error_column(err: &nom::Err<nom::error::Error<RawSpan<'_>>>) -> Option<usize> {
    match err {
        nom::Err::Error(e) | nom::Err::Failure(e) => Some(e.input.get_utf8_column()),
        nom::Err::Incomplete(_) => None,
    }
}
