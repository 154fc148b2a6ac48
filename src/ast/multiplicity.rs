use crate::base::Span;

/// `[lower..upper]` or `[bound]` (shorthand for `[bound..bound]`). Bounds
/// are stored as lexemes — not parsed to integers here — so that `0xFF`
/// and `*` survive intact; the validator (spec §4.5 #6) does the actual
/// parsing, honoring hex/bin/oct/decimal bases and the `*` sentinel.
#[derive(Debug, Clone)]
pub struct MultiplicityBounds {
    pub lower: Option<String>,
    pub lower_span: Option<Span>,
    pub upper: String,
    pub upper_span: Span,
}
