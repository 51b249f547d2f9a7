//! Compile option types and engine build defaults
//!
//! Numeric values match the PCRE2 constants so an engine binding can forward
//! them without translation.

impl_flag_set! {
    /// Pattern compile options
    pub struct PatternOptions: u64 {
        /// `PCRE2_ALLOW_EMPTY_CLASS`
        const ALLOW_EMPTY_CLASS = 0x0000_0001;
        /// `PCRE2_ALT_BSUX`
        const ALT_BSUX = 0x0000_0002;
        /// `PCRE2_AUTO_CALLOUT`
        const AUTO_CALLOUT = 0x0000_0004;
        /// `PCRE2_CASELESS`
        const IGNORE_CASE = 0x0000_0008;
        /// `PCRE2_DOLLAR_ENDONLY`
        const DOLLAR_END_ONLY = 0x0000_0010;
        /// `PCRE2_DOTALL`
        const SINGLELINE = 0x0000_0020;
        /// `PCRE2_DUPNAMES`
        const DUPLICATE_NAMES = 0x0000_0040;
        /// `PCRE2_EXTENDED`
        const IGNORE_PATTERN_WHITESPACE = 0x0000_0080;
        /// `PCRE2_FIRSTLINE`
        const FIRST_LINE_ONLY = 0x0000_0100;
        /// `PCRE2_MATCH_UNSET_BACKREF`
        const MATCH_UNSET_BACKREF = 0x0000_0200;
        /// `PCRE2_MULTILINE`
        const MULTILINE = 0x0000_0400;
        /// `PCRE2_NO_AUTO_CAPTURE`
        const EXPLICIT_CAPTURE = 0x0000_2000;
        /// `PCRE2_NO_AUTO_POSSESS`
        const NO_AUTO_POSSESS = 0x0000_4000;
        /// `PCRE2_NO_DOTSTAR_ANCHOR`
        const NO_DOTSTAR_ANCHOR = 0x0000_8000;
        /// `PCRE2_NO_START_OPTIMIZE`
        const NO_START_OPTIMIZE = 0x0001_0000;
        /// `PCRE2_UCP`
        const UNICODE = 0x0002_0000;
        /// `PCRE2_UNGREEDY`
        const UNGREEDY = 0x0004_0000;
        /// Validate UTF input; bindings invert this into `PCRE2_NO_UTF_CHECK`
        const CHECK_UNICODE_VALIDITY = 0x4000_0000;
        /// `PCRE2_ANCHORED`
        const ANCHORED = 0x8000_0000;
        /// JavaScript compatibility (`ALT_BSUX | MATCH_UNSET_BACKREF`)
        const JAVASCRIPT = 0x0000_0202;
        /// JIT-compile the pattern for complete matches
        const COMPILED = 1 << 32;
        /// JIT-compile the pattern for partial matches
        const COMPILED_PARTIAL = 1 << 33;
    }
}

impl_flag_set! {
    /// Extra compile options (`PCRE2_EXTRA_*`)
    pub struct ExtraCompileOptions: u32 {
        /// `PCRE2_EXTRA_ALLOW_SURROGATE_ESCAPES`
        const ALLOW_SURROGATE_ESCAPES = 0x1;
        /// `PCRE2_EXTRA_BAD_ESCAPE_IS_LITERAL`
        const BAD_ESCAPE_IS_LITERAL = 0x2;
        /// `PCRE2_EXTRA_MATCH_WORD`
        const MATCH_WORD = 0x4;
        /// `PCRE2_EXTRA_MATCH_LINE`
        const MATCH_LINE = 0x8;
    }
}

/// Character sequence treated as a newline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum NewLine {
    /// Carriage return
    Cr = 1,
    /// Linefeed
    Lf = 2,
    /// Carriage return followed by linefeed
    CrLf = 3,
    /// Any Unicode line ending
    Any = 4,
    /// Any of CR, LF or CRLF
    AnyCrLf = 5,
    /// The NUL character
    Nul = 6,
}

impl_name_conversions!(NewLine {
    Cr => "cr",
    Lf => "lf",
    CrLf => "crlf",
    Any => "any",
    AnyCrLf => "anycrlf",
    Nul => "nul",
});

/// Sequences matched by the `\R` escape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum BackslashR {
    /// Any Unicode line ending sequence
    Unicode = 1,
    /// Only CR, LF or CRLF
    AnyCrLf = 2,
}

impl_name_conversions!(BackslashR {
    Unicode => "unicode",
    AnyCrLf => "anycrlf",
});

/// Values an engine build uses when a setting is left unset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BuildDefaults {
    /// Default newline convention
    pub new_line: NewLine,
    /// Default `\R` behavior
    pub backslash_r: BackslashR,
    /// Default parenthesis nesting limit
    pub parens_limit: u32,
}

/// Defaults of a stock PCRE2 build, the single source for unset settings
pub const BUILD_DEFAULTS: BuildDefaults =
    BuildDefaults { new_line: NewLine::Lf, backslash_r: BackslashR::Unicode, parens_limit: 250 };
