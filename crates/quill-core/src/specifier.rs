//! Built-in type specifiers.

use std::fmt;

/// The type specifiers understood without any registered extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Builtin {
    /// `b`: integer in base 2.
    Binary,
    /// `c`: integer as a character.
    Char,
    /// `d`: signed decimal integer.
    Decimal,
    /// `i`: signed decimal integer.
    Integer,
    /// `e`: exponential notation.
    Exponential,
    /// `f`: fixed-point notation.
    Fixed,
    /// `g`: significant digits.
    General,
    /// `j`: JSON.
    Json,
    /// `o`: unsigned integer in base 8.
    Octal,
    /// `s`: string.
    String,
    /// `t`: `true` or `false`.
    Boolean,
    /// `T`: type name.
    TypeName,
    /// `u`: unsigned decimal integer.
    Unsigned,
    /// `v`: primitive value.
    Primitive,
    /// `x`: unsigned integer in lower-case hexadecimal.
    HexLower,
    /// `X`: unsigned integer in upper-case hexadecimal.
    HexUpper,
}

impl Builtin {
    /// Every built-in specifier.
    pub const ALL: [Builtin; 16] = [
        Self::Binary,
        Self::Char,
        Self::Decimal,
        Self::Integer,
        Self::Exponential,
        Self::Fixed,
        Self::General,
        Self::Json,
        Self::Octal,
        Self::String,
        Self::Boolean,
        Self::TypeName,
        Self::Unsigned,
        Self::Primitive,
        Self::HexLower,
        Self::HexUpper,
    ];

    pub fn from_char(c: char) -> Option<Self> {
        let builtin = match c {
            'b' => Self::Binary,
            'c' => Self::Char,
            'd' => Self::Decimal,
            'i' => Self::Integer,
            'e' => Self::Exponential,
            'f' => Self::Fixed,
            'g' => Self::General,
            'j' => Self::Json,
            'o' => Self::Octal,
            's' => Self::String,
            't' => Self::Boolean,
            'T' => Self::TypeName,
            'u' => Self::Unsigned,
            'v' => Self::Primitive,
            'x' => Self::HexLower,
            'X' => Self::HexUpper,
            _ => return None,
        };
        Some(builtin)
    }

    pub fn as_char(&self) -> char {
        match self {
            Self::Binary => 'b',
            Self::Char => 'c',
            Self::Decimal => 'd',
            Self::Integer => 'i',
            Self::Exponential => 'e',
            Self::Fixed => 'f',
            Self::General => 'g',
            Self::Json => 'j',
            Self::Octal => 'o',
            Self::String => 's',
            Self::Boolean => 't',
            Self::TypeName => 'T',
            Self::Unsigned => 'u',
            Self::Primitive => 'v',
            Self::HexLower => 'x',
            Self::HexUpper => 'X',
        }
    }

    /// Specifiers whose argument must be a number or parse as one.
    ///
    /// `o` is not checked: a non-numeric argument renders as `0`.
    pub fn takes_numeric_argument(&self) -> bool {
        matches!(
            self,
            Self::Binary
                | Self::Char
                | Self::Decimal
                | Self::Integer
                | Self::Unsigned
                | Self::HexLower
                | Self::HexUpper
                | Self::Exponential
                | Self::Fixed
                | Self::General
        )
    }

    /// Specifiers that carry a sign.
    pub fn is_signed_number(&self) -> bool {
        matches!(
            self,
            Self::Decimal | Self::Integer | Self::Exponential | Self::Fixed | Self::General
        )
    }

    /// Returns `false` for specifiers that describe a lazy argument rather
    /// than its result.
    pub fn evaluates_lazy(&self) -> bool {
        !matches!(self, Self::Boolean | Self::TypeName | Self::Primitive)
    }
}

impl fmt::Display for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}
