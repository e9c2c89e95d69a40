//! Glyph name to Unicode lookup (Adobe Glyph List subset).
//!
//! Covers every glyph name used by the built-in simple-font encodings plus
//! the Greek alphabet and common typographic ligatures. Single-letter names
//! (`A`..`Z`, `a`..`z`) are resolved without the table.

use phf::phf_map;

/// Glyph names with their Unicode scalar.
pub(crate) static GLYPH_LIST: phf::Map<&'static str, char> = phf_map! {
    "space" => ' ', "exclam" => '!', "quotedbl" => '"', "numbersign" => '#',
    "dollar" => '$', "percent" => '%', "ampersand" => '&', "quotesingle" => '\'',
    "quoteright" => '\u{2019}', "parenleft" => '(', "parenright" => ')',
    "asterisk" => '*', "plus" => '+', "comma" => ',', "hyphen" => '-',
    "period" => '.', "slash" => '/', "zero" => '0', "one" => '1', "two" => '2',
    "three" => '3', "four" => '4', "five" => '5', "six" => '6', "seven" => '7',
    "eight" => '8', "nine" => '9', "colon" => ':', "semicolon" => ';',
    "less" => '<', "equal" => '=', "greater" => '>', "question" => '?',
    "at" => '@', "bracketleft" => '[', "backslash" => '\\', "bracketright" => ']',
    "asciicircum" => '^', "underscore" => '_', "grave" => '`',
    "quoteleft" => '\u{2018}', "braceleft" => '{', "bar" => '|',
    "braceright" => '}', "asciitilde" => '~',
    "exclamdown" => '¡', "cent" => '¢', "sterling" => '£', "fraction" => '\u{2044}',
    "yen" => '¥', "florin" => 'ƒ', "section" => '§', "currency" => '¤',
    "quotedblleft" => '\u{201C}', "guillemotleft" => '«', "guilsinglleft" => '‹',
    "guilsinglright" => '›', "fi" => '\u{FB01}', "fl" => '\u{FB02}',
    "ff" => '\u{FB00}', "ffi" => '\u{FB03}', "ffl" => '\u{FB04}',
    "endash" => '\u{2013}', "emdash" => '\u{2014}', "dagger" => '†',
    "daggerdbl" => '‡', "periodcentered" => '·', "paragraph" => '¶',
    "bullet" => '•', "quotesinglbase" => '\u{201A}', "quotedblbase" => '\u{201E}',
    "quotedblright" => '\u{201D}', "guillemotright" => '»', "ellipsis" => '…',
    "perthousand" => '‰', "questiondown" => '¿', "acute" => '´',
    "circumflex" => '\u{02C6}', "tilde" => '\u{02DC}', "macron" => '¯',
    "breve" => '\u{02D8}', "dotaccent" => '\u{02D9}', "dieresis" => '¨',
    "ring" => '\u{02DA}', "cedilla" => '¸', "hungarumlaut" => '\u{02DD}',
    "ogonek" => '\u{02DB}', "caron" => '\u{02C7}', "AE" => 'Æ', "ae" => 'æ',
    "ordfeminine" => 'ª', "ordmasculine" => 'º', "Lslash" => 'Ł', "lslash" => 'ł',
    "Oslash" => 'Ø', "oslash" => 'ø', "OE" => 'Œ', "oe" => 'œ',
    "dotlessi" => 'ı', "germandbls" => 'ß', "Euro" => '€', "trademark" => '™',
    "copyright" => '©', "registered" => '®', "degree" => '°', "plusminus" => '±',
    "mu" => 'µ', "multiply" => '×', "divide" => '÷', "logicalnot" => '¬',
    "brokenbar" => '¦', "onehalf" => '½', "onequarter" => '¼',
    "threequarters" => '¾', "onesuperior" => '¹', "twosuperior" => '²',
    "threesuperior" => '³', "nbspace" => '\u{00A0}', "sfthyphen" => '\u{00AD}',
    "minus" => '\u{2212}', "notequal" => '\u{2260}', "infinity" => '\u{221E}',
    "lessequal" => '\u{2264}', "greaterequal" => '\u{2265}',
    "partialdiff" => '\u{2202}', "summation" => '\u{2211}', "product" => '\u{220F}',
    "integral" => '\u{222B}', "radical" => '\u{221A}', "approxequal" => '\u{2248}',
    "lozenge" => '\u{25CA}', "Scaron" => 'Š', "scaron" => 'š', "Zcaron" => 'Ž',
    "zcaron" => 'ž', "Ydieresis" => 'Ÿ', "ydieresis" => 'ÿ',
    "Agrave" => 'À', "Aacute" => 'Á', "Acircumflex" => 'Â', "Atilde" => 'Ã',
    "Adieresis" => 'Ä', "Aring" => 'Å', "Ccedilla" => 'Ç', "Egrave" => 'È',
    "Eacute" => 'É', "Ecircumflex" => 'Ê', "Edieresis" => 'Ë', "Igrave" => 'Ì',
    "Iacute" => 'Í', "Icircumflex" => 'Î', "Idieresis" => 'Ï', "Eth" => 'Ð',
    "Ntilde" => 'Ñ', "Ograve" => 'Ò', "Oacute" => 'Ó', "Ocircumflex" => 'Ô',
    "Otilde" => 'Õ', "Odieresis" => 'Ö', "Ugrave" => 'Ù', "Uacute" => 'Ú',
    "Ucircumflex" => 'Û', "Udieresis" => 'Ü', "Yacute" => 'Ý', "Thorn" => 'Þ',
    "agrave" => 'à', "aacute" => 'á', "acircumflex" => 'â', "atilde" => 'ã',
    "adieresis" => 'ä', "aring" => 'å', "ccedilla" => 'ç', "egrave" => 'è',
    "eacute" => 'é', "ecircumflex" => 'ê', "edieresis" => 'ë', "igrave" => 'ì',
    "iacute" => 'í', "icircumflex" => 'î', "idieresis" => 'ï', "eth" => 'ð',
    "ntilde" => 'ñ', "ograve" => 'ò', "oacute" => 'ó', "ocircumflex" => 'ô',
    "otilde" => 'õ', "odieresis" => 'ö', "ugrave" => 'ù', "uacute" => 'ú',
    "ucircumflex" => 'û', "udieresis" => 'ü', "yacute" => 'ý', "thorn" => 'þ',
    "Alpha" => 'Α', "Beta" => 'Β', "Gamma" => 'Γ', "Delta" => '\u{2206}',
    "Epsilon" => 'Ε', "Zeta" => 'Ζ', "Eta" => 'Η', "Theta" => 'Θ', "Iota" => 'Ι',
    "Kappa" => 'Κ', "Lambda" => 'Λ', "Mu" => 'Μ', "Nu" => 'Ν', "Xi" => 'Ξ',
    "Omicron" => 'Ο', "Pi" => 'Π', "Rho" => 'Ρ', "Sigma" => 'Σ', "Tau" => 'Τ',
    "Upsilon" => 'Υ', "Phi" => 'Φ', "Chi" => 'Χ', "Psi" => 'Ψ', "Omega" => '\u{2126}',
    "alpha" => 'α', "beta" => 'β', "gamma" => 'γ', "delta" => 'δ',
    "epsilon" => 'ε', "zeta" => 'ζ', "eta" => 'η', "theta" => 'θ', "iota" => 'ι',
    "kappa" => 'κ', "lambda" => 'λ', "nu" => 'ν', "xi" => 'ξ', "omicron" => 'ο',
    "pi" => 'π', "rho" => 'ρ', "sigma" => 'σ', "sigma1" => 'ς', "tau" => 'τ',
    "upsilon" => 'υ', "phi" => 'φ', "chi" => 'χ', "psi" => 'ψ', "omega" => 'ω',
};
