use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Maps extended-Latin letters onto plain ASCII before a query is tokenized.
pub trait CharFolding {
    fn fold(&self, text: &str) -> String;
}

/// Default transliteration: German umlauts and ligatures spelled out,
/// every other diacritic dropped from its base letter.
#[derive(Clone, Copy, Debug, Default)]
pub struct LatinFolding;

const TRANSLITERATIONS: &[(char, &str)] = &[
    ('\u{00E4}', "ae"),
    ('\u{00F6}', "oe"),
    ('\u{00FC}', "ue"),
    ('\u{00C4}', "Ae"),
    ('\u{00D6}', "Oe"),
    ('\u{00DC}', "Ue"),
    ('\u{00DF}', "ss"),
    ('\u{1E9E}', "SS"),
    ('\u{00E6}', "ae"),
    ('\u{00C6}', "Ae"),
    ('\u{0153}', "oe"),
    ('\u{0152}', "Oe"),
    ('\u{00F8}', "o"),
    ('\u{00D8}', "O"),
    ('\u{0142}', "l"),
    ('\u{0141}', "L"),
    ('\u{0111}', "d"),
    ('\u{0110}', "D"),
];

impl CharFolding for LatinFolding {
    fn fold(&self, text: &str) -> String {
        let mut spelled = String::with_capacity(text.len());
        for c in text.nfc() {
            match transliterate(c) {
                Some(s) => spelled.push_str(s),
                None => spelled.push(c),
            }
        }
        strip_diacritics(&spelled)
    }
}

fn transliterate(c: char) -> Option<&'static str> {
    if c.is_ascii() {
        return None;
    }
    TRANSLITERATIONS
        .iter()
        .find(|(from, _)| *from == c)
        .map(|(_, to)| *to)
}

/// Decompose and drop combining marks: "café" becomes "cafe".
pub fn strip_diacritics(s: &str) -> String {
    s.nfd().filter(|c| !is_combining_mark(*c)).collect()
}
