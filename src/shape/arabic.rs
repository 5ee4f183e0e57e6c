//! Arabic contextual reshaping.
//!
//! Replaces each Arabic letter with the presentation form that matches its
//! position in a word (isolated, initial, medial, final), so that a renderer
//! placing one glyph per character still draws connected script. The
//! positional form of a letter depends on its own joining type and on whether
//! its nearest non-transparent neighbours can connect towards it.

/// Unicode joining type of a character (subset relevant to Arabic).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoiningType {
    /// Joins on both sides (beh, seen, ...)
    Dual,
    /// Joins only to the preceding letter (alef, dal, reh, waw, ...)
    Right,
    /// Forces joining on both sides without changing shape (tatweel)
    JoinCausing,
    /// Combining marks, ignored when looking for neighbours
    Transparent,
    /// Never joins
    NonJoining,
}

impl JoiningType {
    /// Whether a letter of this type connects to the following letter.
    pub fn joins_forward(self) -> bool {
        matches!(self, JoiningType::Dual | JoiningType::JoinCausing)
    }

    /// Whether a letter of this type connects to the preceding letter.
    pub fn joins_backward(self) -> bool {
        matches!(
            self,
            JoiningType::Dual | JoiningType::Right | JoiningType::JoinCausing
        )
    }
}

/// Positional form of a letter within a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionalForm {
    Isolated,
    Initial,
    Medial,
    Final,
}

const TATWEEL: char = '\u{0640}';
const LAM: char = '\u{0644}';

/// Presentation forms: (letter, isolated, final, initial, medial).
/// A zero means the letter has no such form.
const FORMS: &[(u32, u32, u32, u32, u32)] = &[
    (0x0621, 0xFE80, 0, 0, 0),
    (0x0622, 0xFE81, 0xFE82, 0, 0),
    (0x0623, 0xFE83, 0xFE84, 0, 0),
    (0x0624, 0xFE85, 0xFE86, 0, 0),
    (0x0625, 0xFE87, 0xFE88, 0, 0),
    (0x0626, 0xFE89, 0xFE8A, 0xFE8B, 0xFE8C),
    (0x0627, 0xFE8D, 0xFE8E, 0, 0),
    (0x0628, 0xFE8F, 0xFE90, 0xFE91, 0xFE92),
    (0x0629, 0xFE93, 0xFE94, 0, 0),
    (0x062A, 0xFE95, 0xFE96, 0xFE97, 0xFE98),
    (0x062B, 0xFE99, 0xFE9A, 0xFE9B, 0xFE9C),
    (0x062C, 0xFE9D, 0xFE9E, 0xFE9F, 0xFEA0),
    (0x062D, 0xFEA1, 0xFEA2, 0xFEA3, 0xFEA4),
    (0x062E, 0xFEA5, 0xFEA6, 0xFEA7, 0xFEA8),
    (0x062F, 0xFEA9, 0xFEAA, 0, 0),
    (0x0630, 0xFEAB, 0xFEAC, 0, 0),
    (0x0631, 0xFEAD, 0xFEAE, 0, 0),
    (0x0632, 0xFEAF, 0xFEB0, 0, 0),
    (0x0633, 0xFEB1, 0xFEB2, 0xFEB3, 0xFEB4),
    (0x0634, 0xFEB5, 0xFEB6, 0xFEB7, 0xFEB8),
    (0x0635, 0xFEB9, 0xFEBA, 0xFEBB, 0xFEBC),
    (0x0636, 0xFEBD, 0xFEBE, 0xFEBF, 0xFEC0),
    (0x0637, 0xFEC1, 0xFEC2, 0xFEC3, 0xFEC4),
    (0x0638, 0xFEC5, 0xFEC6, 0xFEC7, 0xFEC8),
    (0x0639, 0xFEC9, 0xFECA, 0xFECB, 0xFECC),
    (0x063A, 0xFECD, 0xFECE, 0xFECF, 0xFED0),
    (0x0641, 0xFED1, 0xFED2, 0xFED3, 0xFED4),
    (0x0642, 0xFED5, 0xFED6, 0xFED7, 0xFED8),
    (0x0643, 0xFED9, 0xFEDA, 0xFEDB, 0xFEDC),
    (0x0644, 0xFEDD, 0xFEDE, 0xFEDF, 0xFEE0),
    (0x0645, 0xFEE1, 0xFEE2, 0xFEE3, 0xFEE4),
    (0x0646, 0xFEE5, 0xFEE6, 0xFEE7, 0xFEE8),
    (0x0647, 0xFEE9, 0xFEEA, 0xFEEB, 0xFEEC),
    (0x0648, 0xFEED, 0xFEEE, 0, 0),
    (0x0649, 0xFEEF, 0xFEF0, 0xFBE8, 0xFBE9),
    (0x064A, 0xFEF1, 0xFEF2, 0xFEF3, 0xFEF4),
    // Persian / Urdu letters
    (0x067E, 0xFB56, 0xFB57, 0xFB58, 0xFB59),
    (0x0686, 0xFB7A, 0xFB7B, 0xFB7C, 0xFB7D),
    (0x0698, 0xFB8A, 0xFB8B, 0, 0),
    (0x06A9, 0xFB8E, 0xFB8F, 0xFB90, 0xFB91),
    (0x06AF, 0xFB92, 0xFB93, 0xFB94, 0xFB95),
    (0x06CC, 0xFBFC, 0xFBFD, 0xFBFE, 0xFBFF),
];

/// Lam-alef ligatures: (alef variant, isolated, final).
const LAM_ALEF: &[(char, char, char)] = &[
    ('\u{0622}', '\u{FEF5}', '\u{FEF6}'),
    ('\u{0623}', '\u{FEF7}', '\u{FEF8}'),
    ('\u{0625}', '\u{FEF9}', '\u{FEFA}'),
    ('\u{0627}', '\u{FEFB}', '\u{FEFC}'),
];

fn forms_of(c: char) -> Option<&'static (u32, u32, u32, u32, u32)> {
    let cp = c as u32;
    FORMS
        .binary_search_by_key(&cp, |entry| entry.0)
        .ok()
        .map(|i| &FORMS[i])
}

/// Check if a character is an Arabic combining mark (haraka).
pub fn is_harakah(c: char) -> bool {
    matches!(c as u32,
        0x0610..=0x061A
        | 0x064B..=0x065F
        | 0x0670
        | 0x06D6..=0x06DC
        | 0x06DF..=0x06E4
        | 0x06E7..=0x06E8
        | 0x06EA..=0x06ED)
}

/// Check if a character belongs to an Arabic block (base or presentation forms).
pub fn is_arabic(c: char) -> bool {
    matches!(c as u32,
        0x0600..=0x06FF | 0x0750..=0x077F | 0x08A0..=0x08FF | 0xFB50..=0xFDFF | 0xFE70..=0xFEFF)
}

/// Joining type of a character.
pub fn joining_type(c: char) -> JoiningType {
    if is_harakah(c) {
        return JoiningType::Transparent;
    }
    if c == TATWEEL {
        return JoiningType::JoinCausing;
    }
    match forms_of(c) {
        Some(&(_, _, 0, _, _)) => JoiningType::NonJoining,
        Some(&(_, _, _, 0, _)) => JoiningType::Right,
        Some(_) => JoiningType::Dual,
        None => JoiningType::NonJoining,
    }
}

fn lam_alef(alef: char) -> Option<(char, char)> {
    LAM_ALEF
        .iter()
        .find(|(a, _, _)| *a == alef)
        .map(|&(_, isolated, fin)| (isolated, fin))
}

/// Contextual reshaper for Arabic script.
#[derive(Debug, Clone, Copy)]
pub struct ArabicReshaper {
    /// Drop combining marks from the output
    pub delete_harakat: bool,
    /// Drop tatweel (kashida) from the output
    pub delete_tatweel: bool,
    /// Fold lam + alef into the mandatory ligature
    pub support_ligatures: bool,
}

impl Default for ArabicReshaper {
    fn default() -> Self {
        Self {
            delete_harakat: true,
            delete_tatweel: false,
            support_ligatures: true,
        }
    }
}

impl ArabicReshaper {
    /// Reshape a logical-order line.
    ///
    /// Characters without presentation forms pass through unchanged.
    pub fn reshape(&self, text: &str) -> String {
        let chars: Vec<char> = text
            .chars()
            .filter(|&c| !(self.delete_harakat && is_harakah(c)))
            .filter(|&c| !(self.delete_tatweel && c == TATWEEL))
            .collect();

        let mut out = String::with_capacity(text.len() * 3);
        let mut i = 0;
        while i < chars.len() {
            let c = chars[i];

            if self.support_ligatures && c == LAM {
                if let Some((isolated, fin)) = chars.get(i + 1).and_then(|&next| lam_alef(next)) {
                    out.push(if prev_joins_forward(&chars, i) {
                        fin
                    } else {
                        isolated
                    });
                    i += 2;
                    continue;
                }
            }

            out.push(shape_char(c, determine_form(&chars, i)));
            i += 1;
        }
        out
    }
}

/// Determine the positional form of the character at `index`.
pub fn determine_form(text: &[char], index: usize) -> PositionalForm {
    let jt = joining_type(text[index]);
    if !matches!(jt, JoiningType::Dual | JoiningType::Right) {
        return PositionalForm::Isolated;
    }

    let prev = prev_joins_forward(text, index);
    let next = jt == JoiningType::Dual && next_joins_backward(text, index);

    match (prev, next) {
        (false, false) => PositionalForm::Isolated,
        (false, true) => PositionalForm::Initial,
        (true, false) => PositionalForm::Final,
        (true, true) => PositionalForm::Medial,
    }
}

fn prev_joins_forward(text: &[char], index: usize) -> bool {
    text[..index]
        .iter()
        .rev()
        .map(|&c| joining_type(c))
        .find(|jt| *jt != JoiningType::Transparent)
        .is_some_and(JoiningType::joins_forward)
}

fn next_joins_backward(text: &[char], index: usize) -> bool {
    text[index + 1..]
        .iter()
        .map(|&c| joining_type(c))
        .find(|jt| *jt != JoiningType::Transparent)
        .is_some_and(JoiningType::joins_backward)
}

fn shape_char(c: char, form: PositionalForm) -> char {
    let Some(&(_, isolated, fin, initial, medial)) = forms_of(c) else {
        return c;
    };
    let cp = match form {
        PositionalForm::Isolated => isolated,
        PositionalForm::Final => fin,
        PositionalForm::Initial => initial,
        PositionalForm::Medial => medial,
    };
    let cp = if cp == 0 { isolated } else { cp };
    char::from_u32(cp).unwrap_or(c)
}
