//! Forecast Evolution
//!
//! A Sager forecast covers roughly the next 12 to 24 hours. The day after
//! is derived with a fixed evolution table: rain clears, unsettled
//! weather settles, fair weather persists.
//!
//! ```text
//! day 1   a b c   d e f   g   h   j   k   l   m n   p r s   t   u w   x   y
//! day 2   a a a   d d d   m   n   d   e   f   r r   x x x   a   c c   a   c
//! ```
//!
//! Applied repeatedly the chain always settles into `a` or `d`.

use crate::lookup::is_shower_letter;

/// Next day's forecast letter
pub fn evolve_letter(letter: char) -> char {
    match letter {
        'a' | 'b' | 'c' | 't' | 'x' => 'a',
        'd' | 'e' | 'f' | 'j' => 'd',
        'g' => 'm',
        'h' => 'n',
        'k' => 'e',
        'l' => 'f',
        'm' | 'n' => 'r',
        'p' | 'r' | 's' => 'x',
        'u' | 'w' | 'y' => 'c',
        _ => 'd',
    }
}

/// Next day's forecast code, carrying the shower/flurry suffix
///
/// A suffix on the input is kept when the evolved letter is still a
/// shower letter; a shower letter reached from a plain code gets `1`.
pub fn evolve_code(code: &str) -> String {
    let mut chars = code.chars();
    let letter = evolve_letter(chars.next().unwrap_or('d'));
    if !is_shower_letter(letter) {
        return letter.to_string();
    }
    let suffix = chars.next().filter(|c| *c == '1' || *c == '2').unwrap_or('1');
    format!("{}{}", letter, suffix)
}
