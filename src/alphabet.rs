//! Fixed per-script letter tables.
//!
//! Vowel/consonant membership drives the `ISVOWEL`/`ISCONSONANT` conditions
//! and the exporter's character classes. Tables cover the Uzbek Cyrillic and
//! Latin alphabets; lookups are case-insensitive.

/// Uzbek Cyrillic vowels.
pub const CYRILLIC_VOWELS: &[char] = &['а', 'е', 'ё', 'и', 'о', 'у', 'ў', 'э', 'ю', 'я'];

/// Uzbek Cyrillic consonants.
pub const CYRILLIC_CONSONANTS: &[char] = &[
    'б', 'в', 'г', 'д', 'ж', 'з', 'й', 'к', 'л', 'м', 'н', 'п', 'р', 'с', 'т', 'ф', 'х', 'ц',
    'ч', 'ш', 'щ', 'ъ', 'ь', 'қ', 'ғ', 'ҳ',
];

/// Uzbek Latin vowels.
pub const LATIN_VOWELS: &[char] = &['a', 'e', 'i', 'o', 'u'];

/// Uzbek Latin consonants.
pub const LATIN_CONSONANTS: &[char] = &[
    'b', 'c', 'd', 'f', 'g', 'h', 'j', 'k', 'l', 'm', 'n', 'p', 'q', 'r', 's', 't', 'v', 'x',
    'y', 'z',
];

fn lowercase(c: char) -> char {
    // Both alphabets lowercase to a single scalar.
    c.to_lowercase().next().unwrap_or(c)
}

/// Is this letter a vowel in either script?
pub fn is_vowel(c: char) -> bool {
    let c = lowercase(c);
    CYRILLIC_VOWELS.contains(&c) || LATIN_VOWELS.contains(&c)
}

/// Is this letter a consonant in either script?
pub fn is_consonant(c: char) -> bool {
    let c = lowercase(c);
    CYRILLIC_CONSONANTS.contains(&c) || LATIN_CONSONANTS.contains(&c)
}

/// All vowels across both scripts, as a bracketed character class.
pub fn vowel_class() -> String {
    let mut class = String::from("[");
    class.extend(CYRILLIC_VOWELS.iter());
    class.extend(LATIN_VOWELS.iter());
    class.push(']');
    class
}

/// All consonants across both scripts, as a bracketed character class.
pub fn consonant_class() -> String {
    let mut class = String::from("[");
    class.extend(CYRILLIC_CONSONANTS.iter());
    class.extend(LATIN_CONSONANTS.iter());
    class.push(']');
    class
}
