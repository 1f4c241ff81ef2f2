/// Number of characters of the display name kept in a slug
pub const SLUG_PREFIX_CHARS: usize = 10;

/// Derive a DOM-safe identifier from a restaurant name
///
/// Keeps the first 10 characters, lower-cases them, then substitutes
/// punctuation and common French accents. Two names sharing the same
/// prefix produce the same slug.
pub fn slugify(name: &str) -> String {
    let prefix: String = name.chars().take(SLUG_PREFIX_CHARS).collect();
    let prefix = prefix.replace("...", "").to_lowercase();

    let mut slug = String::with_capacity(prefix.len());
    for c in prefix.chars() {
        match c {
            ' ' | '\'' => slug.push('-'),
            ',' | ':' | '"' | '(' | ')' => {}
            '&' => slug.push_str("et"),
            'à' => slug.push('a'),
            'é' => slug.push('e'),
            'ù' => slug.push('u'),
            'ê' | 'â' | 'ô' | 'û' | 'î' => {}
            other => slug.push(other),
        }
    }

    slug
}
