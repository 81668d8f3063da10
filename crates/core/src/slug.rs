//! URL slug generation for destinations and blog posts.

/// Maximum slug length; longer titles are cut at a word boundary.
pub const MAX_SLUG_LEN: usize = 80;

/// Turn a title into a lowercase ASCII slug.
///
/// Runs of non-alphanumeric characters collapse into a single `-`, and
/// leading/trailing dashes are dropped.
///
/// ```
/// use bucketlist_core::slug::slugify;
///
/// assert_eq!(slugify("River Rafting in Rishikesh!"), "river-rafting-in-rishikesh");
/// assert_eq!(slugify("  --Top 10   Treks--  "), "top-10-treks");
/// ```
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;

    for ch in title.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            slug.push(ch.to_ascii_lowercase());
            pending_dash = false;
        } else {
            pending_dash = true;
        }
    }

    if slug.len() > MAX_SLUG_LEN {
        let cut = slug[..MAX_SLUG_LEN].rfind('-').unwrap_or(MAX_SLUG_LEN);
        slug.truncate(cut);
    }
    slug
}
