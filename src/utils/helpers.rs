//! Helper functions and utilities
//!
//! This module contains common helper functions used throughout the application.

/// Generate a URL slug from an event title.
///
/// Lowercases, strips everything outside `[a-z0-9 -]`, collapses whitespace
/// runs into single hyphens, collapses repeated hyphens and trims leading or
/// trailing hyphens.
pub fn generate_slug(title: &str) -> String {
    let lowered = title.to_lowercase();
    let filtered: String = lowered
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == ' ' || *c == '-')
        .collect();

    let mut slug = String::with_capacity(filtered.len());
    let mut last_was_hyphen = false;
    for c in filtered.chars() {
        let c = if c == ' ' { '-' } else { c };
        if c == '-' {
            if !last_was_hyphen {
                slug.push('-');
            }
            last_was_hyphen = true;
        } else {
            slug.push(c);
            last_was_hyphen = false;
        }
    }

    slug.trim_matches('-').to_string()
}

/// Generate the public self-service registration URL for an event slug.
pub fn generate_registration_url(base_url: &str, slug: &str) -> String {
    if slug.is_empty() {
        return String::new();
    }
    format!("{}/{}/register", base_url.trim_end_matches('/'), slug)
}

/// Generate a random uppercase alphanumeric confirmation code.
///
/// Ambiguity is not a concern here, the code is always paired with an email
/// and only needs to be unique per deployment.
pub fn generate_confirmation_code(length: usize) -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
    let mut rng = rand::thread_rng();

    (0..length)
        .map(|_| {
            let idx = rng.gen_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

/// Validate email format (presence-level check, not RFC 5322)
pub fn is_valid_email(email: &str) -> bool {
    let trimmed = email.trim();
    if trimmed.len() <= 5 || trimmed.contains(char::is_whitespace) {
        return false;
    }
    match trimmed.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.starts_with('.'),
        None => false,
    }
}

/// Validate phone number format (basic validation)
pub fn is_valid_phone(phone: &str) -> bool {
    phone
        .chars()
        .all(|c| c.is_ascii_digit() || c == '+' || c == '-' || c == ' ' || c == '(' || c == ')')
        && phone.chars().filter(|c| c.is_ascii_digit()).count() >= 7
}

/// Calculate pagination offset
pub fn calculate_offset(page: i64, page_size: i64) -> i64 {
    (page.max(1) - 1) * page_size
}

/// Total page count for a result set
pub fn calculate_pages(total: i64, page_size: i64) -> i64 {
    if page_size <= 0 {
        return 0;
    }
    (total + page_size - 1) / page_size
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_slug() {
        assert_eq!(
            generate_slug("Mindful Leadership Mastery!!"),
            "mindful-leadership-mastery"
        );
        assert_eq!(generate_slug("  40-Day   Transformation  "), "40-day-transformation");
        assert_eq!(generate_slug("---"), "");
        assert_eq!(generate_slug("Déjà Vu Retreat"), "dj-vu-retreat");
    }

    #[test]
    fn test_generate_registration_url() {
        assert_eq!(
            generate_registration_url("https://zenflow.example/", "yoga-intro"),
            "https://zenflow.example/yoga-intro/register"
        );
        assert_eq!(generate_registration_url("https://zenflow.example", ""), "");
    }

    #[test]
    fn test_generate_confirmation_code() {
        let code = generate_confirmation_code(8);
        assert_eq!(code.len(), 8);
        assert!(code.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
    }

    #[test]
    fn test_is_valid_email() {
        assert!(is_valid_email("person@example.com"));
        assert!(!is_valid_email("person@com"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("a@b.c"));
    }

    #[test]
    fn test_pagination_math() {
        assert_eq!(calculate_offset(1, 12), 0);
        assert_eq!(calculate_offset(3, 12), 24);
        assert_eq!(calculate_offset(0, 12), 0);
        assert_eq!(calculate_pages(25, 12), 3);
        assert_eq!(calculate_pages(24, 12), 2);
        assert_eq!(calculate_pages(0, 12), 0);
    }
}
