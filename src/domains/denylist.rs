use std::collections::HashSet;

/// Consumer email providers excluded from the harvested output
pub const DEFAULT_PUBLIC_DOMAINS: &[&str] = &[
    "gmail.com",
    "hotmail.com",
    "outlook.com",
    "yahoo.com",
    "icloud.com",
    "live.com",
    "aol.com",
    "protonmail.com",
    "bol.com.br",
    "uol.com.br",
    "terra.com.br",
    "msn.com",
    "gmx.com",
    "ymail.com",
];

/// Set of public provider domains, matched exactly
#[derive(Debug, Clone)]
pub struct Denylist {
    domains: HashSet<String>,
}

impl Denylist {
    pub fn new<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            domains: domains.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, domain: &str) -> bool {
        self.domains.contains(domain)
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }
}

impl Default for Denylist {
    fn default() -> Self {
        Self::new(DEFAULT_PUBLIC_DOMAINS.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_covers_builtin_providers() {
        let denylist = Denylist::default();
        assert_eq!(denylist.len(), DEFAULT_PUBLIC_DOMAINS.len());
        assert!(denylist.contains("gmail.com"));
        assert!(denylist.contains("terra.com.br"));
    }

    #[test]
    fn test_match_is_exact() {
        let denylist = Denylist::default();
        assert!(!denylist.contains("mail.gmail.com"));
        assert!(!denylist.contains("gmail.co"));
        assert!(!denylist.contains("nist.gov"));
    }

    #[test]
    fn test_custom_list() {
        let denylist = Denylist::new(vec!["corp.test".to_string()]);
        assert!(denylist.contains("corp.test"));
        assert!(!denylist.contains("gmail.com"));
    }
}
