// src/bot/token.rs
// =============================================================================
// Button tokens (Telegram calls them callback_data).
//
// Two shapes, '|'-delimited:
//   nav|<form-urlencoded query>|<page>     e.g. nav|web+framework|2
//   readme|<owner/name>                    e.g. readme|octocat/Hello-World
//
// The query is form-urlencoded (space -> '+', '|' -> %7C, ...) so it never
// contains the delimiter. Repository full names can't contain '|' either.
// The token carries all the state a page change needs; nothing is stored
// on our side between taps.
// =============================================================================

use url::form_urlencoded;

use crate::error::TokenError;

const DELIMITER: char = '|';
const NAV_PREFIX: &str = "nav";
const README_PREFIX: &str = "readme";

/// Telegram rejects callback_data longer than this many bytes
pub const MAX_TOKEN_BYTES: usize = 64;

/// GitHub search never serves results past the 1000th, so no page past this
/// is ever reachable
pub const MAX_REACHABLE_PAGE: u32 = 1000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationToken {
    /// Show page `page` of the results for `query`
    Navigate { query: String, page: u32 },
    /// Send a README preview for `repo`
    Readme { repo: String },
}

impl NavigationToken {
    pub fn encode(&self) -> String {
        match self {
            NavigationToken::Navigate { query, page } => {
                let encoded: String = form_urlencoded::byte_serialize(query.as_bytes()).collect();
                format!("{NAV_PREFIX}{DELIMITER}{encoded}{DELIMITER}{page}")
            }
            NavigationToken::Readme { repo } => {
                format!("{README_PREFIX}{DELIMITER}{repo}")
            }
        }
    }

    pub fn decode(data: &str) -> Result<Self, TokenError> {
        let (prefix, rest) = data.split_once(DELIMITER).ok_or(TokenError::Unknown)?;

        match prefix {
            NAV_PREFIX => decode_navigation(rest),
            README_PREFIX => {
                let repo = rest.trim();
                if repo.is_empty() || repo.contains(DELIMITER) {
                    return Err(TokenError::Malformed(format!("bad repository in '{data}'")));
                }
                Ok(NavigationToken::Readme {
                    repo: repo.to_string(),
                })
            }
            _ => Err(TokenError::Unknown),
        }
    }

    /// True if the encoded form fits in a platform callback payload
    pub fn fits_transport(&self) -> bool {
        self.encode().len() <= MAX_TOKEN_BYTES
    }
}

// Decodes "<query>|<page>" (the part after "nav|")
fn decode_navigation(rest: &str) -> Result<NavigationToken, TokenError> {
    let (encoded_query, page) = rest
        .split_once(DELIMITER)
        .ok_or_else(|| TokenError::Malformed("navigation token without page".to_string()))?;

    if page.contains(DELIMITER) {
        return Err(TokenError::Malformed(
            "navigation token has extra fields".to_string(),
        ));
    }

    let page: u32 = page
        .parse()
        .map_err(|_| TokenError::Malformed(format!("bad page number '{page}'")))?;
    if page == 0 {
        return Err(TokenError::Malformed("page numbers start at 1".to_string()));
    }
    if page > MAX_REACHABLE_PAGE {
        return Err(TokenError::Malformed(format!("page {page} is out of range")));
    }

    // A string without '=' parses as a single key, fully decoded
    let query = form_urlencoded::parse(encoded_query.as_bytes())
        .next()
        .map(|(key, _)| key.into_owned())
        .unwrap_or_default();
    if query.trim().is_empty() {
        return Err(TokenError::Malformed("empty query".to_string()));
    }

    Ok(NavigationToken::Navigate { query, page })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nav(query: &str, page: u32) -> NavigationToken {
        NavigationToken::Navigate {
            query: query.to_string(),
            page,
        }
    }

    #[test]
    fn test_encode_shapes() {
        assert_eq!(nav("fastapi", 2).encode(), "nav|fastapi|2");
        assert_eq!(nav("web framework", 3).encode(), "nav|web+framework|3");
        assert_eq!(
            NavigationToken::Readme {
                repo: "octocat/Hello-World".to_string()
            }
            .encode(),
            "readme|octocat/Hello-World"
        );
    }

    #[test]
    fn test_round_trip() {
        let queries = [
            "fastapi",
            "web framework",
            "language:rust stars:>1000",
            "a+b & c=d",
            "100% coverage",
            "pipes | inside",
            "Ünïcödé 検索",
            "  spaced  ",
        ];
        for query in queries {
            for page in [1, 2, 57] {
                let token = nav(query, page);
                assert_eq!(NavigationToken::decode(&token.encode()), Ok(token));
            }
        }
    }

    #[test]
    fn test_encoded_query_never_contains_delimiter() {
        let encoded = nav("a|b|c", 1).encode();
        assert_eq!(encoded.matches(DELIMITER).count(), 2);
    }

    #[test]
    fn test_decode_readme() {
        assert_eq!(
            NavigationToken::decode("readme|octocat/Hello-World"),
            Ok(NavigationToken::Readme {
                repo: "octocat/Hello-World".to_string()
            })
        );
    }

    #[test]
    fn test_decode_malformed_navigation() {
        for data in ["nav|fastapi", "nav|fastapi|two", "nav|fastapi|0", "nav||2", "nav|q|2|3", "nav|q|-1"] {
            assert!(
                matches!(NavigationToken::decode(data), Err(TokenError::Malformed(_))),
                "{data} should be malformed"
            );
        }
    }

    #[test]
    fn test_decode_page_out_of_range() {
        for data in ["nav|q|1001", "nav|q|4294967295", "nav|q|4294967296"] {
            assert!(
                matches!(NavigationToken::decode(data), Err(TokenError::Malformed(_))),
                "{data} should be malformed"
            );
        }
        assert_eq!(NavigationToken::decode("nav|q|1000"), Ok(nav("q", MAX_REACHABLE_PAGE)));
    }

    #[test]
    fn test_decode_malformed_readme() {
        assert!(matches!(
            NavigationToken::decode("readme|"),
            Err(TokenError::Malformed(_))
        ));
    }

    #[test]
    fn test_decode_unknown() {
        for data in ["", "hello", "star|octocat/Hello-World", "navigate|q|1"] {
            assert_eq!(NavigationToken::decode(data), Err(TokenError::Unknown));
        }
    }

    #[test]
    fn test_fits_transport() {
        assert!(nav("fastapi", 100).fits_transport());
        assert!(!nav(&"x".repeat(80), 2).fits_transport());
    }
}
