//! Hash domain and production-source governance locks.
//!
//! Proves:
//! 1. Canonical domain set has expected count (catches forgotten additions to ALL)
//! 2. All domain byte strings are unique and null-terminated
//! 3. All domains follow the `PUSHBOX::*::V1\0` naming convention
//! 4. `canonical_hash` is plain SHA-256 over `domain || data`, and state keys
//!    hash under their own domain
//! 5. No raw `PUSHBOX::` domain literals in production source outside `hash.rs`
//! 6. No `.unwrap()` or `.expect(` in library production source

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use pushbox_kernel::proof::hash::{canonical_hash, HashDomain};
use pushbox_search::state_key::StateKey;

// ---------------------------------------------------------------------------
// 1. Canonical set count
// ---------------------------------------------------------------------------

#[test]
fn hash_domain_canonical_set_count() {
    assert_eq!(
        HashDomain::ALL.len(),
        3,
        "expected 3 domain variants; if you added a new domain, update this count"
    );
}

// ---------------------------------------------------------------------------
// 2. Unique, null-terminated
// ---------------------------------------------------------------------------

#[test]
fn hash_domain_all_unique_and_null_terminated() {
    let mut seen = BTreeSet::new();
    for domain in HashDomain::ALL {
        assert!(
            seen.insert(domain.as_bytes()),
            "duplicate domain bytes: {domain:?}"
        );
        assert!(
            domain.as_bytes().ends_with(&[0]),
            "{domain:?} is not null-terminated"
        );
    }
}

// ---------------------------------------------------------------------------
// 3. Naming convention
// ---------------------------------------------------------------------------

#[test]
fn hash_domain_all_follow_naming_convention() {
    for domain in HashDomain::ALL {
        let bytes = domain.as_bytes();
        assert!(
            bytes.starts_with(b"PUSHBOX::"),
            "{domain:?} does not start with PUSHBOX::"
        );
        assert!(
            bytes.ends_with(b"::V1\0"),
            "{domain:?} does not end with ::V1\\0"
        );
    }
}

// ---------------------------------------------------------------------------
// 4. Domain binding
// ---------------------------------------------------------------------------

#[test]
fn canonical_hash_matches_independent_sha256() {
    use sha2::{Digest, Sha256};

    let data = b"####\n#@$.#\n####";
    for domain in HashDomain::ALL {
        let mut hasher = Sha256::new();
        hasher.update(domain.as_bytes());
        hasher.update(data);
        let expected: [u8; 32] = hasher.finalize().into();
        let hash = canonical_hash(*domain, data);
        assert_eq!(hash.digest(), &expected, "{domain:?}");
        assert_eq!(
            hash.to_string(),
            format!("sha256:{}", hex::encode(expected)),
            "{domain:?}"
        );
    }
}

#[test]
fn state_keys_use_the_state_key_domain() {
    let bytes = [1u8, 0, 0, 0, 9, 0, 0, 0];
    let key = StateKey::from_identity_bytes(&bytes);
    assert_eq!(
        *key.content_hash(),
        canonical_hash(HashDomain::StateKey, &bytes)
    );
    assert_ne!(
        *key.content_hash(),
        canonical_hash(HashDomain::RunReport, &bytes)
    );
}

// ---------------------------------------------------------------------------
// 5-6. Production source scans
// ---------------------------------------------------------------------------

fn production_dirs() -> [PathBuf; 3] {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("../..");
    [
        root.join("kernel/src"),
        root.join("search/src"),
        root.join("harness/src"),
    ]
}

#[test]
fn no_raw_domain_literals_outside_authority() {
    let mut violations = Vec::new();
    for dir in production_dirs() {
        scan_dir_for_pattern(&dir, "b\"PUSHBOX::", Some("hash.rs"), &mut violations);
    }
    assert!(
        violations.is_empty(),
        "raw PUSHBOX:: domain literals found outside hash.rs:\n{}",
        violations.join("\n")
    );
}

#[test]
fn no_unwrap_or_expect_in_library_source() {
    let mut violations = Vec::new();
    for dir in production_dirs() {
        for pattern in [".unwrap()", ".expect("] {
            scan_dir_for_pattern(&dir, pattern, None, &mut violations);
        }
    }
    assert!(
        violations.is_empty(),
        "unwrap/expect found in production source:\n{}",
        violations.join("\n")
    );
}

/// Report lines containing `pattern`, skipping comments and `#[cfg(test)]`
/// blocks (tracked by brace depth).
fn scan_dir_for_pattern(
    dir: &Path,
    pattern: &str,
    authority_file: Option<&str>,
    violations: &mut Vec<String>,
) {
    for path in walkdir(dir) {
        if path.extension().and_then(|e| e.to_str()) != Some("rs") {
            continue;
        }
        if authority_file.is_some() && path.file_name().and_then(|n| n.to_str()) == authority_file
        {
            continue;
        }
        let Ok(content) = std::fs::read_to_string(&path) else {
            continue;
        };

        let mut brace_depth: usize = 0;
        let mut skip_depth: Option<usize> = None;
        let mut cfg_test_pending = false;

        for (i, line) in content.lines().enumerate() {
            let trimmed = line.trim();

            if trimmed.contains("#[cfg(test)]") {
                cfg_test_pending = true;
                continue;
            }

            let opens = line.chars().filter(|&c| c == '{').count();
            let closes = line.chars().filter(|&c| c == '}').count();

            if cfg_test_pending && opens > 0 {
                skip_depth = Some(brace_depth);
                cfg_test_pending = false;
            }

            brace_depth = brace_depth.saturating_add(opens);
            brace_depth = brace_depth.saturating_sub(closes);

            if let Some(depth) = skip_depth {
                if brace_depth <= depth {
                    skip_depth = None;
                }
                continue;
            }

            if trimmed.starts_with("//") {
                continue;
            }

            if trimmed.contains(pattern) {
                violations.push(format!("  {}:{}: {}", path.display(), i + 1, trimmed));
            }
        }
    }
}

/// Simple recursive directory walker.
fn walkdir(dir: &Path) -> Vec<PathBuf> {
    let mut results = Vec::new();
    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                results.extend(walkdir(&path));
            } else {
                results.push(path);
            }
        }
    }
    results
}
